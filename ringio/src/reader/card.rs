// ringio-rs/ringio/src/reader/card.rs

//! Cards the reader reports from a poll.

use crate::types::{AccessCode, Idm, Pmm, Uid};
use crate::{Error, Result};

/// One detected card. Mifare cards identify by UID and can carry an access
/// code once a sector read filled it in; FeliCa cards identify by IDm+PMM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Card {
    /// Mifare Classic (wire type byte 0x10).
    Mifare {
        uid: Uid,
        /// Filled by `ReaderLink::read_card_info`, absent right after a poll.
        access_code: Option<AccessCode>,
    },
    /// FeliCa (wire type byte 0x20).
    Felica { idm: Idm, pmm: Pmm },
}

impl Card {
    pub fn is_mifare(&self) -> bool {
        matches!(self, Card::Mifare { .. })
    }

    pub fn is_felica(&self) -> bool {
        matches!(self, Card::Felica { .. })
    }

    /// Mifare UID; `InvalidCard` when called on a FeliCa card.
    pub fn uid(&self) -> Result<&Uid> {
        match self {
            Card::Mifare { uid, .. } => Ok(uid),
            Card::Felica { .. } => Err(Error::InvalidCard(
                "FeliCa cards have no Mifare UID".into(),
            )),
        }
    }

    /// FeliCa IDm; `InvalidCard` when called on a Mifare card.
    pub fn idm(&self) -> Result<&Idm> {
        match self {
            Card::Felica { idm, .. } => Ok(idm),
            Card::Mifare { .. } => Err(Error::InvalidCard("Mifare cards have no IDm".into())),
        }
    }

    /// FeliCa PMM; `InvalidCard` when called on a Mifare card.
    pub fn pmm(&self) -> Result<&Pmm> {
        match self {
            Card::Felica { pmm, .. } => Ok(pmm),
            Card::Mifare { .. } => Err(Error::InvalidCard("Mifare cards have no PMM".into())),
        }
    }

    /// Access code, if one has been read off the card.
    pub fn access_code(&self) -> Option<&AccessCode> {
        match self {
            Card::Mifare { access_code, .. } => access_code.as_ref(),
            Card::Felica { .. } => None,
        }
    }

    /// Printable 16-character ID derived from the FeliCa identifier.
    /// `InvalidCard` for Mifare cards or non-derivable identifiers.
    pub fn amuse_id(&self) -> Result<String> {
        crate::reader::amuse::amuse_id(self.idm()?)
    }
}
