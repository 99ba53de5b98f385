// ringio-rs/ringio/src/reader/mod.rs

//! Card-reader driver: transactional command/response engine and the card
//! operations built on top of it.

pub mod amuse;
pub mod card;
pub mod command;
pub mod frame;

pub use amuse::amuse_id;
pub use card::Card;
pub use command::{ReaderCommand, ReaderStatus};
pub use frame::{ReaderResponse, build_request, escape_bytes, unescape_bytes};

use std::convert::TryFrom;

use log::{debug, warn};

use crate::constants::{
    ACCESS_CODE_BLOCK, ACCESS_CODE_OFFSET, ACCESS_CODE_TRAILER_BLOCK, READER_DEFAULT_KEY_A,
    READER_DEFAULT_KEY_B, READER_ESCAPE, READER_KNOWN_FIRMWARE, READER_MARKER,
};
use crate::transport::Transport;
use crate::types::{AccessCode, BlockData, CardTypeMask, Idm, LightColor, MifareKey, Pmm, Uid};
use crate::utils::bytes_to_hex;
use crate::{Error, Result};

/// Reader LED channels addressable by `set_channel_intensity`. Combine with
/// `|`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorChannel(u8);

impl ColorChannel {
    pub const RED: Self = Self(0x01);
    pub const GREEN: Self = Self(0x02);
    pub const BLUE: Self = Self(0x04);

    pub fn bits(&self) -> u8 {
        self.0
    }

    fn has(&self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl std::ops::BitOr for ColorChannel {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Transactional engine for the card reader.
///
/// Strictly one transaction at a time: every command is fully answered before
/// the next goes out. The sequence byte increments mod 256 on every send,
/// whether or not a response follows.
pub struct ReaderLink {
    transport: Box<dyn Transport>,
    seq: u8,
    ready: bool,
    radio_enabled: bool,
    firmware_version: u8,
    hardware_version: String,
    color: LightColor,
    last_poll: Vec<Card>,
}

impl ReaderLink {
    /// Wrap a transport. No traffic until `initialize`.
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            seq: 0,
            ready: false,
            radio_enabled: false,
            firmware_version: 0,
            hardware_version: String::new(),
            color: LightColor::OFF,
            last_poll: Vec::new(),
        }
    }

    /// Reset handshake has completed.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// The NFC radio is on.
    pub fn radio_enabled(&self) -> bool {
        self.radio_enabled
    }

    /// Firmware revision byte reported during `initialize`.
    pub fn firmware_version(&self) -> u8 {
        self.firmware_version
    }

    /// Hardware revision string reported during `initialize`.
    pub fn hardware_version(&self) -> &str {
        &self.hardware_version
    }

    /// Last LED color handed to the reader.
    pub fn color(&self) -> LightColor {
        self.color
    }

    /// Cards returned by the most recent `poll`.
    pub fn last_poll(&self) -> &[Card] {
        &self.last_poll
    }

    /// Full bring-up: reset handshake, version queries, stock keys.
    /// Does nothing if already initialized.
    pub fn initialize(&mut self) -> Result<()> {
        if self.ready {
            return Ok(());
        }
        self.reset()?;
        self.fetch_firmware_version()?;
        self.fetch_hardware_version()?;
        self.set_default_keys()?;
        Ok(())
    }

    /// Turn the LEDs off, drop the radio, and mark the link torn down.
    /// Does nothing if not initialized.
    pub fn close(&mut self) -> Result<()> {
        if !self.ready {
            return Ok(());
        }
        self.clear_color()?;
        self.radio_off()?;
        self.ready = false;
        self.last_poll.clear();
        Ok(())
    }

    /// Magic handshake, mandatory before anything else. Legal once per power
    /// cycle: a repeat is answered with `InvalidCommand`, which is the
    /// defined benign outcome and accepted as success.
    pub fn reset(&mut self) -> Result<()> {
        let resp = self.transact(ReaderCommand::Reset, &[])?;
        match resp.status {
            ReaderStatus::Ok | ReaderStatus::InvalidCommand => {
                self.ready = true;
                Ok(())
            }
            status => Err(Error::DeviceStatus {
                command: ReaderCommand::Reset.code(),
                status: status.to_byte(),
            }),
        }
    }

    /// Enable the NFC radio for the given card families. Required before any
    /// card operation.
    pub fn radio_on(&mut self, mask: CardTypeMask) -> Result<()> {
        let resp = self.transact(ReaderCommand::RadioOn, &[mask.bits()])?;
        self.expect_ok(ReaderCommand::RadioOn, &resp)?;
        self.radio_enabled = true;
        Ok(())
    }

    /// Disable the NFC radio.
    pub fn radio_off(&mut self) -> Result<()> {
        self.radio_enabled = false;
        let resp = self.transact(ReaderCommand::RadioOff, &[])?;
        self.expect_ok(ReaderCommand::RadioOff, &resp)
    }

    /// List the cards currently in the field.
    ///
    /// Polling faster than roughly every 150 ms makes the firmware return
    /// errors; pace accordingly.
    pub fn poll(&mut self) -> Result<&[Card]> {
        self.require_radio()?;
        self.last_poll.clear();
        let resp = self.transact(ReaderCommand::CardPoll, &[])?;
        self.expect_ok(ReaderCommand::CardPoll, &resp)?;

        if resp.payload.is_empty() {
            return Ok(&self.last_poll);
        }

        let count = crate::utils::byte_at(&resp.payload, 0)? as usize;
        let mut at = 1usize;
        for _ in 0..count {
            let card_type = crate::utils::byte_at(&resp.payload, at)?;
            let id_len = crate::utils::byte_at(&resp.payload, at + 1)? as usize;
            let id = crate::utils::slice_at(&resp.payload, at + 2, id_len)?;
            at += 2 + id_len;
            match card_type {
                0x10 => self.last_poll.push(Card::Mifare {
                    uid: Uid::try_from(id)?,
                    access_code: None,
                }),
                0x20 => {
                    if id_len != 16 {
                        return Err(Error::Protocol(format!(
                            "FeliCa entry with {}-byte identifier",
                            id_len
                        )));
                    }
                    self.last_poll.push(Card::Felica {
                        idm: Idm::try_from(&id[..8])?,
                        pmm: Pmm::try_from(&id[8..])?,
                    });
                }
                other => {
                    return Err(Error::Protocol(format!("unknown card type {:#04x}", other)));
                }
            }
        }
        Ok(&self.last_poll)
    }

    /// Select the Mifare card to talk to. 4-byte UIDs use the short select,
    /// 7-byte UIDs the long one.
    pub fn select_card(&mut self, card: &Card) -> Result<()> {
        self.require_radio()?;
        let uid = card.uid()?;
        let command = if uid.len() == 4 {
            ReaderCommand::MifareSelect
        } else {
            ReaderCommand::MifareSelectLong
        };
        let resp = self.transact(command, uid.as_bytes())?;
        self.expect_ok(command, &resp)
    }

    /// Load the key used by subsequent Key A authentications.
    pub fn set_key_a(&mut self, key: &MifareKey) -> Result<()> {
        let resp = self.transact(ReaderCommand::MifareSetKeyA, key.as_bytes())?;
        self.expect_ok(ReaderCommand::MifareSetKeyA, &resp)
    }

    /// Load the key used by subsequent Key B authentications.
    pub fn set_key_b(&mut self, key: &MifareKey) -> Result<()> {
        let resp = self.transact(ReaderCommand::MifareSetKeyB, key.as_bytes())?;
        self.expect_ok(ReaderCommand::MifareSetKeyB, &resp)
    }

    /// Authenticate a sector trailer with the loaded Key A. Required once per
    /// sector before reading or writing its blocks.
    pub fn authenticate_key_a(&mut self, uid: &Uid, block: u8) -> Result<()> {
        self.require_radio()?;
        let resp = self.transact(ReaderCommand::MifareAuthKeyA, &auth_payload(uid, block))?;
        self.expect_ok(ReaderCommand::MifareAuthKeyA, &resp)
    }

    /// Authenticate a sector trailer with the loaded Key B.
    pub fn authenticate_key_b(&mut self, uid: &Uid, block: u8) -> Result<()> {
        self.require_radio()?;
        let resp = self.transact(ReaderCommand::MifareAuthKeyB, &auth_payload(uid, block))?;
        self.expect_ok(ReaderCommand::MifareAuthKeyB, &resp)
    }

    /// Read one block off the selected, authenticated card.
    pub fn read_block(&mut self, uid: &Uid, block: u8) -> Result<BlockData> {
        self.require_radio()?;
        let resp = self.transact(ReaderCommand::MifareReadBlock, &auth_payload(uid, block))?;
        self.expect_ok(ReaderCommand::MifareReadBlock, &resp)?;
        BlockData::try_from(&resp.payload[..])
    }

    /// Write one block to the selected, authenticated card.
    pub fn write_block(&mut self, uid: &Uid, block: u8, data: &BlockData) -> Result<()> {
        self.require_radio()?;
        let mut payload = auth_payload(uid, block).to_vec();
        payload.extend_from_slice(data.as_bytes());
        let resp = self.transact(ReaderCommand::MifareWriteBlock, &payload)?;
        self.expect_ok(ReaderCommand::MifareWriteBlock, &resp)
    }

    /// Read the 10-byte access code: authenticate the sector trailer with
    /// Key A, read the data block, take the trailing bytes.
    pub fn read_access_code(&mut self, uid: &Uid) -> Result<AccessCode> {
        self.authenticate_key_a(uid, ACCESS_CODE_TRAILER_BLOCK)?;
        let block = self.read_block(uid, ACCESS_CODE_BLOCK)?;
        AccessCode::try_from(&block.as_bytes()[ACCESS_CODE_OFFSET..])
    }

    /// Fill in everything the card family supports asking for. For Mifare
    /// cards that is the access code; FeliCa cards already carry all their
    /// information from the poll.
    pub fn read_card_info(&mut self, card: &mut Card) -> Result<()> {
        match card {
            Card::Felica { .. } => Ok(()),
            Card::Mifare { uid, access_code } => {
                let uid = uid.clone();
                *access_code = Some(self.read_access_code(&uid)?);
                Ok(())
            }
        }
    }

    /// Set the reader LED color. The firmware sends no response to light
    /// commands; this is fire-and-forget.
    pub fn set_color(&mut self, color: LightColor) -> Result<()> {
        self.send_command(ReaderCommand::LightSetColor, &[color.r, color.g, color.b])?;
        self.color = color;
        Ok(())
    }

    /// Set the reader LED color from components.
    pub fn set_color_rgb(&mut self, r: u8, g: u8, b: u8) -> Result<()> {
        self.set_color(LightColor::new(r, g, b))
    }

    /// Set selected LED channels to an intensity, leaving the rest alone.
    pub fn set_channel_intensity(&mut self, channel: ColorChannel, value: u8) -> Result<()> {
        self.send_command(ReaderCommand::LightSetChannel, &[channel.bits(), value])?;
        self.color = LightColor::new(
            if channel.has(ColorChannel::RED) {
                value
            } else {
                self.color.r
            },
            if channel.has(ColorChannel::GREEN) {
                value
            } else {
                self.color.g
            },
            if channel.has(ColorChannel::BLUE) {
                value
            } else {
                self.color.b
            },
        );
        Ok(())
    }

    /// LEDs off.
    pub fn clear_color(&mut self) -> Result<()> {
        self.set_color(LightColor::BLACK)
    }

    /// Load the stock keys for the cards this cabinet reads.
    pub fn set_default_keys(&mut self) -> Result<()> {
        self.set_key_a(&MifareKey::from_bytes(READER_DEFAULT_KEY_A))?;
        self.set_key_b(&MifareKey::from_bytes(READER_DEFAULT_KEY_B))
    }

    fn fetch_firmware_version(&mut self) -> Result<()> {
        let resp = self.transact(ReaderCommand::GetFirmwareVersion, &[])?;
        self.expect_ok(ReaderCommand::GetFirmwareVersion, &resp)?;
        self.firmware_version = crate::utils::byte_at(&resp.payload, 0)?;
        if self.firmware_version != READER_KNOWN_FIRMWARE {
            warn!(
                "reader firmware {:#04x} not recognized, hoping for the best",
                self.firmware_version
            );
        }
        Ok(())
    }

    fn fetch_hardware_version(&mut self) -> Result<()> {
        let resp = self.transact(ReaderCommand::GetHardwareVersion, &[])?;
        self.expect_ok(ReaderCommand::GetHardwareVersion, &resp)?;
        self.hardware_version = crate::utils::ascii_at(&resp.payload, 0, resp.payload.len())?;
        Ok(())
    }

    /// One full request/response exchange.
    fn transact(&mut self, command: ReaderCommand, payload: &[u8]) -> Result<ReaderResponse> {
        self.send_command(command, payload)?;
        self.read_response()
    }

    fn send_command(&mut self, command: ReaderCommand, payload: &[u8]) -> Result<()> {
        if !self.ready && command != ReaderCommand::Reset {
            return Err(Error::NotReady);
        }
        let frame = build_request(self.seq, command.code(), payload);
        debug!("reader -> {}", bytes_to_hex(&frame));
        self.transport.send(&frame)?;
        self.seq = self.seq.wrapping_add(1);
        Ok(())
    }

    /// Read one response frame: marker, length, then `length` logical bytes
    /// with escapes resolved as they arrive.
    fn read_response(&mut self) -> Result<ReaderResponse> {
        let marker = self.transport.recv_byte()?;
        if marker != READER_MARKER {
            return Err(Error::UnexpectedResponse {
                expected: READER_MARKER,
                actual: marker,
            });
        }
        let len = self.transport.recv_byte()? as usize;
        let mut body = Vec::with_capacity(len);
        while body.len() < len {
            let b = self.transport.recv_byte()?;
            body.push(if b == READER_ESCAPE {
                self.transport.recv_byte()?.wrapping_add(1)
            } else {
                b
            });
        }
        debug!("reader <- e0 {:02x} {}", len, bytes_to_hex(&body));
        ReaderResponse::parse(&body)
    }

    fn require_radio(&self) -> Result<()> {
        if !self.ready || !self.radio_enabled {
            return Err(Error::NotReady);
        }
        Ok(())
    }

    fn expect_ok(&self, command: ReaderCommand, resp: &ReaderResponse) -> Result<()> {
        if !resp.status.is_ok() {
            return Err(Error::DeviceStatus {
                command: command.code(),
                status: resp.status.to_byte(),
            });
        }
        Ok(())
    }
}

fn auth_payload(uid: &Uid, block: u8) -> [u8; 5] {
    // Only the first 4 UID bytes ride along; 7-byte UIDs are truncated the
    // same way the firmware expects.
    let mut payload = [0u8; 5];
    payload[..4].copy_from_slice(&uid.as_bytes()[..4]);
    payload[4] = block;
    payload
}
