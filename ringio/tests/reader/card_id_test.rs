#[path = "../common/mod.rs"]
mod common;

use common::{sample_idm, sample_pmm};
use ringio::reader::{Card, amuse_id};
use ringio::{Error, Idm};

#[test]
fn derivation_is_deterministic() {
    let first = amuse_id(&sample_idm()).unwrap();
    let second = amuse_id(&sample_idm()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 16);
}

#[test]
fn derivation_rejects_non_amusement_identifiers() {
    // Consumer FeliCa identifiers carry a nonzero high nibble.
    let idm = Idm::from_bytes([0xF0, 0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE]);
    assert!(matches!(amuse_id(&idm), Err(Error::InvalidCard(_))));
}

#[test]
fn card_level_accessor_requires_felica() {
    let card = Card::Felica {
        idm: sample_idm(),
        pmm: sample_pmm(),
    };
    assert_eq!(card.amuse_id().unwrap(), amuse_id(&sample_idm()).unwrap());

    let mifare = Card::Mifare {
        uid: ringio::Uid::try_from(&[1u8, 2, 3, 4][..]).unwrap(),
        access_code: None,
    };
    assert!(matches!(mifare.amuse_id(), Err(Error::InvalidCard(_))));
}

#[test]
fn neighboring_identifiers_diverge() {
    let mut bytes = *sample_idm().as_bytes();
    let base = amuse_id(&sample_idm()).unwrap();
    bytes[7] ^= 1;
    let flipped = amuse_id(&Idm::from_bytes(bytes)).unwrap();
    assert_ne!(base, flipped);
}
