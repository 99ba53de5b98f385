// fixtures.rs — commonly used identifiers and payloads
#![allow(dead_code)]

use ringio::{Idm, Pmm};

pub fn sample_idm_bytes() -> [u8; 8] {
    [0x01, 0x2E, 0x44, 0x98, 0xEA, 0x63, 0x55, 0x01]
}

pub fn sample_pmm_bytes() -> [u8; 8] {
    [0x00, 0xF1, 0x00, 0x00, 0x00, 0x01, 0x43, 0x00]
}

pub fn sample_idm() -> Idm {
    Idm::from_bytes(sample_idm_bytes())
}

pub fn sample_pmm() -> Pmm {
    Pmm::from_bytes(sample_pmm_bytes())
}

pub fn sample_mifare_uid() -> [u8; 4] {
    [0xDE, 0xAD, 0xBE, 0xEF]
}
