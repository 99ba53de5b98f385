// ringio-rs/ringio/src/test_support.rs

//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize common MockTransport setup so tests across the
//! crate and tests/ directory can reuse the same logic.
#![allow(dead_code)]
#![allow(missing_docs)]

use std::cell::RefCell;
use std::rc::Rc;

use crate::constants::{
    TOUCH_DATA, TOUCH_FRAME_LEN, TOUCH_GET_ACTIVE_UNITS, TOUCH_GET_SYNC_BOARD_VER,
    TOUCH_GET_UNIT_BOARD_VER, TOUCH_SET_THRESHOLDS, TOUCH_START_AUTO_SCAN, TOUCH_UNITS,
};
use crate::reader::frame::escape_bytes;
use crate::touch::command::checksum;
use crate::transport::{MockTransport, Transport};
use crate::types::Side;
use crate::Result;

/// Mock transport that can still be driven after a link has taken ownership
/// of it. Clones share the same underlying [`MockTransport`]; a test keeps
/// one clone for seeding and assertions while the link owns the other.
#[derive(Debug, Clone, Default)]
pub struct SharedMock {
    inner: Rc<RefCell<MockTransport>>,
}

impl SharedMock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes for the link to read.
    pub fn push_rx(&self, bytes: &[u8]) {
        self.inner.borrow_mut().push_rx(bytes);
    }

    /// Every payload the link sent, in order.
    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.inner.borrow().sent.clone()
    }

    /// Concatenation of everything the link sent.
    pub fn sent_flat(&self) -> Vec<u8> {
        self.inner.borrow().sent_flat()
    }

    /// Forget recorded writes (reads are left alone).
    pub fn clear_sent(&self) {
        self.inner.borrow_mut().sent.clear();
    }

    /// Bytes seeded but not yet consumed.
    pub fn rx_remaining(&self) -> usize {
        self.inner.borrow().rx_remaining()
    }
}

impl Transport for SharedMock {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        self.inner.borrow_mut().send(data)
    }

    fn recv_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        self.inner.borrow_mut().recv_exact(buf)
    }

    fn bytes_available(&mut self) -> Result<usize> {
        self.inner.borrow_mut().bytes_available()
    }

    fn discard_input(&mut self) -> Result<()> {
        self.inner.borrow_mut().discard_input()
    }
}

fn touch_reply(command: u8, data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + 2);
    out.push(command);
    out.extend_from_slice(data);
    out.push(checksum(&out));
    out
}

/// Sync-board version reply (8 bytes on the wire).
pub fn sync_version_reply(version: &str) -> Vec<u8> {
    touch_reply(TOUCH_GET_SYNC_BOARD_VER, version.as_bytes())
}

/// Unit-board version reply (45 bytes): sync version, side letter, six
/// unit versions.
pub fn unit_version_reply(side: Side, sync: &str, unit: &str) -> Vec<u8> {
    let mut data = Vec::with_capacity(43);
    data.extend_from_slice(sync.as_bytes());
    data.push(side.letter());
    for _ in 0..TOUCH_UNITS {
        data.extend_from_slice(unit.as_bytes());
    }
    touch_reply(TOUCH_GET_UNIT_BOARD_VER, &data)
}

/// Active-unit bitmask reply (3 bytes).
pub fn active_units_reply(mask: u8) -> Vec<u8> {
    touch_reply(TOUCH_GET_ACTIVE_UNITS, &[mask])
}

/// Threshold acknowledgement (3 bytes).
pub fn threshold_ack(status: u8) -> Vec<u8> {
    touch_reply(TOUCH_SET_THRESHOLDS, &[status])
}

/// Scan-start acknowledgement (3 bytes).
pub fn scan_ack() -> Vec<u8> {
    touch_reply(TOUCH_START_AUTO_SCAN, &[0x00])
}

/// The complete byte stream a healthy handshake produces, in the order
/// `initialize` consumes it.
pub fn panel_handshake_bytes(side: Side) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&sync_version_reply("190523"));
    out.extend_from_slice(&unit_version_reply(side, "190523", "190514"));
    out.extend_from_slice(&active_units_reply(0x3F));
    out.extend_from_slice(&threshold_ack(0x00));
    out
}

/// One 36-byte streaming touch frame: 24 panel bytes, reserved padding, the
/// loop counter, and a valid checksum.
pub fn touch_frame(raw: &[u8; 24], counter: u8) -> Vec<u8> {
    let mut out = Vec::with_capacity(TOUCH_FRAME_LEN);
    out.push(TOUCH_DATA);
    out.extend_from_slice(raw);
    out.extend_from_slice(&[0u8; 9]);
    out.push(counter);
    out.push(checksum(&out));
    out
}

/// Build an escaped reader response frame:
/// `E0 LEN 00 SEQ CMD STATUS PLEN payload CHK`.
pub fn reader_response(seq: u8, command: u8, status: u8, payload: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(payload.len() + 6);
    body.push(0); // len placeholder
    body.push(0); // reserved
    body.push(seq);
    body.push(command);
    body.push(status);
    body.push(payload.len() as u8);
    body.extend_from_slice(payload);
    body[0] = (body.len()) as u8; // everything after LEN, checksum included
    let sum = body.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
    body.push(sum);

    let mut out = vec![crate::constants::READER_MARKER];
    out.extend_from_slice(&escape_bytes(&body));
    out
}

/// Poll response payload listing a single Mifare card.
pub fn poll_payload_mifare(uid: &[u8]) -> Vec<u8> {
    let mut payload = vec![1, 0x10, uid.len() as u8];
    payload.extend_from_slice(uid);
    payload
}

/// Poll response payload listing a single FeliCa card.
pub fn poll_payload_felica(idm: &[u8; 8], pmm: &[u8; 8]) -> Vec<u8> {
    let mut payload = vec![1, 0x20, 16];
    payload.extend_from_slice(idm);
    payload.extend_from_slice(pmm);
    payload
}
