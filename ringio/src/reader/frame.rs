// ringio-rs/ringio/src/reader/frame.rs

//! Reader wire framing.
//!
//! Requests go out as `E0 LEN 00 SEQ CMD PLEN [payload] CHK`, responses come
//! back as `E0 LEN 00 SEQ CMD STATUS PLEN [payload] CHK`. `LEN` counts every
//! byte after itself (checksum included), `CHK` is the byte sum of the body,
//! meaning everything after the marker. Body bytes equal to the marker or the
//! escape lead-in are escaped; the marker itself never is.

use crate::constants::{READER_ESCAPE, READER_MARKER};
use crate::reader::command::ReaderStatus;
use crate::utils::{byte_at, ensure_len, slice_at};
use crate::{Error, Result};

/// Escape a frame body: `0xD0`/`0xE0` become `D0 (byte-1)`.
pub fn escape_bytes(body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(body.len());
    for &b in body {
        if b == READER_ESCAPE || b == READER_MARKER {
            out.push(READER_ESCAPE);
            out.push(b.wrapping_sub(1));
        } else {
            out.push(b);
        }
    }
    out
}

/// Reverse [`escape_bytes`]: a `0xD0` lead-in maps the next byte to `+1`.
pub fn unescape_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(data.len());
    let mut iter = data.iter();
    while let Some(&b) = iter.next() {
        if b == READER_ESCAPE {
            let &next = iter
                .next()
                .ok_or_else(|| Error::Protocol("dangling escape lead-in".into()))?;
            out.push(next.wrapping_add(1));
        } else {
            out.push(b);
        }
    }
    Ok(out)
}

/// Byte sum over the body (everything between marker and checksum).
pub fn body_checksum(body: &[u8]) -> u8 {
    body.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

/// Build a complete escaped request frame ready for the wire.
pub fn build_request(seq: u8, command: u8, payload: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(payload.len() + 6);
    body.push(0); // LEN, patched below
    body.push(0); // reserved
    body.push(seq);
    body.push(command);
    body.push(payload.len() as u8);
    body.extend_from_slice(payload);
    // LEN counts reserved..checksum; with the LEN byte itself still in the
    // buffer and the checksum not yet pushed, that is exactly body.len().
    body[0] = body.len() as u8;
    let chk = body_checksum(&body);
    body.push(chk);

    let mut out = Vec::with_capacity(body.len() + 1);
    out.push(READER_MARKER);
    out.extend_from_slice(&escape_bytes(&body));
    out
}

/// A parsed reader response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderResponse {
    /// Echo of the sequence byte the command went out with.
    pub seq: u8,
    /// Echoed command code.
    pub command: u8,
    /// Reader-reported status.
    pub status: ReaderStatus,
    /// Command-specific payload.
    pub payload: Vec<u8>,
}

impl ReaderResponse {
    /// Parse an unescaped response body (the `LEN` bytes that follow the
    /// length field). The trailing checksum byte is carried on the wire but
    /// deliberately not recomputed here: the protocol's reference behavior
    /// accepts malformed-but-delivered frames, and matching it keeps this
    /// driver bug-for-bug wire compatible.
    pub fn parse(body: &[u8]) -> Result<Self> {
        ensure_len(body, 6)?;
        let seq = body[1];
        let command = body[2];
        let status = ReaderStatus::from_byte(body[3]);
        let plen = byte_at(body, 4)? as usize;
        let payload = slice_at(body, 5, plen)?.to_vec();
        Ok(Self {
            seq,
            command,
            status,
            payload,
        })
    }
}
