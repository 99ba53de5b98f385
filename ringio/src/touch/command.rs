// ringio-rs/ringio/src/touch/command.rs

//! Sync-board wire format.
//!
//! Replies are `[command] [data...] [checksum]` where the checksum is the XOR
//! of every preceding byte, XORed with 0x80. Outgoing traffic uses the same
//! trailer when a command carries parameters; bare queries are a single
//! command byte.

use crate::{Error, Result};

/// Checksum over everything that precedes the trailer byte.
pub fn checksum(body: &[u8]) -> u8 {
    body.iter().fold(0u8, |acc, &b| acc ^ b) ^ 0x80
}

/// Accept a packet iff its trailing byte matches `checksum` of the rest.
pub fn validate_checksum(packet: &[u8]) -> Result<()> {
    if packet.len() < 2 {
        return Err(Error::InvalidLength {
            expected: 2,
            actual: packet.len(),
        });
    }
    let expected = checksum(&packet[..packet.len() - 1]);
    let actual = packet[packet.len() - 1];
    if expected != actual {
        return Err(Error::ChecksumMismatch { expected, actual });
    }
    Ok(())
}

/// Encode an outgoing command. Parameterless queries go out as the bare
/// command byte; anything else gets the checksum trailer.
pub fn encode_command(command: u8, params: &[u8]) -> Vec<u8> {
    if params.is_empty() {
        return vec![command];
    }
    let mut out = Vec::with_capacity(params.len() + 2);
    out.push(command);
    out.extend_from_slice(params);
    out.push(checksum(&out));
    out
}

/// A checksum-validated sync-board reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TouchReply {
    /// Echoed command byte.
    pub command: u8,
    /// Payload between the command byte and the checksum.
    pub data: Vec<u8>,
}

impl TouchReply {
    /// Validate the trailer and split a raw packet.
    pub fn parse(raw: &[u8]) -> Result<Self> {
        validate_checksum(raw)?;
        Ok(Self {
            command: raw[0],
            data: raw[1..raw.len() - 1].to_vec(),
        })
    }
}
