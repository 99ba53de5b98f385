// ringio-rs/ringio/src/types.rs

use crate::Error;
use std::convert::TryFrom;
use std::fmt;

/// Cabinet side served by one panel link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// Left ring half, combined columns 0..=29.
    Left,
    /// Right ring half, combined columns 30..=59 (mirrored on the wire).
    Right,
}

impl Side {
    /// ASCII letter the sync board reports for this side.
    pub fn letter(&self) -> u8 {
        match self {
            Side::Left => b'L',
            Side::Right => b'R',
        }
    }

    /// Right-side data arrives mirrored and must be normalized.
    pub fn is_right(&self) -> bool {
        matches!(self, Side::Right)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Left => "L",
            Side::Right => "R",
        })
    }
}

/// One touched cell of the ring.
///
/// `x` is the column (0 at the top left, around the ring to 59 at the top
/// right), `y` the row (0 closest to the screen).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveSegment {
    /// Column, 0..=59 (0..=29 on a single side).
    pub x: u8,
    /// Row, 0..=3.
    pub y: u8,
}

impl ActiveSegment {
    /// Build a segment value. Ranges are documented, not enforced; the
    /// decoders only produce in-range values.
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for ActiveSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:02},{}]", self.x, self.y)
    }
}

/// FeliCa manufacture ID - Newtype Pattern (8 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Idm([u8; 8]);

impl Idm {
    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for Idm {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != 8 {
            return Err(Error::InvalidLength {
                expected: 8,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 8];
        arr.copy_from_slice(&bytes[..8]);
        Ok(Self(arr))
    }
}

/// FeliCa manufacture parameter - Newtype Pattern (8 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pmm([u8; 8]);

impl Pmm {
    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Pmm {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != 8 {
            return Err(Error::InvalidLength {
                expected: 8,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 8];
        arr.copy_from_slice(&bytes[..8]);
        Ok(Self(arr))
    }
}

/// Mifare UID. The reader reports either a 4-byte single-size or a 7-byte
/// double-size UID; nothing else is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Uid(Vec<u8>);

impl Uid {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for Uid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != 4 && bytes.len() != 7 {
            return Err(Error::InvalidLength {
                expected: 4,
                actual: bytes.len(),
            });
        }
        Ok(Self(bytes.to_vec()))
    }
}

/// Mifare sector key (6 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MifareKey([u8; 6]);

impl MifareKey {
    pub const fn from_bytes(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }
}

impl TryFrom<&[u8]> for MifareKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != 6 {
            return Err(Error::InvalidLength {
                expected: 6,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 6];
        arr.copy_from_slice(&bytes[..6]);
        Ok(Self(arr))
    }
}

/// One Mifare block (16 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockData([u8; 16]);

impl BlockData {
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex_spaced(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for BlockData {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != 16 {
            return Err(Error::InvalidLength {
                expected: 16,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 16];
        arr.copy_from_slice(&bytes[..16]);
        Ok(Self(arr))
    }
}

/// 10-byte access code stored in a card sector, printed as 20 decimal digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccessCode([u8; 10]);

impl AccessCode {
    pub fn from_bytes(bytes: [u8; 10]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 10] {
        &self.0
    }
}

impl TryFrom<&[u8]> for AccessCode {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != 10 {
            return Err(Error::InvalidLength {
                expected: 10,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 10];
        arr.copy_from_slice(&bytes[..10]);
        Ok(Self(arr))
    }
}

impl fmt::Display for AccessCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

/// Card families the reader radio can listen for. Combine with `|`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardTypeMask(u8);

impl CardTypeMask {
    /// Mifare Classic family.
    pub const MIFARE: Self = Self(0x10);
    /// FeliCa family.
    pub const FELICA: Self = Self(0x20);
    /// Both supported families.
    pub const ALL: Self = Self(0x30);

    pub fn bits(&self) -> u8 {
        self.0
    }
}

impl Default for CardTypeMask {
    fn default() -> Self {
        Self::ALL
    }
}

impl std::ops::BitOr for CardTypeMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// One LED pixel. Alpha 0 means transparent to the compositor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LightColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl LightColor {
    pub const RED: Self = Self::new(255, 0, 0);
    pub const GREEN: Self = Self::new(0, 255, 0);
    pub const BLUE: Self = Self::new(0, 0, 255);
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Fully transparent; the compositor skips these pixels.
    pub const OFF: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Opaque color from RGB components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    /// Color with an explicit alpha component.
    pub const fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// A pixel with alpha 0 never overwrites lower layers.
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}
