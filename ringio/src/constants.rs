// ringio-rs/ringio/src/constants.rs
//! Wire-protocol constants shared across the crate

/// Touch link baud rate.
pub const TOUCH_BAUD: u32 = 115_200;

/// Reader baud rate (current firmware).
pub const READER_BAUD: u32 = 115_200;

/// Reader baud rate (legacy firmware).
pub const READER_BAUD_LEGACY: u32 = 38_400;

// Sync board command bytes. The boards answer a handful of other codes;
// only the ones the driver needs are named here.
pub const TOUCH_GET_SYNC_BOARD_VER: u8 = 0xA0;
pub const TOUCH_GET_UNIT_BOARD_VER: u8 = 0xA8;
pub const TOUCH_GET_ACTIVE_UNITS: u8 = 0xA2;
pub const TOUCH_SET_THRESHOLDS: u8 = 0x94;
pub const TOUCH_START_AUTO_SCAN: u8 = 0xC9;
pub const TOUCH_DATA: u8 = 0x81;

/// Scan-start parameter block. Meaning unknown; captured from the stock
/// firmware exchange. The trailing checksum byte is computed, not stored.
pub const TOUCH_SCAN_PARAMS: [u8; 6] = [0x7F, 0x3F, 0x64, 0x28, 0x44, 0x3B];

/// Streaming touch frame size in bytes (command + 34 data + checksum).
pub const TOUCH_FRAME_LEN: usize = 36;

/// Reply sizes for the handshake queries.
pub const TOUCH_ACK_LEN: usize = 3;
pub const TOUCH_SYNC_VER_LEN: usize = 8;
pub const TOUCH_UNIT_VER_LEN: usize = 45;

/// Rows per side.
pub const TOUCH_ROWS: usize = 4;
/// Columns per side (6 unit boards x 5 segments).
pub const TOUCH_COLS_PER_SIDE: usize = 30;
/// Columns across the combined ring.
pub const TOUCH_COLS: usize = 60;
/// Unit boards per side panel.
pub const TOUCH_UNITS: usize = 6;

/// Default capacitive on/off thresholds.
pub const TOUCH_THRESHOLD_ON: u8 = 17;
pub const TOUCH_THRESHOLD_OFF: u8 = 12;

/// Reader frame marker.
pub const READER_MARKER: u8 = 0xE0;
/// Escape lead-in on the reader link.
pub const READER_ESCAPE: u8 = 0xD0;

/// Stock Key A loaded during reader initialization.
pub const READER_DEFAULT_KEY_A: [u8; 6] = [0x60, 0x90, 0xD0, 0x06, 0x32, 0xF5];
/// Stock Key B ("WCCFv2") loaded during reader initialization.
pub const READER_DEFAULT_KEY_B: [u8; 6] = [0x57, 0x43, 0x43, 0x46, 0x76, 0x32];

/// Firmware revision byte current readers report.
pub const READER_KNOWN_FIRMWARE: u8 = 0x94;

/// Sector trailer block holding the access-code keys.
pub const ACCESS_CODE_TRAILER_BLOCK: u8 = 3;
/// Data block the access code lives in.
pub const ACCESS_CODE_BLOCK: u8 = 2;
/// Offset of the access code inside its block.
pub const ACCESS_CODE_OFFSET: usize = 6;

/// Pixels on the LED ring.
pub const LIGHT_PIXELS: usize = 480;
