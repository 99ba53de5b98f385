// Helpers for tests that need a physical cabinet on the bench.
#![allow(dead_code)]

use ringio::constants::{READER_BAUD, TOUCH_BAUD};
use ringio::transport::SerialTransport;
use ringio::Result;

/// Port names come from the environment so the bench layout is not baked
/// into the tests.
pub fn left_port() -> String {
    std::env::var("RINGIO_LEFT_PORT").unwrap_or_else(|_| "/dev/ttyUSB1".into())
}

pub fn right_port() -> String {
    std::env::var("RINGIO_RIGHT_PORT").unwrap_or_else(|_| "/dev/ttyUSB0".into())
}

pub fn reader_port() -> String {
    std::env::var("RINGIO_READER_PORT").unwrap_or_else(|_| "/dev/ttyUSB2".into())
}

pub fn open_touch(name: &str) -> Result<SerialTransport> {
    SerialTransport::open(name, TOUCH_BAUD)
}

pub fn open_reader(name: &str) -> Result<SerialTransport> {
    SerialTransport::open(name, READER_BAUD)
}
