// ringio-rs/ringio/src/error.rs

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("port is not open")]
    PortNotOpen,

    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("coordinate out of range: ({x}, {y})")]
    OutOfRange { x: u8, y: u8 },

    #[error("checksum mismatch: expected {expected:#04x}, got {actual:#04x}")]
    ChecksumMismatch { expected: u8, actual: u8 },

    #[error("unexpected response code: expected {expected:#04x}, got {actual:#04x}")]
    UnexpectedResponse { expected: u8, actual: u8 },

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("link not ready: reset not completed or radio disabled")]
    NotReady,

    #[error("invalid card: {0}")]
    InvalidCard(String),

    #[error("device reported status {status:#04x} for command {command:#04x}")]
    DeviceStatus { command: u8, status: u8 },

    #[error("operation timed out")]
    Timeout,
}

pub type Result<T> = std::result::Result<T, Error>;
