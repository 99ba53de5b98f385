// ringio-rs/ringio/src/touch/mod.rs

//! Touch ring drivers: per-side sync-board links and the combined surface.

pub mod command;
pub mod panel;
pub mod surface;

pub use command::{TouchReply, checksum, encode_command, validate_checksum};
pub use panel::{SidePanelLink, SidePanelOptions};
pub use surface::TouchSurface;

use crate::constants::{TOUCH_COLS, TOUCH_COLS_PER_SIDE, TOUCH_ROWS};

/// Touch state of one ring half, indexed `[row][column]`.
pub type SideGrid = [[bool; TOUCH_COLS_PER_SIDE]; TOUCH_ROWS];

/// Touch state of the combined ring, indexed `[row][column]`.
pub type RingGrid = [[bool; TOUCH_COLS]; TOUCH_ROWS];
