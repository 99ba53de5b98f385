// ringio-rs/ringio/src/prelude.rs

pub use crate::light::{LightFrame, LightLayer, LightSink, MemorySink, segment_pixels};
pub use crate::reader::{Card, ReaderCommand, ReaderLink, ReaderStatus, amuse_id};
pub use crate::touch::{SidePanelLink, SidePanelOptions, TouchSurface};
pub use crate::transport::{MockTransport, Transport};
#[cfg(feature = "serial")]
pub use crate::transport::SerialTransport;
pub use crate::{
    AccessCode, ActiveSegment, BlockData, CardTypeMask, Error, Idm, LightColor, MifareKey, Pmm,
    Result, Side, Uid,
};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced};
