// ringio-rs/ringio/src/light/mod.rs

//! Layered LED-frame composition for the 480-pixel ring.

pub mod frame;
pub mod layer;
pub mod sink;

pub use frame::LightFrame;
pub use layer::{LightLayer, segment_pixels};
pub use sink::{LightSink, MemorySink};
