// ringio-rs/ringio/src/transport/mod.rs

pub mod mock;
#[cfg(feature = "serial")]
pub mod serial;
pub mod traits;

pub use mock::MockTransport;
#[cfg(feature = "serial")]
pub use serial::SerialTransport;
pub use traits::Transport;
