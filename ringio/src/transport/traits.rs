// ringio-rs/ringio/src/transport/traits.rs

use crate::Result;

/// Transport trait abstracts the serial link away from protocol logic.
///
/// Both cabinet protocols are strictly blocking: a read returns only once the
/// requested bytes have arrived. Implementations must be driven by exactly one
/// owner; no locking is provided. Callers wanting bounded latency impose
/// cancellation outside this trait.
pub trait Transport {
    /// Send raw bytes to the device.
    fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Receive exactly `buf.len()` bytes, blocking until they arrive.
    fn recv_exact(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Receive a single byte. Default implementation reads through
    /// `recv_exact` so transports only implement the bulk path.
    fn recv_byte(&mut self) -> Result<u8> {
        let mut b = [0u8; 1];
        self.recv_exact(&mut b)?;
        Ok(b[0])
    }

    /// Number of bytes buffered and readable without blocking.
    fn bytes_available(&mut self) -> Result<usize>;

    /// Drop everything currently buffered on the receive side.
    fn discard_input(&mut self) -> Result<()>;
}
