// ringio-rs/ringio/src/transport/mock.rs

use std::collections::VecDeque;

use crate::transport::traits::Transport;
use crate::{Error, Result};

/// Mock transport for unit tests. It records sent payloads and serves reads
/// from a pre-seeded byte queue.
///
/// The receive side is a flat byte queue rather than a message queue because
/// both cabinet protocols read exact byte counts that may span what a test
/// seeded in separate pushes (e.g. a 36-byte touch frame seeded as header and
/// body).
#[derive(Debug, Default)]
pub struct MockTransport {
    /// Every payload passed to `send`, in order.
    pub sent: Vec<Vec<u8>>,
    rx: VecDeque<u8>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes for subsequent reads.
    pub fn push_rx(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes.iter().copied());
    }

    /// Bytes not yet consumed by reads.
    pub fn rx_remaining(&self) -> usize {
        self.rx.len()
    }

    /// Concatenation of everything sent so far.
    pub fn sent_flat(&self) -> Vec<u8> {
        self.sent.iter().flatten().copied().collect()
    }

    pub fn pop_sent(&mut self) -> Option<Vec<u8>> {
        self.sent.pop()
    }
}

impl Transport for MockTransport {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        self.sent.push(data.to_vec());
        Ok(())
    }

    fn recv_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        // A real link would block here; a test that under-seeds the queue is
        // broken, so fail fast instead of hanging.
        if self.rx.len() < buf.len() {
            return Err(Error::Timeout);
        }
        for slot in buf.iter_mut() {
            *slot = self.rx.pop_front().expect("length checked above");
        }
        Ok(())
    }

    fn bytes_available(&mut self) -> Result<usize> {
        Ok(self.rx.len())
    }

    fn discard_input(&mut self) -> Result<()> {
        // Keep the queued bytes so unit tests can pre-seed expected replies
        // (handshake responses, frames) before handing the transport to a
        // link whose initialization path flushes the line first.
        Ok(())
    }
}
