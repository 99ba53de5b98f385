// ringio-rs/ringio/src/transport/serial.rs

#![cfg(feature = "serial")]

use std::io::{Read, Write};
use std::time::Duration;

use serialport::{ClearBuffer, SerialPort};

use crate::transport::traits::Transport;
use crate::{Error, Result};

/// Poll interval used while blocking for bytes. The protocols have no
/// timeouts of their own; the port timeout only bounds each poll so the
/// read loop stays interruptible by the owning thread being dropped.
const POLL_INTERVAL_MS: u64 = 50;

/// Blocking serial transport over a caller-supplied port name.
///
/// 8N1 framing at the given baud rate. The caller owns pacing and
/// cancellation; `recv_exact` blocks until every requested byte arrived.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
}

impl SerialTransport {
    /// Open a port by logical name (`/dev/ttyUSB0`, `COM4`, ...).
    pub fn open(name: &str, baud: u32) -> Result<Self> {
        let port = serialport::new(name, baud)
            .timeout(Duration::from_millis(POLL_INTERVAL_MS))
            .open()
            .map_err(|e| Error::Io(std::io::Error::from(e)))?;
        Ok(Self { port })
    }
}

impl Transport for SerialTransport {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        self.port.write_all(data)?;
        Ok(())
    }

    fn recv_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let mut filled = 0usize;
        while filled < buf.len() {
            match self.port.read(&mut buf[filled..]) {
                Ok(0) => continue,
                Ok(n) => filled += n,
                Err(e)
                    if e.kind() == std::io::ErrorKind::TimedOut
                        || e.kind() == std::io::ErrorKind::Interrupted =>
                {
                    continue;
                }
                Err(e) => return Err(Error::Io(e)),
            }
        }
        Ok(())
    }

    fn bytes_available(&mut self) -> Result<usize> {
        let n = self
            .port
            .bytes_to_read()
            .map_err(|e| Error::Io(std::io::Error::from(e)))?;
        Ok(n as usize)
    }

    fn discard_input(&mut self) -> Result<()> {
        self.port
            .clear(ClearBuffer::Input)
            .map_err(|e| Error::Io(std::io::Error::from(e)))?;
        Ok(())
    }
}
