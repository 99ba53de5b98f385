// ringio-rs/ringio/src/touch/panel.rs

//! Driver for one side-panel sync board (one ring half).

use std::thread;
use std::time::Duration;

use log::{debug, info, trace};

use crate::constants::{
    TOUCH_ACK_LEN, TOUCH_COLS_PER_SIDE, TOUCH_DATA, TOUCH_FRAME_LEN, TOUCH_GET_ACTIVE_UNITS,
    TOUCH_GET_SYNC_BOARD_VER, TOUCH_GET_UNIT_BOARD_VER, TOUCH_ROWS, TOUCH_SCAN_PARAMS,
    TOUCH_SET_THRESHOLDS, TOUCH_START_AUTO_SCAN, TOUCH_SYNC_VER_LEN, TOUCH_THRESHOLD_OFF,
    TOUCH_THRESHOLD_ON, TOUCH_UNITS, TOUCH_UNIT_VER_LEN,
};
use crate::touch::command::{TouchReply, encode_command};
use crate::touch::SideGrid;
use crate::transport::Transport;
use crate::types::{ActiveSegment, Side};
use crate::utils::ascii_at;
use crate::{Error, Result};

/// Tuning knobs for one panel link.
#[derive(Debug, Clone)]
pub struct SidePanelOptions {
    /// Capacitive level at which a segment turns on.
    pub threshold_on: u8,
    /// Capacitive level at which a segment releases.
    pub threshold_off: u8,
    /// Zero the grid before applying each frame. On: a dropped frame cannot
    /// leave a stale touch behind. Off: touches accumulate across frames, so
    /// nothing is lost to a drop but ghosts persist until release is seen.
    pub clear_on_frame: bool,
    /// Settle time after the silencing burst before the buffer is flushed.
    pub settle: Duration,
}

impl Default for SidePanelOptions {
    fn default() -> Self {
        Self {
            threshold_on: TOUCH_THRESHOLD_ON,
            threshold_off: TOUCH_THRESHOLD_OFF,
            clear_on_frame: true,
            settle: Duration::from_millis(20),
        }
    }
}

/// Owns the serial link to one ring half: 6 unit boards, 30 columns, 4 rows.
///
/// Lifecycle: [`initialize`](Self::initialize) performs the handshake,
/// [`start_touch_stream`](Self::start_touch_stream) switches the board into
/// free-running scan mode, after which [`pump`](Self::pump) must be called at
/// least once per frame period (~8 ms) to keep the link from buffering
/// without bound. [`close`](Self::close) is idempotent.
pub struct SidePanelLink {
    transport: Box<dyn Transport>,
    side: Side,
    options: SidePanelOptions,
    open: bool,
    streaming: bool,
    sync_version: String,
    unit_versions: [String; TOUCH_UNITS],
    active_units: u8,
    loop_counter: u8,
    last_raw: [u8; 24],
    grid: SideGrid,
    segments: Vec<ActiveSegment>,
}

impl SidePanelLink {
    /// Wrap a transport for the given side. No traffic until `initialize`.
    pub fn new(transport: Box<dyn Transport>, side: Side) -> Self {
        Self::with_options(transport, side, SidePanelOptions::default())
    }

    /// Wrap a transport with explicit tuning options.
    pub fn with_options(
        transport: Box<dyn Transport>,
        side: Side,
        options: SidePanelOptions,
    ) -> Self {
        Self {
            transport,
            side,
            options,
            open: false,
            streaming: false,
            sync_version: String::new(),
            unit_versions: Default::default(),
            active_units: 0,
            loop_counter: 0,
            last_raw: [0; 24],
            grid: [[false; TOUCH_COLS_PER_SIDE]; TOUCH_ROWS],
            segments: Vec::new(),
        }
    }

    /// Which ring half this link serves.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Sync-board firmware version reported during the handshake.
    pub fn sync_version(&self) -> &str {
        &self.sync_version
    }

    /// Firmware versions of the 6 unit boards. Mismatched entries are a bad
    /// sign for the hardware but not an error here.
    pub fn unit_versions(&self) -> &[String; TOUCH_UNITS] {
        &self.unit_versions
    }

    /// Bitmask of unit boards the sync board reports as alive.
    pub fn active_units(&self) -> u8 {
        self.active_units
    }

    /// Last frame sequence byte seen on the stream.
    pub fn loop_counter(&self) -> u8 {
        self.loop_counter
    }

    /// Current touch state, `[row][column]`, column 0 at the inner top corner
    /// of this side.
    pub fn grid(&self) -> &SideGrid {
        &self.grid
    }

    /// Touched cells of the current state, in row-major order.
    pub fn segments(&self) -> &[ActiveSegment] {
        &self.segments
    }

    /// Handshake has completed and the link is usable.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The board is in free-running scan mode.
    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    /// Perform the full handshake. Does nothing if the link is already open.
    pub fn initialize(&mut self) -> Result<()> {
        if self.open {
            return Ok(());
        }
        self.silence()?;
        self.fetch_sync_version()?;
        self.fetch_unit_versions()?;
        self.fetch_active_units()?;
        self.apply_thresholds()?;
        self.open = true;
        info!(
            "side {} up: sync {}, units {:#04x}",
            self.side, self.sync_version, self.active_units
        );
        Ok(())
    }

    /// Switch the board into free-running scan mode. Requires `initialize`.
    pub fn start_touch_stream(&mut self) -> Result<()> {
        if !self.open {
            return Err(Error::NotReady);
        }
        self.transport
            .send(&encode_command(TOUCH_START_AUTO_SCAN, &TOUCH_SCAN_PARAMS))?;
        let ack = self.read_reply(TOUCH_ACK_LEN)?;
        if ack.command != TOUCH_START_AUTO_SCAN {
            return Err(Error::UnexpectedResponse {
                expected: TOUCH_START_AUTO_SCAN,
                actual: ack.command,
            });
        }
        self.streaming = true;
        debug!("side {} streaming", self.side);
        Ok(())
    }

    /// Consume at most one buffered frame. Returns `Ok(true)` when a full
    /// frame was read (duplicates included), `Ok(false)` when fewer than 36
    /// bytes were waiting. This is the polled replacement for a serial
    /// data-received callback; call it at least once per ~8 ms frame period.
    pub fn pump(&mut self) -> Result<bool> {
        if !self.open {
            return Err(Error::NotReady);
        }
        if self.transport.bytes_available()? < TOUCH_FRAME_LEN {
            return Ok(false);
        }
        self.read_frame()?;
        Ok(true)
    }

    /// Block for one full 36-byte frame and apply it.
    ///
    /// Frames with an unchanged loop counter are duplicates: they leave the
    /// grid and segment list untouched and are not an error.
    pub fn read_frame(&mut self) -> Result<()> {
        let reply = self.read_reply(TOUCH_FRAME_LEN)?;
        if reply.command != TOUCH_DATA {
            return Err(Error::UnexpectedResponse {
                expected: TOUCH_DATA,
                actual: reply.command,
            });
        }

        let counter = *reply.data.last().expect("frame data is 34 bytes");
        if counter == self.loop_counter {
            trace!("side {} duplicate frame {}", self.side, counter);
            return Ok(());
        }
        self.loop_counter = counter;

        self.last_raw.copy_from_slice(&reply.data[..24]);
        self.apply_raw();
        Ok(())
    }

    /// Tear the link down: silence the stream, reset all decoded state.
    /// Does nothing if the link is not open.
    pub fn close(&mut self) -> Result<()> {
        if !self.open {
            return Ok(());
        }
        self.silence()?;
        self.grid = [[false; TOUCH_COLS_PER_SIDE]; TOUCH_ROWS];
        self.segments.clear();
        self.loop_counter = 0;
        self.last_raw = [0; 24];
        self.sync_version.clear();
        self.unit_versions = Default::default();
        self.active_units = 0;
        self.open = false;
        info!("side {} closed", self.side);
        Ok(())
    }

    /// Multi-line textual view of the current grid, one `█`/`░` cell per
    /// segment. Debug helper.
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity(TOUCH_ROWS * (TOUCH_COLS_PER_SIDE + 1));
        for row in &self.grid {
            for &cell in row.iter() {
                out.push(if cell { '█' } else { '░' });
            }
            out.push('\n');
        }
        out
    }

    /// The board may already be free-running a scan stream at power-on; only
    /// a request/response exchange reliably silences it. Fire a burst of
    /// version queries, let the line settle, then drop whatever arrived.
    fn silence(&mut self) -> Result<()> {
        self.transport.discard_input()?;
        for _ in 0..5 {
            self.transport
                .send(&encode_command(TOUCH_GET_SYNC_BOARD_VER, &[]))?;
        }
        thread::sleep(self.options.settle);
        self.transport.discard_input()?;
        self.streaming = false;
        Ok(())
    }

    fn fetch_sync_version(&mut self) -> Result<()> {
        self.transport
            .send(&encode_command(TOUCH_GET_SYNC_BOARD_VER, &[]))?;
        let reply = self.read_reply(TOUCH_SYNC_VER_LEN)?;
        self.sync_version = ascii_at(&reply.data, 0, 6)?;
        Ok(())
    }

    /// The 45-byte reply repeats the sync version, names the side, then
    /// lists all 6 unit-board versions.
    fn fetch_unit_versions(&mut self) -> Result<()> {
        self.transport
            .send(&encode_command(TOUCH_GET_UNIT_BOARD_VER, &[]))?;
        let reply = self.read_reply(TOUCH_UNIT_VER_LEN)?;
        self.sync_version = ascii_at(&reply.data, 0, 6)?;
        let letter = crate::utils::byte_at(&reply.data, 6)?;
        if letter != self.side.letter() {
            return Err(Error::Protocol(format!(
                "sync board disagrees which side it is: configured {}, reported {}",
                self.side, letter as char
            )));
        }
        for i in 0..TOUCH_UNITS {
            self.unit_versions[i] = ascii_at(&reply.data, 7 + i * 6, 6)?;
        }
        Ok(())
    }

    fn fetch_active_units(&mut self) -> Result<()> {
        self.transport
            .send(&encode_command(TOUCH_GET_ACTIVE_UNITS, &[]))?;
        let reply = self.read_reply(TOUCH_ACK_LEN)?;
        let mask = crate::utils::byte_at(&reply.data, 0)?;
        // 6 unit boards -> 6 mask bits
        if mask & 0xC0 != 0 {
            return Err(Error::Protocol(format!(
                "active unit mask {:#04x} names more than 6 boards",
                mask
            )));
        }
        self.active_units = mask;
        Ok(())
    }

    fn apply_thresholds(&mut self) -> Result<()> {
        self.transport.send(&encode_command(
            TOUCH_SET_THRESHOLDS,
            &[self.options.threshold_on, self.options.threshold_off],
        ))?;
        let reply = self.read_reply(TOUCH_ACK_LEN)?;
        let status = crate::utils::byte_at(&reply.data, 0)?;
        if status != 0 {
            return Err(Error::DeviceStatus {
                command: TOUCH_SET_THRESHOLDS,
                status,
            });
        }
        Ok(())
    }

    fn read_reply(&mut self, size: usize) -> Result<TouchReply> {
        let mut raw = vec![0u8; size];
        self.transport.recv_exact(&mut raw)?;
        trace!("side {} <- {}", self.side, crate::utils::bytes_to_hex(&raw));
        TouchReply::parse(&raw)
    }

    /// Decode `last_raw` into the grid: 6 panels x 4 rows, one byte each,
    /// low 5 bits = 5 column segments.
    fn apply_raw(&mut self) {
        if self.options.clear_on_frame {
            self.grid = [[false; TOUCH_COLS_PER_SIDE]; TOUCH_ROWS];
        }
        for row in 0..TOUCH_ROWS {
            for panel in 0..TOUCH_UNITS {
                let byte = self.last_raw[panel + row * TOUCH_UNITS];
                for seg in 0..5 {
                    if byte & (1 << seg) != 0 {
                        self.grid[row][panel * 5 + seg] = true;
                    }
                }
            }
        }
        self.segments.clear();
        for row in 0..TOUCH_ROWS {
            for col in 0..TOUCH_COLS_PER_SIDE {
                if self.grid[row][col] {
                    self.segments.push(ActiveSegment::new(col as u8, row as u8));
                }
            }
        }
    }
}
