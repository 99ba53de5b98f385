// ringio-rs/ringio/src/touch/surface.rs

//! Combined 60x4 view over the two ring halves.

use crate::constants::{TOUCH_COLS, TOUCH_COLS_PER_SIDE, TOUCH_ROWS};
use crate::touch::RingGrid;
use crate::touch::panel::{SidePanelLink, SidePanelOptions};
use crate::transport::Transport;
use crate::types::{ActiveSegment, Side};
use crate::Result;

/// Composes the two side-panel links into one continuous 60-column ring.
///
/// The right half scans mirrored; [`refresh`](Self::refresh) normalizes it so
/// column 0 sits at the top left and column 59 at the top right, wrapping
/// around the ring. Each link may also be driven from its own thread; this
/// type only reads the per-side state already published by `pump`.
pub struct TouchSurface {
    left: SidePanelLink,
    right: SidePanelLink,
    grid: RingGrid,
    segments: Vec<ActiveSegment>,
}

impl TouchSurface {
    /// Build a surface over two transports. No traffic until `initialize`.
    pub fn new(left: Box<dyn Transport>, right: Box<dyn Transport>) -> Self {
        Self::with_options(left, right, SidePanelOptions::default())
    }

    /// Build a surface applying the same tuning options to both sides.
    pub fn with_options(
        left: Box<dyn Transport>,
        right: Box<dyn Transport>,
        options: SidePanelOptions,
    ) -> Self {
        Self {
            left: SidePanelLink::with_options(left, Side::Left, options.clone()),
            right: SidePanelLink::with_options(right, Side::Right, options),
            grid: [[false; TOUCH_COLS]; TOUCH_ROWS],
            segments: Vec::new(),
        }
    }

    /// Handshake both halves.
    pub fn initialize(&mut self) -> Result<()> {
        self.left.initialize()?;
        self.right.initialize()
    }

    /// Start streaming on both halves.
    pub fn start_touch_stream(&mut self) -> Result<()> {
        self.left.start_touch_stream()?;
        self.right.start_touch_stream()
    }

    /// Drain at most one frame per side. Returns whether either side consumed
    /// a frame.
    pub fn pump(&mut self) -> Result<bool> {
        let l = self.left.pump()?;
        let r = self.right.pump()?;
        Ok(l || r)
    }

    /// Close both halves. Idempotent.
    pub fn close(&mut self) -> Result<()> {
        self.left.close()?;
        self.right.close()
    }

    /// Recompute the combined grid and segment list from the current
    /// per-side state. Columns 0..=29 copy the left half; combined column
    /// `c` in 30..=59 reads right column `29 - (c - 30)`.
    pub fn refresh(&mut self) -> &RingGrid {
        self.segments.clear();
        let left = self.left.grid();
        let right = self.right.grid();
        for row in 0..TOUCH_ROWS {
            for col in 0..TOUCH_COLS_PER_SIDE {
                let active = left[row][col];
                self.grid[row][col] = active;
                if active {
                    self.segments.push(ActiveSegment::new(col as u8, row as u8));
                }
            }
            for col in 0..TOUCH_COLS_PER_SIDE {
                // mirror the right side to normalize the data
                let active = right[row][TOUCH_COLS_PER_SIDE - 1 - col];
                self.grid[row][col + TOUCH_COLS_PER_SIDE] = active;
                if active {
                    self.segments
                        .push(ActiveSegment::new((col + TOUCH_COLS_PER_SIDE) as u8, row as u8));
                }
            }
        }
        &self.grid
    }

    /// Combined grid as of the last `refresh`.
    pub fn grid(&self) -> &RingGrid {
        &self.grid
    }

    /// Touched cells as of the last `refresh`.
    pub fn segments(&self) -> &[ActiveSegment] {
        &self.segments
    }

    /// The left half's per-frame counter parity. Callers use this to throttle
    /// light output to roughly half the touch scan rate.
    pub fn light_draw_tick(&self) -> bool {
        self.left.loop_counter() % 2 == 0
    }

    /// Left link, for version info and direct driving.
    pub fn left(&mut self) -> &mut SidePanelLink {
        &mut self.left
    }

    /// Right link, for version info and direct driving.
    pub fn right(&mut self) -> &mut SidePanelLink {
        &mut self.right
    }

    /// Multi-line textual view of the combined grid. Debug helper.
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity(TOUCH_ROWS * (TOUCH_COLS + 1));
        for row in &self.grid {
            for &cell in row.iter() {
                out.push(if cell { '█' } else { '░' });
            }
            out.push('\n');
        }
        out
    }
}
