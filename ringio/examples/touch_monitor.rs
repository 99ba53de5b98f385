// Live touch view: handshake both halves, stream, and redraw the ring state
// in the terminal. Ctrl-C to quit.
//
// cargo run -p ringio --example touch_monitor -- /dev/ttyUSB1 /dev/ttyUSB0

use std::thread;
use std::time::Duration;

use anyhow::Context;

use ringio::constants::TOUCH_BAUD;
use ringio::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let left_port = args.next().unwrap_or_else(|| "/dev/ttyUSB1".into());
    let right_port = args.next().unwrap_or_else(|| "/dev/ttyUSB0".into());

    let left = SerialTransport::open(&left_port, TOUCH_BAUD)
        .with_context(|| format!("opening {}", left_port))?;
    let right = SerialTransport::open(&right_port, TOUCH_BAUD)
        .with_context(|| format!("opening {}", right_port))?;

    let mut surface = TouchSurface::new(Box::new(left), Box::new(right));
    surface.initialize().context("handshake failed")?;
    let left_sync = surface.left().sync_version().to_string();
    let right_sync = surface.right().sync_version().to_string();
    println!("left sync board {}, right sync board {}", left_sync, right_sync);
    surface.start_touch_stream()?;

    loop {
        surface.pump()?;
        surface.refresh();
        // Repaint in place: 4 grid rows plus the status line.
        print!("{}touched: {:3}\x1b[5F", surface.render_ascii(), surface.segments().len());
        thread::sleep(Duration::from_millis(8));
    }
}
