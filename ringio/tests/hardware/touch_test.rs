#[path = "common.rs"]
mod common;

use serial_test::serial;

use ringio::touch::SidePanelLink;
use ringio::{Result, Side};

// These tests require a real cabinet connected. Run manually with:
//
// RINGIO_LEFT_PORT=/dev/ttyUSB1 cargo test -p ringio --test hardware -- --ignored

#[test]
#[ignore]
#[serial]
fn handshake_left_side() -> Result<()> {
    let transport = common::open_touch(&common::left_port())?;
    let mut link = SidePanelLink::new(Box::new(transport), Side::Left);
    link.initialize()?;
    assert!(!link.sync_version().is_empty());
    link.close()
}

#[test]
#[ignore]
#[serial]
fn stream_a_few_frames() -> Result<()> {
    let transport = common::open_touch(&common::left_port())?;
    let mut link = SidePanelLink::new(Box::new(transport), Side::Left);
    link.initialize()?;
    link.start_touch_stream()?;
    for _ in 0..16 {
        link.read_frame()?;
    }
    link.close()
}
