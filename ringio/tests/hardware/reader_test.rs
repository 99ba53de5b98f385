#[path = "common.rs"]
mod common;

use std::thread;
use std::time::Duration;

use serial_test::serial;

use ringio::reader::ReaderLink;
use ringio::{CardTypeMask, LightColor, Result};

// Requires a reader on the bench; see touch_test.rs for the invocation.

#[test]
#[ignore]
#[serial]
fn bringup_and_versions() -> Result<()> {
    let transport = common::open_reader(&common::reader_port())?;
    let mut link = ReaderLink::new(Box::new(transport));
    link.initialize()?;
    assert!(!link.hardware_version().is_empty());
    link.close()
}

#[test]
#[ignore]
#[serial]
fn poll_for_a_card() -> Result<()> {
    let transport = common::open_reader(&common::reader_port())?;
    let mut link = ReaderLink::new(Box::new(transport));
    link.initialize()?;
    link.set_color(LightColor::BLUE)?;
    link.radio_on(CardTypeMask::ALL)?;
    // The firmware errors when polled faster than ~150 ms.
    for _ in 0..20 {
        let cards = link.poll()?;
        if !cards.is_empty() {
            break;
        }
        thread::sleep(Duration::from_millis(200));
    }
    link.close()
}
