// Poll the reader until a card shows up, then print everything we can learn
// about it.
//
// cargo run -p ringio --example card_probe -- /dev/ttyUSB2

use std::thread;
use std::time::Duration;

use anyhow::Context;

use ringio::constants::READER_BAUD;
use ringio::prelude::*;
use ringio::reader::Card;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let port = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/dev/ttyUSB2".into());
    let transport =
        SerialTransport::open(&port, READER_BAUD).with_context(|| format!("opening {}", port))?;

    let mut link = ReaderLink::new(Box::new(transport));
    link.initialize().context("reader bring-up failed")?;
    println!(
        "firmware {:#04x}, hardware {}",
        link.firmware_version(),
        link.hardware_version()
    );

    link.set_color(LightColor::BLUE)?;
    link.radio_on(CardTypeMask::ALL)?;

    println!("present a card...");
    let card = loop {
        if let Some(card) = link.poll()?.first() {
            break card.clone();
        }
        thread::sleep(Duration::from_millis(200));
    };

    match &card {
        Card::Mifare { uid, .. } => {
            println!("Mifare, uid {}", uid.to_hex());
            let code = link.read_access_code(uid)?;
            println!("access code {}", code);
        }
        Card::Felica { idm, .. } => {
            println!("FeliCa, idm {}", idm.to_hex());
            println!("amuse id {}", card.amuse_id()?);
        }
    }

    link.set_color(LightColor::GREEN)?;
    thread::sleep(Duration::from_millis(500));
    link.close()?;
    Ok(())
}
