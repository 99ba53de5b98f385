#[path = "../common/mod.rs"]
mod common;

use common::{sample_idm_bytes, sample_mifare_uid, sample_pmm_bytes};
use ringio::reader::{Card, ReaderLink};
use ringio::test_support::{SharedMock, reader_response};
use ringio::{CardTypeMask, Error};

fn radio_link() -> (ReaderLink, SharedMock) {
    let mock = SharedMock::new();
    let mut link = ReaderLink::new(Box::new(mock.clone()));
    mock.push_rx(&reader_response(0, 0x62, 0x00, &[]));
    link.reset().unwrap();
    mock.push_rx(&reader_response(1, 0x40, 0x00, &[]));
    link.radio_on(CardTypeMask::ALL).unwrap();
    (link, mock)
}

#[test]
fn radio_off_then_poll_fails_not_ready() {
    let (mut link, mock) = radio_link();
    mock.push_rx(&reader_response(2, 0x41, 0x00, &[]));
    link.radio_off().unwrap();
    assert!(matches!(link.poll(), Err(Error::NotReady)));
}

#[test]
fn poll_reports_mixed_card_families() {
    let (mut link, mock) = radio_link();

    let mut payload = vec![2u8];
    payload.extend_from_slice(&[0x10, 4]);
    payload.extend_from_slice(&sample_mifare_uid());
    payload.extend_from_slice(&[0x20, 16]);
    payload.extend_from_slice(&sample_idm_bytes());
    payload.extend_from_slice(&sample_pmm_bytes());
    mock.push_rx(&reader_response(2, 0x42, 0x00, &payload));

    let cards = link.poll().unwrap();
    assert_eq!(cards.len(), 2);
    assert!(cards[0].is_mifare());
    assert!(cards[1].is_felica());
    assert_eq!(cards[1].idm().unwrap().as_bytes(), &sample_idm_bytes());
}

#[test]
fn access_code_flow_reads_block_two_tail() {
    let (mut link, mock) = radio_link();
    let uid = ringio::Uid::try_from(&sample_mifare_uid()[..]).unwrap();

    mock.push_rx(&reader_response(2, 0x51, 0x00, &[]));
    let mut block = [0u8; 16];
    block[6..].copy_from_slice(&[0x30, 0x76, 0x98, 0x10, 0x00, 0x00, 0x00, 0x01, 0x23, 0x45]);
    mock.push_rx(&reader_response(3, 0x52, 0x00, &block));

    let code = link.read_access_code(&uid).unwrap();
    assert_eq!(code.to_string(), "30769810000000012345");
}

#[test]
fn wrong_family_operations_fail_invalid_card() {
    let (mut link, _mock) = radio_link();
    let felica = Card::Felica {
        idm: ringio::Idm::from_bytes(sample_idm_bytes()),
        pmm: ringio::Pmm::from_bytes(sample_pmm_bytes()),
    };
    assert!(matches!(
        link.select_card(&felica),
        Err(Error::InvalidCard(_))
    ));
}

#[test]
fn device_reported_failure_surfaces_as_device_status() {
    let (mut link, mock) = radio_link();
    let uid = ringio::Uid::try_from(&sample_mifare_uid()[..]).unwrap();
    mock.push_rx(&reader_response(2, 0x51, 0x01, &[]));
    assert!(matches!(
        link.authenticate_key_a(&uid, 3),
        Err(Error::DeviceStatus {
            command: 0x51,
            status: 0x01
        })
    ));
}

#[test]
fn every_send_bumps_the_sequence_byte() {
    let (mut link, mock) = radio_link();
    let before = mock.sent().len();
    for i in 0..3 {
        link.set_color_rgb(i, i, i).unwrap();
    }
    let sent = mock.sent();
    assert_eq!(sent.len(), before + 3);
    // SEQ rides at offset 3 of every frame; reset and radio-on used 0 and 1.
    assert_eq!(sent[before][3], 2);
    assert_eq!(sent[before + 1][3], 3);
    assert_eq!(sent[before + 2][3], 4);
}

#[test]
fn escaped_request_payloads_survive_the_wire() {
    let (mut link, mock) = radio_link();
    let uid = ringio::Uid::try_from(&[0xE0u8, 0xD0, 0x01, 0x02][..]).unwrap();
    mock.push_rx(&reader_response(2, 0x51, 0x00, &[]));
    link.authenticate_key_a(&uid, 7).unwrap();

    let frame = mock.sent().last().unwrap().clone();
    // Marker once, then no raw 0xE0 anywhere in the escaped body.
    assert_eq!(frame[0], 0xE0);
    assert!(!frame[1..].contains(&0xE0));
    let body = ringio::reader::unescape_bytes(&frame[1..]).unwrap();
    assert_eq!(&body[5..9], &[0xE0, 0xD0, 0x01, 0x02]);
}
