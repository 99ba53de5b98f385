#[path = "../common/mod.rs"]
mod common;

use ringio::test_support::{SharedMock, panel_handshake_bytes, scan_ack, touch_frame};
use ringio::touch::{SidePanelLink, checksum, validate_checksum};
use ringio::{ActiveSegment, Side};

fn streaming_link() -> (SidePanelLink, SharedMock) {
    let mock = SharedMock::new();
    mock.push_rx(&panel_handshake_bytes(Side::Left));
    mock.push_rx(&scan_ack());
    let mut link = SidePanelLink::new(Box::new(mock.clone()), Side::Left);
    link.initialize().unwrap();
    link.start_touch_stream().unwrap();
    (link, mock)
}

#[test]
fn full_stream_lifecycle() {
    let (mut link, mock) = streaming_link();
    assert!(link.is_streaming());

    // Panel 0, row 0, byte 0b00000101 -> segments at columns 0 and 2.
    let mut raw = [0u8; 24];
    raw[0] = 0b0000_0101;
    mock.push_rx(&touch_frame(&raw, 1));
    assert!(link.pump().unwrap());
    assert_eq!(
        link.segments(),
        &[ActiveSegment::new(0, 0), ActiveSegment::new(2, 0)]
    );

    link.close().unwrap();
    assert!(!link.is_open());
}

#[test]
fn frame_checksum_recomputation_matches_wire() {
    // Recomputing the checksum over a generated frame reproduces the
    // original trailing byte.
    let frame = touch_frame(&[0x15; 24], 42);
    assert_eq!(frame.len(), 36);
    assert_eq!(checksum(&frame[..35]), frame[35]);
    validate_checksum(&frame).unwrap();
}

#[test]
fn duplicate_frames_leave_state_byte_identical() {
    let (mut link, mock) = streaming_link();

    let mut raw = [0u8; 24];
    raw[7] = 0b0001_0001;
    mock.push_rx(&touch_frame(&raw, 9));
    link.pump().unwrap();

    let grid_before = *link.grid();
    let segments_before = link.segments().to_vec();

    // Replay with the same loop counter but a scrambled payload.
    mock.push_rx(&touch_frame(&[0x0A; 24], 9));
    link.pump().unwrap();

    assert_eq!(link.grid(), &grid_before);
    assert_eq!(link.segments(), &segments_before[..]);
}

#[test]
fn stream_survives_counter_wraparound() {
    let (mut link, mock) = streaming_link();

    mock.push_rx(&touch_frame(&[0u8; 24], 0xFF));
    link.pump().unwrap();
    assert_eq!(link.loop_counter(), 0xFF);

    let mut raw = [0u8; 24];
    raw[0] = 1;
    mock.push_rx(&touch_frame(&raw, 0x00));
    link.pump().unwrap();
    assert_eq!(link.loop_counter(), 0x00);
    assert_eq!(link.segments().len(), 1);
}

#[test]
fn every_panel_bit_lands_on_its_column() {
    let (mut link, mock) = streaming_link();

    // All 30 columns of row 2 active, nothing else.
    let mut raw = [0u8; 24];
    for panel in 0..6 {
        raw[panel + 2 * 6] = 0b0001_1111;
    }
    mock.push_rx(&touch_frame(&raw, 1));
    link.pump().unwrap();

    assert_eq!(link.segments().len(), 30);
    for col in 0..30 {
        assert!(link.grid()[2][col]);
    }
    assert!(link.grid()[1].iter().all(|&c| !c));
}
