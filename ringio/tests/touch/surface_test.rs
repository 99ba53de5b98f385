#[path = "../common/mod.rs"]
mod common;

use ringio::test_support::{SharedMock, panel_handshake_bytes, scan_ack, touch_frame};
use ringio::touch::TouchSurface;
use ringio::{ActiveSegment, Side};

fn streaming_surface() -> (TouchSurface, SharedMock, SharedMock) {
    let left = SharedMock::new();
    let right = SharedMock::new();
    left.push_rx(&panel_handshake_bytes(Side::Left));
    right.push_rx(&panel_handshake_bytes(Side::Right));
    left.push_rx(&scan_ack());
    right.push_rx(&scan_ack());
    let mut surface = TouchSurface::new(Box::new(left.clone()), Box::new(right.clone()));
    surface.initialize().unwrap();
    surface.start_touch_stream().unwrap();
    (surface, left, right)
}

#[test]
fn both_halves_feed_one_coordinate_space() {
    let (mut surface, left, right) = streaming_surface();

    // Left column 0 and right wire column 0 (combined column 59), same row.
    let mut raw = [0u8; 24];
    raw[0] = 0b0000_0001;
    left.push_rx(&touch_frame(&raw, 1));
    right.push_rx(&touch_frame(&raw, 1));
    surface.pump().unwrap();
    surface.refresh();

    assert_eq!(
        surface.segments(),
        &[ActiveSegment::new(0, 0), ActiveSegment::new(59, 0)]
    );
}

#[test]
fn mirror_normalization_covers_the_right_half() {
    let (mut surface, _left, right) = streaming_surface();

    let mut raw = [0u8; 24];
    for panel in 0..6 {
        raw[panel] = 0b0001_1111; // whole row 0 on the right side
    }
    right.push_rx(&touch_frame(&raw, 1));
    surface.pump().unwrap();
    surface.refresh();

    let right_grid = *surface.right().grid();
    for c in 30..60usize {
        assert_eq!(
            surface.grid()[0][c],
            right_grid[0][29 - (c - 30)],
            "column {} broke the mirror law",
            c
        );
    }
}

#[test]
fn close_tears_down_both_sides() {
    let (mut surface, _left, _right) = streaming_surface();
    surface.close().unwrap();
    assert!(!surface.left().is_open());
    assert!(!surface.right().is_open());
    // Idempotent across the pair.
    surface.close().unwrap();
}

#[test]
fn light_draw_parity_throttles_to_half_rate() {
    let (mut surface, left, _right) = streaming_surface();
    let mut draws = 0;
    for counter in 1..=8u8 {
        left.push_rx(&touch_frame(&[0u8; 24], counter));
        surface.pump().unwrap();
        if surface.light_draw_tick() {
            draws += 1;
        }
    }
    assert_eq!(draws, 4);
}
