#[path = "../common/mod.rs"]
mod common;

use proptest::prelude::*;
use ringio::light::{LightFrame, LightLayer, LightSink, MemorySink, segment_pixels};
use ringio::{ActiveSegment, LightColor};

#[test]
fn green_base_with_touch_overlay() {
    // One opaque-green layer plus a touch overlay: untouched pixels stay
    // green, touched ones go white.
    let mut frame = LightFrame::solid(LightColor::GREEN);
    let touched = [ActiveSegment::new(12, 1), ActiveSegment::new(45, 2)];
    frame.add_touch_data(&touched);
    let flat = frame.flatten();

    for seg in &touched {
        let (lower, upper) = segment_pixels(seg.x, seg.y).unwrap();
        assert_eq!(flat[lower as usize], LightColor::WHITE);
        assert_eq!(flat[upper as usize], LightColor::WHITE);
    }
    let white_pixels = flat.iter().filter(|&&c| c == LightColor::WHITE).count();
    assert_eq!(white_pixels, touched.len() * 2);
    assert!(
        flat.iter()
            .all(|&c| c == LightColor::WHITE || c == LightColor::GREEN)
    );
}

#[test]
fn compositor_feeds_the_sink() {
    let mut sink = MemorySink::new();
    let mut frame = LightFrame::solid(LightColor::BLUE);
    frame.add_touch_data(&[ActiveSegment::new(0, 0)]);
    sink.write(&frame.flatten()).unwrap();

    let (lower, _) = segment_pixels(0, 0).unwrap();
    let last = sink.last().unwrap();
    assert_eq!(last[lower as usize], LightColor::WHITE);
    assert_eq!(last[100], LightColor::BLUE);
}

proptest! {
    // Flattening is pure: the same stack always produces the same buffer,
    // and pixels only ever come from one of the stacked layers.
    #[test]
    fn flatten_is_pure_and_sourced(xs in prop::collection::vec((0u8..60, 0u8..4), 0..32)) {
        let mut frame = LightFrame::solid(LightColor::new(3, 5, 7));
        let mut top = LightLayer::new();
        for &(x, y) in &xs {
            top.set_segment(x, y, LightColor::RED).unwrap();
        }
        frame.push_layer(top);

        let a = frame.flatten();
        let b = frame.flatten();
        prop_assert_eq!(a, b);
        prop_assert!(a.iter().all(|&c| c == LightColor::RED || c == LightColor::new(3, 5, 7)));
    }

    // Every in-range coordinate maps inside the strip and out-of-range ones
    // are rejected.
    #[test]
    fn segment_mapping_bounds(x: u8, y: u8) {
        match segment_pixels(x, y) {
            Ok((lower, upper)) => {
                prop_assert!(x < 60 && y < 4);
                prop_assert_eq!(upper, lower + 1);
                prop_assert!(upper < 480);
            }
            Err(_) => prop_assert!(x >= 60 || y >= 4),
        }
    }
}
