// ringio-rs/ringio/src/light/frame.rs

//! Ordered-layer composition into one flat pixel buffer.

use crate::constants::LIGHT_PIXELS;
use crate::light::layer::LightLayer;
use crate::types::{ActiveSegment, LightColor};

/// An ordered stack of layers plus an ephemeral touch overlay.
///
/// Layers composite bottom-up: a pixel overwrites the accumulator only when
/// it is not transparent. The touch overlay, when present, goes on last. A
/// frame is a per-tick value; flattening reads state but never mutates it.
#[derive(Debug, Clone, Default)]
pub struct LightFrame {
    layers: Vec<LightLayer>,
    touch_overlay: Option<LightLayer>,
}

impl LightFrame {
    /// A frame with one empty base layer.
    pub fn new() -> Self {
        Self {
            layers: vec![LightLayer::new()],
            touch_overlay: None,
        }
    }

    /// A frame whose base layer is a solid color.
    pub fn solid(color: LightColor) -> Self {
        Self {
            layers: vec![LightLayer::filled(color)],
            touch_overlay: None,
        }
    }

    /// A frame whose base layer is the given pixel buffer.
    pub fn from_colors(colors: [LightColor; LIGHT_PIXELS]) -> Self {
        Self {
            layers: vec![LightLayer::from_colors(colors)],
            touch_overlay: None,
        }
    }

    /// The layer stack, bottom first.
    pub fn layers(&self) -> &[LightLayer] {
        &self.layers
    }

    /// Mutable access to one layer.
    pub fn layer_mut(&mut self, index: usize) -> Option<&mut LightLayer> {
        self.layers.get_mut(index)
    }

    /// Push a layer on top of the stack.
    pub fn push_layer(&mut self, layer: LightLayer) {
        self.layers.push(layer);
    }

    /// Rebuild the touch overlay from the active segments, painted white.
    pub fn add_touch_data(&mut self, segments: &[ActiveSegment]) {
        self.touch_overlay = Some(LightLayer::from_touch_data(segments));
    }

    /// Drop the touch overlay.
    pub fn clear_touch_data(&mut self) {
        self.touch_overlay = None;
    }

    /// Composite all layers into one flat buffer. Pure: the same frame
    /// flattens to the same buffer every time.
    pub fn flatten(&self) -> [LightColor; LIGHT_PIXELS] {
        let mut flat = [LightColor::OFF; LIGHT_PIXELS];
        for layer in &self.layers {
            for (slot, &color) in flat.iter_mut().zip(layer.colors().iter()) {
                if !color.is_transparent() {
                    *slot = color;
                }
            }
        }
        if let Some(overlay) = &self.touch_overlay {
            for (slot, &color) in flat.iter_mut().zip(overlay.colors().iter()) {
                if !color.is_transparent() {
                    *slot = color;
                }
            }
        }
        flat
    }
}
