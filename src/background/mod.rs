//! Battle background data model
//!
//! A preset pairs two layers; each layer is a procedural pattern coloured by
//! one of the fixed palettes, optionally warped by a distortion effect and
//! scrolled at a constant speed.

mod catalog;
mod palette;
mod pattern;

pub use catalog::{all_presets, get_preset, preset_count};
pub use palette::{get_palette, Palette, PALETTE_COUNT, PALETTE_SIZE};
pub use pattern::{
    color_for, color_index_for, render_layer, PatternFamily, PATTERN_CANVAS_CENTER, PATTERN_COUNT,
};

use serde::{Deserialize, Serialize};

/// A 2D quantity in layer-local pixel units (scroll speeds and offsets)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// How a distortion displaces sample coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum DistortionKind {
    /// Each scanline shifts sideways by a sine of its row
    Horizontal = 1,
    /// Like `Horizontal`, but odd scanlines shift the opposite way
    HorizontalInterlaced = 2,
    /// Each column shifts vertically by a sine of its x position
    Vertical = 3,
}

/// Time-varying coordinate warp for one layer.
/// Each `*_acceleration` term is multiplied by `time²` and added to its base value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistortionEffect {
    pub kind: DistortionKind,
    pub amplitude: f32,
    pub amplitude_acceleration: f32,
    pub frequency: f32,
    pub frequency_acceleration: f32,
    pub compression: f32,
    pub compression_acceleration: f32,
    pub speed: f32,
}

/// Pattern + palette pair. Both indices are wrapped when resolved, so any value is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatternLayer {
    pub pattern_index: i32,
    pub palette_index: i32,
}

impl PatternLayer {
    pub const fn new(pattern_index: i32, palette_index: i32) -> Self {
        Self {
            pattern_index,
            palette_index,
        }
    }

    /// Pattern index reduced into [0, PATTERN_COUNT)
    #[inline]
    pub fn resolved_pattern(&self) -> i32 {
        self.pattern_index.rem_euclid(PATTERN_COUNT)
    }

    /// Palette index reduced into [0, PALETTE_COUNT)
    #[inline]
    pub fn resolved_palette(&self) -> usize {
        self.palette_index.rem_euclid(PALETTE_COUNT as i32) as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BackgroundLayer {
    pub pattern: PatternLayer,
    pub distortion: Option<DistortionEffect>,
    /// Pixels per nominal frame
    pub scroll_speed: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundPreset {
    pub name: String,
    pub layer1: BackgroundLayer,
    pub layer2: BackgroundLayer,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_layer_wraps_indices() {
        let layer = PatternLayer::new(327 + 142, 15 + 10);
        assert_eq!(layer.resolved_pattern(), 142);
        assert_eq!(layer.resolved_palette(), 10);

        let negative = PatternLayer::new(-1, -1);
        assert_eq!(negative.resolved_pattern(), 326);
        assert_eq!(negative.resolved_palette(), 14);
    }

    #[test]
    fn test_distortion_kind_numbering() {
        assert_eq!(DistortionKind::Horizontal as i32, 1);
        assert_eq!(DistortionKind::HorizontalInterlaced as i32, 2);
        assert_eq!(DistortionKind::Vertical as i32, 3);
    }
}
