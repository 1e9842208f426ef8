//! Per-pixel coordinate warp for a single layer
//!
//! The classic battle-background wobble: every scanline (or column) reads
//! its source pixels from a position displaced by a sine wave whose
//! amplitude, frequency and compression drift over time. Sampling wraps
//! around the source image, so the layer tiles seamlessly while scrolling.

use crate::background::{DistortionEffect, DistortionKind, Vec2};
use crate::display::PixelBuffer;

/// Distortion parameters evaluated at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wobble {
    pub kind: DistortionKind,
    pub amplitude: f32,
    pub frequency: f32,
    pub compression: f32,
    pub phase: f32,
}

impl Wobble {
    /// Evaluate `effect` at `time`. `intensity` scales the amplitude terms only.
    pub fn at(effect: &DistortionEffect, time: f32, intensity: f32) -> Self {
        let t2 = time * time;
        Self {
            kind: effect.kind,
            amplitude: effect.amplitude * intensity + effect.amplitude_acceleration * intensity * t2,
            frequency: effect.frequency + effect.frequency_acceleration * t2,
            compression: effect.compression + effect.compression_acceleration * t2,
            phase: effect.speed * time,
        }
    }

    /// Displacement along the distortion axis for scanline/column `line`
    #[inline]
    fn shift(&self, line: u32) -> f32 {
        self.amplitude * (line as f32 * self.frequency + self.phase).sin()
    }
}

/// Distortion stage with scratch storage reused from frame to frame
#[derive(Debug, Default)]
pub struct Distorter {
    column_shift: Vec<f32>,
}

impl Distorter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Warp `source` into `output` (resized to match if needed).
    /// With no effect the layer is copied through untouched.
    pub fn distort(
        &mut self,
        source: &PixelBuffer,
        effect: Option<&DistortionEffect>,
        time: f32,
        scroll: Vec2,
        intensity: f32,
        output: &mut PixelBuffer,
    ) {
        output.resize(source.width(), source.height());

        let Some(effect) = effect else {
            output.copy_from(source);
            return;
        };

        let wobble = Wobble::at(effect, time, intensity);
        let stretch = 1.0 + wobble.compression;

        match wobble.kind {
            DistortionKind::Horizontal | DistortionKind::HorizontalInterlaced => {
                let interlaced = wobble.kind == DistortionKind::HorizontalInterlaced;
                let mut row_y = u32::MAX;
                let mut row_shift = 0.0;
                let mut row_sy = 0;
                output.fill_with(|x, y| {
                    if y != row_y {
                        row_y = y;
                        row_shift = wobble.shift(y);
                        if interlaced && y % 2 == 1 {
                            row_shift = -row_shift;
                        }
                        row_sy = (y as f32 + scroll.y).floor() as i32;
                    }
                    let sx = x as f32 * stretch + row_shift + scroll.x;
                    source.get_pixel_wrapped(sx.floor() as i32, row_sy)
                });
            },
            DistortionKind::Vertical => {
                self.column_shift.clear();
                self.column_shift.extend((0..source.width()).map(|x| wobble.shift(x)));
                let column_shift = &self.column_shift;
                output.fill_with(|x, y| {
                    let sx = x as f32 + scroll.x;
                    let sy = y as f32 * stretch + column_shift[x as usize] + scroll.y;
                    source.get_pixel_wrapped(sx.floor() as i32, sy.floor() as i32)
                });
            },
        }
    }
}

/// One-off warp with its own scratch storage
pub fn distort(
    source: &PixelBuffer,
    effect: Option<&DistortionEffect>,
    time: f32,
    scroll: Vec2,
    intensity: f32,
    output: &mut PixelBuffer,
) {
    Distorter::new().distort(source, effect, time, scroll, intensity, output);
}
