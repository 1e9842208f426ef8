//! CRT emulation and upscale to display resolution
//!
//! Maps the low-resolution frame onto the output buffer with nearest
//! sampling, then applies barrel curvature, pixelation, scanlines and a
//! vignette. Pixelation groups whole native pixels, so blocks stay on the
//! native grid at any integer upscale. Neutral parameters reduce this to a
//! plain nearest-neighbour scale (an exact copy when the sizes match).

use std::f32::consts::PI;

use crate::display::{PixelBuffer, Rgba};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrtParams {
    /// Darkening between scanlines, 0-0.5
    pub scanline_intensity: f32,
    /// Native pixels per pixelation block edge, 1-6
    pub pixel_size: u32,
    /// Barrel distortion strength, 0-0.05
    pub curvature: f32,
    /// Corner darkening, 0-0.5
    pub vignette_strength: f32,
}

impl CrtParams {
    pub const NEUTRAL: Self = Self {
        scanline_intensity: 0.0,
        pixel_size: 1,
        curvature: 0.0,
        vignette_strength: 0.0,
    };

    pub fn is_neutral(&self) -> bool {
        self.scanline_intensity <= 0.0
            && self.pixel_size <= 1
            && self.curvature <= 0.0
            && self.vignette_strength <= 0.0
    }
}

impl Default for CrtParams {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Barrel warp in [-1, 1] space. Returns None outside the tube.
#[inline]
fn barrel(u: f32, v: f32, curvature: f32) -> Option<(f32, f32)> {
    let cx = u * 2.0 - 1.0;
    let cy = v * 2.0 - 1.0;
    let k = 1.0 + curvature * (cx * cx + cy * cy);
    let (u, v) = (cx * k * 0.5 + 0.5, cy * k * 0.5 + 0.5);
    if (0.0..1.0).contains(&u) && (0.0..1.0).contains(&v) {
        Some((u, v))
    } else {
        None
    }
}

/// Brightness factor of the beam at vertical screen position `v`, never above 1
#[inline]
fn scanline_shade(v: f32, source_rows: f32, intensity: f32) -> f32 {
    let beam = ((v * source_rows).fract() * PI).sin();
    1.0 - intensity * (1.0 - beam)
}

#[inline]
fn vignette_shade(u: f32, v: f32, strength: f32) -> f32 {
    let dx = u - 0.5;
    let dy = v - 0.5;
    1.0 - strength * (dx * dx + dy * dy) * 2.0
}

#[inline]
fn shade_color(c: Rgba, shade: f32) -> Rgba {
    let scale = |ch: u8| (ch as f32 * shade).clamp(0.0, 255.0) as u8;
    Rgba::new(scale(c.r), scale(c.g), scale(c.b), c.a)
}

/// Render `input` into `output` at the output's current size
pub fn apply_crt(input: &PixelBuffer, params: &CrtParams, output: &mut PixelBuffer) {
    let out_w = output.width();
    let out_h = output.height();
    if out_w == 0 || out_h == 0 || input.width() == 0 || input.height() == 0 {
        return;
    }

    let in_w = input.width() as f32;
    let in_h = input.height() as f32;
    let block = params.pixel_size.max(1) as i32;
    let inv_w = 1.0 / out_w as f32;
    let inv_h = 1.0 / out_h as f32;

    output.fill_with(|ox, oy| {
        let mut u = (ox as f32 + 0.5) * inv_w;
        let mut v = (oy as f32 + 0.5) * inv_h;

        if params.curvature > 0.0 {
            match barrel(u, v, params.curvature) {
                Some(warped) => (u, v) = warped,
                None => return Rgba::BLACK,
            }
        }

        // Each block shows its top-left native pixel
        let sx = (u * in_w) as i32 / block * block;
        let sy = (v * in_h) as i32 / block * block;
        let color = input.get_pixel_clamped(sx, sy);

        let mut shade = 1.0;
        if params.scanline_intensity > 0.0 {
            let screen_v = (oy as f32 + 0.5) * inv_h;
            shade *= scanline_shade(screen_v, in_h, params.scanline_intensity);
        }
        if params.vignette_strength > 0.0 {
            let su = (ox as f32 + 0.5) * inv_w;
            let sv = (oy as f32 + 0.5) * inv_h;
            shade *= vignette_shade(su, sv, params.vignette_strength);
        }

        if shade == 1.0 {
            color
        } else {
            shade_color(color, shade)
        }
    });
}
