//! Procedural pattern families
//!
//! A pattern index in [0, 327) selects one of 17 families. Families occupy
//! 20 consecutive indices each (the special family only 7), and
//! `pattern % 20` tunes a size, frequency or threshold inside the family.
//! Each family maps an integer pixel coordinate to a palette slot.
//!
//! Integer maths truncates toward zero and floats are converted by
//! truncation, never rounding; the exact pixel layout of every background
//! depends on it. All centred families assume a 256x256 logical canvas.

use super::palette::{get_palette, PALETTE_SIZE};
use super::PatternLayer;
use crate::display::{PixelBuffer, Rgba};

pub const PATTERN_COUNT: i32 = 327;

/// Centre of the 256x256 logical canvas the radial families are laid out on
pub const PATTERN_CANVAS_CENTER: i64 = 128;

const CENTER: i64 = PATTERN_CANVAS_CENTER;
const CENTER_F: f64 = PATTERN_CANVAS_CENTER as f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternFamily {
    Checkerboard,
    Stripe,
    Diagonal,
    Circle,
    Wave,
    Grid,
    Diamond,
    Spiral,
    Noise,
    Cross,
    Hexagon,
    Star,
    Gradient,
    Mosaic,
    Fractal,
    Organic,
    Special,
}

impl PatternFamily {
    pub const ALL: [PatternFamily; 17] = [
        Self::Checkerboard,
        Self::Stripe,
        Self::Diagonal,
        Self::Circle,
        Self::Wave,
        Self::Grid,
        Self::Diamond,
        Self::Spiral,
        Self::Noise,
        Self::Cross,
        Self::Hexagon,
        Self::Star,
        Self::Gradient,
        Self::Mosaic,
        Self::Fractal,
        Self::Organic,
        Self::Special,
    ];

    /// Family owning a pattern index (wrapped modulo `PATTERN_COUNT` first)
    pub fn of(pattern_index: i32) -> Self {
        let wrapped = pattern_index.rem_euclid(PATTERN_COUNT);
        Self::ALL[(wrapped / 20) as usize]
    }
}

/// Inputs shared by every family: coordinate, wrapped pattern index and palette length
#[derive(Clone, Copy)]
struct Sample {
    x: i64,
    y: i64,
    p: i64,
    colors: i64,
}

impl Sample {
    /// Variant within the family
    #[inline]
    fn k(&self) -> i64 {
        self.p % 20
    }
}

type FamilyFn = fn(Sample) -> i64;

/// Indexed by `PatternFamily as usize`
const FAMILY_FNS: [FamilyFn; 17] = [
    checkerboard,
    stripe,
    diagonal,
    circle,
    wave,
    grid,
    diamond,
    spiral,
    noise,
    cross,
    hexagon,
    star,
    gradient,
    mosaic,
    fractal,
    organic,
    special,
];

#[inline]
fn spatial_hash(a: i64, b: i64, seed: i64) -> i64 {
    (a * 73856093 ^ b * 19349663 ^ seed * 83492791) & 0x7FFF_FFFF
}

#[inline]
fn dist_from_center(x: i64, y: i64) -> f64 {
    let dx = (x - CENTER) as f64;
    let dy = (y - CENTER) as f64;
    (dx * dx + dy * dy).sqrt()
}

fn checkerboard(s: Sample) -> i64 {
    let size = 8 + s.k() * 4;
    s.x / size + s.y / size
}

fn stripe(s: Sample) -> i64 {
    let vertical = s.p % 2 == 0;
    let width = 4 + (s.p % 10) * 2;
    if vertical {
        s.x / width
    } else {
        s.y / width
    }
}

fn diagonal(s: Sample) -> i64 {
    let size = 8 + s.k() * 2;
    (s.x + s.y) / size
}

fn circle(s: Sample) -> i64 {
    let ring = 20.0 + s.k() as f64 * 5.0;
    (dist_from_center(s.x, s.y) / ring) as i64
}

fn wave(s: Sample) -> i64 {
    let frequency = 0.05 + s.k() as f64 * 0.01;
    let amplitude = 10.0 + s.k() as f64 * 2.0;
    let offset = ((s.x as f64 * frequency).sin() * amplitude) as i64;
    ((s.y + offset) / 20).abs()
}

fn grid(s: Sample) -> i64 {
    let size = 16 + s.k() * 4;
    if s.colors <= 1 {
        return 0;
    }
    if s.x % size < 2 || s.y % size < 2 {
        0
    } else {
        (s.x / size + s.y / size) % (s.colors - 1) + 1
    }
}

fn diamond(s: Sample) -> i64 {
    let size = 16 + s.k() * 4;
    ((s.x - CENTER).abs() + (s.y - CENTER).abs()) / size
}

fn spiral(s: Sample) -> i64 {
    let dx = s.x as f64 - CENTER_F;
    let dy = s.y as f64 - CENTER_F;
    let angle = dy.atan2(dx);
    let radius = (dx * dx + dy * dy).sqrt();
    (((angle + radius * 0.1) * (1 + s.k()) as f64) as i64).abs()
}

fn noise(s: Sample) -> i64 {
    spatial_hash(s.x, s.y, s.p)
}

fn cross(s: Sample) -> i64 {
    let size = 8 + s.k() * 2;
    if s.x % size < 2 || s.y % size < 2 {
        (s.x + s.y) / size
    } else {
        (s.x * s.y) / (size * size)
    }
}

fn hexagon(s: Sample) -> i64 {
    let size = 20.0 + s.k() as f64 * 2.0;
    let hex_y = s.y as f64 * 0.866;
    let hex_x = s.x as f64 + if s.y % 2 == 0 { 0.0 } else { size / 2.0 };
    (hex_x / size) as i64 + (hex_y / size) as i64
}

fn star(s: Sample) -> i64 {
    let dx = s.x - CENTER;
    let dy = s.y - CENTER;
    let angle = (dy as f64).atan2(dx as f64);
    let points = 5 + s.k() / 4;
    let boundary = (angle * points as f64).sin() * 50.0;
    let dist = ((dx * dx + dy * dy) as f64).sqrt();
    let inside = if dist < boundary { 0 } else { 1 };
    if s.colors >= 3 {
        inside + ((angle * 10.0) as i64).abs() % (s.colors - 2)
    } else {
        inside
    }
}

fn gradient(s: Sample) -> i64 {
    let position = if s.p % 2 == 0 { s.x } else { s.y };
    position * s.colors / 256
}

fn mosaic(s: Sample) -> i64 {
    let tile = 8 + s.k() * 2;
    spatial_hash(s.x / tile, s.y / tile, s.p)
}

fn fractal(s: Sample) -> i64 {
    const MAX_ITER: i64 = 20;
    let mut zx = (s.x - CENTER) as f64 / 64.0;
    let mut zy = (s.y - CENTER) as f64 / 64.0;
    let cx = -0.7 + s.k() as f64 * 0.05;
    let cy = 0.27015;

    let mut iter = 0;
    while zx * zx + zy * zy < 4.0 && iter < MAX_ITER {
        let next_x = zx * zx - zy * zy + cx;
        zy = 2.0 * zx * zy + cy;
        zx = next_x;
        iter += 1;
    }
    iter
}

fn organic(s: Sample) -> i64 {
    let scale = 0.05 + s.k() as f64 * 0.01;
    let v1 = (s.x as f64 * scale).sin() * (s.y as f64 * scale).cos();
    let v2 = ((s.x + s.y) as f64 * scale * 0.7).sin();
    (((v1 + v2) * 2.0 + 4.0) as i64).abs()
}

fn special(s: Sample) -> i64 {
    match s.p - 320 {
        // Solid
        0 => 0,
        // Two-tone pixel checker
        1 => (s.x + s.y) % 2,
        // Quadrants around the centre
        2 => i64::from(s.x >= CENTER) + if s.y < CENTER { 0 } else { 2 },
        // Radial gradient
        3 => (dist_from_center(s.x, s.y) / 30.0) as i64,
        // Concentric squares
        4 => (s.x - CENTER).abs().max((s.y - CENTER).abs()) / 20,
        // Sparse dots
        5 => {
            let hash = (s.x * 73856093 ^ s.y * 19349663) & 0x7FFF_FFFF;
            if hash % 100 < 10 {
                hash % 1000
            } else {
                0
            }
        },
        _ => s.x / 16 + s.y / 16,
    }
}

fn color_index_with_len(x: i32, y: i32, pattern_index: i32, colors: usize) -> i64 {
    let wrapped = pattern_index.rem_euclid(PATTERN_COUNT);
    let family = PatternFamily::of(wrapped);
    FAMILY_FNS[family as usize](Sample {
        x: i64::from(x),
        y: i64::from(y),
        p: i64::from(wrapped),
        colors: colors as i64,
    })
}

/// Raw (unreduced, possibly large or negative) colour index for a pixel.
/// Reduce with `abs(index) % palette.len()` to pick a slot.
pub fn color_index_for(x: i32, y: i32, pattern_index: i32) -> i64 {
    color_index_with_len(x, y, pattern_index, PALETTE_SIZE)
}

/// Final colour of a pixel for a pattern drawn with `palette`.
/// An empty palette yields white.
pub fn color_for(x: i32, y: i32, pattern_index: i32, palette: &[Rgba]) -> Rgba {
    if palette.is_empty() {
        return Rgba::WHITE;
    }
    let index = color_index_with_len(x, y, pattern_index, palette.len());
    palette[(index.unsigned_abs() % palette.len() as u64) as usize]
}

/// Rasterise a pattern layer into `buffer` at the buffer's own resolution
pub fn render_layer(layer: &PatternLayer, buffer: &mut PixelBuffer) {
    let palette = get_palette(layer.palette_index);
    let pattern = layer.resolved_pattern();
    buffer.fill_with(|x, y| color_for(x as i32, y as i32, pattern, palette));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::{get_palette, PatternLayer};
    use crate::display::{PixelBuffer, Rgba};

    fn sample_grid() -> impl Iterator<Item = (i32, i32)> {
        (0..256).step_by(7).flat_map(|y| (0..256).step_by(5).map(move |x| (x, y)))
    }

    #[test]
    fn test_every_pattern_is_deterministic_and_in_range() {
        for pattern in 0..PATTERN_COUNT {
            for (x, y) in sample_grid() {
                let a = color_index_for(x, y, pattern);
                let b = color_index_for(x, y, pattern);
                assert_eq!(a, b, "pattern {} not deterministic at ({}, {})", pattern, x, y);
                let slot = (a.unsigned_abs() % PALETTE_SIZE as u64) as usize;
                assert!(slot < PALETTE_SIZE);
            }
        }
    }

    #[test]
    fn test_pattern_index_wraps() {
        for (x, y) in sample_grid().take(200) {
            assert_eq!(color_index_for(x, y, 5), color_index_for(x, y, 5 + PATTERN_COUNT));
            assert_eq!(color_index_for(x, y, 326), color_index_for(x, y, -1));
        }
    }

    #[test]
    fn test_family_dispatch_ranges() {
        assert_eq!(PatternFamily::of(0), PatternFamily::Checkerboard);
        assert_eq!(PatternFamily::of(39), PatternFamily::Stripe);
        assert_eq!(PatternFamily::of(142), PatternFamily::Spiral);
        assert_eq!(PatternFamily::of(82), PatternFamily::Wave);
        assert_eq!(PatternFamily::of(299), PatternFamily::Fractal);
        assert_eq!(PatternFamily::of(320), PatternFamily::Special);
        assert_eq!(PatternFamily::of(326), PatternFamily::Special);
        assert_eq!(PatternFamily::of(327), PatternFamily::Checkerboard);
    }

    #[test]
    fn test_circle_center_is_ring_zero() {
        for pattern in 60..80 {
            assert_eq!(color_index_for(128, 128, pattern), 0);
        }
    }

    #[test]
    fn test_checkerboard_cells() {
        // pattern 0: 8px cells
        assert_eq!(color_index_for(0, 0, 0), 0);
        assert_eq!(color_index_for(7, 7, 0), 0);
        assert_eq!(color_index_for(8, 0, 0), 1);
        assert_eq!(color_index_for(8, 8, 0), 2);
        // pattern 1: 12px cells
        assert_eq!(color_index_for(11, 0, 1), 0);
        assert_eq!(color_index_for(12, 0, 1), 1);
    }

    #[test]
    fn test_stripe_orientation_follows_parity() {
        // even -> vertical stripes keyed on x, width 4 + 0*2
        assert_eq!(color_index_for(9, 100, 20), 2);
        // odd -> horizontal stripes keyed on y, width 4 + 1*2
        assert_eq!(color_index_for(100, 13, 21), 2);
    }

    #[test]
    fn test_grid_lines_use_slot_zero() {
        // gridSize 16 for pattern 100
        assert_eq!(color_index_for(0, 5, 100), 0);
        assert_eq!(color_index_for(17, 1, 100), 0);
        // interior cells never hit slot 0
        for (x, y) in sample_grid() {
            if x % 16 >= 2 && y % 16 >= 2 {
                assert_ne!(color_index_for(x, y, 100), 0);
            }
        }
    }

    #[test]
    fn test_diamond_and_squares_centered() {
        assert_eq!(color_index_for(128, 128, 120), 0);
        assert_eq!(color_index_for(144, 128, 120), 1);
        assert_eq!(color_index_for(128, 128, 324), 0);
        assert_eq!(color_index_for(148, 100, 324), 1);
    }

    #[test]
    fn test_noise_hash_is_non_negative() {
        for (x, y) in sample_grid() {
            assert!(color_index_for(x, y, 165) >= 0);
            assert!(color_index_for(x, y, 262) >= 0);
        }
    }

    #[test]
    fn test_fractal_iteration_bounds() {
        for (x, y) in sample_grid() {
            let iter = color_index_for(x, y, 285);
            assert!((0..=20).contains(&iter));
        }
        // far corner escapes immediately
        assert_eq!(color_index_for(0, 0, 280), 0);
    }

    #[test]
    fn test_special_cases() {
        assert_eq!(color_index_for(17, 33, 320), 0);
        assert_eq!(color_index_for(1, 2, 321), 1);
        assert_eq!(color_index_for(0, 0, 322), 0);
        assert_eq!(color_index_for(200, 0, 322), 1);
        assert_eq!(color_index_for(0, 200, 322), 2);
        assert_eq!(color_index_for(200, 200, 322), 3);
        assert_eq!(color_index_for(128, 188, 323), 2);
        assert_eq!(color_index_for(32, 16, 326), 3);
    }

    #[test]
    fn test_gradient_spans_palette() {
        assert_eq!(color_index_for(0, 0, 240), 0);
        assert_eq!(color_index_for(255, 0, 240), 3);
        assert_eq!(color_index_for(255, 0, 241), 0);
        assert_eq!(color_index_for(0, 255, 241), 3);
    }

    #[test]
    fn test_wave_offset_truncates_toward_zero() {
        // sin * amplitude = -3.98 here: truncation gives -3 and row (23 - 3) / 20 = 1,
        // where rounding or flooring would give 0
        assert_eq!(color_index_for(41, 23, 90), 1);
        assert_eq!(color_index_for(69, 23, 80), 1);
        assert_eq!(color_index_for(10, 50, 82), 2);
        assert_eq!(color_index_for(100, 200, 91), 9);
    }

    #[test]
    fn test_spiral_values() {
        assert_eq!(color_index_for(200, 128, 142), 21);
        assert_eq!(color_index_for(128, 60, 147), 41);
        assert_eq!(color_index_for(30, 220, 159), 316);
        assert_eq!(color_index_for(129, 129, 140), 0);
    }

    #[test]
    fn test_noise_and_mosaic_hashes() {
        assert_eq!(color_index_for(0, 0, 160), 473_944_672);
        assert_eq!(color_index_for(17, 42, 165), 1_334_276_296);
        assert_eq!(color_index_for(255, 255, 179), 1_046_084_151);

        assert_eq!(color_index_for(0, 0, 260), 233_289_180);
        assert_eq!(color_index_for(30, 70, 263), 299_638_432);
        assert_eq!(color_index_for(255, 1, 279), 2_054_649_248);
        // Whole tiles share one hash
        assert_eq!(color_index_for(31, 71, 263), color_index_for(30, 70, 263));
    }

    #[test]
    fn test_cross_lines_and_cells() {
        // On a grid line: (x + y) / size
        assert_eq!(color_index_for(9, 33, 180), 5);
        assert_eq!(color_index_for(0, 99, 190), 3);
        // Inside a cell: (x * y) / size²
        assert_eq!(color_index_for(21, 45, 180), 14);
        assert_eq!(color_index_for(50, 70, 183), 8);
    }

    #[test]
    fn test_hexagon_odd_rows_shift_half_a_cell() {
        assert_eq!(color_index_for(15, 40, 200), 1);
        assert_eq!(color_index_for(15, 41, 200), 2);
        assert_eq!(color_index_for(45, 40, 200), 3);
        assert_eq!(color_index_for(100, 77, 205), 5);
        assert_eq!(color_index_for(55, 99, 210), 3);
    }

    #[test]
    fn test_star_inside_outside_and_angular_bands() {
        // Inside the star boundary, band |trunc(angle * 10)| % 2 = 1
        assert_eq!(color_index_for(150, 135, 220), 1);
        // Outside the boundary
        assert_eq!(color_index_for(200, 30, 220), 2);
        assert_eq!(color_index_for(128, 10, 230), 2);
        assert_eq!(color_index_for(20, 200, 239), 2);
        // Zero angle sits on a zero-radius boundary
        assert_eq!(color_index_for(135, 128, 227), 1);
    }

    #[test]
    fn test_organic_values() {
        assert_eq!(color_index_for(0, 0, 300), 4);
        assert_eq!(color_index_for(40, 90, 304), 6);
        assert_eq!(color_index_for(200, 13, 319), 3);
    }

    #[test]
    fn test_empty_palette_falls_back_to_white() {
        assert_eq!(color_for(3, 4, 60, &[]), Rgba::WHITE);
    }

    #[test]
    fn test_render_layer_matches_color_for() {
        let layer = PatternLayer::new(142, 0);
        let mut buffer = PixelBuffer::with_size(32, 16);
        render_layer(&layer, &mut buffer);
        let palette = get_palette(0);
        for y in 0..16 {
            for x in 0..32 {
                assert_eq!(buffer.get_pixel(x, y), Some(color_for(x, y, 142, palette)));
            }
        }
    }
}
