//! The fixed 4-colour palettes used by every pattern layer

use crate::display::Rgba;

pub const PALETTE_COUNT: usize = 15;
pub const PALETTE_SIZE: usize = 4;

pub type Palette = [Rgba; PALETTE_SIZE];

const fn rgb(r: u8, g: u8, b: u8) -> Rgba {
    Rgba::opaque(r, g, b)
}

/// Palettes in index order: fire, ice, psychedelic, earth, neon, monochrome,
/// sunset, ocean, forest, royal, lava, cosmic, toxic, candy, rainbow
const PALETTES: [Palette; PALETTE_COUNT] = [
    // Fire
    [rgb(255, 0, 0), rgb(255, 128, 0), rgb(255, 255, 0), rgb(255, 192, 0)],
    // Ice
    [rgb(0, 128, 255), rgb(0, 192, 255), rgb(128, 224, 255), rgb(192, 240, 255)],
    // Psychedelic
    [rgb(255, 0, 255), rgb(0, 255, 255), rgb(255, 255, 0), rgb(128, 0, 255)],
    // Earth
    [rgb(139, 69, 19), rgb(160, 82, 45), rgb(205, 133, 63), rgb(222, 184, 135)],
    // Neon
    [rgb(255, 20, 147), rgb(0, 255, 127), rgb(255, 105, 180), rgb(127, 255, 212)],
    // Monochrome
    [rgb(64, 64, 64), rgb(128, 128, 128), rgb(192, 192, 192), rgb(255, 255, 255)],
    // Sunset
    [rgb(255, 94, 77), rgb(255, 157, 77), rgb(255, 206, 84), rgb(237, 117, 57)],
    // Ocean
    [rgb(0, 119, 190), rgb(0, 153, 219), rgb(72, 202, 228), rgb(144, 224, 239)],
    // Forest
    [rgb(34, 139, 34), rgb(50, 205, 50), rgb(124, 252, 0), rgb(173, 255, 47)],
    // Royal
    [rgb(75, 0, 130), rgb(138, 43, 226), rgb(147, 112, 219), rgb(186, 85, 211)],
    // Lava
    [rgb(128, 0, 0), rgb(255, 69, 0), rgb(255, 140, 0), rgb(255, 215, 0)],
    // Cosmic
    [rgb(25, 25, 112), rgb(65, 105, 225), rgb(100, 149, 237), rgb(135, 206, 250)],
    // Toxic
    [rgb(0, 255, 0), rgb(50, 205, 50), rgb(127, 255, 0), rgb(173, 255, 47)],
    // Candy
    [rgb(255, 192, 203), rgb(255, 182, 193), rgb(255, 105, 180), rgb(255, 20, 147)],
    // Rainbow
    [rgb(255, 0, 0), rgb(0, 255, 0), rgb(0, 0, 255), rgb(255, 255, 0)],
];

/// Palette for any index; wraps modulo the table size (negative indices included)
#[inline]
pub fn get_palette(index: i32) -> &'static Palette {
    &PALETTES[index.rem_euclid(PALETTE_COUNT as i32) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes_are_periodic() {
        for index in -30..60 {
            assert_eq!(get_palette(index), get_palette(index + PALETTE_COUNT as i32));
        }
    }

    #[test]
    fn test_all_colors_opaque() {
        for palette in &PALETTES {
            assert!(palette.iter().all(|c| c.a == 255));
        }
    }

    #[test]
    fn test_fire_and_rainbow_endpoints() {
        assert_eq!(get_palette(0)[0], rgb(255, 0, 0));
        assert_eq!(get_palette(14)[2], rgb(0, 0, 255));
        assert_eq!(get_palette(10)[0], rgb(128, 0, 0));
    }
}
