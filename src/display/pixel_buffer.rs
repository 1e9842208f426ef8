use super::{NATIVE_HEIGHT, NATIVE_WIDTH};

/// An RGBA colour as produced by the palette table and read back from buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const WHITE: Self = Self::opaque(255, 255, 255);
    pub const BLACK: Self = Self::opaque(0, 0, 0);
}

// ============================================================================
// Utility Functions
// ============================================================================

/// Write ABGR pixel to slice (RGBA8888 little-endian byte order)
#[inline]
fn write_pixel(dest: &mut [u8], c: Rgba) {
    dest[0] = c.a; // A
    dest[1] = c.b; // B
    dest[2] = c.g; // G
    dest[3] = c.r; // R
}

#[inline]
fn read_pixel(src: &[u8]) -> Rgba {
    Rgba {
        r: src[3],
        g: src[2],
        b: src[1],
        a: src[0],
    }
}

// ============================================================================
// PixelBuffer
// ============================================================================

/// RGBA8888 pixel buffer for software rendering.
/// Every pipeline stage reads one of these and writes another; the byte
/// layout matches the SDL streaming texture so the final buffer uploads as-is.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Create a buffer at the native low-resolution size (256x224)
    pub fn new() -> Self {
        Self::with_size(NATIVE_WIDTH, NATIVE_HEIGHT)
    }

    /// Create a new pixel buffer with custom resolution, cleared to transparent black
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; (width * height * 4) as usize],
            width,
            height,
        }
    }

    /// Build a buffer by evaluating `f` at every pixel, row by row
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Rgba) -> Self {
        let mut buffer = Self::with_size(width, height);
        buffer.fill_with(&mut f);
        buffer
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn same_size(&self, other: &PixelBuffer) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Check if coordinates are within bounds
    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    /// Calculate byte offset for pixel at (x, y)
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        ((y * self.width + x) * 4) as usize
    }

    /// Reallocate to a new size if it differs. Contents are cleared on change.
    /// Returns true when a reallocation happened.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if self.width == width && self.height == height {
            return false;
        }
        *self = Self::with_size(width, height);
        true
    }

    /// Overwrite every pixel with `f(x, y)`
    pub fn fill_with(&mut self, mut f: impl FnMut(u32, u32) -> Rgba) {
        let width = self.width;
        let mut idx = 0;
        for y in 0..self.height {
            for x in 0..width {
                write_pixel(&mut self.pixels[idx..idx + 4], f(x, y));
                idx += 4;
            }
        }
    }

    /// Set a single pixel (bounds checked)
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            write_pixel(&mut self.pixels[idx..idx + 4], color);
        }
    }

    /// Read a pixel from the buffer (bounds checked)
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Rgba> {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            Some(read_pixel(&self.pixels[idx..idx + 4]))
        } else {
            None
        }
    }

    /// Read a pixel with repeat addressing: any integer coordinate maps onto
    /// the buffer by wrapping each axis (negative values wrap from the far edge).
    #[inline]
    pub fn get_pixel_wrapped(&self, x: i32, y: i32) -> Rgba {
        let wx = x.rem_euclid(self.width as i32) as u32;
        let wy = y.rem_euclid(self.height as i32) as u32;
        let idx = self.pixel_index(wx, wy);
        read_pixel(&self.pixels[idx..idx + 4])
    }

    /// Read a pixel with clamp-to-edge addressing
    #[inline]
    pub fn get_pixel_clamped(&self, x: i32, y: i32) -> Rgba {
        let cx = x.clamp(0, self.width as i32 - 1) as u32;
        let cy = y.clamp(0, self.height as i32 - 1) as u32;
        let idx = self.pixel_index(cx, cy);
        read_pixel(&self.pixels[idx..idx + 4])
    }

    /// Copy contents from another buffer (must be same size)
    pub fn copy_from(&mut self, src: &PixelBuffer) {
        if self.pixels.len() == src.pixels.len() {
            self.pixels.copy_from_slice(&src.pixels);
        }
    }

    /// Raw bytes for SDL texture upload
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable access to raw pixels for per-row stages
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Byte length of one row
    #[inline]
    pub fn pitch(&self) -> usize {
        (self.width * 4) as usize
    }
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_roundtrip_keeps_channel_order() {
        let mut buffer = PixelBuffer::with_size(4, 4);
        buffer.set_pixel(1, 2, Rgba::new(10, 20, 30, 40));
        assert_eq!(buffer.get_pixel(1, 2), Some(Rgba::new(10, 20, 30, 40)));
        // ABGR byte layout for the SDL texture
        let idx = (2 * 4 + 1) * 4;
        assert_eq!(&buffer.as_bytes()[idx..idx + 4], &[40, 30, 20, 10]);
    }

    #[test]
    fn test_out_of_bounds_reads_none() {
        let buffer = PixelBuffer::with_size(4, 4);
        assert_eq!(buffer.get_pixel(-1, 0), None);
        assert_eq!(buffer.get_pixel(0, 4), None);
    }

    #[test]
    fn test_wrapped_addressing() {
        let buffer = PixelBuffer::from_fn(4, 3, |x, y| Rgba::opaque(x as u8, y as u8, 0));
        assert_eq!(buffer.get_pixel_wrapped(5, 4), Rgba::opaque(1, 1, 0));
        assert_eq!(buffer.get_pixel_wrapped(-1, -1), Rgba::opaque(3, 2, 0));
    }

    #[test]
    fn test_resize_only_when_changed() {
        let mut buffer = PixelBuffer::with_size(8, 8);
        assert!(!buffer.resize(8, 8));
        assert!(buffer.resize(16, 4));
        assert_eq!((buffer.width(), buffer.height()), (16, 4));
        assert_eq!(buffer.as_bytes().len(), 16 * 4 * 4);
    }
}
