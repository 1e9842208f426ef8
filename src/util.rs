//! Shared utilities

use std::collections::VecDeque;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Simple xorshift64 RNG, enough for picking a starting preset
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) } // xorshift is stuck at zero
    }

    /// Seeded from the wall clock
    pub fn from_time() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x9E37_79B9_7F4A_7C15);
        Self::new(nanos)
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform-ish index in [0, len). Returns 0 for an empty range.
    #[inline]
    pub fn below(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.next_u64() % len as u64) as usize
    }
}

/// Linear interpolation of one 8-bit channel, rounded to nearest
#[inline]
pub fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    let t = t.clamp(0.0, 1.0);
    (a as f32 + (b as f32 - a as f32) * t).round() as u8
}

// ============================================================================
// FPS Counter
// ============================================================================

/// FPS counter with rolling average
pub struct FpsCounter {
    frame_times: VecDeque<f32>,
    last_frame: Instant,
    sample_count: usize,
}

impl FpsCounter {
    /// Create a new FPS counter with specified sample window
    pub fn new(sample_count: usize) -> Self {
        Self {
            frame_times: VecDeque::with_capacity(sample_count),
            last_frame: Instant::now(),
            sample_count: sample_count.max(1),
        }
    }

    /// Call once per frame. Returns (delta_time, average_fps).
    pub fn tick(&mut self) -> (f32, f32) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.record(dt);

        let avg_dt = self.avg_dt();
        let avg_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };
        (dt, avg_fps)
    }

    fn record(&mut self, dt: f32) {
        self.frame_times.push_back(dt);
        if self.frame_times.len() > self.sample_count {
            self.frame_times.pop_front();
        }
    }

    fn avg_dt(&self) -> f32 {
        self.frame_times.iter().sum::<f32>() / self.frame_times.len().max(1) as f32
    }

    /// Average frame time in milliseconds
    pub fn avg_frame_time_ms(&self) -> f32 {
        self.avg_dt() * 1000.0
    }

    /// Min/max FPS over the sample window
    pub fn min_max_fps(&self) -> (f32, f32) {
        if self.frame_times.is_empty() {
            return (0.0, 0.0);
        }
        let min_dt = self.frame_times.iter().copied().fold(f32::INFINITY, f32::min);
        let max_dt = self.frame_times.iter().copied().fold(0.0, f32::max);
        let max_fps = if min_dt > 0.0 { 1.0 / min_dt } else { 0.0 };
        let min_fps = if max_dt > 0.0 { 1.0 / max_dt } else { 0.0 };
        (min_fps, max_fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_is_deterministic() {
        let mut a = Rng::new(42);
        let mut b = Rng::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn test_rng_zero_seed_still_advances() {
        let mut rng = Rng::new(0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn test_rng_below_stays_in_range() {
        let mut rng = Rng::new(7);
        for _ in 0..1000 {
            assert!(rng.below(15) < 15);
        }
        assert_eq!(rng.below(0), 0);
    }

    #[test]
    fn test_lerp_channel() {
        assert_eq!(lerp_channel(0, 255, 0.0), 0);
        assert_eq!(lerp_channel(0, 255, 1.0), 255);
        assert_eq!(lerp_channel(0, 200, 0.5), 100);
        assert_eq!(lerp_channel(200, 0, 0.25), 150);
        assert_eq!(lerp_channel(77, 77, 0.63), 77);
        assert_eq!(lerp_channel(10, 20, 5.0), 20);
    }

    #[test]
    fn test_fps_counter_window() {
        let mut fps = FpsCounter::new(3);
        for dt in [0.010, 0.020, 0.020, 0.020] {
            fps.record(dt);
        }
        assert_eq!(fps.frame_times.len(), 3);
        assert!((fps.avg_frame_time_ms() - 20.0).abs() < 1e-3);
        let (min, max) = fps.min_max_fps();
        assert!((min - 50.0).abs() < 1e-2);
        assert!((max - 50.0).abs() < 1e-2);
    }

    #[test]
    fn test_fps_counter_empty() {
        let fps = FpsCounter::new(10);
        assert_eq!(fps.min_max_fps(), (0.0, 0.0));
        assert_eq!(fps.avg_frame_time_ms(), 0.0);
    }
}
