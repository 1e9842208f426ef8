//! Runtime configuration
//!
//! Everything the renderer reads per frame comes from here and is passed in
//! explicitly. Stored as JSON; missing fields take their defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::pipeline::CrtParams;

pub const DEFAULT_CONFIG_PATH: &str = "battlebg.json";

/// Scroll offsets are folded back modulo 256 once they pass this magnitude
pub const DEFAULT_SCROLL_WRAP_THRESHOLD: f32 = 10_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// 0 cycles through every preset; N pins preset N-1
    pub selected_preset_index: usize,
    /// Seconds between automatic preset changes (10-120)
    pub transition_interval_seconds: f32,
    pub show_preset_name_overlay: bool,
    /// Scales the clock fed to distortion and layer blending (0.1-2.0)
    pub animation_speed_multiplier: f32,
    /// Scales distortion amplitude and amplitude acceleration (0.5-3.0)
    pub distortion_intensity_multiplier: f32,
    pub crt_enabled: bool,
    pub scanline_intensity: f32,
    pub pixel_size: f32,
    pub curvature: f32,
    pub vignette_strength: f32,
    /// Refresh rate the scroll speeds are expressed against
    pub nominal_fps: f32,
    pub scroll_wrap_threshold: f32,
}

impl Config {
    /// 60 FPS nominal refresh, 30 second preset cycle
    pub fn smooth() -> Self {
        Self {
            selected_preset_index: 0,
            transition_interval_seconds: 30.0,
            show_preset_name_overlay: false,
            animation_speed_multiplier: 1.0,
            distortion_intensity_multiplier: 1.0,
            crt_enabled: true,
            scanline_intensity: 0.25,
            pixel_size: 3.0,
            curvature: 0.015,
            vignette_strength: 0.2,
            nominal_fps: 60.0,
            scroll_wrap_threshold: DEFAULT_SCROLL_WRAP_THRESHOLD,
        }
    }

    /// 30 FPS nominal refresh matching SNES timing, 75 second preset cycle
    pub fn authentic() -> Self {
        Self {
            transition_interval_seconds: 75.0,
            nominal_fps: 30.0,
            ..Self::smooth()
        }
    }

    /// Copy with every numeric option clamped to its supported range
    pub fn sanitized(&self) -> Self {
        Self {
            transition_interval_seconds: clamp_or(self.transition_interval_seconds, 10.0, 120.0, 30.0),
            animation_speed_multiplier: clamp_or(self.animation_speed_multiplier, 0.1, 2.0, 1.0),
            distortion_intensity_multiplier: clamp_or(
                self.distortion_intensity_multiplier,
                0.5,
                3.0,
                1.0,
            ),
            scanline_intensity: clamp_or(self.scanline_intensity, 0.0, 0.5, 0.25),
            pixel_size: clamp_or(self.pixel_size, 1.0, 6.0, 3.0),
            curvature: clamp_or(self.curvature, 0.0, 0.05, 0.015),
            vignette_strength: clamp_or(self.vignette_strength, 0.0, 0.5, 0.2),
            nominal_fps: clamp_or(self.nominal_fps, 1.0, 240.0, 60.0),
            scroll_wrap_threshold: clamp_or(
                self.scroll_wrap_threshold,
                1_000.0,
                10_000.0,
                DEFAULT_SCROLL_WRAP_THRESHOLD,
            ),
            ..self.clone()
        }
    }

    /// Pinned preset index, or None in auto-cycle mode
    pub fn pinned_preset(&self) -> Option<usize> {
        self.selected_preset_index.checked_sub(1)
    }

    /// CRT parameters for the post stage. Disabled CRT still runs the stage,
    /// just with neutral values, so the output size never changes.
    pub fn crt_params(&self) -> CrtParams {
        if !self.crt_enabled {
            return CrtParams::NEUTRAL;
        }
        CrtParams {
            scanline_intensity: self.scanline_intensity.clamp(0.0, 0.5),
            pixel_size: self.pixel_size.clamp(1.0, 6.0).round() as u32,
            curvature: self.curvature.clamp(0.0, 0.05),
            vignette_strength: self.vignette_strength.clamp(0.0, 0.5),
        }
    }

    /// Save config to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&json)?;
        Ok(config.sanitized())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::smooth()
    }
}

/// Clamp into [min, max]; NaN falls back to `fallback`
fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles() {
        let smooth = Config::smooth();
        assert_eq!(smooth.nominal_fps, 60.0);
        assert_eq!(smooth.transition_interval_seconds, 30.0);

        let authentic = Config::authentic();
        assert_eq!(authentic.nominal_fps, 30.0);
        assert_eq!(authentic.transition_interval_seconds, 75.0);
        assert_eq!(authentic.scanline_intensity, smooth.scanline_intensity);

        assert_eq!(Config::default(), smooth);
    }

    #[test]
    fn test_sanitized_clamps_ranges() {
        let wild = Config {
            transition_interval_seconds: 1.0,
            animation_speed_multiplier: 50.0,
            distortion_intensity_multiplier: f32::NAN,
            scanline_intensity: 2.0,
            pixel_size: 0.0,
            curvature: -1.0,
            vignette_strength: 9.0,
            scroll_wrap_threshold: 5.0,
            ..Config::default()
        };
        let clean = wild.sanitized();
        assert_eq!(clean.transition_interval_seconds, 10.0);
        assert_eq!(clean.animation_speed_multiplier, 2.0);
        assert_eq!(clean.distortion_intensity_multiplier, 1.0);
        assert_eq!(clean.scanline_intensity, 0.5);
        assert_eq!(clean.pixel_size, 1.0);
        assert_eq!(clean.curvature, 0.0);
        assert_eq!(clean.vignette_strength, 0.5);
        assert_eq!(clean.scroll_wrap_threshold, 1_000.0);
    }

    #[test]
    fn test_disabled_crt_is_neutral() {
        let config = Config {
            crt_enabled: false,
            ..Config::default()
        };
        assert_eq!(config.crt_params(), CrtParams::NEUTRAL);

        let enabled = Config::default().crt_params();
        assert_eq!(enabled.pixel_size, 3);
        assert_eq!(enabled.scanline_intensity, 0.25);
    }

    #[test]
    fn test_pinned_preset() {
        let mut config = Config::default();
        assert_eq!(config.pinned_preset(), None);
        config.selected_preset_index = 1;
        assert_eq!(config.pinned_preset(), Some(0));
        config.selected_preset_index = 15;
        assert_eq!(config.pinned_preset(), Some(14));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "selectedPresetIndex": 3, "crtEnabled": false }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.selected_preset_index, 3);
        assert!(!config.crt_enabled);
        assert_eq!(config.transition_interval_seconds, 30.0);
        assert_eq!(config.vignette_strength, 0.2);
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("battlebg-test-{}.json", std::process::id()));
        let config = Config {
            selected_preset_index: 7,
            curvature: 0.03,
            ..Config::authentic()
        };
        config.save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        assert!(Config::load("/nonexistent/battlebg.json").is_err());
    }
}
