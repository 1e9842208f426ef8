//! The fixed catalog of battle backgrounds

use std::sync::OnceLock;

use super::{
    BackgroundLayer, BackgroundPreset, DistortionEffect, DistortionKind, PatternLayer, Vec2,
};

use super::DistortionKind::{Horizontal, HorizontalInterlaced, Vertical};

/// Distortion parameters in catalog order:
/// amplitude, amplitude accel, frequency, frequency accel, compression, compression accel, speed
type Wobble = (f32, f32, f32, f32, f32, f32, f32);

fn layer(
    pattern_index: i32,
    palette_index: i32,
    kind: DistortionKind,
    wobble: Wobble,
    scroll: (f32, f32),
) -> BackgroundLayer {
    let (
        amplitude,
        amplitude_acceleration,
        frequency,
        frequency_acceleration,
        compression,
        compression_acceleration,
        speed,
    ) = wobble;
    BackgroundLayer {
        pattern: PatternLayer::new(pattern_index, palette_index),
        distortion: Some(DistortionEffect {
            kind,
            amplitude,
            amplitude_acceleration,
            frequency,
            frequency_acceleration,
            compression,
            compression_acceleration,
            speed,
        }),
        scroll_speed: Vec2::new(scroll.0, scroll.1),
    }
}

fn preset(name: &str, layer1: BackgroundLayer, layer2: BackgroundLayer) -> BackgroundPreset {
    BackgroundPreset {
        name: name.to_string(),
        layer1,
        layer2,
    }
}

fn build_catalog() -> Vec<BackgroundPreset> {
    vec![
        preset(
            "Giygas Phase 1",
            // Spiral / fire
            layer(142, 0, Horizontal, (10.0, 0.0, 0.02, 0.0, 0.0, 0.0, 0.7), (0.15, 0.0)),
            // Wave / lava
            layer(82, 10, HorizontalInterlaced, (10.0, 0.01, 0.03, 0.0, 0.0, 0.0, -0.5), (-0.1, 0.05)),
        ),
        preset(
            "Kraken",
            layer(61, 7, Vertical, (18.0, 0.0, 0.015, 0.0, 0.1, 0.0, 0.3), (0.0, 0.15)),
            layer(85, 1, Horizontal, (8.0, 0.0, 0.04, 0.0, 0.0, 0.0, 0.8), (0.06, -0.03)),
        ),
        preset(
            "New Age Retro Hippie",
            layer(145, 2, HorizontalInterlaced, (26.0, 0.02, 0.025, 0.001, 0.0, 0.0, 1.0), (0.3, 0.15)),
            layer(305, 14, Horizontal, (14.0, -0.01, 0.035, 0.0, 0.0, 0.0, -0.7), (-0.2, -0.1)),
        ),
        preset(
            "Carbon Dog",
            layer(122, 5, Vertical, (10.0, 0.0, 0.02, 0.0, 0.15, 0.001, 1.5), (0.3, 0.3)),
            layer(182, 11, Horizontal, (8.0, 0.0, 0.045, 0.0, 0.0, 0.0, 0.7), (-0.06, 0.12)),
        ),
        preset(
            "Abstract Art",
            layer(285, 4, HorizontalInterlaced, (8.0, 0.03, 0.018, 0.002, 0.0, 0.0, 0.8), (0.6, -0.2)),
            layer(262, 9, Vertical, (12.0, -0.02, 0.03, 0.0, 0.2, -0.001, -0.6), (-0.4, 0.6)),
        ),
        preset(
            "Sanctuary Guardian",
            layer(225, 11, Horizontal, (16.0, 0.0, 0.022, 0.0, 0.0, 0.0, 1.2), (0.1, 0.1)),
            layer(65, 6, HorizontalInterlaced, (22.0, 0.01, 0.028, 0.001, 0.0, 0.0, -0.7), (-0.5, 0.3)),
        ),
        preset(
            "Belch",
            layer(165, 12, Vertical, (14.0, 0.02, 0.016, 0.0, 0.25, 0.002, 0.8), (0.2, 0.7)),
            layer(102, 3, Horizontal, (10.0, -0.01, 0.038, 0.0, 0.0, 0.0, 0.5), (-0.1, -0.12)),
        ),
        preset(
            "Electro Specter",
            layer(42, 4, HorizontalInterlaced, (18.0, 0.0, 0.032, 0.002, 0.0, 0.0, 1.1), (0.24, 0.0)),
            layer(245, 1, Horizontal, (12.0, 0.01, 0.026, 0.0, 0.0, 0.0, -0.9), (-0.18, 0.06)),
        ),
        preset(
            "Starman",
            layer(222, 11, Vertical, (16.0, 0.0, 0.024, 0.0, 0.18, 0.0, 0.6), (0.4, 0.4)),
            layer(205, 9, HorizontalInterlaced, (20.0, 0.02, 0.02, 0.001, 0.0, 0.0, -0.8), (-0.5, -0.3)),
        ),
        preset(
            "Plague Rat",
            layer(185, 3, Horizontal, (12.0, 0.0, 0.036, 0.0, 0.0, 0.0, 0.7), (0.3, 0.1)),
            layer(168, 5, Vertical, (8.0, -0.01, 0.042, 0.0, 0.12, 0.001, -0.5), (-0.2, 0.5)),
        ),
        preset(
            "Mondo Mole",
            layer(125, 3, HorizontalInterlaced, (18.0, 0.01, 0.019, 0.0, 0.0, 0.0, 0.5), (0.15, 0.1)),
            layer(265, 10, Horizontal, (14.0, 0.0, 0.029, 0.001, 0.0, 0.0, -0.7), (-0.4, -0.2)),
        ),
        preset(
            "Trillionage Sprout",
            layer(308, 8, Vertical, (14.0, 0.02, 0.021, 0.0, 0.22, 0.0, 1.0), (0.2, 0.6)),
            layer(88, 12, Horizontal, (10.0, -0.01, 0.034, 0.0, 0.0, 0.0, 0.8), (-0.3, -0.4)),
        ),
        preset(
            "Diamond Dog",
            layer(128, 13, HorizontalInterlaced, (8.0, 0.03, 0.023, 0.002, 0.0, 0.0, 0.9), (0.21, 0.03)),
            // Radial gradient
            layer(324, 6, Vertical, (16.0, 0.0, 0.027, 0.0, 0.16, -0.001, -0.6), (-0.5, 0.4)),
        ),
        preset(
            "Giygas Final",
            layer(290, 0, Horizontal, (10.0, 0.04, 0.015, 0.003, 0.0, 0.0, 1.2), (1.0, 0.5)),
            layer(148, 10, HorizontalInterlaced, (26.0, -0.03, 0.025, -0.002, 0.0, 0.0, -1.0), (-0.24, -0.18)),
        ),
        preset(
            "Thunder and Storm",
            layer(45, 1, Vertical, (18.0, 0.0, 0.018, 0.0, 0.3, 0.003, 0.7), (0.18, 0.06)),
            layer(242, 11, Horizontal, (14.0, 0.02, 0.031, 0.001, 0.0, 0.0, -0.8), (-0.21, 0.09)),
        ),
    ]
}

/// Every preset, in menu order. Built once and never mutated.
pub fn all_presets() -> &'static [BackgroundPreset] {
    static CATALOG: OnceLock<Vec<BackgroundPreset>> = OnceLock::new();
    CATALOG.get_or_init(build_catalog)
}

#[inline]
pub fn preset_count() -> usize {
    all_presets().len()
}

/// Preset at `index`, wrapping modulo the catalog length
pub fn get_preset(index: usize) -> &'static BackgroundPreset {
    let presets = all_presets();
    &presets[index % presets.len()]
}
