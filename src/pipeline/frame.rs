//! Per-frame orchestration
//!
//! Each frame runs pattern → distort → blend for the active preset (and for
//! the incoming one during a crossfade), cross-blends the two composites,
//! then hands the result to the CRT stage at output resolution.
//!
//! All buffers live as long as the pipeline. Base pattern images are cached
//! per preset; only the output buffer is reallocated, and only on resize.

use log::debug;

use super::blend::{blend, layer_alpha};
use super::crt::apply_crt;
use super::distortion::Distorter;
use super::transition::{TransitionController, TransitionEvent};
use crate::background::{get_preset, preset_count, render_layer, Vec2};
use crate::config::Config;
use crate::display::{PixelBuffer, NATIVE_HEIGHT, NATIVE_WIDTH};

/// Offsets are folded modulo one pattern tile
const SCROLL_PERIOD: f32 = 256.0;

/// Mutable animation state advanced once per vblank
#[derive(Debug, Clone)]
pub struct RenderState {
    pub transition: TransitionController,
    pub layer1_scroll: Vec2,
    pub layer2_scroll: Vec2,
    /// Wall-clock seconds since the pipeline started
    pub clock_time: f32,
}

impl RenderState {
    pub fn new(initial_preset: usize) -> Self {
        Self {
            transition: TransitionController::new(initial_preset, preset_count()),
            layer1_scroll: Vec2::ZERO,
            layer2_scroll: Vec2::ZERO,
            clock_time: 0.0,
        }
    }

    /// `offset += speed * delta_time * nominal_fps` for both layers,
    /// then fold any axis whose magnitude passed `wrap_threshold`
    pub fn accumulate_scroll(
        &mut self,
        speed1: Vec2,
        speed2: Vec2,
        delta_time: f32,
        nominal_fps: f32,
        wrap_threshold: f32,
    ) {
        let frames = delta_time * nominal_fps;
        self.layer1_scroll = wrap_offset(advance(self.layer1_scroll, speed1, frames), wrap_threshold);
        self.layer2_scroll = wrap_offset(advance(self.layer2_scroll, speed2, frames), wrap_threshold);
    }
}

#[inline]
fn advance(offset: Vec2, speed: Vec2, frames: f32) -> Vec2 {
    Vec2::new(offset.x + speed.x * frames, offset.y + speed.y * frames)
}

/// Truncating remainder keeps the sign, which keeps sampling continuous
#[inline]
fn wrap_axis(value: f32, threshold: f32) -> f32 {
    if value.abs() > threshold {
        value % SCROLL_PERIOD
    } else {
        value
    }
}

#[inline]
fn wrap_offset(offset: Vec2, threshold: f32) -> Vec2 {
    Vec2::new(wrap_axis(offset.x, threshold), wrap_axis(offset.y, threshold))
}

/// Intermediate images for one preset at native resolution
struct PresetSurfaces {
    preset: Option<usize>,
    base1: PixelBuffer,
    base2: PixelBuffer,
    distorted1: PixelBuffer,
    distorted2: PixelBuffer,
    composite: PixelBuffer,
    distorter: Distorter,
}

impl PresetSurfaces {
    fn with_size(width: u32, height: u32) -> Self {
        Self {
            preset: None,
            base1: PixelBuffer::with_size(width, height),
            base2: PixelBuffer::with_size(width, height),
            distorted1: PixelBuffer::with_size(width, height),
            distorted2: PixelBuffer::with_size(width, height),
            composite: PixelBuffer::with_size(width, height),
            distorter: Distorter::new(),
        }
    }

    /// Regenerate the base pattern images unless they already show `index`
    fn prepare(&mut self, index: usize) {
        if self.preset == Some(index) {
            return;
        }
        let preset = get_preset(index);
        render_layer(&preset.layer1.pattern, &mut self.base1);
        render_layer(&preset.layer2.pattern, &mut self.base2);
        self.preset = Some(index);
    }

    fn render(&mut self, time: f32, scroll1: Vec2, scroll2: Vec2, intensity: f32) {
        let Some(index) = self.preset else {
            return;
        };
        let preset = get_preset(index);
        self.distorter.distort(
            &self.base1,
            preset.layer1.distortion.as_ref(),
            time,
            scroll1,
            intensity,
            &mut self.distorted1,
        );
        self.distorter.distort(
            &self.base2,
            preset.layer2.distortion.as_ref(),
            time,
            scroll2,
            intensity,
            &mut self.distorted2,
        );
        blend(&self.distorted1, &self.distorted2, layer_alpha(time), &mut self.composite);
    }
}

pub struct FramePipeline {
    state: RenderState,
    current: PresetSurfaces,
    incoming: PresetSurfaces,
    crossfade: PixelBuffer,
    output: PixelBuffer,
}

impl FramePipeline {
    /// Pipeline rendering at the SNES native resolution
    pub fn new(initial_preset: usize, output_width: u32, output_height: u32) -> Self {
        Self::with_native_size(
            initial_preset,
            NATIVE_WIDTH,
            NATIVE_HEIGHT,
            output_width,
            output_height,
        )
    }

    pub fn with_native_size(
        initial_preset: usize,
        native_width: u32,
        native_height: u32,
        output_width: u32,
        output_height: u32,
    ) -> Self {
        let state = RenderState::new(initial_preset);
        let mut current = PresetSurfaces::with_size(native_width, native_height);
        current.prepare(state.transition.current());
        Self {
            state,
            current,
            incoming: PresetSurfaces::with_size(native_width, native_height),
            crossfade: PixelBuffer::with_size(native_width, native_height),
            output: PixelBuffer::with_size(output_width, output_height),
        }
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn current_preset(&self) -> usize {
        self.state.transition.current()
    }

    /// Preset whose scroll speeds drive the shared offsets this frame
    fn scroll_driver(&self) -> usize {
        let transition = &self.state.transition;
        match transition.next() {
            Some(next) if transition.crossfade_alpha() >= 0.5 => next,
            _ => transition.current(),
        }
    }

    /// Reallocate the output buffer for a new window size
    pub fn resize_output(&mut self, width: u32, height: u32) -> bool {
        let resized = self.output.resize(width.max(1), height.max(1));
        if resized {
            debug!("Output buffer reallocated at {}x{}", width, height);
        }
        resized
    }

    /// Advance the clock, the transition controller and the scroll offsets
    /// by one vblank of `dt` wall-clock seconds
    pub fn update(&mut self, dt: f32, config: &Config) -> Option<TransitionEvent> {
        let dt = dt.max(0.0);
        self.state.clock_time += dt;

        let event = self.state.transition.update(
            dt,
            config.pinned_preset(),
            config.transition_interval_seconds,
        );

        match event {
            Some(TransitionEvent::Started { from, to }) => {
                debug!("Crossfade started: {} -> {}", get_preset(from).name, get_preset(to).name);
                self.incoming.prepare(to);
            },
            Some(TransitionEvent::Completed { current }) => {
                std::mem::swap(&mut self.current, &mut self.incoming);
                self.current.prepare(current);
                debug!("Crossfade completed: {}", get_preset(current).name);
            },
            Some(TransitionEvent::Switched { to, .. }) => {
                self.current.prepare(to);
            },
            None => {},
        }

        // Scroll advances per vblank at the nominal refresh, not by measured time.
        // Mid-crossfade the shared offsets follow whichever preset dominates.
        let nominal_fps = config.nominal_fps.max(1.0);
        let preset = get_preset(self.scroll_driver());
        self.state.accumulate_scroll(
            preset.layer1.scroll_speed,
            preset.layer2.scroll_speed,
            1.0 / nominal_fps,
            nominal_fps,
            config.scroll_wrap_threshold,
        );

        event
    }

    /// Produce the frame for the current state at output resolution
    pub fn render(&mut self, config: &Config) -> &PixelBuffer {
        let time = self.state.clock_time * config.animation_speed_multiplier;
        let intensity = config.distortion_intensity_multiplier;
        let scroll1 = self.state.layer1_scroll;
        let scroll2 = self.state.layer2_scroll;

        self.current.render(time, scroll1, scroll2, intensity);

        let source = match self.state.transition.next() {
            Some(next) => {
                self.incoming.prepare(next);
                self.incoming.render(time, scroll1, scroll2, intensity);
                blend(
                    &self.current.composite,
                    &self.incoming.composite,
                    self.state.transition.crossfade_alpha(),
                    &mut self.crossfade,
                );
                &self.crossfade
            },
            None => &self.current.composite,
        };

        apply_crt(source, &config.crt_params(), &mut self.output);
        &self.output
    }
}
