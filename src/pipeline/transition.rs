//! Preset cycling and crossfades
//!
//! Two states: showing one preset, or crossfading from one preset to the
//! next. Auto-cycle mode starts a crossfade every interval; pinning a preset
//! cuts to it immediately.

use super::blend::crossfade_alpha;

/// Length of a preset crossfade in seconds
pub const CROSSFADE_DURATION: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionState {
    Steady { current: usize },
    Transitioning { current: usize, next: usize, elapsed: f32 },
}

/// What changed during an update, for logging and surface bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEvent {
    /// A crossfade began
    Started { from: usize, to: usize },
    /// A crossfade finished; `current` is now the only active preset
    Completed { current: usize },
    /// Hard cut to a pinned preset
    Switched { from: usize, to: usize },
}

#[derive(Debug, Clone)]
pub struct TransitionController {
    state: TransitionState,
    cycle_elapsed: f32,
    preset_count: usize,
}

impl TransitionController {
    pub fn new(initial: usize, preset_count: usize) -> Self {
        let preset_count = preset_count.max(1);
        Self {
            state: TransitionState::Steady {
                current: initial % preset_count,
            },
            cycle_elapsed: 0.0,
            preset_count,
        }
    }

    pub fn state(&self) -> TransitionState {
        self.state
    }

    pub fn current(&self) -> usize {
        match self.state {
            TransitionState::Steady { current } | TransitionState::Transitioning { current, .. } => {
                current
            },
        }
    }

    pub fn next(&self) -> Option<usize> {
        match self.state {
            TransitionState::Steady { .. } => None,
            TransitionState::Transitioning { next, .. } => Some(next),
        }
    }

    /// Weight of the incoming preset; 0 when not transitioning
    pub fn crossfade_alpha(&self) -> f32 {
        match self.state {
            TransitionState::Steady { .. } => 0.0,
            TransitionState::Transitioning { elapsed, .. } => {
                crossfade_alpha(elapsed, CROSSFADE_DURATION)
            },
        }
    }

    /// Start a crossfade to `next` from whatever is current.
    /// A crossfade already in flight is restarted towards the new target.
    pub fn begin_transition(&mut self, next: usize) -> TransitionEvent {
        let current = self.current();
        let next = next % self.preset_count;
        self.state = TransitionState::Transitioning {
            current,
            next,
            elapsed: 0.0,
        };
        TransitionEvent::Started {
            from: current,
            to: next,
        }
    }

    /// Advance by `dt` seconds.
    ///
    /// `pinned` names a preset that must be shown; a pinned preset different
    /// from the current one is cut to immediately and resets the cycle timer.
    /// Otherwise the controller cycles to the next preset every `interval`.
    pub fn update(&mut self, dt: f32, pinned: Option<usize>, interval: f32) -> Option<TransitionEvent> {
        let dt = dt.max(0.0);

        if let Some(pinned) = pinned {
            let pinned = pinned % self.preset_count;
            let from = self.current();
            let settled = matches!(self.state, TransitionState::Steady { current } if current == pinned);
            if settled {
                return None;
            }
            self.state = TransitionState::Steady { current: pinned };
            self.cycle_elapsed = 0.0;
            return Some(TransitionEvent::Switched { from, to: pinned });
        }

        self.cycle_elapsed += dt;

        match self.state {
            TransitionState::Transitioning {
                current,
                next,
                elapsed,
            } => {
                let elapsed = elapsed + dt;
                if elapsed >= CROSSFADE_DURATION {
                    self.state = TransitionState::Steady { current: next };
                    Some(TransitionEvent::Completed { current: next })
                } else {
                    self.state = TransitionState::Transitioning {
                        current,
                        next,
                        elapsed,
                    };
                    None
                }
            },
            TransitionState::Steady { current } => {
                if self.cycle_elapsed >= interval {
                    self.cycle_elapsed = 0.0;
                    Some(self.begin_transition((current + 1) % self.preset_count))
                } else {
                    None
                }
            },
        }
    }
}
