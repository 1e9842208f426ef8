//! Per-frame image stages and the orchestration that chains them

mod blend;
mod crt;
mod distortion;
mod frame;
mod transition;

pub use blend::{blend, crossfade_alpha, layer_alpha};
pub use crt::{apply_crt, CrtParams};
pub use distortion::{distort, Distorter, Wobble};
pub use frame::{FramePipeline, RenderState};
pub use transition::{TransitionController, TransitionEvent, TransitionState, CROSSFADE_DURATION};
