//! Linear blend of two equally sized layers

use crate::display::PixelBuffer;
use crate::util::lerp_channel;

/// Opacity of layer 2 over layer 1 at animation time `time`.
/// Oscillates between 0.1 and 1.0 with a period of 4π seconds.
#[inline]
pub fn layer_alpha(time: f32) -> f32 {
    0.55 + 0.45 * (time * 0.5).sin()
}

/// Progress of a preset crossfade, clamped to [0, 1]
#[inline]
pub fn crossfade_alpha(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return 1.0;
    }
    (elapsed / duration).clamp(0.0, 1.0)
}

/// `output = a * (1 - alpha) + b * alpha`, per channel.
/// alpha 0 reproduces `a` exactly and alpha 1 reproduces `b` exactly.
pub fn blend(a: &PixelBuffer, b: &PixelBuffer, alpha: f32, output: &mut PixelBuffer) {
    debug_assert!(a.same_size(b), "blend inputs differ in size");
    output.resize(a.width(), a.height());

    let alpha = alpha.clamp(0.0, 1.0);
    if alpha == 0.0 {
        output.copy_from(a);
        return;
    }
    if alpha == 1.0 {
        output.copy_from(b);
        return;
    }

    let src_a = a.as_bytes();
    let src_b = b.as_bytes();
    let dst = output.as_bytes_mut();
    for ((d, &ca), &cb) in dst.iter_mut().zip(src_a).zip(src_b) {
        *d = lerp_channel(ca, cb, alpha);
    }
}
