//! Patch gathering and local-contrast normalization, shared by the trainer
//! and both upscaling passes.

use crate::raster::buffer::PixelBuffer;
use crate::stencil::offsets::CENTER_TAPS;

/// Number of samples in a patch, one per stencil tap.
pub const PATCH_LEN: usize = 32;

/// Reads one sample per tap around `(x, y, c)` through the reflecting
/// sampler. `taps` is one of the fixed tables in [`crate::stencil::offsets`].
pub fn sample_patch(
    image: &PixelBuffer,
    x: i32,
    y: i32,
    c: i32,
    taps: &[(i32, i32); PATCH_LEN],
) -> [f64; PATCH_LEN] {
    let mut patch = [0.0; PATCH_LEN];
    for (value, &(dx, dy)) in patch.iter_mut().zip(taps.iter()) {
        *value = image.pixel(x + dx, y + dy, c);
    }
    patch
}

/// Mean of the four innermost taps: the local brightness scale.
///
/// A zero mean marks a degenerate neighborhood; callers skip normalization
/// for that sample rather than divide by zero.
pub fn center_average(patch: &[f64; PATCH_LEN]) -> f64 {
    CENTER_TAPS.iter().map(|&i| patch[i]).sum::<f64>() / CENTER_TAPS.len() as f64
}

/// Maps a sample with local brightness `avg` into a roughly [-0.5, 0.5]
/// band: divide by the average, re-center, halve. Callers must ensure
/// `avg != 0`.
pub fn normalize_value(value: f64, avg: f64) -> f64 {
    (value / avg - 1.0) / 2.0
}

/// Applies [`normalize_value`] to every sample of a patch.
pub fn normalize_patch(patch: &mut [f64; PATCH_LEN], avg: f64) {
    for value in patch.iter_mut() {
        *value = normalize_value(*value, avg);
    }
}

/// Inverse of [`normalize_value`]: undo the halving, the re-centering, and
/// the brightness division, in that order.
pub fn denormalize_value(value: f64, avg: f64) -> f64 {
    (value * 2.0 + 1.0) * avg
}
