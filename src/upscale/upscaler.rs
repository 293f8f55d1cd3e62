//! Two-pass 2x super-resolution.
//!
//! The network only interpolates half a pixel down-right of a source pixel,
//! so doubling runs in two inference passes over one output buffer: first
//! diagonally between four known pixels, then axially between two. The
//! axial pass samples the partially completed output, so it must not start
//! until the diagonal pass has written every pixel; the stage boundary here
//! is the function sequence in [`upscale`], not ad hoc synchronization.

use crate::error::Result;
use crate::network::network::Network;
use crate::raster::buffer::PixelBuffer;
use crate::stencil;

/// Doubles `source` to `(2W-1) x (2H-1)` with the same channel count,
/// using the trained network read-only.
pub fn upscale(network: &Network, source: &PixelBuffer) -> Result<PixelBuffer> {
    let out_w = 2 * source.width() - 1;
    let out_h = 2 * source.height() - 1;
    let mut output = PixelBuffer::new(out_w, out_h, source.channels())?;

    fill_direct(&mut output, source);
    fill_diagonal(&mut output, source, network);
    // Barrier: every diagonal pixel is committed before the axial pass reads.
    fill_axial(&mut output, network);

    Ok(output)
}

/// Copies source pixels onto the even/even output grid. No inference.
fn fill_direct(output: &mut PixelBuffer, source: &PixelBuffer) {
    for y in (0..output.height()).step_by(2) {
        for x in (0..output.width()).step_by(2) {
            for c in 0..output.channels() {
                let value = source.pixel((x / 2) as i32, (y / 2) as i32, c as i32);
                output.put(x, y, c, value);
            }
        }
    }
}

/// Pass 1: fills odd/odd output pixels from the low-resolution source.
fn fill_diagonal(output: &mut PixelBuffer, source: &PixelBuffer, network: &Network) {
    let taps = stencil::diagonal_taps();
    for y in (1..output.height()).step_by(2) {
        for x in (1..output.width()).step_by(2) {
            for c in 0..output.channels() {
                let patch =
                    stencil::sample_patch(source, (x / 2) as i32, (y / 2) as i32, c as i32, &taps);
                output.put(x, y, c, infer_sample(network, patch));
            }
        }
    }
}

/// Pass 2: fills pixels with exactly one odd coordinate by sampling the
/// partially completed output. Every tap lands on a direct or diagonal
/// pixel, so no axial pixel reads another axial pixel.
fn fill_axial(output: &mut PixelBuffer, network: &Network) {
    let taps = stencil::axial_taps();
    for y in 0..output.height() {
        for x in 0..output.width() {
            if x % 2 == y % 2 {
                continue;
            }
            for c in 0..output.channels() {
                let patch = stencil::sample_patch(output, x as i32, y as i32, c as i32, &taps);
                output.put(x, y, c, infer_sample(network, patch));
            }
        }
    }
}

/// Normalize, infer, denormalize: the same local-contrast rule training
/// used, skipped entirely when the neighborhood average is zero.
fn infer_sample(network: &Network, mut patch: [f64; stencil::PATCH_LEN]) -> f64 {
    let avg = stencil::center_average(&patch);
    if avg != 0.0 {
        stencil::normalize_patch(&mut patch, avg);
    }

    let output = network.infer(&patch)[0];

    if avg != 0.0 {
        stencil::denormalize_value(output, avg)
    } else {
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn gradient_source() -> PixelBuffer {
        let mut buf = PixelBuffer::new(8, 8, 1).unwrap();
        for y in 0..8 {
            for x in 0..8 {
                buf.put(x, y, 0, (x as f64 * 7.0 + y as f64 * 23.0) / 255.0);
            }
        }
        buf
    }

    #[test]
    fn output_shape_doubles_minus_one() {
        let network = Network::interpolator(&mut StdRng::seed_from_u64(1));
        let source = gradient_source();
        let out = upscale(&network, &source).unwrap();
        assert_eq!(out.width(), 15);
        assert_eq!(out.height(), 15);
        assert_eq!(out.channels(), 1);
    }

    #[test]
    fn direct_pixels_copy_the_source_exactly() {
        let network = Network::interpolator(&mut StdRng::seed_from_u64(2));
        let source = gradient_source();
        let out = upscale(&network, &source).unwrap();
        for y in (0..out.height()).step_by(2) {
            for x in (0..out.width()).step_by(2) {
                assert_eq!(
                    out.pixel(x as i32, y as i32, 0),
                    source.pixel((x / 2) as i32, (y / 2) as i32, 0)
                );
            }
        }
    }

    #[test]
    fn diagonal_pass_reads_only_the_source() {
        let network = Network::interpolator(&mut StdRng::seed_from_u64(3));
        let source = gradient_source();

        let full = upscale(&network, &source).unwrap();

        // Diagonal fill on a buffer with no direct pixels produces the same
        // diagonal values: pass 1 never looks at the output buffer.
        let mut bare = PixelBuffer::new(15, 15, 1).unwrap();
        fill_diagonal(&mut bare, &source, &network);

        for y in (1..15).step_by(2) {
            for x in (1..15).step_by(2) {
                assert_eq!(bare.pixel(x, y, 0), full.pixel(x, y, 0));
            }
        }
    }

    #[test]
    fn axial_pass_reads_the_diagonal_output() {
        let network = Network::interpolator(&mut StdRng::seed_from_u64(4));
        let source = gradient_source();

        let full = upscale(&network, &source).unwrap();

        // Skip pass 1 and the axial results must change: pass 2 is reading
        // values pass 1 wrote, not source defaults.
        let mut skipped = PixelBuffer::new(15, 15, 1).unwrap();
        fill_direct(&mut skipped, &source);
        fill_axial(&mut skipped, &network);

        let mut differs = false;
        for y in 0..15i32 {
            for x in 0..15i32 {
                if x % 2 != y % 2 && skipped.pixel(x, y, 0) != full.pixel(x, y, 0) {
                    differs = true;
                }
            }
        }
        assert!(differs, "axial output ignored the diagonal pass");
    }
}
