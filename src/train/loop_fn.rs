use std::time::Instant;

use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::raster::buffer::PixelBuffer;
use crate::stencil;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::train_step;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` as a local interpolator of `reference` for
/// `config.epochs` epochs and returns the mean training loss of the
/// **last completed epoch**.
///
/// Each epoch scans every pixel in scanline order and, per channel, trains
/// on one sample: the 32-tap stencil patch around the pixel as input, the
/// pixel itself as target (the stencil excludes the center, so this is a
/// pure neighborhood-interpolation target). Inputs and target are
/// normalized by the mean of the four innermost taps unless that mean is
/// zero, which skips normalization for the sample. Layer 0 is
/// re-symmetrized after every single update.
///
/// The learning rate starts at `config.initial_rate` and halves after each
/// epoch. There is no stopping criterion besides the epoch count.
///
/// # Early termination
/// The loop breaks early if the `progress_tx` receiver has been dropped.
///
/// # Panics
/// Panics if the network's input width is not the stencil's 32 taps.
pub fn train_on_image(
    network: &mut Network,
    reference: &PixelBuffer,
    config: &TrainConfig,
) -> f64 {
    assert_eq!(
        network.layers[0].weights.rows,
        stencil::PATCH_LEN,
        "network input width must match the stencil"
    );

    let mut optimizer = Sgd::new(config.initial_rate);
    let mut last_train_loss = 0.0;

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();

        // ── One full pass over the reference image ─────────────────────────
        let train_loss = run_one_epoch(network, reference, &optimizer);
        last_train_loss = train_loss;

        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        // ── Emit progress ─────────────────────────────────────────────────
        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss,
            learning_rate: optimizer.learning_rate,
            elapsed_ms,
        };

        if let Some(ref tx) = config.progress_tx {
            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() {
                break;
            }
        }

        optimizer.halve();
    }

    last_train_loss
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Runs one full scan of the reference image with online updates.
/// Returns the mean loss over all (pixel, channel) samples.
fn run_one_epoch(network: &mut Network, reference: &PixelBuffer, optimizer: &Sgd) -> f64 {
    let w = reference.width() as i32;
    let h = reference.height() as i32;
    let channels = reference.channels() as i32;

    let mut total_loss = 0.0;
    let mut samples = 0usize;

    for y in 0..h {
        for x in 0..w {
            for c in 0..channels {
                let mut input = stencil::sample_patch(reference, x, y, c, &stencil::STENCIL);
                let mut target = reference.pixel(x, y, c);

                let avg = stencil::center_average(&input);
                if avg != 0.0 {
                    stencil::normalize_patch(&mut input, avg);
                    target = stencil::normalize_value(target, avg);
                }

                total_loss += train_step(network, &input, &[target], optimizer);
                network.symmetrize_input_layer();
                samples += 1;
            }
        }
    }

    total_loss / samples as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn flat_image(value: u8) -> PixelBuffer {
        PixelBuffer::from_raw(8, 8, 1, vec![value; 64])
    }

    #[test]
    fn reports_one_stats_entry_per_epoch() {
        let mut network = Network::interpolator(&mut StdRng::seed_from_u64(7));
        let (tx, rx) = mpsc::channel();
        let config = TrainConfig {
            epochs: 3,
            initial_rate: 0.5,
            progress_tx: Some(tx),
        };

        train_on_image(&mut network, &flat_image(128), &config);
        drop(config);

        let stats: Vec<EpochStats> = rx.iter().collect();
        assert_eq!(stats.len(), 3);
        assert_eq!(stats[0].epoch, 1);
        assert_eq!(stats[0].learning_rate, 0.5);
        assert_eq!(stats[1].learning_rate, 0.25);
        assert_eq!(stats[2].learning_rate, 0.125);
    }

    #[test]
    fn dropped_receiver_ends_training_early() {
        let mut network = Network::interpolator(&mut StdRng::seed_from_u64(7));
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let config = TrainConfig {
            epochs: 1000,
            initial_rate: 0.5,
            progress_tx: Some(tx),
        };

        // Returns after the first epoch instead of grinding out 1000.
        train_on_image(&mut network, &flat_image(64), &config);
    }

    #[test]
    fn weights_stay_symmetrized_throughout_training() {
        let mut network = Network::interpolator(&mut StdRng::seed_from_u64(13));
        let config = TrainConfig::new(2, 0.5);

        train_on_image(&mut network, &flat_image(200), &config);

        let orbits = stencil::orbit_ids();
        let weights = &network.layers[0].weights;
        for j in 0..weights.cols {
            for i in 0..32 {
                for k in 0..32 {
                    if orbits[i] == orbits[k] {
                        assert_eq!(weights.data[i][j], weights.data[k][j]);
                    }
                }
            }
        }
    }
}
