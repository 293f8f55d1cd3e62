use std::sync::mpsc;
use crate::train::epoch_stats::EpochStats;

/// Configuration for a `train_on_image` run.
///
/// # Fields
/// - `epochs`       — total number of full passes over the reference image
/// - `initial_rate` — learning rate for epoch 0; the rate halves after
///                    every completed epoch (0.5 is tuned for the always-on
///                    local-contrast normalization)
/// - `progress_tx`  — optional channel sender; one `EpochStats` is sent per
///                    completed epoch.  If the receiver is dropped the loop
///                    terminates early (clean shutdown).
pub struct TrainConfig {
    pub epochs: usize,
    pub initial_rate: f64,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
}

impl TrainConfig {
    /// Creates a `TrainConfig` with no progress channel.
    pub fn new(epochs: usize, initial_rate: f64) -> Self {
        TrainConfig {
            epochs,
            initial_rate,
            progress_tx: None,
        }
    }
}

impl Default for TrainConfig {
    /// The documented schedule: 32 epochs starting at rate 0.5.
    fn default() -> Self {
        TrainConfig::new(32, 0.5)
    }
}
