use serde::{Serialize, Deserialize};

/// Per-epoch training statistics emitted by `train_on_image`.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, the training
/// loop sends one `EpochStats` value at the end of every completed epoch.
/// Receivers (e.g. the CLI's printing thread) use this to drive progress
/// output; nothing in the pipeline depends on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Mean training loss over all (pixel, channel) samples in this epoch.
    pub train_loss: f64,
    /// Learning rate this epoch trained at.
    pub learning_rate: f64,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}
