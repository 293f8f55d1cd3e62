//! symscale: a self-training neural 2x image upscaler.
//!
//! A small fully-connected network (32 stencil inputs, four tanh hidden
//! layers of 8, one sigmoid output) learns local interpolation from a
//! reference image, with its input layer constrained to be invariant under
//! the square's 8 symmetries. The trained network then doubles a second
//! image in two inference passes: diagonal fill from the source, axial fill
//! from the partially completed output.

pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod error;
pub mod raster;
pub mod stencil;
pub mod upscale;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::network::Network;
pub use loss::mse::MseLoss;
pub use optim::sgd::Sgd;
pub use error::{Error, Result};
pub use raster::buffer::PixelBuffer;
pub use train::{train_on_image, train_step, EpochStats, TrainConfig};
pub use upscale::upscaler::upscale;
