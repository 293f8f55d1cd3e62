use crate::{
    math::matrix::Matrix,
    network::network::Network,
    loss::mse::MseLoss,
    optim::sgd::Sgd,
};

/// One online gradient-descent update on a single sample: forward pass,
/// MSE error, backpropagation, in-place weight update. Returns the sample's
/// loss before the update.
///
/// The caller re-symmetrizes layer 0 after every step; this function only
/// performs the raw update.
pub fn train_step(
    network: &mut Network,
    input: &[f64],
    expected: &[f64],
    optimizer: &Sgd,
) -> f64 {
    // Forward pass
    let output = network.forward(input.to_vec());

    let loss = MseLoss::loss(&output, expected);

    // Initial delta: ∂L/∂a_output (error in output activation space)
    let error = MseLoss::derivative(&output, expected);
    let mut delta = Matrix::from_data(vec![error]);

    // Backward pass
    for i in (0..network.layers.len()).rev() {
        let input_for_layer = if i == 0 {
            Matrix::from_data(vec![input.to_vec()])
        } else {
            network.layers[i - 1].neurons.clone()
        };

        // Borrow-checker ordering: compute gradients → compute next delta → apply step
        let (w_grad, b_grad) = network.layers[i].compute_gradients(delta.clone(), &input_for_layer);

        if i > 0 {
            // Propagate δ_i through weights to get ∂L/∂a_{i-1}
            delta = b_grad.clone() * network.layers[i].weights.transpose();
        }

        optimizer.step(&mut network.layers[i], w_grad, b_grad);
    }

    loss
}
