use std::io::Write;

use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::{
    activation::activation::ActivationFunction,
    layers::dense::Layer,
    stencil,
};

/// Width of each hidden layer in the interpolator topology.
pub const HIDDEN_SIZE: usize = 8;

/// Number of hidden layers.
pub const HIDDEN_LAYERS: usize = 4;

#[derive(Serialize, Deserialize)]
pub struct Network {
    pub layers: Vec<Layer>,
}

impl Network {
    /// Builds a network from (size, input_size, activation) tuples, with
    /// weights drawn from `rng`.
    pub fn new<R: Rng>(
        layer_specs: Vec<(usize, usize, ActivationFunction)>,
        rng: &mut R,
    ) -> Network {
        let layers = layer_specs.into_iter()
            .map(|(size, input_size, activation)| Layer::new(size, input_size, activation, rng))
            .collect();
        Network { layers }
    }

    /// The fixed interpolation topology: 32 stencil inputs, four tanh
    /// hidden layers of 8 neurons, one sigmoid output neuron. The output
    /// activation is part of the topology definition, not a library
    /// default. Layer 0 is symmetrized before the network is returned.
    pub fn interpolator<R: Rng>(rng: &mut R) -> Network {
        let mut specs = vec![(HIDDEN_SIZE, stencil::PATCH_LEN, ActivationFunction::Tanh)];
        for _ in 1..HIDDEN_LAYERS {
            specs.push((HIDDEN_SIZE, HIDDEN_SIZE, ActivationFunction::Tanh));
        }
        specs.push((1, HIDDEN_SIZE, ActivationFunction::Sigmoid));

        let mut network = Network::new(specs, rng);
        network.symmetrize_input_layer();
        network
    }

    /// Forward pass; stores activations in each layer for backprop.
    pub fn forward(&mut self, input: Vec<f64>) -> Vec<f64> {
        let mut current = input;
        for layer in &mut self.layers {
            current = layer.feed_from(current);
        }
        current
    }

    /// Forward pass through a shared reference; no activation caching.
    /// This is the path inference borrows after training ends.
    pub fn infer(&self, input: &[f64]) -> Vec<f64> {
        let mut current = input.to_vec();
        for layer in &self.layers {
            current = layer.infer(&current);
        }
        current
    }

    /// Averages layer 0's spatial weights over their symmetry orbits.
    /// Must run after initialization and after every training update so the
    /// learned filter stays invariant under the square's symmetries.
    pub fn symmetrize_input_layer(&mut self) {
        stencil::symmetrize(&mut self.layers[0].weights);
    }

    /// Writes every weight as plain text, one value per line, grouped by
    /// layer. Within a neuron the bias prints first, then its input
    /// weights, so the interpolator dumps 8 x 33 values for layer 0,
    /// 8 x 9 for each of layers 1-3, and 9 for the output neuron.
    pub fn dump_weights<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for (idx, layer) in self.layers.iter().enumerate() {
            if idx > 0 {
                writeln!(out)?;
            }
            if idx + 1 == self.layers.len() {
                writeln!(out, "output")?;
            } else {
                writeln!(out, "layer {idx}")?;
            }
            for j in 0..layer.size {
                writeln!(out, "{:.6}", layer.biases.data[0][j])?;
                for i in 0..layer.weights.rows {
                    writeln!(out, "{:.6}", layer.weights.data[i][j])?;
                }
            }
        }
        Ok(())
    }

    /// Serializes the network weights to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json(path: &str) -> std::io::Result<Network> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}
