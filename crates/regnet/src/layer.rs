use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::math::{dot, relu};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activation {
    Relu,
    Linear,
}

/// One fully-connected layer: `out = act(W x + b)`.
/// `weights[j]` is the incoming weight row of output unit `j`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseLayer {
    pub weights: Vec<Vec<f64>>,
    pub biases: Vec<f64>,
    pub activation: Activation,
}

impl DenseLayer {
    /// He-uniform initialization, seeded by the caller's rng so a fixed seed
    /// reproduces the same starting weights.
    pub(crate) fn init(input: usize, output: usize, activation: Activation, rng: &mut StdRng) -> Self {
        let limit = (6.0 / input.max(1) as f64).sqrt();
        let weights = (0..output)
            .map(|_| (0..input).map(|_| rng.gen_range(-limit..limit)).collect())
            .collect();
        Self {
            weights,
            biases: vec![0.0; output],
            activation,
        }
    }

    pub fn input_width(&self) -> usize {
        self.weights.first().map(Vec::len).unwrap_or(0)
    }

    pub fn output_width(&self) -> usize {
        self.weights.len()
    }

    /// Pre-activation values `z = W x + b`.
    pub(crate) fn pre_activation(&self, input: &[f64]) -> Vec<f64> {
        self.weights
            .iter()
            .zip(self.biases.iter())
            .map(|(row, b)| dot(row, input) + b)
            .collect()
    }

    pub(crate) fn activate(&self, z: &[f64]) -> Vec<f64> {
        match self.activation {
            Activation::Relu => z.iter().map(|&v| relu(v)).collect(),
            Activation::Linear => z.to_vec(),
        }
    }

    pub(crate) fn forward(&self, input: &[f64]) -> Vec<f64> {
        let z = self.pre_activation(input);
        self.activate(&z)
    }
}
