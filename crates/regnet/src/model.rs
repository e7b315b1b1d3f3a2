use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::layer::{Activation, DenseLayer};
use crate::{ModelError, ModelResult};

/// Hidden layer widths of the fixed architecture (the output layer is a single
/// linear unit on top).
pub const HIDDEN_WIDTHS: [usize; 2] = [64, 32];

/// The trained regression network. Produced by training, loaded read-only at
/// inference time; `validate()` runs on every load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostModel {
    pub input_width: usize,
    pub layers: Vec<DenseLayer>,
}

impl CostModel {
    /// Fresh network with seeded He-uniform weights and zero biases.
    pub fn init(input_width: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut layers = Vec::with_capacity(HIDDEN_WIDTHS.len() + 1);
        let mut prev = input_width;
        for &width in &HIDDEN_WIDTHS {
            layers.push(DenseLayer::init(prev, width, Activation::Relu, &mut rng));
            prev = width;
        }
        layers.push(DenseLayer::init(prev, 1, Activation::Linear, &mut rng));
        Self {
            input_width,
            layers,
        }
    }

    /// Structural soundness: the layer widths chain from `input_width` down to
    /// a single output unit, and every parameter is finite.
    pub fn validate(&self) -> ModelResult<()> {
        let mut prev = self.input_width;
        for (i, layer) in self.layers.iter().enumerate() {
            if layer.input_width() != prev {
                return Err(ModelError::LayerShapeMismatch {
                    layer: i,
                    detail: format!("expects input {}, got {}", layer.input_width(), prev),
                });
            }
            if layer.biases.len() != layer.output_width() {
                return Err(ModelError::LayerShapeMismatch {
                    layer: i,
                    detail: format!(
                        "{} bias terms for {} units",
                        layer.biases.len(),
                        layer.output_width()
                    ),
                });
            }
            for row in &layer.weights {
                if row.len() != prev {
                    return Err(ModelError::LayerShapeMismatch {
                        layer: i,
                        detail: format!("ragged weight row of {} (expected {})", row.len(), prev),
                    });
                }
                for &w in row {
                    if !w.is_finite() {
                        return Err(ModelError::NonFiniteWeight { layer: i, value: w });
                    }
                }
            }
            for &b in &layer.biases {
                if !b.is_finite() {
                    return Err(ModelError::NonFiniteWeight { layer: i, value: b });
                }
            }
            prev = layer.output_width();
        }
        match self.layers.last() {
            Some(last) if last.output_width() == 1 => Ok(()),
            Some(last) => Err(ModelError::LayerShapeMismatch {
                layer: self.layers.len() - 1,
                detail: format!("output layer has {} units, expected 1", last.output_width()),
            }),
            None => Err(ModelError::LayerShapeMismatch {
                layer: 0,
                detail: "network has no layers".to_string(),
            }),
        }
    }

    /// One forward pass over a single feature vector.
    pub fn predict(&self, features: &[f64]) -> ModelResult<f64> {
        if features.len() != self.input_width {
            return Err(ModelError::InputWidthMismatch {
                expected: self.input_width,
                got: features.len(),
            });
        }
        let mut activation = features.to_vec();
        for layer in &self.layers {
            activation = layer.forward(&activation);
        }
        let out = activation[0];
        if !out.is_finite() {
            return Err(ModelError::NonFiniteOutput(out));
        }
        Ok(out)
    }

}
