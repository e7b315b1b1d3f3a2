//! Feed-forward regression network for event cost prediction.
//!
//! Fixed architecture: input width → 64 (relu) → 32 (relu) → 1 (linear),
//! trained with Adam against mean-squared-error, mean-absolute-error tracked
//! as the secondary metric. Inference is a single deterministic forward pass;
//! there are no stochastic layers, so a fixed weight set always produces the
//! same prediction.

mod layer;
mod math;
mod model;
mod train;

pub use layer::{Activation, DenseLayer};
pub use model::{CostModel, HIDDEN_WIDTHS};
pub use train::{train, EpochStats, TrainConfig, TrainReport};

use std::fmt;

#[derive(Debug)]
pub enum ModelError {
    EmptyTrainingSet,
    InputWidthMismatch { expected: usize, got: usize },
    LayerShapeMismatch { layer: usize, detail: String },
    NonFiniteWeight { layer: usize, value: f64 },
    NonFiniteOutput(f64),
    SampleCountMismatch { rows: usize, labels: usize },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTrainingSet => write!(f, "cannot train on an empty set"),
            Self::InputWidthMismatch { expected, got } => {
                write!(f, "input width mismatch: model expects {}, got {}", expected, got)
            }
            Self::LayerShapeMismatch { layer, detail } => {
                write!(f, "layer {} shape mismatch: {}", layer, detail)
            }
            Self::NonFiniteWeight { layer, value } => {
                write!(f, "non-finite weight in layer {}: {}", layer, value)
            }
            Self::NonFiniteOutput(v) => write!(f, "non-finite network output: {}", v),
            Self::SampleCountMismatch { rows, labels } => {
                write!(f, "feature rows ({}) and labels ({}) disagree", rows, labels)
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type ModelResult<T> = std::result::Result<T, ModelError>;
