use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::layer::Activation;
use crate::math::{mean_absolute_error, mean_squared_error, relu_grad};
use crate::model::CostModel;
use crate::{ModelError, ModelResult};

/// Fixed training budget: 50 passes over the training split in batches of 8,
/// Adam with its stock hyperparameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    pub seed: u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            epochs: 50,
            batch_size: 8,
            learning_rate: 1e-3,
            seed: 42,
        }
    }
}

/// Loss and metric snapshot after one pass over the data. Validation numbers
/// are monitoring-only; they never influence the trained weights.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EpochStats {
    pub epoch: usize,
    pub mse: f64,
    pub mae: f64,
    pub val_mse: f64,
    pub val_mae: f64,
}

/// Trained model plus the per-epoch history.
#[derive(Debug, Clone)]
pub struct TrainReport {
    pub model: CostModel,
    pub history: Vec<EpochStats>,
}

const BETA1: f64 = 0.9;
const BETA2: f64 = 0.999;
const EPSILON: f64 = 1e-7;

/// Per-layer Adam first/second moment accumulators, shaped like the layer.
struct AdamLayerState {
    m_w: Vec<Vec<f64>>,
    v_w: Vec<Vec<f64>>,
    m_b: Vec<f64>,
    v_b: Vec<f64>,
}

/// Accumulated gradients for one layer over a batch.
struct LayerGrads {
    d_w: Vec<Vec<f64>>,
    d_b: Vec<f64>,
}

/// Fit the network on the training split, reporting train and validation loss
/// each epoch. The validation split is used purely for monitoring; there is no
/// early stopping and no best-epoch selection.
pub fn train(
    x_train: &[Vec<f64>],
    y_train: &[f64],
    x_val: &[Vec<f64>],
    y_val: &[f64],
    config: &TrainConfig,
) -> ModelResult<TrainReport> {
    if x_train.is_empty() {
        return Err(ModelError::EmptyTrainingSet);
    }
    if x_train.len() != y_train.len() {
        return Err(ModelError::SampleCountMismatch {
            rows: x_train.len(),
            labels: y_train.len(),
        });
    }
    if x_val.len() != y_val.len() {
        return Err(ModelError::SampleCountMismatch {
            rows: x_val.len(),
            labels: y_val.len(),
        });
    }
    let width = x_train[0].len();
    for row in x_train.iter().chain(x_val.iter()) {
        if row.len() != width {
            return Err(ModelError::InputWidthMismatch {
                expected: width,
                got: row.len(),
            });
        }
    }

    let mut model = CostModel::init(width, config.seed);
    let mut adam: Vec<AdamLayerState> = model
        .layers
        .iter()
        .map(|layer| AdamLayerState {
            m_w: layer.weights.iter().map(|row| vec![0.0; row.len()]).collect(),
            v_w: layer.weights.iter().map(|row| vec![0.0; row.len()]).collect(),
            m_b: vec![0.0; layer.biases.len()],
            v_b: vec![0.0; layer.biases.len()],
        })
        .collect();

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut order: Vec<usize> = (0..x_train.len()).collect();
    let mut step: u64 = 0;
    let mut history = Vec::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        order.shuffle(&mut rng);
        for batch in order.chunks(config.batch_size.max(1)) {
            step += 1;
            let grads = batch_gradients(&model, x_train, y_train, batch);
            apply_adam(&mut model, &mut adam, &grads, config.learning_rate, step);
        }

        let (mse, mae) = evaluate(&model, x_train, y_train);
        let (val_mse, val_mae) = evaluate(&model, x_val, y_val);
        info!(epoch, mse, mae, val_mse, val_mae, "training epoch complete");
        history.push(EpochStats {
            epoch,
            mse,
            mae,
            val_mse,
            val_mae,
        });
    }

    model.validate()?;
    Ok(TrainReport { model, history })
}

/// Backpropagate MSE gradients for one batch, averaged over its rows.
fn batch_gradients(
    model: &CostModel,
    x: &[Vec<f64>],
    y: &[f64],
    batch: &[usize],
) -> Vec<LayerGrads> {
    let mut grads: Vec<LayerGrads> = model
        .layers
        .iter()
        .map(|layer| LayerGrads {
            d_w: layer.weights.iter().map(|row| vec![0.0; row.len()]).collect(),
            d_b: vec![0.0; layer.biases.len()],
        })
        .collect();

    let scale = 1.0 / batch.len().max(1) as f64;
    for &idx in batch {
        // Forward pass, keeping each layer's input and pre-activation.
        let mut inputs: Vec<Vec<f64>> = Vec::with_capacity(model.layers.len());
        let mut pre_acts: Vec<Vec<f64>> = Vec::with_capacity(model.layers.len());
        let mut activation = x[idx].clone();
        for layer in &model.layers {
            let z = layer.pre_activation(&activation);
            let a = layer.activate(&z);
            inputs.push(activation);
            pre_acts.push(z);
            activation = a;
        }

        // d(MSE)/d(pred) for one sample, averaged into the batch.
        let pred = activation[0];
        let mut delta = vec![2.0 * (pred - y[idx]) * scale];

        // Backward through the layers.
        for (l, layer) in model.layers.iter().enumerate().rev() {
            let z = &pre_acts[l];
            let d_z: Vec<f64> = match layer.activation {
                Activation::Relu => delta
                    .iter()
                    .zip(z.iter())
                    .map(|(d, &zj)| d * relu_grad(zj))
                    .collect(),
                Activation::Linear => delta.clone(),
            };

            let input = &inputs[l];
            for (j, dz) in d_z.iter().enumerate() {
                grads[l].d_b[j] += dz;
                for (i, xi) in input.iter().enumerate() {
                    grads[l].d_w[j][i] += dz * xi;
                }
            }

            if l > 0 {
                let mut next = vec![0.0; input.len()];
                for (j, dz) in d_z.iter().enumerate() {
                    for (i, w) in layer.weights[j].iter().enumerate() {
                        next[i] += dz * w;
                    }
                }
                delta = next;
            }
        }
    }
    grads
}

fn apply_adam(
    model: &mut CostModel,
    adam: &mut [AdamLayerState],
    grads: &[LayerGrads],
    learning_rate: f64,
    step: u64,
) {
    let bias1 = 1.0 - BETA1.powi(step as i32);
    let bias2 = 1.0 - BETA2.powi(step as i32);
    for ((layer, state), grad) in model.layers.iter_mut().zip(adam.iter_mut()).zip(grads.iter()) {
        for j in 0..layer.weights.len() {
            for i in 0..layer.weights[j].len() {
                let g = grad.d_w[j][i];
                state.m_w[j][i] = BETA1 * state.m_w[j][i] + (1.0 - BETA1) * g;
                state.v_w[j][i] = BETA2 * state.v_w[j][i] + (1.0 - BETA2) * g * g;
                let m_hat = state.m_w[j][i] / bias1;
                let v_hat = state.v_w[j][i] / bias2;
                layer.weights[j][i] -= learning_rate * m_hat / (v_hat.sqrt() + EPSILON);
            }
            let g = grad.d_b[j];
            state.m_b[j] = BETA1 * state.m_b[j] + (1.0 - BETA1) * g;
            state.v_b[j] = BETA2 * state.v_b[j] + (1.0 - BETA2) * g * g;
            let m_hat = state.m_b[j] / bias1;
            let v_hat = state.v_b[j] / bias2;
            layer.biases[j] -= learning_rate * m_hat / (v_hat.sqrt() + EPSILON);
        }
    }
}

/// MSE and MAE of the current weights over a split. Empty splits report zeros
/// (a trainer run without validation rows still logs cleanly).
fn evaluate(model: &CostModel, x: &[Vec<f64>], y: &[f64]) -> (f64, f64) {
    if x.is_empty() {
        return (0.0, 0.0);
    }
    let preds: Vec<f64> = x
        .iter()
        .map(|row| {
            let mut activation = row.clone();
            for layer in &model.layers {
                activation = layer.forward(&activation);
            }
            activation[0]
        })
        .collect();
    (mean_squared_error(&preds, y), mean_absolute_error(&preds, y))
}
