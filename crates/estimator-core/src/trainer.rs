//! Offline training pipeline: dataset → fitted encoder → feature matrix →
//! deterministic split → trained network → persisted bundle.
//!
//! Any failure aborts the whole run before the bundle manifest is written, so
//! a partial run never produces a loadable artifact set.

use anyhow::{Context, Result};
use tracing::info;

use encoding::FeatureEncoder;
use regnet::{train, TrainConfig};

use crate::bundle::{ArtifactBundle, BundleManifest};
use crate::config::EstimatorConfig;
use crate::dataset::{load_dataset, split_indices, SPLIT_SEED, VALIDATION_RATIO};

pub fn run_training(config: &EstimatorConfig) -> Result<BundleManifest> {
    let labeled = load_dataset(&config.dataset_path)
        .with_context(|| format!("loading dataset {}", config.dataset_path.display()))?;

    let records: Vec<_> = labeled.iter().map(|l| l.record.clone()).collect();
    let labels: Vec<f64> = labeled.iter().map(|l| l.actual_cost).collect();

    // Encoder is fitted on the full feature set, before the split, so train
    // and validation rows share one vocabulary and one scaler.
    let artifacts = FeatureEncoder::fit(&records).context("fitting feature encoder")?;
    let matrix = artifacts.transform_all(&records);
    info!(
        rows = matrix.len(),
        feature_width = artifacts.feature_width(),
        "features encoded"
    );

    let (train_idx, val_idx) = split_indices(matrix.len(), VALIDATION_RATIO, SPLIT_SEED);
    let x_train: Vec<Vec<f64>> = train_idx.iter().map(|&i| matrix[i].clone()).collect();
    let y_train: Vec<f64> = train_idx.iter().map(|&i| labels[i]).collect();
    let x_val: Vec<Vec<f64>> = val_idx.iter().map(|&i| matrix[i].clone()).collect();
    let y_val: Vec<f64> = val_idx.iter().map(|&i| labels[i]).collect();
    info!(train = x_train.len(), validation = x_val.len(), "split rows");

    let report = train(&x_train, &y_train, &x_val, &y_val, &TrainConfig::default())
        .context("training regression network")?;
    if let Some(last) = report.history.last() {
        info!(
            mse = last.mse,
            mae = last.mae,
            val_mse = last.val_mse,
            val_mae = last.val_mae,
            "training finished"
        );
    }

    let bundle = ArtifactBundle::new(&config.artifact_dir);
    let manifest = bundle
        .save(&artifacts, &report.model)
        .with_context(|| format!("persisting bundle to {}", config.artifact_dir.display()))?;
    Ok(manifest)
}
