//! Training entry point. Reads the labeled dataset, fits the encoder, trains
//! the regression network, and persists the artifact bundle. Runs offline,
//! out-of-band from serving.

use anyhow::Result;
use tracing::info;

use estimator_core::config::EstimatorConfig;
use estimator_core::trainer::run_training;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    let config = EstimatorConfig::resolve(
        args.get(1).map(String::as_str),
        args.get(2).map(String::as_str),
    );
    info!(
        dataset = %config.dataset_path.display(),
        artifact_dir = %config.artifact_dir.display(),
        "starting training run"
    );

    let manifest = run_training(&config)?;
    println!(
        "Modelo entrenado y guardado en {} ({})",
        config.artifact_dir.display(),
        manifest.run_id
    );
    Ok(())
}
