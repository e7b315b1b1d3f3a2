use std::path::PathBuf;

/// Resolved paths for a run: CLI argument wins, then environment, then the
/// built-in default next to the working directory.
#[derive(Debug, Clone)]
pub struct EstimatorConfig {
    pub artifact_dir: PathBuf,
    pub dataset_path: PathBuf,
}

pub const ARTIFACT_DIR_ENV: &str = "EVENTO_ARTIFACT_DIR";
pub const DATASET_ENV: &str = "EVENTO_DATASET";

const DEFAULT_ARTIFACT_DIR: &str = "artifacts";
const DEFAULT_DATASET: &str = "dataset.csv";

impl EstimatorConfig {
    pub fn resolve(cli_dataset: Option<&str>, cli_artifact_dir: Option<&str>) -> Self {
        Self {
            artifact_dir: resolve_path(cli_artifact_dir, ARTIFACT_DIR_ENV, DEFAULT_ARTIFACT_DIR),
            dataset_path: resolve_path(cli_dataset, DATASET_ENV, DEFAULT_DATASET),
        }
    }
}

fn resolve_path(cli: Option<&str>, env_var: &str, default: &str) -> PathBuf {
    if let Some(p) = cli {
        let p = p.trim();
        if !p.is_empty() {
            return PathBuf::from(p);
        }
    }
    if let Ok(p) = std::env::var(env_var) {
        let p = p.trim();
        if !p.is_empty() {
            return PathBuf::from(p);
        }
    }
    PathBuf::from(default)
}

#[cfg(test)]
mod tests;
