//! The artifact bundle: one directory holding the three training outputs
//! (encoder params, scaler params, model weights) plus a manifest tying them
//! together under a single run id.
//!
//! The manifest is written last, so a crashed training run never leaves a
//! loadable bundle behind. Loading verifies that every artifact carries the
//! manifest's run id; a disagreement means the directory mixes outputs from
//! different training runs and the bundle is rejected.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use encoding::{EncoderParams, EncodingArtifacts, ScalerParams};
use regnet::CostModel;

const MANIFEST_FILE: &str = "bundle.json";
const ENCODER_FILE: &str = "encoder.json";
const SCALER_FILE: &str = "scaler.json";
const MODEL_FILE: &str = "model.bin";

#[derive(Debug)]
pub enum BundleError {
    Missing(PathBuf),
    MixedArtifacts {
        file: &'static str,
        manifest_run: String,
        artifact_run: String,
    },
    WidthMismatch {
        encoder_width: usize,
        model_width: usize,
    },
    Model(regnet::ModelError),
    Serialize(String),
    Deserialize(String),
    Io(std::io::Error),
}

impl fmt::Display for BundleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(path) => write!(f, "missing artifact file: {}", path.display()),
            Self::MixedArtifacts {
                file,
                manifest_run,
                artifact_run,
            } => write!(
                f,
                "{} belongs to run {} but the manifest says {}",
                file, artifact_run, manifest_run
            ),
            Self::WidthMismatch {
                encoder_width,
                model_width,
            } => write!(
                f,
                "encoder produces width {} but the model expects {}",
                encoder_width, model_width
            ),
            Self::Model(err) => write!(f, "model artifact invalid: {}", err),
            Self::Serialize(msg) => write!(f, "artifact serialize error: {}", msg),
            Self::Deserialize(msg) => write!(f, "artifact deserialize error: {}", msg),
            Self::Io(err) => write!(f, "artifact io error: {}", err),
        }
    }
}

impl std::error::Error for BundleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Model(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BundleError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<regnet::ModelError> for BundleError {
    fn from(value: regnet::ModelError) -> Self {
        Self::Model(value)
    }
}

pub type BundleResult<T> = std::result::Result<T, BundleError>;

/// Manifest written alongside the artifacts, after all of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleManifest {
    pub run_id: String,
    pub created_unix: u64,
    pub feature_width: usize,
}

/// An artifact with the run id it was produced under.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Stamped<T> {
    run_id: String,
    payload: T,
}

/// A loaded, self-consistent artifact set.
#[derive(Debug, Clone)]
pub struct LoadedBundle {
    pub manifest: BundleManifest,
    pub artifacts: EncodingArtifacts,
    pub model: CostModel,
}

/// Handle to the artifact directory. Does not touch the filesystem until
/// `save` or `load` is called.
#[derive(Debug, Clone)]
pub struct ArtifactBundle {
    dir: PathBuf,
}

impl ArtifactBundle {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    /// Persist a freshly trained artifact set under a new run id. Artifacts
    /// first, manifest last.
    pub fn save(
        &self,
        artifacts: &EncodingArtifacts,
        model: &CostModel,
    ) -> BundleResult<BundleManifest> {
        if artifacts.feature_width() != model.input_width {
            return Err(BundleError::WidthMismatch {
                encoder_width: artifacts.feature_width(),
                model_width: model.input_width,
            });
        }
        model.validate()?;
        std::fs::create_dir_all(&self.dir)?;

        let created_unix = now_unix();
        let run_id = format!("run-{}", created_unix);

        write_json(
            &self.path(ENCODER_FILE),
            &Stamped {
                run_id: run_id.clone(),
                payload: artifacts.encoder.clone(),
            },
        )?;
        write_json(
            &self.path(SCALER_FILE),
            &Stamped {
                run_id: run_id.clone(),
                payload: artifacts.scaler.clone(),
            },
        )?;
        write_bin(
            &self.path(MODEL_FILE),
            &Stamped {
                run_id: run_id.clone(),
                payload: model.clone(),
            },
        )?;

        let manifest = BundleManifest {
            run_id,
            created_unix,
            feature_width: artifacts.feature_width(),
        };
        write_json(&self.path(MANIFEST_FILE), &manifest)?;
        info!(
            run_id = %manifest.run_id,
            feature_width = manifest.feature_width,
            dir = %self.dir.display(),
            "artifact bundle saved"
        );
        Ok(manifest)
    }

    /// Load and cross-check the full artifact set.
    pub fn load(&self) -> BundleResult<LoadedBundle> {
        let manifest: BundleManifest = read_json(&self.path(MANIFEST_FILE))?;
        let encoder: Stamped<EncoderParams> = read_json(&self.path(ENCODER_FILE))?;
        let scaler: Stamped<ScalerParams> = read_json(&self.path(SCALER_FILE))?;
        let model: Stamped<CostModel> = read_bin(&self.path(MODEL_FILE))?;

        for (file, run) in [
            (ENCODER_FILE, &encoder.run_id),
            (SCALER_FILE, &scaler.run_id),
            (MODEL_FILE, &model.run_id),
        ] {
            if *run != manifest.run_id {
                return Err(BundleError::MixedArtifacts {
                    file,
                    manifest_run: manifest.run_id.clone(),
                    artifact_run: run.clone(),
                });
            }
        }

        let artifacts = EncodingArtifacts {
            encoder: encoder.payload,
            scaler: scaler.payload,
        };
        let model = model.payload;
        model.validate()?;
        if artifacts.feature_width() != model.input_width
            || manifest.feature_width != model.input_width
        {
            return Err(BundleError::WidthMismatch {
                encoder_width: artifacts.feature_width(),
                model_width: model.input_width,
            });
        }

        debug!(run_id = %manifest.run_id, "artifact bundle loaded");
        Ok(LoadedBundle {
            manifest,
            artifacts,
            model,
        })
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> BundleResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|err| BundleError::Serialize(err.to_string()))?;
    std::fs::write(path, json)?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> BundleResult<T> {
    if !path.exists() {
        return Err(BundleError::Missing(path.to_path_buf()));
    }
    let json = std::fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(|err| BundleError::Deserialize(err.to_string()))
}

fn write_bin<T: Serialize>(path: &Path, value: &T) -> BundleResult<()> {
    let bytes =
        bincode::serialize(value).map_err(|err| BundleError::Serialize(err.to_string()))?;
    std::fs::write(path, bytes)?;
    Ok(())
}

fn read_bin<T: DeserializeOwned>(path: &Path) -> BundleResult<T> {
    if !path.exists() {
        return Err(BundleError::Missing(path.to_path_buf()));
    }
    let bytes = std::fs::read(path)?;
    bincode::deserialize(&bytes).map_err(|err| BundleError::Deserialize(err.to_string()))
}

fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}
