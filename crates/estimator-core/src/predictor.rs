//! Inference pipeline: one loaded artifact set, one record in, one
//! recommendation out. Pure aside from the initial bundle load.

use std::fmt;

use tracing::debug;

use encoding::{EncodingArtifacts, EventRecord};
use regnet::CostModel;

use crate::bundle::{ArtifactBundle, BundleError};

/// An inference request after coercion: the greeting name plus the event
/// attributes the encoder understands.
#[derive(Debug, Clone, PartialEq)]
pub struct EventQuery {
    pub name: String,
    pub record: EventRecord,
}

/// The derived prediction: raw network output plus the budget verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub predicted_cost: f64,
    pub message: String,
    pub recommendation: String,
    pub budget_is_sufficient: bool,
    pub difference: f64,
}

#[derive(Debug)]
pub enum PredictError {
    Artifacts(BundleError),
    Model(regnet::ModelError),
}

impl fmt::Display for PredictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Artifacts(err) => write!(f, "artifact load failed: {}", err),
            Self::Model(err) => write!(f, "prediction failed: {}", err),
        }
    }
}

impl std::error::Error for PredictError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Artifacts(err) => Some(err),
            Self::Model(err) => Some(err),
        }
    }
}

impl From<BundleError> for PredictError {
    fn from(value: BundleError) -> Self {
        Self::Artifacts(value)
    }
}

impl From<regnet::ModelError> for PredictError {
    fn from(value: regnet::ModelError) -> Self {
        Self::Model(value)
    }
}

pub type PredictResult<T> = std::result::Result<T, PredictError>;

/// Holds one self-consistent artifact set for the lifetime of the process.
/// Encoder and model always come from the same bundle load, so a training run
/// that rewrites the directory mid-flight cannot mix versions here.
#[derive(Debug)]
pub struct Predictor {
    artifacts: EncodingArtifacts,
    model: CostModel,
}

impl Predictor {
    pub fn open(bundle: &ArtifactBundle) -> PredictResult<Self> {
        let loaded = bundle.load()?;
        Ok(Self {
            artifacts: loaded.artifacts,
            model: loaded.model,
        })
    }

    pub fn predict_one(&self, query: &EventQuery) -> PredictResult<PredictionResult> {
        let features = self.artifacts.transform(&query.record);
        let predicted_cost = self.model.predict(&features)?;
        debug!(
            predicted_cost,
            feature_width = features.len(),
            "forward pass complete"
        );

        let budget = query.record.budget;
        let difference = (predicted_cost - budget).abs();
        let budget_is_sufficient = predicted_cost <= budget;

        Ok(PredictionResult {
            predicted_cost,
            message: greeting(query),
            recommendation: recommendation(predicted_cost, budget, budget_is_sufficient),
            budget_is_sufficient,
            difference,
        })
    }
}

fn greeting(query: &EventQuery) -> String {
    format!(
        "Perfecto {}, he analizado tu evento de {} para {:.0} invitados.",
        query.name, query.record.event_type, query.record.guest_count
    )
}

fn recommendation(predicted: f64, budget: f64, sufficient: bool) -> String {
    let difference = (predicted - budget).abs();
    if sufficient {
        format!(
            "Costo estimado: ${:.0}. Tu presupuesto: ${:.0}. Te sobran ${:.0}.",
            predicted, budget, difference
        )
    } else {
        format!(
            "Costo estimado: ${:.0}. Tu presupuesto: ${:.0}. Necesitas ${:.0} adicionales.",
            predicted, budget, difference
        )
    }
}
