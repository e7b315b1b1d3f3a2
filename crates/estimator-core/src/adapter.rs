//! The JSON boundary with the host application.
//!
//! One JSON object in (a single positional CLI argument), one JSON object out
//! on stdout. The request schema is declared here rather than handled as an
//! open map, so missing or malformed fields are resolved in one place. Numeric
//! fields accept numbers or numeric strings; anything else coerces to the
//! default. Every failure path converges on the same payload shape, so the
//! caller always receives well-formed JSON.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, error};

use encoding::EventRecord;

use crate::bundle::ArtifactBundle;
use crate::predictor::{EventQuery, PredictionResult, Predictor};

const DEFAULT_NAME: &str = "Usuario";
const PARSE_ERROR_MSG: &str = "Error al leer los datos";
const PARSE_ERROR_RECOMMENDATION: &str = "No se pudieron procesar los datos enviados";
const INTERNAL_ERROR_MSG: &str = "Error en el análisis";

/// Incoming request. Every key is optional; coercion to defaults happens in
/// `into_query`, never deep inside the pipeline.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub tipo_evento: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub invitados: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub presupuesto: Option<f64>,
    #[serde(default)]
    pub lugar: Option<String>,
    #[serde(default)]
    pub horario: Option<String>,
    #[serde(default)]
    pub comida: Option<String>,
    #[serde(default)]
    pub musica: Option<String>,
    #[serde(default)]
    pub decoracion: Option<String>,
}

impl PredictRequest {
    pub fn parse(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// Apply the leniency policy: absent categoricals become empty strings
    /// (encoded as all-zero one-hot blocks), absent numerics become zero.
    pub fn into_query(self) -> EventQuery {
        EventQuery {
            name: self.nombre.unwrap_or_else(|| DEFAULT_NAME.to_string()),
            record: EventRecord {
                event_type: self.tipo_evento.unwrap_or_default(),
                venue: self.lugar.unwrap_or_default(),
                schedule_slot: self.horario.unwrap_or_default(),
                catering: self.comida.unwrap_or_default(),
                music: self.musica.unwrap_or_default(),
                decor: self.decoracion.unwrap_or_default(),
                // Guest counts are whole people; fractional inputs truncate.
                guest_count: self.invitados.map(f64::trunc).unwrap_or(0.0),
                budget: self.presupuesto.unwrap_or(0.0),
            },
        }
    }
}

/// Accept a JSON number or a numeric string; anything else coerces to `None`
/// rather than failing the whole request.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// Outgoing response, keyed the way the host application expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub prediccion: f64,
    pub msg: String,
    pub recomendacion: String,
    pub presupuesto_suficiente: bool,
    pub diferencia: f64,
}

impl PredictResponse {
    fn from_result(result: PredictionResult) -> Self {
        Self {
            prediccion: result.predicted_cost,
            msg: result.message,
            recomendacion: result.recommendation,
            presupuesto_suficiente: result.budget_is_sufficient,
            diferencia: result.difference,
        }
    }

    /// Fixed payload for a request body that is not valid JSON.
    pub fn parse_failure() -> Self {
        Self {
            prediccion: 0.0,
            msg: PARSE_ERROR_MSG.to_string(),
            recomendacion: PARSE_ERROR_RECOMMENDATION.to_string(),
            presupuesto_suficiente: false,
            diferencia: 0.0,
        }
    }

    /// Fallback payload for any failure after parsing; the error text lands in
    /// the recommendation field.
    pub fn internal_failure(error_text: &str) -> Self {
        Self {
            prediccion: 0.0,
            msg: INTERNAL_ERROR_MSG.to_string(),
            recomendacion: format!("Ocurrió un error: {}", error_text),
            presupuesto_suficiente: false,
            diferencia: 0.0,
        }
    }

    pub fn to_json(&self) -> String {
        // A struct of primitives and strings always serializes.
        serde_json::to_string_pretty(self)
            .unwrap_or_else(|_| "{\"prediccion\":0.0}".to_string())
    }
}

/// Handle one inference invocation end to end. Returns the response payload
/// and the process exit code: 0 on success, 1 on any failure. The payload is
/// emitted in every branch.
pub fn handle_request(raw_arg: Option<&str>, bundle: &ArtifactBundle) -> (PredictResponse, i32) {
    let raw = match raw_arg {
        Some(raw) => raw,
        None => {
            error!("no request argument supplied");
            return (PredictResponse::parse_failure(), 1);
        }
    };

    let request = match PredictRequest::parse(raw) {
        Ok(request) => request,
        Err(err) => {
            error!(%err, "request body is not valid JSON");
            return (PredictResponse::parse_failure(), 1);
        }
    };
    debug!(?request, "request parsed");

    let query = request.into_query();
    let predictor = match Predictor::open(bundle) {
        Ok(predictor) => predictor,
        Err(err) => {
            error!(%err, "artifact bundle unavailable");
            return (PredictResponse::internal_failure(&err.to_string()), 1);
        }
    };

    match predictor.predict_one(&query) {
        Ok(result) => (PredictResponse::from_result(result), 0),
        Err(err) => {
            error!(%err, "prediction failed");
            (PredictResponse::internal_failure(&err.to_string()), 1)
        }
    }
}
