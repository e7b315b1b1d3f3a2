use tracing::debug;

use crate::record::EventRecord;
use crate::scaler::ScalerParams;
use crate::vocab::EncoderParams;
use crate::{EncodingError, EncodingResult};

/// Fits encoding artifacts from a training set. Stateless; the artifacts carry
/// everything transform needs.
pub struct FeatureEncoder;

impl FeatureEncoder {
    pub fn fit(records: &[EventRecord]) -> EncodingResult<EncodingArtifacts> {
        if records.is_empty() {
            return Err(EncodingError::EmptyTrainingSet);
        }
        let encoder = EncoderParams::fit(records);
        let scaler = ScalerParams::fit(records);
        let artifacts = EncodingArtifacts { encoder, scaler };
        debug!(
            feature_width = artifacts.feature_width(),
            records = records.len(),
            "fitted encoding artifacts"
        );
        Ok(artifacts)
    }
}

/// The fitted encoding parameters: scaler stats plus one-hot vocabularies.
/// Immutable once trained; every transform call reads, never writes.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodingArtifacts {
    pub encoder: EncoderParams,
    pub scaler: ScalerParams,
}

impl EncodingArtifacts {
    /// Width of every vector this artifact set produces:
    /// numeric columns first, then the one-hot blocks.
    pub fn feature_width(&self) -> usize {
        self.scaler.width() + self.encoder.width()
    }

    /// Encode one record into the fitted column order. Deterministic: the same
    /// record against the same artifacts always yields the identical vector.
    pub fn transform(&self, record: &EventRecord) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.feature_width());
        self.scaler.encode_into(record, &mut out);
        self.encoder.encode_into(record, &mut out);
        out
    }

    /// Encode a whole training set, row by row.
    pub fn transform_all(&self, records: &[EventRecord]) -> Vec<Vec<f64>> {
        records.iter().map(|r| self.transform(r)).collect()
    }
}
