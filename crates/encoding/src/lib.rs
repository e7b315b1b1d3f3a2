//! Feature encoding for event records.
//!
//! Maps raw event attributes to the fixed-width numeric vector the regression
//! network consumes: two standardized numeric columns followed by one one-hot
//! block per categorical field, in a column order fixed at fit time. The fitted
//! parameters (`EncoderParams`, `ScalerParams`) are the encoding artifacts;
//! inference must run through the exact same parameters that training produced.

mod encoder;
mod record;
mod scaler;
mod vocab;

pub use encoder::{EncodingArtifacts, FeatureEncoder};
pub use record::{
    CategoricalField, EventRecord, LabeledRecord, NumericField, CATEGORICAL_FIELDS, NUMERIC_FIELDS,
};
pub use scaler::{NumericStats, ScalerParams};
pub use vocab::{EncoderParams, FieldVocabulary};

use std::fmt;

#[derive(Debug)]
pub enum EncodingError {
    EmptyTrainingSet,
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTrainingSet => write!(f, "cannot fit encoder on an empty training set"),
        }
    }
}

impl std::error::Error for EncodingError {}

pub type EncodingResult<T> = std::result::Result<T, EncodingError>;

#[cfg(test)]
mod tests;
