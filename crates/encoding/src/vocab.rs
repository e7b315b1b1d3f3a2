use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::record::{CategoricalField, EventRecord, CATEGORICAL_FIELDS};

/// Fitted vocabulary for one categorical field. Categories are kept in sorted
/// order so the one-hot column layout does not depend on dataset row order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldVocabulary {
    pub field: CategoricalField,
    pub categories: Vec<String>,
}

impl FieldVocabulary {
    /// Column index of `value` within this field's one-hot block, if fitted.
    pub fn position(&self, value: &str) -> Option<usize> {
        self.categories.binary_search_by(|c| c.as_str().cmp(value)).ok()
    }

    pub fn width(&self) -> usize {
        self.categories.len()
    }
}

/// Fitted one-hot parameters for all categorical fields, in block order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderParams {
    pub fields: Vec<FieldVocabulary>,
}

impl EncoderParams {
    pub(crate) fn fit(records: &[EventRecord]) -> Self {
        let fields = CATEGORICAL_FIELDS
            .iter()
            .map(|&field| {
                let distinct: BTreeSet<&str> =
                    records.iter().map(|r| r.categorical(field)).collect();
                FieldVocabulary {
                    field,
                    categories: distinct.into_iter().map(str::to_string).collect(),
                }
            })
            .collect();
        Self { fields }
    }

    /// Total one-hot width across all fields.
    pub fn width(&self) -> usize {
        self.fields.iter().map(FieldVocabulary::width).sum()
    }

    /// Append the one-hot blocks for `record` onto `out`.
    ///
    /// A value absent from a field's fitted vocabulary contributes an all-zero
    /// block. That is the unknown-category policy, not an error: inference
    /// inputs are free-form and must still produce a vector of fitted width.
    pub(crate) fn encode_into(&self, record: &EventRecord, out: &mut Vec<f64>) {
        for vocab in &self.fields {
            let hit = vocab.position(record.categorical(vocab.field));
            for i in 0..vocab.width() {
                out.push(if hit == Some(i) { 1.0 } else { 0.0 });
            }
        }
    }
}
