use serde::{Deserialize, Serialize};

use crate::record::{EventRecord, NumericField, NUMERIC_FIELDS};

/// Fitted mean and standard deviation for one numeric field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    pub field: NumericField,
    pub mean: f64,
    pub std: f64,
}

/// Fitted standardization parameters for the numeric fields, in column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerParams {
    pub stats: Vec<NumericStats>,
}

impl ScalerParams {
    /// Population mean/std over the full training set (divide by n, matching
    /// the statistics the model was trained against).
    pub(crate) fn fit(records: &[EventRecord]) -> Self {
        let n = records.len().max(1) as f64;
        let stats = NUMERIC_FIELDS
            .iter()
            .map(|&field| {
                let mean = records.iter().map(|r| r.numeric(field)).sum::<f64>() / n;
                let var = records
                    .iter()
                    .map(|r| {
                        let d = r.numeric(field) - mean;
                        d * d
                    })
                    .sum::<f64>()
                    / n;
                NumericStats {
                    field,
                    mean,
                    std: var.sqrt(),
                }
            })
            .collect();
        Self { stats }
    }

    /// Append standardized numeric columns onto `out`.
    ///
    /// A zero fitted std means the column was constant during training; any
    /// value maps to 0.0 there (centered, no division).
    pub(crate) fn encode_into(&self, record: &EventRecord, out: &mut Vec<f64>) {
        for s in &self.stats {
            let value = record.numeric(s.field);
            out.push(if s.std > 0.0 { (value - s.mean) / s.std } else { 0.0 });
        }
    }

    pub fn width(&self) -> usize {
        self.stats.len()
    }
}
