//! Labeled dataset ingestion: CSV rows with the host application's Spanish
//! column headers, plus the deterministic train/validation split.

use std::fmt;
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Deserialize;
use tracing::info;

use encoding::{EventRecord, LabeledRecord};

/// Fraction of rows held out for validation monitoring.
pub const VALIDATION_RATIO: f64 = 0.2;
/// Seed for the split shuffle; fixed so reruns see the same partition.
pub const SPLIT_SEED: u64 = 42;

#[derive(Debug)]
pub enum DatasetError {
    Empty,
    Csv(csv::Error),
    Io(std::io::Error),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "dataset contains no rows"),
            Self::Csv(err) => write!(f, "dataset parse error: {}", err),
            Self::Io(err) => write!(f, "dataset io error: {}", err),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Csv(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Empty => None,
        }
    }
}

impl From<csv::Error> for DatasetError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<std::io::Error> for DatasetError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

pub type DatasetResult<T> = std::result::Result<T, DatasetError>;

/// One CSV row. Header names match the original training dataset.
#[derive(Debug, Deserialize)]
struct DatasetRow {
    tipo_evento: String,
    invitados: f64,
    presupuesto: f64,
    lugar: String,
    horario: String,
    comida: String,
    musica: String,
    decoracion: String,
    costo_real: f64,
}

impl From<DatasetRow> for LabeledRecord {
    fn from(row: DatasetRow) -> Self {
        LabeledRecord {
            record: EventRecord {
                event_type: row.tipo_evento,
                venue: row.lugar,
                schedule_slot: row.horario,
                catering: row.comida,
                music: row.musica,
                decor: row.decoracion,
                guest_count: row.invitados,
                budget: row.presupuesto,
            },
            actual_cost: row.costo_real,
        }
    }
}

pub fn load_dataset(path: &Path) -> DatasetResult<Vec<LabeledRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for result in reader.deserialize() {
        let row: DatasetRow = result?;
        records.push(row.into());
    }
    if records.is_empty() {
        return Err(DatasetError::Empty);
    }
    info!(rows = records.len(), path = %path.display(), "dataset loaded");
    Ok(records)
}

pub fn load_dataset_from_reader<R: std::io::Read>(reader: R) -> DatasetResult<Vec<LabeledRecord>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for result in reader.deserialize() {
        let row: DatasetRow = result?;
        records.push(row.into());
    }
    if records.is_empty() {
        return Err(DatasetError::Empty);
    }
    Ok(records)
}

/// Shuffle `0..n` with the fixed seed and cut off the validation tail.
/// Returns (train indices, validation indices). With fewer than five rows the
/// validation side may be empty; training still proceeds.
pub fn split_indices(n: usize, ratio: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(&mut StdRng::seed_from_u64(seed));
    let val_len = ((n as f64) * ratio).floor() as usize;
    let train_len = n - val_len;
    let val = order.split_off(train_len);
    (order, val)
}
