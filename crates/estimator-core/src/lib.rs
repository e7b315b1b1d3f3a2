//! Orchestration layer for the event cost estimator: artifact bundle handling,
//! dataset loading, the offline trainer, the inference predictor, and the JSON
//! adapter the host application talks to.

pub mod adapter;
pub mod bundle;
pub mod config;
pub mod dataset;
pub mod predictor;
pub mod trainer;
