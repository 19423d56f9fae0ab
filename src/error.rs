//! Error types for the plan engine

use thiserror::Error;

/// Errors raised by the projection and distribution engine
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid timeline: {0}")]
    InvalidTimeline(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("store failure: {0}")]
    Store(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type PlanResult<T> = Result<T, PlanError>;
