//! Error types for the dashboard engine.
//!
//! Only contract violations surface here. Unknown statuses, zero
//! denominators and unknown view keys are recovered where they occur.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    #[error("entity {entity_id:?} has out-of-enum {axis} value {value:?} (expected high, medium or low)")]
    OutOfEnumAxis {
        entity_id: String,
        axis: &'static str,
        value: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("invalid config: {0}")]
    Config(String),
    #[error(transparent)]
    Matrix(#[from] MatrixError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse {path}: {message}")]
    Parse { path: String, message: String },
}
