//! Error types for expenseweb-core

use crate::validate::FieldErrors;
use thiserror::Error;

/// Main error type for expenseweb-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation failed")]
    Validation { errors: FieldErrors },

    #[error("Unknown chart mode: {value}")]
    UnknownChartMode { value: String },
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;
