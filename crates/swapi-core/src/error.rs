//! Centralized error types for the SWAPI mirror.

use crate::global_id::GlobalIdError;
use thiserror::Error;

/// Main error type for authoring and query operations.
#[derive(Error, Debug)]
pub enum SwapiError {
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    #[error("{field}: {message}")]
    InvalidReference { field: String, message: String },

    #[error("Invalid global id: {0}")]
    InvalidGlobalId(#[from] GlobalIdError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(swapi_db::DbError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for SWAPI mirror operations.
pub type SwapiResult<T> = Result<T, SwapiError>;

impl SwapiError {
    /// Create a field-level validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an unresolvable-reference error for an input field.
    pub fn invalid_reference(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidReference {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Input field the error belongs to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } | Self::InvalidReference { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<swapi_db::DbError> for SwapiError {
    fn from(err: swapi_db::DbError) -> Self {
        match err {
            swapi_db::DbError::NotFound(what) => Self::NotFound(what),
            e => Self::Database(e),
        }
    }
}
