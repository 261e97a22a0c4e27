//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`Validation`] and [`InvalidAmount`] for malformed input.
//! - [`KeyNotFound`] thrown when a group or expense is missing.
//! - [`Forbidden`] thrown when a locked expense would be mutated.
//! - [`Inconsistency`] thrown when a ledger does not sum to zero.
//! - [`Database`] and [`Csv`] propagated from storage/export.
//!
//!  [`Validation`]: EngineError::Validation
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`Forbidden`]: EngineError::Forbidden
//!  [`Inconsistency`]: EngineError::Inconsistency
//!  [`Database`]: EngineError::Database
//!  [`Csv`]: EngineError::Csv
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Ledger inconsistency: {0}")]
    Inconsistency(String),
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl EngineError {
    /// `true` for failures caused by the caller's input.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InvalidAmount(_))
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::Forbidden(a), Self::Forbidden(b)) => a == b,
            (Self::Inconsistency(a), Self::Inconsistency(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            (Self::Csv(a), Self::Csv(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
