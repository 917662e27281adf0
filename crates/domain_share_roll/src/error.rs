//! Share roll domain errors

use core_kernel::CoreError;
use thiserror::Error;

/// Errors that can occur in the share roll domain
#[derive(Debug, Error)]
pub enum ShareRollError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    #[error("Export error: {0}")]
    Export(String),
}

impl ShareRollError {
    pub fn validation(message: impl Into<String>) -> Self {
        ShareRollError::Validation(message.into())
    }

    pub fn overflow(message: impl Into<String>) -> Self {
        ShareRollError::Overflow(message.into())
    }

    /// Returns true if the error was caused by caller-supplied input
    ///
    /// Overflow counts: it only arises from input values too large or too
    /// small to carry through the calculation.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ShareRollError::Validation(_)
                | ShareRollError::Overflow(_)
                | ShareRollError::Core(CoreError::Validation(_))
                | ShareRollError::Core(CoreError::InvalidMonth(_))
        )
    }
}

impl From<csv::Error> for ShareRollError {
    fn from(err: csv::Error) -> Self {
        ShareRollError::Export(err.to_string())
    }
}
