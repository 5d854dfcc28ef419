//! Error types for bandwidth calculation
//!
//! Malformed channel and stream counts are clamped rather than reported, so the
//! only failures left are fields that cannot produce a finite result and preset
//! lookups that miss.

use thiserror::Error;

/// Errors produced by the calculator core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculatorError {
    /// A field value cannot produce a finite, meaningful metric
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// No preset carries the requested label
    #[error("Unknown preset: '{0}'")]
    UnknownPreset(String),
}

impl CalculatorError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending field, if the error is tied to one
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidInput { field, .. } => Some(*field),
            Self::UnknownPreset(_) => None,
        }
    }
}
