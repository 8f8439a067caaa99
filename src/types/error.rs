//! Error types for the penalty ledger engine
//!
//! This module defines all error types that can occur while loading reference
//! data, reading ledger exports and generating transaction lists.
//!
//! # Error Categories
//!
//! - **Fatal to a call**: missing configuration for the requested regime, token
//!   generation failure. The call returns no list at all.
//! - **Recoverable input errors**: malformed ledger rows. The row is skipped
//!   and processing continues.
//! - **Fatal to a run**: input file missing, reference data unreadable, output
//!   unwritable.
//!
//! Unknown subtypes or dunning text are never errors: they degrade to the
//! "other" category and a non-DCA flag.

use super::regime::Regime;
use thiserror::Error;

/// Failure reported by a [`crate::core::TokenGenerator`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TokenError {
    pub message: String,
}

impl TokenError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Main error type for the engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// The requested regime has no descriptor or allow-list section loaded
    #[error("No {what} configured for regime {regime}")]
    ConfigurationMissing {
        /// Regime the call was made for
        regime: Regime,
        /// Which piece of configuration is missing
        what: String,
    },

    /// The integrity stamper failed; any partially built list was discarded
    #[error("Token generation failed: {message}")]
    TokenGenerationFailed {
        /// Underlying cause reported by the generator
        message: String,
    },

    /// A regime identifier that is not one of the supported regimes
    #[error("Unknown regime '{value}'")]
    UnknownRegime { value: String },

    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError { message: String },

    /// CSV parsing error occurred
    ///
    /// Recoverable: the malformed row is skipped.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        message: String,
    },

    /// A ledger field could not be converted to its typed form
    #[error("Invalid {field} '{value}' for transaction '{reference}'")]
    InvalidField {
        field: String,
        value: String,
        reference: String,
    },

    /// A reference data file could not be loaded or failed validation
    #[error("Reference data error in {path}: {message}")]
    ReferenceData { path: String, message: String },

    /// Produced lists could not be written out
    #[error("Output error: {message}")]
    Output { message: String },
}

impl From<std::io::Error> for EngineError {
    fn from(error: std::io::Error) -> Self {
        EngineError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for EngineError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        EngineError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl From<csv_async::Error> for EngineError {
    fn from(error: csv_async::Error) -> Self {
        EngineError::ParseError {
            line: None,
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(error: serde_json::Error) -> Self {
        EngineError::Output {
            message: error.to_string(),
        }
    }
}

impl From<TokenError> for EngineError {
    fn from(error: TokenError) -> Self {
        EngineError::TokenGenerationFailed {
            message: error.message,
        }
    }
}

impl EngineError {
    /// Create a ConfigurationMissing error
    pub fn configuration_missing(regime: Regime, what: &str) -> Self {
        EngineError::ConfigurationMissing {
            regime,
            what: what.to_string(),
        }
    }

    /// Create an UnknownRegime error
    pub fn unknown_regime(value: &str) -> Self {
        EngineError::UnknownRegime {
            value: value.to_string(),
        }
    }

    /// Create an InvalidField error
    pub fn invalid_field(field: &str, value: &str, reference: &str) -> Self {
        EngineError::InvalidField {
            field: field.to_string(),
            value: value.to_string(),
            reference: reference.to_string(),
        }
    }

    /// Create a ReferenceData error
    pub fn reference_data(path: &str, message: impl Into<String>) -> Self {
        EngineError::ReferenceData {
            path: path.to_string(),
            message: message.into(),
        }
    }

    /// Create an Output error
    pub fn output(message: impl Into<String>) -> Self {
        EngineError::Output {
            message: message.into(),
        }
    }

    /// Whether the error aborts only the current call, leaving the run intact
    pub fn is_call_scoped(&self) -> bool {
        matches!(
            self,
            EngineError::ConfigurationMissing { .. }
                | EngineError::TokenGenerationFailed { .. }
                | EngineError::UnknownRegime { .. }
        )
    }
}
