//! Error types for the meal-break audit engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for the conditions that abort an audit run. Row-level problems such as an
//! unparsable timestamp never surface here; they are defaulted during
//! normalization.

use thiserror::Error;

/// The main error type for the meal-break audit engine.
///
/// # Example
///
/// ```
/// use meal_audit::error::AuditError;
///
/// let error = AuditError::MissingColumn {
///     column: "Time In".to_string(),
/// };
/// assert_eq!(error.to_string(), "Required column missing from input: Time In");
/// ```
#[derive(Debug, Error)]
pub enum AuditError {
    /// A column the normalizer depends on is absent from the whole input.
    #[error("Required column missing from input: {column}")]
    MissingColumn {
        /// The name of the missing column.
        column: String,
    },

    /// The delimited-text input could not be read.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// A description of the read failure.
        message: String,
    },

    /// Configuration file or directory was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A named rule-set profile was requested but never loaded.
    #[error("Rule profile not found: {name}")]
    ProfileNotFound {
        /// The requested profile name.
        name: String,
    },

    /// A rule parameter fell outside its permitted range.
    #[error("Invalid rule configuration '{field}': {message}")]
    InvalidRuleConfig {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// Rendering a result table as delimited text failed.
    #[error("Export error: {message}")]
    ExportError {
        /// A description of the writer failure.
        message: String,
    },
}

/// A type alias for Results that return AuditError.
pub type AuditResult<T> = Result<T, AuditError>;
