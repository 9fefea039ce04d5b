//! Error types for the salon payroll engine.
//!
//! The calculation core is infallible over its data: missing cells become
//! zero and absent grids become empty rosters. The errors here cover the
//! surrounding concerns, namely loading configuration, resolving which
//! worksheet to calculate from, and validating caller parameters.

use thiserror::Error;

/// The main error type for the salon payroll engine.
///
/// # Example
///
/// ```
/// use salon_payroll::error::EngineError;
///
/// let error = EngineError::SheetNotFound {
///     name: "202506".to_string(),
/// };
/// assert_eq!(error.to_string(), "Worksheet not found: 202506");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
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

    /// Configuration parsed but violates a structural rule.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// What was wrong with the configuration.
        message: String,
    },

    /// The caller asked for a worksheet that the workbook does not contain.
    #[error("Worksheet not found: {name}")]
    SheetNotFound {
        /// The requested worksheet name.
        name: String,
    },

    /// No worksheet was requested and none has a numeric name.
    #[error("No payroll worksheet found: no sheet has a numeric name")]
    NoPayrollSheet,

    /// A caller-supplied parameter was out of range.
    #[error("Invalid parameter '{field}': {message}")]
    InvalidParameter {
        /// The offending parameter.
        field: String,
        /// Why it was rejected.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
