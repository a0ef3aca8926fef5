//! Error types for the HR engine.
//!
//! The calculators are total functions and never fail. Errors only arise
//! while loading policy configuration or validating requests before they
//! reach a calculator.

use thiserror::Error;

/// The main error type for the HR engine.
///
/// # Example
///
/// ```
/// use hr_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/policy.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/policy.yaml");
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

    /// Destination code was not found in the travel policy.
    #[error("Destination not found: {code}")]
    DestinationNotFound {
        /// The destination code that was not found.
        code: String,
    },

    /// Allowance or deduction template was not found.
    #[error("Pay component template not found: {code}")]
    TemplateNotFound {
        /// The template code that was not found.
        code: String,
    },

    /// A trip request was invalid.
    #[error("Invalid trip field '{field}': {message}")]
    InvalidTrip {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A compensation request was invalid.
    #[error("Invalid compensation field '{field}': {message}")]
    InvalidCompensation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
