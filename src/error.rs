//! Error types for the payroll export engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing pay periods,
//! aggregating hours and building payroll exports.

use thiserror::Error;

/// The main error type for the payroll export engine.
///
/// Every failure is scoped to a single operation (one export, one config
/// load); none of them are fatal to the process.
///
/// # Example
///
/// ```
/// use payroll_export::error::PayrollError;
///
/// let error = PayrollError::ConfigNotFound {
///     path: "/missing/payroll.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/payroll.yaml");
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or held invalid values.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A date string was not a valid `YYYY-MM-DD` date.
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate {
        /// The rejected input.
        value: String,
    },

    /// A pay period's start date falls after its end date.
    #[error("Invalid pay period: start {start} is after end {end}")]
    InvalidPeriod {
        /// The requested start date.
        start: String,
        /// The requested end date.
        end: String,
    },

    /// A time clock entry was invalid or contained inconsistent data.
    #[error("Invalid time clock entry '{entry_id}': {message}")]
    InvalidEntry {
        /// The ID of the invalid entry.
        entry_id: String,
        /// A description of what made the entry invalid.
        message: String,
    },

    /// No employee had any recorded hours in the export period.
    #[error("No employee hours found for this pay period")]
    NoEmployeeHours,

    /// Weekly tip data or tip hours could not be fetched.
    #[error("Tip data unavailable: {message}")]
    TipDataUnavailable {
        /// The upstream error message.
        message: String,
    },

    /// The CSV writer failed.
    #[error("CSV error: {message}")]
    CsvError {
        /// A description of the CSV failure.
        message: String,
    },
}

impl From<csv::Error> for PayrollError {
    fn from(error: csv::Error) -> Self {
        PayrollError::CsvError {
            message: error.to_string(),
        }
    }
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;
