//! Response types for the payroll export API.
//!
//! This module defines the JSON bodies returned by the period endpoints and
//! the error response structure shared by every endpoint.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::PayrollError;
use crate::models::{PayPeriod, PayPeriodType, WeekGroup};

/// A week group as returned by the API, with its tip week key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekGroupResponse {
    /// Display label, e.g. "Week 1 (Jan 6 - Jan 12)".
    pub label: String,
    /// The Monday of the week, `YYYY-MM-DD`.
    pub week_key: Option<String>,
    /// Days of the period in this week.
    pub days: Vec<NaiveDate>,
}

impl From<WeekGroup> for WeekGroupResponse {
    fn from(group: WeekGroup) -> Self {
        Self {
            week_key: group.week_key(),
            label: group.label,
            days: group.days,
        }
    }
}

/// A pay period with its week breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodResponse {
    /// The period's bounds and label.
    #[serde(flatten)]
    pub period: PayPeriod,
    /// The cycle the period was computed for.
    pub period_type: PayPeriodType,
    /// Monday-start week groups.
    pub weeks: Vec<WeekGroupResponse>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying the given error.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<PayrollError> for ApiErrorResponse {
    fn from(error: PayrollError) -> Self {
        let message = error.to_string();
        match error {
            PayrollError::ConfigNotFound { .. } | PayrollError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
            PayrollError::InvalidDate { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_DATE", message))
            }
            PayrollError::InvalidPeriod { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_PERIOD", message))
            }
            PayrollError::InvalidEntry { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_ENTRY", message))
            }
            PayrollError::NoEmployeeHours => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "NO_EMPLOYEE_HOURS",
                    message,
                    "Only employees with recorded hours are exported",
                ),
            },
            PayrollError::TipDataUnavailable { .. } => ApiErrorResponse {
                status: StatusCode::BAD_GATEWAY,
                error: ApiError::new("TIP_DATA_UNAVAILABLE", message),
            },
            PayrollError::CsvError { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("EXPORT_ERROR", "Export failed", message),
            },
        }
    }
}
