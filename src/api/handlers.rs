//! HTTP request handlers for the payroll export API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{get_pay_period, recent_pay_periods, week_groups};
use crate::error::PayrollError;
use crate::export::ExportRequest;
use crate::models::{PayPeriod, PayPeriodType};
use crate::tips::TipDataSource;

use super::request::{PeriodQuery, RecentPeriodsQuery};
use super::response::{ApiError, ApiErrorResponse, PeriodResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router<S: TipDataSource + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/pay-periods/current", get(current_period_handler::<S>))
        .route("/pay-periods/recent", get(recent_periods_handler::<S>))
        .route("/payroll/hours", post(hours_handler::<S>))
        .route("/payroll/export", post(export_handler::<S>))
        .with_state(state)
}

/// Handler for GET /pay-periods/current.
async fn current_period_handler<S: TipDataSource + 'static>(
    State(state): State<AppState<S>>,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(q)) => q,
        Err(rejection) => return query_rejection_response(rejection),
    };
    if let Err(message) = query.validate() {
        return invalid_query_response(message);
    }

    let config = &state.exporter().config().pay_period;
    let period_type = query.period_type.unwrap_or(config.period_type);
    let anchor = query.anchor.unwrap_or(config.anchor_date);
    let reference = query.date.unwrap_or_else(|| today(&state));

    let period = get_pay_period(reference, period_type, anchor);
    (StatusCode::OK, Json(period_response(period, period_type))).into_response()
}

/// Handler for GET /pay-periods/recent.
async fn recent_periods_handler<S: TipDataSource + 'static>(
    State(state): State<AppState<S>>,
    query: Result<Query<RecentPeriodsQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(q)) => q,
        Err(rejection) => return query_rejection_response(rejection),
    };

    if let Err(message) = query.validate() {
        return invalid_query_response(message);
    }

    let config = &state.exporter().config().pay_period;
    let reference = query.date.unwrap_or_else(|| today(&state));
    let periods: Vec<PeriodResponse> =
        recent_pay_periods(reference, config.period_type, config.anchor_date, query.count)
            .into_iter()
            .map(|p| period_response(p, config.period_type))
            .collect();

    (StatusCode::OK, Json(periods)).into_response()
}

/// Handler for POST /payroll/hours.
///
/// Returns the per-employee weekly hours breakdown without building an
/// export.
async fn hours_handler<S: TipDataSource + 'static>(
    State(state): State<AppState<S>>,
    payload: Result<Json<ExportRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(rejection, correlation_id),
    };

    match state.exporter().hours_summary(&request) {
        Ok(summary) => {
            info!(
                correlation_id = %correlation_id,
                tenant_id = %request.tenant_id,
                employees = summary.len(),
                "Hours summary computed"
            );
            (StatusCode::OK, Json(summary)).into_response()
        }
        Err(err) => payroll_error_response(err, correlation_id),
    }
}

/// Handler for POST /payroll/export.
///
/// Responds with the CSV document as a file download.
async fn export_handler<S: TipDataSource + 'static>(
    State(state): State<AppState<S>>,
    payload: Result<Json<ExportRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll export request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(rejection, correlation_id),
    };

    match state.exporter().export(&request).await {
        Ok(export) => {
            info!(
                correlation_id = %correlation_id,
                tenant_id = %request.tenant_id,
                file_name = %export.file_name,
                rows = export.rows.len(),
                "Payroll export completed"
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", export.file_name),
                    ),
                ],
                export.csv,
            )
                .into_response()
        }
        Err(err) => payroll_error_response(err, correlation_id),
    }
}

fn today<S: TipDataSource>(state: &AppState<S>) -> NaiveDate {
    let offset = state.exporter().config().locale.utc_offset();
    Utc::now().with_timezone(&offset).date_naive()
}

fn period_response(period: PayPeriod, period_type: PayPeriodType) -> PeriodResponse {
    let weeks = week_groups(&period).into_iter().map(Into::into).collect();
    PeriodResponse {
        period,
        period_type,
        weeks,
    }
}

fn payroll_error_response(err: PayrollError, correlation_id: Uuid) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Payroll request failed"
    );
    ApiErrorResponse::from(err).into_response()
}

fn query_rejection_response(rejection: QueryRejection) -> Response {
    warn!(error = %rejection.body_text(), "Invalid query string");
    ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text())).into_response()
}

fn invalid_query_response(message: String) -> Response {
    warn!(error = %message, "Query parameter out of range");
    ApiErrorResponse::bad_request(ApiError::validation_error(message)).into_response()
}

fn json_rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}
