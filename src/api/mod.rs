//! HTTP API module for the payroll export engine.
//!
//! This module provides the REST endpoints for looking up pay periods,
//! previewing weekly hours and downloading payroll CSV exports.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{MAX_RECENT_PERIODS, PeriodQuery, RecentPeriodsQuery, SUPPORTED_YEARS};
pub use response::{ApiError, ApiErrorResponse, PeriodResponse, WeekGroupResponse};
pub use state::AppState;
