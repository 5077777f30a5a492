//! Request types for the payroll export API.
//!
//! The export and hours endpoints take an
//! [`ExportRequest`](crate::export::ExportRequest) JSON body. The period
//! endpoints take the query strings defined here.

use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::PayPeriodType;

/// Largest number of periods `/pay-periods/recent` will return.
pub const MAX_RECENT_PERIODS: usize = 52;

/// Calendar years accepted for query dates.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1..=9999;

fn default_recent_count() -> usize {
    6
}

fn check_year(field: &str, date: Option<NaiveDate>) -> Result<(), String> {
    match date {
        Some(d) if !SUPPORTED_YEARS.contains(&d.year()) => Err(format!(
            "{} must be between years {} and {}, got {}",
            field,
            SUPPORTED_YEARS.start(),
            SUPPORTED_YEARS.end(),
            d
        )),
        _ => Ok(()),
    }
}

/// Query for `GET /pay-periods/current`.
///
/// Omitted fields fall back to today's date and the configured pay period
/// layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeriodQuery {
    /// The date whose period should be returned.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Overrides the configured period type.
    #[serde(default)]
    pub period_type: Option<PayPeriodType>,
    /// Overrides the configured anchor date.
    #[serde(default)]
    pub anchor: Option<NaiveDate>,
}

impl PeriodQuery {
    /// Rejects dates too far out for period arithmetic.
    pub fn validate(&self) -> Result<(), String> {
        check_year("date", self.date)?;
        check_year("anchor", self.anchor)
    }
}

/// Query for `GET /pay-periods/recent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentPeriodsQuery {
    /// The date whose period is listed first.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// How many periods to list, newest first.
    #[serde(default = "default_recent_count")]
    pub count: usize,
}

impl RecentPeriodsQuery {
    /// Checks the date range and that `count` is within 1..=[`MAX_RECENT_PERIODS`].
    pub fn validate(&self) -> Result<(), String> {
        check_year("date", self.date)?;
        if self.count == 0 || self.count > MAX_RECENT_PERIODS {
            return Err(format!(
                "count must be between 1 and {}",
                MAX_RECENT_PERIODS
            ));
        }
        Ok(())
    }
}
