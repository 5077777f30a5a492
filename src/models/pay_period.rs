//! Pay period and week group models.
//!
//! This module contains the [`PayPeriod`], [`PayPeriodType`] and [`WeekGroup`]
//! types that define the date windows payroll is calculated over.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};

/// The recurring cycle a business runs payroll on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayPeriodType {
    /// Seven-day periods anchored to a configured date.
    Weekly,
    /// Fourteen-day periods anchored to a configured date.
    Biweekly,
    /// The 1st to the 15th, then the 16th to the end of the month.
    SemiMonthly,
    /// Full calendar months.
    Monthly,
}

impl PayPeriodType {
    /// Returns the fixed period length in days for anchored cycles.
    ///
    /// Calendar-based cycles (semi-monthly and monthly) return `None`.
    pub fn fixed_length_days(&self) -> Option<i64> {
        match self {
            PayPeriodType::Weekly => Some(7),
            PayPeriodType::Biweekly => Some(14),
            PayPeriodType::SemiMonthly | PayPeriodType::Monthly => None,
        }
    }
}

impl fmt::Display for PayPeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PayPeriodType::Weekly => "weekly",
            PayPeriodType::Biweekly => "biweekly",
            PayPeriodType::SemiMonthly => "semi_monthly",
            PayPeriodType::Monthly => "monthly",
        };
        f.write_str(name)
    }
}

impl FromStr for PayPeriodType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weekly" => Ok(PayPeriodType::Weekly),
            "biweekly" => Ok(PayPeriodType::Biweekly),
            "semi_monthly" => Ok(PayPeriodType::SemiMonthly),
            "monthly" => Ok(PayPeriodType::Monthly),
            other => Err(format!("unknown pay period type '{}'", other)),
        }
    }
}

/// Parses a `YYYY-MM-DD` date string.
///
/// # Example
///
/// ```
/// use payroll_export::models::parse_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(parse_date("2025-02-28").unwrap(), NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
/// assert!(parse_date("2025-02-30").is_err());
/// ```
pub fn parse_date(value: &str) -> PayrollResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| PayrollError::InvalidDate {
        value: value.to_string(),
    })
}

/// An inclusive date range that payroll is calculated over.
///
/// Periods are never mutated: the calculator recomputes them from a
/// reference date, a [`PayPeriodType`] and an anchor date.
///
/// # Example
///
/// ```
/// use payroll_export::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::parse("2025-01-06", "2025-01-19").unwrap();
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()));
/// assert_eq!(period.day_count(), 14);
/// assert_eq!(period.label, "Jan 6 - Jan 19, 2025");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The first day of the period (inclusive).
    pub start: NaiveDate,
    /// The last day of the period (inclusive).
    pub end: NaiveDate,
    /// A human-readable label such as "Jan 6 - Jan 19, 2025".
    pub label: String,
}

impl PayPeriod {
    /// Creates a period from its bounds, deriving the label.
    ///
    /// Returns [`PayrollError::InvalidPeriod`] if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> PayrollResult<Self> {
        if start > end {
            return Err(PayrollError::InvalidPeriod {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self {
            start,
            end,
            label: format_period_label(start, end),
        })
    }

    /// Creates a period from explicit `YYYY-MM-DD` strings.
    pub fn parse(start: &str, end: &str) -> PayrollResult<Self> {
        let start = parse_date(start)?;
        let end = parse_date(end)?;
        Self::new(start, end)
    }

    /// Checks if a given date falls within this pay period (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Returns the number of days in the period, counting both ends.
    pub fn day_count(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Iterates over every day in the period in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }

    /// Checks whether this period shares at least one day with `[start, end]`.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.end && end >= self.start
    }
}

/// Formats a period label.
///
/// Same-year ranges print the year once ("Jan 6 - Jan 19, 2025"); ranges
/// crossing a year boundary print both years.
pub fn format_period_label(start: NaiveDate, end: NaiveDate) -> String {
    if start.year() == end.year() {
        format!(
            "{} - {}, {}",
            start.format("%b %-d"),
            end.format("%b %-d"),
            end.year()
        )
    } else {
        format!("{} - {}", start.format("%b %-d, %Y"), end.format("%b %-d, %Y"))
    }
}

/// A Monday-start slice of a pay period's days.
///
/// Week groups are derived from a [`PayPeriod`] every time they are needed;
/// the first and last groups may be shorter than seven days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekGroup {
    /// Display label, e.g. "Week 1 (Jan 6 - Jan 12)".
    pub label: String,
    /// The days of the period that fall in this week, in order.
    pub days: Vec<NaiveDate>,
}

impl WeekGroup {
    /// Returns the Monday of the calendar week this group covers.
    ///
    /// Returns `None` for an empty group.
    pub fn monday(&self) -> Option<NaiveDate> {
        let first = self.days.first()?;
        let offset = u64::from(first.weekday().num_days_from_monday());
        first.checked_sub_days(Days::new(offset))
    }

    /// Returns the key weekly tip data is stored under: the week's Monday
    /// formatted as `YYYY-MM-DD`.
    pub fn week_key(&self) -> Option<String> {
        self.monday().map(|d| d.format("%Y-%m-%d").to_string())
    }

    /// Checks if the given date is one of this group's days.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.days.contains(&date)
    }
}
