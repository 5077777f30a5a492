//! Time clock entry model and related types.
//!
//! This module defines the [`TimeClockEntry`] and [`TimeClockBreak`] structs
//! recorded when employees clock in, take breaks, and clock out.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};

/// A break taken during a time clock entry.
///
/// A break with no `break_end` is still open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeClockBreak {
    /// Unique identifier for the break.
    pub id: String,
    /// The entry this break belongs to.
    pub entry_id: String,
    /// When the break started.
    pub break_start: DateTime<Utc>,
    /// When the break ended, if it has.
    #[serde(default)]
    pub break_end: Option<DateTime<Utc>>,
}

impl TimeClockBreak {
    /// Returns true if the break has not been ended yet.
    pub fn is_open(&self) -> bool {
        self.break_end.is_none()
    }

    /// Returns the duration of a closed break, or `None` while it is open.
    pub fn duration(&self) -> Option<TimeDelta> {
        self.break_end.map(|end| end - self.break_start)
    }
}

/// A single clock-in/clock-out record for an employee.
///
/// Entries are created on clock-in and closed on clock-out. An entry with
/// no `clock_out` is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeClockEntry {
    /// Unique identifier for the entry.
    pub id: String,
    /// The profile id of the employee who clocked in.
    pub employee_id: String,
    /// When the employee clocked in.
    pub clock_in: DateTime<Utc>,
    /// When the employee clocked out, if they have.
    #[serde(default)]
    pub clock_out: Option<DateTime<Utc>>,
    /// Breaks taken during this entry.
    #[serde(default)]
    pub breaks: Vec<TimeClockBreak>,
}

impl TimeClockEntry {
    /// Returns true if the employee is still clocked in.
    pub fn is_active(&self) -> bool {
        self.clock_out.is_none()
    }

    /// Returns true if any break on this entry is still open.
    ///
    /// Clock-out is blocked while this holds.
    pub fn has_open_break(&self) -> bool {
        self.breaks.iter().any(TimeClockBreak::is_open)
    }

    /// Rejects entries whose timestamps run backwards.
    ///
    /// A clock-out before clock-in, or a closed break that ends before it
    /// starts, is an [`PayrollError::InvalidEntry`].
    pub fn validate(&self) -> PayrollResult<()> {
        if self.clock_out.is_some_and(|out| out < self.clock_in) {
            return Err(PayrollError::InvalidEntry {
                entry_id: self.id.clone(),
                message: "clock out is before clock in".to_string(),
            });
        }
        for b in &self.breaks {
            if b.break_end.is_some_and(|end| end < b.break_start) {
                return Err(PayrollError::InvalidEntry {
                    entry_id: self.id.clone(),
                    message: format!("break '{}' ends before it starts", b.id),
                });
            }
        }
        Ok(())
    }

    /// Returns the calendar date of `clock_in` in the given local offset.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_export::models::TimeClockEntry;
    /// use chrono::{FixedOffset, NaiveDate};
    ///
    /// let entry = TimeClockEntry {
    ///     id: "entry_001".to_string(),
    ///     employee_id: "emp_001".to_string(),
    ///     clock_in: "2025-01-07T02:00:00Z".parse().unwrap(),
    ///     clock_out: None,
    ///     breaks: vec![],
    /// };
    ///
    /// // 02:00 UTC is still the evening of the 6th five hours west of UTC
    /// let eastern = FixedOffset::west_opt(5 * 3600).unwrap();
    /// assert_eq!(entry.local_clock_in_date(&eastern), NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
    /// ```
    pub fn local_clock_in_date(&self, offset: &FixedOffset) -> NaiveDate {
        self.clock_in.with_timezone(offset).date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn make_break(start: &str, end: Option<&str>) -> TimeClockBreak {
        TimeClockBreak {
            id: "brk_001".to_string(),
            entry_id: "entry_001".to_string(),
            break_start: ts(start),
            break_end: end.map(ts),
        }
    }

    #[test]
    fn test_active_entry() {
        let entry = TimeClockEntry {
            id: "entry_001".to_string(),
            employee_id: "emp_001".to_string(),
            clock_in: ts("2025-01-06T09:00:00Z"),
            clock_out: None,
            breaks: vec![],
        };
        assert!(entry.is_active());
        assert!(!entry.has_open_break());
    }

    #[test]
    fn test_open_break_detected() {
        let entry = TimeClockEntry {
            id: "entry_001".to_string(),
            employee_id: "emp_001".to_string(),
            clock_in: ts("2025-01-06T09:00:00Z"),
            clock_out: None,
            breaks: vec![
                make_break("2025-01-06T11:00:00Z", Some("2025-01-06T11:15:00Z")),
                make_break("2025-01-06T13:00:00Z", None),
            ],
        };
        assert!(entry.has_open_break());
    }

    #[test]
    fn test_break_duration() {
        let closed = make_break("2025-01-06T12:00:00Z", Some("2025-01-06T12:30:00Z"));
        assert_eq!(closed.duration(), Some(TimeDelta::minutes(30)));

        let open = make_break("2025-01-06T12:00:00Z", None);
        assert!(open.is_open());
        assert_eq!(open.duration(), None);
    }

    #[test]
    fn test_validate_rejects_clock_out_before_clock_in() {
        let entry = TimeClockEntry {
            id: "entry_001".to_string(),
            employee_id: "emp_001".to_string(),
            clock_in: ts("2025-01-06T17:00:00Z"),
            clock_out: Some(ts("2025-01-06T09:00:00Z")),
            breaks: vec![],
        };
        assert!(matches!(
            entry.validate(),
            Err(PayrollError::InvalidEntry { entry_id, .. }) if entry_id == "entry_001"
        ));
    }

    #[test]
    fn test_validate_rejects_backwards_break() {
        let entry = TimeClockEntry {
            id: "entry_001".to_string(),
            employee_id: "emp_001".to_string(),
            clock_in: ts("2025-01-06T09:00:00Z"),
            clock_out: Some(ts("2025-01-06T17:00:00Z")),
            breaks: vec![make_break("2025-01-06T12:30:00Z", Some("2025-01-06T12:00:00Z"))],
        };
        let err = entry.validate().unwrap_err();
        assert!(err.to_string().contains("ends before it starts"));
    }

    #[test]
    fn test_validate_accepts_active_entry_with_open_break() {
        let entry = TimeClockEntry {
            id: "entry_001".to_string(),
            employee_id: "emp_001".to_string(),
            clock_in: ts("2025-01-06T09:00:00Z"),
            clock_out: None,
            breaks: vec![make_break("2025-01-06T12:00:00Z", None)],
        };
        assert!(entry.validate().is_ok());
    }

    #[test]
    fn test_local_date_in_utc() {
        let entry = TimeClockEntry {
            id: "entry_001".to_string(),
            employee_id: "emp_001".to_string(),
            clock_in: ts("2025-01-06T23:30:00Z"),
            clock_out: Some(ts("2025-01-07T07:30:00Z")),
            breaks: vec![],
        };
        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(
            entry.local_clock_in_date(&utc),
            NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
        );
    }

    #[test]
    fn test_entry_deserialization() {
        let json = r#"{
            "id": "entry_001",
            "employee_id": "emp_001",
            "clock_in": "2025-01-06T09:00:00Z",
            "clock_out": "2025-01-06T17:00:00Z",
            "breaks": [
                {
                    "id": "brk_001",
                    "entry_id": "entry_001",
                    "break_start": "2025-01-06T12:00:00Z",
                    "break_end": null
                }
            ]
        }"#;

        let entry: TimeClockEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, "entry_001");
        assert!(!entry.is_active());
        assert_eq!(entry.breaks.len(), 1);
        assert!(entry.breaks[0].is_open());
    }

    #[test]
    fn test_entry_without_clock_out_or_breaks_fields() {
        let json = r#"{
            "id": "entry_002",
            "employee_id": "emp_002",
            "clock_in": "2025-01-06T09:00:00Z"
        }"#;

        let entry: TimeClockEntry = serde_json::from_str(json).unwrap();
        assert!(entry.is_active());
        assert!(entry.breaks.is_empty());
    }
}
