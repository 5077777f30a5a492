//! Employee roster and timesheet approval models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Display name used for hours whose employee id has no roster entry.
pub const UNKNOWN_EMPLOYEE_NAME: &str = "Unknown";

/// An employee on a tenant's roster, keyed by profile id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// The employee's profile id, as referenced by time clock entries.
    pub id: String,
    /// The name shown on schedules, tip sheets and payroll exports.
    pub display_name: String,
}

/// Finds the display name for an employee id, falling back to
/// [`UNKNOWN_EMPLOYEE_NAME`].
///
/// # Examples
///
/// ```
/// use payroll_export::models::{Employee, resolve_employee_name};
///
/// let roster = vec![Employee { id: "emp_001".to_string(), display_name: "Ana".to_string() }];
/// assert_eq!(resolve_employee_name(&roster, "emp_001"), "Ana");
/// assert_eq!(resolve_employee_name(&roster, "emp_999"), "Unknown");
/// ```
pub fn resolve_employee_name(roster: &[Employee], employee_id: &str) -> String {
    roster
        .iter()
        .find(|e| e.id == employee_id)
        .map(|e| e.display_name.clone())
        .unwrap_or_else(|| UNKNOWN_EMPLOYEE_NAME.to_string())
}

/// Review state of a submitted timesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimesheetStatus {
    /// Submitted and awaiting review.
    Pending,
    /// Approved by a manager; counts toward payroll.
    Approved,
    /// Rejected by a manager.
    Rejected,
}

/// A manager's decision on an employee's timesheet for a date range.
///
/// Approved records are the source of PTO hours in payroll exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimesheetApproval {
    /// The profile id of the employee the timesheet belongs to.
    pub employee_id: String,
    /// First day the timesheet covers (inclusive).
    pub period_start: NaiveDate,
    /// Last day the timesheet covers (inclusive).
    pub period_end: NaiveDate,
    /// Review state.
    pub status: TimesheetStatus,
    /// Paid time off hours recorded on the timesheet.
    #[serde(default)]
    pub pto_hours: Decimal,
}

impl TimesheetApproval {
    /// Returns true if the timesheet was approved.
    pub fn is_approved(&self) -> bool {
        self.status == TimesheetStatus::Approved
    }
}
