//! Aggregated hours and payroll row models.
//!
//! These are built fresh for every export and never persisted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One employee's hours for one week of a pay period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeWeekHours {
    /// The Monday of the week, `YYYY-MM-DD`.
    pub week_key: String,
    /// Net hours worked in the week.
    pub total_hours: Decimal,
    /// Hours up to the weekly overtime threshold.
    pub regular_hours: Decimal,
    /// Hours beyond the weekly overtime threshold.
    pub overtime_hours: Decimal,
}

/// One employee's hours across a pay period, split per week.
///
/// # Example
///
/// ```
/// use payroll_export::models::EmployeeHoursSummary;
/// use rust_decimal::Decimal;
///
/// let summary = EmployeeHoursSummary {
///     employee_id: "emp_001".to_string(),
///     employee_name: "Ana Lopez".to_string(),
///     weeks: vec![],
///     regular_hours: Decimal::new(80, 0),
///     overtime_hours: Decimal::new(10, 0),
/// };
/// assert_eq!(summary.total_hours(), Decimal::new(90, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeHoursSummary {
    /// The employee's profile id.
    pub employee_id: String,
    /// Roster display name, or "Unknown".
    pub employee_name: String,
    /// Per-week breakdown, in week order.
    pub weeks: Vec<EmployeeWeekHours>,
    /// Sum of weekly regular hours.
    pub regular_hours: Decimal,
    /// Sum of weekly overtime hours.
    pub overtime_hours: Decimal,
}

impl EmployeeHoursSummary {
    /// Returns regular plus overtime hours.
    pub fn total_hours(&self) -> Decimal {
        self.regular_hours + self.overtime_hours
    }
}

/// A single line of the payroll export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRow {
    /// The employee's display name.
    pub employee_name: String,
    /// Regular hours in the period.
    pub regular_hours: Decimal,
    /// Overtime hours in the period.
    pub overtime_hours: Decimal,
    /// Tip payout for the period.
    pub cash_tips: Decimal,
    /// Approved PTO hours for the period.
    pub pto_hours: Decimal,
}
