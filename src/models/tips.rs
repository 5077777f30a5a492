//! Weekly tip records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Cash and credit-card tips collected during one week at one location.
///
/// # Example
///
/// ```
/// use payroll_export::models::WeeklyTipData;
/// use rust_decimal::Decimal;
///
/// let week = WeeklyTipData {
///     week_key: "2025-01-06".to_string(),
///     cash_tips: Decimal::new(100, 0),
///     cc_tips: Decimal::new(100, 0),
/// };
/// assert_eq!(week.week_key, "2025-01-06");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyTipData {
    /// The Monday of the week, `YYYY-MM-DD`.
    pub week_key: String,
    /// Cash tips collected.
    #[serde(default)]
    pub cash_tips: Decimal,
    /// Credit-card tips collected, before the processing fee.
    #[serde(default)]
    pub cc_tips: Decimal,
}

/// Hours an employee on the tip roster worked in one week.
///
/// The tip roster has its own ids, separate from profile ids on time clock
/// entries. `employee_name` is the key used to join tips back to payroll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipEmployeeHours {
    /// The tip roster id.
    pub tip_employee_id: String,
    /// The display name on the tip roster.
    pub employee_name: String,
    /// The Monday of the week, `YYYY-MM-DD`.
    pub week_key: String,
    /// Hours worked that week.
    pub hours: Decimal,
}
