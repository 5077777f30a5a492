//! Core data models for the payroll export engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod pay_period;
mod payroll;
mod time_clock;
mod tips;

pub use employee::{
    Employee, TimesheetApproval, TimesheetStatus, UNKNOWN_EMPLOYEE_NAME, resolve_employee_name,
};
pub use pay_period::{PayPeriod, PayPeriodType, WeekGroup, format_period_label, parse_date};
pub use payroll::{EmployeeHoursSummary, EmployeeWeekHours, PayrollRow};
pub use time_clock::{TimeClockBreak, TimeClockEntry};
pub use tips::{TipEmployeeHours, WeeklyTipData};
