//! Calculation logic for the payroll export engine.
//!
//! This module contains the pure functions behind a payroll export: pay
//! period boundaries and week partitions, weekly hours aggregation with the
//! overtime split, tip pool distribution, and payroll row assembly and CSV
//! serialization.

mod hours;
mod pay_period;
mod payroll_export;
mod tip_pool;

pub use hours::{
    DEFAULT_WEEKLY_OVERTIME_THRESHOLD, aggregate_hours, entry_net_hours, split_weekly_overtime,
};
pub use pay_period::{
    get_pay_period, next_pay_period, previous_pay_period, recent_pay_periods, week_groups,
};
pub use payroll_export::{
    PAYROLL_CSV_HEADERS, approved_pto_hours, build_payroll_rows, export_file_name,
    payroll_rows_to_csv,
};
pub use tip_pool::{CC_FEE_RATE, calculate_tip_payouts, weekly_tip_pool};
