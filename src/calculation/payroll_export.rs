//! Payroll row assembly and CSV serialization.
//!
//! Hours, tip payouts and approved PTO are merged into one [`PayrollRow`]
//! per employee who worked in the period. Payroll is hours-driven: an
//! employee with tips or PTO but no recorded hours gets no row.

use std::collections::{BTreeMap, HashMap};

use csv::{QuoteStyle, WriterBuilder};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{PayrollError, PayrollResult};
use crate::models::{EmployeeHoursSummary, PayPeriod, PayrollRow, TimesheetApproval};

/// Column headers of the payroll CSV, in order.
pub const PAYROLL_CSV_HEADERS: [&str; 5] = [
    "Employee",
    "Regular Hours",
    "Overtime Hours",
    "Cash Tips",
    "PTO Hours",
];

/// Sums PTO hours from approved timesheets overlapping `period`, keyed by
/// employee profile id.
pub fn approved_pto_hours(
    approvals: &[TimesheetApproval],
    period: &PayPeriod,
) -> HashMap<String, Decimal> {
    let mut pto: HashMap<String, Decimal> = HashMap::new();
    for approval in approvals
        .iter()
        .filter(|a| a.is_approved())
        .filter(|a| period.overlaps(a.period_start, a.period_end))
    {
        *pto.entry(approval.employee_id.clone()).or_default() += approval.pto_hours;
    }
    pto
}

/// Builds the payroll rows for a period.
///
/// Only employees with recorded hours produce a row. Tips are looked up by
/// display name and PTO by employee id; anything missing is zero. Rows are
/// sorted by name, then by employee id.
///
/// Returns [`PayrollError::NoEmployeeHours`] when no row can be built.
pub fn build_payroll_rows(
    hours: &[EmployeeHoursSummary],
    tips: &BTreeMap<String, Decimal>,
    pto: &HashMap<String, Decimal>,
) -> PayrollResult<Vec<PayrollRow>> {
    let mut keyed: Vec<(&str, PayrollRow)> = hours
        .iter()
        .filter(|summary| summary.total_hours() > Decimal::ZERO)
        .map(|summary| {
            let row = PayrollRow {
                employee_name: summary.employee_name.clone(),
                regular_hours: summary.regular_hours,
                overtime_hours: summary.overtime_hours,
                cash_tips: tips
                    .get(&summary.employee_name)
                    .copied()
                    .unwrap_or(Decimal::ZERO),
                pto_hours: pto
                    .get(&summary.employee_id)
                    .copied()
                    .unwrap_or(Decimal::ZERO),
            };
            (summary.employee_id.as_str(), row)
        })
        .collect();

    if keyed.is_empty() {
        return Err(PayrollError::NoEmployeeHours);
    }

    keyed.sort_by(|(a_id, a), (b_id, b)| {
        a.employee_name
            .cmp(&b.employee_name)
            .then_with(|| a_id.cmp(b_id))
    });

    Ok(keyed.into_iter().map(|(_, row)| row).collect())
}

/// Returns the download file name for a period's export.
///
/// # Examples
///
/// ```
/// use payroll_export::calculation::export_file_name;
/// use payroll_export::models::PayPeriod;
///
/// let period = PayPeriod::parse("2025-01-06", "2025-01-19").unwrap();
/// assert_eq!(export_file_name(&period), "gusto_payroll_2025-01-06_2025-01-19.csv");
/// ```
pub fn export_file_name(period: &PayPeriod) -> String {
    format!(
        "gusto_payroll_{}_{}.csv",
        period.start.format("%Y-%m-%d"),
        period.end.format("%Y-%m-%d")
    )
}

/// Serializes rows to CSV.
///
/// Headers and names are always quoted, even when a name looks like a
/// number; numbers are written unquoted with two decimal places.
///
/// # Examples
///
/// ```
/// use payroll_export::calculation::payroll_rows_to_csv;
/// use payroll_export::models::PayrollRow;
/// use rust_decimal::Decimal;
///
/// let rows = vec![PayrollRow {
///     employee_name: "Ana Lopez".to_string(),
///     regular_hours: Decimal::new(40, 0),
///     overtime_hours: Decimal::new(25, 1),
///     cash_tips: Decimal::new(4925, 2),
///     pto_hours: Decimal::ZERO,
/// }];
///
/// let csv = payroll_rows_to_csv(&rows).unwrap();
/// let mut lines = csv.lines();
/// assert_eq!(
///     lines.next(),
///     Some("\"Employee\",\"Regular Hours\",\"Overtime Hours\",\"Cash Tips\",\"PTO Hours\"")
/// );
/// assert_eq!(lines.next(), Some("\"Ana Lopez\",40.00,2.50,49.25,0.00"));
/// ```
pub fn payroll_rows_to_csv(rows: &[PayrollRow]) -> PayrollResult<String> {
    // Quoting is done per column, so the writer must not add its own.
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .from_writer(Vec::new());

    writer.write_record(PAYROLL_CSV_HEADERS.map(quote_field))?;
    for row in rows {
        writer.write_record([
            quote_field(&row.employee_name),
            format_amount(row.regular_hours),
            format_amount(row.overtime_hours),
            format_amount(row.cash_tips),
            format_amount(row.pto_hours),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| PayrollError::CsvError {
            message: e.to_string(),
        })?;
    String::from_utf8(bytes).map_err(|e| PayrollError::CsvError {
        message: e.to_string(),
    })
}

fn quote_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Rounds half away from zero and prints exactly two decimal places.
fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}
