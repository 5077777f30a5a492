//! Weekly hours aggregation and overtime split.
//!
//! Closed time clock entries are grouped by employee and by the week group
//! containing the local date of `clock_in`. Each week is split into regular
//! and overtime hours on its own, so overtime never carries across weeks of
//! a multi-week pay period.

use std::collections::BTreeMap;

use chrono::FixedOffset;
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{
    Employee, EmployeeHoursSummary, EmployeeWeekHours, TimeClockEntry, WeekGroup,
    resolve_employee_name,
};

/// Default weekly overtime threshold in hours.
pub const DEFAULT_WEEKLY_OVERTIME_THRESHOLD: Decimal = Decimal::from_parts(40, 0, 0, false, 0);

const SECONDS_PER_HOUR: Decimal = Decimal::from_parts(3600, 0, 0, false, 0);

/// Returns the net hours worked on a closed entry.
///
/// Net hours are the clock-in to clock-out span minus the duration of every
/// closed break. Open breaks are ignored. Active entries return `None`. The
/// result never goes below zero.
///
/// # Examples
///
/// ```
/// use payroll_export::calculation::entry_net_hours;
/// use payroll_export::models::{TimeClockBreak, TimeClockEntry};
/// use rust_decimal::Decimal;
///
/// let entry = TimeClockEntry {
///     id: "entry_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     clock_in: "2025-01-06T09:00:00Z".parse().unwrap(),
///     clock_out: Some("2025-01-06T17:30:00Z".parse().unwrap()),
///     breaks: vec![TimeClockBreak {
///         id: "brk_001".to_string(),
///         entry_id: "entry_001".to_string(),
///         break_start: "2025-01-06T12:00:00Z".parse().unwrap(),
///         break_end: Some("2025-01-06T12:30:00Z".parse().unwrap()),
///     }],
/// };
/// assert_eq!(entry_net_hours(&entry), Some(Decimal::new(8, 0)));
/// ```
pub fn entry_net_hours(entry: &TimeClockEntry) -> Option<Decimal> {
    let clock_out = entry.clock_out?;
    let worked_seconds = (clock_out - entry.clock_in).num_seconds();

    let break_seconds: i64 = entry
        .breaks
        .iter()
        .filter_map(|b| b.duration())
        .map(|d| d.num_seconds())
        .sum();

    let net_seconds = (worked_seconds - break_seconds).max(0);
    Some(Decimal::from(net_seconds) / SECONDS_PER_HOUR)
}

/// Splits one week's hours into `(regular, overtime)`.
///
/// Hours up to and including `threshold` are regular; anything beyond is
/// overtime.
///
/// # Examples
///
/// ```
/// use payroll_export::calculation::{split_weekly_overtime, DEFAULT_WEEKLY_OVERTIME_THRESHOLD};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let (regular, overtime) =
///     split_weekly_overtime(Decimal::from_str("45.5").unwrap(), DEFAULT_WEEKLY_OVERTIME_THRESHOLD);
/// assert_eq!(regular, Decimal::new(40, 0));
/// assert_eq!(overtime, Decimal::from_str("5.5").unwrap());
/// ```
pub fn split_weekly_overtime(total: Decimal, threshold: Decimal) -> (Decimal, Decimal) {
    if total > threshold {
        (threshold, total - threshold)
    } else {
        (total, Decimal::ZERO)
    }
}

/// Aggregates closed entries into per-employee, per-week hours.
///
/// Each entry is attributed entirely to the week group containing the local
/// date of its `clock_in` under `offset`, even when the shift runs past
/// midnight. Active entries, entries outside every week group, and entries
/// with no net hours are skipped. Employee ids missing from `roster` are
/// named "Unknown" so their hours still reach payroll.
///
/// The result is ordered by employee id; weeks follow `weeks` order.
pub fn aggregate_hours(
    entries: &[TimeClockEntry],
    weeks: &[WeekGroup],
    roster: &[Employee],
    offset: &FixedOffset,
    threshold: Decimal,
) -> Vec<EmployeeHoursSummary> {
    // employee id -> week index -> net hours
    let mut totals: BTreeMap<&str, BTreeMap<usize, Decimal>> = BTreeMap::new();

    for entry in entries {
        let Some(net_hours) = entry_net_hours(entry) else {
            debug!(entry_id = %entry.id, "Skipping active time clock entry");
            continue;
        };
        if net_hours <= Decimal::ZERO {
            continue;
        }

        let local_date = entry.local_clock_in_date(offset);
        let Some(week_index) = weeks.iter().position(|w| w.contains_date(local_date)) else {
            continue;
        };

        *totals
            .entry(entry.employee_id.as_str())
            .or_default()
            .entry(week_index)
            .or_default() += net_hours;
    }

    totals
        .into_iter()
        .map(|(employee_id, by_week)| {
            let week_hours: Vec<EmployeeWeekHours> = by_week
                .into_iter()
                .map(|(week_index, total_hours)| {
                    let (regular_hours, overtime_hours) =
                        split_weekly_overtime(total_hours, threshold);
                    EmployeeWeekHours {
                        week_key: weeks[week_index].week_key().unwrap_or_default(),
                        total_hours,
                        regular_hours,
                        overtime_hours,
                    }
                })
                .collect();

            let regular_hours = week_hours.iter().map(|w| w.regular_hours).sum();
            let overtime_hours = week_hours.iter().map(|w| w.overtime_hours).sum();

            EmployeeHoursSummary {
                employee_id: employee_id.to_string(),
                employee_name: resolve_employee_name(roster, employee_id),
                weeks: week_hours,
                regular_hours,
                overtime_hours,
            }
        })
        .collect()
}
