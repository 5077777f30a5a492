//! Pay period boundary computation.
//!
//! Periods are pure functions of a reference date, a [`PayPeriodType`] and
//! an anchor date. Adjacent periods are always found by stepping one day
//! past a boundary and recomputing, so periods never drift, overlap or leave
//! gaps.

use chrono::{Datelike, Days, Months, NaiveDate, TimeDelta, Weekday};

use crate::models::{PayPeriod, PayPeriodType, WeekGroup, format_period_label};

/// Returns the pay period containing `reference`.
///
/// Weekly and biweekly periods are counted in whole period lengths from
/// `anchor`, using floored division so dates before the anchor resolve to
/// the correct earlier period. Semi-monthly periods run from the 1st to the
/// 15th and from the 16th to the last day of the month; monthly periods are
/// calendar months. The anchor is ignored for calendar-based types.
///
/// # Examples
///
/// ```
/// use payroll_export::calculation::get_pay_period;
/// use payroll_export::models::PayPeriodType;
/// use chrono::NaiveDate;
///
/// let anchor = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
/// let reference = NaiveDate::from_ymd_opt(2025, 1, 22).unwrap();
///
/// let period = get_pay_period(reference, PayPeriodType::Biweekly, anchor);
/// assert_eq!(period.start, NaiveDate::from_ymd_opt(2025, 1, 20).unwrap());
/// assert_eq!(period.end, NaiveDate::from_ymd_opt(2025, 2, 2).unwrap());
/// ```
pub fn get_pay_period(
    reference: NaiveDate,
    period_type: PayPeriodType,
    anchor: NaiveDate,
) -> PayPeriod {
    let (start, end) = match (period_type, period_type.fixed_length_days()) {
        (_, Some(length)) => anchored_bounds(reference, anchor, length),
        (PayPeriodType::SemiMonthly, None) => semi_monthly_bounds(reference),
        (_, None) => {
            let first = first_of_month(reference);
            (first, last_of_month(first))
        }
    };

    PayPeriod {
        start,
        end,
        label: format_period_label(start, end),
    }
}

/// Returns the period immediately after `period`.
pub fn next_pay_period(
    period: &PayPeriod,
    period_type: PayPeriodType,
    anchor: NaiveDate,
) -> PayPeriod {
    get_pay_period(period.end + Days::new(1), period_type, anchor)
}

/// Returns the period immediately before `period`.
pub fn previous_pay_period(
    period: &PayPeriod,
    period_type: PayPeriodType,
    anchor: NaiveDate,
) -> PayPeriod {
    get_pay_period(period.start - Days::new(1), period_type, anchor)
}

/// Returns the period containing `reference` followed by earlier periods,
/// newest first, `count` periods in total.
pub fn recent_pay_periods(
    reference: NaiveDate,
    period_type: PayPeriodType,
    anchor: NaiveDate,
    count: usize,
) -> Vec<PayPeriod> {
    if count == 0 {
        return Vec::new();
    }

    let mut periods = Vec::with_capacity(count);
    let mut current = get_pay_period(reference, period_type, anchor);
    // Only step back for periods that will be returned.
    while periods.len() + 1 < count {
        let previous = previous_pay_period(&current, period_type, anchor);
        periods.push(current);
        current = previous;
    }
    periods.push(current);
    periods
}

/// Splits a period into Monday-start week groups.
///
/// The first group runs from the period start to the first Sunday, the last
/// is cut off at the period end, and every group in between is a full
/// Monday to Sunday week.
///
/// # Examples
///
/// ```
/// use payroll_export::calculation::week_groups;
/// use payroll_export::models::PayPeriod;
///
/// // Wednesday Jan 1 to Tuesday Jan 14
/// let period = PayPeriod::parse("2025-01-01", "2025-01-14").unwrap();
/// let weeks = week_groups(&period);
///
/// assert_eq!(weeks.len(), 3);
/// assert_eq!(weeks[0].days.len(), 5); // Wed..Sun
/// assert_eq!(weeks[1].days.len(), 7);
/// assert_eq!(weeks[2].days.len(), 2); // Mon, Tue
/// assert_eq!(weeks[1].label, "Week 2 (Jan 6 - Jan 12)");
/// ```
pub fn week_groups(period: &PayPeriod) -> Vec<WeekGroup> {
    let mut groups: Vec<Vec<NaiveDate>> = Vec::new();

    for day in period.days() {
        match groups.last_mut() {
            Some(current) if day.weekday() != Weekday::Mon => current.push(day),
            _ => groups.push(vec![day]),
        }
    }

    groups
        .into_iter()
        .enumerate()
        .filter_map(|(index, days)| {
            let first = *days.first()?;
            let last = *days.last()?;
            Some(WeekGroup {
                label: format!(
                    "Week {} ({} - {})",
                    index + 1,
                    first.format("%b %-d"),
                    last.format("%b %-d")
                ),
                days,
            })
        })
        .collect()
}

/// Bounds of the fixed-length period containing `reference`.
fn anchored_bounds(reference: NaiveDate, anchor: NaiveDate, length: i64) -> (NaiveDate, NaiveDate) {
    let offset_days = (reference - anchor).num_days();
    // Floored so references before the anchor land in earlier periods.
    let periods = offset_days.div_euclid(length);
    let start = anchor + TimeDelta::days(periods * length);
    let end = start + TimeDelta::days(length - 1);
    (start, end)
}

fn semi_monthly_bounds(reference: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = first_of_month(reference);
    if reference.day() <= 15 {
        (first, first + Days::new(14))
    } else {
        (first + Days::new(15), last_of_month(first))
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

fn last_of_month(first: NaiveDate) -> NaiveDate {
    first + Months::new(1) - Days::new(1)
}
