//! Weekly tip pooling and distribution.
//!
//! Each week's cash tips and fee-adjusted credit-card tips form a pool that
//! is shared out in proportion to hours worked that week. Payouts are summed
//! across weeks per employee name.
//!
//! Tip hours come from the tip roster, whose ids are unrelated to profile
//! ids on time clock entries, so payouts are keyed by display name. Two
//! employees sharing a display name will have their tips merged.
//!
//! Pools are paid per calendar week (Monday to Sunday), never prorated by
//! day. A week that straddles two pay periods is keyed by the same Monday in
//! both, so exporting both periods pays that week's pool out twice. Cycles
//! whose periods start on a Monday (weekly, or biweekly with a Monday
//! anchor) never split a week.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{TipEmployeeHours, WeeklyTipData};

/// Default credit-card processing fee deducted before pooling (3%).
pub const CC_FEE_RATE: Decimal = Decimal::from_parts(3, 0, 0, false, 2);

/// Returns the pool for one week: cash plus credit-card tips net of the
/// processing fee.
///
/// # Examples
///
/// ```
/// use payroll_export::calculation::{weekly_tip_pool, CC_FEE_RATE};
/// use payroll_export::models::WeeklyTipData;
/// use rust_decimal::Decimal;
///
/// let week = WeeklyTipData {
///     week_key: "2025-01-06".to_string(),
///     cash_tips: Decimal::new(100, 0),
///     cc_tips: Decimal::new(100, 0),
/// };
/// assert_eq!(weekly_tip_pool(&week, CC_FEE_RATE), Decimal::new(197, 0));
/// ```
pub fn weekly_tip_pool(week: &WeeklyTipData, fee_rate: Decimal) -> Decimal {
    week.cash_tips + week.cc_tips * (Decimal::ONE - fee_rate)
}

/// Distributes each week's pool across the hours worked that week.
///
/// Weeks where the team worked no hours, or whose pool is not positive, pay
/// out nothing. Hours recorded for weeks with no tip data are ignored.
/// The result maps employee display name to total payout.
pub fn calculate_tip_payouts(
    tips: &[WeeklyTipData],
    hours: &[TipEmployeeHours],
    fee_rate: Decimal,
) -> BTreeMap<String, Decimal> {
    let mut hours_by_week: HashMap<&str, Vec<&TipEmployeeHours>> = HashMap::new();
    for record in hours {
        hours_by_week
            .entry(record.week_key.as_str())
            .or_default()
            .push(record);
    }

    let mut payouts: BTreeMap<String, Decimal> = BTreeMap::new();

    for week in tips {
        let Some(week_hours) = hours_by_week.get(week.week_key.as_str()) else {
            debug!(week_key = %week.week_key, "No tip hours recorded for week");
            continue;
        };

        let team_hours: Decimal = week_hours.iter().map(|h| h.hours).sum();
        let pool = weekly_tip_pool(week, fee_rate);
        if team_hours <= Decimal::ZERO || pool <= Decimal::ZERO {
            debug!(
                week_key = %week.week_key,
                team_hours = %team_hours,
                pool = %pool,
                "Skipping tip week with nothing to distribute"
            );
            continue;
        }

        let hourly_rate = pool / team_hours;
        for record in week_hours {
            *payouts.entry(record.employee_name.clone()).or_default() +=
                record.hours * hourly_rate;
        }
    }

    payouts
}
