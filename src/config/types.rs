//! Configuration types for payroll exports.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every section and
//! field has a default, so an empty file is a valid configuration.

use std::path::PathBuf;

use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{CC_FEE_RATE, DEFAULT_WEEKLY_OVERTIME_THRESHOLD};
use crate::models::PayPeriodType;

/// How pay periods are laid out for the business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayPeriodConfig {
    /// The payroll cycle.
    pub period_type: PayPeriodType,
    /// A date on which some weekly or biweekly period starts.
    pub anchor_date: NaiveDate,
}

impl Default for PayPeriodConfig {
    fn default() -> Self {
        Self {
            period_type: PayPeriodType::Biweekly,
            // 2024-01-01 is a Monday
            anchor_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
        }
    }
}

/// Overtime rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OvertimeConfig {
    /// Hours per week after which hours count as overtime.
    pub weekly_threshold_hours: Decimal,
}

impl Default for OvertimeConfig {
    fn default() -> Self {
        Self {
            weekly_threshold_hours: DEFAULT_WEEKLY_OVERTIME_THRESHOLD,
        }
    }
}

/// Tip pooling settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TipConfig {
    /// Fraction of credit-card tips kept by the card processor.
    pub cc_fee_rate: Decimal,
    /// Optional YAML file with weekly tip data to serve from memory.
    ///
    /// Relative paths resolve against the configuration file's directory.
    pub seed_file: Option<PathBuf>,
}

impl Default for TipConfig {
    fn default() -> Self {
        Self {
            cc_fee_rate: CC_FEE_RATE,
            seed_file: None,
        }
    }
}

/// Locale settings used to turn timestamps into calendar dates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// The business's offset from UTC in minutes (e.g. -300 for UTC-5).
    pub utc_offset_minutes: i32,
}

impl LocaleConfig {
    /// Returns the configured offset, or UTC if it is out of range.
    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }
}

/// The complete payroll configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollConfig {
    /// Pay period layout.
    pub pay_period: PayPeriodConfig,
    /// Overtime rules.
    pub overtime: OvertimeConfig,
    /// Tip pooling settings.
    pub tips: TipConfig,
    /// Locale settings.
    pub locale: LocaleConfig,
}

impl PayrollConfig {
    /// Checks values that deserialize fine but make no sense.
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.tips.cc_fee_rate < Decimal::ZERO || self.tips.cc_fee_rate > Decimal::ONE {
            return Err(format!(
                "tips.cc_fee_rate must be between 0 and 1, got {}",
                self.tips.cc_fee_rate
            ));
        }
        if self.overtime.weekly_threshold_hours <= Decimal::ZERO {
            return Err(format!(
                "overtime.weekly_threshold_hours must be positive, got {}",
                self.overtime.weekly_threshold_hours
            ));
        }
        // FixedOffset accepts strictly less than 24 hours either way
        if self.locale.utc_offset_minutes.abs() >= 24 * 60 {
            return Err(format!(
                "locale.utc_offset_minutes must be within +/-1439, got {}",
                self.locale.utc_offset_minutes
            ));
        }
        Ok(())
    }
}
