//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the payroll
//! configuration from a YAML file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{PayrollError, PayrollResult};

use super::types::PayrollConfig;

/// Loads and provides access to the payroll configuration.
///
/// # File format
///
/// ```yaml
/// pay_period:
///   period_type: biweekly
///   anchor_date: 2025-01-06
/// overtime:
///   weekly_threshold_hours: 40
/// tips:
///   cc_fee_rate: 0.03
///   seed_file: tips.yaml
/// locale:
///   utc_offset_minutes: -300
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_export::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll.yaml").unwrap();
/// println!("Pay periods are {}", loader.config().pay_period.period_type);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
    base_dir: PathBuf,
}

impl ConfigLoader {
    /// Loads configuration from the specified file.
    ///
    /// Returns an error if:
    /// - The file is missing
    /// - The file contains invalid YAML
    /// - A value is out of range (fee rate, threshold, UTC offset)
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let path = path.as_ref();
        let config = load_yaml::<PayrollConfig>(path)?;

        config
            .validate()
            .map_err(|message| PayrollError::ConfigParseError {
                path: path.display().to_string(),
                message,
            })?;

        info!(
            path = %path.display(),
            period_type = %config.pay_period.period_type,
            anchor_date = %config.pay_period.anchor_date,
            "Loaded payroll configuration"
        );

        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Ok(Self { config, base_dir })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the tip seed file path, resolved against the config directory.
    pub fn tip_seed_path(&self) -> Option<PathBuf> {
        self.config
            .tips
            .seed_file
            .as_ref()
            .map(|p| self.base_dir.join(p))
    }
}

/// Loads and parses a YAML file.
pub(crate) fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> PayrollResult<T> {
    let path_str = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
        path: path_str.clone(),
    })?;

    serde_yaml::from_str(&content).map_err(|e| PayrollError::ConfigParseError {
        path: path_str,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PayPeriodType;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("payroll_export_{}", name));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("payroll.yaml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_full_config() {
        let path = write_temp(
            "full",
            r#"
pay_period:
  period_type: semi_monthly
  anchor_date: 2025-01-01
overtime:
  weekly_threshold_hours: 38
tips:
  cc_fee_rate: "0.025"
  seed_file: tips.yaml
locale:
  utc_offset_minutes: -300
"#,
        );

        let loader = ConfigLoader::load(&path).unwrap();
        let config = loader.config();

        assert_eq!(config.pay_period.period_type, PayPeriodType::SemiMonthly);
        assert_eq!(
            config.pay_period.anchor_date,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        );
        assert_eq!(config.overtime.weekly_threshold_hours, Decimal::new(38, 0));
        assert_eq!(config.tips.cc_fee_rate, Decimal::new(25, 3));
        assert_eq!(config.locale.utc_offset_minutes, -300);
        assert_eq!(
            loader.tip_seed_path(),
            Some(path.parent().unwrap().join("tips.yaml"))
        );
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let path = write_temp("partial", "pay_period:\n  period_type: weekly\n");

        let loader = ConfigLoader::load(&path).unwrap();

        assert_eq!(loader.config().pay_period.period_type, PayPeriodType::Weekly);
        assert_eq!(
            loader.config().overtime.weekly_threshold_hours,
            Decimal::new(40, 0)
        );
        assert_eq!(loader.tip_seed_path(), None);
    }

    #[test]
    fn test_missing_file() {
        let result = ConfigLoader::load("/nonexistent/payroll.yaml");
        assert!(matches!(result, Err(PayrollError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_invalid_yaml() {
        let path = write_temp("invalid", "pay_period: [unterminated");
        let result = ConfigLoader::load(&path);
        assert!(matches!(result, Err(PayrollError::ConfigParseError { .. })));
    }

    #[test]
    fn test_unknown_period_type() {
        let path = write_temp("bad_type", "pay_period:\n  period_type: fortnightly\n");
        let result = ConfigLoader::load(&path);
        assert!(matches!(result, Err(PayrollError::ConfigParseError { .. })));
    }

    #[test]
    fn test_out_of_range_value_is_parse_error() {
        let path = write_temp("bad_fee", "tips:\n  cc_fee_rate: 2\n");
        let err = ConfigLoader::load(&path).unwrap_err();
        assert!(err.to_string().contains("cc_fee_rate"));
    }
}
