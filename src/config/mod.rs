//! Configuration loading and management for the payroll export engine.
//!
//! This module loads the pay period layout, overtime threshold, tip pool
//! settings and locale offset from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use payroll_export::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/payroll.yaml").unwrap();
//! println!("Card fee: {}", loader.config().tips.cc_fee_rate);
//! ```

mod loader;
mod types;

pub(crate) use loader::load_yaml;
pub use loader::ConfigLoader;
pub use types::{LocaleConfig, OvertimeConfig, PayPeriodConfig, PayrollConfig, TipConfig};
