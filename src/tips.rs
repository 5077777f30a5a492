//! Weekly tip data sources.
//!
//! Tip totals and tip-roster hours live outside the time clock data the
//! caller supplies, so an export fetches them through a [`TipDataSource`].
//! Failures surface as [`crate::error::PayrollError::TipDataUnavailable`] and are not
//! retried.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::load_yaml;
use crate::error::PayrollResult;
use crate::models::{TipEmployeeHours, WeeklyTipData};

/// Read access to a tenant's weekly tip records.
///
/// Both reads take the week keys (Monday dates, `YYYY-MM-DD`) of the weeks
/// being exported and return only records for those weeks.
#[async_trait]
pub trait TipDataSource: Send + Sync {
    /// Fetches cash and credit-card tip totals per week.
    async fn weekly_tips(
        &self,
        tenant_id: &str,
        week_keys: &[String],
    ) -> PayrollResult<Vec<WeeklyTipData>>;

    /// Fetches hours worked per tip-roster employee per week.
    async fn employee_hours(
        &self,
        tenant_id: &str,
        week_keys: &[String],
    ) -> PayrollResult<Vec<TipEmployeeHours>>;
}

/// All tip records for one tenant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantTips {
    /// Weekly tip totals.
    #[serde(default)]
    pub weekly_tips: Vec<WeeklyTipData>,
    /// Weekly hours per tip-roster employee.
    #[serde(default)]
    pub employee_hours: Vec<TipEmployeeHours>,
}

#[derive(Debug, Default, Deserialize)]
struct TipSeedFile {
    #[serde(default)]
    tenants: HashMap<String, TenantTips>,
}

/// A [`TipDataSource`] backed by tenant-keyed records held in memory.
///
/// Unknown tenants have no tip data.
///
/// # Example
///
/// ```
/// use payroll_export::tips::{InMemoryTipSource, TenantTips, TipDataSource};
/// use payroll_export::models::WeeklyTipData;
/// use rust_decimal::Decimal;
///
/// # #[tokio::main]
/// # async fn main() {
/// let mut source = InMemoryTipSource::new();
/// source.insert_tenant("cafe-001", TenantTips {
///     weekly_tips: vec![WeeklyTipData {
///         week_key: "2025-01-06".to_string(),
///         cash_tips: Decimal::new(100, 0),
///         cc_tips: Decimal::ZERO,
///     }],
///     employee_hours: vec![],
/// });
///
/// let weeks = vec!["2025-01-06".to_string()];
/// let tips = source.weekly_tips("cafe-001", &weeks).await.unwrap();
/// assert_eq!(tips.len(), 1);
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryTipSource {
    tenants: HashMap<String, TenantTips>,
}

impl InMemoryTipSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads tenant records from a YAML seed file:
    ///
    /// ```yaml
    /// tenants:
    ///   cafe-001:
    ///     weekly_tips:
    ///       - { week_key: "2025-01-06", cash_tips: "120.00", cc_tips: "80.00" }
    ///     employee_hours:
    ///       - { tip_employee_id: t1, employee_name: Ana, week_key: "2025-01-06", hours: "32" }
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let seed = load_yaml::<TipSeedFile>(path.as_ref())?;
        debug!(
            path = %path.as_ref().display(),
            tenants = seed.tenants.len(),
            "Loaded tip seed file"
        );
        Ok(Self {
            tenants: seed.tenants,
        })
    }

    /// Replaces the records held for a tenant.
    pub fn insert_tenant(&mut self, tenant_id: impl Into<String>, tips: TenantTips) {
        self.tenants.insert(tenant_id.into(), tips);
    }
}

#[async_trait]
impl TipDataSource for InMemoryTipSource {
    async fn weekly_tips(
        &self,
        tenant_id: &str,
        week_keys: &[String],
    ) -> PayrollResult<Vec<WeeklyTipData>> {
        Ok(self
            .tenants
            .get(tenant_id)
            .map(|t| {
                t.weekly_tips
                    .iter()
                    .filter(|w| week_keys.contains(&w.week_key))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn employee_hours(
        &self,
        tenant_id: &str,
        week_keys: &[String],
    ) -> PayrollResult<Vec<TipEmployeeHours>> {
        Ok(self
            .tenants
            .get(tenant_id)
            .map(|t| {
                t.employee_hours
                    .iter()
                    .filter(|h| week_keys.contains(&h.week_key))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
