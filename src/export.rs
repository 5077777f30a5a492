//! Payroll export orchestration.
//!
//! [`PayrollExporter`] ties the calculation functions together: it parses
//! the requested period, fetches that period's tip data, aggregates hours,
//! distributes tips, adds approved PTO and serializes the result.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calculation::{
    aggregate_hours, approved_pto_hours, build_payroll_rows, calculate_tip_payouts,
    export_file_name, payroll_rows_to_csv, week_groups,
};
use crate::config::PayrollConfig;
use crate::error::PayrollResult;
use crate::models::{
    Employee, EmployeeHoursSummary, PayPeriod, PayrollRow, TimeClockEntry, TimesheetApproval,
    WeekGroup,
};
use crate::tips::TipDataSource;

/// Everything the caller supplies for one export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    /// The tenant whose tip data should be fetched.
    pub tenant_id: String,
    /// First day of the period, `YYYY-MM-DD`.
    pub start: String,
    /// Last day of the period, `YYYY-MM-DD`.
    pub end: String,
    /// Time clock entries; active ones are ignored.
    #[serde(default)]
    pub entries: Vec<TimeClockEntry>,
    /// The employee roster used to resolve display names.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Timesheet approvals supplying PTO hours.
    #[serde(default)]
    pub approvals: Vec<TimesheetApproval>,
}

/// A finished payroll export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollExport {
    /// Download file name, `gusto_payroll_<start>_<end>.csv`.
    pub file_name: String,
    /// The exported period.
    pub period: PayPeriod,
    /// Rows in file order.
    pub rows: Vec<PayrollRow>,
    /// The CSV document.
    pub csv: String,
}

/// Builds payroll exports against a tip data source.
///
/// Exports share no mutable state; running the same request twice gives the
/// same result.
#[derive(Debug, Clone)]
pub struct PayrollExporter<S> {
    config: PayrollConfig,
    tips: S,
}

impl<S: TipDataSource> PayrollExporter<S> {
    /// Creates an exporter.
    pub fn new(config: PayrollConfig, tips: S) -> Self {
        Self { config, tips }
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Aggregates the request's hours without fetching tip data.
    pub fn hours_summary(&self, request: &ExportRequest) -> PayrollResult<Vec<EmployeeHoursSummary>> {
        let period = PayPeriod::parse(&request.start, &request.end)?;
        validate_entries(&request.entries)?;
        let weeks = week_groups(&period);
        Ok(self.aggregate(request, &weeks))
    }

    /// Builds the payroll export for the request's period.
    ///
    /// Weekly tips and tip hours are fetched concurrently; a fetch failure
    /// aborts the export with the source's error. Fails with
    /// [`crate::error::PayrollError::NoEmployeeHours`] if nobody worked.
    pub async fn export(&self, request: &ExportRequest) -> PayrollResult<PayrollExport> {
        let started = Instant::now();
        let period = PayPeriod::parse(&request.start, &request.end)?;
        validate_entries(&request.entries)?;
        let weeks = week_groups(&period);
        let week_keys: Vec<String> = weeks.iter().filter_map(WeekGroup::week_key).collect();

        let (weekly_tips, tip_hours) = tokio::try_join!(
            self.tips.weekly_tips(&request.tenant_id, &week_keys),
            self.tips.employee_hours(&request.tenant_id, &week_keys),
        )
        .inspect_err(|err| {
            warn!(tenant_id = %request.tenant_id, error = %err, "Tip data fetch failed");
        })?;

        let hours = self.aggregate(request, &weeks);
        let tip_payouts =
            calculate_tip_payouts(&weekly_tips, &tip_hours, self.config.tips.cc_fee_rate);
        let pto = approved_pto_hours(&request.approvals, &period);

        let rows = build_payroll_rows(&hours, &tip_payouts, &pto)?;
        let csv = payroll_rows_to_csv(&rows)?;
        let file_name = export_file_name(&period);

        info!(
            tenant_id = %request.tenant_id,
            period = %period.label,
            weeks = weeks.len(),
            entries = request.entries.len(),
            rows = rows.len(),
            duration_us = started.elapsed().as_micros(),
            "Built payroll export"
        );

        Ok(PayrollExport {
            file_name,
            period,
            rows,
            csv,
        })
    }

    fn aggregate(&self, request: &ExportRequest, weeks: &[WeekGroup]) -> Vec<EmployeeHoursSummary> {
        aggregate_hours(
            &request.entries,
            weeks,
            &request.employees,
            &self.config.locale.utc_offset(),
            self.config.overtime.weekly_threshold_hours,
        )
    }
}

fn validate_entries(entries: &[TimeClockEntry]) -> PayrollResult<()> {
    entries.iter().try_for_each(TimeClockEntry::validate)
}
