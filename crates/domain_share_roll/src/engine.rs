//! Share roll engine
//!
//! One call to [`ShareRollEngine::calculate`] is one complete calculation:
//! the ledger is rebuilt from the input, rolled up, processed month by month
//! and discarded once the report is assembled. The engine holds only its
//! configuration, so a single instance can serve concurrent callers.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use core_kernel::{CalculationId, ReportingPeriod};
use crate::calc_log::CalcLog;
use crate::error::ShareRollError;
use crate::input::{MonthlyActivity, ShareRollInput};
use crate::ledger::SeriesLedger;
use crate::monthly::{MonthlyProcessor, OperationOrder};
use crate::nav_snapshot::NavSnapshotTable;
use crate::report::{summary_rows, CheckFigures, Reconciliation, ShareRollReport, ShareRollTotals};
use crate::rollup::apply_roll_up;

/// Engine settings chosen per deployment or per request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Order of the monthly operations, applied to every month
    pub operation_order: OperationOrder,
    /// Whether to record month-end NAV per share snapshots
    pub capture_nav_snapshots: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            operation_order: OperationOrder::ContributionFirst,
            capture_nav_snapshots: true,
        }
    }
}

impl EngineConfig {
    /// Sets the operation order
    pub fn with_operation_order(mut self, order: OperationOrder) -> Self {
        self.operation_order = order;
        self
    }

    /// Enables or disables NAV snapshots
    pub fn with_nav_snapshots(mut self, capture: bool) -> Self {
        self.capture_nav_snapshots = capture;
        self
    }
}

/// Stateless share roll calculator
#[derive(Debug, Clone, Default)]
pub struct ShareRollEngine {
    config: EngineConfig,
}

impl ShareRollEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs a complete share roll calculation
    ///
    /// # Errors
    ///
    /// Returns a validation error if the input fails
    /// [`ShareRollInput::validate`] or prior-year names collide, and an
    /// overflow error if an intermediate figure cannot be represented.
    /// Skipped redemptions and reconciliation differences are reported in
    /// the output, not as errors.
    pub fn calculate(&self, input: &ShareRollInput) -> Result<ShareRollReport, ShareRollError> {
        input.validate()?;

        let calculation_id = CalculationId::new();
        let current_year = input.current_year();
        let mut log = CalcLog::new();
        let mut ledger = SeriesLedger::from_prior_series(&input.prior_series)?;
        let initial_name = ledger.initial().map(|s| s.name.clone());

        apply_roll_up(&mut ledger, input.par_value, &mut log)?;

        let mut snapshots = self.config.capture_nav_snapshots.then(NavSnapshotTable::new);
        if let Some(table) = snapshots.as_mut() {
            table.capture(ReportingPeriod::BeginningOfYear, &ledger);
        }

        let processor = MonthlyProcessor::new(self.config.operation_order, input.par_value, current_year);
        let mut check_figures = CheckFigures {
            beginning_total_nav: input.beginning_total_nav(),
            ..Default::default()
        };

        for activity in schedule(&input.monthly_activity) {
            let outcome = processor.process(&mut ledger, activity, &mut log)?;

            check_figures.total_profit_loss += activity.profit_loss;
            check_figures.total_profit_loss_allocated += outcome.profit_loss_allocated;
            check_figures.total_contributions += outcome.contribution;
            check_figures.total_redemptions += outcome.redeemed_amount;

            if let Some(table) = snapshots.as_mut() {
                table.capture(activity.period()?, &ledger);
            }
        }

        check_figures.total_ending_nav = ledger.total_active_nav();

        let rows = summary_rows(ledger.iter(), initial_name.as_deref());
        let totals = ShareRollTotals::from_rows(&rows);
        let reconciliation = Reconciliation::check(&totals);

        if let Some(warning) = &reconciliation.warning {
            warn!(calculation_id = %calculation_id, difference = %reconciliation.difference, "{}", warning);
        }

        info!(
            calculation_id = %calculation_id,
            current_year,
            series = rows.len(),
            log_entries = log.len(),
            ending_shares = %totals.ending_shares,
            ending_nav = %check_figures.total_ending_nav,
            order = %self.config.operation_order,
            "Share roll calculated"
        );

        Ok(ShareRollReport {
            calculation_id,
            calculated_at: Utc::now(),
            prior_year: input.prior_year,
            current_year,
            par_value: input.par_value,
            operation_order: self.config.operation_order,
            rows,
            totals,
            check_figures,
            reconciliation,
            calc_log: log,
            nav_snapshots: snapshots,
            series: ledger.into_balances(),
        })
    }
}

/// Months in month-number order; repeated months keep their entry order
fn schedule(activity: &[MonthlyActivity]) -> Vec<&MonthlyActivity> {
    let mut months: Vec<&MonthlyActivity> = activity.iter().collect();
    months.sort_by_key(|a| a.month);
    months
}
