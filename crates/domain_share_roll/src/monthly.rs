//! Monthly processing
//!
//! Each month applies a contribution, a P/L allocation and a redemption. The
//! relative order of the contribution and the redemption changes the numbers
//! whenever both happen in the same month, so the order is chosen once per
//! calculation through [`OperationOrder`] and never varies between months.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{
    format_currency, format_number, ReportingPeriod, CURRENCY_PRECISION, SHARE_PRECISION,
};
use crate::allocation::allocate_profit_loss;
use crate::calc_log::{CalcLog, StepKind};
use crate::error::ShareRollError;
use crate::input::MonthlyActivity;
use crate::ledger::SeriesLedger;
use crate::series::SeriesBalance;
use crate::{calculate_shares, calculate_value};

/// One of the three monthly operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthlyStep {
    Contribution,
    ProfitLoss,
    Redemption,
}

/// Order in which the monthly operations run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationOrder {
    /// Contribution, then P/L, then redemption at the post-P/L NAV
    #[default]
    ContributionFirst,
    /// Redemption at the opening NAV, then P/L, then contribution
    RedemptionFirst,
}

impl OperationOrder {
    /// The monthly steps in execution order
    pub fn steps(&self) -> [MonthlyStep; 3] {
        match self {
            OperationOrder::ContributionFirst => [
                MonthlyStep::Contribution,
                MonthlyStep::ProfitLoss,
                MonthlyStep::Redemption,
            ],
            OperationOrder::RedemptionFirst => [
                MonthlyStep::Redemption,
                MonthlyStep::ProfitLoss,
                MonthlyStep::Contribution,
            ],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationOrder::ContributionFirst => "contribution_first",
            OperationOrder::RedemptionFirst => "redemption_first",
        }
    }
}

impl fmt::Display for OperationOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationOrder {
    type Err = ShareRollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "contribution_first" => Ok(OperationOrder::ContributionFirst),
            "redemption_first" => Ok(OperationOrder::RedemptionFirst),
            other => Err(ShareRollError::validation(format!(
                "Unknown operation order: {}",
                other
            ))),
        }
    }
}

/// What one month did to the fund
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthOutcome {
    /// Series created from the month's contribution
    pub new_series: Option<String>,
    /// Contribution amount applied
    pub contribution: Decimal,
    /// P/L actually allocated
    pub profit_loss_allocated: Decimal,
    /// Dollar value paid out by redemptions
    pub redeemed_amount: Decimal,
    /// Shares retired by redemptions
    pub redeemed_shares: Decimal,
}

/// Applies monthly activity to a ledger
#[derive(Debug, Clone, Copy)]
pub struct MonthlyProcessor {
    order: OperationOrder,
    par_value: Decimal,
    current_year: i32,
}

impl MonthlyProcessor {
    /// Creates a processor
    ///
    /// # Arguments
    ///
    /// * `order` - Operation order used for every month
    /// * `par_value` - Issue price for contribution series
    /// * `current_year` - Year used in contribution series names
    pub fn new(order: OperationOrder, par_value: Decimal, current_year: i32) -> Self {
        Self {
            order,
            par_value,
            current_year,
        }
    }

    pub fn order(&self) -> OperationOrder {
        self.order
    }

    /// Processes one month of activity
    ///
    /// # Errors
    ///
    /// Returns a validation error if the month number is outside 1-12, or an
    /// overflow error if the month's amounts cannot be carried through.
    pub fn process(
        &self,
        ledger: &mut SeriesLedger,
        activity: &MonthlyActivity,
        log: &mut CalcLog,
    ) -> Result<MonthOutcome, ShareRollError> {
        let period = activity.period()?;
        let mut outcome = MonthOutcome::default();

        for step in self.order.steps() {
            match step {
                MonthlyStep::Contribution => {
                    if let Some(name) = self.contribute(ledger, activity, period, log)? {
                        outcome.contribution = activity.contribution;
                        outcome.new_series = Some(name);
                    }
                }
                MonthlyStep::ProfitLoss => {
                    outcome.profit_loss_allocated =
                        allocate_profit_loss(ledger, activity.profit_loss, period, log)?;
                }
                MonthlyStep::Redemption => {
                    if let Some((shares, amount)) = self.redeem(ledger, activity, period, log)? {
                        outcome.redeemed_shares += shares;
                        outcome.redeemed_amount += amount;
                    }
                }
            }
        }

        debug!(
            period = %period,
            order = %self.order,
            contribution = %outcome.contribution,
            profit_loss = %outcome.profit_loss_allocated,
            redeemed = %outcome.redeemed_amount,
            "Processed month"
        );

        Ok(outcome)
    }

    /// Name a contribution in `month` would receive before collision handling
    pub fn contribution_series_name(&self, month: u32) -> String {
        format!("Series {}/{}", month, self.current_year)
    }

    fn contribute(
        &self,
        ledger: &mut SeriesLedger,
        activity: &MonthlyActivity,
        period: ReportingPeriod,
        log: &mut CalcLog,
    ) -> Result<Option<String>, ShareRollError> {
        if activity.contribution <= Decimal::ZERO {
            return Ok(None);
        }

        let name = ledger.unique_name(&self.contribution_series_name(activity.month));
        let series = SeriesBalance::from_contribution(
            name.clone(),
            activity.contribution,
            self.par_value,
            activity.month,
        )?;

        log.record(
            StepKind::NewSeries,
            period,
            name.as_str(),
            format!(
                "Contribution of {}",
                format_currency(activity.contribution, CURRENCY_PRECISION)
            ),
            format!(
                "Shares issued: {} / {} = {}",
                format_currency(activity.contribution, CURRENCY_PRECISION),
                format_currency(self.par_value, CURRENCY_PRECISION),
                format_number(series.shares, SHARE_PRECISION)
            ),
        );

        ledger.insert(series)?;
        Ok(Some(name))
    }

    /// Returns `(shares_redeemed, amount)` when a redemption was applied
    fn redeem(
        &self,
        ledger: &mut SeriesLedger,
        activity: &MonthlyActivity,
        period: ReportingPeriod,
        log: &mut CalcLog,
    ) -> Result<Option<(Decimal, Decimal)>, ShareRollError> {
        if !activity.requests_redemption() {
            return Ok(None);
        }

        let target = activity
            .redemption_series
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());

        let Some(target) = target else {
            log.record(
                StepKind::RedemptionSkipped,
                period,
                "",
                "Redemption skipped",
                "No series selected",
            );
            return Ok(None);
        };

        let Some(series) = ledger.get_mut(target) else {
            log.record(
                StepKind::RedemptionSkipped,
                period,
                target,
                "Redemption skipped",
                "Series does not exist",
            );
            return Ok(None);
        };

        if !series.is_active() || series.nav_per_share <= Decimal::ZERO {
            log.record(
                StepKind::RedemptionSkipped,
                period,
                target,
                "Redemption skipped",
                "Series has no outstanding shares",
            );
            return Ok(None);
        }

        let nav = series.nav_per_share;
        let shares_before = series.shares;
        let series_value = calculate_value(shares_before, nav)?;

        // Compared in dollars so an oversized request never has to be
        // converted into a share count.
        let (shares_redeemed, amount) = if activity.full_redemption {
            let amount = series_value;
            log.record(
                StepKind::FullRedemption,
                period,
                target,
                "FULL redemption of all shares",
                format!(
                    "NAV/share: {} | Shares redeemed: {} | Redemption value: {}",
                    format_currency(nav, SHARE_PRECISION),
                    format_number(shares_before, SHARE_PRECISION),
                    format_currency(amount, CURRENCY_PRECISION)
                ),
            );
            (shares_before, amount)
        } else if activity.redemption_amount >= series_value {
            let amount = series_value;
            log.record(
                StepKind::Redemption,
                period,
                target,
                format!(
                    "Redemption of {} capped at series value",
                    format_currency(activity.redemption_amount, CURRENCY_PRECISION)
                ),
                format!(
                    "NAV/share: {} | Shares redeemed: {} | Redemption value: {} | Shares before: {}",
                    format_currency(nav, SHARE_PRECISION),
                    format_number(shares_before, SHARE_PRECISION),
                    format_currency(amount, CURRENCY_PRECISION),
                    format_number(shares_before, SHARE_PRECISION)
                ),
            );
            (shares_before, amount)
        } else {
            let requested_shares = calculate_shares(activity.redemption_amount, nav)?;
            log.record(
                StepKind::Redemption,
                period,
                target,
                format!(
                    "Redemption of {}",
                    format_currency(activity.redemption_amount, CURRENCY_PRECISION)
                ),
                format!(
                    "NAV/share: {} | Shares redeemed: {} / {} = {} | Shares before: {}",
                    format_currency(nav, SHARE_PRECISION),
                    format_currency(activity.redemption_amount, CURRENCY_PRECISION),
                    format_currency(nav, SHARE_PRECISION),
                    format_number(requested_shares, SHARE_PRECISION),
                    format_number(shares_before, SHARE_PRECISION)
                ),
            );
            (requested_shares, activity.redemption_amount)
        };

        series.redeem(shares_redeemed, amount);
        Ok(Some((shares_redeemed, amount)))
    }
}
