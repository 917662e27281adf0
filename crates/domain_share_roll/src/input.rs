//! Share roll inputs
//!
//! Inputs arrive as plain ordered lists: the order of prior-year series is
//! significant because the first funded entry becomes the initial series.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{CoreError, ReportingPeriod};
use crate::error::ShareRollError;

/// Largest magnitude accepted for any single amount, share count or price
pub const MAX_INPUT_AMOUNT: Decimal = dec!(1000000000000000);

/// Largest total prior-year NAV accepted for the whole fund
pub const MAX_FUND_NAV: Decimal = dec!(1000000000000000000000000);

/// A prior-year series balance as entered by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorSeries {
    /// Series name
    pub name: String,
    /// Shares outstanding at prior year end
    pub ending_shares: Decimal,
    /// NAV per share at prior year end
    pub nav_per_share: Decimal,
}

impl PriorSeries {
    /// Creates a new prior-year series entry
    pub fn new(name: impl Into<String>, ending_shares: Decimal, nav_per_share: Decimal) -> Self {
        Self {
            name: name.into(),
            ending_shares,
            nav_per_share,
        }
    }

    /// Total NAV of the series at prior year end
    ///
    /// Saturates at the `Decimal` bounds; validated inputs never reach them.
    pub fn total_nav(&self) -> Decimal {
        self.ending_shares.saturating_mul(self.nav_per_share)
    }

    /// Returns true if the entry carries a name and a positive share balance
    pub fn is_funded(&self) -> bool {
        !self.name.trim().is_empty() && self.ending_shares > Decimal::ZERO
    }
}

/// One calendar month of fund activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyActivity {
    /// Month number (1-12)
    pub month: u32,
    /// Fund-level profit or loss for the month
    pub profit_loss: Decimal,
    /// New capital; creates a new series at par
    pub contribution: Decimal,
    /// Dollar amount to redeem (ignored for full redemptions)
    pub redemption_amount: Decimal,
    /// Redeem every outstanding share of the named series
    pub full_redemption: bool,
    /// Series to redeem from
    pub redemption_series: Option<String>,
}

impl MonthlyActivity {
    /// Creates a month with no activity
    pub fn new(month: u32) -> Self {
        Self {
            month,
            profit_loss: Decimal::ZERO,
            contribution: Decimal::ZERO,
            redemption_amount: Decimal::ZERO,
            full_redemption: false,
            redemption_series: None,
        }
    }

    /// Sets the profit or loss for the month
    pub fn with_profit_loss(mut self, profit_loss: Decimal) -> Self {
        self.profit_loss = profit_loss;
        self
    }

    /// Sets the contribution for the month
    pub fn with_contribution(mut self, contribution: Decimal) -> Self {
        self.contribution = contribution;
        self
    }

    /// Requests a partial redemption of `amount` dollars from `series`
    pub fn with_redemption(mut self, series: impl Into<String>, amount: Decimal) -> Self {
        self.redemption_series = Some(series.into());
        self.redemption_amount = amount;
        self.full_redemption = false;
        self
    }

    /// Requests a full redemption of `series`
    pub fn with_full_redemption(mut self, series: impl Into<String>) -> Self {
        self.redemption_series = Some(series.into());
        self.full_redemption = true;
        self
    }

    /// Returns true if the month asks for any redemption
    pub fn requests_redemption(&self) -> bool {
        self.full_redemption || self.redemption_amount > Decimal::ZERO
    }

    /// Returns true if nothing happens in this month
    pub fn is_idle(&self) -> bool {
        self.profit_loss.is_zero()
            && self.contribution <= Decimal::ZERO
            && !self.requests_redemption()
    }

    /// Reporting period for this month
    pub fn period(&self) -> Result<ReportingPeriod, CoreError> {
        ReportingPeriod::month(self.month)
    }
}

/// Everything a share roll calculation needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareRollInput {
    /// Roll-up threshold and issue price for new series
    pub par_value: Decimal,
    /// Year of the audited prior-year balances
    pub prior_year: i32,
    /// Prior-year series in entry order
    pub prior_series: Vec<PriorSeries>,
    /// Monthly activity for the calculating year
    pub monthly_activity: Vec<MonthlyActivity>,
}

impl ShareRollInput {
    /// Creates an input with no series and no activity
    pub fn new(par_value: Decimal, prior_year: i32) -> Self {
        Self {
            par_value,
            prior_year,
            prior_series: Vec::new(),
            monthly_activity: Vec::new(),
        }
    }

    /// Appends a prior-year series
    pub fn with_series(mut self, series: PriorSeries) -> Self {
        self.prior_series.push(series);
        self
    }

    /// Appends a month of activity
    pub fn with_activity(mut self, activity: MonthlyActivity) -> Self {
        self.monthly_activity.push(activity);
        self
    }

    /// The year being calculated
    pub fn current_year(&self) -> i32 {
        self.prior_year.saturating_add(1)
    }

    /// Prior-year series that take part in the calculation, in entry order
    pub fn funded_series(&self) -> impl Iterator<Item = &PriorSeries> {
        self.prior_series.iter().filter(|s| s.is_funded())
    }

    /// Total prior-year NAV across funded series
    pub fn beginning_total_nav(&self) -> Decimal {
        self.funded_series()
            .map(PriorSeries::total_nav)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Validates the input before a calculation
    ///
    /// # Errors
    ///
    /// Returns a validation error if the par value is not positive, no funded
    /// prior-year series exists, a month number is outside 1-12, the year
    /// after `prior_year` cannot be represented, any amount exceeds
    /// [`MAX_INPUT_AMOUNT`], or the prior-year NAV exceeds [`MAX_FUND_NAV`].
    pub fn validate(&self) -> Result<(), ShareRollError> {
        if self.par_value <= Decimal::ZERO {
            return Err(ShareRollError::validation(format!(
                "Par value must be positive, got {}",
                self.par_value
            )));
        }
        check_amount("Par value", self.par_value)?;

        if self.prior_year.checked_add(1).is_none() {
            return Err(ShareRollError::validation(format!(
                "Prior year {} has no following year",
                self.prior_year
            )));
        }

        if self.funded_series().next().is_none() {
            return Err(ShareRollError::validation(
                "At least one prior year series with shares > 0 is required",
            ));
        }

        let mut fund_nav = Decimal::ZERO;
        for series in self.funded_series() {
            check_amount(&format!("Ending shares of {}", series.name), series.ending_shares)?;
            check_amount(&format!("NAV/share of {}", series.name), series.nav_per_share)?;

            fund_nav = series
                .ending_shares
                .checked_mul(series.nav_per_share)
                .and_then(|nav| fund_nav.checked_add(nav))
                .filter(|total| total.abs() <= MAX_FUND_NAV)
                .ok_or_else(|| {
                    ShareRollError::validation(format!(
                        "Prior year NAV exceeds {} at {}",
                        MAX_FUND_NAV, series.name
                    ))
                })?;
        }

        for activity in &self.monthly_activity {
            activity.period()?;
            check_amount("P/L", activity.profit_loss)?;
            check_amount("Contribution", activity.contribution)?;
            check_amount("Redemption amount", activity.redemption_amount)?;
        }

        Ok(())
    }
}

fn check_amount(label: &str, value: Decimal) -> Result<(), ShareRollError> {
    if value.abs() > MAX_INPUT_AMOUNT {
        return Err(ShareRollError::validation(format!(
            "{} must not exceed {} in magnitude, got {}",
            label, MAX_INPUT_AMOUNT, value
        )));
    }
    Ok(())
}
