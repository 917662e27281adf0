//! Series balances tracked through the share roll year

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{relative_approx_eq, RELATIVE_TOLERANCE};
use crate::error::ShareRollError;
use crate::input::PriorSeries;
use crate::{calculate_shares, calculate_value};

/// Running balance of one accounting series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesBalance {
    /// Series name, unique within a calculation
    pub name: String,
    /// Shares at the start of the year (zero for new series)
    pub beginning_shares: Decimal,
    /// NAV per share at the start of the year, or par for new series
    pub beginning_nav: Decimal,
    /// Shares outstanding
    pub shares: Decimal,
    /// Current NAV per share (zero when no shares are outstanding)
    pub nav_per_share: Decimal,
    /// Current total NAV
    pub total_nav: Decimal,
    /// Shares received through roll-ups
    pub transfers_in: Decimal,
    /// Shares moved out through roll-ups
    pub transfers_out: Decimal,
    /// Shares issued for contributions
    pub contributed_shares: Decimal,
    /// Shares retired by redemptions
    pub redeemed_shares: Decimal,
    /// Whether this is the roll-up destination
    pub is_initial: bool,
    /// Month number the series was created in, for contribution series
    pub created_month: Option<u32>,
    /// Whether the series was rolled into the initial series
    pub rolled_up: bool,
}

impl SeriesBalance {
    /// Seeds a balance from a prior-year series
    pub fn from_prior(prior: &PriorSeries, is_initial: bool) -> Self {
        Self {
            name: prior.name.clone(),
            beginning_shares: prior.ending_shares,
            beginning_nav: prior.nav_per_share,
            shares: prior.ending_shares,
            nav_per_share: prior.nav_per_share,
            total_nav: prior.total_nav(),
            transfers_in: Decimal::ZERO,
            transfers_out: Decimal::ZERO,
            contributed_shares: Decimal::ZERO,
            redeemed_shares: Decimal::ZERO,
            is_initial,
            created_month: None,
            rolled_up: false,
        }
    }

    /// Creates a series for a contribution issued at par
    pub fn from_contribution(
        name: impl Into<String>,
        contribution: Decimal,
        par_value: Decimal,
        month: u32,
    ) -> Result<Self, ShareRollError> {
        let shares = calculate_shares(contribution, par_value)?;
        Ok(Self {
            name: name.into(),
            beginning_shares: Decimal::ZERO,
            beginning_nav: par_value,
            shares,
            nav_per_share: par_value,
            total_nav: contribution,
            transfers_in: Decimal::ZERO,
            transfers_out: Decimal::ZERO,
            contributed_shares: shares,
            redeemed_shares: Decimal::ZERO,
            is_initial: false,
            created_month: Some(month),
            rolled_up: false,
        })
    }

    /// Returns true if the series has shares outstanding
    pub fn is_active(&self) -> bool {
        self.shares > Decimal::ZERO
    }

    /// Returns true if the series was created by a contribution this year
    pub fn is_contribution_series(&self) -> bool {
        self.created_month.is_some()
    }

    /// NAV per share as reported: absent once no shares remain
    pub fn reported_nav(&self) -> Option<Decimal> {
        self.is_active().then_some(self.nav_per_share)
    }

    /// Checks `total_nav == shares * nav_per_share` within relative tolerance
    pub fn is_consistent(&self) -> bool {
        self.shares
            .checked_mul(self.nav_per_share)
            .is_some_and(|value| relative_approx_eq(self.total_nav, value, RELATIVE_TOLERANCE))
    }

    /// Adds a profit or loss amount and reprices the series
    pub(crate) fn apply_profit_loss(&mut self, amount: Decimal) -> Result<(), ShareRollError> {
        self.total_nav += amount;
        self.refresh_nav()
    }

    /// Empties the series into a roll-up, returning `(shares, nav_per_share, value)`
    pub(crate) fn roll_out(&mut self) -> Result<(Decimal, Decimal, Decimal), ShareRollError> {
        let shares = self.shares;
        let nav = self.nav_per_share;
        let value = calculate_value(shares, nav)?;

        self.transfers_out = shares;
        self.shares = Decimal::ZERO;
        self.total_nav = Decimal::ZERO;
        self.nav_per_share = Decimal::ZERO;
        self.rolled_up = true;

        Ok((shares, nav, value))
    }

    /// Receives shares and value from a rolled-up series
    pub(crate) fn roll_in(&mut self, shares: Decimal, value: Decimal) -> Result<(), ShareRollError> {
        self.transfers_in += shares;
        self.shares += shares;
        self.total_nav += value;
        self.refresh_nav()
    }

    /// Retires `shares` for `amount` dollars
    pub(crate) fn redeem(&mut self, shares: Decimal, amount: Decimal) {
        self.redeemed_shares += shares;
        self.shares -= shares;
        self.total_nav -= amount;

        if self.shares <= Decimal::ZERO {
            self.shares = Decimal::ZERO;
            self.total_nav = Decimal::ZERO;
            self.nav_per_share = Decimal::ZERO;
        }
    }

    fn refresh_nav(&mut self) -> Result<(), ShareRollError> {
        if self.is_active() {
            self.nav_per_share = self.total_nav.checked_div(self.shares).ok_or_else(|| {
                ShareRollError::overflow(format!(
                    "NAV per share of {} ({} / {} shares)",
                    self.name, self.total_nav, self.shares
                ))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn prior() -> SeriesBalance {
        SeriesBalance::from_prior(&PriorSeries::new("Series A", dec!(500), dec!(1200)), false)
    }

    #[test]
    fn test_from_prior() {
        let series = prior();
        assert_eq!(series.total_nav, dec!(600000));
        assert_eq!(series.beginning_shares, dec!(500));
        assert!(series.is_consistent());
        assert!(!series.is_contribution_series());
    }

    #[test]
    fn test_from_contribution_issues_at_par() {
        let series = SeriesBalance::from_contribution("Series 3/2024", dec!(250000), dec!(1000), 3).unwrap();
        assert_eq!(series.shares, dec!(250));
        assert_eq!(series.contributed_shares, dec!(250));
        assert_eq!(series.beginning_shares, Decimal::ZERO);
        assert_eq!(series.created_month, Some(3));
    }

    #[test]
    fn test_roll_out_zeroes_series() {
        let mut series = prior();
        let (shares, nav, value) = series.roll_out().unwrap();

        assert_eq!((shares, nav, value), (dec!(500), dec!(1200), dec!(600000)));
        assert_eq!(series.shares, Decimal::ZERO);
        assert_eq!(series.total_nav, Decimal::ZERO);
        assert_eq!(series.transfers_out, dec!(500));
        assert!(series.rolled_up);
        assert_eq!(series.reported_nav(), None);
    }

    #[test]
    fn test_profit_loss_reprices() {
        let mut series = prior();
        series.apply_profit_loss(dec!(-100000)).unwrap();
        assert_eq!(series.nav_per_share, dec!(1000));
        assert!(series.is_consistent());
    }

    #[test]
    fn test_sliver_of_shares_overflows_nav() {
        let mut series = prior();
        series.redeem(dec!(499.9999999999999999999999), dec!(599999));

        let err = series.apply_profit_loss(dec!(10000000000)).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_contribution_with_tiny_par_is_rejected() {
        let result =
            SeriesBalance::from_contribution("Series 1/2024", dec!(1000000), dec!(0.0000000000000000000001), 1);
        assert!(result.is_err());
    }

    #[test]
    fn test_partial_redemption_keeps_nav() {
        let mut series = prior();
        series.redeem(dec!(100), dec!(120000));
        assert_eq!(series.shares, dec!(400));
        assert_eq!(series.total_nav, dec!(480000));
        assert_eq!(series.nav_per_share, dec!(1200));
        assert_eq!(series.redeemed_shares, dec!(100));
    }

    #[test]
    fn test_redeeming_everything_zeroes_nav() {
        let mut series = prior();
        series.redeem(dec!(500), dec!(600000));
        assert_eq!(series.shares, Decimal::ZERO);
        assert_eq!(series.nav_per_share, Decimal::ZERO);
        assert_eq!(series.reported_nav(), None);
    }
}
