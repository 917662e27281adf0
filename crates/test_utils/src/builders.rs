//! Test Data Builders
//!
//! Provides builder patterns for constructing share roll inputs with sensible
//! defaults. Tests describe only the months they care about; the builder
//! fills the rest of the year with idle months when asked to.

use domain_share_roll::{MonthlyActivity, PriorSeries, ShareRollInput};
use rust_decimal::Decimal;

use crate::fixtures::{SeriesFixtures, FIXTURE_PAR_VALUE, FIXTURE_PRIOR_YEAR};

/// Builder for constructing share roll inputs
pub struct ShareRollInputBuilder {
    par_value: Decimal,
    prior_year: i32,
    prior_series: Vec<PriorSeries>,
    months: Vec<MonthlyActivity>,
    fill_year: bool,
}

impl Default for ShareRollInputBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ShareRollInputBuilder {
    /// Creates a builder with the fixture par value and prior year and no series
    pub fn new() -> Self {
        Self {
            par_value: FIXTURE_PAR_VALUE,
            prior_year: FIXTURE_PRIOR_YEAR,
            prior_series: Vec::new(),
            months: Vec::new(),
            fill_year: false,
        }
    }

    /// Creates a builder seeded with the standard initial series
    pub fn with_initial_series() -> Self {
        Self::new().series(SeriesFixtures::initial())
    }

    /// Sets the par value
    pub fn par_value(mut self, par_value: Decimal) -> Self {
        self.par_value = par_value;
        self
    }

    /// Sets the prior year
    pub fn prior_year(mut self, year: i32) -> Self {
        self.prior_year = year;
        self
    }

    /// Appends a prior-year series
    pub fn series(mut self, series: PriorSeries) -> Self {
        self.prior_series.push(series);
        self
    }

    /// Appends a prior-year series from its parts
    pub fn prior(self, name: &str, shares: Decimal, nav_per_share: Decimal) -> Self {
        self.series(PriorSeries::new(name, shares, nav_per_share))
    }

    /// Appends a month of activity
    pub fn month(mut self, activity: MonthlyActivity) -> Self {
        self.months.push(activity);
        self
    }

    /// Adds a contribution in `month`
    pub fn contribution(self, month: u32, amount: Decimal) -> Self {
        self.month(MonthlyActivity::new(month).with_contribution(amount))
    }

    /// Adds a profit or loss in `month`
    pub fn profit_loss(self, month: u32, amount: Decimal) -> Self {
        self.month(MonthlyActivity::new(month).with_profit_loss(amount))
    }

    /// Adds a partial redemption in `month`
    pub fn redemption(self, month: u32, series: &str, amount: Decimal) -> Self {
        self.month(MonthlyActivity::new(month).with_redemption(series, amount))
    }

    /// Adds a full redemption in `month`
    pub fn full_redemption(self, month: u32, series: &str) -> Self {
        self.month(MonthlyActivity::new(month).with_full_redemption(series))
    }

    /// Pads the year with idle months for every month not given explicitly
    pub fn full_year(mut self) -> Self {
        self.fill_year = true;
        self
    }

    /// Builds the input
    pub fn build(self) -> ShareRollInput {
        let mut monthly_activity = self.months;

        if self.fill_year {
            for month in 1..=12 {
                if !monthly_activity.iter().any(|a| a.month == month) {
                    monthly_activity.push(MonthlyActivity::new(month));
                }
            }
            monthly_activity.sort_by_key(|a| a.month);
        }

        ShareRollInput {
            par_value: self.par_value,
            prior_year: self.prior_year,
            prior_series: self.prior_series,
            monthly_activity,
        }
    }
}
