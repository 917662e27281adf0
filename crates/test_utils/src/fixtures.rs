//! Pre-built Test Fixtures
//!
//! Provides ready-to-use inputs for the fund shapes the share roll tests
//! exercise most. Every fixture uses a $1,000.00 par value and a 2023 prior
//! year, so contribution series are named `Series <month>/2024`.

use domain_share_roll::{MonthlyActivity, PriorSeries, ShareRollInput};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Standard par value used by the fixtures
pub const FIXTURE_PAR_VALUE: Decimal = dec!(1000);

/// Prior year used by the fixtures
pub const FIXTURE_PRIOR_YEAR: i32 = 2023;

/// Fixture for prior-year series
pub struct SeriesFixtures;

impl SeriesFixtures {
    /// The initial series at par: 1,000 shares @ $1,000
    pub fn initial() -> PriorSeries {
        PriorSeries::new("Initial Series", dec!(1000), dec!(1000))
    }

    /// A series priced above par that rolls up at year start
    pub fn above_par() -> PriorSeries {
        PriorSeries::new("Series A", dec!(500), dec!(1200))
    }

    /// A series priced below par that stays separate
    pub fn below_par() -> PriorSeries {
        PriorSeries::new("Series B", dec!(200), dec!(900))
    }

    /// A series exactly at par; only strictly greater NAVs roll up
    pub fn at_par() -> PriorSeries {
        PriorSeries::new("Series C", dec!(300), dec!(1000))
    }

    /// An unfunded row, ignored by the calculation
    pub fn unfunded() -> PriorSeries {
        PriorSeries::new("Series D", Decimal::ZERO, dec!(1000))
    }
}

/// Fixture for monthly activity
pub struct ActivityFixtures;

impl ActivityFixtures {
    /// January: $100,000 contribution and $50,000 profit
    pub fn january_contribution() -> MonthlyActivity {
        MonthlyActivity::new(1)
            .with_contribution(dec!(100000))
            .with_profit_loss(dec!(50000))
    }

    /// A month with a loss only
    pub fn loss(month: u32, amount: Decimal) -> MonthlyActivity {
        MonthlyActivity::new(month).with_profit_loss(-amount.abs())
    }

    /// A month with a profit only
    pub fn profit(month: u32, amount: Decimal) -> MonthlyActivity {
        MonthlyActivity::new(month).with_profit_loss(amount.abs())
    }
}

/// Fixture for complete inputs
pub struct ShareRollFixtures;

impl ShareRollFixtures {
    /// Only the initial series, no activity
    pub fn single_series() -> ShareRollInput {
        ShareRollInput::new(FIXTURE_PAR_VALUE, FIXTURE_PRIOR_YEAR)
            .with_series(SeriesFixtures::initial())
    }

    /// Initial series plus a January contribution and profit
    pub fn january_contribution() -> ShareRollInput {
        Self::single_series().with_activity(ActivityFixtures::january_contribution())
    }

    /// Initial series, one series above par and one below
    pub fn roll_up() -> ShareRollInput {
        ShareRollInput::new(FIXTURE_PAR_VALUE, FIXTURE_PRIOR_YEAR)
            .with_series(SeriesFixtures::initial())
            .with_series(SeriesFixtures::above_par())
            .with_series(SeriesFixtures::below_par())
    }

    /// Every prior-year shape, including an at-par and an unfunded row
    pub fn mixed_fund() -> ShareRollInput {
        Self::roll_up()
            .with_series(SeriesFixtures::at_par())
            .with_series(SeriesFixtures::unfunded())
    }
}
