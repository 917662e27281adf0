//! Share Roll Domain
//!
//! This crate implements the annual share roll for a multi-series fund:
//! prior-year balances are rolled forward month by month through
//! contributions, profit/loss allocation and redemptions, producing year-end
//! share balances and NAV per share for every series.
//!
//! # Key Concepts
//!
//! - **Series**: an accounting sub-ledger with its own share count and NAV per share
//! - **Initial Series**: the first prior-year series entered; the roll-up destination
//! - **Par Value**: roll-up threshold and issue price for contribution-created series
//! - **Roll-up**: at year start, every other series priced above par is merged
//!   into the initial series
//! - **Share Roll**: beginning + transfers in - transfers out + contributed -
//!   redeemed = ending
//!
//! # Example
//!
//! ```rust
//! use domain_share_roll::{MonthlyActivity, PriorSeries, ShareRollEngine, ShareRollInput};
//! use rust_decimal_macros::dec;
//!
//! let input = ShareRollInput::new(dec!(1000), 2023)
//!     .with_series(PriorSeries::new("Initial Series", dec!(1000), dec!(1000)))
//!     .with_activity(
//!         MonthlyActivity::new(1)
//!             .with_contribution(dec!(100000))
//!             .with_profit_loss(dec!(50000)),
//!     );
//!
//! let report = ShareRollEngine::default().calculate(&input).unwrap();
//! assert!(report.reconciliation.is_balanced());
//! assert_eq!(report.rows[1].series, "Series 1/2024");
//! ```

pub mod input;
pub mod series;
pub mod ledger;
pub mod calc_log;
pub mod rollup;
pub mod allocation;
pub mod monthly;
pub mod nav_snapshot;
pub mod report;
pub mod engine;
pub mod export;
pub mod error;

pub use input::{MonthlyActivity, PriorSeries, ShareRollInput, MAX_FUND_NAV, MAX_INPUT_AMOUNT};
pub use series::SeriesBalance;
pub use ledger::SeriesLedger;
pub use calc_log::{CalcLog, CalcLogEntry, StepKind};
pub use rollup::{apply_roll_up, RollUpTransfer};
pub use allocation::{allocate_profit_loss, ProfitLossPlan, ProfitLossShare};
pub use monthly::{MonthOutcome, MonthlyProcessor, MonthlyStep, OperationOrder};
pub use nav_snapshot::{NavSnapshot, NavSnapshotTable, SeriesNav};
pub use report::{CheckFigures, Reconciliation, ShareRollReport, ShareRollRow, ShareRollTotals};
pub use engine::{EngineConfig, ShareRollEngine};
pub use export::ExportSheet;
pub use error::ShareRollError;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Series name used for log entries that apply to the whole fund
pub const ALL_SERIES: &str = "All";

/// Name of the totals row in the summary table
pub const TOTAL_ROW_LABEL: &str = "TOTAL";

/// Placeholder rendered where a NAV per share has no meaningful value
pub const NAV_PLACEHOLDER: &str = "—";

/// Largest share count a single calculation step may produce
pub const MAX_SHARE_COUNT: Decimal = dec!(1000000000000000000000000);

/// Calculates shares from an amount and NAV per share
///
/// # Arguments
///
/// * `amount` - The monetary amount to convert
/// * `nav` - The NAV per share
///
/// # Returns
///
/// The number of shares, or zero when `nav` is zero
///
/// # Errors
///
/// Returns an overflow error when the quotient does not fit in a `Decimal`
/// or exceeds [`MAX_SHARE_COUNT`].
///
/// # Example
///
/// ```rust
/// use domain_share_roll::calculate_shares;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(calculate_shares(dec!(100000), dec!(1000)).unwrap(), dec!(100));
/// assert_eq!(calculate_shares(dec!(100000), dec!(0)).unwrap(), dec!(0));
/// assert!(calculate_shares(dec!(100000), dec!(0.0000000000000000000001)).is_err());
/// ```
pub fn calculate_shares(amount: Decimal, nav: Decimal) -> Result<Decimal, ShareRollError> {
    if nav.is_zero() {
        return Ok(Decimal::ZERO);
    }
    amount
        .checked_div(nav)
        .filter(|shares| shares.abs() <= MAX_SHARE_COUNT)
        .ok_or_else(|| ShareRollError::overflow(format!("{} / {} is not a valid share count", amount, nav)))
}

/// Calculates the value of shares at a given NAV per share
///
/// # Errors
///
/// Returns an overflow error when the product does not fit in a `Decimal`.
pub fn calculate_value(shares: Decimal, nav: Decimal) -> Result<Decimal, ShareRollError> {
    shares
        .checked_mul(nav)
        .ok_or_else(|| ShareRollError::overflow(format!("{} shares @ {}", shares, nav)))
}

/// Runs a share roll with the default engine configuration
pub fn calculate_share_roll(input: &ShareRollInput) -> Result<ShareRollReport, ShareRollError> {
    ShareRollEngine::default().calculate(input)
}
