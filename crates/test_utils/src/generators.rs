//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating share roll inputs. Generated
//! inputs always validate: the first prior-year series is funded and every
//! month number is in range. Redemptions sometimes target series that do
//! not exist or were rolled up, so skip paths are exercised too.

use domain_share_roll::{MonthlyActivity, OperationOrder, PriorSeries, ShareRollInput};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for par values between $900.00 and $1,200.00
pub fn par_value_strategy() -> impl Strategy<Value = Decimal> {
    (90_000i64..120_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for NAV per share values between $500.00 and $2,000.00
pub fn nav_per_share_strategy() -> impl Strategy<Value = Decimal> {
    (50_000i64..200_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for share balances with up to four decimal places
pub fn share_balance_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|n| Decimal::new(n, 4))
}

/// Strategy for positive dollar amounts up to $250,000.00
pub fn dollar_amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..25_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for monthly P/L between -$25,000.00 and $100,000.00
pub fn profit_loss_strategy() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        1 => Just(Decimal::ZERO),
        4 => (-2_500_000i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2)),
    ]
}

/// Strategy for either operation order
pub fn operation_order_strategy() -> impl Strategy<Value = OperationOrder> {
    prop_oneof![
        Just(OperationOrder::ContributionFirst),
        Just(OperationOrder::RedemptionFirst),
    ]
}

/// Strategy for one to five funded prior-year series named `Series 0..n`
pub fn prior_series_strategy() -> impl Strategy<Value = Vec<PriorSeries>> {
    proptest::collection::vec((share_balance_strategy(), nav_per_share_strategy()), 1..=5)
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (shares, nav))| PriorSeries::new(format!("Series {}", i), shares, nav))
                .collect()
        })
}

/// Names a redemption may target: prior-year series, contribution series
/// and a name that never exists
fn redemption_target(pick: usize, month: u32) -> String {
    match pick {
        0..=4 => format!("Series {}", pick),
        5 => format!("Series {}/2024", month.saturating_sub(1).max(1)),
        _ => "Series Missing".to_string(),
    }
}

/// Strategy for one month of activity
pub fn monthly_activity_strategy(month: u32) -> impl Strategy<Value = MonthlyActivity> {
    (
        profit_loss_strategy(),
        prop_oneof![Just(Decimal::ZERO), dollar_amount_strategy()],
        prop_oneof![2 => Just(None::<Decimal>), 3 => dollar_amount_strategy().prop_map(Some), 1 => Just(Some(Decimal::ZERO))],
        0usize..7,
    )
        .prop_map(move |(profit_loss, contribution, redemption, pick)| {
            let activity = MonthlyActivity::new(month)
                .with_profit_loss(profit_loss)
                .with_contribution(contribution);
            let target = redemption_target(pick, month);
            match redemption {
                None => activity,
                Some(amount) if amount.is_zero() => activity.with_full_redemption(target),
                Some(amount) => activity.with_redemption(target, amount),
            }
        })
}

/// Strategy for a full year of activity, months 1 through 12
pub fn year_activity_strategy() -> impl Strategy<Value = Vec<MonthlyActivity>> {
    (1u32..=12)
        .map(monthly_activity_strategy)
        .collect::<Vec<_>>()
}

/// Strategy for a complete, valid share roll input
pub fn share_roll_input_strategy() -> impl Strategy<Value = ShareRollInput> {
    (par_value_strategy(), prior_series_strategy(), year_activity_strategy()).prop_map(
        |(par_value, prior_series, monthly_activity)| ShareRollInput {
            par_value,
            prior_year: 2023,
            prior_series,
            monthly_activity,
        },
    )
}
