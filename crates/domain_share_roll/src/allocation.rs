//! Pro-rata profit/loss allocation
//!
//! A month's P/L is split across series in proportion to each series' total
//! NAV. Weights are computed from a snapshot taken before any series is
//! touched, so no series is weighted by a partially updated NAV.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use core_kernel::{format_currency, ReportingPeriod, CURRENCY_PRECISION, SHARE_PRECISION};
use crate::calc_log::{CalcLog, StepKind};
use crate::error::ShareRollError;
use crate::ledger::SeriesLedger;
use crate::ALL_SERIES;

/// One series' portion of a month's P/L
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitLossShare {
    /// Series name
    pub series: String,
    /// Total NAV of the series in the snapshot
    pub base_nav: Decimal,
    /// Fraction of the fund-level P/L
    pub weight: Decimal,
    /// Dollar amount allocated
    pub amount: Decimal,
}

/// Allocation of one month's P/L, computed from an immutable snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitLossPlan {
    /// Fund-level P/L
    pub profit_loss: Decimal,
    /// Sum of the snapshot NAVs
    pub total_nav: Decimal,
    /// Per-series shares in ledger order
    pub shares: Vec<ProfitLossShare>,
}

impl ProfitLossPlan {
    /// Builds an allocation plan from the current ledger
    ///
    /// Series with shares outstanding and a positive total NAV take part.
    /// The last participant receives the remainder so the shares sum exactly
    /// to `profit_loss`.
    ///
    /// # Returns
    ///
    /// `None` when there is nothing to allocate or no positive NAV to weight by
    pub fn from_ledger(ledger: &SeriesLedger, profit_loss: Decimal) -> Option<Self> {
        if profit_loss.is_zero() {
            return None;
        }

        let snapshot: Vec<(String, Decimal)> = ledger
            .active()
            .filter(|s| s.total_nav > Decimal::ZERO)
            .map(|s| (s.name.clone(), s.total_nav))
            .collect();

        let total_nav: Decimal = snapshot.iter().map(|(_, nav)| *nav).sum();
        if total_nav <= Decimal::ZERO {
            return None;
        }

        let last = snapshot.len() - 1;
        let mut allocated = Decimal::ZERO;
        let mut shares = Vec::with_capacity(snapshot.len());

        for (i, (series, base_nav)) in snapshot.into_iter().enumerate() {
            let weight = base_nav / total_nav;
            let amount = if i == last {
                profit_loss - allocated
            } else {
                profit_loss * weight
            };
            allocated += amount;
            shares.push(ProfitLossShare {
                series,
                base_nav,
                weight,
                amount,
            });
        }

        Some(Self {
            profit_loss,
            total_nav,
            shares,
        })
    }

    /// Total amount allocated across series
    pub fn allocated(&self) -> Decimal {
        self.shares.iter().map(|s| s.amount).sum()
    }
}

/// Allocates `profit_loss` across the ledger and logs each step
///
/// # Returns
///
/// The amount actually allocated (zero if allocation was skipped)
///
/// # Errors
///
/// Returns an overflow error if a series cannot be repriced.
pub fn allocate_profit_loss(
    ledger: &mut SeriesLedger,
    profit_loss: Decimal,
    period: ReportingPeriod,
    log: &mut CalcLog,
) -> Result<Decimal, ShareRollError> {
    let Some(plan) = ProfitLossPlan::from_ledger(ledger, profit_loss) else {
        if !profit_loss.is_zero() {
            debug!(period = %period, profit_loss = %profit_loss, "No NAV to allocate P/L against");
        }
        return Ok(Decimal::ZERO);
    };

    log.record(
        StepKind::ProfitLossAllocation,
        period,
        ALL_SERIES,
        format!("Total P/L: {}", format_currency(plan.profit_loss, CURRENCY_PRECISION)),
        format!(
            "Total NAV for allocation: {}",
            format_currency(plan.total_nav, CURRENCY_PRECISION)
        ),
    );

    for share in &plan.shares {
        let Some(series) = ledger.get_mut(&share.series) else {
            continue;
        };
        let old_nav = series.nav_per_share;
        series.apply_profit_loss(share.amount)?;

        log.record(
            StepKind::ProfitLossAllocation,
            period,
            share.series.as_str(),
            format!("P/L share: {}", format_currency(share.amount, CURRENCY_PRECISION)),
            format!(
                "NAV/share: {} → {}",
                format_currency(old_nav, SHARE_PRECISION),
                format_currency(series.nav_per_share, SHARE_PRECISION)
            ),
        );
    }

    debug!(
        period = %period,
        profit_loss = %plan.profit_loss,
        series = plan.shares.len(),
        "Allocated P/L"
    );

    Ok(plan.allocated())
}
