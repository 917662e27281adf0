//! Beginning-of-year roll-up
//!
//! Any non-initial series priced above par at year start is merged into the
//! initial series at the initial series' opening NAV per share. The price is
//! fixed before the first transfer, so each transfer is independent of the
//! order the series were entered in.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use core_kernel::{format_currency, format_number, ReportingPeriod, CURRENCY_PRECISION, SHARE_PRECISION};
use crate::calc_log::{CalcLog, StepKind};
use crate::error::ShareRollError;
use crate::ledger::SeriesLedger;
use crate::{calculate_shares, ALL_SERIES};

/// A completed roll-up transfer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollUpTransfer {
    /// Series that was rolled up
    pub source: String,
    /// Shares moved out of the source
    pub shares_out: Decimal,
    /// Dollar value transferred
    pub transfer_value: Decimal,
    /// Shares credited to the initial series
    pub shares_in: Decimal,
}

/// Rolls every eligible series into the initial series
///
/// Eligible series are processed in entry order. Running this a second time
/// on the same ledger is a no-op because rolled-up series hold no shares.
///
/// # Arguments
///
/// * `ledger` - Series balances at the start of the year
/// * `par_value` - NAV per share above which a series rolls up
/// * `log` - Calculation log to append to
///
/// # Returns
///
/// The transfers performed, in processing order
///
/// # Errors
///
/// Returns an overflow error if a transfer cannot be priced.
pub fn apply_roll_up(
    ledger: &mut SeriesLedger,
    par_value: Decimal,
    log: &mut CalcLog,
) -> Result<Vec<RollUpTransfer>, ShareRollError> {
    let period = ReportingPeriod::BeginningOfYear;

    log.record(
        StepKind::RollUpCheck,
        period,
        ALL_SERIES,
        format!(
            "Checking if any series NAV > par value ({})",
            format_currency(par_value, CURRENCY_PRECISION)
        ),
        "",
    );

    let eligible: Vec<String> = ledger
        .iter()
        .filter(|s| !s.is_initial && s.is_active() && s.nav_per_share > par_value)
        .map(|s| s.name.clone())
        .collect();

    let initial = ledger
        .initial()
        .filter(|s| s.is_active())
        .map(|s| (s.name.clone(), s.nav_per_share));

    let (initial_name, initial_nav) = match initial {
        Some(initial) if !eligible.is_empty() => initial,
        other => {
            let reason = if other.is_none() {
                "Initial series has no shares"
            } else {
                "No series with NAV > par value"
            };
            log.record(StepKind::RollUpCheck, period, ALL_SERIES, "No roll-ups required", reason);
            return Ok(Vec::new());
        }
    };

    let mut transfers = Vec::with_capacity(eligible.len());

    for source in eligible {
        let (shares_out, source_nav, transfer_value) = match ledger.get_mut(&source) {
            Some(s) => s.roll_out()?,
            None => continue,
        };
        let shares_in = calculate_shares(transfer_value, initial_nav)?;

        log.record(
            StepKind::RollUpTransfer,
            period,
            source.as_str(),
            format!("Rolling up into {}", initial_name),
            format!(
                "Shares out: {} @ {} = {}",
                format_number(shares_out, SHARE_PRECISION),
                format_currency(source_nav, SHARE_PRECISION),
                format_currency(transfer_value, CURRENCY_PRECISION)
            ),
        );
        log.record(
            StepKind::RollUpTransfer,
            period,
            initial_name.as_str(),
            format!("Receiving roll-up from {}", source),
            format!(
                "Shares in: {} / {} = {} shares",
                format_currency(transfer_value, CURRENCY_PRECISION),
                format_currency(initial_nav, SHARE_PRECISION),
                format_number(shares_in, SHARE_PRECISION)
            ),
        );

        if let Some(target) = ledger.get_mut(&initial_name) {
            target.roll_in(shares_in, transfer_value)?;
        }

        debug!(
            source = %source,
            target = %initial_name,
            shares_out = %shares_out,
            shares_in = %shares_in,
            transfer_value = %transfer_value,
            "Rolled up series"
        );

        transfers.push(RollUpTransfer {
            source,
            shares_out,
            transfer_value,
            shares_in,
        });
    }

    Ok(transfers)
}
