//! Share roll report assembly and reconciliation

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use core_kernel::{
    approx_eq, format_currency, format_number, CalculationId, AMOUNT_TOLERANCE, SHARE_PRECISION,
};
use crate::calc_log::CalcLog;
use crate::monthly::OperationOrder;
use crate::nav_snapshot::NavSnapshotTable;
use crate::series::SeriesBalance;
use crate::{NAV_PLACEHOLDER, TOTAL_ROW_LABEL};

/// One series row of the share roll summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareRollRow {
    pub series: String,
    pub beginning_shares: Decimal,
    pub transfers_in: Decimal,
    pub transfers_out: Decimal,
    pub contributed_shares: Decimal,
    pub redeemed_shares: Decimal,
    pub ending_shares: Decimal,
    /// Absent when the series ends the year with no shares
    pub ending_nav_per_share: Option<Decimal>,
}

impl From<&SeriesBalance> for ShareRollRow {
    fn from(series: &SeriesBalance) -> Self {
        Self {
            series: series.name.clone(),
            beginning_shares: series.beginning_shares,
            transfers_in: series.transfers_in,
            transfers_out: series.transfers_out,
            contributed_shares: series.contributed_shares,
            redeemed_shares: series.redeemed_shares,
            ending_shares: series.shares,
            ending_nav_per_share: series.reported_nav(),
        }
    }
}

/// Column totals of the summary; NAV per share has no meaningful total
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShareRollTotals {
    pub beginning_shares: Decimal,
    pub transfers_in: Decimal,
    pub transfers_out: Decimal,
    pub contributed_shares: Decimal,
    pub redeemed_shares: Decimal,
    pub ending_shares: Decimal,
}

impl ShareRollTotals {
    /// Sums every numeric column of `rows`
    pub fn from_rows(rows: &[ShareRollRow]) -> Self {
        rows.iter().fold(Self::default(), |mut acc, row| {
            acc.beginning_shares += row.beginning_shares;
            acc.transfers_in += row.transfers_in;
            acc.transfers_out += row.transfers_out;
            acc.contributed_shares += row.contributed_shares;
            acc.redeemed_shares += row.redeemed_shares;
            acc.ending_shares += row.ending_shares;
            acc
        })
    }
}

/// Result of the share roll self-check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reconciliation {
    /// Beginning + transfers in - transfers out + contributed - redeemed
    pub calculated_ending: Decimal,
    /// Sum of ending shares
    pub reported_ending: Decimal,
    /// `calculated_ending - reported_ending`
    pub difference: Decimal,
    /// Present when the difference exceeds tolerance
    pub warning: Option<String>,
}

impl Reconciliation {
    /// Checks that the share roll totals tie out
    pub fn check(totals: &ShareRollTotals) -> Self {
        let calculated_ending = totals.beginning_shares + totals.transfers_in
            - totals.transfers_out
            + totals.contributed_shares
            - totals.redeemed_shares;
        let reported_ending = totals.ending_shares;
        let difference = calculated_ending - reported_ending;

        let warning = (!approx_eq(calculated_ending, reported_ending, AMOUNT_TOLERANCE)).then(|| {
            format!(
                "Reconciliation difference: {} calculated vs {} reported (diff: {})",
                format_number(calculated_ending, SHARE_PRECISION),
                format_number(reported_ending, SHARE_PRECISION),
                format_number(difference, SHARE_PRECISION)
            )
        });

        Self {
            calculated_ending,
            reported_ending,
            difference,
            warning,
        }
    }

    pub fn is_balanced(&self) -> bool {
        self.warning.is_none()
    }
}

/// Dollar check figures for the year
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CheckFigures {
    /// Prior-year NAV of the funded series
    pub beginning_total_nav: Decimal,
    /// NAV of series with shares at year end
    pub total_ending_nav: Decimal,
    /// Sum of the monthly P/L inputs
    pub total_profit_loss: Decimal,
    /// P/L actually allocated to series
    pub total_profit_loss_allocated: Decimal,
    /// Contributions that created series
    pub total_contributions: Decimal,
    /// Dollar value paid out by redemptions
    pub total_redemptions: Decimal,
}

impl CheckFigures {
    /// NAV the fund should hold at year end given the year's flows
    pub fn expected_ending_nav(&self) -> Decimal {
        self.beginning_total_nav + self.total_contributions + self.total_profit_loss_allocated
            - self.total_redemptions
    }
}

/// Complete output of a share roll calculation
#[derive(Debug, Clone, Serialize)]
pub struct ShareRollReport {
    pub calculation_id: CalculationId,
    pub calculated_at: DateTime<Utc>,
    pub prior_year: i32,
    pub current_year: i32,
    pub par_value: Decimal,
    pub operation_order: OperationOrder,
    /// Summary rows in report order
    pub rows: Vec<ShareRollRow>,
    pub totals: ShareRollTotals,
    pub check_figures: CheckFigures,
    pub reconciliation: Reconciliation,
    pub calc_log: CalcLog,
    pub nav_snapshots: Option<NavSnapshotTable>,
    /// Final balances in ledger order
    pub series: Vec<SeriesBalance>,
}

impl ShareRollReport {
    /// Summary row for `series`
    pub fn row(&self, series: &str) -> Option<&ShareRollRow> {
        self.rows.iter().find(|r| r.series == series)
    }

    /// Final balance for `series`
    pub fn balance(&self, series: &str) -> Option<&SeriesBalance> {
        self.series.iter().find(|s| s.name == series)
    }

    /// Renders the summary table as tab-separated lines for display
    ///
    /// Share counts use 4 decimals and NAV per share is shown as currency.
    /// Series without shares and the totals row show a placeholder NAV.
    pub fn render_summary(&self) -> String {
        let mut lines = vec![[
            "Series",
            "Beginning Shares",
            "Transfers In",
            "Transfers Out",
            "Contributed Shares",
            "Redeemed Shares",
            "Ending Shares",
            "Ending NAV/Share",
        ]
        .join("\t")];

        for row in &self.rows {
            let nav = row
                .ending_nav_per_share
                .map(|nav| format_currency(nav, SHARE_PRECISION))
                .unwrap_or_else(|| NAV_PLACEHOLDER.to_string());
            lines.push(render_line(
                &row.series,
                [
                    row.beginning_shares,
                    row.transfers_in,
                    row.transfers_out,
                    row.contributed_shares,
                    row.redeemed_shares,
                    row.ending_shares,
                ],
                &nav,
            ));
        }

        let totals = &self.totals;
        lines.push(render_line(
            TOTAL_ROW_LABEL,
            [
                totals.beginning_shares,
                totals.transfers_in,
                totals.transfers_out,
                totals.contributed_shares,
                totals.redeemed_shares,
                totals.ending_shares,
            ],
            NAV_PLACEHOLDER,
        ));

        lines.join("\n")
    }
}

fn render_line(label: &str, shares: [Decimal; 6], nav: &str) -> String {
    let mut cells = vec![label.to_string()];
    cells.extend(shares.iter().map(|s| format_number(*s, SHARE_PRECISION)));
    cells.push(nav.to_string());
    cells.join("\t")
}

/// Builds summary rows sorted for presentation
///
/// The initial series comes first, then prior-year series, then
/// contribution series. A name containing `/` counts as a contribution
/// series. Ties within a group sort alphabetically.
pub fn summary_rows<'a>(
    balances: impl IntoIterator<Item = &'a SeriesBalance>,
    initial_name: Option<&str>,
) -> Vec<ShareRollRow> {
    let mut rows: Vec<ShareRollRow> = balances.into_iter().map(ShareRollRow::from).collect();
    rows.sort_by(|a, b| compare_rows(a, b, initial_name));
    rows
}

fn row_group(name: &str, initial_name: Option<&str>) -> u8 {
    if Some(name) == initial_name {
        0
    } else if !name.contains('/') {
        1
    } else {
        2
    }
}

fn compare_rows(a: &ShareRollRow, b: &ShareRollRow, initial_name: Option<&str>) -> Ordering {
    row_group(&a.series, initial_name)
        .cmp(&row_group(&b.series, initial_name))
        .then_with(|| a.series.cmp(&b.series))
}
