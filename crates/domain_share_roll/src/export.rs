//! CSV export of share roll results
//!
//! Numeric cells are written as plain decimals (no currency symbols or
//! thousands separators) so spreadsheets can recompute from them. Cells with
//! no meaningful value are left empty.

use std::fmt;
use std::str::FromStr;

use csv::{Writer, WriterBuilder};
use rust_decimal::Decimal;

use crate::error::ShareRollError;
use crate::input::ShareRollInput;
use crate::report::ShareRollReport;
use crate::TOTAL_ROW_LABEL;

const SUMMARY_HEADERS: [&str; 8] = [
    "Series",
    "Beginning Shares",
    "Transfers In",
    "Transfers Out",
    "Contributed Shares",
    "Redeemed Shares",
    "Ending Shares",
    "Ending NAV per Share",
];

/// Exportable views of a calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportSheet {
    /// Share roll summary with totals row
    Summary,
    /// Step-by-step calculation log
    CalculationLog,
    /// Month-end NAV per share by series
    NavSnapshots,
    /// Parameters, prior-year series and monthly activity
    Inputs,
}

impl ExportSheet {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportSheet::Summary => "summary",
            ExportSheet::CalculationLog => "log",
            ExportSheet::NavSnapshots => "nav",
            ExportSheet::Inputs => "inputs",
        }
    }

    /// Suggested download file name
    pub fn file_name(&self, current_year: i32) -> String {
        format!("share_roll_{}_{}.csv", current_year, self.as_str())
    }

    /// Renders this sheet as CSV
    pub fn render(&self, input: &ShareRollInput, report: &ShareRollReport) -> Result<String, ShareRollError> {
        match self {
            ExportSheet::Summary => summary_csv(report),
            ExportSheet::CalculationLog => calc_log_csv(report),
            ExportSheet::NavSnapshots => nav_snapshots_csv(report),
            ExportSheet::Inputs => inputs_csv(input),
        }
    }
}

impl fmt::Display for ExportSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportSheet {
    type Err = ShareRollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "summary" => Ok(ExportSheet::Summary),
            "log" | "calculation_log" => Ok(ExportSheet::CalculationLog),
            "nav" | "nav_snapshots" => Ok(ExportSheet::NavSnapshots),
            "inputs" => Ok(ExportSheet::Inputs),
            other => Err(ShareRollError::validation(format!("Unknown export sheet: {}", other))),
        }
    }
}

/// Share roll summary: one row per series plus a totals row
pub fn summary_csv(report: &ShareRollReport) -> Result<String, ShareRollError> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(SUMMARY_HEADERS)?;

    for row in &report.rows {
        writer.write_record([
            row.series.clone(),
            cell(row.beginning_shares),
            cell(row.transfers_in),
            cell(row.transfers_out),
            cell(row.contributed_shares),
            cell(row.redeemed_shares),
            cell(row.ending_shares),
            row.ending_nav_per_share.map(cell).unwrap_or_default(),
        ])?;
    }

    let totals = &report.totals;
    writer.write_record([
        TOTAL_ROW_LABEL.to_string(),
        cell(totals.beginning_shares),
        cell(totals.transfers_in),
        cell(totals.transfers_out),
        cell(totals.contributed_shares),
        cell(totals.redeemed_shares),
        cell(totals.ending_shares),
        String::new(),
    ])?;

    finish(writer)
}

/// Calculation log in entry order
pub fn calc_log_csv(report: &ShareRollReport) -> Result<String, ShareRollError> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(["Step", "Month", "Series", "Description", "Details"])?;

    for entry in report.calc_log.entries() {
        writer.write_record([
            entry.step.label(),
            entry.period.as_str(),
            entry.series.as_str(),
            entry.description.as_str(),
            entry.details.as_str(),
        ])?;
    }

    finish(writer)
}

/// NAV per share by month; blank where a series had no shares
pub fn nav_snapshots_csv(report: &ShareRollReport) -> Result<String, ShareRollError> {
    let mut writer = Writer::from_writer(Vec::new());
    let Some(table) = &report.nav_snapshots else {
        writer.write_record(["Month"])?;
        return finish(writer);
    };

    let mut header = vec!["Month".to_string()];
    header.extend(table.columns.iter().cloned());
    writer.write_record(&header)?;

    for row in &table.rows {
        let mut record = vec![row.label.clone()];
        record.extend(
            table
                .columns
                .iter()
                .map(|series| row.nav_of(series).map(cell).unwrap_or_default()),
        );
        writer.write_record(&record)?;
    }

    finish(writer)
}

/// Calculation inputs in three blocks separated by blank lines
pub fn inputs_csv(input: &ShareRollInput) -> Result<String, ShareRollError> {
    let mut writer = WriterBuilder::new().flexible(true).from_writer(Vec::new());

    writer.write_record(["Parameter", "Value"])?;
    writer.write_record(["Prior Year".to_string(), input.prior_year.to_string()])?;
    writer.write_record(["Calculating Year".to_string(), input.current_year().to_string()])?;
    writer.write_record(["Par Value".to_string(), cell(input.par_value)])?;
    writer.write_record([""])?;

    writer.write_record(["Series", "Ending Shares", "NAV per Share", "Total NAV", "Initial"])?;
    for (i, series) in input.funded_series().enumerate() {
        writer.write_record([
            series.name.clone(),
            cell(series.ending_shares),
            cell(series.nav_per_share),
            cell(series.total_nav()),
            (i == 0).to_string(),
        ])?;
    }
    writer.write_record([""])?;

    writer.write_record([
        "Month",
        "P/L",
        "Contribution",
        "Redemption",
        "Full Redemption",
        "Redemption Series",
    ])?;
    for activity in &input.monthly_activity {
        writer.write_record([
            activity.month.to_string(),
            cell(activity.profit_loss),
            cell(activity.contribution),
            cell(activity.redemption_amount),
            activity.full_redemption.to_string(),
            activity.redemption_series.clone().unwrap_or_default(),
        ])?;
    }

    finish(writer)
}

fn cell(value: Decimal) -> String {
    value.normalize().to_string()
}

fn finish(writer: Writer<Vec<u8>>) -> Result<String, ShareRollError> {
    let bytes = writer
        .into_inner()
        .map_err(|e| ShareRollError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ShareRollError::Export(e.to_string()))
}
