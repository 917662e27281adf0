//! Calculation log
//!
//! Every step that changes a balance appends an entry describing its inputs
//! and outputs. The log is output-only; the engine never reads it back.

use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::ReportingPeriod;

/// Kind of calculation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepKind {
    /// Beginning-of-year par value check
    RollUpCheck,
    /// Transfer of a series into the initial series
    RollUpTransfer,
    /// Series created from a contribution
    NewSeries,
    /// Pro-rata P/L allocation
    ProfitLossAllocation,
    /// Partial redemption
    Redemption,
    /// Redemption of every outstanding share
    FullRedemption,
    /// Redemption request that could not be applied
    RedemptionSkipped,
}

impl StepKind {
    /// Display label for reports
    pub fn label(&self) -> &'static str {
        match self {
            StepKind::RollUpCheck => "Roll-up Check",
            StepKind::RollUpTransfer => "Roll-up Transfer",
            StepKind::NewSeries => "New Series",
            StepKind::ProfitLossAllocation => "P/L Allocation",
            StepKind::Redemption => "Redemption",
            StepKind::FullRedemption => "Full Redemption",
            StepKind::RedemptionSkipped => "Redemption Skipped",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single calculation log record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalcLogEntry {
    /// Step kind
    pub step: StepKind,
    /// Period label, e.g. `Beginning of Year` or `March`
    pub period: String,
    /// Series the step applies to, or `All`
    pub series: String,
    /// Human readable description
    pub description: String,
    /// Computed figures
    pub details: String,
}

/// Append-only list of calculation steps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalcLog {
    entries: Vec<CalcLogEntry>,
}

impl CalcLog {
    /// Creates an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry
    pub fn record(
        &mut self,
        step: StepKind,
        period: ReportingPeriod,
        series: impl Into<String>,
        description: impl Into<String>,
        details: impl Into<String>,
    ) {
        self.entries.push(CalcLogEntry {
            step,
            period: period.label().to_string(),
            series: series.into(),
            description: description.into(),
            details: details.into(),
        });
    }

    /// All entries in order
    pub fn entries(&self) -> &[CalcLogEntry] {
        &self.entries
    }

    /// Entries of one kind, in order
    pub fn of_kind(&self, step: StepKind) -> impl Iterator<Item = &CalcLogEntry> {
        self.entries.iter().filter(move |e| e.step == step)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the log as tab-separated lines
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|e| {
                format!(
                    "{}\t{}\t{}\t{}\t{}",
                    e.step, e.period, e.series, e.description, e.details
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_filter() {
        let mut log = CalcLog::new();
        log.record(StepKind::RollUpCheck, ReportingPeriod::BeginningOfYear, "All", "Check", "");
        log.record(
            StepKind::NewSeries,
            ReportingPeriod::month(2).unwrap(),
            "Series 2/2024",
            "Contribution",
            "",
        );

        assert_eq!(log.len(), 2);
        let created: Vec<_> = log.of_kind(StepKind::NewSeries).collect();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].period, "February");
    }

    #[test]
    fn test_render() {
        let mut log = CalcLog::new();
        log.record(StepKind::RollUpCheck, ReportingPeriod::BeginningOfYear, "All", "Checking", "none");
        assert_eq!(log.render(), "Roll-up Check\tBeginning of Year\tAll\tChecking\tnone");
    }
}
