//! Reporting periods for the share roll year
//!
//! A share roll year has one opening point (after roll-ups) followed by
//! twelve calendar months. Labels produced here appear verbatim in
//! calculation logs and snapshot tables.

use chrono::Month;

use crate::error::CoreError;

/// Number of months in a share roll year
pub const MONTHS_PER_YEAR: u32 = 12;

/// A point in the share roll year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportingPeriod {
    /// Opening balances after roll-ups
    BeginningOfYear,
    /// A calendar month
    Month(Month),
}

impl ReportingPeriod {
    /// Creates a month period from a 1-based month number
    pub fn month(number: u32) -> Result<Self, CoreError> {
        u8::try_from(number)
            .ok()
            .and_then(|n| Month::try_from(n).ok())
            .map(ReportingPeriod::Month)
            .ok_or(CoreError::InvalidMonth(number))
    }

    /// Returns the 1-based month number, if this is a month
    pub fn month_number(&self) -> Option<u32> {
        match self {
            ReportingPeriod::BeginningOfYear => None,
            ReportingPeriod::Month(month) => Some(month.number_from_month()),
        }
    }

    /// Label used in calculation logs, e.g. `January`
    pub fn label(&self) -> &'static str {
        match self {
            ReportingPeriod::BeginningOfYear => "Beginning of Year",
            ReportingPeriod::Month(month) => month.name(),
        }
    }

    /// Label used for closing snapshots, e.g. `End of January`
    pub fn closing_label(&self) -> String {
        match self {
            ReportingPeriod::BeginningOfYear => self.label().to_string(),
            ReportingPeriod::Month(month) => format!("End of {}", month.name()),
        }
    }
}

impl std::fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
