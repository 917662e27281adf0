//! Month-by-month NAV per share snapshots
//!
//! Snapshots are captured during the calculation itself: once after the
//! roll-up and once at the end of every processed month.

use rust_decimal::Decimal;
use serde::Serialize;

use core_kernel::ReportingPeriod;
use crate::ledger::SeriesLedger;

/// NAV per share of one series at a snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesNav {
    pub series: String,
    pub nav_per_share: Decimal,
}

/// NAV per share of every active series at one point in the year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavSnapshot {
    /// `Beginning of Year` or `End of <Month>`
    pub label: String,
    /// Active series in ledger order
    pub navs: Vec<SeriesNav>,
}

impl NavSnapshot {
    /// NAV per share of `series`, if it had shares at this point
    pub fn nav_of(&self, series: &str) -> Option<Decimal> {
        self.navs
            .iter()
            .find(|n| n.series == series)
            .map(|n| n.nav_per_share)
    }
}

/// Table of snapshots with one column per series that was ever active
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NavSnapshotTable {
    /// Series columns in order of first appearance
    pub columns: Vec<String>,
    /// Snapshot rows in chronological order
    pub rows: Vec<NavSnapshot>,
}

impl NavSnapshotTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the NAV per share of every active series
    pub fn capture(&mut self, period: ReportingPeriod, ledger: &SeriesLedger) {
        let navs: Vec<SeriesNav> = ledger
            .active()
            .map(|s| SeriesNav {
                series: s.name.clone(),
                nav_per_share: s.nav_per_share,
            })
            .collect();

        for nav in &navs {
            if !self.columns.contains(&nav.series) {
                self.columns.push(nav.series.clone());
            }
        }

        self.rows.push(NavSnapshot {
            label: period.closing_label(),
            navs,
        });
    }

    /// Looks up a snapshot row by label
    ///
    /// A month entered more than once yields one row per entry, all sharing
    /// the same label. The last of them is the month's closing state and is
    /// the one returned; [`Self::rows_labelled`] yields every one.
    pub fn row(&self, label: &str) -> Option<&NavSnapshot> {
        self.rows.iter().rev().find(|r| r.label == label)
    }

    /// Every row carrying `label`, in capture order
    pub fn rows_labelled<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a NavSnapshot> + 'a {
        self.rows.iter().filter(move |r| r.label == label)
    }

    /// NAV per share of `series` in the last row labelled `label`
    pub fn value(&self, label: &str, series: &str) -> Option<Decimal> {
        self.row(label).and_then(|r| r.nav_of(series))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
