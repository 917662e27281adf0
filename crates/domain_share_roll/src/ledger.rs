//! Ordered series ledger
//!
//! Series are keyed by name but iterated in insertion order: roll-up
//! processing, P/L allocation and log output all follow the order in which
//! series were entered or created.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::error::ShareRollError;
use crate::input::PriorSeries;
use crate::series::SeriesBalance;

/// Insertion-ordered map of series balances for one calculation
#[derive(Debug, Clone, Default)]
pub struct SeriesLedger {
    series: Vec<SeriesBalance>,
    index: HashMap<String, usize>,
    initial: Option<usize>,
}

impl SeriesLedger {
    /// Creates an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a ledger from prior-year series
    ///
    /// Unfunded entries (blank name or no shares) are skipped. The first
    /// funded entry becomes the initial series.
    ///
    /// # Errors
    ///
    /// Returns a validation error if no funded series remains or two funded
    /// entries share a name.
    pub fn from_prior_series(prior: &[PriorSeries]) -> Result<Self, ShareRollError> {
        let mut ledger = Self::new();

        for entry in prior.iter().filter(|s| s.is_funded()) {
            let is_initial = ledger.initial.is_none();
            ledger.insert(SeriesBalance::from_prior(entry, is_initial))?;
        }

        if ledger.is_empty() {
            return Err(ShareRollError::validation(
                "At least one prior year series with shares > 0 is required",
            ));
        }

        Ok(ledger)
    }

    /// Adds a series to the end of the ledger
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is already present.
    pub fn insert(&mut self, balance: SeriesBalance) -> Result<(), ShareRollError> {
        if self.index.contains_key(&balance.name) {
            return Err(ShareRollError::validation(format!(
                "Duplicate series name: {}",
                balance.name
            )));
        }

        let position = self.series.len();
        if balance.is_initial && self.initial.is_none() {
            self.initial = Some(position);
        }
        self.index.insert(balance.name.clone(), position);
        self.series.push(balance);
        Ok(())
    }

    /// Looks up a series by name
    pub fn get(&self, name: &str) -> Option<&SeriesBalance> {
        self.index.get(name).map(|&i| &self.series[i])
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut SeriesBalance> {
        match self.index.get(name) {
            Some(&i) => self.series.get_mut(i),
            None => None,
        }
    }

    /// Returns true if a series with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// The roll-up destination
    pub fn initial(&self) -> Option<&SeriesBalance> {
        self.initial.map(|i| &self.series[i])
    }

    /// All series in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &SeriesBalance> {
        self.series.iter()
    }

    /// Series with shares outstanding, in insertion order
    pub fn active(&self) -> impl Iterator<Item = &SeriesBalance> {
        self.series.iter().filter(|s| s.is_active())
    }

    /// Total NAV across series with shares outstanding
    pub fn total_active_nav(&self) -> Decimal {
        self.active().map(|s| s.total_nav).sum()
    }

    /// Number of series ever recorded
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Returns true if no series has been recorded
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Returns `base`, or `base-2`, `base-3`, ... if taken
    pub fn unique_name(&self, base: &str) -> String {
        if !self.contains(base) {
            return base.to_string();
        }

        let mut counter = 2u32;
        loop {
            let candidate = format!("{}-{}", base, counter);
            if !self.contains(&candidate) {
                return candidate;
            }
            counter += 1;
        }
    }

    /// Consumes the ledger, returning balances in insertion order
    pub fn into_balances(self) -> Vec<SeriesBalance> {
        self.series
    }
}
