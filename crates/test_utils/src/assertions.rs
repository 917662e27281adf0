//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for share roll reports that give
//! more meaningful error messages than standard assertions.

use core_kernel::AMOUNT_TOLERANCE;
use domain_share_roll::{ShareRollReport, StepKind};
use rust_decimal::Decimal;

/// Asserts that two decimals are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the values differ by more than `tolerance`
pub fn assert_decimal_approx_eq(actual: Decimal, expected: Decimal, tolerance: Decimal) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "Values differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual,
        expected,
        diff,
        tolerance
    );
}

/// Asserts that the share roll totals tie out
pub fn assert_reconciles(report: &ShareRollReport) {
    assert!(
        report.reconciliation.is_balanced(),
        "Share roll does not reconcile: {:?}",
        report.reconciliation
    );
}

/// Asserts that year-end NAV equals beginning NAV plus the year's flows
pub fn assert_conserves_nav(report: &ShareRollReport) {
    let figures = &report.check_figures;
    assert_decimal_approx_eq(
        figures.total_ending_nav,
        figures.expected_ending_nav(),
        AMOUNT_TOLERANCE,
    );
}

/// Asserts that every series satisfies `total_nav = shares * nav_per_share`
pub fn assert_balances_consistent(report: &ShareRollReport) {
    for series in &report.series {
        assert!(
            series.shares >= Decimal::ZERO,
            "Series {} has negative shares: {}",
            series.name,
            series.shares
        );
        assert!(
            series.is_consistent(),
            "Series {} is inconsistent: total_nav={}, shares={}, nav_per_share={}",
            series.name,
            series.total_nav,
            series.shares,
            series.nav_per_share
        );
    }
}

/// Asserts that a series ended the year with the expected shares
///
/// # Panics
///
/// Panics if the series is missing from the report
pub fn assert_ending_shares(report: &ShareRollReport, series: &str, expected: Decimal) {
    let row = report
        .row(series)
        .unwrap_or_else(|| panic!("Series {} not found in report", series));
    assert_decimal_approx_eq(row.ending_shares, expected, AMOUNT_TOLERANCE);
}

/// Asserts that the log holds `expected` entries of `kind`
pub fn assert_log_count(report: &ShareRollReport, kind: StepKind, expected: usize) {
    let actual = report.calc_log.of_kind(kind).count();
    assert_eq!(
        actual, expected,
        "Expected {} {} entries, found {}",
        expected,
        kind.label(),
        actual
    );
}

/// Runs every invariant check that holds for any valid calculation
pub fn assert_share_roll_invariants(report: &ShareRollReport) {
    assert_reconciles(report);
    assert_conserves_nav(report);
    assert_balances_consistent(report);
}
