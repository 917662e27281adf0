//! Core Kernel - Foundational types and utilities for the share roll system
//!
//! This crate provides the fundamental building blocks used across the workspace:
//! - Lenient amount parsing and fixed-format display of amounts and share counts
//! - Reporting periods (beginning of year and calendar months)
//! - Common identifiers and error types

pub mod amount;
pub mod period;
pub mod identifiers;
pub mod error;

pub use amount::{
    parse_amount, format_currency, format_number, approx_eq, relative_approx_eq,
    AMOUNT_TOLERANCE, RELATIVE_TOLERANCE, CURRENCY_PRECISION, SHARE_PRECISION,
};
pub use period::{ReportingPeriod, MONTHS_PER_YEAR};
pub use identifiers::CalculationId;
pub use error::CoreError;
