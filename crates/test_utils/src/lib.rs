//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! share roll test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built inputs for common fund shapes
//! - `builders`: Builder patterns for share roll inputs
//! - `assertions`: Custom assertion helpers for share roll reports
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
