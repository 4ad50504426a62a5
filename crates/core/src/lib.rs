//! Core ledger logic for Tally.
//!
//! This crate contains pure accounting logic with no web or database
//! dependencies. Data is pulled through the [`reports::ReportDataSource`] trait.
//!
//! # Modules
//!
//! - `forest` - Account hierarchy, aggregation and roll-up
//! - `period` - Reporting periods and date windows
//! - `reports` - Financial statements laid out along display mappings
//! - `trial_balance` - Beginning/midterm/ending trial balances

pub mod forest;
pub mod period;
pub mod reports;
pub mod trial_balance;
