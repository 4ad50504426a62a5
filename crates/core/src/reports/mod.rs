//! Financial report generation.
//!
//! This module turns line items and a chart of accounts into statements:
//! - Fetching inputs through [`ReportDataSource`]
//! - Aggregating them into a rolled-up [`AccountForest`](crate::forest::AccountForest)
//! - Percentage-annotated code maps and mapped display rows
//! - Income statement net income injection and ratios

pub mod codes;
pub mod error;
pub mod generator;
pub mod income_statement;
pub mod mapping;
pub mod source;
pub mod template;
pub mod types;


pub use error::ReportError;
pub use generator::{ReportGenerator, ReportOptions, aggregate_forest, fetch_forest};
pub use income_statement::IncomeStatement;
pub use mapping::{DisplayLine, DisplayMapping};
pub use source::{InMemorySource, ReportContext, ReportDataSource};
pub use template::{GenericTemplate, ReportTemplate};
pub use types::*;
