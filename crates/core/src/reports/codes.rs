//! Well-known account codes used to locate specific nodes.
//!
//! Codes follow the four-digit numbering convention of the chart of accounts.
//! Any of them may be absent from a given chart; lookups treat a miss as zero.

/// Operating revenue total.
pub const OPERATING_REVENUE: &str = "4000";
/// Operating cost total.
pub const OPERATING_COST: &str = "5000";
/// Selling expense total.
pub const SELLING_EXPENSE: &str = "6100";
/// Administrative expense total.
pub const ADMINISTRATIVE_EXPENSE: &str = "6200";
/// Research and development expense total.
pub const RD_EXPENSE: &str = "6300";
/// Net income for the period, injected by the income statement.
pub const NET_INCOME: &str = "8200";
/// Display name of the injected net income node.
pub const NET_INCOME_NAME: &str = "Net income";
