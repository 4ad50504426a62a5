//! Report data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::forest::NormalBalance;

/// One account in the code-keyed report map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMapEntry {
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Normal balance side.
    pub normal_balance: NormalBalance,
    /// Rolled-up balance on the normal side.
    pub amount: Decimal,
    /// Depth in the account tree (root = 0).
    pub depth: usize,
    /// Share of the report's base total, in percent.
    pub percentage: Decimal,
}

/// A statement line ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRow {
    /// Account code.
    pub code: String,
    /// Label.
    pub name: String,
    /// Amount in the current period.
    pub cur_period_amount: Decimal,
    /// Formatted current amount.
    pub cur_period_amount_string: String,
    /// Current amount as a percentage of the base total.
    pub cur_period_percentage: Decimal,
    /// Amount in the comparative period.
    pub pre_period_amount: Decimal,
    /// Formatted comparative amount.
    pub pre_period_amount_string: String,
    /// Comparative amount as a percentage of the base total.
    pub pre_period_percentage: Decimal,
    /// Indentation depth.
    pub indent: u8,
}

/// A ratio computed independently for both periods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRatio {
    /// Current period ratio.
    pub cur_ratio: Decimal,
    /// Comparative period ratio.
    pub pre_ratio: Decimal,
}

/// Derived metrics of an income statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStatementInfo {
    /// Revenue / (operating cost + selling + administrative expense).
    pub revenue_to_cost: PeriodRatio,
    /// R&D expense / revenue.
    pub rd_to_revenue: PeriodRatio,
}

/// A generated report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report<O> {
    /// Report type identifier.
    pub report_type: String,
    /// Statement lines.
    pub content: Vec<DisplayRow>,
    /// Report-specific derived metrics.
    pub other_info: O,
}
