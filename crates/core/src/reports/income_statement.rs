//! Income statement template.

use rust_decimal::Decimal;
use tally_shared::types::{AccountId, safe_ratio};
use tracing::debug;

use super::codes;
use super::mapping::{DisplayLine, DisplayMapping};
use super::template::ReportTemplate;
use super::types::{DisplayRow, IncomeStatementInfo, PeriodRatio};
use crate::forest::{AccountForest, AccountNode, NormalBalance};

/// Income statement: revenue-based percentages, injected net income and
/// cost/R&D ratios.
#[derive(Debug, Clone)]
pub struct IncomeStatement {
    mapping: DisplayMapping,
}

impl IncomeStatement {
    /// Creates the template over a statement layout.
    #[must_use]
    pub fn new(mapping: DisplayMapping) -> Self {
        Self { mapping }
    }

    /// Standard layout: revenue, cost, operating expenses and net income.
    #[must_use]
    pub fn standard_mapping() -> DisplayMapping {
        DisplayMapping::new(vec![
            DisplayLine::new(codes::OPERATING_REVENUE, 0),
            DisplayLine::new(codes::OPERATING_COST, 0),
            DisplayLine::new(codes::SELLING_EXPENSE, 1),
            DisplayLine::new(codes::ADMINISTRATIVE_EXPENSE, 1),
            DisplayLine::new(codes::RD_EXPENSE, 1),
            DisplayLine::new(codes::NET_INCOME, 0).named(codes::NET_INCOME_NAME),
        ])
    }
}

impl Default for IncomeStatement {
    fn default() -> Self {
        Self::new(Self::standard_mapping())
    }
}

impl ReportTemplate for IncomeStatement {
    type OtherInfo = IncomeStatementInfo;

    fn report_type(&self) -> &'static str {
        "income_statement"
    }

    fn base_code(&self) -> Option<&str> {
        Some(codes::OPERATING_REVENUE)
    }

    fn mapping(&self) -> &DisplayMapping {
        &self.mapping
    }

    fn post_process(&self, forest: &mut AccountForest) {
        inject_net_income(forest);
    }

    fn other_info(&self, rows: &[DisplayRow], ratio_scale: u32) -> IncomeStatementInfo {
        ratios(rows, ratio_scale)
    }
}

/// Net income = credit-normal profit-and-loss totals minus debit-normal ones.
///
/// Only the top-most profit-and-loss node of each branch is counted, so the
/// forest must already be rolled up.
#[must_use]
pub fn net_income(forest: &AccountForest) -> Decimal {
    forest
        .find_nodes(|node| is_top_profit_and_loss(forest, node))
        .into_iter()
        .map(|node| {
            NormalBalance::CreditNormal.convert_from(node.normal_balance, node.amount)
        })
        .sum()
}

fn is_top_profit_and_loss(forest: &AccountForest, node: &AccountNode) -> bool {
    if node.code == codes::NET_INCOME || !node.category().is_profit_and_loss() {
        return false;
    }
    node.parent()
        .and_then(|parent| forest.find_node(parent))
        .is_none_or(|parent| !parent.category().is_profit_and_loss())
}

/// Writes net income into the forest, reusing the chart's node when present.
pub fn inject_net_income(forest: &mut AccountForest) {
    let amount = net_income(forest);
    let existing = forest.find_by_code(codes::NET_INCOME).map(|node| node.id);
    match existing.and_then(|id| forest.find_node_mut(id)) {
        Some(node) => {
            node.normal_balance = NormalBalance::CreditNormal;
            node.amount = amount;
        }
        None => {
            let mut node = AccountNode::new(
                AccountId::new(),
                codes::NET_INCOME,
                codes::NET_INCOME_NAME,
                NormalBalance::CreditNormal,
            );
            node.amount = amount;
            forest.insert_node(node);
        }
    }
    debug!(%amount, "net income injected");
}

/// Cross-account ratios; a missing row counts as zero.
#[must_use]
pub fn ratios(rows: &[DisplayRow], scale: u32) -> IncomeStatementInfo {
    let amounts = |code: &str| {
        rows.iter()
            .find(|row| row.code == code)
            .map_or((Decimal::ZERO, Decimal::ZERO), |row| {
                (row.cur_period_amount, row.pre_period_amount)
            })
    };

    let (revenue_cur, revenue_pre) = amounts(codes::OPERATING_REVENUE);
    let (cost_cur, cost_pre) = amounts(codes::OPERATING_COST);
    let (selling_cur, selling_pre) = amounts(codes::SELLING_EXPENSE);
    let (admin_cur, admin_pre) = amounts(codes::ADMINISTRATIVE_EXPENSE);
    let (rd_cur, rd_pre) = amounts(codes::RD_EXPENSE);

    IncomeStatementInfo {
        revenue_to_cost: PeriodRatio {
            cur_ratio: safe_ratio(revenue_cur, cost_cur + selling_cur + admin_cur, scale),
            pre_ratio: safe_ratio(revenue_pre, cost_pre + selling_pre + admin_pre, scale),
        },
        rd_to_revenue: PeriodRatio {
            cur_ratio: safe_ratio(rd_cur, revenue_cur, scale),
            pre_ratio: safe_ratio(rd_pre, revenue_pre, scale),
        },
    }
}
