//! Trial balance data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::AccountId;

use crate::period::ReportPeriod;

/// One account of a trial balance with its sub-accounts nested inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// Account ID.
    pub id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub accounting_title: String,
    /// Debit balance carried into the period.
    pub beginning_debit_amount: Decimal,
    /// Credit balance carried into the period.
    pub beginning_credit_amount: Decimal,
    /// Debit balance of activity during the period.
    pub midterm_debit_amount: Decimal,
    /// Credit balance of activity during the period.
    pub midterm_credit_amount: Decimal,
    /// Beginning plus midterm debit.
    pub ending_debit_amount: Decimal,
    /// Beginning plus midterm credit.
    pub ending_credit_amount: Decimal,
    /// Parent account code.
    pub parent_code: Option<String>,
    /// Child accounts.
    pub sub_accounts: Vec<TrialBalanceRow>,
}

/// Trial balance totals over leaf accounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceTotals {
    /// Total beginning debit.
    pub beginning_debit: Decimal,
    /// Total beginning credit.
    pub beginning_credit: Decimal,
    /// Total midterm debit.
    pub midterm_debit: Decimal,
    /// Total midterm credit.
    pub midterm_credit: Decimal,
    /// Total ending debit.
    pub ending_debit: Decimal,
    /// Total ending credit.
    pub ending_credit: Decimal,
    /// Whether debits equal credits in every column pair.
    pub is_balanced: bool,
}

/// Trial balance report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    /// Report type identifier.
    pub report_type: String,
    /// Reporting period.
    pub period: ReportPeriod,
    /// Nested rows.
    pub rows: Vec<TrialBalanceRow>,
    /// Leaf totals.
    pub totals: TrialBalanceTotals,
}
