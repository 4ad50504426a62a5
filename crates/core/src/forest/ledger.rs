//! Flat per-account ledger view.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{AccountId, LineItemId, VoucherId};

use super::arena::AccountForest;
use super::node::{AccountNode, EntryType, NormalBalance};

/// One posted line inside an account ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerLine {
    /// Line item ID.
    pub line_item_id: LineItemId,
    /// Voucher ID.
    pub voucher_id: VoucherId,
    /// Voucher date.
    pub date: NaiveDate,
    /// Memo.
    pub description: Option<String>,
    /// Debit amount (zero for credit legs).
    pub debit: Decimal,
    /// Credit amount (zero for debit legs).
    pub credit: Decimal,
    /// Balance on the account's normal side after this line.
    pub running_balance: Decimal,
}

/// Ledger of a single account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerAccount {
    /// Account ID.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Normal balance side.
    pub normal_balance: NormalBalance,
    /// Posted lines, ordered by date then arrival.
    pub lines: Vec<LedgerLine>,
    /// Sum of debit legs posted directly to this account.
    pub debit_total: Decimal,
    /// Sum of credit legs posted directly to this account.
    pub credit_total: Decimal,
    /// Closing balance on the normal side.
    pub balance: Decimal,
}

impl LedgerAccount {
    fn from_node(node: &AccountNode) -> Self {
        let mut items: Vec<_> = node.entries().iter().collect();
        items.sort_by_key(|item| item.date);

        let mut running = Decimal::ZERO;
        let mut debit_total = Decimal::ZERO;
        let mut credit_total = Decimal::ZERO;
        let lines = items
            .into_iter()
            .map(|item| {
                running += node.normal_balance.signed_amount(item.entry_type, item.amount);
                let (debit, credit) = match item.entry_type {
                    EntryType::Debit => (item.amount, Decimal::ZERO),
                    EntryType::Credit => (Decimal::ZERO, item.amount),
                };
                debit_total += debit;
                credit_total += credit;
                LedgerLine {
                    line_item_id: item.id,
                    voucher_id: item.voucher_id,
                    date: item.date,
                    description: item.description.clone(),
                    debit,
                    credit,
                    running_balance: running,
                }
            })
            .collect();

        Self {
            account_id: node.id,
            code: node.code.clone(),
            name: node.name.clone(),
            normal_balance: node.normal_balance,
            lines,
            debit_total,
            credit_total,
            balance: running,
        }
    }
}

impl AccountForest {
    /// Flat ledger view: one entry per account, sorted by account code.
    ///
    /// Codes compare as strings, which puts every parent code directly before
    /// the codes that extend it (`1100`, `11001`, `1101`).
    #[must_use]
    pub fn to_ledger(&self) -> Vec<LedgerAccount> {
        let mut nodes: Vec<&AccountNode> = self.iter().collect();
        nodes.sort_by(|a, b| a.code.cmp(&b.code));
        nodes.into_iter().map(LedgerAccount::from_node).collect()
    }
}
