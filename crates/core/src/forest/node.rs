//! Account node and line item types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{AccountId, LineItemId, VoucherId};

/// Side of a single line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Debit leg.
    Debit,
    /// Credit leg.
    Credit,
}

/// The side on which an account conventionally carries a positive balance.
///
/// - Asset/Expense: debit-normal
/// - Liability/Equity/Revenue: credit-normal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalBalance {
    /// Debit-normal accounts (Asset, Expense).
    DebitNormal,
    /// Credit-normal accounts (Liability, Equity, Revenue).
    CreditNormal,
}

impl NormalBalance {
    /// Maps the chart's boolean "debit" flag onto a normal side.
    #[must_use]
    pub const fn from_debit_flag(debit: bool) -> Self {
        if debit {
            Self::DebitNormal
        } else {
            Self::CreditNormal
        }
    }

    /// Returns true for debit-normal accounts.
    #[must_use]
    pub const fn is_debit(self) -> bool {
        matches!(self, Self::DebitNormal)
    }

    /// Returns the signed effect of a leg on an account with this normal side.
    ///
    /// A leg on the normal side increases the balance, the other side decreases it.
    #[must_use]
    pub fn signed_amount(self, entry_type: EntryType, amount: Decimal) -> Decimal {
        match (self, entry_type) {
            (Self::DebitNormal, EntryType::Debit) | (Self::CreditNormal, EntryType::Credit) => {
                amount
            }
            _ => -amount,
        }
    }

    /// Converts a balance held on `from`'s side into this side.
    #[must_use]
    pub fn convert_from(self, from: Self, amount: Decimal) -> Decimal {
        if self == from { amount } else { -amount }
    }
}

/// Top-level classification of an account, derived from the leading digit of its code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountCategory {
    /// 1xxx
    Asset,
    /// 2xxx
    Liability,
    /// 3xxx
    Equity,
    /// 4xxx
    Revenue,
    /// 5xxx
    Cost,
    /// 6xxx
    Expense,
    /// 7xxx, mixed income and expense outside operations.
    NonOperating,
    /// 8xxx, income tax and period results.
    IncomeTax,
    /// Anything the numbering convention does not cover.
    Other,
}

impl AccountCategory {
    /// Classifies an account code.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.trim_start().chars().next() {
            Some('1') => Self::Asset,
            Some('2') => Self::Liability,
            Some('3') => Self::Equity,
            Some('4') => Self::Revenue,
            Some('5') => Self::Cost,
            Some('6') => Self::Expense,
            Some('7') => Self::NonOperating,
            Some('8') => Self::IncomeTax,
            _ => Self::Other,
        }
    }

    /// Returns true for accounts that close into profit and loss.
    #[must_use]
    pub const fn is_profit_and_loss(self) -> bool {
        matches!(
            self,
            Self::Revenue | Self::Cost | Self::Expense | Self::NonOperating | Self::IncomeTax
        )
    }
}

/// One leg of a balanced voucher, tied to one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Line item ID.
    pub id: LineItemId,
    /// The voucher this leg belongs to.
    pub voucher_id: VoucherId,
    /// The account affected by this leg.
    pub account_id: AccountId,
    /// Debit or credit.
    pub entry_type: EntryType,
    /// Non-negative amount.
    pub amount: Decimal,
    /// Voucher date, used for period filtering.
    pub date: NaiveDate,
    /// Optional memo.
    #[serde(default)]
    pub description: Option<String>,
}

impl LineItem {
    /// Returns the signed amount (positive for debit, negative for credit).
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.entry_type {
            EntryType::Debit => self.amount,
            EntryType::Credit => -self.amount,
        }
    }
}

/// A chart-of-accounts row as delivered by the data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartEntry {
    /// Account ID.
    pub id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Parent account ID, if known.
    #[serde(default)]
    pub parent_id: Option<AccountId>,
    /// Parent account code, if known.
    #[serde(default)]
    pub parent_code: Option<String>,
    /// Normal balance side.
    pub normal_balance: NormalBalance,
}

/// A single chart-of-accounts entry inside an [`AccountForest`](super::AccountForest).
///
/// Hierarchy links are ids into the owning forest, never pointers.
#[derive(Debug, Clone)]
pub struct AccountNode {
    /// Account ID.
    pub id: AccountId,
    /// Hierarchical account code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Normal balance side.
    pub normal_balance: NormalBalance,
    /// Signed balance; positive means the balance sits on the normal side.
    pub amount: Decimal,
    /// Gross debit legs routed to this node.
    pub debit_total: Decimal,
    /// Gross credit legs routed to this node.
    pub credit_total: Decimal,
    /// Parent code as given by the chart.
    pub parent_code: Option<String>,
    pub(crate) parent: Option<AccountId>,
    pub(crate) children: Vec<AccountId>,
    pub(crate) entries: Vec<LineItem>,
}

impl AccountNode {
    /// Creates an unlinked node with a zero balance.
    #[must_use]
    pub fn new(
        id: AccountId,
        code: impl Into<String>,
        name: impl Into<String>,
        normal_balance: NormalBalance,
    ) -> Self {
        Self {
            id,
            code: code.into(),
            name: name.into(),
            normal_balance,
            amount: Decimal::ZERO,
            debit_total: Decimal::ZERO,
            credit_total: Decimal::ZERO,
            parent_code: None,
            parent: None,
            children: Vec::new(),
            entries: Vec::new(),
        }
    }

    /// Sets the parent this node should be linked under on insertion.
    #[must_use]
    pub fn with_parent(mut self, parent: AccountId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Sets the parent code.
    #[must_use]
    pub fn with_parent_code(mut self, parent_code: impl Into<String>) -> Self {
        self.parent_code = Some(parent_code.into());
        self
    }

    /// Builds a node from a chart row.
    #[must_use]
    pub fn from_chart(entry: &ChartEntry) -> Self {
        Self {
            parent_code: entry.parent_code.clone(),
            parent: entry.parent_id,
            ..Self::new(entry.id, entry.code.clone(), entry.name.clone(), entry.normal_balance)
        }
    }

    /// Parent account, if linked or pending.
    #[must_use]
    pub fn parent(&self) -> Option<AccountId> {
        self.parent
    }

    /// Child accounts in link order.
    #[must_use]
    pub fn children(&self) -> &[AccountId] {
        &self.children
    }

    /// Line items routed to this node, in arrival order.
    #[must_use]
    pub fn entries(&self) -> &[LineItem] {
        &self.entries
    }

    /// Returns true when the node carries a debit-normal balance.
    #[must_use]
    pub const fn is_debit(&self) -> bool {
        self.normal_balance.is_debit()
    }

    /// Classification derived from the code.
    #[must_use]
    pub fn category(&self) -> AccountCategory {
        AccountCategory::from_code(&self.code)
    }

    /// Applies one line item to this node's balance and gross totals.
    pub fn apply(&mut self, item: &LineItem) {
        match item.entry_type {
            EntryType::Debit => self.debit_total += item.amount,
            EntryType::Credit => self.credit_total += item.amount,
        }
        self.amount += self.normal_balance.signed_amount(item.entry_type, item.amount);
        self.entries.push(item.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn item(account_id: AccountId, entry_type: EntryType, amount: Decimal) -> LineItem {
        LineItem {
            id: LineItemId::new(),
            voucher_id: VoucherId::new(),
            account_id,
            entry_type,
            amount,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            description: None,
        }
    }

    #[rstest]
    #[case(NormalBalance::DebitNormal, EntryType::Debit, dec!(100))]
    #[case(NormalBalance::DebitNormal, EntryType::Credit, dec!(-100))]
    #[case(NormalBalance::CreditNormal, EntryType::Credit, dec!(100))]
    #[case(NormalBalance::CreditNormal, EntryType::Debit, dec!(-100))]
    fn test_signed_amount(
        #[case] side: NormalBalance,
        #[case] entry_type: EntryType,
        #[case] expected: Decimal,
    ) {
        assert_eq!(side.signed_amount(entry_type, dec!(100)), expected);
    }

    #[rstest]
    #[case("1101", AccountCategory::Asset)]
    #[case("2100", AccountCategory::Liability)]
    #[case("3300", AccountCategory::Equity)]
    #[case("4000", AccountCategory::Revenue)]
    #[case("5000", AccountCategory::Cost)]
    #[case("6100", AccountCategory::Expense)]
    #[case("7010", AccountCategory::NonOperating)]
    #[case("8200", AccountCategory::IncomeTax)]
    #[case("9999", AccountCategory::Other)]
    #[case("", AccountCategory::Other)]
    fn test_category_from_code(#[case] code: &str, #[case] expected: AccountCategory) {
        assert_eq!(AccountCategory::from_code(code), expected);
    }

    #[test]
    fn test_profit_and_loss_categories() {
        assert!(!AccountCategory::Asset.is_profit_and_loss());
        assert!(!AccountCategory::Equity.is_profit_and_loss());
        assert!(AccountCategory::Revenue.is_profit_and_loss());
        assert!(AccountCategory::NonOperating.is_profit_and_loss());
    }

    #[test]
    fn test_apply_tracks_balance_and_gross_totals() {
        let id = AccountId::new();
        let mut node = AccountNode::new(id, "1100", "Cash", NormalBalance::DebitNormal);

        node.apply(&item(id, EntryType::Debit, dec!(500)));
        node.apply(&item(id, EntryType::Credit, dec!(120)));

        assert_eq!(node.amount, dec!(380));
        assert_eq!(node.debit_total, dec!(500));
        assert_eq!(node.credit_total, dec!(120));
        assert_eq!(node.entries().len(), 2);
    }

    #[test]
    fn test_contra_balance_goes_negative() {
        let id = AccountId::new();
        let mut node = AccountNode::new(id, "2100", "Payables", NormalBalance::CreditNormal);
        node.apply(&item(id, EntryType::Debit, dec!(75)));
        assert_eq!(node.amount, dec!(-75));
    }

    #[test]
    fn test_from_debit_flag() {
        assert_eq!(NormalBalance::from_debit_flag(true), NormalBalance::DebitNormal);
        assert_eq!(NormalBalance::from_debit_flag(false), NormalBalance::CreditNormal);
        assert!(NormalBalance::DebitNormal.is_debit());
    }

    #[test]
    fn test_convert_from() {
        let debit = NormalBalance::DebitNormal;
        let credit = NormalBalance::CreditNormal;
        assert_eq!(debit.convert_from(debit, dec!(10)), dec!(10));
        assert_eq!(debit.convert_from(credit, dec!(10)), dec!(-10));
    }
}
