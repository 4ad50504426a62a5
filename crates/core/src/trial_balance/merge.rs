//! Period merge: beginning + midterm forests into ending balances.

use std::collections::{HashMap, HashSet};

use super::split::{SplitBalance, split_balance};
use super::types::{TrialBalanceRow, TrialBalanceTotals};
use crate::forest::AccountTreeNode;

/// Merges the forest of balances carried into a period with the forest of
/// activity during it.
///
/// Siblings are matched by account code at every level:
/// - matched codes combine both sides bucket-wise,
/// - beginning-only codes carry their balance unchanged to the ending columns,
/// - midterm-only codes start from zero.
///
/// Every code present in either forest yields exactly one row.
#[must_use]
pub fn combine_account_forests(
    beginning: &[AccountTreeNode],
    midterm: &[AccountTreeNode],
) -> Vec<TrialBalanceRow> {
    let midterm_by_code: HashMap<&str, &AccountTreeNode> =
        midterm.iter().map(|node| (node.code.as_str(), node)).collect();
    let mut matched: HashSet<&str> = HashSet::with_capacity(midterm.len());
    let mut rows = Vec::with_capacity(beginning.len() + midterm.len());

    for begin in beginning {
        match midterm_by_code.get(begin.code.as_str()) {
            Some(mid) if matched.insert(mid.code.as_str()) => {
                rows.push(row(
                    begin,
                    split_balance(begin.normal_balance, begin.amount),
                    split_balance(mid.normal_balance, mid.amount),
                    combine_account_forests(&begin.children, &mid.children),
                ));
            }
            _ => rows.push(row(
                begin,
                split_balance(begin.normal_balance, begin.amount),
                SplitBalance::default(),
                combine_account_forests(&begin.children, &[]),
            )),
        }
    }

    for mid in midterm {
        if matched.contains(mid.code.as_str()) {
            continue;
        }
        rows.push(row(
            mid,
            SplitBalance::default(),
            split_balance(mid.normal_balance, mid.amount),
            combine_account_forests(&[], &mid.children),
        ));
    }

    rows
}

fn row(
    node: &AccountTreeNode,
    beginning: SplitBalance,
    midterm: SplitBalance,
    sub_accounts: Vec<TrialBalanceRow>,
) -> TrialBalanceRow {
    let ending = beginning + midterm;
    TrialBalanceRow {
        id: node.id,
        code: node.code.clone(),
        accounting_title: node.name.clone(),
        beginning_debit_amount: beginning.debit,
        beginning_credit_amount: beginning.credit,
        midterm_debit_amount: midterm.debit,
        midterm_credit_amount: midterm.credit,
        ending_debit_amount: ending.debit,
        ending_credit_amount: ending.credit,
        parent_code: node.parent_code.clone(),
        sub_accounts,
    }
}

/// Pre-order flattening: each row, then its sub-accounts.
///
/// Parents are kept; the output has one entry per node at every level.
/// Returned rows keep their nested `sub_accounts`.
#[must_use]
pub fn flatten_trial_balance(rows: &[TrialBalanceRow]) -> Vec<TrialBalanceRow> {
    let mut flat = Vec::new();
    flatten_into(rows, &mut flat);
    flat
}

fn flatten_into(rows: &[TrialBalanceRow], flat: &mut Vec<TrialBalanceRow>) {
    for row in rows {
        flat.push(row.clone());
        flatten_into(&row.sub_accounts, flat);
    }
}

/// Sums the leaf rows of a trial balance.
#[must_use]
pub fn trial_balance_totals(rows: &[TrialBalanceRow]) -> TrialBalanceTotals {
    let mut totals = TrialBalanceTotals::default();
    accumulate_leaves(rows, &mut totals);
    totals.is_balanced = totals.beginning_debit == totals.beginning_credit
        && totals.midterm_debit == totals.midterm_credit
        && totals.ending_debit == totals.ending_credit;
    totals
}

fn accumulate_leaves(rows: &[TrialBalanceRow], totals: &mut TrialBalanceTotals) {
    for row in rows {
        if row.sub_accounts.is_empty() {
            totals.beginning_debit += row.beginning_debit_amount;
            totals.beginning_credit += row.beginning_credit_amount;
            totals.midterm_debit += row.midterm_debit_amount;
            totals.midterm_credit += row.midterm_credit_amount;
            totals.ending_debit += row.ending_debit_amount;
            totals.ending_credit += row.ending_credit_amount;
        } else {
            accumulate_leaves(&row.sub_accounts, totals);
        }
    }
}
