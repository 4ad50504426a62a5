//! Nested tree view of an account forest.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::AccountId;

use super::node::NormalBalance;

/// A serialized account with its children nested inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountTreeNode {
    /// Account ID.
    pub id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Normal balance side.
    pub normal_balance: NormalBalance,
    /// Signed balance on the normal side.
    pub amount: Decimal,
    /// Parent code, if any.
    pub parent_code: Option<String>,
    /// Child accounts.
    pub children: Vec<AccountTreeNode>,
}

impl AccountTreeNode {
    /// Creates a childless tree node.
    #[must_use]
    pub fn leaf(
        code: impl Into<String>,
        name: impl Into<String>,
        normal_balance: NormalBalance,
        amount: Decimal,
    ) -> Self {
        Self {
            id: AccountId::new(),
            code: code.into(),
            name: name.into(),
            normal_balance,
            amount,
            parent_code: None,
            children: Vec::new(),
        }
    }

    /// Appends a child, stamping its parent code.
    #[must_use]
    pub fn with_child(mut self, mut child: Self) -> Self {
        child.parent_code = Some(self.code.clone());
        self.children.push(child);
        self
    }

    /// Number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }

    /// Finds a node by code anywhere in this subtree.
    #[must_use]
    pub fn find(&self, code: &str) -> Option<&Self> {
        if self.code == code {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(code))
    }

    /// Pre-order walk over the subtree with depth (root = 0).
    pub fn walk<F>(&self, f: &mut F)
    where
        F: FnMut(&Self, usize),
    {
        self.walk_at(0, f);
    }

    fn walk_at<F>(&self, depth: usize, f: &mut F)
    where
        F: FnMut(&Self, usize),
    {
        f(self, depth);
        for child in &self.children {
            child.walk_at(depth + 1, f);
        }
    }
}

/// Finds a node by code across a list of trees.
#[must_use]
pub fn find_in_forest<'a>(roots: &'a [AccountTreeNode], code: &str) -> Option<&'a AccountTreeNode> {
    roots.iter().find_map(|root| root.find(code))
}
