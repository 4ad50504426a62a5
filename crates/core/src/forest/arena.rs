//! Arena-backed account forest.
//!
//! All nodes of one computation pass live in a single id-keyed map owned by
//! [`AccountForest`]. Parent and child links are stored as [`AccountId`]s, so
//! the tree has no reference cycles and every hop is an O(1) lookup.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;
use tally_shared::types::AccountId;
use tracing::{debug, warn};

use super::node::{AccountNode, ChartEntry, LineItem};
use super::tree::AccountTreeNode;

/// Result of inserting a node into the forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertOutcome {
    /// The node has no parent.
    Root,
    /// The node was linked under its parent.
    Linked,
    /// The parent is not in the forest yet. The link is kept pending and is made
    /// as soon as the parent is inserted.
    Deferred,
    /// A node with the same id already exists; nothing changed.
    Duplicate,
}

/// Owner of every account node for one report request.
#[derive(Debug, Default)]
pub struct AccountForest {
    nodes: HashMap<AccountId, AccountNode>,
    order: Vec<AccountId>,
    codes: HashMap<String, AccountId>,
    /// child -> parent links waiting for the parent to arrive
    pending: HashMap<AccountId, AccountId>,
    rolled_up: bool,
}

impl AccountForest {
    /// Creates an empty forest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a forest from chart-of-accounts rows in two phases.
    ///
    /// Rows may arrive in any order. Every row is inserted first, then parents
    /// are resolved by id, falling back to `parent_code`. Rows whose parent is
    /// found by neither stay roots and are logged.
    #[must_use]
    pub fn from_chart<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = ChartEntry>,
    {
        let mut forest = Self::new();
        for entry in entries {
            forest.insert_node(AccountNode::from_chart(&entry));
        }
        let unresolved = forest.resolve_pending_links();
        if !unresolved.is_empty() {
            warn!(
                count = unresolved.len(),
                "chart of accounts references missing parents"
            );
        }
        forest
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true when the forest holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Registers a node.
    ///
    /// If the node names a parent that is present, it is linked under it. If
    /// the parent is missing the link is deferred instead of dropped; it is
    /// completed when the parent is inserted. Children already waiting for
    /// this node are linked under it now.
    pub fn insert_node(&mut self, mut node: AccountNode) -> InsertOutcome {
        let id = node.id;
        if self.nodes.contains_key(&id) {
            debug!(account_id = %id, code = %node.code, "duplicate account ignored");
            return InsertOutcome::Duplicate;
        }

        let requested_parent = node.parent.take();
        node.children.clear();
        self.codes.entry(node.code.clone()).or_insert(id);
        self.nodes.insert(id, node);
        self.order.push(id);

        self.adopt_waiting_children(id);

        match requested_parent {
            None => InsertOutcome::Root,
            Some(parent) if self.nodes.contains_key(&parent) => {
                if self.link(id, parent) {
                    InsertOutcome::Linked
                } else {
                    InsertOutcome::Root
                }
            }
            Some(parent) => {
                debug!(account_id = %id, parent_id = %parent, "parent not present, link deferred");
                self.pending.insert(id, parent);
                InsertOutcome::Deferred
            }
        }
    }

    /// Second linking phase.
    ///
    /// Links pending nodes whose parent id is now present. Pending nodes whose
    /// parent id is still missing, and root nodes without a requested id, fall
    /// back to their `parent_code`. Returns the ids whose parent could be found
    /// neither by id nor by code; they remain reachable as roots.
    pub fn resolve_pending_links(&mut self) -> Vec<AccountId> {
        let waiting: Vec<(AccountId, AccountId)> = self
            .order
            .iter()
            .filter_map(|id| self.pending.get(id).map(|parent| (*id, *parent)))
            .collect();
        for (child, parent) in waiting {
            if self.nodes.contains_key(&parent) {
                self.pending.remove(&child);
                self.link(child, parent);
            }
        }

        let roots: Vec<AccountId> = self.root_ids().collect();
        let mut unresolved = Vec::new();
        for id in roots {
            let Some(parent_code) = self
                .nodes
                .get(&id)
                .and_then(|node| node.parent_code.clone())
            else {
                if self.pending.contains_key(&id) {
                    unresolved.push(id);
                }
                continue;
            };
            match self.codes.get(&parent_code).copied() {
                Some(parent) if self.link(id, parent) => {
                    self.pending.remove(&id);
                }
                _ => {
                    debug!(account_id = %id, %parent_code, "parent code not resolved");
                    unresolved.push(id);
                }
            }
        }
        unresolved
    }

    /// Looks up a node by id.
    #[must_use]
    pub fn find_node(&self, id: AccountId) -> Option<&AccountNode> {
        self.nodes.get(&id)
    }

    /// Looks up a node by id for mutation.
    pub fn find_node_mut(&mut self, id: AccountId) -> Option<&mut AccountNode> {
        self.nodes.get_mut(&id)
    }

    /// Looks up a node by account code.
    #[must_use]
    pub fn find_by_code(&self, code: &str) -> Option<&AccountNode> {
        self.codes.get(code).and_then(|id| self.nodes.get(id))
    }

    /// Returns every node matching `predicate`, in insertion order.
    pub fn find_nodes<P>(&self, mut predicate: P) -> Vec<&AccountNode>
    where
        P: FnMut(&AccountNode) -> bool,
    {
        self.iter().filter(|node| predicate(node)).collect()
    }

    /// Removes a node and detaches it from its parent.
    ///
    /// Children are not deleted: they lose their parent link and become roots.
    /// Callers that want a subtree gone must delete the descendants themselves.
    pub fn delete_node(&mut self, id: AccountId) -> Option<AccountNode> {
        let mut node = self.nodes.remove(&id)?;
        self.order.retain(|other| *other != id);
        self.pending.remove(&id);
        if self.codes.get(&node.code) == Some(&id) {
            self.codes.remove(&node.code);
        }

        if let Some(parent) = node.parent.take()
            && let Some(parent) = self.nodes.get_mut(&parent)
        {
            parent.children.retain(|child| *child != id);
        }
        for child in &node.children {
            if let Some(child) = self.nodes.get_mut(child) {
                child.parent = None;
            }
        }
        node.children.clear();
        Some(node)
    }

    /// Routes a line item to its account.
    ///
    /// Only the target node changes; ancestors are untouched until
    /// [`roll_up`](Self::roll_up). Returns false when the account is unknown.
    pub fn add_data(&mut self, item: &LineItem) -> bool {
        match self.nodes.get_mut(&item.account_id) {
            Some(node) => {
                node.apply(item);
                true
            }
            None => {
                debug!(
                    account_id = %item.account_id,
                    line_item_id = %item.id,
                    "line item for unknown account skipped"
                );
                false
            }
        }
    }

    /// Adds every descendant's balance into its ancestors.
    ///
    /// A child on the opposite normal side contributes with its sign flipped.
    /// Gross debit and credit totals are summed as-is. The forest remembers
    /// that it has been rolled up and later calls are no-ops.
    pub fn roll_up(&mut self) {
        if self.rolled_up {
            debug!("forest already rolled up");
            return;
        }
        let roots: Vec<AccountId> = self.root_ids().collect();
        for root in roots {
            self.roll_up_from(root);
        }
        self.rolled_up = true;
    }

    fn roll_up_from(&mut self, id: AccountId) {
        let children = match self.nodes.get(&id) {
            Some(node) => node.children.clone(),
            None => return,
        };

        let mut amount = Decimal::ZERO;
        let mut debit = Decimal::ZERO;
        let mut credit = Decimal::ZERO;
        for child in children {
            self.roll_up_from(child);
            if let Some(child) = self.nodes.get(&child) {
                amount += child.amount * side_factor(child, self.nodes.get(&id));
                debit += child.debit_total;
                credit += child.credit_total;
            }
        }

        if let Some(node) = self.nodes.get_mut(&id) {
            node.amount += amount;
            node.debit_total += debit;
            node.credit_total += credit;
        }
    }

    /// Visits every node in insertion order.
    pub fn traverse<F>(&self, mut callback: F)
    where
        F: FnMut(&AccountNode),
    {
        for node in self.iter() {
            callback(node);
        }
    }

    /// Iterates nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &AccountNode> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Ids of nodes without a parent, in insertion order.
    pub fn root_ids(&self) -> impl Iterator<Item = AccountId> + '_ {
        self.iter()
            .filter(|node| node.parent.is_none())
            .map(|node| node.id)
    }

    /// Nested view: every root with its descendants inline.
    #[must_use]
    pub fn to_tree(&self) -> Vec<AccountTreeNode> {
        self.root_ids()
            .filter_map(|id| self.subtree(id))
            .collect()
    }

    fn subtree(&self, id: AccountId) -> Option<AccountTreeNode> {
        let node = self.nodes.get(&id)?;
        Some(AccountTreeNode {
            id: node.id,
            code: node.code.clone(),
            name: node.name.clone(),
            normal_balance: node.normal_balance,
            amount: node.amount,
            parent_code: node
                .parent
                .and_then(|parent| self.nodes.get(&parent))
                .map(|parent| parent.code.clone())
                .or_else(|| node.parent_code.clone()),
            children: node
                .children
                .iter()
                .filter_map(|child| self.subtree(*child))
                .collect(),
        })
    }

    /// Links `child` under `parent`, refusing self-links and cycles.
    fn link(&mut self, child: AccountId, parent: AccountId) -> bool {
        if child == parent || self.is_ancestor(child, parent) {
            warn!(account_id = %child, parent_id = %parent, "link would create a cycle, skipped");
            return false;
        }
        let Some(parent_node) = self.nodes.get_mut(&parent) else {
            return false;
        };
        parent_node.children.push(child);
        let parent_code = parent_node.code.clone();
        if let Some(child_node) = self.nodes.get_mut(&child) {
            child_node.parent = Some(parent);
            child_node.parent_code = Some(parent_code);
        }
        true
    }

    /// True when `candidate` is `of` itself or one of its ancestors.
    fn is_ancestor(&self, candidate: AccountId, of: AccountId) -> bool {
        let mut current = Some(of);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.nodes.get(&id).and_then(|node| node.parent);
        }
        false
    }

    fn adopt_waiting_children(&mut self, parent: AccountId) {
        if self.pending.is_empty() {
            return;
        }
        let waiting: Vec<AccountId> = self
            .order
            .iter()
            .filter(|id| self.pending.get(*id) == Some(&parent))
            .copied()
            .collect();
        for child in waiting {
            self.pending.remove(&child);
            self.link(child, parent);
        }
    }
}

fn side_factor(child: &AccountNode, parent: Option<&AccountNode>) -> Decimal {
    match parent {
        Some(parent) => parent.normal_balance.convert_from(child.normal_balance, Decimal::ONE),
        None => Decimal::ONE,
    }
}
