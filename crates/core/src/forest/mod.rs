//! Chart-of-accounts forest.
//!
//! This module implements the per-request account tree:
//! - Account nodes and the line items routed to them
//! - The arena forest with deferred parent linking
//! - Nested tree and flat ledger views

pub mod arena;
pub mod ledger;
pub mod node;
pub mod tree;


pub use arena::{AccountForest, InsertOutcome};
pub use ledger::{LedgerAccount, LedgerLine};
pub use node::{AccountCategory, AccountNode, ChartEntry, EntryType, LineItem, NormalBalance};
pub use tree::{AccountTreeNode, find_in_forest};
