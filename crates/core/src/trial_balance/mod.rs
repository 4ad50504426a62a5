//! Trial balance: period merge, flattening and sorting.
//!
//! Two forests computed over different windows (balances carried into the
//! period and activity during it) are merged into ending balances per account.

pub mod merge;
pub mod service;
pub mod sort;
pub mod split;
pub mod types;


pub use merge::{combine_account_forests, flatten_trial_balance, trial_balance_totals};
pub use service::TrialBalanceService;
pub use sort::{SortDirection, SortField, SortOption, SortOptionError, compare_rows, sort_trial_balance};
pub use split::{SplitBalance, split_balance};
pub use types::{TrialBalanceReport, TrialBalanceRow, TrialBalanceTotals};
