//! Common types used across the engine.

pub mod amount;
pub mod id;

pub use amount::{format_amount, percentage_of, safe_ratio};
pub use id::*;
