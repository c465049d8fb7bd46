//! Transaction management for the tracker.
//!
//! This module contains everything related to transaction records:
//! - The `Transaction` model, its wire format, and the draft/patch types
//!   used to create and edit records
//! - List queries: category filtering, search matching, and stable sorting

mod core;
mod query;

pub use self::core::{Transaction, TransactionDraft, TransactionId, TransactionPatch};
pub use query::{SortDirection, SortField, filter_and_sort, matches_search};
