//! The state container at the center of the tracker.
//!
//! [Tracker] owns the transaction list, category list, settings, and
//! session state, persists through a [crate::store::BlobStore], and fans
//! out a [Snapshot] to subscribers after every change.

mod core;
mod session;

pub use self::core::{DEFAULT_CATEGORIES, SubscriberId, Tracker, default_categories};
pub use session::{Section, Snapshot, UiState};
