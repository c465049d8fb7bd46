//! Session state and the snapshot type delivered to subscribers.

use crate::{
    search::SearchMatcher,
    settings::Settings,
    stats::Statistics,
    transaction::{SortDirection, SortField, Transaction, TransactionId},
};

/// The app section the user is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    /// The spending overview.
    #[default]
    Dashboard,
    /// The transaction list and entry form.
    Transactions,
    /// The budget progress view.
    Budget,
    /// The settings form.
    Settings,
}

/// The session state the tracker carries between renders.
///
/// Nothing here is persisted; a fresh tracker always starts on the
/// dashboard with no filters.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// The section currently shown.
    pub section: Section,
    /// The search pattern exactly as the user entered it.
    pub search_query: String,
    /// The compiled search matcher. `None` when the query is empty or was
    /// rejected, in which case no search filter applies.
    pub matcher: Option<SearchMatcher>,
    /// The field the transaction list is ordered by.
    pub sort_field: SortField,
    /// The direction the transaction list is ordered in.
    pub sort_direction: SortDirection,
    /// Show only transactions in this category when set. Matched exactly,
    /// including case.
    pub category_filter: Option<String>,
    /// The id of the record open in the edit form, if any.
    pub editing_id: Option<TransactionId>,
    /// Whether a long-running operation is in flight.
    pub loading: bool,
}

/// A point-in-time copy of everything a renderer needs.
///
/// Handed to subscribers after every mutation; holding one never blocks or
/// observes later changes to the tracker.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Every transaction on record, in insertion order.
    pub transactions: Vec<Transaction>,
    /// The category names, in creation order.
    pub categories: Vec<String>,
    /// The settings record.
    pub settings: Settings,
    /// The session state.
    pub ui: UiState,
    /// Statistics derived from the transaction list.
    pub statistics: Statistics,
}
