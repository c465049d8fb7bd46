//! Spendlog is the logic core of a personal finance tracker: validated
//! transactions, categories and settings, a persisted state container with
//! synchronous change notification, derived spending statistics, and safe
//! user-supplied search with match highlighting.
//!
//! The crate is UI-free and storage-agnostic. Hosts plug in a [BlobStore]
//! for durable persistence, drive the [Tracker] with mutations, and
//! subscribe to [Snapshot] updates for rendering.

#![warn(missing_docs)]

mod currency;
mod export;
mod highlight;
mod import;
mod search;
mod settings;
mod stats;
mod store;
mod timezone;
mod tracker;
mod transaction;
mod validation;

pub use currency::{Currency, RateTable, format_amount, symbol_for};
pub use export::{EXPORT_VERSION, ExportEnvelope, export_envelope, export_transactions};
pub use highlight::{Segment, escape_html, highlight_markup, highlight_segments};
pub use import::{IMPORT_ERROR_PREVIEW_LIMIT, ImportError, parse_import};
pub use search::{
    PROBE_CHAR, PROBE_LENGTH, PROBE_TIME_LIMIT, PatternError, SearchMatcher, compile_pattern,
};
pub use settings::{Settings, SettingsUpdate};
pub use stats::{
    BUDGET_WARNING_PERCENT, BudgetLevel, BudgetStatus, CategoryTotal, DaySpending, Statistics,
    budget_status, category_totals, last_seven_days, summarize, top_category, total_spent,
};
pub use store::{BlobStore, DirectoryStore, MemoryStore, StoreError, StoreKind, load_or_default};
pub use timezone::get_local_offset;
pub use tracker::{
    DEFAULT_CATEGORIES, Section, Snapshot, SubscriberId, Tracker, UiState, default_categories,
};
pub use transaction::{
    SortDirection, SortField, Transaction, TransactionDraft, TransactionId, TransactionPatch,
    filter_and_sort, matches_search,
};
pub use validation::{
    Field, NewTransaction, TransactionErrors, ValidationError, validate_amount,
    validate_budget_cap, validate_category, validate_date, validate_date_in_year,
    validate_description, validate_draft, validate_exchange_rate,
};

/// The errors that may occur in the tracker.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// One or more transaction fields failed validation.
    ///
    /// The wrapped report maps each offending field to its error so callers
    /// can surface messages next to the matching form inputs.
    #[error("{0}")]
    Validation(#[from] TransactionErrors),

    /// A category name failed validation.
    #[error("invalid category name: {0}")]
    InvalidCategoryName(ValidationError),

    /// A settings update supplied an invalid budget cap or exchange rate.
    #[error("invalid setting: {0}")]
    InvalidSetting(ValidationError),

    /// The search pattern was rejected by the safe-search compiler.
    ///
    /// The previous matcher is cleared to "no filter" so a stale filter is
    /// never applied alongside the rejected query text.
    #[error("{0}")]
    Pattern(#[from] PatternError),

    /// The persistence adapter failed to read or write a blob.
    ///
    /// The in-memory state is left exactly as it was before the failed
    /// mutation.
    #[error("{0}")]
    Store(#[from] StoreError),

    /// The import payload was rejected before any state was touched.
    #[error("{0}")]
    Import(#[from] ImportError),

    /// Tried to update or delete a transaction that does not exist.
    #[error("no transaction with the ID {0} exists")]
    TransactionNotFound(TransactionId),

    /// Tried to remove a category that does not exist.
    #[error("no category named \"{0}\" exists")]
    CategoryNotFound(String),

    /// Tried to add a category whose name is already taken.
    ///
    /// Names collide without regard to case, so "food" clashes with an
    /// existing "Food".
    #[error("the category \"{0}\" already exists")]
    DuplicateCategory(String),

    /// An error occurred while getting the local offset from a canonical
    /// timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),
}
