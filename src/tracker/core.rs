//! The tracker: owned state, durable writes, and change notification.

use std::panic::{AssertUnwindSafe, catch_unwind};

use serde::Serialize;
use time::{Date, OffsetDateTime, UtcOffset};

use crate::{
    Error,
    import::parse_import,
    search::{SearchMatcher, compile_pattern},
    settings::{Settings, SettingsUpdate},
    stats::{Statistics, summarize},
    store::{BlobStore, StoreError, StoreKind, load_or_default},
    timezone::get_local_offset,
    tracker::session::{Section, Snapshot, UiState},
    transaction::{
        SortDirection, SortField, Transaction, TransactionDraft, TransactionPatch, filter_and_sort,
    },
    validation::{RATE_MAX, ValidationError, validate_category, validate_draft},
};

/// The starter categories seeded into a fresh tracker.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Entertainment",
    "Utilities",
    "Health",
    "Shopping",
    "Other",
];

/// The starter categories as owned strings.
pub fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|name| (*name).to_owned())
        .collect()
}

/// Identifies a registered subscriber so it can be removed later.
pub type SubscriberId = u64;

type Subscriber = Box<dyn FnMut(&Snapshot)>;

/// The single source of truth for a tracker session.
///
/// Holds the transaction list, category list, and settings loaded from a
/// [BlobStore], plus the session state. Every mutator writes to the store
/// first and only updates the in-memory copy once the write succeeded, so
/// the in-memory view never shows data that would not survive a restart.
/// Subscribers registered with [Tracker::subscribe] are called synchronously
/// with a fresh [Snapshot] after each change.
pub struct Tracker<S> {
    store: S,
    transactions: Vec<Transaction>,
    categories: Vec<String>,
    settings: Settings,
    ui: UiState,
    subscribers: Vec<(SubscriberId, Subscriber)>,
    next_subscriber_id: SubscriberId,
    utc_offset: UtcOffset,
}

impl<S: BlobStore> Tracker<S> {
    /// Create a tracker that resolves "today" in UTC.
    ///
    /// Loads all three blobs from the store. A store with no categories
    /// blob is seeded with [DEFAULT_CATEGORIES]; absent or corrupt blobs
    /// otherwise fall back to empty defaults rather than failing.
    ///
    /// # Errors
    /// Returns an error when the store itself cannot be read.
    pub fn new(store: S) -> Result<Self, Error> {
        Self::with_offset(store, UtcOffset::UTC)
    }

    /// Create a tracker that resolves "today" in the given timezone.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g.
    /// "Pacific/Auckland". "Today" decides which bucket daily statistics
    /// land in and the year accepted for transaction dates.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezone] when the name is not a canonical
    /// timezone, and store errors as in [Tracker::new].
    pub fn with_timezone(store: S, local_timezone: &str) -> Result<Self, Error> {
        let offset = get_local_offset(local_timezone)
            .ok_or_else(|| Error::InvalidTimezone(local_timezone.to_owned()))?;

        Self::with_offset(store, offset)
    }

    fn with_offset(store: S, utc_offset: UtcOffset) -> Result<Self, Error> {
        let transactions: Vec<Transaction> = load_or_default(&store, StoreKind::Transactions)?;
        let settings = load_or_default(&store, StoreKind::Settings)?;

        // Categories get seeded rather than defaulted to empty, but only
        // when the blob has never been written: a user who deleted every
        // category keeps their empty list.
        let categories = match store.load(StoreKind::Categories)? {
            None => default_categories(),
            Some(blob) => match serde_json::from_str(&blob) {
                Ok(categories) => categories,
                Err(error) => {
                    tracing::warn!("discarding corrupt categories blob: {error}");
                    default_categories()
                }
            },
        };

        tracing::debug!(
            "tracker loaded: {} transactions, {} categories",
            transactions.len(),
            categories.len()
        );

        Ok(Self {
            store,
            transactions,
            categories,
            settings,
            ui: UiState::default(),
            subscribers: Vec::new(),
            next_subscriber_id: 0,
            utc_offset,
        })
    }

    // ============ READS ============

    /// Every transaction on record, in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The transaction with the given id, if it exists.
    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions
            .iter()
            .find(|transaction| transaction.id == id)
    }

    /// The transaction list with the active category filter, search filter,
    /// and sort applied.
    pub fn visible_transactions(&self) -> Vec<Transaction> {
        filter_and_sort(
            &self.transactions,
            self.ui.category_filter.as_deref(),
            self.ui.matcher.as_ref(),
            self.ui.sort_field,
            self.ui.sort_direction,
        )
    }

    /// The category names, in creation order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// The current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The current session state.
    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    /// The active search matcher, if a pattern is set and valid.
    pub fn search_matcher(&self) -> Option<&SearchMatcher> {
        self.ui.matcher.as_ref()
    }

    /// Statistics computed from the current transaction list.
    pub fn statistics(&self) -> Statistics {
        summarize(
            &self.transactions,
            self.settings.budget_cap,
            self.local_today(),
        )
    }

    /// A point-in-time copy of all state, as delivered to subscribers.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            transactions: self.transactions.clone(),
            categories: self.categories.clone(),
            settings: self.settings.clone(),
            ui: self.ui.clone(),
            statistics: self.statistics(),
        }
    }

    // ============ TRANSACTION MUTATORS ============

    /// Validate a draft and append it as a new record.
    ///
    /// A draft naming a category that is not on the list yet adds that
    /// category as well. Returns the created record.
    ///
    /// # Errors
    /// Returns [Error::Validation] with the per-field report when the draft
    /// is invalid, and [Error::Store] when the durable write fails, in
    /// which case no state changes.
    pub fn add_transaction(&mut self, draft: &TransactionDraft) -> Result<Transaction, Error> {
        let validated = validate_draft(draft, self.local_today().year())?;
        let transaction = Transaction::from_validated(validated, OffsetDateTime::now_utc());

        self.ensure_category(&transaction.category)?;

        let mut transactions = self.transactions.clone();
        transactions.push(transaction.clone());
        self.save_blob(StoreKind::Transactions, &transactions)?;
        self.transactions = transactions;

        self.notify_subscribers();

        Ok(transaction)
    }

    /// Merge a patch into an existing record, revalidate, and replace it.
    ///
    /// The record keeps its id, creation timestamp, and position in the
    /// list; `updatedAt` is regenerated. Returns the updated record.
    ///
    /// # Errors
    /// Returns [Error::TransactionNotFound] for an unknown id,
    /// [Error::Validation] when the merged fields are invalid, and
    /// [Error::Store] when the durable write fails. The record is unchanged
    /// in every error case.
    pub fn update_transaction(
        &mut self,
        id: &str,
        patch: &TransactionPatch,
    ) -> Result<Transaction, Error> {
        let index = self
            .transactions
            .iter()
            .position(|transaction| transaction.id == id)
            .ok_or_else(|| Error::TransactionNotFound(id.to_owned()))?;

        let draft = patch.merged_over(&self.transactions[index]);
        let validated = validate_draft(&draft, self.local_today().year())?;

        let existing = &self.transactions[index];
        let updated = Transaction {
            id: existing.id.clone(),
            description: validated.description,
            amount: validated.amount,
            category: validated.category,
            date: validated.date,
            created_at: existing.created_at,
            updated_at: OffsetDateTime::now_utc(),
        };

        self.ensure_category(&updated.category)?;

        let mut transactions = self.transactions.clone();
        transactions[index] = updated.clone();
        self.save_blob(StoreKind::Transactions, &transactions)?;
        self.transactions = transactions;

        self.notify_subscribers();

        Ok(updated)
    }

    /// Remove a record. A matching edit target is cleared.
    ///
    /// # Errors
    /// Returns [Error::TransactionNotFound] for an unknown id and
    /// [Error::Store] when the durable write fails, in which case the
    /// record stays.
    pub fn delete_transaction(&mut self, id: &str) -> Result<(), Error> {
        let index = self
            .transactions
            .iter()
            .position(|transaction| transaction.id == id)
            .ok_or_else(|| Error::TransactionNotFound(id.to_owned()))?;

        let mut transactions = self.transactions.clone();
        transactions.remove(index);
        self.save_blob(StoreKind::Transactions, &transactions)?;
        self.transactions = transactions;

        if self.ui.editing_id.as_deref() == Some(id) {
            self.ui.editing_id = None;
        }

        self.notify_subscribers();

        Ok(())
    }

    /// Replace the whole transaction list with already-parsed records.
    ///
    /// Categories named by the records but missing from the list are
    /// added. Returns how many records were stored.
    ///
    /// # Errors
    /// Returns [Error::Store] when a durable write fails. The existing
    /// list survives every error case.
    pub fn import_transactions(&mut self, records: Vec<Transaction>) -> Result<usize, Error> {
        let mut categories = self.categories.clone();
        for transaction in &records {
            if !category_exists(&categories, &transaction.category) {
                categories.push(transaction.category.clone());
            }
        }

        if categories.len() != self.categories.len() {
            self.save_blob(StoreKind::Categories, &categories)?;
            self.categories = categories;
        }

        self.save_blob(StoreKind::Transactions, &records)?;
        let count = records.len();
        self.transactions = records;

        tracing::info!("import replaced the transaction list with {count} records");
        self.notify_subscribers();

        Ok(count)
    }

    /// Parse an import payload and replace the whole transaction list.
    ///
    /// # Errors
    /// Returns [Error::Import] when the payload is rejected, otherwise as
    /// [Tracker::import_transactions].
    pub fn import_json(&mut self, json: &str) -> Result<usize, Error> {
        let imported = parse_import(json, self.local_today().year())?;

        self.import_transactions(imported)
    }

    /// Delete every transaction.
    ///
    /// # Errors
    /// Returns [Error::Store] when the durable clear fails, in which case
    /// the list stays.
    pub fn clear_transactions(&mut self) -> Result<(), Error> {
        self.store.clear(StoreKind::Transactions)?;
        self.transactions.clear();

        self.notify_subscribers();

        Ok(())
    }

    // ============ CATEGORY MUTATORS ============

    /// Add a category to the end of the list.
    ///
    /// # Errors
    /// Returns [Error::InvalidCategoryName] when the name fails validation,
    /// [Error::DuplicateCategory] when the list already holds the name in
    /// any casing, and [Error::Store] when the durable write fails.
    pub fn add_category(&mut self, name: &str) -> Result<(), Error> {
        validate_category(name).map_err(Error::InvalidCategoryName)?;

        if category_exists(&self.categories, name) {
            return Err(Error::DuplicateCategory(name.to_owned()));
        }

        let mut categories = self.categories.clone();
        categories.push(name.to_owned());
        self.save_blob(StoreKind::Categories, &categories)?;
        self.categories = categories;

        self.notify_subscribers();

        Ok(())
    }

    /// Remove a category from the list.
    ///
    /// Transactions already recorded under the name keep it; the category
    /// filter matches on the stored string, not on list membership.
    ///
    /// # Errors
    /// Returns [Error::CategoryNotFound] for an unknown name and
    /// [Error::Store] when the durable write fails.
    pub fn remove_category(&mut self, name: &str) -> Result<(), Error> {
        let index = self
            .categories
            .iter()
            .position(|existing| existing == name)
            .ok_or_else(|| Error::CategoryNotFound(name.to_owned()))?;

        let mut categories = self.categories.clone();
        categories.remove(index);
        self.save_blob(StoreKind::Categories, &categories)?;
        self.categories = categories;

        self.notify_subscribers();

        Ok(())
    }

    // Unlisted categories named by new or imported records are appended to
    // the category list. The category blob is written before the
    // transaction blob so a failure between the two writes never leaves a
    // stored record with an unlisted category.
    fn ensure_category(&mut self, name: &str) -> Result<(), Error> {
        if category_exists(&self.categories, name) {
            return Ok(());
        }

        let mut categories = self.categories.clone();
        categories.push(name.to_owned());
        self.save_blob(StoreKind::Categories, &categories)?;
        self.categories = categories;

        Ok(())
    }

    // ============ SETTINGS ============

    /// Apply a partial settings update.
    ///
    /// Values are checked before anything is written: a budget cap must be
    /// a finite non-negative number, and every exchange rate must be finite,
    /// positive, and at most [RATE_MAX].
    ///
    /// # Errors
    /// Returns [Error::InvalidSetting] naming the failed check, and
    /// [Error::Store] when the durable write fails. Settings are unchanged
    /// in both cases.
    pub fn update_settings(&mut self, update: SettingsUpdate) -> Result<(), Error> {
        if let Some(cap) = update.budget_cap {
            if !cap.is_finite() || cap < 0.0 {
                return Err(Error::InvalidSetting(ValidationError::BudgetCapFormat));
            }
        }

        if let Some(rates) = &update.exchange_rates {
            for rate in rates.values() {
                if !rate.is_finite() || *rate <= 0.0 || *rate > RATE_MAX {
                    return Err(Error::InvalidSetting(ValidationError::RateRange));
                }
            }
        }

        let mut settings = self.settings.clone();
        settings.apply(update);
        self.save_blob(StoreKind::Settings, &settings)?;
        self.settings = settings;

        self.notify_subscribers();

        Ok(())
    }

    // ============ SESSION STATE ============

    /// Switch the visible section.
    pub fn set_section(&mut self, section: Section) {
        self.ui.section = section;
        self.notify_subscribers();
    }

    /// Set the search query, compiling it case-insensitively.
    ///
    /// The query text is kept either way so the search box can show what
    /// the user typed.
    ///
    /// # Errors
    /// Returns [Error::Pattern] when the pattern is rejected; the previous
    /// matcher is cleared rather than left behind the new query text, so a
    /// rejected pattern means "no search filter".
    pub fn set_search_query(&mut self, query: &str) -> Result<(), Error> {
        self.ui.search_query = query.to_owned();

        match compile_pattern(query, false) {
            Ok(matcher) => {
                self.ui.matcher = matcher;
                self.notify_subscribers();
                Ok(())
            }
            Err(error) => {
                self.ui.matcher = None;
                self.notify_subscribers();
                Err(error.into())
            }
        }
    }

    /// Set the sort field and direction for the transaction list.
    pub fn set_sort(&mut self, field: SortField, direction: SortDirection) {
        self.ui.sort_field = field;
        self.ui.sort_direction = direction;
        self.notify_subscribers();
    }

    /// Show only transactions in `category`, or all when `None`.
    pub fn set_category_filter(&mut self, category: Option<&str>) {
        self.ui.category_filter = category.map(str::to_owned);
        self.notify_subscribers();
    }

    /// Mark a record as the edit target, or clear it with `None`.
    pub fn set_editing(&mut self, id: Option<&str>) {
        self.ui.editing_id = id.map(str::to_owned);
        self.notify_subscribers();
    }

    /// Set the loading flag.
    pub fn set_loading(&mut self, loading: bool) {
        self.ui.loading = loading;
        self.notify_subscribers();
    }

    // ============ SUBSCRIPTIONS ============

    /// Register a callback invoked with a fresh [Snapshot] after every
    /// change, including session-state changes.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&Snapshot) + 'static) -> SubscriberId {
        let id = self.next_subscriber_id;
        self.next_subscriber_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));

        id
    }

    /// Remove a subscriber. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers
            .retain(|(subscriber_id, _)| *subscriber_id != id);

        self.subscribers.len() != before
    }

    // A panicking subscriber must not poison the tracker or starve the
    // subscribers after it, so each callback runs inside catch_unwind.
    fn notify_subscribers(&mut self) {
        let snapshot = self.snapshot();

        for (id, subscriber) in &mut self.subscribers {
            if catch_unwind(AssertUnwindSafe(|| subscriber(&snapshot))).is_err() {
                tracing::error!("subscriber {id} panicked during notification");
            }
        }
    }

    fn local_today(&self) -> Date {
        OffsetDateTime::now_utc().to_offset(self.utc_offset).date()
    }

    fn save_blob<T: Serialize>(&mut self, kind: StoreKind, value: &T) -> Result<(), StoreError> {
        let blob = serde_json::to_string(value)
            .map_err(|error| StoreError::Serialize(error.to_string()))?;

        self.store.save(kind, &blob).inspect_err(|error| {
            tracing::error!("failed to write the {kind} blob: {error}");
        })
    }
}

// Category names are unique without regard to case, so every membership
// check folds case. ASCII folding is exact here because validation limits
// names to ASCII letters, spaces, and hyphens.
fn category_exists(categories: &[String], name: &str) -> bool {
    categories
        .iter()
        .any(|existing| existing.eq_ignore_ascii_case(name))
}
