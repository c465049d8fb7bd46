//! Durable persistence for tracker state.
//!
//! The tracker persists three independent blobs (transactions, categories,
//! settings), each under its own key, through the [BlobStore] trait.
//! Implementations only move opaque strings; JSON decoding and corrupt-blob
//! tolerance live in [load_or_default] so every backend gets the same
//! recovery behavior.

use std::{
    collections::HashMap,
    fmt, fs, io,
    path::PathBuf,
};

use serde::de::DeserializeOwned;

/// The kinds of state the tracker persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKind {
    /// The transaction list.
    Transactions,
    /// The ordered category list.
    Categories,
    /// The user settings.
    Settings,
}

impl StoreKind {
    /// The stable storage key for this kind.
    ///
    /// Backends use this as the blob name (e.g. the file stem for
    /// [DirectoryStore]), so it must never change for stored data to remain
    /// readable.
    pub fn key(self) -> &'static str {
        match self {
            StoreKind::Transactions => "transactions",
            StoreKind::Categories => "categories",
            StoreKind::Settings => "settings",
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// The errors that may occur while reading or writing durable state.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// The storage backend could not read or write a blob.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// A value could not be serialized as JSON before writing.
    #[error("could not serialize as JSON: {0}")]
    Serialize(String),
}

impl From<io::Error> for StoreError {
    fn from(value: io::Error) -> Self {
        StoreError::Backend(value.to_string())
    }
}

/// A durable key/value store for tracker state blobs.
///
/// Implementations must have completed the write by the time [save](BlobStore::save)
/// returns `Ok`, and a failed write must leave the previously stored blob
/// intact. The tracker relies on this to keep its in-memory mirror equal to
/// durable state after every successful mutation.
pub trait BlobStore {
    /// Read the blob stored for `kind`, or `None` if nothing was stored yet.
    ///
    /// # Errors
    /// Returns [StoreError::Backend] when the backend cannot be read.
    fn load(&self, kind: StoreKind) -> Result<Option<String>, StoreError>;

    /// Durably write the blob for `kind`, replacing any previous value.
    ///
    /// # Errors
    /// Returns [StoreError::Backend] when the write did not complete.
    fn save(&mut self, kind: StoreKind, blob: &str) -> Result<(), StoreError>;

    /// Remove the blob for `kind`. Clearing an absent blob is not an error.
    ///
    /// # Errors
    /// Returns [StoreError::Backend] when the backend cannot be written.
    fn clear(&mut self, kind: StoreKind) -> Result<(), StoreError>;
}

/// An in-memory [BlobStore] for tests and ephemeral hosts.
///
/// Nothing survives the process; hosts that want durable data should use
/// [DirectoryStore] or bring their own backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: HashMap<StoreKind, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn load(&self, kind: StoreKind) -> Result<Option<String>, StoreError> {
        Ok(self.blobs.get(&kind).cloned())
    }

    fn save(&mut self, kind: StoreKind, blob: &str) -> Result<(), StoreError> {
        self.blobs.insert(kind, blob.to_owned());
        Ok(())
    }

    fn clear(&mut self, kind: StoreKind) -> Result<(), StoreError> {
        self.blobs.remove(&kind);
        Ok(())
    }
}

/// A [BlobStore] that keeps one JSON file per kind under a root directory.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Create a store rooted at `root`.
    ///
    /// The directory is created on the first write, not here, so pointing at
    /// a missing directory simply reads as an empty store.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn blob_path(&self, kind: StoreKind) -> PathBuf {
        self.root.join(format!("{}.json", kind.key()))
    }
}

impl BlobStore for DirectoryStore {
    fn load(&self, kind: StoreKind) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.blob_path(kind)) {
            Ok(blob) => Ok(Some(blob)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn save(&mut self, kind: StoreKind, blob: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.blob_path(kind), blob)?;
        Ok(())
    }

    fn clear(&mut self, kind: StoreKind) -> Result<(), StoreError> {
        match fs::remove_file(self.blob_path(kind)) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

/// Decode the blob stored for `kind`, tolerating absent or corrupt data.
///
/// An absent blob yields `T::default()`. A blob that fails to decode also
/// yields `T::default()` after logging a warning, so a damaged store never
/// prevents the tracker from starting.
///
/// # Errors
/// Returns [StoreError::Backend] when the underlying store cannot be read.
/// Decode failures are tolerated, not propagated.
pub fn load_or_default<T, S>(store: &S, kind: StoreKind) -> Result<T, StoreError>
where
    T: DeserializeOwned + Default,
    S: BlobStore,
{
    let Some(blob) = store.load(kind)? else {
        return Ok(T::default());
    };

    match serde_json::from_str(&blob) {
        Ok(value) => Ok(value),
        Err(error) => {
            tracing::warn!("discarding corrupt {kind} blob: {error}");
            Ok(T::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn memory_store_round_trips_blobs() {
        let mut store = MemoryStore::new();

        store
            .save(StoreKind::Settings, "{\"budgetCap\":50.0}")
            .expect("save should not fail");
        let got = store
            .load(StoreKind::Settings)
            .expect("load should not fail");

        assert_eq!(got, Some("{\"budgetCap\":50.0}".to_owned()));
    }

    #[test]
    fn memory_store_loads_none_for_missing_kind() {
        let store = MemoryStore::new();

        let got = store
            .load(StoreKind::Transactions)
            .expect("load should not fail");

        assert_eq!(got, None);
    }

    #[test]
    fn memory_store_clear_removes_blob() {
        let mut store = MemoryStore::new();
        store
            .save(StoreKind::Categories, "[\"Food\"]")
            .expect("save should not fail");

        store
            .clear(StoreKind::Categories)
            .expect("clear should not fail");

        assert_eq!(
            store
                .load(StoreKind::Categories)
                .expect("load should not fail"),
            None
        );
    }

    #[test]
    fn directory_store_round_trips_blobs() {
        let temp_dir = tempdir().expect("could not create temp dir");
        let mut store = DirectoryStore::new(temp_dir.path().join("state"));

        store
            .save(StoreKind::Transactions, "[]")
            .expect("save should not fail");
        let got = store
            .load(StoreKind::Transactions)
            .expect("load should not fail");

        assert_eq!(got, Some("[]".to_owned()));
    }

    #[test]
    fn directory_store_loads_none_before_first_write() {
        let temp_dir = tempdir().expect("could not create temp dir");
        let store = DirectoryStore::new(temp_dir.path().join("does-not-exist"));

        let got = store
            .load(StoreKind::Settings)
            .expect("load should not fail");

        assert_eq!(got, None);
    }

    #[test]
    fn directory_store_clear_is_idempotent() {
        let temp_dir = tempdir().expect("could not create temp dir");
        let mut store = DirectoryStore::new(temp_dir.path());

        store
            .clear(StoreKind::Settings)
            .expect("clearing an absent blob should not fail");

        store
            .save(StoreKind::Settings, "{}")
            .expect("save should not fail");
        store
            .clear(StoreKind::Settings)
            .expect("clear should not fail");
        assert_eq!(
            store
                .load(StoreKind::Settings)
                .expect("load should not fail"),
            None
        );
    }

    #[test]
    fn load_or_default_returns_default_for_absent_blob() {
        let store = MemoryStore::new();

        let got: Vec<String> =
            load_or_default(&store, StoreKind::Categories).expect("load should not fail");

        assert_eq!(got, Vec::<String>::new());
    }

    #[test]
    fn load_or_default_discards_corrupt_blob() {
        let mut store = MemoryStore::new();
        store
            .save(StoreKind::Categories, "not json {{{")
            .expect("save should not fail");

        let got: Vec<String> =
            load_or_default(&store, StoreKind::Categories).expect("load should not fail");

        assert_eq!(got, Vec::<String>::new());
    }

    #[test]
    fn load_or_default_decodes_valid_blob() {
        let mut store = MemoryStore::new();
        store
            .save(StoreKind::Categories, "[\"Food\",\"Transport\"]")
            .expect("save should not fail");

        let got: Vec<String> =
            load_or_default(&store, StoreKind::Categories).expect("load should not fail");

        assert_eq!(got, vec!["Food".to_owned(), "Transport".to_owned()]);
    }
}
