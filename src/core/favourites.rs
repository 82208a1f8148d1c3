//! Favourites set with write-through persistence

use super::error::StorageError;
use crate::storage::KeyValueStore;
use indexmap::IndexSet;

/// Key the favourites list is stored under unless configured otherwise
pub const DEFAULT_FAVOURITES_KEY: &str = "favs";

/// Set of favourite restaurant ids backed by a key-value slot
///
/// The slot holds a JSON array of ids. Insertion order is kept so the
/// array round-trips unchanged, though order carries no meaning. Every
/// [`toggle`](Self::toggle) writes the whole set back immediately.
#[derive(Debug)]
pub struct FavouritesStore<S: KeyValueStore> {
    slot: S,
    key: String,
    ids: IndexSet<u32>,
}

impl<S: KeyValueStore> FavouritesStore<S> {
    /// Create an empty store; call [`load`](Self::load) to read the slot
    pub fn new(slot: S, key: impl Into<String>) -> Self {
        Self {
            slot,
            key: key.into(),
            ids: IndexSet::new(),
        }
    }

    /// Create a store and immediately load it from the slot
    pub fn open(slot: S, key: impl Into<String>) -> Self {
        let mut store = Self::new(slot, key);
        store.load();
        store
    }

    /// Replace the in-memory set with the persisted one
    ///
    /// Never fails. A missing key, an unreadable slot, malformed JSON or a
    /// payload that is not an array of ids all load as the empty set.
    pub fn load(&mut self) {
        self.ids = self.read_persisted().unwrap_or_else(|e| {
            tracing::warn!(
                backend = self.slot.backend_name(),
                error = %e,
                "Persisted favourites unusable, starting empty"
            );
            IndexSet::new()
        });

        tracing::debug!(key = %self.key, count = self.ids.len(), "Loaded favourites");
    }

    /// Read the persisted set without touching the in-memory one
    ///
    /// A missing key is the empty set; a failed read or a payload that is
    /// not an array of ids is a [`StorageError::ReadError`].
    pub fn read_persisted(&self) -> Result<IndexSet<u32>, StorageError> {
        let raw = self
            .slot
            .get(&self.key)
            .map_err(|e| StorageError::ReadError {
                key: self.key.clone(),
                message: e.to_string(),
            })?;

        let Some(raw) = raw else {
            return Ok(IndexSet::new());
        };

        serde_json::from_str::<Vec<u32>>(&raw)
            .map(|ids| ids.into_iter().collect())
            .map_err(|e| StorageError::ReadError {
                key: self.key.clone(),
                message: format!("malformed favourites: {}", e),
            })
    }

    /// Write the current set to the slot
    pub fn persist(&self) -> Result<(), StorageError> {
        let ids: Vec<u32> = self.ids.iter().copied().collect();
        let payload = serde_json::to_string(&ids).map_err(|e| StorageError::WriteError {
            key: self.key.clone(),
            message: e.to_string(),
        })?;

        self.slot
            .set(&self.key, &payload)
            .map_err(|e| StorageError::WriteError {
                key: self.key.clone(),
                message: e.to_string(),
            })
    }

    /// Flip membership of `id`, returning whether it is now a favourite
    ///
    /// The in-memory state always changes; a failed write is logged and
    /// left for the next successful persist to repair.
    pub fn toggle(&mut self, id: u32) -> bool {
        let favourite = if self.ids.shift_remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        };

        if let Err(e) = self.persist() {
            tracing::warn!(restaurant_id = id, error = %e, "Failed to persist favourites");
        }

        tracing::debug!(restaurant_id = id, favourite, "Toggled favourite");
        favourite
    }

    pub fn is_favourite(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    /// Current favourite ids
    pub fn list(&self) -> &IndexSet<u32> {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Drop ids for which `known` returns false and persist if anything changed
    ///
    /// Returns the dropped ids.
    pub fn retain_known(&mut self, known: impl Fn(u32) -> bool) -> Vec<u32> {
        let dropped: Vec<u32> = self.ids.iter().copied().filter(|id| !known(*id)).collect();
        if dropped.is_empty() {
            return dropped;
        }

        self.ids.retain(|id| known(*id));
        tracing::warn!(dropped = ?dropped, "Pruned favourites for unknown restaurants");

        if let Err(e) = self.persist() {
            tracing::warn!(error = %e, "Failed to persist pruned favourites");
        }
        dropped
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }
}
