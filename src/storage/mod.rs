//! Key-value slot backends for persisted user state
//!
//! The favourites list is stored under a single key as a JSON string, the
//! same contract a browser's local storage offers.

pub mod file;
pub mod in_memory;

pub use file::FileKeyValueStore;
pub use in_memory::InMemoryKeyValueStore;

use anyhow::Result;

/// A string-to-string key-value slot
///
/// Implementations are synchronous and assumed local and fast.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` when absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing an absent key is not an error
    fn remove(&self, key: &str) -> Result<()>;

    /// Short backend name used in logs and errors
    fn backend_name(&self) -> &'static str;
}
