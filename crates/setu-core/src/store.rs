//! Durable key-value store abstraction.

use anyhow::Result;

/// Simple synchronous key-value persistence scoped to one user profile.
///
/// This trait decouples the session logic from the persistence mechanism
/// (files, an embedded store, in-memory for tests). There are no
/// transactional guarantees across keys; callers that write related keys
/// must order the writes so a crash between them is recoverable.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value for `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
