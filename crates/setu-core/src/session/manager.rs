//! Session lifecycle management.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use setu_types::User;
use uuid::Uuid;

use super::model::Session;
use crate::error::{ClientError, Result};
use crate::store::KeyValueStore;

/// Durable storage keys. The names are load-bearing: other tooling in the
/// deployment reads the same keys, so they must not change.
pub mod keys {
    /// Bearer credential string.
    pub const TOKEN: &str = "token";
    /// JSON-serialized [`setu_types::User`].
    pub const USER_INFO: &str = "userInfo";
    /// Display-only duplicate of the user's name for components without
    /// session access.
    pub const USER_NAME: &str = "userName";
}

/// Handle returned by [`SessionManager::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(Uuid);

type Listener = Box<dyn Fn(&Session) + Send + Sync>;

/// The single authoritative record of the authentication state.
///
/// `SessionManager` is responsible for:
/// - Restoring the session from durable storage at startup
/// - Committing login/logout atomically to memory and storage
/// - Notifying subscribers synchronously on every state change
///
/// All operations are synchronous; durable storage and in-memory state
/// converge within the same call that mutates either. Exactly one instance
/// exists per process and is shared by `Arc`, never through a global.
pub struct SessionManager {
    state: RwLock<Session>,
    listeners: Mutex<HashMap<SubscriberId, Listener>>,
    store: Arc<dyn KeyValueStore>,
}

impl SessionManager {
    /// Creates a manager over the given store with an empty session.
    ///
    /// Call [`restore`](Self::restore) afterwards to pick up a persisted
    /// session.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            state: RwLock::new(Session::default()),
            listeners: Mutex::new(HashMap::new()),
            store,
        }
    }

    /// Populates the session from durable storage.
    ///
    /// The session is restored only when both the credential and a
    /// well-formed profile are present; anything else (missing keys,
    /// storage failure, corrupt JSON) degrades to an empty session. This
    /// never fails and never notifies subscribers.
    pub fn restore(&self) {
        let credential = self.read_key(keys::TOKEN);
        let raw_profile = self.read_key(keys::USER_INFO);

        let restored = match (credential, raw_profile) {
            (Some(credential), Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(profile) => Session {
                    credential: Some(credential),
                    profile: Some(profile),
                },
                Err(err) => {
                    tracing::warn!(error = %err, "stored profile is malformed; starting logged out");
                    Session::default()
                }
            },
            _ => Session::default(),
        };

        *self
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner) = restored;
    }

    /// Commits a credential/profile pair as the new session.
    ///
    /// Persistence happens first (credential before profile, then the legacy
    /// display name), so a storage failure surfaces as an error and leaves
    /// the in-memory session unchanged: there is no partial login. On
    /// success both fields are set together and subscribers are notified
    /// synchronously.
    pub fn login(&self, credential: impl Into<String>, profile: User) -> Result<()> {
        let credential = credential.into();
        let encoded = serde_json::to_string(&profile)?;

        self.write_key(keys::TOKEN, &credential)?;
        self.write_key(keys::USER_INFO, &encoded)?;
        self.write_key(keys::USER_NAME, &profile.name)?;

        let snapshot = {
            let mut state = self
                .state
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            state.credential = Some(credential);
            state.profile = Some(profile);
            state.clone()
        };
        self.notify(&snapshot);
        Ok(())
    }

    /// Clears the session.
    ///
    /// A logout on an already-empty session is a no-op: no notification, no
    /// storage traffic. Otherwise memory is cleared and subscribers notified
    /// before the keys are removed - credential first, so a crash mid-way
    /// leaves at most an orphaned profile, which [`restore`](Self::restore)
    /// treats as logged out.
    pub fn logout(&self) -> Result<()> {
        let snapshot = {
            let mut state = self
                .state
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            if state.credential.is_none() && state.profile.is_none() {
                return Ok(());
            }
            *state = Session::default();
            state.clone()
        };
        self.notify(&snapshot);

        self.remove_key(keys::TOKEN)?;
        self.remove_key(keys::USER_INFO)?;
        self.remove_key(keys::USER_NAME)?;
        Ok(())
    }

    /// Synchronous snapshot of the current state. Never blocks on I/O.
    pub fn current(&self) -> Session {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Registers a listener invoked synchronously on every login/logout.
    ///
    /// Listeners receive a snapshot and must not assume any granularity
    /// beyond "state changed". A listener must not subscribe or unsubscribe
    /// from within its own callback.
    pub fn subscribe<F>(&self, listener: F) -> SubscriberId
    where
        F: Fn(&Session) + Send + Sync + 'static,
    {
        let id = SubscriberId(Uuid::new_v4());
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Box::new(listener));
        id
    }

    /// Removes a previously registered listener.
    pub fn unsubscribe(&self, id: SubscriberId) {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
    }

    fn notify(&self, snapshot: &Session) {
        let listeners = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        for listener in listeners.values() {
            listener(snapshot);
        }
    }

    fn read_key(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, error = %err, "durable store read failed");
                None
            }
        }
    }

    fn write_key(&self, key: &str, value: &str) -> Result<()> {
        self.store
            .set(key, value)
            .map_err(|err| ClientError::storage(err.to_string()))
    }

    fn remove_key(&self, key: &str) -> Result<()> {
        self.store
            .remove(key)
            .map_err(|err| ClientError::storage(err.to_string()))
    }
}
