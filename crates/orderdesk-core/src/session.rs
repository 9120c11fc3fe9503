//! Per-user session store.
//!
//! Tracks the panel credential of each user and the action waiting for an
//! order id. The store is consulted through the [`SessionStore`] trait so the
//! in-memory backend can be replaced by a persistent one.

use crate::action::OrderAction;
use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

/// Errors that can occur during session operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// A pending action was recorded for a user without a credential
    #[error("user {0} has no stored credential")]
    MissingCredential(i64),
    /// Failure reported by the storage backend
    #[error("session backend error: {0}")]
    Backend(String),
}

/// Conversation phase of a single user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserPhase {
    /// Prompted for a credential, none stored yet
    AwaitingCredential,
    /// Credential stored, nothing pending
    Ready,
    /// Credential stored, waiting for the order id of this action
    AwaitingOrderId(OrderAction),
}

/// Interface for session storage backends
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Get the stored credential
    async fn get_credential(&self, user_id: i64) -> Result<Option<String>, SessionError>;
    /// Store or overwrite the credential
    async fn set_credential(&self, user_id: i64, credential: String) -> Result<(), SessionError>;
    /// Get the pending action without clearing it
    async fn get_pending(&self, user_id: i64) -> Result<Option<OrderAction>, SessionError>;
    /// Record a pending action, replacing any previous one
    async fn set_pending(&self, user_id: i64, action: OrderAction) -> Result<(), SessionError>;
    /// Read and clear the pending action in one step
    async fn take_pending(&self, user_id: i64) -> Result<Option<OrderAction>, SessionError>;
    /// Record that the user was asked for a credential
    async fn begin_onboarding(&self, user_id: i64) -> Result<(), SessionError>;
    /// Current phase, `None` for users never seen
    async fn phase(&self, user_id: i64) -> Result<Option<UserPhase>, SessionError>;
}

#[derive(Debug, Default, Clone)]
struct SessionEntry {
    credential: Option<String>,
    pending: Option<OrderAction>,
}

impl SessionEntry {
    fn phase(&self) -> UserPhase {
        match (&self.credential, self.pending) {
            (None, _) => UserPhase::AwaitingCredential,
            (Some(_), None) => UserPhase::Ready,
            (Some(_), Some(action)) => UserPhase::AwaitingOrderId(action),
        }
    }
}

/// Process-wide in-memory session store.
///
/// Entries are never evicted and are lost on restart. Every operation takes
/// the lock once, so read-then-write sequences such as
/// [`SessionStore::take_pending`] are atomic per user.
#[derive(Default)]
pub struct InMemorySessionStore {
    entries: RwLock<HashMap<i64, SessionEntry>>,
}

impl InMemorySessionStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users holding a credential.
    pub async fn session_count(&self) -> usize {
        self.entries
            .read()
            .await
            .values()
            .filter(|entry| entry.credential.is_some())
            .count()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_credential(&self, user_id: i64) -> Result<Option<String>, SessionError> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(&user_id)
            .and_then(|entry| entry.credential.clone()))
    }

    async fn set_credential(&self, user_id: i64, credential: String) -> Result<(), SessionError> {
        let mut entries = self.entries.write().await;
        entries.entry(user_id).or_default().credential = Some(credential);
        debug!(user_id, "Credential stored");
        Ok(())
    }

    async fn get_pending(&self, user_id: i64) -> Result<Option<OrderAction>, SessionError> {
        let entries = self.entries.read().await;
        Ok(entries.get(&user_id).and_then(|entry| entry.pending))
    }

    async fn set_pending(&self, user_id: i64, action: OrderAction) -> Result<(), SessionError> {
        let mut entries = self.entries.write().await;
        match entries.get_mut(&user_id) {
            Some(entry) if entry.credential.is_some() => {
                entry.pending = Some(action);
                Ok(())
            }
            _ => Err(SessionError::MissingCredential(user_id)),
        }
    }

    async fn take_pending(&self, user_id: i64) -> Result<Option<OrderAction>, SessionError> {
        let mut entries = self.entries.write().await;
        Ok(entries
            .get_mut(&user_id)
            .and_then(|entry| entry.pending.take()))
    }

    async fn begin_onboarding(&self, user_id: i64) -> Result<(), SessionError> {
        let mut entries = self.entries.write().await;
        entries.entry(user_id).or_default();
        Ok(())
    }

    async fn phase(&self, user_id: i64) -> Result<Option<UserPhase>, SessionError> {
        let entries = self.entries.read().await;
        Ok(entries.get(&user_id).map(SessionEntry::phase))
    }
}
