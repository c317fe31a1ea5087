//! Session store port
//!
//! Defines persistence of an ordered message list per session id. The
//! contract is deliberately backend-agnostic: any store that can satisfy
//! `list()` ordering by last interaction (a filesystem with mtimes, an
//! embedded key-value store with its own bookkeeping) is a valid adapter.

use async_trait::async_trait;
use parley_domain::Message;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while persisting or enumerating sessions.
///
/// Read-side failures are NOT represented here: `read`, `exists` and
/// `invalidate` mask missing or corrupt backing data as an empty history.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to prepare session storage at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to persist chat \"{id}\": {source}")]
    Write {
        id: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode chat \"{id}\": {source}")]
    Encode {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to list chats: {0}")]
    List(#[source] std::io::Error),
}

/// Result of an explicit session deletion.
///
/// `deleted` distinguishes "deleted" from "did not exist"; `message` is the
/// human-readable form shown to the user either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub deleted: bool,
    pub message: String,
}

impl DeleteOutcome {
    pub fn deleted(id: &str) -> Self {
        Self {
            deleted: true,
            message: format!("{id} successfully deleted"),
        }
    }

    pub fn not_found(id: &str) -> Self {
        Self {
            deleted: false,
            message: format!("{id} not found"),
        }
    }
}

/// Persistence of ordered per-session message lists
///
/// A session is implicitly created on first successful `write`; there is no
/// explicit create operation. Writes are whole-history overwrites trimmed to
/// the store's configured retention length. Cross-process concurrent writers
/// to one id are not guaranteed safe (last writer wins).
#[async_trait]
pub trait SessionStorePort: Send + Sync {
    /// Full persisted history for `id`, oldest first. Missing, unreadable
    /// or ill-shaped backing data reads as an empty history.
    async fn read(&self, id: &str) -> Vec<Message>;

    /// Persist `messages` for `id`, truncated to the most recent retention
    /// window, overwriting any prior content.
    async fn write(&self, messages: &[Message], id: &str) -> Result<(), StoreError>;

    /// Remove the backing data for `id` if present. Never fails.
    async fn invalidate(&self, id: &str);

    /// True iff `id` has backing data that parses to at least one message.
    async fn exists(&self, id: &str) -> bool;

    /// All session ids, ordered by ascending last-modification time
    /// (oldest interaction first).
    async fn list(&self) -> Result<Vec<String>, StoreError>;

    /// Explicit deletion with a human-readable outcome. Idempotent:
    /// deleting a missing id is a reported no-op, not an error.
    async fn delete(&self, id: &str) -> DeleteOutcome;
}
