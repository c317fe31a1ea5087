//! File-backed session store.
//!
//! One file per session, named exactly as the session id, holding a JSON
//! array of messages, oldest first. Storing one file per session keeps
//! listing, deleting and searching composable with ordinary filesystem
//! operations, at the cost of no cross-session transactional guarantees.
//!
//! Writes are whole-file overwrites with no locking: a partial interruption
//! can leave a corrupt file, which self-heals to an empty history on the
//! next read. Concurrent writers to one id are last-writer-wins.

use async_trait::async_trait;
use parley_application::ports::session_store::{DeleteOutcome, SessionStorePort, StoreError};
use parley_domain::Message;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, warn};

/// Session store keeping one JSON file per chat id under `storage_dir`,
/// trimmed to the most recent `cache_length` messages on every write.
pub struct FileSessionStore {
    storage_dir: PathBuf,
    cache_length: usize,
}

impl FileSessionStore {
    /// Create a store rooted at `storage_dir`, creating the directory
    /// (and parents) if needed.
    pub fn new(storage_dir: impl Into<PathBuf>, cache_length: usize) -> Result<Self, StoreError> {
        let storage_dir = storage_dir.into();
        std::fs::create_dir_all(&storage_dir).map_err(|source| StoreError::Storage {
            path: storage_dir.clone(),
            source,
        })?;
        Ok(Self {
            storage_dir,
            cache_length,
        })
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    fn session_path(&self, id: &str) -> PathBuf {
        self.storage_dir.join(id)
    }
}

#[async_trait]
impl SessionStorePort for FileSessionStore {
    async fn read(&self, id: &str) -> Vec<Message> {
        let path = self.session_path(id);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    debug!("chat \"{}\": unreadable history: {}", id, e);
                }
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<Message>>(&content) {
            Ok(messages) => messages,
            Err(e) => {
                // Corrupt or ill-shaped content reads as an empty history.
                warn!("chat \"{}\": discarding unparseable history: {}", id, e);
                Vec::new()
            }
        }
    }

    async fn write(&self, messages: &[Message], id: &str) -> Result<(), StoreError> {
        let start = messages.len().saturating_sub(self.cache_length);
        let content =
            serde_json::to_string(&messages[start..]).map_err(|source| StoreError::Encode {
                id: id.to_string(),
                source,
            })?;
        tokio::fs::write(self.session_path(id), content)
            .await
            .map_err(|source| StoreError::Write {
                id: id.to_string(),
                source,
            })
    }

    async fn invalidate(&self, id: &str) {
        if let Err(e) = tokio::fs::remove_file(self.session_path(id)).await {
            if e.kind() != ErrorKind::NotFound {
                warn!("chat \"{}\": could not invalidate: {}", id, e);
            }
        }
    }

    async fn exists(&self, id: &str) -> bool {
        !self.read(id).await.is_empty()
    }

    async fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut entries = tokio::fs::read_dir(&self.storage_dir)
            .await
            .map_err(StoreError::List)?;

        let mut sessions: Vec<(SystemTime, String)> = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(StoreError::List)? {
            let metadata = match entry.metadata().await {
                Ok(metadata) if metadata.is_file() => metadata,
                _ => continue,
            };
            let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            sessions.push((modified, entry.file_name().to_string_lossy().into_owned()));
        }

        // Oldest interaction first.
        sessions.sort();
        Ok(sessions.into_iter().map(|(_, id)| id).collect())
    }

    async fn delete(&self, id: &str) -> DeleteOutcome {
        match tokio::fs::remove_file(self.session_path(id)).await {
            Ok(()) => DeleteOutcome::deleted(id),
            Err(e) if e.kind() == ErrorKind::NotFound => DeleteOutcome::not_found(id),
            Err(e) => DeleteOutcome {
                deleted: false,
                message: format!("could not delete {id}: {e}"),
            },
        }
    }
}
