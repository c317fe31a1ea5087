//! Browse sessions use case.
//!
//! Listing, keyword search and deletion of stored sessions, plus the
//! rendered `{role}: {content}` view consumed by the terminal renderer.
//!
//! Search is restricted to user-authored turns: assistant and system
//! messages are skipped when matching, but the turn that follows a hit is
//! attached for context.

use crate::ports::session_store::{DeleteOutcome, SessionStorePort, StoreError};
use parley_domain::{Message, Role};
use std::sync::Arc;
use tracing::debug;

/// One search match: the user turn that matched and, when present, the
/// turn immediately following it (usually the assistant's answer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub chat_id: String,
    pub matched: Message,
    pub context: Option<Message>,
}

/// Use case for discovering and curating stored sessions.
pub struct BrowseSessionsUseCase {
    store: Arc<dyn SessionStorePort>,
}

impl BrowseSessionsUseCase {
    pub fn new(store: Arc<dyn SessionStorePort>) -> Self {
        Self { store }
    }

    /// All stored chat ids, oldest interaction first.
    pub async fn list(&self) -> Result<Vec<String>, StoreError> {
        self.store.list().await
    }

    /// Whether `id` names an existing session (used to reject duplicates
    /// when creating a new one).
    pub async fn exists(&self, id: &str) -> bool {
        self.store.exists(id).await
    }

    /// Substring search over user-authored turns of every stored session.
    pub async fn search(&self, keyword: &str) -> Result<Vec<SearchHit>, StoreError> {
        let mut hits = Vec::new();
        for chat_id in self.store.list().await? {
            let history = self.store.read(&chat_id).await;
            for (index, message) in history.iter().enumerate() {
                if message.role != Role::User {
                    continue;
                }
                if message.content.contains(keyword) {
                    hits.push(SearchHit {
                        chat_id: chat_id.clone(),
                        matched: message.clone(),
                        context: history.get(index + 1).cloned(),
                    });
                }
            }
        }
        debug!("search \"{}\": {} hit(s)", keyword, hits.len());
        Ok(hits)
    }

    /// Delete a session; deleting a missing id reports a negative outcome.
    pub async fn delete(&self, id: &str) -> DeleteOutcome {
        self.store.delete(id).await
    }

    /// The stored history of `id` as `{role}: {content}` display lines.
    pub async fn rendered_history(&self, id: &str) -> Vec<String> {
        self.store
            .read(id)
            .await
            .iter()
            .map(Message::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    struct MemoryStore {
        sessions: Mutex<HashMap<String, Vec<Message>>>,
        order: Mutex<Vec<String>>,
    }

    impl MemoryStore {
        fn new() -> Self {
            Self {
                sessions: Mutex::new(HashMap::new()),
                order: Mutex::new(Vec::new()),
            }
        }

        fn seed(&self, id: &str, messages: Vec<Message>) {
            self.sessions.lock().unwrap().insert(id.to_string(), messages);
            self.order.lock().unwrap().push(id.to_string());
        }
    }

    #[async_trait]
    impl SessionStorePort for MemoryStore {
        async fn read(&self, id: &str) -> Vec<Message> {
            self.sessions.lock().unwrap().get(id).cloned().unwrap_or_default()
        }

        async fn write(&self, messages: &[Message], id: &str) -> Result<(), StoreError> {
            self.sessions
                .lock()
                .unwrap()
                .insert(id.to_string(), messages.to_vec());
            Ok(())
        }

        async fn invalidate(&self, id: &str) {
            self.sessions.lock().unwrap().remove(id);
        }

        async fn exists(&self, id: &str) -> bool {
            !self.read(id).await.is_empty()
        }

        async fn list(&self) -> Result<Vec<String>, StoreError> {
            Ok(self.order.lock().unwrap().clone())
        }

        async fn delete(&self, id: &str) -> DeleteOutcome {
            if self.sessions.lock().unwrap().remove(id).is_some() {
                self.order.lock().unwrap().retain(|known| known != id);
                DeleteOutcome::deleted(id)
            } else {
                DeleteOutcome::not_found(id)
            }
        }
    }

    fn use_case(store: &Arc<MemoryStore>) -> BrowseSessionsUseCase {
        BrowseSessionsUseCase::new(Arc::clone(store) as Arc<dyn SessionStorePort>)
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn search_matches_user_turns_only() {
        let store = Arc::new(MemoryStore::new());
        store.seed(
            "work",
            vec![
                Message::system("persona"),
                Message::user("find the bug"),
                Message::assistant("here is the fix"),
            ],
        );
        let use_case = use_case(&store);

        // "bug" appears in a user turn.
        let hits = use_case.search("bug").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].chat_id, "work");
        assert_eq!(hits[0].matched, Message::user("find the bug"));
        assert_eq!(hits[0].context, Some(Message::assistant("here is the fix")));

        // "fix" appears only in an assistant turn.
        assert!(use_case.search("fix").await.unwrap().is_empty());

        // "persona" appears only in the system turn.
        assert!(use_case.search("persona").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_hit_without_following_turn_has_no_context() {
        let store = Arc::new(MemoryStore::new());
        store.seed(
            "tail",
            vec![Message::system("persona"), Message::user("dangling question")],
        );

        let hits = use_case(&store).search("dangling").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].context, None);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = Arc::new(MemoryStore::new());
        store.seed("work", vec![Message::user("hi")]);
        let use_case = use_case(&store);

        assert!(use_case.delete("work").await.deleted);

        let first = use_case.delete("nope").await;
        let second = use_case.delete("nope").await;
        assert!(!first.deleted);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn rendered_history_uses_role_prefixes() {
        let store = Arc::new(MemoryStore::new());
        store.seed(
            "work",
            vec![Message::user("hello"), Message::assistant("hi there")],
        );

        let lines = use_case(&store).rendered_history("work").await;
        assert_eq!(lines, vec!["user: hello", "assistant: hi there"]);
    }

    #[tokio::test]
    async fn rendered_history_of_missing_session_is_empty() {
        let store = Arc::new(MemoryStore::new());
        assert!(use_case(&store).rendered_history("ghost").await.is_empty());
    }
}
