//! Resume session use case.
//!
//! Every session is permanently associated with the role it was started
//! with. This guard recovers that role on resume and prevents silently
//! mixing personas within one session:
//!
//! - requested role is the generic default → adopt the session's stored role
//! - requested role differs from the stored role → fail, naming both
//! - stored role cannot be recovered from a non-empty session → fail
//! - session does not exist yet → the requested role becomes its role

use crate::ports::role_registry::RoleRegistryPort;
use crate::ports::session_store::SessionStorePort;
use parley_domain::{DomainError, Message, SystemRole, TEMP_SESSION_ID};
use std::sync::Arc;
use tracing::debug;

/// A validated session handle: the id, the active role, and whether any
/// history already exists (so the caller can replay it).
#[derive(Debug, Clone)]
pub struct ResumedSession {
    pub chat_id: String,
    pub role: SystemRole,
    pub initiated: bool,
}

/// Use case validating that a session resume keeps its original role.
pub struct ResumeSessionUseCase {
    store: Arc<dyn SessionStorePort>,
    registry: Arc<dyn RoleRegistryPort>,
}

impl ResumeSessionUseCase {
    pub fn new(store: Arc<dyn SessionStorePort>, registry: Arc<dyn RoleRegistryPort>) -> Self {
        Self { store, registry }
    }

    /// Validate `chat_id` against `requested` and derive the active role.
    ///
    /// Fatal conditions abort before any mutation; the stored history is
    /// never touched here except for invalidating the reserved temp id.
    pub async fn execute(
        &self,
        chat_id: &str,
        requested: SystemRole,
    ) -> Result<ResumedSession, DomainError> {
        if chat_id == TEMP_SESSION_ID {
            // Invalidated before every use; behaves as an always-fresh session.
            self.store.invalidate(chat_id).await;
            return Ok(ResumedSession {
                chat_id: chat_id.to_string(),
                role: requested,
                initiated: false,
            });
        }

        let history = self.store.read(chat_id).await;
        let Some(first) = history.first() else {
            // Nothing stored: no validation needed, the requested role wins.
            return Ok(ResumedSession {
                chat_id: chat_id.to_string(),
                role: requested,
                initiated: false,
            });
        };

        let Some(established) = self.registry.identify(first) else {
            return Err(DomainError::AmbiguousRole(chat_id.to_string()));
        };

        let role = if requested.name() == self.registry.default_role().name() {
            // The caller didn't choose a role: adopt the session's.
            debug!(
                "chat \"{}\": adopting stored role \"{}\"",
                chat_id,
                established.name()
            );
            established
        } else if requested.name() != established.name() {
            return Err(DomainError::RoleConflict {
                requested: requested.name().to_string(),
                established: established.name().to_string(),
            });
        } else {
            established
        };

        Ok(ResumedSession {
            chat_id: chat_id.to_string(),
            role,
            initiated: true,
        })
    }

    /// Build the outgoing turn for `prompt`.
    ///
    /// The system/role message is prepended exactly when the session has no
    /// prior history (missing, temp, or uncached), so a persisted session
    /// carries it exactly once, as its first message.
    pub async fn turn_messages(
        &self,
        chat_id: Option<&str>,
        role: &SystemRole,
        prompt: &str,
    ) -> Vec<Message> {
        let initiated = match chat_id {
            Some(id) if id != TEMP_SESSION_ID => self.store.exists(id).await,
            _ => false,
        };
        let mut messages = Vec::with_capacity(2);
        if !initiated {
            messages.push(Message::system(role.prompt()));
        }
        messages.push(Message::user(prompt));
        messages
    }
}
