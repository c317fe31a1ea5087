//! Built-in role registry.
//!
//! Resolves the built-in persona names and recovers the persona a stored
//! session was started with by matching its first message against the
//! registered prompt texts. A first message that matches no registered
//! persona identifies as nothing, which the guard surfaces as an
//! ambiguous-role error.

use parley_application::ports::role_registry::RoleRegistryPort;
use parley_domain::{BuiltinRole, Message, Role, SystemRole};

/// Registry over the built-in personas.
#[derive(Debug, Default)]
pub struct BuiltinRoleRegistry;

impl BuiltinRoleRegistry {
    pub fn new() -> Self {
        Self
    }
}

impl RoleRegistryPort for BuiltinRoleRegistry {
    fn resolve(&self, name: &str) -> Option<SystemRole> {
        name.parse::<BuiltinRole>().ok().map(SystemRole::from)
    }

    fn identify(&self, first_message: &Message) -> Option<SystemRole> {
        if first_message.role != Role::System {
            return None;
        }
        let content = first_message.content.trim();
        BuiltinRole::ALL
            .into_iter()
            .find(|role| content == role.prompt().trim())
            .map(SystemRole::from)
    }

    fn default_role(&self) -> SystemRole {
        BuiltinRole::Default.into()
    }

    fn names(&self) -> Vec<String> {
        BuiltinRole::ALL
            .into_iter()
            .map(|role| role.as_str().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_builtin_names() {
        let registry = BuiltinRoleRegistry::new();
        assert_eq!(registry.resolve("shell").unwrap().name(), "shell");
        assert_eq!(
            registry.resolve("describe-shell").unwrap().name(),
            "describe-shell"
        );
        assert!(registry.resolve("pirate").is_none());
    }

    #[test]
    fn identifies_stored_persona_from_first_message() {
        let registry = BuiltinRoleRegistry::new();
        let first = Message::system(BuiltinRole::Shell.prompt());

        let identified = registry.identify(&first).unwrap();
        assert_eq!(identified.name(), "shell");
    }

    #[test]
    fn unknown_persona_text_identifies_as_nothing() {
        let registry = BuiltinRoleRegistry::new();
        assert!(registry.identify(&Message::system("hand-written prompt")).is_none());
    }

    #[test]
    fn non_system_first_message_identifies_as_nothing() {
        let registry = BuiltinRoleRegistry::new();
        // Even if a user pasted a persona text into their own turn.
        let first = Message::user(BuiltinRole::Shell.prompt());
        assert!(registry.identify(&first).is_none());
    }

    #[test]
    fn default_role_is_default() {
        let registry = BuiltinRoleRegistry::new();
        assert_eq!(registry.default_role().name(), "default");
        assert!(registry.names().contains(&"default".to_string()));
    }

    #[tokio::test]
    async fn guard_recovers_role_from_file_store() {
        use crate::store::FileSessionStore;
        use parley_application::{ResumeSessionUseCase, SessionStorePort};
        use std::sync::Arc;

        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileSessionStore::new(dir.path(), 10).unwrap());
        store
            .write(
                &[
                    Message::system(BuiltinRole::Shell.prompt()),
                    Message::user("list files"),
                ],
                "work",
            )
            .await
            .unwrap();

        let registry = Arc::new(BuiltinRoleRegistry::new());
        let guard = ResumeSessionUseCase::new(store, registry.clone());

        // Default request adopts the stored role; same role passes.
        let resumed = guard
            .execute("work", registry.default_role())
            .await
            .unwrap();
        assert_eq!(resumed.role.name(), "shell");
        assert!(resumed.initiated);

        // A different explicit role is a conflict.
        let err = guard
            .execute("work", registry.resolve("code").unwrap())
            .await
            .unwrap_err();
        assert!(err.is_role_conflict());
    }
}
