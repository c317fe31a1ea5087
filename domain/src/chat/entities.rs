//! Conversation domain entities

use serde::{Deserialize, Serialize};
use std::fmt;

/// Session id reserved for throwaway conversations.
///
/// A session with this id is invalidated before use and never persisted.
pub const TEMP_SESSION_ID: &str = "temp";

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// A message in a conversation (Entity)
///
/// Messages are immutable once written to a session. The on-disk session
/// format is a JSON array of these, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

impl fmt::Display for Message {
    /// Renders as `{role}: {content}`, the form exposed to the renderer.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.role, self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        let message = Message::user("find the bug");
        let json = serde_json::to_string(&message).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"find the bug"}"#);
    }

    #[test]
    fn roles_deserialize_lowercase() {
        let message: Message =
            serde_json::from_str(r#"{"role":"assistant","content":"here is the fix"}"#).unwrap();
        assert_eq!(message.role, Role::Assistant);
        assert_eq!(message.content, "here is the fix");
    }

    #[test]
    fn message_displays_role_prefix() {
        assert_eq!(Message::user("hello").to_string(), "user: hello");
        assert_eq!(Message::system("be brief").to_string(), "system: be brief");
    }
}
