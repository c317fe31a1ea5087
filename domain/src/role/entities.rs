//! System role value objects
//!
//! A role is a named persona (system prompt) that a session is permanently
//! bound to once started. The persona text of a stored session's first
//! message is how the role is recovered on resume.

use std::fmt;
use std::str::FromStr;

use crate::core::error::DomainError;

/// Built-in personas (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinRole {
    /// General programming and system administration assistant
    Default,
    /// Code-only answers
    Code,
    /// Single shell command answers
    Shell,
    /// Explains what a shell command does
    DescribeShell,
}

impl BuiltinRole {
    pub const ALL: [BuiltinRole; 4] = [
        BuiltinRole::Default,
        BuiltinRole::Code,
        BuiltinRole::Shell,
        BuiltinRole::DescribeShell,
    ];

    /// Get the string identifier for this role
    pub fn as_str(&self) -> &'static str {
        match self {
            BuiltinRole::Default => "default",
            BuiltinRole::Code => "code",
            BuiltinRole::Shell => "shell",
            BuiltinRole::DescribeShell => "describe-shell",
        }
    }

    /// The persona text stored as a session's first (system) message.
    pub fn prompt(&self) -> &'static str {
        match self {
            BuiltinRole::Default => {
                "You are parley, a programming and system administration assistant. \
                 Answer concisely, with short code or command examples where they help. \
                 When a question is ambiguous, pick the most common interpretation and say so."
            }
            BuiltinRole::Code => {
                "You are a code generator. \
                 Reply with code only: no explanations, no markdown fences unless asked. \
                 If requirements are missing, choose the most common sensible interpretation."
            }
            BuiltinRole::Shell => {
                "You are a shell command generator. \
                 Reply with a single POSIX shell command that accomplishes the request, \
                 on one line, with no explanation. \
                 If several steps are needed, join them with &&."
            }
            BuiltinRole::DescribeShell => {
                "You are a shell command descriptor. \
                 Given a shell command, describe what it does in at most two short sentences. \
                 Mention destructive effects explicitly."
            }
        }
    }
}

impl Default for BuiltinRole {
    fn default() -> Self {
        BuiltinRole::Default
    }
}

impl fmt::Display for BuiltinRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BuiltinRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(BuiltinRole::Default),
            "code" => Ok(BuiltinRole::Code),
            "shell" => Ok(BuiltinRole::Shell),
            "describe-shell" => Ok(BuiltinRole::DescribeShell),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }
}

/// A named persona with its system-prompt text (Value Object)
///
/// Custom roles resolved by a registry use this same shape, so the rest of
/// the system never needs to distinguish built-in from custom personas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemRole {
    name: String,
    prompt: String,
}

impl SystemRole {
    pub fn new(name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

impl From<BuiltinRole> for SystemRole {
    fn from(role: BuiltinRole) -> Self {
        SystemRole::new(role.as_str(), role.prompt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_role_round_trips_through_str() {
        for role in BuiltinRole::ALL {
            assert_eq!(role.as_str().parse::<BuiltinRole>().unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_name_is_an_error() {
        let err = "pirate".parse::<BuiltinRole>().unwrap_err();
        assert_eq!(err.to_string(), "unknown role: pirate");
    }

    #[test]
    fn system_role_from_builtin_carries_prompt() {
        let role = SystemRole::from(BuiltinRole::Shell);
        assert_eq!(role.name(), "shell");
        assert!(role.prompt().contains("shell command generator"));
    }
}
