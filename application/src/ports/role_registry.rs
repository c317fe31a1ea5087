//! Role registry port
//!
//! Resolves persona names to their system-prompt text and recovers the
//! persona a stored session was started with.

use parley_domain::{Message, SystemRole};

/// Registry of the personas a conversation can be bound to
pub trait RoleRegistryPort: Send + Sync {
    /// Resolve a role name to its persona, or `None` if unregistered.
    fn resolve(&self, name: &str) -> Option<SystemRole>;

    /// Recover the persona a session was started with from its first
    /// message, or `None` if no registered persona matches.
    fn identify(&self, first_message: &Message) -> Option<SystemRole>;

    /// The generic persona used when the caller did not choose one.
    fn default_role(&self) -> SystemRole;

    /// Registered role names, for diagnostics and help output.
    fn names(&self) -> Vec<String>;
}
