//! Infrastructure layer for parley
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod providers;
pub mod roles;
pub mod store;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use providers::OpenAiCompletion;
pub use roles::BuiltinRoleRegistry;
pub use store::FileSessionStore;
