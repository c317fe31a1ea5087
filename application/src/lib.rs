//! Application layer for parley
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.
//!
//! The session cache lives here: [`StreamChatUseCase`] wraps any
//! [`CompletionPort`] with history read / append / re-stream / persist
//! semantics, [`ResumeSessionUseCase`] guards role consistency on resume,
//! and [`BrowseSessionsUseCase`] exposes listing, search and deletion.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    completion::{CompletionError, CompletionPort, StreamHandle},
    role_registry::RoleRegistryPort,
    session_store::{DeleteOutcome, SessionStorePort, StoreError},
};
pub use use_cases::browse_sessions::{BrowseSessionsUseCase, SearchHit};
pub use use_cases::resume_session::{ResumeSessionUseCase, ResumedSession};
pub use use_cases::stream_chat::{StreamChatInput, StreamChatUseCase};
