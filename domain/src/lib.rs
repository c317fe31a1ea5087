//! Domain layer for parley
//!
//! This crate contains the core conversation entities and domain errors.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Session
//!
//! A session is a durable, identified conversation history bounded to the
//! most recent N turns. It is permanently bound to the role (persona) it
//! was started with.
//!
//! ## Streaming
//!
//! Model output is consumed as a lazy sequence of [`StreamEvent`]s so the
//! caller can display tokens as they arrive.

pub mod chat;
pub mod core;
pub mod role;

// Re-export commonly used types
pub use chat::entities::{Message, Role, TEMP_SESSION_ID};
pub use chat::stream::StreamEvent;
pub use core::error::DomainError;
pub use role::entities::{BuiltinRole, SystemRole};
