//! Conversation domain entities and streaming events

pub mod entities;
pub mod stream;

pub use entities::{Message, Role, TEMP_SESSION_ID};
pub use stream::StreamEvent;
