//! Application use cases

pub mod browse_sessions;
pub mod resume_session;
pub mod stream_chat;
