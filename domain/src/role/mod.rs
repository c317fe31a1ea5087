//! System personas a conversation can be bound to

pub mod entities;

pub use entities::{BuiltinRole, SystemRole};
