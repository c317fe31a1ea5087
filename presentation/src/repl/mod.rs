//! Interactive chat interface
//!
//! Provides a readline-based REPL and the interactive session selector
//! (listing, search over user turns, deletion).

pub mod chat_repl;
pub mod selector;

pub use chat_repl::ChatRepl;
pub use selector::SessionSelector;
