//! Presentation layer for parley
//!
//! This crate contains CLI definitions, output formatters,
//! and the interactive chat interface.

pub mod cli;
pub mod output;
pub mod repl;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use output::console::ConsoleFormatter;
pub use output::stream_printer::print_stream;
pub use repl::chat_repl::ChatRepl;
pub use repl::selector::SessionSelector;
