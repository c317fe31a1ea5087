//! Output formatting

pub mod console;
pub mod stream_printer;

pub use console::ConsoleFormatter;
pub use stream_printer::print_stream;
