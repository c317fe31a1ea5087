//! Console output formatter for conversations

use colored::Colorize;
use parley_domain::{Message, Role};

/// Formats conversation output for console display.
///
/// User turns are yellow, assistant turns cyan, system turns dimmed.
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format one stored message for display.
    pub fn format_message(message: &Message) -> String {
        match message.role {
            Role::User => message.to_string().yellow().to_string(),
            Role::Assistant => message.to_string().cyan().to_string(),
            Role::System => message.to_string().dimmed().to_string(),
        }
    }

    /// Format a rendered `{role}: {content}` line with the same color
    /// scheme, classified by its prefix.
    pub fn format_line(line: &str) -> String {
        if line.starts_with("user:") {
            line.yellow().to_string()
        } else if line.starts_with("assistant:") {
            line.cyan().to_string()
        } else {
            line.dimmed().to_string()
        }
    }

    /// A horizontal rule, optionally titled.
    pub fn rule(title: &str) -> String {
        if title.is_empty() {
            "─".repeat(40).magenta().bold().to_string()
        } else {
            format!("── {title} ──").magenta().bold().to_string()
        }
    }

    /// Globally disable colored output (for --no-color or dumb terminals).
    pub fn disable_color() {
        colored::control::set_override(false);
    }
}
