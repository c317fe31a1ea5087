//! Interactive discovery, creation and deletion of stored sessions.
//!
//! The REPL accepts a few control tokens in place of a session id; each
//! opens a small interactive loop. The tokens (and the reserved id `temp`)
//! are never accepted as literal session names.

use crate::output::console::ConsoleFormatter;
use colored::Colorize;
use parley_application::BrowseSessionsUseCase;
use parley_domain::TEMP_SESSION_ID;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};

/// Pick an existing chat or create a new one.
pub const LIST_TOKEN: &str = "-ls";
/// Search user turns of all stored chats.
pub const SEARCH_TOKEN: &str = "-sa";
/// Delete stored chats by ordinal.
pub const DELETE_TOKEN: &str = "-dl";

/// Names that must never become literal session ids.
const RESERVED_IDS: [&str; 4] = [LIST_TOKEN, SEARCH_TOKEN, DELETE_TOKEN, TEMP_SESSION_ID];

/// Interactive selector over the stored sessions.
pub struct SessionSelector {
    browse: BrowseSessionsUseCase,
}

impl SessionSelector {
    pub fn new(browse: BrowseSessionsUseCase) -> Self {
        Self { browse }
    }

    /// Whether `id` is one of the selector's control tokens.
    pub fn is_control_token(id: &str) -> bool {
        matches!(id, LIST_TOKEN | SEARCH_TOKEN | DELETE_TOKEN)
    }

    /// Whether `id` may be used as a brand-new session name.
    pub fn is_reserved(id: &str) -> bool {
        RESERVED_IDS.contains(&id)
    }

    /// Dispatch a control token. Returns the chosen session id, or `None`
    /// when the flow ends without selecting one (search, delete, exit).
    pub async fn run_token(&self, token: &str) -> RlResult<Option<String>> {
        let mut editor = DefaultEditor::new()?;
        match token {
            LIST_TOKEN => self.pick_or_create(&mut editor).await,
            SEARCH_TOKEN => self.search_loop(&mut editor).await.map(|_| None),
            DELETE_TOKEN => self.delete_loop(&mut editor).await.map(|_| None),
            other => Ok(Some(other.to_string())),
        }
    }

    fn print_listing(ids: &[String]) {
        println!("Existing chats:");
        for (index, id) in ids.iter().enumerate() {
            println!("{:>3}. {}", index + 1, id);
        }
    }

    async fn pick_or_create(&self, editor: &mut DefaultEditor) -> RlResult<Option<String>> {
        let existing = match self.browse.list().await {
            Ok(ids) => ids,
            Err(e) => {
                eprintln!("{}", format!("Error: {e}").red());
                Vec::new()
            }
        };

        if existing.is_empty() {
            println!("No stored chats yet.");
            return self.prompt_new_id(editor).await;
        }

        Self::print_listing(&existing);
        loop {
            let line = match editor.readline("Select a chat number, or 'n' for a new chat: ") {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(None),
                Err(e) => return Err(e),
            };
            let line = line.trim();
            if line.eq_ignore_ascii_case("n") {
                return self.prompt_new_id(editor).await;
            }
            match line.parse::<usize>() {
                Ok(pick) if (1..=existing.len()).contains(&pick) => {
                    return Ok(Some(existing[pick - 1].clone()));
                }
                _ => println!("{}", "Invalid selection, please try again.".red()),
            }
        }
    }

    async fn prompt_new_id(&self, editor: &mut DefaultEditor) -> RlResult<Option<String>> {
        loop {
            let line = match editor.readline("Name for the new chat: ") {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(None),
                Err(e) => return Err(e),
            };
            let id = line.trim();
            if id.is_empty() {
                continue;
            }
            if Self::is_reserved(id) {
                println!("{}", format!("\"{id}\" is reserved, pick another name.").red());
            } else if self.browse.exists(id).await {
                println!("{}", "That chat already exists, pick another name.".red());
            } else {
                return Ok(Some(id.to_string()));
            }
        }
    }

    async fn search_loop(&self, editor: &mut DefaultEditor) -> RlResult<()> {
        loop {
            let line = match editor.readline("Search keyword ('exit' to leave): ") {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(()),
                Err(e) => return Err(e),
            };
            let keyword = line.trim();
            if keyword.is_empty() {
                continue;
            }
            if keyword == "exit" {
                return Ok(());
            }
            match self.browse.search(keyword).await {
                Err(e) => eprintln!("{}", format!("Error: {e}").red()),
                Ok(hits) if hits.is_empty() => println!("{}", "No chat found.".red()),
                Ok(hits) => {
                    for (index, hit) in hits.iter().enumerate() {
                        println!(
                            "{}",
                            ConsoleFormatter::rule(&format!(
                                "match {} in \"{}\"",
                                index + 1,
                                hit.chat_id
                            ))
                        );
                        println!("{}", ConsoleFormatter::format_message(&hit.matched));
                        if let Some(context) = &hit.context {
                            println!("{}", ConsoleFormatter::format_message(context));
                        }
                    }
                }
            }
        }
    }

    async fn delete_loop(&self, editor: &mut DefaultEditor) -> RlResult<()> {
        loop {
            let existing = match self.browse.list().await {
                Ok(ids) => ids,
                Err(e) => {
                    eprintln!("{}", format!("Error: {e}").red());
                    return Ok(());
                }
            };
            if existing.is_empty() {
                println!("No stored chats.");
                return Ok(());
            }

            Self::print_listing(&existing);
            let line = match editor.readline("Chat number to delete ('e' to leave): ") {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(()),
                Err(e) => return Err(e),
            };
            let line = line.trim();
            if line.eq_ignore_ascii_case("e") {
                return Ok(());
            }
            match line.parse::<usize>() {
                Ok(pick) if (1..=existing.len()).contains(&pick) => {
                    let outcome = self.browse.delete(&existing[pick - 1]).await;
                    println!("{}", outcome.message.red());
                }
                _ => println!("{}", "Invalid selection, please try again.".red()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_tokens_are_recognized() {
        assert!(SessionSelector::is_control_token("-ls"));
        assert!(SessionSelector::is_control_token("-sa"));
        assert!(SessionSelector::is_control_token("-dl"));
        assert!(!SessionSelector::is_control_token("work"));
    }

    #[test]
    fn reserved_names_include_temp_and_tokens() {
        assert!(SessionSelector::is_reserved("temp"));
        assert!(SessionSelector::is_reserved("-ls"));
        assert!(SessionSelector::is_reserved("-sa"));
        assert!(SessionSelector::is_reserved("-dl"));
        assert!(!SessionSelector::is_reserved("rust-help"));
    }
}
