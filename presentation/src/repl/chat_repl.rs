//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::output::console::ConsoleFormatter;
use crate::output::stream_printer::print_stream;
use colored::Colorize;
use parley_application::{
    BrowseSessionsUseCase, ResumeSessionUseCase, ResumedSession, StreamChatInput,
    StreamChatUseCase,
};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;

const MULTILINE_FENCE: &str = "\"\"\"";
const EXIT_COMMAND: &str = "exit()";

/// Interactive chat REPL bound to one validated session.
pub struct ChatRepl {
    stream: StreamChatUseCase,
    resume: ResumeSessionUseCase,
    browse: BrowseSessionsUseCase,
    history_file: Option<PathBuf>,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(
        stream: StreamChatUseCase,
        resume: ResumeSessionUseCase,
        browse: BrowseSessionsUseCase,
    ) -> Self {
        Self {
            stream,
            resume,
            browse,
            history_file: None,
        }
    }

    /// Set the readline history file
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        self.history_file = path;
        self
    }

    /// Run the interactive REPL
    pub async fn run(
        &self,
        session: ResumedSession,
        init_prompt: Option<String>,
    ) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        // Try to load input history
        let history_path = self
            .history_file
            .clone()
            .or_else(|| dirs::data_dir().map(|p| p.join("parley").join("history.txt")));
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        // Replay the stored conversation before the first prompt.
        if session.initiated {
            println!("{}", ConsoleFormatter::rule("Chat History"));
            for line in self.browse.rendered_history(&session.chat_id).await {
                println!("{}", ConsoleFormatter::format_line(&line));
            }
            println!("{}", ConsoleFormatter::rule(""));
        }

        self.print_welcome(&session);

        let mut init_prompt = init_prompt.filter(|p| !p.is_empty());
        if let Some(ref init) = init_prompt {
            println!("{}", ConsoleFormatter::rule("Input"));
            println!("{init}");
            println!("{}", ConsoleFormatter::rule(""));
        }

        loop {
            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let mut prompt = line.trim().to_string();
                    if prompt == MULTILINE_FENCE {
                        prompt = Self::read_multiline(&mut rl)?;
                    }
                    if prompt.trim().is_empty() {
                        continue;
                    }
                    if prompt == EXIT_COMMAND {
                        break;
                    }

                    let _ = rl.add_history_entry(&prompt);

                    // Fold the initial prompt into the first real turn.
                    if let Some(init) = init_prompt.take() {
                        prompt = format!("{init}\n\n\n{prompt}");
                    }

                    self.process_prompt(&session, &prompt).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        // Save input history
        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self, session: &ResumedSession) {
        println!();
        println!(
            "Chat \"{}\" ({} role)",
            session.chat_id,
            session.role.name()
        );
        println!("Type \"\"\" for multi-line input, exit() or Ctrl-D to leave.");
        println!();
    }

    /// Collect lines until a closing fence.
    fn read_multiline(rl: &mut DefaultEditor) -> RlResult<String> {
        let mut collected = String::new();
        loop {
            match rl.readline("... ") {
                Ok(line) => {
                    if line.trim() == MULTILINE_FENCE {
                        return Ok(collected);
                    }
                    collected.push_str(&line);
                    collected.push('\n');
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    return Ok(String::new());
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn process_prompt(&self, session: &ResumedSession, prompt: &str) {
        println!();

        let messages = self
            .resume
            .turn_messages(Some(&session.chat_id), &session.role, prompt)
            .await;
        let input = StreamChatInput::new(Some(session.chat_id.clone()), messages);

        match self.stream.execute(input).await {
            Ok(handle) => {
                let _ = print_stream(handle).await;
            }
            Err(e) => {
                eprintln!("{}", format!("Error: {e}").red());
            }
        }
        println!();
    }
}
