//! CLI entrypoint for parley
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{bail, Result};
use clap::Parser;
use parley_application::{
    BrowseSessionsUseCase, CompletionPort, ResumeSessionUseCase, RoleRegistryPort,
    SessionStorePort, StreamChatInput, StreamChatUseCase,
};
use parley_infrastructure::{
    BuiltinRoleRegistry, ConfigLoader, FileSessionStore, OpenAiCompletion,
};
use parley_presentation::{print_stream, ChatRepl, Cli, ConsoleFormatter, SessionSelector};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?
    };
    config.validate()?;

    if cli.no_color || !config.output.color {
        ConsoleFormatter::disable_color();
    }

    info!("Starting parley");

    // === Dependency Injection ===
    let store: Arc<dyn SessionStorePort> = Arc::new(FileSessionStore::new(
        config.storage_dir(),
        config.chat.cache_length,
    )?);
    let registry: Arc<dyn RoleRegistryPort> = Arc::new(BuiltinRoleRegistry::new());
    let api_key = std::env::var(&config.provider.api_key_env).ok();
    let completion: Arc<dyn CompletionPort> = Arc::new(OpenAiCompletion::new(
        config.provider.api_base.clone(),
        config.provider.model.clone(),
        api_key,
    ));

    let browse = BrowseSessionsUseCase::new(store.clone());
    let resume = ResumeSessionUseCase::new(store.clone(), registry.clone());
    let stream = StreamChatUseCase::new(completion, store.clone());

    // Non-interactive discovery modes
    if cli.list_chats {
        for id in browse.list().await? {
            println!("{id}");
        }
        return Ok(());
    }
    if let Some(ref id) = cli.show_chat {
        for line in browse.rendered_history(id).await {
            println!("{}", ConsoleFormatter::format_line(&line));
        }
        return Ok(());
    }

    // Resolve the requested persona
    let requested = match cli.role_name() {
        Some(name) => match registry.resolve(name) {
            Some(role) => role,
            None => bail!(
                "unknown role \"{}\" (available: {})",
                name,
                registry.names().join(", ")
            ),
        },
        None => registry.default_role(),
    };

    // REPL mode
    if let Some(repl_target) = cli.repl.clone() {
        let chat_id = if SessionSelector::is_control_token(&repl_target) {
            let selector = SessionSelector::new(BrowseSessionsUseCase::new(store.clone()));
            match selector.run_token(&repl_target).await? {
                Some(id) => id,
                None => return Ok(()),
            }
        } else {
            repl_target
        };

        let session = resume.execute(&chat_id, requested).await?;

        let repl = ChatRepl::new(stream, resume, browse)
            .with_history_file(config.repl.history_file.clone());
        repl.run(session, cli.prompt.clone()).await?;
        return Ok(());
    }

    // Single-shot mode - a prompt is required
    let prompt = match cli.prompt {
        Some(p) => p,
        None => bail!("A prompt is required. Use --repl for interactive mode."),
    };

    let (chat_id, role) = match cli.chat.clone() {
        Some(id) => {
            if SessionSelector::is_control_token(&id) {
                bail!("\"{id}\" is a selector token and cannot name a chat");
            }
            let session = resume.execute(&id, requested).await?;
            (Some(session.chat_id), session.role)
        }
        None => (None, requested),
    };

    let messages = resume.turn_messages(chat_id.as_deref(), &role, &prompt).await;
    let handle = stream
        .execute(StreamChatInput::new(chat_id, messages))
        .await?;

    if print_stream(handle).await.is_none() {
        // The provider error was already printed by the stream printer.
        std::process::exit(1);
    }

    Ok(())
}
