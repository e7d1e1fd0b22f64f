//! boardctl - board API client CLI
//!
//! Main entry point: initializes tracing, loads configuration, builds the
//! gateway and API client, and dispatches to the command handlers.

use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use tokio::sync::broadcast::error::TryRecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use boardctl::api::ApiClient;
use boardctl::cli::{BoardCommand, Cli, Commands};
use boardctl::client::{Gateway, KeyringStore, SessionEvent};
use boardctl::commands;
use boardctl::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments first so --verbose can raise the filter.
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    // Load and validate configuration
    let config = Config::load(&cli.config, &cli)?;
    config.validate()?;

    // One gateway per process: the single instance is what coordinates
    // refresh across every request this invocation makes.
    let gateway = Arc::new(Gateway::new(
        config.base_url()?,
        config.timeout(),
        Arc::new(KeyringStore::new(&config.api.profile)),
    ));
    let mut session_rx = gateway.subscribe_session();
    let api = ApiClient::new(gateway);

    // Execute command
    let result = match cli.command {
        Commands::Login { username, password } => {
            tracing::info!("Starting login");
            commands::auth::login(&api, username, password).await
        }
        Commands::Signup {
            username,
            name,
            password,
        } => {
            tracing::info!("Starting signup");
            commands::auth::signup(&api, username, name, password).await
        }
        Commands::Logout => commands::auth::logout(&api),
        Commands::Boards { command } => match command {
            BoardCommand::List {
                page,
                size,
                category,
            } => commands::boards::list(&api, page, size, category).await,
            BoardCommand::Show { id } => commands::boards::show(&api, id).await,
            BoardCommand::Create {
                title,
                content,
                category,
                file,
            } => commands::boards::create(&api, title, content, category, file.as_deref()).await,
            BoardCommand::Edit {
                id,
                title,
                content,
                category,
                file,
            } => {
                commands::boards::edit(&api, id, title, content, category, file.as_deref()).await
            }
            BoardCommand::Delete { id, yes } => commands::boards::delete(&api, id, yes).await,
            BoardCommand::Categories => commands::boards::categories(&api).await,
        },
    };

    // The gateway broadcasts Expired when a refresh exchange fails; the
    // CLI's "navigate to sign-in" is a notice telling the user to log in.
    match session_rx.try_recv() {
        Ok(SessionEvent::Expired) => {
            eprintln!(
                "{}",
                "Session expired. Please sign in again with `boardctl login`.".yellow()
            );
        }
        Err(TryRecvError::Empty) | Err(TryRecvError::Closed) | Err(TryRecvError::Lagged(_)) => {}
    }

    result
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "boardctl=debug"
    } else {
        "boardctl=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
