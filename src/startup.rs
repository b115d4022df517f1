use crate::commands::{execute, Cli, CommandContext};
use crate::components::session::FileSessionStore;
use crate::components::{ApiClient, SessionHandle};
use crate::config::Config;
use crate::error::{AppResult, Error};
use std::sync::Arc;
use tracing::{debug, error};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration. Logs go to
/// stderr so command output stays clean.
pub fn init_logging(verbose: bool) -> miette::Result<()> {
    let default_filter = if verbose {
        "debug,reqwest=info,hyper=warn"
    } else {
        "info,reqwest=warn,hyper=warn"
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and initialize the application config
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => {
            crate::utils::i18n::set_locale(&config.locale);
            Ok(config)
        }
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Restore the persisted session and bind an API client to it
pub async fn build_context(config: Config) -> AppResult<CommandContext> {
    let store = Arc::new(FileSessionStore::new(config.session_file.clone()));
    let session = SessionHandle::load(store).await?;
    debug!("Session restored: {}", session.current().await.is_some());

    let client = ApiClient::new(&config, session)?;
    let timezone = config.timezone()?;

    Ok(CommandContext {
        config,
        client,
        timezone,
    })
}

/// Run one command to completion
pub async fn run(cli: Cli, config: Config) -> miette::Result<()> {
    let ctx = build_context(config).await?;

    if let Err(e) = execute(&ctx, cli.command).await {
        error!("Command failed: {}", e);
        return Err(e.into());
    }

    Ok(())
}
