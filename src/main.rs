use clap::Parser;
use eventsphere::commands::Cli;
use eventsphere::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    startup::init_logging(cli.verbose)?;

    info!("Starting EventSphere");

    // Load configuration
    let config = startup::load_config()?;

    // Run the requested command
    startup::run(cli, config).await
}
