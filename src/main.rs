//! Travel Budget - Application entry point
//!
//! CLI-based entry point that dispatches to various commands.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use travel_budget::{
    cli::{Cli, Commands},
    commands,
    config::Config,
    errors::AppResult,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Verbose mode sets debug level
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command).await {
        tracing::error!("Command failed: {}", e);
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> AppResult<()> {
    match command {
        // Pure calculation, no configuration needed
        Commands::Estimate(args) => commands::estimate::execute(args),
        Commands::Serve(args) => commands::serve::execute(args, load_config()?).await,
        Commands::Migrate(args) => commands::migrate::execute(args, load_config()?).await,
    }
}

fn load_config() -> AppResult<Config> {
    let config = Config::from_env()?;
    tracing::debug!("Configuration loaded: {:?}", config);
    Ok(config)
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
