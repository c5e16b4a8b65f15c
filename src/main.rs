//! Showtrack - small JSON API for tracking the TV shows you are watching

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use showtrack::api::{self, AppState};
use showtrack::config::{Config, DEFAULT_CONFIG_FILE};
use showtrack::store::ShowStore;

#[derive(Parser)]
#[command(name = "showtrack")]
#[command(about = "Small JSON API for tracking the TV shows you are watching")]
#[command(version)]
struct Cli {
    /// Path to config file (defaults to ./showtrack.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a config file (a copy of --config if given, else the defaults)
    Init {
        /// Where to write the config
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Start the HTTP server
    Serve {
        /// Address to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!("showtrack={},tower_http=debug", log_level).into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    let _ = dotenvy::dotenv();

    match cli.command {
        Commands::Init { path, force } => {
            let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

            // --config, when given, is the template for the new file
            let template = match &cli.config {
                Some(source) => Config::from_file(source)?,
                None => Config::default(),
            };

            template.write_new(&path, force)?;
            tracing::info!("Wrote config to {:?}", path);

            println!("✓ Config written to {}", path.display());
            println!("\nNext steps:");
            println!("  1. Add [[seed]] entries to preload shows (optional)");
            println!("  2. Run `showtrack serve` to start the API server");
        }

        Commands::Serve { host, port } => {
            let mut config = Config::load(cli.config.as_deref())?;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }

            let store = ShowStore::seeded(config.seed.clone());
            tracing::info!("Loaded {} seed shows", store.len().await);

            let router = api::create_router(AppState::new(store));

            let addr = config.bind_addr();
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Starting HTTP server on {}", addr);

            println!("Showtrack server running at http://localhost:{}", config.port);
            println!("  Shows:    http://localhost:{}/shows", config.port);
            println!("  API Docs: http://localhost:{}/api/docs", config.port);
            println!("  Health:   http://localhost:{}/health", config.port);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            tracing::info!("Server stopped");
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
