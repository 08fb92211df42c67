//! # tinyblog server
//!
//! Entry point: parses the command line, sets up logging, and either serves
//! the blog or resets the database.
//!
//! ## Commands
//! - `tinyblog` / `tinyblog serve`: run the web server
//! - `tinyblog init-db`: drop and recreate all tables

use anyhow::Result;
use clap::{Parser, Subcommand};
use tinyblog::{create_app, db, Config};
// Session store trait providing `delete_expired`
use tower_sessions::ExpiredDeletion;
// Structured logging setup
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// A small server-rendered blog
#[derive(Parser, Debug)]
#[command(name = "tinyblog", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the web server (default)
    Serve,

    /// Clear the existing data and create new tables
    InitDb,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Default: info level for most crates, debug level for our app and request logs.
    // Can be overridden with RUST_LOG environment variable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tinyblog=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded: {:?}", config);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::InitDb => init_db(config).await,
    }
}

async fn serve(config: Config) -> Result<()> {
    let bind_addr = config.bind_address();

    let app = create_app(config).await?;
    tracing::info!("Application initialized");

    // Expired sessions are never read again, but the rows stay until removed.
    // Sweep them every 10 minutes.
    let session_store = app.session_store.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(600));
        loop {
            interval.tick().await;
            tracing::debug!("Running expired session cleanup");
            if let Err(e) = session_store.delete_expired().await {
                tracing::error!("Session cleanup failed: {:?}", e);
            }
        }
    });

    tracing::info!("Starting server on {}", bind_addr);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    app.serve(listener).await
}

async fn init_db(config: Config) -> Result<()> {
    let pool = db::connect(&config.database_url).await?;
    db::init_db(&pool).await?;
    pool.close().await;

    println!("Initialized the database.");
    Ok(())
}
