//! Parley REST API entry point.
//!
//! Binary name: `parleyd`
//!
//! Loads environment configuration, initializes the database and
//! services, and serves the HTTP API until interrupted.

mod http;
mod state;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use parley_infra::config::load_config;
use state::AppState;

/// Chat session backend server.
#[derive(Debug, Parser)]
#[command(name = "parleyd", version)]
struct Cli {
    /// Port to listen on (overrides PORT).
    #[arg(long)]
    port: Option<u16>,

    /// Host interface to bind.
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// SQLite database path (overrides DB_PATH).
    #[arg(long)]
    database: Option<String>,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present; real environment variables win.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut config = load_config();
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(database) = cli.database {
        config.database_path = database;
    }

    // Production sticks to the configured level; development adds
    // crate-level debug output.
    let filter = match cli.verbose {
        0 if config.environment.is_production() => config.log_level.clone(),
        0 => format!("{},parley=debug", config.log_level),
        1 => "info,parley=debug".to_string(),
        _ => "trace".to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let state = AppState::init(config).await?;

    let addr = format!("{}:{}", cli.host, state.config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!(
        "  {} Parley API listening on {}",
        console::style("⚡").bold(),
        console::style(format!("http://{addr}")).cyan()
    );
    println!("  {}", console::style("Press Ctrl+C to stop").dim());

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    println!("\n  Server stopped.");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
