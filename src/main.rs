/// Main entry point for the Habit Metrics MCP server
///
/// This file sets up logging, parses command line arguments, and starts the MCP server.
/// The server listens for JSON-RPC requests over stdin/stdout following the MCP protocol.

use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use habit_metrics_mcp::{HabitMetricsServer, MetricsLocale};

const DATABASE_FILE: &str = "habits.db";

/// First writable directory among home, data, config and the working directory
fn default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let candidates = [
        dirs::home_dir().map(|p| p.join(".habit_metrics")),
        dirs::data_dir().map(|p| p.join("habit_metrics")),
        dirs::config_dir().map(|p| p.join("habit_metrics")),
        std::env::current_dir().ok().map(|p| p.join(".habit_metrics")),
    ];

    if let Some(dir) = candidates.into_iter().flatten().find(|dir| is_writable_dir(dir)) {
        return Ok(dir.join(DATABASE_FILE));
    }

    let dir = std::env::temp_dir().join("habit_metrics");
    std::fs::create_dir_all(&dir)?;
    warn!("No writable data directory found, using {}", dir.display());
    Ok(dir.join(DATABASE_FILE))
}

fn is_writable_dir(dir: &Path) -> bool {
    if std::fs::create_dir_all(dir).is_err() {
        debug!("Cannot create {}", dir.display());
        return false;
    }

    let marker = dir.join(".write_check");
    let writable = std::fs::write(&marker, b"").is_ok();
    let _ = std::fs::remove_file(&marker);
    writable
}

/// Command line arguments for the Habit Metrics MCP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long)]
    database: Option<PathBuf>,

    /// JSON file with label templates and the date format
    #[arg(long)]
    locale: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("habit_metrics_mcp={}", log_level))
        .with_writer(std::io::stderr) // stdout carries the protocol
        .init();

    info!("Starting Habit Metrics MCP server");

    let db_path = match args.database {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            path
        }
        None => default_database_path()?,
    };

    info!("Using database at: {}", db_path.display());

    let locale = match args.locale {
        Some(path) => MetricsLocale::from_file(&path)?,
        None => MetricsLocale::default(),
    };

    let server = HabitMetricsServer::new(db_path, locale).await?;
    server.run().await?;

    info!("Habit Metrics MCP server shutdown complete");
    Ok(())
}
