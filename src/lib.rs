/// Public library interface for the Habit Metrics MCP server
///
/// This module exports the server, the streak calculation and the public
/// types that can be used by other applications or tests.

use std::path::PathBuf;
use thiserror::Error;

// Internal modules
mod domain;
mod storage;
mod analytics;
mod tools;
mod mcp;

// Re-export public modules and types
pub use domain::*;
pub use storage::{SqliteStorage, StorageError, HabitStorage};
pub use analytics::{describe_metrics, AnalyticsEngine, LocaleError, MetricsLabels, MetricsLocale};
pub use tools::ToolError;
pub use mcp::McpServer;

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] storage::StorageError),

    #[error("Locale error: {0}")]
    Locale(#[from] analytics::LocaleError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Habit metrics server backing the MCP tools
///
/// Owns the event store and the analytics engine; the engine carries the
/// locale every label is rendered with.
pub struct HabitMetricsServer {
    storage: SqliteStorage,
    analytics: AnalyticsEngine,
}

impl HabitMetricsServer {
    /// Create a server with the database at `db_path` and the given locale
    ///
    /// This will initialize the SQLite schema if it doesn't already exist.
    pub async fn new(db_path: PathBuf, locale: MetricsLocale) -> Result<Self, ServerError> {
        tracing::info!("Initializing Habit Metrics server with database: {:?}", db_path);

        let storage = SqliteStorage::new(db_path)?;
        let analytics = AnalyticsEngine::new(locale);

        Ok(Self {
            storage,
            analytics,
        })
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// This method will block until stdin is closed or an error occurs.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("Starting MCP server...");

        let habits = self.storage.list_habits()?;
        tracing::info!("Server started successfully, found {} existing habits", habits.len());

        let mut mcp_server = McpServer::new(self);
        mcp_server.run().await?;

        Ok(())
    }

    /// Get a reference to the storage layer
    pub fn storage(&self) -> &SqliteStorage {
        &self.storage
    }

    /// Get a reference to the analytics engine
    pub fn analytics(&self) -> &AnalyticsEngine {
        &self.analytics
    }
}
