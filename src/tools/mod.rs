/// MCP tools for habit management
///
/// This module contains all the MCP tools that external clients can call to
/// record habit events and read back streak metrics.

pub mod create;
pub mod log;
pub mod status;
pub mod list;
pub mod delete;

// Re-export tool functions for easy access
pub use create::*;
pub use log::*;
pub use status::*;
pub use list::*;
pub use delete::*;

use thiserror::Error;
use crate::domain::DomainError;
use crate::storage::StorageError;

/// Errors returned by tool handlers
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
