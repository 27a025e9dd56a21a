//! Error types for the taskcal ecosystem.

use thiserror::Error;

/// Errors that can occur in taskcal operations.
#[derive(Error, Debug)]
pub enum TaskCalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Task source error: {0}")]
    TaskSource(String),

    #[error("Task command '{0}' not found in PATH")]
    TaskSourceNotInstalled(String),

    #[error("Task export timed out after {0}s")]
    TaskSourceTimeout(u64),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error(
        "Provider 'taskcal-provider-{0}' not found in PATH. Install it with:\n  cargo install taskcal-provider-{0}"
    )]
    ProviderNotInstalled(String),

    #[error("Provider request timed out after {0}s")]
    ProviderTimeout(u64),

    #[error("Failed to export tasks: {0}")]
    ExportTasks(#[source] Box<TaskCalError>),

    #[error("Failed to list calendar events: {0}")]
    ListEvents(#[source] Box<TaskCalError>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("A sync is already in progress")]
    SyncInProgress,

    #[error("Sync cancelled")]
    Cancelled,
}

/// Result type alias for taskcal operations.
pub type TaskCalResult<T> = Result<T, TaskCalError>;
