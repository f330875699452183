//! CLI error type wrapping the library crates' errors.

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced to the terminal.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A user-facing message with no underlying cause.
    #[error("{0}")]
    User(String),

    #[error(transparent)]
    Registry(#[from] ext_registry::Error),

    #[error(transparent)]
    System(#[from] ext_system::Error),

    #[error(transparent)]
    Dialog(#[from] dialoguer::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn user(message: impl Into<String>) -> Self {
        Self::User(message.into())
    }
}
