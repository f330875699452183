/// Errors that can occur talking to the host system.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required tool is not on PATH.
    #[error("required tool not found on PATH: {tool}{}", .hint.as_deref().unwrap_or_default())]
    ToolNotFound { tool: String, hint: Option<String> },

    /// The host is not a Debian-style system this installer can drive.
    #[error("host is not a supported Debian-style system: {reason}")]
    UnsupportedHost { reason: String },

    /// A host command exited with a failure status.
    #[error("command `{command}` failed{}", .exit_code.map(|c| format!(" with exit code {c}")).unwrap_or_default())]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
    },

    /// Building an extension package from source failed.
    #[error("could not build extension '{name}' (command: {command}); check the output above")]
    BuildFailed {
        name: String,
        command: String,
        exit_code: Option<i32>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
