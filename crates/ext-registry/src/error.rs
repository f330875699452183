use std::path::PathBuf;

/// Errors that can occur in the extension registry.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Backing document exists but cannot be parsed into the registry shape.
    #[error("registry document at {path} is corrupt: {reason}")]
    StoreCorrupt { path: PathBuf, reason: String },

    /// Failed to serialize the registry document.
    #[error("failed to serialize registry document: {0}")]
    StoreSerialize(String),

    /// The dependency graph among extension packages has no valid order.
    #[error("dependency cycle among extension packages: {}", .participants.join(", "))]
    CycleDetected { participants: Vec<String> },

    /// A copy or delete failed for a file that should have been operable.
    #[error(transparent)]
    FileOperation(#[from] ext_fs::Error),

    /// Required system/dependency metadata was not supplied by the caller.
    #[error("missing metadata for extension '{name}': {reason}")]
    MetadataMissing { name: String, reason: String },

    /// Failed to parse an extension manifest.
    #[error("failed to parse extension manifest: {0}")]
    ManifestParse(#[from] toml::de::Error),

    /// Extension manifest file not found at the expected path.
    #[error("extension manifest not found: {0}")]
    ManifestNotFound(PathBuf),

    /// Invalid semver version string in a manifest.
    #[error("invalid version '{version}': {source}")]
    InvalidVersion {
        version: String,
        source: semver::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
