//! Durable storage for the registry document.
//!
//! The backing document is a single JSON file next to the managed
//! shared-library files. It is read whole, mutated in memory, and written
//! back whole; there is no partial update path. Output key order is
//! deterministic so successive saves diff cleanly.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::registry::Registry;

/// File name of the backing document inside the extension directory.
pub const REGISTRY_FILENAME: &str = "packages.json";

/// Loads and persists the [`Registry`] document.
#[derive(Debug, Clone)]
pub struct RegistryStore {
    path: PathBuf,
}

impl RegistryStore {
    /// A store backed by an explicit document path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A store backed by the canonical document inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(REGISTRY_FILENAME))
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the backing document.
    ///
    /// A missing document yields an empty registry; this is the first-use
    /// case, not an error. A document that exists but does not parse into
    /// the registry shape is [`Error::StoreCorrupt`]: real data is never
    /// silently replaced with a default.
    pub fn load(&self) -> Result<Registry> {
        if !self.path.exists() {
            tracing::debug!("no registry document at {}, starting empty", self.path.display());
            return Ok(Registry::default());
        }

        let content = ext_fs::read_text(&self.path)?;
        serde_json::from_str(&content).map_err(|e| Error::StoreCorrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    /// Serialize the full registry and overwrite the backing document.
    ///
    /// The write is atomic; a failed save leaves the previous document in
    /// place.
    pub fn save(&self, registry: &Registry) -> Result<()> {
        let mut content = serde_json::to_string_pretty(registry)
            .map_err(|e| Error::StoreSerialize(e.to_string()))?;
        content.push('\n');
        ext_fs::write_atomic(&self.path, content.as_bytes())?;
        tracing::debug!("registry document saved to {}", self.path.display());
        Ok(())
    }
}
