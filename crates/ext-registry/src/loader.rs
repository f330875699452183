//! Generation of the load-configuration artifact.
//!
//! The artifact tells the target runtime which shared-library files to
//! load, one directive per line, in dependency-respecting order. Directive
//! syntax and build-output layout differ per runtime, so both are carried
//! by a [`RuntimeProfile`] supplied by the caller; nothing here guesses the
//! runtime.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File name of the generated load-configuration artifact.
pub const LOADER_CONFIG_FILENAME: &str = "extensions.ini";

/// How the target runtime consumes extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeProfile {
    /// Directive written before each shared-library path.
    pub directive: String,
    /// Subdirectory of a package's build output holding the produced
    /// shared libraries, or `None` when the build output directory itself
    /// holds them.
    pub module_subdir: Option<String>,
    /// File extension of shared-library files (without the dot).
    pub library_suffix: String,
}

impl RuntimeProfile {
    /// Profile for runtimes with `extension = <path>` directives whose
    /// builds produce libraries under a `modules/` subdirectory.
    pub fn php() -> Self {
        Self {
            directive: "extension".to_string(),
            module_subdir: Some("modules".to_string()),
            library_suffix: "so".to_string(),
        }
    }

    /// Profile for runtimes with `hhvm.extensions[] = <path>` directives
    /// whose builds produce libraries directly in the build directory.
    pub fn hhvm() -> Self {
        Self {
            directive: "hhvm.extensions[]".to_string(),
            module_subdir: None,
            library_suffix: "so".to_string(),
        }
    }

    /// Where a package's produced shared libraries live, given its build
    /// output directory.
    pub fn modules_dir(&self, source_dir: &Path) -> PathBuf {
        match &self.module_subdir {
            Some(subdir) => source_dir.join(subdir),
            None => source_dir.to_path_buf(),
        }
    }

    /// One directive line (without trailing newline) for a file.
    pub fn directive_line(&self, file: &Path) -> String {
        format!("{} = {}", self.directive, file.display())
    }
}

/// Render the full artifact content from the current registry state.
///
/// `order` is the load order over package names; packages without recorded
/// files (dependency names that are not themselves installed here)
/// contribute nothing. Paths are absolute, rooted at `ext_dir`.
pub fn render(
    profile: &RuntimeProfile,
    ext_dir: &Path,
    order: &[String],
    extension_files: &BTreeMap<String, Vec<String>>,
) -> String {
    let mut content = String::new();
    for package in order {
        let Some(files) = extension_files.get(package) else {
            continue;
        };
        for file in files {
            content.push_str(&profile.directive_line(&ext_dir.join(file)));
            content.push('\n');
        }
    }
    content
}
