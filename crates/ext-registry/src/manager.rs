//! The extension directory manager.
//!
//! Single mutator of registry state. Each operation runs one full
//! load -> mutate -> persist cycle against the backing document: the
//! registry value is loaded, transformed in memory, and only written back
//! once the whole mutation (including the regenerated loader
//! configuration's ordering) has succeeded. A failed operation leaves the
//! durable document exactly as it was before the call.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::loader::{self, LOADER_CONFIG_FILENAME, RuntimeProfile};
use crate::ordering;
use crate::registry::Registry;
use crate::store::RegistryStore;

/// Owns the shared extension directory and its backing document for the
/// lifetime of one installer invocation.
#[derive(Debug)]
pub struct DirectoryManager {
    ext_dir: PathBuf,
    store: RegistryStore,
    profile: RuntimeProfile,
    resolved: bool,
}

impl DirectoryManager {
    /// A manager over `ext_dir` for the given runtime.
    ///
    /// The directory does not need to exist yet; it is created and
    /// resolved to an absolute path before the first file operation.
    pub fn new(ext_dir: impl Into<PathBuf>, profile: RuntimeProfile) -> Self {
        let ext_dir = ext_dir.into();
        let store = RegistryStore::in_dir(&ext_dir);
        Self {
            ext_dir,
            store,
            profile,
            resolved: false,
        }
    }

    /// The shared extension directory (absolute once an operation ran).
    pub fn ext_dir(&self) -> &Path {
        &self.ext_dir
    }

    /// The store for the backing document.
    pub fn store(&self) -> &RegistryStore {
        &self.store
    }

    /// Path of the generated load-configuration artifact.
    pub fn loader_config_path(&self) -> PathBuf {
        self.ext_dir.join(LOADER_CONFIG_FILENAME)
    }

    /// Guarantee the extension directory exists and pin all subsequent
    /// file operations to its absolute path. Idempotent.
    fn ensure_directory(&mut self) -> Result<()> {
        if self.resolved {
            return Ok(());
        }
        self.ext_dir = ext_fs::ensure_dir(&self.ext_dir)?;
        self.store = RegistryStore::in_dir(&self.ext_dir);
        self.resolved = true;
        Ok(())
    }

    /// Install or re-install an extension package.
    ///
    /// Copies the shared-library files produced under `source_dir` into
    /// the extension directory, replaces the package's registry record
    /// (file list, load-order requirements, system-package reference
    /// counts), regenerates the loader configuration, and persists the
    /// registry. A previously installed build's files are deleted first so
    /// nothing lingers when the new build produces a different file set.
    ///
    /// Returns the system packages that became unneeded; deciding what to
    /// do about them is the caller's business.
    pub fn add_extension(
        &mut self,
        name: &str,
        system_packages: &[String],
        requires: &[String],
        source_dir: &Path,
    ) -> Result<Vec<String>> {
        if name.trim().is_empty() {
            return Err(Error::MetadataMissing {
                name: name.to_string(),
                reason: "extension package name is empty".to_string(),
            });
        }

        self.ensure_directory()?;
        let mut registry = self.store.load()?;

        self.delete_recorded_files(&mut registry, name)?;

        let modules_dir = self.profile.modules_dir(source_dir);
        let mut files = Vec::new();
        for library in ext_fs::shared_libraries(&modules_dir, &self.profile.library_suffix)? {
            files.push(ext_fs::copy_into(&library, &self.ext_dir)?);
        }
        tracing::debug!(
            extension = name,
            count = files.len(),
            "copied shared libraries into {}",
            self.ext_dir.display()
        );

        registry.record_files(name, files);
        registry.record_dependencies(name, requires.iter().cloned().collect());
        let unneeded =
            registry.reconcile_system_packages(name, &system_packages.iter().cloned().collect());

        self.regenerate(&registry)?;
        self.store.save(&registry)?;

        Ok(unneeded)
    }

    /// Uninstall an extension package.
    ///
    /// Deletes the files it placed in the extension directory (tolerating
    /// ones already gone), drops its registry record, regenerates the
    /// loader configuration, and persists. Removing a package that was
    /// never registered is a no-op returning no unneeded system packages.
    pub fn remove_extension(&mut self, name: &str) -> Result<Vec<String>> {
        self.ensure_directory()?;
        let mut registry = self.store.load()?;

        if !registry.is_registered(name) {
            tracing::debug!(extension = name, "not registered, nothing to remove");
            return Ok(Vec::new());
        }

        self.delete_recorded_files(&mut registry, name)?;
        registry.remove_package(name);
        let unneeded = registry.reconcile_system_packages(name, &BTreeSet::new());

        self.regenerate(&registry)?;
        self.store.save(&registry)?;

        Ok(unneeded)
    }

    /// Delete every file recorded for `name` from the extension directory
    /// and drop the file list from the in-memory registry.
    fn delete_recorded_files(&self, registry: &mut Registry, name: &str) -> Result<()> {
        let Some(old_files) = registry.take_files(name) else {
            return Ok(());
        };
        for file in old_files {
            ext_fs::remove_if_present(&self.ext_dir.join(&file))?;
        }
        Ok(())
    }

    /// Recompute the load order and rewrite the loader configuration.
    ///
    /// A dependency cycle fails here, before anything durable is touched.
    fn regenerate(&self, registry: &Registry) -> Result<()> {
        let order = ordering::topological_order(registry.dependencies())?;
        let content = loader::render(
            &self.profile,
            &self.ext_dir,
            &order,
            registry.extension_files(),
        );
        ext_fs::write_atomic(&self.loader_config_path(), content.as_bytes())?;
        Ok(())
    }
}
