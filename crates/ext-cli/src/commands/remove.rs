//! Remove an installed extension package.

use std::path::Path;

use colored::Colorize;

use ext_registry::{DirectoryManager, RegistryStore};
use ext_system::{AptGet, SystemPackageManager};

use crate::cli::Runtime;
use crate::error::Result;
use crate::interactive;

pub fn run_remove(
    ext_dir: &Path,
    runtime: Runtime,
    name: &str,
    dry_run: bool,
    assume_yes: bool,
) -> Result<()> {
    if dry_run {
        let registry = RegistryStore::in_dir(ext_dir).load()?;
        match registry.extension_files().get(name) {
            Some(files) => println!(
                "would remove {} and delete: {}",
                name.cyan(),
                files.join(", ").dimmed()
            ),
            None => println!("{} is not installed", name.cyan()),
        }
        return Ok(());
    }

    let mut manager = DirectoryManager::new(ext_dir, runtime.profile());
    let unneeded = manager.remove_extension(name)?;

    println!("{} removed {}", "ok".green().bold(), name.cyan());

    let confirmed = interactive::propose_removal(&unneeded, assume_yes)?;
    if !confirmed.is_empty() {
        AptGet::new().remove(&confirmed)?;
    }

    Ok(())
}
