//! List installed extension packages.

use std::path::Path;

use colored::Colorize;

use ext_registry::RegistryStore;

use crate::error::Result;

pub fn run_list(ext_dir: &Path, json: bool) -> Result<()> {
    let registry = RegistryStore::in_dir(ext_dir).load()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&registry)?);
        return Ok(());
    }

    if registry.extension_files().is_empty() {
        println!("no extension packages installed in {}", ext_dir.display());
        return Ok(());
    }

    for (name, files) in registry.extension_files() {
        println!("{}", name.cyan().bold());
        if let Some(requires) = registry.dependencies().get(name) {
            if !requires.is_empty() {
                let list: Vec<_> = requires.iter().map(String::as_str).collect();
                println!("  loads after: {}", list.join(", "));
            }
        }
        if files.is_empty() {
            println!("  files: {}", "(none)".dimmed());
        } else {
            println!("  files: {}", files.join(", ").dimmed());
        }
    }

    if !registry.system_package_users().is_empty() {
        println!();
        println!("{}", "system packages".bold());
        for (package, users) in registry.system_package_users() {
            let list: Vec<_> = users.iter().map(String::as_str).collect();
            println!("  {} <- {}", package, list.join(", ").dimmed());
        }
    }

    Ok(())
}
