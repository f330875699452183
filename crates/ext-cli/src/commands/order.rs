//! Show the computed load order.

use std::path::Path;

use colored::Colorize;

use ext_registry::{RegistryStore, topological_order};

use crate::error::Result;

pub fn run_order(ext_dir: &Path) -> Result<()> {
    let registry = RegistryStore::in_dir(ext_dir).load()?;
    let order = topological_order(registry.dependencies())?;

    if order.is_empty() {
        println!("nothing to load from {}", ext_dir.display());
        return Ok(());
    }

    for (position, name) in order.iter().enumerate() {
        if registry.is_registered(name) {
            println!("{:>3}. {}", position + 1, name);
        } else {
            // A declared load-after target not installed through this
            // directory still constrains the order
            println!("{:>3}. {} {}", position + 1, name, "(external)".dimmed());
        }
    }

    Ok(())
}
