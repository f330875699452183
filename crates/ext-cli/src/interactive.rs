//! Interactive prompts for CLI commands
//!
//! Uses dialoguer for terminal-based confirmation.

use std::io::IsTerminal;

use colored::Colorize;
use dialoguer::{Confirm, Select};

use crate::error::Result;

/// Ask which of the unneeded system packages should actually be removed.
///
/// Offers removing all of them, none, or deciding per package. With
/// `assume_yes` (or when stdin is not a terminal and nothing can be
/// asked), no prompt is shown: `assume_yes` confirms everything,
/// a non-interactive session confirms nothing.
pub fn propose_removal(unneeded: &[String], assume_yes: bool) -> Result<Vec<String>> {
    if unneeded.is_empty() {
        return Ok(Vec::new());
    }
    if assume_yes {
        return Ok(unneeded.to_vec());
    }
    if !std::io::stdin().is_terminal() {
        println!(
            "{} system packages no longer needed: {}",
            "note:".yellow(),
            unneeded.join(", ")
        );
        return Ok(Vec::new());
    }

    println!(
        "The following system packages are no longer needed: {}",
        unneeded.join(", ").cyan()
    );
    let choice = Select::new()
        .with_prompt("Remove them?")
        .items(&["yes", "no", "decide per package"])
        .default(1)
        .interact()?;

    match choice {
        0 => Ok(unneeded.to_vec()),
        2 => {
            let mut confirmed = Vec::new();
            for package in unneeded {
                let remove = Confirm::new()
                    .with_prompt(format!("Remove {package}?"))
                    .default(false)
                    .interact()?;
                if remove {
                    confirmed.push(package.clone());
                }
            }
            Ok(confirmed)
        }
        _ => Ok(Vec::new()),
    }
}
