//! Extension Manager CLI
//!
//! Installer workflow around the extension directory: resolves an
//! extension package's metadata, drives the system package manager and
//! the build, and keeps the shared extension directory's registry and
//! loader configuration in sync.

mod cli;
mod commands;
mod error;
mod interactive;

use std::path::Path;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands, Runtime};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    let Some(command) = cli.command else {
        println!("{} Extension Manager CLI", "extman".green().bold());
        println!();
        println!("Run {} for available commands.", "extman --help".cyan());
        return Ok(());
    };

    execute_command(command, &cli.ext_dir, cli.runtime)
}

fn execute_command(command: Commands, ext_dir: &Path, runtime: Runtime) -> Result<()> {
    match command {
        Commands::Install {
            source_dir,
            skip_build,
            dry_run,
            yes,
            distro,
            release,
        } => commands::run_install(
            ext_dir,
            runtime,
            &source_dir,
            skip_build,
            dry_run,
            yes,
            distro.zip(release),
        ),
        Commands::Remove {
            name,
            dry_run,
            yes,
        } => commands::run_remove(ext_dir, runtime, &name, dry_run, yes),
        Commands::List { json } => commands::run_list(ext_dir, json),
        Commands::Order => commands::run_order(ext_dir),
    }
}
