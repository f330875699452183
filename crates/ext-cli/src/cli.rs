//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use ext_registry::RuntimeProfile;
use ext_system::BuildStyle;

/// Extension Manager - install compiled extension packages into a shared
/// extension directory
#[derive(Parser, Debug)]
#[command(name = "extman")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Shared extension directory
    #[arg(long, global = true, default_value = "vendor/ext", env = "EXTMAN_EXT_DIR")]
    pub ext_dir: PathBuf,

    /// Target runtime for the generated loader configuration
    #[arg(long, global = true, value_enum, default_value = "php")]
    pub runtime: Runtime,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Supported target runtimes
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Runtime {
    /// `extension = <path>` directives, libraries under modules/
    Php,
    /// `hhvm.extensions[] = <path>` directives, libraries in build root
    Hhvm,
}

impl Runtime {
    pub fn profile(self) -> RuntimeProfile {
        match self {
            Runtime::Php => RuntimeProfile::php(),
            Runtime::Hhvm => RuntimeProfile::hhvm(),
        }
    }

    pub fn build_style(self) -> BuildStyle {
        match self {
            Runtime::Php => BuildStyle::Configure,
            Runtime::Hhvm => BuildStyle::CMake,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build and install an extension package from a source directory
    ///
    /// Reads native_extension.toml from the source directory, installs the
    /// required system packages, runs the build, and registers the
    /// produced shared libraries.
    ///
    /// Examples:
    ///   extman install ./ext-intl
    ///   extman install ./ext-intl --skip-build
    ///   extman --runtime hhvm install ./ext-intl
    Install {
        /// Extension package source directory
        source_dir: PathBuf,

        /// Skip the build step (the source directory already holds build output)
        #[arg(long)]
        skip_build: bool,

        /// Record system package operations instead of executing them
        #[arg(long)]
        dry_run: bool,

        /// Remove unneeded system packages without prompting
        #[arg(short, long)]
        yes: bool,

        /// Override the detected distribution (e.g. Debian)
        #[arg(long, requires = "release")]
        distro: Option<String>,

        /// Override the detected release (e.g. 12)
        #[arg(long, requires = "distro")]
        release: Option<String>,
    },

    /// Remove an installed extension package
    ///
    /// Deletes its shared-library files, drops its registry record, and
    /// reports system packages nothing needs anymore.
    Remove {
        /// Extension package name
        name: String,

        /// Record system package operations instead of executing them
        #[arg(long)]
        dry_run: bool,

        /// Remove unneeded system packages without prompting
        #[arg(short, long)]
        yes: bool,
    },

    /// List installed extension packages and their files
    List {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show the computed load order
    Order,
}
