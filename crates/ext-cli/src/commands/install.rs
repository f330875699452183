//! Build and install an extension package.

use std::path::Path;

use colored::Colorize;

use ext_registry::{DirectoryManager, ExtensionManifest};
use ext_system::{
    AptGet, HostPlatform, SystemPackageManager, run_build, synthesize_build_command,
};

use crate::cli::Runtime;
use crate::error::Result;
use crate::interactive;

#[allow(clippy::too_many_arguments)]
pub fn run_install(
    ext_dir: &Path,
    runtime: Runtime,
    source_dir: &Path,
    skip_build: bool,
    dry_run: bool,
    assume_yes: bool,
    platform_override: Option<(String, String)>,
) -> Result<()> {
    let manifest = ExtensionManifest::load(source_dir)?;
    let name = manifest.extension.name.clone();

    let (distro, release) = match platform_override {
        Some(pair) => pair,
        None => {
            let platform = HostPlatform::detect()?;
            (platform.distro, platform.release)
        }
    };
    let packages = manifest.system_packages_for(&distro, &release)?.to_vec();

    let build_config = manifest.build.as_ref();
    let build_command = match build_config.and_then(|b| b.command.clone()) {
        Some(command) => command,
        None => synthesize_build_command(
            runtime.build_style(),
            build_config.and_then(|b| b.flags.as_deref()),
        ),
    };

    if dry_run {
        println!(
            "would install system packages: {}",
            if packages.is_empty() {
                "(none)".dimmed().to_string()
            } else {
                packages.join(", ").cyan().to_string()
            }
        );
        if !skip_build {
            println!("would build with: {}", build_command.cyan());
        }
        println!(
            "would register {} from {}",
            name.cyan(),
            source_dir.display()
        );
        return Ok(());
    }

    let mut apt = AptGet::new();
    apt.install(&packages)?;

    if skip_build {
        tracing::debug!(extension = name.as_str(), "skipping build step");
    } else {
        run_build(&name, &build_command, source_dir)?;
    }

    let mut manager = DirectoryManager::new(ext_dir, runtime.profile());
    let unneeded =
        manager.add_extension(&name, &packages, &manifest.requires.extensions, source_dir)?;

    println!(
        "{} installed {} {}",
        "ok".green().bold(),
        name.cyan(),
        manifest.extension.version.dimmed()
    );

    let confirmed = interactive::propose_removal(&unneeded, assume_yes)?;
    apt.remove(&confirmed)?;

    Ok(())
}
