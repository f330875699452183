//! End-to-end lifecycle test for the installer workflow
//!
//! Exercises the complete flow the CLI drives: manifest -> system package
//! resolution -> registry mutation -> loader configuration, with the
//! system package manager stubbed out.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use ext_registry::{
    DirectoryManager, ExtensionManifest, LOADER_CONFIG_FILENAME, RuntimeProfile,
};
use ext_system::{RecordingPackageManager, SystemPackageManager};

/// Lay out an extension package source tree: manifest at the root, build
/// output under modules/.
fn package_source(root: &Path, manifest: &str, libraries: &[&str]) -> PathBuf {
    let name = ExtensionManifest::from_toml(manifest)
        .unwrap()
        .extension
        .name
        .clone();
    let source = root.join(&name);
    let modules = source.join("modules");
    fs::create_dir_all(&modules).unwrap();
    fs::write(source.join("native_extension.toml"), manifest).unwrap();
    for library in libraries {
        fs::write(modules.join(library), b"\x7fELF").unwrap();
    }
    source
}

/// Run the add-side workflow the way the CLI does, with a recording
/// package manager standing in for apt.
fn install(
    manager: &mut DirectoryManager,
    packages: &mut RecordingPackageManager,
    source: &Path,
) -> Vec<String> {
    let manifest = ExtensionManifest::load(source).unwrap();
    let required = manifest
        .system_packages_for("Debian", "12")
        .unwrap()
        .to_vec();
    packages.install(&required).unwrap();

    manager
        .add_extension(
            &manifest.extension.name,
            &required,
            &manifest.requires.extensions,
            source,
        )
        .unwrap()
}

const P_MANIFEST: &str = r#"
[extension]
name = "p"
version = "1.0.0"

[system.Debian]
"12" = ["libx"]
"#;

const Q_MANIFEST: &str = r#"
[extension]
name = "q"
version = "2.0.0"

[requires]
extensions = ["p"]

[system.Debian]
"12" = ["libx"]
"#;

#[test]
fn shared_requirement_outlives_first_removal() {
    let tmp = TempDir::new().unwrap();
    let ext_dir = tmp.path().join("vendor/ext");
    let p_source = package_source(tmp.path(), P_MANIFEST, &["p.so"]);
    let q_source = package_source(tmp.path(), Q_MANIFEST, &["q.so"]);

    let mut manager = DirectoryManager::new(&ext_dir, RuntimeProfile::php());
    let mut packages = RecordingPackageManager::default();

    assert!(install(&mut manager, &mut packages, &p_source).is_empty());
    assert!(install(&mut manager, &mut packages, &q_source).is_empty());
    assert_eq!(packages.installed, vec!["libx", "libx"]);

    // q loads after p, so p's file is listed first
    let config = fs::read_to_string(ext_dir.join(LOADER_CONFIG_FILENAME)).unwrap();
    let lines: Vec<_> = config.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("p.so"));
    assert!(lines[1].ends_with("q.so"));

    let registry = manager.store().load().unwrap();
    assert_eq!(
        registry.system_package_users()["libx"],
        ["p".to_string(), "q".to_string()].into_iter().collect()
    );

    // Removing p: libx still used by q, nothing proposed for removal
    let unneeded = manager.remove_extension("p").unwrap();
    packages.remove(&unneeded).unwrap();
    assert!(packages.removed.is_empty());

    let config = fs::read_to_string(ext_dir.join(LOADER_CONFIG_FILENAME)).unwrap();
    assert_eq!(config.lines().count(), 1);
    assert!(config.contains("q.so"));
    assert!(!ext_dir.join("p.so").exists());

    // Removing q frees libx
    let unneeded = manager.remove_extension("q").unwrap();
    packages.remove(&unneeded).unwrap();
    assert_eq!(packages.removed, vec!["libx"]);

    assert!(manager.store().load().unwrap().is_empty());
    let config = fs::read_to_string(ext_dir.join(LOADER_CONFIG_FILENAME)).unwrap();
    assert!(config.is_empty());
}

#[test]
fn reinstall_with_new_build_output_swaps_files() {
    let tmp = TempDir::new().unwrap();
    let ext_dir = tmp.path().join("vendor/ext");

    const V1: &str = r#"
[extension]
name = "intl"
version = "1.0.0"

[system.Debian]
"12" = ["libicu-dev"]
"#;

    let mut manager = DirectoryManager::new(&ext_dir, RuntimeProfile::php());
    let mut packages = RecordingPackageManager::default();

    let first = package_source(tmp.path(), V1, &["a.so", "b.so"]);
    install(&mut manager, &mut packages, &first);
    assert!(ext_dir.join("a.so").exists());
    assert!(ext_dir.join("b.so").exists());

    // The new build produces a single, differently named library
    fs::remove_dir_all(&first).unwrap();
    let second = package_source(tmp.path(), V1, &["c.so"]);
    install(&mut manager, &mut packages, &second);

    let registry = manager.store().load().unwrap();
    assert_eq!(registry.extension_files()["intl"], vec!["c.so"]);
    assert!(!ext_dir.join("a.so").exists());
    assert!(!ext_dir.join("b.so").exists());
    assert!(ext_dir.join("c.so").exists());

    let config = fs::read_to_string(ext_dir.join(LOADER_CONFIG_FILENAME)).unwrap();
    assert_eq!(config.lines().count(), 1);
}

#[test]
fn hhvm_profile_scans_build_root_and_writes_its_directive() {
    let tmp = TempDir::new().unwrap();
    let ext_dir = tmp.path().join("vendor/ext");

    // Flat layout: libraries sit directly in the source directory
    let source = tmp.path().join("fastlz");
    fs::create_dir_all(&source).unwrap();
    fs::write(source.join("fastlz.so"), b"\x7fELF").unwrap();

    let mut manager = DirectoryManager::new(&ext_dir, RuntimeProfile::hhvm());
    manager
        .add_extension("fastlz", &["liblz4-dev".to_string()], &[], &source)
        .unwrap();

    let config = fs::read_to_string(ext_dir.join(LOADER_CONFIG_FILENAME)).unwrap();
    assert!(config.starts_with("hhvm.extensions[] = "));
    assert!(config.trim_end().ends_with("fastlz.so"));
}
