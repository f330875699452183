//! Backing documents written by older tooling must keep working.
//!
//! Earlier generations of the registry serialized user sets as
//! dynamically-shaped objects and empty mappings as empty sequences.
//! These documents are loaded, operated on, and rewritten in the explicit
//! shape.

use std::fs;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use ext_registry::{DirectoryManager, REGISTRY_FILENAME, RegistryStore, RuntimeProfile};

const LEGACY_DOCUMENT: &str = r#"{
  "extFiles": {
    "p": ["p.so"],
    "q": ["q.so"]
  },
  "dependencies": {
    "p": [],
    "q": {"p": true}
  },
  "packages": {
    "libx": {"p": true, "q": true}
  }
}"#;

#[test]
fn legacy_document_loads_as_plain_mappings() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(REGISTRY_FILENAME), LEGACY_DOCUMENT).unwrap();

    let registry = RegistryStore::in_dir(tmp.path()).load().unwrap();
    assert!(registry.is_registered("p"));
    assert!(registry.is_registered("q"));
    assert_eq!(
        registry.dependencies()["q"],
        ["p".to_string()].into_iter().collect()
    );
    assert_eq!(
        registry.system_package_users()["libx"],
        ["p".to_string(), "q".to_string()].into_iter().collect()
    );
}

#[test]
fn operating_on_legacy_document_rewrites_explicit_shape() {
    let tmp = TempDir::new().unwrap();
    let ext_dir = tmp.path().join("ext");
    fs::create_dir_all(&ext_dir).unwrap();
    fs::write(ext_dir.join(REGISTRY_FILENAME), LEGACY_DOCUMENT).unwrap();
    fs::write(ext_dir.join("p.so"), b"\x7fELF").unwrap();
    fs::write(ext_dir.join("q.so"), b"\x7fELF").unwrap();

    let mut manager = DirectoryManager::new(&ext_dir, RuntimeProfile::php());
    let unneeded = manager.remove_extension("q").unwrap();
    assert!(unneeded.is_empty(), "libx is still used by p");

    let document: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(ext_dir.join(REGISTRY_FILENAME)).unwrap())
            .unwrap();

    // User sets come back out as sorted name arrays, not flag objects
    assert_eq!(document["packages"]["libx"], serde_json::json!(["p"]));
    // Mapping-valued fields stay objects even when empty entries were
    // dropped along the way
    assert!(document["extFiles"].is_object());
    assert!(document["dependencies"].is_object());

    let registry = RegistryStore::in_dir(&ext_dir).load().unwrap();
    assert!(!registry.is_registered("q"));
    assert!(!ext_dir.join("q.so").exists());
    assert!(ext_dir.join("p.so").exists());
}

#[test]
fn empty_mappings_round_trip_as_mappings() {
    let tmp = TempDir::new().unwrap();
    let ext_dir = tmp.path().join("ext");
    fs::create_dir_all(&ext_dir).unwrap();
    fs::write(
        ext_dir.join(REGISTRY_FILENAME),
        r#"{"extFiles": [], "dependencies": [], "packages": []}"#,
    )
    .unwrap();
    fs::write(ext_dir.join("zlib.so"), b"ignored").unwrap();

    // Add something so the document gets rewritten
    let source = tmp.path().join("zlib");
    fs::create_dir_all(source.join("modules")).unwrap();
    fs::write(source.join("modules/zlib.so"), b"\x7fELF").unwrap();

    let mut manager = DirectoryManager::new(&ext_dir, RuntimeProfile::php());
    manager
        .add_extension("zlib", &["zlib1g-dev".to_string()], &[], &source)
        .unwrap();
    manager.remove_extension("zlib").unwrap();

    let document: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(ext_dir.join(REGISTRY_FILENAME)).unwrap())
            .unwrap();
    assert!(document["extFiles"].is_object());
    assert!(document["dependencies"].is_object());
    assert!(document["packages"].is_object());
}
