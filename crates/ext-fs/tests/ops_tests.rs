//! Filesystem operation tests against real temp trees.

use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;

use ext_fs::{copy_into, ensure_dir, remove_if_present, shared_libraries, write_atomic};

#[test]
fn copy_then_remove_leaves_source_untouched() {
    let temp = TempDir::new().unwrap();
    let src = temp.child("build/intl.so");
    src.write_binary(b"\x7fELF").unwrap();

    let ext_dir = ensure_dir(&temp.path().join("ext")).unwrap();
    let name = copy_into(src.path(), &ext_dir).unwrap();
    assert_eq!(name, "intl.so");

    temp.child("ext/intl.so").assert(predicate::path::is_file());

    assert!(remove_if_present(&ext_dir.join(&name)).unwrap());
    temp.child("ext/intl.so")
        .assert(predicate::path::missing());
    src.assert(predicate::path::is_file());
}

#[test]
fn enumeration_sees_only_toplevel_libraries() {
    let temp = TempDir::new().unwrap();
    temp.child("modules/a.so").write_binary(b"x").unwrap();
    temp.child("modules/b.so").write_binary(b"x").unwrap();
    temp.child("modules/sub/c.so").write_binary(b"x").unwrap();
    temp.child("modules/a.o").write_binary(b"x").unwrap();

    let libs = shared_libraries(&temp.path().join("modules"), "so").unwrap();
    let names: Vec<_> = libs
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.so", "b.so"]);
}

#[test]
fn atomic_write_is_visible_at_final_path_only() {
    let temp = TempDir::new().unwrap();
    let target = temp.child("ext/extensions.ini");

    write_atomic(target.path(), b"extension = /ext/a.so\n").unwrap();
    target.assert("extension = /ext/a.so\n");
}
