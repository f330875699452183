//! Directory and file operations for the shared extension directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Ensure a directory exists and return its canonical absolute path.
///
/// All subsequent file operations against the directory use the returned
/// path, so relative paths handed in by callers never leak into generated
/// artifacts. Idempotent.
pub fn ensure_dir(path: &Path) -> Result<PathBuf> {
    fs::create_dir_all(path).map_err(|e| Error::io(path, e))?;
    dunce::canonicalize(path).map_err(|e| Error::io(path, e))
}

/// Copy a file into a directory, keeping its file name.
///
/// Returns the bare file name of the copy.
pub fn copy_into(file: &Path, dir: &Path) -> Result<String> {
    let name = file
        .file_name()
        .ok_or_else(|| Error::NoFileName {
            path: file.to_path_buf(),
        })?
        .to_string_lossy()
        .into_owned();

    let dest = dir.join(&name);
    fs::copy(file, &dest).map_err(|e| Error::Copy {
        from: file.to_path_buf(),
        to: dest.clone(),
        source: e,
    })?;

    Ok(name)
}

/// Delete a file, tolerating its absence.
///
/// Returns `true` if the file existed and was removed, `false` if it was
/// already gone. Any other failure (permissions, the path being a
/// directory) is an error.
pub fn remove_if_present(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("already absent: {}", path.display());
            Ok(false)
        }
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Enumerate shared-library files directly inside `dir`.
///
/// Matches regular files whose extension equals `suffix` (e.g. `so`).
/// Subdirectories are not descended into. Results are sorted by file name
/// so repeated enumerations of the same build output are identical.
pub fn shared_libraries(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;

    let mut libraries = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) == Some(suffix) {
            libraries.push(path);
        }
    }

    libraries.sort();
    Ok(libraries)
}
