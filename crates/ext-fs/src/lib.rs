//! Filesystem capability for the extension directory.
//!
//! Everything that touches disk on behalf of the registry goes through this
//! crate: atomic writes for durable artifacts, tolerant deletion for
//! best-effort cleanup, and shared-library enumeration for build output
//! directories.

pub mod error;
pub mod io;
pub mod ops;

pub use error::{Error, Result};
pub use io::{read_text, write_atomic};
pub use ops::{copy_into, ensure_dir, remove_if_present, shared_libraries};
