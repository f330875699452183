//! Host-side collaborators for the extension installer workflow.
//!
//! The registry core only decides which system packages are needed or
//! unneeded and which directory of build output to ingest. Talking to the
//! host (probing the distribution, invoking the system package manager,
//! running build commands) happens here, behind small boundaries the
//! caller wires together.

pub mod apt;
pub mod build;
pub mod error;
pub mod platform;
pub mod provider;

pub use apt::AptGet;
pub use build::{BuildStyle, run_build, synthesize_build_command};
pub use error::{Error, Result};
pub use platform::{HostPlatform, check_binary_on_path};
pub use provider::{RecordingPackageManager, SystemPackageManager};
