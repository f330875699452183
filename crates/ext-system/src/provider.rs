//! The system package manager boundary.

use crate::error::Result;

/// Executes installs and removals of system packages.
///
/// The registry core only reports package names; which of the reported
/// unneeded packages actually get removed is decided by the caller (for
/// the CLI, interactively) before this boundary is invoked.
pub trait SystemPackageManager {
    /// Install the named packages. An empty list is a no-op.
    fn install(&mut self, packages: &[String]) -> Result<()>;

    /// Remove the named packages. An empty list is a no-op.
    fn remove(&mut self, packages: &[String]) -> Result<()>;
}

/// A manager that records requests instead of executing them.
///
/// Backs `--dry-run` and tests.
#[derive(Debug, Default)]
pub struct RecordingPackageManager {
    /// Packages install was requested for, in request order.
    pub installed: Vec<String>,
    /// Packages removal was requested for, in request order.
    pub removed: Vec<String>,
}

impl SystemPackageManager for RecordingPackageManager {
    fn install(&mut self, packages: &[String]) -> Result<()> {
        self.installed.extend_from_slice(packages);
        Ok(())
    }

    fn remove(&mut self, packages: &[String]) -> Result<()> {
        self.removed.extend_from_slice(packages);
        Ok(())
    }
}
