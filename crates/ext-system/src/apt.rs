//! apt-get backed system package management.

use std::process::{Command, Stdio};

use crate::error::{Error, Result};
use crate::provider::SystemPackageManager;

/// Drives `apt-get` through `sudo`, streaming output to the terminal.
///
/// The package index is refreshed once per process, before the first
/// install.
#[derive(Debug, Default)]
pub struct AptGet {
    updated: bool,
}

impl AptGet {
    pub fn new() -> Self {
        Self::default()
    }

    fn run(&self, args: &[&str]) -> Result<()> {
        let command = format!("sudo apt-get {}", args.join(" "));
        tracing::debug!("running {command}");

        let status = Command::new("sudo")
            .arg("apt-get")
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|_| Error::CommandFailed {
                command: command.clone(),
                exit_code: None,
            })?;

        if !status.success() {
            return Err(Error::CommandFailed {
                command,
                exit_code: status.code(),
            });
        }
        Ok(())
    }
}

impl SystemPackageManager for AptGet {
    fn install(&mut self, packages: &[String]) -> Result<()> {
        if packages.is_empty() {
            return Ok(());
        }

        if !self.updated {
            self.run(&["update"])?;
            self.updated = true;
        }

        let mut args = vec!["install", "-y"];
        args.extend(packages.iter().map(String::as_str));
        self.run(&args)
    }

    fn remove(&mut self, packages: &[String]) -> Result<()> {
        if packages.is_empty() {
            return Ok(());
        }

        let mut args = vec!["remove", "-y"];
        args.extend(packages.iter().map(String::as_str));
        self.run(&args)
    }
}
