//! Host distribution probing.
//!
//! System package requirements in extension manifests are keyed by
//! distribution and release, so the installer needs to know exactly which
//! host it is on before it can resolve them. Detection shells out to
//! `lsb_release` and verifies the apt toolchain is present.

use std::path::PathBuf;
use std::process::Command;

use crate::error::{Error, Result};

/// Identity of the host distribution, as reported by `lsb_release`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPlatform {
    /// Distributor ID (e.g., "Debian", "Ubuntu").
    pub distro: String,
    /// Release number (e.g., "12", "24.04").
    pub release: String,
}

impl HostPlatform {
    /// Probe the current host.
    ///
    /// Requires a Linux host with `lsb_release`, `apt-get`, and `dpkg`
    /// available; anything else is [`Error::UnsupportedHost`].
    pub fn detect() -> Result<Self> {
        if !cfg!(target_os = "linux") {
            return Err(Error::UnsupportedHost {
                reason: "not a Linux host".to_string(),
            });
        }

        check_binary_on_path("apt-get")?;
        check_binary_on_path("dpkg")?;

        let distro = lsb_release("-i")?;
        let release = lsb_release("-r")?;
        tracing::debug!(
            distro = distro.as_str(),
            release = release.as_str(),
            "detected host platform"
        );

        Ok(Self { distro, release })
    }
}

fn lsb_release(flag: &str) -> Result<String> {
    let output = Command::new("lsb_release")
        .args([flag, "--short"])
        .output()
        .map_err(|e| Error::ToolNotFound {
            tool: "lsb_release".to_string(),
            hint: Some(format!("\n  {e}")),
        })?;

    if !output.status.success() {
        return Err(Error::UnsupportedHost {
            reason: format!("lsb_release {flag} --short failed"),
        });
    }

    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if value.is_empty() {
        return Err(Error::UnsupportedHost {
            reason: format!("lsb_release {flag} --short produced no output"),
        });
    }
    Ok(value)
}

/// Verify a binary is on PATH. Returns the resolved path or
/// [`Error::ToolNotFound`].
pub fn check_binary_on_path(tool: &str) -> Result<PathBuf> {
    let path_var = std::env::var_os("PATH").unwrap_or_default();
    for dir in std::env::split_paths(&path_var) {
        let candidate = dir.join(tool);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    Err(Error::ToolNotFound {
        tool: tool.to_string(),
        hint: install_hint(tool).map(str::to_string),
    })
}

fn install_hint(tool: &str) -> Option<&'static str> {
    match tool {
        "lsb_release" => Some("\n  Install: apt-get install lsb-release"),
        "apt-get" | "dpkg" => Some("\n  This installer only runs on Debian-style systems"),
        _ => None,
    }
}
