//! Build invocation for extension packages.
//!
//! The registry core never compiles anything; it only ingests the
//! directory of produced shared libraries. This module runs the build
//! command that produces that directory, in the package's source tree,
//! through the system shell.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// Which build toolchain a synthesized command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStyle {
    /// `phpize && ./configure && make`: output lands in `modules/`.
    Configure,
    /// `hphpize && cmake . && make`: output lands in the source directory.
    CMake,
}

/// Build a shell [`Command`] that executes `cmd_str` via the system shell.
///
/// - Unix: `sh -c "{cmd_str}"`
/// - Windows: `cmd /C "{cmd_str}"`
fn shell_command(cmd_str: &str) -> Command {
    #[cfg(windows)]
    {
        let mut c = Command::new("cmd");
        c.args(["/C", cmd_str]);
        c
    }
    #[cfg(not(windows))]
    {
        let mut c = Command::new("sh");
        c.arg("-c").arg(cmd_str);
        c
    }
}

/// Run an extension package's build command.
///
/// The working directory is the package source tree; the environment
/// inherits the parent process with `EXTENSION_NAME` added. Stdout and
/// stderr are streamed live so configure/make output stays visible. A
/// non-zero exit is [`Error::BuildFailed`].
pub fn run_build(name: &str, command: &str, source_dir: &Path) -> Result<()> {
    tracing::debug!(extension = name, "building in {}", source_dir.display());

    let status = shell_command(command)
        .current_dir(source_dir)
        .env("EXTENSION_NAME", name)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|_| Error::BuildFailed {
            name: name.to_string(),
            command: command.to_string(),
            exit_code: None,
        })?;

    if !status.success() {
        return Err(Error::BuildFailed {
            name: name.to_string(),
            command: command.to_string(),
            exit_code: status.code(),
        });
    }

    Ok(())
}

/// Synthesize the default build command for a toolchain.
///
/// `flags` are passed to the configure step, shell-quoted.
pub fn synthesize_build_command(style: BuildStyle, flags: Option<&str>) -> String {
    let flags = flags
        .map(|f| format!(" {}", shell_quote(f)))
        .unwrap_or_default();
    match style {
        BuildStyle::Configure => format!("phpize && ./configure{flags} && make && make install"),
        BuildStyle::CMake => format!("hphpize && cmake{flags} . && make"),
    }
}

/// Wrap a string in single quotes for the shell, escaping embedded ones.
fn shell_quote(raw: &str) -> String {
    format!("'{}'", raw.replace('\'', r"'\''"))
}
