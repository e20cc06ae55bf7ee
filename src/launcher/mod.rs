use crate::error::{LaunchError, Result};
use crate::resolver::{JavaHome, Source};
use log::{debug, info, warn};
use std::ffi::OsString;
use std::process::{Command, Stdio};

/// Runs a command line through the system command interpreter with the
/// java home exported under `home_var`.
pub struct Launcher<'a> {
    home_var: &'a str,
}

#[cfg(windows)]
fn interpreter() -> OsString {
    std::env::var_os("ComSpec").unwrap_or_else(|| "cmd.exe".into())
}

#[cfg(not(windows))]
fn interpreter() -> OsString {
    "sh".into()
}

#[cfg(windows)]
fn shell_command(command_line: &str) -> Command {
    use std::os::windows::process::CommandExt;

    let mut command = Command::new(interpreter());
    // cmd.exe parses its own command line, so pass it through unquoted
    command.arg("/C").raw_arg(command_line);
    command
}

#[cfg(not(windows))]
fn shell_command(command_line: &str) -> Command {
    let mut command = Command::new(interpreter());
    command.arg("-c").arg(command_line);
    command
}

impl<'a> Launcher<'a> {
    #[must_use]
    pub fn new(home_var: &'a str) -> Self {
        Self { home_var }
    }

    /// Run `command_line` to completion and return its exit status.
    ///
    /// The child inherits all standard streams. When the home came from the
    /// environment it is already inherited and nothing is set.
    /// # Errors
    /// `LaunchError::Spawn` when the interpreter cannot be started.
    pub fn launch(&self, home: &JavaHome, command_line: &str) -> Result<i32> {
        let mut command = shell_command(command_line);
        command
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if home.source != Source::Environment {
            debug!("{}={}", self.home_var, home.path.display());
            command.env(self.home_var, &home.path);
        }

        info!("Running {command_line}");
        let status = command.status().map_err(|source| LaunchError::Spawn {
            interpreter: interpreter().to_string_lossy().into(),
            source,
        })?;

        if let Some(code) = status.code() {
            debug!("command exited with {code}");
            Ok(code)
        } else {
            warn!("command terminated without an exit code");
            Ok(LaunchError::EXIT_CODE)
        }
    }
}
