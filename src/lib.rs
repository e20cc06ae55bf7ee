pub mod config;
pub mod error;
pub mod launcher;
pub mod registry;
pub mod resolver;

use crate::config::{Mode, ResolverConfig, JAVA_HOME_VAR};
use crate::error::Result;
use crate::launcher::Launcher;
use crate::registry::Registry;
use crate::resolver::Resolver;
use std::ffi::OsString;
use std::path::Path;

/// what the caller asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub mode: Mode,
    pub command_line: String,
}

impl Invocation {
    /// trailing words are joined back into one command line
    #[must_use]
    pub fn new(mode: Mode, command: &[String]) -> Self {
        Self {
            mode,
            command_line: command.join(" "),
        }
    }
}

/// Resolve the java home and run the command, returning its exit status.
///
/// `preset` is the inherited value of `JAVA_HOME`.
/// # Errors
/// Registry resolution failures, or failure to start the interpreter.
/// Nothing is launched when resolution fails.
pub fn run<R: Registry>(
    invocation: &Invocation,
    config: &ResolverConfig,
    registry: R,
    working_dir: &Path,
    preset: Option<OsString>,
) -> Result<i32> {
    let home = Resolver::new(config, registry, working_dir).resolve(invocation.mode, preset)?;
    Launcher::new(JAVA_HOME_VAR).launch(&home, &invocation.command_line)
}
