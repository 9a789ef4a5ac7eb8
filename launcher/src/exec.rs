//! Child process execution.
//!
//! All process starts go through [`Runner`] so the launch sequence can be
//! driven without spawning anything.

use std::io;
use std::path::Path;

use crate::command::CommandSpec;

pub trait Runner {
    /// Starts `spec` from `cwd` and blocks until it exits.
    ///
    /// Returns the exit code, or `None` if the child was ended by a signal.
    fn run(&mut self, spec: &CommandSpec, cwd: &Path) -> io::Result<Option<i32>>;
}

/// Runs children for real, inheriting stdio.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn run(&mut self, spec: &CommandSpec, cwd: &Path) -> io::Result<Option<i32>> {
        log::debug!("spawning `{spec}` in {}", cwd.display());
        let status = spec.to_command(cwd).status()?;
        log::debug!("`{spec}` finished: {status}");
        Ok(status.code())
    }
}
