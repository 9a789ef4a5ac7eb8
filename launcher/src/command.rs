//! Command specifications.
//!
//! A child is either an argv (program plus arguments, no shell involved) or a
//! single line handed to the platform command interpreter. The `Display`
//! form is what gets printed before the child starts.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;
use std::process::Command;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandSpec {
    Argv {
        program: OsString,
        args: Vec<OsString>,
        /// Printed in place of `program`, e.g. a bare name for a resolved path.
        label: Option<String>,
    },
    /// Interpreted by `cmd /C` on Windows and `sh -c` elsewhere.
    Shell(String),
}

impl CommandSpec {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self::Argv {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
            label: None,
        }
    }

    /// Prints as `name` while still spawning the program it was built from.
    #[must_use]
    pub fn shown_as(mut self, name: impl Into<String>) -> Self {
        if let Self::Argv { label, .. } = &mut self {
            *label = Some(name.into());
        }
        self
    }

    pub fn shell(line: impl Into<String>) -> Self {
        Self::Shell(line.into())
    }

    /// Appends one argument. For shell lines it is added as literal trailing text.
    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        match &mut self {
            Self::Argv { args, .. } => args.push(arg.as_ref().to_os_string()),
            Self::Shell(line) => {
                line.push(' ');
                line.push_str(&arg.as_ref().to_string_lossy());
            }
        }
        self
    }

    #[must_use]
    pub fn args<I, S>(self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        args.into_iter().fold(self, |spec, arg| spec.arg(arg))
    }

    #[cfg(test)]
    pub fn contains(&self, needle: &str) -> bool {
        match self {
            Self::Argv {
                program,
                args,
                label,
            } => {
                program == needle
                    || label.as_deref() == Some(needle)
                    || args.iter().any(|a| a == needle)
            }
            Self::Shell(line) => line.split_whitespace().any(|w| w == needle),
        }
    }

    /// Builds the `std::process::Command` that runs this spec from `cwd`.
    pub fn to_command(&self, cwd: &Path) -> Command {
        let mut cmd = match self {
            Self::Argv { program, args, .. } => {
                let mut cmd = Command::new(program);
                cmd.args(args);
                cmd
            }
            Self::Shell(line) => shell_command(line),
        };
        cmd.current_dir(cwd);
        cmd
    }
}

#[cfg(windows)]
fn shell_command(line: &str) -> Command {
    use std::os::windows::process::CommandExt;

    let interpreter = std::env::var_os("COMSPEC").unwrap_or_else(|| OsString::from("cmd.exe"));
    let mut cmd = Command::new(interpreter);
    // Quoting inside the line is the caller's; pass it through untouched.
    cmd.arg("/C").raw_arg(line);
    cmd
}

#[cfg(not(windows))]
fn shell_command(line: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(line);
    cmd
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Argv {
                program,
                args,
                label,
            } => {
                match label {
                    Some(label) => f.write_str(label)?,
                    None => write!(f, "{}", program.to_string_lossy())?,
                }
                for arg in args {
                    write!(f, " {}", arg.to_string_lossy())?;
                }
                Ok(())
            }
            Self::Shell(line) => f.write_str(line),
        }
    }
}
