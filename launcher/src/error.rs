//! Terminal failures and the exit status each one maps to.

use std::io;
use std::path::PathBuf;

use crate::command::CommandSpec;

/// Status used for every failure that does not come from a child.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum Failure {
    #[error("Unsupported operating system '{0}'.")]
    UnsupportedSystem(String),

    #[error("Build script not found: {}", .0.display())]
    ScriptMissing(PathBuf),

    /// The build script ran and exited non-zero (or was killed).
    #[error("Failed to run: {command}")]
    BuildFailed { command: CommandSpec, code: i32 },

    /// The child could not be started at all.
    #[error("Failed to run: {command} ({source})")]
    Spawn {
        command: CommandSpec,
        #[source]
        source: io::Error,
    },

    #[error("Running the program is not supported on this system.")]
    RunUnsupported,

    #[error("Executable not found: {}", .0.display())]
    ExecutableMissing(PathBuf),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Failure {
    /// Process exit status for this failure. Build failures hand back the child's own status.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::BuildFailed { code, .. } => *code,
            _ => EXIT_FAILURE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_failure_propagates_child_status() {
        let failure = Failure::BuildFailed {
            command: CommandSpec::new("bash").arg("scripts/build.sh"),
            code: 42,
        };
        assert_eq!(failure.exit_code(), 42);
        assert_eq!(failure.to_string(), "Failed to run: bash scripts/build.sh");
    }

    #[test]
    fn test_other_failures_exit_one() {
        assert_eq!(Failure::UnsupportedSystem("plan9".into()).exit_code(), 1);
        assert_eq!(Failure::RunUnsupported.exit_code(), 1);
        assert_eq!(Failure::ExecutableMissing(PathBuf::from("build/MyOpenGLApp")).exit_code(), 1);
        assert_eq!(Failure::Other(anyhow::anyhow!("bad config")).exit_code(), 1);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            Failure::UnsupportedSystem("plan9".into()).to_string(),
            "Unsupported operating system 'plan9'."
        );
        let missing = Failure::ExecutableMissing(PathBuf::from("build").join("MyOpenGLApp"));
        assert!(missing.to_string().starts_with("Executable not found: build"));
    }
}
