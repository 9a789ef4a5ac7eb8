//! Build script selection.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::command::CommandSpec;
use crate::config::Layout;
use crate::error::Failure;
use crate::platform::{HostEnv, Platform};

pub const POSIX_SCRIPT: &str = "build.sh";
pub const POWERSHELL_SCRIPT: &str = "build.ps1";
pub const BATCH_SCRIPT: &str = "build.bat";

const DEBUG_FLAG: &str = "--debug";

/// The script to hand the build to, with its path relative to the project root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuildScript {
    /// `host` is the PowerShell executable found on PATH.
    PowerShell { host: PathBuf, script: PathBuf },
    /// Fallback when Windows has no PowerShell on PATH.
    Batch(PathBuf),
    Posix(PathBuf),
}

impl BuildScript {
    pub fn select(host: &HostEnv, layout: &Layout) -> Result<Self, Failure> {
        match &host.platform {
            Platform::Windows => match &host.powershell {
                Some(exe) => Ok(Self::PowerShell {
                    host: exe.clone(),
                    script: layout.script(POWERSHELL_SCRIPT),
                }),
                None => Ok(Self::Batch(layout.script(BATCH_SCRIPT))),
            },
            Platform::Linux | Platform::Darwin | Platform::Wsl => {
                Ok(Self::Posix(layout.script(POSIX_SCRIPT)))
            }
            Platform::Unsupported(os) => Err(Failure::UnsupportedSystem(os.clone())),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::PowerShell { script: p, .. } | Self::Batch(p) | Self::Posix(p) => p,
        }
    }

    pub fn command(&self, debug: bool) -> CommandSpec {
        let spec = match self {
            Self::PowerShell { host, script } => CommandSpec::new(host)
                .shown_as("powershell")
                .args(["-ExecutionPolicy", "Bypass", "-File"])
                .arg(script),
            Self::Batch(script) => CommandSpec::shell(format!("\"{}\"", script.display())),
            Self::Posix(script) => CommandSpec::new("bash").arg(script),
        };
        if debug {
            spec.arg(DEBUG_FLAG)
        } else {
            spec
        }
    }
}

/// Sets the owner/group/other execute bits on `path` if any are missing.
///
/// Returns whether the mode changed. A no-op off unix.
pub fn ensure_executable(path: &Path) -> Result<bool> {
    #[cfg(unix)]
    {
        use anyhow::Context;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        let mut perms = fs::metadata(path)
            .with_context(|| format!("Reading permissions of {}", path.display()))?
            .permissions();
        let mode = perms.mode();
        if mode & 0o111 == 0o111 {
            return Ok(false);
        }
        perms.set_mode(mode | 0o111);
        fs::set_permissions(path, perms)
            .with_context(|| format!("Marking {} executable", path.display()))?;
        Ok(true)
    }

    #[cfg(not(unix))]
    {
        let _ = path;
        Ok(false)
    }
}
