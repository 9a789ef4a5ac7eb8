//! Project layout: where the build scripts live and where the build drops
//! the program.
//!
//! Defaults match the repository layout. A `launcher.json` next to
//! `scripts/` can override any of the three entries.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "launcher.json";

const DEFAULT_SCRIPTS_DIR: &str = "scripts";
const DEFAULT_BUILD_DIR: &str = "build";
const DEFAULT_EXECUTABLE: &str = "MyOpenGLApp";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Layout {
    /// Directory holding `build.sh`, `build.ps1` and `build.bat`, relative to the project root.
    pub scripts_dir: PathBuf,
    /// Directory the build scripts write the program into.
    pub build_dir: PathBuf,
    /// Program base name, without the Windows `.exe` suffix.
    pub executable: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            scripts_dir: PathBuf::from(DEFAULT_SCRIPTS_DIR),
            build_dir: PathBuf::from(DEFAULT_BUILD_DIR),
            executable: DEFAULT_EXECUTABLE.to_string(),
        }
    }
}

impl Layout {
    /// Reads `<root>/launcher.json`, falling back to the defaults when it is absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }

        let contents =
            fs::read_to_string(&path).with_context(|| format!("Reading {}", path.display()))?;
        let layout = serde_json::from_str(&contents)
            .with_context(|| format!("Parsing {}", path.display()))?;
        log::debug!("loaded layout from {}: {layout:?}", path.display());
        Ok(layout)
    }

    pub fn script(&self, file_name: &str) -> PathBuf {
        self.scripts_dir.join(file_name)
    }
}

/// Resolves the directory everything else is relative to, as an absolute path.
///
/// Children run with this as their working directory, so a relative root would
/// be applied twice when the built program is started.
pub fn project_root(explicit: Option<&Path>) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("Resolving the current directory")?;
    let Some(dir) = explicit else {
        return Ok(cwd);
    };

    let root = if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        cwd.join(dir)
    };
    if !root.is_dir() {
        anyhow::bail!("Project directory does not exist: {}", dir.display());
    }
    Ok(root)
}
