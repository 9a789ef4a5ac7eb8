//! Where the build leaves the program.

use std::path::PathBuf;

use crate::config::Layout;
use crate::error::Failure;
use crate::platform::Platform;

const WINDOWS_SUFFIX: &str = ".exe";

/// Expected program path relative to the project root.
pub fn executable_path(platform: &Platform, layout: &Layout) -> Result<PathBuf, Failure> {
    match platform {
        Platform::Windows => {
            let name = &layout.executable;
            // A configured name that already carries `.exe` must not become `.exe.exe`.
            if name.to_ascii_lowercase().ends_with(WINDOWS_SUFFIX) {
                Ok(layout.build_dir.join(name))
            } else {
                Ok(layout.build_dir.join(format!("{name}{WINDOWS_SUFFIX}")))
            }
        }
        p if p.is_posix() => Ok(layout.build_dir.join(&layout.executable)),
        _ => Err(Failure::RunUnsupported),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_windows_adds_exe() {
        let path = executable_path(&Platform::Windows, &Layout::default()).unwrap();
        assert_eq!(path, Path::new("build").join("MyOpenGLApp.exe"));
    }

    #[test]
    fn test_windows_no_double_suffix() {
        let layout = Layout {
            executable: "MyOpenGLApp.EXE".to_string(),
            ..Layout::default()
        };
        let path = executable_path(&Platform::Windows, &layout).unwrap();
        assert_eq!(path, Path::new("build").join("MyOpenGLApp.EXE"));
    }

    #[test]
    fn test_posix_bare_name() {
        for platform in [Platform::Linux, Platform::Darwin, Platform::Wsl] {
            let path = executable_path(&platform, &Layout::default()).unwrap();
            assert_eq!(path, Path::new("build").join("MyOpenGLApp"));
        }
    }

    #[test]
    fn test_unsupported() {
        let err = executable_path(&Platform::Unsupported("aix".into()), &Layout::default());
        assert!(matches!(err, Err(Failure::RunUnsupported)));
    }
}
