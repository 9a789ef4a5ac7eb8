//! Host detection.
//!
//! Everything environment-dependent is read once into a [`HostProbe`] and
//! then reduced to a [`Platform`]. The WSL check is a hint only: it reads the
//! kernel release (or `WSL_DISTRO_NAME`) and never overrides a native
//! windows/linux/darwin answer in a way that changes the chosen script.

use std::env;
use std::fmt;
use std::fs;
use std::path::PathBuf;

const KERNEL_RELEASE: &str = "/proc/sys/kernel/osrelease";

/// Raw facts about the host, captured once at startup.
#[derive(Clone, Debug, Default)]
pub struct HostProbe {
    /// `std::env::consts::OS` of the running binary.
    pub os: String,
    pub kernel_release: Option<String>,
    pub wsl_distro: Option<String>,
}

impl HostProbe {
    pub fn current() -> Self {
        let os = env::consts::OS.to_string();
        let kernel_release = if os == "windows" {
            None
        } else {
            fs::read_to_string(KERNEL_RELEASE)
                .ok()
                .map(|s| s.trim().to_string())
        };
        let wsl_distro = env::var("WSL_DISTRO_NAME").ok().filter(|s| !s.is_empty());

        Self {
            os,
            kernel_release,
            wsl_distro,
        }
    }

    fn looks_like_wsl(&self) -> bool {
        self.wsl_distro.is_some()
            || self
                .kernel_release
                .as_deref()
                .is_some_and(|r| r.to_lowercase().contains("microsoft"))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Linux,
    Darwin,
    /// Linux userland on a Windows kernel. Builds like Linux.
    Wsl,
    /// Anything else, carrying the OS name for the error message.
    Unsupported(String),
}

impl Platform {
    pub fn detect(probe: &HostProbe) -> Self {
        match probe.os.as_str() {
            "windows" => Self::Windows,
            _ if probe.looks_like_wsl() => Self::Wsl,
            "linux" => Self::Linux,
            "macos" | "darwin" => Self::Darwin,
            other => Self::Unsupported(other.to_string()),
        }
    }

    /// Hosts that build through `scripts/build.sh`.
    pub fn is_posix(&self) -> bool {
        matches!(self, Self::Linux | Self::Darwin | Self::Wsl)
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Windows => "windows",
            Self::Linux => "linux",
            Self::Darwin => "darwin",
            Self::Wsl => "wsl",
            Self::Unsupported(os) => os,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolved host facts handed to the build and run steps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostEnv {
    pub platform: Platform,
    /// Location of `powershell` on PATH. Only probed on Windows.
    pub powershell: Option<PathBuf>,
}

impl HostEnv {
    pub fn probe() -> Self {
        let probe = HostProbe::current();
        let platform = Platform::detect(&probe);
        log::debug!("host probe: {probe:?} -> {platform}");

        let powershell = if platform == Platform::Windows {
            let found = which::which("powershell").ok();
            log::debug!("powershell on PATH: {found:?}");
            found
        } else {
            None
        };

        Self {
            platform,
            powershell,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe(os: &str) -> HostProbe {
        HostProbe {
            os: os.to_string(),
            ..HostProbe::default()
        }
    }

    #[test]
    fn test_native_families() {
        assert_eq!(Platform::detect(&probe("windows")), Platform::Windows);
        assert_eq!(Platform::detect(&probe("linux")), Platform::Linux);
        assert_eq!(Platform::detect(&probe("macos")), Platform::Darwin);
    }

    #[test]
    fn test_unknown_os_is_unsupported() {
        let p = Platform::detect(&probe("freebsd"));
        assert_eq!(p, Platform::Unsupported("freebsd".to_string()));
        assert!(!p.is_posix());
        assert_eq!(p.to_string(), "freebsd");
    }

    #[test]
    fn test_wsl_kernel_release() {
        let p = Platform::detect(&HostProbe {
            os: "linux".to_string(),
            kernel_release: Some("5.15.153.1-Microsoft-standard-WSL2".to_string()),
            wsl_distro: None,
        });
        assert_eq!(p, Platform::Wsl);
        assert!(p.is_posix());
    }

    #[test]
    fn test_wsl_hint_rescues_unknown_os() {
        let p = Platform::detect(&HostProbe {
            os: "unknown".to_string(),
            kernel_release: None,
            wsl_distro: Some("Ubuntu".to_string()),
        });
        assert_eq!(p, Platform::Wsl);
    }

    #[test]
    fn test_plain_linux_kernel_is_not_wsl() {
        let p = Platform::detect(&HostProbe {
            os: "linux".to_string(),
            kernel_release: Some("6.8.0-45-generic".to_string()),
            wsl_distro: None,
        });
        assert_eq!(p, Platform::Linux);
    }

    #[test]
    fn test_windows_ignores_wsl_hint() {
        let p = Platform::detect(&HostProbe {
            os: "windows".to_string(),
            kernel_release: None,
            wsl_distro: Some("Ubuntu".to_string()),
        });
        assert_eq!(p, Platform::Windows);
    }

    #[test]
    fn test_current_host_is_recognised() {
        let p = Platform::detect(&HostProbe::current());
        if cfg!(any(target_os = "linux", target_os = "macos")) {
            assert!(p.is_posix());
        }
        if cfg!(windows) {
            assert_eq!(p, Platform::Windows);
        }
    }
}
