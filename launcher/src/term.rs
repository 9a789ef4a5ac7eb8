//! Status lines on stderr.
//!
//! Colour is decided once into a [`Palette`] and handed to the [`Reporter`];
//! nothing else looks at the terminal.

use std::fmt::Display;
use std::io::{self, IsTerminal, Write};
use std::sync::OnceLock;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub info: &'static str,
    pub error: &'static str,
    pub reset: &'static str,
}

impl Palette {
    /// Bold blue for info, bold red for errors.
    pub const ANSI: Self = Self {
        info: "\x1b[34m\x1b[1m",
        error: "\x1b[31m\x1b[1m",
        reset: "\x1b[0m",
    };

    pub const PLAIN: Self = Self {
        info: "",
        error: "",
        reset: "",
    };

    /// Picks the palette for this process's stderr.
    pub fn resolve(no_color: bool) -> Self {
        let no_color_env = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self::resolve_with(no_color, no_color_env, io::stderr().is_terminal())
    }

    /// Colour only for a terminal, and only when neither `--no-color` nor `NO_COLOR` is set.
    fn resolve_with(no_color: bool, no_color_env: bool, is_terminal: bool) -> Self {
        if no_color || no_color_env || !is_terminal {
            return Self::PLAIN;
        }
        if enable_ansi() {
            Self::ANSI
        } else {
            Self::PLAIN
        }
    }
}

/// Makes the console interpret ANSI escapes. Safe to call any number of times.
///
/// Returns whether escapes will render. Only legacy Windows consoles need any
/// work; everywhere else this is `true` without touching anything.
pub fn enable_ansi() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(enable_virtual_terminal)
}

#[cfg(windows)]
fn enable_virtual_terminal() -> bool {
    use windows_sys::Win32::Foundation::INVALID_HANDLE_VALUE;
    use windows_sys::Win32::System::Console::{
        GetConsoleMode, GetStdHandle, SetConsoleMode, ENABLE_PROCESSED_OUTPUT,
        ENABLE_VIRTUAL_TERMINAL_PROCESSING, STD_ERROR_HANDLE,
    };

    // SAFETY: plain console API calls on the process's own stderr handle; `mode`
    // outlives the call that writes it.
    unsafe {
        let handle = GetStdHandle(STD_ERROR_HANDLE);
        if handle.is_null() || handle == INVALID_HANDLE_VALUE {
            return false;
        }
        let mut mode: u32 = 0;
        if GetConsoleMode(handle, &mut mode) == 0 {
            return false;
        }
        if mode & ENABLE_VIRTUAL_TERMINAL_PROCESSING != 0 {
            return true;
        }
        let enabled = SetConsoleMode(
            handle,
            mode | ENABLE_PROCESSED_OUTPUT | ENABLE_VIRTUAL_TERMINAL_PROCESSING,
        ) != 0;
        log::debug!("virtual terminal processing enabled: {enabled}");
        enabled
    }
}

#[cfg(not(windows))]
fn enable_virtual_terminal() -> bool {
    true
}

/// Writes `[INFO]` / `[ERROR]` lines.
pub struct Reporter<W> {
    out: W,
    palette: Palette,
}

impl Reporter<io::Stderr> {
    pub fn stderr(palette: Palette) -> Self {
        Self::new(io::stderr(), palette)
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, palette: Palette) -> Self {
        Self { out, palette }
    }

    pub fn info(&mut self, message: impl Display) {
        self.line(self.palette.info, "INFO", message);
    }

    pub fn error(&mut self, message: impl Display) {
        self.line(self.palette.error, "ERROR", message);
    }

    fn line(&mut self, color: &str, tag: &str, message: impl Display) {
        let reset = self.palette.reset;
        // Nowhere left to report a failed write to stderr.
        let _ = writeln!(self.out, "{color}[{tag}] {message}{reset}");
        let _ = self.out.flush();
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}
