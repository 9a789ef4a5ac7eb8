use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "launcher", version)]
#[command(about = "Builds MyOpenGLApp with the platform build script, then optionally runs it")]
#[command(args_override_self = true)]
pub struct Cli {
    /// Run the built executable after a successful build.
    #[arg(long)]
    pub run: bool,

    /// Forward `--debug` to the build script.
    #[arg(long)]
    pub debug: bool,

    /// Project root holding `scripts/` and `build/`. Defaults to the current directory.
    #[arg(short = 'C', long = "project-dir", value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// Never colour status lines (`NO_COLOR` is honoured as well).
    #[arg(long)]
    pub no_color: bool,

    /// Print diagnostic logging (overridden by `RUST_LOG`).
    #[arg(short, long)]
    pub verbose: bool,

    /// Anything else on the command line. Ignored, apart from `--run`/`--debug` landing here.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    pub rest: Vec<OsString>,
}

impl Cli {
    /// `--run` and `--debug` count wherever they appear, including after an ignored argument.
    pub fn flags(&self) -> Flags {
        Flags {
            run: self.run || self.passed("--run"),
            debug: self.debug || self.passed("--debug"),
        }
    }

    fn passed(&self, flag: &str) -> bool {
        self.rest.iter().any(|a| a == flag)
    }
}

/// The two switches that shape a launch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flags {
    pub run: bool,
    pub debug: bool,
}
