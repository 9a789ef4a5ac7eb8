//! The launch sequence: detect, build, and optionally run.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::artifact::executable_path;
use crate::cli::{Cli, Flags};
use crate::command::CommandSpec;
use crate::config::{project_root, Layout};
use crate::error::{Failure, EXIT_FAILURE};
use crate::exec::{Runner, SystemRunner};
use crate::platform::HostEnv;
use crate::script::{ensure_executable, BuildScript};
use crate::term::{Palette, Reporter};

/// Runs the launcher and returns the process exit status.
pub fn run(cli: &Cli) -> i32 {
    let mut reporter = Reporter::stderr(Palette::resolve(cli.no_color));

    let result = Launch::prepare(cli).and_then(|launch| {
        launch.execute(&mut SystemRunner, &mut reporter)
    });

    match result {
        Ok(()) => 0,
        Err(failure) => {
            reporter.error(format_args!("{failure:#}"));
            failure.exit_code()
        }
    }
}

/// Everything a launch needs, resolved up front.
#[derive(Debug)]
pub struct Launch {
    pub flags: Flags,
    pub root: PathBuf,
    pub layout: Layout,
    pub host: HostEnv,
}

impl Launch {
    fn prepare(cli: &Cli) -> Result<Self, Failure> {
        let root = project_root(cli.project_dir.as_deref())?;
        let layout = Layout::load(&root)?;
        let host = HostEnv::probe();
        log::debug!("project root {}, platform {}", root.display(), host.platform);

        Ok(Self {
            flags: cli.flags(),
            root,
            layout,
            host,
        })
    }

    pub fn execute<R, W>(&self, runner: &mut R, reporter: &mut Reporter<W>) -> Result<(), Failure>
    where
        R: Runner,
        W: Write,
    {
        let script = BuildScript::select(&self.host, &self.layout)?;
        log::debug!("selected {script:?}");
        if matches!(script, BuildScript::Posix(_)) {
            self.prepare_posix_script(script.path(), reporter)?;
        }

        let command = script.command(self.flags.debug);
        self.build(&command, runner, reporter)?;

        if self.flags.run {
            self.run_program(runner, reporter)?;
        }
        Ok(())
    }

    fn prepare_posix_script<W: Write>(
        &self,
        script: &Path,
        reporter: &mut Reporter<W>,
    ) -> Result<(), Failure> {
        let full = self.root.join(script);
        if !full.is_file() {
            return Err(Failure::ScriptMissing(script.to_path_buf()));
        }
        if ensure_executable(&full)? {
            reporter.info(format_args!("Applied chmod +x to {}", script.display()));
        }
        Ok(())
    }

    fn build<R: Runner, W: Write>(
        &self,
        command: &CommandSpec,
        runner: &mut R,
        reporter: &mut Reporter<W>,
    ) -> Result<(), Failure> {
        reporter.info(format_args!("Running: {command}"));
        match runner.run(command, &self.root) {
            Ok(Some(0)) => Ok(()),
            Ok(code) => Err(Failure::BuildFailed {
                command: command.clone(),
                code: code.unwrap_or(EXIT_FAILURE),
            }),
            Err(source) => Err(Failure::Spawn {
                command: command.clone(),
                source,
            }),
        }
    }

    fn run_program<R: Runner, W: Write>(
        &self,
        runner: &mut R,
        reporter: &mut Reporter<W>,
    ) -> Result<(), Failure> {
        let exe = executable_path(&self.host.platform, &self.layout)?;
        let full = self.root.join(&exe);
        if !full.is_file() {
            return Err(Failure::ExecutableMissing(exe));
        }

        reporter.info(format_args!("Running program: {}", exe.display()));
        let command = CommandSpec::new(&full);
        match runner.run(&command, &self.root) {
            Ok(code) => {
                log::debug!("{} exited with {code:?}", exe.display());
                Ok(())
            }
            Err(source) => Err(Failure::Spawn { command, source }),
        }
    }
}
