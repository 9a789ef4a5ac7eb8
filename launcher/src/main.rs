//! Build launcher for MyOpenGLApp.
//!
//! Detects the host, hands off to the matching script under `scripts/`, and
//! with `--run` starts the freshly built program from `build/`.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

use clap::Parser;

mod app;
mod artifact;
mod cli;
mod command;
mod config;
mod error;
mod exec;
mod platform;
mod script;
mod term;

fn main() {
    let cli = crate::cli::Cli::parse();
    init_logging(cli.verbose);
    std::process::exit(crate::app::run(&cli));
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}
