//! # goscript CLI Entry Point
//!
//! `goscript hello.go` builds `hello.go` if its cached binary is missing or
//! stale, then runs it. The process exits with the script's own exit code,
//! with the compiler's or linker's code when either fails, and with `2` on
//! any other fault.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use goscript::build::{Orchestrator, RunOptions};
use goscript::config::{self, BuildMode, Settings, ToolchainEnv};
use goscript::error::{FAULT_EXIT_CODE, RunError};
use goscript::process::ProcessRunner;
use goscript::ui::{self, Reporter};

#[derive(Parser)]
#[command(name = "goscript")]
#[command(about = "Run Go source files like scripts", version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Show cache decisions and the commands being executed
    #[arg(short, long)]
    verbose: bool,

    /// Compile a copy in a temporary directory instead of editing the script
    #[arg(long)]
    scratch: bool,

    /// Give the compiler and linker an empty stdin
    #[arg(long)]
    null_stdin: bool,

    /// Rebuild even if the cached binary is up to date
    #[arg(short, long)]
    force: bool,

    /// Script to run
    #[arg(num_args = 0..)]
    scripts: Vec<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    // Anything other than exactly one script is a request for help.
    if cli.scripts.len() != 1 {
        ui::usage("goscript");
        return;
    }

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(err) => {
            ui::fault(format!("{:#}", err));
            std::process::exit(FAULT_EXIT_CODE);
        }
    };
    let verbose = settings.verbose;

    let code = match run(&cli, settings) {
        Ok(code) => code,
        Err(err) => {
            // Compiler and linker already explained themselves on stderr.
            if verbose || !matches!(err, RunError::ToolFailure { .. }) {
                ui::fault(&err);
            }
            err.exit_code()
        }
    };
    std::process::exit(code);
}

/// User config file with command-line flags applied on top.
fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = config::load_settings().context("Could not load settings")?;
    if cli.scratch {
        settings.mode = BuildMode::Scratch;
    }
    settings.null_stdin |= cli.null_stdin;
    settings.verbose |= cli.verbose;
    Ok(settings)
}

fn run(cli: &Cli, settings: Settings) -> Result<i32, RunError> {
    let reporter = Reporter::new(settings.verbose);
    reporter.step(format!("Mode: {:?}", settings.mode));

    let options = RunOptions {
        settings,
        force: cli.force,
    };
    let mut orchestrator =
        Orchestrator::new(ProcessRunner::inherit(), ToolchainEnv::from_env(), options);
    orchestrator.run(&cli.scripts[0])
}
