//! CLI entry point: reads a program file, runs it against real stdin/stdout,
//! and maps load failures and traps onto process exit codes.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use um::interpreter::Interpreter;
use um::loader;

/// Run a Universal Machine program.
#[derive(Debug, Parser)]
#[command(name = "um", version, about)]
struct Cli {
    /// Path to the program file (a stream of big-endian 32-bit words).
    program: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let bytes = match std::fs::read(&cli.program) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("um: failed to read {}: {err}", cli.program.display());
            return ExitCode::FAILURE;
        }
    };

    let program = match loader::load(&bytes) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("um: {err}");
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut machine = Interpreter::new(program, stdin.lock(), stdout.lock());

    match machine.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(trap) => {
            eprintln!("um: {trap}");
            ExitCode::FAILURE
        }
    }
}
