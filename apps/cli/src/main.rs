//! # haul Entry Point
//!
//! Parses arguments, runs the command and turns a `CliError` into an exit
//! status. Usage errors are reported by clap (status 2).

use std::process::ExitCode;

use clap::Parser;
use haul_cli::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    haul_cli::init_tracing();

    match haul_cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(e.code.exit_code())
        }
    }
}
