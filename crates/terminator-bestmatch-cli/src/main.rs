//! bestmatch CLI
//!
//! Works on JSON snapshots of a window's accessibility tree.
//!
//! Usage from workspace root:
//!   cargo run --bin bestmatch -- inspect window.json -o output.txt
//!   cargo run --bin bestmatch -- resolve window.json lblNewItemEdit Button_Minimize
//!   cargo run --bin bestmatch -- resolve window.json Button_Minimise --cutoff 0.8
//!   cargo run --bin bestmatch -- candidates window.json
//!   cargo run --bin bestmatch -- relative window.json lblNewItem.Edit

use crate::cli::{Cli, Commands};
use crate::command::{handle_candidates, handle_inspect, handle_relative, handle_resolve};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod command;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Inspect(args) => handle_inspect(args).map(|()| true),
        Commands::Resolve(args) => handle_resolve(args),
        Commands::Candidates(args) => handle_candidates(args).map(|()| true),
        Commands::Relative(args) => handle_relative(args),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
