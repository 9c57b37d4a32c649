//! # Takeoff CLI Application
//!
//! Command-line front end for `takeoff_core`: batch estimates from parameter
//! files, an interactive prompt session, and template token export for
//! modeling-tool scripts.

mod cli;
mod commands;
mod error;
mod logging;
mod prompt;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, Result};
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\nError: {}", e);
        if let Some(core) = e.core() {
            if let Ok(json) = serde_json::to_string_pretty(core) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
        }
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    info!("Takeoff CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    if let Some(num_threads) = cli.threads {
        info!("Setting Rayon global thread pool to {} threads.", num_threads);
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| CliError::Argument(format!("Failed to build global thread pool: {}", e)))?;
    }

    let stdout = std::io::stdout();
    let result = match cli.command {
        Commands::Estimate(args) => {
            info!("Dispatching to 'estimate' command.");
            commands::estimate::run(args, &mut stdout.lock())
        }
        Commands::Interactive(args) => {
            info!("Dispatching to 'interactive' command.");
            commands::interactive::run(args)
        }
        Commands::Tokens(args) => {
            info!("Dispatching to 'tokens' command.");
            commands::tokens::run(args, &mut stdout.lock())
        }
    };

    match &result {
        Ok(()) => info!("Command completed successfully."),
        Err(e) => error!("Command failed: {}", e),
    }
    result
}
