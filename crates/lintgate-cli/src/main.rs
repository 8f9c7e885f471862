//! Lintgate CLI application
//!
//! Runs the built-in line rules over the given sources, writes the requested
//! reports and exits with a code describing the outcome of the run.
//!
//! # Exit codes
//!
//! | Code | Meaning                                |
//! |------|----------------------------------------|
//! | 0    | success                                |
//! | 1    | no rule could be loaded                |
//! | 2    | unknown report type                    |
//! | 3    | error while processing the sources     |
//! | 4    | error while writing a report           |
//! | 5    | violations exceed a priority threshold |
//! | 6    | some sources could not be analyzed     |
//! | 7    | invalid arguments or configuration     |

mod args;

use anyhow::{Result, anyhow};
use args::Cli;
use clap::Parser;
use clap::error::ErrorKind;
use colored::Colorize;
use lintgate_core::exit_code::{EXIT_CONFIGURATION_ERROR, EXIT_SUCCESS};
use lintgate_core::{Driver, DriverError, ExitCodeResolver, RulesetAnalyzer, RunOutcome};
use std::io;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp
                | ErrorKind::DisplayVersion
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => EXIT_SUCCESS,
                _ => EXIT_CONFIGURATION_ERROR,
            };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    if let Err(err) = init_logging(cli.verbose) {
        eprintln!("{} {:#}", "lintgate: error:".red(), err);
        std::process::exit(EXIT_CONFIGURATION_ERROR);
    }

    let outcome = run(cli).await;

    let mut stderr = io::stderr().lock();
    let code = match ExitCodeResolver::write_diagnostics(&outcome, &mut stderr) {
        Ok(exit) => exit.code(),
        Err(_) => ExitCodeResolver::resolve(&outcome).code(),
    };
    drop(stderr);

    tracing::debug!(code, "exiting");
    std::process::exit(code);
}

async fn run(cli: Cli) -> RunOutcome {
    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(err) => return RunOutcome::failed(DriverError::from(err)),
    };
    tracing::debug!(?config, "configuration resolved");

    let analyzer = RulesetAnalyzer::from_config(cli.sources.clone(), &config);
    let driver = Driver::new(config);

    // Listing only, nothing to analyze
    if cli.sources.is_empty() {
        return match driver.prepare() {
            Ok(prepared) => {
                driver.list_rules(&prepared.rules);
                RunOutcome::default()
            }
            Err(err) => RunOutcome::failed(err),
        };
    }

    driver.run(&analyzer).await.outcome
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`
///
/// Fatal run errors are reported once by the exit diagnostics, so the quiet
/// default only lets log errors through.
fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid log filter: {}", e))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {}", e))
}
