//! Money-back guarantee check
//!
//! Runs the aukro.cz money-back guarantee scenario against a remote
//! WebDriver endpoint and reports the outcome.

use clap::Parser;
use guarantee_check::cli;
use guarantee_check::commands::Commands;
use guarantee_check::common::logging;

#[derive(Parser)]
#[command(name = "guarantee-check", about = "Money-back guarantee browser scenario")]
#[command(version, long_about = None)]
struct Cli {
    /// Debug-level logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init_cli(cli.verbose);

    if let Err(e) = cli::dispatch(cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
