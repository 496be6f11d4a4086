//! CLI command definitions
//!
//! Defines the clap commands for the guarantee check CLI.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the money-back guarantee scenario against a remote browser
    Run {
        /// Configuration file (default: platform config dir)
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Remote WebDriver endpoint, e.g. http://selenium:4444/wd/hub
        #[arg(long, env = "GUARANTEE_WEBDRIVER_URL")]
        webdriver_url: Option<String>,

        /// Site to open
        #[arg(long, env = "GUARANTEE_TARGET_URL")]
        target_url: Option<String>,

        /// Browser to request: chrome or firefox
        #[arg(long, env = "GUARANTEE_BROWSER")]
        browser: Option<String>,

        /// Run the browser without a window (`--headless=false` to force a window)
        #[arg(
            long,
            env = "GUARANTEE_HEADLESS",
            num_args = 0..=1,
            default_missing_value = "true"
        )]
        headless: Option<bool>,

        /// Seed for offer selection and the bid/buy coin toss
        #[arg(long)]
        seed: Option<u64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration
    Config {
        /// Configuration file (default: platform config dir)
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Only print where the configuration file is looked up
        #[arg(long)]
        path: bool,
    },
}
