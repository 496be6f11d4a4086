//! CLI command handling
//!
//! Runs the scenario and formats its report.

use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::browser::RemoteBrowser;
use crate::commands::Commands;
use crate::common::config::{BrowserKind, Config, Overrides};
use crate::common::{paths, Error, Result};
use crate::scenario::{run_scenario, FlowOutcome, ScenarioReport};

/// Dispatch a CLI command
pub async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run {
            config,
            webdriver_url,
            target_url,
            browser,
            headless,
            seed,
            json,
        } => {
            let mut cfg = Config::load(config.as_deref())?;
            cfg.apply(Overrides {
                webdriver_url,
                target_url,
                browser: browser.as_deref().map(str::parse::<BrowserKind>).transpose()?,
                headless,
            })?;

            let seed = seed.unwrap_or_else(rand::random);
            tracing::info!(seed, "Seeded offer selection");
            let mut rng = StdRng::seed_from_u64(seed);

            if !json {
                println!(
                    "\n{} {}",
                    "Running Scenario:".blue().bold(),
                    "money-back guarantee".white().bold()
                );
                println!("  {}", cfg.site.url.dimmed());
            }

            let browser = RemoteBrowser::connect(&cfg.webdriver).await?;
            let report = run_scenario(&browser, &cfg, &mut rng).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&report.to_json())?);
            } else {
                print_report(&report);
            }

            if report.passed {
                Ok(())
            } else {
                Err(Error::ScenarioFailed)
            }
        }

        Commands::Config { config, path } => {
            if path {
                match config.or_else(paths::config_path) {
                    Some(p) => println!("{}", p.display()),
                    None => println!("No configuration directory on this platform"),
                }
                return Ok(());
            }

            let cfg = Config::load(config.as_deref())?;
            print!("{}", cfg.to_toml()?);
            Ok(())
        }
    }
}

fn print_report(report: &ScenarioReport) {
    let tick = "✓".green();

    if !report.categories_visited.is_empty() {
        println!(
            "  {} Categories tried: {}",
            tick,
            report.categories_visited.join(", ").dimmed()
        );
    }

    match &report.category {
        Some(category) => println!(
            "  {} Category {} lists {} guaranteed offers",
            tick,
            category.name.white().bold(),
            category.offer_count
        ),
        None if report.passed => println!(
            "  {} {}",
            "!".yellow(),
            "No category had enough guaranteed offers".yellow()
        ),
        None => {}
    }

    if let Some(line) = listing_line(report) {
        println!("{}", line);
    }

    if let Some(index) = report.selected_offer {
        println!("  {} Opened offer #{}", tick, index);
    }

    if let Some(capability) = report.capability {
        println!("  {} Offer supports {}", tick, capability);
    }

    match &report.flow {
        Some(FlowOutcome::Bid { current_price, bid }) => println!(
            "  {} Bid {} on {} Kč reached the login page",
            tick, bid, current_price
        ),
        Some(FlowOutcome::Buy { name, price }) => println!(
            "  {} Basket shows {} for {}",
            tick,
            name.white(),
            price
        ),
        None => {}
    }

    match &report.failure {
        None => println!("\n{} {}\n", "✓".green().bold(), "Scenario Passed".green().bold()),
        Some(e) => {
            println!("  {} {}", "✗".red(), e);
            println!("\n{} {}\n", "✗".red().bold(), "Scenario Failed".red().bold());
        }
    }
}

/// Summary of the listing badge check, marked failed when any card lacked
/// the badge
fn listing_line(report: &ScenarioReport) -> Option<String> {
    if report.offers_checked == 0 {
        return None;
    }
    Some(match &report.failure {
        Some(Error::SoftAssertions(missing)) => format!(
            "  {} Listing badges missing on {} of {} offers",
            "✗".red(),
            missing.len(),
            report.offers_checked
        ),
        _ => format!(
            "  {} Listing badges checked on {} offers",
            "✓".green(),
            report.offers_checked
        ),
    })
}
