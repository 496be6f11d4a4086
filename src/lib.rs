//! Money-back guarantee check
//!
//! An end-to-end browser scenario for the aukro.cz money-back guarantee
//! filter and badge, driven through a remote WebDriver endpoint.

pub mod browser;
pub mod cli;
pub mod commands;
pub mod common;
pub mod scenario;

// Re-export commonly used types for tests
pub use browser::{Browser, Element, Locator, Wait};
pub use common::config::Config;
pub use common::{Error, Result};
pub use scenario::{run_scenario, ScenarioReport};
