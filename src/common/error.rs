//! Error types for the guarantee check
//!
//! Hard failures abort the scenario. Timeouts raised by capability probes are
//! the one exception: the runner downgrades them to "action not available".

use std::time::Duration;

use fantoccini::error::{CmdError, ErrorStatus};
use thiserror::Error;
use thirtyfour::error::WebDriverError;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the guarantee check
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Remote Browser Errors ===
    #[error("WebDriver error: {0}")]
    WebDriver(#[from] WebDriverError),

    #[error("Element is no longer attached to the page: {0}")]
    StaleElement(String),

    // === Wait Errors ===
    #[error("Timed out after {}ms waiting for {what}", .waited.as_millis())]
    WaitTimeout { what: String, waited: Duration },

    // === Assertion Errors ===
    #[error("Assertion failed: {0}")]
    Assertion(String),

    #[error("{} soft assertion(s) failed:\n  {}", .0.len(), .0.join("\n  "))]
    SoftAssertions(Vec<String>),

    #[error("Scenario failed")]
    ScenarioFailed,

    // === Value Errors ===
    #[error("Could not read {what} from '{text}'")]
    Parse { what: &'static str, text: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a wait timeout error
    pub fn wait_timeout(what: &str, waited: Duration) -> Self {
        Self::WaitTimeout {
            what: what.to_string(),
            waited,
        }
    }

    /// Create a parse error for a value read from the page
    pub fn parse(what: &'static str, text: &str) -> Self {
        Self::Parse {
            what,
            text: text.to_string(),
        }
    }

    /// Whether this is a bounded wait running out
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::WaitTimeout { .. })
    }

    /// Errors a polling wait keeps retrying through instead of failing on
    pub fn is_transient(&self) -> bool {
        match self {
            Self::StaleElement(_) => true,
            // The driver reports stale handles as either of these
            Self::WebDriver(WebDriverError::NoSuchElement(_)) => true,
            Self::WebDriver(WebDriverError::CmdError(CmdError::Standard(e))) => {
                matches!(e.error, ErrorStatus::StaleElementReference)
            }
            _ => false,
        }
    }
}
