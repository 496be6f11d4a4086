//! Configuration file handling

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use super::paths::config_path;
use super::{Error, Result};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Remote browser endpoint settings
    #[serde(default)]
    pub webdriver: WebDriverConfig,

    /// Target site settings
    #[serde(default)]
    pub site: SiteConfig,

    /// Wait settings
    #[serde(default)]
    pub timeouts: Timeouts,
}

/// Browser requested from the remote endpoint
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BrowserKind {
    #[default]
    Chrome,
    Firefox,
}

impl FromStr for BrowserKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "chrome" | "chromium" => Ok(Self::Chrome),
            "firefox" => Ok(Self::Firefox),
            other => Err(Error::Config(format!(
                "Unknown browser '{}'. Supported browsers: 'chrome', 'firefox'",
                other
            ))),
        }
    }
}

impl fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chrome => write!(f, "chrome"),
            Self::Firefox => write!(f, "firefox"),
        }
    }
}

/// Remote WebDriver endpoint configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebDriverConfig {
    /// Address of the remote-control endpoint (Selenium hub or driver)
    #[serde(default = "default_webdriver_url")]
    pub url: String,

    /// Browser to request
    #[serde(default)]
    pub browser: BrowserKind,

    /// Run the browser without a visible window
    #[serde(default)]
    pub headless: bool,
}

impl Default for WebDriverConfig {
    fn default() -> Self {
        Self {
            url: default_webdriver_url(),
            browser: BrowserKind::default(),
            headless: false,
        }
    }
}

fn default_webdriver_url() -> String {
    "http://127.0.0.1:4444/wd/hub".to_string()
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    /// Landing page URL
    #[serde(default = "default_site_url")]
    pub url: String,

    /// Filtered offer count a category needs before its offers are checked
    #[serde(default = "default_min_offers")]
    pub min_offers: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: default_site_url(),
            min_offers: default_min_offers(),
        }
    }
}

fn default_site_url() -> String {
    "https://aukro.cz".to_string()
}

fn default_min_offers() -> u64 {
    5
}

/// Wait settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Timeouts {
    /// Interval between condition checks
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    /// Bound for every wait without a specific override
    #[serde(default = "default_wait")]
    pub default_secs: u64,

    /// Bound for the data consent dialog
    #[serde(default = "default_consent")]
    pub consent_secs: u64,

    /// Bound for the newsletter popup, which shows up after ~30s
    #[serde(default = "default_newsletter")]
    pub newsletter_secs: u64,

    /// Bound for each bid/buy capability probe
    #[serde(default = "default_probe")]
    pub probe_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval(),
            default_secs: default_wait(),
            consent_secs: default_consent(),
            newsletter_secs: default_newsletter(),
            probe_secs: default_probe(),
        }
    }
}

fn default_poll_interval() -> u64 {
    250
}
fn default_wait() -> u64 {
    10
}
fn default_consent() -> u64 {
    10
}
fn default_newsletter() -> u64 {
    60
}
fn default_probe() -> u64 {
    5
}

impl Timeouts {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn default_wait(&self) -> Duration {
        Duration::from_secs(self.default_secs)
    }

    pub fn consent(&self) -> Duration {
        Duration::from_secs(self.consent_secs)
    }

    pub fn newsletter(&self) -> Duration {
        Duration::from_secs(self.newsletter_secs)
    }

    pub fn probe(&self) -> Duration {
        Duration::from_secs(self.probe_secs)
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Default)]
pub struct Overrides {
    pub webdriver_url: Option<String>,
    pub target_url: Option<String>,
    pub browser: Option<BrowserKind>,
    pub headless: Option<bool>,
}

impl Config {
    /// Load configuration
    ///
    /// An explicit path must exist. Without one, the default config file is
    /// used if present, otherwise built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Some(path) = config_path() {
            if path.exists() {
                return Self::from_file(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load configuration from a specific TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        let config: Self =
            toml::from_str(&content).map_err(|e| Error::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line and environment overrides on top of the file
    pub fn apply(&mut self, overrides: Overrides) -> Result<()> {
        if let Some(url) = overrides.webdriver_url {
            self.webdriver.url = url;
        }
        if let Some(url) = overrides.target_url {
            self.site.url = url;
        }
        if let Some(browser) = overrides.browser {
            self.webdriver.browser = browser;
        }
        if let Some(headless) = overrides.headless {
            self.webdriver.headless = headless;
        }
        self.validate()
    }

    fn validate(&self) -> Result<()> {
        if self.webdriver.url.trim().is_empty() {
            return Err(Error::Config("webdriver.url must not be empty".to_string()));
        }
        if self.site.url.trim().is_empty() {
            return Err(Error::Config("site.url must not be empty".to_string()));
        }
        if self.timeouts.poll_interval_ms == 0 {
            return Err(Error::Config(
                "timeouts.poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }
}
