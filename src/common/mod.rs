//! Common utilities shared by the CLI and the scenario

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;

pub use error::{Error, Result};

/// Remove ASCII and no-break spaces, as used for thousands separators
pub fn strip_spaces(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, ' ' | '\u{a0}' | '\u{202f}'))
        .collect()
}
