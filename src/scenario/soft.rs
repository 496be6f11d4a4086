//! Soft assertions

use crate::common::{Error, Result};

/// Records failed checks and reports them together
#[derive(Debug, Default)]
pub struct SoftAssert {
    failures: Vec<String>,
}

impl SoftAssert {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` unless `condition` holds
    pub fn check(&mut self, condition: bool, message: impl Into<String>) {
        if !condition {
            let message = message.into();
            tracing::warn!("{}", message);
            self.failures.push(message);
        }
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// Fail with every recorded message, if any
    pub fn assert_all(self) -> Result<()> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(Error::SoftAssertions(self.failures))
        }
    }
}
