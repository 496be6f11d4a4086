//! WebDriver-backed browser
//!
//! Talks to a Selenium hub or a standalone driver (chromedriver,
//! geckodriver) over the W3C WebDriver protocol.

use async_trait::async_trait;
use thirtyfour::prelude::*;

use super::{Browser, Element, Locator};
use crate::common::config::{BrowserKind, WebDriverConfig};
use crate::common::Result;

/// A remote browser session
pub struct RemoteBrowser {
    driver: WebDriver,
}

/// An element of the remote page
#[derive(Clone)]
pub struct RemoteElement(WebElement);

impl RemoteBrowser {
    /// Open a new session on the configured endpoint
    pub async fn connect(config: &WebDriverConfig) -> Result<Self> {
        tracing::info!(
            url = %config.url,
            browser = %config.browser,
            headless = config.headless,
            "Opening remote browser session"
        );
        let caps = make_capabilities(config.browser, config.headless)?;
        let driver = WebDriver::new(&config.url, caps).await?;
        Ok(Self { driver })
    }
}

/// Build the capabilities requested from the endpoint
fn make_capabilities(browser: BrowserKind, headless: bool) -> Result<Capabilities> {
    match browser {
        BrowserKind::Chrome => {
            let mut caps = DesiredCapabilities::chrome();
            if headless {
                caps.add_chrome_arg("--headless=new")?;
                caps.add_chrome_arg("--window-size=1920,1080")?;
            }
            Ok(caps.into())
        }
        BrowserKind::Firefox => {
            let mut caps = DesiredCapabilities::firefox();
            if headless {
                caps.add_firefox_arg("--headless")?;
            }
            Ok(caps.into())
        }
    }
}

fn by(locator: &Locator) -> By {
    match *locator {
        Locator::Css(css) => By::Css(css),
        Locator::XPath(xpath) => By::XPath(xpath),
    }
}

#[async_trait]
impl Browser for RemoteBrowser {
    type Element = RemoteElement;

    async fn find_all(&self, locator: &Locator) -> Result<Vec<RemoteElement>> {
        let elements = self.driver.find_all(by(locator)).await?;
        Ok(elements.into_iter().map(RemoteElement).collect())
    }

    async fn maximize(&self) -> Result<()> {
        self.driver.maximize_window().await?;
        Ok(())
    }

    async fn goto(&self, url: &str) -> Result<()> {
        self.driver.goto(url).await?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.driver.current_url().await?.to_string())
    }

    async fn title(&self) -> Result<String> {
        Ok(self.driver.title().await?)
    }

    async fn hover(&self, element: &RemoteElement) -> Result<()> {
        self.driver
            .action_chain()
            .move_to_element_center(&element.0)
            .perform()
            .await?;
        Ok(())
    }

    async fn hover_and_click(&self, element: &RemoteElement) -> Result<()> {
        self.driver
            .action_chain()
            .move_to_element_center(&element.0)
            .click()
            .perform()
            .await?;
        Ok(())
    }

    async fn quit(&self) -> Result<()> {
        tracing::debug!("Closing remote browser session");
        // Closing the last window can fail if the browser already went away;
        // the session itself must still be released.
        if let Err(e) = self.driver.close_window().await {
            tracing::warn!(error = %e, "Failed to close browser window");
        }
        self.driver.clone().quit().await?;
        Ok(())
    }
}

#[async_trait]
impl Element for RemoteElement {
    async fn find_all(&self, locator: &Locator) -> Result<Vec<RemoteElement>> {
        let elements = self.0.find_all(by(locator)).await?;
        Ok(elements.into_iter().map(RemoteElement).collect())
    }

    async fn text(&self) -> Result<String> {
        Ok(self.0.text().await?)
    }

    async fn attr(&self, name: &str) -> Result<Option<String>> {
        Ok(self.0.attr(name).await?)
    }

    async fn is_displayed(&self) -> Result<bool> {
        Ok(self.0.is_displayed().await?)
    }

    async fn is_enabled(&self) -> Result<bool> {
        Ok(self.0.is_enabled().await?)
    }

    async fn click(&self) -> Result<()> {
        self.0.click().await?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.0.clear().await?;
        Ok(())
    }

    async fn send_keys(&self, text: &str) -> Result<()> {
        self.0.send_keys(text).await?;
        Ok(())
    }
}
