//! Remote browser seam
//!
//! The scenario talks to the browser only through the [`Browser`] and
//! [`Element`] traits. [`remote::RemoteBrowser`] implements them over a
//! WebDriver session; tests substitute an in-memory site.

pub mod conditions;
pub mod remote;
pub mod wait;

use std::fmt;

use async_trait::async_trait;

use crate::common::Result;

pub use remote::RemoteBrowser;
pub use wait::Wait;

/// How an element is looked up in the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locator {
    Css(&'static str),
    XPath(&'static str),
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(css) => write!(f, "css `{}`", css),
            Self::XPath(xpath) => write!(f, "xpath `{}`", xpath),
        }
    }
}

/// A browser session owned by the scenario
#[async_trait]
pub trait Browser: Send + Sync {
    type Element: Element;

    /// All elements in the current page matching `locator`, in document order
    async fn find_all(&self, locator: &Locator) -> Result<Vec<Self::Element>>;

    async fn maximize(&self) -> Result<()>;

    async fn goto(&self, url: &str) -> Result<()>;

    async fn current_url(&self) -> Result<String>;

    async fn title(&self) -> Result<String>;

    /// Move the pointer to the centre of `element`
    async fn hover(&self, element: &Self::Element) -> Result<()>;

    /// Move the pointer to `element` and click it as one pointer action
    async fn hover_and_click(&self, element: &Self::Element) -> Result<()>;

    /// Close the window and end the session
    async fn quit(&self) -> Result<()>;
}

/// A handle to one element of the current page
#[async_trait]
pub trait Element: Clone + Send + Sync + Sized {
    /// Descendants of this element matching `locator`
    async fn find_all(&self, locator: &Locator) -> Result<Vec<Self>>;

    async fn text(&self) -> Result<String>;

    async fn attr(&self, name: &str) -> Result<Option<String>>;

    async fn is_displayed(&self) -> Result<bool>;

    async fn is_enabled(&self) -> Result<bool>;

    async fn click(&self) -> Result<()>;

    async fn clear(&self) -> Result<()>;

    async fn send_keys(&self, text: &str) -> Result<()>;
}
