//! Expected conditions for [`Wait::until`](super::Wait::until)
//!
//! Each condition checks the page once and returns `Ok(None)` while it does
//! not hold yet.

use super::{Browser, Element, Locator};
use crate::common::Result;

/// First matching element that is displayed
pub async fn visible<B: Browser>(browser: &B, locator: &Locator) -> Result<Option<B::Element>> {
    first_displayed(browser.find_all(locator).await?).await
}

/// First matching element that is displayed and enabled
pub async fn clickable<B: Browser>(browser: &B, locator: &Locator) -> Result<Option<B::Element>> {
    first_clickable(browser.find_all(locator).await?).await
}

/// First descendant of `parent` that is displayed and enabled
pub async fn clickable_within<E: Element>(parent: &E, locator: &Locator) -> Result<Option<E>> {
    first_clickable(parent.find_all(locator).await?).await
}

/// `element` itself once it is displayed and enabled
pub async fn element_clickable<E: Element>(element: &E) -> Result<Option<E>> {
    if element.is_displayed().await? && element.is_enabled().await? {
        Ok(Some(element.clone()))
    } else {
        Ok(None)
    }
}

/// Every matching element, once there is at least one
pub async fn present<B: Browser>(browser: &B, locator: &Locator) -> Result<Option<Vec<B::Element>>> {
    let elements = browser.find_all(locator).await?;
    Ok((!elements.is_empty()).then_some(elements))
}

/// Every matching element, once there is at least one and all are displayed
pub async fn all_visible<B: Browser>(
    browser: &B,
    locator: &Locator,
) -> Result<Option<Vec<B::Element>>> {
    let elements = browser.find_all(locator).await?;
    if elements.is_empty() {
        return Ok(None);
    }
    for element in &elements {
        if !element.is_displayed().await? {
            return Ok(None);
        }
    }
    Ok(Some(elements))
}

/// The first matching element's text contains `text`
pub async fn text_in<B: Browser>(browser: &B, locator: &Locator, text: &str) -> Result<Option<()>> {
    let elements = browser.find_all(locator).await?;
    match elements.first() {
        Some(element) => Ok(element.text().await?.contains(text).then_some(())),
        None => Ok(None),
    }
}

/// `element`'s attribute `name` contains `value`
pub async fn attribute_contains<E: Element>(
    element: &E,
    name: &str,
    value: &str,
) -> Result<Option<()>> {
    let attr = element.attr(name).await?;
    Ok(attr.is_some_and(|a| a.contains(value)).then_some(()))
}

pub async fn url_is<B: Browser>(browser: &B, url: &str) -> Result<Option<()>> {
    Ok((browser.current_url().await? == url).then_some(()))
}

pub async fn url_contains<B: Browser>(browser: &B, fragment: &str) -> Result<Option<()>> {
    Ok(browser.current_url().await?.contains(fragment).then_some(()))
}

pub async fn title_is<B: Browser>(browser: &B, title: &str) -> Result<Option<()>> {
    Ok((browser.title().await? == title).then_some(()))
}

async fn first_displayed<E: Element>(elements: Vec<E>) -> Result<Option<E>> {
    for element in elements {
        if element.is_displayed().await? {
            return Ok(Some(element));
        }
    }
    Ok(None)
}

async fn first_clickable<E: Element>(elements: Vec<E>) -> Result<Option<E>> {
    for element in elements {
        if element.is_displayed().await? && element.is_enabled().await? {
            return Ok(Some(element));
        }
    }
    Ok(None)
}
