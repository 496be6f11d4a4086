//! Bid and buy flows on an opened offer

use crate::browser::{conditions, Browser, Element};
use crate::common::Result;

use super::locators::*;
use super::report::FlowOutcome;
use super::runner::ScenarioRunner;
use super::values::{parse_price, BidAmount};

impl<B: Browser> ScenarioRunner<'_, B> {
    /// Raise the current price by 20% and check the login gate is reached
    ///
    /// Bidding requires an account, so the flow stops at the login page.
    pub(super) async fn bid_and_verify(&self) -> Result<FlowOutcome> {
        let browser = self.browser;

        let price_text = self
            .wait
            .until("current price", move || conditions::visible(browser, &PRICE))
            .await?
            .text()
            .await?;
        let current_price = parse_price(&price_text)?;
        let bid = BidAmount::raise(current_price);
        tracing::info!(current_price, %bid, "Placing bid");

        let input = self
            .wait
            .until("bid input", move || conditions::visible(browser, &PRICE_INPUT))
            .await?;
        input.clear().await?;
        input.send_keys(&bid.to_string()).await?;

        self.wait
            .until("bid button", move || conditions::visible(browser, &BID_BUTTON))
            .await?
            .click()
            .await?;

        self.wait
            .until("login page title", move || {
                conditions::title_is(browser, LOGIN_TITLE)
            })
            .await?;
        self.wait
            .until("login welcome banner", move || {
                conditions::text_in(browser, &LOGIN_INTRO, LOGIN_INTRO_TEXT)
            })
            .await?;
        tracing::info!("Bid redirected to login");

        Ok(FlowOutcome::Bid { current_price, bid })
    }

    /// Add the offer to the basket and check name and price carried over
    pub(super) async fn buy_and_verify(&self) -> Result<FlowOutcome> {
        let browser = self.browser;

        let name = self
            .wait
            .until("item name", move || conditions::visible(browser, &ITEM_NAME))
            .await?
            .text()
            .await?
            .trim()
            .to_string();
        let price = self
            .wait
            .until("item price", move || conditions::visible(browser, &PRICE))
            .await?
            .text()
            .await?;
        tracing::info!(item = %name, %price, "Adding to basket");

        self.wait
            .until("add to basket button", move || {
                conditions::visible(browser, &BUY_BUTTON)
            })
            .await?
            .click()
            .await?;

        self.wait
            .until("basket control", move || {
                conditions::visible(browser, &BASKET_CONTROL)
            })
            .await?
            .click()
            .await?;
        self.wait
            .until("basket page", move || {
                conditions::url_contains(browser, BASKET_URL_FRAGMENT)
            })
            .await?;

        let (name_ref, price_ref) = (name.as_str(), price.as_str());
        self.wait
            .until("item in basket", move || {
                conditions::text_in(browser, &BASKET_ITEM, name_ref)
            })
            .await?;
        self.wait
            .until("item price in basket", move || {
                conditions::text_in(browser, &BASKET_PRICE, price_ref)
            })
            .await?;
        tracing::info!("Basket shows the added item");

        Ok(FlowOutcome::Buy { name, price })
    }
}
