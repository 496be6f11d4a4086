//! Scenario runner
//!
//! Drives one browser session through the money-back guarantee check:
//! bring-up, category search, listing badges, offer detail, and finally the
//! bid or buy flow the offer supports.

use rand::Rng;

use crate::browser::{conditions, Browser, Element, Locator, Wait};
use crate::common::config::Config;
use crate::common::{Error, Result};

use super::locators::*;
use super::report::{CategorySummary, ScenarioReport};
use super::selection::{choose_flow, select_offer_index, Capability, Flow};
use super::soft::SoftAssert;
use super::values::parse_count;

/// Run the full scenario against an open browser session
///
/// The session is always quit afterwards, whether the scenario passed or
/// not. Failures are recorded in the returned report.
pub async fn run_scenario<B, R>(browser: &B, config: &Config, rng: &mut R) -> ScenarioReport
where
    B: Browser,
    R: Rng + ?Sized,
{
    let mut report = ScenarioReport::new(&config.site.url);
    let runner = ScenarioRunner::new(browser, config);

    match runner.run(&mut report, rng).await {
        Ok(()) => {
            report.passed = true;
            tracing::info!("Scenario passed");
        }
        Err(e) => {
            tracing::error!(error = %e, "Scenario failed");
            report.failure = Some(e);
        }
    }

    if let Err(e) = browser.quit().await {
        tracing::warn!(error = %e, "Failed to quit browser session");
    }

    report
}

pub(super) struct ScenarioRunner<'a, B: Browser> {
    pub(super) browser: &'a B,
    pub(super) config: &'a Config,
    pub(super) wait: Wait,
}

impl<'a, B: Browser> ScenarioRunner<'a, B> {
    pub(super) fn new(browser: &'a B, config: &'a Config) -> Self {
        Self {
            browser,
            config,
            wait: Wait::from_timeouts(&config.timeouts),
        }
    }

    async fn run<R: Rng + ?Sized>(&self, report: &mut ScenarioReport, rng: &mut R) -> Result<()> {
        self.bring_up().await?;

        let Some(category) = self.find_qualifying_category(report).await? else {
            tracing::warn!(
                min_offers = self.config.site.min_offers,
                "No category has enough guaranteed offers; nothing to verify"
            );
            return Ok(());
        };
        tracing::info!(
            category = %category.name,
            offers = category.offer_count,
            "Category qualifies"
        );
        report.category = Some(category);

        let offers = self.verify_listing_badges(report).await?;

        let index = select_offer_index(offers.len(), rng)
            .ok_or_else(|| Error::Assertion("No offers listed".to_string()))?;
        report.selected_offer = Some(index);
        tracing::info!(index, of = offers.len(), "Opening offer");
        self.open_offer(&offers[index]).await?;

        self.verify_detail_badges().await?;

        let capability = self.detect_capability().await?;
        report.capability = Some(capability);
        tracing::info!(%capability, "Detected offer capability");

        let outcome = match choose_flow(capability, rng) {
            Some(Flow::Bid) => self.bid_and_verify().await?,
            Some(Flow::Buy) => self.buy_and_verify().await?,
            None => {
                tracing::warn!("Offer can be neither bid on nor bought; no flow to run");
                return Ok(());
            }
        };
        report.flow = Some(outcome);

        Ok(())
    }

    /// Open the site and dismiss the onboarding overlays, in order
    async fn bring_up(&self) -> Result<()> {
        let browser = self.browser;
        let timeouts = &self.config.timeouts;

        browser.maximize().await?;
        tracing::info!(url = %self.config.site.url, "Opening target site");
        browser.goto(&self.config.site.url).await?;

        self.wait
            .with_timeout(timeouts.consent())
            .until("data consent dialog", move || {
                conditions::visible(browser, &CONSENT_BUTTON)
            })
            .await?
            .click()
            .await?;
        tracing::debug!("Accepted data consent");

        self.wait
            .until("cookie banner", move || {
                conditions::clickable(browser, &COOKIE_BUTTON)
            })
            .await?
            .click()
            .await?;
        tracing::debug!("Closed cookie banner");

        // The newsletter popup appears with a delay of around 30 seconds
        self.wait
            .with_timeout(timeouts.newsletter())
            .until("newsletter popup", move || {
                conditions::visible(browser, &NEWSLETTER_CLOSE)
            })
            .await?
            .click()
            .await?;
        tracing::debug!("Closed newsletter popup");

        Ok(())
    }

    /// Try categories in page order until one lists enough guaranteed offers
    async fn find_qualifying_category(
        &self,
        report: &mut ScenarioReport,
    ) -> Result<Option<CategorySummary>> {
        let browser = self.browser;
        let total = self
            .wait
            .until("category list", move || {
                conditions::present(browser, &TOP_LEVEL_CATEGORY)
            })
            .await?
            .len();
        tracing::debug!(total, "Found top-level categories");

        for index in 0..total {
            let summary = self.filter_category(index, report).await?;
            if summary.offer_count >= self.config.site.min_offers {
                return Ok(Some(summary));
            }

            tracing::info!(
                category = %summary.name,
                offers = summary.offer_count,
                "Not enough guaranteed offers, trying next category"
            );
            self.back_to_categories().await?;
        }

        Ok(None)
    }

    /// Open the category at `index`, apply the guarantee filter and count
    /// the results
    async fn filter_category(
        &self,
        index: usize,
        report: &mut ScenarioReport,
    ) -> Result<CategorySummary> {
        let browser = self.browser;

        // Re-query on every pass: going back re-renders the picker.
        let categories = self
            .wait
            .until("category list", move || {
                conditions::present(browser, &TOP_LEVEL_CATEGORY)
            })
            .await?;
        let category = categories.get(index).ok_or_else(|| {
            Error::Assertion(format!(
                "Category #{} disappeared from the picker ({} left)",
                index,
                categories.len()
            ))
        })?;

        let link = category
            .find_all(&CATEGORY_LINK)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::Assertion(format!("Category #{} has no link", index)))?;
        let name = link.text().await?.trim().to_string();
        let href = link
            .attr("href")
            .await?
            .ok_or_else(|| Error::Assertion(format!("Category '{}' link has no href", name)))?;

        tracing::info!(category = %name, %href, "Opening category");
        report.categories_visited.push(name.clone());

        self.wait
            .until("category to be clickable", move || {
                conditions::element_clickable(category)
            })
            .await?
            .click()
            .await?;

        let (name_ref, href_ref) = (name.as_str(), href.as_str());
        self.wait
            .until("category URL", move || conditions::url_is(browser, href_ref))
            .await?;
        self.wait
            .until("category sidebar title", move || {
                conditions::text_in(browser, &SIDEBAR_TITLE, name_ref)
            })
            .await?;

        self.apply_guarantee_filter().await?;

        let count_text = self
            .wait
            .until("results count", move || {
                conditions::visible(browser, &RESULTS_COUNT)
            })
            .await?
            .text()
            .await?;
        let offer_count = parse_count(&count_text)?;

        Ok(CategorySummary {
            name,
            href,
            offer_count,
        })
    }

    /// Tick the money-back guarantee filter and wait until the listing
    /// reflects it
    async fn apply_guarantee_filter(&self) -> Result<()> {
        let browser = self.browser;

        let checkbox = self
            .wait
            .until("guarantee filter", move || {
                conditions::visible(browser, &GUARANTEE_FILTER)
            })
            .await?;
        browser.hover_and_click(&checkbox).await?;

        let checkbox = &checkbox;
        self.wait
            .until("guarantee filter to be checked", move || {
                conditions::attribute_contains(checkbox, "class", CHECKED_CLASS)
            })
            .await?;

        let chip = self
            .wait
            .until("active filter chip", move || {
                conditions::visible(browser, &ACTIVE_FILTER_CHIP)
            })
            .await?;
        browser.hover(&chip).await?;

        self.wait
            .until("active filter text", move || {
                conditions::text_in(browser, &ACTIVE_FILTER_CHIP, ACTIVE_FILTER_TEXT)
            })
            .await?;
        self.wait
            .until("filter query parameter", move || {
                conditions::url_contains(browser, FILTER_QUERY_PARAM)
            })
            .await?;

        Ok(())
    }

    async fn back_to_categories(&self) -> Result<()> {
        let browser = self.browser;

        self.wait
            .until("back to categories link", move || {
                conditions::clickable(browser, &BACK_TO_CATEGORIES)
            })
            .await?
            .click()
            .await?;
        self.wait
            .until("category picker prompt", move || {
                conditions::text_in(browser, &CATEGORIES_PROMPT, CATEGORIES_PROMPT_TEXT)
            })
            .await?;

        Ok(())
    }

    /// Softly check that every listed offer carries the guarantee badge
    async fn verify_listing_badges(&self, report: &mut ScenarioReport) -> Result<Vec<B::Element>> {
        let browser = self.browser;

        let offers = self
            .wait
            .until("offer cards", move || {
                conditions::all_visible(browser, &OFFER_CARD)
            })
            .await?;

        let mut soft = SoftAssert::new();
        for (index, offer) in offers.iter().enumerate() {
            browser.hover(offer).await?;
            let shown = card_badge_displayed(offer).await?;
            soft.check(
                shown,
                format!(
                    "Offer #{} does not have the money-back guarantee badge",
                    index
                ),
            );
            report.offers_checked = index + 1;
        }
        tracing::info!(
            checked = offers.len(),
            missing = soft.failures().len(),
            "Checked listing badges"
        );
        soft.assert_all()?;

        Ok(offers)
    }

    async fn open_offer(&self, offer: &B::Element) -> Result<()> {
        self.browser.hover(offer).await?;
        self.wait
            .until("offer link", move || {
                conditions::clickable_within(offer, &OFFER_LINK)
            })
            .await?
            .click()
            .await?;
        Ok(())
    }

    /// Both detail badges are hard requirements
    async fn verify_detail_badges(&self) -> Result<()> {
        self.require_visible(
            &NAME_BADGE,
            "Missing 'money back guarantee' badge next to name in detail page",
        )
        .await?;
        self.require_visible(
            &DELIVERY_BADGE,
            "Missing 'money back guarantee' badge next to delivery options in detail page",
        )
        .await?;
        Ok(())
    }

    async fn require_visible(&self, locator: &Locator, message: &str) -> Result<()> {
        let browser = self.browser;
        match self
            .wait
            .until(message, move || conditions::visible(browser, locator))
            .await
        {
            Ok(_) => Ok(()),
            Err(e) if e.is_timeout() => Err(Error::Assertion(message.to_string())),
            Err(e) => Err(e),
        }
    }

    async fn detect_capability(&self) -> Result<Capability> {
        let can_bid = self.probe(&BID_BUTTON, "bid button").await?;
        let can_buy = self.probe(&BUY_BUTTON, "add to basket button").await?;
        Ok(Capability::detect(can_bid, can_buy))
    }

    /// A bounded look for an optional action; timing out means "absent"
    async fn probe(&self, locator: &Locator, what: &str) -> Result<bool> {
        let browser = self.browser;
        let wait = self.wait.with_timeout(self.config.timeouts.probe());
        match wait
            .until(what, move || conditions::visible(browser, locator))
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if e.is_timeout() => {
                tracing::debug!(what, "Not available on this offer");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

async fn card_badge_displayed<E: Element>(card: &E) -> Result<bool> {
    for badge in card.find_all(&CARD_BADGE).await? {
        if badge.is_displayed().await? {
            return Ok(true);
        }
    }
    Ok(false)
}
