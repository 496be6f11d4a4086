//! In-memory stand-in for the target site
//!
//! Models just enough of the pages the scenario walks through: the category
//! picker, filtered listings, offer detail, login gate and basket. Every
//! interaction is appended to an event log so tests can check ordering.

#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use guarantee_check::scenario::locators::*;
use guarantee_check::{Browser, Config, Element, Error, Locator, Result};

pub const SITE_URL: &str = "https://aukro.test";

/// Config pointing at the fake site, with the stock timeouts
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.site.url = SITE_URL.to_string();
    config
}

#[derive(Debug, Clone)]
pub struct FakeOffer {
    pub name: String,
    pub price: u64,
    pub badge: bool,
    /// Badge is in the card but not rendered
    pub badge_hidden: bool,
    pub name_badge: bool,
    pub name_badge_hidden: bool,
    pub delivery_badge: bool,
    pub can_bid: bool,
    pub can_buy: bool,
}

impl FakeOffer {
    /// An offer with every badge that can be both bid on and bought
    pub fn new(name: &str, price: u64) -> Self {
        Self {
            name: name.to_string(),
            price,
            badge: true,
            badge_hidden: false,
            name_badge: true,
            name_badge_hidden: false,
            delivery_badge: true,
            can_bid: true,
            can_buy: true,
        }
    }

    pub fn without_badge(mut self) -> Self {
        self.badge = false;
        self
    }

    pub fn with_hidden_badge(mut self) -> Self {
        self.badge_hidden = true;
        self
    }

    pub fn with_hidden_name_badge(mut self) -> Self {
        self.name_badge_hidden = true;
        self
    }

    pub fn without_name_badge(mut self) -> Self {
        self.name_badge = false;
        self
    }

    pub fn without_delivery_badge(mut self) -> Self {
        self.delivery_badge = false;
        self
    }

    pub fn bid_only(mut self) -> Self {
        self.can_buy = false;
        self
    }

    pub fn buy_only(mut self) -> Self {
        self.can_bid = false;
        self
    }

    pub fn neither(mut self) -> Self {
        self.can_bid = false;
        self.can_buy = false;
        self
    }

    fn price_text(&self) -> String {
        format!("{} Kč", group_thousands(self.price))
    }
}

#[derive(Debug, Clone)]
pub struct FakeCategory {
    pub name: String,
    pub href: String,
    /// Value shown in the results count
    pub total: u64,
    /// Cards rendered on the first page
    pub offers: Vec<FakeOffer>,
    pub displayed: bool,
}

impl FakeCategory {
    /// Keep the category in the picker but collapsed out of view
    pub fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }
}

/// A category whose results count equals its rendered cards
pub fn category(name: &str, offers: Vec<FakeOffer>) -> FakeCategory {
    FakeCategory {
        name: name.to_string(),
        href: format!("{}/{}", SITE_URL, name.to_lowercase()),
        total: offers.len() as u64,
        offers,
        displayed: true,
    }
}

/// `count` offers with badges, named `"{prefix} {i}"`
pub fn offers(prefix: &str, count: usize) -> Vec<FakeOffer> {
    (0..count)
        .map(|i| FakeOffer::new(&format!("{} {}", prefix, i), 100 + i as u64))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Blank,
    Home,
    Category(usize),
    Detail(usize, usize),
    Login,
    Basket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Consent,
    Cookie,
    Newsletter,
    Category(usize),
    CategoryLink(usize),
    SidebarTitle,
    Filter,
    FilterChip,
    ResultsCount,
    BackLink,
    CategoriesPrompt,
    OfferCard(usize),
    CardBadge(usize),
    OfferLink(usize),
    NameBadge,
    DeliveryBadge,
    BidButton,
    BuyButton,
    Price,
    PriceInput,
    ItemName,
    LoginIntro,
    BasketControl,
    BasketItem(usize),
    BasketPrice(usize),
}

struct State {
    page: Page,
    url: String,
    title: String,
    opened_at: Option<Instant>,
    consent_open: bool,
    cookie_open: bool,
    newsletter_open: bool,
    /// How long after opening the site the newsletter popup shows up
    newsletter_delay: Option<Duration>,
    filter_checked: bool,
    categories: Vec<FakeCategory>,
    bid_input: String,
    basket: Vec<(String, String)>,
    opened_offer: Option<usize>,
    events: Vec<String>,
    quit: bool,
}

/// The fake browser session
#[derive(Clone)]
pub struct FakeSite {
    state: Arc<Mutex<State>>,
}

#[derive(Clone)]
pub struct FakeElement {
    state: Arc<Mutex<State>>,
    kind: Kind,
}

impl FakeSite {
    pub fn new(categories: Vec<FakeCategory>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                page: Page::Blank,
                url: "about:blank".to_string(),
                title: String::new(),
                opened_at: None,
                consent_open: true,
                cookie_open: true,
                newsletter_open: true,
                newsletter_delay: Some(Duration::from_secs(30)),
                filter_checked: false,
                categories,
                bid_input: String::new(),
                basket: Vec::new(),
                opened_offer: None,
                events: Vec::new(),
                quit: false,
            })),
        }
    }

    /// Never show the newsletter popup
    pub fn without_newsletter(self) -> Self {
        self.lock().newsletter_delay = None;
        self
    }

    pub fn events(&self) -> Vec<String> {
        self.lock().events.clone()
    }

    /// Position of the first event equal to `event`
    pub fn event_index(&self, event: &str) -> Option<usize> {
        self.lock().events.iter().position(|e| e == event)
    }

    pub fn count_events(&self, prefix: &str) -> usize {
        self.lock()
            .events
            .iter()
            .filter(|e| e.starts_with(prefix))
            .count()
    }

    pub fn quit_called(&self) -> bool {
        self.lock().quit
    }

    pub fn bid_input(&self) -> String {
        self.lock().bid_input.clone()
    }

    pub fn basket(&self) -> Vec<(String, String)> {
        self.lock().basket.clone()
    }

    pub fn opened_offer(&self) -> Option<usize> {
        self.lock().opened_offer
    }

    pub fn page_title(&self) -> String {
        self.lock().title.clone()
    }

    pub fn hovered_cards(&self) -> Vec<usize> {
        self.lock()
            .events
            .iter()
            .filter_map(|e| e.strip_prefix("hover OfferCard("))
            .filter_map(|rest| rest.trim_end_matches(')').parse().ok())
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    fn element(&self, kind: Kind) -> FakeElement {
        FakeElement {
            state: self.state.clone(),
            kind,
        }
    }
}

impl State {
    fn category(&self) -> Option<(usize, &FakeCategory)> {
        match self.page {
            Page::Category(i) => self.categories.get(i).map(|c| (i, c)),
            _ => None,
        }
    }

    fn detail(&self) -> Option<&FakeOffer> {
        match self.page {
            Page::Detail(c, o) => self.categories.get(c).and_then(|cat| cat.offers.get(o)),
            _ => None,
        }
    }

    fn newsletter_shown(&self) -> bool {
        match (self.newsletter_open, self.newsletter_delay, self.opened_at) {
            (true, Some(delay), Some(opened)) => opened.elapsed() >= delay,
            _ => false,
        }
    }

    /// Elements matching `locator` in the whole page
    fn resolve(&self, locator: &Locator) -> Vec<Kind> {
        let one = |present: bool, kind: Kind| if present { vec![kind] } else { vec![] };
        let listing = self.category().filter(|_| self.filter_checked);

        match *locator {
            l if l == CONSENT_BUTTON => one(self.consent_open && self.page != Page::Blank, Kind::Consent),
            l if l == COOKIE_BUTTON => one(self.cookie_open && self.page != Page::Blank, Kind::Cookie),
            l if l == NEWSLETTER_CLOSE => one(self.newsletter_shown(), Kind::Newsletter),
            l if l == TOP_LEVEL_CATEGORY => {
                if self.page == Page::Home {
                    (0..self.categories.len()).map(Kind::Category).collect()
                } else {
                    vec![]
                }
            }
            l if l == CATEGORIES_PROMPT => one(self.page == Page::Home, Kind::CategoriesPrompt),
            l if l == SIDEBAR_TITLE => one(self.category().is_some(), Kind::SidebarTitle),
            l if l == GUARANTEE_FILTER => one(self.category().is_some(), Kind::Filter),
            l if l == RESULTS_COUNT => one(self.category().is_some(), Kind::ResultsCount),
            l if l == BACK_TO_CATEGORIES => one(self.category().is_some(), Kind::BackLink),
            l if l == ACTIVE_FILTER_CHIP => one(listing.is_some(), Kind::FilterChip),
            l if l == OFFER_CARD => match listing {
                Some((_, cat)) => (0..cat.offers.len()).map(Kind::OfferCard).collect(),
                None => vec![],
            },
            l if l == NAME_BADGE => one(self.detail().is_some_and(|o| o.name_badge), Kind::NameBadge),
            l if l == DELIVERY_BADGE => {
                one(self.detail().is_some_and(|o| o.delivery_badge), Kind::DeliveryBadge)
            }
            l if l == BID_BUTTON => one(self.detail().is_some_and(|o| o.can_bid), Kind::BidButton),
            l if l == BUY_BUTTON => one(self.detail().is_some_and(|o| o.can_buy), Kind::BuyButton),
            l if l == PRICE => one(self.detail().is_some(), Kind::Price),
            l if l == PRICE_INPUT => one(self.detail().is_some_and(|o| o.can_bid), Kind::PriceInput),
            l if l == ITEM_NAME => one(self.detail().is_some(), Kind::ItemName),
            l if l == BASKET_CONTROL => one(self.detail().is_some(), Kind::BasketControl),
            l if l == LOGIN_INTRO => one(self.page == Page::Login, Kind::LoginIntro),
            l if l == BASKET_ITEM => self.basket_rows(Kind::BasketItem),
            l if l == BASKET_PRICE => self.basket_rows(Kind::BasketPrice),
            _ => vec![],
        }
    }

    fn basket_rows(&self, kind: fn(usize) -> Kind) -> Vec<Kind> {
        if self.page == Page::Basket {
            (0..self.basket.len()).map(kind).collect()
        } else {
            vec![]
        }
    }

    /// Elements matching `locator` below `parent`
    fn resolve_within(&self, parent: Kind, locator: &Locator) -> Vec<Kind> {
        match (parent, *locator) {
            (Kind::Category(i), l) if l == CATEGORY_LINK => vec![Kind::CategoryLink(i)],
            (Kind::OfferCard(i), l) if l == CARD_BADGE => {
                let badge = self
                    .category()
                    .and_then(|(_, c)| c.offers.get(i))
                    .is_some_and(|o| o.badge);
                if badge {
                    vec![Kind::CardBadge(i)]
                } else {
                    vec![]
                }
            }
            (Kind::OfferCard(i), l) if l == OFFER_LINK => vec![Kind::OfferLink(i)],
            _ => vec![],
        }
    }

    /// Whether `kind` is still part of the current page
    fn attached(&self, kind: Kind) -> bool {
        let listing = self.category().filter(|_| self.filter_checked);
        match kind {
            Kind::Consent => self.consent_open,
            Kind::Cookie => self.cookie_open,
            Kind::Newsletter => self.newsletter_shown(),
            Kind::Category(i) | Kind::CategoryLink(i) => {
                self.page == Page::Home && i < self.categories.len()
            }
            Kind::CategoriesPrompt => self.page == Page::Home,
            Kind::SidebarTitle | Kind::Filter | Kind::ResultsCount | Kind::BackLink => {
                self.category().is_some()
            }
            Kind::FilterChip => listing.is_some(),
            Kind::OfferCard(i) | Kind::OfferLink(i) => {
                listing.is_some_and(|(_, c)| i < c.offers.len())
            }
            Kind::CardBadge(i) => listing.is_some_and(|(_, c)| c.offers.get(i).is_some_and(|o| o.badge)),
            Kind::NameBadge
            | Kind::DeliveryBadge
            | Kind::BidButton
            | Kind::BuyButton
            | Kind::Price
            | Kind::PriceInput
            | Kind::ItemName
            | Kind::BasketControl => self.detail().is_some(),
            Kind::LoginIntro => self.page == Page::Login,
            Kind::BasketItem(i) | Kind::BasketPrice(i) => {
                self.page == Page::Basket && i < self.basket.len()
            }
        }
    }

    fn displayed(&self, kind: Kind) -> bool {
        match kind {
            Kind::Category(i) | Kind::CategoryLink(i) => self.categories[i].displayed,
            Kind::CardBadge(i) => self
                .category()
                .and_then(|(_, c)| c.offers.get(i))
                .is_some_and(|o| !o.badge_hidden),
            Kind::NameBadge => self.detail().is_some_and(|o| !o.name_badge_hidden),
            _ => true,
        }
    }

    fn text(&self, kind: Kind) -> String {
        match kind {
            Kind::CategoryLink(i) | Kind::Category(i) => format!(" {} ", self.categories[i].name),
            Kind::SidebarTitle => self.category().map(|(_, c)| c.name.clone()).unwrap_or_default(),
            Kind::FilterChip => format!("{} ×", ACTIVE_FILTER_TEXT),
            Kind::ResultsCount => self
                .category()
                .map(|(_, c)| group_thousands(c.total))
                .unwrap_or_default(),
            Kind::CategoriesPrompt => CATEGORIES_PROMPT_TEXT.to_string(),
            Kind::CardBadge(_) => "Aukro Garance vrácení peněz".to_string(),
            Kind::Price => self.detail().map(FakeOffer::price_text).unwrap_or_default(),
            Kind::ItemName => self
                .detail()
                .map(|o| format!("\n  {}  \n", o.name))
                .unwrap_or_default(),
            Kind::LoginIntro => format!("{} Přihlaste se.", LOGIN_INTRO_TEXT),
            Kind::BasketItem(i) => self.basket[i].0.clone(),
            Kind::BasketPrice(i) => format!("Cena: {}", self.basket[i].1),
            _ => String::new(),
        }
    }

    fn attr(&self, kind: Kind, name: &str) -> Option<String> {
        match (kind, name) {
            (Kind::CategoryLink(i), "href") => Some(self.categories[i].href.clone()),
            (Kind::Filter, "class") => Some(if self.filter_checked {
                format!("mat-checkbox mat-accent {}", CHECKED_CLASS)
            } else {
                "mat-checkbox mat-accent".to_string()
            }),
            _ => None,
        }
    }

    fn click(&mut self, kind: Kind) {
        self.events.push(format!("click {:?}", kind));
        match kind {
            Kind::Consent => self.consent_open = false,
            Kind::Cookie => self.cookie_open = false,
            Kind::Newsletter => self.newsletter_open = false,
            Kind::Category(i) | Kind::CategoryLink(i) => {
                self.page = Page::Category(i);
                self.url = self.categories[i].href.clone();
                self.filter_checked = false;
            }
            Kind::Filter => {
                self.filter_checked = !self.filter_checked;
                if let Some((i, _)) = self.category() {
                    let href = self.categories[i].href.clone();
                    self.url = if self.filter_checked {
                        format!("{}?{}", href, FILTER_QUERY_PARAM)
                    } else {
                        href
                    };
                }
            }
            Kind::BackLink => {
                self.page = Page::Home;
                self.url = SITE_URL.to_string();
            }
            Kind::OfferLink(o) => {
                if let Some((c, cat)) = self.category() {
                    let name = cat.offers[o].name.clone();
                    self.page = Page::Detail(c, o);
                    self.url = format!("{}/offer-{}", SITE_URL, o);
                    self.title = name;
                    self.opened_offer = Some(o);
                }
            }
            Kind::BidButton => {
                if !self.bid_input.is_empty() {
                    self.page = Page::Login;
                    self.url = format!("{}/prihlaseni", SITE_URL);
                    self.title = LOGIN_TITLE.to_string();
                }
            }
            Kind::BuyButton => {
                if let Some(offer) = self.detail() {
                    let row = (offer.name.clone(), offer.price_text());
                    self.basket.push(row);
                }
            }
            Kind::BasketControl => {
                self.page = Page::Basket;
                self.url = format!("{}{}", SITE_URL, BASKET_URL_FRAGMENT);
                self.title = "Košík".to_string();
            }
            _ => {}
        }
    }
}

/// Czech-style thousands grouping with no-break spaces
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('\u{a0}');
        }
        out.push(c);
    }
    out
}

fn stale(kind: Kind) -> Error {
    Error::StaleElement(format!("{:?}", kind))
}

#[async_trait]
impl Browser for FakeSite {
    type Element = FakeElement;

    async fn find_all(&self, locator: &Locator) -> Result<Vec<FakeElement>> {
        let kinds = self.lock().resolve(locator);
        Ok(kinds.into_iter().map(|k| self.element(k)).collect())
    }

    async fn maximize(&self) -> Result<()> {
        self.lock().events.push("maximize".to_string());
        Ok(())
    }

    async fn goto(&self, url: &str) -> Result<()> {
        let mut state = self.lock();
        state.events.push(format!("goto {}", url));
        state.page = Page::Home;
        state.url = url.to_string();
        state.title = "Aukro".to_string();
        state.opened_at = Some(Instant::now());
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.lock().url.clone())
    }

    async fn title(&self) -> Result<String> {
        Ok(self.lock().title.clone())
    }

    async fn hover(&self, element: &FakeElement) -> Result<()> {
        let mut state = self.lock();
        if !state.attached(element.kind) {
            return Err(stale(element.kind));
        }
        state.events.push(format!("hover {:?}", element.kind));
        Ok(())
    }

    async fn hover_and_click(&self, element: &FakeElement) -> Result<()> {
        let mut state = self.lock();
        if !state.attached(element.kind) {
            return Err(stale(element.kind));
        }
        state.events.push(format!("hover {:?}", element.kind));
        state.click(element.kind);
        Ok(())
    }

    async fn quit(&self) -> Result<()> {
        let mut state = self.lock();
        state.events.push("quit".to_string());
        state.quit = true;
        Ok(())
    }
}

impl FakeElement {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    fn attached(&self) -> Result<MutexGuard<'_, State>> {
        let state = self.lock();
        if state.attached(self.kind) {
            Ok(state)
        } else {
            Err(stale(self.kind))
        }
    }
}

#[async_trait]
impl Element for FakeElement {
    async fn find_all(&self, locator: &Locator) -> Result<Vec<FakeElement>> {
        let kinds = self.attached()?.resolve_within(self.kind, locator);
        Ok(kinds
            .into_iter()
            .map(|kind| FakeElement {
                state: self.state.clone(),
                kind,
            })
            .collect())
    }

    async fn text(&self) -> Result<String> {
        Ok(self.attached()?.text(self.kind))
    }

    async fn attr(&self, name: &str) -> Result<Option<String>> {
        Ok(self.attached()?.attr(self.kind, name))
    }

    async fn is_displayed(&self) -> Result<bool> {
        Ok(self.attached()?.displayed(self.kind))
    }

    async fn is_enabled(&self) -> Result<bool> {
        self.attached().map(|_| true)
    }

    async fn click(&self) -> Result<()> {
        self.attached()?.click(self.kind);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut state = self.attached()?;
        if self.kind == Kind::PriceInput {
            state.bid_input.clear();
        }
        state.events.push(format!("clear {:?}", self.kind));
        Ok(())
    }

    async fn send_keys(&self, text: &str) -> Result<()> {
        let mut state = self.attached()?;
        if self.kind == Kind::PriceInput {
            state.bid_input.push_str(text);
        }
        state.events.push(format!("type {:?} {}", self.kind, text));
        Ok(())
    }
}
