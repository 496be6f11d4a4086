//! Selectors and expected texts of the target site
//!
//! These are tied to aukro.cz's current markup; any change there breaks the
//! scenario.

use crate::browser::Locator;

// Onboarding overlays, dismissed in this order
pub const CONSENT_BUTTON: Locator = Locator::Css(".fc-cta-consent");
pub const COOKIE_BUTTON: Locator = Locator::Css(".cookiesWrap > .cookiesButton");
pub const NEWSLETTER_CLOSE: Locator =
    Locator::Css("email-collector-popup.ng-star-inserted > .flex > a > .material-icons");

// Category picker
pub const TOP_LEVEL_CATEGORY: Locator = Locator::Css("top-level-category");
pub const CATEGORY_LINK: Locator = Locator::Css("a");
pub const SIDEBAR_TITLE: Locator = Locator::Css(".sidebar-title");
pub const BACK_TO_CATEGORIES: Locator = Locator::Css("categories > h2 > a");
pub const CATEGORIES_PROMPT: Locator = Locator::Css("button.top-level-categories-cta");
pub const CATEGORIES_PROMPT_TEXT: &str = "Vyberte si kategorii";

// Money-back guarantee filter
pub const GUARANTEE_FILTER: Locator = Locator::Css("#mat-checkbox-6");
pub const CHECKED_CLASS: &str = "mat-checkbox-checked";
pub const ACTIVE_FILTER_CHIP: Locator = Locator::Css(".settings-wrapper .active-filters div");
pub const ACTIVE_FILTER_TEXT: &str = "Aukro garance vrácení peněz";
pub const FILTER_QUERY_PARAM: &str = "paymentViaAukro=true";
pub const RESULTS_COUNT: Locator = Locator::Css(".details > span");

// Listing
pub const OFFER_CARD: Locator = Locator::Css("list-view > list-card");
pub const OFFER_LINK: Locator = Locator::Css(".box-wrapper > a");
pub const CARD_BADGE: Locator =
    Locator::XPath(".//span[contains(text(), 'Aukro Garance vrácení peněz')]");

// Offer detail
pub const NAME_BADGE: Locator = Locator::Css("heading svg-icon#money-back-guarantee");
pub const DELIVERY_BADGE: Locator = Locator::Css("delivery-info ul svg-icon#money-back-guarantee");
pub const BID_BUTTON: Locator = Locator::XPath("//button[contains(text(), 'Přihodit')]");
pub const BUY_BUTTON: Locator = Locator::XPath("//button[contains(text(), 'Přidat do košíku')]");
pub const PRICE: Locator = Locator::Css(".price");
pub const PRICE_INPUT: Locator = Locator::Css("price-input input");
pub const ITEM_NAME: Locator = Locator::Css("heading > h1");

// Login gate reached by bidding anonymously
pub const LOGIN_TITLE: &str = "Přihlášení na Aukru";
pub const LOGIN_INTRO: Locator = Locator::Css(".introduction");
pub const LOGIN_INTRO_TEXT: &str = "Vítejte na Aukru!";

// Basket
pub const BASKET_CONTROL: Locator = Locator::Css("basket-control");
pub const BASKET_URL_FRAGMENT: &str = "/kosik";
pub const BASKET_ITEM: Locator = Locator::Css("seller-cart-items a");
pub const BASKET_PRICE: Locator = Locator::Css(".price-section > p");
