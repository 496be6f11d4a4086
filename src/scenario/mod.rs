//! Money-back guarantee scenario
//!
//! One linear browser scenario: find a category with enough guaranteed
//! offers, check the badge on the listing and on one offer's detail page,
//! then bid on or buy that offer.

mod flows;
pub mod locators;
mod report;
mod runner;
mod selection;
mod soft;
mod values;

pub use report::{CategorySummary, FlowOutcome, ScenarioReport};
pub use runner::run_scenario;
pub use selection::{choose_flow, select_offer_index, Capability, Flow};
pub use soft::SoftAssert;
pub use values::{parse_count, parse_price, BidAmount};
