//! Outcome of a scenario run

use serde_json::{json, Value};

use super::selection::{Capability, Flow};
use super::values::BidAmount;
use crate::common::Error;

/// The category whose filtered listing was checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub name: String,
    pub href: String,
    pub offer_count: u64,
}

/// What the bid or buy flow did
#[derive(Debug, Clone, PartialEq)]
pub enum FlowOutcome {
    /// Bid submitted and the login gate was reached
    Bid { current_price: u64, bid: BidAmount },
    /// Item added and found in the basket
    Buy { name: String, price: String },
}

impl FlowOutcome {
    pub fn flow(&self) -> Flow {
        match self {
            Self::Bid { .. } => Flow::Bid,
            Self::Buy { .. } => Flow::Buy,
        }
    }
}

/// Result of one scenario run
///
/// Filled in as the scenario progresses, so a failed run still shows how
/// far it got.
#[derive(Debug)]
pub struct ScenarioReport {
    pub target: String,
    pub passed: bool,
    /// Names of the categories opened, in the order they were tried
    pub categories_visited: Vec<String>,
    pub category: Option<CategorySummary>,
    pub offers_checked: usize,
    pub selected_offer: Option<usize>,
    pub capability: Option<Capability>,
    pub flow: Option<FlowOutcome>,
    pub failure: Option<Error>,
}

impl ScenarioReport {
    pub fn new(target: &str) -> Self {
        Self {
            target: target.to_string(),
            passed: false,
            categories_visited: Vec::new(),
            category: None,
            offers_checked: 0,
            selected_offer: None,
            capability: None,
            flow: None,
            failure: None,
        }
    }

    pub fn to_json(&self) -> Value {
        let flow = self.flow.as_ref().map(|outcome| match outcome {
            FlowOutcome::Bid { current_price, bid } => json!({
                "flow": outcome.flow(),
                "current_price": current_price,
                "bid": bid.to_string(),
            }),
            FlowOutcome::Buy { name, price } => json!({
                "flow": outcome.flow(),
                "name": name,
                "price": price,
            }),
        });

        json!({
            "target": self.target,
            "passed": self.passed,
            "categories_visited": self.categories_visited,
            "category": self.category.as_ref().map(|c| json!({
                "name": c.name,
                "href": c.href,
                "offer_count": c.offer_count,
            })),
            "offers_checked": self.offers_checked,
            "selected_offer": self.selected_offer,
            "capability": self.capability,
            "flow": flow,
            "failure": self.failure.as_ref().map(|e| e.to_string()),
        })
    }
}
