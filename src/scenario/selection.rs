//! Offer selection and flow dispatch rules

use std::fmt;

use rand::Rng;
use serde::Serialize;

/// Index of the offer to open out of `count` listed offers
///
/// Even counts pick uniformly at random, odd counts pick the middle one.
/// Returns `None` for an empty listing.
pub fn select_offer_index<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Option<usize> {
    if count == 0 {
        None
    } else if count % 2 == 0 {
        Some(rng.gen_range(0..count))
    } else {
        Some(count / 2)
    }
}

/// Which purchase actions an offer detail page exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    BidOnly,
    BuyOnly,
    Both,
    Neither,
}

impl Capability {
    pub fn detect(can_bid: bool, can_buy: bool) -> Self {
        match (can_bid, can_buy) {
            (true, false) => Self::BidOnly,
            (false, true) => Self::BuyOnly,
            (true, true) => Self::Both,
            (false, false) => Self::Neither,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BidOnly => write!(f, "bid only"),
            Self::BuyOnly => write!(f, "buy only"),
            Self::Both => write!(f, "bid and buy"),
            Self::Neither => write!(f, "neither bid nor buy"),
        }
    }
}

/// The sub-flow run against the opened offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Flow {
    Bid,
    Buy,
}

/// Pick the flow for a capability; `Both` is decided by a fair coin
pub fn choose_flow<R: Rng + ?Sized>(capability: Capability, rng: &mut R) -> Option<Flow> {
    match capability {
        Capability::BidOnly => Some(Flow::Bid),
        Capability::BuyOnly => Some(Flow::Buy),
        Capability::Both => Some(if rng.gen::<bool>() { Flow::Bid } else { Flow::Buy }),
        Capability::Neither => None,
    }
}
