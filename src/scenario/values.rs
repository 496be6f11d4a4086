//! Numbers read from and written to the page

use std::fmt;

use crate::common::{strip_spaces, Error, Result};

/// Currency suffix shown after prices
const CURRENCY: &str = "Kč";

/// Parse the filtered results indicator, e.g. `"1 234"`
pub fn parse_count(text: &str) -> Result<u64> {
    strip_spaces(text.trim())
        .parse()
        .map_err(|_| Error::parse("results count", text))
}

/// Parse a whole-crown price, e.g. `"1 250 Kč"`
pub fn parse_price(text: &str) -> Result<u64> {
    let compact = strip_spaces(text.trim());
    compact
        .strip_suffix(CURRENCY)
        .unwrap_or(&compact)
        .parse()
        .map_err(|_| Error::parse("price", text))
}

/// A bid amount kept in tenths of a crown so 120% stays exact
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BidAmount {
    tenths: u64,
}

impl BidAmount {
    /// 120% of the current price
    pub fn raise(price: u64) -> Self {
        Self { tenths: price * 12 }
    }
}

impl fmt::Display for BidAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (whole, frac) = (self.tenths / 10, self.tenths % 10);
        if frac == 0 {
            write!(f, "{}", whole)
        } else {
            write!(f, "{}.{}", whole, frac)
        }
    }
}
