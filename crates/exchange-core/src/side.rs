//! Side (Buy / Sell) for orders and execution reports.

use std::fmt;

/// Order side: Buy or Sell.
///
/// On the wire the side is a numeric code (`1` = Buy, `2` = Sell);
/// anything else fails validation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Try to parse from the numeric submission code (`1` / `2`).
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Side::Buy),
            2 => Some(Side::Sell),
            _ => None,
        }
    }

    /// The numeric submission code for this side.
    pub fn as_code(self) -> i64 {
        match self {
            Side::Buy => 1,
            Side::Sell => 2,
        }
    }

    /// The side a crossing counter-order must have.
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "Buy"),
            Side::Sell => write!(f, "Sell"),
        }
    }
}
