//! Internal order representation used inside the order book.
//!
//! Only validated orders become an `Order`; the instrument and side are
//! typed and the quantity is known to be in range. This type is not
//! exposed over any wire format; it is purely internal to the engine.

use crate::instrument::Instrument;
use crate::side::Side;

/// A single accepted order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    /// Assigned sequentially across the whole session, rejects included.
    pub order_id: u64,
    pub client_order_id: String,
    pub instrument: Instrument,
    pub side: Side,

    /// Originally submitted quantity.
    pub quantity: u32,
    /// Unfilled remainder; the book removes the order when this hits 0.
    pub remaining_qty: u32,
    /// Limit price.
    pub price: f64,

    /// Time priority: monotonic counter assigned at validation time.
    /// Orders at the same price match in ascending `arrival_seq`.
    pub arrival_seq: u64,
}

impl Order {
    /// Returns `true` once the order is fully filled.
    pub fn is_filled(&self) -> bool {
        self.remaining_qty == 0
    }

    /// Fill the order by up to `qty` units; returns the quantity
    /// actually filled (`<= qty` and `<= remaining_qty`).
    pub fn fill(&mut self, qty: u32) -> u32 {
        let filled = qty.min(self.remaining_qty);
        self.remaining_qty -= filled;
        filled
    }
}
