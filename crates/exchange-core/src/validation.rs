//! The validation gate in front of the matching engine.
//!
//! Checks run in a fixed priority order and stop at the first failure,
//! so an order that is wrong in several ways is rejected for the
//! highest-priority violation only:
//!
//! 1. client order id: non-empty, at most [`MAX_CLIENT_ORDER_ID_CHARS`]
//! 2. instrument: one of the listed names
//! 3. side: code `1` (Buy) or `2` (Sell)
//! 4. quantity: within [`MIN_QUANTITY`]..=[`MAX_QUANTITY`], a multiple
//!    of [`QUANTITY_LOT`]
//! 5. price: non-negative
//!
//! Validation is stateless: it neither assigns ids nor touches a book.

use std::fmt;

use crate::instrument::Instrument;
use crate::messages::RawOrder;
use crate::side::Side;

/// Longest accepted client order id, in characters.
pub const MAX_CLIENT_ORDER_ID_CHARS: usize = 6;

/// Smallest accepted order quantity.
pub const MIN_QUANTITY: i64 = 10;

/// Largest accepted order quantity.
pub const MAX_QUANTITY: i64 = 1000;

/// Quantities must be a multiple of this lot size.
pub const QUANTITY_LOT: i64 = 10;

/// Why an order was rejected. The display text is the exact reason
/// string carried in the execution report.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RejectReason {
    InvalidClientOrderId,
    InvalidInstrument,
    InvalidSide,
    InvalidQuantity,
    InvalidPrice,
}

impl RejectReason {
    /// The reason text as it appears in the execution report.
    pub fn as_str(self) -> &'static str {
        match self {
            RejectReason::InvalidClientOrderId => "Invalid Cl. Ord. ID",
            RejectReason::InvalidInstrument => "Invalid Instrument",
            RejectReason::InvalidSide => "Invalid Side",
            RejectReason::InvalidQuantity => "Invalid Quantity",
            RejectReason::InvalidPrice => "Invalid Price",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The typed fields of an order that passed every check.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ValidatedOrder {
    pub instrument: Instrument,
    pub side: Side,
    pub quantity: u32,
    pub price: f64,
}

/// Run the fixed-priority checks against one submitted order.
pub fn validate(raw: &RawOrder) -> Result<ValidatedOrder, RejectReason> {
    if raw.client_order_id.is_empty()
        || raw.client_order_id.chars().count() > MAX_CLIENT_ORDER_ID_CHARS
    {
        return Err(RejectReason::InvalidClientOrderId);
    }

    let Some(instrument) = Instrument::from_name(&raw.instrument) else {
        return Err(RejectReason::InvalidInstrument);
    };

    let Some(side) = Side::from_code(raw.side) else {
        return Err(RejectReason::InvalidSide);
    };

    if raw.quantity < MIN_QUANTITY
        || raw.quantity > MAX_QUANTITY
        || raw.quantity % QUANTITY_LOT != 0
    {
        return Err(RejectReason::InvalidQuantity);
    }

    // Written as a negated `>=` so NaN also fails the check.
    if !(raw.price >= 0.0) {
        return Err(RejectReason::InvalidPrice);
    }

    Ok(ValidatedOrder {
        instrument,
        side,
        quantity: raw.quantity as u32,
        price: raw.price,
    })
}
