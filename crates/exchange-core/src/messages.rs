//! Message types at the edges of the core.
//!
//! These are transport-agnostic logical records:
//! - [`RawOrder`]: what the ingestion layer hands the engine, field for
//!   field as submitted. Deliberately loose (side is still a numeric
//!   code, instrument still free text) because the validator is the one
//!   place those are judged, and a rejected order's report must echo the
//!   submitted values verbatim.
//! - [`ExecutionReport`]: one outcome record for one event affecting one
//!   order (rejection, booking, fill).
//!
//! CSV encoding of both lives in the `exchange-protocol` crate; this
//! module is purely logical.

use std::fmt;

use serde::Serialize;

use crate::order::Order;
use crate::side::Side;
use crate::validation::RejectReason;

/// A single order record as submitted, before validation.
///
/// Numeric fields that failed to parse upstream are carried as values
/// that can never validate (side `0`, quantity `0`, price `-1.0`), so a
/// malformed row is rejected with a report instead of silently dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct RawOrder {
    pub client_order_id: String,
    pub instrument: String,
    /// Side code: `1` = Buy, `2` = Sell.
    pub side: i64,
    pub quantity: i64,
    pub price: f64,
}

/// Outcome of one event affecting one order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum ExecutionStatus {
    New,
    PartiallyFilled,
    Filled,
    Rejected,
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExecutionStatus::New => "New",
            ExecutionStatus::PartiallyFilled => "PartiallyFilled",
            ExecutionStatus::Filled => "Filled",
            ExecutionStatus::Rejected => "Rejected",
        };
        f.write_str(s)
    }
}

/// One row of the execution report.
///
/// `quantity` and `price` are the quantity and price concerned by *this*
/// report: the executed quantity and execution price for a fill, the
/// submitted quantity and limit price for a rejection or a booking.
/// Instrument and side are text so a rejected order's report can echo
/// whatever was submitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionReport {
    pub order_id: u64,
    pub client_order_id: String,
    pub instrument: String,
    pub side: String,
    pub status: ExecutionStatus,
    pub quantity: i64,
    pub price: f64,
    /// Empty unless `status` is `Rejected`.
    pub reason: String,
}

impl ExecutionReport {
    /// Report for an order that failed validation. Echoes the submitted
    /// fields; the order never reaches a book.
    pub fn rejected(order_id: u64, raw: &RawOrder, reason: RejectReason) -> Self {
        ExecutionReport {
            order_id,
            client_order_id: raw.client_order_id.clone(),
            instrument: raw.instrument.clone(),
            side: side_text(raw.side),
            status: ExecutionStatus::Rejected,
            quantity: raw.quantity,
            price: raw.price,
            reason: reason.as_str().to_string(),
        }
    }

    /// Report for an accepted order that booked with no immediate match.
    pub fn booked(order: &Order) -> Self {
        ExecutionReport {
            order_id: order.order_id,
            client_order_id: order.client_order_id.clone(),
            instrument: order.instrument.to_string(),
            side: order.side.to_string(),
            status: ExecutionStatus::New,
            quantity: i64::from(order.remaining_qty),
            price: order.price,
            reason: String::new(),
        }
    }

    /// Report for one fill event. Status is derived from the order's
    /// remaining quantity *after* the fill was applied.
    pub fn fill(order: &Order, executed_qty: u32, execution_price: f64) -> Self {
        let status = if order.is_filled() {
            ExecutionStatus::Filled
        } else {
            ExecutionStatus::PartiallyFilled
        };
        ExecutionReport {
            order_id: order.order_id,
            client_order_id: order.client_order_id.clone(),
            instrument: order.instrument.to_string(),
            side: order.side.to_string(),
            status,
            quantity: i64::from(executed_qty),
            price: execution_price,
            reason: String::new(),
        }
    }
}

/// Text form of a submitted side code: the side name when the code is
/// recognizable, the raw code otherwise.
fn side_text(code: i64) -> String {
    match Side::from_code(code) {
        Some(side) => side.to_string(),
        None => code.to_string(),
    }
}
