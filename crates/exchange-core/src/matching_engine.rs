//! Multi-instrument matching engine: the exchange session component.
//!
//! - Maintains one [`OrderBook`] per instrument, created on demand.
//! - Assigns order ids (to every submission, rejects included) and
//!   arrival sequence numbers (to accepted orders only).
//! - Runs the validation gate, routes accepted orders to the right
//!   book, and appends every produced report to the session's
//!   [`ReportSink`].
//!
//! Processing is strictly sequential: each order is fully validated and
//! matched, and its reports emitted, before the next order is looked at.
//! Books and sink persist across batches submitted to the same engine;
//! discard the engine to tear the session down.

use std::collections::HashMap;

use tracing::debug;

use crate::instrument::Instrument;
use crate::messages::{ExecutionReport, RawOrder};
use crate::order::Order;
use crate::order_book::OrderBook;
use crate::report_sink::ReportSink;
use crate::validation;

/// Multi-instrument matching engine owning the books and report log of
/// one exchange session.
#[derive(Debug)]
pub struct MatchingEngine {
    /// Instrument -> OrderBook.
    books: HashMap<Instrument, OrderBook>,
    sink: ReportSink,

    /// Next order id; assigned to every submission in order.
    next_order_id: u64,
    /// Next time-priority sequence; assigned to accepted orders only.
    next_arrival_seq: u64,
}

impl MatchingEngine {
    /// Create a fresh session with empty books and an empty report log.
    pub fn new() -> Self {
        MatchingEngine {
            books: HashMap::new(),
            sink: ReportSink::new(),
            next_order_id: 1,
            next_arrival_seq: 1,
        }
    }

    /// Submit an ordered batch; each order is fully processed before the
    /// next one is considered.
    pub fn submit_batch(&mut self, orders: impl IntoIterator<Item = RawOrder>) {
        for raw in orders {
            self.submit_order(raw);
        }
    }

    /// Submit a single order: assign its id, validate, and either log
    /// the rejection or match it against its instrument's book.
    pub fn submit_order(&mut self, raw: RawOrder) {
        let order_id = self.next_order_id;
        self.next_order_id += 1;

        match validation::validate(&raw) {
            Err(reason) => {
                debug!(order_id, reason = %reason, "order rejected");
                self.sink.push(ExecutionReport::rejected(order_id, &raw, reason));
            }
            Ok(valid) => {
                let arrival_seq = self.next_arrival_seq;
                self.next_arrival_seq += 1;

                let order = Order {
                    order_id,
                    client_order_id: raw.client_order_id,
                    instrument: valid.instrument,
                    side: valid.side,
                    quantity: valid.quantity,
                    remaining_qty: valid.quantity,
                    price: valid.price,
                    arrival_seq,
                };

                let book = self.get_or_create_book(valid.instrument);
                let reports = book.execute(order);
                self.sink.extend(reports);
            }
        }
    }

    /// The session's full report sequence, in emission order.
    pub fn reports(&self) -> &[ExecutionReport] {
        self.sink.as_slice()
    }

    /// Read access to the report sink.
    pub fn sink(&self) -> &ReportSink {
        &self.sink
    }

    /// The book for an instrument, if any order has reached it yet.
    pub fn book(&self, instrument: Instrument) -> Option<&OrderBook> {
        self.books.get(&instrument)
    }

    /// Number of instruments with an instantiated book.
    pub fn num_books(&self) -> usize {
        self.books.len()
    }

    /// Get the book for an instrument, creating it on first use.
    fn get_or_create_book(&mut self, instrument: Instrument) -> &mut OrderBook {
        self.books
            .entry(instrument)
            .or_insert_with(|| OrderBook::new(instrument))
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        MatchingEngine::new()
    }
}
