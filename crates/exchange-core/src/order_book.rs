//! Single-instrument order book with price-time priority.
//!
//! - One instance per instrument; the engine routes by instrument, so
//!   two orders in different books can never meet.
//! - Bids: best = highest price. Asks: best = lowest price.
//! - FIFO (time priority) within each price level. Insertion happens in
//!   submission order, so queue position equals `arrival_seq` order.
//!
//! Price levels are `BTreeMap`s keyed by `OrderedFloat<f64>` so decimal
//! limit prices get a total order. Validation upstream guarantees no
//! NaN ever reaches a book.

use std::collections::{BTreeMap, VecDeque};

use ordered_float::OrderedFloat;
use tracing::debug;

use crate::instrument::Instrument;
use crate::messages::ExecutionReport;
use crate::order::Order;
use crate::side::Side;

type PriceKey = OrderedFloat<f64>;

/// Single-instrument order book.
#[derive(Debug)]
pub struct OrderBook {
    instrument: Instrument,

    /// Bids: price -> FIFO queue of orders at that price.
    /// Keys sort ascending; the highest key is the best bid.
    bids: BTreeMap<PriceKey, VecDeque<Order>>,

    /// Asks: price -> FIFO queue of orders at that price.
    /// Keys sort ascending; the lowest key is the best ask.
    asks: BTreeMap<PriceKey, VecDeque<Order>>,
}

impl OrderBook {
    /// Create an empty book for the given instrument.
    pub fn new(instrument: Instrument) -> Self {
        OrderBook {
            instrument,
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
        }
    }

    /// The instrument this book trades.
    pub fn instrument(&self) -> Instrument {
        self.instrument
    }

    /// Run an accepted aggressor order through the book.
    ///
    /// Matches against the opposite side in price-time priority,
    /// emitting one report pair per fill (aggressor first, then the
    /// resting order). Any unfilled remainder rests; if the order booked
    /// without a single fill, a `New` report is emitted instead.
    pub fn execute(&mut self, mut order: Order) -> Vec<ExecutionReport> {
        debug_assert_eq!(order.instrument, self.instrument);

        let mut reports = Vec::new();
        self.match_order(&mut order, &mut reports);

        if order.remaining_qty > 0 {
            if reports.is_empty() {
                reports.push(ExecutionReport::booked(&order));
            }
            self.insert_resting(order);
        }

        reports
    }

    /// Insert a remainder into the correct side, keeping the priority
    /// ordering (level lookup is O(log n); FIFO append within a level).
    pub fn insert_resting(&mut self, order: Order) {
        debug_assert!(order.remaining_qty > 0);
        let levels = match order.side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        levels
            .entry(OrderedFloat(order.price))
            .or_default()
            .push_back(order);
    }

    /// Best bid as `(price, total quantity at that price)`.
    pub fn best_bid(&self) -> Option<(f64, u32)> {
        let (&price, queue) = self.bids.last_key_value()?;
        Some((price.0, Self::total_quantity(queue)))
    }

    /// Best ask as `(price, total quantity at that price)`.
    pub fn best_ask(&self) -> Option<(f64, u32)> {
        let (&price, queue) = self.asks.first_key_value()?;
        Some((price.0, Self::total_quantity(queue)))
    }

    /// True when neither side holds any resting order.
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// All resting orders, bids then asks, in level order.
    pub fn resting_orders(&self) -> impl Iterator<Item = &Order> {
        self.bids
            .values()
            .flatten()
            .chain(self.asks.values().flatten())
    }

    // -------------------------------------------------------------------------
    // Internal helpers
    // -------------------------------------------------------------------------

    /// Match an incoming aggressor against the opposite side.
    ///
    /// Fills mutate both orders and push their report pair; exhausted
    /// resting orders are removed immediately, as are emptied price
    /// levels. Any remainder is left in `order` for the caller.
    fn match_order(&mut self, order: &mut Order, reports: &mut Vec<ExecutionReport>) {
        match order.side {
            Side::Buy => {
                // Buy aggressor: match against asks, lowest price first.
                loop {
                    if order.remaining_qty == 0 || self.asks.is_empty() {
                        break;
                    }

                    // Copy the key out before mutating the level.
                    let best_ask = match self.asks.keys().next().copied() {
                        Some(p) => p,
                        None => break,
                    };

                    // Crossing test; priority order makes the first
                    // non-crossing level final.
                    if order.price < best_ask.0 {
                        break;
                    }

                    if let Some(queue) = self.asks.get_mut(&best_ask) {
                        Self::match_level(self.instrument, order, best_ask.0, queue, reports);
                    }

                    if let Some(queue) = self.asks.get(&best_ask) {
                        if queue.is_empty() {
                            self.asks.remove(&best_ask);
                        }
                    }
                }
            }
            Side::Sell => {
                // Sell aggressor: match against bids, highest price first.
                loop {
                    if order.remaining_qty == 0 || self.bids.is_empty() {
                        break;
                    }

                    let best_bid = match self.bids.keys().next_back().copied() {
                        Some(p) => p,
                        None => break,
                    };

                    if order.price > best_bid.0 {
                        break;
                    }

                    if let Some(queue) = self.bids.get_mut(&best_bid) {
                        Self::match_level(self.instrument, order, best_bid.0, queue, reports);
                    }

                    if let Some(queue) = self.bids.get(&best_bid) {
                        if queue.is_empty() {
                            self.bids.remove(&best_bid);
                        }
                    }
                }
            }
        }
    }

    /// Trade the aggressor against one price level, FIFO.
    ///
    /// The execution price is always the resting level's price: price
    /// improvement flows to the aggressor.
    fn match_level(
        instrument: Instrument,
        order: &mut Order,
        execution_price: f64,
        queue: &mut VecDeque<Order>,
        reports: &mut Vec<ExecutionReport>,
    ) {
        while order.remaining_qty > 0 && !queue.is_empty() {
            let Some(resting) = queue.front_mut() else {
                break;
            };

            let matched = order.remaining_qty.min(resting.remaining_qty);
            order.fill(matched);
            resting.fill(matched);

            debug!(
                instrument = %instrument,
                price = execution_price,
                quantity = matched,
                aggressor = order.order_id,
                resting = resting.order_id,
                "trade"
            );

            // Aggressor's report first, then the resting order's.
            reports.push(ExecutionReport::fill(order, matched, execution_price));
            reports.push(ExecutionReport::fill(resting, matched, execution_price));

            if resting.is_filled() {
                queue.pop_front();
            }
        }
    }

    /// Sum of remaining quantity across all orders at one price level.
    fn total_quantity(queue: &VecDeque<Order>) -> u32 {
        queue.iter().map(|o| o.remaining_qty).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::ExecutionStatus;

    fn order(order_id: u64, side: Side, quantity: u32, price: f64, arrival_seq: u64) -> Order {
        Order {
            order_id,
            client_order_id: format!("C{order_id}"),
            instrument: Instrument::Rose,
            side,
            quantity,
            remaining_qty: quantity,
            price,
            arrival_seq,
        }
    }

    #[test]
    fn first_order_books_with_a_new_report() {
        let mut book = OrderBook::new(Instrument::Rose);
        let reports = book.execute(order(1, Side::Buy, 100, 10.0, 1));

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].status, ExecutionStatus::New);
        assert_eq!(reports[0].quantity, 100);
        assert_eq!(reports[0].price, 10.0);
        assert_eq!(book.best_bid(), Some((10.0, 100)));
    }

    #[test]
    fn trade_executes_at_resting_price() {
        let mut book = OrderBook::new(Instrument::Rose);
        book.execute(order(1, Side::Buy, 100, 10.0, 1));
        let reports = book.execute(order(2, Side::Sell, 100, 9.0, 2));

        assert_eq!(reports.len(), 2);
        for r in &reports {
            assert_eq!(r.status, ExecutionStatus::Filled);
            assert_eq!(r.quantity, 100);
            assert_eq!(r.price, 10.0);
        }
        // Aggressor's report comes first.
        assert_eq!(reports[0].order_id, 2);
        assert_eq!(reports[1].order_id, 1);
        assert!(book.is_empty());
    }

    #[test]
    fn non_crossing_remainder_rests_instead_of_vanishing() {
        let mut book = OrderBook::new(Instrument::Rose);
        book.execute(order(1, Side::Sell, 100, 11.0, 1));
        let reports = book.execute(order(2, Side::Buy, 100, 10.0, 2));

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].status, ExecutionStatus::New);
        assert_eq!(book.best_bid(), Some((10.0, 100)));
        assert_eq!(book.best_ask(), Some((11.0, 100)));
    }

    #[test]
    fn aggressor_walks_multiple_levels() {
        let mut book = OrderBook::new(Instrument::Rose);
        book.execute(order(1, Side::Sell, 50, 9.0, 1));
        book.execute(order(2, Side::Sell, 50, 9.5, 2));
        book.execute(order(3, Side::Sell, 50, 11.0, 3));

        let reports = book.execute(order(4, Side::Buy, 120, 10.0, 4));

        // Two fills (at 9.0 then 9.5), two report pairs, then the
        // 20-lot remainder rests against the non-crossing 11.0 ask.
        assert_eq!(reports.len(), 4);
        assert_eq!(reports[0].price, 9.0);
        assert_eq!(reports[0].quantity, 50);
        assert_eq!(reports[2].price, 9.5);
        assert_eq!(reports[2].quantity, 50);
        assert_eq!(reports[2].status, ExecutionStatus::PartiallyFilled);
        assert_eq!(book.best_bid(), Some((10.0, 20)));
        assert_eq!(book.best_ask(), Some((11.0, 50)));
    }

    #[test]
    fn fifo_within_a_price_level() {
        let mut book = OrderBook::new(Instrument::Rose);
        book.execute(order(1, Side::Sell, 50, 9.0, 1));
        book.execute(order(2, Side::Sell, 50, 9.0, 2));

        let reports = book.execute(order(3, Side::Buy, 50, 9.0, 3));

        assert_eq!(reports.len(), 2);
        // The earlier arrival at the level matched, the later still rests.
        assert_eq!(reports[1].order_id, 1);
        let resting: Vec<u64> = book.resting_orders().map(|o| o.order_id).collect();
        assert_eq!(resting, vec![2]);
    }

    #[test]
    fn exhausted_resting_orders_are_removed_immediately() {
        let mut book = OrderBook::new(Instrument::Rose);
        book.execute(order(1, Side::Sell, 50, 9.0, 1));
        book.execute(order(2, Side::Buy, 100, 10.0, 2));

        // The 50-lot ask is gone; the buy remainder rests at 10.0.
        assert_eq!(book.best_ask(), None);
        assert_eq!(book.best_bid(), Some((10.0, 50)));
        assert!(book.resting_orders().all(|o| o.remaining_qty > 0));
    }
}
