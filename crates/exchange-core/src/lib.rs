//! exchange-core
//!
//! Pure exchange logic for a batch-driven continuous double auction:
//! - messages (raw order records, execution reports)
//! - the validation gate
//! - per-instrument order books with price-time priority
//! - the multi-instrument matching engine (session component)
//! - the append-only execution report sink

pub mod instrument;
pub mod matching_engine;
pub mod messages;
pub mod order;
pub mod order_book;
pub mod report_sink;
pub mod side;
pub mod validation;

pub use instrument::Instrument;
pub use side::Side;

pub use messages::{ExecutionReport, ExecutionStatus, RawOrder};

pub use matching_engine::MatchingEngine;
pub use order::Order;
pub use order_book::OrderBook;
pub use report_sink::ReportSink;
pub use validation::{RejectReason, ValidatedOrder};
