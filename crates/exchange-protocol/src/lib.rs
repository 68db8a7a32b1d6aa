//! exchange-protocol
//!
//! File-format layer for the exchange. This crate is responsible for
//! turning an order batch file into `exchange_core::RawOrder` records
//! and an execution report back into a delimited file.
//!
//! Batch-level problems (missing column, empty batch) are fatal and
//! surface here as [`BatchError`] before the core ever sees an order;
//! per-order problems are *not* this crate's concern: malformed rows
//! flow through to the validator so they are rejected with a report.

pub mod csv_codec;

pub use csv_codec::{
    format_report_csv, format_report_line, parse_orders, BatchError, REPORT_HEADER,
};
