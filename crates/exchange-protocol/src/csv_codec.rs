// crates/exchange-protocol/src/csv_codec.rs

//! CSV codec for order batches and execution reports.
//!
//! Input format (order batch):
//!
//! - The first non-blank line is the header. The five required columns
//!   are located by name, so column order does not matter:
//!   `Cl. Ord. ID`, `Instrument`, `Side`, `Quantity`, `Price`.
//! - Each following non-blank line is one order. Fields are split on
//!   commas and trimmed. Blank lines and `#` comments are skipped.
//! - A missing column or a batch with zero order rows aborts the run
//!   with a [`BatchError`]; a malformed *field* does not: numeric
//!   fields that fail to parse are downgraded to values the validator
//!   can never accept, so the row produces a Rejected report instead
//!   of disappearing.
//!
//! Output format (execution report): one header line
//! (`orderId,Cl. Ord. ID,...`) followed by one line per report, in
//! sink order.

use exchange_core::{ExecutionReport, RawOrder};
use thiserror::Error;

/// Header of the exported execution report.
pub const REPORT_HEADER: &str =
    "orderId,Cl. Ord. ID,Instrument,Side,ExecutionStatus,Quantity,Price,Reason for Rejection";

const COL_CLIENT_ORDER_ID: &str = "Cl. Ord. ID";
const COL_INSTRUMENT: &str = "Instrument";
const COL_SIDE: &str = "Side";
const COL_QUANTITY: &str = "Quantity";
const COL_PRICE: &str = "Price";

/// Fatal, batch-level ingestion failures. Either of these aborts the
/// run before any order reaches the engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    #[error("{0} column not found")]
    MissingColumn(&'static str),

    #[error("No orders found")]
    EmptyBatch,
}

/// Column indices resolved from the header line.
struct ColumnMap {
    client_order_id: usize,
    instrument: usize,
    side: usize,
    quantity: usize,
    price: usize,
}

impl ColumnMap {
    fn from_header(tokens: &[String]) -> Result<Self, BatchError> {
        let find = |name: &'static str| -> Result<usize, BatchError> {
            tokens
                .iter()
                .position(|t| t == name)
                .ok_or(BatchError::MissingColumn(name))
        };

        Ok(ColumnMap {
            client_order_id: find(COL_CLIENT_ORDER_ID)?,
            instrument: find(COL_INSTRUMENT)?,
            side: find(COL_SIDE)?,
            quantity: find(COL_QUANTITY)?,
            price: find(COL_PRICE)?,
        })
    }
}

/// Parse a whole order batch file into raw order records.
pub fn parse_orders(input: &str) -> Result<Vec<RawOrder>, BatchError> {
    let mut lines = input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'));

    let header = lines
        .next()
        .ok_or(BatchError::MissingColumn(COL_CLIENT_ORDER_ID))?;
    let columns = ColumnMap::from_header(&split_and_trim(header, ','))?;

    let orders: Vec<RawOrder> = lines
        .map(|line| parse_row(&columns, &split_and_trim(line, ',')))
        .collect();

    if orders.is_empty() {
        return Err(BatchError::EmptyBatch);
    }
    Ok(orders)
}

/// Parse one data row. Missing or unparseable numeric fields become
/// sentinel values that fail validation downstream (side `0`,
/// quantity `0`, price `-1.0`).
fn parse_row(columns: &ColumnMap, tokens: &[String]) -> RawOrder {
    let text = |idx: usize| tokens.get(idx).cloned().unwrap_or_default();

    RawOrder {
        client_order_id: text(columns.client_order_id),
        instrument: text(columns.instrument),
        side: tokens
            .get(columns.side)
            .and_then(|t| t.parse::<i64>().ok())
            .unwrap_or(0),
        quantity: tokens
            .get(columns.quantity)
            .and_then(|t| t.parse::<i64>().ok())
            .unwrap_or(0),
        price: tokens
            .get(columns.price)
            .and_then(|t| t.parse::<f64>().ok())
            .unwrap_or(-1.0),
    }
}

/// Format one execution report as a CSV line.
pub fn format_report_line(report: &ExecutionReport) -> String {
    format!(
        "{},{},{},{},{},{},{},{}",
        report.order_id,
        report.client_order_id,
        report.instrument,
        report.side,
        report.status,
        report.quantity,
        report.price,
        report.reason
    )
}

/// Render the full execution report, header included.
pub fn format_report_csv(reports: &[ExecutionReport]) -> String {
    let mut out = String::from(REPORT_HEADER);
    out.push('\n');
    for report in reports {
        out.push_str(&format_report_line(report));
        out.push('\n');
    }
    out
}

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

fn split_and_trim(s: &str, delimiter: char) -> Vec<String> {
    s.split(delimiter)
        .map(|token| token.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use exchange_core::{ExecutionStatus, MatchingEngine};

    const HEADER: &str = "Cl. Ord. ID,Instrument,Side,Quantity,Price";

    #[test]
    fn parses_a_simple_batch() {
        let input = format!("{HEADER}\nC1,Rose,1,100,10.0\nC2,Tulip,2,50,4.5\n");
        let orders = parse_orders(&input).unwrap();

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].client_order_id, "C1");
        assert_eq!(orders[0].instrument, "Rose");
        assert_eq!(orders[0].side, 1);
        assert_eq!(orders[0].quantity, 100);
        assert_eq!(orders[0].price, 10.0);
        assert_eq!(orders[1].side, 2);
    }

    #[test]
    fn header_columns_may_be_reordered() {
        let input = "Price,Side,Cl. Ord. ID,Quantity,Instrument\n10.0,1,C1,100,Rose\n";
        let orders = parse_orders(input).unwrap();

        assert_eq!(orders[0].client_order_id, "C1");
        assert_eq!(orders[0].instrument, "Rose");
        assert_eq!(orders[0].price, 10.0);
    }

    #[test]
    fn missing_column_is_fatal_with_the_column_name() {
        let input = "Cl. Ord. ID,Instrument,Side,Quantity\nC1,Rose,1,100\n";
        let err = parse_orders(input).unwrap_err();

        assert_eq!(err, BatchError::MissingColumn("Price"));
        assert_eq!(err.to_string(), "Price column not found");
    }

    #[test]
    fn batch_without_data_rows_is_fatal() {
        let err = parse_orders(&format!("{HEADER}\n")).unwrap_err();
        assert_eq!(err, BatchError::EmptyBatch);
        assert_eq!(err.to_string(), "No orders found");
    }

    #[test]
    fn blank_lines_and_comments_are_skipped() {
        let input = format!("\n# batch of one\n{HEADER}\n\nC1,Rose,1,100,10.0\n\n");
        assert_eq!(parse_orders(&input).unwrap().len(), 1);
    }

    #[test]
    fn unparseable_numerics_downgrade_to_rejectable_sentinels() {
        let input = format!("{HEADER}\nC1,Rose,buy,ten,free\n");
        let orders = parse_orders(&input).unwrap();

        assert_eq!(orders[0].side, 0);
        assert_eq!(orders[0].quantity, 0);
        assert_eq!(orders[0].price, -1.0);

        // The row reaches the engine and is rejected, not dropped.
        let mut engine = MatchingEngine::new();
        engine.submit_batch(orders);
        assert_eq!(engine.reports().len(), 1);
        assert_eq!(engine.reports()[0].status, ExecutionStatus::Rejected);
    }

    #[test]
    fn short_rows_reject_rather_than_panic() {
        let input = format!("{HEADER}\nC1,Rose\n");
        let orders = parse_orders(&input).unwrap();
        assert_eq!(orders[0].side, 0);
        assert_eq!(orders[0].price, -1.0);
    }

    #[test]
    fn report_lines_echo_every_field() {
        let mut engine = MatchingEngine::new();
        engine.submit_batch(
            parse_orders(&format!("{HEADER}\nC1,Rose,1,100,10.0\nC2,Rose,2,100,9.0\n")).unwrap(),
        );

        let rendered = format_report_csv(engine.reports());
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], REPORT_HEADER);
        assert_eq!(lines[1], "1,C1,Rose,Buy,New,100,10,");
        assert_eq!(lines[2], "2,C2,Rose,Sell,Filled,100,10,");
        assert_eq!(lines[3], "1,C1,Rose,Buy,Filled,100,10,");
    }

    #[test]
    fn rejected_report_carries_the_reason() {
        let mut engine = MatchingEngine::new();
        engine.submit_batch(parse_orders(&format!("{HEADER}\nC3,Rose,1,15,5.0\n")).unwrap());

        let line = format_report_line(&engine.reports()[0]);
        assert_eq!(line, "1,C3,Rose,Buy,Rejected,15,5,Invalid Quantity");
    }
}
