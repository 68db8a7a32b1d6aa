//! Plain-text rendering of the execution report.

use exchange_core::ExecutionReport;

const HEADERS: [&str; 8] = [
    "orderId",
    "Cl. Ord. ID",
    "Instrument",
    "Side",
    "ExecutionStatus",
    "Quantity",
    "Price",
    "Reason",
];

/// Render the report as an aligned text table.
pub fn render(reports: &[ExecutionReport]) -> String {
    let rows: Vec<[String; 8]> = reports
        .iter()
        .map(|r| {
            [
                r.order_id.to_string(),
                r.client_order_id.clone(),
                r.instrument.clone(),
                r.side.clone(),
                r.status.to_string(),
                r.quantity.to_string(),
                r.price.to_string(),
                r.reason.clone(),
            ]
        })
        .collect();

    let mut widths: [usize; 8] = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &widths, &HEADERS.map(String::from));
    push_separator(&mut out, &widths);
    for row in &rows {
        push_row(&mut out, &widths, row);
    }
    out
}

fn push_row(out: &mut String, widths: &[usize; 8], cells: &[String; 8]) {
    for (i, (cell, width)) in cells.iter().zip(widths.iter()).enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        out.push_str(cell);
        for _ in cell.chars().count()..*width {
            out.push(' ');
        }
    }
    // Trim the padding on the last column.
    while out.ends_with(' ') {
        out.pop();
    }
    out.push('\n');
}

fn push_separator(out: &mut String, widths: &[usize; 8]) {
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        for _ in 0..*width {
            out.push('-');
        }
    }
    out.push('\n');
}
