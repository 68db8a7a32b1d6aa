//! Batch trader front end.
//!
//! Reads an order batch CSV, submits it to a fresh exchange session,
//! writes the execution report (CSV or JSON lines) and prints a summary
//! table. Batch-level problems (a missing column, an empty batch)
//! abort the run before any order is processed, so no report file is
//! produced at all; per-order rule violations show up as Rejected rows
//! in the report instead.

mod table;

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use exchange_core::MatchingEngine;
use exchange_protocol::csv_codec;

#[derive(Debug, Parser)]
#[command(name = "exchange-trader", about = "Run an order batch through the flower exchange")]
struct Args {
    /// Order batch CSV to submit.
    orders: PathBuf,

    /// Where to write the execution report.
    #[arg(short, long, default_value = "ExecutionReport.csv")]
    output: PathBuf,

    /// Report file format.
    #[arg(long, value_enum, default_value = "csv")]
    format: Format,

    /// Skip printing the report table to stdout.
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    Csv,
    /// One JSON object per report line.
    Json,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let input = fs::read_to_string(&args.orders)
        .with_context(|| format!("reading order batch {}", args.orders.display()))?;

    // Fatal before the engine sees anything: missing column, empty batch.
    let orders = csv_codec::parse_orders(&input)?;
    info!(orders = orders.len(), "order batch parsed");

    let mut engine = MatchingEngine::new();
    engine.submit_batch(orders);
    let reports = engine.reports();

    let rendered = match args.format {
        Format::Csv => csv_codec::format_report_csv(reports),
        Format::Json => {
            let mut out = String::new();
            for report in reports {
                out.push_str(&serde_json::to_string(report)?);
                out.push('\n');
            }
            out
        }
    };
    fs::write(&args.output, rendered)
        .with_context(|| format!("writing execution report {}", args.output.display()))?;

    if !args.quiet {
        println!("{}", table::render(reports));
    }

    info!(
        reports = reports.len(),
        output = %args.output.display(),
        "execution report written"
    );

    Ok(())
}
