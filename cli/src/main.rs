//! Prints the permutation schedule, its step matrices, or the round-function tables.

mod parsers;
mod render;

use clap::Parser;
use ftpad_schedule::{
    PermutationVector, RoundTable, ScheduleError, generate_schedule, inverse_chain,
    word_split_seed,
};
use thiserror::Error;
use tracing::{debug, debug_span};
use tracing_forest::ForestLayer;
use tracing_forest::util::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

use crate::parsers::{ByteOrderOptions, FormatOptions, TableOptions};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Which vectors to print.
    #[arg(short, long, ignore_case = true, value_enum, default_value_t = TableOptions::Schedule)]
    table: TableOptions,

    /// The word layout the vectors are expressed in.
    #[arg(short, long, ignore_case = true, value_enum, default_value_t = ByteOrderOptions::Native)]
    byte_order: ByteOrderOptions,

    /// How to print the vectors.
    #[arg(short, long, ignore_case = true, value_enum, default_value_t = FormatOptions::Plain)]
    format: FormatOptions,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> Result<(), CliError> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    Registry::default()
        .with(env_filter)
        .with(ForestLayer::default())
        .init();

    let args = Args::parse();
    let order = args.byte_order.resolve();

    let rows: Vec<PermutationVector> = match args.table {
        TableOptions::Schedule => generate_schedule().in_order(order).steps().to_vec(),
        TableOptions::Inverse => inverse_chain(&generate_schedule(), order, &word_split_seed())?,
        TableOptions::Round => RoundTable::derive(order)?.rows().to_vec(),
    };
    debug!(table = ?args.table, %order, rows = rows.len(), "derived vectors");

    let output = debug_span!("render", format = ?args.format)
        .in_scope(|| render::render(&rows, args.format))?;
    print!("{output}");
    Ok(())
}
