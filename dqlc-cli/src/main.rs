//! dqlc CLI - a command-line front end for the dynamic query compiler.
//!
//! Reads a JSON array of records from stdin or a file, compiles a filter
//! and/or sort clause against them, and prints the result as JSON.

mod error;
mod record;

use std::io::Read as _;
use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use error::{DqlcCliError, Result};
use record::Item;

/// dqlc - apply a filter and/or sort clause to a JSON array of records.
///
/// Records are objects shaped `{"id": <int>, "code": <string>}`, matching
/// the `Item` record type the filter and sort clauses are compiled
/// against.
#[derive(Parser, Debug)]
#[command(name = "dqlc")]
#[command(author = "Dynamic Query Compiler Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Filter and sort a JSON array of records with dynamic query clauses", long_about = None)]
struct Cli {
    /// Enable verbose (debug-level) logging
    #[arg(short, long, global = true, env = "DQLC_VERBOSE")]
    verbose: bool,

    /// Disable color output
    #[arg(long, global = true, env = "DQLC_NO_COLOR")]
    no_color: bool,

    /// Path to a JSON file containing the input array; reads stdin if omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Filter clause, e.g. "Id > 2"
    #[arg(short, long)]
    filter: Option<String>,

    /// Sort clause, e.g. "Name DESC, Id"
    #[arg(short, long)]
    sort: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.no_color)?;

    let records = read_records(cli.input.as_deref())?;
    info!(count = records.len(), "loaded records");

    let filtered: Vec<Item> = match cli.filter.as_deref() {
        Some(clause) => {
            debug!(%clause, "compiling filter clause");
            dqlc::filter_by(&records, clause)?
                .into_iter()
                .cloned()
                .collect()
        }
        None => records,
    };

    let sorted = match cli.sort.as_deref() {
        Some(clause) => {
            debug!(%clause, "compiling sort clause");
            dqlc::sort_by(&filtered, clause)?
        }
        None => filtered,
    };

    let output = serde_json::to_string_pretty(&sorted)?;
    println!("{output}");
    Ok(())
}

fn init_logging(verbose: bool, no_color: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let subscriber = fmt::layer()
        .with_ansi(!no_color)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| DqlcCliError::Config(format!("Failed to initialize logging: {e}")))?;

    Ok(())
}

fn read_records(path: Option<&std::path::Path>) -> Result<Vec<Item>> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| DqlcCliError::FileOperation(format!("{}: {e}", path.display())))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(serde_json::from_str(&raw)?)
}
