//! Exposure Ledger CLI
//!
//! Replays a JSON-lines invoice event log and prints monthly peak and
//! end-of-month exposure.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --path events.jsonl
//! cargo run -- --path events.jsonl --format json --series-out series.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Logging verbosity, `info` by default; `warn` lists only skipped lines
//! - `EXPOSURE_EPOCH_YEAR`: Accepted event year when `--year` is not given

use clap::{Parser, ValueEnum};
use exposure_ledger::{ExposureEngine, LedgerConfig, Result, DEFAULT_EPOCH_YEAR};
use log::info;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(
    name = "exposure-ledger",
    about = "Derive monthly credit exposure from an invoice event log",
    version
)]
struct Cli {
    /// Event log, one JSON object per line
    #[arg(short, long)]
    path: PathBuf,

    /// Only events dated in this year are accepted
    #[arg(long, env = "EXPOSURE_EPOCH_YEAR", default_value_t = DEFAULT_EPOCH_YEAR)]
    year: i32,

    /// Report format written to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Also write the exposure series as CSV for charting
    #[arg(long)]
    series_out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = LedgerConfig {
        epoch_year: cli.year,
    };

    let file = File::open(&cli.path)?;
    let mut engine = ExposureEngine::new(config);
    engine.process_reader(file)?;

    let report = engine.report();
    info!(
        "Replayed {} events over {} invoices, skipped {} lines",
        report.series.len(),
        report.invoices,
        report.skipped
    );

    let stdout = io::stdout();
    let handle = stdout.lock();
    match cli.format {
        OutputFormat::Text => report.write_text(handle)?,
        OutputFormat::Json => report.write_json(handle)?,
    }

    if let Some(path) = &cli.series_out {
        let file = File::create(path)?;
        report.write_series_csv(BufWriter::new(file))?;
        info!("Wrote exposure series to {}", path.display());
    }

    Ok(())
}
