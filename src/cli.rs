//! CLI definition and dispatch.
//!
//! The command line is the hosting shell around the pipeline: it gathers
//! the request parameters a dashboard sidebar would, runs one synchronous
//! pipeline invocation, and renders the result (table, CSV file or chart
//! JSON). Data goes to stdout, diagnostics to stderr.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::http_history_adapter::HttpHistoryAdapter;
use crate::adapters::retry::RetryingHistory;
use crate::domain::chart::DEFAULT_PRICE_PANEL_FRACTION;
use crate::domain::error::MarketLensError;
use crate::domain::export;
use crate::domain::indicator::DEFAULT_WINDOW;
use crate::domain::instrument::{AssetClass, Catalog};
use crate::domain::pipeline::{self, Snapshot, SnapshotRequest};
use crate::ports::config_port::ConfigPort;

#[derive(Parser, Debug)]
#[command(name = "marketlens", about = "Market instrument analytics pipeline")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the instruments of an asset class
    List {
        #[arg(long)]
        class: AssetClassArg,
    },
    /// Fetch a daily series and print it as a table
    Fetch {
        #[arg(long)]
        class: AssetClassArg,
        #[arg(long)]
        name: String,
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Export selected columns as CSV
    Export {
        #[arg(long)]
        class: AssetClassArg,
        #[arg(long)]
        name: String,
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        /// Comma-separated column names (default: Date,Open,High,Low,Close,Volume)
        #[arg(long)]
        columns: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Compose the two-panel chart specification as JSON
    Chart {
        #[arg(long)]
        class: AssetClassArg,
        #[arg(long)]
        name: String,
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        /// Moving-average window in trading days
        #[arg(long)]
        window: Option<usize>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Thin newtype so clap can parse `--class` through [`AssetClass::from_str`].
#[derive(Debug, Clone, Copy)]
pub struct AssetClassArg(pub AssetClass);

impl std::str::FromStr for AssetClassArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(AssetClassArg)
    }
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::List { class } => run_list(class.0),
        Command::Fetch {
            class,
            name,
            start,
            end,
            config,
        } => run_fetch(class.0, &name, start, end, config.as_ref()),
        Command::Export {
            class,
            name,
            start,
            end,
            columns,
            output,
            config,
        } => run_export(
            class.0,
            &name,
            start,
            end,
            columns.as_deref(),
            output.as_ref(),
            config.as_ref(),
        ),
        Command::Chart {
            class,
            name,
            start,
            end,
            window,
            output,
            config,
        } => run_chart(class.0, &name, start, end, window, output.as_ref(), config.as_ref()),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, ExitCode> {
    match path {
        Some(p) => FileConfigAdapter::from_file(p).map_err(|e| {
            eprintln!("error: failed to read config {}: {e}", p.display());
            ExitCode::from(1)
        }),
        None => Ok(FileConfigAdapter::empty()),
    }
}

/// Default y-axis label for an asset class. The pipeline never infers the
/// unit itself; this shell supplies it like any other caller would.
fn price_axis_label(class: AssetClass) -> &'static str {
    match class {
        AssetClass::Index => "Index Value",
        AssetClass::Currency => "Exchange Rate",
        AssetClass::TreasuryYield => "Yield (%)",
        _ => "Price (USD)",
    }
}

fn run_snapshot(
    class: AssetClass,
    name: &str,
    start: NaiveDate,
    end: NaiveDate,
    window: Option<usize>,
    config: &dyn ConfigPort,
) -> Result<Snapshot, MarketLensError> {
    let adapter = HttpHistoryAdapter::from_config(config)?;
    let history = RetryingHistory::from_config(adapter, config);

    let window = window
        .unwrap_or_else(|| config.get_int("indicator", "window", DEFAULT_WINDOW as i64) as usize);
    let fraction = config.get_double(
        "chart",
        "price_panel_fraction",
        DEFAULT_PRICE_PANEL_FRACTION,
    );

    let mut request = SnapshotRequest::new(class, name, start, end)
        .with_window(window)
        .with_price_axis_label(price_axis_label(class));
    request.price_panel_fraction = fraction;

    pipeline::run(&history, &request)
}

fn run_list(class: AssetClass) -> ExitCode {
    let instruments = Catalog::list(class);
    for instrument in &instruments {
        println!("{}\t{}", instrument.provider_symbol, instrument.display_name);
    }
    eprintln!("{} instruments in {class}", instruments.len());
    ExitCode::SUCCESS
}

fn run_fetch(
    class: AssetClass,
    name: &str,
    start: NaiveDate,
    end: NaiveDate,
    config_path: Option<&PathBuf>,
) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let snapshot = match run_snapshot(class, name, start, end, None, &config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    println!(
        "{:<12} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "Date", "Open", "High", "Low", "Close", "Volume"
    );
    for point in snapshot.series.points() {
        println!(
            "{:<12} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>12}",
            point.date, point.open, point.high, point.low, point.close, point.volume
        );
    }

    eprintln!(
        "{} points for {} ({}) from {start} to {end}",
        snapshot.series.len(),
        snapshot.instrument.display_name,
        snapshot.instrument.provider_symbol,
    );
    ExitCode::SUCCESS
}

fn run_export(
    class: AssetClass,
    name: &str,
    start: NaiveDate,
    end: NaiveDate,
    columns: Option<&str>,
    output: Option<&PathBuf>,
    config_path: Option<&PathBuf>,
) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let columns = match export::parse_columns(
        columns.unwrap_or("Date,Open,High,Low,Close,Volume"),
    ) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let snapshot = match run_snapshot(class, name, start, end, None, &config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let bytes = match export::to_csv_bytes(&snapshot.series, Some(&snapshot.derived), &columns) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let path = output
        .cloned()
        .unwrap_or_else(|| PathBuf::from(export::default_file_name(name)));

    if let Err(e) = fs::write(&path, &bytes) {
        eprintln!("error: failed to write {}: {e}", path.display());
        return ExitCode::from(1);
    }

    eprintln!(
        "Wrote {} rows ({} bytes) to {}",
        snapshot.series.len(),
        bytes.len(),
        path.display()
    );
    ExitCode::SUCCESS
}

fn run_chart(
    class: AssetClass,
    name: &str,
    start: NaiveDate,
    end: NaiveDate,
    window: Option<usize>,
    output: Option<&PathBuf>,
    config_path: Option<&PathBuf>,
) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let snapshot = match run_snapshot(class, name, start, end, window, &config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let json = match serde_json::to_string_pretty(&snapshot.chart) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("error: failed to serialize chart: {e}");
            return ExitCode::from(1);
        }
    };

    match output {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                eprintln!("error: failed to write {}: {e}", path.display());
                return ExitCode::from(1);
            }
            eprintln!("Chart spec written to {}", path.display());
        }
        None => println!("{json}"),
    }
    ExitCode::SUCCESS
}
