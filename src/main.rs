//! CLI entry point for the gradebook reporter.
//!
//! Reads a gradebook file, validates each row's declared total, and prints
//! a summary report (averages, branch averages, top-3 rankings), optionally
//! exporting it as JSON.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use gradebook_reporter::{
    output::{export_report, print_report},
    reader::{ReadOptions, read_gradebook},
    report::aggregate::generate_report,
    validate::{TotalPolicy, apply_total_policy},
};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "gradebook_reporter")]
#[command(about = "Summarizes a gradebook: averages, branch averages, top-3 rankings", long_about = None)]
struct Cli {
    /// Gradebook file to read (.xlsx or .csv)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Only include rows whose ClassNo. matches this label
    #[arg(short, long)]
    class: Option<String>,

    /// Also write the JSON report to report.json in the working directory
    #[arg(short, long, default_value_t = false)]
    export: bool,

    /// Aggregate on recomputed totals instead of the declared ones
    #[arg(long, default_value_t = false)]
    recompute_totals: bool,

    /// Report malformed numeric cells instead of silently treating them as 0
    #[arg(long, default_value_t = false)]
    strict_parse: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/gradebook_reporter.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("gradebook_reporter.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let opts = ReadOptions {
        class_filter: cli.class,
        strict_parse: cli.strict_parse,
    };
    let intake = read_gradebook(&cli.file, &opts)?;

    let mut records = intake.records;
    let policy = if cli.recompute_totals {
        TotalPolicy::Recomputed
    } else {
        TotalPolicy::Declared
    };
    apply_total_policy(&mut records, policy);

    if records.is_empty() {
        warn!("No student records found");
    }
    info!(
        records = records.len(),
        diagnostics = intake.diagnostics.len(),
        "Gradebook loaded"
    );

    let report = generate_report(&records, intake.diagnostics);
    print_report(&report);

    if cli.export {
        let path = export_report(&report, Path::new("."))?;
        println!("\nExported report to {}", path.display());
    }

    Ok(())
}
