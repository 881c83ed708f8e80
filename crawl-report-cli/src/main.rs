//! Crawl Report CLI Application
//!
//! Command-line front end for the crawl-report library. It adds:
//! - Input/output path resolution (flags, TOML config, built-in defaults)
//! - Logging setup
//! - Writing the HTML report and optional JSON summary
//! - Exit codes

use anyhow::{Context, Result};
use clap::Parser;
use crawl_report::{Report, ReportError};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

mod config;

use config::{AppConfig, Overrides, Settings};

/// Crawl Report - Summarize crawler benchmark runs
#[derive(Parser, Debug)]
#[command(name = "crawl-report")]
#[command(about = "Summarize crawl-run metrics as text and a static HTML report", long_about = None)]
#[command(version)]
struct Args {
    /// Metrics CSV to read (default: build/metrics.csv)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// HTML report to write (default: build/metrics_report.html)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Also write the summary statistics as JSON
    #[arg(long, value_name = "FILE")]
    summary_json: Option<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long)]
    quiet: bool,
}

/// How a run ended when no error was raised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Completed,
    MissingInput,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Completed => ExitCode::SUCCESS,
            Outcome::MissingInput => ExitCode::from(1),
        }
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    run(args).map(ExitCode::from)
}

/// Load, summarize, print and write; nothing is written unless loading succeeds
fn run(args: Args) -> Result<Outcome> {
    log::info!("Crawl Report CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using report library v{}", crawl_report::VERSION);

    let file_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    let overrides = Overrides {
        input: args.input,
        output: args.output,
        summary_json: args.summary_json,
    };
    let settings = Settings::resolve(overrides, file_config);
    log::debug!("Resolved settings: {:?}", settings);

    // Checked up front so no output file is touched when input is absent
    let report = match Report::load(&settings.input) {
        Ok(report) => report,
        Err(err @ ReportError::MissingInputFile(_)) => {
            println!("Error: {err}");
            return Ok(Outcome::MissingInput);
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("Failed to load metrics from {:?}", settings.input))
        }
    };

    let html = report
        .html(&settings.report)
        .context("Failed to render HTML report")?;
    print!("{}", report.console().context("Failed to render console summary")?);

    write_output(&settings.output, html.as_bytes())?;
    println!("✓ HTML report saved to: {}", settings.output.display());

    if let Some(json_path) = &settings.summary_json {
        let json = serde_json::to_string_pretty(report.summary())
            .context("Failed to serialize summary")?;
        write_output(json_path, json.as_bytes())?;
        log::info!("Summary JSON saved to: {:?}", json_path);
    }

    let rule = "=".repeat(crawl_report::console::REPORT_WIDTH);
    println!();
    println!("{rule}");
    println!("To view the report in your browser:");
    println!("  open {}", settings.output.display());
    println!("{rule}");

    Ok(Outcome::Completed)
}

/// Write a file, replacing any existing content and creating parent directories
fn write_output(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {:?}", path))?;
    log::debug!("Wrote {} bytes to {:?}", contents.len(), path);
    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
