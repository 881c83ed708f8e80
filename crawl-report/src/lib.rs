//! Crawl Report Library
//!
//! Turns a CSV of crawl-run metrics into a console summary and a static,
//! self-contained HTML report with inline bar charts.
//!
//! # Architecture
//!
//! Processing is a single linear pass:
//! - [`loader`] parses the header-driven CSV into [`CrawlRun`] records
//! - [`stats`] aggregates them into a [`Summary`]
//! - [`console`] renders the fixed-width text table and statistics
//! - [`html`] renders the HTML document
//!
//! Every stage returns [`Result`]; a failure anywhere aborts the whole run and
//! nothing is rendered. File locations, logging setup and exit codes belong
//! to the application layer (crawl-report-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use crawl_report::{Report, ReportConfig};
//! use std::path::Path;
//!
//! let report = Report::load(Path::new("build/metrics.csv")).unwrap();
//! print!("{}", report.console().unwrap());
//!
//! let html = report.html(&ReportConfig::new()).unwrap();
//! std::fs::write("build/metrics_report.html", html).unwrap();
//! ```

// Public modules
pub mod config;
pub mod console;
pub mod html;
pub mod loader;
pub mod stats;
pub mod types;

// Re-export main types for convenience
pub use config::ReportConfig;
pub use stats::{Summary, ThroughputStats};
pub use types::{CrawlRun, ReportError, Result};

use std::path::Path;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A loaded and summarized metrics file, ready to render
#[derive(Debug, Clone)]
pub struct Report {
    runs: Vec<CrawlRun>,
    summary: Summary,
}

impl Report {
    /// Load a metrics CSV and compute its summary
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_runs(loader::load_runs(path)?)
    }

    /// Summarize already-parsed runs
    ///
    /// Fails with [`ReportError::EmptyDataset`] if `runs` is empty.
    pub fn from_runs(runs: Vec<CrawlRun>) -> Result<Self> {
        let summary = stats::summarize(&runs)?;
        Ok(Self { runs, summary })
    }

    pub fn runs(&self) -> &[CrawlRun] {
        &self.runs
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Console table and statistics block
    pub fn console(&self) -> Result<String> {
        console::render_console(&self.runs, &self.summary)
    }

    /// Self-contained HTML document
    pub fn html(&self, config: &ReportConfig) -> Result<String> {
        html::render_html(&self.runs, &self.summary, config)
    }
}
