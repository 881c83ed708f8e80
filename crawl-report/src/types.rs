//! Core types for the crawl report library
//!
//! This module defines the record type read from the metrics CSV and the
//! error type shared by every stage of report generation. Records are plain
//! data: all display values (domain, efficiency, seconds) are derived on
//! demand and never stored.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Result type for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Maximum domain length shown in the console table before truncation
pub const DISPLAY_DOMAIN_WIDTH: usize = 40;

/// Number of domain characters kept in chart bar labels
pub const CHART_LABEL_WIDTH: usize = 20;

/// One crawl execution: its configuration and measured outcome
///
/// Fields are looked up by CSV header name, so column order in the input
/// file does not matter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlRun {
    /// Seed URL or bare host the crawl started from
    pub seed_url: String,
    /// Number of worker threads used by the crawl
    pub num_threads: u32,
    /// Elapsed wall time in milliseconds
    pub total_ms: u64,
    /// Number of pages fetched
    pub pages_crawled: u64,
    /// Pages crawled per second
    pub throughput: f64,
}

impl CrawlRun {
    /// Host-like label derived from the seed URL
    ///
    /// For `scheme://host/path` this is `host` (the third `/`-separated
    /// segment); anything without `://` is returned unchanged.
    pub fn domain(&self) -> &str {
        if self.seed_url.contains("://") {
            self.seed_url.split('/').nth(2).unwrap_or("")
        } else {
            &self.seed_url
        }
    }

    /// Domain as shown in the console table, truncated with `...`
    pub fn display_domain(&self) -> String {
        let domain = self.domain();
        if domain.chars().count() > DISPLAY_DOMAIN_WIDTH {
            format!("{}...", take_chars(domain, DISPLAY_DOMAIN_WIDTH))
        } else {
            domain.to_string()
        }
    }

    /// Bar label used in HTML charts, e.g. `example.com... (4T)`
    pub fn chart_label(&self) -> String {
        format!(
            "{}... ({}T)",
            take_chars(self.domain(), CHART_LABEL_WIDTH),
            self.num_threads
        )
    }

    /// Throughput per thread
    pub fn efficiency(&self) -> f64 {
        self.throughput / f64::from(self.num_threads)
    }

    /// Elapsed wall time in seconds
    pub fn total_secs(&self) -> f64 {
        self.total_ms as f64 / 1000.0
    }

    /// Check the constraints the CSV schema alone cannot express
    pub(crate) fn validate(&self) -> std::result::Result<(), String> {
        if self.num_threads == 0 {
            return Err("num_threads must be positive".to_string());
        }
        if !self.throughput.is_finite() || self.throughput < 0.0 {
            return Err(format!(
                "throughput must be a non-negative number, got {}",
                self.throughput
            ));
        }
        Ok(())
    }
}

/// First `n` characters of `s`, never splitting a code point
fn take_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Errors that can occur while loading or rendering a report
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("{} not found", .0.display())]
    MissingInputFile(PathBuf),

    #[error("Failed to parse metrics CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Metrics CSV is missing required column `{0}`")]
    MissingColumn(String),

    #[error("Invalid record on line {line}: {reason}")]
    InvalidRecord { line: u64, reason: String },

    #[error("Total pages crawled exceeds {}", u64::MAX)]
    TotalPagesOverflow,

    #[error("Metrics file contains no records")]
    EmptyDataset,

    #[error("Failed to render report: {0}")]
    Render(#[from] std::fmt::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
