//! Report rendering configuration
//!
//! Only presentation knobs live here. Where files are read from and written
//! to is decided by the application layer (crawl-report-cli).

use serde::{Deserialize, Serialize};

/// Configuration for the HTML renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Document title shown in the browser tab
    #[serde(default = "default_title")]
    pub title: String,

    /// Input file name mentioned in the report footer
    #[serde(default = "default_source_name")]
    pub source_name: String,
}

fn default_title() -> String {
    "Crawler Metrics Report".to_string()
}

fn default_source_name() -> String {
    "metrics.csv".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            source_name: default_source_name(),
        }
    }
}

impl ReportConfig {
    /// Create a report configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the document title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Builder method: set the source file name shown in the footer
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = name.into();
        self
    }
}
