//! Configuration loading and settings resolution

use anyhow::{Context, Result};
use crawl_report::ReportConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default metrics input, relative to the working directory
pub const DEFAULT_INPUT: &str = "build/metrics.csv";

/// Default HTML report location, relative to the working directory
pub const DEFAULT_OUTPUT: &str = "build/metrics_report.html";

/// Application configuration (loaded from a TOML file)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InputConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    pub html: Option<PathBuf>,
    pub summary_json: Option<PathBuf>,
    pub title: Option<String>,
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

/// Values given on the command line; `None` means "not given"
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub summary_json: Option<PathBuf>,
}

/// Fully resolved run settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub summary_json: Option<PathBuf>,
    pub report: ReportConfig,
}

impl Settings {
    /// Merge layers: command line, then config file, then built-in defaults
    pub fn resolve(overrides: Overrides, config: AppConfig) -> Self {
        let input = overrides
            .input
            .or(config.input.path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));
        let output = overrides
            .output
            .or(config.output.html)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
        let summary_json = overrides.summary_json.or(config.output.summary_json);

        let mut report = ReportConfig::new();
        if let Some(name) = input.file_name() {
            report = report.with_source_name(name.to_string_lossy());
        }
        if let Some(title) = config.output.title {
            report = report.with_title(title);
        }

        Self {
            input,
            output,
            summary_json,
            report,
        }
    }
}
