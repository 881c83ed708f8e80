//! Fixed-width console summary
//!
//! Renders the per-run table and the statistics block as plain text. The
//! output is meant for people, not for parsing.

use crate::stats::Summary;
use crate::types::{CrawlRun, Result};
use std::fmt::Write;

/// Total width of rules and centred titles
pub const REPORT_WIDTH: usize = 70;

const URL_WIDTH: usize = 45;
const THREADS_WIDTH: usize = 8;
const PAGES_WIDTH: usize = 8;
const TIME_WIDTH: usize = 10;
const THROUGHPUT_WIDTH: usize = 10;

/// Width of statistic labels; values start right after
const LABEL_WIDTH: usize = 25;

/// Render the console summary to a string
pub fn render_console(runs: &[CrawlRun], summary: &Summary) -> Result<String> {
    let mut out = String::new();
    write_console(runs, summary, &mut out)?;
    Ok(out)
}

/// Write the console summary (table followed by statistics) to `out`
pub fn write_console<W: Write>(runs: &[CrawlRun], summary: &Summary, out: &mut W) -> Result<()> {
    write_banner(out, "CRAWLER METRICS SUMMARY")?;
    writeln!(out)?;

    writeln!(
        out,
        "{:<URL_WIDTH$} {:<THREADS_WIDTH$} {:<PAGES_WIDTH$} {:<TIME_WIDTH$} {:<THROUGHPUT_WIDTH$}",
        "URL", "Threads", "Pages", "Time(s)", "Throughput"
    )?;
    writeln!(out, "{}", "-".repeat(REPORT_WIDTH))?;

    for run in runs {
        writeln!(
            out,
            "{:<URL_WIDTH$} {:<THREADS_WIDTH$} {:<PAGES_WIDTH$} {:<TIME_WIDTH$.2} {:<THROUGHPUT_WIDTH$.2}",
            run.display_domain(),
            run.num_threads,
            run.pages_crawled,
            run.total_secs(),
            run.throughput
        )?;
    }

    writeln!(out)?;
    write_banner(out, "STATISTICS")?;

    let tp = &summary.throughput;
    write_stat(out, "Total runs:", summary.count)?;
    write_stat(out, "Total pages crawled:", summary.total_pages)?;
    write_stat(out, "Average throughput:", format_args!("{:.2} pages/sec", tp.mean))?;
    write_stat(out, "Max throughput:", format_args!("{:.2} pages/sec", tp.max))?;
    write_stat(out, "Min throughput:", format_args!("{:.2} pages/sec", tp.min))?;
    if let Some(stdev) = tp.stdev {
        write_stat(out, "Throughput stdev:", format_args!("{:.2} pages/sec", stdev))?;
    }
    write_stat(
        out,
        "Average crawl time:",
        format_args!("{:.2} seconds", summary.avg_crawl_secs),
    )?;

    writeln!(out)?;
    Ok(())
}

fn write_banner<W: Write>(out: &mut W, title: &str) -> std::fmt::Result {
    let rule = "=".repeat(REPORT_WIDTH);
    writeln!(out, "{rule}")?;
    writeln!(out, "{:^REPORT_WIDTH$}", title)?;
    writeln!(out, "{rule}")
}

fn write_stat<W: Write>(out: &mut W, label: &str, value: impl std::fmt::Display) -> std::fmt::Result {
    writeln!(out, "{:<LABEL_WIDTH$}{}", label, value)
}
