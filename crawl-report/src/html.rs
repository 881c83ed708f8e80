//! HTML report generation
//!
//! Produces a single self-contained document: inline CSS, no scripts, no
//! external assets. Markup goes through [`HtmlWriter`], which escapes every
//! text node and attribute value it is given.

use crate::config::ReportConfig;
use crate::stats::Summary;
use crate::types::{CrawlRun, Result};
use std::fmt::{self, Display, Write};

const HEADING: &str = "🚀 Web Crawler Performance Metrics";

const STYLES: &str = r#"
* { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; }
body { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); margin: 0; padding: 20px; }
.container { max-width: 1200px; margin: auto; background: white; border-radius: 10px; padding: 30px; box-shadow: 0 10px 30px rgba(0,0,0,0.3); }
h1 { color: #333; text-align: center; border-bottom: 3px solid #667eea; padding-bottom: 15px; }
h2 { color: #667eea; margin-top: 30px; }
table { width: 100%; border-collapse: collapse; margin: 20px 0; }
th { background: #667eea; color: white; padding: 12px; text-align: left; font-weight: bold; }
td { padding: 10px 12px; border-bottom: 1px solid #ddd; }
tr:hover { background: #f5f5f5; }
.stat-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 15px; margin: 20px 0; }
.stat-box { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 20px; border-radius: 8px; text-align: center; }
.stat-value { font-size: 28px; font-weight: bold; }
.stat-label { font-size: 12px; opacity: 0.9; margin-top: 5px; }
.chart-row { display: grid; grid-template-columns: 1fr 1fr; gap: 20px; }
.chart { background: #f9f9f9; padding: 20px; border-radius: 8px; border-left: 4px solid #667eea; }
.bar-chart-item { display: flex; align-items: center; margin: 10px 0; }
.bar-label { width: 150px; font-weight: 500; }
.bar-container { flex: 1; background: #e0e0e0; height: 25px; border-radius: 4px; position: relative; overflow: hidden; }
.bar-fill { background: linear-gradient(90deg, #667eea, #764ba2); height: 100%; display: flex; align-items: center; justify-content: center; color: white; font-weight: bold; font-size: 12px; }
.footer { text-align: center; margin-top: 40px; color: #999; font-size: 12px; }
"#;

/// Render the full HTML report to a string
pub fn render_html(runs: &[CrawlRun], summary: &Summary, config: &ReportConfig) -> Result<String> {
    let mut out = String::new();
    write_html(runs, summary, config, &mut out)?;
    Ok(out)
}

/// Write the full HTML report to `out`
pub fn write_html<W: Write>(
    runs: &[CrawlRun],
    summary: &Summary,
    config: &ReportConfig,
    out: &mut W,
) -> Result<()> {
    let mut html = HtmlWriter::new(out);

    html.doctype()?;
    html.start("html", &[])?;

    html.start("head", &[])?;
    html.void("meta", &[("charset", "UTF-8")])?;
    html.leaf("title", &[], &config.title)?;
    html.style(STYLES)?;
    html.end()?;

    html.start("body", &[])?;
    html.start("div", &[("class", "container")])?;
    html.leaf("h1", &[], HEADING)?;

    write_stat_grid(&mut html, summary)?;
    write_results_table(&mut html, runs)?;

    html.leaf("h2", &[], "📊 Visual Analysis")?;
    html.start("div", &[("class", "chart-row")])?;
    write_chart(&mut html, &throughput_chart(runs))?;
    write_chart(&mut html, &time_chart(runs))?;
    html.end()?;

    html.start("div", &[("class", "footer")])?;
    html.leaf(
        "p",
        &[],
        format_args!(
            "Report generated from {} | Web Crawler Performance Analysis",
            config.source_name
        ),
    )?;
    html.end()?;

    html.end()?; // container
    html.end()?; // body
    html.end()?; // html
    html.finish()?;
    Ok(())
}

fn write_stat_grid<W: Write>(html: &mut HtmlWriter<'_, W>, summary: &Summary) -> fmt::Result {
    let cards = [
        ("Total Runs", summary.count.to_string()),
        ("Total Pages", summary.total_pages.to_string()),
        ("Avg Throughput", format!("{:.2} p/s", summary.throughput.mean)),
        ("Max Throughput", format!("{:.2} p/s", summary.throughput.max)),
    ];

    html.leaf("h2", &[], "📊 Statistics")?;
    html.start("div", &[("class", "stat-grid")])?;
    for (label, value) in &cards {
        html.start("div", &[("class", "stat-box")])?;
        html.leaf("div", &[("class", "stat-value")], value)?;
        html.leaf("div", &[("class", "stat-label")], label)?;
        html.end()?;
    }
    html.end()
}

fn write_results_table<W: Write>(html: &mut HtmlWriter<'_, W>, runs: &[CrawlRun]) -> fmt::Result {
    const COLUMNS: [&str; 6] = [
        "Seed URL",
        "Threads",
        "Pages Crawled",
        "Total Time (s)",
        "Throughput (p/s)",
        "Efficiency",
    ];

    html.leaf("h2", &[], "📈 Detailed Results")?;
    html.start("table", &[])?;

    html.start("tr", &[])?;
    for column in COLUMNS {
        html.leaf("th", &[], column)?;
    }
    html.end()?;

    for run in runs {
        html.start("tr", &[])?;
        html.start("td", &[])?;
        html.leaf("code", &[], run.domain())?;
        html.end()?;
        html.leaf("td", &[], run.num_threads)?;
        html.leaf("td", &[], run.pages_crawled)?;
        html.leaf("td", &[], format_args!("{:.2}", run.total_secs()))?;
        html.leaf("td", &[], format_args!("{:.2}", run.throughput))?;
        html.leaf("td", &[], format_args!("{:.3}", run.efficiency()))?;
        html.end()?;
    }

    html.end()
}

/// One horizontal bar: label, normalized width and the caption drawn inside
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub percent: f64,
    pub caption: String,
}

/// A titled set of bars normalized to the largest value
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: &'static str,
    pub bars: Vec<Bar>,
}

/// Bar widths in percent of the largest value
///
/// The largest value maps to exactly `100.0`. When every value is zero all
/// bars are `0.0` wide.
pub fn bar_widths(values: &[f64]) -> Vec<f64> {
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    if max <= 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| v / max * 100.0).collect()
}

fn build_chart(
    title: &'static str,
    runs: &[CrawlRun],
    value: impl Fn(&CrawlRun) -> f64,
    caption: impl Fn(&CrawlRun) -> String,
) -> BarChart {
    let values: Vec<f64> = runs.iter().map(&value).collect();
    if !values.is_empty() && values.iter().all(|v| *v == 0.0) {
        log::warn!("All values in chart '{}' are zero; bars rendered empty", title);
    }

    let bars = runs
        .iter()
        .zip(bar_widths(&values))
        .map(|(run, percent)| Bar {
            label: run.chart_label(),
            percent,
            caption: caption(run),
        })
        .collect();

    BarChart { title, bars }
}

/// Throughput per run, captioned in pages/sec
pub fn throughput_chart(runs: &[CrawlRun]) -> BarChart {
    build_chart(
        "Throughput per Run",
        runs,
        |r| r.throughput,
        |r| format!("{:.2}", r.throughput),
    )
}

/// Total crawl time per run, captioned in seconds
pub fn time_chart(runs: &[CrawlRun]) -> BarChart {
    build_chart(
        "Total Crawl Time",
        runs,
        |r| r.total_ms as f64,
        |r| format!("{:.1}s", r.total_secs()),
    )
}

fn write_chart<W: Write>(html: &mut HtmlWriter<'_, W>, chart: &BarChart) -> fmt::Result {
    html.start("div", &[("class", "chart")])?;
    html.leaf("h3", &[], chart.title)?;

    for bar in &chart.bars {
        // Debug formatting keeps the trailing `.0` on whole percentages
        let style = format!("width: {:?}%;", bar.percent);

        html.start("div", &[("class", "bar-chart-item")])?;
        html.leaf("div", &[("class", "bar-label")], &bar.label)?;
        html.start("div", &[("class", "bar-container")])?;
        html.leaf("div", &[("class", "bar-fill"), ("style", style.as_str())], &bar.caption)?;
        html.end()?;
        html.end()?;
    }

    html.end()
}

/// Minimal indented HTML builder
///
/// Tracks open elements so `end` always closes the innermost one. Text and
/// attribute values are escaped; only [`HtmlWriter::style`] writes raw
/// content, and it is fed a compile-time stylesheet.
pub struct HtmlWriter<'a, W: Write> {
    out: &'a mut W,
    open: Vec<&'static str>,
}

impl<'a, W: Write> HtmlWriter<'a, W> {
    pub fn new(out: &'a mut W) -> Self {
        Self {
            out,
            open: Vec::new(),
        }
    }

    pub fn doctype(&mut self) -> fmt::Result {
        writeln!(self.out, "<!DOCTYPE html>")
    }

    /// Open an element on its own line
    pub fn start(&mut self, tag: &'static str, attrs: &[(&str, &str)]) -> fmt::Result {
        self.indent()?;
        self.open_tag(tag, attrs)?;
        writeln!(self.out)?;
        self.open.push(tag);
        Ok(())
    }

    /// Close the innermost open element
    pub fn end(&mut self) -> fmt::Result {
        let tag = self.open.pop().ok_or(fmt::Error)?;
        self.indent()?;
        writeln!(self.out, "</{tag}>")
    }

    /// Element with text content on a single line
    pub fn leaf(&mut self, tag: &'static str, attrs: &[(&str, &str)], text: impl Display) -> fmt::Result {
        self.indent()?;
        self.open_tag(tag, attrs)?;
        write!(self.out, "{}", Escaped(&text))?;
        writeln!(self.out, "</{tag}>")
    }

    /// Element without content or closing tag, e.g. `<meta>`
    pub fn void(&mut self, tag: &'static str, attrs: &[(&str, &str)]) -> fmt::Result {
        self.indent()?;
        self.open_tag(tag, attrs)?;
        writeln!(self.out)
    }

    /// Inline stylesheet; content is written verbatim
    pub fn style(&mut self, css: &'static str) -> fmt::Result {
        self.start("style", &[])?;
        let depth = self.open.len();
        for line in css.lines().filter(|l| !l.trim().is_empty()) {
            writeln!(self.out, "{:width$}{}", "", line, width = depth * 4)?;
        }
        self.end()
    }

    /// Fail if any element is still open
    pub fn finish(self) -> fmt::Result {
        if self.open.is_empty() {
            Ok(())
        } else {
            Err(fmt::Error)
        }
    }

    fn open_tag(&mut self, tag: &str, attrs: &[(&str, &str)]) -> fmt::Result {
        write!(self.out, "<{tag}")?;
        for (name, value) in attrs {
            write!(self.out, " {}=\"{}\"", name, Escaped(value))?;
        }
        write!(self.out, ">")
    }

    fn indent(&mut self) -> fmt::Result {
        write!(self.out, "{:width$}", "", width = self.open.len() * 4)
    }
}

/// Display adapter that HTML-escapes whatever it wraps
struct Escaped<T>(T);

impl<T: Display> Display for Escaped<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut escaper = EscapingWriter(f);
        write!(escaper, "{}", self.0)
    }
}

struct EscapingWriter<'a, 'b>(&'a mut fmt::Formatter<'b>);

impl Write for EscapingWriter<'_, '_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let mut last = 0;
        for (idx, ch) in s.char_indices() {
            let entity = match ch {
                '&' => "&amp;",
                '<' => "&lt;",
                '>' => "&gt;",
                '"' => "&quot;",
                '\'' => "&#39;",
                _ => continue,
            };
            self.0.write_str(&s[last..idx])?;
            self.0.write_str(entity)?;
            last = idx + ch.len_utf8();
        }
        self.0.write_str(&s[last..])
    }
}
