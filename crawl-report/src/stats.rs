//! Summary statistics over a set of crawl runs

use crate::types::{CrawlRun, ReportError, Result};
use serde::Serialize;

/// Aggregate figures for a whole metrics file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Number of runs
    pub count: usize,
    /// Sum of pages crawled over all runs
    pub total_pages: u64,
    /// Throughput distribution (pages/sec)
    pub throughput: ThroughputStats,
    /// Mean crawl time in seconds
    pub avg_crawl_secs: f64,
}

/// Throughput distribution across runs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThroughputStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Sample standard deviation; only defined for two or more runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdev: Option<f64>,
}

/// Compute the summary for a non-empty run set
///
/// Returns [`ReportError::EmptyDataset`] when `runs` is empty, since none of
/// the averages or extremes exist in that case.
pub fn summarize(runs: &[CrawlRun]) -> Result<Summary> {
    if runs.is_empty() {
        return Err(ReportError::EmptyDataset);
    }

    let throughputs: Vec<f64> = runs.iter().map(|r| r.throughput).collect();
    let total_ms: Vec<f64> = runs.iter().map(|r| r.total_ms as f64).collect();

    let total_pages = runs
        .iter()
        .try_fold(0u64, |acc, r| acc.checked_add(r.pages_crawled))
        .ok_or(ReportError::TotalPagesOverflow)?;

    let summary = Summary {
        count: runs.len(),
        total_pages,
        throughput: ThroughputStats {
            mean: mean(&throughputs),
            min: throughputs.iter().copied().fold(f64::INFINITY, f64::min),
            max: throughputs.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            stdev: sample_stdev(&throughputs),
        },
        avg_crawl_secs: mean(&total_ms) / 1000.0,
    };

    log::debug!("Computed summary: {:?}", summary);
    Ok(summary)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_stdev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(url: &str, threads: u32, ms: u64, pages: u64, tp: f64) -> CrawlRun {
        CrawlRun {
            seed_url: url.to_string(),
            num_threads: threads,
            total_ms: ms,
            pages_crawled: pages,
            throughput: tp,
        }
    }

    #[test]
    fn test_two_run_example() {
        let runs = vec![
            run("http://a.com/path", 4, 2000, 100, 50.0),
            run("http://b.com/path", 2, 4000, 80, 20.0),
        ];
        let summary = summarize(&runs).unwrap();

        assert_eq!(summary.count, 2);
        assert_eq!(summary.total_pages, 180);
        assert_eq!(summary.throughput.mean, 35.0);
        assert_eq!(summary.throughput.max, 50.0);
        assert_eq!(summary.throughput.min, 20.0);
        let stdev = summary.throughput.stdev.unwrap();
        assert!((stdev - 21.2132).abs() < 1e-3);
        assert_eq!(summary.avg_crawl_secs, 3.0);
    }

    #[test]
    fn test_single_run_has_no_stdev() {
        let runs = vec![run("a.com", 1, 1500, 10, 6.5)];
        let summary = summarize(&runs).unwrap();

        assert_eq!(summary.count, 1);
        assert!(summary.throughput.stdev.is_none());
        assert_eq!(summary.throughput.mean, 6.5);
        assert_eq!(summary.throughput.min, 6.5);
        assert_eq!(summary.throughput.max, 6.5);
        assert_eq!(summary.avg_crawl_secs, 1.5);
    }

    #[test]
    fn test_empty_is_rejected() {
        assert!(matches!(summarize(&[]), Err(ReportError::EmptyDataset)));
    }

    #[test]
    fn test_total_pages_overflow_is_an_error() {
        let half = u64::MAX / 2 + 1;
        let runs = vec![run("a.com", 1, 1000, half, 1.0), run("b.com", 1, 1000, half, 1.0)];
        assert!(matches!(summarize(&runs), Err(ReportError::TotalPagesOverflow)));
    }

    #[test]
    fn test_total_pages_at_limit() {
        let runs = vec![
            run("a.com", 1, 1000, u64::MAX - 5, 1.0),
            run("b.com", 1, 1000, 5, 1.0),
        ];
        assert_eq!(summarize(&runs).unwrap().total_pages, u64::MAX);
    }

    #[test]
    fn test_mean_within_bounds() {
        let runs: Vec<CrawlRun> = [3.25, 117.0, 0.0, 42.5, 9.75]
            .iter()
            .enumerate()
            .map(|(i, tp)| run("a.com", 1 + i as u32, 1000, i as u64 * 7, *tp))
            .collect();
        let summary = summarize(&runs).unwrap();

        assert!(summary.throughput.min <= summary.throughput.mean);
        assert!(summary.throughput.mean <= summary.throughput.max);
        assert_eq!(summary.total_pages, 70);
        assert!(summary.throughput.stdev.is_some());
    }
}
