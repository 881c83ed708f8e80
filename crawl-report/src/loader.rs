//! Metrics CSV loader
//!
//! Columns are resolved through the header row, so their order in the file
//! is irrelevant. Every row must parse and validate; a single bad row fails
//! the whole load. Surrounding whitespace is ignored in numeric fields only,
//! and values past the last named column are dropped.

use crate::types::{CrawlRun, ReportError, Result};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Column names every metrics file must provide
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "seed_url",
    "num_threads",
    "total_ms",
    "pages_crawled",
    "throughput",
];

/// Columns parsed as numbers; these tolerate padding around the value
const NUMERIC_COLUMNS: [&str; 4] = ["num_threads", "total_ms", "pages_crawled", "throughput"];

/// Load all crawl runs from a CSV file, in file order
///
/// # Example
/// ```no_run
/// use crawl_report::loader::load_runs;
/// use std::path::Path;
///
/// let runs = load_runs(Path::new("build/metrics.csv")).unwrap();
/// println!("{} runs", runs.len());
/// ```
pub fn load_runs(path: &Path) -> Result<Vec<CrawlRun>> {
    if !path.exists() {
        return Err(ReportError::MissingInputFile(path.to_path_buf()));
    }

    log::info!("Loading metrics file: {:?}", path);
    let file = File::open(path)?;
    let runs = read_runs(BufReader::new(file))?;
    log::debug!("Loaded {} crawl runs from {:?}", runs.len(), path);
    Ok(runs)
}

/// Parse crawl runs from any CSV source with a header row
pub fn read_runs<R: Read>(reader: R) -> Result<Vec<CrawlRun>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    check_columns(&headers)?;

    let numeric: Vec<bool> = headers
        .iter()
        .map(|h| NUMERIC_COLUMNS.contains(&h))
        .collect();

    let mut runs = Vec::new();
    let mut record = StringRecord::new();
    while csv_reader.read_record(&mut record)? {
        let mut row: StringRecord = record
            .iter()
            .enumerate()
            .map(|(i, field)| {
                if numeric.get(i).copied().unwrap_or(false) {
                    field.trim()
                } else {
                    field
                }
            })
            .collect();
        row.set_position(record.position().cloned());

        let run: CrawlRun = row.deserialize(Some(&headers))?;
        let line = row.position().map(|pos| pos.line()).unwrap_or(0);

        run.validate()
            .map_err(|reason| ReportError::InvalidRecord { line, reason })?;

        log::trace!("Line {}: {:?}", line, run);
        runs.push(run);
    }

    Ok(runs)
}

fn check_columns(headers: &StringRecord) -> Result<()> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(ReportError::MissingColumn(column.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "seed_url,num_threads,total_ms,pages_crawled,throughput\n";

    #[test]
    fn test_reads_rows_in_order() {
        let data = format!(
            "{HEADER}http://a.com/path,4,2000,100,50.0\nhttp://b.com/path,2,4000,80,20.0\n"
        );
        let runs = read_runs(data.as_bytes()).unwrap();

        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].seed_url, "http://a.com/path");
        assert_eq!(runs[0].num_threads, 4);
        assert_eq!(runs[0].total_ms, 2000);
        assert_eq!(runs[0].pages_crawled, 100);
        assert_eq!(runs[0].throughput, 50.0);
        assert_eq!(runs[1].seed_url, "http://b.com/path");
    }

    #[test]
    fn test_header_driven_lookup() {
        let data = "throughput,extra,seed_url,pages_crawled,total_ms,num_threads\n\
                    12.5,ignored,example.org,25,2000,8\n";
        let runs = read_runs(data.as_bytes()).unwrap();

        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].seed_url, "example.org");
        assert_eq!(runs[0].num_threads, 8);
        assert_eq!(runs[0].total_ms, 2000);
        assert_eq!(runs[0].pages_crawled, 25);
        assert_eq!(runs[0].throughput, 12.5);
    }

    #[test]
    fn test_missing_column() {
        let data = "seed_url,num_threads,total_ms,pages_crawled\nhttp://a.com,1,1,1\n";
        match read_runs(data.as_bytes()) {
            Err(ReportError::MissingColumn(column)) => assert_eq!(column, "throughput"),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_field_is_fatal() {
        let data = format!("{HEADER}http://a.com,4,2000,100,50.0\nhttp://b.com,two,4000,80,20.0\n");
        let err = read_runs(data.as_bytes()).unwrap_err();
        assert!(matches!(err, ReportError::Csv(_)));
    }

    #[test]
    fn test_zero_threads_is_rejected() {
        let data = format!("{HEADER}http://a.com,4,2000,100,50.0\nhttp://b.com,0,4000,80,20.0\n");
        match read_runs(data.as_bytes()) {
            Err(ReportError::InvalidRecord { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_padded_numeric_fields() {
        let data = format!("{HEADER}http://a.com/p, 4, 2000 , 100,\t50.0\n");
        let runs = read_runs(data.as_bytes()).unwrap();

        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].num_threads, 4);
        assert_eq!(runs[0].total_ms, 2000);
        assert_eq!(runs[0].pages_crawled, 100);
        assert_eq!(runs[0].throughput, 50.0);
    }

    #[test]
    fn test_seed_url_is_not_trimmed() {
        let data = format!("{HEADER} a.com ,1,1000,1,1.0\n");
        let runs = read_runs(data.as_bytes()).unwrap();
        assert_eq!(runs[0].seed_url, " a.com ");
    }

    #[test]
    fn test_trailing_extra_value_is_ignored() {
        let data = format!("{HEADER}http://a.com/p,4,2000,100,50.0,x\nhttp://b.com/p,2,4000,80,20.0\n");
        let runs = read_runs(data.as_bytes()).unwrap();

        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].throughput, 50.0);
        assert_eq!(runs[1].seed_url, "http://b.com/p");
    }

    #[test]
    fn test_short_row_is_fatal() {
        let data = format!("{HEADER}http://a.com/p,4,2000\n");
        assert!(matches!(read_runs(data.as_bytes()), Err(ReportError::Csv(_))));
    }

    #[test]
    fn test_zero_byte_input_is_missing_column() {
        match read_runs("".as_bytes()) {
            Err(ReportError::MissingColumn(column)) => assert_eq!(column, "seed_url"),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_header_only_yields_no_runs() {
        let runs = read_runs(HEADER.as_bytes()).unwrap();
        assert!(runs.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = load_runs(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, ReportError::MissingInputFile(_)));
    }
}
