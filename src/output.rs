//! Reporting of analysis results.
//!
//! Results are logged (debug dump or JSON) and can be saved as CSV reports:
//! correlation runs accumulate in one growing file, while histograms,
//! room series and neighborhood averages are written out whole.

use std::fmt::Debug;
use std::fs::{File, OpenOptions};
use std::path::Path;

use csv::WriterBuilder;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Dumps a result at debug level.
pub fn print_pretty(value: &impl Debug) {
    debug!("{:#?}", value);
}

/// Logs a result at info level as indented JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Adds one report row to the end of the CSV at `path`.
///
/// The column header is only emitted when the report does not exist yet, so
/// repeated runs build up a single table.
pub fn append_record(path: &Path, record: &impl Serialize) -> Result<()> {
    let is_new = !path.exists();
    debug!(path = %path.display(), is_new, "Adding row to report");

    let file = OpenOptions::new().append(true).create(true).open(path)?;
    let mut writer = WriterBuilder::new().has_headers(is_new).from_writer(file);

    writer
        .serialize(record)
        .map_err(|e| Error::csv(path, e))?;
    writer.flush()?;

    Ok(())
}

/// Saves `records` as a complete CSV report, truncating whatever was at `path`.
pub fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    debug!(path = %path.display(), rows = records.len(), "Saving report");

    let mut writer = WriterBuilder::new().from_writer(File::create(path)?);
    for record in records {
        writer
            .serialize(record)
            .map_err(|e| Error::csv(path, e))?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::{CorrelationRecord, HistogramBucket, NeighborhoodPrice};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn brno_correlation(coefficient: f64) -> CorrelationRecord {
        CorrelationRecord {
            timestamp: Utc.with_ymd_and_hms(2017, 7, 20, 12, 0, 0).unwrap(),
            source: "tomslee_airbnb_brno_1500_2017-07-20.csv".to_string(),
            points: 6,
            coefficient,
            p_value: 0.25,
        }
    }

    #[test]
    fn test_logging_helpers_accept_report_rows() {
        print_pretty(&vec![0usize, 4, 0, 1]);
        print_json(&brno_correlation(0.5)).unwrap();
    }

    #[test]
    fn test_correlation_runs_accumulate_under_one_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("correlation.csv");

        append_record(&path, &brno_correlation(0.5)).unwrap();
        append_record(&path, &brno_correlation(-0.25)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "timestamp,source,points,coefficient,p_value");
        assert!(lines[1].ends_with(",6,0.5,0.25"));
        assert!(lines[2].ends_with(",6,-0.25,0.25"));
    }

    #[test]
    fn test_histogram_report_replaces_previous_run() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hosts.csv");
        fs::write(&path, "listings,hosts\n1,99\n").unwrap();

        let buckets = [
            HistogramBucket {
                listings: 1,
                hosts: 40,
            },
            HistogramBucket {
                listings: 3,
                hosts: 7,
            },
        ];
        write_records(&path, &buckets).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "listings,hosts\n1,40\n3,7\n"
        );
    }

    #[test]
    fn test_neighborhood_report_quotes_free_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("neighborhoods.csv");

        let rows = [NeighborhoodPrice {
            neighborhood: "Brno-střed, Veveří".to_string(),
            average_price: 88.0,
        }];
        write_records(&path, &rows).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "neighborhood,average_price\n\"Brno-střed, Veveří\",88.0\n"
        );
    }
}
