//! CSV reader for listing snapshots.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use tracing::debug;

use crate::error::{Error, Result};
use crate::schema::{Column, Row, Schema};

/// A snapshot file opened with its header already resolved.
pub struct ListingReader {
    path: PathBuf,
    reader: csv::Reader<File>,
    schema: Schema,
}

impl ListingReader {
    /// Opens `path` and resolves the `required` columns from its header row.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, the header cannot be
    /// read, or a required column is missing.
    pub fn open(path: impl AsRef<Path>, required: &[Column]) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&path)
            .map_err(|e| Error::csv(&path, e))?;

        let headers = reader.headers().map_err(|e| Error::csv(&path, e))?.clone();
        let schema = Schema::resolve(&headers, required, &path)?;
        debug!(path = %path.display(), columns = headers.len(), "Resolved snapshot header");

        Ok(Self {
            path,
            reader,
            schema,
        })
    }

    /// Calls `f` for every data row in file order, stopping at the first error.
    ///
    /// Returns the number of rows read.
    pub fn try_for_each<F>(mut self, mut f: F) -> Result<usize>
    where
        F: FnMut(Row<'_>) -> Result<()>,
    {
        let mut record = StringRecord::new();
        let mut rows = 0;

        while self
            .reader
            .read_record(&mut record)
            .map_err(|e| Error::csv(&self.path, e))?
        {
            rows += 1;
            f(Row {
                record: &record,
                schema: &self.schema,
                path: &self.path,
            })?;
        }

        debug!(path = %self.path.display(), rows, "Finished reading snapshot");
        Ok(rows)
    }
}

/// Sort key of a snapshot: the `YYYY-MM-DD` segment of a filename ending in
/// `-YYYY-MM-DD.csv`, read as the integer `YYYYMMDD`.
///
/// Only the shape of the segment is checked, not whether it names a real
/// calendar day.
///
/// # Errors
///
/// Returns [`Error::InvalidSnapshotName`] if the name does not end that way.
pub fn snapshot_date(path: &Path) -> Result<u32> {
    let invalid = || Error::InvalidSnapshotName {
        path: path.to_path_buf(),
    };

    let name = path.file_name().and_then(|n| n.to_str()).ok_or_else(invalid)?;
    let stem = name.strip_suffix(".csv").ok_or_else(invalid)?;
    let split = stem.len().checked_sub(11).ok_or_else(invalid)?;
    let segment = stem.get(split..).ok_or_else(invalid)?.as_bytes();

    let mut key = 0u32;
    for (i, &b) in segment.iter().enumerate() {
        match i {
            0 | 5 | 8 if b == b'-' => {}
            1..=4 | 6 | 7 | 9 | 10 if b.is_ascii_digit() => key = key * 10 + u32::from(b - b'0'),
            _ => return Err(invalid()),
        }
    }

    Ok(key)
}
