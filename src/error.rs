//! Error type shared by every analysis.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while reading listing snapshots or computing statistics.
#[derive(Debug, Error)]
pub enum Error {
    /// The file could not be opened or is not well-formed CSV.
    #[error("failed to read {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A required column is absent from the header row.
    #[error("column `{column}` not found in header of {}", .path.display())]
    MissingColumn { column: String, path: PathBuf },

    /// A numeric field could not be parsed.
    #[error("invalid {column} value {value:?} at line {line} of {}", .path.display())]
    InvalidField {
        column: &'static str,
        value: String,
        line: u64,
        path: PathBuf,
    },

    /// Snapshot filenames must end in `-YYYY-MM-DD.csv`.
    #[error("{} does not end with a -YYYY-MM-DD.csv snapshot date", .path.display())]
    InvalidSnapshotName { path: PathBuf },

    /// Not enough observations to compute the requested statistic.
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// Rank correlation is undefined when either variable is constant.
    #[error("correlation undefined: {0}")]
    UndefinedCorrelation(String),

    /// Percentage change from a zero starting price.
    #[error("room {room_id} has a starting price of zero")]
    ZeroStartingPrice { room_id: i64 },

    /// Rendering the chart failed.
    #[error("plot error: {0}")]
    Plot(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn insufficient(message: impl Into<String>) -> Self {
        Self::InsufficientData(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
