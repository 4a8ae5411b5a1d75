//! Header-to-index resolution and typed row access for listing snapshots.
//!
//! Snapshots are resolved once per file: the header row is scanned for the
//! columns an analysis needs and the resulting [`Schema`] is then used to
//! read every data row through [`Row`]'s typed accessors, which are the only
//! place raw text is parsed into numbers.

use std::path::Path;
use std::str::FromStr;

use csv::StringRecord;

use crate::error::{Error, Result};

/// The listing columns the analyses know how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Price,
    OverallSatisfaction,
    Reviews,
    HostId,
    RoomId,
    RoomType,
    Neighborhood,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Price,
        Column::OverallSatisfaction,
        Column::Reviews,
        Column::HostId,
        Column::RoomId,
        Column::RoomType,
        Column::Neighborhood,
    ];

    /// Header name of the column in the snapshot files.
    pub const fn name(self) -> &'static str {
        match self {
            Column::Price => "price",
            Column::OverallSatisfaction => "overall_satisfaction",
            Column::Reviews => "reviews",
            Column::HostId => "host_id",
            Column::RoomId => "room_id",
            Column::RoomType => "room_type",
            Column::Neighborhood => "neighborhood",
        }
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

/// Column positions resolved from one file's header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    indices: [Option<usize>; Column::ALL.len()],
}

impl Schema {
    /// Returns the zero-based position of `name` in `headers`.
    ///
    /// If the name appears more than once, the last occurrence wins.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingColumn`] if no header matches `name`.
    pub fn index_of(headers: &StringRecord, name: &str, path: &Path) -> Result<usize> {
        (0..headers.len())
            .rev()
            .find(|&i| &headers[i] == name)
            .ok_or_else(|| Error::MissingColumn {
                column: name.to_string(),
                path: path.to_path_buf(),
            })
    }

    /// Resolves every column in `required` against `headers`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingColumn`] for the first required column that is absent.
    pub fn resolve(headers: &StringRecord, required: &[Column], path: &Path) -> Result<Self> {
        let mut schema = Schema::default();
        for &column in required {
            schema.indices[column.slot()] = Some(Self::index_of(headers, column.name(), path)?);
        }
        Ok(schema)
    }

    /// Position of `column`, if it was resolved.
    pub fn get(&self, column: Column) -> Option<usize> {
        self.indices[column.slot()]
    }
}

/// One data row of a snapshot, read through a resolved [`Schema`].
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    pub(crate) record: &'a StringRecord,
    pub(crate) schema: &'a Schema,
    pub(crate) path: &'a Path,
}

impl<'a> Row<'a> {
    /// Line number of the row in its source file, starting at 1 for the header.
    pub fn line(&self) -> u64 {
        self.record.position().map_or(0, |p| p.line())
    }

    /// Raw text of `column`.
    ///
    /// Columns that were not part of the resolved schema, and rows shorter
    /// than the header, read as an empty string.
    pub fn text(&self, column: Column) -> &'a str {
        self.schema
            .get(column)
            .and_then(|i| self.record.get(i))
            .unwrap_or("")
    }

    /// Parses `column` into `T`, ignoring surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidField`] if the text does not parse.
    pub fn parse<T: FromStr>(&self, column: Column) -> Result<T> {
        let raw = self.text(column);
        raw.trim().parse().map_err(|_| Error::InvalidField {
            column: column.name(),
            value: raw.to_string(),
            line: self.line(),
            path: self.path.to_path_buf(),
        })
    }

    pub fn price(&self) -> Result<f64> {
        self.parse(Column::Price)
    }

    pub fn satisfaction(&self) -> Result<f64> {
        self.parse(Column::OverallSatisfaction)
    }

    pub fn reviews(&self) -> Result<i64> {
        self.parse(Column::Reviews)
    }

    pub fn host_id(&self) -> Result<i64> {
        self.parse(Column::HostId)
    }

    pub fn room_id(&self) -> Result<i64> {
        self.parse(Column::RoomId)
    }

    pub fn room_type(&self) -> &'a str {
        self.text(Column::RoomType)
    }

    pub fn neighborhood(&self) -> &'a str {
        self.text(Column::Neighborhood)
    }
}
