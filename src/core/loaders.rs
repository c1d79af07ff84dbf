//! CSV table loaders.
//!
//! This module provides readers for the source datasets:
//! - Header-driven files, where field names come from the file's first row
//! - Fixed-name files, where field names are supplied by the caller and the
//!   file's first line is optionally skipped

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use thiserror::Error;

/// Errors that can occur during file loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to open '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parsing error in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Result type for loader operations.
pub type Result<T> = std::result::Result<T, LoadError>;

/// How source field names are obtained for a file.
#[derive(Debug, Clone)]
pub enum FieldNames {
    /// Infer field names from the file's own header row.
    FromHeader,
    /// Use this fixed list of names; when `skip_first` is set the file's
    /// first line is discarded instead of being treated as data.
    Fixed {
        names: Vec<String>,
        skip_first: bool,
    },
}

impl FieldNames {
    /// Convenience constructor for a fixed field name list.
    pub fn fixed(names: &[&str], skip_first: bool) -> Self {
        Self::Fixed {
            names: names.iter().map(|n| n.to_string()).collect(),
            skip_first,
        }
    }
}

/// Streaming reader over one CSV file with resolved field names.
///
/// Rows are surfaced one at a time so callers can transform and write
/// without buffering the whole dataset. Short rows are allowed; absent
/// trailing fields resolve to `None` on lookup.
pub struct TableReader {
    reader: csv::Reader<BufReader<File>>,
    fields: Vec<String>,
    path: PathBuf,
}

impl TableReader {
    /// Open a CSV file and resolve its field names.
    pub fn open<P: AsRef<Path>>(path: P, names: &FieldNames) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|e| LoadError::Open {
            path: path.clone(),
            source: e,
        })?;

        let has_header_line = match names {
            FieldNames::FromHeader => true,
            FieldNames::Fixed { skip_first, .. } => *skip_first,
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(has_header_line)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let fields = match names {
            FieldNames::FromHeader => {
                let headers = reader.headers().map_err(|e| LoadError::Csv {
                    path: path.clone(),
                    source: e,
                })?;
                headers.iter().map(|h| h.to_string()).collect()
            }
            FieldNames::Fixed { names, .. } => names.clone(),
        };

        Ok(Self {
            reader,
            fields,
            path,
        })
    }

    /// The resolved field names for this file.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Index of a field by name, or `None` if the file has no such field.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == name)
    }

    /// Iterate over the data rows in file order.
    pub fn records(&mut self) -> impl Iterator<Item = Result<StringRecord>> + '_ {
        let path = self.path.clone();
        self.reader.records().map(move |r| {
            r.map_err(|e| LoadError::Csv {
                path: path.clone(),
                source: e,
            })
        })
    }
}

/// Fully materialized CSV table.
///
/// Used by the join pipeline, which needs both datasets in memory to
/// compare lengths and truncate before writing.
#[derive(Debug, Clone)]
pub struct Table {
    /// Field names in column order.
    pub fields: Vec<String>,
    /// Data rows in source file order.
    pub rows: Vec<StringRecord>,
}

impl Table {
    /// Returns the number of data rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no data rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a field by name, or `None` if the table has no such field.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == name)
    }

    /// Drop all rows past the first `len`. A no-op when the table is
    /// already shorter.
    pub fn truncate(&mut self, len: usize) {
        self.rows.truncate(len);
    }
}

/// Read a whole CSV file into a [`Table`], preserving row order.
pub fn read_table<P: AsRef<Path>>(path: P, names: &FieldNames) -> Result<Table> {
    let mut reader = TableReader::open(path, names)?;
    let fields = reader.fields().to_vec();

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?);
    }

    Ok(Table { fields, rows })
}
