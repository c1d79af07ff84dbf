//! CSV output writing.
//!
//! This module provides a buffered CSV sink that writes a header row on
//! creation, then data rows one at a time, flushing on finish. An existing
//! file at the output path is overwritten.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use thiserror::Error;

/// Errors that can occur during write operations.
#[derive(Error, Debug)]
pub enum WriteError {
    /// Failed to create parent directories.
    #[error("failed to create parent directories for '{path}': {source}")]
    CreateDirectory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or open file for writing.
    #[error("failed to create file '{path}': {source}")]
    CreateFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write data to file.
    #[error("failed to write to file '{path}': {source}")]
    WriteFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV writing error.
    #[error("CSV write error for '{path}': {source}")]
    CsvError {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// Result type for write operations.
pub type Result<T> = std::result::Result<T, WriteError>;

/// Creates parent directories for a file path if they don't exist.
fn ensure_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| WriteError::CreateDirectory {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
    }
    Ok(())
}

/// Buffered CSV writer with a fixed header row.
///
/// The underlying file handle is released when the sink is dropped, even
/// mid-write on the error path; call [`CsvSink::finish`] to flush and
/// surface any buffered write error on success.
pub struct CsvSink {
    writer: csv::Writer<BufWriter<File>>,
    path: String,
}

impl CsvSink {
    /// Create the output file, truncating any existing one, and write the
    /// header row.
    pub fn create(path: &Path, header: &[&str]) -> Result<Self> {
        ensure_parent_dirs(path)?;

        let file = File::create(path).map_err(|e| WriteError::CreateFile {
            path: path.display().to_string(),
            source: e,
        })?;
        let writer = csv::Writer::from_writer(BufWriter::new(file));
        let path = path.display().to_string();

        let mut sink = Self { writer, path };
        sink.write_row(header)?;
        Ok(sink)
    }

    /// Write one data row.
    pub fn write_row<I, S>(&mut self, row: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        self.writer.write_record(row).map_err(|e| WriteError::CsvError {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Flush buffered rows and close out the file.
    pub fn finish(mut self) -> Result<()> {
        self.writer.flush().map_err(|e| WriteError::WriteFile {
            path: self.path.clone(),
            source: e,
        })
    }
}
