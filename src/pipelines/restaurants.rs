//! Restaurant dataset projection.
//!
//! Reads the TripAdvisor European restaurants CSV and keeps four columns:
//! name, coordinates and average rating. Field names come from the file's
//! own header row.

use std::path::Path;

use anyhow::{Context, Result};
use log::debug;

use crate::core::loaders::{FieldNames, TableReader};
use crate::core::projection::{output_header, FieldRule, FieldSpec, Projection};
use crate::core::writers::CsvSink;

/// Output schema for the restaurant projection.
///
/// A restaurant without a name gets the placeholder the rest of the app
/// expects; missing coordinates and ratings default to 0.0.
pub const RESTAURANT_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        output: "restaurant_name",
        source: "restaurant_name",
        rule: FieldRule::Text {
            fallback: "Sin nombre",
        },
    },
    FieldSpec {
        output: "latitude",
        source: "latitude",
        rule: FieldRule::Float,
    },
    FieldSpec {
        output: "longitude",
        source: "longitude",
        rule: FieldRule::Float,
    },
    FieldSpec {
        output: "avg_rating",
        source: "avg_rating",
        rule: FieldRule::Float,
    },
];

/// Project the restaurant dataset into the four-column output file.
///
/// Rows are read, transformed, and written one at a time; output row order
/// matches input row order exactly. Any existing file at `output` is
/// overwritten.
///
/// # Arguments
///
/// * `input` - Path to the source restaurant CSV (header-driven)
/// * `output` - Path to the projected output CSV
///
/// # Returns
///
/// The number of data rows written.
pub fn project_restaurants(input: &Path, output: &Path) -> Result<usize> {
    let mut reader = TableReader::open(input, &FieldNames::FromHeader)
        .with_context(|| format!("failed to read restaurant data from {}", input.display()))?;

    debug!("restaurant source fields: {:?}", reader.fields());

    let projection = Projection::bind(RESTAURANT_FIELDS, reader.fields());
    let mut sink = CsvSink::create(output, &output_header(RESTAURANT_FIELDS))
        .with_context(|| format!("failed to create output file {}", output.display()))?;

    let mut rows = 0usize;
    for record in reader.records() {
        let record = record?;
        let out = projection
            .project(&record)
            .with_context(|| format!("row {} of {}", rows + 1, input.display()))?;
        sink.write_row(&out)?;
        rows += 1;
    }

    sink.finish()?;
    Ok(rows)
}
