//! Per-field coercion policies and row projection.
//!
//! A projection declares the output schema upfront: for each output column,
//! the source field it reads and the coercion rule applied to it. Keeping
//! the rules in a table makes the defaulting contract testable on its own.

use csv::StringRecord;
use thiserror::Error;

/// Errors that can occur while projecting a row.
#[derive(Error, Debug)]
pub enum ProjectError {
    /// A numeric field was present but could not be parsed. Missing or
    /// empty values default instead of erroring.
    #[error("field '{field}' has non-numeric value '{value}'")]
    Coerce { field: String, value: String },
}

/// Result type for projection operations.
pub type Result<T> = std::result::Result<T, ProjectError>;

/// Coercion rule for one output field.
#[derive(Debug, Clone, Copy)]
pub enum FieldRule {
    /// Copy the source value verbatim; substitute `fallback` when the
    /// source field is absent. An empty-but-present value is kept.
    Text { fallback: &'static str },
    /// Parse the source value as a float. Absent or empty values become
    /// exactly `0.0`; a present but malformed value is an error.
    Float,
}

/// Declares one output column and the source field feeding it.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub output: &'static str,
    pub source: &'static str,
    pub rule: FieldRule,
}

/// Returns the output header row for a field spec list.
pub fn output_header(specs: &[FieldSpec]) -> Vec<&'static str> {
    specs.iter().map(|s| s.output).collect()
}

/// A field spec list bound to a concrete file's field names.
///
/// Source indices are resolved once so per-row projection is a straight
/// positional lookup. A source field missing from the file resolves every
/// row to the absent case.
pub struct Projection<'a> {
    specs: &'a [FieldSpec],
    indices: Vec<Option<usize>>,
}

impl<'a> Projection<'a> {
    /// Bind a spec list to a file's field names.
    pub fn bind(specs: &'a [FieldSpec], fields: &[String]) -> Self {
        let indices = specs
            .iter()
            .map(|spec| fields.iter().position(|f| f == spec.source))
            .collect();

        Self { specs, indices }
    }

    /// Build one output row from one input row.
    pub fn project(&self, record: &StringRecord) -> Result<Vec<String>> {
        let mut out = Vec::with_capacity(self.specs.len());

        for (spec, idx) in self.specs.iter().zip(&self.indices) {
            let value = idx.and_then(|i| record.get(i));
            out.push(coerce(spec, value)?);
        }

        Ok(out)
    }
}

fn coerce(spec: &FieldSpec, value: Option<&str>) -> Result<String> {
    match spec.rule {
        FieldRule::Text { fallback } => Ok(value.unwrap_or(fallback).to_string()),
        FieldRule::Float => match value {
            None => Ok(format_float(0.0)),
            Some(v) if v.is_empty() => Ok(format_float(0.0)),
            Some(v) => {
                let parsed: f64 = v.trim().parse().map_err(|_| ProjectError::Coerce {
                    field: spec.source.to_string(),
                    value: v.to_string(),
                })?;
                Ok(format_float(parsed))
            }
        },
    }
}

/// Format a float with a trailing `.0` for integral values, so defaulted
/// fields read exactly `0.0`.
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}
