//! Core data types and I/O operations.

pub mod loaders;
pub mod projection;
pub mod writers;

pub use loaders::{FieldNames, Table, TableReader};
pub use projection::{FieldRule, FieldSpec, ProjectError, Projection};
pub use writers::{CsvSink, WriteError};
