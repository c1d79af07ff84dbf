//! CSV field-projection and join pipelines for geo seed data.
//!
//! This crate provides tools for:
//! - Projecting the TripAdvisor restaurant dataset down to name, coordinates
//!   and average rating columns
//! - Projecting the world cities dataset down to name and coordinate columns
//! - Joining user credentials with coordinates by row position
//!
//! # Example
//!
//! ```no_run
//! use geoseed::pipelines::restaurants::project_restaurants;
//! use std::path::Path;
//!
//! let rows = project_restaurants(
//!     Path::new("data/tripadvisor_european_restaurants.csv"),
//!     Path::new("output.csv"),
//! ).unwrap();
//! println!("{} rows written", rows);
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod pipelines;

pub use config::{CitiesConfig, JoinConfig, PipelineConfig, RestaurantsConfig};
pub use crate::core::loaders::{FieldNames, Table};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
