//! Seed data pipelines.

pub mod cities;
pub mod restaurants;
pub mod user_locations;

// Re-export key operations for convenience
pub use cities::{project_cities, CITY_FIELDS, CITY_SOURCE_FIELDS};
pub use restaurants::{project_restaurants, RESTAURANT_FIELDS};
pub use user_locations::{join_user_locations, JoinError};
