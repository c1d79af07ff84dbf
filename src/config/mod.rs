//! Configuration types for the seed data pipelines.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the restaurant projection pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantsConfig {
    /// Source CSV with the full restaurant dataset
    #[serde(default = "default_restaurants_input")]
    pub input_path: PathBuf,

    /// Destination CSV for the projected columns
    #[serde(default = "default_projector_output")]
    pub output_path: PathBuf,
}

fn default_restaurants_input() -> PathBuf {
    PathBuf::from("data/tripadvisor_european_restaurants.csv")
}

fn default_projector_output() -> PathBuf {
    PathBuf::from("output.csv")
}

impl Default for RestaurantsConfig {
    fn default() -> Self {
        Self {
            input_path: default_restaurants_input(),
            output_path: default_projector_output(),
        }
    }
}

/// Configuration for the city projection pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitiesConfig {
    /// Source CSV with the full city dataset
    #[serde(default = "default_cities_input")]
    pub input_path: PathBuf,

    /// Destination CSV for the projected columns
    #[serde(default = "default_projector_output")]
    pub output_path: PathBuf,

    /// Whether the first line of the source file is a header to skip.
    /// The city dataset carries a header row that does not match the
    /// fixed field names used for access, so it defaults to true.
    #[serde(default = "default_skip_header")]
    pub skip_header: bool,
}

fn default_cities_input() -> PathBuf {
    PathBuf::from("data/City.csv")
}

fn default_skip_header() -> bool {
    true
}

impl Default for CitiesConfig {
    fn default() -> Self {
        Self {
            input_path: default_cities_input(),
            output_path: default_projector_output(),
            skip_header: default_skip_header(),
        }
    }
}

/// Configuration for the user-location join pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinConfig {
    /// CSV with user credentials (username, password)
    #[serde(default = "default_users_input")]
    pub users_path: PathBuf,

    /// CSV with coordinates (id, latitude, longitude)
    #[serde(default = "default_coords_input")]
    pub coords_path: PathBuf,

    /// Destination CSV for the combined rows
    #[serde(default = "default_join_output")]
    pub output_path: PathBuf,
}

fn default_users_input() -> PathBuf {
    PathBuf::from("User.csv")
}

fn default_coords_input() -> PathBuf {
    PathBuf::from("ltlg.csv")
}

fn default_join_output() -> PathBuf {
    PathBuf::from("UserTotal.csv")
}

impl Default for JoinConfig {
    fn default() -> Self {
        Self {
            users_path: default_users_input(),
            coords_path: default_coords_input(),
            output_path: default_join_output(),
        }
    }
}

/// Main pipeline configuration combining all sub-configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub restaurants: RestaurantsConfig,

    #[serde(default)]
    pub cities: CitiesConfig,

    #[serde(default)]
    pub join: JoinConfig,
}

impl PipelineConfig {
    /// Load configuration from a YAML file.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: PipelineConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a YAML file.
    pub fn to_yaml<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
