//! Command-line interface for the seed data pipelines.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::PathBuf;
use std::time::Instant;

use crate::pipelines::{cities, restaurants, user_locations};
use crate::PipelineConfig;

#[derive(Parser)]
#[command(name = "geoseed")]
#[command(about = "CSV projection and join pipelines for geo seed data", version)]
pub struct Cli {
    /// Path to YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project the restaurant dataset down to name, coordinates and rating
    Restaurants {
        /// Input CSV file (defaults to the configured path)
        input: Option<PathBuf>,
        /// Output CSV file (defaults to the configured path)
        output: Option<PathBuf>,
    },

    /// Project the city dataset down to name and coordinates
    Cities {
        /// Input CSV file (defaults to the configured path)
        input: Option<PathBuf>,
        /// Output CSV file (defaults to the configured path)
        output: Option<PathBuf>,
        /// Treat the first line as data instead of a header to skip
        #[arg(long)]
        no_skip_header: bool,
    },

    /// Join user credentials with coordinates by row position
    JoinUsers {
        /// Users CSV file (defaults to the configured path)
        users: Option<PathBuf>,
        /// Coordinates CSV file (defaults to the configured path)
        coords: Option<PathBuf>,
        /// Output CSV file (defaults to the configured path)
        output: Option<PathBuf>,
    },
}

/// Create a spinner for indeterminate operations
fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Print a summary box
fn print_summary(title: &str, items: &[(&str, String)]) {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║ {:<62} ║", title);
    println!("╠══════════════════════════════════════════════════════════════╣");
    for (key, value) in items {
        let display_value = if value.len() > 39 {
            format!("{}...", &value[..36])
        } else {
            value.clone()
        };
        println!("║ {:<20}: {:<39} ║", key, display_value);
    }
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
}

pub fn run() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity (must come first)
    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .format_timestamp_secs()
        .init();

    // Load config
    let config = match &cli.config {
        Some(path) => match PipelineConfig::from_yaml(path) {
            Ok(cfg) => {
                info!("Loaded config from: {}", path.display());
                cfg
            }
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}, using defaults",
                    path.display(),
                    e
                );
                PipelineConfig::default()
            }
        },
        None => PipelineConfig::default(),
    };

    // Dispatch to subcommands
    match cli.command {
        Commands::Restaurants { input, output } => {
            let input = input.unwrap_or_else(|| config.restaurants.input_path.clone());
            let output = output.unwrap_or_else(|| config.restaurants.output_path.clone());
            cmd_restaurants(&input, &output);
        }
        Commands::Cities {
            input,
            output,
            no_skip_header,
        } => {
            let input = input.unwrap_or_else(|| config.cities.input_path.clone());
            let output = output.unwrap_or_else(|| config.cities.output_path.clone());
            let skip_header = if no_skip_header {
                false
            } else {
                config.cities.skip_header
            };
            cmd_cities(&input, &output, skip_header);
        }
        Commands::JoinUsers {
            users,
            coords,
            output,
        } => {
            let users = users.unwrap_or_else(|| config.join.users_path.clone());
            let coords = coords.unwrap_or_else(|| config.join.coords_path.clone());
            let output = output.unwrap_or_else(|| config.join.output_path.clone());
            cmd_join_users(&users, &coords, &output);
        }
    }
}

fn cmd_restaurants(input: &PathBuf, output: &PathBuf) {
    let start = Instant::now();

    println!("Projecting restaurant data...");
    println!("Input: {}", input.display());
    println!("Output: {}", output.display());

    let spinner = create_spinner("Projecting restaurant rows...");

    match restaurants::project_restaurants(input, output) {
        Ok(rows) => {
            spinner.finish_and_clear();

            print_summary(
                "Restaurant Projection Complete",
                &[
                    ("Input file", input.display().to_string()),
                    ("Output file", output.display().to_string()),
                    ("Rows written", rows.to_string()),
                    ("Duration", format!("{:.2?}", start.elapsed())),
                ],
            );
        }
        Err(e) => {
            spinner.finish_and_clear();
            error!("Restaurant projection failed: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn cmd_cities(input: &PathBuf, output: &PathBuf, skip_header: bool) {
    let start = Instant::now();

    println!("Projecting city data...");
    println!("Input: {}", input.display());
    println!("Output: {}", output.display());
    println!("Skip header: {}", skip_header);

    let spinner = create_spinner("Projecting city rows...");

    match cities::project_cities(input, output, skip_header) {
        Ok(rows) => {
            spinner.finish_and_clear();

            print_summary(
                "City Projection Complete",
                &[
                    ("Input file", input.display().to_string()),
                    ("Output file", output.display().to_string()),
                    ("Rows written", rows.to_string()),
                    ("Skip header", skip_header.to_string()),
                    ("Duration", format!("{:.2?}", start.elapsed())),
                ],
            );
        }
        Err(e) => {
            spinner.finish_and_clear();
            error!("City projection failed: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn cmd_join_users(users: &PathBuf, coords: &PathBuf, output: &PathBuf) {
    let start = Instant::now();

    println!("Joining users with coordinates...");
    println!("Users: {}", users.display());
    println!("Coordinates: {}", coords.display());
    println!("Output: {}", output.display());

    let spinner = create_spinner("Pairing rows...");

    match user_locations::join_user_locations(users, coords, output) {
        Ok(rows) => {
            spinner.finish_and_clear();

            print_summary(
                "User-Location Join Complete",
                &[
                    ("Users file", users.display().to_string()),
                    ("Coordinates file", coords.display().to_string()),
                    ("Output file", output.display().to_string()),
                    ("Rows written", rows.to_string()),
                    ("Duration", format!("{:.2?}", start.elapsed())),
                ],
            );
        }
        Err(e) => {
            spinner.finish_and_clear();
            error!("Join failed: {:#}", e);
            std::process::exit(1);
        }
    }
}
