//! City dataset projection.
//!
//! Reads the world cities CSV and keeps three columns. The source file's
//! header row does not use the names the pipeline accesses fields by, so
//! field names are supplied as a fixed list and the first line is skipped.

use std::path::Path;

use anyhow::{Context, Result};
use log::debug;

use crate::core::loaders::{FieldNames, TableReader};
use crate::core::projection::{output_header, FieldRule, FieldSpec, Projection};
use crate::core::writers::CsvSink;

/// Positional field names for the city dataset.
pub const CITY_SOURCE_FIELDS: &[&str] = &[
    "Country",
    "City",
    "AccentCity",
    "Region",
    "Population",
    "Latitude",
    "Longitude",
];

/// Output schema for the city projection.
///
/// The name column sources from `AccentCity`, the accented display form,
/// not the lowercased `City` column.
pub const CITY_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        output: "city_name",
        source: "AccentCity",
        rule: FieldRule::Text {
            fallback: "Sin nombre",
        },
    },
    FieldSpec {
        output: "latitude",
        source: "Latitude",
        rule: FieldRule::Float,
    },
    FieldSpec {
        output: "longitude",
        source: "Longitude",
        rule: FieldRule::Float,
    },
];

/// Project the city dataset into the three-column output file.
///
/// Rows are read, transformed, and written one at a time; output row order
/// matches input row order exactly. Any existing file at `output` is
/// overwritten.
///
/// # Arguments
///
/// * `input` - Path to the source city CSV
/// * `output` - Path to the projected output CSV
/// * `skip_header` - Whether the file's first line is a header to discard
///
/// # Returns
///
/// The number of data rows written.
pub fn project_cities(input: &Path, output: &Path, skip_header: bool) -> Result<usize> {
    let names = FieldNames::fixed(CITY_SOURCE_FIELDS, skip_header);
    let mut reader = TableReader::open(input, &names)
        .with_context(|| format!("failed to read city data from {}", input.display()))?;

    debug!("city source fields: {:?}", reader.fields());

    let projection = Projection::bind(CITY_FIELDS, reader.fields());
    let mut sink = CsvSink::create(output, &output_header(CITY_FIELDS))
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_city_csv(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    #[test]
    fn test_project_cities() {
        let dir = TempDir::new().unwrap();
        let input = write_city_csv(
            dir.path(),
            "City.csv",
            &[
                "Country,City,AccentCity,Region,Population,Latitude,Longitude",
                "es,malaga,Málaga,51,568305,36.7202,-4.4203",
                "es,a coruna,A Coruña,58,243402,43.3713,-8.396",
            ],
        );
        let output = dir.path().join("output.csv");

        let rows = project_cities(&input, &output, true).unwrap();
        assert_eq!(rows, 2);

        let content = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "city_name,latitude,longitude");
        assert_eq!(lines[1], "Málaga,36.7202,-4.4203");
        assert_eq!(lines[2], "A Coruña,43.3713,-8.396");
    }

    #[test]
    fn test_name_comes_from_accent_city_not_city() {
        let dir = TempDir::new().unwrap();
        let input = write_city_csv(
            dir.path(),
            "City.csv",
            &[
                "Country,City,AccentCity,Region,Population,Latitude,Longitude",
                "es,cordoba,Córdoba,51,325708,37.8845,-4.7796",
            ],
        );
        let output = dir.path().join("output.csv");

        project_cities(&input, &output, true).unwrap();

        let content = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert!(lines[1].starts_with("Córdoba,"));
        assert!(!lines[1].starts_with("cordoba,"));
    }

    #[test]
    fn test_first_line_is_skipped() {
        let dir = TempDir::new().unwrap();
        let input = write_city_csv(
            dir.path(),
            "City.csv",
            &[
                "Country,City,AccentCity,Region,Population,Latitude,Longitude",
                "es,madrid,Madrid,29,3255944,40.4165,-3.70256",
            ],
        );
        let output = dir.path().join("output.csv");

        let rows = project_cities(&input, &output, true).unwrap();
        assert_eq!(rows, 1);

        // The header line must not show up as data
        let content = fs::read_to_string(&output).unwrap();
        assert!(!content.contains("AccentCity"));
    }

    #[test]
    fn test_headerless_input_with_skip_disabled() {
        let dir = TempDir::new().unwrap();
        let input = write_city_csv(
            dir.path(),
            "City.csv",
            &[
                "es,madrid,Madrid,29,3255944,40.4165,-3.70256",
                "es,sevilla,Sevilla,51,703206,37.3824,-5.97317",
            ],
        );
        let output = dir.path().join("output.csv");

        let rows = project_cities(&input, &output, false).unwrap();
        assert_eq!(rows, 2);

        let content = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[1], "Madrid,40.4165,-3.70256");
    }

    #[test]
    fn test_missing_coordinates_default_to_zero() {
        let dir = TempDir::new().unwrap();
        let input = write_city_csv(
            dir.path(),
            "City.csv",
            &[
                "Country,City,AccentCity,Region,Population,Latitude,Longitude",
                "es,teruel,Teruel,52,,,",
            ],
        );
        let output = dir.path().join("output.csv");

        project_cities(&input, &output, true).unwrap();

        let content = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[1], "Teruel,0.0,0.0");
    }

    #[test]
    fn test_idempotent_output() {
        let dir = TempDir::new().unwrap();
        let input = write_city_csv(
            dir.path(),
            "City.csv",
            &[
                "Country,City,AccentCity,Region,Population,Latitude,Longitude",
                "es,malaga,Málaga,51,568305,36.7202,-4.4203",
            ],
        );
        let output = dir.path().join("output.csv");

        project_cities(&input, &output, true).unwrap();
        let first = fs::read_to_string(&output).unwrap();

        project_cities(&input, &output, true).unwrap();
        let second = fs::read_to_string(&output).unwrap();

        assert_eq!(first, second);
    }
}
