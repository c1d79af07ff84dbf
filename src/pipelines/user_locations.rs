//! Positional join of user credentials with coordinates.
//!
//! Both inputs are fully materialized so their lengths can be compared
//! before anything is written: the coordinates list is truncated to the
//! user count, and the run aborts if the lengths still differ. Coordinate
//! values pass through as strings; no coercion is applied.

use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use thiserror::Error;

use crate::core::loaders::{read_table, FieldNames, Table};
use crate::core::writers::CsvSink;

/// Output field names for the combined file.
const OUTPUT_FIELDS: [&str; 4] = ["username", "password", "latitude", "longitude"];

/// Errors specific to the join pipeline.
#[derive(Debug, Error)]
pub enum JoinError {
    /// The coordinates file has fewer rows than the users file, so a
    /// one-to-one pairing is impossible. Detected before the output file
    /// is created.
    #[error("row count mismatch: {users} user rows but only {coords} coordinate rows")]
    RowCountMismatch { users: usize, coords: usize },

    #[error("missing column '{column}' in '{file}'")]
    MissingColumn { file: String, column: String },
}

fn require_column(table: &Table, file: &Path, column: &str) -> Result<usize, JoinError> {
    table.field_index(column).ok_or_else(|| JoinError::MissingColumn {
        file: file.display().to_string(),
        column: column.to_string(),
    })
}

/// Join the credentials file with the coordinates file by row position.
///
/// The coordinates list is truncated to the first N entries, N being the
/// user count, then each user row is paired with the coordinate row at the
/// same index. If fewer than N coordinate rows exist the run aborts with
/// [`JoinError::RowCountMismatch`] and no output file is created or
/// modified. Any existing file at `output` is overwritten on success.
///
/// # Arguments
///
/// * `users_path` - CSV with `username, password` columns
/// * `coords_path` - CSV with `id, latitude, longitude` columns (`id` is
///   discarded)
/// * `output` - Path to the combined output CSV
///
/// # Returns
///
/// The number of combined rows written.
pub fn join_user_locations(users_path: &Path, coords_path: &Path, output: &Path) -> Result<usize> {
    let users = read_table(users_path, &FieldNames::FromHeader)
        .with_context(|| format!("failed to read users from {}", users_path.display()))?;
    let coords = read_table(coords_path, &FieldNames::FromHeader)
        .with_context(|| format!("failed to read coordinates from {}", coords_path.display()))?;

    debug!(
        "read {} user rows and {} coordinate rows",
        users.len(),
        coords.len()
    );

    let username_idx = require_column(&users, users_path, "username")?;
    let password_idx = require_column(&users, users_path, "password")?;
    let lat_idx = require_column(&coords, coords_path, "latitude")?;
    let lon_idx = require_column(&coords, coords_path, "longitude")?;

    let n = users.len();

    // Keep only the first N coordinate pairs, discarding the id column.
    let mut pairs: Vec<(String, String)> = coords
        .rows
        .iter()
        .map(|row| {
            (
                row.get(lat_idx).unwrap_or("").to_string(),
                row.get(lon_idx).unwrap_or("").to_string(),
            )
        })
        .collect();
    pairs.truncate(n);

    // Validation gate: runs before the output file is touched.
    if pairs.len() != n {
        return Err(JoinError::RowCountMismatch {
            users: n,
            coords: pairs.len(),
        }
        .into());
    }

    let mut sink = CsvSink::create(output, &OUTPUT_FIELDS)
        .with_context(|| format!("failed to create output file {}", output.display()))?;

    for (user, (lat, lon)) in users.rows.iter().zip(pairs) {
        let username = user.get(username_idx).unwrap_or("");
        let password = user.get(password_idx).unwrap_or("");
        sink.write_row([username, password, lat.as_str(), lon.as_str()])?;
    }

    sink.finish()?;
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_csv(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    #[test]
    fn test_join_with_truncation() {
        let dir = TempDir::new().unwrap();
        let users = write_csv(
            dir.path(),
            "User.csv",
            &["username,password", "alice,pw1", "bob,pw2"],
        );
        let coords = write_csv(
            dir.path(),
            "ltlg.csv",
            &[
                "id,latitude,longitude",
                "1,10.0,20.0",
                "2,30.0,40.0",
                "3,50.0,60.0",
            ],
        );
        let output = dir.path().join("UserTotal.csv");

        let rows = join_user_locations(&users, &coords, &output).unwrap();
        assert_eq!(rows, 2);

        let content = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "username,password,latitude,longitude");
        assert_eq!(lines[1], "alice,pw1,10.0,20.0");
        assert_eq!(lines[2], "bob,pw2,30.0,40.0");
        // The third coordinate row is dropped by truncation
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_too_few_coordinates_aborts_without_output() {
        let dir = TempDir::new().unwrap();
        let users = write_csv(
            dir.path(),
            "User.csv",
            &["username,password", "alice,pw1", "bob,pw2", "carol,pw3"],
        );
        let coords = write_csv(
            dir.path(),
            "ltlg.csv",
            &["id,latitude,longitude", "1,10.0,20.0", "2,30.0,40.0"],
        );
        let output = dir.path().join("UserTotal.csv");

        let err = join_user_locations(&users, &coords, &output).unwrap_err();
        let join_err = err.downcast_ref::<JoinError>().expect("JoinError");
        match join_err {
            JoinError::RowCountMismatch { users, coords } => {
                assert_eq!(*users, 3);
                assert_eq!(*coords, 2);
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(!output.exists());
    }

    #[test]
    fn test_mismatch_leaves_existing_output_untouched() {
        let dir = TempDir::new().unwrap();
        let users = write_csv(
            dir.path(),
            "User.csv",
            &["username,password", "alice,pw1", "bob,pw2"],
        );
        let coords = write_csv(dir.path(), "ltlg.csv", &["id,latitude,longitude", "1,10.0,20.0"]);
        let output = dir.path().join("UserTotal.csv");
        fs::write(&output, "previous run\n").unwrap();

        let result = join_user_locations(&users, &coords, &output);
        assert!(result.is_err());

        let content = fs::read_to_string(&output).unwrap();
        assert_eq!(content, "previous run\n");
    }

    #[test]
    fn test_equal_lengths_join_completely() {
        let dir = TempDir::new().unwrap();
        let users = write_csv(
            dir.path(),
            "User.csv",
            &["username,password", "alice,pw1", "bob,pw2"],
        );
        let coords = write_csv(
            dir.path(),
            "ltlg.csv",
            &["id,latitude,longitude", "1,10.5,20.5", "2,30.5,40.5"],
        );
        let output = dir.path().join("UserTotal.csv");

        let rows = join_user_locations(&users, &coords, &output).unwrap();
        assert_eq!(rows, 2);
    }

    #[test]
    fn test_coordinate_values_pass_through_verbatim() {
        let dir = TempDir::new().unwrap();
        let users = write_csv(dir.path(), "User.csv", &["username,password", "alice,pw1"]);
        // Values keep their exact text, trailing zeros included
        let coords = write_csv(
            dir.path(),
            "ltlg.csv",
            &["id,latitude,longitude", "7,10.500,-20.250"],
        );
        let output = dir.path().join("UserTotal.csv");

        join_user_locations(&users, &coords, &output).unwrap();

        let content = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[1], "alice,pw1,10.500,-20.250");
    }

    #[test]
    fn test_missing_column_fails() {
        let dir = TempDir::new().unwrap();
        let users = write_csv(dir.path(), "User.csv", &["username", "alice"]);
        let coords = write_csv(dir.path(), "ltlg.csv", &["id,latitude,longitude", "1,10.0,20.0"]);
        let output = dir.path().join("UserTotal.csv");

        let err = join_user_locations(&users, &coords, &output).unwrap_err();
        let join_err = err.downcast_ref::<JoinError>().expect("JoinError");
        assert!(matches!(join_err, JoinError::MissingColumn { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_empty_users_file_writes_header_only() {
        let dir = TempDir::new().unwrap();
        let users = write_csv(dir.path(), "User.csv", &["username,password"]);
        let coords = write_csv(
            dir.path(),
            "ltlg.csv",
            &["id,latitude,longitude", "1,10.0,20.0"],
        );
        let output = dir.path().join("UserTotal.csv");

        let rows = join_user_locations(&users, &coords, &output).unwrap();
        assert_eq!(rows, 0);

        let content = fs::read_to_string(&output).unwrap();
        assert_eq!(content, "username,password,latitude,longitude\n");
    }
}
