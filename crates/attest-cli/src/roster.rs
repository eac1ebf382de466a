//! Roster input — the CSV of recipients to issue certificates for.

use std::path::Path;

use anyhow::{Context, Result, bail};
use attest_core::record::RosterEntry;

/// Read roster rows from a CSV file with `Name` and `Course` columns.
///
/// Column order does not matter; any other columns are ignored. A row
/// with an empty name or course aborts the read, since issuing a blank
/// certificate is never what the operator wants.
pub fn read_roster(path: &Path) -> Result<Vec<RosterEntry>> {
  let mut reader = csv::Reader::from_path(path)
    .with_context(|| format!("opening roster {}", path.display()))?;

  let headers = reader.headers().context("reading roster header")?.clone();
  let name_idx = column(&headers, "Name")?;
  let course_idx = column(&headers, "Course")?;

  let mut entries = Vec::new();
  for (idx, row) in reader.records().enumerate() {
    let row = row.with_context(|| format!("reading roster row {}", idx + 1))?;
    let name = row.get(name_idx).unwrap_or("").trim();
    let course = row.get(course_idx).unwrap_or("").trim();
    if name.is_empty() || course.is_empty() {
      bail!("roster row {}: empty Name or Course", idx + 1);
    }
    entries.push(RosterEntry {
      name:   name.to_string(),
      course: course.to_string(),
    });
  }
  Ok(entries)
}

fn column(headers: &csv::StringRecord, wanted: &str) -> Result<usize> {
  headers
    .iter()
    .position(|h| h.trim() == wanted)
    .with_context(|| format!("roster is missing the {wanted:?} column"))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn write_roster(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.csv");
    std::fs::write(&path, contents).unwrap();
    (dir, path)
  }

  #[test]
  fn reads_rows_in_order() {
    let (_dir, path) =
      write_roster("Name,Course\nAlice,Math\nBob,Physics\n");
    let roster = read_roster(&path).unwrap();
    assert_eq!(roster.len(), 2);
    assert_eq!(roster[0].name, "Alice");
    assert_eq!(roster[1].course, "Physics");
  }

  #[test]
  fn extra_columns_are_ignored() {
    let (_dir, path) =
      write_roster("Email,Name,Course\na@x.com,Alice,Math\n");
    let roster = read_roster(&path).unwrap();
    assert_eq!(roster[0].name, "Alice");
    assert_eq!(roster[0].course, "Math");
  }

  #[test]
  fn missing_course_column_is_an_error() {
    let (_dir, path) = write_roster("Name\nAlice\n");
    let err = read_roster(&path).unwrap_err();
    assert!(err.to_string().contains("Course"), "got: {err}");
  }

  #[test]
  fn empty_name_is_an_error() {
    let (_dir, path) = write_roster("Name,Course\n ,Math\n");
    let err = read_roster(&path).unwrap_err();
    assert!(err.to_string().contains("row 1"), "got: {err}");
  }
}
