//! Certificate records — the single entity of the Attest ledger.
//!
//! A record is created once at issuance time by appending to the ledger,
//! never updated or deleted, and read back during verification by
//! exact-match lookup on its certificate id.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Certificate id ──────────────────────────────────────────────────────────

/// A caller-assigned certificate identifier.
///
/// Bulk issuance assigns ids from the 1-based roster row index; the result
/// is deterministic and input-order dependent (row 1 → `1PYTH001`,
/// row 12 → `1PYTH012`). Uniqueness is not enforced anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CertificateId(String);

impl CertificateId {
  /// Prefix used when no other prefix is configured.
  pub const DEFAULT_PREFIX: &'static str = "1PYTH";

  pub fn new(raw: impl Into<String>) -> Self { Self(raw.into()) }

  /// Id for a roster row: the prefix followed by the zero-padded
  /// three-digit row index.
  pub fn from_index(prefix: &str, index: usize) -> Self {
    Self(format!("{prefix}{index:03}"))
  }

  pub fn as_str(&self) -> &str { &self.0 }

  /// Whether `submitted` names this certificate, ignoring surrounding
  /// whitespace on both sides.
  pub fn matches(&self, submitted: &str) -> bool {
    self.0.trim() == submitted.trim()
  }
}

impl std::fmt::Display for CertificateId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── Status ──────────────────────────────────────────────────────────────────

/// Issuance status as recorded in the ledger.
///
/// Bulk issuance always writes [`IssueStatus::Verified`]. The ledger is an
/// external spreadsheet other tooling may also write to, so unknown status
/// strings round-trip through [`IssueStatus::Other`] instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IssueStatus {
  Verified,
  Revoked,
  Other(String),
}

impl From<&str> for IssueStatus {
  fn from(raw: &str) -> Self {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("verified") {
      Self::Verified
    } else if trimmed.eq_ignore_ascii_case("revoked") {
      Self::Revoked
    } else {
      Self::Other(trimmed.to_string())
    }
  }
}

impl From<String> for IssueStatus {
  fn from(raw: String) -> Self { Self::from(raw.as_str()) }
}

impl From<IssueStatus> for String {
  fn from(status: IssueStatus) -> Self { status.to_string() }
}

impl std::fmt::Display for IssueStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Verified => f.write_str("Verified"),
      Self::Revoked  => f.write_str("Revoked"),
      Self::Other(s) => f.write_str(s),
    }
  }
}

// ─── Roster input ────────────────────────────────────────────────────────────

/// One roster row: a recipient to issue a certificate for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
  pub name:   String,
  pub course: String,
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// Column order shared by every ledger backend.
pub const LEDGER_HEADER: [&str; 6] =
  ["CertificateID", "Name", "Course", "IssueDate", "Status", "PDFLink"];

/// Whether `row` is the canonical header row rather than a record.
pub fn is_header_row<S: AsRef<str>>(row: &[S]) -> bool {
  row
    .first()
    .is_some_and(|cell| cell.as_ref().trim().eq_ignore_ascii_case(LEDGER_HEADER[0]))
}

/// A certificate issuance, as recorded in the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateRecord {
  pub certificate_id: CertificateId,
  pub name:           String,
  pub course:         String,
  pub issue_date:     NaiveDate,
  pub status:         IssueStatus,
  /// Publicly readable link to the uploaded document.
  pub document_link:  String,
}

impl CertificateRecord {
  /// Encode as the six-column ledger row.
  pub fn to_row(&self) -> [String; 6] {
    [
      self.certificate_id.to_string(),
      self.name.clone(),
      self.course.clone(),
      self.issue_date.format("%Y-%m-%d").to_string(),
      self.status.to_string(),
      self.document_link.clone(),
    ]
  }

  /// Decode a ledger row.
  ///
  /// The first five columns are required. A missing or empty `PDFLink`
  /// cell decodes as `#` so hand-entered rows without a link still
  /// verify.
  pub fn from_row<S: AsRef<str>>(row: &[S]) -> Result<Self> {
    let cell = |idx: usize, column: &'static str| -> Result<&str> {
      row
        .get(idx)
        .map(|c| c.as_ref().trim())
        .ok_or(Error::MissingColumn(column))
    };

    let issue_date_raw = cell(3, "IssueDate")?;
    let issue_date = NaiveDate::parse_from_str(issue_date_raw, "%Y-%m-%d")
      .map_err(|_| Error::InvalidIssueDate(issue_date_raw.to_string()))?;

    let document_link = match row.get(5).map(|c| c.as_ref().trim()) {
      Some(link) if !link.is_empty() => link.to_string(),
      _ => "#".to_string(),
    };

    Ok(Self {
      certificate_id: CertificateId::new(cell(0, "CertificateID")?),
      name: cell(1, "Name")?.to_string(),
      course: cell(2, "Course")?.to_string(),
      issue_date,
      status: IssueStatus::from(cell(4, "Status")?),
      document_link,
    })
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn record() -> CertificateRecord {
    CertificateRecord {
      certificate_id: CertificateId::new("1PYTH001"),
      name:           "Alice".to_string(),
      course:         "Math".to_string(),
      issue_date:     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
      status:         IssueStatus::Verified,
      document_link:  "http://x".to_string(),
    }
  }

  // ── Id assignment ───────────────────────────────────────────────────────────

  #[test]
  fn id_assignment_is_zero_padded_and_order_dependent() {
    let prefix = CertificateId::DEFAULT_PREFIX;
    assert_eq!(CertificateId::from_index(prefix, 1).as_str(), "1PYTH001");
    assert_eq!(CertificateId::from_index(prefix, 12).as_str(), "1PYTH012");
    assert_eq!(CertificateId::from_index(prefix, 123).as_str(), "1PYTH123");
  }

  #[test]
  fn id_match_ignores_surrounding_whitespace() {
    let id = CertificateId::new("1PYTH001");
    assert!(id.matches("1PYTH001"));
    assert!(id.matches(" 1PYTH001 "));
    assert!(!id.matches("1PYTH002"));
  }

  // ── Status ──────────────────────────────────────────────────────────────────

  #[test]
  fn status_parses_known_values_case_insensitively() {
    assert_eq!(IssueStatus::from("Verified"), IssueStatus::Verified);
    assert_eq!(IssueStatus::from("verified"), IssueStatus::Verified);
    assert_eq!(IssueStatus::from("REVOKED"), IssueStatus::Revoked);
  }

  #[test]
  fn status_preserves_unknown_values() {
    let status = IssueStatus::from("Pending review");
    assert_eq!(status, IssueStatus::Other("Pending review".to_string()));
    assert_eq!(status.to_string(), "Pending review");
  }

  // ── Row codec ───────────────────────────────────────────────────────────────

  #[test]
  fn row_round_trip_preserves_all_fields() {
    let original = record();
    let row = original.to_row();
    assert_eq!(row[0], "1PYTH001");
    assert_eq!(row[3], "2024-01-01");
    assert_eq!(row[4], "Verified");

    let decoded = CertificateRecord::from_row(&row).unwrap();
    assert_eq!(decoded, original);
  }

  #[test]
  fn from_row_rejects_short_rows() {
    let row = ["1PYTH001", "Alice", "Math"];
    assert!(matches!(
      CertificateRecord::from_row(&row),
      Err(Error::MissingColumn("IssueDate"))
    ));
  }

  #[test]
  fn from_row_rejects_bad_dates() {
    let row = ["1PYTH001", "Alice", "Math", "01/01/2024", "Verified", "http://x"];
    assert!(matches!(
      CertificateRecord::from_row(&row),
      Err(Error::InvalidIssueDate(_))
    ));
  }

  #[test]
  fn from_row_defaults_missing_link() {
    let row = ["1PYTH001", "Alice", "Math", "2024-01-01", "Verified"];
    let decoded = CertificateRecord::from_row(&row).unwrap();
    assert_eq!(decoded.document_link, "#");

    let row = ["1PYTH001", "Alice", "Math", "2024-01-01", "Verified", ""];
    let decoded = CertificateRecord::from_row(&row).unwrap();
    assert_eq!(decoded.document_link, "#");
  }

  #[test]
  fn header_row_is_recognised() {
    assert!(is_header_row(&LEDGER_HEADER));
    assert!(is_header_row(&[" certificateid "]));
    assert!(!is_header_row(&["1PYTH001", "Alice"]));
    assert!(!is_header_row::<&str>(&[]));
  }
}
