//! Bulk issuance — renders, stores, and records one certificate per
//! roster row.

use std::path::PathBuf;

use anyhow::{Context, Result};
use attest_core::{
  ledger::Ledger,
  record::{CertificateId, CertificateRecord, IssueStatus, RosterEntry},
  render::{CertificateFields, Renderer},
  storage::DocumentStore,
};
use chrono::NaiveDate;

/// Everything `issue_all` needs besides the roster itself.
pub struct IssueOptions {
  pub id_prefix:  String,
  pub issue_date: NaiveDate,
  /// Rendered PDFs are written here as `<id>.pdf`.
  pub output_dir: PathBuf,
}

/// Issue certificates for every roster row, in input order.
///
/// Certificate ids are assigned from the 1-based row index. Ledger
/// appends are unconditional, so running this twice over the same roster
/// appends duplicate rows. The first failing row aborts the run; rows
/// already issued stay issued.
pub async fn issue_all<R, D, L>(
  roster:   &[RosterEntry],
  renderer: &R,
  store:    &D,
  ledger:   &L,
  options:  &IssueOptions,
) -> Result<Vec<CertificateRecord>>
where
  R: Renderer,
  D: DocumentStore,
  L: Ledger,
{
  std::fs::create_dir_all(&options.output_dir).with_context(|| {
    format!("creating output directory {}", options.output_dir.display())
  })?;

  let mut issued = Vec::with_capacity(roster.len());

  for (index, entry) in roster.iter().enumerate() {
    let certificate_id = CertificateId::from_index(&options.id_prefix, index + 1);
    tracing::info!(%certificate_id, name = %entry.name, "generating certificate");

    let fields = CertificateFields {
      certificate_id: certificate_id.clone(),
      name:           entry.name.clone(),
      course:         entry.course.clone(),
      issued_on:      options.issue_date,
    };

    let pdf = renderer
      .render_pdf(&fields)
      .with_context(|| format!("rendering certificate {certificate_id}"))?;

    let pdf_path = options.output_dir.join(format!("{certificate_id}.pdf"));
    std::fs::write(&pdf_path, &pdf)
      .with_context(|| format!("writing {}", pdf_path.display()))?;

    let document_link = store
      .upload(&certificate_id, pdf)
      .await
      .with_context(|| format!("uploading certificate {certificate_id}"))?;

    let record = CertificateRecord {
      certificate_id,
      name: entry.name.clone(),
      course: entry.course.clone(),
      issue_date: options.issue_date,
      status: IssueStatus::Verified,
      document_link,
    };
    ledger
      .append(record.clone())
      .await
      .with_context(|| format!("recording certificate {}", record.certificate_id))?;
    issued.push(record);
  }

  Ok(issued)
}

// ─── Local storage ────────────────────────────────────────────────────────────

/// "Uploads" by pointing at the PDF already written under the output
/// directory. Used with the CSV ledger when no Drive access is
/// configured.
pub struct LocalStore {
  pub dir: PathBuf,
}

impl DocumentStore for LocalStore {
  type Error = std::convert::Infallible;

  async fn upload(
    &self,
    certificate_id: &CertificateId,
    _pdf: Vec<u8>,
  ) -> Result<String, Self::Error> {
    let path = self.dir.join(format!("{certificate_id}.pdf"));
    Ok(format!("file://{}", path.display()))
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use super::*;

  struct StubRenderer;

  impl Renderer for StubRenderer {
    type Error = std::convert::Infallible;

    fn render_pdf(&self, fields: &CertificateFields) -> Result<Vec<u8>, Self::Error> {
      Ok(format!("%PDF-stub {}", fields.certificate_id).into_bytes())
    }
  }

  #[derive(Default)]
  struct MemoryLedger {
    rows: Mutex<Vec<CertificateRecord>>,
  }

  impl Ledger for MemoryLedger {
    type Error = std::convert::Infallible;

    async fn append(&self, record: CertificateRecord) -> Result<(), Self::Error> {
      self.rows.lock().unwrap().push(record);
      Ok(())
    }

    async fn records(&self) -> Result<Vec<CertificateRecord>, Self::Error> {
      Ok(self.rows.lock().unwrap().clone())
    }
  }

  /// Fails every upload from `fail_from` (1-based) onward.
  struct FlakyStore {
    uploads:   Mutex<u32>,
    fail_from: u32,
  }

  #[derive(Debug)]
  struct UploadRefused;

  impl std::fmt::Display for UploadRefused {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
      f.write_str("upload refused")
    }
  }

  impl std::error::Error for UploadRefused {}

  impl DocumentStore for FlakyStore {
    type Error = UploadRefused;

    async fn upload(
      &self,
      certificate_id: &CertificateId,
      _pdf: Vec<u8>,
    ) -> Result<String, Self::Error> {
      let mut uploads = self.uploads.lock().unwrap();
      *uploads += 1;
      if *uploads >= self.fail_from {
        return Err(UploadRefused);
      }
      Ok(format!("http://docs.example/{certificate_id}.pdf"))
    }
  }

  fn roster(n: usize) -> Vec<RosterEntry> {
    (0..n)
      .map(|i| RosterEntry {
        name:   format!("Student {}", i + 1),
        course: "Math".to_string(),
      })
      .collect()
  }

  fn options(dir: &tempfile::TempDir) -> IssueOptions {
    IssueOptions {
      id_prefix:  CertificateId::DEFAULT_PREFIX.to_string(),
      issue_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
      output_dir: dir.path().join("certificates"),
    }
  }

  #[tokio::test]
  async fn ids_are_deterministic_and_order_dependent() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = MemoryLedger::default();
    let store = LocalStore { dir: dir.path().join("certificates") };

    let issued =
      issue_all(&roster(12), &StubRenderer, &store, &ledger, &options(&dir))
        .await
        .unwrap();

    assert_eq!(issued[0].certificate_id.as_str(), "1PYTH001");
    assert_eq!(issued[11].certificate_id.as_str(), "1PYTH012");
  }

  #[tokio::test]
  async fn records_carry_status_link_and_date() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = MemoryLedger::default();
    let store = LocalStore { dir: dir.path().join("certificates") };

    let issued =
      issue_all(&roster(1), &StubRenderer, &store, &ledger, &options(&dir))
        .await
        .unwrap();

    let record = &issued[0];
    assert_eq!(record.status, IssueStatus::Verified);
    assert_eq!(record.name, "Student 1");
    assert!(record.document_link.ends_with("1PYTH001.pdf"));
    assert_eq!(record.issue_date.to_string(), "2024-01-01");
  }

  #[tokio::test]
  async fn pdfs_are_written_to_the_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = MemoryLedger::default();
    let store = LocalStore { dir: dir.path().join("certificates") };

    issue_all(&roster(2), &StubRenderer, &store, &ledger, &options(&dir))
      .await
      .unwrap();

    let pdf = std::fs::read(dir.path().join("certificates/1PYTH002.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
  }

  #[tokio::test]
  async fn reissuing_appends_duplicate_rows() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = MemoryLedger::default();
    let store = LocalStore { dir: dir.path().join("certificates") };
    let options = options(&dir);

    issue_all(&roster(3), &StubRenderer, &store, &ledger, &options)
      .await
      .unwrap();
    issue_all(&roster(3), &StubRenderer, &store, &ledger, &options)
      .await
      .unwrap();

    let rows = ledger.records().await.unwrap();
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0].certificate_id, rows[3].certificate_id);
  }

  #[tokio::test]
  async fn first_failure_aborts_and_keeps_prior_rows() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = MemoryLedger::default();
    let store = FlakyStore { uploads: Mutex::new(0), fail_from: 2 };

    let err =
      issue_all(&roster(3), &StubRenderer, &store, &ledger, &options(&dir))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("1PYTH002"), "got: {err}");
    assert_eq!(ledger.records().await.unwrap().len(), 1);
  }
}
