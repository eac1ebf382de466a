//! [`CsvLedger`] — the CSV-file implementation of [`Ledger`].

use std::path::{Path, PathBuf};

use attest_core::{
  ledger::Ledger,
  record::{CertificateRecord, LEDGER_HEADER, is_header_row},
};
use tokio::sync::RwLock;

use crate::Result;

/// A certificate ledger backed by one CSV file.
///
/// The whole file is read once at open time and cached; `append` pushes
/// to the cache and writes a single row to the end of the file. A new
/// file gets the canonical header row first, so the output is usable as
/// a spreadsheet import.
pub struct CsvLedger {
  rows: RwLock<Vec<CertificateRecord>>,
  path: Option<PathBuf>,
}

impl CsvLedger {
  /// Open (or prepare to create) a ledger file at `path`.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    let rows = if path.exists() { read_rows(&path)? } else { Vec::new() };
    Ok(Self { rows: RwLock::new(rows), path: Some(path) })
  }

  /// A ledger with no backing file — useful for testing.
  pub fn open_in_memory() -> Self {
    Self { rows: RwLock::new(Vec::new()), path: None }
  }
}

fn read_rows(path: &Path) -> Result<Vec<CertificateRecord>> {
  let mut reader = csv::ReaderBuilder::new()
    .has_headers(false)
    .flexible(true)
    .from_path(path)?;

  let mut rows = Vec::new();
  for (idx, result) in reader.records().enumerate() {
    let raw = result?;
    let cells: Vec<&str> = raw.iter().collect();
    if idx == 0 && is_header_row(&cells) {
      continue;
    }
    rows.push(CertificateRecord::from_row(&cells)?);
  }
  Ok(rows)
}

fn append_row(path: &Path, record: &CertificateRecord) -> Result<()> {
  let new_file = !path.exists();
  let file = std::fs::OpenOptions::new()
    .create(true)
    .append(true)
    .open(path)?;

  let mut writer = csv::WriterBuilder::new()
    .has_headers(false)
    .from_writer(file);
  if new_file {
    writer.write_record(LEDGER_HEADER)?;
  }
  writer.write_record(record.to_row())?;
  writer.flush()?;
  Ok(())
}

impl Ledger for CsvLedger {
  type Error = crate::Error;

  async fn append(&self, record: CertificateRecord) -> Result<()> {
    // Hold the write lock across the file append so concurrent appends
    // cannot interleave rows.
    let mut rows = self.rows.write().await;
    if let Some(path) = &self.path {
      append_row(path, &record)?;
    }
    rows.push(record);
    Ok(())
  }

  async fn records(&self) -> Result<Vec<CertificateRecord>> {
    Ok(self.rows.read().await.clone())
  }
}
