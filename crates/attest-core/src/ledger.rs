//! The `Ledger` trait — the append-and-scan store of issued certificates.
//!
//! The trait is implemented by storage backends (Google Sheets, local
//! CSV). Higher layers (`attest-web`, `attest-cli`) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::record::CertificateRecord;

/// Abstraction over the certificate ledger.
///
/// Writes are strictly append-only: nothing is ever updated or deleted,
/// and no uniqueness check is performed — re-issuing a roster appends
/// duplicate rows.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait Ledger: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Append `record` as a new row at the end of the ledger.
  fn append(
    &self,
    record: CertificateRecord,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// All rows, in ledger order.
  fn records(
    &self,
  ) -> impl Future<Output = Result<Vec<CertificateRecord>, Self::Error>> + Send + '_;

  /// The first row whose certificate id equals `certificate_id`, with
  /// surrounding whitespace ignored on both sides.
  ///
  /// The default implementation is a linear scan over [`Ledger::records`],
  /// which is acceptable at the ledger sizes this service handles.
  fn find<'a>(
    &'a self,
    certificate_id: &'a str,
  ) -> impl Future<Output = Result<Option<CertificateRecord>, Self::Error>> + Send + 'a
  {
    async move {
      let records = self.records().await?;
      Ok(
        records
          .into_iter()
          .find(|record| record.certificate_id.matches(certificate_id)),
      )
    }
  }
}
