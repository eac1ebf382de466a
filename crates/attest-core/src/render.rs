//! The `Renderer` trait and the field bundle drawn onto a certificate.

use chrono::NaiveDate;

use crate::record::CertificateId;

/// The values composited onto one certificate document.
#[derive(Debug, Clone)]
pub struct CertificateFields {
  pub certificate_id: CertificateId,
  pub name:           String,
  pub course:         String,
  pub issued_on:      NaiveDate,
}

/// Abstraction over certificate document production.
///
/// Rendering is pure CPU work, so the trait stays synchronous.
pub trait Renderer: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Produce the final single-page PDF for `fields`.
  fn render_pdf(&self, fields: &CertificateFields) -> Result<Vec<u8>, Self::Error>;
}
