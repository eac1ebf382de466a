//! The `DocumentStore` trait — where rendered certificates end up.

use std::future::Future;

use crate::record::CertificateId;

/// Abstraction over remote document storage.
pub trait DocumentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Store the rendered PDF under a name derived from `certificate_id`
  /// and return a publicly readable link to it.
  fn upload<'a>(
    &'a self,
    certificate_id: &'a CertificateId,
    pdf: Vec<u8>,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;
}
