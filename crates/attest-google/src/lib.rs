//! Google Sheets and Drive backends for Attest.
//!
//! Talks directly to the REST surfaces with [`reqwest`]; authentication
//! is the service-account JWT bearer flow. The Sheets backend implements
//! [`attest_core::ledger::Ledger`], the Drive backend
//! [`attest_core::storage::DocumentStore`].

pub mod auth;
pub mod drive;
pub mod error;
pub mod sheets;

pub use auth::{ServiceAccountKey, TokenProvider};
pub use drive::DriveStore;
pub use error::{Error, Result};
pub use sheets::SheetsLedger;

/// Turn a non-2xx response into [`Error::Api`], keeping the body text for
/// diagnosis.
pub(crate) async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
  let status = response.status();
  if status.is_success() {
    Ok(response)
  } else {
    Err(Error::Api {
      status: status.as_u16(),
      body:   response.text().await.unwrap_or_default(),
    })
  }
}
