//! Error types for `attest-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("ledger row is missing the {0} column")]
  MissingColumn(&'static str),

  #[error("invalid issue date: {0:?}")]
  InvalidIssueDate(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
