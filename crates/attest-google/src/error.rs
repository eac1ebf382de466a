//! Error type for `attest-google`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("credentials error: {0}")]
  Credentials(String),

  #[error("jwt signing error: {0}")]
  Jwt(#[from] jsonwebtoken::errors::Error),

  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("api error ({status}): {body}")]
  Api { status: u16, body: String },

  #[error("core error: {0}")]
  Core(#[from] attest_core::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
