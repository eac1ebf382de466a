//! Error type for `attest-render`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("template image error: {0}")]
  Template(#[from] image::ImageError),

  #[error("not a usable TrueType font: {0}")]
  Font(PathBuf),

  #[error("qr encoding error: {0}")]
  Qr(#[from] qrcode::types::QrError),

  #[error("pdf emission error: {0}")]
  Pdf(String),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
