//! Google Drive implementation of [`DocumentStore`].
//!
//! Uploads go through the `multipart/related` endpoint so metadata and
//! media land in one request; each uploaded file is then opened to anyone
//! with the link.

use std::sync::Arc;

use attest_core::{record::CertificateId, storage::DocumentStore};
use serde::Deserialize;
use serde_json::json;

use crate::{Result, auth::TokenProvider, check_status};

const UPLOAD_URL: &str = "https://www.googleapis.com/upload/drive/v3/files";
const FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";

// The Drive multipart endpoint requires `multipart/related`, which
// reqwest's form-data builder does not produce, so the body is assembled
// by hand. The boundary only needs to never occur in the parts.
const BOUNDARY: &str = "attest-multipart-9f2c6d";

/// Uploads rendered certificates and opens them to anyone with the link.
pub struct DriveStore {
  http:   reqwest::Client,
  token:  Arc<TokenProvider>,
  /// Optional Drive folder id the uploads are filed under.
  folder: Option<String>,
}

#[derive(Deserialize)]
struct DriveFile {
  id: String,
  #[serde(rename = "webViewLink", default)]
  web_view_link: Option<String>,
}

/// Assemble a two-part `multipart/related` body: JSON metadata, then the
/// media bytes.
fn multipart_related(
  boundary: &str,
  metadata: &serde_json::Value,
  media_type: &str,
  media: &[u8],
) -> Vec<u8> {
  let mut body = Vec::with_capacity(media.len() + 512);
  body.extend_from_slice(
    format!(
      "--{boundary}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata}\r\n"
    )
    .as_bytes(),
  );
  body.extend_from_slice(
    format!("--{boundary}\r\nContent-Type: {media_type}\r\n\r\n").as_bytes(),
  );
  body.extend_from_slice(media);
  body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
  body
}

impl DriveStore {
  pub fn new(
    http: reqwest::Client,
    token: Arc<TokenProvider>,
    folder: Option<String>,
  ) -> Self {
    Self { http, token, folder }
  }
}

impl DocumentStore for DriveStore {
  type Error = crate::Error;

  async fn upload(&self, certificate_id: &CertificateId, pdf: Vec<u8>) -> Result<String> {
    let token = self.token.access_token().await?;

    let mut metadata = json!({ "name": format!("{certificate_id}.pdf") });
    if let Some(folder) = &self.folder {
      metadata["parents"] = json!([folder]);
    }
    let body = multipart_related(BOUNDARY, &metadata, "application/pdf", &pdf);

    let response = self
      .http
      .post(UPLOAD_URL)
      .bearer_auth(&token)
      .query(&[("uploadType", "multipart"), ("fields", "id,webViewLink")])
      .header(
        reqwest::header::CONTENT_TYPE,
        format!("multipart/related; boundary={BOUNDARY}"),
      )
      .body(body)
      .send()
      .await?;
    let file: DriveFile = check_status(response).await?.json().await?;

    // Anyone with the link may read the document.
    let response = self
      .http
      .post(format!("{FILES_URL}/{}/permissions", file.id))
      .bearer_auth(&token)
      .json(&json!({ "role": "reader", "type": "anyone" }))
      .send()
      .await?;
    check_status(response).await?;

    tracing::debug!(certificate_id = %certificate_id, file_id = %file.id, "uploaded");
    Ok(match file.web_view_link {
      Some(link) => link,
      None => format!("https://drive.google.com/file/d/{}/view", file.id),
    })
  }
}
