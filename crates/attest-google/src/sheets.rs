//! Google Sheets implementation of [`Ledger`].
//!
//! The ledger is one range of one spreadsheet: `append` issues a
//! `values:append` call, reads fetch the range and decode rows.

use std::sync::Arc;

use attest_core::{
  ledger::Ledger,
  record::{CertificateRecord, is_header_row},
};
use serde::Deserialize;
use serde_json::json;

use crate::{Result, auth::TokenProvider, check_status};

const SHEETS_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Default range when the configuration names none.
pub const DEFAULT_RANGE: &str = "Sheet1!A:F";

/// Append-and-scan ledger over one spreadsheet range.
pub struct SheetsLedger {
  http:           reqwest::Client,
  token:          Arc<TokenProvider>,
  spreadsheet_id: String,
  range:          String,
}

#[derive(Deserialize)]
struct ValueRange {
  #[serde(default)]
  values: Vec<Vec<String>>,
}

impl SheetsLedger {
  pub fn new(
    http: reqwest::Client,
    token: Arc<TokenProvider>,
    spreadsheet_id: impl Into<String>,
    range: impl Into<String>,
  ) -> Self {
    Self {
      http,
      token,
      spreadsheet_id: spreadsheet_id.into(),
      range: range.into(),
    }
  }

  fn values_url(&self, suffix: &str) -> String {
    format!("{SHEETS_BASE}/{}/values/{}{suffix}", self.spreadsheet_id, self.range)
  }
}

impl Ledger for SheetsLedger {
  type Error = crate::Error;

  async fn append(&self, record: CertificateRecord) -> Result<()> {
    let token = self.token.access_token().await?;
    let response = self
      .http
      .post(self.values_url(":append"))
      .bearer_auth(token)
      .query(&[("valueInputOption", "RAW")])
      .json(&json!({ "values": [record.to_row()] }))
      .send()
      .await?;
    check_status(response).await?;

    tracing::debug!(certificate_id = %record.certificate_id, "appended ledger row");
    Ok(())
  }

  async fn records(&self) -> Result<Vec<CertificateRecord>> {
    let token = self.token.access_token().await?;
    let response = self
      .http
      .get(self.values_url(""))
      .bearer_auth(token)
      .send()
      .await?;
    let range: ValueRange = check_status(response).await?.json().await?;

    let mut records = Vec::with_capacity(range.values.len());
    for (idx, row) in range.values.iter().enumerate() {
      if idx == 0 && is_header_row(row) {
        continue;
      }
      records.push(CertificateRecord::from_row(row)?);
    }
    Ok(records)
  }
}
