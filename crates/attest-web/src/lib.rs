//! Public verification surface for Attest.
//!
//! Exposes an axum [`Router`] with the lookup form and the verification
//! endpoint, backed by any [`Ledger`]. Each request performs one
//! idempotent read against the ledger; there is no shared mutable state.

pub mod error;
pub mod pages;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use attest_core::ledger::Ledger;
use axum::{
  Form, Router,
  extract::State,
  response::Html,
  routing::{get, post},
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use pages::Lookup;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:   String,
  #[serde(default = "default_port")]
  pub port:   u16,
  pub ledger: LedgerConfig,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

/// Which ledger backend the server reads.
#[derive(Deserialize, Clone)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum LedgerConfig {
  Sheets {
    spreadsheet_id:   String,
    #[serde(default = "default_range")]
    range:            String,
    #[serde(default = "default_credentials_path")]
    credentials_path: PathBuf,
  },
  Csv {
    path: PathBuf,
  },
}

fn default_range() -> String {
  attest_google::sheets::DEFAULT_RANGE.to_string()
}

fn default_credentials_path() -> PathBuf {
  PathBuf::from("credentials.json")
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<L: Ledger> {
  pub ledger: Arc<L>,
}

impl<L: Ledger> Clone for AppState<L> {
  fn clone(&self) -> Self {
    Self { ledger: Arc::clone(&self.ledger) }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build an axum [`Router`] for the verification form.
pub fn router<L>(state: AppState<L>) -> Router
where
  L: Ledger + 'static,
  L::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route("/", get(form_page::<L>))
    .route("/verify", post(verify::<L>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Handlers ─────────────────────────────────────────────────────────────────

/// `GET /` — the lookup form with no result fragment.
async fn form_page<L>(State(_state): State<AppState<L>>) -> Html<String>
where
  L: Ledger + 'static,
{
  Html(pages::page(None))
}

#[derive(Debug, Deserialize)]
pub struct VerifyForm {
  pub cert_id: String,
}

/// `POST /verify` — trimmed exact-match lookup over the ledger.
async fn verify<L>(
  State(state): State<AppState<L>>,
  Form(form): Form<VerifyForm>,
) -> Result<Html<String>, Error>
where
  L: Ledger + 'static,
  L::Error: std::error::Error + Send + Sync + 'static,
{
  let submitted = form.cert_id.trim();
  let found = state
    .ledger
    .find(submitted)
    .await
    .map_err(|e| Error::Ledger(Box::new(e)))?;

  let lookup = match found {
    Some(record) => {
      tracing::debug!(certificate_id = %record.certificate_id, "verified");
      Lookup::Found(record)
    }
    None => {
      tracing::debug!(submitted, "no matching certificate");
      Lookup::NotFound
    }
  };

  Ok(Html(pages::page(Some(lookup))))
}

// ─── Integration tests ────────────────────────────────────────────────────────
