//! `attest` — bulk certificate issuance for the Attest service.
//!
//! # Usage
//!
//! ```
//! attest --roster students.csv --font DejaVuSans.ttf --spreadsheet-id <id>
//! attest --config attest.toml
//! attest --roster students.csv --font DejaVuSans.ttf --ledger-csv ledger.csv
//! ```

mod issue;
mod roster;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use attest_core::record::CertificateId;
use attest_google::{DriveStore, ServiceAccountKey, SheetsLedger, TokenProvider, auth};
use attest_render::{ImageRenderer, Layout};
use attest_store_csv::CsvLedger;
use clap::Parser;
use issue::{IssueOptions, LocalStore};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "attest", about = "Bulk certificate issuance")]
struct Args {
  /// Path to a TOML config file; flags override its values.
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Roster CSV with Name and Course columns.
  #[arg(long, env = "ATTEST_ROSTER")]
  roster: Option<PathBuf>,

  /// Directory the rendered PDFs are written to.
  #[arg(long)]
  output_dir: Option<PathBuf>,

  /// Certificate template PNG; a blank canvas is used when absent.
  #[arg(long)]
  template: Option<PathBuf>,

  /// TrueType font used for the text fields.
  #[arg(long, env = "ATTEST_FONT")]
  font: Option<PathBuf>,

  /// Prefix for generated certificate ids.
  #[arg(long)]
  id_prefix: Option<String>,

  /// Ledger spreadsheet id.
  #[arg(long, env = "ATTEST_SPREADSHEET_ID")]
  spreadsheet_id: Option<String>,

  /// Sheet range holding the ledger columns.
  #[arg(long)]
  range: Option<String>,

  /// Service-account key file (or set GOOGLE_CREDENTIALS_JSON).
  #[arg(long)]
  credentials: Option<PathBuf>,

  /// Drive folder id the PDFs are uploaded into.
  #[arg(long)]
  drive_folder: Option<String>,

  /// Append to a local CSV ledger instead of Google Sheets; documents
  /// stay on disk and ledger links point at the local files.
  #[arg(long, value_name = "FILE")]
  ledger_csv: Option<PathBuf>,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file; every field has a flag
/// counterpart.
#[derive(Deserialize, Default)]
struct ConfigFile {
  roster:         Option<PathBuf>,
  output_dir:     Option<PathBuf>,
  template:       Option<PathBuf>,
  font:           Option<PathBuf>,
  id_prefix:      Option<String>,
  spreadsheet_id: Option<String>,
  range:          Option<String>,
  credentials:    Option<PathBuf>,
  drive_folder:   Option<String>,
  ledger_csv:     Option<PathBuf>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let roster_path = args
    .roster
    .or(file_cfg.roster)
    .unwrap_or_else(|| PathBuf::from("students.csv"));
  let output_dir = args
    .output_dir
    .or(file_cfg.output_dir)
    .unwrap_or_else(|| PathBuf::from("certificates"));
  let template = args.template.or(file_cfg.template);
  let font = args
    .font
    .or(file_cfg.font)
    .context("a TrueType font is required (--font or `font` in the config file)")?;
  let id_prefix = args
    .id_prefix
    .or(file_cfg.id_prefix)
    .unwrap_or_else(|| CertificateId::DEFAULT_PREFIX.to_string());
  let range = args
    .range
    .or(file_cfg.range)
    .unwrap_or_else(|| attest_google::sheets::DEFAULT_RANGE.to_string());
  let credentials = args
    .credentials
    .or(file_cfg.credentials)
    .unwrap_or_else(|| PathBuf::from("credentials.json"));
  let drive_folder = args.drive_folder.or(file_cfg.drive_folder);
  let ledger_csv = args.ledger_csv.or(file_cfg.ledger_csv);
  let spreadsheet_id = args.spreadsheet_id.or(file_cfg.spreadsheet_id);

  // Read inputs and set up the renderer.
  let roster = roster::read_roster(&roster_path)?;
  tracing::info!(rows = roster.len(), "loaded roster");

  let renderer = ImageRenderer::open(&font, template.as_deref(), Layout::default())
    .context("loading renderer assets")?;

  let options = IssueOptions {
    id_prefix,
    issue_date: chrono::Local::now().date_naive(),
    output_dir,
  };

  // Issue against the configured ledger backend.
  let issued = match ledger_csv {
    Some(path) => {
      let ledger = CsvLedger::open(&path)
        .await
        .with_context(|| format!("opening CSV ledger at {}", path.display()))?;
      let store = LocalStore { dir: options.output_dir.clone() };
      issue::issue_all(&roster, &renderer, &store, &ledger, &options).await?
    }
    None => {
      let spreadsheet_id = spreadsheet_id
        .context("--spreadsheet-id is required unless --ledger-csv is set")?;
      let http = reqwest::Client::new();
      let key = ServiceAccountKey::load(&credentials)
        .context("loading service-account key")?;
      let token = Arc::new(TokenProvider::new(http.clone(), key, auth::SCOPES));
      let ledger =
        SheetsLedger::new(http.clone(), Arc::clone(&token), spreadsheet_id, range);
      let store = DriveStore::new(http, token, drive_folder);
      issue::issue_all(&roster, &renderer, &store, &ledger, &options).await?
    }
  };

  tracing::info!(count = issued.len(), "issued certificates");
  Ok(())
}
