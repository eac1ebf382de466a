//! attest-web server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), connects
//! the configured ledger backend, and serves the verification form over
//! HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use attest_core::ledger::Ledger;
use attest_google::{ServiceAccountKey, SheetsLedger, TokenProvider, auth};
use attest_store_csv::CsvLedger;
use attest_web::{AppState, LedgerConfig, ServerConfig};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Attest certificate verification server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("ATTEST").separator("__"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  match &server_cfg.ledger {
    LedgerConfig::Sheets { spreadsheet_id, range, credentials_path } => {
      let http = reqwest::Client::new();
      let key = ServiceAccountKey::load(credentials_path)
        .context("loading service-account key")?;
      let token = Arc::new(TokenProvider::new(http.clone(), key, auth::SCOPES));
      let ledger = SheetsLedger::new(http, token, spreadsheet_id.clone(), range.clone());
      serve(&address, ledger).await
    }
    LedgerConfig::Csv { path } => {
      let ledger = CsvLedger::open(path)
        .await
        .with_context(|| format!("opening CSV ledger at {}", path.display()))?;
      serve(&address, ledger).await
    }
  }
}

async fn serve<L>(address: &str, ledger: L) -> anyhow::Result<()>
where
  L: Ledger + 'static,
  L::Error: std::error::Error + Send + Sync + 'static,
{
  let state = AppState { ledger: Arc::new(ledger) };
  let app = attest_web::router(state);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
