//! Local CSV backend for the Attest certificate ledger.
//!
//! One file, one row per issued certificate, same column order as the
//! spreadsheet backend. Rows are cached in memory; appends go to both the
//! cache and the file.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::CsvLedger;
