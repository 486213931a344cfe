//! File persistence for the ledger and its HTML report.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

use kebab_inventory::{Ledger, LedgerSnapshot, SkippedLine, decode_into, render_html};

use crate::config::DesktopConfig;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying storage failed (permissions, disk full, ...).
    #[error("failed to {action} {}: {source}", path.display())]
    Persistence {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    fn io(action: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self::Persistence {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// What a load found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No data file; the ledger was left untouched.
    NotFound,
    /// Data file read; `skipped` lists lines that could not be used.
    Loaded { skipped: Vec<SkippedLine> },
}

/// Reads and writes the well-known data and report files.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    data_path: PathBuf,
    report_path: PathBuf,
}

impl LedgerStore {
    pub fn new(data_path: impl Into<PathBuf>, report_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            report_path: report_path.into(),
        }
    }

    pub fn from_config(config: &DesktopConfig) -> Self {
        Self::new(&config.data_file, &config.report_file)
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn report_path(&self) -> &Path {
        &self.report_path
    }

    /// Write the ledger's persisted form, replacing any previous file.
    pub fn save(&self, ledger: &Ledger) -> Result<(), StoreError> {
        fs::write(&self.data_path, ledger.serialize())
            .map_err(|e| StoreError::io("write", &self.data_path, e))?;
        tracing::info!(path = %self.data_path.display(), date = %ledger.date(), "ledger saved");
        Ok(())
    }

    /// Overlay the data file onto `ledger`.
    ///
    /// A missing file is not an error. On a read error the ledger is untouched.
    pub fn load_into(&self, ledger: &mut Ledger) -> Result<LoadOutcome, StoreError> {
        let text = match fs::read_to_string(&self.data_path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.data_path.display(), "no ledger data file");
                return Ok(LoadOutcome::NotFound);
            }
            Err(e) => return Err(StoreError::io("read", &self.data_path, e)),
        };

        let skipped = decode_into(ledger, &text);
        tracing::info!(
            path = %self.data_path.display(),
            date = %ledger.date(),
            skipped = skipped.len(),
            "ledger loaded"
        );
        Ok(LoadOutcome::Loaded { skipped })
    }

    /// Write the HTML report, overwriting any existing file.
    pub fn export_html(&self, snapshot: &LedgerSnapshot) -> Result<&Path, StoreError> {
        fs::write(&self.report_path, render_html(snapshot))
            .map_err(|e| StoreError::io("write", &self.report_path, e))?;
        tracing::info!(path = %self.report_path.display(), "html report exported");
        Ok(&self.report_path)
    }
}
