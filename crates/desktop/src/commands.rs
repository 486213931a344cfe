//! Action boundary between the view layer and the ledger.
//!
//! Every method here is one user-triggered action. Errors never escape: each
//! action ends in an [`ActionOutcome`] carrying the message to show.

use kebab_core::DomainError;
use kebab_inventory::{Ledger, LedgerSnapshot, SkippedLine, TableKind};

use crate::config::DesktopConfig;
use crate::store::{LedgerStore, LoadOutcome};
use crate::types::ActionOutcome;

pub const MSG_NUMBERS_ONLY: &str = "please enter numbers only";
pub const MSG_SAVED: &str = "data saved successfully";
pub const MSG_NO_DATA_FILE: &str = "no data file found";

/// Application state owned by the shell: the single ledger and its store.
#[derive(Debug)]
pub struct AppState {
    ledger: Ledger,
    store: LedgerStore,
}

impl AppState {
    pub fn new(ledger: Ledger, store: LedgerStore) -> Self {
        Self { ledger, store }
    }

    /// Fresh ledger for the configured catalog, then load any saved data.
    pub fn open(config: &DesktopConfig) -> (Self, ActionOutcome) {
        let mut state = Self::new(
            Ledger::new(config.catalog.clone()),
            LedgerStore::from_config(config),
        );
        let outcome = state.load();
        (state, outcome)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Read-only view of catalog and all five tables.
    pub fn snapshot(&self) -> LedgerSnapshot {
        self.ledger.snapshot()
    }

    /// Apply one table's form values (all or nothing).
    pub fn apply_edits<I, K, V>(&mut self, table: TableKind, edits: I) -> ActionOutcome
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        match self.ledger.apply_edits(table, edits) {
            Ok(()) => ActionOutcome::success(format!("{table} values updated")),
            Err(err) => {
                tracing::warn!(table = %table, error = %err, "edit rejected");
                ActionOutcome::failed(edit_error_message(&err))
            }
        }
    }

    /// Persist the ledger to the data file.
    pub fn save(&self) -> ActionOutcome {
        match self.store.save(&self.ledger) {
            Ok(()) => ActionOutcome::success(MSG_SAVED),
            Err(err) => {
                tracing::warn!(error = %err, "save failed");
                ActionOutcome::failed(format!("save failed: {err}"))
            }
        }
    }

    /// Startup load: a missing data file just means a fresh day.
    pub fn load(&mut self) -> ActionOutcome {
        match self.store.load_into(&mut self.ledger) {
            Ok(LoadOutcome::NotFound) => ActionOutcome::success(format!(
                "no saved data; starting fresh for {}",
                self.ledger.date()
            )),
            Ok(LoadOutcome::Loaded { skipped }) => {
                loaded_outcome(format!("loaded data for {}", self.ledger.date()), &skipped)
            }
            Err(err) => {
                tracing::warn!(error = %err, "load failed");
                ActionOutcome::failed(format!("load failed: {err}"))
            }
        }
    }

    /// Explicit reload of the data file over the current tables.
    pub fn recover(&mut self) -> ActionOutcome {
        match self.store.load_into(&mut self.ledger) {
            Ok(LoadOutcome::NotFound) => ActionOutcome::failed(MSG_NO_DATA_FILE),
            Ok(LoadOutcome::Loaded { skipped }) => {
                loaded_outcome("recovery completed".to_string(), &skipped)
            }
            Err(err) => {
                tracing::warn!(error = %err, "recovery failed");
                ActionOutcome::failed(format!("recovery failed: {err}"))
            }
        }
    }

    /// Write the HTML report to the well-known report file.
    pub fn export_html(&self) -> ActionOutcome {
        match self.store.export_html(&self.ledger.snapshot()) {
            Ok(path) => ActionOutcome::success(format!("HTML report created: {}", path.display())),
            Err(err) => {
                tracing::warn!(error = %err, "export failed");
                ActionOutcome::failed(format!("report failed: {err}"))
            }
        }
    }
}

fn edit_error_message(err: &DomainError) -> String {
    match err {
        DomainError::InvalidInput { .. } => MSG_NUMBERS_ONLY.to_string(),
        other => other.to_string(),
    }
}

fn loaded_outcome(message: String, skipped: &[SkippedLine]) -> ActionOutcome {
    match skipped.len() {
        0 => ActionOutcome::success(message),
        1 => ActionOutcome::warning(format!("{message} (skipped {})", skipped[0])),
        n => ActionOutcome::warning(format!("{message} ({n} unreadable lines skipped)")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ActionStatus;
    use kebab_inventory::Catalog;
    use std::fs;
    use tempfile::TempDir;

    fn open_in(dir: &TempDir) -> (AppState, ActionOutcome) {
        let config = DesktopConfig {
            catalog: Catalog::new(["A", "B"]).unwrap(),
            ..DesktopConfig::in_dir(dir.path())
        };
        AppState::open(&config)
    }

    #[test]
    fn first_start_has_no_data_and_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let (state, outcome) = open_in(&dir);
        assert_eq!(outcome.status, ActionStatus::Success);
        assert!(outcome.message.starts_with("no saved data"));
        assert_eq!(state.snapshot().totals.final_stock, 0);
    }

    #[test]
    fn invalid_edit_reports_numbers_only() {
        let dir = TempDir::new().unwrap();
        let (mut state, _) = open_in(&dir);
        state.apply_edits(TableKind::Production, [("A", "2")]);

        let outcome = state.apply_edits(TableKind::Production, [("A", ""), ("B", "abc")]);

        assert_eq!(outcome, ActionOutcome::failed(MSG_NUMBERS_ONLY));
        assert_eq!(state.ledger().count(TableKind::Production, "A"), Some(2));
    }

    #[test]
    fn unknown_product_edit_names_the_product() {
        let dir = TempDir::new().unwrap();
        let (mut state, _) = open_in(&dir);
        let outcome = state.apply_edits(TableKind::Initial, [("Q", "1")]);
        assert!(outcome.is_failed());
        assert_eq!(outcome.message, "unknown product: Q");
    }

    #[test]
    fn save_restart_and_recover() {
        let dir = TempDir::new().unwrap();
        let (mut state, _) = open_in(&dir);
        let edited = state.apply_edits(TableKind::Initial, [("A", "10"), ("B", "5")]);
        assert_eq!(edited.message, "initial values updated");
        assert_eq!(state.save(), ActionOutcome::success(MSG_SAVED));

        let (restarted, outcome) = open_in(&dir);
        assert_eq!(outcome.status, ActionStatus::Success);
        assert!(outcome.message.starts_with("loaded data for"));
        assert_eq!(restarted.snapshot(), state.snapshot());

        state.apply_edits(TableKind::Initial, [("A", "99")]);
        assert_eq!(state.recover(), ActionOutcome::success("recovery completed"));
        assert_eq!(state.ledger().count(TableKind::Initial, "A"), Some(10));
    }

    #[test]
    fn recover_without_data_file_fails_softly() {
        let dir = TempDir::new().unwrap();
        let (mut state, _) = open_in(&dir);
        assert_eq!(state.recover(), ActionOutcome::failed(MSG_NO_DATA_FILE));
    }

    #[test]
    fn corrupt_lines_surface_as_warning() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("kebab_inventory.txt"),
            "DATE:2024-01-01\nINIT:A:10\nPROD:A:bogus\nSHIP:B\n",
        )
        .unwrap();

        let (state, outcome) = open_in(&dir);

        assert_eq!(outcome.status, ActionStatus::Warning);
        assert_eq!(
            outcome.message,
            "loaded data for 2024-01-01 (2 unreadable lines skipped)"
        );
        assert_eq!(state.ledger().final_count("A"), Some(10));
    }

    #[test]
    fn single_corrupt_line_is_described() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("kebab_inventory.txt"), "RET:A:x\n").unwrap();
        let (_, outcome) = open_in(&dir);
        assert_eq!(outcome.status, ActionStatus::Warning);
        assert!(outcome.message.contains("line 1: invalid count"));
    }

    #[test]
    fn failed_save_keeps_state_and_reports_cause() {
        let dir = TempDir::new().unwrap();
        let store = LedgerStore::new(dir.path(), dir.path().join("report.html"));
        let mut state = AppState::new(Ledger::new(Catalog::new(["A"]).unwrap()), store);
        state.apply_edits(TableKind::Initial, [("A", "4")]);

        let outcome = state.save();

        assert!(outcome.is_failed());
        assert!(outcome.message.starts_with("save failed: failed to write"));
        assert_eq!(state.ledger().count(TableKind::Initial, "A"), Some(4));
    }

    #[test]
    fn failed_export_reports_cause() {
        let dir = TempDir::new().unwrap();
        let store = LedgerStore::new(dir.path().join("d.txt"), dir.path());
        let state = AppState::new(Ledger::new(Catalog::new(["A"]).unwrap()), store);

        let outcome = state.export_html();

        assert!(outcome.is_failed());
        assert!(outcome.message.starts_with("report failed:"));
    }

    #[test]
    fn unreadable_data_file_leaves_ledger_usable() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("kebab_inventory.txt"), b"INIT:A:1\n\xff\xfe\n").unwrap();

        let (mut state, outcome) = open_in(&dir);

        assert!(outcome.is_failed());
        assert!(outcome.message.starts_with("load failed:"));
        assert_eq!(state.ledger().count(TableKind::Initial, "A"), Some(0));

        let edited = state.apply_edits(TableKind::Initial, [("A", "3")]);
        assert_eq!(edited.status, ActionStatus::Success);
        assert_eq!(state.ledger().final_count("A"), Some(3));
    }

    #[test]
    fn export_writes_report_file() {
        let dir = TempDir::new().unwrap();
        let (state, _) = open_in(&dir);
        let outcome = state.export_html();
        assert_eq!(outcome.status, ActionStatus::Success);
        assert!(dir.path().join("inventory_report.html").is_file());
    }
}
