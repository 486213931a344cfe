//! `kebab-desktop`
//!
//! **Responsibility:** thin shell around the inventory ledger.
//!
//! This crate provides:
//! - Configuration (file locations, product catalog)
//! - File persistence of the ledger and HTML export
//! - The action boundary turning every user action into a status message
//! - A line-oriented terminal front end

pub mod commands;
pub mod config;
pub mod shell;
pub mod store;
pub mod types;

pub use commands::AppState;
pub use config::{ConfigArgs, DesktopConfig};
pub use store::{LedgerStore, LoadOutcome, StoreError};
pub use types::{ActionOutcome, ActionStatus};
