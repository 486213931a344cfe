//! Inventory ledger domain module.
//!
//! Holds the per-day skewer stock tables for a fixed product catalog, derives
//! final stock, and defines the persisted text and exported HTML forms.
//! Pure domain logic (no IO); reading and writing files is the shell's job.

pub mod catalog;
pub mod codec;
pub mod ledger;
pub mod report;
pub mod snapshot;
pub mod table;

pub use catalog::{Catalog, ProductName, REFERENCE_PRODUCTS};
pub use codec::{Decoded, SkipReason, SkippedLine, decode_into, deserialize, serialize};
pub use ledger::{EditTable, Ledger, LedgerCommand, LedgerEvent, SnapshotRestored, TableEdited};
pub use report::render_html;
pub use snapshot::{LedgerSnapshot, StockRow, StockTotals};
pub use table::{CountTable, TableKind, parse_count};
