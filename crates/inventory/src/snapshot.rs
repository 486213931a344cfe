//! Read-only view of a ledger for display and export.

use chrono::NaiveDate;
use serde::Serialize;

/// One product's counts across all five stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockRow {
    pub product: String,
    pub initial: i64,
    pub production: i64,
    pub shipment: i64,
    pub returns: i64,
    #[serde(rename = "final")]
    pub final_stock: i64,
}

impl StockRow {
    /// Negative final stock is allowed but flagged in every view.
    pub fn is_negative(&self) -> bool {
        self.final_stock < 0
    }
}

/// Column totals across the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockTotals {
    pub initial: i64,
    pub production: i64,
    pub shipment: i64,
    pub returns: i64,
    #[serde(rename = "final")]
    pub final_stock: i64,
}

/// Snapshot of date, catalog and every table, rows in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerSnapshot {
    pub date: NaiveDate,
    pub rows: Vec<StockRow>,
    pub totals: StockTotals,
}

impl LedgerSnapshot {
    pub fn products(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.product.as_str())
    }

    pub fn has_negative_stock(&self) -> bool {
        self.rows.iter().any(StockRow::is_negative)
    }
}
