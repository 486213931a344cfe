use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use kebab_core::{Aggregate, AggregateRoot, DomainError};

use crate::catalog::Catalog;
use crate::snapshot::{LedgerSnapshot, StockRow, StockTotals};
use crate::table::{CountTable, TableKind, parse_count};

/// Aggregate root: the inventory ledger for one session date.
///
/// Holds the four editable tables plus the derived final-stock table, all
/// indexed by catalog position. Final stock is recomputed after every applied
/// event and never written directly:
///
/// `final = initial + production + returns - shipment`
#[derive(Debug, Clone)]
pub struct Ledger {
    catalog: Catalog,
    date: NaiveDate,
    initial: CountTable,
    production: CountTable,
    shipment: CountTable,
    returns: CountTable,
    final_stock: CountTable,
    version: u64,
}

impl Ledger {
    /// All-zero ledger dated today (local time).
    pub fn new(catalog: Catalog) -> Self {
        Self::with_date(catalog, Local::now().date_naive())
    }

    /// All-zero ledger for a given session date.
    pub fn with_date(catalog: Catalog, date: NaiveDate) -> Self {
        let len = catalog.len();
        Self {
            catalog,
            date,
            initial: CountTable::zeroed(len),
            production: CountTable::zeroed(len),
            shipment: CountTable::zeroed(len),
            returns: CountTable::zeroed(len),
            final_stock: CountTable::zeroed(len),
            version: 0,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn table(&self, kind: TableKind) -> &CountTable {
        match kind {
            TableKind::Initial => &self.initial,
            TableKind::Production => &self.production,
            TableKind::Shipment => &self.shipment,
            TableKind::Returns => &self.returns,
        }
    }

    pub fn final_stock(&self) -> &CountTable {
        &self.final_stock
    }

    /// Count of `product` in an editable table.
    pub fn count(&self, kind: TableKind, product: &str) -> Option<i64> {
        self.catalog
            .position(product)
            .and_then(|i| self.table(kind).get(i))
    }

    /// Final stock of `product`.
    pub fn final_count(&self, product: &str) -> Option<i64> {
        self.catalog
            .position(product)
            .and_then(|i| self.final_stock.get(i))
    }

    /// Sum of final stock across the catalog.
    pub fn total_final(&self) -> i64 {
        self.final_stock.total()
    }

    /// Apply user-typed values to one editable table.
    ///
    /// Blank values leave the product unchanged. If any value is not an
    /// integer, or names a product outside the catalog, nothing is applied.
    pub fn apply_edits<I, K, V>(&mut self, table: TableKind, edits: I) -> Result<(), DomainError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let command = LedgerCommand::EditTable(EditTable {
            table,
            edits: edits
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
                .collect(),
        });
        self.execute(&command)?;
        Ok(())
    }

    /// Rederive final stock from the four editable tables. Idempotent.
    pub fn recompute_final(&mut self) {
        for i in 0..self.catalog.len() {
            let value = self
                .initial
                .get(i)
                .unwrap_or(0)
                .saturating_add(self.production.get(i).unwrap_or(0))
                .saturating_add(self.returns.get(i).unwrap_or(0))
                .saturating_sub(self.shipment.get(i).unwrap_or(0));
            self.final_stock.set(i, value);
        }
    }

    /// Read-only copy of every table in catalog order, for display.
    pub fn snapshot(&self) -> LedgerSnapshot {
        let rows: Vec<StockRow> = self
            .catalog
            .iter()
            .enumerate()
            .map(|(i, product)| StockRow {
                product: product.to_string(),
                initial: self.initial.get(i).unwrap_or(0),
                production: self.production.get(i).unwrap_or(0),
                shipment: self.shipment.get(i).unwrap_or(0),
                returns: self.returns.get(i).unwrap_or(0),
                final_stock: self.final_stock.get(i).unwrap_or(0),
            })
            .collect();

        LedgerSnapshot {
            date: self.date,
            totals: StockTotals {
                initial: self.initial.total(),
                production: self.production.total(),
                shipment: self.shipment.total(),
                returns: self.returns.total(),
                final_stock: self.final_stock.total(),
            },
            rows,
        }
    }

    /// Persisted text form (see [`crate::codec`]).
    pub fn serialize(&self) -> String {
        crate::codec::serialize(self)
    }

    fn table_mut(&mut self, kind: TableKind) -> &mut CountTable {
        match kind {
            TableKind::Initial => &mut self.initial,
            TableKind::Production => &mut self.production,
            TableKind::Shipment => &mut self.shipment,
            TableKind::Returns => &mut self.returns,
        }
    }

    fn handle_edit(&self, cmd: &EditTable) -> Result<Vec<LedgerEvent>, DomainError> {
        let mut values = Vec::with_capacity(cmd.edits.len());
        for (product, raw) in &cmd.edits {
            let index = self
                .catalog
                .position(product)
                .ok_or_else(|| DomainError::unknown_product(product.trim()))?;
            let parsed = parse_count(raw)
                .map_err(|reason| DomainError::invalid_input(product.trim(), reason))?;
            if let Some(value) = parsed {
                values.push((index, value));
            }
        }

        Ok(vec![LedgerEvent::TableEdited(TableEdited {
            table: cmd.table,
            values,
        })])
    }
}

impl AggregateRoot for Ledger {
    type Id = NaiveDate;

    fn id(&self) -> &Self::Id {
        &self.date
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: EditTable (raw form input for one table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditTable {
    pub table: TableKind,
    /// `(product, raw text)` pairs as typed by the user.
    pub edits: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerCommand {
    EditTable(EditTable),
}

/// Event: TableEdited (validated values, keyed by catalog position).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEdited {
    pub table: TableKind,
    pub values: Vec<(usize, i64)>,
}

/// Event: SnapshotRestored (values read back from persisted text).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRestored {
    pub date: Option<NaiveDate>,
    pub values: Vec<(TableKind, usize, i64)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    TableEdited(TableEdited),
    SnapshotRestored(SnapshotRestored),
}

impl Aggregate for Ledger {
    type Command = LedgerCommand;
    type Event = LedgerEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            LedgerEvent::TableEdited(e) => {
                let table = self.table_mut(e.table);
                for &(index, value) in &e.values {
                    table.set(index, value);
                }
                tracing::debug!(table = %e.table, edited = e.values.len(), "table edited");
            }
            LedgerEvent::SnapshotRestored(e) => {
                if let Some(date) = e.date {
                    self.date = date;
                }
                for &(kind, index, value) in &e.values {
                    self.table_mut(kind).set(index, value);
                }
            }
        }

        self.recompute_final();
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            LedgerCommand::EditTable(cmd) => self.handle_edit(cmd),
        }
    }
}
