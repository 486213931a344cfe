//! Persisted text form of a ledger.
//!
//! ```text
//! DATE:2024-01-01
//! INIT:<product>:<count>
//! PROD:<product>:<count>
//! SHIP:<product>:<count>
//! RET:<product>:<count>
//! ```
//!
//! Final stock is never written; it is rederived after reading. Reading is
//! lenient: lines that cannot be used are skipped and reported back as
//! [`SkippedLine`]s instead of failing the whole load.

use core::fmt::Write as _;

use chrono::NaiveDate;
use serde::Serialize;

use kebab_core::Aggregate;

use crate::catalog::Catalog;
use crate::ledger::{Ledger, LedgerEvent, SnapshotRestored};
use crate::table::{TableKind, parse_count};

const DATE_TAG: &str = "DATE";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Why a persisted line was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The line does not start with a known record tag.
    UnknownRecord,
    /// Fewer than three `:`-separated fields.
    MissingFields,
    /// The count field is not an integer.
    InvalidCount,
    /// The date is not `YYYY-MM-DD`.
    InvalidDate,
    /// The product is not in the catalog.
    UnknownProduct,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::UnknownRecord => "unknown record",
            SkipReason::MissingFields => "missing fields",
            SkipReason::InvalidCount => "invalid count",
            SkipReason::InvalidDate => "invalid date",
            SkipReason::UnknownProduct => "unknown product",
        }
    }
}

/// A persisted line that was not applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    /// 1-based line number.
    pub line_no: usize,
    pub content: String,
    pub reason: SkipReason,
}

impl core::fmt::Display for SkippedLine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "line {}: {} ({:?})", self.line_no, self.reason.as_str(), self.content)
    }
}

/// Result of reading persisted text into a fresh ledger.
#[derive(Debug, Clone)]
pub struct Decoded {
    pub ledger: Ledger,
    pub skipped: Vec<SkippedLine>,
}

impl Decoded {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Encode date and the four editable tables, rows in catalog order.
///
/// Same ledger state always yields the same bytes.
pub fn serialize(ledger: &Ledger) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{DATE_TAG}:{}", ledger.date().format(DATE_FORMAT));
    for kind in TableKind::ALL {
        let table = ledger.table(kind);
        for (product, count) in ledger.catalog().iter().zip(table.iter()) {
            let _ = writeln!(out, "{}:{}:{}", kind.record_tag(), product, count);
        }
    }
    out
}

/// Read persisted text into a new all-zero ledger (dated today unless the
/// text carries a valid date).
pub fn deserialize(catalog: Catalog, text: &str) -> Decoded {
    let mut ledger = Ledger::new(catalog);
    let skipped = decode_into(&mut ledger, text);
    Decoded { ledger, skipped }
}

/// Overlay persisted values onto an existing ledger.
///
/// Products and tables the text does not mention keep their current values.
/// Final stock is recomputed once, after every line has been read.
pub fn decode_into(ledger: &mut Ledger, text: &str) -> Vec<SkippedLine> {
    let mut restored = SnapshotRestored {
        date: None,
        values: Vec::new(),
    };
    let mut skipped = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let skip = |reason| SkippedLine {
            line_no: idx + 1,
            content: line.to_string(),
            reason,
        };

        let fields: Vec<&str> = line.split(':').collect();
        let tag = fields[0];

        if tag == DATE_TAG {
            match fields
                .get(1)
                .and_then(|d| NaiveDate::parse_from_str(d.trim(), DATE_FORMAT).ok())
            {
                Some(date) => restored.date = Some(date),
                None => skipped.push(skip(SkipReason::InvalidDate)),
            }
            continue;
        }

        let Some(kind) = TableKind::from_record_tag(tag) else {
            skipped.push(skip(SkipReason::UnknownRecord));
            continue;
        };
        if fields.len() < 3 {
            skipped.push(skip(SkipReason::MissingFields));
            continue;
        }
        let Some(index) = ledger.catalog().position(fields[1]) else {
            skipped.push(skip(SkipReason::UnknownProduct));
            continue;
        };
        match parse_count(fields[2]) {
            Ok(Some(count)) => restored.values.push((kind, index, count)),
            Ok(None) | Err(_) => skipped.push(skip(SkipReason::InvalidCount)),
        }
    }

    for line in &skipped {
        tracing::warn!(line = line.line_no, reason = line.reason.as_str(), "skipping persisted line");
    }

    ledger.apply(&LedgerEvent::SnapshotRestored(restored));
    skipped
}
