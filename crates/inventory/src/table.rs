use serde::{Deserialize, Serialize};

/// One of the four user-editable tables.
///
/// Final stock is deliberately absent: it is only ever derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    Initial,
    Production,
    Shipment,
    Returns,
}

impl TableKind {
    pub const ALL: [TableKind; 4] = [
        TableKind::Initial,
        TableKind::Production,
        TableKind::Shipment,
        TableKind::Returns,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::Initial => "initial",
            TableKind::Production => "production",
            TableKind::Shipment => "shipment",
            TableKind::Returns => "returns",
        }
    }

    /// Record tag used in the persisted text format.
    pub fn record_tag(&self) -> &'static str {
        match self {
            TableKind::Initial => "INIT",
            TableKind::Production => "PROD",
            TableKind::Shipment => "SHIP",
            TableKind::Returns => "RET",
        }
    }

    pub fn from_record_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.record_tag() == tag)
    }
}

impl core::fmt::Display for TableKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for TableKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "initial" | "init" => Ok(TableKind::Initial),
            "production" | "prod" => Ok(TableKind::Production),
            "shipment" | "ship" => Ok(TableKind::Shipment),
            "returns" | "ret" => Ok(TableKind::Returns),
            other => Err(format!(
                "unknown table {other:?} (expected initial, production, shipment or returns)"
            )),
        }
    }
}

/// Counts for every catalog product, indexed by catalog position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountTable {
    counts: Vec<i64>,
}

impl CountTable {
    pub fn zeroed(len: usize) -> Self {
        Self {
            counts: vec![0; len],
        }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<i64> {
        self.counts.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.counts.iter().copied()
    }

    pub fn total(&self) -> i64 {
        self.counts.iter().fold(0i64, |acc, c| acc.saturating_add(*c))
    }

    /// Out-of-range indexes are ignored; callers resolve indexes via the catalog.
    pub(crate) fn set(&mut self, index: usize, value: i64) {
        if let Some(slot) = self.counts.get_mut(index) {
            *slot = value;
        }
    }
}

/// Parse a raw count typed by the user.
///
/// Surrounding whitespace is ignored. Blank text means "leave unchanged" and
/// yields `Ok(None)`.
pub fn parse_count(raw: &str) -> Result<Option<i64>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<i64>()
        .map(Some)
        .map_err(|_| format!("not an integer: {raw:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_count_accepts_signed_integers() {
        assert_eq!(parse_count("42"), Ok(Some(42)));
        assert_eq!(parse_count(" -3 "), Ok(Some(-3)));
        assert_eq!(parse_count("+7"), Ok(Some(7)));
    }

    #[test]
    fn parse_count_treats_blank_as_unchanged() {
        assert_eq!(parse_count(""), Ok(None));
        assert_eq!(parse_count("   "), Ok(None));
    }

    #[test]
    fn parse_count_rejects_non_integers() {
        assert!(parse_count("abc").is_err());
        assert!(parse_count("1.5").is_err());
        assert!(parse_count("12abc").is_err());
    }

    #[test]
    fn record_tags_round_trip() {
        for kind in TableKind::ALL {
            assert_eq!(TableKind::from_record_tag(kind.record_tag()), Some(kind));
        }
        assert_eq!(TableKind::from_record_tag("FINAL"), None);
    }

    #[test]
    fn table_names_parse_case_insensitively() {
        assert_eq!("Production".parse::<TableKind>(), Ok(TableKind::Production));
        assert_eq!("ret".parse::<TableKind>(), Ok(TableKind::Returns));
        assert!("final".parse::<TableKind>().is_err());
    }

    #[test]
    fn total_sums_all_counts() {
        let mut table = CountTable::zeroed(3);
        table.set(0, 4);
        table.set(2, -1);
        table.set(7, 100);
        assert_eq!(table.total(), 3);
        assert_eq!(table.get(7), None);
    }
}
