// Copyright 2019 TiKV Project Authors. Licensed under Apache-2.0.

use std::collections::BTreeMap;

use crate::proto::pb;

/// The newest value of one column plus every version the server returned.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Column {
    pub family: Vec<u8>,
    pub qualifier: Vec<u8>,
    pub timestamp: u64,
    pub value: Vec<u8>,
    /// timestamp -> value
    pub versions: BTreeMap<u64, Vec<u8>>,
}

/// One row returned by a get or a scan.
///
/// Columns are keyed by `"family:qualifier"`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultRow {
    pub row: Vec<u8>,
    pub columns: BTreeMap<String, Column>,
}

impl ResultRow {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, family: &str, qualifier: &str) -> Option<&Column> {
        self.columns.get(&format!("{family}:{qualifier}"))
    }

    pub fn value(&self, family: &str, qualifier: &str) -> Option<&[u8]> {
        self.column(family, qualifier).map(|c| c.value.as_slice())
    }
}

impl From<pb::Result> for ResultRow {
    fn from(result: pb::Result) -> ResultRow {
        let mut row = ResultRow::default();
        for cell in result.cell {
            if row.row.is_empty() {
                if let Some(key) = &cell.row {
                    row.row = key.clone();
                }
            }
            let family = cell.family.unwrap_or_default();
            let qualifier = cell.qualifier.unwrap_or_default();
            let timestamp = cell.timestamp.unwrap_or_default();
            let value = cell.value.unwrap_or_default();
            let name = format!(
                "{}:{}",
                String::from_utf8_lossy(&family),
                String::from_utf8_lossy(&qualifier)
            );
            let column = row.columns.entry(name).or_insert_with(|| Column {
                family,
                qualifier,
                ..Default::default()
            });
            if column.versions.is_empty() || timestamp >= column.timestamp {
                column.timestamp = timestamp;
                column.value = value.clone();
            }
            column.versions.insert(timestamp, value);
        }
        row
    }
}

#[cfg(any(test, feature = "test-util"))]
pub(crate) fn cell(row: &[u8], family: &str, qualifier: &str, ts: u64, value: &[u8]) -> pb::Cell {
    pb::Cell {
        row: Some(row.to_vec()),
        family: Some(family.as_bytes().to_vec()),
        qualifier: Some(qualifier.as_bytes().to_vec()),
        timestamp: Some(ts),
        value: Some(value.to_vec()),
        ..Default::default()
    }
}
