// Copyright 2019 TiKV Project Authors. Licensed under Apache-2.0.

use std::collections::BTreeMap;

use crate::proto::pb;

/// A read of a single row.
///
/// Without any family or column the whole row is returned.
///
/// # Examples
/// ```rust
/// # use hbase_client::Get;
/// let get = Get::new("row-1").add_column("cf", "q").with_max_versions(3);
/// assert_eq!(get.row(), b"row-1");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Get {
    row: Vec<u8>,
    /// family -> qualifiers; an empty list selects the whole family.
    families: BTreeMap<Vec<u8>, Vec<Vec<u8>>>,
    max_versions: Option<u32>,
    time_range: Option<(u64, u64)>,
    closest_row_before: bool,
}

impl Get {
    pub fn new(row: impl Into<Vec<u8>>) -> Self {
        Get {
            row: row.into(),
            ..Default::default()
        }
    }

    pub fn row(&self) -> &[u8] {
        &self.row
    }

    #[must_use]
    pub fn add_family(mut self, family: impl Into<Vec<u8>>) -> Self {
        self.families.insert(family.into(), Vec::new());
        self
    }

    #[must_use]
    pub fn add_column(mut self, family: impl Into<Vec<u8>>, qualifier: impl Into<Vec<u8>>) -> Self {
        self.families
            .entry(family.into())
            .or_default()
            .push(qualifier.into());
        self
    }

    #[must_use]
    pub fn with_max_versions(mut self, max_versions: u32) -> Self {
        self.max_versions = Some(max_versions);
        self
    }

    /// Only return cells with `from <= timestamp < to`.
    #[must_use]
    pub fn with_time_range(mut self, from: u64, to: u64) -> Self {
        self.time_range = Some((from, to));
        self
    }

    /// Return the row at or immediately before `row` instead of `row` itself.
    #[must_use]
    pub(crate) fn closest_row_before(mut self) -> Self {
        self.closest_row_before = true;
        self
    }

    pub(crate) fn to_proto(&self) -> pb::Get {
        pb::Get {
            row: self.row.clone(),
            column: self
                .families
                .iter()
                .map(|(family, qualifiers)| pb::Column {
                    family: family.clone(),
                    qualifier: qualifiers.clone(),
                })
                .collect(),
            time_range: self.time_range.map(|(from, to)| pb::TimeRange {
                from: Some(from),
                to: Some(to),
            }),
            max_versions: self.max_versions,
            closest_row_before: self.closest_row_before.then_some(true),
            ..Default::default()
        }
    }
}
