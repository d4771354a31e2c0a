// Copyright 2019 TiKV Project Authors. Licensed under Apache-2.0.

use std::collections::BTreeMap;

use crate::proto::pb;
use crate::proto::pb::mutation_proto::column_value::QualifierValue;
use crate::proto::pb::mutation_proto::ColumnValue;
use crate::proto::pb::mutation_proto::DeleteType;
use crate::proto::pb::mutation_proto::MutationType;

/// A write of one or more cells in a single row.
///
/// # Examples
/// ```rust
/// # use hbase_client::Put;
/// let put = Put::new("row-1")
///     .add_value("cf", "name", "alice")
///     .add_value("cf", "age", "42");
/// assert_eq!(put.row(), b"row-1");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Put {
    row: Vec<u8>,
    timestamp: Option<u64>,
    /// family -> (qualifier, value)
    values: BTreeMap<Vec<u8>, Vec<(Vec<u8>, Vec<u8>)>>,
}

impl Put {
    pub fn new(row: impl Into<Vec<u8>>) -> Self {
        Put {
            row: row.into(),
            ..Default::default()
        }
    }

    pub fn row(&self) -> &[u8] {
        &self.row
    }

    #[must_use]
    pub fn add_value(
        mut self,
        family: impl Into<Vec<u8>>,
        qualifier: impl Into<Vec<u8>>,
        value: impl Into<Vec<u8>>,
    ) -> Self {
        self.values
            .entry(family.into())
            .or_default()
            .push((qualifier.into(), value.into()));
        self
    }

    /// Write every cell with this timestamp instead of the server's clock.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn to_proto(&self) -> pb::MutationProto {
        pb::MutationProto {
            row: Some(self.row.clone()),
            mutate_type: Some(MutationType::Put as i32),
            column_value: self
                .values
                .iter()
                .map(|(family, cells)| ColumnValue {
                    family: family.clone(),
                    qualifier_value: cells
                        .iter()
                        .map(|(qualifier, value)| QualifierValue {
                            qualifier: Some(qualifier.clone()),
                            value: Some(value.clone()),
                            ..Default::default()
                        })
                        .collect(),
                })
                .collect(),
            timestamp: self.timestamp,
            ..Default::default()
        }
    }
}

/// A delete of a whole row, whole families, or single columns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Delete {
    row: Vec<u8>,
    timestamp: Option<u64>,
    /// family -> qualifiers; an empty list deletes the whole family.
    families: BTreeMap<Vec<u8>, Vec<Vec<u8>>>,
}

impl Delete {
    /// Delete every cell of `row`.
    pub fn new(row: impl Into<Vec<u8>>) -> Self {
        Delete {
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

    /// Delete all versions of one column.
    #[must_use]
    pub fn add_column(mut self, family: impl Into<Vec<u8>>, qualifier: impl Into<Vec<u8>>) -> Self {
        self.families
            .entry(family.into())
            .or_default()
            .push(qualifier.into());
        self
    }

    /// Only delete versions at or before `timestamp`.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub(crate) fn to_proto(&self) -> pb::MutationProto {
        pb::MutationProto {
            row: Some(self.row.clone()),
            mutate_type: Some(MutationType::Delete as i32),
            column_value: self
                .families
                .iter()
                .map(|(family, qualifiers)| ColumnValue {
                    family: family.clone(),
                    qualifier_value: if qualifiers.is_empty() {
                        vec![QualifierValue {
                            delete_type: Some(DeleteType::DeleteFamily as i32),
                            timestamp: self.timestamp,
                            ..Default::default()
                        }]
                    } else {
                        qualifiers
                            .iter()
                            .map(|qualifier| QualifierValue {
                                qualifier: Some(qualifier.clone()),
                                delete_type: Some(DeleteType::DeleteMultipleVersions as i32),
                                timestamp: self.timestamp,
                                ..Default::default()
                            })
                            .collect()
                    },
                })
                .collect(),
            timestamp: self.timestamp,
            ..Default::default()
        }
    }
}
