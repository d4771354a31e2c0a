// Copyright 2019 TiKV Project Authors. Licensed under Apache-2.0.

use md5::Digest;
use md5::Md5;
use prost::Message;

use crate::kv::ResultRow;
use crate::proto::pb;
use crate::proto::pb::region_specifier::RegionSpecifierType;
use crate::Error;
use crate::Result;

/// The table describing where every other region lives.
pub const META_TABLE_NAME: &[u8] = b"hbase:meta";
/// The name of the single region of the meta table.
pub const META_REGION_NAME: &[u8] = b"hbase:meta,,1";

const REGION_INFO_COLUMN: &str = "info:regioninfo";
const SERVER_COLUMN: &str = "info:server";
const PB_MAGIC: &[u8] = b"PBUF";
const DEFAULT_NAMESPACE: &[u8] = b"default";

/// A contiguous row range of one table and the server that currently owns it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionInfo {
    /// Canonical region name; also the row key of the region in the meta table.
    pub name: Vec<u8>,
    pub start_key: Vec<u8>,
    pub end_key: Vec<u8>,
    /// `host:port` of the region server.
    pub server: String,
    pub table_namespace: Vec<u8>,
    pub table_name: Vec<u8>,
}

impl RegionInfo {
    /// The open-range region of the meta table, hosted by `server`.
    pub(crate) fn meta(server: String) -> RegionInfo {
        RegionInfo {
            name: META_REGION_NAME.to_vec(),
            server,
            table_namespace: b"hbase".to_vec(),
            table_name: b"meta".to_vec(),
            ..Default::default()
        }
    }

    /// Whether `row` lies in `[start_key, end_key)`; empty bounds are unbounded.
    pub fn contains(&self, row: &[u8]) -> bool {
        (self.start_key.is_empty() || row >= self.start_key.as_slice())
            && (self.end_key.is_empty() || row < self.end_key.as_slice())
    }

    /// The table name as users spell it: `ns:table`, or just `table` in the default namespace.
    pub fn table(&self) -> Vec<u8> {
        qualified_table_name(&self.table_namespace, &self.table_name)
    }

    pub(crate) fn specifier(&self) -> pb::RegionSpecifier {
        region_specifier(&self.name)
    }

    /// Parse a row of the meta table.
    ///
    /// `info:regioninfo` holds the `PBUF` marker followed by a `RegionInfo` message, and
    /// `info:server` holds the `host:port` of the owning server.
    pub fn from_meta_row(row: &ResultRow) -> Result<RegionInfo> {
        let info = row
            .columns
            .get(REGION_INFO_COLUMN)
            .ok_or_else(|| meta_parse_error(row, "no regioninfo column"))?;
        let offset = info
            .value
            .windows(PB_MAGIC.len())
            .position(|window| window == PB_MAGIC)
            .map(|position| position + PB_MAGIC.len())
            .ok_or_else(|| meta_parse_error(row, "no PBUF marker in regioninfo"))?;
        let region = pb::RegionInfo::decode(&info.value[offset..])?;
        // A region in transition has no server yet.
        let server = row
            .columns
            .get(SERVER_COLUMN)
            .filter(|column| !column.value.is_empty())
            .map(|column| String::from_utf8_lossy(&column.value).into_owned())
            .ok_or_else(|| meta_parse_error(row, "no server column"))?;

        Ok(RegionInfo {
            name: row.row.clone(),
            start_key: region.start_key.unwrap_or_default(),
            end_key: region.end_key.unwrap_or_default(),
            server,
            table_namespace: region.table_name.namespace,
            table_name: region.table_name.qualifier,
        })
    }
}

fn meta_parse_error(row: &ResultRow, reason: &str) -> Error {
    Error::ProtocolViolation {
        message: format!(
            "unable to parse meta row {}: {reason}",
            String::from_utf8_lossy(&row.row)
        ),
    }
}

pub(crate) fn qualified_table_name(namespace: &[u8], qualifier: &[u8]) -> Vec<u8> {
    if namespace.is_empty() || namespace == DEFAULT_NAMESPACE {
        return qualifier.to_vec();
    }
    let mut table = namespace.to_vec();
    table.push(b':');
    table.extend_from_slice(qualifier);
    table
}

pub(crate) fn region_specifier(name: &[u8]) -> pb::RegionSpecifier {
    pb::RegionSpecifier {
        r#type: RegionSpecifierType::RegionName as i32,
        value: name.to_vec(),
    }
}

/// Build a region name the way region servers do.
///
/// The name is `table,start_key,id`; an empty start key is written as a single zero byte. In the
/// new format the MD5 hex of that prefix is appended between dots. Used with `id = ""` it yields the
/// meta-table key whose closest preceding row describes the region containing `start_key`.
pub fn create_region_name(table: &[u8], start_key: &[u8], id: &str, new_format: bool) -> Vec<u8> {
    let start_key: &[u8] = if start_key.is_empty() { &[0] } else { start_key };

    let mut name = Vec::with_capacity(table.len() + start_key.len() + id.len() + 36);
    name.extend_from_slice(table);
    name.push(b',');
    name.extend_from_slice(start_key);
    name.push(b',');
    name.extend_from_slice(id.as_bytes());

    if new_format {
        let hash = format!("{:x}", Md5::digest(&name));
        name.push(b'.');
        name.extend_from_slice(hash.as_bytes());
        name.push(b'.');
    }
    name
}

/// The meta-table row describing `region`, as a region server would return it.
#[cfg(any(test, feature = "test-util"))]
pub(crate) fn meta_result(region: &RegionInfo, region_id: u64) -> pb::Result {
    let info = pb::RegionInfo {
        region_id,
        table_name: pb::TableName {
            namespace: region.table_namespace.clone(),
            qualifier: region.table_name.clone(),
        },
        start_key: Some(region.start_key.clone()),
        end_key: Some(region.end_key.clone()),
        ..Default::default()
    };
    let mut value = PB_MAGIC.to_vec();
    value.extend(info.encode_to_vec());

    pb::Result {
        cell: vec![
            crate::kv::cell(&region.name, "info", "regioninfo", 1, &value),
            crate::kv::cell(&region.name, "info", "server", 1, region.server.as_bytes()),
        ],
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn region(start: &[u8], end: &[u8]) -> RegionInfo {
        RegionInfo {
            name: create_region_name(b"t", start, "1", true),
            start_key: start.to_vec(),
            end_key: end.to_vec(),
            server: "srv:16020".to_owned(),
            table_namespace: b"default".to_vec(),
            table_name: b"t".to_vec(),
        }
    }

    #[test]
    fn contains_is_start_inclusive_end_exclusive() {
        let r1 = region(b"", b"m");
        let r2 = region(b"m", b"");
        assert!(r1.contains(b"apple"));
        assert!(r1.contains(b""));
        assert!(!r1.contains(b"m"));
        assert!(r2.contains(b"m"));
        assert!(r2.contains(b"zebra"));
        assert!(!r2.contains(b"apple"));
        assert!(region(b"", b"").contains(b"anything"));
    }

    #[test]
    fn region_name_format() {
        let name = create_region_name(b"t", b"row", "", false);
        assert_eq!(name, b"t,row,".to_vec());

        let empty_start = create_region_name(b"t", b"", "", false);
        assert_eq!(empty_start, b"t,\x00,".to_vec());

        let hashed = create_region_name(b"t", b"row", "", true);
        let expected_hash = format!("{:x}", Md5::digest(b"t,row,"));
        assert_eq!(expected_hash.len(), 32);
        assert_eq!(hashed, format!("t,row,.{expected_hash}.").into_bytes());
    }

    #[test]
    fn table_name_includes_non_default_namespace() {
        let mut r = region(b"", b"");
        assert_eq!(r.table(), b"t".to_vec());
        r.table_namespace = b"ns".to_vec();
        assert_eq!(r.table(), b"ns:t".to_vec());
    }

    #[test]
    fn parse_meta_row() {
        let expected = region(b"a", b"k");
        let row = ResultRow::from(meta_result(&expected, 1));
        let parsed = RegionInfo::from_meta_row(&row).unwrap();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn parse_meta_row_without_regioninfo_fails() {
        let mut row = ResultRow::from(meta_result(&region(b"a", b"k"), 1));
        row.columns.remove(REGION_INFO_COLUMN);
        assert!(RegionInfo::from_meta_row(&row).is_err());
    }

    #[test]
    fn parse_meta_row_without_server_fails() {
        let mut row = ResultRow::from(meta_result(&region(b"a", b"k"), 1));
        if let Some(column) = row.columns.get_mut(SERVER_COLUMN) {
            column.value.clear();
        }
        assert!(RegionInfo::from_meta_row(&row).is_err());
        row.columns.remove(SERVER_COLUMN);
        assert!(RegionInfo::from_meta_row(&row).is_err());
    }

    #[test]
    fn parse_meta_row_with_garbage_fails() {
        let mut row = ResultRow::from(meta_result(&region(b"a", b"k"), 1));
        if let Some(column) = row.columns.get_mut(REGION_INFO_COLUMN) {
            column.value = b"PBUF\xff\xff\xff".to_vec();
        }
        assert!(RegionInfo::from_meta_row(&row).is_err());
    }

    proptest! {
        #[test]
        fn region_name_is_deterministic(table in any::<Vec<u8>>(), row in any::<Vec<u8>>()) {
            prop_assert_eq!(
                create_region_name(&table, &row, "", true),
                create_region_name(&table, &row, "", true)
            );
        }

        #[test]
        fn region_name_differs_for_different_rows(
            row_a in "[a-z0-9]{1,16}",
            row_b in "[a-z0-9]{1,16}",
        ) {
            prop_assume!(row_a != row_b);
            prop_assert_ne!(
                create_region_name(b"t", row_a.as_bytes(), "", true),
                create_region_name(b"t", row_b.as_bytes(), "", true)
            );
        }

        #[test]
        fn region_name_differs_for_different_tables(
            table_a in "[a-z]{1,8}",
            table_b in "[a-z]{1,8}",
        ) {
            prop_assume!(table_a != table_b);
            prop_assert_ne!(
                create_region_name(table_a.as_bytes(), b"row", "", true),
                create_region_name(table_b.as_bytes(), b"row", "", true)
            );
        }

        #[test]
        fn contains_matches_bounds(
            start in any::<Vec<u8>>(),
            end in any::<Vec<u8>>(),
            row in any::<Vec<u8>>(),
        ) {
            let r = region(&start, &end);
            let expected = (start.is_empty() || row >= start) && (end.is_empty() || row < end);
            prop_assert_eq!(r.contains(&row), expected);
        }
    }
}
