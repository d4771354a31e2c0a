// Copyright 2019 TiKV Project Authors. Licensed under Apache-2.0.

use std::collections::BTreeMap;

use log::debug;

use crate::kv::ResultRow;
use crate::proto::pb;
use crate::region::RegionInfo;
use crate::store::Connect;
use crate::store::Request;
use crate::Client;
use crate::Result;

/// A read of the rows in `[start_row, stop_row)`.
///
/// Empty bounds are unbounded. Without any family or column whole rows are returned.
///
/// # Examples
/// ```rust
/// # use hbase_client::Scan;
/// let scan = Scan::new()
///     .with_start_row("user-000")
///     .with_stop_row("user-100")
///     .add_family("info");
/// assert_eq!(scan.start_row(), b"user-000");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scan {
    start_row: Vec<u8>,
    stop_row: Vec<u8>,
    families: BTreeMap<Vec<u8>, Vec<Vec<u8>>>,
    max_versions: Option<u32>,
    time_range: Option<(u64, u64)>,
}

impl Scan {
    pub fn new() -> Self {
        Scan::default()
    }

    pub fn start_row(&self) -> &[u8] {
        &self.start_row
    }

    pub fn stop_row(&self) -> &[u8] {
        &self.stop_row
    }

    #[must_use]
    pub fn with_start_row(mut self, row: impl Into<Vec<u8>>) -> Self {
        self.start_row = row.into();
        self
    }

    /// The first row not returned.
    #[must_use]
    pub fn with_stop_row(mut self, row: impl Into<Vec<u8>>) -> Self {
        self.stop_row = row.into();
        self
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

    #[must_use]
    pub fn with_time_range(mut self, from: u64, to: u64) -> Self {
        self.time_range = Some((from, to));
        self
    }

    pub(crate) fn to_proto(&self) -> pb::Scan {
        pb::Scan {
            column: self
                .families
                .iter()
                .map(|(family, qualifiers)| pb::Column {
                    family: family.clone(),
                    qualifier: qualifiers.clone(),
                })
                .collect(),
            start_row: Some(self.start_row.clone()),
            stop_row: (!self.stop_row.is_empty()).then(|| self.stop_row.clone()),
            time_range: self.time_range.map(|(from, to)| pb::TimeRange {
                from: Some(from),
                to: Some(to),
            }),
            max_versions: self.max_versions,
            ..Default::default()
        }
    }
}

impl<C: Connect> Client<C> {
    /// Collect every row `scan` selects, in row order.
    ///
    /// # Examples
    /// ```rust,no_run
    /// # use hbase_client::{Client, Result, Scan};
    /// # async fn example() -> Result<()> {
    /// # let client = Client::new(vec!["zk1:2181"]).await?;
    /// let rows = client
    ///     .scan("users", Scan::new().with_start_row("a").with_stop_row("b"))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn scan(&self, table: impl AsRef<[u8]>, scan: Scan) -> Result<Vec<ResultRow>> {
        let mut rows = Vec::new();
        self.scan_with(table, scan, |row| rows.push(row)).await?;
        Ok(rows)
    }

    /// Hand every row `scan` selects to `f`, region by region.
    ///
    /// A failure stops the scan; rows already handed over stay delivered.
    pub async fn scan_with<F>(&self, table: impl AsRef<[u8]>, scan: Scan, mut f: F) -> Result<()>
    where
        F: FnMut(ResultRow) + Send,
    {
        let table = table.as_ref();
        let mut start = scan.start_row.clone();
        loop {
            let region = self.locate_region(table, &start, true).await?;
            let mut proto = scan.to_proto();
            proto.start_row = Some(start);
            self.scan_region(&region, &proto, &mut f).await?;

            let past_stop = !scan.stop_row.is_empty() && region.end_key >= scan.stop_row;
            if region.end_key.is_empty() || past_stop {
                return Ok(());
            }
            start = region.end_key;
        }
    }

    /// Scan a single region: open a scanner, page through it, close it.
    pub(crate) async fn scan_region(
        &self,
        region: &RegionInfo,
        scan: &pb::Scan,
        f: &mut (dyn FnMut(ResultRow) + Send),
    ) -> Result<()> {
        let batch = self.config().scan_batch_size;
        let open = pb::ScanRequest {
            region: Some(region.specifier()),
            scan: Some(scan.clone()),
            number_of_rows: Some(batch),
            ..Default::default()
        };
        let mut response = self.send(region, Request::Scan(open)).await?.into_scan()?;
        let Some(scanner_id) = response.scanner_id else {
            deliver(&mut response, f);
            return Ok(());
        };

        loop {
            let had_rows = deliver(&mut response, f);
            // The server closes the scanner itself once it reports no more results.
            if !response.more_results.unwrap_or(false) {
                return Ok(());
            }
            let region_done = match response.more_results_in_region {
                Some(more) => !more,
                None => !had_rows,
            };
            if region_done {
                break;
            }

            let next = pb::ScanRequest {
                scanner_id: Some(scanner_id),
                number_of_rows: Some(batch),
                ..Default::default()
            };
            response = self.send(region, Request::Scan(next)).await?.into_scan()?;
        }

        let close = pb::ScanRequest {
            scanner_id: Some(scanner_id),
            number_of_rows: Some(0),
            close_scanner: Some(true),
            ..Default::default()
        };
        if let Err(err) = self.send(region, Request::Scan(close)).await {
            debug!("closing scanner {scanner_id} on {} failed: {err}", region.server);
        }
        Ok(())
    }
}

/// Hand the rows of `response` to `f`; returns whether there were any.
fn deliver(response: &mut pb::ScanResponse, f: &mut (dyn FnMut(ResultRow) + Send)) -> bool {
    let had_rows = !response.results.is_empty();
    for result in response.results.drain(..) {
        let row = ResultRow::from(result);
        if !row.is_empty() {
            f(row);
        }
    }
    had_rows
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;

    use super::*;
    use crate::kv::cell;
    use crate::mock::MockConnect;
    use crate::region::create_region_name;
    use crate::region::meta_result;
    use crate::store::Response;
    use crate::Config;

    fn region(start_key: &[u8], end_key: &[u8], server: &str) -> RegionInfo {
        RegionInfo {
            name: create_region_name(b"t", start_key, "1", true),
            start_key: start_key.to_vec(),
            end_key: end_key.to_vec(),
            server: server.to_owned(),
            table_namespace: b"default".to_vec(),
            table_name: b"t".to_vec(),
        }
    }

    fn rows(keys: &[&str]) -> Vec<pb::Result> {
        keys.iter()
            .map(|key| pb::Result {
                cell: vec![cell(key.as_bytes(), "cf", "q", 1, b"v")],
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn proto_carries_bounds_and_columns() {
        let proto = Scan::new()
            .with_start_row("a")
            .add_column("cf", "q")
            .with_max_versions(2)
            .to_proto();
        assert_eq!(proto.start_row, Some(b"a".to_vec()));
        assert_eq!(proto.stop_row, None);
        assert_eq!(proto.max_versions, Some(2));
        assert_eq!(proto.column.len(), 1);
        assert_eq!(proto.column[0].qualifier, vec![b"q".to_vec()]);
    }

    #[tokio::test]
    async fn scan_walks_regions_and_pages() {
        let regions = vec![region(b"", b"m", "srvA:1"), region(b"m", b"", "srvB:1")];
        let log = Arc::new(Mutex::new(Vec::new()));
        let hook_log = log.clone();
        let connect = MockConnect::with_dispatch_hook(move |address, req| {
            let Request::Scan(scan) = req else {
                panic!("{req:?}");
            };
            if address == "root:1" {
                return Ok(Response::Scan(pb::ScanResponse {
                    results: regions.iter().map(|r| meta_result(r, 1)).collect(),
                    more_results: Some(false),
                    ..Default::default()
                }));
            }
            hook_log.lock().unwrap().push((address.to_owned(), scan.clone()));
            let response = match (address, scan.scanner_id, scan.close_scanner) {
                // srvA: two pages, then the region runs out.
                ("srvA:1", None, _) => pb::ScanResponse {
                    scanner_id: Some(7),
                    results: rows(&["a", "b"]),
                    more_results: Some(true),
                    more_results_in_region: Some(true),
                    ..Default::default()
                },
                ("srvA:1", Some(7), None) => pb::ScanResponse {
                    results: rows(&["c"]),
                    more_results: Some(true),
                    more_results_in_region: Some(false),
                    ..Default::default()
                },
                ("srvA:1", Some(7), Some(true)) => pb::ScanResponse::default(),
                // srvB: one page and the scan is over.
                ("srvB:1", None, _) => pb::ScanResponse {
                    scanner_id: Some(8),
                    results: rows(&["n"]),
                    more_results: Some(false),
                    ..Default::default()
                },
                other => panic!("unexpected scan {other:?}"),
            };
            Ok(Response::Scan(response))
        });
        let client = Client::new_with_servers(connect, "root:1", None, Config::default());

        let found = client.scan("t", Scan::new().with_start_row("a")).await.unwrap();
        let keys: Vec<_> = found.into_iter().map(|r| r.row).collect();
        assert_eq!(keys, vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec(), b"n".to_vec()]);

        let log = log.lock().unwrap();
        assert_eq!(log.len(), 4);
        assert_eq!(log[0].1.scan.as_ref().unwrap().start_row, Some(b"a".to_vec()));
        assert_eq!(log[2].1.close_scanner, Some(true));
        assert_eq!(log[3].0, "srvB:1");
        assert_eq!(log[3].1.scan.as_ref().unwrap().start_row, Some(b"m".to_vec()));
    }

    #[tokio::test]
    async fn scan_stops_at_the_stop_row() {
        let regions = vec![region(b"", b"m", "srvA:1"), region(b"m", b"", "srvB:1")];
        let connect = MockConnect::with_dispatch_hook(move |address, req| {
            let Request::Scan(_) = req else {
                panic!("{req:?}");
            };
            assert_ne!(address, "srvB:1", "the second region is past the stop row");
            let results = if address == "root:1" {
                regions.iter().map(|r| meta_result(r, 1)).collect()
            } else {
                rows(&["a"])
            };
            Ok(Response::Scan(pb::ScanResponse {
                results,
                more_results: Some(false),
                ..Default::default()
            }))
        });
        let client = Client::new_with_servers(connect, "root:1", None, Config::default());

        let scan = Scan::new().with_start_row("a").with_stop_row("k");
        let found = client.scan("t", scan).await.unwrap();
        assert_eq!(found.len(), 1);
    }
}
