// Copyright 2021 TiKV Project Authors. Licensed under Apache-2.0.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::ops::Bound;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::sync::OnceCell;
use tokio::sync::RwLock;

use crate::region::RegionInfo;

/// The regions of one table, keyed by start key.
///
/// Invariant: the ranges of the cached regions never intersect.
type TableRegions = BTreeMap<Vec<u8>, RegionInfo>;

/// Region locations per table, plus the per-table prefetch markers.
///
/// The cache is best-effort: it may be incomplete or stale. A caller that saw a request fail looks
/// the region up again and the fresh answer replaces whatever it overlaps.
#[derive(Default)]
pub(crate) struct RegionCache {
    tables: RwLock<HashMap<Vec<u8>, TableRegions>>,
    prefetched: Mutex<HashMap<Vec<u8>, Arc<OnceCell<()>>>>,
}

impl RegionCache {
    pub(crate) fn new() -> RegionCache {
        RegionCache::default()
    }

    /// The cached region of `table` containing `row`, if any.
    pub(crate) async fn get(&self, table: &[u8], row: &[u8]) -> Option<RegionInfo> {
        let tables = self.tables.read().await;
        let regions = tables.get(table)?;
        let (_, candidate) = regions
            .range::<[u8], _>((Bound::Unbounded, Bound::Included(row)))
            .next_back()?;
        candidate.contains(row).then(|| candidate.clone())
    }

    pub(crate) async fn add_region(&self, table: &[u8], region: RegionInfo) {
        let mut tables = self.tables.write().await;
        let regions = tables.entry(table.to_vec()).or_default();

        // Scan backwards from the new region's end key; entries are sorted by start key and
        // disjoint, so the first one ending at or before the new start key stops the sweep.
        let mut stale = Vec::new();
        {
            let search = if region.end_key.is_empty() {
                regions.range::<[u8], _>(..)
            } else {
                regions.range::<[u8], _>((
                    Bound::Unbounded,
                    Bound::Excluded(region.end_key.as_slice()),
                ))
            };
            for (start_key, cached) in search.rev() {
                let overlaps = cached.end_key.is_empty() || cached.end_key > region.start_key;
                if !overlaps {
                    break;
                }
                stale.push(start_key.clone());
            }
        }
        for start_key in stale {
            regions.remove(&start_key);
        }
        regions.retain(|_, cached| cached.name != region.name);
        regions.insert(region.start_key.clone(), region);
    }

    /// The marker guarding the one-time prefetch of `table`.
    pub(crate) async fn prefetch_marker(&self, table: &[u8]) -> Arc<OnceCell<()>> {
        self.prefetched
            .lock()
            .await
            .entry(table.to_vec())
            .or_default()
            .clone()
    }

    #[cfg(test)]
    pub(crate) async fn regions(&self, table: &[u8]) -> Vec<RegionInfo> {
        self.tables
            .read()
            .await
            .get(table)
            .map(|regions| regions.values().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::region::create_region_name;

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

    fn start_keys(regions: &[RegionInfo]) -> Vec<Vec<u8>> {
        regions.iter().map(|r| r.start_key.clone()).collect()
    }

    #[tokio::test]
    async fn lookup_respects_region_bounds() {
        let cache = RegionCache::new();
        cache.add_region(b"t", region(b"", b"m", "srvA:1")).await;
        cache.add_region(b"t", region(b"m", b"", "srvB:1")).await;

        assert_eq!(cache.get(b"t", b"apple").await.unwrap().server, "srvA:1");
        assert_eq!(cache.get(b"t", b"zebra").await.unwrap().server, "srvB:1");
        assert_eq!(cache.get(b"t", b"m").await.unwrap().server, "srvB:1");
        assert_eq!(cache.get(b"t", b"").await.unwrap().server, "srvA:1");
        assert!(cache.get(b"other", b"apple").await.is_none());
    }

    #[tokio::test]
    async fn gaps_are_misses() {
        let cache = RegionCache::new();
        cache.add_region(b"t", region(b"", b"c", "a:1")).await;
        cache.add_region(b"t", region(b"f", b"k", "b:1")).await;

        assert!(cache.get(b"t", b"d").await.is_none());
        assert!(cache.get(b"t", b"k").await.is_none());
        assert!(cache.get(b"t", b"z").await.is_none());
        assert_eq!(cache.get(b"t", b"f").await.unwrap().server, "b:1");
    }

    #[tokio::test]
    async fn refreshed_region_replaces_overlapping_entries() {
        let cache = RegionCache::new();
        cache.add_region(b"t", region(b"", b"c", "a:1")).await;
        cache.add_region(b"t", region(b"c", b"f", "a:1")).await;
        cache.add_region(b"t", region(b"f", b"", "a:1")).await;

        // A merge of the two upper regions moved to another server.
        cache.add_region(b"t", region(b"c", b"", "b:1")).await;
        let regions = cache.regions(b"t").await;
        assert_eq!(start_keys(&regions), vec![b"".to_vec(), b"c".to_vec()]);
        assert_eq!(cache.get(b"t", b"x").await.unwrap().server, "b:1");

        // A split of the tail only replaces the tail.
        cache.add_region(b"t", region(b"d", b"e", "c:1")).await;
        let regions = cache.regions(b"t").await;
        assert_eq!(start_keys(&regions), vec![b"".to_vec(), b"d".to_vec()]);
        assert!(cache.get(b"t", b"x").await.is_none());
        assert_eq!(cache.get(b"t", b"a").await.unwrap().server, "a:1");
    }

    #[tokio::test]
    async fn same_region_is_overwritten() {
        let cache = RegionCache::new();
        cache.add_region(b"t", region(b"", b"", "a:1")).await;
        cache.add_region(b"t", region(b"", b"", "b:1")).await;
        let regions = cache.regions(b"t").await;
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].server, "b:1");
    }

    #[tokio::test]
    async fn prefetch_marker_is_shared_per_table() {
        let cache = RegionCache::new();
        let first = cache.prefetch_marker(b"t").await;
        let second = cache.prefetch_marker(b"t").await;
        let other = cache.prefetch_marker(b"u").await;
        assert!(Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&first, &other));

        first.get_or_init(|| async {}).await;
        assert!(second.initialized());
        assert!(!other.initialized());
    }
}
