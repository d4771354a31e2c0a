// Copyright 2019 TiKV Project Authors. Licensed under Apache-2.0.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::Arc;

use async_recursion::async_recursion;
use futures::stream::BoxStream;
use futures::StreamExt;
use log::debug;
use log::error;
use log::info;
use log::warn;
use tokio::sync::mpsc;
use tokio::sync::Mutex;
use tokio::sync::RwLock;
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::config::Config;
use crate::coordinator::decode_server_name;
use crate::coordinator::Coordinator;
use crate::coordinator::ZkCoordinator;
use crate::kv::successor;
use crate::kv::Action;
use crate::kv::Delete;
use crate::kv::Get;
use crate::kv::HexRepr;
use crate::kv::Put;
use crate::kv::ResultRow;
use crate::proto::pb;
use crate::region::create_region_name;
use crate::region::qualified_table_name;
use crate::region::region_specifier;
use crate::region::RegionInfo;
use crate::region::META_TABLE_NAME;
use crate::region_cache::RegionCache;
use crate::scan::Scan;
use crate::store::Call;
use crate::store::Connect;
use crate::store::Request;
use crate::store::Response;
use crate::store::RpcConnection;
use crate::store::Service;
use crate::store::TcpConnect;
use crate::Error;
use crate::Result;

/// Region id used for the second meta lookup at a region boundary; sorts after any real id.
const META_LOOKUP_NINES: &str = "99999999999999";

/// server address -> region name -> actions routed to that region
type ServerGroups = HashMap<String, BTreeMap<Vec<u8>, Vec<Action>>>;

type MultiSender = mpsc::UnboundedSender<Result<pb::MultiResponse>>;

/// A table as described by the master.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableInfo {
    /// `ns:table`, or just `table` in the default namespace.
    pub table_name: String,
    pub families: Vec<String>,
}

impl From<pb::TableSchema> for TableInfo {
    fn from(schema: pb::TableSchema) -> TableInfo {
        let table_name = schema
            .table_name
            .map(|name| qualified_table_name(&name.namespace, &name.qualifier))
            .unwrap_or_default();
        TableInfo {
            table_name: String::from_utf8_lossy(&table_name).into_owned(),
            families: schema
                .column_families
                .into_iter()
                .map(|family| String::from_utf8_lossy(&family.name).into_owned())
                .collect(),
        }
    }
}

/// The HBase `Client` sends row operations to the region servers owning the rows.
///
/// It locates regions through the meta table, caches their locations, keeps one connection per
/// server, and resends failed actions to freshly located regions.
///
/// Cloning a client is cheap; clones share the cache and the connections.
pub struct Client<C: Connect = TcpConnect> {
    inner: Arc<ClientInner<C>>,
}

struct ClientInner<C: Connect> {
    connect: C,
    config: Config,
    /// Server hosting the meta region.
    root_server: String,
    master_server: Option<String>,
    region_cache: RegionCache,
    connections: RwLock<HashMap<String, Arc<C::Connection>>>,
    master_connection: Mutex<Option<Arc<C::Connection>>>,
}

impl<C: Connect> Clone for Client<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl Client<TcpConnect> {
    /// Create a [`Client`] that finds the cluster through the given ZooKeeper hosts.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use hbase_client::{Client, Result};
    /// # async fn example() -> Result<()> {
    /// let _client = Client::new(vec!["zk1:2181", "zk2:2181"]).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new<S: Into<String>>(zk_hosts: Vec<S>) -> Result<Self> {
        Self::new_with_config(zk_hosts, Config::default()).await
    }

    /// Create a [`Client`] with a custom configuration.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use hbase_client::{Client, Config, Result};
    /// # async fn example() -> Result<()> {
    /// let _client = Client::new_with_config(
    ///     vec!["zk1:2181"],
    ///     Config::default().with_user("hadoop").with_max_retries(5),
    /// )
    /// .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new_with_config<S: Into<String>>(
        zk_hosts: Vec<S>,
        config: Config,
    ) -> Result<Self> {
        let coordinator = ZkCoordinator::new(zk_hosts, config.zk_session_timeout);
        let connect = TcpConnect::new(config.user.clone());
        Client::new_with_coordinator(&coordinator, connect, config).await
    }
}

impl<C: Connect> Client<C> {
    /// Bootstrap from `coordinator` and open the connection to the meta region's server.
    ///
    /// A missing master location is logged; only [`Client::table_descriptors`] needs it.
    pub async fn new_with_coordinator(
        coordinator: &dyn Coordinator,
        connect: C,
        config: Config,
    ) -> Result<Self> {
        let root = coordinator.get_data(&config.meta_region_znode()).await?;
        let root_server = decode_server_name(&root)?;
        let master_server = match coordinator.get_data(&config.master_znode()).await {
            Ok(data) => match decode_server_name(&data) {
                Ok(server) => Some(server),
                Err(err) => {
                    warn!("unable to decode the master location: {err}");
                    None
                }
            },
            Err(err) => {
                warn!("unable to read the master location: {err}");
                None
            }
        };
        info!("meta region is on {root_server}, master is {master_server:?}");

        let client = Client::new_with_servers(connect, root_server, master_server, config);
        let root_server = client.inner.root_server.clone();
        client.region_connection(&root_server).await?;
        Ok(client)
    }

    /// Create a client for a cluster whose meta server (and master) are already known.
    pub fn new_with_servers(
        connect: C,
        root_server: impl Into<String>,
        master_server: Option<String>,
        config: Config,
    ) -> Self {
        Client {
            inner: Arc::new(ClientInner {
                connect,
                config,
                root_server: root_server.into(),
                master_server,
                region_cache: RegionCache::new(),
                connections: RwLock::new(HashMap::new()),
                master_connection: Mutex::new(None),
            }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Read a row. `Ok(None)` means the row has no cells.
    ///
    /// # Examples
    /// ```rust,no_run
    /// # use hbase_client::{Client, Get, Result};
    /// # async fn example() -> Result<()> {
    /// # let client = Client::new(vec!["zk1:2181"]).await?;
    /// let row = client.get("users", Get::new("alice").add_family("info")).await?;
    /// if let Some(row) = row {
    ///     let _email = row.value("info", "email");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get(&self, table: impl AsRef<[u8]>, get: Get) -> Result<Option<ResultRow>> {
        let response = self
            .action(table.as_ref(), &Action::Get(get), true)
            .await?
            .into_get()?;
        Ok(response
            .result
            .map(ResultRow::from)
            .filter(|row| !row.is_empty()))
    }

    /// Read many rows with one `Multi` call per server.
    ///
    /// Rows come back in no particular order; rows without cells are left out. Any failed action
    /// fails the whole call.
    pub async fn gets(&self, table: impl AsRef<[u8]>, gets: Vec<Get>) -> Result<Vec<ResultRow>> {
        let actions = gets.into_iter().map(Action::from).collect();
        let responses: Vec<_> = self.multi_action(table.as_ref(), actions).collect().await;
        collect_multi_results(responses)
    }

    /// Write one row.
    ///
    /// # Examples
    /// ```rust,no_run
    /// # use hbase_client::{Client, Put, Result};
    /// # async fn example() -> Result<()> {
    /// # let client = Client::new(vec!["zk1:2181"]).await?;
    /// let put = Put::new("alice").add_value("info", "email", "alice@example.com");
    /// client.put("users", put).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn put(&self, table: impl AsRef<[u8]>, put: Put) -> Result<()> {
        self.action(table.as_ref(), &Action::Put(put), true)
            .await?
            .into_mutate()?;
        Ok(())
    }

    /// Write many rows with one `Multi` call per server.
    pub async fn puts(&self, table: impl AsRef<[u8]>, puts: Vec<Put>) -> Result<()> {
        let actions = puts.into_iter().map(Action::from).collect();
        let responses: Vec<_> = self.multi_action(table.as_ref(), actions).collect().await;
        collect_multi_results(responses).map(|_| ())
    }

    pub async fn delete(&self, table: impl AsRef<[u8]>, delete: Delete) -> Result<()> {
        self.action(table.as_ref(), &Action::Delete(delete), true)
            .await?
            .into_mutate()?;
        Ok(())
    }

    /// List the tables known to the master, with their column families.
    pub async fn table_descriptors(&self) -> Result<Vec<TableInfo>> {
        let conn = self.master_connection().await?;
        let request = Request::GetTableDescriptors(pb::GetTableDescriptorsRequest::default());
        let response = match round_trip(&*conn, request).await {
            Err(err) if err.is_transport() => {
                let mut master = self.inner.master_connection.lock().await;
                if master.as_ref().is_some_and(|cached| Arc::ptr_eq(cached, &conn)) {
                    *master = None;
                }
                return Err(err);
            }
            response => response?.into_table_descriptors()?,
        };
        Ok(response
            .table_schema
            .into_iter()
            .map(TableInfo::from)
            .collect())
    }

    /// Send one action to the region owning its row, resending it on retryable failures.
    ///
    /// The first attempt consults the region cache when `use_cache` is set; every resend looks the
    /// region up again. At most `max_retries` resends are made, and the last failure is returned.
    pub async fn action(&self, table: &[u8], action: &Action, use_cache: bool) -> Result<Response> {
        let mut use_cache = use_cache;
        let mut attempt = 0;
        loop {
            let result = match self.locate_region(table, action.row(), use_cache).await {
                Ok(region) => {
                    self.send(&region, action.to_request(region.specifier()))
                        .await
                }
                Err(err) => Err(err),
            };
            match result {
                Err(err) if err.is_retryable() && attempt < self.inner.config.max_retries => {
                    attempt += 1;
                    use_cache = false;
                    info!(
                        "retrying action on row {} of {} (attempt {attempt}): {err}",
                        HexRepr(action.row()),
                        String::from_utf8_lossy(table)
                    );
                }
                result => return result,
            }
        }
    }

    /// Send `actions` grouped into one `Multi` call per server.
    ///
    /// The stream yields one item per server call, in completion order, and ends when every call
    /// has finished. A failed server call resends just the actions routed to that server, with
    /// fresh region lookups, up to `max_retries` times.
    pub fn multi_action(
        &self,
        table: &[u8],
        actions: Vec<Action>,
    ) -> BoxStream<'static, Result<pb::MultiResponse>> {
        let (tx, rx) = mpsc::unbounded_channel();
        let client = self.clone();
        let table = table.to_vec();
        tokio::spawn(async move {
            client.multi_action_inner(table, actions, true, 0, tx).await;
        });
        UnboundedReceiverStream::new(rx).boxed()
    }

    #[async_recursion]
    async fn multi_action_inner(
        &self,
        table: Vec<u8>,
        actions: Vec<Action>,
        use_cache: bool,
        attempt: usize,
        tx: MultiSender,
    ) {
        let mut located = Vec::with_capacity(actions.len());
        let mut pending = actions.into_iter();
        while let Some(action) = pending.next() {
            match self.locate_region(&table, action.row(), use_cache).await {
                Ok(region) => located.push((region, action)),
                Err(err) if err.is_retryable() && attempt < self.inner.config.max_retries => {
                    info!("locating regions of a multi action failed (attempt {attempt}): {err}");
                    let mut actions: Vec<Action> =
                        located.into_iter().map(|(_, action)| action).collect();
                    actions.push(action);
                    actions.extend(pending);
                    self.multi_action_inner(table, actions, false, attempt + 1, tx)
                        .await;
                    return;
                }
                Err(err) => {
                    let _ = tx.send(Err(err));
                    return;
                }
            }
        }

        for (server, regions) in group_by_server(located) {
            debug!(
                "sending actions for {} regions to {server} (attempt {attempt})",
                regions.len()
            );
            let client = self.clone();
            let table = table.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                client
                    .dispatch_server_group(table, server, regions, attempt, tx)
                    .await;
            });
        }
    }

    async fn dispatch_server_group(
        self,
        table: Vec<u8>,
        server: String,
        regions: BTreeMap<Vec<u8>, Vec<Action>>,
        attempt: usize,
        tx: MultiSender,
    ) {
        let request = Request::Multi(multi_request(&regions));
        let result = match self.region_connection(&server).await {
            Ok(conn) => self.round_trip(&server, &conn, request).await,
            Err(err) => Err(err),
        };

        match result.and_then(Response::into_multi) {
            Ok(response) => {
                let _ = tx.send(Ok(response));
            }
            Err(err) if err.is_retryable() && attempt < self.inner.config.max_retries => {
                let actions: Vec<Action> = regions.into_values().flatten().collect();
                info!(
                    "resubmitting {} actions sent to {server} (attempt {}): {err}",
                    actions.len(),
                    attempt + 1
                );
                self.multi_action_inner(table, actions, false, attempt + 1, tx)
                    .await;
            }
            Err(err) => {
                let _ = tx.send(Err(err));
            }
        }
    }

    /// Find the region of `table` that contains `row`.
    pub async fn locate_region(
        &self,
        table: &[u8],
        row: &[u8],
        use_cache: bool,
    ) -> Result<RegionInfo> {
        if table == META_TABLE_NAME {
            return Ok(self.meta_region());
        }

        self.prefetch_region_cache(table).await;
        if use_cache {
            if let Some(region) = self.inner.region_cache.get(table, row).await {
                return Ok(region);
            }
        }

        let key = create_region_name(table, row, "", true);
        let mut region = self.lookup_meta(table, row, key).await?;
        // The hashed key sorts before the name of a region starting exactly at `row`, so the
        // lookup lands on the preceding region.
        if let Some(found) = &region {
            if found.table() == table && !found.end_key.is_empty() && row >= found.end_key.as_slice()
            {
                let key = create_region_name(table, row, META_LOOKUP_NINES, false);
                region = self.lookup_meta(table, row, key).await?;
            }
        }

        match region {
            Some(region) if region.table() == table && region.contains(row) => {
                debug!(
                    "row {} of {} is in region {} on {}",
                    HexRepr(row),
                    String::from_utf8_lossy(table),
                    String::from_utf8_lossy(&region.name),
                    region.server
                );
                self.inner
                    .region_cache
                    .add_region(table, region.clone())
                    .await;
                Ok(region)
            }
            _ => Err(Error::RegionNotFound {
                table: table.to_vec(),
                row: row.to_vec(),
            }),
        }
    }

    /// Closest-row-before lookup of `key` in the meta table.
    async fn lookup_meta(&self, table: &[u8], row: &[u8], key: Vec<u8>) -> Result<Option<RegionInfo>> {
        let meta = self.meta_region();
        let get = Get::new(key).add_family("info").closest_row_before();
        let response = self
            .send(&meta, Action::Get(get).to_request(meta.specifier()))
            .await?
            .into_get()?;
        let Some(result) = response.result else {
            return Ok(None);
        };
        let meta_row = ResultRow::from(result);
        if meta_row.is_empty() {
            return Ok(None);
        }
        match RegionInfo::from_meta_row(&meta_row) {
            Ok(region) => Ok(Some(region)),
            Err(err) => {
                error!(
                    "unable to parse the region of row {} of {}: {err}",
                    HexRepr(row),
                    String::from_utf8_lossy(table)
                );
                Ok(None)
            }
        }
    }

    /// Load every region of `table` into the cache, once per table.
    ///
    /// Failures are logged; the table still counts as prefetched.
    async fn prefetch_region_cache(&self, table: &[u8]) {
        let marker = self.inner.region_cache.prefetch_marker(table).await;
        marker
            .get_or_init(|| async {
                let scan = Scan::new()
                    .with_start_row(table)
                    .with_stop_row(successor(table))
                    .add_family("info");
                let mut regions = Vec::new();
                let mut collect = |meta_row: ResultRow| match RegionInfo::from_meta_row(&meta_row) {
                    Ok(region) if region.table() == table => regions.push(region),
                    Ok(_) => {}
                    Err(err) => error!("skipping meta row during prefetch: {err}"),
                };
                let meta = self.meta_region();
                if let Err(err) = self
                    .scan_region(&meta, &scan.to_proto(), &mut collect)
                    .await
                {
                    warn!(
                        "prefetching regions of {} failed: {err}",
                        String::from_utf8_lossy(table)
                    );
                }
                debug!(
                    "prefetched {} regions of {}",
                    regions.len(),
                    String::from_utf8_lossy(table)
                );
                for region in regions {
                    self.inner.region_cache.add_region(table, region).await;
                }
            })
            .await;
    }

    pub(crate) fn meta_region(&self) -> RegionInfo {
        RegionInfo::meta(self.inner.root_server.clone())
    }

    /// Send `request` to the server of `region` and wait for the response.
    pub(crate) async fn send(&self, region: &RegionInfo, request: Request) -> Result<Response> {
        let conn = self.region_connection(&region.server).await?;
        self.round_trip(&region.server, &conn, request).await
    }

    /// Like [`round_trip`], but drops `conn` from the pool when it turns out to be broken.
    async fn round_trip(
        &self,
        server: &str,
        conn: &Arc<C::Connection>,
        request: Request,
    ) -> Result<Response> {
        let result = round_trip(&**conn, request).await;
        if let Err(err) = &result {
            if err.is_transport() {
                self.evict_connection(server, conn).await;
            }
        }
        result
    }

    /// The pooled connection to `server`, opened on first use.
    async fn region_connection(&self, server: &str) -> Result<Arc<C::Connection>> {
        if let Some(conn) = self.inner.connections.read().await.get(server) {
            return Ok(conn.clone());
        }

        let conn = Arc::new(self.inner.connect.connect(server, Service::Client).await?);
        let mut connections = self.inner.connections.write().await;
        // Another task may have connected meanwhile; keep the first connection.
        Ok(connections
            .entry(server.to_owned())
            .or_insert(conn)
            .clone())
    }

    /// Remove `conn` from the pool unless it was already replaced.
    async fn evict_connection(&self, server: &str, conn: &Arc<C::Connection>) {
        let mut connections = self.inner.connections.write().await;
        if connections
            .get(server)
            .is_some_and(|pooled| Arc::ptr_eq(pooled, conn))
        {
            connections.remove(server);
            info!("evicted connection to {server}");
        }
    }

    async fn master_connection(&self) -> Result<Arc<C::Connection>> {
        if let Some(conn) = self.inner.master_connection.lock().await.as_ref() {
            return Ok(conn.clone());
        }
        let address = self
            .inner
            .master_server
            .as_deref()
            .ok_or_else(|| Error::Coordinator {
                message: "the master location is unknown".to_owned(),
            })?;

        let conn = Arc::new(self.inner.connect.connect(address, Service::Master).await?);
        let mut master = self.inner.master_connection.lock().await;
        Ok(master.get_or_insert(conn).clone())
    }
}

/// Send `request` on `conn` and wait for its response.
async fn round_trip<T: RpcConnection>(conn: &T, request: Request) -> Result<Response> {
    let (call, result) = Call::new(request);
    if let Err(err) = conn.call(call).await {
        warn!("error while attempting call to {}: {err}", conn.address());
        return Err(err);
    }
    result.wait().await
}

/// Partition located actions by server, then by region.
fn group_by_server(located: Vec<(RegionInfo, Action)>) -> ServerGroups {
    let mut groups = ServerGroups::new();
    for (region, action) in located {
        groups
            .entry(region.server)
            .or_default()
            .entry(region.name)
            .or_default()
            .push(action);
    }
    groups
}

fn multi_request(regions: &BTreeMap<Vec<u8>, Vec<Action>>) -> pb::MultiRequest {
    pb::MultiRequest {
        region_action: regions
            .iter()
            .map(|(name, actions)| pb::RegionAction {
                region: region_specifier(name),
                atomic: None,
                action: actions
                    .iter()
                    .enumerate()
                    .map(|(index, action)| action.to_indexed(index as u32))
                    .collect(),
            })
            .collect(),
        nonce_group: None,
    }
}

fn collect_multi_results(responses: Vec<Result<pb::MultiResponse>>) -> Result<Vec<ResultRow>> {
    let mut rows = Vec::new();
    let mut errors = Vec::new();
    for response in responses {
        let response = match response {
            Ok(response) => response,
            Err(err) => {
                errors.push(err);
                continue;
            }
        };
        for region_result in response.region_action_result {
            if let Some(exception) = region_result.exception {
                errors.push(region_action_failed(exception));
                continue;
            }
            for item in region_result.result_or_exception {
                if let Some(exception) = item.exception {
                    errors.push(region_action_failed(exception));
                } else if let Some(result) = item.result {
                    let row = ResultRow::from(result);
                    if !row.is_empty() {
                        rows.push(row);
                    }
                }
            }
        }
    }

    if errors.len() == 1 {
        if let Some(err) = errors.pop() {
            return Err(err);
        }
    }
    if errors.is_empty() {
        Ok(rows)
    } else {
        Err(Error::MultipleErrors(errors))
    }
}

fn region_action_failed(exception: pb::NameBytesPair) -> Error {
    Error::RegionActionFailed {
        message: format!(
            "{}: {}",
            exception.name,
            String::from_utf8_lossy(&exception.value.unwrap_or_default())
        ),
    }
}
