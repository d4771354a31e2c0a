// Copyright 2019 TiKV Project Authors. Licensed under Apache-2.0.

//! Bootstrap discovery: where the meta region and the master live.
//!
//! The cluster publishes both locations as znodes in ZooKeeper. [`ZkCoordinator`] opens a
//! session, reads them once, and lets the session go.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Buf;
use log::debug;
use prost::Message;
use zookeeper_client as zk;

use crate::proto::pb;
use crate::Error;
use crate::Result;

const ZNODE_MAGIC: u8 = 0xff;
const PB_MAGIC_LEN: usize = 4;

/// A source of znode data.
#[async_trait]
pub trait Coordinator: Send + Sync {
    async fn get_data(&self, path: &str) -> Result<Vec<u8>>;
}

/// Reads znodes from a ZooKeeper ensemble.
///
/// Hosts are `host:port` strings; a chroot suffix on the last one (`zk3:2181/apps`) applies to
/// the whole ensemble.
#[derive(Clone, Debug)]
pub struct ZkCoordinator {
    hosts: Vec<String>,
    session_timeout: Duration,
}

impl ZkCoordinator {
    pub fn new<S: Into<String>>(
        hosts: impl IntoIterator<Item = S>,
        session_timeout: Duration,
    ) -> ZkCoordinator {
        ZkCoordinator {
            hosts: hosts.into_iter().map(Into::into).collect(),
            session_timeout,
        }
    }

    fn cluster(&self) -> Result<String> {
        if self.hosts.is_empty() {
            return Err(coordinator_err("no coordination hosts configured".to_owned()));
        }
        Ok(self.hosts.join(","))
    }

    async fn connect(&self) -> Result<zk::Client> {
        let cluster = self.cluster()?;
        debug!("opening a ZooKeeper session on {cluster}");
        zk::Client::connector()
            .session_timeout(self.session_timeout)
            .connect(&cluster)
            .await
            .map_err(|err| coordinator_err(format!("unable to connect to {cluster}: {err}")))
    }
}

#[async_trait]
impl Coordinator for ZkCoordinator {
    async fn get_data(&self, path: &str) -> Result<Vec<u8>> {
        let client = self.connect().await?;
        match client.get_data(path).await {
            Ok((data, _stat)) => Ok(data),
            Err(zk::Error::NoNode) => Err(coordinator_err(format!("znode {path} does not exist"))),
            Err(err) => Err(coordinator_err(format!("reading {path} failed: {err}"))),
        }
    }
}

/// Decode the server name stored in the meta-region-server or master znode.
///
/// Layout: magic byte `0xff`, 4-byte big-endian id length, the id, the `PBUF` marker, then a
/// message whose field 1 is a `ServerName`.
pub fn decode_server_name(data: &[u8]) -> Result<String> {
    let mut buf = data;
    if buf.first() != Some(&ZNODE_MAGIC) {
        return Err(coordinator_err("znode data has no magic byte".to_owned()));
    }
    buf.advance(1);
    if buf.remaining() < 4 {
        return Err(coordinator_err("znode data is truncated".to_owned()));
    }
    let id_len = buf.get_u32() as usize;
    let skip = id_len + PB_MAGIC_LEN;
    if buf.remaining() < skip {
        return Err(coordinator_err("znode data is truncated".to_owned()));
    }
    buf.advance(skip);

    let server = pb::MetaRegionServer::decode(buf)?.server;
    Ok(server_address(&server))
}

pub(crate) fn server_address(server: &pb::ServerName) -> String {
    format!("{}:{}", server.host_name, server.port.unwrap_or_default())
}

fn coordinator_err(message: String) -> Error {
    Error::Coordinator { message }
}

/// Fixed znode contents, for tests and for clusters whose locations are known up front.
#[derive(Clone, Debug, Default)]
pub struct StaticCoordinator {
    znodes: std::collections::HashMap<String, Vec<u8>>,
}

impl StaticCoordinator {
    pub fn new() -> StaticCoordinator {
        StaticCoordinator::default()
    }

    /// Publish `host:port` at `path` in the znode format region servers write.
    #[must_use]
    pub fn with_server(mut self, path: impl Into<String>, host: &str, port: u32) -> Self {
        self.znodes.insert(path.into(), encode_server_name(host, port));
        self
    }
}

#[async_trait]
impl Coordinator for StaticCoordinator {
    async fn get_data(&self, path: &str) -> Result<Vec<u8>> {
        self.znodes
            .get(path)
            .cloned()
            .ok_or_else(|| coordinator_err(format!("znode {path} does not exist")))
    }
}

fn encode_server_name(host: &str, port: u32) -> Vec<u8> {
    let id = b"hbase-client";
    let mut data = vec![ZNODE_MAGIC];
    data.extend((id.len() as u32).to_be_bytes());
    data.extend(id);
    data.extend(b"PBUF");
    let server = pb::MetaRegionServer {
        server: pb::ServerName {
            host_name: host.to_owned(),
            port: Some(port),
            start_code: None,
        },
        rpc_version: None,
    };
    data.extend(server.encode_to_vec());
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_server_name_znode() {
        let data = encode_server_name("rs1.example.com", 16020);
        assert_eq!(decode_server_name(&data).unwrap(), "rs1.example.com:16020");
    }

    #[test]
    fn decodes_master_znode() {
        let master = pb::Master {
            master: pb::ServerName {
                host_name: "master".to_owned(),
                port: Some(16000),
                start_code: Some(1),
            },
            rpc_version: Some(0),
            info_port: Some(16010),
        };
        let mut data = vec![ZNODE_MAGIC, 0, 0, 0, 2, b'i', b'd'];
        data.extend(b"PBUF");
        data.extend(master.encode_to_vec());
        assert_eq!(decode_server_name(&data).unwrap(), "master:16000");
    }

    #[test]
    fn rejects_malformed_znodes() {
        assert!(matches!(
            decode_server_name(b""),
            Err(Error::Coordinator { .. })
        ));
        assert!(matches!(
            decode_server_name(b"\x00abc"),
            Err(Error::Coordinator { .. })
        ));
        assert!(matches!(
            decode_server_name(&[ZNODE_MAGIC, 0, 0]),
            Err(Error::Coordinator { .. })
        ));
        assert!(matches!(
            decode_server_name(&[ZNODE_MAGIC, 0, 0, 0, 9, 1]),
            Err(Error::Coordinator { .. })
        ));
    }

    #[tokio::test]
    async fn static_coordinator_serves_known_paths() {
        let coordinator = StaticCoordinator::new().with_server("/hbase/master", "m", 1);
        let data = coordinator.get_data("/hbase/master").await.unwrap();
        assert_eq!(decode_server_name(&data).unwrap(), "m:1");
        assert!(coordinator.get_data("/hbase/other").await.is_err());
    }

    #[test]
    fn ensemble_is_joined_into_one_connect_string() {
        let coordinator =
            ZkCoordinator::new(["zk1:2181", "zk2:2181/apps"], Duration::from_secs(30));
        assert_eq!(coordinator.cluster().unwrap(), "zk1:2181,zk2:2181/apps");
    }

    #[tokio::test]
    async fn empty_ensemble_is_a_coordinator_error() {
        let coordinator = ZkCoordinator::new(Vec::<String>::new(), Duration::from_secs(30));
        assert!(matches!(
            coordinator.get_data("/hbase/master").await,
            Err(Error::Coordinator { .. })
        ));
    }
}
