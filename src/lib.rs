// Copyright 2018 TiKV Project Authors. Licensed under Apache-2.0.

//! This crate provides a native client for [HBase](https://hbase.apache.org) region servers.
//!
//! The client speaks the region server RPC protocol directly: protobuf messages in length-prefixed
//! frames over TCP, many calls multiplexed on one connection per server. It finds the server
//! holding a row through the `hbase:meta` table, caches region locations, and resends failed
//! actions to freshly located regions.
//!
//! The cluster is found through ZooKeeper: the meta region's server and the active master are
//! read from their znodes once, when the [`Client`] is created.
//!
//! ## Usage
//!
//! ```rust,no_run
//! # use hbase_client::{Client, Get, Put, Result, Scan};
//! # async fn example() -> Result<()> {
//! let client = Client::new(vec!["zk1:2181"]).await?;
//!
//! client
//!     .put("users", Put::new("alice").add_value("info", "email", "alice@example.com"))
//!     .await?;
//! let row = client.get("users", Get::new("alice")).await?;
//! assert!(row.is_some());
//!
//! let rows = client.scan("users", Scan::new().with_start_row("a")).await?;
//! # let _ = rows;
//! # Ok(())
//! # }
//! ```
//!
//! Batches go through [`Client::gets`] and [`Client::puts`], which send one `Multi` call per
//! server. The lower-level [`Client::action`] and [`Client::multi_action`] expose the raw protocol
//! responses.

#![allow(clippy::field_reassign_with_default)]

mod client;
mod common;
mod config;
mod coordinator;
mod kv;
mod proto;
mod region;
mod region_cache;
mod scan;
mod store;

#[cfg(any(test, feature = "test-util"))]
#[cfg_attr(feature = "test-util", allow(dead_code))]
mod mock;

/// Test utilities (feature-gated).
#[cfg(feature = "test-util")]
pub mod test_util {
    pub use super::mock::MockCall;
    pub use super::mock::MockConnect;
    pub use super::mock::MockConnection;
}

#[doc(hidden)]
pub mod pb {
    pub use crate::proto::pb::*;
}

#[doc(inline)]
pub use common::Error;
#[doc(inline)]
pub use common::Result;
#[doc(inline)]
pub use config::Config;

#[doc(inline)]
pub use crate::client::Client;
#[doc(inline)]
pub use crate::client::TableInfo;
#[doc(inline)]
pub use crate::coordinator::decode_server_name;
#[doc(inline)]
pub use crate::coordinator::Coordinator;
#[doc(inline)]
pub use crate::coordinator::StaticCoordinator;
#[doc(inline)]
pub use crate::coordinator::ZkCoordinator;
#[doc(inline)]
pub use crate::kv::Action;
#[doc(inline)]
pub use crate::kv::Column;
#[doc(inline)]
pub use crate::kv::Delete;
#[doc(inline)]
pub use crate::kv::Get;
#[doc(inline)]
pub use crate::kv::Put;
#[doc(inline)]
pub use crate::kv::ResultRow;
#[doc(inline)]
pub use crate::region::create_region_name;
#[doc(inline)]
pub use crate::region::RegionInfo;
#[doc(inline)]
pub use crate::region::META_REGION_NAME;
#[doc(inline)]
pub use crate::region::META_TABLE_NAME;
#[doc(inline)]
pub use crate::scan::Scan;
#[doc(inline)]
pub use crate::store::Call;
#[doc(inline)]
pub use crate::store::CallResult;
#[doc(inline)]
pub use crate::store::Connect;
#[doc(inline)]
pub use crate::store::Connection;
#[doc(inline)]
pub use crate::store::Request;
#[doc(inline)]
pub use crate::store::Response;
#[doc(inline)]
pub use crate::store::RpcConnection;
#[doc(inline)]
pub use crate::store::Service;
#[doc(inline)]
pub use crate::store::TcpConnect;
