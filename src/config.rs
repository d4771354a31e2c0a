// Copyright 2019 TiKV Project Authors. Licensed under Apache-2.0.

use std::time::Duration;

use serde_derive::Deserialize;
use serde_derive::Serialize;

/// The configuration for a [`Client`](crate::Client).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// The effective user sent in every connection header.
    pub user: String,
    /// Parent znode of the cluster (`zookeeper.znode.parent`).
    pub zk_root: String,
    /// Znode, relative to `zk_root`, holding the location of the meta region.
    pub meta_region_path: String,
    /// Znode, relative to `zk_root`, holding the location of the active master.
    pub master_path: String,
    /// How many times a failed action is resent after the first attempt.
    pub max_retries: usize,
    pub zk_session_timeout: Duration,
    /// Rows fetched per `Scan` round trip.
    pub scan_batch_size: u32,
}

const DEFAULT_ZK_ROOT: &str = "/hbase";
const DEFAULT_META_REGION_PATH: &str = "/meta-region-server";
const DEFAULT_MASTER_PATH: &str = "/master";
const DEFAULT_MAX_RETRIES: usize = 3;
const DEFAULT_ZK_SESSION_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_SCAN_BATCH_SIZE: u32 = 100;

impl Default for Config {
    fn default() -> Self {
        Config {
            user: String::new(),
            zk_root: DEFAULT_ZK_ROOT.to_owned(),
            meta_region_path: DEFAULT_META_REGION_PATH.to_owned(),
            master_path: DEFAULT_MASTER_PATH.to_owned(),
            max_retries: DEFAULT_MAX_RETRIES,
            zk_session_timeout: DEFAULT_ZK_SESSION_TIMEOUT,
            scan_batch_size: DEFAULT_SCAN_BATCH_SIZE,
        }
    }
}

impl Config {
    /// Set the effective user the client identifies itself as.
    ///
    /// The user is carried in the connection header of every region server and master
    /// connection. No other authentication is performed.
    ///
    /// # Examples
    /// ```rust
    /// # use hbase_client::Config;
    /// let config = Config::default().with_user("hadoop");
    /// ```
    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// Set the parent znode of the cluster. The default is `/hbase`.
    #[must_use]
    pub fn with_zk_root(mut self, zk_root: impl Into<String>) -> Self {
        self.zk_root = zk_root.into();
        self
    }

    /// Set how many times a failed action is resent.
    ///
    /// Every resend bypasses the region cache. There is no delay between attempts.
    ///
    /// # Examples
    /// ```rust
    /// # use hbase_client::Config;
    /// let config = Config::default().with_max_retries(5);
    /// assert_eq!(config.max_retries, 5);
    /// ```
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub fn with_zk_session_timeout(mut self, timeout: Duration) -> Self {
        self.zk_session_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_scan_batch_size(mut self, scan_batch_size: u32) -> Self {
        self.scan_batch_size = scan_batch_size;
        self
    }

    pub(crate) fn meta_region_znode(&self) -> String {
        format!("{}{}", self.zk_root, self.meta_region_path)
    }

    pub(crate) fn master_znode(&self) -> String {
        format!("{}{}", self.zk_root, self.master_path)
    }
}
