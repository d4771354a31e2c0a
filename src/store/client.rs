// Copyright 2020 TiKV Project Authors. Licensed under Apache-2.0.

use async_trait::async_trait;
use derive_new::new;

use super::Call;
use super::Connection;
use super::Service;
use crate::Result;

/// A trait for connecting to region servers and the master.
#[async_trait]
pub trait Connect: Sized + Send + Sync + 'static {
    type Connection: RpcConnection;

    async fn connect(&self, address: &str, service: Service) -> Result<Self::Connection>;
}

/// An open connection that calls can be sent on.
#[async_trait]
pub trait RpcConnection: Send + Sync + 'static {
    fn address(&self) -> &str;

    /// Send `call`; its outcome arrives through the call's result slot.
    ///
    /// An `Err` means the connection is unusable. The call has been completed with a failure
    /// in that case.
    async fn call(&self, call: Call) -> Result<()>;
}

/// Connects over TCP, identifying as `user`.
#[derive(new, Clone)]
pub struct TcpConnect {
    user: String,
}

#[async_trait]
impl Connect for TcpConnect {
    type Connection = Connection;

    async fn connect(&self, address: &str, service: Service) -> Result<Connection> {
        Connection::connect(address, &self.user, service).await
    }
}

#[async_trait]
impl RpcConnection for Connection {
    fn address(&self) -> &str {
        Connection::address(self)
    }

    async fn call(&self, call: Call) -> Result<()> {
        Connection::call(self, call).await
    }
}
