// Copyright 2019 TiKV Project Authors. Licensed under Apache-2.0.

mod call;
mod client;
mod codec;
mod connection;

pub use self::call::Call;
pub use self::call::CallResult;
pub use self::call::Request;
pub use self::call::Response;
pub use self::client::Connect;
pub use self::client::RpcConnection;
pub use self::client::TcpConnect;
pub use self::codec::Service;
pub use self::connection::Connection;
