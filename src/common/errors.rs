// Copyright 2018 TiKV Project Authors. Licensed under Apache-2.0.

use std::result;

use thiserror::Error;

use crate::kv::HexRepr;

/// An error originating from the HBase client or its dependencies.
#[derive(Debug, Error)]
pub enum Error {
    /// The region server answered a call with an exception.
    #[error("Exception returned: {class_name}\n{stack_trace}")]
    Remote {
        class_name: String,
        stack_trace: String,
    },
    /// Wraps a `std::io::Error` raised by a socket read or write.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The connection to `address` is gone; the call never got a response.
    #[error("Connection to {address} is closed")]
    ConnectionClosed { address: String },
    /// The result slot of a call was dropped before it was completed.
    #[error("Call result channel was closed: {0}")]
    Canceled(#[from] tokio::sync::oneshot::error::RecvError),
    /// A protobuf payload could not be decoded.
    #[error("Decode error: {0}")]
    Decode(#[from] prost::DecodeError),
    /// A protobuf payload could not be encoded.
    #[error("Encode error: {0}")]
    Encode(#[from] prost::EncodeError),
    /// The peer broke the framing or correlation rules of the RPC protocol.
    #[error("Protocol violation: {message}")]
    ProtocolViolation { message: String },
    /// No region could be located for the row.
    #[error("Region is not found for table {} row {}", String::from_utf8_lossy(table), HexRepr(row))]
    RegionNotFound { table: Vec<u8>, row: Vec<u8> },
    /// A region or a single action inside a `Multi` call failed.
    #[error("Region action failed: {message}")]
    RegionActionFailed { message: String },
    /// The coordination service could not provide a bootstrap address.
    #[error("Coordinator error: {message}")]
    Coordinator { message: String },
    /// Multiple errors collected from a fan-out.
    #[error("Multiple errors: {0:?}")]
    MultipleErrors(Vec<Error>),
    #[error("{}", message)]
    InternalError { message: String },
}

/// A result holding an [`Error`](enum@Error).
pub type Result<T> = result::Result<T, Error>;

impl Error {
    /// Whether a failed action may succeed when resent to a freshly located region.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Remote { .. }
                | Error::Io(_)
                | Error::ConnectionClosed { .. }
                | Error::Canceled(_)
        )
    }

    /// Whether the error means the connection that produced it can no longer be used.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Io(_) | Error::ConnectionClosed { .. })
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! internal_err {
    ($e:expr) => ({
        $crate::Error::InternalError {
            message: format!("[{}:{}]: {}", file!(), line!(),  $e)
        }
    });
    ($f:tt, $($arg:expr),+) => ({
        $crate::internal_err!(format!($f, $($arg),+))
    });
}
