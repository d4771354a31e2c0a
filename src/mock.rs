// Copyright 2020 TiKV Project Authors. Licensed under Apache-2.0.

//! In-memory connections that answer calls with a user-supplied hook.

use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use crate::store::Call;
use crate::store::Connect;
use crate::store::Request;
use crate::store::Response;
use crate::store::RpcConnection;
use crate::store::Service;
use crate::Error;
use crate::Result;

type DispatchHook = dyn Fn(&str, &Request) -> Result<Response> + Send + Sync;

/// A request seen by a [`MockConnection`].
#[derive(Clone, Debug)]
pub struct MockCall {
    pub address: String,
    pub connection_id: u64,
    pub request: Request,
}

struct MockState {
    dispatch_hook: Box<DispatchHook>,
    next_connection_id: AtomicU64,
    connects: Mutex<Vec<(String, Service)>>,
    calls: Mutex<Vec<MockCall>>,
}

/// Hands out [`MockConnection`]s that share one dispatch hook and one call log.
#[derive(Clone)]
pub struct MockConnect {
    state: Arc<MockState>,
}

impl MockConnect {
    /// `hook` receives the server address and the request. An `Io` error is reported as a send
    /// failure; any other result completes the call.
    pub fn with_dispatch_hook<F>(hook: F) -> MockConnect
    where
        F: Fn(&str, &Request) -> Result<Response> + Send + Sync + 'static,
    {
        MockConnect {
            state: Arc::new(MockState {
                dispatch_hook: Box::new(hook),
                next_connection_id: AtomicU64::new(1),
                connects: Mutex::new(Vec::new()),
                calls: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Every connection opened so far, in order.
    pub fn connects(&self) -> Vec<(String, Service)> {
        self.state
            .connects
            .lock()
            .map(|connects| connects.clone())
            .unwrap_or_default()
    }

    /// Every call sent so far, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.state
            .calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Connect for MockConnect {
    type Connection = MockConnection;

    async fn connect(&self, address: &str, service: Service) -> Result<MockConnection> {
        if let Ok(mut connects) = self.state.connects.lock() {
            connects.push((address.to_owned(), service));
        }
        Ok(MockConnection {
            id: self.state.next_connection_id.fetch_add(1, Ordering::Relaxed),
            address: address.to_owned(),
            state: self.state.clone(),
        })
    }
}

pub struct MockConnection {
    id: u64,
    address: String,
    state: Arc<MockState>,
}

#[async_trait]
impl RpcConnection for MockConnection {
    fn address(&self) -> &str {
        &self.address
    }

    async fn call(&self, call: Call) -> Result<()> {
        if let Ok(mut calls) = self.state.calls.lock() {
            calls.push(MockCall {
                address: self.address.clone(),
                connection_id: self.id,
                request: call.request().clone(),
            });
        }
        match (self.state.dispatch_hook)(&self.address, call.request()) {
            Ok(response) => call.complete(Ok(Some(Bytes::from(response.encode_payload())))),
            Err(Error::Io(err)) => {
                call.complete(Err(Error::ConnectionClosed {
                    address: self.address.clone(),
                }));
                return Err(Error::Io(err));
            }
            Err(err) => call.complete(Err(err)),
        }
        Ok(())
    }
}
