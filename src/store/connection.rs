// Copyright 2026 TiKV Project Authors. Licensed under Apache-2.0.

use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicU32;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use log::debug;
use log::info;
use log::warn;
use tokio::io::AsyncWriteExt;
use tokio::net::tcp::OwnedReadHalf;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use super::codec;
use super::codec::Service;
use super::Call;
use crate::Error;
use crate::Result;

static CONNECTION_IDS: AtomicU64 = AtomicU64::new(1);

/// State shared between a connection and its read loop.
struct ConnectionState {
    address: String,
    inflight: Mutex<HashMap<u32, Call>>,
    closed: AtomicBool,
}

impl ConnectionState {
    fn closed_error(&self) -> Error {
        Error::ConnectionClosed {
            address: self.address.clone(),
        }
    }

    /// Mark the connection closed and fail every pending call.
    ///
    /// `closed` is flipped under the in-flight lock, so no call can be registered after the drain.
    async fn fail_all_inflight(&self) {
        let drained: Vec<Call> = {
            let mut inflight = self.inflight.lock().await;
            self.closed.store(true, Ordering::Release);
            inflight.drain().map(|(_, call)| call).collect()
        };
        if !drained.is_empty() {
            warn!(
                "failing {} pending calls on closed connection to {}",
                drained.len(),
                self.address
            );
        }
        for call in drained {
            call.complete(Err(self.closed_error()));
        }
    }
}

/// One socket to one server.
///
/// Calls are multiplexed: each gets a fresh id, and the read loop matches responses back to calls
/// by id in whatever order they arrive.
pub struct Connection {
    id: u64,
    state: Arc<ConnectionState>,
    writer: Mutex<OwnedWriteHalf>,
    next_call_id: AtomicU32,
    read_loop: JoinHandle<()>,
}

impl Connection {
    /// Open a socket to `address`, send the preamble for `service` and start the read loop.
    pub async fn connect(address: &str, user: &str, service: Service) -> Result<Connection> {
        let stream = TcpStream::connect(address).await?;
        stream.set_nodelay(true)?;
        let (reader, mut writer) = stream.into_split();

        let preamble = codec::encode_preamble(user, service)?;
        writer.write_all(&preamble).await?;

        let id = CONNECTION_IDS.fetch_add(1, Ordering::Relaxed);
        let state = Arc::new(ConnectionState {
            address: address.to_owned(),
            inflight: Mutex::new(HashMap::new()),
            closed: AtomicBool::new(false),
        });
        let read_loop = tokio::spawn(run_read_loop(state.clone(), reader));
        info!("connection {id} to {address} opened for {}", service.name());

        Ok(Connection {
            id,
            state,
            writer: Mutex::new(writer),
            next_call_id: AtomicU32::new(1),
            read_loop,
        })
    }

    /// Process-unique identity of this connection.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn address(&self) -> &str {
        &self.state.address
    }

    pub fn is_closed(&self) -> bool {
        self.state.closed.load(Ordering::Acquire)
    }

    /// Send `call`. The outcome is delivered through the call's result slot.
    ///
    /// On failure the call has already been completed with a transport error, and an error is
    /// returned as well so the caller can drop this connection. Nothing is retried here.
    pub async fn call(&self, mut call: Call) -> Result<()> {
        let call_id = self.next_call_id.fetch_add(1, Ordering::Relaxed);
        call.set_id(call_id);
        let frame = match call.request().encode_frame(call_id) {
            Ok(frame) => frame,
            Err(err) => {
                let message = err.to_string();
                call.complete(Err(Error::InternalError {
                    message: message.clone(),
                }));
                return Err(Error::InternalError { message });
            }
        };

        {
            let mut inflight = self.state.inflight.lock().await;
            if self.is_closed() {
                drop(inflight);
                call.complete(Err(self.state.closed_error()));
                return Err(self.state.closed_error());
            }
            debug!(
                "sending {} call {call_id} to {}",
                call.request().method_name(),
                self.state.address
            );
            inflight.insert(call_id, call);
        }

        let mut writer = self.writer.lock().await;
        if let Err(err) = writer.write_all(&frame).await {
            drop(writer);
            warn!("write to {} failed: {err}", self.state.address);
            // A partially written frame leaves the stream unusable.
            self.state.fail_all_inflight().await;
            self.read_loop.abort();
            return Err(err.into());
        }
        Ok(())
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.read_loop.abort();
    }
}

async fn run_read_loop(state: Arc<ConnectionState>, mut reader: OwnedReadHalf) {
    let reason = loop {
        let body = match codec::read_frame(&mut reader).await {
            Ok(body) => body,
            Err(err) => break err,
        };
        let response = match codec::decode_response(body) {
            Ok(Some(response)) => response,
            Ok(None) => continue,
            Err(err) => break err,
        };

        let call_id = response.header.call_id.unwrap_or_default();
        let call = state.inflight.lock().await.remove(&call_id);
        let Some(call) = call else {
            break Error::ProtocolViolation {
                message: format!("response for unknown call id {call_id}"),
            };
        };

        match response.header.exception {
            Some(exception) => call.complete(Err(Error::Remote {
                class_name: exception.exception_class_name.unwrap_or_default(),
                stack_trace: exception.stack_trace.unwrap_or_default(),
            })),
            None => call.complete(Ok(response.payload)),
        }
    };

    warn!("connection to {} closed: {reason}", state.address);
    state.fail_all_inflight().await;
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use prost::Message;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    use super::*;
    use crate::proto::pb;
    use crate::store::codec::encode_response;
    use crate::store::Request;
    use crate::store::Response;

    /// Accept one connection, consume the preamble, and hand back the socket.
    async fn accept(listener: &TcpListener) -> TcpStream {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut fixed = [0u8; 10];
        socket.read_exact(&mut fixed).await.unwrap();
        assert_eq!(&fixed[..6], b"HBas\x00\x50");
        let len = u32::from_be_bytes([fixed[6], fixed[7], fixed[8], fixed[9]]) as usize;
        let mut header = vec![0; len];
        socket.read_exact(&mut header).await.unwrap();
        socket
    }

    /// Read one request frame and return its header.
    async fn read_request(socket: &mut TcpStream) -> pb::RequestHeader {
        let body = codec::read_frame(socket).await.unwrap();
        let parts = codec::split_frame(body).unwrap();
        pb::RequestHeader::decode(parts[0].clone()).unwrap()
    }

    fn get_response(value: &[u8]) -> pb::GetResponse {
        pb::GetResponse {
            result: Some(pb::Result {
                cell: vec![crate::kv::cell(b"r", "cf", "q", 1, value)],
                ..Default::default()
            }),
        }
    }

    async fn setup() -> (TcpListener, String) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();
        (listener, address)
    }

    #[tokio::test]
    async fn responses_are_matched_by_call_id() {
        let (listener, address) = setup().await;
        let server = tokio::spawn(async move {
            let mut socket = accept(&listener).await;
            let first = read_request(&mut socket).await;
            let second = read_request(&mut socket).await;
            assert_eq!(first.call_id, Some(1));
            assert_eq!(second.call_id, Some(2));
            // Answer in reverse order.
            let b = encode_response(2, None, Some(&get_response(b"second")));
            let a = encode_response(1, None, Some(&get_response(b"first")));
            socket.write_all(&b).await.unwrap();
            socket.write_all(&a).await.unwrap();
            socket
        });

        let conn = Connection::connect(&address, "tester", Service::Client)
            .await
            .unwrap();
        let (first, first_result) = Call::new(Request::Get(Default::default()));
        let (second, second_result) = Call::new(Request::Get(Default::default()));
        conn.call(first).await.unwrap();
        conn.call(second).await.unwrap();

        assert_eq!(
            first_result.wait().await.unwrap(),
            Response::Get(get_response(b"first"))
        );
        assert_eq!(
            second_result.wait().await.unwrap(),
            Response::Get(get_response(b"second"))
        );
        let _socket = server.await.unwrap();
    }

    #[tokio::test]
    async fn exception_and_header_only_responses() {
        let (listener, address) = setup().await;
        let server = tokio::spawn(async move {
            let mut socket = accept(&listener).await;
            read_request(&mut socket).await;
            read_request(&mut socket).await;
            let exception = pb::ExceptionResponse {
                exception_class_name: Some(
                    "org.apache.hadoop.hbase.NotServingRegionException".to_owned(),
                ),
                stack_trace: Some("trace".to_owned()),
                ..Default::default()
            };
            let failed = encode_response::<pb::GetResponse>(1, Some(exception), None);
            let empty = encode_response::<pb::MutateResponse>(2, None, None);
            socket.write_all(&failed).await.unwrap();
            socket.write_all(&empty).await.unwrap();
            socket
        });

        let conn = Connection::connect(&address, "tester", Service::Client)
            .await
            .unwrap();
        let (get, get_result) = Call::new(Request::Get(Default::default()));
        let (mutate, mutate_result) = Call::new(Request::Mutate(Default::default()));
        conn.call(get).await.unwrap();
        conn.call(mutate).await.unwrap();

        let Err(Error::Remote { class_name, .. }) = get_result.wait().await else {
            panic!("expected Error::Remote");
        };
        assert_eq!(class_name, "org.apache.hadoop.hbase.NotServingRegionException");
        assert_eq!(
            mutate_result.wait().await.unwrap(),
            Response::Mutate(Default::default())
        );
        let _socket = server.await.unwrap();
    }

    #[tokio::test]
    async fn unknown_call_id_fails_pending_calls_and_closes() {
        let (listener, address) = setup().await;
        let server = tokio::spawn(async move {
            let mut socket = accept(&listener).await;
            read_request(&mut socket).await;
            let bogus = encode_response(99, None, Some(&get_response(b"x")));
            socket.write_all(&bogus).await.unwrap();
            socket
        });

        let conn = Connection::connect(&address, "tester", Service::Client)
            .await
            .unwrap();
        let (call, result) = Call::new(Request::Get(Default::default()));
        conn.call(call).await.unwrap();
        assert!(matches!(
            result.wait().await,
            Err(Error::ConnectionClosed { .. })
        ));
        assert!(conn.is_closed());

        let (late, late_result) = Call::new(Request::Get(Default::default()));
        assert!(matches!(
            conn.call(late).await,
            Err(Error::ConnectionClosed { .. })
        ));
        assert!(matches!(
            late_result.wait().await,
            Err(Error::ConnectionClosed { .. })
        ));
        let _socket = server.await.unwrap();
    }

    #[tokio::test]
    async fn peer_close_fails_pending_calls() {
        let (listener, address) = setup().await;
        let server = tokio::spawn(async move {
            let mut socket = accept(&listener).await;
            read_request(&mut socket).await;
            // Half a frame, then EOF.
            socket.write_all(&[0, 0, 0, 10, 1]).await.unwrap();
        });

        let conn = Connection::connect(&address, "tester", Service::Client)
            .await
            .unwrap();
        let (call, result) = Call::new(Request::Get(Default::default()));
        conn.call(call).await.unwrap();
        server.await.unwrap();
        assert!(matches!(
            result.wait().await,
            Err(Error::ConnectionClosed { .. })
        ));
        assert!(conn.is_closed());
    }

    #[tokio::test]
    async fn empty_frames_are_ignored() {
        let (listener, address) = setup().await;
        let server = tokio::spawn(async move {
            let mut socket = accept(&listener).await;
            read_request(&mut socket).await;
            socket.write_all(&[0, 0, 0, 0]).await.unwrap();
            let frame = encode_response(1, None, Some(&get_response(b"v")));
            socket.write_all(&frame).await.unwrap();
            socket
        });

        let conn = Connection::connect(&address, "tester", Service::Client)
            .await
            .unwrap();
        let (call, result) = Call::new(Request::Get(Default::default()));
        conn.call(call).await.unwrap();
        let response = result.wait().await.unwrap().into_get().unwrap();
        assert_eq!(
            response.result.unwrap().cell[0].value,
            Some(Bytes::from_static(b"v").to_vec())
        );
        assert!(!conn.is_closed());
        let _socket = server.await.unwrap();
    }

    fn get_request(row: &[u8]) -> Request {
        Request::Get(pb::GetRequest {
            get: pb::Get {
                row: row.to_vec(),
                ..Default::default()
            },
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn concurrent_calls_get_their_own_responses() {
        const CALLS: usize = 32;
        let (listener, address) = setup().await;
        let server = tokio::spawn(async move {
            let mut socket = accept(&listener).await;
            let mut requests = Vec::with_capacity(CALLS);
            for _ in 0..CALLS {
                let body = codec::read_frame(&mut socket).await.unwrap();
                let parts = codec::split_frame(body).unwrap();
                let header = pb::RequestHeader::decode(parts[0].clone()).unwrap();
                let param = pb::GetRequest::decode(parts[1].clone()).unwrap();
                requests.push((header.call_id.unwrap(), param.get.row));
            }
            let mut ids: Vec<_> = requests.iter().map(|(id, _)| *id).collect();
            ids.sort_unstable();
            assert_eq!(ids, (1..=CALLS as u32).collect::<Vec<_>>());

            // Odd positions first, then even ones, each reversed.
            let (odd, even): (Vec<_>, Vec<_>) =
                requests.into_iter().enumerate().partition(|(i, _)| i % 2 == 1);
            for (_, (call_id, row)) in odd.into_iter().rev().chain(even.into_iter().rev()) {
                let frame = encode_response(call_id, None, Some(&get_response(&row)));
                socket.write_all(&frame).await.unwrap();
            }
            socket
        });

        let conn = Arc::new(
            Connection::connect(&address, "tester", Service::Client)
                .await
                .unwrap(),
        );
        let waiters: Vec<_> = (0..CALLS)
            .map(|i| {
                let conn = conn.clone();
                tokio::spawn(async move {
                    let row = format!("row-{i}").into_bytes();
                    let (call, result) = Call::new(get_request(&row));
                    conn.call(call).await.unwrap();
                    let response = result.wait().await.unwrap().into_get().unwrap();
                    assert_eq!(response.result.unwrap().cell[0].value, Some(row));
                })
            })
            .collect();
        for waiter in waiters {
            waiter.await.unwrap();
        }
        assert!(!conn.is_closed());
        let _socket = server.await.unwrap();
    }

    #[tokio::test]
    async fn write_failure_fails_pending_calls_and_closes() {
        let (listener, address) = setup().await;
        let server = tokio::spawn(async move {
            let mut socket = accept(&listener).await;
            read_request(&mut socket).await;
            socket
        });

        let conn = Connection::connect(&address, "tester", Service::Client)
            .await
            .unwrap();
        let (pending, pending_result) = Call::new(get_request(b"a"));
        conn.call(pending).await.unwrap();
        // The server holds the socket open, so only the write side breaks.
        let _socket = server.await.unwrap();
        conn.writer.lock().await.shutdown().await.unwrap();

        let (failed, failed_result) = Call::new(get_request(b"b"));
        assert!(matches!(conn.call(failed).await, Err(Error::Io(_))));
        assert!(conn.is_closed());
        assert!(matches!(
            pending_result.wait().await,
            Err(Error::ConnectionClosed { .. })
        ));
        assert!(matches!(
            failed_result.wait().await,
            Err(Error::ConnectionClosed { .. })
        ));

        let (later, later_result) = Call::new(get_request(b"c"));
        assert!(matches!(
            conn.call(later).await,
            Err(Error::ConnectionClosed { .. })
        ));
        assert!(matches!(
            later_result.wait().await,
            Err(Error::ConnectionClosed { .. })
        ));
    }
}
