// Copyright 2019 TiKV Project Authors. Licensed under Apache-2.0.

use bytes::Bytes;
use bytes::BytesMut;
use prost::Message;
use tokio::sync::oneshot;

use super::codec;
use crate::internal_err;
use crate::proto::pb;
use crate::Result;

/// A request the client knows how to send.
///
/// The variant fixes both the RPC method name and the type the response payload decodes into.
#[derive(Clone, Debug, PartialEq)]
pub enum Request {
    Get(pb::GetRequest),
    Mutate(pb::MutateRequest),
    Multi(pb::MultiRequest),
    Scan(pb::ScanRequest),
    GetTableDescriptors(pb::GetTableDescriptorsRequest),
}

/// The decoded response to a [`Request`] of the same variant.
#[derive(Clone, Debug, PartialEq)]
pub enum Response {
    Get(pb::GetResponse),
    Mutate(pb::MutateResponse),
    Multi(pb::MultiResponse),
    Scan(pb::ScanResponse),
    GetTableDescriptors(pb::GetTableDescriptorsResponse),
}

impl Request {
    pub fn method_name(&self) -> &'static str {
        match self {
            Request::Get(_) => "Get",
            Request::Mutate(_) => "Mutate",
            Request::Multi(_) => "Multi",
            Request::Scan(_) => "Scan",
            Request::GetTableDescriptors(_) => "GetTableDescriptors",
        }
    }

    pub(crate) fn encode_frame(&self, call_id: u32) -> Result<BytesMut> {
        let method = self.method_name();
        match self {
            Request::Get(req) => codec::encode_request(call_id, method, req),
            Request::Mutate(req) => codec::encode_request(call_id, method, req),
            Request::Multi(req) => codec::encode_request(call_id, method, req),
            Request::Scan(req) => codec::encode_request(call_id, method, req),
            Request::GetTableDescriptors(req) => codec::encode_request(call_id, method, req),
        }
    }

    fn decode_response(&self, payload: Bytes) -> Result<Response> {
        Ok(match self {
            Request::Get(_) => Response::Get(pb::GetResponse::decode(payload)?),
            Request::Mutate(_) => Response::Mutate(pb::MutateResponse::decode(payload)?),
            Request::Multi(_) => Response::Multi(pb::MultiResponse::decode(payload)?),
            Request::Scan(_) => Response::Scan(pb::ScanResponse::decode(payload)?),
            Request::GetTableDescriptors(_) => {
                Response::GetTableDescriptors(pb::GetTableDescriptorsResponse::decode(payload)?)
            }
        })
    }
}

macro_rules! response_accessor {
    ($name:ident, $variant:ident, $ty:ty) => {
        pub fn $name(self) -> Result<$ty> {
            match self {
                Response::$variant(resp) => Ok(resp),
                other => Err(internal_err!(
                    "expected a {} response, got {:?}",
                    stringify!($variant),
                    other
                )),
            }
        }
    };
}

impl Response {
    response_accessor!(into_get, Get, pb::GetResponse);
    response_accessor!(into_mutate, Mutate, pb::MutateResponse);
    response_accessor!(into_multi, Multi, pb::MultiResponse);
    response_accessor!(into_scan, Scan, pb::ScanResponse);
    response_accessor!(
        into_table_descriptors,
        GetTableDescriptors,
        pb::GetTableDescriptorsResponse
    );

    #[cfg(any(test, feature = "test-util"))]
    pub(crate) fn encode_payload(&self) -> Vec<u8> {
        match self {
            Response::Get(resp) => resp.encode_to_vec(),
            Response::Mutate(resp) => resp.encode_to_vec(),
            Response::Multi(resp) => resp.encode_to_vec(),
            Response::Scan(resp) => resp.encode_to_vec(),
            Response::GetTableDescriptors(resp) => resp.encode_to_vec(),
        }
    }
}

/// One request on its way to a server, and the slot its outcome is delivered to.
///
/// A call is completed at most once: [`Call::complete`] consumes it. Dropping an uncompleted call
/// closes the slot and the waiter sees [`Error::Canceled`](crate::Error::Canceled).
#[derive(Debug)]
pub struct Call {
    id: u32,
    request: Request,
    result_tx: oneshot::Sender<Result<Response>>,
}

/// The receiving end of a [`Call`].
#[derive(Debug)]
pub struct CallResult {
    result_rx: oneshot::Receiver<Result<Response>>,
}

impl Call {
    pub fn new(request: Request) -> (Call, CallResult) {
        let (result_tx, result_rx) = oneshot::channel();
        (
            Call {
                id: 0,
                request,
                result_tx,
            },
            CallResult { result_rx },
        )
    }

    /// The call id; 0 until a connection sends the call.
    pub fn id(&self) -> u32 {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Deliver the outcome of the call.
    ///
    /// `Ok(None)` means the server sent a header without a payload; it decodes as an empty
    /// message of the expected type.
    pub fn complete(self, outcome: Result<Option<Bytes>>) {
        let result = outcome.and_then(|payload| {
            self.request
                .decode_response(payload.unwrap_or_default())
        });
        // The waiter may have given up; nothing to do then.
        let _ = self.result_tx.send(result);
    }
}

impl CallResult {
    pub async fn wait(self) -> Result<Response> {
        self.result_rx.await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn get_request() -> Request {
        Request::Get(pb::GetRequest::default())
    }

    #[test]
    fn method_names_follow_the_variant() {
        assert_eq!(get_request().method_name(), "Get");
        assert_eq!(Request::Mutate(Default::default()).method_name(), "Mutate");
        assert_eq!(Request::Multi(Default::default()).method_name(), "Multi");
        assert_eq!(Request::Scan(Default::default()).method_name(), "Scan");
        assert_eq!(
            Request::GetTableDescriptors(Default::default()).method_name(),
            "GetTableDescriptors"
        );
    }

    #[tokio::test]
    async fn payload_decodes_into_the_expected_type() {
        let expected = pb::MutateResponse {
            result: None,
            processed: Some(true),
        };
        let (call, result) = Call::new(Request::Mutate(Default::default()));
        call.complete(Ok(Some(Bytes::from(expected.encode_to_vec()))));
        assert_eq!(result.wait().await.unwrap(), Response::Mutate(expected));
    }

    #[tokio::test]
    async fn header_only_response_is_an_empty_message() {
        let (call, result) = Call::new(get_request());
        call.complete(Ok(None));
        let response = result.wait().await.unwrap().into_get().unwrap();
        assert_eq!(response, pb::GetResponse::default());
    }

    #[tokio::test]
    async fn undecodable_payload_is_a_failure() {
        let (call, result) = Call::new(get_request());
        call.complete(Ok(Some(Bytes::from_static(&[0xff, 0xff, 0xff]))));
        assert!(matches!(result.wait().await, Err(Error::Decode(_))));
    }

    #[tokio::test]
    async fn failure_is_delivered_verbatim() {
        let (call, result) = Call::new(get_request());
        call.complete(Err(Error::ConnectionClosed {
            address: "rs1:16020".to_owned(),
        }));
        let Err(Error::ConnectionClosed { address }) = result.wait().await else {
            panic!("expected Error::ConnectionClosed");
        };
        assert_eq!(address, "rs1:16020");
    }

    #[tokio::test]
    async fn dropped_call_cancels_the_waiter() {
        let (call, result) = Call::new(get_request());
        drop(call);
        assert!(matches!(result.wait().await, Err(Error::Canceled(_))));
    }

    #[test]
    fn accessor_rejects_other_variants() {
        let response = Response::Scan(Default::default());
        assert!(response.clone().into_scan().is_ok());
        assert!(matches!(
            response.into_get(),
            Err(Error::InternalError { .. })
        ));
    }
}
