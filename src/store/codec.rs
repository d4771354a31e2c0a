// Copyright 2019 TiKV Project Authors. Licensed under Apache-2.0.

//! Byte layout of the region server RPC protocol.
//!
//! Every frame after the connection preamble is a 4-byte big-endian length followed by
//! varint-delimited protobuf messages: a header, then (optionally) a payload.

use bytes::Buf;
use bytes::BufMut;
use bytes::Bytes;
use bytes::BytesMut;
use prost::Message;
use tokio::io::AsyncRead;
use tokio::io::AsyncReadExt;

use crate::proto::pb;
use crate::Error;
use crate::Result;

const MAGIC: &[u8] = b"HBas";
const RPC_VERSION: u8 = 0;
const AUTH_SIMPLE: u8 = 0x50;
const MAX_FRAME_LEN: usize = 256 * 1024 * 1024;

/// The RPC service a connection is opened for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Service {
    /// Row operations served by region servers.
    Client,
    /// Administrative operations served by the master.
    Master,
}

impl Service {
    pub fn name(self) -> &'static str {
        match self {
            Service::Client => "ClientService",
            Service::Master => "MasterService",
        }
    }
}

/// The bytes a client sends right after the socket is opened.
pub(crate) fn encode_preamble(user: &str, service: Service) -> Result<BytesMut> {
    let header = pb::ConnectionHeader {
        user_info: Some(pb::UserInformation {
            effective_user: user.to_owned(),
            real_user: None,
        }),
        service_name: Some(service.name().to_owned()),
        ..Default::default()
    };

    let mut buf = BytesMut::with_capacity(MAGIC.len() + 6 + header.encoded_len());
    buf.put_slice(MAGIC);
    buf.put_u8(RPC_VERSION);
    buf.put_u8(AUTH_SIMPLE);
    buf.put_u32(header.encoded_len() as u32);
    header.encode(&mut buf)?;
    Ok(buf)
}

/// Frame one request: length, delimited `RequestHeader`, delimited payload.
pub(crate) fn encode_request<M: Message>(call_id: u32, method: &str, param: &M) -> Result<BytesMut> {
    let header = pb::RequestHeader {
        call_id: Some(call_id),
        method_name: Some(method.to_owned()),
        request_param: Some(true),
        priority: None,
    };
    let header_len = header.encoded_len();
    let param_len = param.encoded_len();
    let body_len = prost::length_delimiter_len(header_len)
        + header_len
        + prost::length_delimiter_len(param_len)
        + param_len;

    let mut buf = BytesMut::with_capacity(4 + body_len);
    buf.put_u32(body_len as u32);
    header.encode_length_delimited(&mut buf)?;
    param.encode_length_delimited(&mut buf)?;
    Ok(buf)
}

/// Read the body of the next frame.
///
/// EOF anywhere, including before the length prefix, is an error: the peer never closes a
/// connection that still has work on it.
pub(crate) async fn read_frame<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Bytes> {
    let len = reader.read_u32().await? as usize;
    if len > MAX_FRAME_LEN {
        return Err(Error::ProtocolViolation {
            message: format!("frame length {len} exceeds {MAX_FRAME_LEN}"),
        });
    }
    let mut body = vec![0; len];
    reader.read_exact(&mut body).await?;
    Ok(Bytes::from(body))
}

/// Split a frame body into its varint-delimited sub-messages.
pub(crate) fn split_frame(mut body: Bytes) -> Result<Vec<Bytes>> {
    let mut parts = Vec::new();
    while body.has_remaining() {
        let len = prost::decode_length_delimiter(&mut body)?;
        if len > body.remaining() {
            return Err(Error::ProtocolViolation {
                message: format!(
                    "sub-message of {len} bytes exceeds the {} bytes left in the frame",
                    body.remaining()
                ),
            });
        }
        parts.push(body.split_to(len));
    }
    Ok(parts)
}

/// A decoded response frame.
#[derive(Debug)]
pub(crate) struct ResponseFrame {
    pub header: pb::ResponseHeader,
    /// `None` when the frame carried only a header.
    pub payload: Option<Bytes>,
}

/// Decode a response frame body; `Ok(None)` means the frame is empty and should be skipped.
pub(crate) fn decode_response(body: Bytes) -> Result<Option<ResponseFrame>> {
    let mut parts = split_frame(body)?.into_iter();
    let header = match parts.next() {
        Some(header) if !header.is_empty() => pb::ResponseHeader::decode(header)?,
        _ => return Ok(None),
    };
    Ok(Some(ResponseFrame {
        header,
        payload: parts.next(),
    }))
}

#[cfg(test)]
pub(crate) fn encode_response<M: Message>(
    call_id: u32,
    exception: Option<pb::ExceptionResponse>,
    payload: Option<&M>,
) -> Vec<u8> {
    let header = pb::ResponseHeader {
        call_id: Some(call_id),
        exception,
    };
    let mut body = Vec::new();
    header.encode_length_delimited(&mut body).unwrap();
    if let Some(payload) = payload {
        payload.encode_length_delimited(&mut body).unwrap();
    }
    let mut frame = (body.len() as u32).to_be_bytes().to_vec();
    frame.extend(body);
    frame
}
