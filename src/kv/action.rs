// Copyright 2019 TiKV Project Authors. Licensed under Apache-2.0.

use super::Delete;
use super::Get;
use super::Put;
use crate::proto::pb;
use crate::store::Request;

/// A row-level operation that can be sent on its own or inside a batched `Multi` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Get(Get),
    Put(Put),
    Delete(Delete),
}

/// The protocol payload of an [`Action`]: reads become `Get`, writes become `MutationProto`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ActionProto {
    Get(pb::Get),
    Mutation(pb::MutationProto),
}

impl Action {
    pub fn row(&self) -> &[u8] {
        match self {
            Action::Get(get) => get.row(),
            Action::Put(put) => put.row(),
            Action::Delete(delete) => delete.row(),
        }
    }

    pub(crate) fn to_proto(&self) -> ActionProto {
        match self {
            Action::Get(get) => ActionProto::Get(get.to_proto()),
            Action::Put(put) => ActionProto::Mutation(put.to_proto()),
            Action::Delete(delete) => ActionProto::Mutation(delete.to_proto()),
        }
    }

    /// Build the single-action request addressed to `region`.
    pub(crate) fn to_request(&self, region: pb::RegionSpecifier) -> Request {
        match self.to_proto() {
            ActionProto::Get(get) => Request::Get(pb::GetRequest { region, get }),
            ActionProto::Mutation(mutation) => Request::Mutate(pb::MutateRequest {
                region,
                mutation,
                nonce_group: None,
            }),
        }
    }

    /// Build the entry of a `RegionAction`; `index` is the position inside that region's list.
    pub(crate) fn to_indexed(&self, index: u32) -> pb::Action {
        let mut action = pb::Action {
            index: Some(index),
            ..Default::default()
        };
        match self.to_proto() {
            ActionProto::Get(get) => action.get = Some(get),
            ActionProto::Mutation(mutation) => action.mutation = Some(mutation),
        }
        action
    }
}

impl From<Get> for Action {
    fn from(get: Get) -> Action {
        Action::Get(get)
    }
}

impl From<Put> for Action {
    fn from(put: Put) -> Action {
        Action::Put(put)
    }
}

impl From<Delete> for Action {
    fn from(delete: Delete) -> Action {
        Action::Delete(delete)
    }
}
