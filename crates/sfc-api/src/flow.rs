// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! Fully resolved programming instructions.

use super::action::ActionList;
use super::hop::NodeName;
use super::hop::PathId;
use super::hop::ServiceIndex;
use super::mac::MacAddr;
use serde::Deserialize;
use serde::Serialize;

/// A single instruction for the flow programmer, with every value
/// already resolved.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum FlowCmd {
    Ingress {
        node: NodeName,
        path_id: PathId,
        service_index: ServiceIndex,
    },
    NextHop {
        node: NodeName,
        mac: MacAddr,
        path_id: PathId,
        service_index: ServiceIndex,
    },
    TransportEgress {
        node: NodeName,
        path_id: PathId,
        service_index: ServiceIndex,
        actions: ActionList,
    },
    LastHopEgress {
        node: NodeName,
        path_id: PathId,
        service_index: ServiceIndex,
    },
}

impl FlowCmd {
    /// A short name for the kind of flow this installs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Ingress { .. } => "ingress",
            Self::NextHop { .. } => "next-hop",
            Self::TransportEgress { .. } => "egress",
            Self::LastHopEgress { .. } => "last-hop-egress",
        }
    }

    pub fn node(&self) -> &NodeName {
        match self {
            Self::Ingress { node, .. }
            | Self::NextHop { node, .. }
            | Self::TransportEgress { node, .. }
            | Self::LastHopEgress { node, .. } => node,
        }
    }

    pub fn path_id(&self) -> PathId {
        match self {
            Self::Ingress { path_id, .. }
            | Self::NextHop { path_id, .. }
            | Self::TransportEgress { path_id, .. }
            | Self::LastHopEgress { path_id, .. } => *path_id,
        }
    }

    pub fn service_index(&self) -> ServiceIndex {
        match self {
            Self::Ingress { service_index, .. }
            | Self::NextHop { service_index, .. }
            | Self::TransportEgress { service_index, .. }
            | Self::LastHopEgress { service_index, .. } => *service_index,
        }
    }
}
