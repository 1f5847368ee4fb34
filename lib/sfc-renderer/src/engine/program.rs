// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! The flow programming backend.

use crate::api::ActionList;
use crate::api::FlowCmd;
use crate::api::MacAddr;
use crate::api::NodeName;
use crate::api::PathId;
use crate::api::ServiceIndex;
use alloc::string::String;
use thiserror::Error;

/// The backend refused or failed to install a flow.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("failed to program node {node}: {msg}")]
pub struct ProgramError {
    pub node: NodeName,
    pub msg: String,
}

/// Installs fully resolved forwarding rules.
///
/// Every method must be idempotent: installing the same flow twice
/// leaves the forwarding plane as if it were installed once.
pub trait FlowProgrammer: Send + Sync {
    /// Accept packets for the path at `node`.
    fn install_ingress_flow(
        &self,
        node: &NodeName,
        path_id: PathId,
        service_index: ServiceIndex,
    ) -> Result<(), ProgramError>;

    /// Rewrite the destination of the path's packets to `mac` at
    /// `node`.
    fn install_next_hop_flow(
        &self,
        node: &NodeName,
        mac: MacAddr,
        path_id: PathId,
        service_index: ServiceIndex,
    ) -> Result<(), ProgramError>;

    /// Send the path's packets out of `node` by applying `actions`.
    fn install_transport_egress_flow(
        &self,
        node: &NodeName,
        path_id: PathId,
        service_index: ServiceIndex,
        actions: &ActionList,
    ) -> Result<(), ProgramError>;

    /// Terminate the path at `node`.
    fn install_last_hop_egress_flow(
        &self,
        node: &NodeName,
        path_id: PathId,
        service_index: ServiceIndex,
    ) -> Result<(), ProgramError>;

    /// Install an already resolved [`FlowCmd`].
    fn install(&self, cmd: &FlowCmd) -> Result<(), ProgramError> {
        match cmd {
            FlowCmd::Ingress { node, path_id, service_index } => {
                self.install_ingress_flow(node, *path_id, *service_index)
            }
            FlowCmd::NextHop { node, mac, path_id, service_index } => self
                .install_next_hop_flow(node, *mac, *path_id, *service_index),
            FlowCmd::TransportEgress {
                node,
                path_id,
                service_index,
                actions,
            } => self.install_transport_egress_flow(
                node,
                *path_id,
                *service_index,
                actions,
            ),
            FlowCmd::LastHopEgress { node, path_id, service_index } => self
                .install_last_hop_egress_flow(node, *path_id, *service_index),
        }
    }
}
