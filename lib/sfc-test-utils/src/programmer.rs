// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! A flow programmer which only writes things down.

use sfc_api::ActionList;
use sfc_api::FlowCmd;
use sfc_api::MacAddr;
use sfc_api::NodeName;
use sfc_api::PathId;
use sfc_api::ServiceIndex;
use sfc_renderer::engine::program::FlowProgrammer;
use sfc_renderer::engine::program::ProgramError;
use std::collections::BTreeSet;
use std::sync::Mutex;

/// Records every flow it is asked to install, in order.
///
/// Nodes added with [`RecordingProgrammer::fail_node`] refuse every
/// flow; refused flows are not recorded.
#[derive(Default)]
pub struct RecordingProgrammer {
    cmds: Mutex<Vec<FlowCmd>>,
    failing: Mutex<BTreeSet<NodeName>>,
}

impl RecordingProgrammer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_node(&self, node: &str) {
        self.failing.lock().unwrap().insert(node.into());
    }

    /// Every flow installed so far, oldest first.
    pub fn cmds(&self) -> Vec<FlowCmd> {
        self.cmds.lock().unwrap().clone()
    }

    fn record(&self, cmd: FlowCmd) -> Result<(), ProgramError> {
        if self.failing.lock().unwrap().contains(cmd.node()) {
            return Err(ProgramError {
                node: cmd.node().clone(),
                msg: format!("{} flow refused", cmd.kind()),
            });
        }

        self.cmds.lock().unwrap().push(cmd);
        Ok(())
    }
}

impl FlowProgrammer for RecordingProgrammer {
    fn install_ingress_flow(
        &self,
        node: &NodeName,
        path_id: PathId,
        service_index: ServiceIndex,
    ) -> Result<(), ProgramError> {
        self.record(FlowCmd::Ingress {
            node: node.clone(),
            path_id,
            service_index,
        })
    }

    fn install_next_hop_flow(
        &self,
        node: &NodeName,
        mac: MacAddr,
        path_id: PathId,
        service_index: ServiceIndex,
    ) -> Result<(), ProgramError> {
        self.record(FlowCmd::NextHop {
            node: node.clone(),
            mac,
            path_id,
            service_index,
        })
    }

    fn install_transport_egress_flow(
        &self,
        node: &NodeName,
        path_id: PathId,
        service_index: ServiceIndex,
        actions: &ActionList,
    ) -> Result<(), ProgramError> {
        self.record(FlowCmd::TransportEgress {
            node: node.clone(),
            path_id,
            service_index,
            actions: actions.clone(),
        })
    }

    fn install_last_hop_egress_flow(
        &self,
        node: &NodeName,
        path_id: PathId,
        service_index: ServiceIndex,
    ) -> Result<(), ProgramError> {
        self.record(FlowCmd::LastHopEgress {
            node: node.clone(),
            path_id,
            service_index,
        })
    }
}
