// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! Common routines for integration tests.

// This type of pedantry is more trouble than it's worth here.
#![allow(dead_code)]

use std::sync::Arc;

// Let's make our lives easier and pub use a bunch of stuff.
pub use sfc_renderer::ExecCtx;
pub use sfc_renderer::api::ActionList;
pub use sfc_renderer::api::EgressAction;
pub use sfc_renderer::api::EgressLink;
pub use sfc_renderer::api::FlowCmd;
pub use sfc_renderer::api::HopDescriptor;
pub use sfc_renderer::api::HopDst;
pub use sfc_renderer::api::Locator;
pub use sfc_renderer::api::LocatorKind;
pub use sfc_renderer::api::MacAddr;
pub use sfc_renderer::api::NodeName;
pub use sfc_renderer::api::PhysicalLocator;
pub use sfc_renderer::api::ServiceFunction;
pub use sfc_renderer::cfg::RendererCfg;
pub use sfc_renderer::cfg::UncoveredHopPolicy;
pub use sfc_renderer::engine::HopError;
pub use sfc_renderer::engine::error::Query;
pub use sfc_renderer::engine::render::HopShape;
pub use sfc_renderer::engine::render::Stage;
pub use sfc_renderer::engine::render::render_chain;
pub use sfc_renderer::engine::render::render_hop;
pub use sfc_renderer::engine::resolve::NodeNamer;
pub use sfc_renderer::engine::transport::ChainProcessor;
pub use sfc_renderer::engine::transport::Collaborators;
pub use sfc_renderer::engine::transport::NextHopShape;
pub use sfc_renderer::engine::transport::RspTransport;
pub use sfc_renderer::engine::transport::TransportProcessor;
pub use sfc_renderer::provider::LogLevel;
pub use sfc_test_utils::CaptureLog;
pub use sfc_test_utils::DpnNamer;
pub use sfc_test_utils::MappingResolver;
pub use sfc_test_utils::RecordingProgrammer;
pub use sfc_test_utils::ResolverCall;
pub use sfc_test_utils::SffNamer;

pub const SF_MAC: MacAddr =
    MacAddr::from_const([0xa8, 0x40, 0x25, 0x00, 0x00, 0x63]);

/// A processor wired to test doubles, along with handles to those
/// doubles.
pub struct Harness {
    pub resolver: Arc<MappingResolver>,
    pub programmer: Arc<RecordingProgrammer>,
    pub log: CaptureLog,
    pub processor: ChainProcessor,
}

impl Harness {
    pub fn new(cfg: RendererCfg) -> Self {
        Self::with_namer(cfg, Arc::new(DpnNamer))
    }

    pub fn with_namer(cfg: RendererCfg, namer: Arc<dyn NodeNamer>) -> Self {
        let resolver = Arc::new(MappingResolver::new());
        let programmer = Arc::new(RecordingProgrammer::new());
        let log = CaptureLog::new();
        let ectx = Arc::new(ExecCtx { log: Box::new(log.clone()) });
        let collab = Collaborators {
            resolver: resolver.clone(),
            programmer: programmer.clone(),
            namer,
        };
        let processor =
            ChainProcessor::select(RspTransport::LogicalSff, cfg, ectx, collab)
                .unwrap();

        Self { resolver, programmer, log, processor }
    }

    pub fn calls(&self) -> Vec<ResolverCall> {
        self.resolver.calls()
    }

    pub fn cmds(&self) -> Vec<FlowCmd> {
        self.programmer.cmds()
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new(RendererCfg::default())
    }
}

pub fn output(port: u32) -> EgressAction {
    EgressAction::Output { port }
}

pub fn actions(list: Vec<EgressAction>) -> ActionList {
    ActionList::new(list).unwrap()
}

/// A service function attached to the logical interface `ifname`.
pub fn logical_sf(name: &str, ifname: &str) -> ServiceFunction {
    ServiceFunction::new(name, Locator::logical(ifname))
}

/// A hop from forwarder `sff-1` on node `n1` to forwarder `sff-2` on
/// node `n2`.
pub fn sff_hop(path_id: u64, service_index: u8) -> HopDescriptor {
    let dst = HopDst::Sff("sff-2".into());
    HopDescriptor::new(path_id, service_index, "sff-1", dst)
        .with_nodes("n1", "n2")
}

/// A hop from forwarder `sff-1` to the service function `sf-1` on
/// logical interface `sf-if-1`, hosted on node `n1`.
pub fn sf_hop(path_id: u64, service_index: u8) -> HopDescriptor {
    let dst = HopDst::Sff("sff-1".into());
    HopDescriptor::new(path_id, service_index, "sff-1", dst)
        .with_nodes("n1", "n1")
        .with_sf(logical_sf("sf-1", "sf-if-1"))
}
