// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! The contract shared by all transport processors.
//!
//! A chain is rendered with exactly one transport. The transport is
//! chosen once, when the chain is realized, by [`ChainProcessor::select`];
//! after that every hop of the chain goes through the same processor.

use super::error::HopError;
use super::error::HopResult;
use super::logical_sff::LogicalSffProcessor;
use super::program::FlowProgrammer;
use super::resolve::NodeNamer;
use super::resolve::OverlayResolver;
use crate::ExecCtx;
use crate::api::HopDescriptor;
use crate::cfg::RendererCfg;
use alloc::sync::Arc;
use core::fmt;
use core::fmt::Display;
use serde::Deserialize;
use serde::Serialize;

/// The transports a rendered service path may use.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum RspTransport {
    /// NSH over the overlay's own tunnels between logical forwarders.
    LogicalSff,
    /// NSH over Ethernet, forwarders addressed by data plane locator.
    NshEth,
    /// NSH over VXLAN-GPE.
    VxlanGpe,
    Mpls,
    MacChaining,
}

impl Display for RspTransport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::LogicalSff => "logical-sff",
            Self::NshEth => "nsh-eth",
            Self::VxlanGpe => "vxlan-gpe",
            Self::Mpls => "mpls",
            Self::MacChaining => "mac-chaining",
        };
        write!(f, "{s}")
    }
}

/// What sits at either end of a next-hop.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum NextHopShape {
    SffToSf,
    SfToSff,
    SfToSf,
    SffToSff,
}

/// The per-hop operations every transport processor implements.
///
/// Each family has a service function side and a forwarder side. A
/// caller runs the families in a fixed order for every hop:
/// transport ingress, path mapping, next hop, transport egress.
pub trait TransportProcessor: Send + Sync {
    fn transport(&self) -> RspTransport;

    fn sf_transport_ingress(&self, hop: &HopDescriptor) -> HopResult<()>;
    fn sff_transport_ingress(&self, hop: &HopDescriptor) -> HopResult<()>;

    fn sf_path_mapper(&self, hop: &HopDescriptor) -> HopResult<()>;
    fn sff_path_mapper(&self, hop: &HopDescriptor) -> HopResult<()>;

    fn next_hop(
        &self,
        hop: &HopDescriptor,
        shape: NextHopShape,
    ) -> HopResult<()>;

    /// Egress from a forwarder towards a service function.
    fn sf_transport_egress(&self, hop: &HopDescriptor) -> HopResult<()>;

    /// Egress from a forwarder towards another forwarder, or out of
    /// the chain.
    fn sff_transport_egress(&self, hop: &HopDescriptor) -> HopResult<()>;
}

/// The outside services a processor is built with.
#[derive(Clone)]
pub struct Collaborators {
    pub resolver: Arc<dyn OverlayResolver>,
    pub programmer: Arc<dyn FlowProgrammer>,
    pub namer: Arc<dyn NodeNamer>,
}

/// The processor chosen for a chain.
pub enum ChainProcessor {
    LogicalSff(LogicalSffProcessor),
}

impl ChainProcessor {
    /// Pick the processor for `transport`.
    pub fn select(
        transport: RspTransport,
        cfg: RendererCfg,
        ectx: Arc<ExecCtx>,
        collab: Collaborators,
    ) -> HopResult<Self> {
        match transport {
            RspTransport::LogicalSff => Ok(Self::LogicalSff(
                LogicalSffProcessor::new(cfg, ectx, collab),
            )),

            RspTransport::NshEth
            | RspTransport::VxlanGpe
            | RspTransport::Mpls
            | RspTransport::MacChaining => {
                Err(HopError::UnsupportedTransport(transport))
            }
        }
    }
}

impl TransportProcessor for ChainProcessor {
    fn transport(&self) -> RspTransport {
        match self {
            Self::LogicalSff(p) => p.transport(),
        }
    }

    fn sf_transport_ingress(&self, hop: &HopDescriptor) -> HopResult<()> {
        match self {
            Self::LogicalSff(p) => p.sf_transport_ingress(hop),
        }
    }

    fn sff_transport_ingress(&self, hop: &HopDescriptor) -> HopResult<()> {
        match self {
            Self::LogicalSff(p) => p.sff_transport_ingress(hop),
        }
    }

    fn sf_path_mapper(&self, hop: &HopDescriptor) -> HopResult<()> {
        match self {
            Self::LogicalSff(p) => p.sf_path_mapper(hop),
        }
    }

    fn sff_path_mapper(&self, hop: &HopDescriptor) -> HopResult<()> {
        match self {
            Self::LogicalSff(p) => p.sff_path_mapper(hop),
        }
    }

    fn next_hop(
        &self,
        hop: &HopDescriptor,
        shape: NextHopShape,
    ) -> HopResult<()> {
        match self {
            Self::LogicalSff(p) => p.next_hop(hop, shape),
        }
    }

    fn sf_transport_egress(&self, hop: &HopDescriptor) -> HopResult<()> {
        match self {
            Self::LogicalSff(p) => p.sf_transport_egress(hop),
        }
    }

    fn sff_transport_egress(&self, hop: &HopDescriptor) -> HopResult<()> {
        match self {
            Self::LogicalSff(p) => p.sff_transport_egress(hop),
        }
    }
}
