// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! Hops of a rendered service path.

use super::locator::ServiceFunction;
use core::fmt;
use core::fmt::Display;
use serde::Deserialize;
use serde::Serialize;

/// The service path identifier. It is carried in the encapsulation
/// of every packet on the path and stays fixed for the lifetime of
/// the chain.
pub type PathId = u64;

/// The service index. It starts at the top of the range and is
/// decremented at every service function on the path.
pub type ServiceIndex = u8;

name_type!(
    /// The name of a service function forwarder.
    SffName
);

name_type!(
    /// The identifier of an overlay node, e.g. the datapath id of the
    /// switch backing a logical forwarder.
    NodeId
);

name_type!(
    /// The name a forwarding-plane node is programmed under.
    NodeName
);

/// The far end of a hop.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum HopDst {
    Sff(SffName),
    /// The hop leaves the chain.
    ChainEgress,
}

impl Display for HopDst {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Sff(name) => write!(f, "{name}"),
            Self::ChainEgress => write!(f, "(chain egress)"),
        }
    }
}

/// One directed edge of a service path.
///
/// Descriptors are built by whatever walks the chain topology and
/// are only ever read by the renderer.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct HopDescriptor {
    pub path_id: PathId,
    pub service_index: ServiceIndex,

    /// The forwarder the hop starts at.
    pub src_sff: SffName,

    /// The forwarder the hop ends at, or the chain egress sentinel.
    pub dst_sff: HopDst,

    /// The overlay node backing `src_sff`.
    pub src_node: Option<NodeId>,

    /// The overlay node backing `dst_sff`.
    pub dst_node: Option<NodeId>,

    /// Set when both ends of the hop are overlay nodes which must be
    /// stitched together through an interconnecting interface.
    pub intra_overlay: bool,

    /// The service function this hop delivers to. Only meaningful on
    /// hops from a forwarder to a service function.
    pub sf: Option<ServiceFunction>,
}

impl HopDescriptor {
    pub fn new(
        path_id: PathId,
        service_index: ServiceIndex,
        src_sff: impl Into<SffName>,
        dst_sff: HopDst,
    ) -> Self {
        Self {
            path_id,
            service_index,
            src_sff: src_sff.into(),
            dst_sff,
            src_node: None,
            dst_node: None,
            intra_overlay: false,
            sf: None,
        }
    }

    pub fn with_nodes(
        mut self,
        src: impl Into<NodeId>,
        dst: impl Into<NodeId>,
    ) -> Self {
        self.src_node = Some(src.into());
        self.dst_node = Some(dst.into());
        self
    }

    pub fn with_src_node(mut self, src: impl Into<NodeId>) -> Self {
        self.src_node = Some(src.into());
        self
    }

    pub fn intra_overlay(mut self) -> Self {
        self.intra_overlay = true;
        self
    }

    pub fn with_sf(mut self, sf: ServiceFunction) -> Self {
        self.sf = Some(sf);
        self
    }

    pub fn is_chain_egress(&self) -> bool {
        matches!(self.dst_sff, HopDst::ChainEgress)
    }

    /// The destination forwarder, unless the hop leaves the chain.
    pub fn dst_sff_name(&self) -> Option<&SffName> {
        match &self.dst_sff {
            HopDst::Sff(name) => Some(name),
            HopDst::ChainEgress => None,
        }
    }
}

impl Display for HopDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} -> {} (nsp:{} nsi:{})",
            self.src_sff, self.dst_sff, self.path_id, self.service_index
        )
    }
}
