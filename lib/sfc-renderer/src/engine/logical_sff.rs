// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! The processor for service paths whose forwarders are logical SFFs.
//!
//! A logical SFF is not a switch with a data plane locator of its
//! own; it is a set of overlay nodes, already meshed together with
//! tunnels, which the overlay manages on our behalf. Service
//! functions hang off logical interfaces rather than physical
//! locators. This changes what a hop needs compared to the physical
//! transports:
//!
//! * Ingress is a single flow on the destination node; there is no
//!   separate flow on the service function side.
//!
//! * There is no path mapping. The encapsulation carries the path id
//!   and service index end to end.
//!
//! * A next-hop flow is only needed when delivering to a service
//!   function. Everything else already has reachability through the
//!   tunnel mesh.
//!
//! * Transport egress actions cannot be derived locally. They come
//!   from the overlay resolver, for the service function's interface
//!   or for the tunnel between two overlay nodes.
//!
//! Whenever the resolver has no answer the hop fails. There is no
//! such thing as a partially rendered hop: either every resolution
//! succeeds and the flow is installed, or nothing is installed for
//! that operation.

use super::error::HopError;
use super::error::HopResult;
use super::error::HopSide;
use super::error::Query;
use super::program::FlowProgrammer;
use super::resolve::NodeNamer;
use super::resolve::OverlayResolver;
use super::transport::Collaborators;
use super::transport::NextHopShape;
use super::transport::RspTransport;
use super::transport::TransportProcessor;
use crate::ExecCtx;
use crate::api::ActionList;
use crate::api::EgressLink;
use crate::api::HopDescriptor;
use crate::api::InterfaceName;
use crate::api::MacAddr;
use crate::api::NodeId;
use crate::api::NodeName;
use crate::api::SffName;
use crate::cfg::RendererCfg;
use crate::cfg::UncoveredHopPolicy;
use crate::provider::LogLevel;
use alloc::string::String;
use alloc::sync::Arc;

pub struct LogicalSffProcessor {
    cfg: RendererCfg,
    ectx: Arc<ExecCtx>,
    resolver: Arc<dyn OverlayResolver>,
    programmer: Arc<dyn FlowProgrammer>,
    namer: Arc<dyn NodeNamer>,
}

impl LogicalSffProcessor {
    pub fn new(
        cfg: RendererCfg,
        ectx: Arc<ExecCtx>,
        collab: Collaborators,
    ) -> Self {
        let Collaborators { resolver, programmer, namer } = collab;
        Self { cfg, ectx, resolver, programmer, namer }
    }

    fn log(&self, level: LogLevel, hop: &HopDescriptor, msg: &str) {
        self.ectx.log.log(level, &format!("{hop}: {msg}"));
    }

    fn log_resolution(&self, hop: &HopDescriptor, msg: String) {
        if self.cfg.log_resolutions {
            self.log(LogLevel::Debug, hop, &msg);
        }
    }

    /// Record a fatal error against `hop` and hand it back.
    fn fail(&self, hop: &HopDescriptor, err: HopError) -> HopError {
        self.log(LogLevel::Error, hop, &format!("{err}"));
        err
    }

    fn node_name(
        &self,
        sff: &SffName,
        hop: &HopDescriptor,
        node: Option<&NodeId>,
    ) -> NodeName {
        self.namer.derive_node_name(sff, hop.path_id, node)
    }

    fn dst_sff<'a>(&self, hop: &'a HopDescriptor) -> HopResult<&'a SffName> {
        hop.dst_sff_name().ok_or(HopError::UnexpectedChainEgress {
            path_id: hop.path_id,
            service_index: hop.service_index,
        })
    }

    /// The logical interface of the service function the hop
    /// delivers to.
    fn sf_interface<'a>(
        &self,
        hop: &'a HopDescriptor,
    ) -> HopResult<&'a InterfaceName> {
        let sf = hop.sf.as_ref().ok_or(HopError::MissingServiceFunction {
            path_id: hop.path_id,
            service_index: hop.service_index,
        })?;

        sf.logical_interface().map_err(|found| {
            HopError::LocatorTypeMismatch { sf: sf.name.clone(), found }
        })
    }

    fn overlay_nodes<'a>(
        &self,
        hop: &'a HopDescriptor,
    ) -> HopResult<(&'a NodeId, &'a NodeId)> {
        let missing = |side| HopError::MissingOverlayNode {
            side,
            path_id: hop.path_id,
            service_index: hop.service_index,
        };

        let src = hop.src_node.as_ref().ok_or_else(|| missing(HopSide::Src))?;
        let dst = hop.dst_node.as_ref().ok_or_else(|| missing(HopSide::Dst))?;
        Ok((src, dst))
    }

    fn sf_mac(&self, hop: &HopDescriptor) -> HopResult<MacAddr> {
        let interface = self.sf_interface(hop)?;
        let mac = self.resolver.resolve_address(interface).ok_or_else(|| {
            HopError::ResolutionAbsent(Query::Address {
                interface: interface.clone(),
            })
        })?;

        self.log_resolution(
            hop,
            format!("interface {interface} has address {mac}"),
        );
        Ok(mac)
    }

    fn egress_actions(
        &self,
        hop: &HopDescriptor,
        interface: &InterfaceName,
        link: EgressLink,
    ) -> HopResult<ActionList> {
        let actions = self
            .resolver
            .resolve_egress_actions(interface, link)
            .ok_or_else(|| {
                HopError::ResolutionAbsent(Query::EgressActions {
                    interface: interface.clone(),
                    link,
                })
            })?;

        let actions = ActionList::new(actions).ok_or_else(|| {
            HopError::EmptyActionList { interface: interface.clone(), link }
        })?;

        self.log_resolution(
            hop,
            format!("{link} egress via {interface}: {actions}"),
        );
        Ok(actions)
    }

    fn interconnecting_interface(
        &self,
        hop: &HopDescriptor,
        src: &NodeId,
        dst: &NodeId,
    ) -> HopResult<InterfaceName> {
        let interface = self
            .resolver
            .resolve_interconnecting_interface(src, dst)
            .ok_or_else(|| {
                HopError::ResolutionAbsent(Query::InterconnectingInterface {
                    src: src.clone(),
                    dst: dst.clone(),
                })
            })?;

        self.log_resolution(
            hop,
            format!("node {src} reaches node {dst} via {interface}"),
        );
        Ok(interface)
    }

    fn install_ingress(&self, hop: &HopDescriptor) -> HopResult<()> {
        // Traffic never enters anything past the end of the chain.
        if hop.is_chain_egress() {
            self.log(LogLevel::Debug, hop, "no ingress flow at chain egress");
            return Ok(());
        }

        let dst_sff = self.dst_sff(hop)?;
        let node = self.node_name(dst_sff, hop, hop.dst_node.as_ref());
        self.programmer.install_ingress_flow(
            &node,
            hop.path_id,
            hop.service_index,
        )?;
        Ok(())
    }

    fn install_sff_to_sf_next_hop(&self, hop: &HopDescriptor) -> HopResult<()> {
        let dst_sff = self.dst_sff(hop)?;
        let mac = self.sf_mac(hop)?;
        let node = self.node_name(dst_sff, hop, hop.dst_node.as_ref());
        self.programmer.install_next_hop_flow(
            &node,
            mac,
            hop.path_id,
            hop.service_index,
        )?;
        Ok(())
    }

    /// Both service functions hang off the same forwarder, so the
    /// flow lives on the source forwarder. The destination node is
    /// the node that forwarder is realized on.
    fn install_sf_to_sf_next_hop(&self, hop: &HopDescriptor) -> HopResult<()> {
        let mac = self.sf_mac(hop)?;
        let node = self.node_name(&hop.src_sff, hop, hop.dst_node.as_ref());
        self.programmer.install_next_hop_flow(
            &node,
            mac,
            hop.path_id,
            hop.service_index,
        )?;
        Ok(())
    }

    fn install_sf_egress(&self, hop: &HopDescriptor) -> HopResult<()> {
        let dst_sff = self.dst_sff(hop)?;
        let interface = self.sf_interface(hop)?;
        self.log(
            LogLevel::Debug,
            hop,
            &format!("sff->sf egress through logical interface {interface}"),
        );

        let actions =
            self.egress_actions(hop, interface, EgressLink::ServiceFunction)?;
        let node = self.node_name(dst_sff, hop, hop.dst_node.as_ref());
        self.programmer.install_transport_egress_flow(
            &node,
            hop.path_id,
            hop.service_index,
            &actions,
        )?;
        Ok(())
    }

    fn install_sff_egress(&self, hop: &HopDescriptor) -> HopResult<()> {
        let node = self.node_name(&hop.src_sff, hop, hop.src_node.as_ref());

        if hop.is_chain_egress() {
            self.log(LogLevel::Debug, hop, "sff egress for chain egress");
            self.programmer.install_last_hop_egress_flow(
                &node,
                hop.path_id,
                hop.service_index,
            )?;
            return Ok(());
        }

        if hop.intra_overlay {
            let (src, dst) = self.overlay_nodes(hop)?;
            let interface = self.interconnecting_interface(hop, src, dst)?;
            let actions =
                self.egress_actions(hop, &interface, EgressLink::InterNode)?;
            self.programmer.install_transport_egress_flow(
                &node,
                hop.path_id,
                hop.service_index,
                &actions,
            )?;
            return Ok(());
        }

        match self.cfg.uncovered_hop {
            UncoveredHopPolicy::Warn => {
                self.log(
                    LogLevel::Warn,
                    hop,
                    "hop is neither chain egress nor intra-overlay, \
                     no egress flow installed",
                );
                Ok(())
            }

            UncoveredHopPolicy::Deny => Err(HopError::UncoveredHopShape {
                path_id: hop.path_id,
                service_index: hop.service_index,
            }),
        }
    }
}

impl TransportProcessor for LogicalSffProcessor {
    fn transport(&self) -> RspTransport {
        RspTransport::LogicalSff
    }

    /// The forwarder side ingress flow already covers the service
    /// function.
    fn sf_transport_ingress(&self, _hop: &HopDescriptor) -> HopResult<()> {
        Ok(())
    }

    fn sff_transport_ingress(&self, hop: &HopDescriptor) -> HopResult<()> {
        self.install_ingress(hop).map_err(|e| self.fail(hop, e))
    }

    fn sf_path_mapper(&self, _hop: &HopDescriptor) -> HopResult<()> {
        Ok(())
    }

    fn sff_path_mapper(&self, _hop: &HopDescriptor) -> HopResult<()> {
        Ok(())
    }

    fn next_hop(
        &self,
        hop: &HopDescriptor,
        shape: NextHopShape,
    ) -> HopResult<()> {
        let res = match shape {
            NextHopShape::SffToSf => self.install_sff_to_sf_next_hop(hop),
            NextHopShape::SfToSf => self.install_sf_to_sf_next_hop(hop),
            // The tunnel mesh already connects every overlay node;
            // all that is left is picking the egress port, which is
            // done by transport egress.
            NextHopShape::SfToSff | NextHopShape::SffToSff => Ok(()),
        };

        res.map_err(|e| self.fail(hop, e))
    }

    fn sf_transport_egress(&self, hop: &HopDescriptor) -> HopResult<()> {
        self.install_sf_egress(hop).map_err(|e| self.fail(hop, e))
    }

    fn sff_transport_egress(&self, hop: &HopDescriptor) -> HopResult<()> {
        self.install_sff_egress(hop).map_err(|e| self.fail(hop, e))
    }
}
