// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! An overlay resolver backed by plain maps.

use sfc_api::EgressAction;
use sfc_api::EgressLink;
use sfc_api::InterfaceName;
use sfc_api::MacAddr;
use sfc_api::NodeId;
use sfc_renderer::engine::resolve::OverlayResolver;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// A query as it reached the resolver.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ResolverCall {
    EgressActions(InterfaceName, EgressLink),
    InterconnectingInterface(NodeId, NodeId),
    Address(InterfaceName),
}

/// A resolver which answers from maps populated by the test, and
/// records every question it is asked.
///
/// A key with no entry produces `None`, just like a real resolver
/// with no answer. An entry with an empty list produces an empty
/// list.
#[derive(Default)]
pub struct MappingResolver {
    actions: Mutex<BTreeMap<(InterfaceName, bool), Vec<EgressAction>>>,
    interfaces: Mutex<BTreeMap<(NodeId, NodeId), InterfaceName>>,
    addrs: Mutex<BTreeMap<InterfaceName, MacAddr>>,
    calls: Mutex<Vec<ResolverCall>>,
}

impl MappingResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_egress_actions(
        &self,
        interface: &str,
        link: EgressLink,
        actions: Vec<EgressAction>,
    ) -> Option<Vec<EgressAction>> {
        self.actions
            .lock()
            .unwrap()
            .insert((interface.into(), link.is_inter_node()), actions)
    }

    pub fn set_interface(
        &self,
        src: &str,
        dst: &str,
        interface: &str,
    ) -> Option<InterfaceName> {
        self.interfaces
            .lock()
            .unwrap()
            .insert((src.into(), dst.into()), interface.into())
    }

    pub fn set_address(
        &self,
        interface: &str,
        mac: MacAddr,
    ) -> Option<MacAddr> {
        self.addrs.lock().unwrap().insert(interface.into(), mac)
    }

    /// Every query received so far, oldest first.
    pub fn calls(&self) -> Vec<ResolverCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: ResolverCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl OverlayResolver for MappingResolver {
    fn resolve_egress_actions(
        &self,
        interface: &InterfaceName,
        link: EgressLink,
    ) -> Option<Vec<EgressAction>> {
        self.record(ResolverCall::EgressActions(interface.clone(), link));
        self.actions
            .lock()
            .unwrap()
            .get(&(interface.clone(), link.is_inter_node()))
            .cloned()
    }

    fn resolve_interconnecting_interface(
        &self,
        src: &NodeId,
        dst: &NodeId,
    ) -> Option<InterfaceName> {
        self.record(ResolverCall::InterconnectingInterface(
            src.clone(),
            dst.clone(),
        ));
        self.interfaces
            .lock()
            .unwrap()
            .get(&(src.clone(), dst.clone()))
            .cloned()
    }

    fn resolve_address(&self, interface: &InterfaceName) -> Option<MacAddr> {
        self.record(ResolverCall::Address(interface.clone()));
        self.addrs.lock().unwrap().get(interface).copied()
    }
}
