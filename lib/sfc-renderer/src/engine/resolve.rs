// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! The outside services a processor leans on to fill in what a hop
//! descriptor cannot say by itself.

use crate::api::EgressAction;
use crate::api::EgressLink;
use crate::api::InterfaceName;
use crate::api::MacAddr;
use crate::api::NodeId;
use crate::api::NodeName;
use crate::api::PathId;
use crate::api::SffName;
use alloc::vec::Vec;

/// Answers questions about the overlay: which interface connects two
/// nodes, how traffic leaves through an interface, and what sits
/// behind an interface.
///
/// Calls block until the resolver has an answer. `None` means the
/// resolver has no answer; what that means for the hop is decided by
/// the caller.
pub trait OverlayResolver: Send + Sync {
    /// The ordered actions which send traffic out of `interface`.
    fn resolve_egress_actions(
        &self,
        interface: &InterfaceName,
        link: EgressLink,
    ) -> Option<Vec<EgressAction>>;

    /// The interface on `src` which tunnels to `dst`.
    fn resolve_interconnecting_interface(
        &self,
        src: &NodeId,
        dst: &NodeId,
    ) -> Option<InterfaceName>;

    /// The MAC address of whatever is attached to `interface`.
    fn resolve_address(&self, interface: &InterfaceName) -> Option<MacAddr>;
}

/// Derives the name a forwarder is programmed under.
///
/// Implementations must be pure: the same arguments always produce
/// the same name.
pub trait NodeNamer: Send + Sync {
    fn derive_node_name(
        &self,
        sff: &SffName,
        path_id: PathId,
        node: Option<&NodeId>,
    ) -> NodeName;
}
