// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

use sfc_api::NodeId;
use sfc_api::NodeName;
use sfc_api::PathId;
use sfc_api::SffName;
use sfc_renderer::engine::resolve::NodeNamer;

/// Names a forwarder after the overlay node backing it, falling back
/// to the forwarder name when the hop carries no node.
pub struct DpnNamer;

impl NodeNamer for DpnNamer {
    fn derive_node_name(
        &self,
        sff: &SffName,
        _path_id: PathId,
        node: Option<&NodeId>,
    ) -> NodeName {
        match node {
            Some(node) => NodeName::new(node.as_str()),
            None => NodeName::new(sff.as_str()),
        }
    }
}

/// Names a forwarder after itself and the path, ignoring the overlay
/// node entirely.
pub struct SffNamer;

impl NodeNamer for SffNamer {
    fn derive_node_name(
        &self,
        sff: &SffName,
        path_id: PathId,
        _node: Option<&NodeId>,
    ) -> NodeName {
        NodeName::new(format!("{sff}/{path_id}"))
    }
}
