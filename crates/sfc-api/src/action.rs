// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! Egress actions handed out by the overlay resolver.

use super::mac::MacAddr;
use alloc::vec::Vec;
use core::fmt;
use core::fmt::Display;
use core::net::Ipv4Addr;
use core::ops::Deref;
use serde::Deserialize;
use serde::Serialize;

/// What kind of link traffic leaves through.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum EgressLink {
    /// A link facing a service function.
    ServiceFunction,
    /// A tunnel between two overlay nodes.
    InterNode,
}

impl EgressLink {
    /// Whether this is a link between overlay nodes, as opposed to
    /// one facing a service function.
    pub fn is_inter_node(&self) -> bool {
        matches!(self, Self::InterNode)
    }
}

impl Display for EgressLink {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::ServiceFunction => "sf",
            Self::InterNode => "inter-node",
        };
        write!(f, "{s}")
    }
}

/// A single forwarding action.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum EgressAction {
    Output { port: u32 },
    SetTunnelId { id: u64 },
    SetTunnelDst { ip: Ipv4Addr },
    PushVlan { vid: u16 },
    SetEthDst { mac: MacAddr },
    Resubmit { table: u8 },
}

impl Display for EgressAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Output { port } => write!(f, "output:{port}"),
            Self::SetTunnelId { id } => write!(f, "set_tunnel:{id:#x}"),
            Self::SetTunnelDst { ip } => write!(f, "set_tun_dst:{ip}"),
            Self::PushVlan { vid } => write!(f, "push_vlan:{vid}"),
            Self::SetEthDst { mac } => write!(f, "set_eth_dst:{mac}"),
            Self::Resubmit { table } => write!(f, "resubmit(,{table})"),
        }
    }
}

/// An ordered, non-empty list of egress actions.
///
/// There is no such thing as an empty action list: a forwarding rule
/// without actions would silently drop the chain's traffic.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "Vec<EgressAction>", into = "Vec<EgressAction>")]
pub struct ActionList(Vec<EgressAction>);

impl ActionList {
    /// Create a new action list, or `None` if `actions` is empty.
    pub fn new(actions: Vec<EgressAction>) -> Option<Self> {
        if actions.is_empty() { None } else { Some(Self(actions)) }
    }
}

impl Deref for ActionList {
    type Target = [EgressAction];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<Vec<EgressAction>> for ActionList {
    type Error = &'static str;

    fn try_from(actions: Vec<EgressAction>) -> Result<Self, Self::Error> {
        Self::new(actions).ok_or("an action list may not be empty")
    }
}

impl From<ActionList> for Vec<EgressAction> {
    fn from(list: ActionList) -> Self {
        list.0
    }
}

impl Display for ActionList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, action) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{action}")?;
        }
        Ok(())
    }
}
