// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! Hop processing errors.
//!
//! Every error here is fatal for the hop being processed. Nothing is
//! retried and nothing is downgraded to a no-op; it is up to the
//! caller to abandon the chain and try again from scratch.

use super::program::ProgramError;
use super::transport::RspTransport;
use crate::api::EgressLink;
use crate::api::InterfaceName;
use crate::api::LocatorKind;
use crate::api::NodeId;
use crate::api::PathId;
use crate::api::ServiceIndex;
use crate::api::SfName;
use core::fmt;
use core::fmt::Display;
use thiserror::Error;

pub type HopResult<T> = core::result::Result<T, HopError>;

/// A question put to the overlay resolver.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Query {
    Address { interface: InterfaceName },
    InterconnectingInterface { src: NodeId, dst: NodeId },
    EgressActions { interface: InterfaceName, link: EgressLink },
}

impl Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Address { interface } => {
                write!(f, "address of interface {interface}")
            }
            Self::InterconnectingInterface { src, dst } => {
                write!(f, "interface between node {src} and node {dst}")
            }
            Self::EgressActions { interface, link } => {
                write!(f, "{link} egress actions for interface {interface}")
            }
        }
    }
}

/// Which end of a hop.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HopSide {
    Src,
    Dst,
}

impl Display for HopSide {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::Src => "source",
            Self::Dst => "destination",
        };
        write!(f, "{s}")
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum HopError {
    #[error("resolver has no answer for the {0}")]
    ResolutionAbsent(Query),

    #[error(
        "resolver returned no {link} egress actions for interface {interface}"
    )]
    EmptyActionList { interface: InterfaceName, link: EgressLink },

    #[error(
        "service function {sf} has a {found} locator, \
         expected a logical interface"
    )]
    LocatorTypeMismatch { sf: SfName, found: LocatorKind },

    #[error("hop nsp:{path_id} nsi:{service_index} has no service function")]
    MissingServiceFunction { path_id: PathId, service_index: ServiceIndex },

    #[error("hop nsp:{path_id} nsi:{service_index} has no {side} overlay node")]
    MissingOverlayNode {
        side: HopSide,
        path_id: PathId,
        service_index: ServiceIndex,
    },

    #[error(
        "hop nsp:{path_id} nsi:{service_index} leaves the chain where a \
         forwarder is required"
    )]
    UnexpectedChainEgress { path_id: PathId, service_index: ServiceIndex },

    #[error(
        "hop nsp:{path_id} nsi:{service_index} is neither chain egress nor \
         intra-overlay"
    )]
    UncoveredHopShape { path_id: PathId, service_index: ServiceIndex },

    #[error(transparent)]
    Program(#[from] ProgramError),

    #[error("no processor for transport {0}")]
    UnsupportedTransport(RspTransport),
}

impl HopError {
    /// Did the overlay resolver fail to produce a usable answer?
    pub fn is_resolution_failure(&self) -> bool {
        matches!(self, Self::ResolutionAbsent(_) | Self::EmptyActionList { .. })
    }
}
