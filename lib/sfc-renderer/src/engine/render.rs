// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! Drive a processor through the operations of a hop.

use super::error::HopError;
use super::error::HopResult;
use super::transport::NextHopShape;
use super::transport::TransportProcessor;
use crate::api::HopDescriptor;
use core::fmt;
use core::fmt::Display;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// What sits at either end of a hop.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum HopShape {
    SffToSf,
    SfToSff,
    SfToSf,
    SffToSff,
}

impl HopShape {
    /// Does the hop deliver to a service function?
    pub fn dst_is_sf(&self) -> bool {
        matches!(self, Self::SffToSf | Self::SfToSf)
    }

    pub fn next_hop(&self) -> NextHopShape {
        match self {
            Self::SffToSf => NextHopShape::SffToSf,
            Self::SfToSff => NextHopShape::SfToSff,
            Self::SfToSf => NextHopShape::SfToSf,
            Self::SffToSff => NextHopShape::SffToSff,
        }
    }
}

/// The operation families, in the order they run for every hop.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum Stage {
    TransportIngress,
    PathMapper,
    NextHop,
    TransportEgress,
}

impl Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::TransportIngress => "transport ingress",
            Self::PathMapper => "path mapper",
            Self::NextHop => "next hop",
            Self::TransportEgress => "transport egress",
        };
        write!(f, "{s}")
    }
}

/// A hop failed at `stage`.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("{stage} failed: {err}")]
pub struct StageError {
    pub stage: Stage,
    #[source]
    pub err: HopError,
}

/// The hop at `index` of a chain failed.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("hop {index}: {source}")]
pub struct RenderError {
    pub index: usize,
    pub source: StageError,
}

fn stage(stage: Stage, res: HopResult<()>) -> Result<(), StageError> {
    res.map_err(|err| StageError { stage, err })
}

/// Run every operation family for `hop`, in order.
///
/// The first failure ends the hop. Flows installed by earlier stages
/// stay installed.
pub fn render_hop<P: TransportProcessor + ?Sized>(
    p: &P,
    hop: &HopDescriptor,
    shape: HopShape,
) -> Result<(), StageError> {
    stage(Stage::TransportIngress, p.sff_transport_ingress(hop))?;
    if shape.dst_is_sf() {
        stage(Stage::TransportIngress, p.sf_transport_ingress(hop))?;
    }

    stage(Stage::PathMapper, p.sff_path_mapper(hop))?;
    if shape.dst_is_sf() {
        stage(Stage::PathMapper, p.sf_path_mapper(hop))?;
    }

    stage(Stage::NextHop, p.next_hop(hop, shape.next_hop()))?;

    if shape.dst_is_sf() {
        stage(Stage::TransportEgress, p.sf_transport_egress(hop))
    } else {
        stage(Stage::TransportEgress, p.sff_transport_egress(hop))
    }
}

/// Render each hop of a chain in order, stopping at the first
/// failure. On success, return the number of hops rendered.
pub fn render_chain<P: TransportProcessor + ?Sized>(
    p: &P,
    hops: &[(HopDescriptor, HopShape)],
) -> Result<usize, RenderError> {
    for (index, (hop, shape)) in hops.iter().enumerate() {
        render_hop(p, hop, *shape)
            .map_err(|source| RenderError { index, source })?;
    }

    Ok(hops.len())
}
