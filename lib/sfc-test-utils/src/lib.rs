// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! Test doubles for the renderer's collaborators.

// This type of pedantry is more trouble than it's worth here.
#![allow(dead_code)]

pub mod log;
pub mod namer;
pub mod programmer;
pub mod resolver;

pub use log::CaptureLog;
pub use namer::DpnNamer;
pub use namer::SffNamer;
pub use programmer::RecordingProgrammer;
pub use resolver::MappingResolver;
pub use resolver::ResolverCall;
