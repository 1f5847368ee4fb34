// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! Render service function chain hops into flow programming for
//! chains built on logical, overlay-backed forwarders.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unreachable_patterns)]
#![deny(unused_must_use)]

#[macro_use]
extern crate alloc;

pub use sfc_api as api;

pub mod cfg;
pub mod engine;
#[cfg(feature = "std")]
pub mod print;
pub mod provider;

pub use provider::ExecCtx;
