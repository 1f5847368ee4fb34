// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! The hop rendering engine.
pub mod error;
pub mod logical_sff;
pub mod program;
pub mod render;
pub mod resolve;
pub mod transport;

pub use error::HopError;
pub use error::HopResult;
