// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! Data types shared between the service chain renderer and the
//! systems which feed it hops and consume its programming
//! instructions.

#![no_std]
#![deny(unreachable_patterns)]
#![deny(unused_must_use)]

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

#[macro_use]
extern crate alloc;

/// Declare a string-backed name type.
///
/// These names are opaque to the renderer: it only ever compares,
/// clones, and displays them.
macro_rules! name_type {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(
            Clone,
            Debug,
            serde::Deserialize,
            Eq,
            Hash,
            Ord,
            PartialEq,
            PartialOrd,
            serde::Serialize,
        )]
        #[serde(transparent)]
        pub struct $name(alloc::string::String);

        impl $name {
            pub fn new(name: impl Into<alloc::string::String>) -> Self {
                Self(name.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.into())
            }
        }

        impl From<alloc::string::String> for $name {
            fn from(s: alloc::string::String) -> Self {
                Self(s)
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

pub mod action;
pub mod flow;
pub mod hop;
pub mod locator;
pub mod mac;

pub use action::*;
pub use flow::*;
pub use hop::*;
pub use locator::*;
pub use mac::*;
