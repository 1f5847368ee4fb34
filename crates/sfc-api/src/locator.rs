// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! Data plane locators and the service functions which carry them.

use super::mac::MacAddr;
use core::fmt;
use core::fmt::Display;
use core::net::IpAddr;
use serde::Deserialize;
use serde::Serialize;

name_type!(
    /// The name of a logical interface, as known to the overlay
    /// resolver.
    InterfaceName
);

name_type!(
    /// The name of a service function.
    SfName
);

/// A locator which addresses a service function directly on the
/// physical network.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum PhysicalLocator {
    Ip { ip: IpAddr, port: u16 },
    Mac { mac: MacAddr, vlan: Option<u16> },
}

/// A locator which names a logical interface. The overlay decides
/// where that interface actually lives.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct LogicalInterfaceLocator {
    pub interface_name: InterfaceName,
}

/// How a service function is reached on the data plane.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Locator {
    Physical(PhysicalLocator),
    LogicalInterface(LogicalInterfaceLocator),
}

impl Locator {
    pub fn logical(interface_name: impl Into<InterfaceName>) -> Self {
        Self::LogicalInterface(LogicalInterfaceLocator {
            interface_name: interface_name.into(),
        })
    }

    /// Return the logical interface locator, if this is one.
    pub fn as_logical_interface(&self) -> Option<&LogicalInterfaceLocator> {
        match self {
            Self::LogicalInterface(lil) => Some(lil),
            Self::Physical(_) => None,
        }
    }

    /// A short name for the locator variant, used in error reporting.
    pub fn kind(&self) -> LocatorKind {
        match self {
            Self::Physical(PhysicalLocator::Ip { .. }) => LocatorKind::Ip,
            Self::Physical(PhysicalLocator::Mac { .. }) => LocatorKind::Mac,
            Self::LogicalInterface(_) => LocatorKind::LogicalInterface,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum LocatorKind {
    Ip,
    Mac,
    LogicalInterface,
}

impl Display for LocatorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::Ip => "ip",
            Self::Mac => "mac",
            Self::LogicalInterface => "logical-interface",
        };
        write!(f, "{s}")
    }
}

/// A service function terminating a hop.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ServiceFunction {
    pub name: SfName,
    pub locator: Locator,
}

impl ServiceFunction {
    pub fn new(name: impl Into<SfName>, locator: Locator) -> Self {
        Self { name: name.into(), locator }
    }

    /// The logical interface this service function is attached to.
    ///
    /// Returns the actual locator kind when the service function is
    /// not attached to a logical interface.
    pub fn logical_interface(&self) -> Result<&InterfaceName, LocatorKind> {
        self.locator
            .as_logical_interface()
            .map(|lil| &lil.interface_name)
            .ok_or(self.locator.kind())
    }
}
