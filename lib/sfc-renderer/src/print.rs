// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! Print programming plans in a human-friendly manner.
//!
//! This is mostly just a place to hang printing routines so that they
//! can be used by both controllers and integration tests.

use crate::api::FlowCmd;
use std::io::Write;
use tabwriter::TabWriter;

/// Print a list of [`FlowCmd`].
pub fn print_flow_cmds(cmds: &[FlowCmd]) -> std::io::Result<()> {
    print_flow_cmds_into(&mut std::io::stdout(), cmds)
}

/// Print a list of [`FlowCmd`].
pub fn print_flow_cmds_into(
    writer: &mut impl Write,
    cmds: &[FlowCmd],
) -> std::io::Result<()> {
    let mut t = TabWriter::new(writer);

    writeln!(t, "Flows: {}", cmds.len())?;
    write_hrb(&mut t)?;
    print_flow_cmd_header(&mut t)?;
    for cmd in cmds {
        print_flow_cmd(&mut t, cmd)?;
    }
    t.flush()
}

/// Print the header for the [`print_flow_cmd()`] output.
pub fn print_flow_cmd_header(t: &mut impl Write) -> std::io::Result<()> {
    writeln!(t, "KIND\tNODE\tNSP\tNSI\tDETAIL")
}

/// Print a single [`FlowCmd`].
pub fn print_flow_cmd(
    t: &mut impl Write,
    cmd: &FlowCmd,
) -> std::io::Result<()> {
    let detail = match cmd {
        FlowCmd::NextHop { mac, .. } => format!("dst {mac}"),
        FlowCmd::TransportEgress { actions, .. } => actions.to_string(),
        FlowCmd::Ingress { .. } | FlowCmd::LastHopEgress { .. } => {
            "--".to_string()
        }
    };

    writeln!(
        t,
        "{}\t{}\t{}\t{}\t{}",
        cmd.kind(),
        cmd.node(),
        cmd.path_id(),
        cmd.service_index(),
        detail,
    )
}

/// Output a horizontal rule in bold to the given writer.
pub fn write_hrb(t: &mut impl Write) -> std::io::Result<()> {
    writeln!(t, "{:=<70}", "=")
}
