// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! Tests for the logical SFF processor, one operation family at a
//! time.

mod common;

use common::*;
use std::sync::Arc;
use std::thread;

// ================================================================
// Transport ingress
// ================================================================

#[test]
fn sff_ingress_installs_on_dst_node() {
    let h = Harness::default();
    let hop = sff_hop(7, 254);

    h.processor.sff_transport_ingress(&hop).unwrap();
    h.processor.sf_transport_ingress(&hop).unwrap();

    assert_eq!(
        h.cmds(),
        vec![FlowCmd::Ingress {
            node: "n2".into(),
            path_id: 7,
            service_index: 254,
        }]
    );
    assert!(h.calls().is_empty());
}

// ================================================================
// Path mapping
// ================================================================

#[test]
fn path_mapping_does_nothing() {
    let h = Harness::default();
    let hop = sf_hop(7, 254);

    h.processor.sff_path_mapper(&hop).unwrap();
    h.processor.sf_path_mapper(&hop).unwrap();

    assert!(h.cmds().is_empty());
    assert!(h.calls().is_empty());
}

// ================================================================
// Next hop
// ================================================================

#[test]
fn sff_to_sf_next_hop() {
    let h = Harness::default();
    h.resolver.set_address("sf-if-1", SF_MAC);
    let hop = sf_hop(10, 255);

    h.processor.next_hop(&hop, NextHopShape::SffToSf).unwrap();

    assert_eq!(h.calls(), vec![ResolverCall::Address("sf-if-1".into())]);
    assert_eq!(
        h.cmds(),
        vec![FlowCmd::NextHop {
            node: "n1".into(),
            mac: SF_MAC,
            path_id: 10,
            service_index: 255,
        }]
    );
}

#[test]
fn sf_to_sf_next_hop_lives_on_src_sff() {
    let h = Harness::with_namer(RendererCfg::default(), Arc::new(SffNamer));
    h.resolver.set_address("sf-if-2", SF_MAC);
    let hop = HopDescriptor::new(3, 200, "sff-a", HopDst::Sff("sff-b".into()))
        .with_nodes("n1", "n1")
        .with_sf(logical_sf("sf-2", "sf-if-2"));

    h.processor.next_hop(&hop, NextHopShape::SfToSf).unwrap();

    assert_eq!(h.calls(), vec![ResolverCall::Address("sf-if-2".into())]);
    assert_eq!(
        h.cmds(),
        vec![FlowCmd::NextHop {
            node: "sff-a/3".into(),
            mac: SF_MAC,
            path_id: 3,
            service_index: 200,
        }]
    );
}

#[test]
fn sff_to_sf_next_hop_is_named_after_dst_sff() {
    let h = Harness::with_namer(RendererCfg::default(), Arc::new(SffNamer));
    h.resolver.set_address("sf-if-2", SF_MAC);
    let hop = HopDescriptor::new(3, 200, "sff-a", HopDst::Sff("sff-b".into()))
        .with_nodes("n1", "n2")
        .with_sf(logical_sf("sf-2", "sf-if-2"));

    h.processor.next_hop(&hop, NextHopShape::SffToSf).unwrap();

    assert_eq!(h.cmds()[0].node(), &NodeName::from("sff-b/3"));
}

#[test]
fn next_hop_towards_sff_does_nothing() {
    let h = Harness::default();
    let hop = sff_hop(7, 254).intra_overlay();

    h.processor.next_hop(&hop, NextHopShape::SfToSff).unwrap();
    h.processor.next_hop(&hop, NextHopShape::SffToSff).unwrap();

    assert!(h.calls().is_empty());
    assert!(h.cmds().is_empty());
}

#[test]
fn next_hop_without_address_fails() {
    let h = Harness::default();
    let hop = sf_hop(10, 255);

    for shape in [NextHopShape::SffToSf, NextHopShape::SfToSf] {
        let err = h.processor.next_hop(&hop, shape).unwrap_err();
        assert_eq!(
            err,
            HopError::ResolutionAbsent(Query::Address {
                interface: "sf-if-1".into()
            })
        );
    }

    assert!(h.cmds().is_empty());
}

#[test]
fn next_hop_to_physical_sf_is_refused() {
    let h = Harness::default();
    let sf = ServiceFunction::new(
        "dpi-1",
        Locator::Physical(PhysicalLocator::Mac {
            mac: SF_MAC,
            vlan: Some(100),
        }),
    );
    let hop = sff_hop(10, 255).with_sf(sf);

    let err = h.processor.next_hop(&hop, NextHopShape::SffToSf).unwrap_err();
    assert_eq!(
        err,
        HopError::LocatorTypeMismatch {
            sf: "dpi-1".into(),
            found: LocatorKind::Mac
        }
    );
    assert!(h.calls().is_empty());
    assert!(h.cmds().is_empty());
}

// ================================================================
// Transport egress towards a service function
// ================================================================

#[test]
fn sf_egress() {
    let h = Harness::default();
    h.resolver.set_egress_actions(
        "sf-if-1",
        EgressLink::ServiceFunction,
        vec![EgressAction::PushVlan { vid: 100 }, output(7)],
    );
    let hop = sf_hop(10, 255);

    h.processor.sf_transport_egress(&hop).unwrap();

    assert_eq!(
        h.calls(),
        vec![ResolverCall::EgressActions(
            "sf-if-1".into(),
            EgressLink::ServiceFunction
        )]
    );
    assert_eq!(
        h.cmds(),
        vec![FlowCmd::TransportEgress {
            node: "n1".into(),
            path_id: 10,
            service_index: 255,
            actions: actions(vec![
                EgressAction::PushVlan { vid: 100 },
                output(7)
            ]),
        }]
    );
}

#[test]
fn sf_egress_ignores_inter_node_actions() {
    let h = Harness::default();
    h.resolver.set_egress_actions(
        "sf-if-1",
        EgressLink::InterNode,
        vec![output(9)],
    );

    let err = h.processor.sf_transport_egress(&sf_hop(10, 255)).unwrap_err();
    assert_eq!(
        err,
        HopError::ResolutionAbsent(Query::EgressActions {
            interface: "sf-if-1".into(),
            link: EgressLink::ServiceFunction,
        })
    );
    assert!(h.cmds().is_empty());
}

// Scenario: the resolver knows the SF interface but has nothing to
// say about how to reach it.
#[test]
fn sf_egress_empty_action_list() {
    let h = Harness::default();
    h.resolver.set_egress_actions(
        "sf-if-1",
        EgressLink::ServiceFunction,
        vec![],
    );

    let err = h.processor.sf_transport_egress(&sf_hop(10, 255)).unwrap_err();
    assert_eq!(
        err,
        HopError::EmptyActionList {
            interface: "sf-if-1".into(),
            link: EgressLink::ServiceFunction,
        }
    );
    assert!(err.is_resolution_failure());
    assert_eq!(h.calls().len(), 1);
    assert!(h.cmds().is_empty());
}

#[test]
fn sf_egress_at_chain_egress_is_refused() {
    let h = Harness::default();
    let hop = HopDescriptor::new(10, 255, "sff-1", HopDst::ChainEgress)
        .with_sf(logical_sf("sf-1", "sf-if-1"));

    let err = h.processor.sf_transport_egress(&hop).unwrap_err();
    assert_eq!(
        err,
        HopError::UnexpectedChainEgress { path_id: 10, service_index: 255 }
    );
    assert!(h.calls().is_empty());
}

// ================================================================
// Transport egress towards a forwarder
// ================================================================

#[test]
fn chain_egress_installs_last_hop() {
    let h = Harness::default();
    let hop = HopDescriptor::new(10, 255, "sff-a", HopDst::ChainEgress)
        .with_src_node("nodeA");

    h.processor.sff_transport_egress(&hop).unwrap();

    assert!(h.calls().is_empty());
    assert_eq!(
        h.cmds(),
        vec![FlowCmd::LastHopEgress {
            node: "nodeA".into(),
            path_id: 10,
            service_index: 255,
        }]
    );
}

#[test]
fn chain_egress_wins_over_intra_overlay() {
    let h = Harness::default();
    let hop = HopDescriptor::new(10, 255, "sff-a", HopDst::ChainEgress)
        .with_src_node("nodeA")
        .intra_overlay();

    h.processor.sff_transport_egress(&hop).unwrap();

    assert!(h.calls().is_empty());
    assert_eq!(h.cmds()[0].kind(), "last-hop-egress");
}

#[test]
fn intra_overlay_egress() {
    let h = Harness::default();
    h.resolver.set_interface("n1", "n2", "tun12");
    h.resolver.set_egress_actions(
        "tun12",
        EgressLink::InterNode,
        vec![output(3)],
    );
    let hop = sff_hop(42, 253).intra_overlay();

    h.processor.sff_transport_egress(&hop).unwrap();

    assert_eq!(
        h.calls(),
        vec![
            ResolverCall::InterconnectingInterface("n1".into(), "n2".into()),
            ResolverCall::EgressActions("tun12".into(), EgressLink::InterNode),
        ]
    );
    assert_eq!(
        h.cmds(),
        vec![FlowCmd::TransportEgress {
            node: "n1".into(),
            path_id: 42,
            service_index: 253,
            actions: actions(vec![output(3)]),
        }]
    );
}

#[test]
fn intra_overlay_egress_without_interface() {
    let h = Harness::default();
    h.resolver.set_egress_actions(
        "tun12",
        EgressLink::InterNode,
        vec![output(3)],
    );
    let hop = sff_hop(42, 253).intra_overlay();

    let err = h.processor.sff_transport_egress(&hop).unwrap_err();

    assert_eq!(
        err,
        HopError::ResolutionAbsent(Query::InterconnectingInterface {
            src: "n1".into(),
            dst: "n2".into(),
        })
    );
    // The action lookup is never attempted.
    assert_eq!(h.calls().len(), 1);
    assert!(h.cmds().is_empty());
}

#[test]
fn intra_overlay_egress_without_actions() {
    let h = Harness::default();
    h.resolver.set_interface("n1", "n2", "tun12");
    let hop = sff_hop(42, 253).intra_overlay();

    let err = h.processor.sff_transport_egress(&hop).unwrap_err();
    assert_eq!(
        err,
        HopError::ResolutionAbsent(Query::EgressActions {
            interface: "tun12".into(),
            link: EgressLink::InterNode,
        })
    );

    h.resolver.set_egress_actions("tun12", EgressLink::InterNode, vec![]);
    let err = h.processor.sff_transport_egress(&hop).unwrap_err();
    assert_eq!(
        err,
        HopError::EmptyActionList {
            interface: "tun12".into(),
            link: EgressLink::InterNode,
        }
    );

    assert_eq!(h.calls().len(), 4);
    assert!(h.cmds().is_empty());
}

#[test]
fn uncovered_egress_is_logged() {
    let h = Harness::default();

    h.processor.sff_transport_egress(&sff_hop(42, 253)).unwrap();

    assert!(h.calls().is_empty());
    assert!(h.cmds().is_empty());
    let warnings = h.log.at(LogLevel::Warn);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("neither chain egress nor intra-overlay"));
}

#[test]
fn uncovered_egress_denied() {
    let cfg = RendererCfg {
        uncovered_hop: UncoveredHopPolicy::Deny,
        ..Default::default()
    };
    let h = Harness::new(cfg);

    let err = h.processor.sff_transport_egress(&sff_hop(42, 253)).unwrap_err();
    assert_eq!(
        err,
        HopError::UncoveredHopShape { path_id: 42, service_index: 253 }
    );
    assert!(h.cmds().is_empty());
}

// ================================================================
// Cross-cutting behavior
// ================================================================

#[test]
fn identical_answers_give_identical_flows() {
    let h = Harness::default();
    h.resolver.set_interface("n1", "n2", "tun12");
    h.resolver.set_egress_actions(
        "tun12",
        EgressLink::InterNode,
        vec![EgressAction::SetTunnelId { id: 0x2a }, output(3)],
    );
    let hop = sff_hop(42, 253).intra_overlay();

    h.processor.sff_transport_egress(&hop).unwrap();
    h.processor.sff_transport_egress(&hop).unwrap();

    let cmds = h.cmds();
    assert_eq!(cmds.len(), 2);
    assert_eq!(cmds[0], cmds[1]);

    // Replaying the recorded plan programs exactly the same flows.
    let replay = RecordingProgrammer::new();
    for cmd in &cmds {
        sfc_renderer::engine::program::FlowProgrammer::install(&replay, cmd)
            .unwrap();
    }
    assert_eq!(replay.cmds(), cmds);
}

#[test]
fn programming_failure_is_fatal() {
    let h = Harness::default();
    h.programmer.fail_node("nodeA");
    let hop = HopDescriptor::new(10, 255, "sff-a", HopDst::ChainEgress)
        .with_src_node("nodeA");

    let err = h.processor.sff_transport_egress(&hop).unwrap_err();
    assert!(matches!(
        err,
        HopError::Program(ref e) if e.node.as_str() == "nodeA"
    ));
    assert!(!err.is_resolution_failure());
    assert!(h.cmds().is_empty());
}

#[test]
fn failures_are_logged_as_errors() {
    let h = Harness::default();

    let err = h.processor.sf_transport_egress(&sf_hop(10, 255)).unwrap_err();

    let errors = h.log.at(LogLevel::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("sff-1 -> sff-1 (nsp:10 nsi:255)"));
    assert!(errors[0].ends_with(&err.to_string()));
}

#[test]
fn resolutions_are_logged_when_asked() {
    let quiet = RendererCfg { log_resolutions: false, ..Default::default() };

    for (cfg, expected) in [(RendererCfg::default(), 1), (quiet, 0)] {
        let h = Harness::new(cfg);
        h.resolver.set_address("sf-if-1", SF_MAC);
        h.processor.next_hop(&sf_hop(10, 255), NextHopShape::SffToSf).unwrap();

        let lines = h
            .log
            .at(LogLevel::Debug)
            .into_iter()
            .filter(|l| l.contains("has address a8:40:25:00:00:63"))
            .count();
        assert_eq!(lines, expected);
    }
}

#[test]
fn concurrent_hops() {
    let h = Harness::default();
    for i in 0..8u32 {
        let (src, dst) = (format!("n{i}"), format!("n{}", i + 1));
        let tun = format!("tun{i}");
        h.resolver.set_interface(&src, &dst, &tun);
        h.resolver.set_egress_actions(
            &tun,
            EgressLink::InterNode,
            vec![output(i)],
        );
    }

    let Harness { resolver: _, programmer, log: _, processor } = h;
    let processor = Arc::new(processor);
    let handles: Vec<_> = (0..8u32)
        .map(|i| {
            let p = Arc::clone(&processor);
            thread::spawn(move || {
                let hop = HopDescriptor::new(
                    100 + u64::from(i),
                    255,
                    "sff-1",
                    HopDst::Sff("sff-2".into()),
                )
                .with_nodes(format!("n{i}"), format!("n{}", i + 1))
                .intra_overlay();
                p.sff_transport_egress(&hop)
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap().unwrap();
    }

    let mut cmds = programmer.cmds();
    cmds.sort_by_key(|c| c.path_id());
    assert_eq!(cmds.len(), 8);
    for (i, cmd) in cmds.iter().enumerate() {
        assert_eq!(
            *cmd,
            FlowCmd::TransportEgress {
                node: NodeName::new(format!("n{i}")),
                path_id: 100 + i as u64,
                service_index: 255,
                actions: actions(vec![output(i as u32)]),
            }
        );
    }
}
