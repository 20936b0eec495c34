// Copyright (c) Facebook, Inc. and its affiliates.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::PathBuf;

use procfs::Error;
use procfs::InterfaceStat;
use procfs::ProtocolCounters;
use procfs::RawSection;

use super::*;

fn raw_section(name: &str, counters: &[(&str, u64)]) -> RawSection {
    RawSection {
        name: name.to_owned(),
        source: PathBuf::from("/proc/net/snmp"),
        counters: counters.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
    }
}

fn iface(name: &str) -> InterfaceStat {
    InterfaceStat {
        name: name.to_owned(),
        ..Default::default()
    }
}

#[test]
fn test_interfaces_sorted_by_name() {
    let snapshot = SnapshotBuilder::new()
        .interfaces(vec![iface("wlan0"), iface("eth0"), iface("lo")])
        .build();
    let names: Vec<&str> = snapshot.interfaces.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["eth0", "lo", "wlan0"]);
    assert!(snapshot.routes.is_empty());
    assert!(snapshot.protocols.sections.is_empty());
}

#[test]
fn test_sections_in_declared_order() {
    let raw = ProtocolCounters {
        sections: vec![
            raw_section("IpExt", &[("InOctets", 896)]),
            raw_section("MPTcpExt", &[("MPCapableSYNRX", 0)]),
            raw_section("Udp", &[("InDatagrams", 0), ("OutDatagrams", 4)]),
            raw_section("IcmpMsg", &[("InType3", 4)]),
            raw_section("Ip", &[("Forwarding", 2), ("DefaultTTL", 64)]),
            raw_section("Icmp", &[("InMsgs", 6), ("OutMsgs", 6)]),
            raw_section("XfrmStat", &[("XfrmInError", 0)]),
        ],
    };
    let snapshot = Snapshot::build(vec![], vec![], raw).expect("Fail to build snapshot");
    let headers: Vec<String> = snapshot
        .protocols
        .sections
        .iter()
        .map(|s| s.kind.header().into_owned())
        .collect();
    assert_eq!(
        headers,
        vec!["ip", "icmp", "IcmpMsg", "udp", "ipExt", "mPTcpExt", "xfrmStat"]
    );
}

#[test]
fn test_counter_values_and_order_preserved() {
    let raw = ProtocolCounters {
        sections: vec![raw_section(
            "Ip",
            &[("Forwarding", 2), ("DefaultTTL", 64), ("InReceives", 10), ("OutTransmits", 0)],
        )],
    };
    let snapshot = SnapshotBuilder::new()
        .protocols(raw)
        .expect("Fail to build snapshot")
        .build();
    let ip = snapshot
        .protocols
        .section(&SectionKind::Ip)
        .expect("Fail to find ip");
    assert_eq!(
        ip.counters,
        vec![
            ("Forwarding".to_owned(), 2),
            ("DefaultTTL".to_owned(), 64),
            ("InReceives".to_owned(), 10),
            ("OutTransmits".to_owned(), 0),
        ]
    );
}

#[test]
fn test_icmp_histograms() {
    let raw = ProtocolCounters {
        sections: vec![raw_section(
            "Icmp",
            &[
                ("InMsgs", 6),
                ("InErrors", 0),
                ("InDestUnreachs", 4),
                ("InEchos", 1),
                ("InEchoReps", 1),
                ("OutMsgs", 6),
                ("OutErrors", 0),
                ("OutEchoReps", 1),
                ("OutDestUnreachs", 4),
            ],
        )],
    };
    let snapshot = Snapshot::build(vec![], vec![], raw).expect("Fail to build snapshot");
    let icmp = snapshot
        .protocols
        .section(&SectionKind::Icmp)
        .expect("Fail to find icmp");
    let keys: Vec<&str> = icmp.counters.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["InMsgs", "InErrors", "OutMsgs", "OutErrors"]);
    assert_eq!(
        icmp.input_histogram,
        vec![
            ("destination unreachable".to_owned(), 4),
            ("echo requests".to_owned(), 1),
            ("echo replies".to_owned(), 1),
        ]
    );
    // Table order, not kernel order
    assert_eq!(
        icmp.output_histogram,
        vec![
            ("destination unreachable".to_owned(), 4),
            ("echo replies".to_owned(), 1),
        ]
    );
}

#[test]
fn test_empty_section_dropped() {
    let raw = ProtocolCounters {
        sections: vec![
            raw_section("Ip", &[("Forwarding", 1), ("DefaultTTL", 64)]),
            raw_section("IpExt", &[]),
        ],
    };
    let snapshot = Snapshot::build(vec![], vec![], raw).expect("Fail to build snapshot");
    assert_eq!(snapshot.protocols.sections.len(), 1);
    assert!(snapshot.protocols.section(&SectionKind::IpExt).is_none());
}

#[test]
fn test_missing_required_counter() {
    let raw = ProtocolCounters {
        sections: vec![raw_section("Ip", &[("Forwarding", 2)])],
    };
    match Snapshot::build(vec![], vec![], raw) {
        Err(Error::MalformedSource { path, reason, .. }) => {
            assert_eq!(path, PathBuf::from("/proc/net/snmp"));
            assert_eq!(reason, "missing required counter DefaultTTL");
        }
        other => panic!("Expected MalformedSource, got {:?}", other),
    }
}
