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

use std::fmt::Write;

use model::ProtocolSection;
use model::SectionKind;

use super::*;

const INDENT: &str = "    ";

// The histogram headers are spelled this way in every report consumers
// already parse; keep them as is.
pub const INPUT_HISTOGRAM_TITLE: &str = "Input historam:";
pub const OUTPUT_HISTOGRAM_TITLE: &str = "Output historam:";

/// How a known counter is phrased in the summary.
#[derive(Clone, Copy)]
enum Label {
    /// "<label> is <value>"
    Is(&'static str),
    /// "<value> <label>"
    Count(&'static str),
}

use Label::Count;
use Label::Is;

const IP_LABELS: &[(&str, Label)] = &[
    ("Forwarding", Is("Forwarding")),
    ("DefaultTTL", Is("Default TTL")),
    ("InReceives", Count("total packets received")),
    ("InHdrErrors", Count("with invalid headers")),
    ("InAddrErrors", Count("with invalid addresses")),
    ("ForwDatagrams", Count("forwarded")),
    ("InUnknownProtos", Count("with unknown protocol")),
    ("InDiscards", Count("incoming packets discarded")),
    ("InDelivers", Count("incoming packets delivered")),
    ("OutRequests", Count("requests sent out")),
    ("OutDiscards", Count("outgoing packets dropped")),
    ("OutNoRoutes", Count("dropped because of missing route")),
    ("ReasmTimeout", Count("fragments dropped after timeout")),
    ("ReasmReqds", Count("reassemblies required")),
    ("ReasmOKs", Count("packets reassembled ok")),
    ("ReasmFails", Count("packet reassembles failed")),
    ("FragOKs", Count("fragments received ok")),
    ("FragFails", Count("fragments failed")),
    ("FragCreates", Count("fragments created")),
];

const ICMP_LABELS: &[(&str, Label)] = &[
    ("InMsgs", Count("ICMP messages received")),
    ("InErrors", Count("input ICMP message failed")),
    ("OutMsgs", Count("ICMP messages sent")),
    ("OutErrors", Count("ICMP messages failed")),
];

const TCP_LABELS: &[(&str, Label)] = &[
    ("ActiveOpens", Count("active connection openings")),
    ("PassiveOpens", Count("passive connection openings")),
    ("AttemptFails", Count("failed connection attempts")),
    ("EstabResets", Count("connection resets received")),
    ("CurrEstab", Count("connections established")),
    ("InSegs", Count("segments received")),
    ("OutSegs", Count("segments sent out")),
    ("RetransSegs", Count("segments retransmitted")),
    ("InErrs", Count("bad segments received")),
    ("OutRsts", Count("resets sent")),
];

const UDP_LABELS: &[(&str, Label)] = &[
    ("InDatagrams", Count("packets received")),
    ("NoPorts", Count("packets to unknown port received")),
    ("InErrors", Count("packet receive errors")),
    ("OutDatagrams", Count("packets sent")),
    ("RcvbufErrors", Count("receive buffer errors")),
    ("SndbufErrors", Count("send buffer errors")),
];

/// Extended and unknown sections list every counter as `Key: value`.
fn labels(kind: &SectionKind) -> &'static [(&'static str, Label)] {
    match kind {
        SectionKind::Ip => IP_LABELS,
        SectionKind::Icmp => ICMP_LABELS,
        SectionKind::Tcp => TCP_LABELS,
        SectionKind::Udp | SectionKind::UdpLite => UDP_LABELS,
        _ => &[],
    }
}

pub struct Stats;

impl Stats {
    pub fn new() -> Self {
        Self
    }

    fn dump_section(section: &ProtocolSection, res: &mut String) {
        let table = labels(&section.kind);
        // Writing to a String can never fail, so unwrap() is safe in here
        writeln!(res, "{}:", section.kind.header()).unwrap();

        for (key, label) in table {
            let value = match section.counters.iter().find(|(k, _)| k == key) {
                Some((_, v)) => v,
                None => continue,
            };
            match label {
                Is(label) => writeln!(res, "{INDENT}{} is {}", label, value).unwrap(),
                Count(label) => writeln!(res, "{INDENT}{} {}", value, label).unwrap(),
            }
        }
        for (key, value) in &section.counters {
            if !table.iter().any(|(k, _)| k == key) {
                writeln!(res, "{INDENT}{}: {}", key, value).unwrap();
            }
        }

        for (title, histogram) in [
            (INPUT_HISTOGRAM_TITLE, &section.input_histogram),
            (OUTPUT_HISTOGRAM_TITLE, &section.output_histogram),
        ] {
            if histogram.is_empty() {
                continue;
            }
            writeln!(res, "{INDENT}{}", title).unwrap();
            for (label, value) in histogram {
                writeln!(res, "{INDENT}{INDENT}{}: {}", label, value).unwrap();
            }
        }
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

impl Dumper for Stats {
    fn collect(&self, source: &dyn CounterSource) -> procfs::Result<Snapshot> {
        Ok(SnapshotBuilder::new()
            .protocols(source.read_protocol_counters()?)?
            .build())
    }

    fn dump_snapshot(&self, snapshot: &Snapshot) -> String {
        let mut res = String::new();
        for section in &snapshot.protocols.sections {
            Self::dump_section(section, &mut res);
        }
        res
    }
}
