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

use std::borrow::Cow;

use procfs::Error;
use procfs::ProtocolCounters;
use procfs::RawSection;

/// ICMP per-type counters of the `Icmp` section and the histogram bucket
/// label each one is reported under.
pub const ICMP_INPUT_HISTOGRAM: &[(&str, &str)] = &[
    ("InDestUnreachs", "destination unreachable"),
    ("InTimeExcds", "timeout in transit"),
    ("InParmProbs", "wrong parameters"),
    ("InSrcQuenchs", "source quenches"),
    ("InRedirects", "redirects"),
    ("InEchos", "echo requests"),
    ("InEchoReps", "echo replies"),
    ("InTimestamps", "timestamp request"),
    ("InTimestampReps", "timestamp reply"),
    ("InAddrMasks", "address mask request"),
    ("InAddrMaskReps", "address mask replies"),
];

pub const ICMP_OUTPUT_HISTOGRAM: &[(&str, &str)] = &[
    ("OutDestUnreachs", "destination unreachable"),
    ("OutTimeExcds", "timeout in transit"),
    ("OutParmProbs", "wrong parameters"),
    ("OutSrcQuenchs", "source quenches"),
    ("OutRedirects", "redirects"),
    ("OutEchos", "echo requests"),
    ("OutEchoReps", "echo replies"),
    ("OutTimestamps", "timestamp request"),
    ("OutTimestampReps", "timestamp reply"),
    ("OutAddrMasks", "address mask request"),
    ("OutAddrMaskReps", "address mask replies"),
];

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SectionKind {
    Ip,
    Icmp,
    IcmpMsg,
    Tcp,
    Udp,
    UdpLite,
    TcpExt,
    IpExt,
    /// A kernel section this engine has no specific knowledge of
    Other(String),
}

impl SectionKind {
    pub fn from_kernel(name: &str) -> SectionKind {
        match name {
            "Ip" => SectionKind::Ip,
            "Icmp" => SectionKind::Icmp,
            "IcmpMsg" => SectionKind::IcmpMsg,
            "Tcp" => SectionKind::Tcp,
            "Udp" => SectionKind::Udp,
            "UdpLite" => SectionKind::UdpLite,
            "TcpExt" => SectionKind::TcpExt,
            "IpExt" => SectionKind::IpExt,
            other => SectionKind::Other(other.to_owned()),
        }
    }

    /// Position in the report. Unknown sections follow the declared ones.
    fn rank(&self) -> usize {
        match self {
            SectionKind::Ip => 0,
            SectionKind::Icmp => 1,
            SectionKind::IcmpMsg => 2,
            SectionKind::Tcp => 3,
            SectionKind::Udp => 4,
            SectionKind::UdpLite => 5,
            SectionKind::TcpExt => 6,
            SectionKind::IpExt => 7,
            SectionKind::Other(_) => 8,
        }
    }

    /// Section header text, without the trailing colon.
    pub fn header(&self) -> Cow<'static, str> {
        match self {
            SectionKind::Ip => "ip".into(),
            SectionKind::Icmp => "icmp".into(),
            SectionKind::IcmpMsg => "IcmpMsg".into(),
            SectionKind::Tcp => "tcp".into(),
            SectionKind::Udp => "udp".into(),
            SectionKind::UdpLite => "udpLite".into(),
            SectionKind::TcpExt => "tcpExt".into(),
            SectionKind::IpExt => "ipExt".into(),
            SectionKind::Other(name) => {
                let mut chars = name.chars();
                match chars.next() {
                    Some(first) => {
                        format!("{}{}", first.to_ascii_lowercase(), chars.as_str()).into()
                    }
                    None => Cow::Owned(String::new()),
                }
            }
        }
    }

    fn required_keys(&self) -> &'static [&'static str] {
        match self {
            SectionKind::Ip => &["Forwarding", "DefaultTTL"],
            SectionKind::Icmp => &["InMsgs", "OutMsgs"],
            SectionKind::Tcp => &["ActiveOpens", "PassiveOpens"],
            SectionKind::Udp => &["InDatagrams", "OutDatagrams"],
            _ => &[],
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct ProtocolSection {
    pub kind: SectionKind,
    /// Kernel order
    pub counters: Vec<(String, u64)>,
    /// Bucket label to count, only populated for ICMP
    pub input_histogram: Vec<(String, u64)>,
    pub output_histogram: Vec<(String, u64)>,
}

impl ProtocolSection {
    fn new(raw: RawSection) -> Result<ProtocolSection, Error> {
        let kind = SectionKind::from_kernel(&raw.name);
        for key in kind.required_keys() {
            if raw.get(key).is_none() {
                return Err(Error::MalformedSource {
                    path: raw.source,
                    line: format!("{}:", raw.name),
                    reason: format!("missing required counter {}", key),
                });
            }
        }

        let mut section = ProtocolSection {
            kind,
            counters: Vec::new(),
            input_histogram: Vec::new(),
            output_histogram: Vec::new(),
        };
        if section.kind == SectionKind::Icmp {
            section.input_histogram = histogram(&raw, ICMP_INPUT_HISTOGRAM);
            section.output_histogram = histogram(&raw, ICMP_OUTPUT_HISTOGRAM);
            section.counters = raw
                .counters
                .into_iter()
                .filter(|(k, _)| !is_histogram_key(k))
                .collect();
        } else {
            section.counters = raw.counters;
        }
        Ok(section)
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
            && self.input_histogram.is_empty()
            && self.output_histogram.is_empty()
    }
}

fn is_histogram_key(key: &str) -> bool {
    ICMP_INPUT_HISTOGRAM
        .iter()
        .chain(ICMP_OUTPUT_HISTOGRAM.iter())
        .any(|(k, _)| *k == key)
}

fn histogram(raw: &RawSection, table: &[(&str, &str)]) -> Vec<(String, u64)> {
    table
        .iter()
        .filter_map(|(key, label)| raw.get(key).map(|v| (label.to_string(), v)))
        .collect()
}

/// Protocol sections in report order. Sections without any counter are
/// never present.
#[derive(Default, Clone, PartialEq, Debug)]
pub struct ProtocolSnapshot {
    pub sections: Vec<ProtocolSection>,
}

impl ProtocolSnapshot {
    pub fn new(raw: ProtocolCounters) -> Result<ProtocolSnapshot, Error> {
        let mut sections = Vec::with_capacity(raw.sections.len());
        for raw_section in raw.sections {
            let section = ProtocolSection::new(raw_section)?;
            if !section.is_empty() {
                sections.push(section);
            }
        }
        // Stable, so unknown sections keep kernel order
        sections.sort_by_key(|s| s.kind.rank());
        Ok(ProtocolSnapshot { sections })
    }

    pub fn section(&self, kind: &SectionKind) -> Option<&ProtocolSection> {
        self.sections.iter().find(|s| &s.kind == kind)
    }
}
