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

use std::net::Ipv4Addr;
use std::path::PathBuf;

/// Kernel `IFF_*` interface flag bits as found in `/sys/class/net/<iface>/flags`.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub struct InterfaceFlags(pub u32);

impl InterfaceFlags {
    pub const UP: u32 = libc::IFF_UP as u32;
    pub const BROADCAST: u32 = libc::IFF_BROADCAST as u32;
    pub const LOOPBACK: u32 = libc::IFF_LOOPBACK as u32;
    pub const POINTOPOINT: u32 = libc::IFF_POINTOPOINT as u32;
    pub const RUNNING: u32 = libc::IFF_RUNNING as u32;
    pub const NOARP: u32 = libc::IFF_NOARP as u32;
    pub const MULTICAST: u32 = libc::IFF_MULTICAST as u32;

    pub fn contains(&self, bit: u32) -> bool {
        self.0 & bit == bit
    }
}

#[derive(Default, Clone, PartialEq, Debug)]
pub struct InterfaceStat {
    pub name: String,
    pub mtu: u64,
    pub rx_packets: u64,
    pub rx_errors: u64,
    pub rx_dropped: u64,
    pub rx_overruns: u64,
    pub tx_packets: u64,
    pub tx_errors: u64,
    pub tx_dropped: u64,
    pub tx_overruns: u64,
    pub flags: InterfaceFlags,
}

/// Kernel `RTF_*` route flag bits as found in `/proc/net/route`.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub struct RouteFlags(pub u32);

impl RouteFlags {
    pub const UP: u32 = 0x0001;
    pub const GATEWAY: u32 = 0x0002;
    pub const HOST: u32 = 0x0004;
    pub const REINSTATE: u32 = 0x0008;
    pub const DYNAMIC: u32 = 0x0010;
    pub const MODIFIED: u32 = 0x0020;
    pub const REJECT: u32 = 0x0200;

    pub fn contains(&self, bit: u32) -> bool {
        self.0 & bit == bit
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct RouteEntry {
    pub iface: String,
    pub destination: Ipv4Addr,
    pub gateway: Ipv4Addr,
    pub mask: Ipv4Addr,
    pub flags: RouteFlags,
    pub ref_cnt: u64,
    pub use_cnt: u64,
    pub metric: u64,
    /// The kernel's `MTU` column, reported as MSS
    pub mss: u64,
    pub window: u64,
    pub irtt: u64,
}

impl RouteEntry {
    pub fn prefix_len(&self) -> u32 {
        u32::from(self.mask).count_ones()
    }

    /// True for `0.0.0.0/0`
    pub fn is_default(&self) -> bool {
        self.destination.is_unspecified() && self.prefix_len() == 0
    }
}

/// One `Prefix: keys` / `Prefix: values` pair from `/proc/net/snmp` or
/// `/proc/net/netstat`, in kernel order.
#[derive(Default, Clone, PartialEq, Debug)]
pub struct RawSection {
    pub name: String,
    pub source: PathBuf,
    pub counters: Vec<(String, u64)>,
}

impl RawSection {
    pub fn get(&self, key: &str) -> Option<u64> {
        self.counters
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| *v)
    }
}

#[derive(Default, Clone, PartialEq, Debug)]
pub struct ProtocolCounters {
    pub sections: Vec<RawSection>,
}

impl ProtocolCounters {
    pub fn section(&self, name: &str) -> Option<&RawSection> {
        self.sections.iter().find(|s| s.name == name)
    }
}
