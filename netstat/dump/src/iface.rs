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

use procfs::InterfaceFlags;
use procfs::InterfaceStat;
use render::flag_letters;
use render::render_row;
use render::render_title_line;

use super::*;

pub const TITLE: &str = "Kernel Interface table";

const FLAG_LETTERS: &[(u32, char)] = &[
    (InterfaceFlags::BROADCAST, 'B'),
    (InterfaceFlags::LOOPBACK, 'L'),
    (InterfaceFlags::MULTICAST, 'M'),
    (InterfaceFlags::POINTOPOINT, 'P'),
    (InterfaceFlags::NOARP, 'O'),
    (InterfaceFlags::UP, 'U'),
    (InterfaceFlags::RUNNING, 'R'),
];

pub struct Iface {
    filter: Option<String>,
    columns: Vec<RenderConfig>,
}

impl Iface {
    pub fn new(filter: Option<String>) -> Self {
        Self {
            filter,
            columns: vec![
                text_column("Iface", 16),
                column("MTU", 8),
                column("Rx-OK", 8),
                column("Rx-ERR", 8),
                column("Rx-DRP", 8),
                column("Rx-OVR", 8),
                column("TX-OK", 8),
                column("TX-ERR", 8),
                column("TX-DRP", 8),
                column("TX-OVR", 8),
                last_column("Flg"),
            ],
        }
    }

    fn selected(&self, stat: &InterfaceStat) -> bool {
        self.filter.as_ref().is_none_or(|name| *name == stat.name)
    }

    fn dump_row(&self, stat: &InterfaceStat) -> String {
        render_row(
            &self.columns,
            &[
                stat.name.clone(),
                stat.mtu.to_string(),
                stat.rx_packets.to_string(),
                stat.rx_errors.to_string(),
                stat.rx_dropped.to_string(),
                stat.rx_overruns.to_string(),
                stat.tx_packets.to_string(),
                stat.tx_errors.to_string(),
                stat.tx_dropped.to_string(),
                stat.tx_overruns.to_string(),
                flag_letters(stat.flags.0, FLAG_LETTERS),
            ],
        )
    }
}

impl Dumper for Iface {
    fn collect(&self, source: &dyn CounterSource) -> procfs::Result<Snapshot> {
        Ok(SnapshotBuilder::new()
            .interfaces(source.read_interfaces()?)
            .build())
    }

    fn dump_snapshot(&self, snapshot: &Snapshot) -> String {
        let mut res = format!("{}\n", TITLE);
        res.push_str(&render_title_line(&self.columns));
        for stat in snapshot.interfaces.iter().filter(|s| self.selected(s)) {
            res.push_str(&self.dump_row(stat));
        }
        res
    }
}
