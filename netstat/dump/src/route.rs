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

use procfs::RouteEntry;
use procfs::RouteFlags;
use render::flag_letters;
use render::render_row;
use render::render_title_line;
use render::Align;

use super::*;

pub const TITLE: &str = "Kernel IP routing table";

const FLAG_LETTERS: &[(u32, char)] = &[
    (RouteFlags::UP, 'U'),
    (RouteFlags::GATEWAY, 'G'),
    (RouteFlags::HOST, 'H'),
    (RouteFlags::REINSTATE, 'R'),
    (RouteFlags::DYNAMIC, 'D'),
    (RouteFlags::MODIFIED, 'M'),
    (RouteFlags::REJECT, '!'),
];

pub struct Route {
    columns: Vec<RenderConfig>,
}

impl Route {
    pub fn new() -> Self {
        Self {
            columns: vec![
                text_column("Destination", 16),
                column("Gateway", 16),
                column("Genmask", 16),
                column("Flags", 8),
                column("MSS", 3),
                RenderConfigBuilder::new()
                    .title("Window")
                    .width(6)
                    .separator("  ")
                    .get(),
                RenderConfigBuilder::new()
                    .title("irrt")
                    .width(4)
                    .align(Align::Right)
                    .get(),
                last_column("Iface"),
            ],
        }
    }

    fn destination(entry: &RouteEntry) -> String {
        if entry.is_default() {
            "default".to_owned()
        } else {
            entry.destination.to_string()
        }
    }

    fn dump_row(&self, entry: &RouteEntry) -> String {
        render_row(
            &self.columns,
            &[
                Self::destination(entry),
                entry.gateway.to_string(),
                entry.mask.to_string(),
                flag_letters(entry.flags.0, FLAG_LETTERS),
                entry.mss.to_string(),
                entry.window.to_string(),
                entry.irtt.to_string(),
                entry.iface.clone(),
            ],
        )
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::new()
    }
}

impl Dumper for Route {
    fn collect(&self, source: &dyn CounterSource) -> procfs::Result<Snapshot> {
        Ok(SnapshotBuilder::new().routes(source.read_routes()?).build())
    }

    fn dump_snapshot(&self, snapshot: &Snapshot) -> String {
        let mut res = format!("{}\n", TITLE);
        res.push_str(&render_title_line(&self.columns));
        for entry in &snapshot.routes {
            res.push_str(&self.dump_row(entry));
        }
        res
    }
}
