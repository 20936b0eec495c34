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

#![deny(clippy::all)]

use procfs::InterfaceStat;
use procfs::ProtocolCounters;
use procfs::RouteEntry;

mod protocol;
pub use protocol::*;

#[cfg(test)]
mod test;

/// One point-in-time view of the network stack. Built once per report and
/// only ever handed out by shared reference.
#[derive(Default, Clone, PartialEq, Debug)]
pub struct Snapshot {
    /// Sorted by name
    pub interfaces: Vec<InterfaceStat>,
    /// Kernel order
    pub routes: Vec<RouteEntry>,
    pub protocols: ProtocolSnapshot,
}

impl Snapshot {
    pub fn build(
        interfaces: Vec<InterfaceStat>,
        routes: Vec<RouteEntry>,
        protocols: ProtocolCounters,
    ) -> procfs::Result<Snapshot> {
        Ok(SnapshotBuilder::new()
            .interfaces(interfaces)
            .routes(routes)
            .protocols(protocols)?
            .build())
    }
}

/// Assembles a Snapshot from whichever adapter reads a report needed.
/// Sources that were not read stay empty.
#[derive(Default)]
pub struct SnapshotBuilder {
    snapshot: Snapshot,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn interfaces(mut self, mut interfaces: Vec<InterfaceStat>) -> Self {
        interfaces.sort_by(|a, b| a.name.cmp(&b.name));
        self.snapshot.interfaces = interfaces;
        self
    }

    pub fn routes(mut self, routes: Vec<RouteEntry>) -> Self {
        self.snapshot.routes = routes;
        self
    }

    pub fn protocols(mut self, raw: ProtocolCounters) -> procfs::Result<Self> {
        self.snapshot.protocols = ProtocolSnapshot::new(raw)?;
        Ok(self)
    }

    pub fn build(self) -> Snapshot {
        self.snapshot
    }
}
