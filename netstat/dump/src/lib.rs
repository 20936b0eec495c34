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

use std::fmt;
use std::io::Write;

use anyhow::Context;
use anyhow::Result;
use model::Snapshot;
use model::SnapshotBuilder;
use procfs::CounterSource;
use render::RenderConfig;
use render::RenderConfigBuilder;
use slog::debug;

pub mod iface;
pub mod route;
pub mod stats;


#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Interfaces,
    Routes,
    Statistics,
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Interfaces => write!(f, "interface table"),
            ViewMode::Routes => write!(f, "routing table"),
            ViewMode::Statistics => write!(f, "protocol statistics"),
        }
    }
}

/// What the caller asked to see.
#[derive(Clone, Debug, Default)]
pub struct ViewSelection {
    pub mode: ViewMode,
    /// Only meaningful for the interface table. A name that matches nothing
    /// gives a table with no rows.
    pub interface: Option<String>,
}

/// One report view. Collection is the only fallible step; rendering a
/// snapshot always succeeds and is deterministic.
pub trait Dumper {
    /// Reads only the sources this view needs.
    fn collect(&self, source: &dyn CounterSource) -> procfs::Result<Snapshot>;
    fn dump_snapshot(&self, snapshot: &Snapshot) -> String;
}

fn get_dumper(selection: &ViewSelection) -> Box<dyn Dumper> {
    match selection.mode {
        ViewMode::Interfaces => Box::new(iface::Iface::new(selection.interface.clone())),
        ViewMode::Routes => Box::new(route::Route::new()),
        ViewMode::Statistics => Box::new(stats::Stats::new()),
    }
}

/// Reads, builds and renders one view. The report is rendered in full
/// before anything is written, so a failed read leaves `output` untouched.
pub fn run(
    logger: &slog::Logger,
    source: &dyn CounterSource,
    selection: &ViewSelection,
    output: &mut dyn Write,
) -> Result<()> {
    let dumper = get_dumper(selection);
    let snapshot = dumper
        .collect(source)
        .with_context(|| format!("Failed to read {}", selection.mode))?;
    debug!(
        logger,
        "Collected {}: {} interfaces, {} routes, {} protocol sections",
        selection.mode,
        snapshot.interfaces.len(),
        snapshot.routes.len(),
        snapshot.protocols.sections.len()
    );

    let report = dumper.dump_snapshot(&snapshot);
    output
        .write_all(report.as_bytes())
        .with_context(|| format!("Failed to write {}", selection.mode))?;
    output.flush().context("Failed to flush output")?;
    Ok(())
}

fn column(title: &str, width: usize) -> RenderConfig {
    RenderConfigBuilder::new().title(title).width(width).get()
}

fn text_column(title: &str, width: usize) -> RenderConfig {
    RenderConfigBuilder::new()
        .title(title)
        .width(width)
        .truncate()
        .get()
}

fn last_column(title: &str) -> RenderConfig {
    RenderConfigBuilder::new().title(title).get()
}
