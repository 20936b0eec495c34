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

use std::io;
use std::path::PathBuf;
use std::process::exit;

use anyhow::Result;
use clap::ArgGroup;
use clap::Parser;
use config::NetstatConfig;
use dump::ViewMode;
use dump::ViewSelection;
use procfs::NetReader;
use slog::debug;
use slog::error;

#[cfg(test)]
mod test;

#[derive(Debug, Parser)]
#[clap(
    name = "netstat",
    about = "Print network interfaces, the routing table and protocol statistics",
    group(ArgGroup::new("view").args(["interfaces", "interface", "route", "statistics"]))
)]
struct Opt {
    #[clap(long, default_value = config::NETSTAT_DEFAULT_CONF)]
    config: PathBuf,
    #[clap(short, long)]
    debug: bool,
    /// Display the interface table (default)
    #[clap(short, long)]
    interfaces: bool,
    /// Display the interface table for NAME only
    #[clap(short = 'I', long, value_name = "NAME")]
    interface: Option<String>,
    /// Display the kernel routing table
    #[clap(short, long)]
    route: bool,
    /// Display summary statistics for each protocol
    #[clap(short, long)]
    statistics: bool,
}

impl Opt {
    fn selection(&self) -> ViewSelection {
        let mode = if self.route {
            ViewMode::Routes
        } else if self.statistics {
            ViewMode::Statistics
        } else {
            ViewMode::Interfaces
        };
        ViewSelection {
            mode,
            interface: self.interface.clone(),
        }
    }
}

fn real_main(logger: &slog::Logger, netstat_config: &NetstatConfig, opts: &Opt) -> Result<()> {
    debug!(
        logger,
        "Reading interfaces from {} and protocol files from {}",
        netstat_config.sys_class_net_path.display(),
        netstat_config.proc_net_path.display()
    );
    let reader = NetReader::new_with_custom_path(
        logger.clone(),
        netstat_config.sys_class_net_path.clone(),
        netstat_config.proc_net_path.clone(),
    );
    let stdout = io::stdout();
    dump::run(logger, &reader, &opts.selection(), &mut stdout.lock())
}

fn main() {
    let opts = Opt::parse();
    config::NETSTAT_CONFIG
        .set(match NetstatConfig::load(&opts.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{:#}", e);
                exit(1);
            }
        })
        .expect("NETSTAT_CONFIG singleton set twice");
    let netstat_config = config::NETSTAT_CONFIG
        .get()
        .expect("NETSTAT_CONFIG empty after set");

    let logger = common::logutil::setup(opts.debug);
    if let Err(e) = real_main(&logger, netstat_config, &opts) {
        error!(logger, "{:#}", e);
        exit(1);
    }
}
