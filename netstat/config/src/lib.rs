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

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::OnceLock;

use anyhow::bail;
use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;


pub const NETSTAT_DEFAULT_CONF: &str = "/etc/netstat/netstat.conf";

/// Global netstat config
pub static NETSTAT_CONFIG: OnceLock<NetstatConfig> = OnceLock::new();

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
// Missing keys fall back to Default::default()
#[serde(default)]
pub struct NetstatConfig {
    /// Where the route, snmp and netstat files are read from
    pub proc_net_path: PathBuf,
    /// Where one directory (or symlink) per network device lives
    pub sys_class_net_path: PathBuf,
}

impl Default for NetstatConfig {
    fn default() -> Self {
        NetstatConfig {
            proc_net_path: procfs::NET_PROCFS.into(),
            sys_class_net_path: procfs::NET_SYSFS.into(),
        }
    }
}

impl NetstatConfig {
    /// Loads `path`. Only the default location may be absent, in which case
    /// the built-in defaults are used.
    pub fn load(path: &Path) -> Result<Self> {
        match path.exists() {
            true if !path.is_file() => bail!("{} exists and is not a file", path.to_string_lossy()),
            true => NetstatConfig::load_exists(path),
            false if path.to_string_lossy() == NETSTAT_DEFAULT_CONF => Ok(Default::default()),
            false => bail!("No such file or directory: {}", path.to_string_lossy()),
        }
    }

    fn load_exists(path: &Path) -> Result<Self> {
        let string_config = match fs::read_to_string(path) {
            Ok(sc) => sc,
            Err(e) => {
                bail!(
                    "Failed to read from config file {}: {}",
                    path.to_string_lossy(),
                    e
                );
            }
        };

        match toml::from_str(string_config.as_str()) {
            Ok(nc) => Ok(nc),
            Err(e) => {
                bail!(
                    "Failed to parse config file {}: {}",
                    path.to_string_lossy(),
                    e
                );
            }
        }
    }
}
