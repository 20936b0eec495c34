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

use std::io::BufRead;
use std::io::BufReader;
use std::io::ErrorKind;
use std::net::Ipv4Addr;
use std::path::Path;
use std::path::PathBuf;

use openat::Dir;
use openat::SimpleType;
use slog::debug;
use thiserror::Error;

mod types;
pub use types::*;


pub const NET_SYSFS: &str = "/sys/class/net/";
pub const NET_PROCFS: &str = "/proc/net";

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0:?} unavailable: {1}")]
    SourceUnavailable(PathBuf, #[source] std::io::Error),
    #[error("Malformed {path:?}: {reason} in line: {line}")]
    MalformedSource {
        path: PathBuf,
        line: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

macro_rules! parse_item {
    // Parse rhs (an option, usually from an iterator) into type $t, or
    // report the field $what as malformed on $line otherwise
    ($path:expr, $rhs:expr, $t:tt, $line:expr, $what:expr) => {
        match $rhs {
            Some(s) => s.parse::<$t>().map_err(|_| Error::MalformedSource {
                path: $path.to_path_buf(),
                line: $line.to_string(),
                reason: format!("{} {:?} is not a {}", $what, s, stringify!($t)),
            }),
            None => Err(Error::MalformedSource {
                path: $path.to_path_buf(),
                line: $line.to_string(),
                reason: format!("missing {}", $what),
            }),
        }
    };
}

macro_rules! parse_hex {
    ($path:expr, $rhs:expr, $line:expr, $what:expr) => {
        match $rhs {
            Some(s) => u32::from_str_radix(s.trim_start_matches("0x"), 16).map_err(|_| {
                Error::MalformedSource {
                    path: $path.to_path_buf(),
                    line: $line.to_string(),
                    reason: format!("{} {:?} is not hex", $what, s),
                }
            }),
            None => Err(Error::MalformedSource {
                path: $path.to_path_buf(),
                line: $line.to_string(),
                reason: format!("missing {}", $what),
            }),
        }
    };
}

/// The narrow boundary between the report engine and the kernel. Each call
/// makes one pass over its data source. Absence of the source is
/// `SourceUnavailable`, never an empty result.
pub trait CounterSource {
    fn read_interfaces(&self) -> Result<Vec<InterfaceStat>>;
    fn read_routes(&self) -> Result<Vec<RouteEntry>>;
    fn read_protocol_counters(&self) -> Result<ProtocolCounters>;
}

macro_rules! read_interface_stats {
    ($stat:ident, $self:ident, $dir:ident, $cur_path:ident, $($field:ident: $file:tt,)*) => {
        $($stat.$field = $self.read_iface_file(&$dir, &$cur_path, $file, 10)?;)*
    }
}

pub struct NetReader {
    logger: slog::Logger,
    interface_path: PathBuf,
    proc_net_path: PathBuf,
}

impl NetReader {
    pub fn new(logger: slog::Logger) -> NetReader {
        Self::new_with_custom_path(logger, NET_SYSFS.into(), NET_PROCFS.into())
    }

    pub fn new_with_custom_path(
        logger: slog::Logger,
        interface_path: PathBuf,
        proc_net_path: PathBuf,
    ) -> NetReader {
        NetReader {
            logger,
            interface_path,
            proc_net_path,
        }
    }

    fn open_dir(path: &Path) -> Result<Dir> {
        Dir::open(path).map_err(|e| Error::SourceUnavailable(path.to_path_buf(), e))
    }

    fn read_iface_file(&self, dir: &Dir, cur_path: &Path, item: &str, radix: u32) -> Result<u64> {
        let path = cur_path.join(item);
        let file = dir
            .open_file(item)
            .map_err(|e| Error::SourceUnavailable(path.clone(), e))?;
        let mut line = String::new();
        BufReader::new(file)
            .read_line(&mut line)
            .map_err(|e| Error::SourceUnavailable(path.clone(), e))?;
        let value = line.trim();
        let parsed = if radix == 16 {
            u64::from_str_radix(value.trim_start_matches("0x"), 16)
        } else {
            value.parse::<u64>()
        };
        parsed.map_err(|_| Error::MalformedSource {
            path,
            line: line.clone(),
            reason: format!("{:?} is not a base {} integer", value, radix),
        })
    }

    fn read_interface(
        &self,
        iface_dir: &Dir,
        name: &str,
        cur_path: &Path,
    ) -> Result<InterfaceStat> {
        let stats_dir = iface_dir
            .sub_dir("statistics")
            .map_err(|e| Error::SourceUnavailable(cur_path.join("statistics"), e))?;
        let stats_path = cur_path.join("statistics");

        let mut stat = InterfaceStat {
            name: name.to_owned(),
            mtu: self.read_iface_file(iface_dir, cur_path, "mtu", 10)?,
            flags: InterfaceFlags(self.read_iface_file(iface_dir, cur_path, "flags", 16)? as u32),
            ..Default::default()
        };
        read_interface_stats!(
            stat,
            self,
            stats_dir,
            stats_path,
            rx_packets: "rx_packets",
            rx_errors: "rx_errors",
            rx_dropped: "rx_dropped",
            rx_overruns: "rx_fifo_errors",
            tx_packets: "tx_packets",
            tx_errors: "tx_errors",
            tx_dropped: "tx_dropped",
            tx_overruns: "tx_fifo_errors",
        );
        Ok(stat)
    }

    fn read_proc_net_lines(&self, filename: &str) -> Result<(PathBuf, Vec<String>)> {
        let cur_path = self.proc_net_path.join(filename);
        let file = Self::open_dir(&self.proc_net_path)?
            .open_file(filename)
            .map_err(|e| Error::SourceUnavailable(cur_path.clone(), e))?;

        let mut lines = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| Error::SourceUnavailable(cur_path.clone(), e))?;
            if !line.trim().is_empty() {
                lines.push(line);
            }
        }
        debug!(self.logger, "Read {} lines from {:?}", lines.len(), cur_path);
        Ok((cur_path, lines))
    }

    fn parse_route_addr(
        path: &Path,
        item: Option<&str>,
        line: &str,
        what: &str,
    ) -> Result<Ipv4Addr> {
        // The kernel prints the in-memory (network order) word as a host integer
        parse_hex!(path, item, line, what).map(|v| Ipv4Addr::from(v.to_ne_bytes()))
    }

    fn parse_route_line(path: &Path, line: &str) -> Result<RouteEntry> {
        // Format is like "eth0	0000A8C0	00000000	0001	0	0	0	00FFFFFF	0	0	0"
        let mut items = line.split_whitespace();

        let iface = match items.next() {
            Some(iface) => iface.to_owned(),
            None => {
                return Err(Error::MalformedSource {
                    path: path.to_path_buf(),
                    line: line.to_owned(),
                    reason: "missing interface".into(),
                });
            }
        };
        let destination = Self::parse_route_addr(path, items.next(), line, "destination")?;
        let gateway = Self::parse_route_addr(path, items.next(), line, "gateway")?;
        let flags = RouteFlags(parse_hex!(path, items.next(), line, "flags")?);
        let ref_cnt = parse_item!(path, items.next(), u64, line, "refcnt")?;
        let use_cnt = parse_item!(path, items.next(), u64, line, "use")?;
        let metric = parse_item!(path, items.next(), u64, line, "metric")?;
        let mask = Self::parse_route_addr(path, items.next(), line, "mask")?;
        let mss = parse_item!(path, items.next(), u64, line, "mtu")?;
        let window = parse_item!(path, items.next(), u64, line, "window")?;
        let irtt = parse_item!(path, items.next(), u64, line, "irtt")?;

        Ok(RouteEntry {
            iface,
            destination,
            gateway,
            mask,
            flags,
            ref_cnt,
            use_cnt,
            metric,
            mss,
            window,
            irtt,
        })
    }

    // Format like /proc/net/snmp: a header line of keys followed by a line of
    // values, both prefixed with the section name.
    fn read_kv_diff_line(&self, stats_filename: &str) -> Result<Vec<RawSection>> {
        let (cur_path, content) = self.read_proc_net_lines(stats_filename)?;

        let mut res = Vec::new();
        for topic in content.chunks(2) {
            if topic.len() != 2 {
                return Err(Error::MalformedSource {
                    path: cur_path,
                    line: topic[0].clone(),
                    reason: "header without a value line".into(),
                });
            }
            let (key_header, keys) = match topic[0].split_once(':') {
                Some(kv) => kv,
                None => {
                    return Err(Error::MalformedSource {
                        path: cur_path,
                        line: topic[0].clone(),
                        reason: "missing section prefix".into(),
                    });
                }
            };
            let vals = match topic[1].split_once(':') {
                Some((val_header, vals)) if val_header == key_header => vals,
                _ => {
                    return Err(Error::MalformedSource {
                        path: cur_path,
                        line: topic[1].clone(),
                        reason: format!("expected values for {}", key_header),
                    });
                }
            };

            let keys: Vec<&str> = keys.split_whitespace().collect();
            let vals: Vec<&str> = vals.split_whitespace().collect();
            if keys.len() != vals.len() {
                return Err(Error::MalformedSource {
                    path: cur_path,
                    line: topic[1].clone(),
                    reason: format!("{} keys but {} values", keys.len(), vals.len()),
                });
            }

            let mut section = RawSection {
                name: key_header.to_owned(),
                source: cur_path.clone(),
                counters: Vec::with_capacity(keys.len()),
            };
            for (&k, &v) in keys.iter().zip(vals.iter()) {
                // Values like Tcp MaxConn may be -1 to represent no max. They
                // are limits, not counters, so they are skipped once known to
                // be numbers.
                if v.starts_with('-') {
                    parse_item!(cur_path, Some(v), i64, topic[1], k)?;
                    continue;
                }
                let v = parse_item!(cur_path, Some(v), u64, topic[1], k)?;
                section.counters.push((k.to_owned(), v));
            }
            res.push(section);
        }

        Ok(res)
    }
}

impl CounterSource for NetReader {
    fn read_interfaces(&self) -> Result<Vec<InterfaceStat>> {
        let cur_path = self.interface_path.clone();
        let interface_dir = Self::open_dir(&cur_path)?;

        let mut interfaces = Vec::new();
        for entry in interface_dir
            .list_dir(".")
            .map_err(|e| Error::SourceUnavailable(cur_path.clone(), e))?
        {
            let entry = entry.map_err(|e| Error::SourceUnavailable(cur_path.clone(), e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let iface_path = cur_path.join(&name);
            // Plain files such as bonding_masters live next to the interfaces
            let iface_dir = match entry.simple_type() {
                Some(SimpleType::File) | Some(SimpleType::Other) => continue,
                Some(SimpleType::Symlink) => {
                    let target = interface_dir
                        .read_link(name.as_str())
                        .map_err(|e| Error::SourceUnavailable(iface_path.clone(), e))?;
                    interface_dir.sub_dir(target.as_path())
                }
                _ => interface_dir.sub_dir(name.as_str()),
            }
            .map_err(|e| Error::SourceUnavailable(iface_path.clone(), e))?;

            interfaces.push(self.read_interface(&iface_dir, &name, &iface_path)?);
        }
        debug!(
            self.logger,
            "Read {} interfaces from {:?}",
            interfaces.len(),
            cur_path
        );
        Ok(interfaces)
    }

    fn read_routes(&self) -> Result<Vec<RouteEntry>> {
        let (cur_path, content) = self.read_proc_net_lines("route")?;
        // First line is the column header
        content
            .iter()
            .skip(1)
            .map(|line| Self::parse_route_line(&cur_path, line))
            .collect()
    }

    fn read_protocol_counters(&self) -> Result<ProtocolCounters> {
        let mut sections = self.read_kv_diff_line("snmp")?;
        match self.read_kv_diff_line("netstat") {
            Ok(ext) => sections.extend(ext),
            Err(Error::SourceUnavailable(path, e)) if e.kind() == ErrorKind::NotFound => {
                debug!(self.logger, "{:?} not present, no extended counters", path);
            }
            Err(e) => return Err(e),
        }
        Ok(ProtocolCounters { sections })
    }
}
