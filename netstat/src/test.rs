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

use std::fs;

use common::logutil::get_logger;
use tempfile::TempDir;

use super::*;

fn parse(args: &[&str]) -> Opt {
    Opt::try_parse_from(std::iter::once("netstat").chain(args.iter().copied()))
        .expect("Fail to parse arguments")
}

#[test]
fn test_default_view() {
    let opts = parse(&[]);
    assert_eq!(opts.config, PathBuf::from(config::NETSTAT_DEFAULT_CONF));
    assert!(!opts.debug);
    let selection = opts.selection();
    assert_eq!(selection.mode, ViewMode::Interfaces);
    assert_eq!(selection.interface, None);
}

#[test]
fn test_view_flags() {
    assert_eq!(parse(&["-i"]).selection().mode, ViewMode::Interfaces);
    assert_eq!(parse(&["-r"]).selection().mode, ViewMode::Routes);
    assert_eq!(parse(&["--statistics"]).selection().mode, ViewMode::Statistics);

    let selection = parse(&["-I", "lo", "-d"]).selection();
    assert_eq!(selection.mode, ViewMode::Interfaces);
    assert_eq!(selection.interface.as_deref(), Some("lo"));
}

#[test]
fn test_views_are_exclusive() {
    assert!(Opt::try_parse_from(["netstat", "-r", "-s"]).is_err());
    assert!(Opt::try_parse_from(["netstat", "-i", "-I", "lo"]).is_err());
}

fn write_tree(tempdir: &TempDir) -> PathBuf {
    let net = tempdir.path().join("net");
    fs::create_dir_all(&net).expect("Failed to create net dir");
    fs::write(
        net.join("route"),
        "Iface\tDestination\tGateway \tFlags\tRefCnt\tUse\tMetric\tMask\t\tMTU\tWindow\tIRTT\n\
         eth0\t00000000\t00000000\t0001\t0\t0\t0\t00000000\t0\t0\t0\n",
    )
    .expect("Failed to write route");
    let conf = tempdir.path().join("netstat.conf");
    fs::write(
        &conf,
        format!(
            "proc_net_path = '{}'\nsys_class_net_path = '{}'\n",
            net.display(),
            tempdir.path().join("iface").display()
        ),
    )
    .expect("Failed to write netstat.conf");
    conf
}

#[test]
fn test_routes_from_configured_tree() {
    let tempdir = TempDir::new().expect("Failed to create tempdir");
    let conf = write_tree(&tempdir);
    let netstat_config = NetstatConfig::load(&conf).expect("Fail to load config");

    let logger = get_logger();
    let reader = NetReader::new_with_custom_path(
        logger.clone(),
        netstat_config.sys_class_net_path.clone(),
        netstat_config.proc_net_path.clone(),
    );
    let mut output: Vec<u8> = Vec::new();
    dump::run(&logger, &reader, &parse(&["-r"]).selection(), &mut output)
        .expect("Fail to dump routes");
    let report = String::from_utf8(output).expect("Report is not utf8");
    assert_eq!(
        report.lines().last(),
        Some("default          0.0.0.0          0.0.0.0          U        0   0          0 eth0")
    );
}

#[test]
fn test_missing_interface_tree_fails() {
    let tempdir = TempDir::new().expect("Failed to create tempdir");
    let conf = write_tree(&tempdir);
    let netstat_config = NetstatConfig::load(&conf).expect("Fail to load config");

    let err = real_main(&get_logger(), &netstat_config, &parse(&["-i"]))
        .expect_err("Interface table must fail without sysfs");
    assert!(format!("{:#}", err).starts_with("Failed to read interface table"));
}
