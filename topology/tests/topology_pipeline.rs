use std::fs;
use std::path::PathBuf;

use netscrape_core::{DeviceType, NeighborRecord};
use netscrape_parser::parse_neighbor_output;
use netscrape_topology::{AliasMap, build_topology, resolve_topology};

#[test]
fn test_fixture_batch_builds_valid_graph() {
    let records = batch(&[("core-sw1", "cdp-ios-xe.txt"), ("spine1", "cdp-nxos.txt")]);
    let topology = resolve_topology(&records, "example.com");

    assert_eq!(topology.edges.len(), records.len());
    assert!(topology.validate().is_empty());

    let dist = topology.node("dist-sw2.example.com").unwrap();
    assert_eq!(dist.device_type, DeviceType::Router);
    assert_eq!(
        topology
            .edges_between("core-sw1", "dist-sw2.example.com")
            .count(),
        2
    );

    assert_eq!(
        topology.node("acc-sw3.example.com").unwrap().device_type,
        DeviceType::Switch
    );
    assert_eq!(
        topology.node("SEP001122334455").unwrap().device_type,
        DeviceType::Other
    );
    assert_eq!(
        topology.node("edge-rtr1").unwrap().device_type,
        DeviceType::Router
    );
}

#[test]
fn test_capture_label_folds_into_qualified_neighbor_name() {
    // wan-rtr1 sees core-sw1.example.com; core-sw1's own capture is labelled bare.
    let records = batch(&[("core-sw1", "cdp-ios-xe.txt"), ("wan-rtr1", "cdp-hold-time.txt")]);
    let aliases = AliasMap::from_records(&records, "example.com");
    assert_eq!(aliases.canonical("core-sw1"), "core-sw1.example.com");
    let (_, core_aliases) = aliases
        .classes()
        .find(|(name, _)| *name == "core-sw1.example.com")
        .unwrap();
    assert!(core_aliases.contains("core-sw1"));

    let topology = build_topology(&records, &aliases);
    let core = topology.node("core-sw1.example.com").unwrap();
    assert!(core.aliases.contains("core-sw1"));
    assert!(core.aliases.contains("core-sw1.example.com"));
    assert!(topology.node("core-sw1").is_none());
    assert!(topology.validate().is_empty());
}

#[test]
fn test_leaf_with_and_without_domain_is_one_node() {
    let records = batch(&[("spine1", "cdp-nxos.txt")]);
    let topology = resolve_topology(&records, "example.com");

    let names: Vec<_> = topology.nodes.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, ["spine1", "leaf1.example.com", "leaf2.example.com"]);
    assert_eq!(
        topology
            .edges_between("spine1", "leaf1.example.com")
            .count(),
        2
    );
}

fn batch(captures: &[(&str, &str)]) -> Vec<NeighborRecord> {
    captures
        .iter()
        .flat_map(|(device, name)| parse_neighbor_output(device, &fixture(name)).records)
        .collect()
}

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("parser")
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(path).expect("fixture file must be readable")
}
