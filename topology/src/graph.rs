//! Topology graph construction from neighbor records.

use std::collections::HashMap;

use netscrape_core::{DeviceNode, DeviceType, Edge, NeighborRecord, ValidationError, validate_topology};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::identity::AliasMap;

/// Capability code to device type, checked in order; first match wins.
///
/// A neighbor advertising both `R` and `S` is a router.
pub const DEVICE_TYPE_RULES: [(&str, DeviceType); 2] =
    [("R", DeviceType::Router), ("S", DeviceType::Switch)];

/// Classifies a neighbor from its raw capability string.
///
/// # Examples
///
/// ```
/// use netscrape_core::DeviceType;
/// use netscrape_topology::classify_capabilities;
///
/// assert_eq!(classify_capabilities("R S I"), DeviceType::Router);
/// assert_eq!(classify_capabilities("S I"), DeviceType::Switch);
/// assert_eq!(classify_capabilities("H P M"), DeviceType::Other);
/// ```
pub fn classify_capabilities(capability: &str) -> DeviceType {
    let codes: Vec<&str> = capability.split_whitespace().collect();
    DEVICE_TYPE_RULES
        .iter()
        .find(|(code, _)| codes.contains(code))
        .map_or(DeviceType::Other, |(_, device_type)| *device_type)
}

/// Node and edge lists describing one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    /// Nodes in first-seen order.
    pub nodes: Vec<DeviceNode>,
    /// One edge per neighbor record, in record order.
    pub edges: Vec<Edge>,
}

impl Topology {
    pub fn node(&self, name: &str) -> Option<&DeviceNode> {
        self.nodes.iter().find(|node| node.name == name)
    }

    /// Edges joining `a` and `b` in either direction.
    pub fn edges_between<'a>(&'a self, a: &'a str, b: &'a str) -> impl Iterator<Item = &'a Edge> {
        self.edges.iter().filter(move |edge| edge.connects(a, b))
    }

    /// Structural problems; empty for any graph built by [`TopologyBuilder`].
    pub fn validate(&self) -> Vec<ValidationError> {
        validate_topology(&self.nodes, &self.edges)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Accumulates nodes and edges for one run.
///
/// Nodes are created the first time a canonical name is seen and keep the
/// type assigned then. Nothing is ever removed.
#[derive(Debug)]
pub struct TopologyBuilder<'a> {
    aliases: &'a AliasMap,
    nodes: Vec<DeviceNode>,
    index: HashMap<String, usize>,
    edges: Vec<Edge>,
}

impl<'a> TopologyBuilder<'a> {
    pub fn new(aliases: &'a AliasMap) -> Self {
        Self {
            aliases,
            nodes: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
        }
    }

    /// Adds both endpoints of `record` and one edge between them.
    pub fn add_record(&mut self, record: &NeighborRecord) {
        let source = self.aliases.canonical(&record.source_device).to_string();
        let target = self.aliases.canonical(&record.device_id).to_string();

        self.ensure_node(&source, &record.source_device, || DeviceType::Switch);
        self.ensure_node(&target, &record.device_id, || {
            classify_capabilities(&record.capability)
        });

        self.edges.push(Edge::new(
            source,
            target,
            &record.local_interface,
            &record.port_id,
        ));
    }

    fn ensure_node(&mut self, name: &str, alias: &str, device_type: impl FnOnce() -> DeviceType) {
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => {
                let device_type = device_type();
                debug!(node = %name, %device_type, "Created topology node");
                self.nodes.push(DeviceNode::new(name, device_type));
                self.index.insert(name.to_string(), self.nodes.len() - 1);
                self.nodes.len() - 1
            }
        };
        self.nodes[idx].aliases.insert(alias.to_string());
    }

    pub fn finish(self) -> Topology {
        info!(
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            "Built topology"
        );
        Topology {
            nodes: self.nodes,
            edges: self.edges,
        }
    }
}

/// Builds a topology from `records` using a resolved alias map.
pub fn build_topology(records: &[NeighborRecord], aliases: &AliasMap) -> Topology {
    let mut builder = TopologyBuilder::new(aliases);
    for record in records {
        builder.add_record(record);
    }
    builder.finish()
}

/// Resolves identities for `records` under `domain` and builds the topology.
///
/// # Examples
///
/// ```
/// use netscrape_core::{DeviceType, NeighborRecord};
/// use netscrape_topology::resolve_topology;
///
/// let record = NeighborRecord {
///     source_device: "core-sw1".into(),
///     device_id: "edge-rtr1(FGL1234)".into(),
///     local_interface: "Gig 1/0/48".into(),
///     holdtime: "139".into(),
///     capability: "R B".into(),
///     platform: "ISR4431/K".into(),
///     port_id: "Gig 0/0/1".into(),
/// };
///
/// let topology = resolve_topology(&[record], "example.com");
/// let rtr = topology.node("edge-rtr1.example.com").unwrap();
/// assert_eq!(rtr.device_type, DeviceType::Router);
/// assert_eq!(topology.edges[0].label, "Gig 1/0/48 → Gig 0/0/1");
/// ```
pub fn resolve_topology(records: &[NeighborRecord], domain: &str) -> Topology {
    let aliases = AliasMap::from_records(records, domain);
    build_topology(records, &aliases)
}
