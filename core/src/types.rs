//! Record and graph type definitions.
//!
//! This module defines the data model produced by parsing network-device CLI
//! tables and consumed by the topology and summary stages. Field values are
//! kept as the literal strings the device printed; nothing is re-typed. The
//! types are designed for serialization with [`serde`] so they can be handed
//! to export and visualization collaborators unchanged.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One row of a neighbor-discovery listing (`show cdp neighbor`).
///
/// Produced once per parsed neighbor row and never mutated afterwards.
///
/// # Examples
///
/// ```
/// use netscrape_core::NeighborRecord;
///
/// let record = NeighborRecord {
///     source_device: "core-sw1".into(),
///     device_id: "dist-sw2(FDO1234)".into(),
///     local_interface: "Gig 1/0/1".into(),
///     holdtime: "150".into(),
///     capability: "R S I".into(),
///     platform: "C9300".into(),
///     port_id: "Gig 1/0/48".into(),
/// };
/// assert_eq!(record.capability, "R S I");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborRecord {
    /// Label of the device the listing was captured on.
    pub source_device: String,
    /// Raw neighbor device id, exactly as printed (may carry a serial suffix).
    pub device_id: String,
    /// Local interface the neighbor was seen on.
    pub local_interface: String,
    /// Holdtime column, unit-less.
    pub holdtime: String,
    /// Raw whitespace-separated capability codes.
    pub capability: String,
    /// Neighbor platform string.
    pub platform: String,
    /// Neighbor's port id.
    pub port_id: String,
}

/// One row of an interface-status table (`show interface status`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceRecord {
    pub port: String,
    pub name: String,
    pub status: String,
    pub vlan: String,
    pub duplex: String,
    pub speed: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl InterfaceRecord {
    /// Column names in table order.
    pub const COLUMNS: [&'static str; 7] =
        ["Port", "Name", "Status", "Vlan", "Duplex", "Speed", "Type"];

    /// Returns field values in [`COLUMNS`](Self::COLUMNS) order.
    pub fn values(&self) -> [&str; 7] {
        [
            &self.port,
            &self.name,
            &self.status,
            &self.vlan,
            &self.duplex,
            &self.speed,
            &self.kind,
        ]
    }
}

/// Role of a device in the topology graph.
///
/// # Examples
///
/// ```
/// use netscrape_core::DeviceType;
///
/// assert_eq!(DeviceType::default(), DeviceType::Other);
/// assert_eq!(DeviceType::Router.to_string(), "router");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    Switch,
    Router,
    #[default]
    Other,
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Switch => write!(f, "switch"),
            Self::Router => write!(f, "router"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// A device in the topology graph, keyed by its canonical name.
///
/// Created lazily the first time any alias resolving to it is seen; never
/// removed within a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceNode {
    /// Canonical device name.
    pub name: String,
    pub device_type: DeviceType,
    /// Raw names observed in the input that resolved to this node.
    pub aliases: BTreeSet<String>,
}

impl DeviceNode {
    /// Creates a node with no recorded aliases.
    pub fn new(name: impl Into<String>, device_type: DeviceType) -> Self {
        Self {
            name: name.into(),
            device_type,
            aliases: BTreeSet::new(),
        }
    }
}

/// One neighbor relationship between two canonical devices.
///
/// Edges are unordered for connectivity purposes; `source` is the device the
/// listing was captured on. Parallel edges between the same pair represent
/// distinct physical links and are kept.
///
/// # Examples
///
/// ```
/// use netscrape_core::Edge;
///
/// let edge = Edge::new("a.example.com", "b.example.com", "Gi1/0/1", "Gi0/1");
/// assert_eq!(edge.label, "Gi1/0/1 → Gi0/1");
/// assert!(edge.connects("b.example.com", "a.example.com"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub local_interface: String,
    pub remote_port: String,
    /// Short display label (`local → remote`).
    pub label: String,
    /// Hover text naming both endpoints and their ports.
    pub title: String,
}

impl Edge {
    /// Creates an edge and derives its display label and title.
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        local_interface: impl Into<String>,
        remote_port: impl Into<String>,
    ) -> Self {
        let source = source.into();
        let target = target.into();
        let local_interface = local_interface.into();
        let remote_port = remote_port.into();
        let label = format!("{local_interface} → {remote_port}");
        let title = format!("{source} ({local_interface}) <-> {target} ({remote_port})");
        Self {
            source,
            target,
            local_interface,
            remote_port,
            label,
            title,
        }
    }

    /// Returns `true` if this edge joins `a` and `b`, in either direction.
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }
}

/// Dimension a summary table counts by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryDimension {
    Speed,
    Type,
}

impl SummaryDimension {
    /// Column name of the dimension in interface tables.
    pub fn column(self) -> &'static str {
        match self {
            Self::Speed => "Speed",
            Self::Type => "Type",
        }
    }
}

/// One row of a per-switch count summary.
///
/// `Separator` is a blank row used only as a rendering boundary between the
/// blocks of consecutive switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "row", rename_all = "snake_case")]
pub enum SummaryRow {
    Count {
        switch: String,
        /// Speed or type literal; `None` when the cell was missing.
        key: Option<String>,
        count: usize,
    },
    Separator,
}

impl SummaryRow {
    pub fn is_separator(&self) -> bool {
        matches!(self, Self::Separator)
    }
}
