//! Record and topology validation.
//!
//! Checks structural invariants of parsed neighbor records and of built
//! topology graphs, catching empty identities, duplicate nodes, and edges
//! that point outside the graph before they reach an export collaborator.
//!
//! # Examples
//!
//! ```
//! use netscrape_core::*;
//!
//! let nodes = vec![
//!     DeviceNode::new("a.example.com", DeviceType::Switch),
//!     DeviceNode::new("b.example.com", DeviceType::Router),
//! ];
//! let edges = vec![Edge::new("a.example.com", "b.example.com", "Gi1/0/1", "Gi0/0")];
//! assert!(validate_topology(&nodes, &edges).is_empty());
//!
//! // Edge to a device that is not a node
//! let edges = vec![Edge::new("a.example.com", "c.example.com", "Gi1/0/2", "Gi0/1")];
//! assert!(!validate_topology(&nodes, &edges).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{DeviceNode, Edge, NeighborRecord};

/// Record/topology validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A neighbor record has an empty device id.
    #[error("neighbor record {index} from '{source_device}' has an empty device id")]
    EmptyDeviceId { index: usize, source_device: String },
    /// A neighbor record has an empty source device label.
    #[error("neighbor record {0} has an empty source device")]
    EmptySourceDevice(usize),
    /// Two nodes share a canonical name.
    #[error("duplicate node: {0}")]
    DuplicateNode(String),
    /// An edge endpoint is not a node of the graph.
    #[error("edge {from} <-> {to} references unknown node: {missing}")]
    DanglingEdge {
        from: String,
        to: String,
        missing: String,
    },
}

/// Validates a batch of neighbor records.
///
/// Reports every record with an empty `device_id` or `source_device`.
pub fn validate_neighbor_records(records: &[NeighborRecord]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (index, record) in records.iter().enumerate() {
        if record.source_device.trim().is_empty() {
            errors.push(ValidationError::EmptySourceDevice(index));
        }
        if record.device_id.trim().is_empty() {
            errors.push(ValidationError::EmptyDeviceId {
                index,
                source_device: record.source_device.clone(),
            });
        }
    }

    errors
}

/// Validates a topology graph.
///
/// Checks for duplicate canonical node names and for edges whose endpoints
/// are not nodes.
pub fn validate_topology(nodes: &[DeviceNode], edges: &[Edge]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for node in nodes {
        if !seen.insert(node.name.as_str()) {
            errors.push(ValidationError::DuplicateNode(node.name.clone()));
        }
    }

    for edge in edges {
        for endpoint in [&edge.source, &edge.target] {
            if !seen.contains(endpoint.as_str()) {
                errors.push(ValidationError::DanglingEdge {
                    from: edge.source.clone(),
                    to: edge.target.clone(),
                    missing: endpoint.clone(),
                });
            }
        }
    }

    errors
}
