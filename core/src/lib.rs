//! Core record types, configuration, and validation for network CLI tables.
//!
//! This crate defines the foundational types shared by the netscrape
//! parsing, topology, and summary stages:
//!
//! - [`NeighborRecord`]: one row of a neighbor-discovery listing.
//! - [`InterfaceRecord`]: one row of an interface-status table.
//! - [`DeviceNode`] and [`Edge`]: the plain graph description handed to a
//!   visualization collaborator.
//! - [`SummaryRow`]: per-switch count rows, with a blank separator variant.
//!
//! Configuration ([`NetscrapeConfig`]) carries the organizational domain
//! suffix and aggregation filters. Validation ([`validate_neighbor_records`],
//! [`validate_topology`]) catches empty identities and dangling edges.
//!
//! # Example
//!
//! ```
//! use netscrape_core::*;
//!
//! let node = DeviceNode::new("core-sw1.example.com", DeviceType::Switch);
//! let edge = Edge::new(&node.name, "edge-rtr1.example.com", "Te1/1/1", "Gi0/0/0");
//! assert_eq!(edge.label, "Te1/1/1 → Gi0/0/0");
//!
//! let config = NetscrapeConfig::default();
//! assert_eq!(config.domain(), "example.com");
//! ```

mod config;
mod error;
mod types;
mod validate;

pub use config::{AggregationConfig, DEFAULT_DOMAIN_SUFFIX, NetscrapeConfig};
pub use error::{ConfigError, Result};
pub use types::*;
pub use validate::{ValidationError, validate_neighbor_records, validate_topology};
