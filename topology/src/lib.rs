//! Device identity resolution and topology graph construction.
//!
//! Takes the [`NeighborRecord`]s of one batch of captures and produces a
//! plain node/edge description:
//!
//! 1. Every raw device name is canonicalized ([`normalize_device_name`]) and
//!    aliases of the same device are reconciled once the whole batch is known
//!    ([`AliasResolver`], [`AliasMap`]).
//! 2. [`TopologyBuilder`] creates one [`DeviceNode`] per canonical name,
//!    typed from capability codes through [`DEVICE_TYPE_RULES`], and one
//!    [`Edge`] per record.
//!
//! No layout, colors, or rendering happen here.
//!
//! [`NeighborRecord`]: netscrape_core::NeighborRecord
//! [`DeviceNode`]: netscrape_core::DeviceNode
//! [`Edge`]: netscrape_core::Edge

mod graph;
mod identity;

pub use graph::{
    DEVICE_TYPE_RULES, Topology, TopologyBuilder, build_topology, classify_capabilities,
    resolve_topology,
};
pub use identity::{AliasMap, AliasResolver, normalize_device_name};
