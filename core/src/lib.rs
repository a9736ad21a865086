//! wgraph-core: in-memory directed, typed, weighted graph engine.
//!
//! External 64-bit node ids are mapped to dense indices; every edge is kept
//! as one 16-bit value packing its type and quantized weight. Two storage
//! backends are available: a hash map backend and a compact block backend
//! built from sorted blocks with tombstones and buffered writes. Shortest
//! paths are answered by a Dijkstra router and a bidirectional variant.
//!
//! No persistence and no I/O. Everything lives in memory for the lifetime
//! of the [`Graph`].

mod adjacency;
mod block_store;
mod codec;
mod config;
mod edge_indexer;
mod error;
mod graph;
mod node_indexer;
mod store;
mod traversal;

#[cfg(test)]
mod test_util;

/// Externally supplied node identifier.
pub type NodeId = i64;

/// Dense node index, assigned in first-seen order.
pub type NodeIndex = u32;

pub use adjacency::BufferedAdjacency;
pub use block_store::{BlockStore, Slot};
pub use codec::{TypeWeight, TypeWeightCodec, PACKED_STATES};
pub use config::{
    AdjacencyConfig, GraphConfig, DEFAULT_BLOCK_SIZE, DEFAULT_BUFFER_OPS_LIMIT, DEFAULT_EXPANSION_MAX,
    DEFAULT_EXPANSION_MIN, DEFAULT_PRECISION,
};
pub use edge_indexer::{check_weight, Edge, EdgeIndexer, EdgeReader};
pub use error::{GraphError, Result};
pub use graph::{BlockGraph, EdgeRecord, Graph, GraphEdge, GraphPathStep, HashGraph};
pub use node_indexer::NodeIndexer;
pub use store::{BlockEdgeStore, EdgeStore, HashEdgeStore, Neighbors};
pub use traversal::{BidirectionalRouter, DijkstraRouter, GraphRouter, PathStep, RouterKind};
