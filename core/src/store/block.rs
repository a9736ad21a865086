use super::{EdgeStore, Neighbors};
use crate::adjacency::BufferedAdjacency;
use crate::codec::TypeWeight;
use crate::config::AdjacencyConfig;
use crate::NodeIndex;

/// Block backend: values live in a buffered forward adjacency, the reverse
/// index is a key-only buffered adjacency whose values are resolved through
/// the forward side.
///
/// Lower per-edge memory than [`HashEdgeStore`](super::HashEdgeStore),
/// especially for skewed degree distributions, at the cost of amortized
/// flushes and binary-search point lookups.
pub struct BlockEdgeStore {
    forward: BufferedAdjacency<TypeWeight>,
    reverse: BufferedAdjacency<()>,
}

impl BlockEdgeStore {
    pub fn new(config: AdjacencyConfig) -> Self {
        Self {
            forward: BufferedAdjacency::new(config.clone()),
            reverse: BufferedAdjacency::new(config),
        }
    }
}

impl Default for BlockEdgeStore {
    fn default() -> Self {
        Self::new(AdjacencyConfig::default())
    }
}

impl EdgeStore for BlockEdgeStore {
    fn insert(&mut self, from: NodeIndex, to: NodeIndex, value: TypeWeight) {
        self.forward.add(from, to, value);
        self.reverse.insert(to, from);
    }

    fn remove(&mut self, from: NodeIndex, to: NodeIndex) {
        self.forward.remove(from, to);
        self.reverse.remove(to, from);
    }

    fn value(&self, from: NodeIndex, to: NodeIndex) -> Option<TypeWeight> {
        self.forward.value(from, to)
    }

    fn outgoing(&self, from: NodeIndex) -> Neighbors<'_> {
        Box::new(self.forward.get(from))
    }

    fn incoming(&self, to: NodeIndex) -> Neighbors<'_> {
        Box::new(
            self.reverse
                .get(to)
                .filter_map(move |(from, ())| self.forward.value(from, to).map(|v| (from, v))),
        )
    }

    fn edge_count(&mut self) -> usize {
        self.reverse.compact();
        self.forward.len()
    }

    fn needs_maintenance(&self) -> bool {
        self.forward.compaction_due() || self.reverse.compaction_due()
    }

    fn maintain(&mut self) {
        self.forward.maintain();
        self.reverse.maintain();
    }

    fn memory_usage(&self) -> usize {
        self.forward.memory_usage() + self.reverse.memory_usage()
    }
}
