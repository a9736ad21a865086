use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::error::{GraphError, Result};
use crate::{NodeId, NodeIndex};

/// Bidirectional map between external node ids and dense indices.
///
/// Indices are handed out in first-seen order starting at 0 and never change.
pub struct NodeIndexer {
    table: RwLock<NodeTable>,
}

struct NodeTable {
    index: FxHashMap<NodeId, NodeIndex>,
    ids: Vec<NodeId>,
}

impl NodeIndexer {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(expected_nodes: usize) -> Self {
        let mut index = FxHashMap::default();
        index.reserve(expected_nodes);
        Self {
            table: RwLock::new(NodeTable {
                index,
                ids: Vec::with_capacity(expected_nodes),
            }),
        }
    }

    /// Index of `id`, allocating the next one if `id` is new.
    pub fn index_of(&self, id: NodeId) -> Result<NodeIndex> {
        if let Some(&idx) = self.table.read().index.get(&id) {
            return Ok(idx);
        }

        let mut table = self.table.write();
        // Another writer may have registered `id` between the two acquisitions.
        if let Some(&idx) = table.index.get(&id) {
            return Ok(idx);
        }
        let idx = NodeIndex::try_from(table.ids.len()).map_err(|_| GraphError::CapacityExceeded)?;
        table.ids.push(id);
        table.index.insert(id, idx);
        Ok(idx)
    }

    /// Index of an already registered `id`. Never allocates.
    pub fn lookup(&self, id: NodeId) -> Option<NodeIndex> {
        self.table.read().index.get(&id).copied()
    }

    pub fn from_index(&self, index: NodeIndex) -> Result<NodeId> {
        self.table
            .read()
            .ids
            .get(index as usize)
            .copied()
            .ok_or(GraphError::IndexOutOfBounds(index))
    }

    pub fn len(&self) -> usize {
        self.table.read().ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Approximate heap usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let table = self.table.read();
        let map = table.index.capacity() * (size_of::<NodeId>() + size_of::<NodeIndex>() + 1);
        map + table.ids.capacity() * size_of::<NodeId>()
    }
}

impl Default for NodeIndexer {
    fn default() -> Self {
        Self::new()
    }
}
