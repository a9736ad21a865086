use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

use super::{EdgeStore, Neighbors};
use crate::codec::TypeWeight;
use crate::NodeIndex;

/// Hash backend: one map from the packed `(from, to)` pair to its value,
/// plus sorted forward and reverse neighbor sets.
///
/// O(1) amortized point operations at a higher per-edge memory cost than
/// [`BlockEdgeStore`](super::BlockEdgeStore).
#[derive(Default)]
pub struct HashEdgeStore {
    values: FxHashMap<u64, TypeWeight>,
    forward: FxHashMap<NodeIndex, BTreeSet<NodeIndex>>,
    reverse: FxHashMap<NodeIndex, BTreeSet<NodeIndex>>,
}

fn pair_key(from: NodeIndex, to: NodeIndex) -> u64 {
    (from as u64) << 32 | to as u64
}

impl HashEdgeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(expected_edges: usize) -> Self {
        let mut values = FxHashMap::default();
        values.reserve(expected_edges);
        Self {
            values,
            ..Self::default()
        }
    }
}

impl EdgeStore for HashEdgeStore {
    fn insert(&mut self, from: NodeIndex, to: NodeIndex, value: TypeWeight) {
        self.values.insert(pair_key(from, to), value);
        self.forward.entry(from).or_default().insert(to);
        self.reverse.entry(to).or_default().insert(from);
    }

    fn remove(&mut self, from: NodeIndex, to: NodeIndex) {
        if self.values.remove(&pair_key(from, to)).is_none() {
            return;
        }
        if let Some(tos) = self.forward.get_mut(&from) {
            tos.remove(&to);
            if tos.is_empty() {
                self.forward.remove(&from);
            }
        }
        if let Some(froms) = self.reverse.get_mut(&to) {
            froms.remove(&from);
            if froms.is_empty() {
                self.reverse.remove(&to);
            }
        }
    }

    fn value(&self, from: NodeIndex, to: NodeIndex) -> Option<TypeWeight> {
        self.values.get(&pair_key(from, to)).copied()
    }

    fn outgoing(&self, from: NodeIndex) -> Neighbors<'_> {
        Box::new(self.forward.get(&from).into_iter().flat_map(move |tos| {
            tos.iter()
                .filter_map(move |&to| self.value(from, to).map(|v| (to, v)))
        }))
    }

    fn incoming(&self, to: NodeIndex) -> Neighbors<'_> {
        Box::new(self.reverse.get(&to).into_iter().flat_map(move |froms| {
            froms
                .iter()
                .filter_map(move |&from| self.value(from, to).map(|v| (from, v)))
        }))
    }

    fn edge_count(&mut self) -> usize {
        self.values.len()
    }

    fn edge_count_shared(&self) -> Option<usize> {
        Some(self.values.len())
    }

    fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        // BTreeSet nodes carry roughly one pointer of overhead per key.
        let set_entry = size_of::<NodeIndex>() + size_of::<usize>();
        let sets = |m: &FxHashMap<NodeIndex, BTreeSet<NodeIndex>>| -> usize {
            m.capacity() * (size_of::<NodeIndex>() + size_of::<BTreeSet<NodeIndex>>())
                + m.values().map(|s| s.len() * set_entry).sum::<usize>()
        };
        self.values.capacity() * (size_of::<u64>() + size_of::<TypeWeight>() + 1)
            + sets(&self.forward)
            + sets(&self.reverse)
    }
}
