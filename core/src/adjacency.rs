//! Two-tier per-source adjacency: a hot sorted map absorbs recent writes and
//! is flushed into one [`BlockStore`] per source index once enough operations
//! have accumulated.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::block_store::BlockStore;
use crate::config::AdjacencyConfig;
use crate::NodeIndex;

/// Buffered adjacency. `BufferedAdjacency<()>` is the key-only set flavor.
pub struct BufferedAdjacency<V = ()> {
    config: AdjacencyConfig,
    hot: FxHashMap<NodeIndex, BTreeMap<NodeIndex, V>>,
    compacted: Vec<Option<BlockStore<V>>>,
    /// Atomic so that reads under a shared lock can be counted too.
    ops: AtomicUsize,
}

impl<V: Copy> BufferedAdjacency<V> {
    pub fn new(config: AdjacencyConfig) -> Self {
        Self {
            config,
            hot: FxHashMap::default(),
            compacted: Vec::new(),
            ops: AtomicUsize::new(0),
        }
    }

    pub fn add(&mut self, from: NodeIndex, to: NodeIndex, value: V) {
        self.hot.entry(from).or_default().insert(to, value);
        self.record_ops(1);
    }

    pub fn add_all<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (NodeIndex, NodeIndex, V)>,
    {
        let mut n = 0;
        for (from, to, value) in entries {
            self.hot.entry(from).or_default().insert(to, value);
            n += 1;
        }
        self.record_ops(n);
    }

    pub fn remove(&mut self, from: NodeIndex, to: NodeIndex) {
        self.remove_entry(from, to);
        self.record_ops(1);
    }

    pub fn remove_all<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (NodeIndex, NodeIndex)>,
    {
        let mut n = 0;
        for (from, to) in pairs {
            self.remove_entry(from, to);
            n += 1;
        }
        self.record_ops(n);
    }

    fn remove_entry(&mut self, from: NodeIndex, to: NodeIndex) {
        if let Some(entries) = self.hot.get_mut(&from) {
            entries.remove(&to);
            if entries.is_empty() {
                self.hot.remove(&from);
            }
        }
        if let Some(Some(store)) = self.compacted.get_mut(from as usize) {
            if store.has(to) {
                store.remove_all(std::iter::once(to));
            }
        }
    }

    /// All live `(to, value)` entries of `from`: hot tier first, then the
    /// compacted tier minus keys shadowed by a newer hot entry.
    ///
    /// Counts as an operation; the owner flushes via [`Self::maintain`].
    pub fn get(&self, from: NodeIndex) -> impl Iterator<Item = (NodeIndex, V)> + '_ {
        self.ops.fetch_add(1, Ordering::Relaxed);

        let hot = self.hot.get(&from);
        let cold = self.compacted_store(from);

        hot.into_iter()
            .flat_map(|entries| entries.iter().map(|(&to, &v)| (to, v)))
            .chain(cold.into_iter().flat_map(move |store| {
                store
                    .iter()
                    .filter(move |(to, _)| hot.map_or(true, |entries| !entries.contains_key(to)))
            }))
    }

    pub fn value(&self, from: NodeIndex, to: NodeIndex) -> Option<V> {
        self.hot
            .get(&from)
            .and_then(|entries| entries.get(&to))
            .copied()
            .or_else(|| self.compacted_store(from).and_then(|s| s.get_value(to)))
    }

    /// Strict membership: flushes the hot tier, then asks the compacted tier.
    pub fn contains(&mut self, from: NodeIndex, to: NodeIndex) -> bool {
        self.compact();
        self.compacted_store(from).map_or(false, |s| s.has(to))
    }

    /// Exact entry count across both tiers. Flushes the hot tier first.
    pub fn len(&mut self) -> usize {
        self.compact();
        self.compacted.iter().flatten().map(|s| s.len()).sum()
    }

    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    pub fn compaction_due(&self) -> bool {
        self.ops.load(Ordering::Relaxed) > self.config.buffer_ops_limit
    }

    /// Flush if the operation budget is exhausted. Returns whether it flushed.
    pub fn maintain(&mut self) -> bool {
        if self.compaction_due() {
            self.compact();
            return true;
        }
        false
    }

    fn record_ops(&mut self, n: usize) {
        let ops = self.ops.get_mut();
        *ops += n;
        if *ops > self.config.buffer_ops_limit {
            self.compact();
        }
    }

    /// Merge every hot entry into its source's block store and reset the counter.
    pub fn compact(&mut self) {
        *self.ops.get_mut() = 0;
        if self.hot.is_empty() {
            return;
        }

        let hot = std::mem::take(&mut self.hot);
        let sources = hot.len();
        let mut flushed = 0usize;
        let block_size = self.config.block_size;

        for (from, entries) in hot {
            let slot = from as usize;
            if slot >= self.compacted.len() {
                self.grow(slot);
            }
            flushed += entries.len();
            self.compacted[slot]
                .get_or_insert_with(|| BlockStore::with_block_size(block_size))
                .add_all(entries);
        }

        debug!(sources, flushed, "adjacency hot tier flushed");
    }

    /// Extend the compacted array so that `slot` is addressable.
    ///
    /// The step is `min(max, max(min, missing) * 2)` but never less than `missing`.
    fn grow(&mut self, slot: usize) {
        let len = self.compacted.len();
        let missing = slot + 1 - len;
        let step = (self.config.expansion_max)
            .min(self.config.expansion_min.max(missing) * 2)
            .max(missing);
        self.compacted.resize_with(len + step, || None);
        debug!(from = len, to = len + step, "adjacency array grown");
    }

    fn compacted_store(&self, from: NodeIndex) -> Option<&BlockStore<V>> {
        self.compacted.get(from as usize).and_then(Option::as_ref)
    }

    /// Addressable source slots in the compacted tier.
    pub fn source_capacity(&self) -> usize {
        self.compacted.len()
    }

    /// Entries currently buffered in the hot tier.
    pub fn hot_len(&self) -> usize {
        self.hot.values().map(BTreeMap::len).sum()
    }

    /// Approximate heap usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let hot_entry = size_of::<NodeIndex>() + size_of::<V>() + 2 * size_of::<usize>();
        let hot = self.hot.capacity() * (size_of::<NodeIndex>() + size_of::<BTreeMap<NodeIndex, V>>())
            + self.hot_len() * hot_entry;
        let compacted: usize = self
            .compacted
            .iter()
            .flatten()
            .map(BlockStore::memory_usage)
            .sum();
        hot + compacted + self.compacted.capacity() * size_of::<Option<BlockStore<V>>>()
    }
}

impl BufferedAdjacency<()> {
    pub fn insert(&mut self, from: NodeIndex, to: NodeIndex) {
        self.add(from, to, ());
    }
}
