//! Append-only list of sorted key blocks with lazy deletion.
//!
//! Keys are unique across the whole store. A batch insert either overwrites
//! keys in place, merges new keys into the last block (if it still has room)
//! or starts a new block holding exactly the new keys. Deleted keys are kept
//! in a tombstone set and physically dropped once they exceed a tenth of the
//! stored cells.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::config::DEFAULT_BLOCK_SIZE;

/// Residual window size below which lookups scan linearly.
pub const LINEAR_SCAN_WINDOW: usize = 8;

/// Fraction of tombstoned cells that triggers compaction.
const COMPACTION_RATIO: f64 = 0.1;

/// Position of a key inside the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub block: usize,
    pub pos: usize,
}

#[derive(Debug, Clone)]
struct Block<V> {
    keys: Vec<u32>,
    values: Vec<V>,
}

impl<V: Copy> Block<V> {
    fn position(&self, key: u32) -> Option<usize> {
        let keys = &self.keys;
        let (mut lo, mut hi) = (0, keys.len());
        while hi - lo > LINEAR_SCAN_WINDOW {
            let mid = lo + (hi - lo) / 2;
            match keys[mid].cmp(&key) {
                std::cmp::Ordering::Equal => return Some(mid),
                std::cmp::Ordering::Less => lo = mid + 1,
                std::cmp::Ordering::Greater => hi = mid,
            }
        }
        keys[lo..hi].iter().position(|&k| k == key).map(|i| lo + i)
    }

    /// Stable two-pointer merge of a sorted run of keys that are absent here.
    fn merge(&mut self, keys: Vec<u32>, values: Vec<V>) {
        let len = self.keys.len() + keys.len();
        let mut merged_keys = Vec::with_capacity(len);
        let mut merged_values = Vec::with_capacity(len);
        let (mut i, mut j) = (0, 0);

        while i + j < len {
            let take_new = if i == self.keys.len() {
                true
            } else if j == keys.len() {
                false
            } else {
                match keys[j].cmp(&self.keys[i]) {
                    std::cmp::Ordering::Less => true,
                    std::cmp::Ordering::Greater => false,
                    std::cmp::Ordering::Equal => {
                        panic!("block merge met key {} on both sides", keys[j])
                    }
                }
            };
            if take_new {
                merged_keys.push(keys[j]);
                merged_values.push(values[j]);
                j += 1;
            } else {
                merged_keys.push(self.keys[i]);
                merged_values.push(self.values[i]);
                i += 1;
            }
        }

        self.keys = merged_keys;
        self.values = merged_values;
    }
}

/// Sorted-block store. `BlockStore<()>` is the key-only flavor.
#[derive(Debug, Clone)]
pub struct BlockStore<V = ()> {
    block_size: usize,
    blocks: Vec<Block<V>>,
    tombstones: FxHashSet<u32>,
    physical: usize,
}

impl<V: Copy> BlockStore<V> {
    pub fn new() -> Self {
        Self::with_block_size(DEFAULT_BLOCK_SIZE)
    }

    pub fn with_block_size(block_size: usize) -> Self {
        Self {
            block_size: block_size.max(1),
            blocks: Vec::new(),
            tombstones: FxHashSet::default(),
            physical: 0,
        }
    }

    /// Insert or overwrite a batch of entries. The last write of a key wins.
    pub fn add_all<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (u32, V)>,
    {
        let mut batch: Vec<(u32, V)> = entries.into_iter().collect();
        if batch.is_empty() {
            return;
        }
        batch.sort_by_key(|&(k, _)| k);

        let mut sorted: Vec<(u32, V)> = Vec::with_capacity(batch.len());
        for (k, v) in batch {
            match sorted.last_mut() {
                Some(last) if last.0 == k => last.1 = v,
                _ => sorted.push((k, v)),
            }
        }

        let keys: Vec<u32> = sorted.iter().map(|&(k, _)| k).collect();
        let found = self.find_sorted(&keys);

        let mut new_keys = Vec::new();
        let mut new_values = Vec::new();
        for ((key, value), slot) in sorted.into_iter().zip(found) {
            match slot {
                Some(slot) => {
                    self.blocks[slot.block].values[slot.pos] = value;
                    self.tombstones.remove(&key);
                }
                None => {
                    new_keys.push(key);
                    new_values.push(value);
                }
            }
        }

        if !new_keys.is_empty() {
            self.physical += new_keys.len();
            match self.blocks.last_mut() {
                Some(last) if last.keys.len() < self.block_size => last.merge(new_keys, new_values),
                _ => self.blocks.push(Block {
                    keys: new_keys,
                    values: new_values,
                }),
            }
        }

        self.maybe_compact();
    }

    /// Tombstone every present key of `keys`. Absent keys are ignored.
    pub fn remove_all<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = u32>,
    {
        let mut keys: Vec<u32> = keys.into_iter().collect();
        keys.sort_unstable();
        keys.dedup();

        let found = self.find_sorted(&keys);
        for (key, slot) in keys.into_iter().zip(found) {
            if slot.is_some() {
                self.tombstones.insert(key);
            }
        }

        self.maybe_compact();
    }

    pub fn has(&self, key: u32) -> bool {
        !self.tombstones.contains(&key) && self.find(key).is_some()
    }

    pub fn get_value(&self, key: u32) -> Option<V> {
        if self.tombstones.contains(&key) {
            return None;
        }
        self.find(key)
            .map(|slot| self.blocks[slot.block].values[slot.pos])
    }

    /// Values for a batch of keys, in the order of `keys`. Keys may repeat.
    pub fn get_values(&self, keys: &[u32]) -> Vec<Option<V>> {
        let mut order: Vec<usize> = (0..keys.len()).collect();
        order.sort_unstable_by_key(|&i| keys[i]);
        let mut distinct: Vec<u32> = order.iter().map(|&i| keys[i]).collect();
        distinct.dedup();

        let values: Vec<Option<V>> = self
            .find_sorted(&distinct)
            .into_iter()
            .zip(&distinct)
            .map(|(slot, key)| {
                let slot = slot.filter(|_| !self.tombstones.contains(key))?;
                Some(self.blocks[slot.block].values[slot.pos])
            })
            .collect();

        let mut out = vec![None; keys.len()];
        for i in order {
            if let Ok(rank) = distinct.binary_search(&keys[i]) {
                out[i] = values[rank];
            }
        }
        out
    }

    /// Locate every key of an ascending query in one merge walk per block.
    ///
    /// The query must be strictly ascending. Tombstoned keys are still
    /// reported; callers decide what a tombstone means.
    pub fn find_sorted(&self, query: &[u32]) -> Vec<Option<Slot>> {
        debug_assert!(
            query.windows(2).all(|w| w[0] < w[1]),
            "find_sorted query must be strictly ascending"
        );
        let mut found = vec![None; query.len()];
        for (b, block) in self.blocks.iter().enumerate() {
            let (mut i, mut j) = (0, 0);
            while i < query.len() && j < block.keys.len() {
                match query[i].cmp(&block.keys[j]) {
                    std::cmp::Ordering::Equal => {
                        found[i] = Some(Slot { block: b, pos: j });
                        i += 1;
                        j += 1;
                    }
                    std::cmp::Ordering::Less => i += 1,
                    std::cmp::Ordering::Greater => j += 1,
                }
            }
        }
        found
    }

    fn find(&self, key: u32) -> Option<Slot> {
        self.blocks.iter().enumerate().find_map(|(b, block)| {
            block.position(key).map(|pos| Slot { block: b, pos })
        })
    }

    fn maybe_compact(&mut self) {
        if self.tombstones.len() as f64 > self.physical as f64 * COMPACTION_RATIO {
            self.compact();
        }
    }

    /// Drop tombstoned cells from every block.
    pub fn compact(&mut self) {
        if self.tombstones.is_empty() {
            return;
        }
        let purged = self.tombstones.len();
        let tombstones = std::mem::take(&mut self.tombstones);

        for block in &mut self.blocks {
            let (keys, values): (Vec<u32>, Vec<V>) = block
                .keys
                .iter()
                .copied()
                .zip(block.values.iter().copied())
                .filter(|(k, _)| !tombstones.contains(k))
                .unzip();
            block.keys = keys;
            block.values = values;
        }
        self.blocks.retain(|b| !b.keys.is_empty());
        self.physical = self.blocks.iter().map(|b| b.keys.len()).sum();

        debug!(
            purged,
            remaining = self.physical,
            blocks = self.blocks.len(),
            "block store compacted"
        );
    }

    /// Live entries in storage order (oldest block first, ascending within a block).
    pub fn iter(&self) -> impl Iterator<Item = (u32, V)> + '_ {
        let check = !self.tombstones.is_empty();
        self.blocks
            .iter()
            .flat_map(|b| b.keys.iter().copied().zip(b.values.iter().copied()))
            .filter(move |(k, _)| !check || !self.tombstones.contains(k))
    }

    pub fn keys(&self) -> impl Iterator<Item = u32> + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.physical - self.tombstones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of stored cells, tombstoned ones included.
    pub fn physical_len(&self) -> usize {
        self.physical
    }

    pub fn dirty_cells(&self) -> usize {
        self.tombstones.len()
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Approximate heap usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let cells: usize = self
            .blocks
            .iter()
            .map(|b| b.keys.capacity() * size_of::<u32>() + b.values.capacity() * size_of::<V>())
            .sum();
        cells
            + self.blocks.capacity() * size_of::<Block<V>>()
            + self.tombstones.capacity() * (size_of::<u32>() + 1)
    }
}

impl BlockStore<()> {
    pub fn add_keys<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = u32>,
    {
        self.add_all(keys.into_iter().map(|k| (k, ())));
    }
}

impl<V: Copy> Default for BlockStore<V> {
    fn default() -> Self {
        Self::new()
    }
}
