//! Lock-guarded edge storage: resolves edge types, validates and packs
//! weights, and serializes access to one [`EdgeStore`] backend.

use std::fmt::Debug;

use parking_lot::{RwLock, RwLockReadGuard};
use tracing::info;

use crate::codec::{TypeWeight, TypeWeightCodec};
use crate::error::{GraphError, Result};
use crate::store::EdgeStore;
use crate::NodeIndex;

/// A decoded edge between two dense indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge<T> {
    pub from: NodeIndex,
    pub to: NodeIndex,
    pub edge_type: T,
    pub weight: f64,
}

pub struct EdgeIndexer<T, S> {
    edge_types: Vec<T>,
    codec: TypeWeightCodec,
    store: RwLock<S>,
}

/// Fails unless `weight` is in `[0, 1]`. NaN is rejected too.
pub fn check_weight(weight: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&weight) {
        Ok(weight)
    } else {
        Err(GraphError::WeightOutOfRange(weight))
    }
}

impl<T, S> EdgeIndexer<T, S>
where
    T: PartialEq + Clone + Debug,
    S: EdgeStore,
{
    pub fn new(precision: u32, edge_types: Vec<T>, store: S) -> Result<Self> {
        let codec = TypeWeightCodec::new(precision, edge_types.len())?;
        info!(
            backend = std::any::type_name::<S>(),
            precision,
            edge_types = edge_types.len(),
            "edge indexer created"
        );
        Ok(Self {
            edge_types,
            codec,
            store: RwLock::new(store),
        })
    }

    pub fn precision(&self) -> u32 {
        self.codec.precision()
    }

    pub fn edge_types(&self) -> &[T] {
        &self.edge_types
    }

    /// Position of `edge_type` in the vocabulary.
    pub fn type_index(&self, edge_type: &T) -> Result<u16> {
        self.edge_types
            .iter()
            .position(|t| t == edge_type)
            .map(|i| i as u16)
            .ok_or_else(|| GraphError::UnknownEdgeType(format!("{:?}", edge_type)))
    }

    /// Validate and pack an edge type and weight without touching storage.
    pub fn encode(&self, edge_type: &T, weight: f64) -> Result<TypeWeight> {
        let type_index = self.type_index(edge_type)?;
        let weight = check_weight(weight)?;
        Ok(self.codec.compress(type_index, weight))
    }

    fn decode(&self, from: NodeIndex, to: NodeIndex, value: TypeWeight, filter: Option<u16>) -> Option<Edge<T>> {
        let type_index = self.codec.extract_type(value);
        if filter.map_or(false, |f| f != type_index) {
            return None;
        }
        Some(Edge {
            from,
            to,
            edge_type: self.edge_types.get(type_index as usize)?.clone(),
            weight: self.codec.extract_weight(value),
        })
    }

    /// Insert or overwrite `from -> to`, and `to -> from` with the same value
    /// when `bi_directional` is set.
    pub fn add(&self, from: NodeIndex, to: NodeIndex, edge_type: &T, weight: f64, bi_directional: bool) -> Result<()> {
        let value = self.encode(edge_type, weight)?;
        self.put_all(std::iter::once((from, to, value, bi_directional)));
        Ok(())
    }

    /// Bulk insert. Every edge is validated before any is written.
    pub fn add_batch(&self, edges: &[Edge<T>], bi_directional: bool) -> Result<()> {
        let encoded = edges
            .iter()
            .map(|e| Ok((e.from, e.to, self.encode(&e.edge_type, e.weight)?, bi_directional)))
            .collect::<Result<Vec<_>>>()?;
        self.put_all(encoded);
        Ok(())
    }

    /// Write already encoded edges under one exclusive acquisition.
    pub(crate) fn put_all<I>(&self, entries: I)
    where
        I: IntoIterator<Item = (NodeIndex, NodeIndex, TypeWeight, bool)>,
    {
        let mut store = self.store.write();
        for (from, to, value, bi_directional) in entries {
            store.insert(from, to, value);
            if bi_directional {
                store.insert(to, from, value);
            }
        }
    }

    pub fn remove(&self, from: NodeIndex, to: NodeIndex, bi_directional: bool) {
        let mut store = self.store.write();
        store.remove(from, to);
        if bi_directional {
            store.remove(to, from);
        }
    }

    pub fn get(&self, from: NodeIndex, to: NodeIndex) -> Option<Edge<T>> {
        let value = self.store.read().value(from, to)?;
        self.decode(from, to, value, None)
    }

    /// Shared view for lazy traversal. Holds the read lock until dropped.
    pub fn read(&self) -> EdgeReader<'_, T, S> {
        EdgeReader {
            indexer: self,
            guard: self.store.read(),
        }
    }

    /// Outgoing edges of `from`, optionally restricted to one type.
    pub fn all_from(&self, from: NodeIndex, edge_type: Option<&T>) -> Result<Vec<Edge<T>>> {
        let reader = self.read();
        let edges = reader.all_from(from, edge_type)?.collect();
        Ok(edges)
    }

    /// Incoming edges of `to`, optionally restricted to one type.
    pub fn all_to(&self, to: NodeIndex, edge_type: Option<&T>) -> Result<Vec<Edge<T>>> {
        let reader = self.read();
        let edges = reader.all_to(to, edge_type)?.collect();
        Ok(edges)
    }

    /// Distinct forward edges. Backends that cannot count under a shared
    /// lock are counted exclusively.
    pub fn count(&self) -> usize {
        let shared = self.store.read().edge_count_shared();
        match shared {
            Some(n) => n,
            None => self.store.write().edge_count(),
        }
    }

    /// Approximate heap usage in bytes.
    pub fn memory_usage(&self) -> usize {
        self.store.read().memory_usage() + self.edge_types.capacity() * std::mem::size_of::<T>()
    }
}

/// Read view over an [`EdgeIndexer`]. Sequences it hands out borrow the
/// shared guard and cannot outlive the reader.
///
/// Dropping the reader runs pending backend maintenance when the exclusive
/// lock can be taken without blocking.
pub struct EdgeReader<'a, T, S: EdgeStore> {
    indexer: &'a EdgeIndexer<T, S>,
    guard: RwLockReadGuard<'a, S>,
}

impl<'a, T, S> EdgeReader<'a, T, S>
where
    T: PartialEq + Clone + Debug,
    S: EdgeStore,
{
    pub fn all_from(&self, from: NodeIndex, edge_type: Option<&T>) -> Result<impl Iterator<Item = Edge<T>> + '_> {
        let filter = edge_type.map(|t| self.indexer.type_index(t)).transpose()?;
        let indexer = self.indexer;
        Ok(self
            .guard
            .outgoing(from)
            .filter_map(move |(to, value)| indexer.decode(from, to, value, filter)))
    }

    pub fn all_to(&self, to: NodeIndex, edge_type: Option<&T>) -> Result<impl Iterator<Item = Edge<T>> + '_> {
        let filter = edge_type.map(|t| self.indexer.type_index(t)).transpose()?;
        let indexer = self.indexer;
        Ok(self
            .guard
            .incoming(to)
            .filter_map(move |(from, value)| indexer.decode(from, to, value, filter)))
    }

    pub fn get(&self, from: NodeIndex, to: NodeIndex) -> Option<Edge<T>> {
        let value = self.guard.value(from, to)?;
        self.indexer.decode(from, to, value, None)
    }
}

impl<T, S: EdgeStore> Drop for EdgeReader<'_, T, S> {
    fn drop(&mut self) {
        if !self.guard.needs_maintenance() {
            return;
        }
        let indexer = self.indexer;
        let lock = &indexer.store;
        RwLockReadGuard::unlocked(&mut self.guard, || {
            if let Some(mut store) = lock.try_write() {
                store.maintain();
            }
        });
    }
}
