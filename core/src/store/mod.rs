//! Adjacency backends behind the edge indexer.
//!
//! A backend stores packed [`TypeWeight`] values per ordered `(from, to)` pair
//! and answers forward and reverse neighbor listings. It is never locked on
//! its own; the owning [`EdgeIndexer`](crate::EdgeIndexer) serializes access.

mod block;
mod hash;

pub use block::BlockEdgeStore;
pub use hash::HashEdgeStore;

use crate::codec::TypeWeight;
use crate::NodeIndex;

/// Iterator over `(neighbor, packed value)` pairs.
pub type Neighbors<'a> = Box<dyn Iterator<Item = (NodeIndex, TypeWeight)> + 'a>;

pub trait EdgeStore: Send + Sync {
    /// Insert or overwrite the value of `from -> to`.
    fn insert(&mut self, from: NodeIndex, to: NodeIndex, value: TypeWeight);

    fn remove(&mut self, from: NodeIndex, to: NodeIndex);

    fn value(&self, from: NodeIndex, to: NodeIndex) -> Option<TypeWeight>;

    /// Edges leaving `from`, as `(to, value)`.
    fn outgoing(&self, from: NodeIndex) -> Neighbors<'_>;

    /// Edges entering `to`, as `(from, value)`.
    fn incoming(&self, to: NodeIndex) -> Neighbors<'_>;

    /// Exact number of stored forward edges. May reorganize storage.
    fn edge_count(&mut self) -> usize;

    /// Edge count if it can be answered without exclusive access.
    fn edge_count_shared(&self) -> Option<usize> {
        None
    }

    /// Whether deferred maintenance (buffer flushes) is pending.
    fn needs_maintenance(&self) -> bool {
        false
    }

    fn maintain(&mut self) {}

    /// Approximate heap usage in bytes.
    fn memory_usage(&self) -> usize;
}
