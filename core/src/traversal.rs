use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt::Debug;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::edge_indexer::EdgeIndexer;
use crate::error::Result;
use crate::store::EdgeStore;
use crate::NodeIndex;

/// One node of a route with the cumulative distance from the start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStep {
    pub node: NodeIndex,
    pub distance: f64,
}

/// Shortest-path search over an edge indexer.
///
/// A route runs from `from` to `to` inclusive. It is empty when `to` cannot
/// be reached with a total weight below `max_weight`, which also bounds how
/// far the search expands. `from == to` yields `[(from, 0.0)]`.
pub trait GraphRouter<T> {
    fn route(&self, from: NodeIndex, to: NodeIndex, edge_type: Option<&T>, max_weight: f64) -> Result<Vec<PathStep>>;
}

/// Router selection for [`Graph::shortest_path`](crate::Graph::shortest_path).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouterKind {
    #[default]
    Dijkstra,
    Bidirectional,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    distance: f64,
    node: NodeIndex,
}

// Reversed so that BinaryHeap pops the smallest distance first.
impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

/// Best known distance to a node and the neighbor it was reached through.
#[derive(Debug, Clone, Copy)]
struct Label {
    distance: f64,
    via: Option<NodeIndex>,
}

/// One Dijkstra search front: heap plus best labels.
struct Frontier {
    heap: BinaryHeap<Candidate>,
    labels: FxHashMap<NodeIndex, Label>,
    settled: usize,
}

impl Frontier {
    fn new(origin: NodeIndex) -> Self {
        let mut labels = FxHashMap::default();
        labels.insert(origin, Label { distance: 0.0, via: None });
        let mut heap = BinaryHeap::new();
        heap.push(Candidate { distance: 0.0, node: origin });
        Self { heap, labels, settled: 0 }
    }

    /// Next node to settle. Entries superseded by a shorter label are skipped.
    fn pop(&mut self) -> Option<Candidate> {
        while let Some(c) = self.heap.pop() {
            if self.labels.get(&c.node).map_or(false, |l| c.distance <= l.distance) {
                self.settled += 1;
                return Some(c);
            }
        }
        None
    }

    /// Record `distance` for `node` if it improves; enqueue it only below `max_weight`.
    fn relax(&mut self, node: NodeIndex, via: NodeIndex, distance: f64, max_weight: f64) -> bool {
        if self.labels.get(&node).map_or(false, |l| l.distance <= distance) {
            return false;
        }
        self.labels.insert(node, Label { distance, via: Some(via) });
        if distance < max_weight {
            self.heap.push(Candidate { distance, node });
        }
        true
    }

    fn distance(&self, node: NodeIndex) -> Option<f64> {
        self.labels.get(&node).map(|l| l.distance)
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// `node` followed by its `via` chain back to the origin.
    fn chain(&self, node: NodeIndex) -> Vec<PathStep> {
        let mut steps = Vec::new();
        let mut current = Some(node);
        while let Some(n) = current {
            let Some(label) = self.labels.get(&n) else { break };
            steps.push(PathStep { node: n, distance: label.distance });
            current = label.via;
        }
        steps
    }
}

/// Single-direction Dijkstra over outgoing edges.
pub struct DijkstraRouter<'a, T, S> {
    edges: &'a EdgeIndexer<T, S>,
}

impl<'a, T, S> DijkstraRouter<'a, T, S> {
    pub fn new(edges: &'a EdgeIndexer<T, S>) -> Self {
        Self { edges }
    }
}

impl<T, S> GraphRouter<T> for DijkstraRouter<'_, T, S>
where
    T: PartialEq + Clone + Debug,
    S: EdgeStore,
{
    fn route(&self, from: NodeIndex, to: NodeIndex, edge_type: Option<&T>, max_weight: f64) -> Result<Vec<PathStep>> {
        if from == to {
            return Ok(vec![PathStep { node: from, distance: 0.0 }]);
        }

        let reader = self.edges.read();
        let mut front = Frontier::new(from);

        while let Some(Candidate { distance, node }) = front.pop() {
            if node == to {
                break;
            }
            for edge in reader.all_from(node, edge_type)? {
                front.relax(edge.to, node, distance + edge.weight, max_weight);
            }
        }

        trace!(from, to, settled = front.settled, reached = front.labels.len(), "dijkstra search done");

        match front.distance(to) {
            Some(d) if d < max_weight => {
                let mut path = front.chain(to);
                path.reverse();
                Ok(path)
            }
            _ => Ok(Vec::new()),
        }
    }
}

/// Dijkstra run from both ends at once: forward over outgoing edges from
/// `from`, backward over incoming edges from `to`.
///
/// Both fronts are exhausted; the route passes through the node reached by
/// both that minimizes forward plus backward distance.
pub struct BidirectionalRouter<'a, T, S> {
    edges: &'a EdgeIndexer<T, S>,
}

impl<'a, T, S> BidirectionalRouter<'a, T, S> {
    pub fn new(edges: &'a EdgeIndexer<T, S>) -> Self {
        Self { edges }
    }
}

impl<T, S> GraphRouter<T> for BidirectionalRouter<'_, T, S>
where
    T: PartialEq + Clone + Debug,
    S: EdgeStore,
{
    fn route(&self, from: NodeIndex, to: NodeIndex, edge_type: Option<&T>, max_weight: f64) -> Result<Vec<PathStep>> {
        if from == to {
            return Ok(vec![PathStep { node: from, distance: 0.0 }]);
        }

        let reader = self.edges.read();
        let mut forward = Frontier::new(from);
        let mut backward = Frontier::new(to);

        while !(forward.is_empty() && backward.is_empty()) {
            if let Some(Candidate { distance, node }) = forward.pop() {
                for edge in reader.all_from(node, edge_type)? {
                    forward.relax(edge.to, node, distance + edge.weight, max_weight);
                }
            }
            if let Some(Candidate { distance, node }) = backward.pop() {
                for edge in reader.all_to(node, edge_type)? {
                    backward.relax(edge.from, node, distance + edge.weight, max_weight);
                }
            }
        }

        let meeting = forward
            .labels
            .iter()
            .filter_map(|(&node, l)| backward.distance(node).map(|b| (node, l.distance + b)))
            .min_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

        trace!(
            from,
            to,
            settled_forward = forward.settled,
            settled_backward = backward.settled,
            meeting = ?meeting,
            "bidirectional search done"
        );

        let (meeting, total) = match meeting {
            Some(m) if m.1 < max_weight => m,
            _ => return Ok(Vec::new()),
        };

        let mut path = forward.chain(meeting);
        path.reverse();

        // Backward labels count distance to `to`; re-base them on the start.
        path.extend(
            backward
                .chain(meeting)
                .into_iter()
                .skip(1)
                .map(|s| PathStep {
                    node: s.node,
                    distance: total - s.distance,
                }),
        );
        Ok(path)
    }
}
