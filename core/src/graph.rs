use std::fmt::Debug;

use crate::config::GraphConfig;
use crate::edge_indexer::{Edge, EdgeIndexer};
use crate::error::{GraphError, Result};
use crate::node_indexer::NodeIndexer;
use crate::store::{BlockEdgeStore, EdgeStore, HashEdgeStore};
use crate::traversal::{BidirectionalRouter, DijkstraRouter, GraphRouter, PathStep, RouterKind};
use crate::{NodeId, NodeIndex};

/// A directed edge between two external node ids.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge<T> {
    pub from: NodeId,
    pub to: NodeId,
    pub edge_type: T,
    pub weight: f64,
}

/// One edge of a bulk load via [`Graph::add_edges`].
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRecord<T> {
    pub from: NodeId,
    pub to: NodeId,
    pub edge_type: T,
    pub weight: f64,
    pub bi_directional: bool,
}

/// A route step in external node ids.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphPathStep {
    pub node: NodeId,
    pub distance: f64,
}

/// In-memory directed, typed, weighted graph.
///
/// Node ids are mapped to dense indices on first use; edges are stored as
/// packed (type, weight) values in the backend `S`. All operations take
/// `&self` and may be called from several threads.
pub struct Graph<T, S> {
    nodes: NodeIndexer,
    edges: EdgeIndexer<T, S>,
}

/// Graph over the hash backend.
pub type HashGraph<T> = Graph<T, HashEdgeStore>;

/// Graph over the block backend.
pub type BlockGraph<T> = Graph<T, BlockEdgeStore>;

impl<T: PartialEq + Clone + Debug> Graph<T, HashEdgeStore> {
    pub fn hashed(precision: u32, edge_types: Vec<T>) -> Result<Self> {
        Self::hashed_with_config(GraphConfig::with_precision(precision), edge_types)
    }

    pub fn hashed_with_config(config: GraphConfig, edge_types: Vec<T>) -> Result<Self> {
        config.validate()?;
        let store = HashEdgeStore::with_capacity(config.expected_edges);
        Self::with_store(&config, edge_types, store)
    }
}

impl<T: PartialEq + Clone + Debug> Graph<T, BlockEdgeStore> {
    pub fn compact(precision: u32, edge_types: Vec<T>) -> Result<Self> {
        Self::compact_with_config(GraphConfig::with_precision(precision), edge_types)
    }

    pub fn compact_with_config(config: GraphConfig, edge_types: Vec<T>) -> Result<Self> {
        config.validate()?;
        let store = BlockEdgeStore::new(config.adjacency.clone());
        Self::with_store(&config, edge_types, store)
    }
}

impl<T, S> Graph<T, S>
where
    T: PartialEq + Clone + Debug,
    S: EdgeStore,
{
    /// Build a graph over a caller-supplied backend.
    pub fn with_store(config: &GraphConfig, edge_types: Vec<T>, store: S) -> Result<Self> {
        Ok(Self {
            nodes: NodeIndexer::with_capacity(config.expected_nodes),
            edges: EdgeIndexer::new(config.precision, edge_types, store)?,
        })
    }

    pub fn edge_indexer(&self) -> &EdgeIndexer<T, S> {
        &self.edges
    }

    pub fn node_indexer(&self) -> &NodeIndexer {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.count()
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        self.nodes.memory_usage() + self.edges.memory_usage()
    }

    /// Insert or overwrite `from -> to` (and `to -> from` when `bi_directional`).
    ///
    /// Nothing is registered when the type or weight is rejected.
    pub fn add_edge(&self, from: NodeId, to: NodeId, edge_type: &T, weight: f64, bi_directional: bool) -> Result<()> {
        let value = self.edges.encode(edge_type, weight)?;
        let from = self.nodes.index_of(from)?;
        let to = self.nodes.index_of(to)?;
        self.edges.put_all(std::iter::once((from, to, value, bi_directional)));
        Ok(())
    }

    /// Bulk insert. Every type and weight is validated before any node or
    /// edge is written. If the node index space runs out partway, the nodes
    /// registered so far stay registered and no edge of the batch is written.
    pub fn add_edges(&self, records: &[EdgeRecord<T>]) -> Result<()> {
        let values = records
            .iter()
            .map(|r| self.edges.encode(&r.edge_type, r.weight))
            .collect::<Result<Vec<_>>>()?;
        let mut entries = Vec::with_capacity(records.len());
        for (r, value) in records.iter().zip(values) {
            entries.push((self.nodes.index_of(r.from)?, self.nodes.index_of(r.to)?, value, r.bi_directional));
        }
        self.edges.put_all(entries);
        Ok(())
    }

    pub fn remove_edge(&self, from: NodeId, to: NodeId, bi_directional: bool) -> Result<()> {
        let (f, t) = (self.resolve(from)?, self.resolve(to)?);
        self.edges.remove(f, t, bi_directional);
        Ok(())
    }

    pub fn get_edge(&self, from: NodeId, to: NodeId) -> Result<GraphEdge<T>> {
        let (f, t) = (self.resolve(from)?, self.resolve(to)?);
        self.edges
            .get(f, t)
            .map(|e| GraphEdge {
                from,
                to,
                edge_type: e.edge_type,
                weight: e.weight,
            })
            .ok_or(GraphError::EdgeNotFound { from, to })
    }

    /// Outgoing edges of `node` with a weight in `[min_weight, max_weight]`.
    pub fn edge_connections_from(
        &self,
        node: NodeId,
        edge_type: Option<&T>,
        min_weight: f64,
        max_weight: f64,
    ) -> Result<Vec<GraphEdge<T>>> {
        let edges = self.edges.all_from(self.resolve(node)?, edge_type)?;
        self.to_external(edges, min_weight, max_weight)
    }

    /// Incoming edges of `node` with a weight in `[min_weight, max_weight]`.
    pub fn edge_connections_to(
        &self,
        node: NodeId,
        edge_type: Option<&T>,
        min_weight: f64,
        max_weight: f64,
    ) -> Result<Vec<GraphEdge<T>>> {
        let edges = self.edges.all_to(self.resolve(node)?, edge_type)?;
        self.to_external(edges, min_weight, max_weight)
    }

    /// Cheapest route from `from` to `to`, in node ids. Empty when there is
    /// none with a total weight below `max_weight`.
    pub fn shortest_path(
        &self,
        from: NodeId,
        to: NodeId,
        edge_type: Option<&T>,
        max_weight: f64,
        router: RouterKind,
    ) -> Result<Vec<GraphPathStep>> {
        let (f, t) = (self.resolve(from)?, self.resolve(to)?);
        let path = match router {
            RouterKind::Dijkstra => DijkstraRouter::new(&self.edges).route(f, t, edge_type, max_weight)?,
            RouterKind::Bidirectional => BidirectionalRouter::new(&self.edges).route(f, t, edge_type, max_weight)?,
        };
        path.into_iter()
            .map(|PathStep { node, distance }| {
                Ok(GraphPathStep {
                    node: self.nodes.from_index(node)?,
                    distance,
                })
            })
            .collect()
    }

    fn resolve(&self, id: NodeId) -> Result<NodeIndex> {
        self.nodes.lookup(id).ok_or(GraphError::NodeNotFound(id))
    }

    fn to_external(&self, edges: Vec<Edge<T>>, min_weight: f64, max_weight: f64) -> Result<Vec<GraphEdge<T>>> {
        edges
            .into_iter()
            .filter(|e| e.weight >= min_weight && e.weight <= max_weight)
            .map(|e| {
                Ok(GraphEdge {
                    from: self.nodes.from_index(e.from)?,
                    to: self.nodes.from_index(e.to)?,
                    edge_type: e.edge_type,
                    weight: e.weight,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdjacencyConfig;
    use crate::test_util::FastRng;
    use std::collections::{BTreeMap, BTreeSet};
    use std::thread;

    const TYPES: [&str; 3] = ["A", "B", "C"];

    fn small_blocks() -> GraphConfig {
        GraphConfig {
            precision: 100,
            adjacency: AdjacencyConfig {
                block_size: 8,
                buffer_ops_limit: 32,
                expansion_min: 4,
                expansion_max: 64,
            },
            ..GraphConfig::default()
        }
    }

    /// Object-safe slice of the graph API so a test body can run on both backends.
    trait GraphOps {
        fn add(&self, from: NodeId, to: NodeId, t: &'static str, w: f64, bi: bool) -> Result<()>;
        fn remove(&self, from: NodeId, to: NodeId, bi: bool) -> Result<()>;
        fn get(&self, from: NodeId, to: NodeId) -> Result<GraphEdge<&'static str>>;
        fn from_map(&self, node: NodeId) -> BTreeMap<NodeId, f64>;
        fn to_map(&self, node: NodeId) -> BTreeMap<NodeId, f64>;
        fn nodes(&self) -> usize;
        fn edges(&self) -> usize;
    }

    // Unregistered nodes have no connections.
    fn or_empty(r: Result<Vec<GraphEdge<&'static str>>>) -> Vec<GraphEdge<&'static str>> {
        match r {
            Err(GraphError::NodeNotFound(_)) => Vec::new(),
            r => r.unwrap(),
        }
    }

    impl<S: EdgeStore> GraphOps for Graph<&'static str, S> {
        fn add(&self, from: NodeId, to: NodeId, t: &'static str, w: f64, bi: bool) -> Result<()> {
            self.add_edge(from, to, &t, w, bi)
        }

        fn remove(&self, from: NodeId, to: NodeId, bi: bool) -> Result<()> {
            self.remove_edge(from, to, bi)
        }

        fn get(&self, from: NodeId, to: NodeId) -> Result<GraphEdge<&'static str>> {
            self.get_edge(from, to)
        }

        fn from_map(&self, node: NodeId) -> BTreeMap<NodeId, f64> {
            or_empty(self.edge_connections_from(node, None, 0.0, 1.0))
                .into_iter()
                .map(|e| (e.to, e.weight))
                .collect()
        }

        fn to_map(&self, node: NodeId) -> BTreeMap<NodeId, f64> {
            or_empty(self.edge_connections_to(node, None, 0.0, 1.0))
                .into_iter()
                .map(|e| (e.from, e.weight))
                .collect()
        }

        fn nodes(&self) -> usize {
            self.node_count()
        }

        fn edges(&self) -> usize {
            self.edge_count()
        }
    }

    fn backends() -> Vec<Box<dyn GraphOps>> {
        vec![
            Box::new(Graph::hashed(100, TYPES.to_vec()).unwrap()),
            Box::new(Graph::compact_with_config(small_blocks(), TYPES.to_vec()).unwrap()),
        ]
    }

    fn many_types<S: EdgeStore>(graph: Graph<String, S>, names: &[String], precision: u32) {
        let mut rng = FastRng::new(255);
        let first = &names[0];
        let middle = &names[rng.next(names.len() as u64) as usize];
        let last = &names[names.len() - 1];
        let w1 = 1.0 / precision as f64;
        let w2 = (1 + rng.next(precision as u64 - 1)) as f64 / precision as f64;

        graph.add_edge(1, 2, first, w1, false).unwrap();
        graph.add_edge(2, 3, middle, w2, false).unwrap();
        graph.add_edge(3, 4, last, 1.0, false).unwrap();

        assert_eq!(
            graph.get_edge(1, 2).unwrap(),
            GraphEdge { from: 1, to: 2, edge_type: first.clone(), weight: w1 }
        );
        assert_eq!(
            graph.get_edge(2, 3).unwrap(),
            GraphEdge { from: 2, to: 3, edge_type: middle.clone(), weight: w2 }
        );
        assert_eq!(
            graph.get_edge(3, 4).unwrap(),
            GraphEdge { from: 3, to: 4, edge_type: last.clone(), weight: 1.0 }
        );

        for (i, name) in names.iter().enumerate() {
            let to = 200 + i as NodeId;
            let w = rng.next_weight(precision);
            graph.add_edge(100, to, name, w, false).unwrap();
            let e = graph.get_edge(100, to).unwrap();
            assert_eq!((&e.edge_type, e.weight), (name, w));
        }
    }

    #[test]
    fn test_type_weight_with_many_types() {
        // 255 types * 257 states per type fills the packed range up to 65535.
        let precision = 256;
        let names: Vec<String> = (1..=255).map(|i| format!("type-{}", i)).collect();
        many_types(Graph::hashed(precision, names.clone()).unwrap(), &names, precision);
        many_types(Graph::compact(precision, names.clone()).unwrap(), &names, precision);
    }

    #[test]
    fn test_edge_removal() {
        for graph in backends() {
            graph.add(1, 2, "A", 0.5, true).unwrap();
            graph.remove(1, 2, false).unwrap();
            assert_eq!(graph.get(1, 2), Err(GraphError::EdgeNotFound { from: 1, to: 2 }));
            assert!(graph.get(2, 1).is_ok());
            assert!(graph.remove(1, 2, true).is_ok());
            assert_eq!(graph.get(2, 1), Err(GraphError::EdgeNotFound { from: 2, to: 1 }));
            assert_eq!(graph.edges(), 0);
            assert_eq!(graph.nodes(), 2);
        }
    }

    #[test]
    fn test_error_kinds() {
        for graph in backends() {
            assert_eq!(graph.get(1, 2), Err(GraphError::NodeNotFound(1)));
            assert_eq!(graph.remove(1, 2, false), Err(GraphError::NodeNotFound(1)));

            assert_eq!(graph.add(1, 2, "A", 1.01, false), Err(GraphError::WeightOutOfRange(1.01)));
            assert!(matches!(graph.add(1, 2, "Z", 0.5, false), Err(GraphError::UnknownEdgeType(_))));
            assert_eq!(graph.nodes(), 0);

            graph.add(1, 2, "A", 0.5, false).unwrap();
            assert_eq!(graph.get(2, 1), Err(GraphError::EdgeNotFound { from: 2, to: 1 }));
            assert_eq!(graph.get(1, 3), Err(GraphError::NodeNotFound(3)));
        }
    }

    #[test]
    fn test_latest_write_wins() {
        for graph in backends() {
            let mut rng = FastRng::new(11);
            let mut model: BTreeMap<(NodeId, NodeId), f64> = BTreeMap::new();
            for _ in 0..3000 {
                let from = rng.next(30) as NodeId;
                let to = rng.next(30) as NodeId;
                if rng.next(3) == 0 {
                    if graph.remove(from, to, false).is_ok() {
                        model.remove(&(from, to));
                    }
                } else {
                    let w = rng.next_weight(100);
                    graph.add(from, to, "C", w, false).unwrap();
                    model.insert((from, to), w);
                }
            }
            for from in 0..30 {
                for to in 0..30 {
                    match (graph.get(from, to), model.get(&(from, to))) {
                        (Ok(e), Some(&w)) => assert_eq!(e.weight, w),
                        (Err(GraphError::EdgeNotFound { .. }), None) | (Err(GraphError::NodeNotFound(_)), None) => {}
                        (got, want) => panic!("{}->{}: {:?} vs {:?}", from, to, got, want),
                    }
                }
            }
            assert_eq!(graph.edges(), model.len());
        }
    }

    #[test]
    fn test_random_functionality() {
        for graph in backends() {
            let mut rng = FastRng::new(42);
            let ids: Vec<NodeId> = (0..10).map(|_| rng.next(u32::MAX as u64) as NodeId - (1 << 31)).collect();
            let mut expected: BTreeMap<(NodeId, NodeId), f64> = BTreeMap::new();
            for i in 0..10 {
                for j in 0..10 {
                    if i != j && rng.next_bool() {
                        let w = (rng.next(100) + 1) as f64 / 100.0;
                        expected.insert((ids[i], ids[j]), w);
                        graph.add(ids[i], ids[j], "A", w, false).unwrap();
                    }
                }
            }

            for &node in &ids {
                let out: BTreeMap<_, _> = expected.iter().filter(|(k, _)| k.0 == node).map(|(k, &w)| (k.1, w)).collect();
                let inc: BTreeMap<_, _> = expected.iter().filter(|(k, _)| k.1 == node).map(|(k, &w)| (k.0, w)).collect();
                assert_eq!(graph.from_map(node), out);
                assert_eq!(graph.to_map(node), inc);
            }
            assert_eq!(graph.edges(), expected.len());
        }
    }

    #[test]
    fn test_bidirectional_functionality() {
        for graph in backends() {
            let mut rng = FastRng::new(7);
            let ids: Vec<NodeId> = (0..10).map(|i| i * 1_000_003).collect();
            let mut expected: Vec<BTreeMap<NodeId, f64>> = vec![BTreeMap::new(); 10];
            for i in 0..9 {
                for j in i + 1..10 {
                    if rng.next_bool() {
                        let w = (rng.next(100) + 1) as f64 / 100.0;
                        graph.add(ids[i], ids[j], "B", w, true).unwrap();
                        expected[i].insert(ids[j], w);
                        expected[j].insert(ids[i], w);
                    }
                }
            }
            for (i, &id) in ids.iter().enumerate() {
                assert_eq!(graph.from_map(id), expected[i]);
                assert_eq!(graph.to_map(id), expected[i]);
            }
        }
    }

    #[test]
    fn test_connections_weight_and_type_filter() {
        let graph = Graph::hashed(100, TYPES.to_vec()).unwrap();
        graph.add_edge(1, 2, &"A", 0.1, false).unwrap();
        graph.add_edge(1, 3, &"B", 0.5, false).unwrap();
        graph.add_edge(1, 4, &"A", 0.9, false).unwrap();

        let mid: BTreeSet<_> = graph
            .edge_connections_from(1, None, 0.2, 0.9)
            .unwrap()
            .into_iter()
            .map(|e| e.to)
            .collect();
        assert_eq!(mid, BTreeSet::from([3, 4]));

        let a_only = graph.edge_connections_from(1, Some(&"A"), 0.0, 0.5).unwrap();
        assert_eq!(a_only, vec![GraphEdge { from: 1, to: 2, edge_type: "A", weight: 0.1 }]);

        assert_eq!(graph.edge_connections_to(4, None, 0.0, 1.0).unwrap().len(), 1);
        assert_eq!(graph.edge_connections_from(99, None, 0.0, 1.0), Err(GraphError::NodeNotFound(99)));
    }

    #[test]
    fn test_bulk_load() {
        let graph = Graph::compact_with_config(small_blocks(), TYPES.to_vec()).unwrap();
        let records: Vec<_> = (0..200)
            .map(|i| EdgeRecord {
                from: i,
                to: (i * 7 + 3) % 200,
                edge_type: TYPES[(i % 3) as usize],
                weight: (i % 101) as f64 / 100.0,
                bi_directional: false,
            })
            .collect();
        graph.add_edges(&records).unwrap();
        assert_eq!(graph.edge_count(), records.len());
        for r in &records {
            let e = graph.get_edge(r.from, r.to).unwrap();
            assert_eq!((e.edge_type, e.weight), (r.edge_type, r.weight));
        }

        let bad = vec![
            EdgeRecord { from: 1000, to: 1001, edge_type: "A", weight: 0.5, bi_directional: true },
            EdgeRecord { from: 1002, to: 1003, edge_type: "A", weight: f64::NAN, bi_directional: false },
        ];
        assert!(matches!(graph.add_edges(&bad), Err(GraphError::WeightOutOfRange(_))));
        assert_eq!(graph.node_indexer().lookup(1000), None);
    }

    #[test]
    fn test_shortest_path_in_node_ids() {
        let graph = Graph::compact(10_000, vec!["t"]).unwrap();
        graph.add_edge(-1, 1 << 40, &"t", 0.45, false).unwrap();
        graph.add_edge(1 << 40, 7, &"t", 0.35, false).unwrap();
        for kind in [RouterKind::Dijkstra, RouterKind::Bidirectional] {
            let path = graph.shortest_path(-1, 7, None, f64::INFINITY, kind).unwrap();
            let nodes: Vec<_> = path.iter().map(|s| s.node).collect();
            assert_eq!(nodes, vec![-1, 1 << 40, 7]);
            assert!((path[2].distance - 0.8).abs() < 1e-9);

            assert!(graph.shortest_path(7, -1, None, f64::INFINITY, kind).unwrap().is_empty());
            assert_eq!(
                graph.shortest_path(7, 7, None, 1.0, kind).unwrap(),
                vec![GraphPathStep { node: 7, distance: 0.0 }]
            );
            assert_eq!(graph.shortest_path(7, 8, None, 1.0, kind), Err(GraphError::NodeNotFound(8)));
        }
    }

    #[test]
    fn test_construction_errors() {
        assert!(matches!(Graph::hashed(1, vec!["a"]), Err(GraphError::InvalidConfig(_))));
        assert!(matches!(Graph::<&str, _>::compact(100, vec![]), Err(GraphError::InvalidConfig(_))));
        let many: Vec<u32> = (0..700).collect();
        assert_eq!(
            Graph::hashed(100, many).err(),
            Some(GraphError::Overflow { precision: 100, type_count: 700 })
        );
        let mut config = small_blocks();
        config.adjacency.expansion_min = 1000;
        assert!(matches!(Graph::compact_with_config(config, vec!["a"]), Err(GraphError::InvalidConfig(_))));
    }

    fn concurrent_writers<S: EdgeStore>(graph: &Graph<&'static str, S>) {
        const THREADS: i64 = 8;
        const PER_THREAD: i64 = 500;
        thread::scope(|s| {
            for t in 0..THREADS {
                s.spawn(move || {
                    let base = t * 1_000_000;
                    let mut rng = FastRng::new(t as u64 + 1);
                    let mut written = Vec::new();
                    for i in 0..PER_THREAD {
                        let w = rng.next_weight(100);
                        graph.add_edge(base + i, base + i + 1, &TYPES[(i % 3) as usize], w, false).unwrap();
                        written.push((base + i, w));
                    }
                    for (from, w) in written {
                        assert_eq!(graph.get_edge(from, from + 1).unwrap().weight, w);
                    }
                });
            }
        });
        assert_eq!(graph.edge_count(), (THREADS * PER_THREAD) as usize);
        assert_eq!(graph.node_count(), (THREADS * (PER_THREAD + 1)) as usize);
    }

    #[test]
    fn test_concurrent_writers_on_disjoint_nodes() {
        concurrent_writers(&Graph::hashed(100, TYPES.to_vec()).unwrap());
        concurrent_writers(&Graph::compact_with_config(small_blocks(), TYPES.to_vec()).unwrap());
    }

    #[test]
    fn test_routing_while_writing_with_small_buffer() {
        const CHAIN: NodeId = 200;
        const WRITERS: NodeId = 2;
        const PER_WRITER: NodeId = 2000;

        let mut config = small_blocks();
        config.adjacency.buffer_ops_limit = 16;
        let graph = Graph::compact_with_config(config, TYPES.to_vec()).unwrap();
        for i in 0..CHAIN {
            graph.add_edge(i, i + 1, &"A", 0.01, false).unwrap();
        }

        thread::scope(|s| {
            for w in 0..WRITERS {
                let graph = &graph;
                s.spawn(move || {
                    let base = (w + 1) * 1_000_000;
                    for i in 0..PER_WRITER {
                        // Dead-end edges off the chain keep the cheapest route unchanged.
                        graph.add_edge(i % CHAIN, base + i, &"B", 1.0, false).unwrap();
                    }
                });
            }
            for r in 0..4 {
                let graph = &graph;
                let kind = if r % 2 == 0 {
                    RouterKind::Dijkstra
                } else {
                    RouterKind::Bidirectional
                };
                s.spawn(move || {
                    for _ in 0..100 {
                        let path = graph.shortest_path(0, CHAIN, None, f64::INFINITY, kind).unwrap();
                        assert_eq!(path.len(), CHAIN as usize + 1);
                        assert!(path.iter().enumerate().all(|(i, step)| step.node == i as NodeId));
                        assert!((path[CHAIN as usize].distance - 2.0).abs() < 1e-9);
                    }
                });
            }
        });

        assert_eq!(graph.edge_count(), (CHAIN + WRITERS * PER_WRITER) as usize);
        for w in 0..WRITERS {
            let base = (w + 1) * 1_000_000;
            assert_eq!(graph.get_edge(7, base + 7).unwrap().weight, 1.0);
        }
        for kind in [RouterKind::Dijkstra, RouterKind::Bidirectional] {
            assert_eq!(graph.shortest_path(0, CHAIN, None, f64::INFINITY, kind).unwrap().len(), 201);
        }
    }

    #[test]
    fn test_memory_usage_grows() {
        let graph = Graph::compact(100, TYPES.to_vec()).unwrap();
        let empty = graph.memory_usage();
        for i in 0..1000 {
            graph.add_edge(i, i + 1, &"A", 0.5, false).unwrap();
        }
        assert!(graph.memory_usage() > empty);
    }
}
