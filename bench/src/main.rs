use std::collections::VecDeque;
use std::time::Instant;

use tracing::info;
use tracing_subscriber::EnvFilter;
use wgraph_core::{EdgeRecord, EdgeStore, Graph, GraphConfig, NodeId, RouterKind};

const PRECISION: u32 = 1000;
const LOAD_CHUNK: usize = 10_000;
const READ_SAMPLE: usize = 100_000;

const REL_TYPES: [&str; 7] = [
    "IMPLIES",
    "SUPPORTS",
    "CONTRADICTS",
    "RELATED_TO",
    "REQUIRES",
    "BRIDGES",
    "NEXT",
];

type Generator = fn(u64) -> Vec<EdgeRecord<&'static str>>;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let node_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(200_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: wgraph-bench [mode] [node_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  lsystem     Fractal branching tree (deep paths)");
        println!("  scalefree   Preferential attachment via edge sampling (hub-and-spoke)");
        println!("  smallworld  Watts-Strogatz ring lattice + shortcuts");
        println!("  random      Erdos-Renyi uniform random edges");
        println!("  barbell     Two dense cliques connected by a thin bridge");
        println!("  dla         Diffusion-limited aggregation (organic branching)");
        println!();
        println!("Default node_count: 200000. Set RUST_LOG=debug to see compactions.");
        return;
    }

    println!("wgraph-bench");
    println!("============");
    println!();

    let generators: Vec<(&str, Generator)> = match mode {
        "lsystem" => vec![("L-system tree", gen_lsystem)],
        "scalefree" => vec![("Scale-free (edge sampling)", gen_scale_free)],
        "smallworld" => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "barbell" => vec![("Barbell (clique-bridge-clique)", gen_barbell)],
        "dla" => vec![("DLA (organic branching)", gen_dla)],
        "all" => vec![
            ("L-system tree", gen_lsystem as Generator),
            ("Scale-free (edge sampling)", gen_scale_free),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (clique-bridge-clique)", gen_barbell),
            ("DLA (organic branching)", gen_dla),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        if let Err(e) = run_benchmark(name, generator, node_count) {
            eprintln!("{}: {}", name, e);
        }
    }
}

fn run_benchmark(name: &str, generator: Generator, node_count: u64) -> wgraph_core::Result<()> {
    println!("--- {} ---", name);
    println!("Target: {} nodes", node_count);

    let t = Instant::now();
    let edges = generator(node_count);
    info!(generator = name, edges = edges.len(), "edge list generated");
    println!("Generated {} edges in {:.2}s", edges.len(), t.elapsed().as_secs_f64());

    let config = GraphConfig {
        precision: PRECISION,
        expected_nodes: node_count as usize,
        expected_edges: edges.len(),
        ..GraphConfig::default()
    };

    println!();
    println!(
        "{:>6} {:>10} {:>12} {:>10} {:>10} {:>10}",
        "store", "load", "edges", "count", "reads", "memory"
    );
    println!("{:->6} {:->10} {:->12} {:->10} {:->10} {:->10}", "", "", "", "", "", "");

    let hashed = Graph::hashed_with_config(config.clone(), REL_TYPES.to_vec())?;
    bench_store("hash", &hashed, &edges)?;
    let compact = Graph::compact_with_config(config, REL_TYPES.to_vec())?;
    bench_store("block", &compact, &edges)?;

    let far_node = node_count as NodeId - 1;
    println!();
    for (label, kind) in [("dijkstra", RouterKind::Dijkstra), ("bidir", RouterKind::Bidirectional)] {
        bench_route("hash", label, &hashed, far_node, kind)?;
        bench_route("block", label, &compact, far_node, kind)?;
    }
    println!();
    Ok(())
}

fn bench_store<S: EdgeStore>(
    label: &str,
    graph: &Graph<&'static str, S>,
    edges: &[EdgeRecord<&'static str>],
) -> wgraph_core::Result<()> {
    let t = Instant::now();
    for chunk in edges.chunks(LOAD_CHUNK) {
        graph.add_edges(chunk)?;
    }
    let load = t.elapsed();

    let t = Instant::now();
    let count = graph.edge_count();
    let count_time = t.elapsed();

    let t = Instant::now();
    let step = (edges.len() / READ_SAMPLE).max(1);
    for r in edges.iter().step_by(step) {
        graph.get_edge(r.from, r.to)?;
    }
    let reads = t.elapsed();

    println!(
        "{:>6} {:>8.2}s {:>12} {:>8.1}ms {:>8.1}ms {:>8.1}MB",
        label,
        load.as_secs_f64(),
        count,
        count_time.as_secs_f64() * 1000.0,
        reads.as_secs_f64() * 1000.0,
        graph.memory_usage() as f64 / 1_048_576.0
    );
    Ok(())
}

fn bench_route<S: EdgeStore>(
    store: &str,
    router: &str,
    graph: &Graph<&'static str, S>,
    far_node: NodeId,
    kind: RouterKind,
) -> wgraph_core::Result<()> {
    if graph.node_indexer().lookup(far_node).is_none() {
        println!("Shortest path 0 -> {} ({}/{}): target never loaded", far_node, store, router);
        return Ok(());
    }
    let t = Instant::now();
    let path = graph.shortest_path(0, far_node, None, f64::INFINITY, kind)?;
    let elapsed = t.elapsed();
    match path.last() {
        Some(last) => println!(
            "Shortest path 0 -> {} ({}/{}): {} hops, distance {:.3} in {:.1}ms",
            far_node,
            store,
            router,
            path.len() - 1,
            last.distance,
            elapsed.as_secs_f64() * 1000.0
        ),
        None => println!(
            "Shortest path 0 -> {} ({}/{}): no path ({:.1}ms)",
            far_node,
            store,
            router,
            elapsed.as_secs_f64() * 1000.0
        ),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Weighted edge-list generators. Seeded, so every run loads the same graph.
// ---------------------------------------------------------------------------

/// Seeded LCG driving the generators.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Random edge of one of the first five types, weight on the precision grid.
    fn edge(&mut self, from: u64, to: u64) -> EdgeRecord<&'static str> {
        let edge_type = REL_TYPES[self.next(5) as usize];
        self.typed_edge(from, to, edge_type)
    }

    fn typed_edge(&mut self, from: u64, to: u64, edge_type: &'static str) -> EdgeRecord<&'static str> {
        EdgeRecord {
            from: from as NodeId,
            to: to as NodeId,
            edge_type,
            weight: self.next(PRECISION as u64 + 1) as f64 / PRECISION as f64,
            bi_directional: false,
        }
    }
}

/// Ternary tree in id order. The last node is a leaf, so routes from the
/// root walk the full depth.
fn gen_lsystem(node_count: u64) -> Vec<EdgeRecord<&'static str>> {
    let mut edges = Vec::with_capacity(node_count as usize);
    let mut rng = FastRng::new(42);

    let branching = 3u64;
    let mut next_id: u64 = 1;
    let mut frontier: Vec<u64> = vec![0];

    while next_id < node_count && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching as usize);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= node_count {
                    break;
                }
                let child = next_id;
                next_id += 1;
                edges.push(rng.edge(parent, child));
                next_frontier.push(child);
            }
        }
        frontier = next_frontier;
    }

    edges
}

/// Hub-heavy graph: each new node links from endpoints sampled out of the
/// edge list, which favors high-degree nodes. Edges run old to new.
fn gen_scale_free(node_count: u64) -> Vec<EdgeRecord<&'static str>> {
    let edges_per_node = 10u64;
    let mut edges = Vec::with_capacity((node_count * edges_per_node) as usize);
    let mut rng = FastRng::new(12345);

    // Every edge contributes both endpoints; sampling it is degree-weighted.
    let mut edge_endpoints: Vec<u64> = Vec::with_capacity((node_count * edges_per_node * 2) as usize);

    let seed = 5u64.min(node_count);
    for i in 0..seed {
        for j in (i + 1)..seed {
            edges.push(rng.edge(i, j));
            edge_endpoints.push(i);
            edge_endpoints.push(j);
        }
    }

    for new_node in seed..node_count {
        let attach = edges_per_node.min(new_node);
        for _ in 0..attach {
            let idx = rng.next(edge_endpoints.len() as u64) as usize;
            let target = edge_endpoints[idx];
            if target != new_node {
                edges.push(rng.edge(target, new_node));
                edge_endpoints.push(new_node);
                edge_endpoints.push(target);
            }
        }
    }

    edges
}

/// Ring where each node links to its next `k` neighbors, a few links
/// redirected to random targets as shortcuts.
fn gen_small_world(node_count: u64) -> Vec<EdgeRecord<&'static str>> {
    let k = 10u64;
    let p = 0.05f64;
    let mut edges = Vec::with_capacity((node_count * k) as usize);
    let mut rng = FastRng::new(67890);

    for i in 0..node_count {
        for j in 1..=k {
            let neighbor = (i + j) % node_count;
            let target = if rng.next_f64() < p {
                let rewired = rng.next(node_count);
                if rewired != i {
                    rewired
                } else {
                    neighbor
                }
            } else {
                neighbor
            };
            edges.push(rng.edge(i, target));
        }
    }

    edges
}

/// Uniform random pairs, ten per node.
fn gen_random(node_count: u64) -> Vec<EdgeRecord<&'static str>> {
    let target_edges = node_count * 10;
    let mut edges = Vec::with_capacity(target_edges as usize);
    let mut rng = FastRng::new(54321);

    for _ in 0..target_edges {
        let from = rng.next(node_count);
        let to = rng.next(node_count);
        if from != to {
            edges.push(rng.edge(from, to));
        }
    }

    edges
}

/// Two dense halves joined by a one-way chain (`BRIDGES` at each end, `NEXT`
/// inside). Routes between the halves can only cross the chain.
fn gen_barbell(node_count: u64) -> Vec<EdgeRecord<&'static str>> {
    let bridge_len = 10u64;
    let clique_size = node_count.saturating_sub(bridge_len) / 2;
    let mut edges = Vec::with_capacity((clique_size * 40 + bridge_len) as usize);
    let mut rng = FastRng::new(99999);
    if clique_size < 2 {
        return edges;
    }

    // First half: ids 0..clique_size.
    for i in 0..clique_size {
        for _ in 0..20u64.min(clique_size - 1) {
            let target = rng.next(clique_size);
            if target != i {
                edges.push(rng.edge(i, target));
            }
        }
    }

    let bridge_start = clique_size;
    edges.push(rng.typed_edge(clique_size - 1, bridge_start, "BRIDGES"));
    for id in bridge_start + 1..bridge_start + bridge_len {
        edges.push(rng.typed_edge(id - 1, id, "NEXT"));
    }

    // Second half starts after the chain and ends at the last id.
    let b_start = bridge_start + bridge_len;
    edges.push(rng.typed_edge(b_start - 1, b_start, "BRIDGES"));
    for i in 0..clique_size {
        for _ in 0..20u64.min(clique_size - 1) {
            let target = rng.next(clique_size);
            if target != i {
                edges.push(rng.edge(b_start + i, b_start + target));
            }
        }
    }

    edges
}

/// Growth from a seed: each node hangs off a recently added one, and one in
/// ten also gets an edge from any older node.
fn gen_dla(node_count: u64) -> Vec<EdgeRecord<&'static str>> {
    let mut edges = Vec::with_capacity((node_count * 2) as usize);
    let mut rng = FastRng::new(77777);

    let surface_max = 10000usize;
    let mut surface: VecDeque<u64> = VecDeque::with_capacity(surface_max + 1);
    surface.push_back(0);

    for new_node in 1..node_count {
        let attach_to = surface[rng.next(surface.len() as u64) as usize];
        edges.push(rng.edge(attach_to, new_node));

        if rng.next(10) == 0 && new_node > 1 {
            let other = rng.next(new_node);
            if other != attach_to {
                edges.push(rng.edge(other, new_node));
            }
        }

        surface.push_back(new_node);
        if surface.len() > surface_max {
            surface.pop_front();
        }
    }

    edges
}
