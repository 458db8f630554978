use graph_paths_core::{
    AllSimplePaths, Graph, NodeId, PathError, SearchConfig, TraversalDirection,
};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

const REL_TYPE: &str = "LINKS";

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();

    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let node_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(10_000);
    let max_depth: i32 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(12);

    if mode == "help" || mode == "--help" {
        println!("Usage: graph-paths-bench [mode] [node_count] [max_depth]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  ladder      Chained diamonds (path count doubles per rung)");
        println!("  smallworld  Ring lattice + random shortcuts");
        println!("  random      Erdos-Renyi uniform random edges");
        println!("  barbell     Two dense cliques connected by a thin bridge");
        println!();
        println!("Default node_count: 10000, default max_depth: 12");
        println!("Set RUST_LOG=graph_paths_core=debug for per-search logging.");
        return;
    }

    println!("graph-paths-bench");
    println!("=================");
    println!();

    let generators: Vec<(&str, fn(u64) -> Graph)> = match mode {
        "ladder" => vec![("Diamond ladder", gen_ladder)],
        "smallworld" => vec![("Small-world ring", gen_small_world)],
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "barbell" => vec![("Barbell (clique-bridge-clique)", gen_barbell)],
        "all" => vec![
            ("Diamond ladder", gen_ladder as fn(u64) -> Graph),
            ("Small-world ring", gen_small_world),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (clique-bridge-clique)", gen_barbell),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, node_count, max_depth);
    }
}

fn run_benchmark(name: &str, generator: fn(u64) -> Graph, node_count: u64, max_depth: i32) {
    println!("--- {} ---", name);
    println!("Target: {} nodes", node_count);

    let t = Instant::now();
    let graph = generator(node_count);
    let gen_time = t.elapsed();
    println!(
        "Generated in {:.2}s: {} nodes, {} edges, ~{:.1}MB",
        gen_time.as_secs_f64(),
        graph.node_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );

    let Some(rel_type) = graph.rel_type_id(REL_TYPE).filter(|_| graph.node_count() >= 2) else {
        println!("(graph too small to enumerate)");
        println!();
        return;
    };
    let start: NodeId = 0;
    let end: NodeId = graph.node_count() as NodeId - 1;
    let config = SearchConfig::default()
        .max_frontier_paths(2_000_000)
        .max_paths(2_000_000);

    let enumerator = match AllSimplePaths::with_config(
        &graph,
        start,
        end,
        rel_type,
        TraversalDirection::Outgoing,
        config,
    ) {
        Ok(e) => e,
        Err(e) => {
            println!("Cannot enumerate {} → {}: {}", start, end, e);
            println!();
            return;
        }
    };

    println!();
    println!("Simple paths {} → {}", start, end);
    println!(
        "{:>6} {:>10} {:>8} {:>8} {:>10} {:>12} {:>10}",
        "bound", "paths", "fwd", "bwd", "peak", "examined", "time"
    );
    println!(
        "{:->6} {:->10} {:->8} {:->8} {:->10} {:->12} {:->10}",
        "", "", "", "", "", "", ""
    );

    for bound in 1..=max_depth {
        let t = Instant::now();
        let result = enumerator.search(bound);
        let elapsed = t.elapsed();

        match result {
            Ok(found) => {
                println!(
                    "{:>6} {:>10} {:>8} {:>8} {:>10} {:>12} {:>8.1}ms",
                    bound,
                    found.paths.len(),
                    found.stats.forward_depth,
                    found.stats.backward_depth,
                    found.stats.peak_frontier_width,
                    found.stats.relationships_examined,
                    elapsed.as_secs_f64() * 1000.0
                );
                // A side ran dry before the depths added up to the bound:
                // larger bounds repeat this row.
                if found.stats.forward_depth + found.stats.backward_depth < bound as u32 {
                    println!("{:>6} (search space exhausted)", "");
                    break;
                }
            }
            Err(PathError::ResourceExceeded { resource, limit }) => {
                println!(
                    "{:>6} stopped: {} over {} after {:.1}ms",
                    bound,
                    resource,
                    limit,
                    elapsed.as_secs_f64() * 1000.0
                );
                break;
            }
            Err(e) => {
                println!("{:>6} error: {}", bound, e);
                break;
            }
        }
    }
    println!();
}

// ---------------------------------------------------------------------------
// Generators: deterministic, single-threaded, one relationship type
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
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
}

fn add_nodes(graph: &mut Graph, ids: std::ops::Range<u64>, label: &str) {
    for i in ids {
        graph.add_node(i, label.into(), Some(format!("n_{}", i)));
    }
}

/// Chained diamonds: hub → {left, right} → next hub, repeated.
///
/// Every rung doubles the number of start→end paths, all of the same
/// length, so the result set grows exponentially with the bound while each
/// frontier stays narrow until the sides meet.
fn gen_ladder(node_count: u64) -> Graph {
    let rungs = (node_count.max(4) - 1) / 3;
    let mut graph = Graph::with_capacity((rungs * 3 + 1) as usize, (rungs * 4) as usize);
    let rt = graph.intern_rel_type(REL_TYPE);

    add_nodes(&mut graph, 0..rungs * 3 + 1, "Rung");
    for r in 0..rungs {
        let hub = r * 3;
        let (left, right, next) = (hub + 1, hub + 2, hub + 3);
        graph.add_edge(hub, left, rt);
        graph.add_edge(hub, right, rt);
        graph.add_edge(left, next, rt);
        graph.add_edge(right, next, rt);
    }

    graph
}

/// Small-world: forward ring lattice with occasional long-range shortcuts.
///
/// Each node links to its next `k` ring neighbors; with probability `p` a
/// link is redirected to a random node instead. Produces many alternative
/// routes of similar length.
fn gen_small_world(node_count: u64) -> Graph {
    let k = 3u64;
    let p = 0.05f64;
    let mut graph = Graph::with_capacity(node_count as usize, (node_count * k) as usize);
    let mut rng = FastRng::new(67890);
    let rt = graph.intern_rel_type(REL_TYPE);

    add_nodes(&mut graph, 0..node_count, "Concept");
    for i in 0..node_count {
        for j in 1..=k {
            let ring = (i + j) % node_count;
            let target = if rng.next_f64() < p {
                rng.next(node_count)
            } else {
                ring
            };
            if target != i {
                graph.add_edge(i, target, rt);
            }
        }
    }

    graph
}

/// Erdos-Renyi: ~3 uniform random out-edges per node, no structure.
fn gen_random(node_count: u64) -> Graph {
    let target_edges = node_count * 3;
    let mut graph = Graph::with_capacity(node_count as usize, target_edges as usize);
    let mut rng = FastRng::new(54321);
    let rt = graph.intern_rel_type(REL_TYPE);

    add_nodes(&mut graph, 0..node_count, "Concept");
    for _ in 0..target_edges {
        let from = rng.next(node_count);
        let to = rng.next(node_count);
        if from != to {
            graph.add_edge(from, to, rt);
        }
    }

    graph
}

/// Barbell: two random cliques joined by a one-way bridge chain.
///
/// Every start→end path funnels through the bridge, so the two frontiers
/// explode inside their cliques long before they can meet.
fn gen_barbell(node_count: u64) -> Graph {
    let bridge_len = 10u64;
    let clique_size = (node_count.max(bridge_len + 4) - bridge_len) / 2;
    let degree = 5u64.min(clique_size - 1);
    let mut graph = Graph::with_capacity(
        (clique_size * 2 + bridge_len) as usize,
        (clique_size * degree * 2 + bridge_len + 1) as usize,
    );
    let mut rng = FastRng::new(99999);
    let rt = graph.intern_rel_type(REL_TYPE);

    let bridge_start = clique_size;
    let b_start = bridge_start + bridge_len;
    add_nodes(&mut graph, 0..clique_size, "ClusterA");
    add_nodes(&mut graph, bridge_start..b_start, "Bridge");
    add_nodes(&mut graph, b_start..b_start + clique_size, "ClusterB");

    for base in [0, b_start] {
        for i in 0..clique_size {
            for _ in 0..degree {
                let target = rng.next(clique_size);
                if target != i {
                    graph.add_edge(base + i, base + target, rt);
                }
            }
        }
    }

    // Last node of A → bridge chain → first node of B
    let mut prev = clique_size - 1;
    for id in bridge_start..=b_start {
        graph.add_edge(prev, id, rt);
        prev = id;
    }

    graph
}
