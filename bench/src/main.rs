use fastroute_core::{Cost, Frontier, Graph, NodeId, PathCost};
use std::collections::VecDeque;
use std::time::Instant;

/// Above this size the O(V^2) linear frontier is skipped.
const LINEAR_LIMIT: usize = 50_000;

/// Edge weights are drawn uniformly from 1..=MAX_WEIGHT.
const MAX_WEIGHT: u64 = 100;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let node_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(20_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: fastroute-bench [mode] [node_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  tree        Fractal branching tree (deep paths)");
        println!("  grid        Square lattice with right/down edges (many equal-cost ties)");
        println!("  smallworld  Watts-Strogatz ring lattice + shortcuts");
        println!("  random      Erdos-Renyi uniform random edges");
        println!("  barbell     Two dense cliques connected by a thin bridge");
        println!("  dla         Diffusion-limited aggregation (organic branching)");
        println!();
        println!("Default node_count: 20000 (linear frontier skipped above {})", LINEAR_LIMIT);
        return;
    }

    println!("fastroute-bench");
    println!("===============");
    println!();

    let generators: Vec<Generator> = match mode {
        "all" => all_generators(),
        _ => match all_generators().into_iter().find(|g| g.mode == mode) {
            Some(g) => vec![g],
            None => {
                eprintln!("Unknown mode: {}. Use --help for options.", mode);
                return;
            }
        },
    };

    for g in generators {
        run_benchmark(g.name, g.build, node_count);
    }
}

struct Generator {
    mode: &'static str,
    name: &'static str,
    build: fn(u64) -> Graph,
}

fn all_generators() -> Vec<Generator> {
    vec![
        Generator { mode: "tree", name: "Branching tree", build: gen_tree },
        Generator { mode: "grid", name: "Grid lattice", build: gen_grid },
        Generator { mode: "smallworld", name: "Small-world (Watts-Strogatz)", build: gen_small_world },
        Generator { mode: "random", name: "Erdos-Renyi random", build: gen_random },
        Generator { mode: "barbell", name: "Barbell (clique-bridge-clique)", build: gen_barbell },
        Generator { mode: "dla", name: "DLA (organic branching)", build: gen_dla },
    ]
}

fn run_benchmark(name: &str, generator: fn(u64) -> Graph, node_count: u64) {
    println!("--- {} ---", name);
    println!("Target: {} nodes", node_count);

    // Generators draw ids modulo the node count.
    if node_count == 0 {
        println!("(empty graph, skipped)");
        println!();
        return;
    }

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

    if graph.node_count() == 0 {
        println!("(empty graph, skipped)");
        println!();
        return;
    }

    // Full single-source table from node 0
    let t = Instant::now();
    let (table, stats) =
        match fastroute_core::single_source_costs_with_stats(&graph, 0, Frontier::Heap) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("single-source run failed: {}", e);
                return;
            }
        };
    println!(
        "Single-source from 0: {} reachable, {} settled, {} edges relaxed, {} improvements in {:.1}ms",
        table.reachable_count(),
        stats.nodes_settled,
        stats.edges_relaxed,
        stats.improvements,
        t.elapsed().as_secs_f64() * 1000.0
    );

    // Point query: node 0 to last node, both frontiers
    let far_node = (graph.node_count() - 1) as NodeId;
    println!();
    println!("{:>8} {:>14} {:>10}", "frontier", "cost", "time");
    println!("{:->8} {:->14} {:->10}", "", "", "");

    let heap_cost = time_query(&graph, far_node, Frontier::Heap);
    if graph.node_count() <= LINEAR_LIMIT {
        let linear_cost = time_query(&graph, far_node, Frontier::Linear);
        if heap_cost != linear_cost {
            println!("MISMATCH: heap={:?} linear={:?}", heap_cost, linear_cost);
        }
    } else {
        println!("{:>8} (skipped, {} nodes > {})", "linear", graph.node_count(), LINEAR_LIMIT);
    }
    println!();
}

fn time_query(graph: &Graph, target: NodeId, frontier: Frontier) -> Option<PathCost> {
    let label = match frontier {
        Frontier::Heap => "heap",
        Frontier::Linear => "linear",
    };
    let t = Instant::now();
    let result = fastroute_core::shortest_path_cost_with(graph, 0, target, frontier);
    let elapsed = t.elapsed();
    match result {
        Ok(cost) => {
            println!("{:>8} {:>14} {:>8.1}ms", label, cost.to_string(), elapsed.as_secs_f64() * 1000.0);
            Some(cost)
        }
        Err(e) => {
            println!("{:>8} error: {}", label, e);
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Generators: all O(n) or O(n + edges), single-threaded, deterministic
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
    fn weight(&mut self) -> Cost {
        1 + self.next(MAX_WEIGHT)
    }
}

/// Register `n` nodes named `n0..n{n-1}` so that ids match the loop index.
fn register_nodes(graph: &mut Graph, n: u64) {
    for i in 0..n {
        graph.add_node(&format!("n{}", i));
    }
}

/// Fractal tree: each node spawns `branching` children.
///
/// Produces deep paths (log depth) with exponential width; every node has
/// exactly one path from the root.
fn gen_tree(node_count: u64) -> Graph {
    let mut graph = Graph::with_capacity(node_count as usize, node_count as usize);
    let mut rng = FastRng::new(42);
    register_nodes(&mut graph, node_count);

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
                graph.add_edge_by_id(parent as NodeId, child as NodeId, rng.weight());
                next_frontier.push(child);
            }
        }
        frontier = next_frontier;
    }

    graph
}

/// Square lattice with unit-weight right and down edges.
///
/// Every monotone path between two cells costs the same, so this stresses
/// the lowest-id tie-break.
fn gen_grid(node_count: u64) -> Graph {
    let side = (node_count as f64).sqrt() as u64;
    let n = side * side;
    let mut graph = Graph::with_capacity(n as usize, (n * 2) as usize);
    register_nodes(&mut graph, n);

    for row in 0..side {
        for col in 0..side {
            let id = row * side + col;
            if col + 1 < side {
                graph.add_edge_by_id(id as NodeId, (id + 1) as NodeId, 1);
            }
            if row + 1 < side {
                graph.add_edge_by_id(id as NodeId, (id + side) as NodeId, 1);
            }
        }
    }

    graph
}

/// Small-world (Watts-Strogatz): ring lattice + random rewiring.
///
/// Start with each node connected to K nearest neighbors on a ring,
/// then rewire each edge with probability p. Produces high clustering
/// with short path lengths.
fn gen_small_world(node_count: u64) -> Graph {
    let k = 10u64; // neighbors on each side
    let p = 0.05f64; // rewire probability
    let mut graph = Graph::with_capacity(node_count as usize, (node_count * k) as usize);
    let mut rng = FastRng::new(67890);
    register_nodes(&mut graph, node_count);

    for i in 0..node_count {
        for j in 1..=k {
            let neighbor = (i + j) % node_count;
            let weight = rng.weight();

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
            graph.add_edge_by_id(i as NodeId, target as NodeId, weight);
        }
    }

    graph
}

/// Erdos-Renyi: uniform random edges, ~10 per node on average.
fn gen_random(node_count: u64) -> Graph {
    let target_edges = node_count * 10;
    let mut graph = Graph::with_capacity(node_count as usize, target_edges as usize);
    let mut rng = FastRng::new(54321);
    register_nodes(&mut graph, node_count);

    for _ in 0..target_edges {
        let from = rng.next(node_count);
        let to = rng.next(node_count);
        if from != to {
            graph.add_edge_by_id(from as NodeId, to as NodeId, rng.weight());
        }
    }

    graph
}

/// Barbell: two dense cliques connected by a single thin bridge.
///
/// Every path from the first clique to the second crosses the bridge chain.
fn gen_barbell(node_count: u64) -> Graph {
    let bridge_len = 10u64;
    let clique_size = node_count.saturating_sub(bridge_len) / 2;
    if clique_size < 2 {
        return Graph::new();
    }
    let total = clique_size * 2 + bridge_len;
    let mut graph = Graph::with_capacity(total as usize, (clique_size * 40 + bridge_len) as usize);
    let mut rng = FastRng::new(99999);
    register_nodes(&mut graph, total);

    let b_start = clique_size + bridge_len;
    for base in [0, b_start] {
        for i in 0..clique_size {
            for _ in 0..20u64.min(clique_size - 1) {
                let target = rng.next(clique_size);
                if target != i {
                    graph.add_edge_by_id((base + i) as NodeId, (base + target) as NodeId, rng.weight());
                }
            }
        }
    }

    // Bridge: chain from the last node of A through the bridge into B
    for id in clique_size..=b_start {
        graph.add_edge_by_id((id - 1) as NodeId, id as NodeId, rng.weight());
    }

    graph
}

/// DLA (Diffusion-Limited Aggregation): organic branching growth.
///
/// Each new node attaches to a recent "surface" node, with occasional
/// long-range shortcuts. Edges point from older to newer nodes so the last
/// node is reachable from the seed.
fn gen_dla(node_count: u64) -> Graph {
    let mut graph = Graph::with_capacity(node_count as usize, (node_count * 2) as usize);
    let mut rng = FastRng::new(77777);
    register_nodes(&mut graph, node_count);

    let mut surface: VecDeque<u64> = VecDeque::with_capacity(10001);
    surface.push_back(0);
    let surface_max = 10000usize;

    for new_node in 1..node_count {
        let attach_to = surface[rng.next(surface.len() as u64) as usize];
        graph.add_edge_by_id(attach_to as NodeId, new_node as NodeId, rng.weight());

        // 10% chance of a second connection (creates shortcuts)
        if rng.next(10) == 0 && new_node > 1 {
            let other = rng.next(new_node);
            if other != attach_to {
                graph.add_edge_by_id(other as NodeId, new_node as NodeId, rng.weight());
            }
        }

        surface.push_back(new_node);
        if surface.len() > surface_max {
            surface.pop_front();
        }
    }

    graph
}
