use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;

use tracing::debug;

use crate::error::GraphError;
use crate::graph::{Cost, Graph, NodeId};

/// Cost-table sentinel for "no path found yet".
///
/// Edge weights are capped at `MAX_EDGE_COST`, so no real path sum can
/// reach this value. Additions are still checked and never wrap.
pub const INFINITY: Cost = Cost::MAX;

/// Outcome of a single shortest-path query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathCost {
    Reachable(Cost),
    Unreachable,
}

impl PathCost {
    fn from_raw(raw: Cost) -> Self {
        if raw == INFINITY {
            PathCost::Unreachable
        } else {
            PathCost::Reachable(raw)
        }
    }

    /// The finite cost, or None when unreachable.
    pub fn cost(self) -> Option<Cost> {
        match self {
            PathCost::Reachable(c) => Some(c),
            PathCost::Unreachable => None,
        }
    }

    pub fn is_reachable(self) -> bool {
        matches!(self, PathCost::Reachable(_))
    }
}

impl fmt::Display for PathCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathCost::Reachable(c) => write!(f, "{}", c),
            PathCost::Unreachable => f.write_str("unreachable"),
        }
    }
}

/// How the next node to settle is picked.
///
/// Both strategies break cost ties by lowest `NodeId`, so they settle nodes
/// in the same order and always agree on every cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Frontier {
    /// Binary heap with lazy deletion: O((V + E) log V).
    #[default]
    Heap,
    /// Linear scan over the cost table: O(V^2).
    Linear,
}

/// Counters collected while running a query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryStats {
    /// Nodes whose cost was finalized.
    pub nodes_settled: usize,
    /// Outgoing edges examined from settled nodes.
    pub edges_relaxed: usize,
    /// Relaxations that lowered a cost-table entry.
    pub improvements: usize,
}

/// Best-known cost from a start node to every node of a graph.
///
/// Dense, indexed by `NodeId`. Created fresh per query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostTable {
    start: NodeId,
    costs: Vec<Cost>,
}

impl CostTable {
    fn new(node_count: usize, start: NodeId) -> Self {
        let mut costs = vec![INFINITY; node_count];
        costs[start as usize] = 0;
        Self { start, costs }
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    /// Cost to `id`, or None if `id` is outside the graph the table was built for.
    pub fn get(&self, id: NodeId) -> Option<PathCost> {
        self.costs.get(id as usize).map(|&raw| PathCost::from_raw(raw))
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// (node, cost) for every node, in id order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, PathCost)> + '_ {
        self.costs
            .iter()
            .enumerate()
            .map(|(i, &raw)| (i as NodeId, PathCost::from_raw(raw)))
    }

    /// Number of nodes with a finite cost (the start node included).
    pub fn reachable_count(&self) -> usize {
        self.costs.iter().filter(|&&c| c != INFINITY).count()
    }

    fn raw(&self, id: NodeId) -> Cost {
        self.costs[id as usize]
    }
}

fn check_node(graph: &Graph, id: NodeId) -> Result<(), GraphError> {
    if graph.contains(id) {
        Ok(())
    } else {
        Err(GraphError::InvalidNodeId {
            id,
            node_count: graph.node_count(),
        })
    }
}

/// Minimum total edge weight of any directed path from `start` to `target`.
///
/// Returns `PathCost::Unreachable` when no path exists, and
/// `GraphError::InvalidNodeId` when either endpoint is not in the graph.
pub fn shortest_path_cost(
    graph: &Graph,
    start: NodeId,
    target: NodeId,
) -> Result<PathCost, GraphError> {
    shortest_path_cost_with(graph, start, target, Frontier::Heap)
}

/// Same as `shortest_path_cost`, using the O(V^2) linear-scan frontier.
pub fn shortest_path_cost_linear(
    graph: &Graph,
    start: NodeId,
    target: NodeId,
) -> Result<PathCost, GraphError> {
    shortest_path_cost_with(graph, start, target, Frontier::Linear)
}

/// Name-based query: resolves both endpoints first.
///
/// An unknown name yields `GraphError::InvalidNode` carrying that name.
pub fn shortest_path_cost_by_name(
    graph: &Graph,
    start: &str,
    target: &str,
    frontier: Frontier,
) -> Result<PathCost, GraphError> {
    let resolve = |name: &str| {
        graph.resolve(name).ok_or_else(|| GraphError::InvalidNode {
            name: name.to_string(),
        })
    };
    let start_id = resolve(start)?;
    let target_id = resolve(target)?;
    shortest_path_cost_with(graph, start_id, target_id, frontier)
}

/// Shortest-path cost with an explicit frontier strategy.
///
/// Stops as soon as `target` is settled; its cost can no longer change.
pub fn shortest_path_cost_with(
    graph: &Graph,
    start: NodeId,
    target: NodeId,
    frontier: Frontier,
) -> Result<PathCost, GraphError> {
    check_node(graph, start)?;
    check_node(graph, target)?;

    let (table, stats) = run(graph, start, Some(target), frontier);
    let result = PathCost::from_raw(table.raw(target));

    debug!(
        start,
        target,
        ?frontier,
        nodes_settled = stats.nodes_settled,
        edges_relaxed = stats.edges_relaxed,
        improvements = stats.improvements,
        %result,
        "shortest path query finished"
    );

    Ok(result)
}

/// Full single-source run: the final cost from `start` to every node.
pub fn single_source_costs(graph: &Graph, start: NodeId) -> Result<CostTable, GraphError> {
    single_source_costs_with_stats(graph, start, Frontier::Heap).map(|(table, _)| table)
}

/// Full single-source run, also returning the query counters.
pub fn single_source_costs_with_stats(
    graph: &Graph,
    start: NodeId,
    frontier: Frontier,
) -> Result<(CostTable, QueryStats), GraphError> {
    check_node(graph, start)?;
    Ok(run(graph, start, None, frontier))
}

/// Label-setting loop shared by every query.
///
/// Each iteration settles the unvisited node with the smallest finite cost
/// (lowest id on ties) and relaxes its outgoing edges. Nodes still at
/// INFINITY are never settled: relaxing through them is a no-op, so the
/// loop ends once the reachable set is exhausted or `stop` is settled.
fn run(
    graph: &Graph,
    start: NodeId,
    stop: Option<NodeId>,
    frontier: Frontier,
) -> (CostTable, QueryStats) {
    let mut table = CostTable::new(graph.node_count(), start);
    let mut visited = vec![false; graph.node_count()];
    let mut stats = QueryStats::default();

    match frontier {
        Frontier::Heap => {
            let mut heap: BinaryHeap<Reverse<(Cost, NodeId)>> = BinaryHeap::new();
            heap.push(Reverse((0, start)));

            while let Some(Reverse((_, node))) = heap.pop() {
                // Stale entry: the node was already settled at a lower cost.
                if visited[node as usize] {
                    continue;
                }
                visited[node as usize] = true;
                stats.nodes_settled += 1;
                if stop == Some(node) {
                    break;
                }
                relax_from(graph, &mut table, node, &mut stats, |child, cost| {
                    heap.push(Reverse((cost, child)))
                });
            }
        }
        Frontier::Linear => {
            while let Some(node) = closest_unvisited(&table, &visited) {
                visited[node as usize] = true;
                stats.nodes_settled += 1;
                if stop == Some(node) {
                    break;
                }
                relax_from(graph, &mut table, node, &mut stats, |_, _| {});
            }
        }
    }

    (table, stats)
}

/// Unvisited node with the lowest finite cost, lowest id first on ties.
fn closest_unvisited(table: &CostTable, visited: &[bool]) -> Option<NodeId> {
    table
        .costs
        .iter()
        .enumerate()
        .filter(|&(i, &cost)| !visited[i] && cost != INFINITY)
        .min_by_key(|&(i, &cost)| (cost, i))
        .map(|(i, _)| i as NodeId)
}

/// Relax every outgoing edge of `node`, calling `on_improve` for each child
/// whose cost-table entry was lowered.
fn relax_from<F>(
    graph: &Graph,
    table: &mut CostTable,
    node: NodeId,
    stats: &mut QueryStats,
    mut on_improve: F,
) where
    F: FnMut(NodeId, Cost),
{
    let base = table.raw(node);
    if base == INFINITY {
        return;
    }

    for edge in graph.outgoing_edges(node) {
        stats.edges_relaxed += 1;
        let Some(candidate) = base.checked_add(edge.cost) else {
            continue;
        };
        let slot = &mut table.costs[edge.child as usize];
        if candidate < *slot {
            *slot = candidate;
            stats.improvements += 1;
            on_improve(edge.child, candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeRecord, MAX_EDGE_COST, MAX_NODES};
    use rstest::rstest;

    fn graph_of(edges: &[(&str, &str, Cost)]) -> Graph {
        edges
            .iter()
            .map(|&(from, to, cost)| EdgeRecord::new(from, to, cost))
            .collect()
    }

    fn cost(g: &Graph, from: &str, to: &str) -> PathCost {
        shortest_path_cost_by_name(g, from, to, Frontier::Heap).unwrap()
    }

    /// Deterministic LCG for reproducible random graphs.
    struct FastRng(u64);

    impl FastRng {
        fn next(&mut self, max: u64) -> u64 {
            self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
            (self.0 >> 33) % max
        }
    }

    fn random_graph(seed: u64, nodes: u64, edges: u64, max_cost: u64) -> Graph {
        let mut rng = FastRng(seed);
        let mut g = Graph::new();
        for i in 0..nodes {
            g.add_node(&format!("n{}", i));
        }
        for _ in 0..edges {
            let from = rng.next(nodes) as NodeId;
            let to = rng.next(nodes) as NodeId;
            g.add_edge_by_id(from, to, rng.next(max_cost + 1));
        }
        g
    }

    /// Bellman-Ford over the raw edge list, as an independent reference.
    fn reference_costs(g: &Graph, start: NodeId) -> Vec<Cost> {
        let mut dist = vec![INFINITY; g.node_count()];
        dist[start as usize] = 0;
        for _ in 0..g.node_count() {
            for e in g.edges() {
                let base = dist[e.parent as usize];
                if base != INFINITY && base + e.cost < dist[e.child as usize] {
                    dist[e.child as usize] = base + e.cost;
                }
            }
        }
        dist
    }

    // --- Scenarios ---

    #[rstest]
    #[case::via_cheaper_hop(&[("A", "B", 1), ("B", "C", 2), ("A", "C", 5)], "A", "C", PathCost::Reachable(3))]
    #[case::direct_is_cheaper(&[("A", "B", 5), ("B", "C", 5), ("A", "C", 3)], "A", "C", PathCost::Reachable(3))]
    #[case::parallel_edges(&[("A", "B", 4), ("A", "B", 2)], "A", "B", PathCost::Reachable(2))]
    #[case::no_connecting_edge(&[("A", "X", 1), ("B", "Y", 1)], "A", "B", PathCost::Unreachable)]
    #[case::edge_points_the_other_way(&[("B", "A", 1)], "A", "B", PathCost::Unreachable)]
    #[case::zero_weight_edges(&[("A", "B", 0), ("B", "C", 0)], "A", "C", PathCost::Reachable(0))]
    #[case::cycle(&[("A", "B", 1), ("B", "A", 1), ("B", "C", 4)], "A", "C", PathCost::Reachable(5))]
    #[case::home_to_dest(
        &[("HOME", "A", 3), ("HOME", "B", 2), ("A", "B", 1), ("A", "DEST", 7), ("B", "A", 4), ("B", "DEST", 9), ("A", "C", 2), ("C", "DEST", 1)],
        "HOME", "DEST", PathCost::Reachable(6)
    )]
    fn test_scenarios(
        #[case] edges: &[(&str, &str, Cost)],
        #[case] from: &str,
        #[case] to: &str,
        #[case] expected: PathCost,
    ) {
        let g = graph_of(edges);
        assert_eq!(shortest_path_cost_by_name(&g, from, to, Frontier::Heap).unwrap(), expected);
        assert_eq!(shortest_path_cost_by_name(&g, from, to, Frontier::Linear).unwrap(), expected);
    }

    #[test]
    fn test_single_node_to_itself() {
        let mut g = Graph::new();
        let a = g.add_node("A");
        assert_eq!(shortest_path_cost(&g, a, a).unwrap(), PathCost::Reachable(0));
    }

    #[test]
    fn test_start_equals_target_ignores_self_loop() {
        let g = graph_of(&[("A", "A", 9), ("A", "B", 1)]);
        assert_eq!(cost(&g, "A", "A"), PathCost::Reachable(0));
    }

    #[test]
    fn test_unknown_target_name() {
        let g = graph_of(&[("HOME", "A", 1)]);
        let err = shortest_path_cost_by_name(&g, "HOME", "DEST", Frontier::Heap).unwrap_err();
        assert_eq!(err, GraphError::InvalidNode { name: "DEST".to_string() });
    }

    #[test]
    fn test_unknown_start_name() {
        let g = graph_of(&[("A", "DEST", 1)]);
        let err = shortest_path_cost_by_name(&g, "HOME", "DEST", Frontier::Linear).unwrap_err();
        assert_eq!(err, GraphError::InvalidNode { name: "HOME".to_string() });
    }

    #[test]
    fn test_unknown_node_id() {
        let g = graph_of(&[("A", "B", 1)]);
        assert_eq!(
            shortest_path_cost(&g, 0, 5).unwrap_err(),
            GraphError::InvalidNodeId { id: 5, node_count: 2 }
        );
        assert!(single_source_costs(&g, 2).is_err());
    }

    #[test]
    fn test_empty_graph() {
        let g = Graph::new();
        assert!(shortest_path_cost(&g, 0, 0).is_err());
    }

    // --- Overflow guard ---

    #[test]
    fn test_max_weight_chain_stays_reachable() {
        let g = graph_of(&[
            ("A", "B", MAX_EDGE_COST),
            ("B", "C", MAX_EDGE_COST),
            ("C", "D", MAX_EDGE_COST),
        ]);
        assert_eq!(cost(&g, "A", "B"), PathCost::Reachable(MAX_EDGE_COST));
        assert_eq!(cost(&g, "A", "D"), PathCost::Reachable(3 * MAX_EDGE_COST));
        assert_eq!(
            shortest_path_cost_by_name(&g, "A", "D", Frontier::Linear).unwrap(),
            PathCost::Reachable(3 * MAX_EDGE_COST)
        );
    }

    #[test]
    fn test_longest_possible_sum_below_sentinel() {
        // MAX_NODES - 1 edges at MAX_EDGE_COST each.
        let worst = (MAX_NODES as Cost - 1).checked_mul(MAX_EDGE_COST).unwrap();
        assert!(worst < INFINITY);
    }

    #[test]
    fn test_unreachable_nodes_not_relaxed() {
        // X is never reached from A, so its edge into C must not count.
        let g = graph_of(&[("A", "B", 1), ("X", "C", 0), ("B", "C", 10)]);
        assert_eq!(cost(&g, "A", "C"), PathCost::Reachable(11));
    }

    // --- Cost table ---

    #[test]
    fn test_single_source_costs_table() {
        let g = graph_of(&[("A", "B", 1), ("B", "C", 2), ("A", "C", 5), ("D", "A", 1)]);
        let a = g.resolve("A").unwrap();
        let table = single_source_costs(&g, a).unwrap();
        assert_eq!(table.start(), a);
        assert_eq!(table.len(), 4);
        assert_eq!(table.get(a), Some(PathCost::Reachable(0)));
        assert_eq!(table.get(g.resolve("C").unwrap()), Some(PathCost::Reachable(3)));
        assert_eq!(table.get(g.resolve("D").unwrap()), Some(PathCost::Unreachable));
        assert_eq!(table.get(99), None);
        assert_eq!(table.reachable_count(), 3);
    }

    #[test]
    fn test_stats_count_settled_nodes() {
        let g = graph_of(&[("A", "B", 1), ("B", "C", 2), ("A", "C", 5), ("D", "A", 1)]);
        let (_, stats) = single_source_costs_with_stats(&g, 0, Frontier::Heap).unwrap();
        assert_eq!(stats.nodes_settled, 3);
        assert_eq!(stats.edges_relaxed, 3);
        // B (1), C (5), then C again via B (3).
        assert_eq!(stats.improvements, 3);
    }

    #[test]
    fn test_path_cost_display() {
        assert_eq!(PathCost::Reachable(42).to_string(), "42");
        assert_eq!(PathCost::Unreachable.to_string(), "unreachable");
        assert_eq!(PathCost::Reachable(7).cost(), Some(7));
        assert_eq!(PathCost::Unreachable.cost(), None);
        assert!(!PathCost::Unreachable.is_reachable());
    }

    // --- Properties over random graphs ---

    #[test]
    fn test_matches_reference_on_random_graphs() {
        for seed in 0..40 {
            let g = random_graph(seed, 30, 90, 20);
            for start in [0, 7, 29] {
                let expected = reference_costs(&g, start);
                let heap = single_source_costs(&g, start).unwrap();
                let (linear, _) = single_source_costs_with_stats(&g, start, Frontier::Linear).unwrap();
                for (id, c) in heap.iter() {
                    assert_eq!(c, PathCost::from_raw(expected[id as usize]), "seed {} node {}", seed, id);
                }
                assert_eq!(heap, linear, "frontiers disagree for seed {}", seed);
            }
        }
    }

    #[test]
    fn test_early_stop_agrees_with_full_table() {
        let g = random_graph(11, 40, 120, 15);
        let table = single_source_costs(&g, 3).unwrap();
        for (target, expected) in table.iter() {
            assert_eq!(shortest_path_cost(&g, 3, target).unwrap(), expected);
            assert_eq!(shortest_path_cost_linear(&g, 3, target).unwrap(), expected);
        }
    }

    #[test]
    fn test_deterministic_repeat_queries() {
        let g = random_graph(5, 25, 60, 9);
        for target in 0..25 {
            let first = shortest_path_cost(&g, 0, target).unwrap();
            let second = shortest_path_cost(&g, 0, target).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_self_cost_is_zero_everywhere() {
        let g = random_graph(8, 20, 50, 9);
        for id in 0..20 {
            assert_eq!(shortest_path_cost(&g, id, id).unwrap(), PathCost::Reachable(0));
        }
    }

    #[test]
    fn test_triangle_inequality() {
        let g = random_graph(21, 15, 45, 12);
        let tables: Vec<CostTable> = (0..15).map(|s| single_source_costs(&g, s).unwrap()).collect();
        for a in 0..15u32 {
            for b in 0..15u32 {
                for c in 0..15u32 {
                    let ab = tables[a as usize].get(b).and_then(PathCost::cost);
                    let bc = tables[b as usize].get(c).and_then(PathCost::cost);
                    let ac = tables[a as usize].get(c).and_then(PathCost::cost);
                    if let (Some(ab), Some(bc)) = (ab, bc) {
                        let ac = ac.expect("a->b->c exists, so a->c must be reachable");
                        assert!(ac <= ab + bc, "cost({a},{c})={ac} > {ab} + {bc}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_adding_edges_never_increases_costs() {
        let mut rng = FastRng(99);
        let mut g = random_graph(3, 20, 20, 30);
        let mut before = single_source_costs(&g, 0).unwrap();
        for _ in 0..40 {
            let from = rng.next(20) as NodeId;
            let to = rng.next(20) as NodeId;
            g.add_edge_by_id(from, to, rng.next(31));
            let after = single_source_costs(&g, 0).unwrap();
            for ((_, old), (id, new)) in before.iter().zip(after.iter()) {
                match (old, new) {
                    (PathCost::Reachable(o), PathCost::Reachable(n)) => assert!(n <= o, "node {id}"),
                    (PathCost::Reachable(_), PathCost::Unreachable) => {
                        panic!("node {id} became unreachable after adding an edge")
                    }
                    _ => {}
                }
            }
            before = after;
        }
    }

    #[test]
    fn test_graph_shared_across_threads() {
        let g = std::sync::Arc::new(random_graph(17, 30, 80, 10));
        let expected = single_source_costs(&g, 0).unwrap();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let g = std::sync::Arc::clone(&g);
                std::thread::spawn(move || single_source_costs(&g, 0).unwrap())
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    }
}
