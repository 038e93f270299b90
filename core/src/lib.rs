//! fastroute-core: In-memory weighted graph and shortest-path engine.
//!
//! A pure Rust library that stores a directed graph with non-negative
//! integer edge weights and answers single-source shortest-path cost
//! queries (Dijkstra). Nodes are interned by name into an arena and
//! referenced by a compact `NodeId` everywhere else.
//!
//! The graph is immutable during queries; each query allocates its own
//! cost table, so a built graph can be shared across threads.

mod error;
mod graph;
mod traversal;

pub use error::GraphError;
pub use graph::{Cost, Edge, EdgeRecord, Graph, Node, NodeId, MAX_EDGE_COST, MAX_NODES};
pub use traversal::{
    shortest_path_cost, shortest_path_cost_by_name, shortest_path_cost_linear,
    shortest_path_cost_with, single_source_costs, single_source_costs_with_stats, CostTable,
    Frontier, PathCost, QueryStats, INFINITY,
};
