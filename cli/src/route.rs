use anyhow::{Context, Result};
use fastroute_core::{Cost, Frontier, PathCost};
use serde::Serialize;

use crate::config::OutputFormat;
use crate::load;

/// Result of one route query, as printed by `fastroute route`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteReport {
    pub start: String,
    pub target: String,
    /// Total weight of the cheapest route; `null` when unreachable.
    pub cost: Option<Cost>,
    pub reachable: bool,
    pub nodes: usize,
    pub edges: usize,
}

impl RouteReport {
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(match self.cost {
                Some(c) => PathCost::Reachable(c).to_string(),
                None => PathCost::Unreachable.to_string(),
            }),
            OutputFormat::Json => {
                serde_json::to_string(self).context("failed to serialize route report")
            }
        }
    }
}

/// Build the graph from `lines` and run a single start → target query.
pub fn find_route<S: AsRef<str>>(
    lines: &[S],
    start: &str,
    target: &str,
    frontier: Frontier,
) -> Result<RouteReport> {
    let graph = load::load_graph(lines).context("failed to parse route input")?;

    let result = fastroute_core::shortest_path_cost_by_name(&graph, start, target, frontier)
        .with_context(|| format!("cannot route from '{}' to '{}'", start, target))?;

    Ok(RouteReport {
        start: start.to_string(),
        target: target.to_string(),
        cost: result.cost(),
        reachable: result.is_reachable(),
        nodes: graph.node_count(),
        edges: graph.edge_count(),
    })
}
