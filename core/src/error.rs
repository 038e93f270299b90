use thiserror::Error;

use crate::graph::NodeId;

/// Errors raised by shortest-path queries.
///
/// An unreachable target is not an error; see `PathCost::Unreachable`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A query endpoint named a node that was never registered.
    #[error("node '{name}' is not in the graph")]
    InvalidNode { name: String },

    /// A query endpoint id was not handed out by this graph.
    #[error("node id {id} is not in the graph ({node_count} nodes)")]
    InvalidNodeId { id: NodeId, node_count: usize },
}
