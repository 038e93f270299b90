use std::collections::HashMap;

/// Arena index of a node. Assigned in registration order, starting at 0.
pub type NodeId = u32;

/// Non-negative edge weight and path cost.
pub type Cost = u64;

/// Maximum number of distinct nodes a graph can hold (NodeId is u32).
pub const MAX_NODES: usize = NodeId::MAX as usize;

/// Largest accepted edge weight.
///
/// A shortest path has fewer than `MAX_NODES` edges, so any path sum stays
/// below `u32::MAX * u32::MAX < u64::MAX` and can never reach the
/// unreachable sentinel (`Cost::MAX`).
pub const MAX_EDGE_COST: Cost = u32::MAX as Cost;

/// A uniquely named vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: String,
}

/// A directed, weighted edge in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub parent: NodeId,
    pub child: NodeId,
    pub cost: Cost,
}

/// One parsed input record: `from -> to` with weight `cost`.
///
/// This is the bulk load unit handed over by the line parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRecord {
    pub from: String,
    pub to: String,
    pub cost: Cost,
}

impl EdgeRecord {
    pub fn new(from: impl Into<String>, to: impl Into<String>, cost: Cost) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            cost,
        }
    }
}

/// In-memory weighted digraph: node arena + name index + edge list.
///
/// Nodes are deduplicated by name on registration and referenced everywhere
/// else by their `NodeId`. Edges are kept in insertion order; `outgoing[n]`
/// holds the indices (into `edges`) of every edge whose parent is `n`.
/// Parallel edges are stored separately and never merged.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<Node>,
    name_index: HashMap<String, NodeId>,
    edges: Vec<Edge>,
    outgoing: Vec<Vec<usize>>,
}

impl Graph {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            name_index: HashMap::new(),
            edges: Vec::new(),
            outgoing: Vec::new(),
        }
    }

    /// Pre-allocate for a known graph size.
    pub fn with_capacity(node_count: usize, edge_count: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(node_count),
            name_index: HashMap::with_capacity(node_count),
            edges: Vec::with_capacity(edge_count),
            outgoing: Vec::with_capacity(node_count),
        }
    }

    /// Register a node by name, returning its id. Idempotent per name.
    ///
    /// Panics if the graph already holds `MAX_NODES` nodes.
    pub fn add_node(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.name_index.get(name) {
            return id;
        }
        if self.nodes.len() >= MAX_NODES {
            panic!(
                "fastroute: node count exceeded maximum of {} (NodeId is u32)",
                MAX_NODES
            );
        }
        let id = self.nodes.len() as NodeId;
        self.nodes.push(Node {
            name: name.to_string(),
        });
        self.outgoing.push(Vec::new());
        self.name_index.insert(name.to_string(), id);
        id
    }

    /// Add a directed edge between two named nodes, registering either
    /// endpoint on first sight.
    pub fn add_edge(&mut self, parent: &str, child: &str, cost: Cost) {
        let from = self.add_node(parent);
        let to = self.add_node(child);
        self.add_edge_by_id(from, to, cost);
    }

    /// Add a directed edge between two already registered nodes.
    ///
    /// Panics if either id was not handed out by this graph, or if `cost`
    /// exceeds `MAX_EDGE_COST`.
    pub fn add_edge_by_id(&mut self, parent: NodeId, child: NodeId, cost: Cost) {
        assert!(
            cost <= MAX_EDGE_COST,
            "fastroute: edge weight {} exceeds maximum of {}",
            cost,
            MAX_EDGE_COST
        );
        assert!(
            (parent as usize) < self.nodes.len() && (child as usize) < self.nodes.len(),
            "fastroute: edge {} -> {} references an unregistered node",
            parent,
            child
        );
        let index = self.edges.len();
        self.edges.push(Edge {
            parent,
            child,
            cost,
        });
        self.outgoing[parent as usize].push(index);
    }

    /// Bulk load from parsed edge records. Primary load path for the CLI.
    pub fn load_edges<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = EdgeRecord>,
    {
        for record in records {
            self.add_edge(&record.from, &record.to, record.cost);
        }
    }

    /// Look up a node id by name.
    pub fn resolve(&self, name: &str) -> Option<NodeId> {
        self.name_index.get(name).copied()
    }

    /// Get node metadata.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id as usize)
    }

    /// Resolve a NodeId back to its name.
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|n| n.name.as_str())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        (id as usize) < self.nodes.len()
    }

    /// All registered nodes with their ids, in registration order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (i as NodeId, n))
    }

    /// Every edge, in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Edges whose parent is `id`, in insertion order. Empty for unknown ids.
    pub fn outgoing_edges(&self, id: NodeId) -> impl Iterator<Item = &Edge> {
        self.outgoing
            .get(id as usize)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |&i| &self.edges[i])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let names: usize = self.nodes.iter().map(|n| n.name.capacity()).sum();
        let nodes_mem = self.nodes.len() * size_of::<Node>() + names;
        // Index stores a second copy of each name plus hash overhead.
        let index_mem = self.name_index.len() * (size_of::<String>() + size_of::<NodeId>() + 16)
            + names;
        let edges_mem = self.edges.len() * size_of::<Edge>();
        let adjacency_mem = self.outgoing.len() * size_of::<Vec<usize>>()
            + self.edges.len() * size_of::<usize>();

        nodes_mem + index_mem + edges_mem + adjacency_mem
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<EdgeRecord> for Graph {
    fn from_iter<I: IntoIterator<Item = EdgeRecord>>(iter: I) -> Self {
        let mut graph = Graph::new();
        graph.load_edges(iter);
        graph
    }
}
