use std::time::Instant;

use fastroute_core::{Cost, EdgeRecord, Graph, MAX_EDGE_COST};
use thiserror::Error;
use tracing::debug;

/// A malformed route line. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("line {line}: missing {field}")]
    MissingField { line: usize, field: &'static str },

    #[error("line {line}: weight '{value}' is not an integer in 0..={max}", max = MAX_EDGE_COST)]
    InvalidWeight { line: usize, value: String },

    #[error("line {line}: expected 3 fields, found {count}")]
    ExtraFields { line: usize, count: usize },
}

/// Parse one `<source> <destination> <weight>` line.
///
/// Returns `Ok(None)` for blank lines.
pub fn parse_edge_line(line_no: usize, line: &str) -> Result<Option<EdgeRecord>, LoadError> {
    let mut fields = line.split_whitespace();

    let Some(from) = fields.next() else {
        return Ok(None);
    };
    let to = fields.next().ok_or(LoadError::MissingField {
        line: line_no,
        field: "destination",
    })?;
    let weight = fields.next().ok_or(LoadError::MissingField {
        line: line_no,
        field: "weight",
    })?;

    let extra = fields.count();
    if extra > 0 {
        return Err(LoadError::ExtraFields {
            line: line_no,
            count: 3 + extra,
        });
    }

    let cost = weight
        .parse::<Cost>()
        .ok()
        .filter(|&c| c <= MAX_EDGE_COST)
        .ok_or_else(|| LoadError::InvalidWeight {
            line: line_no,
            value: weight.to_string(),
        })?;

    Ok(Some(EdgeRecord::new(from, to, cost)))
}

/// Parse every line and build the graph. Stops at the first malformed line.
pub fn load_graph<S: AsRef<str>>(lines: &[S]) -> Result<Graph, LoadError> {
    let start = Instant::now();

    let mut records = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        if let Some(record) = parse_edge_line(i + 1, line.as_ref())? {
            records.push(record);
        }
    }

    let mut graph = Graph::with_capacity(records.len() + 1, records.len());
    graph.load_edges(records);

    debug!(
        lines = lines.len(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        memory_bytes = graph.memory_usage(),
        load_time_ms = start.elapsed().as_secs_f64() * 1000.0,
        "route graph loaded"
    );

    Ok(graph)
}
