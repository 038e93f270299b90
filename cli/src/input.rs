use std::io::BufRead;

use anyhow::{Context, Result};

/// Read every line from `reader` until end of stream.
///
/// Line terminators are stripped. Any read error aborts the whole run.
pub fn read_lines<R: BufRead>(reader: R) -> Result<Vec<String>> {
    reader
        .lines()
        .enumerate()
        .map(|(i, line)| line.with_context(|| format!("failed to read input line {}", i + 1)))
        .collect()
}
