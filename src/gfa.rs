//! GFA (Graphical Fragment Assembly) writer
//!
//! Renders a [`Graph`] as GFA 1.0 in the layout vg expects: header, then one
//! `P` line per sequence, one `S` line per node and one `L` line per edge.
//! Every segment is traversed forward and links have no overlap.

use crate::error::{Msa2GfaError, Result};
use crate::graph::{Edge, Graph, GraphNode, GraphPath, NodeId};
use std::collections::HashMap;
use std::io::Write;
use tracing::warn;

/// GFA version written in the header
pub const GFA_VERSION: &str = "1.0";

const FORWARD: char = '+';

/// Streams GFA records to an underlying writer
pub struct GfaWriter<W: Write> {
    writer: W,
}

impl<W: Write> GfaWriter<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write a complete graph
    pub fn write_graph(&mut self, graph: &Graph) -> Result<()> {
        let lengths: HashMap<NodeId, usize> = graph
            .nodes
            .iter()
            .map(|n| (n.id, n.sequence.len()))
            .collect();

        self.write_header()?;
        for path in &graph.paths {
            self.write_path(path, &lengths)?;
        }
        for node in &graph.nodes {
            self.write_segment(node)?;
        }
        for edge in &graph.edges {
            self.write_link(edge)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    fn write_header(&mut self) -> Result<()> {
        writeln!(self.writer, "H\tVN:Z:{}", GFA_VERSION)?;
        Ok(())
    }

    fn write_path(&mut self, path: &GraphPath, lengths: &HashMap<NodeId, usize>) -> Result<()> {
        if path.mapping.is_empty() {
            warn!(path = %path.name, "sequence visits no node, writing an empty P line");
        }

        let mut steps = Vec::with_capacity(path.mapping.len());
        let mut overlaps = Vec::with_capacity(path.mapping.len());
        for node_id in path.node_ids() {
            let length = lengths.get(&node_id).ok_or_else(|| {
                Msa2GfaError::InvalidInput(format!(
                    "Path '{}' references undefined node: {}",
                    path.name, node_id
                ))
            })?;
            steps.push(format!("{}{}", node_id, FORWARD));
            overlaps.push(format!("{}M", length));
        }

        writeln!(
            self.writer,
            "P\t{}\t{}\t{}",
            path.name,
            steps.join(","),
            overlaps.join(",")
        )?;
        Ok(())
    }

    fn write_segment(&mut self, node: &GraphNode) -> Result<()> {
        writeln!(self.writer, "S\t{}\t{}", node.id, node.sequence)?;
        Ok(())
    }

    fn write_link(&mut self, edge: &Edge) -> Result<()> {
        writeln!(
            self.writer,
            "L\t{}\t{}\t{}\t{}\t0M",
            edge.from, FORWARD, edge.to, FORWARD
        )?;
        Ok(())
    }
}

/// Write a graph as GFA
pub fn write_gfa<W: Write>(graph: &Graph, writer: W) -> Result<()> {
    GfaWriter::new(writer).write_graph(graph)
}

/// Render a graph as a GFA string
pub fn to_gfa_string(graph: &Graph) -> Result<String> {
    let mut buffer = Vec::new();
    write_gfa(graph, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| Msa2GfaError::Serialization(e.to_string()))
}
