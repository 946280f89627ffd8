//! Variation graph records
//!
//! [`Node`] is the working node used while building a graph from an
//! alignment. [`Graph`] is the finished output: segment-like nodes, canonical
//! undirected edges and one ranked path per sequence. Its serde layout is the
//! vg JSON graph layout (`node`, `edge`, `path`).

use crate::adjacency::Adjacency;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Node identifier, positive and dense within a graph
pub type NodeId = u64;

/// A node under construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Identifier, assigned in alignment column order
    pub id: NodeId,
    /// Concatenated alignment symbols (may include gaps)
    pub base: String,
    /// Indices of the sequences passing through this node, ascending
    pub members: Vec<usize>,
}

impl Node {
    /// Create a node
    pub fn new(id: NodeId, base: impl Into<String>, members: Vec<usize>) -> Self {
        Self {
            id,
            base: base.into(),
            members,
        }
    }

    /// Whether the sequence at `index` passes through this node
    pub fn contains(&self, index: usize) -> bool {
        self.members.binary_search(&index).is_ok()
    }
}

/// Output node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Node identifier
    pub id: NodeId,
    /// Display name (the identifier as text)
    pub name: String,
    /// Node sequence
    pub sequence: String,
}

/// Undirected edge stored with `from < to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
}

/// Node referenced by a path mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub node_id: NodeId,
}

/// One ranked step of a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    pub position: Position,
    /// 1-based position within the path
    pub rank: u64,
}

/// A sequence's route through the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphPath {
    /// Sequence name
    pub name: String,
    /// Steps in rank order
    pub mapping: Vec<Mapping>,
}

impl GraphPath {
    /// Node identifiers in rank order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.mapping.iter().map(|m| m.position.node_id)
    }
}

/// Complete variation graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(rename = "node")]
    pub nodes: Vec<GraphNode>,
    #[serde(rename = "edge")]
    pub edges: Vec<Edge>,
    #[serde(rename = "path")]
    pub paths: Vec<GraphPath>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Append another graph's nodes, edges and paths (no deduplication)
    pub fn append(&mut self, other: Graph) {
        self.nodes.extend(other.nodes);
        self.edges.extend(other.edges);
        self.paths.extend(other.paths);
    }

    /// Get number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Get number of paths
    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// Get total sequence length over all nodes
    pub fn total_sequence_length(&self) -> u64 {
        self.nodes.iter().map(|n| n.sequence.len() as u64).sum()
    }

    /// Serialize as single-line JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Write single-line JSON followed by a newline
    pub fn write_json<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer(&mut writer, self)?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Canonical `from < to` edges from a symmetric adjacency, sorted
pub fn edges_from_adjacency(adjacency: &Adjacency) -> Vec<Edge> {
    adjacency
        .iter()
        .flat_map(|(&from, neighbors)| {
            neighbors
                .range(from + 1..)
                .map(move |&to| Edge { from, to })
        })
        .collect()
}

/// Assemble the output graph from final nodes and edges
///
/// `nodes` must be sorted by identifier; `names` are the sequence names in
/// alignment order, indexed the same way as [`Node::members`].
pub fn assemble_graph<S: AsRef<str>>(nodes: &[Node], mut edges: Vec<Edge>, names: &[S]) -> Graph {
    let graph_nodes = nodes
        .iter()
        .map(|node| GraphNode {
            id: node.id,
            name: node.id.to_string(),
            sequence: node.base.clone(),
        })
        .collect();

    edges.retain(|edge| edge.to > edge.from);
    edges.sort_unstable();
    edges.dedup();

    let mut mappings: Vec<Vec<Mapping>> = vec![Vec::new(); names.len()];
    for node in nodes {
        for &member in &node.members {
            if let Some(steps) = mappings.get_mut(member) {
                steps.push(Mapping {
                    position: Position { node_id: node.id },
                    rank: steps.len() as u64 + 1,
                });
            }
        }
    }

    let paths = names
        .iter()
        .zip(mappings)
        .map(|(name, mapping)| GraphPath {
            name: name.as_ref().to_string(),
            mapping,
        })
        .collect();

    Graph {
        nodes: graph_nodes,
        edges,
        paths,
    }
}
