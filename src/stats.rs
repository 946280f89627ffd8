//! Summary statistics for built graphs

use crate::error::Result;
use crate::graph::{Graph, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt::Write;

/// Statistics about a built graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphStats {
    /// Total number of nodes
    pub node_count: usize,
    /// Total number of edges
    pub edge_count: usize,
    /// Total number of paths
    pub path_count: usize,
    /// Total sequence length across all nodes
    pub total_sequence_length: u64,
    /// Average node length
    pub average_node_length: f64,
    /// Minimum node length
    pub min_node_length: usize,
    /// Maximum node length
    pub max_node_length: usize,
    /// N50 of node lengths
    pub n50: usize,
    /// GC content percentage
    pub gc_content: f64,
    /// Number of connected components
    pub connected_components: usize,
    /// Average path length (in nodes)
    pub average_path_length: f64,
}

impl GraphStats {
    /// Compute statistics from a graph
    pub fn from_graph(graph: &Graph) -> Self {
        let node_lengths: Vec<usize> = graph.nodes.iter().map(|n| n.sequence.len()).collect();

        let (min_node_length, max_node_length, average_node_length) =
            match (node_lengths.iter().min(), node_lengths.iter().max()) {
                (Some(&min), Some(&max)) => {
                    let avg =
                        node_lengths.iter().sum::<usize>() as f64 / node_lengths.len() as f64;
                    (min, max, avg)
                }
                _ => (0, 0, 0.0),
            };

        let average_path_length = if graph.paths.is_empty() {
            0.0
        } else {
            graph.paths.iter().map(|p| p.mapping.len()).sum::<usize>() as f64
                / graph.paths.len() as f64
        };

        GraphStats {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            path_count: graph.path_count(),
            total_sequence_length: graph.total_sequence_length(),
            average_node_length,
            min_node_length,
            max_node_length,
            n50: compute_n50(&node_lengths),
            gc_content: compute_gc_content(graph),
            connected_components: compute_connected_components(graph),
            average_path_length,
        }
    }

    /// Human-readable summary, one `label: value` row per field
    pub fn format_summary(&self) -> String {
        let rows: [(&str, String); 9] = [
            ("Nodes", self.node_count.to_string()),
            ("Edges", self.edge_count.to_string()),
            ("Paths", self.path_count.to_string()),
            ("Components", self.connected_components.to_string()),
            ("Graph length (bp)", self.total_sequence_length.to_string()),
            (
                "Node length (bp)",
                format!(
                    "{}..{} (mean {:.2})",
                    self.min_node_length, self.max_node_length, self.average_node_length
                ),
            ),
            ("Node N50 (bp)", self.n50.to_string()),
            ("GC (%)", format!("{:.2}", self.gc_content)),
            ("Mean path steps", format!("{:.2}", self.average_path_length)),
        ];

        let mut summary = String::from("=== Graph Statistics ===\n");
        let shown = if self.path_count > 0 { rows.len() } else { rows.len() - 1 };
        for (label, value) in &rows[..shown] {
            // Writing into a String cannot fail
            let _ = writeln!(summary, "{:<18} {}", format!("{}:", label), value);
        }
        summary
    }

    /// Statistics as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Smallest length among the longest nodes that together cover half the total
fn compute_n50(lengths: &[usize]) -> usize {
    let mut sorted = lengths.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    let half = sorted.iter().sum::<usize>() / 2;

    sorted
        .iter()
        .scan(0usize, |covered, &len| {
            *covered += len;
            Some((*covered, len))
        })
        .find(|&(covered, _)| covered >= half)
        .map_or(0, |(_, len)| len)
}

/// Percentage of G/C among unambiguous A/C/G/T symbols; gaps and N are skipped
fn compute_gc_content(graph: &Graph) -> f64 {
    let (gc, acgt) = graph
        .nodes
        .iter()
        .flat_map(|node| node.sequence.bytes())
        .map(|symbol| symbol.to_ascii_uppercase())
        .filter(|symbol| matches!(symbol, b'A' | b'C' | b'G' | b'T'))
        .fold((0u64, 0u64), |(gc, acgt), symbol| {
            (gc + u64::from(matches!(symbol, b'G' | b'C')), acgt + 1)
        });

    if acgt == 0 {
        0.0
    } else {
        gc as f64 * 100.0 / acgt as f64
    }
}

fn compute_connected_components(graph: &Graph) -> usize {
    let mut adjacency: HashMap<NodeId, Vec<NodeId>> =
        graph.nodes.iter().map(|n| (n.id, Vec::new())).collect();

    for edge in &graph.edges {
        adjacency.entry(edge.from).or_default().push(edge.to);
        adjacency.entry(edge.to).or_default().push(edge.from);
    }

    // Iterative DFS; batch graphs can hold long chains
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut components = 0;
    let mut stack = Vec::new();

    for node in &graph.nodes {
        if !visited.insert(node.id) {
            continue;
        }
        components += 1;
        stack.push(node.id);
        while let Some(current) = stack.pop() {
            for &neighbor in adjacency.get(&current).into_iter().flatten() {
                if visited.insert(neighbor) {
                    stack.push(neighbor);
                }
            }
        }
    }

    components
}
