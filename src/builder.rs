//! Alignment to graph pipeline
//!
//! [`build_graph`] runs one alignment through column partitioning, chain
//! compaction, final adjacency and assembly. [`GraphBuilder`] threads the
//! next free node identifier through successive alignments and concatenates
//! their graphs.

use crate::adjacency::build_adjacency;
use crate::alignment::{AlignmentTable, ListedPath};
use crate::columns::build_column_nodes;
use crate::error::{Msa2GfaError, Result};
use crate::graph::{assemble_graph, edges_from_adjacency, Graph, NodeId};
use crate::merge::merge_chains;
use std::path::Path;
use tracing::{debug, info};

/// Build the graph for one alignment, numbering nodes from `first_id`
///
/// Returns the graph and the next free identifier.
pub fn build_graph(table: &AlignmentTable, first_id: NodeId) -> Result<(Graph, NodeId)> {
    if first_id == 0 {
        return Err(Msa2GfaError::InvalidInput(
            "node identifiers start at 1".to_string(),
        ));
    }
    table.validate()?;

    let raw = build_column_nodes(table);
    if first_id.checked_add(raw.len() as u64).is_none() {
        return Err(Msa2GfaError::InvalidInput(format!(
            "{} nodes starting at {} overflow the node identifier range",
            raw.len(),
            first_id
        )));
    }
    debug!(
        columns = table.width(),
        sequences = table.len(),
        nodes = raw.len(),
        "partitioned columns"
    );

    let (nodes, next_id) = merge_chains(raw, table.len(), first_id);
    let edges = edges_from_adjacency(&build_adjacency(&nodes, table.len()));
    let names: Vec<&str> = table.names().collect();
    let graph = assemble_graph(&nodes, edges, &names);

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        next_id,
        "assembled graph"
    );

    Ok((graph, next_id))
}

/// Build the graph for one aligned FASTA file
pub fn build_graph_from_file<P: AsRef<Path>>(path: P, first_id: NodeId) -> Result<(Graph, NodeId)> {
    let path = path.as_ref();
    let table = AlignmentTable::from_file(path)?;
    let built = build_graph(&table, first_id)?;
    info!(
        file = %path.display(),
        sequences = table.len(),
        columns = table.width(),
        nodes = built.0.node_count(),
        "built graph"
    );
    Ok(built)
}

/// Accumulates graphs from successive alignments with unique node ids
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    graph: Graph,
    next_id: NodeId,
    alignments: usize,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new(1)
    }
}

impl GraphBuilder {
    /// Start numbering nodes at `first_id`
    pub fn new(first_id: NodeId) -> Self {
        Self {
            graph: Graph::new(),
            next_id: first_id,
            alignments: 0,
        }
    }

    /// Next identifier to be assigned
    pub fn next_id(&self) -> NodeId {
        self.next_id
    }

    /// Number of alignments added so far
    pub fn alignment_count(&self) -> usize {
        self.alignments
    }

    /// Add an in-memory alignment
    pub fn add_alignment(&mut self, table: &AlignmentTable) -> Result<()> {
        let (graph, next_id) = build_graph(table, self.next_id)?;
        self.push(graph, next_id);
        Ok(())
    }

    /// Add an aligned FASTA file
    pub fn add_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let (graph, next_id) = build_graph_from_file(path, self.next_id)?;
        self.push(graph, next_id);
        Ok(())
    }

    /// Add a file named by a batch list
    ///
    /// Files that cannot be opened are reported as list entry errors.
    pub fn add_listed(&mut self, entry: &ListedPath) -> Result<()> {
        self.add_file(&entry.path).map_err(|err| match err {
            err @ (Msa2GfaError::Io(_) | Msa2GfaError::FileNotFound(_)) => Msa2GfaError::ListEntry {
                line: entry.line,
                path: entry.path.display().to_string(),
                message: err.to_string(),
            },
            other => other,
        })
    }

    fn push(&mut self, graph: Graph, next_id: NodeId) {
        self.graph.append(graph);
        self.next_id = next_id;
        self.alignments += 1;
    }

    /// Finish and return the concatenated graph
    pub fn finish(self) -> Graph {
        self.graph
    }
}

/// Build one graph from every file in a batch list, in listed order
pub fn build_batch(entries: &[ListedPath], first_id: NodeId) -> Result<Graph> {
    let mut builder = GraphBuilder::new(first_id);
    for entry in entries {
        builder.add_listed(entry)?;
    }
    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;
    use std::collections::BTreeSet;
    use std::path::PathBuf;

    fn table(pairs: &[(&str, &str)]) -> AlignmentTable {
        AlignmentTable::from_pairs(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn test_identical_sequences_graph() {
        let (graph, next_id) = build_graph(&table(&[("seq1", "ACGT"), ("seq2", "ACGT")]), 1).unwrap();

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.nodes[0].sequence, "ACGT");
        assert!(graph.edges.is_empty());
        for path in &graph.paths {
            assert_eq!(path.node_ids().collect::<Vec<_>>(), vec![1]);
            assert_eq!(path.mapping[0].rank, 1);
        }
        assert_eq!(next_id, 2);
    }

    #[test]
    fn test_bubble_graph() {
        let (graph, _) = build_graph(&table(&[("s1", "AATC"), ("s2", "AAGC")]), 1).unwrap();

        let sequences: Vec<_> = graph.nodes.iter().map(|n| n.sequence.as_str()).collect();
        assert_eq!(sequences, vec!["AA", "G", "T", "C"]);
        assert_eq!(
            graph.edges,
            vec![
                Edge { from: 1, to: 2 },
                Edge { from: 1, to: 3 },
                Edge { from: 2, to: 4 },
                Edge { from: 3, to: 4 },
            ]
        );
        assert_eq!(graph.paths[0].node_ids().collect::<Vec<_>>(), vec![1, 3, 4]);
        assert_eq!(graph.paths[1].node_ids().collect::<Vec<_>>(), vec![1, 2, 4]);
    }

    #[test]
    fn test_trailing_gap_merges_into_shared_node() {
        let (graph, _) = build_graph(&table(&[("seq1", "A-"), ("seq2", "AC")]), 1).unwrap();

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.nodes[0].sequence, "AC");
        assert_eq!(graph.paths[0].node_ids().collect::<Vec<_>>(), vec![1]);
        assert_eq!(graph.paths[1].node_ids().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_gap_column_before_compaction() {
        let table = table(&[("seq1", "A-"), ("seq2", "AC")]);
        let raw = build_column_nodes(&table);
        let edges = edges_from_adjacency(&build_adjacency(&raw, table.len()));
        let names: Vec<&str> = table.names().collect();
        let graph = assemble_graph(&raw, edges, &names);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edges, vec![Edge { from: 1, to: 2 }]);
        assert_eq!(graph.paths[0].node_ids().collect::<Vec<_>>(), vec![1]);
        assert_eq!(graph.paths[1].node_ids().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(graph.paths[1].mapping[1].rank, 2);
    }

    #[test]
    fn test_rejects_unequal_lengths() {
        let err = build_graph(&table(&[("a", "ACGT"), ("b", "ACG")]), 1).unwrap_err();
        assert!(matches!(err, Msa2GfaError::UnequalLengths { .. }));
    }

    #[test]
    fn test_rejects_zero_first_id() {
        let err = build_graph(&table(&[("a", "A")]), 0).unwrap_err();
        assert!(matches!(err, Msa2GfaError::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_non_ascii_pairs() {
        let err = build_graph(&table(&[("a", "é"), ("b", "é")]), 1).unwrap_err();
        assert!(matches!(err, Msa2GfaError::MalformedSequence { .. }));
    }

    #[test]
    fn test_rejects_id_overflow() {
        let err = build_graph(&table(&[("a", "AC"), ("b", "AG")]), u64::MAX).unwrap_err();
        assert!(matches!(err, Msa2GfaError::InvalidInput(_)));

        let (_, next_id) = build_graph(&table(&[("a", "A")]), u64::MAX - 1).unwrap();
        assert_eq!(next_id, u64::MAX);
    }

    #[test]
    fn test_builder_threads_ids() {
        let mut builder = GraphBuilder::new(1);
        builder.add_alignment(&table(&[("s1", "AATC"), ("s2", "AAGC")])).unwrap();
        assert_eq!(builder.next_id(), 5);
        builder.add_alignment(&table(&[("t1", "GG"), ("t2", "GG")])).unwrap();
        assert_eq!(builder.next_id(), 6);
        assert_eq!(builder.alignment_count(), 2);

        let graph = builder.finish();
        let ids: Vec<_> = graph.nodes.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(graph.path_count(), 4);
        assert_eq!(graph.paths[2].node_ids().collect::<Vec<_>>(), vec![5]);
        let unique: BTreeSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_batch_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a.fa");
        let second = dir.path().join("b.fa");
        std::fs::write(&first, ">x\nACGT\n>y\nACGA\n").unwrap();
        std::fs::write(&second, ">z\nTT\n").unwrap();

        let entries = vec![
            ListedPath { line: 1, path: first },
            ListedPath { line: 2, path: second },
        ];
        let graph = build_batch(&entries, 1).unwrap();

        // a.fa: ACG, A, T -> ids 1..=3; b.fa: TT -> id 4
        let ids: Vec<_> = graph.nodes.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(graph.nodes[3].sequence, "TT");
        assert_eq!(graph.edges.len(), 2);
    }

    #[test]
    fn test_batch_missing_entry() {
        let entries = vec![ListedPath {
            line: 3,
            path: PathBuf::from("/nonexistent/missing.fa"),
        }];
        match build_batch(&entries, 1).unwrap_err() {
            Msa2GfaError::ListEntry { line, path, .. } => {
                assert_eq!(line, 3);
                assert_eq!(path, "/nonexistent/missing.fa");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
