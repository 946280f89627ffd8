//! msa2gfa - multiple sequence alignment to variation graph
//!
//! Builds a node/edge/path variation graph from an aligned FASTA file and
//! writes it as GFA 1.0 or vg JSON.
//!
//! # Pipeline
//!
//! - [`columns`]: split every alignment column into single-symbol nodes
//! - [`merge`]: collapse non-branching chains and renumber nodes
//! - [`adjacency`]: derive undirected edges from per-sequence order
//! - [`graph`]: assemble nodes, edges and ranked paths
//!
//! # Example
//!
//! ```
//! use msa2gfa::{build_graph, AlignmentTable};
//!
//! let table = AlignmentTable::from_pairs([("seq1", "ACGT"), ("seq2", "ACGT")]).unwrap();
//! let (graph, next_id) = build_graph(&table, 1).unwrap();
//!
//! assert_eq!(graph.node_count(), 1);
//! assert_eq!(graph.nodes[0].sequence, "ACGT");
//! assert_eq!(next_id, 2);
//!
//! let gfa = msa2gfa::gfa::to_gfa_string(&graph).unwrap();
//! assert!(gfa.starts_with("H\tVN:Z:1.0\n"));
//! ```

pub mod adjacency;
pub mod alignment;
pub mod builder;
pub mod cli;
pub mod columns;
pub mod error;
pub mod gfa;
pub mod graph;
pub mod merge;
pub mod stats;

pub use alignment::AlignmentTable;
pub use builder::{build_batch, build_graph, build_graph_from_file, GraphBuilder};
pub use error::{Msa2GfaError, Result};
pub use graph::{Edge, Graph, GraphNode, GraphPath, Node, NodeId};
pub use stats::GraphStats;
