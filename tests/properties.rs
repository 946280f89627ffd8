//! Property tests over random small alignments

use msa2gfa::adjacency::build_adjacency;
use msa2gfa::columns::build_column_nodes;
use msa2gfa::graph::{assemble_graph, edges_from_adjacency};
use msa2gfa::merge::merge_chains;
use msa2gfa::{build_graph, AlignmentTable, GraphBuilder, NodeId};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn alignment() -> impl Strategy<Value = Vec<Vec<u8>>> {
    (1usize..6, 1usize..16).prop_flat_map(|(rows, width)| {
        prop::collection::vec(
            prop::collection::vec(prop::sample::select(b"ACGT-".to_vec()), width),
            rows,
        )
    })
}

fn table_from(rows: &[Vec<u8>], prefix: &str) -> AlignmentTable {
    AlignmentTable::from_pairs(
        rows.iter()
            .enumerate()
            .map(|(i, seq)| (format!("{}{}", prefix, i), seq.clone())),
    )
    .unwrap()
}

proptest! {
    #[test]
    fn ids_are_dense_from_first_id(rows in alignment(), first_id in 1u64..1000) {
        let table = table_from(&rows, "s");
        let (graph, next_id) = build_graph(&table, first_id).unwrap();

        let ids: Vec<NodeId> = graph.nodes.iter().map(|n| n.id).collect();
        let expected: Vec<NodeId> = (first_id..first_id + ids.len() as u64).collect();
        prop_assert_eq!(ids, expected);
        prop_assert_eq!(next_id, first_id + graph.node_count() as u64);
        prop_assert!(graph.node_count() >= 1);
    }

    #[test]
    fn edges_are_canonical_and_sorted(rows in alignment()) {
        let table = table_from(&rows, "s");
        let (graph, _) = build_graph(&table, 1).unwrap();
        let ids: BTreeSet<NodeId> = graph.nodes.iter().map(|n| n.id).collect();

        for edge in &graph.edges {
            prop_assert!(edge.from < edge.to);
            prop_assert!(ids.contains(&edge.from) && ids.contains(&edge.to));
        }
        for pair in graph.edges.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn paths_are_ranked_in_id_order(rows in alignment()) {
        let table = table_from(&rows, "s");
        let (graph, _) = build_graph(&table, 1).unwrap();

        let names: Vec<&str> = graph.paths.iter().map(|p| p.name.as_str()).collect();
        let expected: Vec<&str> = table.names().collect();
        prop_assert_eq!(names, expected);

        for path in &graph.paths {
            for (i, step) in path.mapping.iter().enumerate() {
                prop_assert_eq!(step.rank, i as u64 + 1);
            }
            let ids: Vec<NodeId> = path.node_ids().collect();
            prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn path_membership_round_trips(rows in alignment()) {
        let table = table_from(&rows, "s");
        let raw = build_column_nodes(&table);
        let (nodes, _) = merge_chains(raw, table.len(), 1);
        let edges = edges_from_adjacency(&build_adjacency(&nodes, table.len()));
        let names: Vec<&str> = table.names().collect();
        let graph = assemble_graph(&nodes, edges, &names);

        for (index, path) in graph.paths.iter().enumerate() {
            let visited: BTreeSet<NodeId> = path.node_ids().collect();
            for node in &nodes {
                prop_assert_eq!(node.contains(index), visited.contains(&node.id));
            }
        }
    }

    #[test]
    fn merging_preserves_symbols(rows in alignment()) {
        let table = table_from(&rows, "s");
        let raw = build_column_nodes(&table);
        let mut raw_bases: Vec<u8> = raw.iter().flat_map(|n| n.base.bytes()).collect();
        let (merged, _) = merge_chains(raw, table.len(), 1);
        let mut merged_bases: Vec<u8> = merged.iter().flat_map(|n| n.base.bytes()).collect();

        raw_bases.sort_unstable();
        merged_bases.sort_unstable();
        prop_assert_eq!(raw_bases, merged_bases);
    }

    #[test]
    fn merge_fixpoint_is_stable(rows in alignment()) {
        let table = table_from(&rows, "s");
        let (mut nodes, _) = merge_chains(build_column_nodes(&table), table.len(), 1);
        loop {
            let before = nodes.len();
            let (next, _) = merge_chains(nodes, table.len(), 1);
            nodes = next;
            if nodes.len() == before {
                break;
            }
        }

        let (again, _) = merge_chains(nodes.clone(), table.len(), 1);
        prop_assert_eq!(again, nodes);
    }

    #[test]
    fn batch_ids_never_collide(first in alignment(), second in alignment()) {
        let mut builder = GraphBuilder::new(1);
        builder.add_alignment(&table_from(&first, "a")).unwrap();
        let boundary = builder.next_id();
        builder.add_alignment(&table_from(&second, "b")).unwrap();
        let graph = builder.finish();

        let (head, tail): (Vec<NodeId>, Vec<NodeId>) = graph
            .nodes
            .iter()
            .map(|n| n.id)
            .partition(|&id| id < boundary);
        prop_assert_eq!(head.iter().max().copied(), Some(boundary - 1));
        prop_assert_eq!(tail.iter().min().copied(), Some(boundary));

        let unique: BTreeSet<NodeId> = graph.nodes.iter().map(|n| n.id).collect();
        prop_assert_eq!(unique.len(), graph.node_count());
    }
}
