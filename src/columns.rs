//! Column partitioning
//!
//! Turns every alignment column into one or more raw single-symbol nodes,
//! numbered from 1 in column order.

use crate::alignment::{AlignmentTable, GAP};
use crate::graph::{Node, NodeId};
use std::collections::BTreeMap;

/// Build raw nodes, one or more per alignment column
///
/// A column where every sequence holds the same symbol yields one node shared
/// by all sequences, even when that symbol is a gap. A polymorphic column
/// yields one node per distinct non-gap symbol, in ascending symbol order;
/// sequences holding a gap there get no node for that column.
///
/// Identifiers start at 1 and follow column order, which
/// [`crate::adjacency::build_adjacency`] relies on.
pub fn build_column_nodes(table: &AlignmentTable) -> Vec<Node> {
    let rows = table.rows();
    let mut nodes = Vec::new();
    let mut next_id: NodeId = 1;
    let mut symbols: BTreeMap<u8, Vec<usize>> = BTreeMap::new();

    for column in 0..table.width() {
        symbols.clear();
        for (index, row) in rows.iter().enumerate() {
            if let Some(&symbol) = row.sequence.get(column) {
                symbols.entry(symbol).or_default().push(index);
            }
        }

        let monomorphic = symbols.len() == 1;
        for (&symbol, members) in &symbols {
            if !monomorphic && symbol == GAP {
                continue;
            }
            nodes.push(Node::new(
                next_id,
                char::from(symbol).to_string(),
                members.clone(),
            ));
            next_id += 1;
        }
    }

    nodes
}
