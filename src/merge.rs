//! Linear chain compaction
//!
//! Collapses runs of nodes joined by strict one-to-one links into single
//! nodes, then renumbers the survivors densely from a caller supplied first
//! identifier.

use crate::adjacency::{backward_neighbors, build_adjacency, forward_neighbors, Adjacency};
use crate::graph::{Node, NodeId};
use std::collections::BTreeMap;
use tracing::debug;

/// Find one-to-one links, keyed by the later node (`end -> start`)
///
/// A link `start -> end` exists when `end` is the only forward neighbour of
/// `start` and `start` is the only backward neighbour of `end`.
pub fn find_linear_links(adjacency: &Adjacency) -> BTreeMap<NodeId, NodeId> {
    let mut links = BTreeMap::new();

    for &start in adjacency.keys() {
        let Some(end) = sole(forward_neighbors(adjacency, start)) else {
            continue;
        };
        if sole(backward_neighbors(adjacency, end)) == Some(start) {
            links.insert(end, start);
        }
    }

    links
}

fn sole(mut iter: impl Iterator<Item = NodeId>) -> Option<NodeId> {
    let first = iter.next()?;
    iter.next().is_none().then_some(first)
}

/// Collapse linear chains and renumber from `first_id`
///
/// `nodes` must be sorted by identifier in alignment order. Returns the
/// compacted nodes and the next free identifier. Merged nodes keep the
/// members of the chain's first node. `first_id + nodes.len()` must fit in a
/// [`NodeId`]; [`crate::builder::build_graph`] checks this.
pub fn merge_chains(
    nodes: Vec<Node>,
    sequence_count: usize,
    first_id: NodeId,
) -> (Vec<Node>, NodeId) {
    let adjacency = build_adjacency(&nodes, sequence_count);
    let links = find_linear_links(&adjacency);
    let node_count = nodes.len();

    let slot_of = |id: NodeId| nodes.binary_search_by_key(&id, |n| n.id).ok();
    let link_slots: Vec<(usize, usize)> = links
        .iter()
        .rev()
        .filter_map(|(&end, &start)| Some((slot_of(end)?, slot_of(start)?)))
        .collect();

    // Highest end first, so a chain folds right to left into its first node.
    let mut slots: Vec<Option<Node>> = nodes.into_iter().map(Some).collect();
    for (end_slot, start_slot) in link_slots {
        let Some(end) = slots[end_slot].take() else {
            continue;
        };
        if let Some(start) = slots[start_slot].as_mut() {
            start.base.push_str(&end.base);
        }
    }

    let mut next_id = first_id;
    let merged: Vec<Node> = slots
        .into_iter()
        .flatten()
        .map(|mut node| {
            node.id = next_id;
            next_id += 1;
            node
        })
        .collect();

    debug!(
        before = node_count,
        after = merged.len(),
        links = links.len(),
        first_id,
        "collapsed linear chains"
    );

    (merged, next_id)
}
