//! Node adjacency from sequence traversal order

use crate::graph::{Node, NodeId};
use std::collections::{BTreeMap, BTreeSet};

/// Symmetric adjacency: every node id maps to its neighbours
pub type Adjacency = BTreeMap<NodeId, BTreeSet<NodeId>>;

/// Derive undirected adjacency by tracing each sequence through `nodes`
///
/// `nodes` must be sorted by identifier, and identifier order must match
/// alignment order. Each sequence links every node it visits to the next
/// node it visits. Nodes no sequence connects still get an (empty) entry.
pub fn build_adjacency(nodes: &[Node], sequence_count: usize) -> Adjacency {
    debug_assert!(nodes.windows(2).all(|w| w[0].id < w[1].id));

    let mut adjacency: Adjacency = nodes.iter().map(|n| (n.id, BTreeSet::new())).collect();
    let mut previous: Vec<Option<NodeId>> = vec![None; sequence_count];

    for node in nodes {
        for &member in &node.members {
            let Some(last) = previous.get_mut(member) else {
                continue;
            };
            if let Some(prev_id) = last.replace(node.id) {
                add_edge(&mut adjacency, prev_id, node.id);
            }
        }
    }

    adjacency
}

fn add_edge(adjacency: &mut Adjacency, a: NodeId, b: NodeId) {
    adjacency.entry(a).or_default().insert(b);
    adjacency.entry(b).or_default().insert(a);
}

/// Neighbours with a larger identifier
pub fn forward_neighbors(adjacency: &Adjacency, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    adjacency
        .get(&id)
        .into_iter()
        .flat_map(move |set| set.range(id + 1..).copied())
}

/// Neighbours with a smaller identifier
pub fn backward_neighbors(adjacency: &Adjacency, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    adjacency
        .get(&id)
        .into_iter()
        .flat_map(move |set| set.range(..id).copied())
}
