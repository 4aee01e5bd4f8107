//! Transform System
//!
//! Per-frame matrix update for a scene's node array, decoupled from
//! [`Scene`](crate::Scene) so that it only borrows the node slice and the
//! precomputed order.
//!
//! Two stages, strictly in sequence:
//! 1. every node rebuilds its local matrix (`T * R * S`) if its TRS changed;
//! 2. world matrices are composed in root-first order, so a parent's world
//!    matrix is always final before any child reads it.

use crate::NodeIndex;
use crate::node::Node;

/// Rebuilds local matrices. Returns how many nodes actually changed.
pub fn update_local_transforms(nodes: &mut [Node]) -> usize {
    nodes
        .iter_mut()
        .map(|node| node.transform.update_local_matrix())
        .filter(|&changed| changed)
        .count()
}

/// Composes world matrices following `order` (root-first).
///
/// Roots take their local matrix as world matrix; every other node gets
/// `parent.world * local`.
pub fn propagate_world_transforms(nodes: &mut [Node], order: &[NodeIndex]) {
    for &index in order {
        let parent_world = match nodes.get(index) {
            Some(node) => node
                .parent
                .and_then(|parent| nodes.get(parent))
                .map(|parent| parent.transform.world_matrix),
            None => continue,
        };

        let node = &mut nodes[index];
        let local = node.transform.local_matrix;
        let world = match parent_world {
            Some(parent_world) => parent_world * local,
            None => local,
        };
        node.transform.set_world_matrix(world);
    }
}

/// Runs both stages.
pub fn update_transforms(nodes: &mut [Node], order: &[NodeIndex]) {
    let changed = update_local_transforms(nodes);
    log::trace!("transform update: {changed}/{} local matrices rebuilt", nodes.len());
    propagate_world_transforms(nodes, order);
}
