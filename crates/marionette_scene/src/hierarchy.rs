//! Hierarchy ordering.
//!
//! Derives parent links from children lists and produces a root-first
//! evaluation order: every node appears after its parent, each node exactly
//! once. The order is computed once at load and reused every frame by the
//! transform system.
//!
//! Ordering uses an explicit stack and a visited set instead of recursion, so
//! arbitrarily deep skeletons cannot overflow the call stack.

use smallvec::SmallVec;

use marionette_core::{MarionetteError, Result};

use crate::NodeIndex;

/// Computes each node's parent by scanning the children lists.
///
/// Fails on out-of-range child indices, on a node listing itself as a child
/// and on nodes claimed by more than one parent.
pub fn compute_parents<C: AsRef<[NodeIndex]>>(children: &[C]) -> Result<Vec<Option<NodeIndex>>> {
    let len = children.len();
    let mut parents: Vec<Option<NodeIndex>> = vec![None; len];

    for (parent, list) in children.iter().enumerate() {
        for &child in list.as_ref() {
            if child >= len {
                return Err(MarionetteError::out_of_bounds(
                    format!("child of node {parent}"),
                    child,
                    len,
                ));
            }
            if child == parent {
                return Err(MarionetteError::MalformedHierarchy(format!(
                    "node {parent} lists itself as a child"
                )));
            }
            match parents[child] {
                Some(existing) if existing != parent => {
                    return Err(MarionetteError::MalformedHierarchy(format!(
                        "node {child} has two parents ({existing} and {parent})"
                    )));
                }
                _ => parents[child] = Some(parent),
            }
        }
    }

    Ok(parents)
}

/// Produces a root-first ordering of all nodes.
///
/// Nodes are visited in index order; before a node is emitted, its
/// not-yet-emitted ancestors are emitted outermost first. A cycle in the
/// parent links yields [`MarionetteError::CyclicHierarchy`].
pub fn compute_order(parents: &[Option<NodeIndex>]) -> Result<Vec<NodeIndex>> {
    let len = parents.len();
    let mut visited = vec![false; len];
    let mut on_chain = vec![false; len];
    let mut order = Vec::with_capacity(len);

    // Ancestor chain of the node being inserted, innermost first.
    let mut chain: SmallVec<[NodeIndex; 32]> = SmallVec::new();

    for start in 0..len {
        if visited[start] {
            continue;
        }

        let mut cursor = Some(start);
        while let Some(index) = cursor {
            if index >= len {
                return Err(MarionetteError::out_of_bounds("parent index", index, len));
            }
            if visited[index] {
                break;
            }
            if on_chain[index] {
                return Err(MarionetteError::CyclicHierarchy { node: index });
            }
            on_chain[index] = true;
            chain.push(index);
            cursor = parents[index];
        }

        while let Some(index) = chain.pop() {
            on_chain[index] = false;
            visited[index] = true;
            order.push(index);
        }
    }

    Ok(order)
}
