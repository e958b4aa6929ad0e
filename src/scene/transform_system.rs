//! Transform System
//!
//! Propagates local matrices down the scene hierarchy. Decoupled from
//! [`Scene`](crate::scene::Scene) so it only borrows the node storage and the
//! root list.
//!
//! A node's world matrix is recomputed when its own local matrix changed,
//! when it was flagged with `matrix_world_needs_update`, or when any ancestor
//! was recomputed in the same pass.

use glam::Affine3A;
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::scene::NodeHandle;
use crate::scene::node::Node;

/// Updates world matrices for every hierarchy rooted at `roots`.
///
/// Uses an explicit stack instead of recursion so deep hierarchies cannot
/// overflow the call stack. Children are visited in order.
pub fn update_hierarchy(nodes: &mut SlotMap<NodeHandle, Node>, roots: &[NodeHandle]) {
    let mut stack: SmallVec<[(NodeHandle, Affine3A, bool); 32]> = SmallVec::new();

    for &root_handle in roots.iter().rev() {
        stack.push((root_handle, Affine3A::IDENTITY, false));
    }

    while let Some((node_handle, parent_world_matrix, parent_changed)) = stack.pop() {
        let Some(node) = nodes.get_mut(node_handle) else {
            continue;
        };

        let flagged = node.transform.matrix_world_needs_update;
        let local_changed = node.transform.update_local_matrix();
        let world_needs_update = local_changed || flagged || parent_changed;

        if world_needs_update {
            let new_world = parent_world_matrix * *node.transform.local_matrix();
            node.transform.set_world_matrix(new_world);
        }

        let current_world = node.transform.world_matrix;
        for &child_handle in node.children.iter().rev() {
            stack.push((child_handle, current_world, world_needs_update));
        }
    }
}
