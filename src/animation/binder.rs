use smallvec::SmallVec;

use crate::scene::{NodeHandle, Scene};

pub struct Binder;

impl Binder {
    /// Flattens the hierarchy under `root` into the node order clip tracks
    /// are indexed by.
    ///
    /// A skinned mesh binds its skeleton's bones, in bone order. Any other
    /// node binds itself followed by its descendants in pre-order.
    #[must_use]
    pub fn bind(scene: &Scene, root: NodeHandle) -> Vec<NodeHandle> {
        let Some(root_node) = scene.get_node(root) else {
            log::warn!("Binder::bind: root node {root:?} not found");
            return Vec::new();
        };

        if let Some(skeleton_key) = root_node.skeleton {
            if let Some(skeleton) = scene.skeletons.get(skeleton_key) {
                return skeleton.bones.clone();
            }
            log::warn!(
                "Binder::bind: skeleton of '{}' is missing, binding node hierarchy instead",
                root_node.name
            );
        }

        let mut hierarchy = Vec::new();
        let mut stack: SmallVec<[NodeHandle; 32]> = SmallVec::new();
        stack.push(root);

        while let Some(handle) = stack.pop() {
            let Some(node) = scene.get_node(handle) else {
                continue;
            };
            hierarchy.push(handle);
            stack.extend(node.children().iter().rev().copied());
        }

        hierarchy
    }
}
