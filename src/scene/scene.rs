use slotmap::SlotMap;

use crate::scene::node::Node;
use crate::scene::skeleton::Skeleton;
use crate::scene::transform_system;
use crate::scene::{NodeHandle, SkeletonKey};

/// Scene graph container.
///
/// Owns every node and skeleton. Animation code only ever refers to nodes by
/// [`NodeHandle`], so instances can be bound to any hierarchy of the scene
/// without holding borrows across ticks.
#[derive(Debug, Default)]
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,

    pub skeletons: SlotMap<SkeletonKey, Skeleton>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node to the scene as a new root.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    /// Adds a node as the last child of `parent`.
    ///
    /// If `parent` is not part of the scene the node becomes a root.
    pub fn add_to_parent(&mut self, child: Node, parent: NodeHandle) -> NodeHandle {
        let handle = self.nodes.insert(child);
        if self.nodes.contains_key(parent) {
            self.link(handle, parent);
        } else {
            log::warn!("Scene::add_to_parent: parent {parent:?} not found, adding as root");
            self.root_nodes.push(handle);
        }
        handle
    }

    /// Moves an existing node under `parent`, detaching it from its previous
    /// parent (or from the root list).
    ///
    /// Attaching a node below one of its own descendants is refused.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent || !self.nodes.contains_key(child) || !self.nodes.contains_key(parent)
        {
            return;
        }
        if self.is_ancestor(child, parent) {
            log::warn!("Scene::attach: {child:?} is an ancestor of {parent:?}, ignoring");
            return;
        }

        let old_parent = self.nodes[child].parent;
        if let Some(old_parent) = old_parent {
            if let Some(p) = self.nodes.get_mut(old_parent) {
                p.children.retain(|&c| c != child);
            }
        } else {
            self.root_nodes.retain(|&r| r != child);
        }

        self.link(child, parent);
    }

    /// Whether `ancestor` appears on the parent chain of `node`.
    fn is_ancestor(&self, ancestor: NodeHandle, node: NodeHandle) -> bool {
        let mut current = self.nodes.get(node).and_then(|n| n.parent);
        while let Some(handle) = current {
            if handle == ancestor {
                return true;
            }
            current = self.nodes.get(handle).and_then(|n| n.parent);
        }
        false
    }

    fn link(&mut self, child: NodeHandle, parent: NodeHandle) {
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
            c.transform.mark_dirty();
        }
    }

    #[inline]
    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    #[inline]
    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    /// Registers a skeleton and makes `mesh` a skinned mesh driven by it.
    pub fn add_skeleton(&mut self, mesh: NodeHandle, skeleton: Skeleton) -> SkeletonKey {
        let key = self.skeletons.insert(skeleton);
        if let Some(node) = self.nodes.get_mut(mesh) {
            node.skeleton = Some(key);
        }
        key
    }

    /// Finds the first node with the given name in pre-order below `root`.
    #[must_use]
    pub fn find_by_name(&self, root: NodeHandle, name: &str) -> Option<NodeHandle> {
        let node = self.nodes.get(root)?;
        if node.name == name {
            return Some(root);
        }
        node.children
            .iter()
            .find_map(|&child| self.find_by_name(child, name))
    }

    /// Recomputes local and world matrices for every flagged node.
    pub fn update_matrix_world(&mut self) {
        transform_system::update_hierarchy(&mut self.nodes, &self.root_nodes);
    }
}
