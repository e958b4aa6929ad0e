use glam::Affine3A;
use rustc_hash::FxHashMap;

use crate::scene::transform::Transform;
use crate::scene::{NodeHandle, SkeletonKey};

/// A scene node.
///
/// # Hierarchy
///
/// Nodes form a tree through parent-child relationships:
/// - `parent`: Optional handle to parent node (None for root nodes)
/// - `children`: List of child node handles, in insertion order
///
/// # Animation targets
///
/// Animation writes into the [`Transform`] and, for nodes carrying morph
/// targets, into `morph_target_influences`. A node with a `skeleton` is a
/// skinned mesh: binding an animation to it animates the skeleton's bones
/// instead of the node's own subtree.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,

    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    pub transform: Transform,

    /// Skeleton driving this node when it is a skinned mesh.
    pub skeleton: Option<SkeletonKey>,

    /// Morph target weights, one slot per target.
    pub morph_target_influences: Vec<f32>,
    /// Target name → slot in `morph_target_influences`.
    pub morph_target_dictionary: FxHashMap<String, usize>,

    pub visible: bool,
}

impl Node {
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: String::new(),
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            skeleton: None,
            morph_target_influences: Vec::new(),
            morph_target_dictionary: FxHashMap::default(),
            visible: true,
        }
    }

    #[must_use]
    pub fn with_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::new()
        }
    }

    /// Declares the node's morph targets; all influences start at zero.
    pub fn set_morph_targets<S: AsRef<str>>(&mut self, names: &[S]) {
        self.morph_target_dictionary = names
            .iter()
            .enumerate()
            .map(|(slot, name)| (name.as_ref().to_string(), slot))
            .collect();
        self.morph_target_influences = vec![0.0; names.len()];
    }

    /// Current influence of a morph target, looked up by name.
    #[must_use]
    pub fn morph_influence(&self, name: &str) -> Option<f32> {
        let slot = *self.morph_target_dictionary.get(name)?;
        self.morph_target_influences.get(slot).copied()
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.transform.world_matrix
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}
