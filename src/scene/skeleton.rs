use crate::scene::NodeHandle;

/// Bone list of a skinned mesh.
///
/// `bones[i]` is the node animated by track `i` of any clip bound to the
/// skinned mesh, so the order is significant and never rearranged.
#[derive(Debug, Clone)]
pub struct Skeleton {
    pub name: String,
    pub bones: Vec<NodeHandle>,
}

impl Skeleton {
    #[must_use]
    pub fn new(name: &str, bones: Vec<NodeHandle>) -> Self {
        Self {
            name: name.to_string(),
            bones,
        }
    }

    /// Gets the root bone node handle (usually `bones[0]`)
    #[inline]
    #[must_use]
    pub fn root_bone(&self) -> Option<NodeHandle> {
        self.bones.first().copied()
    }

    #[inline]
    #[must_use]
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }
}
