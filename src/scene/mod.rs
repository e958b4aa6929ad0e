//! Scene graph
//!
//! The minimal node hierarchy the animation engine plays onto:
//! - Node: scene node (hierarchy, transform, morph target slots)
//! - Transform: position, rotation, scale plus matrix update flags
//! - Skeleton: ordered bone list of a skinned mesh
//! - Scene: node and skeleton storage
//! - `transform_system`: world matrix propagation

pub mod node;
#[allow(clippy::module_inception)]
pub mod scene;
pub mod skeleton;
pub mod transform;
pub mod transform_system;

pub use node::Node;
pub use scene::Scene;
pub use skeleton::Skeleton;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
    pub struct SkeletonKey;
}
