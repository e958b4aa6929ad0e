//! # Animus
//!
//! Hierarchical keyframe animation playback for scene graphs.
//!
//! A clip holds one keyframe track per node of a hierarchy. An [`Animation`]
//! binds a clip to a concrete node hierarchy, keeps per-node cursors into the
//! tracks, and writes interpolated position / rotation / scale values back
//! onto the nodes every tick. The [`AnimationSystem`] owns the clip library
//! and the set of currently playing instances.
//!
//! ```rust,ignore
//! use animus::{AnimationSystem, InterpolationMode, Node, Scene};
//!
//! let mut scene = Scene::new();
//! let root = scene.add_node(Node::with_name("root"));
//!
//! let mut system = AnimationSystem::new();
//! system.add_clip(clip);
//!
//! let walk = system.create_animation(&scene, root, "walk", InterpolationMode::Linear)?;
//! system.play(walk, &mut scene, true, 0.0)?;
//!
//! // once per frame
//! system.tick(&mut scene, dt);
//! scene.update_matrix_world();
//! ```

pub mod animation;
pub mod errors;
pub mod scene;

pub use animation::{
    Animation, AnimationClip, AnimationHandle, AnimationMixer, AnimationSettings, AnimationSystem,
    Binder, Channel, ClipLibrary, Interpolatable, InterpolationMode, KeyRotation, Keyframe,
    PlaybackState, ScanPolicy, Track,
};
pub use errors::{AnimusError, Result};
pub use scene::{Node, NodeHandle, Scene, Skeleton, SkeletonKey, Transform};
