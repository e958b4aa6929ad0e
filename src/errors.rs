//! Error Types
//!
//! This module defines the error types used throughout the engine.
//!
//! # Overview
//!
//! Playback itself never fails: malformed keyframe data is repaired and
//! logged, lookup misses fall back to documented defaults. [`AnimusError`]
//! only covers the API boundary, where a caller names something that does
//! not exist:
//! - an unknown clip name when creating an animation
//! - a root node that is not part of the scene
//! - a stale or foreign animation handle
//!
//! # Usage
//!
//! ```rust,ignore
//! use animus::errors::{AnimusError, Result};
//!
//! fn start(system: &mut AnimationSystem, scene: &mut Scene, root: NodeHandle) -> Result<()> {
//!     let handle = system.create_animation(scene, root, "walk", InterpolationMode::Linear)?;
//!     system.play(handle, scene, true, 0.0)
//! }
//! ```

use thiserror::Error;

use crate::animation::AnimationHandle;
use crate::scene::NodeHandle;

/// The main error type for the animation engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimusError {
    /// No clip with this name is registered in the clip library.
    #[error("Animation clip not found: {0}")]
    ClipNotFound(String),

    /// The node handle does not refer to a node of the scene.
    #[error("Scene node not found: {0:?}")]
    NodeNotFound(NodeHandle),

    /// The animation handle does not refer to a live animation instance.
    #[error("Animation instance not found: {0:?}")]
    AnimationNotFound(AnimationHandle),
}

/// Alias for `Result<T, AnimusError>`.
pub type Result<T> = std::result::Result<T, AnimusError>;
