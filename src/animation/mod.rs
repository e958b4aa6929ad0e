pub mod action;
pub mod binder;
pub mod clip;
pub mod cursor;
pub mod keyframe;
pub mod library;
pub mod mixer;
pub mod normalize;
pub mod settings;
pub mod spline;
pub mod system;
pub mod values;

pub use action::{Animation, PlaybackState};
pub use binder::Binder;
pub use clip::{AnimationClip, CachedPose, Track};
pub use cursor::{NodeCursors, PlaybackCursor, ScanPolicy};
pub use keyframe::{Channel, KeyRotation, Keyframe};
pub use library::ClipLibrary;
pub use mixer::{AnimationHandle, AnimationMixer};
pub use normalize::normalize;
pub use settings::AnimationSettings;
pub use system::AnimationSystem;
pub use values::{Interpolatable, InterpolationMode};
