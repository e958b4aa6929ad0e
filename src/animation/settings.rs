//! Animation Settings
//!
//! Playback configuration shared by every animation instance an
//! [`AnimationSystem`](crate::animation::AnimationSystem) creates. Instances
//! copy the values at creation, so changing the settings afterwards only
//! affects instances created later.
//!
//! ```rust,ignore
//! use animus::{AnimationSettings, AnimationSystem};
//!
//! let system = AnimationSystem::with_settings(AnimationSettings {
//!     frame_cache: true,
//!     ..Default::default()
//! });
//! ```

/// Default for [`AnimationSettings::fraction_tolerance`].
pub const DEFAULT_FRACTION_TOLERANCE: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSettings {
    /// How far a blend fraction may fall outside `[0, 1]` and still count as
    /// floating-point slop. Larger overshoots are clamped too, but logged as
    /// a warning because they point at malformed key timing.
    pub fraction_tolerance: f32,

    /// Cache interpolated poses per clip frame and reuse them on later
    /// passes over the same frame.
    pub frame_cache: bool,

    /// Initial playback speed multiplier of new instances.
    pub time_scale: f32,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            fraction_tolerance: DEFAULT_FRACTION_TOLERANCE,
            frame_cache: false,
            time_scale: 1.0,
        }
    }
}
