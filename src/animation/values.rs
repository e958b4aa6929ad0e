use glam::{Quat, Vec3};

use crate::animation::cursor::ScanPolicy;

/// How position and scale channels are blended between keys.
///
/// Rotation always uses spherical linear interpolation, whatever the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InterpolationMode {
    #[default]
    Linear,
    CatmullRom,
    /// Catmull-Rom, and the node yaws to face along the spline.
    CatmullRomForward,
}

impl InterpolationMode {
    #[inline]
    #[must_use]
    pub fn is_spline(self) -> bool {
        matches!(
            self,
            InterpolationMode::CatmullRom | InterpolationMode::CatmullRomForward
        )
    }

    /// Key search policy this mode needs.
    ///
    /// Linear playback looks ahead cyclically across the loop boundary; the
    /// spline needs an ordered, non-cyclic neighbourhood.
    #[inline]
    #[must_use]
    pub fn scan_policy(self) -> ScanPolicy {
        if self.is_spline() {
            ScanPolicy::Clamp
        } else {
            ScanPolicy::Wrap
        }
    }
}

pub trait Interpolatable: Copy + Sized {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;
}

impl Interpolatable for f32 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }
}

impl Interpolatable for Vec3 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }
}

impl Interpolatable for Quat {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.slerp(end, t)
    }
}
