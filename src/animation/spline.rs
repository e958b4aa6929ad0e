//! Catmull-Rom spline evaluation over keyframe samples.
//!
//! A fractional position `u ∈ [0, 1]` along a sequence of `n` samples picks
//! the segment `floor(u * (n - 1))`, and the cubic is evaluated over a
//! four-sample window around it. At both ends of the sequence the window
//! repeats the boundary sample instead of extrapolating.

use glam::Vec3;

/// Playback remaps the blend fraction into the middle interval of the
/// four-key window with `u = fraction * SCALE + OFFSET`.
pub const SPLINE_REPARAM_SCALE: f32 = 0.33;
pub const SPLINE_REPARAM_OFFSET: f32 = 0.33;

/// Look-ahead factor used to derive a facing direction from the spline.
pub const FORWARD_LOOKAHEAD: f32 = 1.01;

/// Maps a segment blend fraction onto the middle interval of a 4-key window.
#[inline]
#[must_use]
pub fn reparameterize(fraction: f32) -> f32 {
    fraction * SPLINE_REPARAM_SCALE + SPLINE_REPARAM_OFFSET
}

/// Cubic blend of one component.
#[inline]
#[must_use]
pub fn interpolate(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let v0 = (p2 - p0) * 0.5;
    let v1 = (p3 - p1) * 0.5;
    let t2 = t * t;
    let t3 = t * t2;

    (2.0 * (p1 - p2) + v0 + v1) * t3 + (-3.0 * (p1 - p2) - 2.0 * v0 - v1) * t2 + v0 * t + p1
}

/// Indices of the four control samples around `int_point` in a sequence of
/// `n` samples.
#[must_use]
pub fn control_window(n: usize, int_point: usize) -> [usize; 4] {
    let n = n as isize;
    let i = int_point as isize;
    let last = (n - 1).max(0);

    let c0 = if i == 0 { i } else { i - 1 };
    let c2 = if i > n - 2 { i } else { i + 1 };
    let c3 = if i > n - 3 { last } else { i + 2 };

    [c0, i, c2, c3].map(|c| c.clamp(0, last) as usize)
}

/// Evaluates the spline through `points` at fractional position `u`.
#[must_use]
pub fn catmull_rom(points: &[Vec3], u: f32) -> Vec3 {
    let n = points.len();
    if n == 0 {
        return Vec3::ZERO;
    }

    let point = (n - 1) as f32 * u.clamp(0.0, 1.0);
    let int_point = point.floor();
    let weight = point - int_point;

    let [c0, c1, c2, c3] = control_window(n, int_point as usize);
    let (pa, pb, pc, pd) = (points[c0], points[c1], points[c2], points[c3]);

    Vec3::new(
        interpolate(pa.x, pb.x, pc.x, pd.x, weight),
        interpolate(pa.y, pb.y, pc.y, pd.y, weight),
        interpolate(pa.z, pb.z, pc.z, pd.z, weight),
    )
}
