//! Keyframe track normalization
//!
//! Runs once over a freshly authored clip before it is played. Every
//! problem found is repaired in place and logged; nothing is ever rejected.
//!
//! Per track:
//! 1. Negative (or non-finite) key times are clamped to zero.
//! 2. Raw `[x, y, z, w]` rotations become quaternions.
//! 3. Morph influences are expanded so every key lists every target the
//!    track uses, with `0.0` for targets a key does not mention.
//! 4. Keys are put in time order, keys sharing their predecessor's time are
//!    dropped (the earliest wins), and indices are reassigned `0..n`.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::animation::clip::{AnimationClip, Track};
use crate::animation::keyframe::KeyRotation;

/// What normalization changed in one track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackRepairs {
    pub clamped_times: usize,
    pub converted_rotations: usize,
    pub zero_filled_influences: usize,
    pub reordered: bool,
    pub removed_duplicates: usize,
}

impl TrackRepairs {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.clamped_times == 0 && !self.reordered && self.removed_duplicates == 0
    }
}

/// Normalizes every track of `clip`. A second call is a no-op.
pub fn normalize(clip: &mut AnimationClip) {
    if clip.initialized {
        return;
    }

    for (track_index, track) in clip.tracks.iter_mut().enumerate() {
        let repairs = normalize_track(track);
        if !repairs.is_clean() {
            log::debug!(
                "normalize: clip '{}' track {track_index}: {repairs:?}",
                clip.name
            );
        }
    }

    clip.clear_frame_cache();
    clip.initialized = true;
}

/// Normalizes a single track and reports what was repaired.
pub fn normalize_track(track: &mut Track) -> TrackRepairs {
    let mut repairs = TrackRepairs::default();

    for key in &mut track.keys {
        if key.time < 0.0 || !key.time.is_finite() {
            key.time = 0.0;
            repairs.clamped_times += 1;
        }

        if let Some(KeyRotation::Raw(xyzw)) = key.rotation {
            key.rotation = Some(KeyRotation::from(glam::Quat::from_array(xyzw)));
            repairs.converted_rotations += 1;
        }
    }

    repairs.zero_filled_influences = fill_morph_influences(track);

    if track.keys.windows(2).any(|w| w[1].time < w[0].time) {
        log::warn!("normalize: keys out of time order, sorting");
        track.keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        repairs.reordered = true;
    }

    let before = track.keys.len();
    track.keys.dedup_by(|later, earlier| later.time == earlier.time);
    repairs.removed_duplicates = before - track.keys.len();

    for (index, key) in track.keys.iter_mut().enumerate() {
        key.index = index;
    }

    repairs
}

/// Builds the track's morph target set and zero-fills missing influences.
///
/// Returns the number of influences that had to be filled in.
fn fill_morph_influences(track: &mut Track) -> usize {
    let used: FxHashSet<String> = track
        .keys
        .iter()
        .filter_map(|k| k.morph_influences.as_ref())
        .flat_map(|influences| influences.keys().cloned())
        .collect();

    if used.is_empty() {
        track.used_morph_targets = None;
        return 0;
    }

    let mut filled = 0;
    for key in &mut track.keys {
        let influences = key.morph_influences.get_or_insert_with(FxHashMap::default);
        for target in &used {
            if !influences.contains_key(target) {
                influences.insert(target.clone(), 0.0);
                filled += 1;
            }
        }
    }

    track.used_morph_targets = Some(used);
    filled
}
