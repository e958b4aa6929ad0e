use glam::{Quat, Vec3};
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::animation::keyframe::{Channel, Keyframe};
use crate::animation::values::InterpolationMode;
use crate::scene::Transform;

/// Keyframes of a single node, sorted by time.
///
/// Track `i` of a clip animates bound node `i` of an animation instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    pub keys: Vec<Keyframe>,
    /// Every morph target named by any key of this track.
    pub used_morph_targets: Option<FxHashSet<String>>,
}

impl Track {
    #[must_use]
    pub fn new(keys: Vec<Keyframe>) -> Self {
        Self {
            keys,
            used_morph_targets: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Whether any key of the track defines `channel`.
    #[must_use]
    pub fn has_channel(&self, channel: Channel) -> bool {
        self.keys.iter().any(|k| k.has(channel))
    }
}

/// Transform channels sampled for one node at one playback time.
///
/// Only the channels a track drives are set. Applying a pose leaves every
/// other field of the transform as the node had it, so a pose cached by one
/// instance is valid for any hierarchy the clip is bound to.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CachedPose {
    pub position: Option<Vec3>,
    pub rotation: Option<Quat>,
    /// Yaw facing along the path, in forward mode.
    pub heading: Option<f32>,
    pub scale: Option<Vec3>,
}

impl CachedPose {
    pub fn apply(&self, transform: &mut Transform) {
        if let Some(position) = self.position {
            transform.position = position;
        }
        if let Some(rotation) = self.rotation {
            transform.rotation = rotation;
        }
        if let Some(yaw) = self.heading {
            transform.set_rotation_euler(0.0, yaw, 0.0);
            transform.use_quaternion = false;
        }
        if let Some(scale) = self.scale {
            transform.scale = scale;
        }
        transform.mark_dirty();
    }
}

/// `[track][frame]` poses of one interpolation mode.
type PoseTable = Vec<Vec<Option<CachedPose>>>;

/// Per-frame pose cache, filled lazily during playback.
///
/// Poses depend on the interpolation mode, so each mode gets its own table.
#[derive(Debug, Default)]
struct FrameCache {
    tables: RwLock<FxHashMap<InterpolationMode, PoseTable>>,
}

/// Keyframe animation data for one hierarchy shape.
///
/// A clip is normalized once when it enters the
/// [`ClipLibrary`](crate::animation::ClipLibrary) and is immutable from then
/// on, apart from the frame cache. It is shared between every animation
/// instance that plays it.
#[derive(Debug)]
pub struct AnimationClip {
    pub name: String,
    pub fps: f32,
    /// Clip length, in the same unit as key times.
    pub length: f32,
    pub tracks: Vec<Track>,

    pub(crate) initialized: bool,
    frame_cache: FrameCache,
}

impl AnimationClip {
    #[must_use]
    pub fn new(name: &str, fps: f32, length: f32, tracks: Vec<Track>) -> Self {
        Self {
            name: name.to_string(),
            fps,
            length,
            tracks,
            initialized: false,
            frame_cache: FrameCache::default(),
        }
    }

    /// Builds a clip whose length is the time of the latest key.
    #[must_use]
    pub fn from_tracks(name: &str, fps: f32, tracks: Vec<Track>) -> Self {
        let length = tracks
            .iter()
            .filter_map(|t| t.keys.last().map(|k| k.time))
            .fold(0.0_f32, f32::max);

        Self::new(name, fps, length, tracks)
    }

    /// Whether [`normalize`](crate::animation::normalize::normalize) already ran.
    #[inline]
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Number of frames a cache table holds per track.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        if self.fps > 0.0 && self.length > 0.0 {
            (self.length * self.fps).floor() as usize + 1
        } else {
            1
        }
    }

    /// Frame index for a (wrapped) playback time.
    #[must_use]
    pub fn frame_at(&self, time: f32) -> usize {
        if self.fps <= 0.0 || time <= 0.0 {
            return 0;
        }
        let frame = (time * self.fps).min(self.length * self.fps).floor() as usize;
        frame.min(self.frame_count() - 1)
    }

    #[must_use]
    pub fn cached_pose(
        &self,
        mode: InterpolationMode,
        track: usize,
        frame: usize,
    ) -> Option<CachedPose> {
        let tables = self.frame_cache.tables.read();
        tables.get(&mode)?.get(track)?.get(frame).copied().flatten()
    }

    pub(crate) fn store_pose(
        &self,
        mode: InterpolationMode,
        track: usize,
        frame: usize,
        pose: CachedPose,
    ) {
        let frames = self.frame_count();
        let track_count = self.tracks.len();

        let mut tables = self.frame_cache.tables.write();
        let table = tables
            .entry(mode)
            .or_insert_with(|| vec![vec![None; frames]; track_count]);

        if let Some(slot) = table.get_mut(track).and_then(|t| t.get_mut(frame)) {
            *slot = Some(pose);
        }
    }

    /// Number of frames currently cached for `mode`, over all tracks.
    #[must_use]
    pub fn cached_frame_count(&self, mode: InterpolationMode) -> usize {
        self.frame_cache.tables.read().get(&mode).map_or(0, |table| {
            table.iter().flatten().filter(|pose| pose.is_some()).count()
        })
    }

    pub fn clear_frame_cache(&self) {
        self.frame_cache.tables.write().clear();
    }
}

impl Clone for AnimationClip {
    /// Clones the keyframe data; the copy starts with an empty frame cache.
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            fps: self.fps,
            length: self.length,
            tracks: self.tracks.clone(),
            initialized: self.initialized,
            frame_cache: FrameCache::default(),
        }
    }
}
