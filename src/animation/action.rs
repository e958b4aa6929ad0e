use std::sync::Arc;

use glam::{Quat, Vec3};

use crate::animation::binder::Binder;
use crate::animation::clip::{AnimationClip, CachedPose, Track};
use crate::animation::cursor::{
    NodeCursors, PlaybackCursor, ScanPolicy, next_key_with, prev_key_with,
};
use crate::animation::keyframe::{Channel, Keyframe};
use crate::animation::settings::AnimationSettings;
use crate::animation::spline::{FORWARD_LOOKAHEAD, catmull_rom, reparameterize};
use crate::animation::values::{Interpolatable, InterpolationMode};
use crate::errors::{AnimusError, Result};
use crate::scene::{Node, NodeHandle, Scene};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

/// One clip playing on one node hierarchy.
///
/// The instance binds the clip's tracks to concrete nodes at creation and
/// keeps one [`PlaybackCursor`] per node and channel in a side table indexed
/// like the bound node list. Nodes never carry playback state themselves.
///
/// Playback state only changes through the
/// [`AnimationMixer`](crate::animation::AnimationMixer) (or the
/// [`AnimationSystem`](crate::animation::AnimationSystem)), which keeps its
/// active set in step with the instance.
#[derive(Debug, Clone)]
pub struct Animation {
    clip: Arc<AnimationClip>,
    bound_nodes: Vec<NodeHandle>,
    cursors: Option<Vec<NodeCursors>>,

    current_time: f32,
    pub time_scale: f32,
    is_playing: bool,
    is_paused: bool,
    looping: bool,
    interpolation: InterpolationMode,

    /// Reuse interpolated poses through the clip's frame cache.
    pub frame_cache: bool,
    fraction_tolerance: f32,
}

impl Animation {
    /// Binds `clip` to the hierarchy under `root`.
    pub fn new(
        scene: &Scene,
        root: NodeHandle,
        clip: Arc<AnimationClip>,
        interpolation: InterpolationMode,
        settings: &AnimationSettings,
    ) -> Result<Self> {
        if scene.get_node(root).is_none() {
            return Err(AnimusError::NodeNotFound(root));
        }

        let bound_nodes = Binder::bind(scene, root);
        if bound_nodes.len() != clip.tracks.len() {
            log::warn!(
                "Animation: clip '{}' has {} tracks but {} nodes were bound, animating {}",
                clip.name,
                clip.tracks.len(),
                bound_nodes.len(),
                bound_nodes.len().min(clip.tracks.len())
            );
        }
        if !clip.is_initialized() {
            log::warn!("Animation: clip '{}' was not normalized", clip.name);
        }

        Ok(Self {
            clip,
            bound_nodes,
            cursors: None,
            current_time: 0.0,
            time_scale: settings.time_scale,
            is_playing: false,
            is_paused: false,
            looping: true,
            interpolation,
            frame_cache: settings.frame_cache,
            fraction_tolerance: settings.fraction_tolerance,
        })
    }

    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    #[must_use]
    pub fn bound_nodes(&self) -> &[NodeHandle] {
        &self.bound_nodes
    }

    #[must_use]
    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    #[must_use]
    pub fn looping(&self) -> bool {
        self.looping
    }

    #[must_use]
    pub fn interpolation(&self) -> InterpolationMode {
        self.interpolation
    }

    #[must_use]
    pub fn state(&self) -> PlaybackState {
        match (self.is_playing, self.is_paused) {
            (true, true) => PlaybackState::Paused,
            (true, false) => PlaybackState::Playing,
            (false, _) => PlaybackState::Stopped,
        }
    }

    /// Whether the instance should be in the mixer's active set.
    #[inline]
    #[must_use]
    pub fn wants_ticks(&self) -> bool {
        self.is_playing && !self.is_paused
    }

    /// Cursor of bound node `node_index` for `channel`, once playback started.
    #[must_use]
    pub fn cursor(&self, node_index: usize, channel: Channel) -> Option<PlaybackCursor> {
        self.cursors
            .as_ref()?
            .get(node_index)
            .map(|cursors| cursors.get(channel))
    }

    /// Starts playback and applies the pose at `start_time`.
    ///
    /// Does nothing but clear the paused flag if already playing.
    pub(crate) fn play(&mut self, scene: &mut Scene, looping: bool, start_time: f32) {
        self.is_paused = false;
        if self.is_playing {
            return;
        }

        self.is_playing = true;
        self.looping = looping;
        self.current_time = start_time;

        let policy = self.interpolation.scan_policy();
        let cursors = self.cursors.get_or_insert_with(Vec::new);
        cursors.clear();

        for (track, &handle) in self.clip.tracks.iter().zip(&self.bound_nodes) {
            cursors.push(NodeCursors::seed(track, policy));

            if let Some(node) = scene.get_node_mut(handle) {
                if self.interpolation != InterpolationMode::CatmullRomForward {
                    node.transform.use_quaternion = true;
                }
                node.transform.matrix_auto_update = true;
            }
        }

        self.update(scene, 0.0);
    }

    /// Toggles pause. Cursors and time are kept as they are.
    pub(crate) fn pause(&mut self) {
        self.is_paused = !self.is_paused;
    }

    pub(crate) fn stop(&mut self) {
        self.is_playing = false;
        self.is_paused = false;
    }

    /// Advances playback by `dt` and writes the new pose onto the bound nodes.
    ///
    /// No-op unless playing and not paused.
    pub(crate) fn update(&mut self, scene: &mut Scene, dt: f32) {
        if !self.wants_ticks() {
            return;
        }

        let length = self.clip.length;
        if length.is_nan() || length <= 0.0 {
            return;
        }

        let Some(cursors) = self.cursors.as_mut() else {
            return;
        };

        self.current_time += dt * self.time_scale;
        let unlooped = self.current_time;
        let time = unlooped.rem_euclid(length);
        self.current_time = time;
        let wrapped = time < unlooped;

        let clip = &*self.clip;
        let mode = self.interpolation;
        let policy = mode.scan_policy();
        let frame = self.frame_cache.then(|| clip.frame_at(time));
        let mut reached_end = false;

        'nodes: for (track_index, (track, &handle)) in
            clip.tracks.iter().zip(&self.bound_nodes).enumerate()
        {
            if track.is_empty() {
                continue;
            }
            let node_cursors = &mut cursors[track_index];

            for channel in Channel::ALL {
                if channel == Channel::Morph && track.used_morph_targets.is_none() {
                    continue;
                }

                let cursor = node_cursors.get_mut(channel);
                if track.keys.get(cursor.next).is_none_or(|k| k.time > unlooped) {
                    continue;
                }

                if !wrapped {
                    cursor.advance(track, channel, time, policy);
                } else if self.looping {
                    cursor.rewind(track, channel, time, policy);
                } else {
                    reached_end = true;
                    break 'nodes;
                }
            }

            let Some(node) = scene.get_node_mut(handle) else {
                continue;
            };

            let sampler = ChannelSampler {
                track,
                time,
                mode,
                tolerance: self.fraction_tolerance,
            };
            let node_cursors = *node_cursors;

            let pose = match frame {
                Some(f) => clip.cached_pose(mode, track_index, f).unwrap_or_else(|| {
                    let pose = sampler.pose(&node_cursors);
                    clip.store_pose(mode, track_index, f, pose);
                    pose
                }),
                None => sampler.pose(&node_cursors),
            };
            pose.apply(&mut node.transform);

            sampler.apply_morph(node_cursors.get(Channel::Morph), node);
        }

        if reached_end {
            self.apply_end_pose(scene);
            self.stop();
        }
    }

    /// Writes the last keyed value of every channel onto the bound nodes.
    fn apply_end_pose(&self, scene: &mut Scene) {
        for (track, &handle) in self.clip.tracks.iter().zip(&self.bound_nodes) {
            let Some(node) = scene.get_node_mut(handle) else {
                continue;
            };
            if track.is_empty() {
                continue;
            }

            end_pose(track, self.interpolation).apply(&mut node.transform);

            if let (Some(targets), Some(key)) =
                (&track.used_morph_targets, final_key(track, Channel::Morph))
            {
                for target in targets {
                    if let Some(influence) = key.morph_influence(target) {
                        write_morph(node, target, influence);
                    }
                }
            }
        }
    }
}

/// Last keyed value of every transform channel the track drives.
///
/// Forward mode faces along the final segment of the position path instead
/// of reading rotation keys.
fn end_pose(track: &Track, mode: InterpolationMode) -> CachedPose {
    let last_position = final_key(track, Channel::Position);

    let mut pose = CachedPose {
        position: last_position.and_then(|k| k.position),
        scale: final_key(track, Channel::Scale).and_then(|k| k.scale),
        ..CachedPose::default()
    };

    if mode == InterpolationMode::CatmullRomForward {
        pose.heading = last_position.and_then(|last| final_heading(track, last));
    } else {
        pose.rotation = final_key(track, Channel::Rotation).and_then(Keyframe::rotation_quat);
    }

    pose
}

/// Yaw along the segment ending at the track's last position key.
fn final_heading(track: &Track, last: &Keyframe) -> Option<f32> {
    let before = prev_key_with(
        track,
        Channel::Position,
        last.index as isize - 1,
        ScanPolicy::Clamp,
    )
    .filter(|k| k.index < last.index)?;

    yaw_towards(last.position? - before.position?)
}

/// Yaw that faces along `direction` projected onto the ground plane.
fn yaw_towards(mut direction: Vec3) -> Option<f32> {
    direction.y = 0.0;
    let direction = direction.try_normalize()?;
    Some(direction.x.atan2(direction.z))
}

/// Last key of the track that defines `channel`.
fn final_key(track: &Track, channel: Channel) -> Option<&Keyframe> {
    let last = track.len() as isize - 1;
    prev_key_with(track, channel, last, ScanPolicy::Clamp).filter(|k| k.has(channel))
}

fn write_morph(node: &mut Node, target: &str, influence: f32) {
    if let Some(&slot) = node.morph_target_dictionary.get(target)
        && let Some(weight) = node.morph_target_influences.get_mut(slot)
    {
        *weight = influence;
    }
}

/// Both ends of a bracket; a missing end holds the other one.
fn pair<T: Copy>(from: Option<T>, to: Option<T>) -> Option<(T, T)> {
    match (from, to) {
        (Some(a), Some(b)) => Some((a, b)),
        (Some(a), None) => Some((a, a)),
        (None, Some(b)) => Some((b, b)),
        (None, None) => None,
    }
}

enum Vec3Sample {
    Linear(Vec3),
    Spline { points: [Vec3; 4], u: f32 },
}

impl Vec3Sample {
    fn value(&self) -> Vec3 {
        match self {
            Vec3Sample::Linear(v) => *v,
            Vec3Sample::Spline { points, u } => catmull_rom(points, *u),
        }
    }

    /// Yaw facing along the spline, from a sample slightly ahead of `current`.
    fn heading(&self, current: Vec3) -> Option<f32> {
        let Vec3Sample::Spline { points, u } = self else {
            return None;
        };

        yaw_towards(catmull_rom(points, *u * FORWARD_LOOKAHEAD) - current)
    }
}

/// Evaluates the channels of one track at one playback time.
struct ChannelSampler<'a> {
    track: &'a Track,
    time: f32,
    mode: InterpolationMode,
    tolerance: f32,
}

impl ChannelSampler<'_> {
    fn bracket(&self, cursor: PlaybackCursor) -> Option<(&Keyframe, &Keyframe)> {
        Some((
            self.track.keys.get(cursor.prev)?,
            self.track.keys.get(cursor.next)?,
        ))
    }

    /// Blend weight of `time` between the bracketing keys, clamped to `[0, 1]`.
    fn fraction(&self, cursor: PlaybackCursor, prev: &Keyframe, next: &Keyframe) -> f32 {
        let span = next.time - prev.time;
        if span.is_nan() || span <= 0.0 {
            // Single key, or the look-ahead wrapped past the loop boundary: hold.
            log::trace!(
                "Animation: empty key span {}..{}, holding key {}",
                prev.time,
                next.time,
                cursor.prev
            );
            return 0.0;
        }

        let fraction = (self.time - prev.time) / span;
        if (0.0..=1.0).contains(&fraction) {
            return fraction;
        }
        if fraction.is_nan() {
            return 0.0;
        }

        let overshoot = if fraction < 0.0 { -fraction } else { fraction - 1.0 };
        // Time before a track's first key is a lead-in, not a timing defect.
        if overshoot > self.tolerance && cursor.prev != 0 {
            log::warn!(
                "Animation: blend fraction {fraction} outside [0, 1] at t={} (keys {} and {}), clamping",
                self.time,
                cursor.prev,
                cursor.next
            );
        } else {
            log::trace!("Animation: clamping blend fraction {fraction}");
        }

        fraction.clamp(0.0, 1.0)
    }

    fn vec3(
        &self,
        cursor: PlaybackCursor,
        channel: Channel,
        get: fn(&Keyframe) -> Option<Vec3>,
    ) -> Option<Vec3Sample> {
        let (prev, next) = self.bracket(cursor)?;
        let (from, to) = pair(get(prev), get(next))?;
        let fraction = self.fraction(cursor, prev, next);

        if !self.mode.is_spline() {
            return Some(Vec3Sample::Linear(Vec3::interpolate_linear(from, to, fraction)));
        }

        let policy = self.mode.scan_policy();
        let before = prev_key_with(self.track, channel, cursor.prev as isize - 1, policy)
            .and_then(get)
            .unwrap_or(from);
        let after = next_key_with(self.track, channel, cursor.next + 1, policy)
            .and_then(get)
            .unwrap_or(to);

        Some(Vec3Sample::Spline {
            points: [before, from, to, after],
            u: reparameterize(fraction),
        })
    }

    fn rotation(&self, cursor: PlaybackCursor) -> Option<Quat> {
        let (prev, next) = self.bracket(cursor)?;
        let (from, to) = pair(prev.rotation_quat(), next.rotation_quat())?;
        Some(Quat::interpolate_linear(from, to, self.fraction(cursor, prev, next)))
    }

    /// Samples the transform channels this track drives.
    fn pose(&self, cursors: &NodeCursors) -> CachedPose {
        let forward = self.mode == InterpolationMode::CatmullRomForward;
        let mut pose = CachedPose::default();

        if let Some(sample) = self.vec3(cursors.get(Channel::Position), Channel::Position, |k| {
            k.position
        }) {
            let position = sample.value();
            pose.position = Some(position);
            if forward {
                pose.heading = sample.heading(position);
            }
        }

        // Forward mode orients from the path alone.
        if !forward {
            pose.rotation = self.rotation(cursors.get(Channel::Rotation));
        }

        pose.scale = self
            .vec3(cursors.get(Channel::Scale), Channel::Scale, |k| k.scale)
            .map(|sample| sample.value());

        pose
    }

    fn apply_morph(&self, cursor: PlaybackCursor, node: &mut Node) {
        let Some(targets) = &self.track.used_morph_targets else {
            return;
        };
        let Some((prev, next)) = self.bracket(cursor) else {
            return;
        };
        if !prev.has(Channel::Morph) && !next.has(Channel::Morph) {
            return;
        }

        let fraction = self.fraction(cursor, prev, next);
        for target in targets {
            if let Some((from, to)) = pair(prev.morph_influence(target), next.morph_influence(target)) {
                write_morph(node, target, f32::interpolate_linear(from, to, fraction));
            }
        }
    }
}
