use glam::{Quat, Vec3};
use rustc_hash::FxHashMap;

/// One animatable property of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Position,
    Rotation,
    Scale,
    /// Morph target influences
    Morph,
}

impl Channel {
    pub const COUNT: usize = 4;

    /// Channels in the order playback visits them.
    pub const ALL: [Channel; Channel::COUNT] = [
        Channel::Position,
        Channel::Rotation,
        Channel::Scale,
        Channel::Morph,
    ];

    #[inline]
    #[must_use]
    pub(crate) fn slot(self) -> usize {
        match self {
            Channel::Position => 0,
            Channel::Rotation => 1,
            Channel::Scale => 2,
            Channel::Morph => 3,
        }
    }
}

/// Rotation value of a keyframe.
///
/// Authored data usually arrives as a raw `[x, y, z, w]` array; the
/// normalizer converts it to a quaternion once so playback never has to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyRotation {
    Raw([f32; 4]),
    Quat(Quat),
}

impl KeyRotation {
    #[inline]
    #[must_use]
    pub fn to_quat(self) -> Quat {
        match self {
            KeyRotation::Raw(xyzw) => Quat::from_array(xyzw),
            KeyRotation::Quat(q) => q,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_raw(&self) -> bool {
        matches!(self, KeyRotation::Raw(_))
    }
}

impl From<Quat> for KeyRotation {
    fn from(q: Quat) -> Self {
        KeyRotation::Quat(q)
    }
}

impl From<[f32; 4]> for KeyRotation {
    fn from(xyzw: [f32; 4]) -> Self {
        KeyRotation::Raw(xyzw)
    }
}

/// A keyframe of one track.
///
/// Every channel is optional: sparse tracks that only key some channels on
/// some frames are legal, and playback searches for the nearest key that
/// actually defines the channel it needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Keyframe {
    pub time: f32,
    /// Position inside the track, reassigned by normalization.
    pub index: usize,
    pub position: Option<Vec3>,
    pub rotation: Option<KeyRotation>,
    pub scale: Option<Vec3>,
    pub morph_influences: Option<FxHashMap<String, f32>>,
}

impl Keyframe {
    #[must_use]
    pub fn new(time: f32) -> Self {
        Self {
            time,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: impl Into<KeyRotation>) -> Self {
        self.rotation = Some(rotation.into());
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = Some(scale);
        self
    }

    #[must_use]
    pub fn with_morph(mut self, target: &str, influence: f32) -> Self {
        self.morph_influences
            .get_or_insert_with(FxHashMap::default)
            .insert(target.to_string(), influence);
        self
    }

    /// Whether this key defines a value for `channel`.
    #[inline]
    #[must_use]
    pub fn has(&self, channel: Channel) -> bool {
        match channel {
            Channel::Position => self.position.is_some(),
            Channel::Rotation => self.rotation.is_some(),
            Channel::Scale => self.scale.is_some(),
            Channel::Morph => self.morph_influences.is_some(),
        }
    }

    #[inline]
    #[must_use]
    pub fn rotation_quat(&self) -> Option<Quat> {
        self.rotation.map(KeyRotation::to_quat)
    }

    #[must_use]
    pub fn morph_influence(&self, target: &str) -> Option<f32> {
        self.morph_influences.as_ref()?.get(target).copied()
    }
}
