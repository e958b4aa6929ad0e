//! Keyframe cursor search
//!
//! Tracks may key their channels sparsely, so playback cannot simply use the
//! neighbouring key: it needs the nearest key that actually defines the
//! channel being blended. The helpers here scan forward or backward for it.
//!
//! Index handling at the track ends is an explicit [`ScanPolicy`]:
//! - `Wrap`: the start index is taken modulo the track length, which lets
//!   linear playback look ahead across the loop boundary.
//! - `Clamp`: the start index is clamped into the track, giving the ordered
//!   neighbourhood a spline window needs.
//!
//! When no key in the scanned range defines the channel, the forward scan
//! falls back to the first key and the backward scan to the last one.

use crate::animation::clip::Track;
use crate::animation::keyframe::{Channel, Keyframe};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanPolicy {
    Wrap,
    Clamp,
}

/// Index of the first key at or after `from` that defines `channel`.
///
/// Returns `None` only for an empty track.
#[must_use]
pub fn next_key_index_with(
    track: &Track,
    channel: Channel,
    from: usize,
    policy: ScanPolicy,
) -> Option<usize> {
    let n = track.len();
    if n == 0 {
        return None;
    }

    let start = match policy {
        ScanPolicy::Wrap => from % n,
        ScanPolicy::Clamp => from.min(n - 1),
    };

    let found = track.keys[start..]
        .iter()
        .position(|k| k.has(channel))
        .map(|offset| start + offset);

    Some(found.unwrap_or(0))
}

/// Index of the last key at or before `from` that defines `channel`.
///
/// Returns `None` only for an empty track.
#[must_use]
pub fn prev_key_index_with(
    track: &Track,
    channel: Channel,
    from: isize,
    policy: ScanPolicy,
) -> Option<usize> {
    let n = track.len() as isize;
    if n == 0 {
        return None;
    }

    let start = match policy {
        ScanPolicy::Wrap => from.rem_euclid(n),
        ScanPolicy::Clamp => from.clamp(0, n - 1),
    } as usize;

    let found = track.keys[..=start].iter().rposition(|k| k.has(channel));

    Some(found.unwrap_or(track.len() - 1))
}

/// First key at or after `from` that defines `channel`.
#[must_use]
pub fn next_key_with(
    track: &Track,
    channel: Channel,
    from: usize,
    policy: ScanPolicy,
) -> Option<&Keyframe> {
    next_key_index_with(track, channel, from, policy).map(|i| &track.keys[i])
}

/// Last key at or before `from` that defines `channel`.
#[must_use]
pub fn prev_key_with(
    track: &Track,
    channel: Channel,
    from: isize,
    policy: ScanPolicy,
) -> Option<&Keyframe> {
    prev_key_index_with(track, channel, from, policy).map(|i| &track.keys[i])
}

/// The two keys bracketing playback time for one channel, by index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackCursor {
    pub prev: usize,
    pub next: usize,
}

impl PlaybackCursor {
    /// Cursor at the start of the track: the first key, and the first key
    /// after it that defines the channel.
    #[must_use]
    pub fn seed(track: &Track, channel: Channel, policy: ScanPolicy) -> Self {
        Self {
            prev: 0,
            next: next_key_index_with(track, channel, 1, policy).unwrap_or(0),
        }
    }

    /// Steps forward until `next` is at or past `time`.
    ///
    /// Always steps at least once. Stops early when the search stops making
    /// forward progress (it wrapped around or fell back to the first key), so
    /// a track whose last key precedes `time` holds that key.
    pub fn advance(&mut self, track: &Track, channel: Channel, time: f32, policy: ScanPolicy) {
        for _ in 0..track.len() {
            if !self.step(track, channel, policy) || track.keys[self.next].time >= time {
                break;
            }
        }
    }

    /// Restarts from the first key after a loop wrap, then scans forward
    /// until `next` is at or past `time`.
    pub fn rewind(&mut self, track: &Track, channel: Channel, time: f32, policy: ScanPolicy) {
        *self = Self::seed(track, channel, policy);

        for _ in 0..track.len() {
            if track.keys.get(self.next).is_none_or(|k| k.time >= time) {
                break;
            }
            if !self.step(track, channel, policy) {
                break;
            }
        }
    }

    /// `prev = next`, `next = following key with the channel`.
    /// Returns whether `next` moved forward.
    fn step(&mut self, track: &Track, channel: Channel, policy: ScanPolicy) -> bool {
        let candidate =
            next_key_index_with(track, channel, self.next + 1, policy).unwrap_or(self.next);
        let progressed = candidate > self.next;

        self.prev = self.next;
        self.next = candidate;
        progressed
    }
}

/// Cursors of every channel of one bound node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeCursors {
    channels: [PlaybackCursor; Channel::COUNT],
}

impl NodeCursors {
    #[must_use]
    pub fn seed(track: &Track, policy: ScanPolicy) -> Self {
        Self {
            channels: Channel::ALL.map(|channel| PlaybackCursor::seed(track, channel, policy)),
        }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, channel: Channel) -> PlaybackCursor {
        self.channels[channel.slot()]
    }

    #[inline]
    pub fn get_mut(&mut self, channel: Channel) -> &mut PlaybackCursor {
        &mut self.channels[channel.slot()]
    }
}
