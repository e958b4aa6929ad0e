use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

use crate::animation::action::Animation;
use crate::errors::{AnimusError, Result};
use crate::scene::Scene;

new_key_type! {
    pub struct AnimationHandle;
}

/// Owns animation instances and drives the playing ones.
///
/// The active set lists, in registration order, the instances that receive
/// ticks. Playback state changes made through the mixer keep it in sync:
/// an instance is active exactly while it is playing and not paused.
#[derive(Debug, Default)]
pub struct AnimationMixer {
    animations: SlotMap<AnimationHandle, Animation>,
    active: Vec<AnimationHandle>,
}

impl AnimationMixer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, animation: Animation) -> AnimationHandle {
        let handle = self.animations.insert(animation);
        self.sync(handle);
        handle
    }

    pub fn remove(&mut self, handle: AnimationHandle) -> Option<Animation> {
        self.unregister(handle);
        self.animations.remove(handle)
    }

    #[must_use]
    pub fn get(&self, handle: AnimationHandle) -> Option<&Animation> {
        self.animations.get(handle)
    }

    pub fn get_mut(&mut self, handle: AnimationHandle) -> Option<&mut Animation> {
        self.animations.get_mut(handle)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// Adds `handle` to the active set. Idempotent.
    pub fn register(&mut self, handle: AnimationHandle) {
        if self.animations.contains_key(handle) && !self.active.contains(&handle) {
            self.active.push(handle);
        }
    }

    /// Removes `handle` from the active set. Idempotent.
    pub fn unregister(&mut self, handle: AnimationHandle) {
        if let Some(pos) = self.active.iter().position(|&h| h == handle) {
            self.active.remove(pos);
        }
    }

    #[must_use]
    pub fn is_active(&self, handle: AnimationHandle) -> bool {
        self.active.contains(&handle)
    }

    /// Active instances in registration order.
    #[must_use]
    pub fn active(&self) -> &[AnimationHandle] {
        &self.active
    }

    pub fn play(
        &mut self,
        handle: AnimationHandle,
        scene: &mut Scene,
        looping: bool,
        start_time: f32,
    ) -> Result<()> {
        self.animation_mut(handle)?.play(scene, looping, start_time);
        self.sync(handle);
        Ok(())
    }

    pub fn pause(&mut self, handle: AnimationHandle) -> Result<()> {
        self.animation_mut(handle)?.pause();
        self.sync(handle);
        Ok(())
    }

    pub fn stop(&mut self, handle: AnimationHandle) -> Result<()> {
        self.animation_mut(handle)?.stop();
        self.sync(handle);
        Ok(())
    }

    /// Updates one instance outside of the regular tick.
    pub fn update(&mut self, handle: AnimationHandle, scene: &mut Scene, dt: f32) -> Result<()> {
        self.animation_mut(handle)?.update(scene, dt);
        self.sync(handle);
        Ok(())
    }

    /// Advances every active instance by `dt`.
    ///
    /// Iterates a snapshot of the active set, so an instance that stops
    /// itself (a non-looping clip reaching its end) neither skips nor repeats
    /// any other instance. Stopped instances leave the set afterwards.
    pub fn tick(&mut self, scene: &mut Scene, dt: f32) {
        let snapshot: SmallVec<[AnimationHandle; 16]> = self.active.iter().copied().collect();

        for handle in snapshot {
            if let Some(animation) = self.animations.get_mut(handle) {
                animation.update(scene, dt);
            }
        }

        let animations = &self.animations;
        self.active
            .retain(|&h| animations.get(h).is_some_and(Animation::wants_ticks));
    }

    fn animation_mut(&mut self, handle: AnimationHandle) -> Result<&mut Animation> {
        self.animations
            .get_mut(handle)
            .ok_or(AnimusError::AnimationNotFound(handle))
    }

    fn sync(&mut self, handle: AnimationHandle) {
        if self.animations.get(handle).is_some_and(Animation::wants_ticks) {
            self.register(handle);
        } else {
            self.unregister(handle);
        }
    }
}
