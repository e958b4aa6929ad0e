use std::sync::Arc;

use crate::animation::action::Animation;
use crate::animation::clip::AnimationClip;
use crate::animation::library::ClipLibrary;
use crate::animation::mixer::{AnimationHandle, AnimationMixer};
use crate::animation::settings::AnimationSettings;
use crate::animation::values::InterpolationMode;
use crate::errors::{AnimusError, Result};
use crate::scene::{NodeHandle, Scene};

/// Animation system.
///
/// Context object owning the clip library and the mixer. The host creates
/// one, fills the library before the first tick, and calls [`tick`] once
/// per frame:
///
/// ```rust,ignore
/// system.tick(&mut scene, dt);
/// scene.update_matrix_world();
/// ```
///
/// [`tick`]: AnimationSystem::tick
#[derive(Debug, Default)]
pub struct AnimationSystem {
    pub settings: AnimationSettings,
    library: ClipLibrary,
    mixer: AnimationMixer,
}

impl AnimationSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_settings(settings: AnimationSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn library(&self) -> &ClipLibrary {
        &self.library
    }

    pub fn library_mut(&mut self) -> &mut ClipLibrary {
        &mut self.library
    }

    #[must_use]
    pub fn mixer(&self) -> &AnimationMixer {
        &self.mixer
    }

    pub fn mixer_mut(&mut self) -> &mut AnimationMixer {
        &mut self.mixer
    }

    /// Normalizes and registers a clip, replacing one of the same name.
    pub fn add_clip(&mut self, clip: AnimationClip) -> Arc<AnimationClip> {
        self.library.add(clip)
    }

    #[must_use]
    pub fn get_clip(&self, name: &str) -> Option<Arc<AnimationClip>> {
        self.library.get(name)
    }

    /// Binds the clip `clip_name` to the hierarchy under `root`.
    ///
    /// The new instance is stopped; call [`play`](Self::play) to start it.
    pub fn create_animation(
        &mut self,
        scene: &Scene,
        root: NodeHandle,
        clip_name: &str,
        interpolation: InterpolationMode,
    ) -> Result<AnimationHandle> {
        let clip = self
            .library
            .get(clip_name)
            .ok_or_else(|| AnimusError::ClipNotFound(clip_name.to_string()))?;

        let animation = Animation::new(scene, root, clip, interpolation, &self.settings)?;
        Ok(self.mixer.insert(animation))
    }

    pub fn remove_animation(&mut self, handle: AnimationHandle) -> Option<Animation> {
        self.mixer.remove(handle)
    }

    #[must_use]
    pub fn animation(&self, handle: AnimationHandle) -> Option<&Animation> {
        self.mixer.get(handle)
    }

    pub fn animation_mut(&mut self, handle: AnimationHandle) -> Option<&mut Animation> {
        self.mixer.get_mut(handle)
    }

    pub fn play(
        &mut self,
        handle: AnimationHandle,
        scene: &mut Scene,
        looping: bool,
        start_time: f32,
    ) -> Result<()> {
        self.mixer.play(handle, scene, looping, start_time)
    }

    pub fn pause(&mut self, handle: AnimationHandle) -> Result<()> {
        self.mixer.pause(handle)
    }

    pub fn stop(&mut self, handle: AnimationHandle) -> Result<()> {
        self.mixer.stop(handle)
    }

    /// Updates all playing animations.
    ///
    /// # Arguments
    /// * `scene` - Scene the animations write into
    /// * `dt` - Time since the previous tick, in clip time units
    #[inline]
    pub fn tick(&mut self, scene: &mut Scene, dt: f32) {
        self.mixer.tick(scene, dt);
    }
}
