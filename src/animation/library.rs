use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::animation::clip::AnimationClip;
use crate::animation::normalize::normalize;

/// Named clip storage.
///
/// Clips are normalized on the way in and handed out as shared, read-only
/// `Arc`s, so every instance playing a clip sees the same data.
#[derive(Debug, Default)]
pub struct ClipLibrary {
    clips: FxHashMap<String, Arc<AnimationClip>>,
}

impl ClipLibrary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `clip` under its name, replacing any clip of the same name.
    ///
    /// Instances already playing the replaced clip keep their copy.
    pub fn add(&mut self, mut clip: AnimationClip) -> Arc<AnimationClip> {
        if self.clips.contains_key(&clip.name) {
            log::warn!(
                "ClipLibrary::add: '{}' already exists in library, overwriting",
                clip.name
            );
        }

        normalize(&mut clip);

        let clip = Arc::new(clip);
        self.clips.insert(clip.name.clone(), Arc::clone(&clip));
        clip
    }

    /// Looks up a clip by name. A miss is logged and returns `None`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<AnimationClip>> {
        let clip = self.clips.get(name).cloned();
        if clip.is_none() {
            log::warn!("ClipLibrary::get: couldn't find animation '{name}'");
        }
        clip
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Arc<AnimationClip>> {
        self.clips.remove(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.clips.keys().map(String::as_str)
    }
}
