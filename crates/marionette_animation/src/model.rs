use std::sync::Arc;

use rustc_hash::FxHashMap;

use marionette_core::{AnimationSettings, MarionetteError, Result};
use marionette_scene::Scene;

use crate::clip::AnimationClip;
use crate::desc::ModelDesc;

/// One animated model instance: its scene plus the clips that drive it.
#[derive(Debug, Clone)]
pub struct AnimatedModel {
    scene: Scene,
    clips: Vec<Arc<AnimationClip>>,
    clip_lookup: FxHashMap<String, usize>,
}

impl AnimatedModel {
    /// Pairs a scene with its clips. Every channel must target a node of the
    /// scene. For duplicate clip names the first clip wins.
    pub fn new(scene: Scene, clips: Vec<AnimationClip>) -> Result<Self> {
        for clip in &clips {
            if let Some(channel) = clip.channels().iter().find(|c| c.node >= scene.len()) {
                return Err(MarionetteError::MalformedAnimationData(format!(
                    "clip '{}' targets node {} but the scene has {} nodes",
                    clip.name,
                    channel.node,
                    scene.len()
                )));
            }
        }

        let mut clip_lookup = FxHashMap::default();
        for (i, clip) in clips.iter().enumerate() {
            if clip_lookup.contains_key(&clip.name) {
                log::warn!("Duplicate animation clip '{}', keeping the first", clip.name);
                continue;
            }
            clip_lookup.insert(clip.name.clone(), i);
        }

        log::debug!(
            "Animated model ready: {} nodes, {} clips",
            scene.len(),
            clips.len()
        );

        Ok(Self {
            scene,
            clips: clips.into_iter().map(Arc::new).collect(),
            clip_lookup,
        })
    }

    pub fn from_desc(desc: &ModelDesc, settings: &AnimationSettings) -> Result<Self> {
        desc.build(settings)
    }

    pub fn from_json(json: &str, settings: &AnimationSettings) -> Result<Self> {
        ModelDesc::from_json(json)?.build(settings)
    }

    #[inline]
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub(crate) fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    #[inline]
    #[must_use]
    pub fn clips(&self) -> &[Arc<AnimationClip>] {
        &self.clips
    }

    #[must_use]
    pub fn clip(&self, name: &str) -> Option<&Arc<AnimationClip>> {
        self.clip_lookup.get(name).map(|&i| &self.clips[i])
    }

    pub fn clip_names(&self) -> impl Iterator<Item = &str> {
        self.clips.iter().map(|c| c.name.as_str())
    }
}
