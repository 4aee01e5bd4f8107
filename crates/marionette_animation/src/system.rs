use slotmap::{SlotMap, new_key_type};

use crate::animator::Animator;

new_key_type! {
    pub struct AnimatorKey;
}

/// Animation system.
///
/// Owns every animator of the application and ticks them once per frame.
/// The application loop holds it explicitly; there is no global list.
#[derive(Debug, Default)]
pub struct AnimationSystem {
    animators: SlotMap<AnimatorKey, Animator>,
}

impl AnimationSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, animator: Animator) -> AnimatorKey {
        self.animators.insert(animator)
    }

    pub fn remove(&mut self, key: AnimatorKey) -> Option<Animator> {
        self.animators.remove(key)
    }

    #[must_use]
    pub fn get(&self, key: AnimatorKey) -> Option<&Animator> {
        self.animators.get(key)
    }

    pub fn get_mut(&mut self, key: AnimatorKey) -> Option<&mut Animator> {
        self.animators.get_mut(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.animators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.animators.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AnimatorKey, &Animator)> {
        self.animators.iter()
    }

    pub fn clear(&mut self) {
        self.animators.clear();
    }

    /// Ticks every animator by `dt` seconds.
    ///
    /// # Arguments
    /// * `dt` - Delta time per frame (in seconds)
    pub fn tick(&mut self, dt: f32) {
        for (_key, animator) in &mut self.animators {
            animator.tick(dt);
        }
        log::trace!("Animation system ticked {} animators", self.animators.len());
    }
}
