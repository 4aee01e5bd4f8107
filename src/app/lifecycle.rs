//! Gameplay object lifecycle.
//!
//! Objects opt into lifecycle hooks by capability instead of inheriting
//! empty callbacks: a [`GameObject`] answers which of [`Startable`],
//! [`Updatable`] and [`Destroyable`] it implements, and the
//! [`ObjectRegistry`] only dispatches to those.

use slotmap::{SlotMap, new_key_type};

use super::FrameContext;

new_key_type! {
    pub struct ObjectKey;
}

pub trait Startable {
    fn start(&mut self, ctx: &mut FrameContext<'_>);
}

pub trait Updatable {
    fn update(&mut self, ctx: &mut FrameContext<'_>);
}

pub trait Destroyable {
    fn destroy(&mut self, ctx: &mut FrameContext<'_>);
}

/// A registry entry and the capabilities it supports.
pub trait GameObject {
    fn name(&self) -> &str;

    fn as_startable(&mut self) -> Option<&mut dyn Startable> {
        None
    }

    fn as_updatable(&mut self) -> Option<&mut dyn Updatable> {
        None
    }

    fn as_destroyable(&mut self) -> Option<&mut dyn Destroyable> {
        None
    }
}

/// Objects owned by the application loop.
///
/// Inserting starts an object, [`update`](Self::update) runs every updatable
/// object in insertion order, and removal destroys it.
#[derive(Default)]
pub struct ObjectRegistry {
    objects: SlotMap<ObjectKey, Box<dyn GameObject>>,
    order: Vec<ObjectKey>,
}

impl ObjectRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, mut object: Box<dyn GameObject>, ctx: &mut FrameContext<'_>) -> ObjectKey {
        if let Some(startable) = object.as_startable() {
            startable.start(ctx);
        }
        log::debug!("Game object '{}' started", object.name());
        let key = self.objects.insert(object);
        self.order.push(key);
        key
    }

    pub fn update(&mut self, ctx: &mut FrameContext<'_>) {
        for key in &self.order {
            if let Some(updatable) = self.objects.get_mut(*key).and_then(|o| o.as_updatable()) {
                updatable.update(ctx);
            }
        }
    }

    /// Destroys and drops the object. Returns `false` for unknown keys.
    pub fn remove(&mut self, key: ObjectKey, ctx: &mut FrameContext<'_>) -> bool {
        let Some(mut object) = self.objects.remove(key) else {
            return false;
        };
        self.order.retain(|k| *k != key);
        Self::destroy(object.as_mut(), ctx);
        true
    }

    /// Destroys every object, newest first.
    pub fn clear(&mut self, ctx: &mut FrameContext<'_>) {
        for key in self.order.drain(..).rev() {
            if let Some(mut object) = self.objects.remove(key) {
                Self::destroy(object.as_mut(), ctx);
            }
        }
    }

    fn destroy(object: &mut dyn GameObject, ctx: &mut FrameContext<'_>) {
        if let Some(destroyable) = object.as_destroyable() {
            destroyable.destroy(ctx);
        }
        log::debug!("Game object '{}' destroyed", object.name());
    }

    #[must_use]
    pub fn get(&self, key: ObjectKey) -> Option<&dyn GameObject> {
        self.objects.get(key).map(|object| &**object)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
