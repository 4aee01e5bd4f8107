//! Application Loop
//!
//! [`Application`] owns everything a frame touches: the frame [`Timer`], the
//! gameplay [`ObjectRegistry`] and the [`AnimationSystem`]. Nothing is global;
//! objects reach the animation system only through the [`FrameContext`] they
//! are handed.
//!
//! # Frame order
//!
//! 1. Gameplay objects update (and may write animator signals)
//! 2. Every animator ticks: sample, blend, transforms, joint matrices
//!
//! After [`Application::frame`] returns, world transforms and joint palettes
//! are stable and may be read by a renderer until the next frame.
//!
//! # Example
//!
//! ```rust,ignore
//! use marionette::prelude::*;
//!
//! let mut app = Application::new();
//! let key = app.animation.add(animator);
//! loop {
//!     app.run_frame();
//!     let palette = app.animation.get(key).unwrap().scene().joint_palette();
//!     // ... upload palette.as_bytes() ...
//! }
//! ```

pub mod lifecycle;

pub use lifecycle::{Destroyable, GameObject, ObjectKey, ObjectRegistry, Startable, Updatable};

use marionette_animation::AnimationSystem;

use crate::utils::time::Timer;

/// Per-frame timing information.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameState {
    /// Total simulated time (in seconds).
    pub time: f32,
    /// Delta time of this frame (in seconds).
    pub dt: f32,
    pub frame_count: u64,
}

/// What lifecycle hooks receive.
pub struct FrameContext<'a> {
    pub frame: FrameState,
    pub animation: &'a mut AnimationSystem,
}

#[derive(Default)]
pub struct Application {
    pub animation: AnimationSystem,
    pub objects: ObjectRegistry,
    pub timer: Timer,

    frame: FrameState,
}

impl Application {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers and starts a gameplay object.
    pub fn add_object(&mut self, object: Box<dyn GameObject>) -> ObjectKey {
        let mut ctx = FrameContext {
            frame: self.frame,
            animation: &mut self.animation,
        };
        self.objects.insert(object, &mut ctx)
    }

    /// Destroys a gameplay object. Returns `false` for unknown keys.
    pub fn remove_object(&mut self, key: ObjectKey) -> bool {
        let mut ctx = FrameContext {
            frame: self.frame,
            animation: &mut self.animation,
        };
        self.objects.remove(key, &mut ctx)
    }

    /// Runs one frame of `dt` seconds.
    pub fn frame(&mut self, dt: f32) -> FrameState {
        self.frame = FrameState {
            time: self.frame.time + dt,
            dt,
            frame_count: self.frame.frame_count + 1,
        };

        let mut ctx = FrameContext {
            frame: self.frame,
            animation: &mut self.animation,
        };
        self.objects.update(&mut ctx);
        self.animation.tick(dt);

        self.frame
    }

    /// Runs one frame timed by the wall clock.
    pub fn run_frame(&mut self) -> FrameState {
        let dt = self.timer.tick();
        self.frame(dt)
    }

    /// Destroys all objects and drops all animators.
    pub fn shutdown(&mut self) {
        let mut ctx = FrameContext {
            frame: self.frame,
            animation: &mut self.animation,
        };
        self.objects.clear(&mut ctx);
        self.animation.clear();
        log::info!("Application shut down after {} frames", self.frame.frame_count);
    }

    #[inline]
    #[must_use]
    pub fn frame_state(&self) -> FrameState {
        self.frame
    }
}
