//! # Marionette
//!
//! Skeletal animation core for real-time 3D: keyframe clips, crossfading
//! state machines, scene transform propagation and joint matrices ready for
//! GPU skinning.
//!
//! | Crate | Contents |
//! |-------|----------|
//! | [`marionette_core`] | errors, settings |
//! | [`scene`] | nodes, transforms, hierarchy order, skins |
//! | [`animation`] | tracks, clips, states, transitions, animators |
//!
//! The [`app`] module ties them into a frame loop with gameplay objects.
//!
//! ```rust,ignore
//! use marionette::prelude::*;
//!
//! let model = AnimatedModel::from_json(json, &AnimationSettings::default())?;
//! let mut animator = Animator::new(model, AnimationSettings::default());
//! animator.set_default_state("Idle", 1.0, true)?;
//! animator.add_animation_state("Run", 1.0, true)?;
//! animator.add_transition("Idle", "Run", 0.12, |ctx| ctx.signals.flag(Signal::Moving), 0.0)?;
//!
//! animator.signals_mut().set(Signal::Moving, true);
//! animator.tick(1.0 / 60.0);
//! let bytes = animator.scene().joint_palette().as_bytes();
//! ```

pub mod app;
pub mod utils;

pub use marionette_animation as animation;
pub use marionette_scene as scene;

pub use app::{Application, FrameContext, FrameState};
pub use marionette_animation::{AnimatedModel, AnimationClip, AnimationState, AnimationSystem, Animator};
pub use marionette_core::{AnimationSettings, MarionetteError, Result};
pub use marionette_scene::{Node, Scene};
pub use utils::Timer;

pub mod prelude {
    pub use crate::app::{
        Application, Destroyable, FrameContext, FrameState, GameObject, ObjectKey, ObjectRegistry,
        Startable, Updatable,
    };
    pub use crate::utils::Timer;

    pub use marionette_animation::{
        AnimatedModel, AnimationClip, AnimationState, AnimationSystem, Animator, AnimatorKey,
        Channel, InterpolationMode, KeyframeCursor, KeyframeTrack, ModelDesc, Sampler, Signal,
        SignalValue, Signals, TargetPath, Transition, TransitionContext,
    };
    pub use marionette_core::{AnimationSettings, MAX_JOINTS, MarionetteError, Result};
    pub use marionette_scene::{JointPalette, Node, NodeIndex, Scene, SceneDesc, Skin, Transform};

    pub use glam::{Affine3A, Mat4, Quat, Vec3};
}
