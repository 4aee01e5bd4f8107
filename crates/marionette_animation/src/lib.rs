//! Skeletal animation for the Marionette engine.
//!
//! - [`KeyframeTrack`]: validated keyframes with cursor-based sampling
//! - [`AnimationClip`]: samplers plus the channels binding them to nodes
//! - [`AnimationState`]: one clip's playback clock
//! - [`Transition`]: predicate-triggered crossfade between states
//! - [`Animator`]: the state machine writing one model's nodes each tick
//! - [`AnimationSystem`]: owner of all animators of an application

pub mod animator;
pub mod binding;
pub mod clip;
pub mod desc;
pub mod model;
pub mod signals;
pub mod state;
pub mod system;
pub mod tracks;
pub mod transition;
mod values;

pub use animator::Animator;
pub use binding::{Channel, TargetPath, TrackValue};
pub use clip::{AnimationClip, Sampler};
pub use desc::{ChannelDesc, ClipDesc, ModelDesc, SamplerDesc};
pub use model::AnimatedModel;
pub use signals::{Signal, SignalValue, Signals};
pub use state::{AnimationState, StateKey};
pub use system::{AnimationSystem, AnimatorKey};
pub use tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack};
pub use transition::{Transition, TransitionContext, TransitionPredicate};
pub use values::Interpolatable;
