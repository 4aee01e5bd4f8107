use std::fmt;

use marionette_core::{MarionetteError, Result};
use marionette_scene::Scene;

use crate::binding::{TargetPath, TrackValue};
use crate::signals::Signals;
use crate::state::{AnimationState, StateKey};

/// What a transition predicate can see: the playing state and the signals.
#[derive(Debug, Clone, Copy)]
pub struct TransitionContext<'a> {
    pub state: &'a AnimationState,
    pub signals: &'a Signals,
}

pub type TransitionPredicate = Box<dyn Fn(&TransitionContext<'_>) -> bool>;

/// A timed crossfade from one state to another, triggered by a predicate.
///
/// Registered once and reused: progress returns to 0 after every completed
/// blend.
pub struct Transition {
    start_name: String,
    end_name: String,
    start: StateKey,
    end: StateKey,

    duration: f32,
    inv_duration: f32,
    offset: f32,
    predicate: TransitionPredicate,

    progress: f32,
}

impl Transition {
    pub(crate) fn new(
        (start_name, start): (&str, StateKey),
        (end_name, end): (&str, StateKey),
        duration: f32,
        offset: f32,
        predicate: TransitionPredicate,
    ) -> Result<Self> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(MarionetteError::InvalidConfiguration(format!(
                "transition '{start_name}' -> '{end_name}' needs a positive blend duration, got {duration}"
            )));
        }
        Ok(Self {
            start_name: start_name.to_string(),
            end_name: end_name.to_string(),
            start,
            end,
            duration,
            inv_duration: duration.recip(),
            offset: offset.max(0.0),
            predicate,
            progress: 0.0,
        })
    }

    #[inline]
    #[must_use]
    pub fn start_name(&self) -> &str {
        &self.start_name
    }

    #[inline]
    #[must_use]
    pub fn end_name(&self) -> &str {
        &self.end_name
    }

    #[inline]
    #[must_use]
    pub fn start(&self) -> StateKey {
        self.start
    }

    #[inline]
    #[must_use]
    pub fn end(&self) -> StateKey {
        self.end
    }

    #[inline]
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Time the destination starts from when the transition fires.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    #[inline]
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    #[must_use]
    pub fn should_trigger(&self, context: &TransitionContext<'_>) -> bool {
        (self.predicate)(context)
    }

    /// Blends `destination` over the node attributes already written by the
    /// source state, then advances progress and the destination clock.
    ///
    /// Translation lerps and rotation slerps by the current progress; scale
    /// takes the destination sample as is.
    ///
    /// Returns `true` while `progress < 1.0` after advancing. A blend whose
    /// progress lands exactly on 1.0 is complete, so a 0.2 s blend ticked at
    /// 0.1 s finishes on the second tick.
    pub fn apply(&mut self, dt: f32, destination: &mut AnimationState, scene: &mut Scene) -> bool {
        let weight = self.progress.clamp(0.0, 1.0);

        for index in 0..destination.channel_count() {
            let Some((node, target, sample)) = destination.sample_channel(index) else {
                continue;
            };
            let value = match target {
                TargetPath::Scale => sample,
                TargetPath::Translation | TargetPath::Rotation => {
                    match TrackValue::read(scene, node, target) {
                        Some(current) => current.blend(sample, weight),
                        None => continue,
                    }
                }
            };
            value.write(scene, node, target);
        }

        self.progress += dt * self.inv_duration;
        destination.update(dt);

        self.progress < 1.0
    }

    /// Returns progress to 0 for the next activation.
    pub fn reset(&mut self) {
        self.progress = 0.0;
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("start", &self.start_name)
            .field("end", &self.end_name)
            .field("duration", &self.duration)
            .field("offset", &self.offset)
            .field("progress", &self.progress)
            .finish_non_exhaustive()
    }
}
