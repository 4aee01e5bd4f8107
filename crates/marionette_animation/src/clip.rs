use glam::{Quat, Vec3};

use marionette_core::{MarionetteError, Result};

use crate::binding::{Channel, TrackValue};
use crate::tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack};

/// Keyframe data of one sampler, typed by the property kind it animates.
#[derive(Debug, Clone)]
pub enum Sampler {
    Vector3(KeyframeTrack<Vec3>),
    Quaternion(KeyframeTrack<Quat>),
}

impl Sampler {
    #[must_use]
    pub fn end_time(&self) -> f32 {
        match self {
            Self::Vector3(track) => track.end_time(),
            Self::Quaternion(track) => track.end_time(),
        }
    }

    #[must_use]
    pub fn interpolation(&self) -> InterpolationMode {
        match self {
            Self::Vector3(track) => track.interpolation(),
            Self::Quaternion(track) => track.interpolation(),
        }
    }

    #[must_use]
    pub fn is_quaternion(&self) -> bool {
        matches!(self, Self::Quaternion(_))
    }

    pub fn sample_with_cursor(&self, time: f32, cursor: &mut KeyframeCursor) -> TrackValue {
        match self {
            Self::Vector3(track) => TrackValue::Vector3(track.sample_with_cursor(time, cursor)),
            Self::Quaternion(track) => TrackValue::Quaternion(track.sample_with_cursor(time, cursor)),
        }
    }
}

/// A named, immutable animation: samplers plus the channels binding them to
/// nodes. Shared between animation states through `Arc`.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    /// Maximum end time over all samplers.
    pub duration: f32,
    samplers: Vec<Sampler>,
    channels: Vec<Channel>,
}

impl AnimationClip {
    /// Builds a clip, checking that every channel references an existing
    /// sampler of the right kind (quaternion for rotation, `Vec3` otherwise).
    ///
    /// Node indices are checked against a scene by
    /// [`AnimatedModel::new`](crate::AnimatedModel::new).
    pub fn new(name: &str, samplers: Vec<Sampler>, channels: Vec<Channel>) -> Result<Self> {
        for (i, channel) in channels.iter().enumerate() {
            let Some(sampler) = samplers.get(channel.sampler) else {
                return Err(MarionetteError::MalformedAnimationData(format!(
                    "clip '{name}': channel {i} references sampler {} of {}",
                    channel.sampler,
                    samplers.len()
                )));
            };
            if sampler.is_quaternion() != channel.target.is_rotation() {
                return Err(MarionetteError::MalformedAnimationData(format!(
                    "clip '{name}': channel {i} targets {:?} with a mismatched sampler",
                    channel.target
                )));
            }
        }

        let duration = samplers.iter().map(Sampler::end_time).fold(0.0_f32, f32::max);

        Ok(Self {
            name: name.to_string(),
            duration,
            samplers,
            channels,
        })
    }

    #[inline]
    #[must_use]
    pub fn samplers(&self) -> &[Sampler] {
        &self.samplers
    }

    #[inline]
    #[must_use]
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }
}
