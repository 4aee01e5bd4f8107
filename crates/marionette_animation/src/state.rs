use std::sync::Arc;

use slotmap::new_key_type;

use marionette_scene::{NodeIndex, Scene};

use crate::binding::{TargetPath, TrackValue};
use crate::clip::AnimationClip;
use crate::tracks::KeyframeCursor;

new_key_type! {
    /// Key of an [`AnimationState`] inside its animator.
    pub struct StateKey;
}

/// Playback of one clip: its own clock plus one search cursor per channel.
#[derive(Debug, Clone)]
pub struct AnimationState {
    clip: Arc<AnimationClip>,
    name: String,
    duration: f32,

    time: f32,
    pub time_scale: f32,
    pub looping: bool,
    finished: bool,

    pub(crate) cursors: Vec<KeyframeCursor>,
}

impl AnimationState {
    #[must_use]
    pub fn new(name: &str, clip: Arc<AnimationClip>, time_scale: f32, looping: bool) -> Self {
        let channel_count = clip.channels().len();
        Self {
            duration: clip.duration,
            clip,
            name: name.to_string(),
            time: 0.0,
            time_scale,
            looping,
            finished: false,
            cursors: vec![KeyframeCursor::default(); channel_count],
        }
    }

    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[inline]
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Set once a non-looping state reaches the end of its clip.
    #[inline]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Samples every channel at the current time and writes the result into
    /// the target node's translation, rotation or scale.
    pub fn calculate_animation(&mut self, scene: &mut Scene) {
        for index in 0..self.cursors.len() {
            if let Some((node, target, value)) = self.sample_channel(index) {
                value.write(scene, node, target);
            }
        }
    }

    /// Samples one channel at the current time, advancing its cursor.
    pub fn sample_channel(&mut self, index: usize) -> Option<(NodeIndex, TargetPath, TrackValue)> {
        let channel = self.clip.channels().get(index)?;
        let sampler = self.clip.samplers().get(channel.sampler)?;
        let cursor = self.cursors.get_mut(index)?;
        let value = sampler.sample_with_cursor(self.time, cursor);
        Some((channel.node, channel.target, value))
    }

    #[inline]
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.cursors.len()
    }

    /// Advances the clock by `dt * time_scale`.
    ///
    /// Past the end a looping state wraps and a one-shot state clamps to the
    /// duration and finishes. Negative time scales mirror this at 0. Any
    /// backwards move of the clock resets the cursors.
    pub fn update(&mut self, dt: f32) {
        if self.duration <= 0.0 {
            self.time = 0.0;
            return;
        }

        let previous = self.time;
        self.time += dt * self.time_scale;

        if self.time > self.duration {
            if self.looping {
                self.time %= self.duration;
            } else {
                self.time = self.duration;
                self.finished = true;
            }
        } else if self.time < 0.0 {
            if self.looping {
                self.time = self.time.rem_euclid(self.duration);
            } else {
                self.time = 0.0;
                self.finished = true;
            }
        }

        if self.time < previous {
            self.reset_cursors();
        }
    }

    /// Rewinds to time 0 and clears the finished flag.
    pub fn reset(&mut self) {
        self.time = 0.0;
        self.finished = false;
        self.reset_cursors();
    }

    /// Jumps to `time`, wrapped into the clip when looping and clamped
    /// otherwise. Cursors restart from the first keyframe.
    pub fn seek(&mut self, time: f32) {
        self.time = if self.duration <= 0.0 || !time.is_finite() {
            0.0
        } else if self.looping && time > self.duration {
            time.rem_euclid(self.duration)
        } else {
            time.clamp(0.0, self.duration)
        };
        self.reset_cursors();
    }

    fn reset_cursors(&mut self) {
        for cursor in &mut self.cursors {
            cursor.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::Channel;
    use crate::clip::Sampler;
    use crate::tracks::{InterpolationMode, KeyframeTrack};
    use glam::Vec3;

    fn one_second_clip() -> Arc<AnimationClip> {
        let track = KeyframeTrack::new(
            vec![0.0, 0.5, 1.0],
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            InterpolationMode::Linear,
        )
        .unwrap();
        let channel = Channel {
            node: 0,
            target: TargetPath::Translation,
            sampler: 0,
        };
        Arc::new(AnimationClip::new("clip", vec![Sampler::Vector3(track)], vec![channel]).unwrap())
    }

    #[test]
    fn looping_wraps_and_resets_cursors() {
        let mut state = AnimationState::new("s", one_second_clip(), 1.0, true);
        state.update(0.8);
        state.sample_channel(0);
        assert_eq!(state.cursors[0].last_index, 1);

        state.update(0.4);
        assert!((state.time() - 0.2).abs() < 1e-5);
        assert_eq!(state.cursors[0].last_index, 0);
        assert!(!state.is_finished());
    }

    #[test]
    fn one_shot_clamps_and_finishes() {
        let mut state = AnimationState::new("s", one_second_clip(), 2.0, false);
        state.update(0.75);
        assert_eq!(state.time(), 1.0);
        assert!(state.is_finished());

        state.reset();
        assert_eq!(state.time(), 0.0);
        assert!(!state.is_finished());
    }

    #[test]
    fn seek_resets_cursors() {
        let mut state = AnimationState::new("s", one_second_clip(), 1.0, false);
        state.update(0.9);
        state.sample_channel(0);
        state.seek(0.25);

        let (_, _, value) = state.sample_channel(0).unwrap();
        assert_eq!(value, TrackValue::Vector3(Vec3::new(0.5, 0.0, 0.0)));
    }

    #[test]
    fn negative_time_scale_wraps_backwards() {
        let mut state = AnimationState::new("s", one_second_clip(), -1.0, true);
        state.update(0.25);
        assert!((state.time() - 0.75).abs() < 1e-5);
    }
}
