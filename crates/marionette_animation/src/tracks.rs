use glam::Quat;
use serde::Deserialize;

use marionette_core::{MarionetteError, Result};

use crate::values::Interpolatable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InterpolationMode {
    Step,
    #[default]
    Linear,
}

/// Forward-search position of one channel: the left keyframe of the bracket
/// found by the last lookup.
///
/// Valid only while query times are non-decreasing. Whoever moves time
/// backwards (loop wrap, seek, reset) must reset the cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyframeCursor {
    pub last_index: usize,
}

impl KeyframeCursor {
    #[inline]
    pub fn reset(&mut self) {
        self.last_index = 0;
    }
}

/// Keyframe sampler: strictly increasing times and one value per time.
///
/// Time 0 acts as an implicit boundary before the first keyframe; queries
/// in `[0, times[0])` hold the first value.
#[derive(Debug, Clone)]
pub struct KeyframeTrack<T: Interpolatable> {
    times: Vec<f32>,
    values: Vec<T>,
    interpolation: InterpolationMode,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    /// Validates and builds a track.
    ///
    /// Rejects empty tracks, `times`/`values` length mismatches, negative or
    /// non-finite times, and duplicate or decreasing times (which would make
    /// the interpolation fraction divide by zero).
    pub fn new(times: Vec<f32>, values: Vec<T>, interpolation: InterpolationMode) -> Result<Self> {
        if times.is_empty() {
            return Err(MarionetteError::MalformedAnimationData(
                "keyframe track has no keyframes".to_string(),
            ));
        }
        if times.len() != values.len() {
            return Err(MarionetteError::MalformedAnimationData(format!(
                "keyframe track has {} times but {} values",
                times.len(),
                values.len()
            )));
        }
        if let Some(bad) = times.iter().find(|t| !t.is_finite() || **t < 0.0) {
            return Err(MarionetteError::MalformedAnimationData(format!(
                "keyframe time {bad} is negative or not finite"
            )));
        }
        if let Some(i) = times.windows(2).position(|w| w[1] <= w[0]) {
            return Err(MarionetteError::MalformedAnimationData(format!(
                "keyframe times must be strictly increasing (index {}: {} after {})",
                i + 1,
                times[i + 1],
                times[i]
            )));
        }

        Ok(Self {
            times,
            values,
            interpolation,
        })
    }

    #[inline]
    #[must_use]
    pub fn times(&self) -> &[f32] {
        &self.times
    }

    #[inline]
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    #[inline]
    #[must_use]
    pub fn interpolation(&self) -> InterpolationMode {
        self.interpolation
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Time of the last keyframe.
    #[inline]
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Stateless sampling with a fresh cursor.
    #[must_use]
    pub fn sample(&self, time: f32) -> T {
        let mut cursor = KeyframeCursor::default();
        self.sample_with_cursor(time, &mut cursor)
    }

    /// Samples at `time`, scanning forward from `cursor` and updating it.
    ///
    /// Amortised O(1) while `time` is non-decreasing between cursor resets.
    ///
    /// - `time < times[0]`: first value (implicit bracket `[0, times[0])`).
    /// - `time >= last time`: last value, cursor parked on the last keyframe.
    /// - `time` earlier than the cursor's bracket (cursor not reset after a
    ///   wrap or seek): degenerate fallback to the first value, cursor left
    ///   unchanged. This never panics.
    pub fn sample_with_cursor(&self, time: f32, cursor: &mut KeyframeCursor) -> T {
        let len = self.times.len();
        let first = self.values[0];

        if time < self.times[0] {
            return first;
        }

        let mut i = cursor.last_index.min(len - 1);
        while i + 1 < len && time >= self.times[i + 1] {
            i += 1;
        }

        if time < self.times[i] {
            return first;
        }

        cursor.last_index = i;
        self.sample_at_frame(i, time)
    }

    fn sample_at_frame(&self, index: usize, time: f32) -> T {
        let len = self.times.len();

        // No next frame: hold the last value.
        if index + 1 >= len {
            return self.values[len - 1];
        }

        match self.interpolation {
            InterpolationMode::Step => self.values[index],
            InterpolationMode::Linear => {
                let t0 = self.times[index];
                let t1 = self.times[index + 1];
                // t1 > t0 is guaranteed by construction
                let t = ((time - t0) / (t1 - t0)).clamp(0.0, 1.0);
                T::interpolate_linear(self.values[index], self.values[index + 1], t)
            }
        }
    }
}

impl KeyframeTrack<Quat> {
    /// Builds a rotation track, normalising every keyframe.
    ///
    /// Zero-length quaternions are rejected.
    pub fn rotation(times: Vec<f32>, values: Vec<Quat>, interpolation: InterpolationMode) -> Result<Self> {
        let values = values
            .into_iter()
            .enumerate()
            .map(|(i, q)| {
                if q.is_finite() && q.length_squared() > f32::EPSILON {
                    Ok(q.normalize())
                } else {
                    Err(MarionetteError::MalformedAnimationData(format!(
                        "rotation keyframe {i} is not a valid quaternion"
                    )))
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(times, values, interpolation)
    }
}
