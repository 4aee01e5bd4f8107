//! Clip and model descriptions.
//!
//! Decoded keyframe arrays as an asset loader hands them over. Sampler values
//! are flat: three floats per keyframe for `Vec3` samplers, four (`x, y, z, w`)
//! for rotations. The kind is inferred from the value count.

use glam::{Quat, Vec3};
use serde::Deserialize;

use marionette_core::{AnimationSettings, MarionetteError, Result};
use marionette_scene::{NodeIndex, Scene, SceneDesc};

use crate::binding::{Channel, TargetPath};
use crate::clip::{AnimationClip, Sampler};
use crate::model::AnimatedModel;
use crate::tracks::{InterpolationMode, KeyframeTrack};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SamplerDesc {
    pub interpolation: InterpolationMode,
    pub times: Vec<f32>,
    pub values: Vec<f32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelDesc {
    pub node: NodeIndex,
    pub path: TargetPath,
    pub sampler: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClipDesc {
    pub name: String,
    pub samplers: Vec<SamplerDesc>,
    pub channels: Vec<ChannelDesc>,
}

/// A scene plus its clips.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelDesc {
    #[serde(flatten)]
    pub scene: SceneDesc,
    #[serde(default)]
    pub clips: Vec<ClipDesc>,
}

impl SamplerDesc {
    pub fn to_sampler(&self) -> Result<Sampler> {
        let keys = self.times.len();
        if keys > 0 && self.values.len() == keys * 4 {
            let values = self
                .values
                .chunks_exact(4)
                .map(|c| Quat::from_xyzw(c[0], c[1], c[2], c[3]))
                .collect();
            return Ok(Sampler::Quaternion(KeyframeTrack::rotation(
                self.times.clone(),
                values,
                self.interpolation,
            )?));
        }
        if keys > 0 && self.values.len() == keys * 3 {
            let values = self
                .values
                .chunks_exact(3)
                .map(|c| Vec3::new(c[0], c[1], c[2]))
                .collect();
            return Ok(Sampler::Vector3(KeyframeTrack::new(
                self.times.clone(),
                values,
                self.interpolation,
            )?));
        }
        Err(MarionetteError::MalformedAnimationData(format!(
            "sampler has {} times and {} values; expected 3 or 4 values per keyframe",
            keys,
            self.values.len()
        )))
    }
}

impl ClipDesc {
    pub fn to_clip(&self) -> Result<AnimationClip> {
        let samplers = self
            .samplers
            .iter()
            .map(SamplerDesc::to_sampler)
            .collect::<Result<Vec<_>>>()
            .map_err(|e| match e {
                MarionetteError::MalformedAnimationData(msg) => {
                    MarionetteError::MalformedAnimationData(format!("clip '{}': {msg}", self.name))
                }
                other => other,
            })?;
        let channels = self
            .channels
            .iter()
            .map(|c| Channel {
                node: c.node,
                target: c.path,
                sampler: c.sampler,
            })
            .collect();
        AnimationClip::new(&self.name, samplers, channels)
    }
}

impl ModelDesc {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds the scene and clips, validating everything.
    pub fn build(&self, settings: &AnimationSettings) -> Result<AnimatedModel> {
        let scene = Scene::from_desc(&self.scene, settings)?;
        let clips = self
            .clips
            .iter()
            .map(ClipDesc::to_clip)
            .collect::<Result<Vec<_>>>()?;
        AnimatedModel::new(scene, clips)
    }
}
