use glam::{Quat, Vec3};
use serde::Deserialize;

use marionette_scene::{NodeIndex, Scene};

use crate::values::Interpolatable;

/// Node property a channel drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetPath {
    Translation, // transform.position
    Rotation,    // transform.rotation
    Scale,       // transform.scale
}

impl TargetPath {
    /// Whether this path takes quaternion samples (otherwise `Vec3`).
    #[inline]
    #[must_use]
    pub fn is_rotation(self) -> bool {
        matches!(self, Self::Rotation)
    }
}

/// Binds one sampler of a clip to one property of one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Channel {
    pub node: NodeIndex,
    pub target: TargetPath,
    pub sampler: usize,
}

/// A sampled channel value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackValue {
    Vector3(Vec3),
    Quaternion(Quat),
}

impl TrackValue {
    /// Reads the property `target` of `node` in `scene`.
    #[must_use]
    pub fn read(scene: &Scene, node: NodeIndex, target: TargetPath) -> Option<Self> {
        let transform = &scene.node(node)?.transform;
        Some(match target {
            TargetPath::Translation => Self::Vector3(transform.position),
            TargetPath::Rotation => Self::Quaternion(transform.rotation),
            TargetPath::Scale => Self::Vector3(transform.scale),
        })
    }

    /// Blends `self` towards `other` by `t`. Mismatched kinds keep `self`.
    #[must_use]
    pub fn blend(self, other: Self, t: f32) -> Self {
        match (self, other) {
            (Self::Vector3(a), Self::Vector3(b)) => Self::Vector3(Vec3::interpolate_linear(a, b, t)),
            (Self::Quaternion(a), Self::Quaternion(b)) => {
                Self::Quaternion(Quat::interpolate_linear(a, b, t))
            }
            _ => self,
        }
    }

    /// Writes the value into the property `target` of `node` and marks the
    /// transform dirty. Unknown nodes and kind mismatches are ignored.
    pub fn write(self, scene: &mut Scene, node: NodeIndex, target: TargetPath) {
        let Some(node) = scene.node_mut(node) else {
            return;
        };
        let transform = &mut node.transform;
        match (self, target) {
            (Self::Vector3(v), TargetPath::Translation) => transform.position = v,
            (Self::Vector3(v), TargetPath::Scale) => transform.scale = v,
            (Self::Quaternion(q), TargetPath::Rotation) => transform.rotation = q,
            _ => return,
        }
        transform.mark_dirty();
    }
}
