//! Scene descriptions.
//!
//! Plain, already-decoded data handed over by the asset loader. The core is
//! agnostic to the source format: anything that can fill these structs
//! (a glTF importer, a test fixture, a JSON file) can build a [`Scene`].
//!
//! Conventions follow glTF: quaternions are `[x, y, z, w]`, matrices are
//! column-major `[f32; 16]`.
//!
//! [`Scene`]: crate::Scene

use glam::{Affine3A, Mat4, Quat, Vec3};
use serde::Deserialize;

use marionette_core::Result;

use crate::NodeIndex;
use crate::node::Node;
use crate::skin::Skin;
use crate::transform::Transform;

/// One node of the flat node list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NodeDesc {
    pub name: Option<String>,
    pub children: Vec<NodeIndex>,
    pub translation: Option<[f32; 3]>,
    pub rotation: Option<[f32; 4]>,
    pub scale: Option<[f32; 3]>,
    /// Local matrix for nodes authored without TRS. Ignored when any TRS
    /// component is present.
    pub matrix: Option<[f32; 16]>,
}

/// Joint list plus inverse bind matrices.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SkinDesc {
    pub name: Option<String>,
    pub joints: Vec<NodeIndex>,
    /// Missing matrices default to identity, as in glTF.
    pub inverse_bind_matrices: Option<Vec<[f32; 16]>>,
}

/// Node list and optional skin of one model.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SceneDesc {
    pub nodes: Vec<NodeDesc>,
    pub skin: Option<SkinDesc>,
}

impl NodeDesc {
    pub(crate) fn to_node(&self, index: NodeIndex) -> Node {
        let name = self
            .name
            .clone()
            .unwrap_or_else(|| format!("node_{index}"));

        let has_trs = self.translation.is_some() || self.rotation.is_some() || self.scale.is_some();

        let transform = match self.matrix {
            Some(cols) if !has_trs => {
                let mut transform = Transform::new();
                transform.apply_local_matrix(Affine3A::from_mat4(Mat4::from_cols_array(&cols)));
                transform
            }
            _ => Transform::from_trs(
                self.translation.map(Vec3::from_array),
                self.rotation.map(|r| unit_quat(r, &name)),
                self.scale.map(Vec3::from_array),
            ),
        };

        Node {
            name,
            parent: None,
            children: self.children.clone(),
            transform,
        }
    }
}

impl SkinDesc {
    pub(crate) fn to_skin(&self) -> Result<Skin> {
        let matrices = match &self.inverse_bind_matrices {
            Some(list) => list.iter().map(Mat4::from_cols_array).collect(),
            None => vec![Mat4::IDENTITY; self.joints.len()],
        };
        Skin::new(
            self.name.as_deref().unwrap_or("skin"),
            self.joints.clone(),
            matrices,
        )
    }
}

fn unit_quat(xyzw: [f32; 4], node_name: &str) -> Quat {
    let q = Quat::from_array(xyzw);
    if q.length_squared() > f32::EPSILON {
        q.normalize()
    } else {
        log::warn!("Node '{node_name}' has a zero-length rotation, using identity");
        Quat::IDENTITY
    }
}
