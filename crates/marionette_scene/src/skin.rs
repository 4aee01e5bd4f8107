use glam::Mat4;

use marionette_core::{MarionetteError, Result};

use crate::NodeIndex;
use crate::node::Node;

/// Binding of a mesh to a skeleton.
///
/// `joints[i]` corresponds to `jointMatrices[i]` in the skinning shader.
#[derive(Debug, Clone)]
pub struct Skin {
    pub name: String,

    // Ordered joint node indices
    joints: Vec<NodeIndex>,

    // Static after load: transforms vertices from mesh space into joint space
    inverse_bind_matrices: Vec<Mat4>,
}

impl Skin {
    /// Creates a skin. Joint and inverse bind matrix counts must match.
    pub fn new(name: &str, joints: Vec<NodeIndex>, inverse_bind_matrices: Vec<Mat4>) -> Result<Self> {
        if joints.len() != inverse_bind_matrices.len() {
            return Err(MarionetteError::MalformedAnimationData(format!(
                "skin '{name}' has {} joints but {} inverse bind matrices",
                joints.len(),
                inverse_bind_matrices.len()
            )));
        }

        Ok(Self {
            name: name.to_string(),
            joints,
            inverse_bind_matrices,
        })
    }

    #[inline]
    #[must_use]
    pub fn joints(&self) -> &[NodeIndex] {
        &self.joints
    }

    #[inline]
    #[must_use]
    pub fn inverse_bind_matrices(&self) -> &[Mat4] {
        &self.inverse_bind_matrices
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Checks joint indices against the node count and the palette bound.
    pub(crate) fn validate(&self, node_count: usize, max_joints: usize) -> Result<()> {
        if self.joints.len() > max_joints {
            return Err(MarionetteError::InvalidConfiguration(format!(
                "skin '{}' has {} joints, the palette holds at most {max_joints}",
                self.name,
                self.joints.len()
            )));
        }
        if let Some(&joint) = self.joints.iter().find(|&&joint| joint >= node_count) {
            return Err(MarionetteError::out_of_bounds(
                format!("joint of skin '{}'", self.name),
                joint,
                node_count,
            ));
        }
        Ok(())
    }

    /// Joint matrix for slot `i`: `world[joint] * inverse_bind`.
    fn joint_matrix(&self, i: usize, nodes: &[Node]) -> Mat4 {
        let world = nodes
            .get(self.joints[i])
            .map_or(Mat4::IDENTITY, |node| node.transform.world_matrix_as_mat4());
        world * self.inverse_bind_matrices[i]
    }
}

/// Derives joint matrices for `skin` from the current world transforms.
///
/// Returns an empty vector when there is no skin.
#[must_use]
pub fn compute_joint_matrices(skin: Option<&Skin>, nodes: &[Node]) -> Vec<Mat4> {
    let Some(skin) = skin else {
        return Vec::new();
    };
    (0..skin.len()).map(|i| skin.joint_matrix(i, nodes)).collect()
}

/// Bounded joint matrix array handed to the renderer each frame.
///
/// Updated in place, so the per-frame path never allocates.
#[derive(Debug, Clone, Default)]
pub struct JointPalette {
    matrices: Vec<Mat4>,
    capacity: usize,
}

impl JointPalette {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            matrices: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Recomputes the palette. Joints beyond the capacity are dropped; scenes
    /// reject such skins at load, so this only guards hand-built palettes.
    pub fn update(&mut self, skin: Option<&Skin>, nodes: &[Node]) {
        self.matrices.clear();
        let Some(skin) = skin else {
            return;
        };
        let count = skin.len().min(self.capacity);
        self.matrices
            .extend((0..count).map(|i| skin.joint_matrix(i, nodes)));
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Mat4] {
        &self.matrices
    }

    /// Raw bytes for a uniform/storage buffer upload.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.matrices)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
