use glam::{Affine3A, Mat4, Quat, Vec3};

/// The TRS attributes a local matrix was last built from.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TrsSnapshot {
    position: Vec3,
    rotation: Quat,
    scale: Vec3,
}

/// Local TRS attributes of a node plus its cached local and world matrices.
///
/// The animator writes `position`, `rotation` and `scale` directly; the
/// transform system turns them into matrices once per frame, skipping nodes
/// whose attributes did not move.
#[derive(Debug, Clone)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,

    pub(crate) local_matrix: Affine3A,
    pub(crate) world_matrix: Affine3A,

    // `None` forces a rebuild
    built_from: Option<TrsSnapshot>,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self::from_trs(None, None, None)
    }

    /// Builds a transform from optional TRS components; missing components
    /// are identity.
    #[must_use]
    pub fn from_trs(translation: Option<Vec3>, rotation: Option<Quat>, scale: Option<Vec3>) -> Self {
        Self {
            position: translation.unwrap_or(Vec3::ZERO),
            rotation: rotation.unwrap_or(Quat::IDENTITY),
            scale: scale.unwrap_or(Vec3::ONE),
            local_matrix: Affine3A::IDENTITY,
            world_matrix: Affine3A::IDENTITY,
            built_from: None,
        }
    }

    fn snapshot(&self) -> TrsSnapshot {
        TrsSnapshot {
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
        }
    }

    /// Recomputes `local = T * R * S` if any attribute changed since the last
    /// rebuild. Returns whether the matrix was rebuilt.
    pub fn update_local_matrix(&mut self) -> bool {
        let current = self.snapshot();
        if self.built_from == Some(current) {
            return false;
        }

        self.local_matrix =
            Affine3A::from_scale_rotation_translation(current.scale, current.rotation, current.position);
        self.built_from = Some(current);
        true
    }

    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> &Affine3A {
        &self.local_matrix
    }

    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.world_matrix
    }

    /// World matrix in the layout the renderer uploads.
    #[inline]
    #[must_use]
    pub fn world_matrix_as_mat4(&self) -> Mat4 {
        Mat4::from(self.world_matrix)
    }

    pub fn set_world_matrix(&mut self, mat: Affine3A) {
        self.world_matrix = mat;
    }

    /// Sets the local matrix of a node authored as a matrix.
    ///
    /// The matrix is decomposed into position/rotation/scale so animation
    /// channels can overwrite single components later. Shear is lost.
    pub fn apply_local_matrix(&mut self, mat: Affine3A) {
        let (scale, rotation, translation) = mat.to_scale_rotation_translation();
        self.position = translation;
        self.rotation = rotation;
        self.scale = scale;
        self.mark_dirty();
    }

    /// Forces the next [`update_local_matrix`](Self::update_local_matrix) to rebuild.
    pub fn mark_dirty(&mut self) {
        self.built_from = None;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
