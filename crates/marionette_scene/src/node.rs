use glam::{Affine3A, Quat, Vec3};

use crate::NodeIndex;
use crate::transform::Transform;

/// A scene node: hierarchy links plus the transform the animator drives.
///
/// Nodes live in a flat array owned by [`Scene`](crate::Scene) and are
/// addressed by [`NodeIndex`]. The parent link is derived from the children
/// lists when the scene is assembled and never changes afterwards.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,

    // === Core Hierarchy ===
    pub(crate) parent: Option<NodeIndex>,
    pub(crate) children: Vec<NodeIndex>,

    // === Core Spatial Data ===
    pub transform: Transform,
}

impl Node {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
        }
    }

    #[must_use]
    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.transform.position = translation;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.transform.rotation = rotation;
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.transform.scale = scale;
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = NodeIndex>) -> Self {
        self.children.extend(children);
        self
    }

    /// Returns the parent index, `None` for roots.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    /// Appends a child index. Parent links are resolved when the node list is
    /// handed to [`Scene::new`](crate::Scene::new).
    #[inline]
    pub fn push_child(&mut self, child: NodeIndex) {
        self.children.push(child);
    }

    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> &Affine3A {
        &self.transform.local_matrix
    }

    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.transform.world_matrix
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new("")
    }
}
