use glam::{Affine3A, Mat4};

use marionette_core::{AnimationSettings, MarionetteError, Result};

use crate::NodeIndex;
use crate::desc::SceneDesc;
use crate::hierarchy;
use crate::node::Node;
use crate::skin::{JointPalette, Skin};
use crate::transform_system;

/// Node hierarchy of one model instance.
///
/// The node array is fixed after construction: parent links and the
/// root-first evaluation order are computed once here, and every frame only
/// rewrites transforms. The animator is the sole writer; renderers read world
/// transforms and the joint palette after [`update_transforms`](Self::update_transforms).
#[derive(Debug, Clone)]
pub struct Scene {
    nodes: Vec<Node>,
    order: Vec<NodeIndex>,
    roots: Vec<NodeIndex>,

    skin: Option<Skin>,
    joint_palette: JointPalette,
}

impl Scene {
    /// Assembles a scene from nodes whose `children` lists are filled in.
    ///
    /// Parent links are derived from the children lists; cyclic or
    /// multiply-parented hierarchies are rejected. Local and world matrices
    /// are computed once so the scene is immediately readable.
    pub fn new(mut nodes: Vec<Node>, skin: Option<Skin>, settings: &AnimationSettings) -> Result<Self> {
        let children: Vec<&[NodeIndex]> = nodes.iter().map(|n| n.children.as_slice()).collect();
        let parents = hierarchy::compute_parents(&children)?;
        let order = hierarchy::compute_order(&parents)?;

        for (node, parent) in nodes.iter_mut().zip(&parents) {
            node.parent = *parent;
        }
        let roots = parents
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.is_none().then_some(i))
            .collect();

        if let Some(skin) = &skin {
            skin.validate(nodes.len(), settings.max_joints)?;
        }

        let mut scene = Self {
            nodes,
            order,
            roots,
            skin,
            joint_palette: JointPalette::new(settings.max_joints),
        };
        scene.update_transforms();

        log::debug!(
            "Scene assembled: {} nodes, {} roots, skin: {}",
            scene.nodes.len(),
            scene.roots.len(),
            scene.skin.as_ref().map_or("none", |s| s.name.as_str())
        );

        Ok(scene)
    }

    /// Builds a scene from a loader description.
    pub fn from_desc(desc: &SceneDesc, settings: &AnimationSettings) -> Result<Self> {
        let nodes = desc
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| node.to_node(i))
            .collect();
        let skin = desc.skin.as_ref().map(|s| s.to_skin()).transpose()?;
        Self::new(nodes, skin, settings)
    }

    /// Builds a scene from a JSON [`SceneDesc`].
    pub fn from_json(json: &str, settings: &AnimationSettings) -> Result<Self> {
        let desc: SceneDesc = serde_json::from_str(json)?;
        Self::from_desc(&desc, settings)
    }

    // ========================================================================
    // Per-frame pipeline
    // ========================================================================

    /// Recomputes local transforms, propagates world transforms in root-first
    /// order, then refreshes the joint palette. Stages run strictly in that
    /// order because each reads the previous one's output.
    pub fn update_transforms(&mut self) {
        transform_system::update_transforms(&mut self.nodes, &self.order);
        self.joint_palette.update(self.skin.as_ref(), &self.nodes);
    }

    // ========================================================================
    // Node access
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[inline]
    #[must_use]
    pub fn node(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Mutable node access for writing TRS attributes.
    #[inline]
    pub fn node_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        self.nodes.get_mut(index)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Finds the first node with the given name.
    #[must_use]
    pub fn find_node(&self, name: &str) -> Option<NodeIndex> {
        self.nodes.iter().position(|n| n.name == name)
    }

    /// Root-first evaluation order.
    #[inline]
    #[must_use]
    pub fn order(&self) -> &[NodeIndex] {
        &self.order
    }

    #[inline]
    #[must_use]
    pub fn roots(&self) -> &[NodeIndex] {
        &self.roots
    }

    /// World transform of a node as of the last update.
    #[inline]
    #[must_use]
    pub fn world_transform(&self, index: NodeIndex) -> Option<&Affine3A> {
        self.nodes.get(index).map(Node::world_matrix)
    }

    /// World transform as `Mat4`, ready for upload.
    #[inline]
    #[must_use]
    pub fn world_matrix(&self, index: NodeIndex) -> Option<Mat4> {
        self.nodes
            .get(index)
            .map(|n| n.transform.world_matrix_as_mat4())
    }

    // ========================================================================
    // Skinning
    // ========================================================================

    /// The scene's skin, or [`MarionetteError::MissingResource`].
    pub fn skin(&self) -> Result<&Skin> {
        self.skin
            .as_ref()
            .ok_or_else(|| MarionetteError::MissingResource("scene has no skin".to_string()))
    }

    #[inline]
    #[must_use]
    pub fn has_skin(&self) -> bool {
        self.skin.is_some()
    }

    /// Joint matrices from the last update. Empty without a skin.
    #[inline]
    #[must_use]
    pub fn joint_palette(&self) -> &JointPalette {
        &self.joint_palette
    }

    /// Joint matrices, failing with [`MarionetteError::MissingResource`] when
    /// the scene has no skin.
    pub fn joint_matrices(&self) -> Result<&[Mat4]> {
        self.skin()?;
        Ok(self.joint_palette.as_slice())
    }
}
