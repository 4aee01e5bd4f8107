//! Scene graph for the Marionette engine.
//!
//! - [`Node`]: hierarchy links plus a [`Transform`]
//! - [`Transform`]: TRS attributes with cached local/world matrices
//! - [`Scene`]: the flat node array of one model, its evaluation order and skin
//! - [`hierarchy`]: parent derivation and root-first ordering
//! - [`transform_system`]: per-frame local/world matrix update
//! - [`Skin`] / [`JointPalette`]: joint matrices for GPU skinning
//! - [`desc`]: loader-facing scene descriptions

pub mod desc;
pub mod hierarchy;
pub mod node;
pub mod scene;
pub mod skin;
pub mod transform;
pub mod transform_system;

pub use desc::{NodeDesc, SceneDesc, SkinDesc};
pub use node::Node;
pub use scene::Scene;
pub use skin::{JointPalette, Skin, compute_joint_matrices};
pub use transform::Transform;

/// Index of a node in its scene's flat node array.
pub type NodeIndex = usize;
