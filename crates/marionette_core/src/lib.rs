//! Foundational types shared by every Marionette crate.
//!
//! - [`MarionetteError`] / [`Result`]: the engine error taxonomy
//! - [`AnimationSettings`]: engine-wide configuration
//! - [`MAX_JOINTS`]: the skinning palette bound

pub mod errors;
pub mod settings;

pub use errors::{MarionetteError, Result};
pub use settings::{AnimationSettings, MAX_JOINTS};
