//! Animation Settings
//!
//! Engine-wide knobs for the animation core.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use marionette_core::AnimationSettings;
//!
//! // Defaults: 100 joints, strict configuration in debug builds only
//! let settings = AnimationSettings::default();
//!
//! // Lenient configuration even in debug builds
//! let settings = AnimationSettings {
//!     strict_configuration: false,
//!     ..Default::default()
//! };
//! ```

use serde::Deserialize;

use crate::Result;

/// Maximum number of joint matrices a single skin may upload.
///
/// Matches the fixed-size `jointMatrices[100]` uniform array of the skinning
/// vertex shader.
pub const MAX_JOINTS: usize = 100;

/// Configuration shared by scenes and animators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Upper bound on joints per skin. Skins exceeding it are rejected at load.
    pub max_joints: usize,

    /// When `true`, configuration calls that reference unknown state or clip
    /// names return [`MarionetteError::InvalidConfiguration`](crate::MarionetteError::InvalidConfiguration).
    /// When `false`, they are logged and ignored.
    ///
    /// Defaults to `cfg!(debug_assertions)`.
    pub strict_configuration: bool,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            max_joints: MAX_JOINTS,
            strict_configuration: cfg!(debug_assertions),
        }
    }
}

impl AnimationSettings {
    /// Parses settings from JSON. Missing fields fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        log::debug!(
            "Animation settings loaded: max_joints={}, strict_configuration={}",
            settings.max_joints,
            settings.strict_configuration
        );
        Ok(settings)
    }

    /// Settings with lenient configuration, as used by release builds.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            strict_configuration: false,
            ..Self::default()
        }
    }

    /// Settings with strict configuration, as used by debug builds.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            strict_configuration: true,
            ..Self::default()
        }
    }
}
