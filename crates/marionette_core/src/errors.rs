//! Error Types
//!
//! This module defines the error types used throughout the engine.
//!
//! # Overview
//!
//! The main error type [`MarionetteError`] covers every failure mode of the
//! animation core:
//! - Malformed keyframe data (mismatched lengths, duplicate keyframe times)
//! - Invalid animator configuration (unknown state names, bad blend durations)
//! - Missing resources (joint matrices requested from a model without a skin)
//! - Broken node hierarchies (cycles, nodes with several parents)
//!
//! Runtime sampling never produces an error: degenerate brackets resolve to a
//! defined fallback value so that a render frame is never interrupted.
//! Everything reported here surfaces at load or configuration time.
//!
//! # Usage
//!
//! All fallible APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, MarionetteError>`.
//!
//! ```rust,ignore
//! use marionette_core::{MarionetteError, Result};
//!
//! fn load_clip() -> Result<()> {
//!     Err(MarionetteError::MalformedAnimationData("empty sampler".into()))
//! }
//! ```

use thiserror::Error;

/// The main error type for the Marionette engine.
#[derive(Error, Debug)]
pub enum MarionetteError {
    // ========================================================================
    // Animation Data Errors
    // ========================================================================
    /// Keyframe data violates its invariants (length mismatch, non-increasing
    /// or duplicate times, wrong value type for the target path).
    #[error("Malformed animation data: {0}")]
    MalformedAnimationData(String),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Animator configuration references something that does not exist or
    /// carries an unusable parameter (e.g. a non-positive blend duration).
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A resource required by the operation is absent.
    #[error("Missing resource: {0}")]
    MissingResource(String),

    // ========================================================================
    // Hierarchy Errors
    // ========================================================================
    /// The node graph contains a cycle; root-first ordering is impossible.
    #[error("Cyclic node hierarchy detected at node {node}")]
    CyclicHierarchy {
        /// A node that participates in the cycle
        node: usize,
    },

    /// A node is claimed as a child by more than one parent, or lists itself.
    #[error("Malformed node hierarchy: {0}")]
    MalformedHierarchy(String),

    /// An index in the asset data points outside of its target array.
    #[error("Index out of bounds: {context} (index: {index}, len: {len})")]
    IndexOutOfBounds {
        /// Description of what was being accessed
        context: String,
        /// The invalid index
        index: usize,
        /// Length of the indexed collection
        len: usize,
    },

    // ========================================================================
    // Format & Parsing Errors
    // ========================================================================
    /// JSON parsing error for asset descriptions and settings.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl MarionetteError {
    /// Helper for building [`MarionetteError::IndexOutOfBounds`].
    pub fn out_of_bounds(context: impl Into<String>, index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds {
            context: context.into(),
            index,
            len,
        }
    }
}

/// Alias for `Result<T, MarionetteError>`.
pub type Result<T> = std::result::Result<T, MarionetteError>;
