//! Error Types
//!
//! This module defines the error types used throughout the editor core.
//!
//! # Overview
//!
//! The main error type [`ArmatureError`] covers every failure the core can
//! surface to its caller:
//! - Structural errors in the scene graph (unknown node, broken tree invariant)
//! - Invalid parameters for the animator (time out of range, too few keyframes)
//! - End-of-sequence cursor operations on the keyframe list
//! - Animation file and settings I/O
//!
//! Degenerate geometry (an arcball centre behind the eye) never shows up here:
//! the manipulation controller recovers from it locally.
//!
//! # Usage
//!
//! All fallible public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, ArmatureError>`.
//!
//! ```rust,ignore
//! use armature::errors::{ArmatureError, Result};
//!
//! fn jump(animator: &Animator, graph: &mut SceneGraph) -> Result<()> {
//!     animator.animate(graph, 1.5)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the editor core.
#[derive(Error, Debug)]
pub enum ArmatureError {
    // ========================================================================
    // Scene Graph Errors
    // ========================================================================
    /// The node is not part of the graph, or is not reachable from the
    /// requested root.
    #[error("Scene node not found or unreachable from the given root")]
    NodeNotFound,

    /// The requested edit would turn the tree into something else
    /// (second parent, cycle, children under a shape).
    #[error("Scene hierarchy violation: {0}")]
    HierarchyViolation(String),

    /// A rigid transform was requested from a root or shape node.
    #[error("Node does not carry a rigid transform")]
    NotATransformNode,

    // ========================================================================
    // Animation Errors
    // ========================================================================
    /// `animate` was called with a time outside `[0, max]`.
    #[error("Invalid animation time {t}: must be in the range [0, {max}]")]
    InvalidAnimationTime {
        /// Requested time
        t: f32,
        /// Largest valid time (keyframe count - 3)
        max: f32,
    },

    /// Catmull-Rom playback needs at least four keyframes.
    #[error("Cannot play animation with {found} keyframes (at least 4 required)")]
    NotEnoughKeyframes {
        /// Keyframes currently in the sequence
        found: usize,
    },

    /// An animation file was written for a different scene graph.
    #[error("Animation has {found} transforms per frame but the scene tracks {expected} nodes")]
    NodeCountMismatch {
        /// Tracked transform nodes in the attached graph
        expected: usize,
        /// Transforms per frame declared by the file
        found: usize,
    },

    /// The cursor is at the end of the sequence (usually: the list is empty).
    #[error("Keyframe sequence is empty")]
    EmptySequence,

    /// The cursor does not reference a live keyframe.
    #[error("Keyframe cursor does not reference a keyframe")]
    InvalidCursor,

    // ========================================================================
    // I/O & Format Errors
    // ========================================================================
    /// Malformed animation file.
    #[error("Animation parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number of the offending token
        line: usize,
        /// What went wrong
        message: String,
    },

    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Settings (JSON) error.
    #[error("Settings error: {0}")]
    SettingsError(#[from] serde_json::Error),
}

/// Alias for `Result<T, ArmatureError>`.
pub type Result<T> = std::result::Result<T, ArmatureError>;
