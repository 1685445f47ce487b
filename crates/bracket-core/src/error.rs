//! Error types for anchor graph construction and resolution

use thiserror::Error;

use crate::anchor::{AnchorId, SolidId};

/// Error type for anchor graph operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnchorError {
    /// The anchor is already bound to a different target or angle
    #[error("Anchor {anchor} already has a different connection")]
    AlreadyConnected { anchor: String },

    /// A solid already carries a different world transform
    #[error("Solid already holds a different anchor transform")]
    AlreadySet,

    /// Two paths through the graph place the same solid differently
    #[error("Conflicting transforms computed for solid {solid}")]
    ConflictingTransform { solid: String },

    /// A solid was consumed before resolution assigned it a transform
    #[error("Solid {solid} has not been resolved")]
    NotYetResolved { solid: String },

    #[error("Unknown solid handle: {0:?}")]
    UnknownSolid(SolidId),

    #[error("Unknown anchor handle: {0:?}")]
    UnknownAnchor(AnchorId),

    #[error("Solid {solid} has no anchor named {name}")]
    AnchorNotFound { solid: String, name: String },

    #[error("Anchor name {0} is used twice on the same solid")]
    DuplicateAnchor(String),

    #[error("Anchor {0} has a zero-length normal")]
    InvalidNormal(String),

    #[error("Anchor {anchor} cannot be connected at a non-finite angle {angle}")]
    InvalidAngle { anchor: String, angle: f64 },

    #[error("Anchor {0} cannot be connected to itself")]
    SelfConnection(String),

    #[error("Anchor {0} has no connection")]
    NotConnected(String),
}

/// Result type for anchor graph operations
pub type AnchorResult<T> = Result<T, AnchorError>;
