//! Error types for SDFormat model handling.

use thiserror::Error;

/// Errors that can occur when resolving frames or validating an SDFormat model.
#[derive(Debug, Error)]
pub enum SdfError {
    /// Reference to a frame that does not exist.
    #[error("reference to undefined frame: {frame} in {context}")]
    UndefinedFrame {
        /// The frame name that was referenced.
        frame: String,
        /// The element that referenced it.
        context: String,
    },

    /// Chain of `relative_to` references loops back on itself.
    #[error("frame cycle detected: {0}")]
    FrameCycle(String),

    /// Two frames (links, joints or explicit frames) share a name.
    #[error("duplicate frame name: {0}")]
    DuplicateFrame(String),

    /// Duplicate link name.
    #[error("duplicate link name: {0}")]
    DuplicateLink(String),

    /// Duplicate joint name.
    #[error("duplicate joint name: {0}")]
    DuplicateJoint(String),

    /// Reference to undefined link.
    #[error("reference to undefined link: {link_name} in joint {joint_name}")]
    UndefinedLink {
        /// The link name that was referenced.
        link_name: String,
        /// The joint that referenced it.
        joint_name: String,
    },

    /// Kinematic loop detected.
    #[error("kinematic loop detected: {0}")]
    KinematicLoop(String),

    /// No root link found.
    #[error("no root link found in model {0}")]
    NoRootLink(String),
}

impl SdfError {
    /// Create an undefined frame error.
    pub fn undefined_frame(frame: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UndefinedFrame {
            frame: frame.into(),
            context: context.into(),
        }
    }

    /// Create an undefined link error.
    pub fn undefined_link(link_name: impl Into<String>, joint_name: impl Into<String>) -> Self {
        Self::UndefinedLink {
            link_name: link_name.into(),
            joint_name: joint_name.into(),
        }
    }

    /// Whether this error comes from frame resolution rather than tree structure.
    #[must_use]
    pub fn is_frame_error(&self) -> bool {
        matches!(
            self,
            Self::UndefinedFrame { .. } | Self::FrameCycle(_) | Self::DuplicateFrame(_)
        )
    }
}

/// Result type for SDFormat operations.
pub type Result<T> = std::result::Result<T, SdfError>;
