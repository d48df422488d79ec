//! Error types for SDFormat ⇄ MJCF conversion.

use sim_mjcf::MjcfError;
use sim_sdf::SdfError;
use thiserror::Error;

/// Errors that can occur while converting between SDFormat and MJCF.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Shape with no counterpart in the destination format (mesh, heightmap,
    /// hfield, sdf) or an unknown type string.
    #[error("unsupported shape: {0}")]
    UnsupportedShape(String),

    /// A semantic pose could not be resolved.
    #[error("pose resolution failed: {0}")]
    PoseResolution(#[source] SdfError),

    /// The source MJCF model is malformed (geom sizes, duplicate names).
    #[error("invalid MJCF model: {0}")]
    Mjcf(#[from] MjcfError),

    /// The source SDFormat model is malformed (duplicate names).
    #[error("invalid SDFormat model: {0}")]
    InvalidModel(#[source] SdfError),

    /// Joint references a link that does not exist.
    #[error("reference to undefined link: {link_name} in joint {joint_name}")]
    UndefinedLink {
        /// The link name that was referenced.
        link_name: String,
        /// The joint that referenced it.
        joint_name: String,
    },

    /// Links do not form a tree.
    #[error("kinematic loop detected: {0}")]
    KinematicLoop(String),

    /// Model has links but none of them is a root.
    #[error("no root link found in model {0}")]
    NoRootLink(String),
}

impl ConvertError {
    /// Create an unsupported shape error.
    pub fn unsupported_shape(kind: impl std::fmt::Display) -> Self {
        Self::UnsupportedShape(kind.to_string())
    }

    /// Create an undefined link error.
    pub fn undefined_link(link_name: impl Into<String>, joint_name: impl Into<String>) -> Self {
        Self::UndefinedLink {
            link_name: link_name.into(),
            joint_name: joint_name.into(),
        }
    }

    /// Whether this error concerns a single geometry attachment and may be
    /// skipped with `ConversionOptions::skip_unsupported_geometry`.
    #[must_use]
    pub fn is_attachment_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedShape(_) | Self::Mjcf(MjcfError::InvalidGeomSize { .. })
        )
    }
}

impl From<SdfError> for ConvertError {
    fn from(err: SdfError) -> Self {
        match err {
            SdfError::UndefinedLink {
                link_name,
                joint_name,
            } => Self::UndefinedLink {
                link_name,
                joint_name,
            },
            SdfError::KinematicLoop(msg) => Self::KinematicLoop(msg),
            SdfError::NoRootLink(model) => Self::NoRootLink(model),
            err if err.is_frame_error() => Self::PoseResolution(err),
            err => Self::InvalidModel(err),
        }
    }
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
