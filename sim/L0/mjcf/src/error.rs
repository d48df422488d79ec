//! Error types for MJCF model handling.

use thiserror::Error;

/// Errors that can occur when interpreting or validating an MJCF model.
#[derive(Debug, Error)]
pub enum MjcfError {
    /// Invalid attribute value.
    #[error("invalid value for {attribute} on {element}: {message}")]
    InvalidAttribute {
        /// The attribute with the invalid value.
        attribute: &'static str,
        /// The element containing the attribute.
        element: String,
        /// Description of why the value is invalid.
        message: String,
    },

    /// Duplicate body name.
    #[error("duplicate body name: {0}")]
    DuplicateBody(String),

    /// Duplicate joint name.
    #[error("duplicate joint name: {0}")]
    DuplicateJoint(String),

    /// Duplicate site name.
    #[error("duplicate site name: {0}")]
    DuplicateSite(String),

    /// Invalid geom size specification.
    #[error("invalid geom size for {geom_type}: {message}")]
    InvalidGeomSize {
        /// The geom type.
        geom_type: String,
        /// Description of the error.
        message: String,
    },

    /// Reference to undefined material asset.
    #[error("reference to undefined material: {material_name} in {context}")]
    UndefinedMaterial {
        /// The material name that was referenced.
        material_name: String,
        /// The context where it was referenced.
        context: String,
    },

    /// Sensor mounted on an undefined site.
    #[error("sensor '{sensor}' references undefined site: {site}")]
    UndefinedSite {
        /// The site name that was referenced.
        site: String,
        /// The sensor holding the reference.
        sensor: String,
    },

    /// Invalid option value.
    #[error("invalid option '{option}': {message}")]
    InvalidOption {
        /// The option with the invalid value.
        option: String,
        /// Description of why the value is invalid.
        message: String,
    },
}

impl MjcfError {
    /// Create an invalid attribute error.
    pub fn invalid_attribute(
        attribute: &'static str,
        element: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            attribute,
            element: element.into(),
            message: message.into(),
        }
    }

    /// Create an invalid geom size error.
    pub fn invalid_geom_size(geom_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidGeomSize {
            geom_type: geom_type.into(),
            message: message.into(),
        }
    }

    /// Create an undefined material error.
    pub fn undefined_material(
        material_name: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self::UndefinedMaterial {
            material_name: material_name.into(),
            context: context.into(),
        }
    }

    /// Create an undefined site error.
    pub fn undefined_site(site: impl Into<String>, sensor: impl Into<String>) -> Self {
        Self::UndefinedSite {
            site: site.into(),
            sensor: sensor.into(),
        }
    }

    /// Create an invalid option error.
    pub fn invalid_option(option: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            message: message.into(),
        }
    }
}

/// Result type for MJCF operations.
pub type Result<T> = std::result::Result<T, MjcfError>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_attribute() {
        let err = MjcfError::invalid_attribute("eulerseq", "compiler", "expected 3 axes");
        assert!(err.to_string().contains("eulerseq"));
        assert!(err.to_string().contains("expected 3 axes"));
    }

    #[test]
    fn test_invalid_geom_size() {
        let err = MjcfError::invalid_geom_size("sphere", "expected 1 value");
        assert!(err.to_string().contains("sphere"));
        assert!(err.to_string().contains("expected 1 value"));
    }

    #[test]
    fn test_undefined_material() {
        let err = MjcfError::undefined_material("steel", "geom 'plate'");
        assert!(err.to_string().contains("steel"));
        assert!(err.to_string().contains("plate"));
    }

    #[test]
    fn test_undefined_site() {
        let err = MjcfError::undefined_site("imu", "imu_gyro");
        assert_eq!(
            err.to_string(),
            "sensor 'imu_gyro' references undefined site: imu"
        );
    }
}
