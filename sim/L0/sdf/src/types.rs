//! Intermediate representation types for SDFormat data.
//!
//! These types mirror the SDFormat schema for worlds, models, links and
//! joints but use Rust-native types. Poses are kept *semantic*: a raw
//! placement plus the name of the frame it is expressed in, resolved later
//! against a [`FrameGraph`](crate::FrameGraph).

use nalgebra::{Vector2, Vector3, Vector4};
use sim_types::Pose;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Safe axis normalization with Z fallback for zero-length vectors.
#[inline]
fn safe_normalize_axis(v: Vector3<f64>) -> Vector3<f64> {
    let n = v.norm();
    if n > 1e-10 { v / n } else { Vector3::z() }
}

// ============================================================================
// Semantic Pose
// ============================================================================

/// The `<pose relative_to="...">` element.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SemanticPose {
    /// Raw placement.
    pub pose: Pose,
    /// Frame the placement is expressed in. `None` means the element's
    /// default frame.
    pub relative_to: Option<String>,
}

impl SemanticPose {
    /// Pose expressed in the element's default frame.
    #[must_use]
    pub fn new(pose: Pose) -> Self {
        Self {
            pose,
            relative_to: None,
        }
    }

    /// Pose expressed in a named frame.
    #[must_use]
    pub fn relative_to(pose: Pose, frame: impl Into<String>) -> Self {
        Self {
            pose,
            relative_to: Some(frame.into()),
        }
    }

    /// Frame this pose is expressed in, given the element's default.
    #[must_use]
    pub fn frame<'a>(&'a self, default_frame: &'a str) -> &'a str {
        self.relative_to.as_deref().unwrap_or(default_frame)
    }
}

impl From<Pose> for SemanticPose {
    fn from(pose: Pose) -> Self {
        Self::new(pose)
    }
}

// ============================================================================
// Geometry
// ============================================================================

/// Geometry from `<geometry>` element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SdfGeometry {
    /// `<empty/>` or no geometry child.
    Empty,
    /// Box with full side lengths.
    Box {
        /// Size (x, y, z) full extents.
        size: Vector3<f64>,
    },
    /// Sphere.
    Sphere {
        /// Radius.
        radius: f64,
    },
    /// Capsule along local Z.
    Capsule {
        /// Radius.
        radius: f64,
        /// Length of the cylindrical part.
        length: f64,
    },
    /// Cylinder along local Z.
    Cylinder {
        /// Radius.
        radius: f64,
        /// Full length.
        length: f64,
    },
    /// Ellipsoid.
    Ellipsoid {
        /// Semi-axes.
        radii: Vector3<f64>,
    },
    /// Plane.
    Plane {
        /// Plane normal.
        normal: Vector3<f64>,
        /// Full 2D extent.
        size: Vector2<f64>,
    },
    /// Mesh from file.
    Mesh {
        /// Mesh URI.
        uri: String,
        /// Scale factors.
        scale: Vector3<f64>,
    },
    /// Heightmap from file.
    Heightmap {
        /// Image URI.
        uri: String,
    },
}

impl SdfGeometry {
    /// Element name of this geometry.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Box { .. } => "box",
            Self::Sphere { .. } => "sphere",
            Self::Capsule { .. } => "capsule",
            Self::Cylinder { .. } => "cylinder",
            Self::Ellipsoid { .. } => "ellipsoid",
            Self::Plane { .. } => "plane",
            Self::Mesh { .. } => "mesh",
            Self::Heightmap { .. } => "heightmap",
        }
    }

    /// Plane facing +Z.
    #[must_use]
    pub fn plane(size_x: f64, size_y: f64) -> Self {
        Self::Plane {
            normal: Vector3::z(),
            size: Vector2::new(size_x, size_y),
        }
    }
}

// ============================================================================
// Attachments
// ============================================================================

/// Material from `<material>` element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SdfMaterial {
    /// Ambient color.
    pub ambient: Vector4<f64>,
    /// Diffuse color.
    pub diffuse: Vector4<f64>,
    /// Specular color.
    pub specular: Vector4<f64>,
    /// Emissive color.
    pub emissive: Vector4<f64>,
}

impl Default for SdfMaterial {
    fn default() -> Self {
        Self {
            ambient: Vector4::new(0.0, 0.0, 0.0, 1.0),
            diffuse: Vector4::new(0.0, 0.0, 0.0, 1.0),
            specular: Vector4::new(0.0, 0.0, 0.0, 1.0),
            emissive: Vector4::new(0.0, 0.0, 0.0, 1.0),
        }
    }
}

/// Collision from `<collision>` element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SdfCollision {
    /// Collision name (empty when not declared).
    pub name: String,
    /// Pose, relative to the parent link by default.
    pub pose: SemanticPose,
    /// Geometry.
    pub geometry: SdfGeometry,
}

impl SdfCollision {
    /// Create a collision with the given geometry.
    #[must_use]
    pub fn new(name: impl Into<String>, geometry: SdfGeometry) -> Self {
        Self {
            name: name.into(),
            pose: SemanticPose::default(),
            geometry,
        }
    }

    /// Set the pose.
    #[must_use]
    pub fn with_pose(mut self, pose: impl Into<SemanticPose>) -> Self {
        self.pose = pose.into();
        self
    }
}

/// Visual from `<visual>` element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SdfVisual {
    /// Visual name (empty when not declared).
    pub name: String,
    /// Pose, relative to the parent link by default.
    pub pose: SemanticPose,
    /// Geometry.
    pub geometry: SdfGeometry,
    /// Optional material.
    pub material: Option<SdfMaterial>,
}

impl SdfVisual {
    /// Create a visual with the given geometry.
    #[must_use]
    pub fn new(name: impl Into<String>, geometry: SdfGeometry) -> Self {
        Self {
            name: name.into(),
            pose: SemanticPose::default(),
            geometry,
            material: None,
        }
    }

    /// Set the pose.
    #[must_use]
    pub fn with_pose(mut self, pose: impl Into<SemanticPose>) -> Self {
        self.pose = pose.into();
        self
    }

    /// Set the material.
    #[must_use]
    pub fn with_material(mut self, material: SdfMaterial) -> Self {
        self.material = Some(material);
        self
    }
}

/// Sensor from `<sensor>` element. Only placement and identity are kept.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SdfSensor {
    /// Sensor name.
    pub name: String,
    /// Sensor type, e.g. `camera`.
    pub sensor_type: String,
    /// Pose, relative to the parent link by default.
    pub pose: SemanticPose,
    /// Horizontal field of view in radians (cameras only).
    pub horizontal_fov: Option<f64>,
}

/// Light type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SdfLightType {
    /// Point light.
    #[default]
    Point,
    /// Spot light.
    Spot,
    /// Directional light.
    Directional,
}

/// Light from `<light>` element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SdfLight {
    /// Light name.
    pub name: String,
    /// Light type.
    pub light_type: SdfLightType,
    /// Pose, relative to the parent link (or world) by default.
    pub pose: SemanticPose,
    /// Direction for spot and directional lights.
    pub direction: Vector3<f64>,
    /// Diffuse color.
    pub diffuse: Vector4<f64>,
    /// Whether the light casts shadows.
    pub cast_shadows: bool,
}

impl Default for SdfLight {
    fn default() -> Self {
        Self {
            name: String::new(),
            light_type: SdfLightType::Point,
            pose: SemanticPose::default(),
            direction: Vector3::new(0.0, 0.0, -1.0),
            diffuse: Vector4::new(1.0, 1.0, 1.0, 1.0),
            cast_shadows: false,
        }
    }
}

// ============================================================================
// Link
// ============================================================================

/// Link from `<link>` element.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SdfLink {
    /// Link name.
    pub name: String,
    /// Pose, relative to the model frame by default.
    pub pose: SemanticPose,
    /// Collision elements.
    pub collisions: Vec<SdfCollision>,
    /// Visual elements.
    pub visuals: Vec<SdfVisual>,
    /// Sensors.
    pub sensors: Vec<SdfSensor>,
    /// Lights.
    pub lights: Vec<SdfLight>,
}

impl SdfLink {
    /// Create a new link with a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the pose.
    #[must_use]
    pub fn with_pose(mut self, pose: impl Into<SemanticPose>) -> Self {
        self.pose = pose.into();
        self
    }

    /// Add a collision.
    #[must_use]
    pub fn with_collision(mut self, collision: SdfCollision) -> Self {
        self.collisions.push(collision);
        self
    }

    /// Add a visual.
    #[must_use]
    pub fn with_visual(mut self, visual: SdfVisual) -> Self {
        self.visuals.push(visual);
        self
    }

    /// Add a sensor.
    #[must_use]
    pub fn with_sensor(mut self, sensor: SdfSensor) -> Self {
        self.sensors.push(sensor);
        self
    }
}

// ============================================================================
// Joint
// ============================================================================

/// Joint type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SdfJointType {
    /// Fixed joint (no motion).
    #[default]
    Fixed,
    /// Revolute joint with limits.
    Revolute,
    /// Continuous joint (revolute without limits).
    Continuous,
    /// Prismatic (sliding) joint.
    Prismatic,
    /// Ball joint.
    Ball,
}

impl SdfJointType {
    /// Get the name of this joint type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Revolute => "revolute",
            Self::Continuous => "continuous",
            Self::Prismatic => "prismatic",
            Self::Ball => "ball",
        }
    }
}

/// Limits from `<axis><limit>`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SdfJointLimit {
    /// Lower limit (radians or meters).
    pub lower: f64,
    /// Upper limit (radians or meters).
    pub upper: f64,
    /// Maximum effort.
    pub effort: f64,
    /// Maximum velocity.
    pub velocity: f64,
}

impl Default for SdfJointLimit {
    fn default() -> Self {
        Self {
            lower: f64::NEG_INFINITY,
            upper: f64::INFINITY,
            effort: f64::INFINITY,
            velocity: f64::INFINITY,
        }
    }
}

impl SdfJointLimit {
    /// Create position limits.
    #[must_use]
    pub fn new(lower: f64, upper: f64) -> Self {
        Self {
            lower,
            upper,
            ..Default::default()
        }
    }

    /// Whether both position bounds are finite.
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        self.lower.is_finite() && self.upper.is_finite()
    }
}

/// Axis from `<axis>` element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SdfJointAxis {
    /// Axis direction (normalized).
    pub xyz: Vector3<f64>,
    /// Frame the axis is expressed in. `None` means the joint frame.
    pub expressed_in: Option<String>,
    /// Position limits.
    pub limit: SdfJointLimit,
    /// Viscous damping coefficient.
    pub damping: f64,
    /// Coulomb friction.
    pub friction: f64,
    /// Spring stiffness about (or along) the axis.
    pub spring_stiffness: f64,
}

impl Default for SdfJointAxis {
    fn default() -> Self {
        Self {
            xyz: Vector3::z(),
            expressed_in: None,
            limit: SdfJointLimit::default(),
            damping: 0.0,
            friction: 0.0,
            spring_stiffness: 0.0,
        }
    }
}

impl SdfJointAxis {
    /// Create an axis along `xyz`, normalized with a Z fallback.
    #[must_use]
    pub fn new(xyz: Vector3<f64>) -> Self {
        Self {
            xyz: safe_normalize_axis(xyz),
            ..Default::default()
        }
    }

    /// Set position limits.
    #[must_use]
    pub fn with_limits(mut self, lower: f64, upper: f64) -> Self {
        self.limit = SdfJointLimit::new(lower, upper);
        self
    }
}

/// Joint from `<joint>` element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SdfJoint {
    /// Joint name.
    pub name: String,
    /// Joint type.
    pub joint_type: SdfJointType,
    /// Parent link name, or `world`.
    pub parent: String,
    /// Child link name.
    pub child: String,
    /// Pose, relative to the child link by default.
    pub pose: SemanticPose,
    /// Axis (revolute, continuous, prismatic).
    pub axis: Option<SdfJointAxis>,
}

impl SdfJoint {
    /// Create a new joint.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        joint_type: SdfJointType,
        parent: impl Into<String>,
        child: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            joint_type,
            parent: parent.into(),
            child: child.into(),
            pose: SemanticPose::default(),
            axis: None,
        }
    }

    /// Create a fixed joint.
    #[must_use]
    pub fn fixed(
        name: impl Into<String>,
        parent: impl Into<String>,
        child: impl Into<String>,
    ) -> Self {
        Self::new(name, SdfJointType::Fixed, parent, child)
    }

    /// Set the axis.
    #[must_use]
    pub fn with_axis(mut self, axis: SdfJointAxis) -> Self {
        self.axis = Some(axis);
        self
    }

    /// Set the pose.
    #[must_use]
    pub fn with_pose(mut self, pose: impl Into<SemanticPose>) -> Self {
        self.pose = pose.into();
        self
    }

    /// Whether the parent is the world rather than a link.
    #[must_use]
    pub fn is_world_parent(&self) -> bool {
        self.parent == crate::WORLD_FRAME
    }
}

// ============================================================================
// Frames and Plugins
// ============================================================================

/// Explicit frame from `<frame>` element.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SdfFrame {
    /// Frame name.
    pub name: String,
    /// Frame this one is attached to. `None` means the model frame.
    pub attached_to: Option<String>,
    /// Pose, relative to `attached_to` by default.
    pub pose: SemanticPose,
}

/// Plugin from `<plugin>` element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SdfPlugin {
    /// Shared library name.
    pub filename: String,
    /// Plugin class name.
    pub name: String,
}

impl SdfPlugin {
    /// Create a plugin entry.
    #[must_use]
    pub fn new(filename: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            name: name.into(),
        }
    }
}

// ============================================================================
// Model and World
// ============================================================================

/// Model from `<model>` element.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SdfModel {
    /// Model name.
    pub name: String,
    /// Whether the model is immovable.
    pub is_static: bool,
    /// Model pose in the world.
    pub pose: SemanticPose,
    /// Links, in declaration order.
    pub links: Vec<SdfLink>,
    /// Joints, in declaration order.
    pub joints: Vec<SdfJoint>,
    /// Explicit frames.
    pub frames: Vec<SdfFrame>,
}

impl SdfModel {
    /// Create a new model.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Mark the model static.
    #[must_use]
    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    /// Set the model pose.
    #[must_use]
    pub fn with_pose(mut self, pose: impl Into<SemanticPose>) -> Self {
        self.pose = pose.into();
        self
    }

    /// Add a link.
    #[must_use]
    pub fn with_link(mut self, link: SdfLink) -> Self {
        self.links.push(link);
        self
    }

    /// Add a joint.
    #[must_use]
    pub fn with_joint(mut self, joint: SdfJoint) -> Self {
        self.joints.push(joint);
        self
    }

    /// Add an explicit frame.
    #[must_use]
    pub fn with_frame(mut self, frame: SdfFrame) -> Self {
        self.frames.push(frame);
        self
    }

    /// Get a link by name.
    #[must_use]
    pub fn link(&self, name: &str) -> Option<&SdfLink> {
        self.links.iter().find(|l| l.name == name)
    }

    /// Get a joint by name.
    #[must_use]
    pub fn joint(&self, name: &str) -> Option<&SdfJoint> {
        self.joints.iter().find(|j| j.name == name)
    }
}

/// World from `<world>` element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SdfWorld {
    /// World name.
    pub name: String,
    /// Gravity vector.
    pub gravity: Vector3<f64>,
    /// Magnetic field in Tesla.
    pub magnetic_field: Vector3<f64>,
    /// Wind linear velocity.
    pub wind: Vector3<f64>,
    /// Models, in declaration order.
    pub models: Vec<SdfModel>,
    /// World-level lights.
    pub lights: Vec<SdfLight>,
    /// World plugins.
    pub plugins: Vec<SdfPlugin>,
}

impl Default for SdfWorld {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            gravity: Vector3::new(0.0, 0.0, -9.8),
            magnetic_field: Vector3::new(5.5645e-6, 22.8758e-6, -42.3884e-6),
            wind: Vector3::zeros(),
            models: Vec::new(),
            lights: Vec::new(),
            plugins: Vec::new(),
        }
    }
}

impl SdfWorld {
    /// Create a new world.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a model.
    #[must_use]
    pub fn with_model(mut self, model: SdfModel) -> Self {
        self.models.push(model);
        self
    }

    /// Get a model by name.
    #[must_use]
    pub fn model(&self, name: &str) -> Option<&SdfModel> {
        self.models.iter().find(|m| m.name == name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn test_semantic_pose_frame() {
        let pose = SemanticPose::default();
        assert_eq!(pose.frame("link"), "link");

        let pose = SemanticPose::relative_to(Pose::identity(), "base");
        assert_eq!(pose.frame("link"), "base");
    }

    #[test]
    fn test_joint_type_names() {
        assert_eq!(SdfJointType::Continuous.as_str(), "continuous");
        assert_eq!(SdfJointType::Fixed.as_str(), "fixed");
    }

    #[test]
    fn test_axis_normalization() {
        let axis = SdfJointAxis::new(Vector3::new(0.0, 2.0, 0.0));
        assert_relative_eq!(axis.xyz, Vector3::y(), epsilon = 1e-12);

        let fallback = SdfJointAxis::new(Vector3::zeros());
        assert_relative_eq!(fallback.xyz, Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn test_joint_limits() {
        assert!(!SdfJointLimit::default().is_bounded());
        assert!(SdfJointLimit::new(-1.0, 1.0).is_bounded());
    }

    #[test]
    fn test_model_builder() {
        let model = SdfModel::new("arm")
            .with_link(
                SdfLink::new("base").with_pose(Pose::from_position(Point3::new(0.0, 0.0, 1.0))),
            )
            .with_link(SdfLink::new("tip"))
            .with_joint(SdfJoint::fixed("weld", "base", "tip"));

        assert!(model.link("tip").is_some());
        assert_eq!(model.joint("weld").map(|j| j.child.as_str()), Some("tip"));
        assert!(!model.joint("weld").is_some_and(SdfJoint::is_world_parent));
    }

    #[test]
    fn test_geometry_kind() {
        assert_eq!(SdfGeometry::plane(1.0, 2.0).kind(), "plane");
        assert_eq!(SdfGeometry::Empty.kind(), "empty");
    }
}
