//! Intermediate representation types for MJCF data.
//!
//! These types mirror the subset of the MJCF XML schema that carries
//! kinematic structure and primitive geometry. They are filled by an MJCF
//! reader (or by the SDFormat converter) and consumed by the converters; no
//! XML is handled here.

use nalgebra::{Vector3, Vector4};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::orientation::MjcfOrientation;

// ============================================================================
// Compiler
// ============================================================================

/// Angular unit for MJCF compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AngleUnit {
    /// Angles specified in degrees (MuJoCo default).
    #[default]
    Degree,
    /// Angles specified in radians.
    Radian,
}

impl AngleUnit {
    /// Convert an angle expressed in this unit to radians.
    #[must_use]
    pub fn to_radians(self, angle: f64) -> f64 {
        match self {
            Self::Degree => angle.to_radians(),
            Self::Radian => angle,
        }
    }

    /// Convert an angle in radians to this unit.
    #[must_use]
    pub fn from_radians(self, angle: f64) -> f64 {
        match self {
            Self::Degree => angle.to_degrees(),
            Self::Radian => angle,
        }
    }
}

/// Compiler settings from `<compiler>` element.
///
/// Only the attributes that change how poses are interpreted are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MjcfCompiler {
    /// Angular unit for all angle-valued attributes.
    pub angle: AngleUnit,
    /// Euler angle rotation sequence (3 chars from `{x,y,z,X,Y,Z}`).
    pub eulerseq: String,
}

impl Default for MjcfCompiler {
    fn default() -> Self {
        Self {
            angle: AngleUnit::Degree,
            eulerseq: "xyz".to_string(),
        }
    }
}

impl MjcfCompiler {
    /// Compiler settings whose Euler angles match SDFormat roll-pitch-yaw,
    /// expressed in degrees.
    #[must_use]
    pub fn fixed_axis_degrees() -> Self {
        Self {
            angle: AngleUnit::Degree,
            eulerseq: "XYZ".to_string(),
        }
    }
}

// ============================================================================
// Simulation Options
// ============================================================================

/// Flags from `<option><flag .../></option>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MjcfFlag {
    /// Enable gravity force.
    pub gravity: bool,
}

impl Default for MjcfFlag {
    fn default() -> Self {
        Self { gravity: true }
    }
}

/// Global options from `<option>` element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MjcfOption {
    /// Timestep in seconds (default: 0.002).
    pub timestep: f64,
    /// Gravity vector (default: 0 0 -9.81).
    pub gravity: Vector3<f64>,
    /// Wind/medium velocity vector (default: 0 0 0).
    pub wind: Vector3<f64>,
    /// Global magnetic flux direction (default: 0 -0.5 0).
    pub magnetic: Vector3<f64>,
    /// Simulation flags.
    pub flag: MjcfFlag,
}

impl Default for MjcfOption {
    fn default() -> Self {
        Self {
            timestep: 0.002,
            gravity: Vector3::new(0.0, 0.0, -9.81),
            wind: Vector3::zeros(),
            magnetic: Vector3::new(0.0, -0.5, 0.0),
            flag: MjcfFlag::default(),
        }
    }
}

impl MjcfOption {
    /// Gravity actually applied, honoring `<flag gravity="disable"/>`.
    #[must_use]
    pub fn effective_gravity(&self) -> Vector3<f64> {
        if self.flag.gravity {
            self.gravity
        } else {
            Vector3::zeros()
        }
    }
}

// ============================================================================
// Assets
// ============================================================================

/// Material from `<asset><material .../></asset>`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MjcfMaterial {
    /// Material name referenced by geoms.
    pub name: String,
    /// RGBA color.
    pub rgba: Vector4<f64>,
    /// Emission scale.
    pub emission: f64,
    /// Specular scale.
    pub specular: f64,
}

impl MjcfMaterial {
    /// Create a material with MuJoCo's default appearance.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rgba: Vector4::new(1.0, 1.0, 1.0, 1.0),
            emission: 0.0,
            specular: 0.5,
        }
    }
}

// ============================================================================
// Geometry
// ============================================================================

/// Geometry type from MJCF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MjcfGeomType {
    /// Plane (infinite for collision, `size` sets the rendered extent).
    Plane,
    /// Sphere with radius.
    Sphere,
    /// Capsule (cylinder with hemispherical caps).
    Capsule,
    /// Box with half-extents.
    Box,
    /// Cylinder (Z-aligned).
    Cylinder,
    /// Ellipsoid with semi-axes.
    Ellipsoid,
    /// Mesh from an asset.
    Mesh,
    /// Height field.
    Hfield,
    /// Signed distance field.
    Sdf,
}

impl MjcfGeomType {
    /// Parse geom type from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "plane" => Some(Self::Plane),
            "sphere" => Some(Self::Sphere),
            "capsule" => Some(Self::Capsule),
            "box" => Some(Self::Box),
            "cylinder" => Some(Self::Cylinder),
            "ellipsoid" => Some(Self::Ellipsoid),
            "mesh" => Some(Self::Mesh),
            "hfield" => Some(Self::Hfield),
            "sdf" => Some(Self::Sdf),
            _ => None,
        }
    }

    /// Get the name of this geom type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plane => "plane",
            Self::Sphere => "sphere",
            Self::Capsule => "capsule",
            Self::Box => "box",
            Self::Cylinder => "cylinder",
            Self::Ellipsoid => "ellipsoid",
            Self::Mesh => "mesh",
            Self::Hfield => "hfield",
            Self::Sdf => "sdf",
        }
    }
}

impl std::fmt::Display for MjcfGeomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geometry from `<geom>` element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MjcfGeom {
    /// Optional name.
    pub name: Option<String>,
    /// Geom type (None = not explicitly set, MuJoCo falls back to Sphere).
    pub geom_type: Option<MjcfGeomType>,
    /// Position relative to body frame.
    pub pos: Option<Vector3<f64>>,
    /// Orientation (quaternion: w x y z).
    pub quat: Option<Vector4<f64>>,
    /// Alternative orientation as euler angles (compiler unit and sequence).
    pub euler: Option<Vector3<f64>>,
    /// Alternative orientation as axis-angle (x, y, z, angle).
    pub axisangle: Option<Vector4<f64>>,
    /// Alternative orientation as two axes (x-axis 3 floats, y-axis 3 floats).
    pub xyaxes: Option<[f64; 6]>,
    /// Alternative orientation as z-axis (minimal rotation from Z).
    pub zaxis: Option<Vector3<f64>>,
    /// Size parameters (interpretation depends on type).
    /// - Sphere: `[radius]`
    /// - Capsule: `[radius, half-length]`
    /// - Box: `[x, y, z]` half-extents
    /// - Cylinder: `[radius, half-length]`
    /// - Ellipsoid: `[rx, ry, rz]`
    /// - Plane: `[x, y, spacing]` half-sizes plus grid spacing for rendering
    pub size: Vec<f64>,
    /// Alternative specification using fromto (start and end points).
    pub fromto: Option<[f64; 6]>,
    /// RGBA color.
    pub rgba: Option<Vector4<f64>>,
    /// Collision type bitmask.
    pub contype: Option<i32>,
    /// Collision affinity bitmask.
    pub conaffinity: Option<i32>,
    /// Visualization group (0–5). Default 0.
    pub group: Option<i32>,
    /// Material asset name.
    pub material: Option<String>,
}

impl Default for MjcfGeom {
    fn default() -> Self {
        Self {
            name: None,
            geom_type: None,
            pos: None,
            quat: None,
            euler: None,
            axisangle: None,
            xyaxes: None,
            zaxis: None,
            size: vec![0.1], // Default sphere radius
            fromto: None,
            rgba: None,
            contype: None,
            conaffinity: None,
            group: None,
            material: None,
        }
    }
}

impl MjcfGeom {
    /// Create a geom of the given type and raw size parameters.
    #[must_use]
    pub fn new(geom_type: MjcfGeomType, size: Vec<f64>) -> Self {
        Self {
            geom_type: Some(geom_type),
            size,
            ..Default::default()
        }
    }

    /// Create a sphere geom.
    #[must_use]
    pub fn sphere(radius: f64) -> Self {
        Self::new(MjcfGeomType::Sphere, vec![radius])
    }

    /// Create a box geom.
    #[must_use]
    pub fn box_shape(half_extents: Vector3<f64>) -> Self {
        Self::new(
            MjcfGeomType::Box,
            vec![half_extents.x, half_extents.y, half_extents.z],
        )
    }

    /// Create a capsule geom.
    #[must_use]
    pub fn capsule(radius: f64, half_length: f64) -> Self {
        Self::new(MjcfGeomType::Capsule, vec![radius, half_length])
    }

    /// Create a capsule or cylinder spanning a segment.
    #[must_use]
    pub fn from_segment(geom_type: MjcfGeomType, radius: f64, fromto: [f64; 6]) -> Self {
        Self {
            fromto: Some(fromto),
            ..Self::new(geom_type, vec![radius])
        }
    }

    /// Set the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the position.
    #[must_use]
    pub fn with_pos(mut self, pos: Vector3<f64>) -> Self {
        self.pos = Some(pos);
        self
    }

    /// Set the orientation as euler angles.
    #[must_use]
    pub fn with_euler(mut self, euler: Vector3<f64>) -> Self {
        self.euler = Some(euler);
        self
    }

    /// Set the visualization group.
    #[must_use]
    pub fn with_group(mut self, group: i32) -> Self {
        self.group = Some(group);
        self
    }

    /// Effective geom type (sphere when unset).
    #[must_use]
    pub fn effective_type(&self) -> MjcfGeomType {
        self.geom_type.unwrap_or(MjcfGeomType::Sphere)
    }

    /// Whether contacts are disabled for this geom (`contype = conaffinity = 0`).
    #[must_use]
    pub fn is_contact_disabled(&self) -> bool {
        self.contype == Some(0) && self.conaffinity == Some(0)
    }

    /// Gather the orientation alternatives of this geom.
    #[must_use]
    pub fn orientation(&self) -> MjcfOrientation {
        MjcfOrientation {
            quat: self.quat,
            euler: self.euler,
            axisangle: self.axisangle,
            xyaxes: self.xyaxes,
            zaxis: self.zaxis,
        }
    }
}

// ============================================================================
// Joint Types
// ============================================================================

/// Joint type from MJCF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MjcfJointType {
    /// Hinge/revolute joint (1 DOF rotation).
    #[default]
    Hinge,
    /// Slide/prismatic joint (1 DOF translation).
    Slide,
    /// Ball/spherical joint (3 DOF rotation).
    Ball,
    /// Free joint (6 DOF), also written `<freejoint/>`.
    Free,
}

impl MjcfJointType {
    /// Get the name of this joint type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hinge => "hinge",
            Self::Slide => "slide",
            Self::Ball => "ball",
            Self::Free => "free",
        }
    }
}

/// Joint from `<joint>` element.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MjcfJoint {
    /// Joint name (empty when not declared).
    pub name: String,
    /// Joint type (None = hinge, MuJoCo's default).
    pub joint_type: Option<MjcfJointType>,
    /// Joint position relative to body frame.
    pub pos: Option<Vector3<f64>>,
    /// Joint axis (for hinge and slide), body frame.
    pub axis: Option<Vector3<f64>>,
    /// Whether position limits are enabled. `None` means inferred from `range`.
    pub limited: Option<bool>,
    /// Position limit range [lower, upper] in compiler angle units for hinges.
    pub range: Option<(f64, f64)>,
    /// Damping coefficient.
    pub damping: Option<f64>,
    /// Spring stiffness.
    pub stiffness: Option<f64>,
    /// Friction loss.
    pub frictionloss: Option<f64>,
}

impl MjcfJoint {
    /// Create a new hinge joint.
    #[must_use]
    pub fn hinge(name: impl Into<String>, axis: Vector3<f64>) -> Self {
        Self {
            name: name.into(),
            joint_type: Some(MjcfJointType::Hinge),
            axis: Some(axis),
            ..Default::default()
        }
    }

    /// Create a new slide joint.
    #[must_use]
    pub fn slide(name: impl Into<String>, axis: Vector3<f64>) -> Self {
        Self {
            name: name.into(),
            joint_type: Some(MjcfJointType::Slide),
            axis: Some(axis),
            ..Default::default()
        }
    }

    /// Create a ball joint.
    #[must_use]
    pub fn ball(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            joint_type: Some(MjcfJointType::Ball),
            ..Default::default()
        }
    }

    /// Create a free joint (`<freejoint/>`).
    #[must_use]
    pub fn free(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            joint_type: Some(MjcfJointType::Free),
            ..Default::default()
        }
    }

    /// Set position limits.
    #[must_use]
    pub fn with_limits(mut self, lower: f64, upper: f64) -> Self {
        self.limited = Some(true);
        self.range = Some((lower, upper));
        self
    }

    /// Set damping.
    #[must_use]
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = Some(damping);
        self
    }

    /// Set spring stiffness.
    #[must_use]
    pub fn with_stiffness(mut self, stiffness: f64) -> Self {
        self.stiffness = Some(stiffness);
        self
    }

    /// Effective joint type (hinge when unset).
    #[must_use]
    pub fn effective_type(&self) -> MjcfJointType {
        self.joint_type.unwrap_or_default()
    }

    /// Limits that are in effect, following `autolimits` inference.
    #[must_use]
    pub fn effective_range(&self) -> Option<(f64, f64)> {
        match self.limited {
            Some(false) => None,
            _ => self.range,
        }
    }
}

// ============================================================================
// Cameras and Lights
// ============================================================================

/// Camera from `<camera>` element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MjcfCamera {
    /// Optional name.
    pub name: Option<String>,
    /// Position relative to body frame.
    pub pos: Vector3<f64>,
    /// Orientation (quaternion: w x y z).
    pub quat: Option<Vector4<f64>>,
    /// Alternative orientation as euler angles.
    pub euler: Option<Vector3<f64>>,
    /// Vertical field of view in degrees.
    pub fovy: f64,
}

impl Default for MjcfCamera {
    fn default() -> Self {
        Self {
            name: None,
            pos: Vector3::zeros(),
            quat: None,
            euler: None,
            fovy: 45.0,
        }
    }
}

impl MjcfCamera {
    /// Gather the orientation alternatives of this camera.
    #[must_use]
    pub fn orientation(&self) -> MjcfOrientation {
        MjcfOrientation {
            quat: self.quat,
            euler: self.euler,
            ..MjcfOrientation::default()
        }
    }
}

/// Light from `<light>` element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MjcfLight {
    /// Optional name.
    pub name: Option<String>,
    /// Position relative to body frame.
    pub pos: Vector3<f64>,
    /// Direction the light points in.
    pub dir: Vector3<f64>,
    /// Directional (infinitely far) light instead of a spotlight.
    pub directional: bool,
    /// Whether the light casts shadows.
    pub castshadow: bool,
    /// Diffuse color.
    pub diffuse: Vector3<f64>,
}

impl Default for MjcfLight {
    fn default() -> Self {
        Self {
            name: None,
            pos: Vector3::zeros(),
            dir: Vector3::new(0.0, 0.0, -1.0),
            directional: false,
            castshadow: true,
            diffuse: Vector3::new(0.7, 0.7, 0.7),
        }
    }
}

// ============================================================================
// Sites and Sensors
// ============================================================================

/// Site from `<site>` element, a named frame on a body.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MjcfSite {
    /// Site name, referenced by sensors.
    pub name: String,
    /// Position relative to body frame.
    pub pos: Vector3<f64>,
    /// Orientation (quaternion: w x y z).
    pub quat: Option<Vector4<f64>>,
    /// Alternative orientation as euler angles.
    pub euler: Option<Vector3<f64>>,
}

impl MjcfSite {
    /// Create a site at the body origin.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pos: Vector3::zeros(),
            quat: None,
            euler: None,
        }
    }

    /// Gather the orientation alternatives of this site.
    #[must_use]
    pub fn orientation(&self) -> MjcfOrientation {
        MjcfOrientation {
            quat: self.quat,
            euler: self.euler,
            ..MjcfOrientation::default()
        }
    }
}

/// Site-mounted sensor kinds from the `<sensor>` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MjcfSensorType {
    /// Linear acceleration in the site frame.
    Accelerometer,
    /// Angular velocity in the site frame.
    Gyro,
}

impl MjcfSensorType {
    /// Element name of this sensor kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accelerometer => "accelerometer",
            Self::Gyro => "gyro",
        }
    }
}

/// Sensor from the `<sensor>` section.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MjcfSensor {
    /// Optional name.
    pub name: Option<String>,
    /// Sensor kind.
    pub sensor_type: MjcfSensorType,
    /// Name of the site the sensor is mounted on.
    pub site: String,
}

impl MjcfSensor {
    /// Create a sensor of `sensor_type` mounted on `site`.
    #[must_use]
    pub fn new(sensor_type: MjcfSensorType, site: impl Into<String>) -> Self {
        Self {
            name: None,
            sensor_type,
            site: site.into(),
        }
    }

    /// Set the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

// ============================================================================
// Body
// ============================================================================

/// A body from `<body>` element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MjcfBody {
    /// Body name (empty when not declared).
    pub name: String,
    /// Position relative to parent body frame.
    pub pos: Vector3<f64>,
    /// Orientation (quaternion: w x y z).
    pub quat: Vector4<f64>,
    /// Alternative orientation as axis-angle.
    pub axisangle: Option<Vector4<f64>>,
    /// Alternative orientation as euler angles (compiler unit and sequence).
    pub euler: Option<Vector3<f64>>,
    /// Alternative orientation as two axes.
    pub xyaxes: Option<[f64; 6]>,
    /// Alternative orientation as z-axis.
    pub zaxis: Option<Vector3<f64>>,
    /// Joints attached to this body, free joints included.
    pub joints: Vec<MjcfJoint>,
    /// Geoms attached to this body.
    pub geoms: Vec<MjcfGeom>,
    /// Cameras attached to this body.
    pub cameras: Vec<MjcfCamera>,
    /// Lights attached to this body.
    pub lights: Vec<MjcfLight>,
    /// Sites attached to this body.
    pub sites: Vec<MjcfSite>,
    /// Child bodies.
    pub children: Vec<MjcfBody>,
}

impl Default for MjcfBody {
    fn default() -> Self {
        Self {
            name: String::new(),
            pos: Vector3::zeros(),
            quat: Vector4::new(1.0, 0.0, 0.0, 0.0),
            axisangle: None,
            euler: None,
            xyaxes: None,
            zaxis: None,
            joints: Vec::new(),
            geoms: Vec::new(),
            cameras: Vec::new(),
            lights: Vec::new(),
            sites: Vec::new(),
            children: Vec::new(),
        }
    }
}

impl MjcfBody {
    /// Create a new body with a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set position.
    #[must_use]
    pub fn with_pos(mut self, x: f64, y: f64, z: f64) -> Self {
        self.pos = Vector3::new(x, y, z);
        self
    }

    /// Set orientation as euler angles.
    #[must_use]
    pub fn with_euler(mut self, x: f64, y: f64, z: f64) -> Self {
        self.euler = Some(Vector3::new(x, y, z));
        self
    }

    /// Add a geom.
    #[must_use]
    pub fn with_geom(mut self, geom: MjcfGeom) -> Self {
        self.geoms.push(geom);
        self
    }

    /// Add a joint.
    #[must_use]
    pub fn with_joint(mut self, joint: MjcfJoint) -> Self {
        self.joints.push(joint);
        self
    }

    /// Add a camera.
    #[must_use]
    pub fn with_camera(mut self, camera: MjcfCamera) -> Self {
        self.cameras.push(camera);
        self
    }

    /// Add a site.
    #[must_use]
    pub fn with_site(mut self, site: MjcfSite) -> Self {
        self.sites.push(site);
        self
    }

    /// Add a child body.
    #[must_use]
    pub fn with_child(mut self, child: MjcfBody) -> Self {
        self.children.push(child);
        self
    }

    /// Whether the body floats freely (has a free joint).
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.joints
            .iter()
            .any(|j| j.effective_type() == MjcfJointType::Free)
    }

    /// Gather the orientation alternatives of this body.
    #[must_use]
    pub fn orientation(&self) -> MjcfOrientation {
        MjcfOrientation {
            quat: Some(self.quat),
            euler: self.euler,
            axisangle: self.axisangle,
            xyaxes: self.xyaxes,
            zaxis: self.zaxis,
        }
    }
}

// ============================================================================
// Model
// ============================================================================

/// A complete MJCF model.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MjcfModel {
    /// Model name (empty when not declared).
    pub name: String,
    /// Global simulation options.
    pub option: MjcfOption,
    /// Compiler settings.
    pub compiler: MjcfCompiler,
    /// Material assets.
    pub materials: Vec<MjcfMaterial>,
    /// Root worldbody containing the body tree.
    pub worldbody: MjcfBody,
    /// Sensors from the `<sensor>` section.
    pub sensors: Vec<MjcfSensor>,
}

impl Default for MjcfModel {
    fn default() -> Self {
        Self {
            name: String::new(),
            option: MjcfOption::default(),
            compiler: MjcfCompiler::default(),
            materials: Vec::new(),
            worldbody: MjcfBody::new("world"),
            sensors: Vec::new(),
        }
    }
}

impl MjcfModel {
    /// Create a new model with a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a body to the worldbody.
    #[must_use]
    pub fn with_body(mut self, body: MjcfBody) -> Self {
        self.worldbody.children.push(body);
        self
    }

    /// Add a geom directly to the worldbody.
    #[must_use]
    pub fn with_world_geom(mut self, geom: MjcfGeom) -> Self {
        self.worldbody.geoms.push(geom);
        self
    }

    /// Get a flattened list of all bodies in pre-order, worldbody excluded.
    #[must_use]
    pub fn all_bodies(&self) -> Vec<&MjcfBody> {
        fn visit<'a>(body: &'a MjcfBody, out: &mut Vec<&'a MjcfBody>) {
            for child in &body.children {
                out.push(child);
                visit(child, out);
            }
        }

        let mut bodies = Vec::new();
        visit(&self.worldbody, &mut bodies);
        bodies
    }

    /// Get a body by name.
    #[must_use]
    pub fn body(&self, name: &str) -> Option<&MjcfBody> {
        self.all_bodies().into_iter().find(|b| b.name == name)
    }

    /// Get a joint by name.
    #[must_use]
    pub fn joint(&self, name: &str) -> Option<&MjcfJoint> {
        self.all_bodies()
            .into_iter()
            .flat_map(|b| b.joints.iter())
            .find(|j| j.name == name)
    }

    /// Get a site by name, worldbody sites included.
    #[must_use]
    pub fn site(&self, name: &str) -> Option<&MjcfSite> {
        std::iter::once(&self.worldbody)
            .chain(self.all_bodies())
            .flat_map(|b| b.sites.iter())
            .find(|s| s.name == name)
    }

    /// Sensors mounted on the site named `site`.
    pub fn sensors_on<'a>(&'a self, site: &'a str) -> impl Iterator<Item = &'a MjcfSensor> + 'a {
        self.sensors.iter().filter(move |s| s.site == site)
    }

    /// Get a material by name.
    #[must_use]
    pub fn material(&self, name: &str) -> Option<&MjcfMaterial> {
        self.materials.iter().find(|m| m.name == name)
    }
}
