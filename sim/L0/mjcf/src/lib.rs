//! MJCF (MuJoCo XML Format) model representation.
//!
//! This crate holds an in-memory form of the
//! [MJCF](https://mujoco.readthedocs.io/en/stable/XMLreference.html) elements
//! that describe a kinematic tree with primitive geometry. It is the MJCF side
//! of the SDFormat converter in `sim-convert`.
//!
//! # Features
//!
//! - Body tree with joints, geoms, cameras, lights and sites
//! - Site-mounted sensors (accelerometer, gyro)
//! - Compiler settings (`angle`, `eulerseq`) and resolution of the five
//!   orientation alternatives
//! - Global options (gravity, wind, magnetic field, flags)
//! - Material assets
//! - Structural validation (duplicate names, geom sizes, quaternions,
//!   material and site references)
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in:
//!
//! - Headless conversion tools
//! - Analysis tools
//! - Other game engines
//!
//! # Example
//!
//! ```
//! use sim_mjcf::{MjcfBody, MjcfGeom, MjcfJoint, MjcfModel, validate};
//! use nalgebra::Vector3;
//!
//! let model = MjcfModel::new("pendulum").with_body(
//!     MjcfBody::new("arm")
//!         .with_pos(0.0, 0.0, 1.0)
//!         .with_joint(MjcfJoint::hinge("swing", Vector3::y()))
//!         .with_geom(MjcfGeom::capsule(0.02, 0.25)),
//! );
//!
//! let result = validate(&model).expect("should validate");
//! assert_eq!(result.sorted_bodies, vec!["arm"]);
//! ```
//!
//! # Geometry
//!
//! - `sphere` - `size="r"`
//! - `box` - `size="x y z"` half-extents
//! - `capsule`, `cylinder` - `size="r l"` with half-length, or `size="r"` with `fromto`
//! - `ellipsoid` - `size="rx ry rz"`
//! - `plane` - `size="x y spacing"` half-sizes
//! - `mesh`, `hfield`, `sdf` - represented, not converted
//!
//! # Coordinate System
//!
//! MJCF uses a right-handed coordinate system (Z-up by default):
//!
//! - X: right
//! - Y: forward
//! - Z: up

#![doc(html_root_url = "https://docs.rs/sim-mjcf/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::should_implement_trait,
    clippy::doc_markdown,
    clippy::suboptimal_flops,
    clippy::struct_field_names
)]

mod error;
mod orientation;
mod types;
mod validation;

pub use error::{MjcfError, Result};
pub use orientation::{
    MjcfOrientation, euler_seq_to_quat, is_valid_eulerseq, quat_from_wxyz, quat_to_wxyz,
    z_to_direction,
};
pub use types::{
    AngleUnit, MjcfBody, MjcfCamera, MjcfCompiler, MjcfFlag, MjcfGeom, MjcfGeomType, MjcfJoint,
    MjcfJointType, MjcfLight, MjcfMaterial, MjcfModel, MjcfOption, MjcfSensor, MjcfSensorType,
    MjcfSite,
};
pub use validation::{
    ValidationResult, required_size_len, validate, validate_geom_size, validate_option,
    validate_quat,
};
