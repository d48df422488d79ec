//! SDFormat ⇄ MJCF conversion.
//!
//! This crate converts robot and world descriptions between the in-memory
//! SDFormat model of `sim-sdf` and the MJCF model of `sim-mjcf`, in both
//! directions.
//!
//! # Features
//!
//! - Primitive shape conversion (box, sphere, capsule, cylinder, ellipsoid,
//!   plane), including MJCF `fromto` segments
//! - Semantic pose resolution against the SDFormat frame graph
//! - Kinematic tree walking: nested MJCF bodies ⇄ flat SDFormat links and joints
//! - Deterministic naming of anonymous elements
//! - Pluggable sensor, light and material converters
//!
//! # Shapes
//!
//! | SDFormat | MJCF |
//! |----------|------|
//! | box `size` | box, half extents |
//! | sphere `radius` | sphere |
//! | capsule `radius`, `length` | capsule, radius and half length |
//! | cylinder `radius`, `length` | cylinder, radius and half length |
//! | ellipsoid `radii` | ellipsoid |
//! | plane `size` | plane, half extents and `0` grid spacing |
//! | mesh, heightmap | unsupported |
//!
//! # Example
//!
//! ```
//! use sim_convert::{mjcf_to_sdf, sdf_to_mjcf};
//! use sim_mjcf::{MjcfBody, MjcfGeom, MjcfJoint, MjcfModel};
//! use nalgebra::Vector3;
//!
//! let model = MjcfModel::new("pendulum").with_body(
//!     MjcfBody::new("base").with_child(
//!         MjcfBody::new("arm")
//!             .with_pos(0.0, 0.0, -0.5)
//!             .with_joint(MjcfJoint::hinge("swing", Vector3::y()))
//!             .with_geom(MjcfGeom::capsule(0.05, 0.25)),
//!     ),
//! );
//!
//! let world = mjcf_to_sdf(&model).expect("should convert");
//! let pendulum = world.model("pendulum").expect("articulated model");
//! assert_eq!(pendulum.joints.len(), 2);
//!
//! let back = sdf_to_mjcf(&world).expect("should convert back");
//! assert!(back.body("arm").is_some());
//! assert!(back.joint("swing").is_some());
//! ```
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. Parsing and
//! writing the XML documents is left to the caller.

#![doc(html_root_url = "https://docs.rs/sim-convert/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::doc_markdown,
    clippy::cast_precision_loss,
    clippy::similar_names
)]

mod collaborators;
mod config;
mod error;
mod mjcf_to_sdf;
mod naming;
mod plugins;
mod pose;
mod sdf_to_mjcf;
mod shape;

pub use collaborators::{
    Collaborators, DefaultCollaborators, LightConverter, MaterialConverter, MjcfSensorMount,
    SensorConverter,
};
pub use config::{ConversionOptions, GeomClass};
pub use error::{ConvertError, Result};
pub use mjcf_to_sdf::{STATIC_LINK_NAME, STATIC_MODEL_NAME, mjcf_to_sdf, mjcf_to_sdf_with};
pub use naming::{ElementRole, NamingAllocator, unique_name};
pub use plugins::{WORLD_SYSTEM_PLUGINS, world_system_plugins};
pub use pose::{
    PoseResolver, mjcf_body_pose, mjcf_camera_pose, mjcf_element_pose, mjcf_geom_pose,
    mjcf_placement, mjcf_site_pose,
};
pub use sdf_to_mjcf::{sdf_model_to_mjcf, sdf_model_to_mjcf_with, sdf_to_mjcf, sdf_to_mjcf_with};
pub use shape::{
    MjcfShape, fromto_length, fromto_pose, mjcf_geom_to_sdf, parse_geom_type, sdf_geometry_to_mjcf,
};
