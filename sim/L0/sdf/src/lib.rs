//! SDFormat model representation.
//!
//! This crate holds an in-memory form of the [SDFormat](http://sdformat.org)
//! elements that describe worlds, models, links and joints with primitive
//! geometry. It is the SDFormat side of the MJCF converter in `sim-convert`.
//!
//! # Features
//!
//! - Worlds with models, lights, plugins and physical fields
//! - Flat link/joint graphs with collisions, visuals, sensors and lights
//! - Semantic poses (`relative_to`) resolved through a [`FrameGraph`]
//! - Kinematic validation with root detection and pre-order link sorting
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
//! use sim_sdf::{FrameGraph, PoseFrameGraph, SdfJoint, SdfLink, SdfModel, SemanticPose, validate};
//! use sim_types::Pose;
//! use nalgebra::Point3;
//!
//! let model = SdfModel::new("arm")
//!     .with_link(SdfLink::new("base"))
//!     .with_link(SdfLink::new("tip").with_pose(SemanticPose::relative_to(
//!         Pose::from_position(Point3::new(0.0, 0.0, 0.5)),
//!         "base",
//!     )))
//!     .with_joint(SdfJoint::fixed("weld", "base", "tip"));
//!
//! let structure = validate(&model).expect("should validate");
//! assert_eq!(structure.sorted_links, vec!["base", "tip"]);
//!
//! let frames = FrameGraph::from_model(&model).expect("should resolve");
//! let tip = frames.frame_pose("tip").expect("tip exists");
//! assert_eq!(tip.position, Point3::new(0.0, 0.0, 0.5));
//! ```
//!
//! # Units
//!
//! - Lengths in meters, full extents (a 1 m box has `size = 1 1 1`)
//! - Angles in radians, roll-pitch-yaw about fixed X, Y, Z axes

#![doc(html_root_url = "https://docs.rs/sim-sdf/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::should_implement_trait,
    clippy::doc_markdown
)]

mod error;
mod frame;
mod types;
mod validation;

pub use error::{Result, SdfError};
pub use frame::{FrameGraph, MODEL_FRAME, PoseFrameGraph, WORLD_FRAME};
pub use types::{
    SdfCollision, SdfFrame, SdfGeometry, SdfJoint, SdfJointAxis, SdfJointLimit, SdfJointType,
    SdfLight, SdfLightType, SdfLink, SdfMaterial, SdfModel, SdfPlugin, SdfSensor, SdfVisual,
    SdfWorld, SemanticPose,
};
pub use validation::{ValidationResult, validate};
