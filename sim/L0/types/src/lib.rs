//! Shared geometric types for the robot description converters.
//!
//! - [`Pose`] - Position and orientation of a link, body, geom or joint frame
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It is pure data
//! with a few nalgebra-backed helpers and can be used by any tool that needs
//! to move placements between the SDFormat and MJCF representations.
//!
//! # Angle Conventions
//!
//! Rotations are stored as unit quaternions. Roll-pitch-yaw accessors use the
//! fixed-axis XYZ convention (`Rz * Ry * Rx`), which is the SDFormat and URDF
//! convention and MJCF's `eulerseq="XYZ"`.

#![doc(html_root_url = "https://docs.rs/sim-types/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,     // Many methods can't be const due to nalgebra
    clippy::suboptimal_flops,          // mul_add style changes aren't always clearer
    clippy::missing_errors_doc,
)]

mod pose;

pub use pose::Pose;
