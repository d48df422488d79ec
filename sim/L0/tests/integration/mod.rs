//! Integration tests for the conversion pipeline.
//!
//! These tests drive whole models through the converters:
//! - MJCF → SDFormat (worldbody, tree flattening, naming)
//! - SDFormat → MJCF (tree nesting, pose resolution, geom groups)
//! - Round trips in both directions

#![allow(clippy::unwrap_used, clippy::expect_used)]

pub mod mjcf_to_sdf_pipeline;
pub mod round_trip;
pub mod sdf_to_mjcf_pipeline;
