//! Pose resolution between the two formats.
//!
//! SDFormat poses name the frame they are written in; MJCF poses are always
//! relative to the enclosing body and spell their orientation according to
//! the `<compiler>` settings. [`PoseResolver`] turns the former into poses in
//! a chosen frame, and the free functions read and write the latter.

use nalgebra::{Point3, Vector3};
use sim_mjcf::{MjcfBody, MjcfCamera, MjcfCompiler, MjcfGeom, MjcfOrientation, MjcfSite};
use sim_sdf::{PoseFrameGraph, SemanticPose};
use sim_types::Pose;

use crate::error::{ConvertError, Result};

/// Resolves semantic poses against a frame graph.
pub struct PoseResolver<'a> {
    graph: &'a dyn PoseFrameGraph,
}

impl<'a> PoseResolver<'a> {
    /// Create a resolver over `graph`.
    #[must_use]
    pub fn new(graph: &'a dyn PoseFrameGraph) -> Self {
        Self { graph }
    }

    /// Express `pose` in `target_frame`.
    ///
    /// `default_frame` is used when the pose has no `relative_to`.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::PoseResolution`] when either frame is unknown.
    pub fn resolve(
        &self,
        pose: &SemanticPose,
        default_frame: &str,
        target_frame: &str,
    ) -> Result<Pose> {
        let frame = self.frame_in(pose.frame(default_frame), target_frame)?;
        Ok(frame.compose(&pose.pose))
    }

    /// Pose of `frame` expressed in `target_frame`.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::PoseResolution`] when either frame is unknown.
    pub fn frame_in(&self, frame: &str, target_frame: &str) -> Result<Pose> {
        let source = self
            .graph
            .frame_pose(frame)
            .map_err(ConvertError::PoseResolution)?;
        if frame == target_frame {
            return Ok(Pose::identity());
        }
        let target = self
            .graph
            .frame_pose(target_frame)
            .map_err(ConvertError::PoseResolution)?;
        Ok(source.relative_to(&target))
    }
}

/// MJCF `pos` and `euler` for a pose, with the compiler set to
/// [`MjcfCompiler::fixed_axis_degrees`].
#[must_use]
pub fn mjcf_placement(pose: &Pose) -> (Vector3<f64>, Vector3<f64>) {
    (pose.xyz(), pose.rpy_degrees())
}

/// Pose of an MJCF element from its `pos` and orientation alternatives.
#[must_use]
pub fn mjcf_element_pose(
    pos: Vector3<f64>,
    orientation: &MjcfOrientation,
    compiler: &MjcfCompiler,
) -> Pose {
    Pose::from_position_rotation(Point3::from(pos), orientation.resolve(compiler))
}

/// Pose of a body in its parent body frame.
#[must_use]
pub fn mjcf_body_pose(body: &MjcfBody, compiler: &MjcfCompiler) -> Pose {
    mjcf_element_pose(body.pos, &body.orientation(), compiler)
}

/// Declared pose of a geom in its body frame. `fromto` is not considered.
#[must_use]
pub fn mjcf_geom_pose(geom: &MjcfGeom, compiler: &MjcfCompiler) -> Pose {
    mjcf_element_pose(
        geom.pos.unwrap_or_else(Vector3::zeros),
        &geom.orientation(),
        compiler,
    )
}

/// Pose of a camera in its body frame.
#[must_use]
pub fn mjcf_camera_pose(camera: &MjcfCamera, compiler: &MjcfCompiler) -> Pose {
    mjcf_element_pose(camera.pos, &camera.orientation(), compiler)
}

/// Pose of a site in its body frame.
#[must_use]
pub fn mjcf_site_pose(site: &MjcfSite, compiler: &MjcfCompiler) -> Pose {
    mjcf_element_pose(site.pos, &site.orientation(), compiler)
}
