//! Rigid placement of an element in 3D space.
//!
//! Both description formats place bodies, links, geoms and joints with a
//! translation and a rotation. They disagree on how the rotation is written
//! (roll-pitch-yaw radians, Euler degrees with a configurable sequence,
//! quaternions) so the shared representation is a unit quaternion and the
//! format-specific spellings are derived from it.

use nalgebra::{Isometry3, Point3, UnitQuaternion, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position and orientation of an element.
///
/// The orientation is a unit quaternion, so it always represents an
/// orthonormal rotation.
///
/// # Example
///
/// ```
/// use sim_types::Pose;
/// use nalgebra::Point3;
///
/// let parent = Pose::from_position(Point3::new(1.0, 0.0, 0.0));
/// let child = Pose::from_position(Point3::new(0.0, 2.0, 0.0));
///
/// let world = parent.compose(&child);
/// assert_eq!(world.position, Point3::new(1.0, 2.0, 0.0));
/// assert_eq!(world.relative_to(&parent), child);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pose {
    /// Position in the parent frame.
    pub position: Point3<f64>,
    /// Orientation as a unit quaternion.
    pub rotation: UnitQuaternion<f64>,
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl Pose {
    /// Create an identity pose (origin, no rotation).
    #[must_use]
    pub fn identity() -> Self {
        Self {
            position: Point3::origin(),
            rotation: UnitQuaternion::identity(),
        }
    }

    /// Create a pose from position only (identity rotation).
    #[must_use]
    pub fn from_position(position: Point3<f64>) -> Self {
        Self {
            position,
            rotation: UnitQuaternion::identity(),
        }
    }

    /// Create a pose from position and rotation.
    #[must_use]
    pub const fn from_position_rotation(
        position: Point3<f64>,
        rotation: UnitQuaternion<f64>,
    ) -> Self {
        Self { position, rotation }
    }

    /// Create a pose from a translation and fixed-axis roll, pitch, yaw (radians).
    ///
    /// The rotation is `Rz(yaw) * Ry(pitch) * Rx(roll)`.
    #[must_use]
    pub fn from_xyz_rpy(xyz: Vector3<f64>, rpy: Vector3<f64>) -> Self {
        Self {
            position: Point3::from(xyz),
            rotation: UnitQuaternion::from_euler_angles(rpy.x, rpy.y, rpy.z),
        }
    }

    /// Same as [`Pose::from_xyz_rpy`] with the angles given in degrees.
    #[must_use]
    pub fn from_xyz_rpy_degrees(xyz: Vector3<f64>, rpy_deg: Vector3<f64>) -> Self {
        Self::from_xyz_rpy(xyz, rpy_deg.map(f64::to_radians))
    }

    /// Create a pose from an isometry.
    #[must_use]
    pub fn from_isometry(iso: Isometry3<f64>) -> Self {
        Self {
            position: Point3::from(iso.translation.vector),
            rotation: iso.rotation,
        }
    }

    /// Convert to an isometry.
    #[must_use]
    pub fn to_isometry(&self) -> Isometry3<f64> {
        Isometry3::from_parts(self.position.coords.into(), self.rotation)
    }

    /// Translation as a plain vector.
    #[must_use]
    pub fn xyz(&self) -> Vector3<f64> {
        self.position.coords
    }

    /// Fixed-axis roll, pitch, yaw in radians.
    #[must_use]
    pub fn rpy(&self) -> Vector3<f64> {
        let (roll, pitch, yaw) = self.rotation.euler_angles();
        Vector3::new(roll, pitch, yaw)
    }

    /// Fixed-axis roll, pitch, yaw in degrees.
    #[must_use]
    pub fn rpy_degrees(&self) -> Vector3<f64> {
        self.rpy().map(f64::to_degrees)
    }

    /// Transform a point from local to parent coordinates.
    #[must_use]
    pub fn transform_point(&self, local: &Point3<f64>) -> Point3<f64> {
        self.position + self.rotation * local.coords
    }

    /// Transform a vector from local to parent coordinates (rotation only).
    #[must_use]
    pub fn transform_vector(&self, local: &Vector3<f64>) -> Vector3<f64> {
        self.rotation * local
    }

    /// Compute the inverse pose.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let inv_rotation = self.rotation.inverse();
        Self {
            position: Point3::from(-(inv_rotation * self.position.coords)),
            rotation: inv_rotation,
        }
    }

    /// Compose two poses: self * other.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            position: self.transform_point(&other.position),
            rotation: self.rotation * other.rotation,
        }
    }

    /// Express this pose in the frame described by `frame`.
    ///
    /// Both poses must be expressed in the same parent frame.
    #[must_use]
    pub fn relative_to(&self, frame: &Self) -> Self {
        frame.inverse().compose(self)
    }

    /// Whether the pose is the identity within `epsilon`.
    #[must_use]
    pub fn is_identity(&self, epsilon: f64) -> bool {
        self.approx_eq(&Self::identity(), epsilon)
    }

    /// Compare positions and rotations within `epsilon`.
    ///
    /// `q` and `-q` describe the same rotation and compare equal.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        let (a, b) = (self.rotation.coords, other.rotation.coords);
        (self.position - other.position).norm() <= epsilon
            && ((a - b).norm() <= epsilon || (a + b).norm() <= epsilon)
    }

    /// Check if the pose contains `NaN` or `Inf` values.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.coords.iter().all(|x| x.is_finite())
            && self.rotation.coords.iter().all(|x| x.is_finite())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4};

    #[test]
    fn test_rpy_round_trip() {
        let rpy = Vector3::new(FRAC_PI_2, FRAC_PI_3, FRAC_PI_4);
        let pose = Pose::from_xyz_rpy(Vector3::new(1.0, 2.0, 3.0), rpy);

        assert_relative_eq!(pose.rpy(), rpy, epsilon = 1e-12);
        assert_relative_eq!(
            pose.rpy_degrees(),
            Vector3::new(90.0, 60.0, 45.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_rpy_is_fixed_axis_xyz() {
        let pose = Pose::from_xyz_rpy(Vector3::zeros(), Vector3::new(0.1, 0.2, 0.3));
        let rx = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 0.1);
        let ry = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 0.2);
        let rz = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 0.3);

        let expected = Pose::from_position_rotation(Point3::origin(), rz * ry * rx);
        assert!(pose.approx_eq(&expected, 1e-12));
    }

    #[test]
    fn test_inverse_compose_is_identity() {
        let pose = Pose::from_xyz_rpy_degrees(
            Vector3::new(1.0, -2.0, 0.5),
            Vector3::new(10.0, 20.0, 30.0),
        );
        assert!(pose.compose(&pose.inverse()).is_identity(1e-12));
        assert!(pose.inverse().compose(&pose).is_identity(1e-12));
    }

    #[test]
    fn test_relative_to() {
        let frame = Pose::from_xyz_rpy(
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(0.0, 0.0, FRAC_PI_2),
        );
        let world = Pose::from_position(Point3::new(0.0, 1.0, 1.0));

        // Local +X of the frame points along world +Y.
        let local = world.relative_to(&frame);
        assert_relative_eq!(
            local.position,
            Point3::new(1.0, 0.0, 0.0),
            epsilon = 1e-12
        );
        assert!(frame.compose(&local).approx_eq(&world, 1e-12));
    }

    #[test]
    fn test_rotation_stays_orthonormal() {
        let pose = Pose::from_xyz_rpy(Vector3::zeros(), Vector3::new(1.0, -0.4, 2.5));
        let m = pose.rotation.to_rotation_matrix().into_inner();
        assert_relative_eq!(
            m * m.transpose(),
            nalgebra::Matrix3::identity(),
            epsilon = 1e-12
        );
        assert!(pose.is_finite());
    }
}
