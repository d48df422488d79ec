//! Orientation handling for MJCF elements.
//!
//! MJCF lets a body, geom or camera state its orientation in one of five
//! ways (`quat`, `euler`, `axisangle`, `xyaxes`, `zaxis`). [`MjcfOrientation`]
//! gathers whichever were written and resolves them to a `UnitQuaternion`
//! under the model's compiler settings.

use nalgebra::{Matrix3, Quaternion, Rotation3, Unit, UnitQuaternion, Vector3, Vector4};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::MjcfCompiler;

const AXIS_EPSILON: f64 = 1e-10;

/// Convert an MJCF quaternion `[w, x, y, z]` to a `UnitQuaternion`.
#[must_use]
pub fn quat_from_wxyz(q: Vector4<f64>) -> UnitQuaternion<f64> {
    UnitQuaternion::from_quaternion(Quaternion::new(q[0], q[1], q[2], q[3]))
}

/// Convert a `UnitQuaternion` to MJCF `[w, x, y, z]` order.
#[must_use]
pub fn quat_to_wxyz(q: &UnitQuaternion<f64>) -> Vector4<f64> {
    let qi = q.into_inner();
    Vector4::new(qi.w, qi.i, qi.j, qi.k)
}

/// Convert euler angles (radians) to a quaternion using an MJCF rotation sequence.
///
/// Each character of `seq` selects the axis for the matching angle.
/// Lowercase letters are intrinsic (body-fixed) and post-multiply, uppercase
/// letters are extrinsic (space-fixed) and pre-multiply:
///
/// - `"xyz"` (MuJoCo default): `Rx * Ry * Rz`
/// - `"XYZ"`: `Rz * Ry * Rx`, the SDFormat roll-pitch-yaw convention
pub fn euler_seq_to_quat(euler_rad: Vector3<f64>, seq: &str) -> UnitQuaternion<f64> {
    let mut q = UnitQuaternion::identity();
    for (ch, angle) in seq.chars().zip(euler_rad.iter()) {
        let axis = match ch.to_ascii_lowercase() {
            'x' => Vector3::x_axis(),
            'y' => Vector3::y_axis(),
            _ => Vector3::z_axis(),
        };
        let r = UnitQuaternion::from_axis_angle(&axis, *angle);
        if ch.is_ascii_lowercase() {
            q *= r;
        } else {
            q = r * q;
        }
    }
    q
}

/// Check that an euler sequence is three characters from `{x,y,z,X,Y,Z}`.
#[must_use]
pub fn is_valid_eulerseq(seq: &str) -> bool {
    seq.len() == 3 && seq.chars().all(|c| matches!(c, 'x' | 'y' | 'z' | 'X' | 'Y' | 'Z'))
}

/// Minimal rotation taking +Z onto `dir`.
///
/// Returns identity for a zero-length direction. Anti-parallel directions
/// rotate half a turn about +X.
#[must_use]
pub fn z_to_direction(dir: &Vector3<f64>) -> UnitQuaternion<f64> {
    let norm = dir.norm();
    if norm < AXIS_EPSILON {
        return UnitQuaternion::identity();
    }
    let dir = dir / norm;

    let cross = Vector3::z().cross(&dir);
    let s = cross.norm();
    let axis = if s < AXIS_EPSILON {
        Vector3::x_axis()
    } else {
        Unit::new_unchecked(cross / s)
    };
    UnitQuaternion::from_axis_angle(&axis, s.atan2(dir.z))
}

/// The orientation alternatives written on one MJCF element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MjcfOrientation {
    /// Quaternion `[w, x, y, z]`.
    pub quat: Option<Vector4<f64>>,
    /// Euler angles in compiler units and sequence.
    pub euler: Option<Vector3<f64>>,
    /// Axis and angle (angle in compiler units).
    pub axisangle: Option<Vector4<f64>>,
    /// X and Y axes of the frame.
    pub xyaxes: Option<[f64; 6]>,
    /// Z axis of the frame.
    pub zaxis: Option<Vector3<f64>>,
}

impl MjcfOrientation {
    /// Resolve to a single rotation.
    ///
    /// When several alternatives are present the first of
    /// `euler`, `axisangle`, `xyaxes`, `zaxis`, `quat` wins. No alternative
    /// means identity.
    #[must_use]
    pub fn resolve(&self, compiler: &MjcfCompiler) -> UnitQuaternion<f64> {
        if let Some(euler) = self.euler {
            let euler_rad = euler.map(|a| compiler.angle.to_radians(a));
            euler_seq_to_quat(euler_rad, &compiler.eulerseq)
        } else if let Some(aa) = self.axisangle {
            let axis = Vector3::new(aa.x, aa.y, aa.z);
            if axis.norm() < AXIS_EPSILON {
                return UnitQuaternion::identity();
            }
            UnitQuaternion::from_axis_angle(
                &Unit::new_normalize(axis),
                compiler.angle.to_radians(aa.w),
            )
        } else if let Some(xy) = self.xyaxes {
            Self::from_xyaxes(&xy)
        } else if let Some(z) = self.zaxis {
            z_to_direction(&z)
        } else if let Some(q) = self.quat {
            quat_from_wxyz(q)
        } else {
            UnitQuaternion::identity()
        }
    }

    // Gram-Schmidt on the given axes.
    fn from_xyaxes(xy: &[f64; 6]) -> UnitQuaternion<f64> {
        let x = Vector3::new(xy[0], xy[1], xy[2]);
        let x_norm = x.norm();
        if x_norm < AXIS_EPSILON {
            return UnitQuaternion::identity();
        }
        let x = x / x_norm;

        let y = Vector3::new(xy[3], xy[4], xy[5]);
        let y = y - x * x.dot(&y);
        let y_norm = y.norm();
        if y_norm < AXIS_EPSILON {
            return UnitQuaternion::identity();
        }
        let y = y / y_norm;

        let rot = Matrix3::from_columns(&[x, y, x.cross(&y)]);
        UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(rot))
    }
}
