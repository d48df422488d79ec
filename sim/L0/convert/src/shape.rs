//! Primitive shape conversion.
//!
//! SDFormat sizes are full extents, MJCF sizes are half extents:
//!
//! | Shape | SDFormat | MJCF `size` |
//! |-------|----------|-------------|
//! | box | `size` | `size / 2` |
//! | sphere | `radius` | `radius` |
//! | capsule, cylinder | `radius`, `length` | `radius`, `length / 2` (or `fromto`) |
//! | ellipsoid | `radii` | `radii` |
//! | plane | `size` (2D) | `size / 2`, `0` |
//!
//! Meshes, heightmaps, height fields and SDFs have no primitive counterpart
//! and fail with [`ConvertError::UnsupportedShape`].

use nalgebra::{Point3, Vector2, Vector3};
use sim_mjcf::{MjcfGeom, MjcfGeomType, validate_geom_size, z_to_direction};
use sim_sdf::SdfGeometry;
use sim_types::Pose;
use tracing::warn;

use crate::error::{ConvertError, Result};

/// MJCF geom type and size parameters produced from an SDFormat geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct MjcfShape {
    /// Geom type.
    pub geom_type: MjcfGeomType,
    /// Size parameters.
    pub size: Vec<f64>,
    /// Extra placement in the geom frame (non +Z plane normals).
    pub offset: Pose,
}

impl MjcfShape {
    fn new(geom_type: MjcfGeomType, size: Vec<f64>) -> Self {
        Self {
            geom_type,
            size,
            offset: Pose::identity(),
        }
    }
}

/// Parse an MJCF geom type string.
///
/// # Errors
///
/// Returns [`ConvertError::UnsupportedShape`] for unknown type strings.
pub fn parse_geom_type(type_str: &str) -> Result<MjcfGeomType> {
    MjcfGeomType::from_str(type_str)
        .ok_or_else(|| ConvertError::unsupported_shape(format!("unknown geom type '{type_str}'")))
}

fn fromto_points(fromto: &[f64; 6]) -> (Point3<f64>, Point3<f64>) {
    (
        Point3::new(fromto[0], fromto[1], fromto[2]),
        Point3::new(fromto[3], fromto[4], fromto[5]),
    )
}

/// Distance between the two endpoints of a `fromto` segment.
#[must_use]
pub fn fromto_length(fromto: &[f64; 6]) -> f64 {
    let (from, to) = fromto_points(fromto);
    (to - from).norm()
}

/// Pose of a `fromto` segment: its midpoint, with local +Z along the segment.
#[must_use]
pub fn fromto_pose(fromto: &[f64; 6]) -> Pose {
    let (from, to) = fromto_points(fromto);
    let mid = Point3::from((from.coords + to.coords) / 2.0);
    Pose::from_position_rotation(mid, z_to_direction(&(to - from)))
}

/// Convert an MJCF geom to SDFormat geometry.
///
/// # Errors
///
/// - [`ConvertError::UnsupportedShape`] for mesh, hfield and sdf geoms
/// - [`ConvertError::Mjcf`] when `size` is too short for the geom type
pub fn mjcf_geom_to_sdf(geom: &MjcfGeom) -> Result<SdfGeometry> {
    let geom_type = geom.effective_type();
    if matches!(
        geom_type,
        MjcfGeomType::Mesh | MjcfGeomType::Hfield | MjcfGeomType::Sdf
    ) {
        return Err(ConvertError::unsupported_shape(geom_type));
    }
    validate_geom_size(geom)?;

    let size = &geom.size;
    let geometry = match geom_type {
        MjcfGeomType::Box => {
            warn_ignored_fromto(geom);
            SdfGeometry::Box {
                size: Vector3::new(size[0], size[1], size[2]) * 2.0,
            }
        }
        MjcfGeomType::Sphere => SdfGeometry::Sphere { radius: size[0] },
        MjcfGeomType::Capsule => SdfGeometry::Capsule {
            radius: size[0],
            length: segment_length(geom),
        },
        MjcfGeomType::Cylinder => SdfGeometry::Cylinder {
            radius: size[0],
            length: segment_length(geom),
        },
        MjcfGeomType::Ellipsoid => {
            warn_ignored_fromto(geom);
            SdfGeometry::Ellipsoid {
                radii: Vector3::new(size[0], size[1], size[2]),
            }
        }
        MjcfGeomType::Plane => SdfGeometry::Plane {
            normal: Vector3::z(),
            size: Vector2::new(size[0], size[1]) * 2.0,
        },
        MjcfGeomType::Mesh | MjcfGeomType::Hfield | MjcfGeomType::Sdf => {
            return Err(ConvertError::unsupported_shape(geom_type));
        }
    };
    Ok(geometry)
}

fn segment_length(geom: &MjcfGeom) -> f64 {
    match &geom.fromto {
        Some(fromto) => fromto_length(fromto),
        None => geom.size[1] * 2.0,
    }
}

fn warn_ignored_fromto(geom: &MjcfGeom) {
    if geom.fromto.is_some() {
        warn!(
            geom = geom.name.as_deref().unwrap_or("<unnamed>"),
            geom_type = %geom.effective_type(),
            "fromto ignored, extent taken from size"
        );
    }
}

/// Convert SDFormat geometry to an MJCF geom type and size.
///
/// Returns `Ok(None)` for empty geometry.
///
/// # Errors
///
/// Returns [`ConvertError::UnsupportedShape`] for mesh and heightmap geometry.
pub fn sdf_geometry_to_mjcf(geometry: &SdfGeometry) -> Result<Option<MjcfShape>> {
    let shape = match geometry {
        SdfGeometry::Empty => return Ok(None),
        SdfGeometry::Box { size } => {
            let half = size / 2.0;
            MjcfShape::new(MjcfGeomType::Box, vec![half.x, half.y, half.z])
        }
        SdfGeometry::Sphere { radius } => MjcfShape::new(MjcfGeomType::Sphere, vec![*radius]),
        SdfGeometry::Capsule { radius, length } => {
            MjcfShape::new(MjcfGeomType::Capsule, vec![*radius, length / 2.0])
        }
        SdfGeometry::Cylinder { radius, length } => {
            MjcfShape::new(MjcfGeomType::Cylinder, vec![*radius, length / 2.0])
        }
        SdfGeometry::Ellipsoid { radii } => {
            MjcfShape::new(MjcfGeomType::Ellipsoid, vec![radii.x, radii.y, radii.z])
        }
        SdfGeometry::Plane { normal, size } => {
            // The third value is the rendering grid spacing.
            let mut shape =
                MjcfShape::new(MjcfGeomType::Plane, vec![size.x / 2.0, size.y / 2.0, 0.0]);
            shape.offset = Pose::from_position_rotation(Point3::origin(), z_to_direction(normal));
            shape
        }
        SdfGeometry::Mesh { .. } | SdfGeometry::Heightmap { .. } => {
            return Err(ConvertError::unsupported_shape(geometry.kind()));
        }
    };
    Ok(Some(shape))
}
