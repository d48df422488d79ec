//! MJCF validation utilities.
//!
//! Validates the kinematic structure, geom sizes and options of an MJCF model
//! before it is converted.

use std::collections::{HashMap, HashSet};

use crate::error::{MjcfError, Result};
use crate::orientation::is_valid_eulerseq;
use nalgebra::Vector4;

use crate::types::{MjcfBody, MjcfGeom, MjcfGeomType, MjcfModel, MjcfOption};

const MIN_QUAT_NORM: f64 = 1e-10;

/// Validation result containing the flattened body tree structure.
#[derive(Debug)]
pub struct ValidationResult {
    /// Named bodies in pre-order (parents before children).
    pub sorted_bodies: Vec<String>,
    /// Map from body name to parent body name. Top-level bodies are absent.
    pub body_parent: HashMap<String, String>,
    /// All named joints.
    pub joint_names: Vec<String>,
    /// Map from joint name to body name.
    pub joint_to_body: HashMap<String, String>,
}

/// Validate MJCF simulation options.
///
/// # Errors
///
/// Returns an error if the timestep is not positive or a vector option has
/// non-finite components.
pub fn validate_option(option: &MjcfOption) -> Result<()> {
    if !option.timestep.is_finite() || option.timestep <= 0.0 {
        return Err(MjcfError::invalid_option(
            "timestep",
            format!("must be positive and finite, got {}", option.timestep),
        ));
    }

    for (name, value) in [
        ("gravity", &option.gravity),
        ("wind", &option.wind),
        ("magnetic", &option.magnetic),
    ] {
        if !value.iter().all(|v| v.is_finite()) {
            return Err(MjcfError::invalid_option(name, "must have finite components"));
        }
    }

    Ok(())
}

/// Number of `size` values a geom type reads, ignoring `fromto`.
///
/// Returns `None` for types whose extent comes from an asset.
#[must_use]
pub fn required_size_len(geom_type: MjcfGeomType) -> Option<usize> {
    match geom_type {
        MjcfGeomType::Sphere => Some(1),
        MjcfGeomType::Capsule | MjcfGeomType::Cylinder | MjcfGeomType::Plane => Some(2),
        MjcfGeomType::Box | MjcfGeomType::Ellipsoid => Some(3),
        MjcfGeomType::Mesh | MjcfGeomType::Hfield | MjcfGeomType::Sdf => None,
    }
}

/// Check that a geom carries enough finite, non-negative size values.
///
/// Capsules and cylinders given by `fromto` only need a radius.
///
/// # Errors
///
/// Returns [`MjcfError::InvalidGeomSize`] describing the first problem found.
pub fn validate_geom_size(geom: &MjcfGeom) -> Result<()> {
    let geom_type = geom.effective_type();
    let Some(mut required) = required_size_len(geom_type) else {
        return Ok(());
    };
    if geom.fromto.is_some()
        && matches!(geom_type, MjcfGeomType::Capsule | MjcfGeomType::Cylinder)
    {
        required = 1;
    }

    if geom.size.len() < required {
        return Err(MjcfError::invalid_geom_size(
            geom_type.as_str(),
            format!("expected {required} size values, got {}", geom.size.len()),
        ));
    }
    if let Some(bad) = geom.size[..required]
        .iter()
        .find(|v| !v.is_finite() || **v < 0.0)
    {
        return Err(MjcfError::invalid_geom_size(
            geom_type.as_str(),
            format!("size values must be non-negative and finite, got {bad}"),
        ));
    }
    if let Some(fromto) = geom.fromto {
        if !fromto.iter().all(|v| v.is_finite()) {
            return Err(MjcfError::invalid_geom_size(
                geom_type.as_str(),
                "fromto must have finite components",
            ));
        }
    }
    Ok(())
}

/// Check that a `quat` attribute can be normalized.
///
/// # Errors
///
/// Returns [`MjcfError::InvalidAttribute`] when a component is not finite or
/// the quaternion has (near) zero norm.
pub fn validate_quat(quat: &Vector4<f64>, element: impl Into<String>) -> Result<()> {
    if !quat.iter().all(|v| v.is_finite()) {
        return Err(MjcfError::invalid_attribute(
            "quat",
            element,
            "must have finite components",
        ));
    }
    if quat.norm() < MIN_QUAT_NORM {
        return Err(MjcfError::invalid_attribute("quat", element, "must be non-zero"));
    }
    Ok(())
}

#[derive(Default)]
struct Traversal {
    body_names: HashSet<String>,
    joint_names: HashSet<String>,
    site_names: HashSet<String>,
    result_bodies: Vec<String>,
    body_parent: HashMap<String, String>,
    joint_order: Vec<String>,
    joint_to_body: HashMap<String, String>,
}

impl Traversal {
    fn visit(&mut self, model: &MjcfModel, body: &MjcfBody, parent: Option<&str>) -> Result<()> {
        // Anonymous bodies are allowed and get names during conversion.
        if !body.name.is_empty() {
            if !self.body_names.insert(body.name.clone()) {
                return Err(MjcfError::DuplicateBody(body.name.clone()));
            }
            self.result_bodies.push(body.name.clone());
            if let Some(parent) = parent {
                self.body_parent
                    .insert(body.name.clone(), parent.to_string());
            }
        }

        for joint in &body.joints {
            if joint.name.is_empty() {
                continue;
            }
            if !self.joint_names.insert(joint.name.clone()) {
                return Err(MjcfError::DuplicateJoint(joint.name.clone()));
            }
            self.joint_to_body
                .insert(joint.name.clone(), body.name.clone());
            self.joint_order.push(joint.name.clone());
        }

        validate_quat(&body.quat, format!("body '{}'", body.name))?;
        self.check_attachments(model, body)?;

        let name = (!body.name.is_empty()).then_some(body.name.as_str());
        for child in &body.children {
            self.visit(model, child, name)?;
        }
        Ok(())
    }

    fn check_attachments(&mut self, model: &MjcfModel, body: &MjcfBody) -> Result<()> {
        for site in &body.sites {
            if !self.site_names.insert(site.name.clone()) {
                return Err(MjcfError::DuplicateSite(site.name.clone()));
            }
            if let Some(quat) = &site.quat {
                validate_quat(quat, format!("site '{}'", site.name))?;
            }
        }
        for camera in &body.cameras {
            if let Some(quat) = &camera.quat {
                let name = camera.name.as_deref().unwrap_or("<unnamed>");
                validate_quat(quat, format!("camera '{name}'"))?;
            }
        }
        check_geoms(model, body)
    }
}

fn check_geoms(model: &MjcfModel, body: &MjcfBody) -> Result<()> {
    for geom in &body.geoms {
        validate_geom_size(geom)?;
        if let Some(quat) = &geom.quat {
            let geom_name = geom.name.as_deref().unwrap_or("<unnamed>");
            validate_quat(quat, format!("geom '{geom_name}'"))?;
        }
        if let Some(material) = &geom.material {
            if model.material(material).is_none() {
                let geom_name = geom.name.as_deref().unwrap_or("<unnamed>");
                return Err(MjcfError::undefined_material(
                    material,
                    format!("geom '{geom_name}' of body '{}'", body.name),
                ));
            }
        }
    }
    Ok(())
}

/// Validate an MJCF model.
///
/// This checks:
/// - Valid simulation options and compiler euler sequence
/// - No duplicate body names (anonymous bodies are skipped)
/// - No duplicate joint names
/// - Geom sizes match their types
/// - Geom materials reference defined assets
/// - Every `quat` is finite and non-zero
/// - No duplicate site names, and sensors reference defined sites
///
/// # Errors
///
/// Returns an error if validation fails.
pub fn validate(model: &MjcfModel) -> Result<ValidationResult> {
    validate_option(&model.option)?;
    if !is_valid_eulerseq(&model.compiler.eulerseq) {
        return Err(MjcfError::invalid_attribute(
            "eulerseq",
            "compiler",
            format!(
                "expected 3 characters from xyzXYZ, got '{}'",
                model.compiler.eulerseq
            ),
        ));
    }

    let mut traversal = Traversal::default();
    traversal.check_attachments(model, &model.worldbody)?;
    for body in &model.worldbody.children {
        traversal.visit(model, body, None)?;
    }

    for sensor in &model.sensors {
        if !traversal.site_names.contains(&sensor.site) {
            let name = sensor.name.as_deref().unwrap_or(sensor.sensor_type.as_str());
            return Err(MjcfError::undefined_site(&sensor.site, name));
        }
    }

    Ok(ValidationResult {
        sorted_bodies: traversal.result_bodies,
        body_parent: traversal.body_parent,
        joint_names: traversal.joint_order,
        joint_to_body: traversal.joint_to_body,
    })
}
