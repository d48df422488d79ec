//! MJCF to SDFormat conversion.
//!
//! Flattens the nested MJCF body tree into the links and joints of one
//! SDFormat model, and turns the worldbody into a separate static model.
//!
//! ## MJCF → SDFormat Mapping
//!
//! | MJCF | SDFormat |
//! |------|----------|
//! | `<mujoco model>` | `<model>` (named `model` when anonymous) |
//! | `<worldbody>` geoms and cameras | static model with one link |
//! | `<worldbody>` lights | world lights |
//! | `<body>` | `<link>`, pose relative to the parent link |
//! | `<joint type="hinge">` | revolute joint |
//! | `<joint type="slide">` | prismatic joint |
//! | `<joint type="ball">` | ball joint |
//! | `<freejoint>` | no joint |
//! | body without joints | fixed joint from its parent |
//! | `<geom>` | `<collision>` and/or `<visual>` |
//! | `<camera>` | camera `<sensor>` |
//! | `<site>` with accelerometer or gyro | imu `<sensor>` |
//! | `<option>` gravity, magnetic, wind | world gravity, magnetic field, wind |
//!
//! For every body the joints are emitted before its link, and links appear
//! in depth-first pre-order.
//!
//! MJCF body and joint names live in separate namespaces, while SDFormat
//! links and joints share one frame namespace. A joint named like any body
//! gets a suffix (`elbow` → `elbow_0`).

use std::collections::HashSet;

use sim_mjcf::{MjcfBody, MjcfGeom, MjcfGeomType, MjcfJoint, MjcfJointType, MjcfModel};
use sim_sdf::{
    SdfCollision, SdfJoint, SdfJointAxis, SdfJointLimit, SdfJointType, SdfLink, SdfModel,
    SdfVisual, SdfWorld, SemanticPose, WORLD_FRAME,
};
use sim_types::Pose;
use nalgebra::{Point3, Vector3};
use tracing::{debug, warn};

use crate::collaborators::Collaborators;
use crate::config::{ConversionOptions, GeomClass};
use crate::error::Result;
use crate::naming::{ElementRole, NamingAllocator, unique_name};
use crate::plugins::world_system_plugins;
use crate::pose::{mjcf_body_pose, mjcf_camera_pose, mjcf_geom_pose, mjcf_site_pose};
use crate::shape::{fromto_pose, mjcf_geom_to_sdf};

/// Base name of the model holding the worldbody.
pub const STATIC_MODEL_NAME: &str = "static";

/// Name of the single link of the static model.
pub const STATIC_LINK_NAME: &str = "static_link";

/// Convert an MJCF model to an SDFormat world with default options.
///
/// # Errors
///
/// See [`mjcf_to_sdf_with`].
///
/// # Example
///
/// ```
/// use sim_convert::mjcf_to_sdf;
/// use sim_mjcf::{MjcfBody, MjcfGeom, MjcfModel};
/// use nalgebra::Vector3;
///
/// let model = MjcfModel::new("crate").with_body(
///     MjcfBody::new("box").with_geom(MjcfGeom::box_shape(Vector3::new(1.0, 1.0, 1.0))),
/// );
///
/// let world = mjcf_to_sdf(&model).expect("should convert");
/// let sdf_model = world.model("crate").expect("articulated model");
/// assert_eq!(sdf_model.links[0].name, "box");
/// assert_eq!(sdf_model.joints[0].name, "world_box_fixed");
/// ```
pub fn mjcf_to_sdf(model: &MjcfModel) -> Result<SdfWorld> {
    mjcf_to_sdf_with(model, &ConversionOptions::default(), &Collaborators::default())
}

/// Convert an MJCF model to an SDFormat world.
///
/// The world holds the static worldbody model followed by the articulated
/// model.
///
/// # Errors
///
/// - [`ConvertError::Mjcf`](crate::ConvertError::Mjcf) when the model fails
///   validation or a geom size is malformed
/// - [`ConvertError::UnsupportedShape`](crate::ConvertError::UnsupportedShape)
///   for mesh, hfield and sdf geoms, unless
///   [`ConversionOptions::skip_unsupported_geometry`] is set
pub fn mjcf_to_sdf_with(
    model: &MjcfModel,
    options: &ConversionOptions,
    collaborators: &Collaborators<'_>,
) -> Result<SdfWorld> {
    sim_mjcf::validate(model)?;
    Converter::new(model, options, collaborators).convert()
}

/// Internal converter state.
struct Converter<'a> {
    model: &'a MjcfModel,
    options: &'a ConversionOptions,
    collaborators: &'a Collaborators<'a>,
    names: NamingAllocator,
    /// Declared body names
    body_names: HashSet<String>,
    /// Link and joint names in use, declared names included
    frame_names: HashSet<String>,
}

impl<'a> Converter<'a> {
    fn new(
        model: &'a MjcfModel,
        options: &'a ConversionOptions,
        collaborators: &'a Collaborators<'a>,
    ) -> Self {
        let bodies = model.all_bodies();
        let body_names: HashSet<String> = bodies
            .iter()
            .filter(|b| !b.name.is_empty())
            .map(|b| b.name.clone())
            .collect();
        let mut frame_names = body_names.clone();
        frame_names.extend(
            bodies
                .iter()
                .flat_map(|b| b.joints.iter())
                .filter(|j| !j.name.is_empty())
                .map(|j| j.name.clone()),
        );

        Self {
            model,
            options,
            collaborators,
            names: NamingAllocator::new(),
            body_names,
            frame_names,
        }
    }

    fn convert(mut self) -> Result<SdfWorld> {
        let source = self.model;
        let mut world = SdfWorld::default();

        let option = &source.option;
        world.gravity = option.effective_gravity();
        world.magnetic_field = option.magnetic;
        world.wind = option.wind;

        for light in &source.worldbody.lights {
            let name = self.names.name_for(ElementRole::Light, light.name.as_deref());
            if let Some(light) = self.collaborators.lights.light_to_sdf(light, name) {
                world.lights.push(light);
            }
        }

        world.models.push(self.convert_worldbody()?);

        let mut model = SdfModel::new(self.options.model_name(&source.name));
        for body in &source.worldbody.children {
            self.convert_body(body, None, &mut model)?;
        }

        if self.options.export_world_plugins {
            world.plugins.extend(world_system_plugins());
        }

        world.models.push(model);
        Ok(world)
    }

    fn convert_worldbody(&mut self) -> Result<SdfModel> {
        let source = self.model;
        let worldbody = &source.worldbody;
        let mut geom_names: HashSet<String> = worldbody
            .geoms
            .iter()
            .filter_map(|g| g.name.clone())
            .collect();
        let name = unique_name(STATIC_MODEL_NAME, &mut geom_names);

        let mut link = SdfLink::new(STATIC_LINK_NAME);
        self.add_attachments(worldbody, &mut link)?;
        debug!(
            model = %name,
            collisions = link.collisions.len(),
            visuals = link.visuals.len(),
            "converted worldbody"
        );

        Ok(SdfModel::new(name).with_static(true).with_link(link))
    }

    fn convert_body(
        &mut self,
        body: &MjcfBody,
        parent: Option<&str>,
        out: &mut SdfModel,
    ) -> Result<()> {
        let name = if body.name.is_empty() {
            let base = self.names.name_for(ElementRole::Body, None);
            unique_name(&base, &mut self.frame_names)
        } else {
            body.name.clone()
        };
        let parent_name = parent.unwrap_or(WORLD_FRAME);
        debug!(body = %name, parent = %parent_name, "converting body");

        let pose = mjcf_body_pose(body, &self.model.compiler);
        let mut link = SdfLink::new(&name).with_pose(SemanticPose {
            pose,
            relative_to: parent.map(str::to_string),
        });
        self.add_attachments(body, &mut link)?;

        for light in &body.lights {
            let light_name = self.names.name_for(ElementRole::Light, light.name.as_deref());
            if let Some(light) = self.collaborators.lights.light_to_sdf(light, light_name) {
                link.lights.push(light);
            }
        }

        for joint in &body.joints {
            if let Some(joint) = self.convert_joint(joint, parent_name, &name) {
                out.joints.push(joint);
            }
        }
        if body.joints.is_empty() {
            let joint_name = unique_name(
                &format!("{parent_name}_{name}_fixed"),
                &mut self.frame_names,
            );
            out.joints.push(SdfJoint::fixed(joint_name, parent_name, &name));
        }

        out.links.push(link);

        for child in &body.children {
            self.convert_body(child, Some(&name), out)?;
        }
        Ok(())
    }

    fn convert_joint(&mut self, joint: &MjcfJoint, parent: &str, child: &str) -> Option<SdfJoint> {
        let joint_type = match joint.effective_type() {
            MjcfJointType::Hinge => SdfJointType::Revolute,
            MjcfJointType::Slide => SdfJointType::Prismatic,
            MjcfJointType::Ball => SdfJointType::Ball,
            MjcfJointType::Free => {
                debug!(body = %child, "free joint, link left floating");
                return None;
            }
        };

        let name = if joint.name.is_empty() {
            let base = self.names.name_for(ElementRole::Joint, None);
            unique_name(&base, &mut self.frame_names)
        } else if self.body_names.contains(&joint.name) {
            let renamed = unique_name(&joint.name, &mut self.frame_names);
            debug!(joint = %joint.name, renamed = %renamed, "joint name shared with a body");
            renamed
        } else {
            joint.name.clone()
        };

        let pos = joint.pos.unwrap_or_else(Vector3::zeros);
        let mut sdf_joint = SdfJoint::new(name, joint_type, parent, child)
            .with_pose(Pose::from_position(Point3::from(pos)));

        if joint_type != SdfJointType::Ball {
            let mut axis = SdfJointAxis::new(joint.axis.unwrap_or_else(Vector3::z));
            if let Some((lower, upper)) = joint.effective_range() {
                axis.limit = match joint_type {
                    SdfJointType::Revolute => {
                        let angle = self.model.compiler.angle;
                        SdfJointLimit::new(angle.to_radians(lower), angle.to_radians(upper))
                    }
                    _ => SdfJointLimit::new(lower, upper),
                };
            }
            axis.damping = joint.damping.unwrap_or(0.0);
            axis.friction = joint.frictionloss.unwrap_or(0.0);
            axis.spring_stiffness = joint.stiffness.unwrap_or(0.0);
            sdf_joint = sdf_joint.with_axis(axis);
        }
        Some(sdf_joint)
    }

    /// Add the geoms, cameras and sensor sites of `body` to `link`.
    fn add_attachments(&mut self, body: &MjcfBody, link: &mut SdfLink) -> Result<()> {
        for geom in &body.geoms {
            match self.add_geom(geom, link) {
                Ok(()) => {}
                Err(err) if self.options.skip_unsupported_geometry && err.is_attachment_error() => {
                    warn!(
                        link = %link.name,
                        geom = geom.name.as_deref().unwrap_or("<unnamed>"),
                        error = %err,
                        "skipping geom"
                    );
                }
                Err(err) => return Err(err),
            }
        }

        for camera in &body.cameras {
            let name = self.names.name_for(ElementRole::Sensor, camera.name.as_deref());
            let pose = mjcf_camera_pose(camera, &self.model.compiler);
            if let Some(sensor) = self.collaborators.sensors.camera_to_sdf(camera, name, pose) {
                link.sensors.push(sensor);
            }
        }

        let source = self.model;
        for site in &body.sites {
            let mounted: Vec<_> = source.sensors_on(&site.name).collect();
            if mounted.is_empty() {
                debug!(site = %site.name, "site without sensors omitted");
                continue;
            }
            let name = self.names.name_for(ElementRole::Sensor, Some(&site.name));
            let pose = mjcf_site_pose(site, &source.compiler);
            if let Some(sensor) = self
                .collaborators
                .sensors
                .site_to_sdf(site, &mounted, name, pose)
            {
                link.sensors.push(sensor);
            }
        }
        Ok(())
    }

    fn add_geom(&mut self, geom: &MjcfGeom, link: &mut SdfLink) -> Result<()> {
        let geometry = mjcf_geom_to_sdf(geom)?;
        let pose = self.geom_pose(geom);

        let class = self.options.classify(geom);
        if class.has_collision() {
            link.collisions.push(SdfCollision {
                name: self
                    .names
                    .name_for(ElementRole::Collision, geom.name.as_deref()),
                pose: SemanticPose::new(pose),
                geometry: geometry.clone(),
            });
        }
        if class.has_visual() {
            let material = geom
                .material
                .as_deref()
                .and_then(|name| self.model.material(name));
            link.visuals.push(SdfVisual {
                name: self.names.name_for(ElementRole::Visual, geom.name.as_deref()),
                pose: SemanticPose::new(pose),
                geometry,
                material: self.collaborators.materials.material_to_sdf(geom, material),
            });
        }
        if class == GeomClass::Both {
            debug!(link = %link.name, "geom emitted as collision and visual");
        }
        Ok(())
    }

    fn geom_pose(&self, geom: &MjcfGeom) -> Pose {
        let segment = matches!(
            geom.effective_type(),
            MjcfGeomType::Capsule | MjcfGeomType::Cylinder
        );
        match geom.fromto {
            Some(fromto) if segment && self.options.align_fromto => fromto_pose(&fromto),
            _ => mjcf_geom_pose(geom, &self.model.compiler),
        }
    }
}
