//! SDFormat to MJCF conversion.
//!
//! Rebuilds the nested MJCF body tree from the flat link and joint lists of
//! SDFormat models. Each root link becomes a child of the worldbody, and each
//! joint nests its child link inside its parent link.
//!
//! ## SDFormat → MJCF Mapping
//!
//! | SDFormat | MJCF |
//! |----------|------|
//! | `<world>` gravity, magnetic field, wind | `<option>` |
//! | `<world>` lights | worldbody lights |
//! | `<model>` | bodies under the worldbody |
//! | `<link>` | `<body>`, pose relative to the parent link |
//! | revolute, continuous joint | `<joint type="hinge">` |
//! | prismatic joint | `<joint type="slide">` |
//! | ball joint | `<joint type="ball">` |
//! | fixed joint | nothing (child rigidly nested) |
//! | root link of a non-static model | `<freejoint>` |
//! | `<collision>` | `<geom>` in the collision group |
//! | `<visual>` | `<geom>` in the visual group, contacts disabled |
//! | camera `<sensor>` | `<camera>` |
//! | imu `<sensor>` | `<site>` with an accelerometer and a gyro |
//!
//! Output poses are written as `pos` and `euler` in degrees under
//! [`MjcfCompiler::fixed_axis_degrees`]. Names are unique per MJCF element
//! kind across all converted models.

use std::collections::HashSet;

use sim_mjcf::{
    MjcfBody, MjcfCamera, MjcfCompiler, MjcfGeom, MjcfJoint, MjcfJointType, MjcfModel, MjcfSensor,
    MjcfSite,
};
use sim_sdf::{
    FrameGraph, MODEL_FRAME, SdfGeometry, SdfJoint, SdfJointType, SdfLink, SdfMaterial, SdfModel,
    SdfWorld, SemanticPose, ValidationResult,
};
use tracing::{debug, warn};

use crate::collaborators::{Collaborators, MjcfSensorMount};
use crate::config::ConversionOptions;
use crate::error::{ConvertError, Result};
use crate::naming::{ElementRole, NamingAllocator, unique_name};
use crate::pose::{PoseResolver, mjcf_placement};
use crate::shape::sdf_geometry_to_mjcf;

/// Convert an SDFormat world to an MJCF model with default options.
///
/// # Errors
///
/// See [`sdf_to_mjcf_with`].
pub fn sdf_to_mjcf(world: &SdfWorld) -> Result<MjcfModel> {
    sdf_to_mjcf_with(world, &ConversionOptions::default(), &Collaborators::default())
}

/// Convert an SDFormat world to an MJCF model.
///
/// World physics settings and lights go to the MJCF `<option>` and
/// worldbody, and every model is added under the worldbody in order.
///
/// # Errors
///
/// - [`ConvertError::UndefinedLink`], [`ConvertError::KinematicLoop`] or
///   [`ConvertError::NoRootLink`] for malformed kinematic trees
/// - [`ConvertError::PoseResolution`] when a pose names an unknown frame
/// - [`ConvertError::UnsupportedShape`] for mesh and heightmap geometry,
///   unless [`ConversionOptions::skip_unsupported_geometry`] is set
pub fn sdf_to_mjcf_with(
    world: &SdfWorld,
    options: &ConversionOptions,
    collaborators: &Collaborators<'_>,
) -> Result<MjcfModel> {
    let mut converter = Converter::new(options.model_name(&world.name), options, collaborators);
    converter.add_world(world);
    for model in &world.models {
        converter.add_model(model)?;
    }
    Ok(converter.output)
}

/// Convert a single SDFormat model to an MJCF model with default options.
///
/// # Errors
///
/// See [`sdf_model_to_mjcf_with`].
///
/// # Example
///
/// ```
/// use sim_convert::sdf_model_to_mjcf;
/// use sim_sdf::{SdfCollision, SdfGeometry, SdfLink, SdfModel};
/// use nalgebra::Vector3;
///
/// let model = SdfModel::new("crate").with_link(SdfLink::new("box").with_collision(
///     SdfCollision::new("c1", SdfGeometry::Box { size: Vector3::new(2.0, 2.0, 2.0) }),
/// ));
///
/// let mjcf = sdf_model_to_mjcf(&model).expect("should convert");
/// let body = mjcf.body("box").expect("body");
/// assert_eq!(body.geoms[0].size, vec![1.0, 1.0, 1.0]);
/// assert!(body.is_free());
/// ```
pub fn sdf_model_to_mjcf(model: &SdfModel) -> Result<MjcfModel> {
    sdf_model_to_mjcf_with(model, &ConversionOptions::default(), &Collaborators::default())
}

/// Convert a single SDFormat model to an MJCF model.
///
/// # Errors
///
/// Same as [`sdf_to_mjcf_with`].
pub fn sdf_model_to_mjcf_with(
    model: &SdfModel,
    options: &ConversionOptions,
    collaborators: &Collaborators<'_>,
) -> Result<MjcfModel> {
    let mut converter = Converter::new(options.model_name(&model.name), options, collaborators);
    converter.add_model(model)?;
    Ok(converter.output)
}

/// Per-model lookups shared by the recursive walk.
struct ModelContext<'m> {
    model: &'m SdfModel,
    structure: &'m ValidationResult,
    resolver: PoseResolver<'m>,
}

/// A collision or visual attached to a link.
struct Attachment<'m> {
    name: &'m str,
    pose: &'m SemanticPose,
    geometry: &'m SdfGeometry,
    /// `Some` for visuals, holding the material when declared.
    visual: Option<Option<&'m SdfMaterial>>,
}

/// Internal converter state.
struct Converter<'a> {
    options: &'a ConversionOptions,
    collaborators: &'a Collaborators<'a>,
    names: NamingAllocator,
    body_names: HashSet<String>,
    joint_names: HashSet<String>,
    geom_names: HashSet<String>,
    material_names: HashSet<String>,
    camera_names: HashSet<String>,
    light_names: HashSet<String>,
    site_names: HashSet<String>,
    sensor_names: HashSet<String>,
    output: MjcfModel,
}

impl<'a> Converter<'a> {
    fn new(name: &str, options: &'a ConversionOptions, collaborators: &'a Collaborators<'a>) -> Self {
        let mut output = MjcfModel::new(name);
        output.compiler = MjcfCompiler::fixed_axis_degrees();
        Self {
            options,
            collaborators,
            names: NamingAllocator::new(),
            body_names: HashSet::new(),
            joint_names: HashSet::new(),
            geom_names: HashSet::new(),
            material_names: HashSet::new(),
            camera_names: HashSet::new(),
            light_names: HashSet::new(),
            site_names: HashSet::new(),
            sensor_names: HashSet::new(),
            output,
        }
    }

    fn add_world(&mut self, world: &SdfWorld) {
        let option = &mut self.output.option;
        option.gravity = world.gravity;
        option.magnetic = world.magnetic_field;
        option.wind = world.wind;

        for light in &world.lights {
            let name = self.light_name(&light.name);
            if let Some(light) = self
                .collaborators
                .lights
                .light_to_mjcf(light, name, light.pose.pose)
            {
                self.output.worldbody.lights.push(light);
            }
        }
    }

    fn light_name(&mut self, declared: &str) -> String {
        let base = self.names.name_for(ElementRole::Light, Some(declared));
        unique_name(&base, &mut self.light_names)
    }

    fn add_model(&mut self, model: &SdfModel) -> Result<()> {
        let structure = sim_sdf::validate(model)?;
        let frames = FrameGraph::from_model(model)?;
        let ctx = ModelContext {
            model,
            structure: &structure,
            resolver: PoseResolver::new(&frames),
        };
        debug!(
            model = %model.name,
            links = model.links.len(),
            roots = structure.root_links.len(),
            "converting model"
        );

        let mut visited = HashSet::new();
        for root in &structure.root_links {
            let parent_joint = match structure.link_parent_joint.get(root) {
                Some(joint_name) => Some(
                    model
                        .joint(joint_name)
                        .ok_or_else(|| ConvertError::undefined_link(root, joint_name))?,
                ),
                None => None,
            };
            let body = self.convert_link(&ctx, root, parent_joint, &mut visited)?;
            self.output.worldbody.children.push(body);
        }
        Ok(())
    }

    fn convert_link(
        &mut self,
        ctx: &ModelContext<'_>,
        link_name: &str,
        parent_joint: Option<&SdfJoint>,
        visited: &mut HashSet<String>,
    ) -> Result<MjcfBody> {
        if !visited.insert(link_name.to_string()) {
            return Err(ConvertError::KinematicLoop(format!(
                "link '{link_name}' reached twice in model '{}'",
                ctx.model.name
            )));
        }
        let link = ctx.model.link(link_name).ok_or_else(|| {
            ConvertError::undefined_link(link_name, parent_joint.map_or("", |j| j.name.as_str()))
        })?;

        let parent_link = parent_joint
            .filter(|joint| !joint.is_world_parent())
            .map(|joint| joint.parent.as_str());
        let pose = match parent_link {
            Some(parent) => ctx.resolver.resolve(&link.pose, MODEL_FRAME, parent)?,
            None => {
                let in_model = ctx.resolver.resolve(&link.pose, MODEL_FRAME, MODEL_FRAME)?;
                ctx.model.pose.pose.compose(&in_model)
            }
        };

        let (pos, euler) = mjcf_placement(&pose);
        let mut body = MjcfBody::new(unique_name(&link.name, &mut self.body_names));
        body.pos = pos;
        body.euler = Some(euler);
        debug!(link = %link.name, body = %body.name, "converting link");

        match parent_joint {
            Some(joint) => {
                if let Some(joint) = self.convert_joint(ctx, joint)? {
                    body.joints.push(joint);
                }
            }
            None if !ctx.model.is_static => body.joints.push(MjcfJoint::free("")),
            None => {}
        }

        self.add_attachments(ctx, link, &mut body)?;

        let child_joints = ctx
            .structure
            .link_child_joints
            .get(link_name)
            .map_or(&[][..], Vec::as_slice);
        for joint_name in child_joints {
            let joint = ctx
                .model
                .joint(joint_name)
                .ok_or_else(|| ConvertError::undefined_link(link_name, joint_name))?;
            let child = self.convert_link(ctx, &joint.child, Some(joint), visited)?;
            body.children.push(child);
        }

        Ok(body)
    }

    fn convert_joint(
        &mut self,
        ctx: &ModelContext<'_>,
        joint: &SdfJoint,
    ) -> Result<Option<MjcfJoint>> {
        let joint_type = match joint.joint_type {
            SdfJointType::Revolute | SdfJointType::Continuous => MjcfJointType::Hinge,
            SdfJointType::Prismatic => MjcfJointType::Slide,
            SdfJointType::Ball => MjcfJointType::Ball,
            SdfJointType::Fixed => {
                debug!(joint = %joint.name, "fixed joint, child nested rigidly");
                return Ok(None);
            }
        };

        debug!(joint = %joint.name, joint_type = joint.joint_type.as_str(), "converting joint");
        let joint_pose = ctx.resolver.resolve(&joint.pose, &joint.child, &joint.child)?;
        let mut mjcf = MjcfJoint {
            name: unique_name(&joint.name, &mut self.joint_names),
            joint_type: Some(joint_type),
            pos: Some(joint_pose.xyz()),
            ..Default::default()
        };
        if joint_type == MjcfJointType::Ball {
            return Ok(Some(mjcf));
        }

        let axis = joint.axis.clone().unwrap_or_default();
        let axis_frame = match &axis.expressed_in {
            Some(frame) => ctx.resolver.frame_in(frame, &joint.child)?,
            None => joint_pose,
        };
        mjcf.axis = Some(axis_frame.transform_vector(&axis.xyz));

        if joint.joint_type != SdfJointType::Continuous && axis.limit.is_bounded() {
            let (lower, upper) = match joint_type {
                MjcfJointType::Hinge => (axis.limit.lower.to_degrees(), axis.limit.upper.to_degrees()),
                _ => (axis.limit.lower, axis.limit.upper),
            };
            mjcf.limited = Some(true);
            mjcf.range = Some((lower, upper));
        }
        if axis.damping > 0.0 {
            mjcf.damping = Some(axis.damping);
        }
        if axis.friction > 0.0 {
            mjcf.frictionloss = Some(axis.friction);
        }
        if axis.spring_stiffness > 0.0 {
            mjcf.stiffness = Some(axis.spring_stiffness);
        }
        Ok(Some(mjcf))
    }

    /// Add the collisions, visuals, sensors and lights of `link` to `body`.
    ///
    /// Collisions come before visuals.
    fn add_attachments(
        &mut self,
        ctx: &ModelContext<'_>,
        link: &SdfLink,
        body: &mut MjcfBody,
    ) -> Result<()> {
        let collisions = link.collisions.iter().map(|c| Attachment {
            name: &c.name,
            pose: &c.pose,
            geometry: &c.geometry,
            visual: None,
        });
        let visuals = link.visuals.iter().map(|v| Attachment {
            name: &v.name,
            pose: &v.pose,
            geometry: &v.geometry,
            visual: Some(v.material.as_ref()),
        });
        for attachment in collisions.chain(visuals) {
            self.add_geom(ctx, &link.name, &attachment, body)?;
        }

        for sensor in &link.sensors {
            let pose = ctx.resolver.resolve(&sensor.pose, &link.name, &link.name)?;
            let name = self.names.name_for(ElementRole::Sensor, Some(&sensor.name));
            match self.collaborators.sensors.sensor_to_mjcf(sensor, name, pose) {
                Some(MjcfSensorMount::Camera(camera)) => self.add_camera(camera, body),
                Some(MjcfSensorMount::Site { site, sensors }) => {
                    self.add_site(site, sensors, body);
                }
                None => {}
            }
        }

        for light in &link.lights {
            let pose = ctx.resolver.resolve(&light.pose, &link.name, &link.name)?;
            let name = self.light_name(&light.name);
            if let Some(light) = self.collaborators.lights.light_to_mjcf(light, name, pose) {
                body.lights.push(light);
            }
        }
        Ok(())
    }

    fn add_geom(
        &mut self,
        ctx: &ModelContext<'_>,
        link_name: &str,
        attachment: &Attachment<'_>,
        body: &mut MjcfBody,
    ) -> Result<()> {
        let shape = match sdf_geometry_to_mjcf(attachment.geometry) {
            Ok(Some(shape)) => shape,
            Ok(None) => {
                debug!(link = %link_name, geom = %attachment.name, "empty geometry omitted");
                return Ok(());
            }
            Err(err) if self.options.skip_unsupported_geometry && err.is_attachment_error() => {
                warn!(link = %link_name, geom = %attachment.name, error = %err, "skipping geometry");
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        let pose = ctx
            .resolver
            .resolve(attachment.pose, link_name, link_name)?
            .compose(&shape.offset);
        let (pos, euler) = mjcf_placement(&pose);

        let role = if attachment.visual.is_some() {
            ElementRole::Visual
        } else {
            ElementRole::Collision
        };
        let name = if attachment.name.is_empty() {
            let base = self.names.name_for(role, None);
            unique_name(&base, &mut self.geom_names)
        } else {
            unique_name(attachment.name, &mut self.geom_names)
        };

        let mut geom = MjcfGeom::new(shape.geom_type, shape.size)
            .with_name(name.clone())
            .with_pos(pos)
            .with_euler(euler);

        match attachment.visual {
            None => geom.group = Some(self.options.collision_group),
            Some(material) => {
                geom.group = Some(self.options.visual_group);
                geom.contype = Some(0);
                geom.conaffinity = Some(0);
                if let Some(material) = material {
                    geom.material = self.add_material(material, &name);
                }
            }
        }

        body.geoms.push(geom);
        Ok(())
    }

    fn add_camera(&mut self, mut camera: MjcfCamera, body: &mut MjcfBody) {
        camera.name = camera
            .name
            .map(|name| unique_name(&name, &mut self.camera_names));
        body.cameras.push(camera);
    }

    /// Add `site` to `body` and mount `sensors` on it.
    fn add_site(&mut self, mut site: MjcfSite, sensors: Vec<MjcfSensor>, body: &mut MjcfBody) {
        site.name = unique_name(&site.name, &mut self.site_names);
        for mut sensor in sensors {
            sensor.site.clone_from(&site.name);
            sensor.name = sensor
                .name
                .map(|name| unique_name(&name, &mut self.sensor_names));
            self.output.sensors.push(sensor);
        }
        debug!(body = %body.name, site = %site.name, "sensor site added");
        body.sites.push(site);
    }

    /// Register a material asset for the geom named `geom_name`.
    fn add_material(&mut self, material: &SdfMaterial, geom_name: &str) -> Option<String> {
        let name = unique_name(&format!("material_{geom_name}"), &mut self.material_names);
        match self
            .collaborators
            .materials
            .material_to_mjcf(material, name.clone())
        {
            Some(asset) => {
                let asset_name = asset.name.clone();
                self.output.materials.push(asset);
                Some(asset_name)
            }
            None => {
                self.material_names.remove(&name);
                None
            }
        }
    }
}
