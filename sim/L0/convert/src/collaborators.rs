//! Converters for sensors, lights and materials.
//!
//! The tree walkers only place these elements; what they turn into is up to
//! the converters passed in [`Collaborators`]. [`DefaultCollaborators`]
//! carries names, poses and basic appearance.

use nalgebra::{Matrix3, Point3, Rotation3, UnitQuaternion, Vector3, Vector4};
use sim_mjcf::{
    MjcfCamera, MjcfGeom, MjcfLight, MjcfMaterial, MjcfSensor, MjcfSensorType, MjcfSite,
    quat_to_wxyz,
};
use sim_sdf::{SdfLight, SdfLightType, SdfMaterial, SdfSensor, SemanticPose};
use sim_types::Pose;
use tracing::debug;

/// What an SDFormat sensor becomes on an MJCF body.
#[derive(Debug, Clone, PartialEq)]
pub enum MjcfSensorMount {
    /// A camera on the body.
    Camera(MjcfCamera),
    /// A site on the body with sensors mounted on it.
    ///
    /// The walker points every sensor at the site, after making the site
    /// name unique.
    Site {
        /// The site.
        site: MjcfSite,
        /// Sensors added to the `<sensor>` section.
        sensors: Vec<MjcfSensor>,
    },
}

/// Converts cameras and sensors.
pub trait SensorConverter {
    /// Convert an MJCF camera placed at `pose` in its body frame.
    fn camera_to_sdf(&self, camera: &MjcfCamera, name: String, pose: Pose) -> Option<SdfSensor>;

    /// Convert an MJCF site carrying `sensors`, placed at `pose` in its body
    /// frame. `sensors` is never empty.
    fn site_to_sdf(
        &self,
        site: &MjcfSite,
        sensors: &[&MjcfSensor],
        name: String,
        pose: Pose,
    ) -> Option<SdfSensor>;

    /// Convert an SDFormat sensor placed at `pose` in its link frame.
    fn sensor_to_mjcf(&self, sensor: &SdfSensor, name: String, pose: Pose)
    -> Option<MjcfSensorMount>;
}

/// Converts lights.
pub trait LightConverter {
    /// Convert an MJCF light.
    fn light_to_sdf(&self, light: &MjcfLight, name: String) -> Option<SdfLight>;

    /// Convert an SDFormat light placed at `pose` in its link (or world) frame.
    fn light_to_mjcf(&self, light: &SdfLight, name: String, pose: Pose) -> Option<MjcfLight>;
}

/// Converts visual appearance.
pub trait MaterialConverter {
    /// Material for an MJCF geom, given its referenced material asset if any.
    fn material_to_sdf(&self, geom: &MjcfGeom, material: Option<&MjcfMaterial>)
    -> Option<SdfMaterial>;

    /// MJCF material asset named `name` for an SDFormat material.
    fn material_to_mjcf(&self, material: &SdfMaterial, name: String) -> Option<MjcfMaterial>;
}

/// The set of converters used by one conversion.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    /// Sensor converter.
    pub sensors: &'a dyn SensorConverter,
    /// Light converter.
    pub lights: &'a dyn LightConverter,
    /// Material converter.
    pub materials: &'a dyn MaterialConverter,
}

static DEFAULT_COLLABORATORS: DefaultCollaborators = DefaultCollaborators;

impl Default for Collaborators<'static> {
    fn default() -> Self {
        Self::uniform(&DEFAULT_COLLABORATORS)
    }
}

impl<'a> Collaborators<'a> {
    /// Use one value for all three roles.
    #[must_use]
    pub fn uniform<T>(converter: &'a T) -> Self
    where
        T: SensorConverter + LightConverter + MaterialConverter,
    {
        Self {
            sensors: converter,
            lights: converter,
            materials: converter,
        }
    }
}

/// Name, pose and appearance mapping.
///
/// - MJCF cameras ⇄ SDFormat `camera` sensors, with the optical frame
///   corrected (MJCF cameras look along -Z with +Y up, SDFormat cameras
///   along +X with +Z up) and `fovy` ⇄ `horizontal_fov` for square images
/// - MJCF sites with an accelerometer or gyro ⇄ SDFormat `imu` sensors; an
///   `imu` becomes a site plus `<name>_accelerometer` and `<name>_gyro`
/// - MJCF lights ⇄ SDFormat lights (`directional` ⇄ directional, otherwise spot)
/// - MJCF `rgba`, `emission`, `specular` ⇄ SDFormat diffuse, emissive, specular
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCollaborators;

/// Rotation from the MJCF camera frame to the SDFormat camera frame.
fn camera_optical_rotation() -> UnitQuaternion<f64> {
    // Columns: SDFormat x, y, z axes written in the MJCF camera frame.
    let m = Matrix3::new(
        0.0, -1.0, 0.0, //
        0.0, 0.0, 1.0, //
        -1.0, 0.0, 0.0,
    );
    UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(m))
}

fn mean_rgb(color: &Vector4<f64>) -> f64 {
    (color.x + color.y + color.z) / 3.0
}

impl SensorConverter for DefaultCollaborators {
    fn camera_to_sdf(&self, camera: &MjcfCamera, name: String, pose: Pose) -> Option<SdfSensor> {
        let rotation = pose.rotation * camera_optical_rotation();
        Some(SdfSensor {
            name,
            sensor_type: "camera".to_string(),
            pose: SemanticPose::new(Pose::from_position_rotation(pose.position, rotation)),
            horizontal_fov: Some(camera.fovy.to_radians()),
        })
    }

    fn site_to_sdf(
        &self,
        site: &MjcfSite,
        sensors: &[&MjcfSensor],
        name: String,
        pose: Pose,
    ) -> Option<SdfSensor> {
        debug!(site = %site.name, sensors = sensors.len(), "site converted to imu");
        Some(SdfSensor {
            name,
            sensor_type: "imu".to_string(),
            pose: SemanticPose::new(pose),
            horizontal_fov: None,
        })
    }

    fn sensor_to_mjcf(
        &self,
        sensor: &SdfSensor,
        name: String,
        pose: Pose,
    ) -> Option<MjcfSensorMount> {
        match sensor.sensor_type.as_str() {
            "camera" => {
                let rotation = pose.rotation * camera_optical_rotation().inverse();
                Some(MjcfSensorMount::Camera(MjcfCamera {
                    name: Some(name),
                    pos: pose.xyz(),
                    quat: Some(quat_to_wxyz(&rotation)),
                    euler: None,
                    fovy: sensor
                        .horizontal_fov
                        .map_or_else(|| MjcfCamera::default().fovy, f64::to_degrees),
                }))
            }
            "imu" => {
                let sensors = [MjcfSensorType::Accelerometer, MjcfSensorType::Gyro]
                    .into_iter()
                    .map(|kind| {
                        MjcfSensor::new(kind, &name).with_name(format!("{name}_{}", kind.as_str()))
                    })
                    .collect();
                let site = MjcfSite {
                    pos: pose.xyz(),
                    quat: Some(quat_to_wxyz(&pose.rotation)),
                    ..MjcfSite::new(name)
                };
                Some(MjcfSensorMount::Site { site, sensors })
            }
            other => {
                debug!(sensor = %sensor.name, sensor_type = %other, "sensor not converted");
                None
            }
        }
    }
}

impl LightConverter for DefaultCollaborators {
    fn light_to_sdf(&self, light: &MjcfLight, name: String) -> Option<SdfLight> {
        Some(SdfLight {
            name,
            light_type: if light.directional {
                SdfLightType::Directional
            } else {
                SdfLightType::Spot
            },
            pose: SemanticPose::new(Pose::from_position(Point3::from(light.pos))),
            direction: light.dir,
            diffuse: light.diffuse.push(1.0),
            cast_shadows: light.castshadow,
        })
    }

    fn light_to_mjcf(&self, light: &SdfLight, name: String, pose: Pose) -> Option<MjcfLight> {
        Some(MjcfLight {
            name: Some(name),
            pos: pose.xyz(),
            dir: pose.transform_vector(&light.direction),
            directional: light.light_type == SdfLightType::Directional,
            castshadow: light.cast_shadows,
            diffuse: Vector3::new(light.diffuse.x, light.diffuse.y, light.diffuse.z),
        })
    }
}

impl MaterialConverter for DefaultCollaborators {
    fn material_to_sdf(
        &self,
        geom: &MjcfGeom,
        material: Option<&MjcfMaterial>,
    ) -> Option<SdfMaterial> {
        match (material, geom.rgba) {
            (Some(material), rgba) => {
                let color = rgba.unwrap_or(material.rgba);
                let emission = color * material.emission;
                Some(SdfMaterial {
                    ambient: color,
                    diffuse: color,
                    specular: Vector4::new(
                        material.specular,
                        material.specular,
                        material.specular,
                        1.0,
                    ),
                    emissive: Vector4::new(emission.x, emission.y, emission.z, 1.0),
                })
            }
            (None, Some(rgba)) => Some(SdfMaterial {
                ambient: rgba,
                diffuse: rgba,
                ..SdfMaterial::default()
            }),
            (None, None) => None,
        }
    }

    fn material_to_mjcf(&self, material: &SdfMaterial, name: String) -> Option<MjcfMaterial> {
        Some(MjcfMaterial {
            name,
            rgba: material.diffuse,
            emission: mean_rgb(&material.emissive),
            specular: mean_rgb(&material.specular),
        })
    }
}
