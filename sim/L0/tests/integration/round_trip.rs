//! Round trip integration tests.
//!
//! Sizes, poses and joint limits come back within floating-point tolerance.
//! Names do not always survive, because MJCF → SDFormat prefixes geom names
//! by role.

use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};
use sim_convert::{mjcf_to_sdf, sdf_to_mjcf};
use sim_mjcf::{MjcfBody, MjcfCompiler, MjcfGeom, MjcfGeomType, MjcfJoint, MjcfModel, MjcfSensorType};
use sim_sdf::{
    SdfCollision, SdfGeometry, SdfJoint, SdfJointAxis, SdfJointType, SdfLink, SdfModel, SdfSensor,
    SdfVisual, SdfWorld, SemanticPose,
};
use sim_types::Pose;

fn mjcf_arm() -> MjcfModel {
    let mut model = MjcfModel::new("arm").with_body(
        MjcfBody::new("base")
            .with_pos(0.0, 0.0, 0.2)
            .with_geom(
                MjcfGeom::box_shape(Vector3::new(0.1, 0.2, 0.3))
                    .with_name("plate")
                    .with_group(3),
            )
            .with_child(
                MjcfBody::new("link")
                    .with_pos(0.0, 0.1, 0.3)
                    .with_euler(0.0, 30.0, 0.0)
                    .with_joint(MjcfJoint::hinge("pivot", Vector3::x()).with_limits(-45.0, 120.0))
                    .with_geom(
                        MjcfGeom::new(MjcfGeomType::Cylinder, vec![0.04, 0.15])
                            .with_name("rod")
                            .with_group(3),
                    ),
            ),
    );
    model.compiler = MjcfCompiler::fixed_axis_degrees();
    model
}

/// Test: MJCF → SDFormat → MJCF keeps sizes, poses and limits.
#[test]
fn test_mjcf_round_trip() {
    let original = mjcf_arm();
    let world = mjcf_to_sdf(&original).expect("should convert");
    let back = sdf_to_mjcf(&world).expect("should convert back");

    let base = back.body("base").expect("base");
    assert_relative_eq!(base.pos, Vector3::new(0.0, 0.0, 0.2), epsilon = 1e-12);
    assert_eq!(base.geoms.len(), 1);
    assert_eq!(base.geoms[0].name.as_deref(), Some("collision_plate"));
    for (got, want) in base.geoms[0].size.iter().zip([0.1, 0.2, 0.3]) {
        assert_relative_eq!(*got, want, epsilon = 1e-12);
    }

    let link = back.body("link").expect("link");
    assert_relative_eq!(link.pos, Vector3::new(0.0, 0.1, 0.3), epsilon = 1e-12);
    assert_relative_eq!(
        link.euler.expect("euler"),
        Vector3::new(0.0, 30.0, 0.0),
        epsilon = 1e-9
    );
    for (got, want) in link.geoms[0].size.iter().zip([0.04, 0.15]) {
        assert_relative_eq!(*got, want, epsilon = 1e-12);
    }

    let pivot = back.joint("pivot").expect("pivot");
    let (lower, upper) = pivot.effective_range().expect("limited");
    assert_relative_eq!(lower, -45.0, epsilon = 1e-9);
    assert_relative_eq!(upper, 120.0, epsilon = 1e-9);
    assert_relative_eq!(pivot.axis.expect("axis"), Vector3::x(), epsilon = 1e-12);
}

/// Test: box sizes survive both directions.
#[test]
fn test_box_round_trip() {
    for half in [Vector3::new(0.5, 0.25, 1.5), Vector3::new(1e-3, 7.0, 0.1)] {
        let model = MjcfModel::new("m").with_body(
            MjcfBody::new("b").with_geom(MjcfGeom::box_shape(half).with_group(3)),
        );
        let world = mjcf_to_sdf(&model).expect("should convert");
        let back = sdf_to_mjcf(&world).expect("should convert back");
        let size = &back.body("b").expect("body").geoms[0].size;
        assert_relative_eq!(Vector3::new(size[0], size[1], size[2]), half, epsilon = 1e-12);
    }
}

/// Test: SDFormat → MJCF → SDFormat keeps the tree, poses and limits.
#[test]
fn test_sdf_round_trip() {
    let model = SdfModel::new("gripper")
        .with_link(
            SdfLink::new("palm")
                .with_pose(Pose::from_position(Point3::new(0.0, 0.0, 0.5)))
                .with_collision(SdfCollision::new(
                    "palm",
                    SdfGeometry::Box {
                        size: Vector3::new(0.1, 0.1, 0.02),
                    },
                ))
                .with_visual(SdfVisual::new(
                    "palm",
                    SdfGeometry::Box {
                        size: Vector3::new(0.1, 0.1, 0.02),
                    },
                )),
        )
        .with_link(
            SdfLink::new("finger")
                .with_pose(SemanticPose::relative_to(
                    Pose::from_xyz_rpy(Vector3::new(0.05, 0.0, 0.04), Vector3::new(0.0, 0.3, 0.0)),
                    "palm",
                ))
                .with_collision(SdfCollision::new(
                    "finger",
                    SdfGeometry::Capsule {
                        radius: 0.01,
                        length: 0.06,
                    },
                )),
        )
        .with_joint(
            SdfJoint::new("knuckle", SdfJointType::Revolute, "palm", "finger")
                .with_axis(SdfJointAxis::new(Vector3::y()).with_limits(0.0, 1.2)),
        );
    let world = SdfWorld::new("bench").with_model(model);

    let mjcf = sdf_to_mjcf(&world).expect("should convert");
    let back = mjcf_to_sdf(&mjcf).expect("should convert back");
    let gripper = back.model("bench").expect("model named after the MJCF model");

    let links: Vec<_> = gripper.links.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(links, ["palm", "finger"]);

    // The palm was free, so only the knuckle comes back.
    let joints: Vec<_> = gripper.joints.iter().map(|j| j.name.as_str()).collect();
    assert_eq!(joints, ["knuckle"]);
    let axis = gripper.joints[0].axis.as_ref().expect("axis");
    assert_relative_eq!(axis.xyz, Vector3::y(), epsilon = 1e-12);
    assert_relative_eq!(axis.limit.lower, 0.0, epsilon = 1e-12);
    assert_relative_eq!(axis.limit.upper, 1.2, epsilon = 1e-12);

    let palm = gripper.link("palm").expect("palm");
    assert_relative_eq!(palm.pose.pose.position, Point3::new(0.0, 0.0, 0.5), epsilon = 1e-12);
    assert_eq!(palm.collisions.len(), 1);
    assert_eq!(palm.visuals.len(), 1);
    assert_eq!(palm.collisions[0].name, "collision_palm");

    let finger = gripper.link("finger").expect("finger");
    assert_eq!(finger.pose.relative_to.as_deref(), Some("palm"));
    assert!(finger.pose.pose.approx_eq(
        &Pose::from_xyz_rpy(Vector3::new(0.05, 0.0, 0.04), Vector3::new(0.0, 0.3, 0.0)),
        1e-9
    ));
    let SdfGeometry::Capsule { radius, length } = finger.collisions[0].geometry else {
        panic!("expected capsule");
    };
    assert_relative_eq!(radius, 0.01);
    assert_relative_eq!(length, 0.06, epsilon = 1e-12);
}

/// Test: joints named like bodies survive the shared SDFormat frame namespace.
#[test]
fn test_joint_and_body_share_a_name() {
    let model = MjcfModel::new("arm").with_body(
        MjcfBody::new("base").with_child(
            MjcfBody::new("elbow")
                .with_joint(MjcfJoint::hinge("elbow", Vector3::y()).with_stiffness(3.0))
                .with_geom(MjcfGeom::sphere(0.05)),
        ),
    );

    let world = mjcf_to_sdf(&model).expect("should convert");
    let sdf = world.model("arm").expect("articulated model");
    let joints: Vec<_> = sdf.joints.iter().map(|j| j.name.as_str()).collect();
    assert_eq!(joints, ["world_base_fixed", "elbow_0"]);
    assert!(sdf.link("elbow").is_some());

    let back = sdf_to_mjcf(&world).expect("should convert back");
    let elbow = back.body("elbow").expect("elbow body");
    assert_eq!(elbow.joints.len(), 1);
    assert_eq!(elbow.joints[0].name, "elbow_0");
    assert_eq!(elbow.joints[0].stiffness, Some(3.0));
    assert_relative_eq!(elbow.joints[0].axis.expect("axis"), Vector3::y(), epsilon = 1e-12);
}

/// Test: an IMU comes back as an IMU through a sensor site.
#[test]
fn test_imu_round_trip() {
    let imu = SdfSensor {
        name: "imu".to_string(),
        sensor_type: "imu".to_string(),
        pose: SemanticPose::new(Pose::from_position(Point3::new(0.0, 0.05, 0.0))),
        horizontal_fov: None,
    };
    let world = SdfWorld::new("bench")
        .with_model(SdfModel::new("drone").with_link(SdfLink::new("frame").with_sensor(imu)));

    let mjcf = sdf_to_mjcf(&world).expect("should convert");
    let kinds: Vec<_> = mjcf.sensors_on("imu").map(|s| s.sensor_type).collect();
    assert_eq!(kinds, [MjcfSensorType::Accelerometer, MjcfSensorType::Gyro]);

    let back = mjcf_to_sdf(&mjcf).expect("should convert back");
    let frame = back
        .model("bench")
        .and_then(|m| m.link("frame"))
        .expect("frame link");
    assert_eq!(frame.sensors.len(), 1);
    assert_eq!(frame.sensors[0].name, "imu");
    assert_eq!(frame.sensors[0].sensor_type, "imu");
    assert_relative_eq!(
        frame.sensors[0].pose.pose.position,
        Point3::new(0.0, 0.05, 0.0),
        epsilon = 1e-12
    );
}
