//! MJCF → SDFormat pipeline integration tests.
//!
//! Tests whole MJCF models through tree flattening, shape conversion and
//! naming.

use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3, Vector4};
use sim_convert::{
    Collaborators, ConversionOptions, ConvertError, STATIC_LINK_NAME, mjcf_to_sdf,
    mjcf_to_sdf_with,
};
use sim_mjcf::{
    MjcfBody, MjcfCompiler, MjcfError, MjcfGeom, MjcfGeomType, MjcfJoint, MjcfModel,
};
use sim_sdf::{SdfGeometry, SdfJointType, SdfModel, SdfWorld};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4};

fn articulated(world: &SdfWorld) -> &SdfModel {
    world.models.last().expect("articulated model")
}

/// Test: child body with a fixed-axis euler pose and a box keeps both.
#[test]
fn test_single_child_body() {
    let mut model = MjcfModel::new("posed").with_body(
        MjcfBody::new("root").with_child(
            MjcfBody::new("child")
                .with_pos(1.0, 2.0, 3.0)
                .with_euler(90.0, 60.0, 45.0)
                .with_geom(MjcfGeom::box_shape(Vector3::new(1.0, 1.0, 1.0)).with_name("crate")),
        ),
    );
    model.compiler = MjcfCompiler::fixed_axis_degrees();

    let world = mjcf_to_sdf(&model).expect("should convert");
    let sdf = articulated(&world);

    let child = sdf.link("child").expect("child link");
    assert_eq!(child.pose.relative_to.as_deref(), Some("root"));
    assert_relative_eq!(child.pose.pose.position, Point3::new(1.0, 2.0, 3.0));
    assert_relative_eq!(
        child.pose.pose.rpy(),
        Vector3::new(FRAC_PI_2, FRAC_PI_3, FRAC_PI_4),
        epsilon = 1e-9
    );
    assert_eq!(
        child.collisions[0].geometry,
        SdfGeometry::Box {
            size: Vector3::new(2.0, 2.0, 2.0)
        }
    );
    assert_eq!(child.collisions[0].name, "collision_crate");
    assert_eq!(child.visuals[0].name, "visual_crate");

    let fixed: Vec<_> = sdf.joints.iter().filter(|j| j.child == "child").collect();
    assert_eq!(fixed.len(), 1);
    assert_eq!(fixed[0].joint_type, SdfJointType::Fixed);
    assert_eq!(fixed[0].parent, "root");
}

/// Test: two jointless bodies under the worldbody and a static ground.
#[test]
fn test_world_with_two_bodies() {
    let model = MjcfModel::new("scene")
        .with_world_geom(MjcfGeom::new(MjcfGeomType::Plane, vec![10.0, 10.0, 0.5]).with_name("floor"))
        .with_body(MjcfBody::new("left").with_geom(MjcfGeom::sphere(0.1)))
        .with_body(MjcfBody::new("right").with_geom(MjcfGeom::sphere(0.1)));

    let world = mjcf_to_sdf(&model).expect("should convert");
    assert_eq!(world.models.len(), 2);

    let anchor = &world.models[0];
    assert!(anchor.is_static);
    assert_eq!(anchor.name, "static");
    assert_eq!(anchor.links.len(), 1);
    assert_eq!(anchor.links[0].name, STATIC_LINK_NAME);
    assert!(anchor.joints.is_empty());
    assert_eq!(
        anchor.links[0].collisions[0].geometry,
        SdfGeometry::plane(20.0, 20.0)
    );

    let sdf = articulated(&world);
    assert!(!sdf.is_static);
    assert_eq!(sdf.links.len(), 2);
    assert_eq!(sdf.joints.len(), 2);
    assert!(sdf.joints.iter().all(|j| j.joint_type == SdfJointType::Fixed));
    assert!(sdf.joints.iter().all(|j| j.parent == "world"));
}

/// Test: deep tree emits joints and links in pre-order.
#[test]
fn test_preorder_emission() {
    let model = MjcfModel::new("tree").with_body(
        MjcfBody::new("torso")
            .with_joint(MjcfJoint::free("root"))
            .with_child(
                MjcfBody::new("left_thigh")
                    .with_joint(MjcfJoint::hinge("left_hip", Vector3::y()))
                    .with_child(
                        MjcfBody::new("left_shin")
                            .with_joint(MjcfJoint::hinge("left_knee", Vector3::y())),
                    ),
            )
            .with_child(
                MjcfBody::new("right_thigh")
                    .with_joint(MjcfJoint::hinge("right_hip", Vector3::y()))
                    .with_child(MjcfBody::new("right_shin")),
            ),
    );

    let world = mjcf_to_sdf(&model).expect("should convert");
    let sdf = articulated(&world);

    let links: Vec<_> = sdf.links.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(
        links,
        ["torso", "left_thigh", "left_shin", "right_thigh", "right_shin"]
    );

    let joints: Vec<_> = sdf.joints.iter().map(|j| j.name.as_str()).collect();
    assert_eq!(
        joints,
        ["left_hip", "left_knee", "right_hip", "right_thigh_right_shin_fixed"]
    );

    // Joint endpoints follow the nearest structural parent.
    let knee = sdf.joint("left_knee").expect("knee");
    assert_eq!(knee.parent, "left_thigh");
    assert_eq!(knee.child, "left_shin");
}

/// Test: anonymous counters start over for each conversion.
#[test]
fn test_fresh_counters_per_run() {
    let first = MjcfModel::new("a").with_body(MjcfBody::new("a").with_geom(MjcfGeom::sphere(0.1)));
    let second = MjcfModel::new("b").with_body(MjcfBody::new("b").with_geom(MjcfGeom::capsule(0.1, 0.2)));

    let world_a = mjcf_to_sdf(&first).expect("should convert");
    let world_b = mjcf_to_sdf(&second).expect("should convert");

    assert_eq!(articulated(&world_a).links[0].visuals[0].name, "unnamed_visual_0");
    assert_eq!(articulated(&world_b).links[0].visuals[0].name, "unnamed_visual_0");
}

/// Test: fromto length does not depend on the segment direction.
#[test]
fn test_fromto_length_any_direction() {
    let segments = [
        [0.0, 0.0, 0.0, 0.0, 0.0, 0.4],
        [0.0, 0.0, 0.0, 0.4, 0.0, 0.0],
        [1.0, 1.0, 1.0, 1.0 - 0.4 / 3.0_f64.sqrt(), 1.0 + 0.4 / 3.0_f64.sqrt(), 1.0 + 0.4 / 3.0_f64.sqrt()],
    ];
    for fromto in segments {
        let model = MjcfModel::new("m").with_body(
            MjcfBody::new("b").with_geom(MjcfGeom::from_segment(MjcfGeomType::Cylinder, 0.02, fromto)),
        );
        let world = mjcf_to_sdf(&model).expect("should convert");
        let collision = &articulated(&world).links[0].collisions[0];
        let SdfGeometry::Cylinder { radius, length } = collision.geometry else {
            panic!("expected cylinder, got {:?}", collision.geometry);
        };
        assert_relative_eq!(radius, 0.02);
        assert_relative_eq!(length, 0.4, epsilon = 1e-12);

        // The cylinder axis lies along the segment.
        let axis = collision.pose.pose.transform_vector(&Vector3::z());
        let segment = Vector3::new(fromto[3] - fromto[0], fromto[4] - fromto[1], fromto[5] - fromto[2]);
        assert_relative_eq!(axis, segment.normalize(), epsilon = 1e-12);
    }
}

/// Test: mesh geoms abort conversion unless skipping is enabled.
#[test]
fn test_mesh_geom() {
    let mesh = MjcfGeom::new(MjcfGeomType::Mesh, Vec::new()).with_name("hull");
    let model = MjcfModel::new("m").with_body(
        MjcfBody::new("b")
            .with_geom(mesh)
            .with_geom(MjcfGeom::sphere(0.1).with_name("ball")),
    );

    let err = mjcf_to_sdf(&model).expect_err("mesh must fail");
    assert!(matches!(err, ConvertError::UnsupportedShape(_)));

    let options = ConversionOptions::default().with_skip_unsupported_geometry(true);
    let world = mjcf_to_sdf_with(&model, &options, &Collaborators::default()).expect("should skip");
    let link = &articulated(&world).links[0];
    assert_eq!(link.collisions.len(), 1);
    assert_eq!(link.collisions[0].name, "collision_ball");
}

/// Test: system plugins are attached only when requested.
#[test]
fn test_system_plugins() {
    let model = MjcfModel::new("m").with_body(MjcfBody::new("b"));

    let world = mjcf_to_sdf(&model).expect("should convert");
    assert!(world.plugins.is_empty());

    let options = ConversionOptions::default().with_world_plugins(true);
    let world = mjcf_to_sdf_with(&model, &options, &Collaborators::default()).expect("should convert");
    let plugins: Vec<_> = world
        .plugins
        .iter()
        .map(|p| (p.filename.as_str(), p.name.as_str()))
        .collect();
    assert_eq!(
        plugins,
        [
            ("ignition-gazebo-physics-system", "ignition::gazebo::systems::Physics"),
            ("ignition-gazebo-sensors-system", "ignition::gazebo::systems::Sensors"),
            (
                "ignition-gazebo-user-commands-system",
                "ignition::gazebo::systems::UserCommands"
            ),
            (
                "ignition-gazebo-scene-broadcaster-system",
                "ignition::gazebo::systems::SceneBroadcaster"
            ),
        ]
    );
}

/// Test: malformed geom sizes are reported as MJCF errors.
#[test]
fn test_invalid_geom_size() {
    let model = MjcfModel::new("m")
        .with_body(MjcfBody::new("b").with_geom(MjcfGeom::new(MjcfGeomType::Box, vec![0.1])));
    let err = mjcf_to_sdf(&model).expect_err("box needs three sizes");
    assert!(matches!(err, ConvertError::Mjcf(_)));
}

/// Test: a zero quaternion is rejected instead of turning into NaN poses.
#[test]
fn test_zero_quaternion() {
    let mut body = MjcfBody::new("b").with_geom(MjcfGeom::sphere(0.1));
    body.quat = Vector4::zeros();
    let err = mjcf_to_sdf(&MjcfModel::new("m").with_body(body)).expect_err("quat cannot normalize");
    assert!(matches!(
        err,
        ConvertError::Mjcf(MjcfError::InvalidAttribute { attribute: "quat", .. })
    ));
}
