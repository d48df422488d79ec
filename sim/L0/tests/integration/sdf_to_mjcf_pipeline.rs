//! SDFormat → MJCF pipeline integration tests.
//!
//! Tests SDFormat models and worlds through tree nesting, semantic pose
//! resolution and geom emission.

use approx::assert_relative_eq;
use nalgebra::{Point3, Vector2, Vector3};
use sim_convert::{
    Collaborators, ConversionOptions, ConvertError, sdf_model_to_mjcf, sdf_model_to_mjcf_with,
    sdf_to_mjcf,
};
use sim_mjcf::{MjcfGeomType, MjcfJointType};
use sim_sdf::{
    SdfCollision, SdfFrame, SdfGeometry, SdfJoint, SdfJointAxis, SdfJointType, SdfLink, SdfModel,
    SdfSensor, SdfVisual, SdfWorld, SemanticPose,
};
use sim_types::Pose;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4};

fn cube(name: &str, full: f64) -> SdfCollision {
    SdfCollision::new(
        name,
        SdfGeometry::Box {
            size: Vector3::new(full, full, full),
        },
    )
}

/// Test: root with one posed child and a box converts to nested bodies.
#[test]
fn test_posed_child_with_box() {
    let child_pose = Pose::from_xyz_rpy(
        Vector3::new(1.0, 2.0, 3.0),
        Vector3::new(FRAC_PI_2, FRAC_PI_3, FRAC_PI_4),
    );
    let model = SdfModel::new("posed")
        .with_link(SdfLink::new("root"))
        .with_link(
            SdfLink::new("child")
                .with_pose(SemanticPose::relative_to(child_pose, "root"))
                .with_collision(cube("box", 2.0)),
        )
        .with_joint(SdfJoint::fixed("weld", "root", "child"));

    let mjcf = sdf_model_to_mjcf(&model).expect("should convert");
    let root = &mjcf.worldbody.children[0];
    assert_eq!(root.name, "root");
    assert_eq!(root.children.len(), 1);

    let child = &root.children[0];
    assert_eq!(child.name, "child");
    assert_relative_eq!(child.pos, Vector3::new(1.0, 2.0, 3.0), epsilon = 1e-12);
    assert_relative_eq!(
        child.euler.expect("euler set"),
        Vector3::new(90.0, 60.0, 45.0),
        epsilon = 1e-9
    );
    // Fixed joints nest the child rigidly.
    assert!(child.joints.is_empty());

    assert_eq!(child.geoms.len(), 1);
    let geom = &child.geoms[0];
    assert_eq!(geom.geom_type, Some(MjcfGeomType::Box));
    assert_eq!(geom.size, vec![1.0, 1.0, 1.0]);
}

/// Test: link poses default to the model frame and nest relative to parents.
#[test]
fn test_default_pose_frames() {
    let model = SdfModel::new("arm")
        .with_pose(Pose::from_position(Point3::new(0.0, 0.0, 1.0)))
        .with_link(SdfLink::new("base").with_pose(Pose::from_position(Point3::new(1.0, 0.0, 0.0))))
        .with_link(SdfLink::new("tip").with_pose(Pose::from_position(Point3::new(1.0, 0.0, 2.0))))
        .with_joint(
            SdfJoint::new("elbow", SdfJointType::Revolute, "base", "tip")
                .with_axis(SdfJointAxis::new(Vector3::y())),
        );

    let mjcf = sdf_model_to_mjcf(&model).expect("should convert");
    let base = mjcf.body("base").expect("base");
    // The model pose is folded into the root body.
    assert_relative_eq!(base.pos, Vector3::new(1.0, 0.0, 1.0), epsilon = 1e-12);
    assert!(base.is_free());

    let tip = mjcf.body("tip").expect("tip");
    assert_relative_eq!(tip.pos, Vector3::new(0.0, 0.0, 2.0), epsilon = 1e-12);
    let elbow = &tip.joints[0];
    assert_eq!(elbow.effective_type(), MjcfJointType::Hinge);
    assert_relative_eq!(elbow.axis.expect("axis"), Vector3::y(), epsilon = 1e-12);
}

/// Test: geometry poses follow explicit frames.
#[test]
fn test_geometry_relative_to_frame() {
    let model = SdfModel::new("m")
        .with_link(SdfLink::new("body").with_collision(
            cube("c", 0.2).with_pose(SemanticPose::relative_to(Pose::identity(), "mount")),
        ))
        .with_frame(SdfFrame {
            name: "mount".to_string(),
            attached_to: Some("body".to_string()),
            pose: SemanticPose::new(Pose::from_position(Point3::new(0.0, 0.5, 0.0))),
        });

    let mjcf = sdf_model_to_mjcf(&model).expect("should convert");
    let geom = &mjcf.worldbody.children[0].geoms[0];
    assert_relative_eq!(geom.pos.expect("pos"), Vector3::new(0.0, 0.5, 0.0), epsilon = 1e-12);
}

/// Test: a dangling relative_to fails with a pose resolution error.
#[test]
fn test_dangling_frame_reference() {
    let model = SdfModel::new("m").with_link(
        SdfLink::new("body")
            .with_pose(SemanticPose::relative_to(Pose::identity(), "nowhere"))
            .with_collision(cube("c", 0.2)),
    );
    let err = sdf_model_to_mjcf(&model).expect_err("frame is undefined");
    assert!(matches!(err, ConvertError::PoseResolution(_)));
}

/// Test: collisions and visuals get their own groups, collisions first.
#[test]
fn test_collision_and_visual_groups() {
    let link = SdfLink::new("l")
        .with_visual(SdfVisual::new("v1", SdfGeometry::Sphere { radius: 0.5 }))
        .with_collision(cube("c1", 1.0));
    let model = SdfModel::new("m").with_link(link);

    let mjcf = sdf_model_to_mjcf(&model).expect("should convert");
    let geoms = &mjcf.worldbody.children[0].geoms;
    assert_eq!(geoms[0].name.as_deref(), Some("c1"));
    assert_eq!(geoms[0].group, Some(3));
    assert_eq!(geoms[1].name.as_deref(), Some("v1"));
    assert_eq!(geoms[1].group, Some(0));
    assert_eq!(geoms[1].contype, Some(0));
    assert_eq!(geoms[1].conaffinity, Some(0));

    let options = ConversionOptions::default().with_groups(2, 1);
    let mjcf =
        sdf_model_to_mjcf_with(&model, &options, &Collaborators::default()).expect("should convert");
    let geoms = &mjcf.worldbody.children[0].geoms;
    assert_eq!(geoms[0].group, Some(2));
    assert_eq!(geoms[1].group, Some(1));
}

/// Test: repeated and missing geom names are made unique.
#[test]
fn test_geom_names_unique() {
    let link = SdfLink::new("l")
        .with_collision(cube("c1", 1.0))
        .with_collision(cube("c1", 1.0))
        .with_collision(cube("", 1.0))
        .with_visual(SdfVisual::new("", SdfGeometry::Sphere { radius: 0.1 }));
    let mjcf = sdf_model_to_mjcf(&SdfModel::new("m").with_link(link)).expect("should convert");
    let names: Vec<_> = mjcf.worldbody.children[0]
        .geoms
        .iter()
        .map(|g| g.name.clone().expect("named"))
        .collect();
    assert_eq!(names, ["c1", "c1_0", "unnamed_collision_0", "unnamed_visual_0"]);
}

/// Test: plane half extents with a zero grid spacing.
#[test]
fn test_plane_third_parameter() {
    let link = SdfLink::new("ground").with_collision(SdfCollision::new(
        "floor",
        SdfGeometry::Plane {
            normal: Vector3::x(),
            size: Vector2::new(4.0, 6.0),
        },
    ));
    let mjcf = sdf_model_to_mjcf(&SdfModel::new("m").with_link(link).with_static(true))
        .expect("should convert");
    let geom = &mjcf.worldbody.children[0].geoms[0];
    assert_eq!(geom.size, vec![2.0, 3.0, 0.0]);

    // Euler puts the plane normal (+Z of the geom) along +X.
    let pose = Pose::from_xyz_rpy_degrees(Vector3::zeros(), geom.euler.expect("euler"));
    assert_relative_eq!(pose.transform_vector(&Vector3::z()), Vector3::x(), epsilon = 1e-9);
}

/// Test: mesh geometry fails unless skipping is enabled.
#[test]
fn test_mesh_geometry() {
    let link = SdfLink::new("l")
        .with_collision(SdfCollision::new(
            "hull",
            SdfGeometry::Mesh {
                uri: "model://robot/hull.dae".to_string(),
                scale: Vector3::new(1.0, 1.0, 1.0),
            },
        ))
        .with_collision(cube("c", 1.0));
    let model = SdfModel::new("m").with_link(link);

    let err = sdf_model_to_mjcf(&model).expect_err("mesh must fail");
    assert!(matches!(err, ConvertError::UnsupportedShape(_)));

    let options = ConversionOptions::default().with_skip_unsupported_geometry(true);
    let mjcf =
        sdf_model_to_mjcf_with(&model, &options, &Collaborators::default()).expect("should skip");
    assert_eq!(mjcf.worldbody.children[0].geoms.len(), 1);
}

/// Test: broken kinematic trees are rejected.
#[test]
fn test_malformed_trees() {
    let missing = SdfModel::new("m")
        .with_link(SdfLink::new("a"))
        .with_joint(SdfJoint::fixed("j", "a", "b"));
    assert!(matches!(
        sdf_model_to_mjcf(&missing),
        Err(ConvertError::UndefinedLink { .. })
    ));

    let cycle = SdfModel::new("m")
        .with_link(SdfLink::new("a"))
        .with_link(SdfLink::new("b"))
        .with_joint(SdfJoint::fixed("ab", "a", "b"))
        .with_joint(SdfJoint::fixed("ba", "b", "a"));
    assert!(matches!(
        sdf_model_to_mjcf(&cycle),
        Err(ConvertError::NoRootLink(_))
    ));

    let self_joint = SdfModel::new("m")
        .with_link(SdfLink::new("a"))
        .with_joint(SdfJoint::fixed("aa", "a", "a"));
    assert!(matches!(
        sdf_model_to_mjcf(&self_joint),
        Err(ConvertError::KinematicLoop(_))
    ));
}

/// Test: world settings, several models and camera sensors.
#[test]
fn test_world_conversion() {
    let camera = SdfSensor {
        name: "eye".to_string(),
        sensor_type: "camera".to_string(),
        pose: SemanticPose::default(),
        horizontal_fov: Some(FRAC_PI_2),
    };
    let mut world = SdfWorld::new("lab")
        .with_model(
            SdfModel::new("ground")
                .with_static(true)
                .with_link(SdfLink::new("floor").with_collision(SdfCollision::new(
                    "plane",
                    SdfGeometry::plane(10.0, 10.0),
                ))),
        )
        .with_model(SdfModel::new("robot").with_link(SdfLink::new("base").with_sensor(camera)));
    world.wind = Vector3::new(0.5, 0.0, 0.0);

    let mjcf = sdf_to_mjcf(&world).expect("should convert");
    assert_eq!(mjcf.name, "lab");
    assert_relative_eq!(mjcf.option.gravity, Vector3::new(0.0, 0.0, -9.8));
    assert_relative_eq!(mjcf.option.wind, Vector3::new(0.5, 0.0, 0.0));

    let names: Vec<_> = mjcf.worldbody.children.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["floor", "base"]);
    assert!(mjcf.worldbody.children[0].joints.is_empty());
    assert!(mjcf.worldbody.children[1].is_free());

    let cameras = &mjcf.worldbody.children[1].cameras;
    assert_eq!(cameras.len(), 1);
    assert_eq!(cameras[0].name.as_deref(), Some("eye"));
    assert_relative_eq!(cameras[0].fovy, 90.0, epsilon = 1e-9);
}
