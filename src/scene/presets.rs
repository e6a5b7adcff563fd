//! The demo scene: a sky camera looking at two jointed robots standing on a
//! ground plane.
//!
//! ```text
//! world
//! ├── sky        (0, 10, 30)
//! ├── ground     (0, -2, 0)   ─ ground shape
//! ├── robot1     (-2, 1, 0)   ─ 9 joints, 10 shapes
//! └── robot2     (2, 1, 0)    ─ 9 joints, 10 shapes
//! ```

use glam::Vec3;

use crate::errors::Result;
use crate::math::RigidTransform;
use crate::scene::node::{GeometryHandle, MaterialHandle, Node, ShapeNode};
use crate::scene::{NodeHandle, SceneGraph};

const ARM_LEN: f32 = 0.7;
const ARM_THICK: f32 = 0.25;
const LEG_LEN: f32 = 1.0;
const LEG_THICK: f32 = 0.25;
const TORSO_LEN: f32 = 1.5;
const TORSO_THICK: f32 = 0.25;
const TORSO_WIDTH: f32 = 1.0;
const HEAD_SIZE: f32 = 0.7;

pub const GROUND_Y: f32 = -2.0;

/// Joints beneath each robot's base node.
pub const ROBOT_JOINTS: usize = 9;

/// Geometry and material handles the host renderer uses for the demo scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoAssets {
    pub ground: GeometryHandle,
    pub cube: GeometryHandle,
    pub sphere: GeometryHandle,
    pub ground_material: MaterialHandle,
    pub robot1_material: MaterialHandle,
    pub robot2_material: MaterialHandle,
}

impl Default for DemoAssets {
    fn default() -> Self {
        Self {
            ground: GeometryHandle(0),
            cube: GeometryHandle(1),
            sphere: GeometryHandle(2),
            ground_material: MaterialHandle(0),
            robot1_material: MaterialHandle(1),
            robot2_material: MaterialHandle(2),
        }
    }
}

/// A built demo scene and the handles the editor needs.
#[derive(Debug, Clone)]
pub struct DemoScene {
    pub graph: SceneGraph,
    pub sky: NodeHandle,
    pub ground: NodeHandle,
    pub robot1: NodeHandle,
    pub robot2: NodeHandle,
}

enum Geometry {
    Cube,
    Sphere,
}

/// parent joint (`None` = base), offset
const JOINTS: [(Option<usize>, Vec3); ROBOT_JOINTS] = [
    (None, Vec3::new(TORSO_WIDTH / 2.0, TORSO_LEN / 2.0, 0.0)), // 0 upper right arm
    (None, Vec3::new(-TORSO_WIDTH / 2.0, TORSO_LEN / 2.0, 0.0)), // 1 upper left arm
    (Some(0), Vec3::new(ARM_LEN, 0.0, 0.0)),                    // 2 lower right arm
    (Some(1), Vec3::new(-ARM_LEN, 0.0, 0.0)),                   // 3 lower left arm
    (None, Vec3::new(TORSO_WIDTH / 2.0 - LEG_THICK / 2.0, -TORSO_LEN / 2.0, 0.0)), // 4 upper right leg
    (None, Vec3::new(-TORSO_WIDTH / 2.0 + LEG_THICK / 2.0, -TORSO_LEN / 2.0, 0.0)), // 5 upper left leg
    (Some(4), Vec3::new(0.0, -LEG_LEN, 0.0)),                   // 6 lower right leg
    (Some(5), Vec3::new(0.0, -LEG_LEN, 0.0)),                   // 7 lower left leg
    (None, Vec3::new(0.0, TORSO_LEN / 2.0, 0.0)),               // 8 head
];

/// joint (`None` = base), position, scale, geometry
const SHAPES: [(Option<usize>, Vec3, Vec3, Geometry); ROBOT_JOINTS + 1] = [
    (None, Vec3::ZERO, Vec3::new(TORSO_WIDTH, TORSO_LEN, TORSO_THICK), Geometry::Cube),
    (
        Some(0),
        Vec3::new(ARM_LEN / 2.0, 0.0, 0.0),
        Vec3::new(ARM_LEN / 2.0, ARM_THICK / 2.0, ARM_THICK / 2.0),
        Geometry::Sphere,
    ),
    (
        Some(1),
        Vec3::new(-ARM_LEN / 2.0, 0.0, 0.0),
        Vec3::new(ARM_LEN / 2.0, ARM_THICK / 2.0, ARM_THICK / 2.0),
        Geometry::Sphere,
    ),
    (
        Some(2),
        Vec3::new(ARM_LEN / 2.0, 0.0, 0.0),
        Vec3::new(ARM_LEN, ARM_THICK, ARM_THICK),
        Geometry::Cube,
    ),
    (
        Some(3),
        Vec3::new(-ARM_LEN / 2.0, 0.0, 0.0),
        Vec3::new(ARM_LEN, ARM_THICK, ARM_THICK),
        Geometry::Cube,
    ),
    (
        Some(4),
        Vec3::new(0.0, -LEG_LEN / 2.0, 0.0),
        Vec3::new(LEG_THICK / 2.0, LEG_LEN / 2.0, LEG_THICK / 2.0),
        Geometry::Sphere,
    ),
    (
        Some(5),
        Vec3::new(0.0, -LEG_LEN / 2.0, 0.0),
        Vec3::new(LEG_THICK / 2.0, LEG_LEN / 2.0, LEG_THICK / 2.0),
        Geometry::Sphere,
    ),
    (
        Some(6),
        Vec3::new(0.0, -LEG_LEN / 2.0, 0.0),
        Vec3::new(LEG_THICK, LEG_LEN, LEG_THICK),
        Geometry::Cube,
    ),
    (
        Some(7),
        Vec3::new(0.0, -LEG_LEN / 2.0, 0.0),
        Vec3::new(LEG_THICK, LEG_LEN, LEG_THICK),
        Geometry::Cube,
    ),
    (
        Some(8),
        Vec3::new(0.0, HEAD_SIZE / 2.0 * 1.5, 0.0),
        Vec3::splat(HEAD_SIZE / 2.0),
        Geometry::Sphere,
    ),
];

/// Adds the joints and limb shapes of one robot beneath `base`.
///
/// Returns the joint handles in construction order.
pub fn build_robot(
    graph: &mut SceneGraph,
    base: NodeHandle,
    assets: &DemoAssets,
    material: MaterialHandle,
) -> Result<[NodeHandle; ROBOT_JOINTS]> {
    let mut joints = [base; ROBOT_JOINTS];
    for (i, (parent, offset)) in JOINTS.iter().enumerate() {
        let parent = parent.map_or(base, |p| joints[p]);
        joints[i] = graph.add_child(
            parent,
            Node::transform(RigidTransform::from_translation(*offset)),
        )?;
    }

    for (joint, position, scale, geometry) in &SHAPES {
        let parent = joint.map_or(base, |j| joints[j]);
        let geometry = match geometry {
            Geometry::Cube => assets.cube,
            Geometry::Sphere => assets.sphere,
        };
        let shape = ShapeNode::new(geometry, material)
            .with_position(*position)
            .with_scale(*scale);
        graph.add_child(parent, Node::shape(shape))?;
    }
    Ok(joints)
}

/// Builds the full demo scene.
pub fn build_demo_scene(assets: &DemoAssets) -> Result<DemoScene> {
    let mut graph = SceneGraph::new();
    let world = graph.root();

    let sky = graph.add_child(
        world,
        Node::transform(RigidTransform::from_translation(Vec3::new(0.0, 10.0, 30.0))).named("sky"),
    )?;
    let ground = graph.add_child(
        world,
        Node::transform(RigidTransform::from_translation(Vec3::new(0.0, GROUND_Y, 0.0)))
            .named("ground"),
    )?;
    graph.add_child(
        ground,
        Node::shape(ShapeNode::new(assets.ground, assets.ground_material)),
    )?;

    let robot1 = graph.add_child(
        world,
        Node::transform(RigidTransform::from_translation(Vec3::new(-2.0, 1.0, 0.0)))
            .named("robot1"),
    )?;
    let robot2 = graph.add_child(
        world,
        Node::transform(RigidTransform::from_translation(Vec3::new(2.0, 1.0, 0.0)))
            .named("robot2"),
    )?;
    build_robot(&mut graph, robot1, assets, assets.robot1_material)?;
    build_robot(&mut graph, robot2, assets, assets.robot2_material)?;

    log::info!("Demo scene built with {} nodes", graph.len());
    Ok(DemoScene {
        graph,
        sky,
        ground,
        robot1,
        robot2,
    })
}
