//! Scene graph tests
//!
//! Tests for:
//! - Tree construction and the parent table
//! - Tree invariant rejections (second parent, cycles, shape children)
//! - Subtree removal
//! - Accumulated transforms, including depth limits and unreachable nodes
//! - Pre-order transform node snapshots and visitor traversal
//! - The demo scene layout

use armature::errors::ArmatureError;
use armature::math::RigidTransform;
use armature::scene::presets::{DemoAssets, GROUND_Y, build_demo_scene};
use armature::scene::{
    GeometryHandle, MaterialHandle, Node, NodeHandle, NodeKind, SceneGraph, SceneVisitor, ShapeNode,
};
use glam::{Mat4, Quat, Vec3};

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-5;

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    a.abs_diff_eq(b, EPSILON)
}

fn translated(x: f32, y: f32, z: f32) -> Node {
    Node::transform(RigidTransform::from_translation(Vec3::new(x, y, z)))
}

fn shape() -> Node {
    Node::shape(ShapeNode::new(GeometryHandle(0), MaterialHandle(0)))
}

/// world -> a -> b -> c, plus a shape under b
fn chain() -> (SceneGraph, NodeHandle, NodeHandle, NodeHandle) {
    let mut graph = SceneGraph::new();
    let a = graph.add_child(graph.root(), translated(1.0, 0.0, 0.0)).unwrap();
    let b = graph
        .add_child(
            a,
            Node::transform(RigidTransform::new(
                Vec3::new(0.0, 2.0, 0.0),
                Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
            )),
        )
        .unwrap();
    let c = graph.add_child(b, translated(1.0, 0.0, 0.0)).unwrap();
    graph.add_child(b, shape()).unwrap();
    (graph, a, b, c)
}

// ============================================================================
// Structure
// ============================================================================

#[test]
fn new_graph_has_only_root() {
    let graph = SceneGraph::new();
    assert_eq!(graph.len(), 1);
    assert!(matches!(graph.get(graph.root()).unwrap().kind(), NodeKind::Root));
    assert_eq!(graph.parent(graph.root()), None);
}

#[test]
fn add_child_records_parent_and_order() {
    let mut graph = SceneGraph::new();
    let root = graph.root();
    let first = graph.add_child(root, translated(0.0, 0.0, 0.0)).unwrap();
    let second = graph.add_child(root, translated(1.0, 0.0, 0.0)).unwrap();
    assert_eq!(graph.children(root), &[first, second]);
    assert_eq!(graph.parent(second), Some(root));
}

#[test]
fn attach_rejects_node_with_parent() {
    let (mut graph, a, _, c) = chain();
    let err = graph.attach(a, c).unwrap_err();
    assert!(matches!(err, ArmatureError::HierarchyViolation(_)));
    assert_eq!(graph.children(a).len(), 1);
}

#[test]
fn attach_rejects_cycles() {
    let mut graph = SceneGraph::new();
    let top = graph.create(translated(0.0, 0.0, 0.0));
    let below = graph.add_child(top, translated(0.0, 1.0, 0.0)).unwrap();
    let err = graph.attach(below, top).unwrap_err();
    assert!(matches!(err, ArmatureError::HierarchyViolation(_)));
    assert_eq!(graph.parent(top), None);
    assert!(graph.children(below).is_empty());
}

#[test]
fn attach_rejects_self_and_root() {
    let mut graph = SceneGraph::new();
    let loose = graph.create(translated(0.0, 0.0, 0.0));
    assert!(graph.attach(loose, loose).is_err());
    assert!(graph.attach(loose, graph.root()).is_err());
}

#[test]
fn shapes_cannot_have_children() {
    let mut graph = SceneGraph::new();
    let leaf = graph.add_child(graph.root(), shape()).unwrap();
    let err = graph.add_child(leaf, translated(0.0, 0.0, 0.0)).unwrap_err();
    assert!(matches!(err, ArmatureError::HierarchyViolation(_)));
    assert_eq!(graph.len(), 2);
}

#[test]
fn attach_places_detached_node() {
    let mut graph = SceneGraph::new();
    let loose = graph.create(translated(0.0, 3.0, 0.0));
    graph.attach(graph.root(), loose).unwrap();
    assert_eq!(graph.parent(loose), Some(graph.root()));
}

#[test]
fn remove_child_drops_whole_subtree() {
    let (mut graph, a, b, c) = chain();
    let root = graph.root();
    assert!(graph.remove_child(root, a));
    assert!(!graph.contains(a));
    assert!(!graph.contains(b));
    assert!(!graph.contains(c));
    assert_eq!(graph.len(), 1);
    assert!(graph.children(root).is_empty());
}

#[test]
fn remove_absent_child_is_false() {
    let (mut graph, a, _, c) = chain();
    assert!(!graph.remove_child(a, c));
    assert!(graph.contains(c));
}

#[test]
fn transform_access_on_non_transform_nodes_fails() {
    let mut graph = SceneGraph::new();
    let root = graph.root();
    assert!(matches!(graph.transform(root), Err(ArmatureError::NotATransformNode)));
    let leaf = graph.add_child(root, shape()).unwrap();
    assert!(matches!(
        graph.set_transform(leaf, RigidTransform::IDENTITY),
        Err(ArmatureError::NotATransformNode)
    ));
}

// ============================================================================
// Accumulated transforms
// ============================================================================

#[test]
fn root_child_accumulates_to_its_local_transform_exactly() {
    let mut graph = SceneGraph::new();
    let local = RigidTransform::new(Vec3::new(0.1, 0.2, 0.3), Quat::from_rotation_y(0.77));
    let node = graph.add_child(graph.root(), Node::transform(local)).unwrap();
    assert_eq!(graph.accumulated_transform(graph.root(), node, 0).unwrap(), local);
}

#[test]
fn accumulation_composes_along_path() {
    let (graph, _, _, c) = chain();
    let world = graph.world_transform(c).unwrap();
    // a: +x, b: +2y then rotate 90 about z, c: +x in b's frame = +y in world
    assert!(vec3_approx(world.translation(), Vec3::new(1.0, 3.0, 0.0)));
}

#[test]
fn depth_limit_excludes_trailing_nodes() {
    let (graph, _, b, c) = chain();
    let parent = graph.accumulated_transform(graph.root(), c, 1).unwrap();
    let b_world = graph.world_transform(b).unwrap();
    assert!(parent.abs_diff_eq(&b_world, EPSILON));

    let nothing = graph.accumulated_transform(graph.root(), c, 10).unwrap();
    assert_eq!(nothing, RigidTransform::IDENTITY);
}

#[test]
fn accumulation_from_subtree_root_includes_its_own_transform() {
    let (graph, a, b, c) = chain();
    let from_a = graph.accumulated_transform(a, c, 0).unwrap();
    let world = graph.world_transform(c).unwrap();
    assert!(from_a.abs_diff_eq(&world, EPSILON));

    let from_b = graph.accumulated_transform(b, c, 0).unwrap();
    let expected = graph.transform(b).unwrap() * graph.transform(c).unwrap();
    assert!(from_b.abs_diff_eq(&expected, EPSILON));
}

#[test]
fn unreachable_target_is_node_not_found() {
    let (mut graph, a, _, _) = chain();
    let loose = graph.create(translated(0.0, 0.0, 0.0));
    assert!(matches!(
        graph.accumulated_transform(graph.root(), loose, 0),
        Err(ArmatureError::NodeNotFound)
    ));
    let other = graph.add_child(graph.root(), translated(0.0, 0.0, 0.0)).unwrap();
    assert!(matches!(
        graph.accumulated_transform(a, other, 0),
        Err(ArmatureError::NodeNotFound)
    ));
}

// ============================================================================
// Traversal
// ============================================================================

#[test]
fn transform_nodes_are_pre_order() {
    let mut graph = SceneGraph::new();
    let root = graph.root();
    let a = graph.add_child(root, translated(0.0, 0.0, 0.0)).unwrap();
    let a1 = graph.add_child(a, translated(0.0, 0.0, 0.0)).unwrap();
    graph.add_child(a, shape()).unwrap();
    let a2 = graph.add_child(a, translated(0.0, 0.0, 0.0)).unwrap();
    let b = graph.add_child(root, translated(0.0, 0.0, 0.0)).unwrap();
    assert_eq!(graph.transform_nodes(root), vec![a, a1, a2, b]);
}

#[derive(Default)]
struct Recorder {
    events: Vec<String>,
    shape_origins: Vec<Vec3>,
}

impl SceneVisitor for Recorder {
    fn enter_transform(&mut self, _node: NodeHandle, accumulated: &RigidTransform) {
        self.events.push(format!("enter {:?}", accumulated.translation()));
    }

    fn exit_transform(&mut self, _node: NodeHandle) {
        self.events.push("exit".into());
    }

    fn visit_shape(&mut self, _node: NodeHandle, _shape: &ShapeNode, accumulated: Mat4) {
        self.events.push("shape".into());
        self.shape_origins.push(accumulated.transform_point3(Vec3::ZERO));
    }
}

#[test]
fn visitor_sees_depth_first_order_and_accumulated_shapes() {
    let mut graph = SceneGraph::new();
    let a = graph.add_child(graph.root(), translated(1.0, 0.0, 0.0)).unwrap();
    graph
        .add_child(
            a,
            Node::shape(
                ShapeNode::new(GeometryHandle(1), MaterialHandle(1))
                    .with_position(Vec3::new(0.0, 2.0, 0.0))
                    .with_scale(Vec3::splat(3.0)),
            ),
        )
        .unwrap();
    graph.add_child(graph.root(), translated(5.0, 0.0, 0.0)).unwrap();

    let mut recorder = Recorder::default();
    graph.accept(&mut recorder);
    assert_eq!(recorder.events.len(), 5);
    assert_eq!(recorder.events[1], "shape");
    assert_eq!(recorder.events[2], "exit");
    assert!(vec3_approx(recorder.shape_origins[0], Vec3::new(1.0, 2.0, 0.0)));
}

// ============================================================================
// Demo scene
// ============================================================================

#[test]
fn demo_scene_layout() {
    let demo = build_demo_scene(&DemoAssets::default()).unwrap();
    let graph = &demo.graph;
    assert_eq!(graph.children(graph.root()), &[demo.sky, demo.ground, demo.robot1, demo.robot2]);
    assert!(vec3_approx(
        graph.transform(demo.sky).unwrap().translation(),
        Vec3::new(0.0, 10.0, 30.0)
    ));
    assert!(vec3_approx(
        graph.transform(demo.ground).unwrap().translation(),
        Vec3::new(0.0, GROUND_Y, 0.0)
    ));
    // sky, ground, and two robots of ten transform nodes each
    assert_eq!(graph.transform_nodes(graph.root()).len(), 22);
    assert_eq!(graph.name(demo.robot2), Some("robot2"));
}
