//! Animation file tests
//!
//! Tests for:
//! - Save/load round trip through a real file
//! - Node-count mismatch leaves existing keyframes intact
//! - Parse errors (bad numbers, truncation, trailing data, zero quaternion)

use std::path::PathBuf;

use armature::animation::io::{animation_to_string, load_animation, parse_animation, save_animation};
use armature::animation::{Animator, KeyframeCursor};
use armature::errors::ArmatureError;
use armature::math::RigidTransform;
use armature::scene::{Node, SceneGraph};
use glam::{Quat, Vec3};

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-5;

fn temp_file(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("armature-{tag}-{}.txt", uuid::Uuid::new_v4()))
}

/// Animator tracking `nodes` transform nodes, with `frames` distinct keyframes.
fn animator_with(nodes: usize, frames: usize) -> (SceneGraph, Animator) {
    let mut graph = SceneGraph::new();
    let mut parent = graph.root();
    for _ in 0..nodes {
        parent = graph
            .add_child(parent, Node::transform(RigidTransform::IDENTITY))
            .unwrap();
    }
    let mut animator = Animator::new();
    animator.attach(&graph, graph.root());

    let tracked = animator.tracked_nodes().to_vec();
    let mut cursor = KeyframeCursor::END;
    for k in 0..frames {
        for (j, &node) in tracked.iter().enumerate() {
            let rbt = RigidTransform::new(
                Vec3::new(k as f32, j as f32 * 0.5, -1.25),
                Quat::from_euler(glam::EulerRot::XYZ, 0.1 * k as f32, 0.2 * j as f32, 0.3),
            );
            graph.set_transform(node, rbt).unwrap();
        }
        cursor = animator.insert_after(cursor).unwrap();
        animator.pull_from_scene_graph(&graph, cursor).unwrap();
    }
    (graph, animator)
}

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn save_then_load_restores_keyframes() {
    let (_, saved) = animator_with(3, 5);
    let path = temp_file("roundtrip");
    save_animation(&saved, &path).unwrap();

    let (_, mut loaded) = animator_with(3, 1);
    let count = load_animation(&mut loaded, &path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(count, 5);
    assert_eq!(loaded.len(), 5);
    for (a, b) in saved.keyframes().iter().zip(loaded.keyframes().iter()) {
        for (x, y) in a.iter().zip(b) {
            assert!(x.abs_diff_eq(y, EPSILON));
        }
    }
}

#[test]
fn save_leaves_no_temporary_file() {
    let (_, animator) = animator_with(2, 2);
    let path = temp_file("tmpfile");
    save_animation(&animator, &path).unwrap();

    let mut tmp_name = path.file_name().unwrap().to_owned();
    tmp_name.push(".tmp");
    assert!(path.exists());
    assert!(!path.with_file_name(tmp_name).exists());
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn header_lists_frames_and_transforms() {
    let (_, animator) = animator_with(3, 2);
    let text = animation_to_string(&animator);
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("2 3"));
    assert_eq!(lines.count(), 6);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn mismatched_node_count_keeps_existing_keyframes() {
    let (_, other) = animator_with(2, 4);
    let path = temp_file("mismatch");
    save_animation(&other, &path).unwrap();

    let (_, mut animator) = animator_with(3, 2);
    let before: Vec<_> = animator.keyframes().iter().cloned().collect();
    let err = load_animation(&mut animator, &path).unwrap_err();
    std::fs::remove_file(&path).unwrap();

    assert!(matches!(
        err,
        ArmatureError::NodeCountMismatch { expected: 3, found: 2 }
    ));
    let after: Vec<_> = animator.keyframes().iter().cloned().collect();
    assert_eq!(before, after);
}

#[test]
fn missing_file_is_io_error() {
    let (_, mut animator) = animator_with(1, 1);
    let err = load_animation(&mut animator, temp_file("missing")).unwrap_err();
    assert!(matches!(err, ArmatureError::IoError(_)));
    assert_eq!(animator.len(), 1);
}

#[test]
fn invalid_number_reports_line() {
    let text = "1 2\n0 0 0 0 0 0 1\n0 0 zero 0 0 0 1\n";
    match parse_animation(text, 2) {
        Err(ArmatureError::Parse { line, .. }) => assert_eq!(line, 3),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn truncated_file_fails() {
    let text = "2 1\n0 0 0 0 0 0 1\n";
    assert!(matches!(
        parse_animation(text, 1),
        Err(ArmatureError::Parse { .. })
    ));
}

#[test]
fn trailing_data_fails() {
    let text = "1 1\n0 0 0 0 0 0 1\n42\n";
    match parse_animation(text, 1) {
        Err(ArmatureError::Parse { line, .. }) => assert_eq!(line, 3),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn zero_quaternion_fails() {
    let text = "1 1\n1 2 3 0 0 0 0\n";
    assert!(matches!(
        parse_animation(text, 1),
        Err(ArmatureError::Parse { line: 2, .. })
    ));
}

#[test]
fn quaternions_are_normalized_on_load() {
    let text = "1 1\n1 2 3 0 0 0 2\n";
    let frames = parse_animation(text, 1).unwrap();
    let rbt = frames[0][0];
    assert!(rbt.translation().abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), EPSILON));
    assert!(rbt.rotation().abs_diff_eq(Quat::IDENTITY, EPSILON));
}

#[test]
fn empty_animation_parses() {
    let frames = parse_animation("0 4\n", 4).unwrap();
    assert!(frames.is_empty());
}
