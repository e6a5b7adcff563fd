//! Editor settings tests
//!
//! Tests for:
//! - Defaults
//! - JSON round trip and partial documents
//! - Validation clamps

use std::path::PathBuf;

use armature::{EditorSettings, SkyMode};

#[test]
fn defaults_match_startup_session() {
    let s = EditorSettings::default();
    assert_eq!((s.window_width, s.window_height), (1300, 512));
    assert_eq!(s.min_fov_y_degrees, 60.0);
    assert_eq!(s.ms_between_keyframes, 2000);
    assert_eq!(s.fps, 60);
    assert_eq!(s.sky_mode, SkyMode::WorldSky);
    assert!(s.display_arcball);
    assert_eq!(s.animation_file, PathBuf::from("animation.txt"));
}

#[test]
fn json_round_trip() {
    let settings = EditorSettings {
        window_width: 800,
        sky_mode: SkyMode::SkySky,
        ms_between_keyframes: 500,
        animation_file: PathBuf::from("walk.txt"),
        ..Default::default()
    };
    let json = settings.to_json_string().unwrap();
    assert!(json.contains("\"sky_sky\""));
    assert_eq!(EditorSettings::from_json_str(&json).unwrap(), settings);
}

#[test]
fn missing_fields_take_defaults() {
    let s = EditorSettings::from_json_str(r#"{ "fps": 30 }"#).unwrap();
    assert_eq!(s.fps, 30);
    assert_eq!(s.window_width, 1300);
    assert_eq!(s.far, 50.0);
}

#[test]
fn malformed_json_is_an_error() {
    let err = EditorSettings::from_json_str("{ fps: ").unwrap_err();
    assert!(matches!(err, armature::ArmatureError::SettingsError(_)));
}

#[test]
fn validation_clamps_out_of_range_values() {
    let s = EditorSettings {
        window_width: 0,
        min_fov_y_degrees: 200.0,
        near: 5.0,
        far: 1.0,
        ms_between_keyframes: 5,
        fps: 0,
        ..Default::default()
    }
    .validate();
    assert_eq!(s.window_width, 1);
    assert_eq!(s.min_fov_y_degrees, 60.0);
    assert_eq!((s.near, s.far), (0.1, 50.0));
    assert_eq!(s.ms_between_keyframes, 100);
    assert_eq!(s.fps, 1);

    let slow = EditorSettings {
        ms_between_keyframes: 60_000,
        ..Default::default()
    }
    .validate();
    assert_eq!(slow.ms_between_keyframes, 10_000);
}

#[test]
fn load_reads_file() {
    let path = std::env::temp_dir().join(format!("armature-settings-{}.json", uuid::Uuid::new_v4()));
    std::fs::write(&path, r#"{ "display_arcball": false }"#).unwrap();
    let s = EditorSettings::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert!(!s.display_arcball);
}
