use std::io::Write;

use engine::nav::{Heuristic, Smoothing};
use engine::physics::{PhysicsError, Vec2};
use engine::{ConfigError, EngineConfig};

#[test]
fn loads_partial_yaml_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(
        file,
        "physics:\n  gravity: {{ x: 0.0, y: -20.0 }}\n  auto_sleep: true\npathfinding:\n  heuristic: octile\n  smoothing: line_of_sight\n  max_iterations: 500"
    )
    .expect("write config");

    let config = EngineConfig::load(file.path()).expect("load config");
    assert_eq!(config.physics.gravity, Vec2::new(0.0, -20.0));
    assert!(config.physics.auto_sleep);
    assert_eq!(config.physics.fixed_time_step, 1.0 / 60.0);
    assert!(matches!(config.pathfinding.heuristic, Heuristic::Octile));
    assert_eq!(config.pathfinding.smoothing, Smoothing::LineOfSight);
    assert_eq!(config.pathfinding.max_iterations, 500);
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("engine.yaml");

    let config = EngineConfig::load_or_default(&path).expect("defaults");
    assert_eq!(config.physics.gravity, Vec2::new(0.0, 9.81));
    assert!(matches!(config.pathfinding.heuristic, Heuristic::Manhattan));

    let err = EngineConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { path: p, .. } if p == path));
}

#[test]
fn malformed_yaml_reports_the_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("engine.yaml");
    std::fs::write(&path, "physics: [not, a, map]\n").expect("write config");

    let err = EngineConfig::load_or_default(&path).unwrap_err();
    match err {
        ConfigError::Parse { path: p, .. } => assert_eq!(p, path),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn invalid_physics_values_are_rejected() {
    let err = EngineConfig::from_yaml_str("physics:\n  fixed_time_step: 0.0\n").unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Physics(PhysicsError::InvalidTimeStep(_))
    ));
    assert!(err.to_string().contains("fixed time step"));
}

#[test]
fn config_roundtrips_through_yaml() {
    let mut config = EngineConfig::default();
    config.physics.velocity_iterations = 12;
    config.pathfinding.smoothing = Smoothing::Simple;

    let yaml = config.to_yaml_string().expect("serialize");
    let back = EngineConfig::from_yaml_str(&yaml).expect("parse");
    assert_eq!(back.physics, config.physics);
    assert_eq!(back.pathfinding.smoothing, Smoothing::Simple);
}
