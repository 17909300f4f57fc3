use std::path::PathBuf;

use approx::assert_relative_eq;

use polysim::simulation::engine::kinetic_energy;
use polysim::{ConfigError, Engine, NVec2, Rgba, Scenario, ScenarioConfig, ShapeConfig};

const BOUNCE: &str = r#"
parameters:
  t_end: 2.0
  h0: 0.001
  report_every: 500

bodies:
  - name: ground
    shape: { kind: rectangle, center: [0.0, -1.0], width: 40.0, height: 2.0 }
    mass: .inf
  - name: ball
    shape: { kind: regular_polygon, center: [0.0, 5.0], radius: 1.0, sides: 16 }
    mass: 1.0
    velocity: [0.5, 0.0]
    color: [1.0, 0.0, 0.0, 1.0]

forces:
  - { kind: global_gravity, g: 9.8, body: ball }
  - { kind: physics_collision, elasticity: 0.8, body1: ball, body2: ground }
"#;

fn scenario_with(bodies: &str, forces: &str) -> String {
    format!("parameters: {{ t_end: 1.0, h0: 0.01 }}\nbodies:\n{bodies}\nforces:\n{forces}\n")
}

// ==================================================================================
// Parsing tests
// ==================================================================================

#[test]
fn parses_bodies_and_forces() {
    let cfg = ScenarioConfig::from_yaml_str(BOUNCE).expect("valid yaml");
    assert_eq!(cfg.parameters.t_end, 2.0);
    assert_eq!(cfg.parameters.report_every, 500);
    assert_eq!(cfg.bodies.len(), 2);
    assert_eq!(cfg.forces.len(), 2);

    let ground = &cfg.bodies[0];
    assert!(ground.mass.is_infinite());
    assert_eq!(ground.velocity, [0.0, 0.0]);
    assert_eq!(ground.color, Rgba::BLACK);
    assert!(matches!(ground.shape, ShapeConfig::Rectangle { width, .. } if width == 40.0));

    assert_eq!(cfg.bodies[1].color, Rgba::RED);
}

#[test]
fn rejects_unknown_shape_kind() {
    let yaml = scenario_with("  - { name: a, shape: { kind: blob, radius: 1.0 }, mass: 1.0 }", "  []");
    let err = ScenarioConfig::from_yaml_str(&yaml).unwrap_err();
    assert!(matches!(err, ConfigError::Yaml(_)));
}

#[test]
fn missing_file_reports_path() {
    let path = PathBuf::from("does/not/exist.yaml");
    match ScenarioConfig::from_path(&path) {
        Err(ConfigError::Io { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn bundled_scenarios_load() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios");
    for name in ["falling_ball.yaml", "orbit.yaml"] {
        let cfg = ScenarioConfig::from_path(&dir.join(name)).expect(name);
        let scenario = Scenario::build_scenario(cfg).expect(name);
        assert!(scenario.scene.body_count() > 0);
        assert!(scenario.scene.force_creator_count() > 0);
    }
}

// ==================================================================================
// Building tests
// ==================================================================================

#[test]
fn builds_scene_with_named_bodies() {
    let cfg = ScenarioConfig::from_yaml_str(BOUNCE).expect("valid yaml");
    let scenario = Scenario::build_scenario(cfg).expect("valid scenario");
    assert_eq!(scenario.scene.body_count(), 2);
    assert_eq!(scenario.scene.force_creator_count(), 2);

    let ball = scenario.body("ball").expect("ball is named");
    let body = &scenario.scene.bodies()[ball];
    assert_eq!(body.mass(), 1.0);
    assert_eq!(body.velocity(), NVec2::new(0.5, 0.0));
    assert_relative_eq!(body.centroid(), NVec2::new(0.0, 5.0), epsilon = 1e-9);
    assert!(scenario.body("nobody").is_none());
    assert_eq!(scenario.parameters.steps(), 2000);
}

#[test]
fn unknown_body_in_force_is_an_error() {
    let yaml = scenario_with(
        "  - { name: a, shape: { kind: rectangle, center: [0.0, 0.0], width: 1.0, height: 1.0 }, mass: 1.0 }",
        "  - { kind: drag, gamma: 1.0, body: ghost }",
    );
    let cfg = ScenarioConfig::from_yaml_str(&yaml).expect("valid yaml");
    match Scenario::build_scenario(cfg) {
        Err(ConfigError::UnknownBody(name)) => assert_eq!(name, "ghost"),
        other => panic!("expected unknown body, got {:?}", other.err()),
    }
}

#[test]
fn duplicate_body_names_are_rejected() {
    let body = "  - { name: a, shape: { kind: rectangle, center: [0.0, 0.0], width: 1.0, height: 1.0 }, mass: 1.0 }";
    let yaml = scenario_with(&format!("{body}\n{body}"), "  []");
    let cfg = ScenarioConfig::from_yaml_str(&yaml).expect("valid yaml");
    assert!(matches!(Scenario::build_scenario(cfg), Err(ConfigError::DuplicateBody(name)) if name == "a"));
}

#[test]
fn invalid_values_are_rejected() {
    let bad_step = "parameters: { t_end: 1.0, h0: 0.0 }\nbodies: []\n";
    let cfg = ScenarioConfig::from_yaml_str(bad_step).expect("valid yaml");
    assert!(matches!(Scenario::build_scenario(cfg), Err(ConfigError::InvalidParameter(_))));

    let bad_mass = scenario_with(
        "  - { name: a, shape: { kind: rectangle, center: [0.0, 0.0], width: 1.0, height: 1.0 }, mass: -2.0 }",
        "  []",
    );
    let cfg = ScenarioConfig::from_yaml_str(&bad_mass).expect("valid yaml");
    assert!(matches!(Scenario::build_scenario(cfg), Err(ConfigError::InvalidParameter(_))));

    let bad_shape = scenario_with(
        "  - { name: a, shape: { kind: polygon, vertices: [[0.0, 0.0], [1.0, 0.0]] }, mass: 1.0 }",
        "  []",
    );
    let cfg = ScenarioConfig::from_yaml_str(&bad_shape).expect("valid yaml");
    assert!(matches!(Scenario::build_scenario(cfg), Err(ConfigError::InvalidParameter(_))));
}

#[test]
fn shapes_without_area_are_rejected() {
    for shape in [
        "{ kind: rectangle, center: [1.0, 2.0], width: 0.0, height: 1.0 }",
        "{ kind: rectangle, center: [1.0, 2.0], width: 1.0, height: 0.0 }",
        "{ kind: star, center: [0.0, 0.0], arms: 5, circumradius: 0.0, inradius: 0.0 }",
        "{ kind: polygon, vertices: [[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]] }",
    ] {
        let yaml = scenario_with(&format!("  - {{ name: flat, shape: {shape}, mass: 1.0 }}"), "  []");
        let cfg = ScenarioConfig::from_yaml_str(&yaml).expect("valid yaml");
        match Scenario::build_scenario(cfg) {
            Err(ConfigError::InvalidParameter(msg)) => assert!(msg.contains("flat"), "{msg}"),
            other => panic!("expected invalid parameter for {shape}, got {:?}", other.err()),
        }
    }

    // clockwise winding still has area
    let cw = scenario_with(
        "  - { name: cw, shape: { kind: polygon, vertices: [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0]] }, mass: 1.0 }",
        "  []",
    );
    let cfg = ScenarioConfig::from_yaml_str(&cw).expect("valid yaml");
    let scenario = Scenario::build_scenario(cfg).expect("clockwise polygon is valid");
    let id = scenario.body("cw").expect("cw is named");
    assert!(scenario.scene.bodies()[id].centroid().iter().all(|c| c.is_finite()));
}

// ==================================================================================
// Engine tests
// ==================================================================================

#[test]
fn engine_runs_bouncing_ball() {
    let cfg = ScenarioConfig::from_yaml_str(BOUNCE).expect("valid yaml");
    let mut scenario = Scenario::build_scenario(cfg).expect("valid scenario");
    let ball = scenario.body("ball").expect("ball is named");

    let engine = Engine::new(scenario.parameters.clone());
    let summary = engine.run(&mut scenario.scene);
    assert_eq!(summary.steps, 2000);
    assert_relative_eq!(summary.time, 2.0, epsilon = 1e-9);
    assert_eq!(summary.bodies, 2);
    assert_eq!(summary.kinetic_energy, kinetic_energy(&scenario.scene));

    // the ground stops the ball from falling through
    let body = &scenario.scene.bodies()[ball];
    assert!(body.centroid().y > -1.0, "ball fell through: {:?}", body.centroid());
    assert!(body.centroid().x > 0.0);
}

#[test]
fn destructive_scenario_empties_scene() {
    let yaml = scenario_with(
        "  - { name: a, shape: { kind: rectangle, center: [0.0, 0.0], width: 1.0, height: 1.0 }, mass: 1.0, velocity: [2.0, 0.0] }\n  - { name: b, shape: { kind: star, center: [2.5, 0.0], arms: 4, circumradius: 0.5, inradius: 0.2 }, mass: 1.0 }",
        "  - { kind: destructive_collision, body1: a, body2: b }",
    );
    let cfg = ScenarioConfig::from_yaml_str(&yaml).expect("valid yaml");
    let mut scenario = Scenario::build_scenario(cfg).expect("valid scenario");
    let summary = Engine::new(scenario.parameters.clone()).run(&mut scenario.scene);
    assert_eq!(summary.bodies, 0);
    assert_eq!(summary.kinetic_energy, 0.0);
    assert_eq!(scenario.scene.force_creator_count(), 0);
}
