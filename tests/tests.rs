use std::f64::consts::FRAC_PI_2;
use std::path::PathBuf;
use std::time::Duration;

use heartbeat::{
    heart_point, heart_points, repulsion_set, Attraction, CanvasTransform, CommandBuffer, ConfigError,
    DrawCommand, HeartbeatClock, Magnitude, NVec2, Particle, Phase, RenderSink, Repulsion, Rgba, Scene,
    Settings, SettingsConfig, Steering, SteeringSet,
};
use test_case::test_case;

const EPS: f64 = 1e-9;

/// Default parameters with a fixed layout
pub fn test_settings() -> Settings {
    Settings {
        seed: Some(42),
        ..Settings::default()
    }
}

/// Scene on an 800x600 viewport
pub fn test_scene() -> Scene {
    Scene::new(test_settings(), 800.0, 600.0)
}

/// Particle at `position` with a given velocity, heading for the origin
pub fn moving_particle(position: NVec2, velocity: NVec2) -> Particle {
    Particle {
        position,
        target: NVec2::zeros(),
        velocity,
    }
}

pub fn repulsor_at(point: NVec2) -> Repulsion {
    Repulsion::from_settings(point, &test_settings())
}

// ==================================================================================
// Vector tests
// ==================================================================================

#[test]
fn with_magnitude_of_zero_vector_is_zero() {
    assert_eq!(NVec2::zeros().with_magnitude(40.0), NVec2::zeros());
}

#[test]
fn with_magnitude_keeps_direction() {
    let v = NVec2::new(3.0, 4.0).with_magnitude(10.0);
    assert!((v - NVec2::new(6.0, 8.0)).norm() < EPS, "got {:?}", v);
}

#[test]
fn limited_leaves_short_vectors_alone() {
    let v = NVec2::new(1.0, -2.0);
    assert_eq!(v.limited(10.0), v);
}

#[test]
fn limited_is_idempotent() {
    let once = NVec2::new(300.0, -400.0).limited(40.0);
    let twice = once.limited(40.0);

    assert!((once.norm() - 40.0).abs() < EPS);
    assert!((once - twice).norm() < EPS, "{:?} vs {:?}", once, twice);
}

// ==================================================================================
// Heart outline tests
// ==================================================================================

#[test]
fn heart_point_at_quarter_turn() {
    let p = heart_point(FRAC_PI_2, 13.0);
    assert!((p.x - 208.0).abs() < 1e-9, "x = {}", p.x);
    assert!((p.y + 52.0).abs() < 1e-9, "y = {}", p.y);
}

#[test]
fn heart_starts_at_the_bottom_tip_on_a_y_down_canvas() {
    let first = heart_points(0.075, 13.0).next().expect("non-empty outline");
    // -13 * (13 - 5 - 2 - 1)
    assert!((first - NVec2::new(0.0, -65.0)).norm() < EPS, "got {:?}", first);
}

#[test]
fn heart_sample_count_covers_full_turn() {
    // 0, 0.075, ..., 83 * 0.075 = 6.225 <= 2π
    assert_eq!(heart_points(0.075, 13.0).count(), 84);
    assert_eq!(heart_points(std::f64::consts::PI, 1.0).count(), 3);
}

#[test]
fn heart_sampler_is_restartable() {
    let outline = heart_points(0.5, 2.0);
    let first: Vec<NVec2> = outline.clone().collect();
    let second: Vec<NVec2> = outline.collect();
    assert_eq!(first, second);
}

#[test_case(0.0 ; "zero step")]
#[test_case(-0.1 ; "negative step")]
#[test_case(f64::NAN ; "nan step")]
fn heart_sampler_rejects_unusable_steps(step: f64) {
    assert_eq!(heart_points(step, 13.0).count(), 0);
}

// ==================================================================================
// Force tests
// ==================================================================================

#[test]
fn attraction_is_zero_at_target_when_at_rest() {
    let attraction = Attraction::from_settings(&test_settings());
    let particle = Particle::new(NVec2::new(5.0, 5.0), NVec2::new(5.0, 5.0));

    assert!(attraction.steer(&particle).norm() < EPS);
}

#[test]
fn attraction_braking_is_continuous() {
    let attraction = Attraction::from_settings(&test_settings());

    assert_eq!(attraction.desired_speed(0.0), 0.0);
    assert!((attraction.desired_speed(50.0) - 20.0).abs() < EPS);

    let inside = attraction.desired_speed(100.0 - 1e-9);
    let at_edge = attraction.desired_speed(100.0);
    assert!((inside - at_edge).abs() < 1e-6, "jump at braking edge: {} vs {}", inside, at_edge);
    assert_eq!(attraction.desired_speed(1000.0), 40.0);
}

#[test]
fn attraction_is_limited_and_points_at_target() {
    let attraction = Attraction::from_settings(&test_settings());
    let particle = Particle::new(NVec2::new(-300.0, 0.0), NVec2::zeros());

    let force = attraction.steer(&particle);

    assert!((force.norm() - 10.0).abs() < EPS, "|force| = {}", force.norm());
    assert!(force.x > 0.0 && force.y.abs() < EPS);
}

#[test]
fn attraction_cancels_drift_near_target() {
    let attraction = Attraction::from_settings(&test_settings());
    let particle = moving_particle(NVec2::zeros(), NVec2::new(3.0, 0.0));

    let force = attraction.steer(&particle);
    assert!((force - NVec2::new(-3.0, 0.0)).norm() < EPS, "got {:?}", force);
}

#[test_case(500.0, 0.0 ; "exactly at radius")]
#[test_case(0.0, -500.0 ; "exactly at radius vertically")]
#[test_case(800.0, 600.0 ; "far outside")]
#[test_case(-353.6, 353.6 ; "diagonal just outside")]
fn repulsion_is_zero_outside_radius(x: f64, y: f64) {
    let repulsion = repulsor_at(NVec2::zeros());
    let particle = moving_particle(NVec2::new(x, y), NVec2::new(7.0, -2.0));

    assert_eq!(repulsion.steer(&particle), NVec2::zeros());
}

#[test]
fn repulsion_pushes_away_inside_radius() {
    let repulsion = repulsor_at(NVec2::new(10.0, 0.0));
    let particle = Particle::new(NVec2::new(60.0, 0.0), NVec2::zeros());

    let force = repulsion.steer(&particle);

    assert!(force.x > 0.0, "force should point away from repulsor: {:?}", force);
    assert!((force.norm() - 9.0).abs() < EPS, "|force| = {}", force.norm());
}

#[test]
fn repulsion_on_top_of_repulsor_only_brakes() {
    let repulsion = repulsor_at(NVec2::zeros());
    let particle = moving_particle(NVec2::zeros(), NVec2::new(0.0, 2.0));

    let force = repulsion.steer(&particle);
    assert!((force - NVec2::new(0.0, -2.0)).norm() < EPS, "got {:?}", force);
}

#[test]
fn repulsors_combine_additively() {
    let settings = test_settings();
    let points = [NVec2::new(-20.0, 0.0), NVec2::new(0.0, 30.0)];
    let set = repulsion_set(&points, &settings);
    let particle = moving_particle(NVec2::new(5.0, 5.0), NVec2::new(1.0, 1.0));

    let expected = repulsor_at(points[0]).steer(&particle) + repulsor_at(points[1]).steer(&particle);

    assert_eq!(set.len(), 2);
    assert!((set.net_force(&particle) - expected).norm() < EPS);
}

#[test]
fn empty_steering_set_is_zero() {
    let set = SteeringSet::new();
    let particle = moving_particle(NVec2::new(1.0, 2.0), NVec2::new(3.0, 4.0));

    assert!(set.is_empty());
    assert_eq!(set.net_force(&particle), NVec2::zeros());
}

// ==================================================================================
// Heartbeat tests
// ==================================================================================

pub fn default_clock() -> HeartbeatClock {
    HeartbeatClock::from_settings(&Settings::default())
}

#[test]
fn heartbeat_starts_attracting() {
    let clock = default_clock();
    assert_eq!(clock.phase(), Phase::Attracting);
    assert!(!clock.repulsion_active());
}

#[test]
fn heartbeat_follows_schedule() {
    let mut clock = default_clock();

    assert!(!clock.advance(Duration::from_millis(1299)));
    assert!(!clock.repulsion_active());

    // start delay + attraction duration
    assert!(clock.advance(Duration::from_millis(251)));
    assert!(clock.repulsion_active());

    // + repulsion duration
    assert!(clock.advance(Duration::from_millis(700)));
    assert!(!clock.repulsion_active());
}

#[test]
fn heartbeat_repelling_phase_lasts_repulsion_duration() {
    let mut clock = default_clock();
    clock.advance(Duration::from_millis(1301));
    assert!(clock.repulsion_active());

    clock.advance(Duration::from_millis(698));
    assert!(clock.repulsion_active());

    clock.advance(Duration::from_millis(2));
    assert!(!clock.repulsion_active());
    assert_eq!(clock.beats(), 2);
}

#[test]
fn heartbeat_consumes_several_expiries_in_one_advance() {
    let mut clock = default_clock();

    // flips at 1300, 2000, 2250 -> three flips, flag ends up on
    let changed = clock.advance(Duration::from_millis(2300));

    assert_eq!(clock.beats(), 3);
    assert!(changed);
    assert!(clock.repulsion_active());
    assert_eq!(clock.remaining(), Duration::from_millis(650));
}

#[test]
fn heartbeat_zero_phases_still_terminate() {
    let mut clock = HeartbeatClock::new(Duration::ZERO, Duration::ZERO, Duration::ZERO);

    clock.advance(Duration::from_millis(10));
    assert!(clock.beats() >= 10);
}

// ==================================================================================
// Scene tests
// ==================================================================================

#[test]
fn scene_generates_one_particle_per_outline_point() {
    let scene = test_scene();
    let targets: Vec<NVec2> = heart_points(0.075, 13.0).collect();

    assert_eq!(scene.particles().len(), targets.len());
    for (particle, target) in scene.particles().iter().zip(&targets) {
        assert_eq!(particle.target, *target);
        assert_eq!(particle.velocity, NVec2::zeros());
        assert!(particle.position.x.abs() <= 400.0 && particle.position.y.abs() <= 300.0);
    }
    assert_eq!(scene.repulsors(), &[NVec2::zeros()]);
}

#[test]
fn scene_seed_makes_layout_reproducible() {
    assert_eq!(test_scene().particles(), test_scene().particles());
}

#[test]
fn update_keeps_speed_within_limit() {
    let mut scene = test_scene();
    assert!(!scene.repulsion_active());

    for particle in scene.particles_mut() {
        particle.velocity = NVec2::new(120.0, -95.0);
    }
    scene.update();

    for particle in scene.particles() {
        assert!(particle.velocity.norm() <= 40.0 + EPS, "speed {}", particle.velocity.norm());
    }
}

#[test]
fn particle_at_target_stays_put() {
    let mut scene = test_scene();
    for particle in scene.particles_mut() {
        particle.position = particle.target;
        particle.velocity = NVec2::zeros();
    }

    scene.update();

    for particle in scene.particles() {
        assert!((particle.position - particle.target).norm() < EPS);
        assert!(particle.velocity.norm() < EPS);
    }
}

#[test]
fn targets_never_change() {
    let mut scene = test_scene();
    let before: Vec<NVec2> = scene.particles().iter().map(|p| p.target).collect();

    scene.tick(Duration::from_millis(1400));
    assert!(scene.repulsion_active());
    for _ in 0..30 {
        scene.update();
    }

    let after: Vec<NVec2> = scene.particles().iter().map(|p| p.target).collect();
    assert_eq!(before, after);
}

#[test]
fn repulsion_applies_only_while_flag_is_set() {
    let mut calm = test_scene();
    let mut beating = test_scene();
    beating.tick(Duration::from_millis(1301));

    calm.update();
    beating.update();

    // some particle starts inside the repulsion radius, so the two must differ
    assert_ne!(calm.particles(), beating.particles());
}

#[test]
fn draw_renders_then_updates() {
    let mut scene = test_scene();
    let before: Vec<NVec2> = scene.particles().iter().map(|p| p.position).collect();
    let mut sink = CommandBuffer::new();

    scene.draw(&mut sink);

    let commands = sink.commands();
    assert_eq!(commands[0], DrawCommand::Clear(Rgba::gray(30)));
    assert_eq!(
        commands[1],
        DrawCommand::Stroke {
            weight: 17.0,
            color: Rgba::new(231, 76, 60, 255)
        }
    );

    // points are the pre-update positions shifted to the canvas center
    let points: Vec<NVec2> = sink.points().collect();
    assert_eq!(points.len(), before.len());
    for (point, position) in points.iter().zip(&before) {
        assert!((point - (position + NVec2::new(400.0, 300.0))).norm() < EPS);
    }

    let after: Vec<NVec2> = scene.particles().iter().map(|p| p.position).collect();
    assert_ne!(before, after);
}

#[test]
fn draw_shows_repulsors_when_enabled() {
    let settings = Settings {
        show_repulsors: true,
        ..test_settings()
    };
    let mut scene = Scene::new(settings, 200.0, 100.0);
    let mut sink = CommandBuffer::new();

    scene.draw(&mut sink);

    assert_eq!(
        sink.commands()[1],
        DrawCommand::Stroke {
            weight: 500.0,
            color: Rgba::new(255, 255, 255, 50)
        }
    );
    assert_eq!(sink.commands()[2], DrawCommand::Point(NVec2::new(100.0, 50.0)));
}

#[test]
fn resize_moves_center_but_not_particles() {
    let mut scene = test_scene();
    let before = scene.particles().to_vec();

    scene.handle_resize(1920.0, 1080.0);

    let screen = scene.screen();
    assert_eq!((screen.width, screen.height), (1920.0, 1080.0));
    assert_eq!(screen.center, NVec2::new(960.0, 540.0));
    assert_eq!(scene.particles(), before.as_slice());
}

#[test_case(0.0, 0.0 ; "zero size")]
#[test_case(f64::NAN, f64::INFINITY ; "non finite")]
#[test_case(-10.0, -20.0 ; "negative")]
fn degenerate_viewport_centers_at_origin(width: f64, height: f64) {
    let mut scene = Scene::new(test_settings(), width, height);
    assert_eq!(scene.screen().center, NVec2::zeros());

    for particle in scene.particles() {
        assert_eq!(particle.position, NVec2::zeros());
    }

    let mut sink = CommandBuffer::new();
    scene.draw(&mut sink);
    assert!(scene.particles().iter().all(|p| p.position.x.is_finite() && p.position.y.is_finite()));
}

// ==================================================================================
// Canvas tests
// ==================================================================================

#[test]
fn canvas_transform_translates_to_center() {
    let transform = CanvasTransform::centered_at(NVec2::new(400.0, 300.0));

    assert_eq!(transform.to_canvas(NVec2::zeros()), NVec2::new(400.0, 300.0));
    assert_eq!(transform.to_canvas(NVec2::new(-10.0, 20.0)), NVec2::new(390.0, 320.0));
}

#[test]
fn particle_draw_emits_transformed_point() {
    let particle = Particle::new(NVec2::new(1.0, 2.0), NVec2::zeros());
    let mut sink = CommandBuffer::new();

    particle.draw(&mut sink, &CanvasTransform::centered_at(NVec2::new(10.0, 10.0)));
    sink.stroke(1.0, Rgba::gray(0));

    assert_eq!(sink.commands()[0], DrawCommand::Point(NVec2::new(11.0, 12.0)));
    sink.reset();
    assert!(sink.commands().is_empty());
}

// ==================================================================================
// Configuration tests
// ==================================================================================

#[test]
fn empty_config_matches_builtin_settings() {
    let settings = SettingsConfig::from_yaml_str("")
        .and_then(SettingsConfig::into_settings)
        .expect("empty config is valid");
    assert_eq!(settings, Settings::default());

    let commented = SettingsConfig::from_yaml_str("# nothing here\n").expect("comment-only config is valid");
    assert_eq!(commented, SettingsConfig::default());
}

#[test]
fn partial_config_overrides_only_given_fields() {
    let yaml = "max_speed: 25.0\nrepulsion_duration_ms: 400\nrepulsors:\n  - [1.0, 2.0]\n  - [-3.0, 4.0]\nseed: 9\n";
    let settings = SettingsConfig::from_yaml_str(yaml)
        .and_then(SettingsConfig::into_settings)
        .expect("valid config");

    assert_eq!(settings.max_speed, 25.0);
    assert_eq!(settings.repulsion_duration, Duration::from_millis(400));
    assert_eq!(settings.repulsors, vec![NVec2::new(1.0, 2.0), NVec2::new(-3.0, 4.0)]);
    assert_eq!(settings.seed, Some(9));
    assert_eq!(settings.braking_distance, 100.0);
}

#[test_case("heart_angle_step: 0.0", "heart_angle_step" ; "zero angle step")]
#[test_case("max_speed: -1.0", "max_speed" ; "negative speed")]
#[test_case("attraction_duration_ms: 0", "attraction_duration_ms" ; "zero attraction")]
#[test_case("repulsion_duration_ms: 0", "repulsion_duration_ms" ; "zero repulsion")]
#[test_case("repulsors: [[.nan, 0.0]]", "repulsors" ; "nan repulsor")]
fn invalid_config_is_rejected(yaml: &str, expected_field: &str) {
    let result = SettingsConfig::from_yaml_str(yaml).and_then(SettingsConfig::into_settings);

    match result {
        Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected_field),
        other => panic!("expected invalid `{}`, got {:?}", expected_field, other),
    }
}

#[test]
fn unknown_config_field_is_a_parse_error() {
    let result = SettingsConfig::from_yaml_str("max_sped: 10.0");
    assert!(matches!(result, Err(ConfigError::Yaml(_))), "got {:?}", result);
}

#[test]
fn missing_config_file_is_an_io_error() {
    let result = SettingsConfig::from_path(&PathBuf::from("does/not/exist.yaml"));
    assert!(matches!(result, Err(ConfigError::Io(_))), "got {:?}", result);
}

#[test]
fn bundled_scenarios_load() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios");

    let default = SettingsConfig::from_path(&dir.join("heartbeat.yaml"))
        .and_then(SettingsConfig::into_settings)
        .expect("heartbeat.yaml");
    assert_eq!(default, Settings::default());

    let chambers = SettingsConfig::from_path(&dir.join("four_chambers.yaml"))
        .and_then(SettingsConfig::into_settings)
        .expect("four_chambers.yaml");
    assert_eq!(chambers.repulsors.len(), 4);
    assert!(chambers.show_repulsors);
}
