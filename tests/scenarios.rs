//! End-to-end runs over complete scenarios.

use approx::assert_abs_diff_eq;
use tangent_bug::{
    Mode, Obstacle, ObstacleWorld, RunOutcome, RunReport, ScenarioConfig, Simulation, Vector2D,
};

fn run_yaml(yaml: &str, budget: u64) -> (Simulation, RunReport) {
    let config = ScenarioConfig::from_yaml_str(yaml).expect("Failed to parse scenario");
    let mut sim = Simulation::from_config(&config).expect("Failed to build simulation");
    let report = sim.run(budget).expect("Navigation error");
    (sim, report)
}

fn assert_collision_free(world: &ObstacleWorld, report: &RunReport) {
    for (i, p) in report.trajectory.iter().enumerate() {
        assert!(!world.contains_any(*p), "trajectory point {} at {} is inside an obstacle", i, p);
    }
}

#[test]
fn single_circle_reaches_goal() {
    let yaml = r#"
robot: {start: {x: 0.0, y: 1.0}}
goal: {center: {x: 0.0, y: -1.0}}
sensing: {vision_radius: 0.1, step_size: 0.01}
obstacles:
  - {shape: circle, center: {x: 0.0, y: 0.5}, radius: 0.3}
"#;
    let (sim, report) = run_yaml(yaml, 400);

    assert_eq!(report.outcome, RunOutcome::GoalReached);
    assert!(report.ticks <= 400);
    assert_eq!(report.stalls, 0);
    assert_eq!(report.final_position(), Some(Vector2D::new(0.0, -1.0)));
    assert_collision_free(sim.world(), &report);

    // Goes around the disc, not through it
    let beside = report
        .trajectory
        .iter()
        .filter(|p| (p.y - 0.5).abs() < 0.01)
        .collect::<Vec<_>>();
    assert!(!beside.is_empty());
    assert!(beside.iter().all(|p| p.x.abs() > 0.29));

    // A straight detour cannot beat the direct distance
    assert!(report.path_length() > 2.0);
}

#[test]
fn default_demo_reaches_goal() {
    let (sim, report) = run_yaml("{}", 400);
    assert_eq!(report.outcome, RunOutcome::GoalReached);
    assert_eq!(sim.world().len(), 2);
    assert_collision_free(sim.world(), &report);
}

#[test]
fn wall_forces_boundary_following_and_release() {
    let config = ScenarioConfig::load(concat!(env!("CARGO_MANIFEST_DIR"), "/scenarios/wall.yaml"))
        .expect("Failed to load scenario");
    let mut sim = Simulation::from_config(&config).expect("Failed to build simulation");
    let report = sim.run(400).expect("Navigation error");

    assert_eq!(report.outcome, RunOutcome::GoalReached);
    assert_collision_free(sim.world(), &report);

    let follow = report
        .mode_switches
        .iter()
        .find(|s| s.mode == Mode::BoundaryFollowing)
        .expect("never switched to boundary following");
    // Switch happens just above the wall's top edge
    assert!(follow.position.y > 0.0);
    assert!(follow.position.y < 0.15);
    assert!(follow.position.x.abs() < 0.4);

    let release = report
        .mode_switches
        .iter()
        .find(|s| s.mode == Mode::Direct && s.tick > follow.tick)
        .expect("never left boundary following");
    // Released once the robot has come round the end of the wall
    assert!(release.position.x.abs() > 0.35);

    for pair in report.mode_switches.windows(2) {
        assert!(pair[0].tick < pair[1].tick, "two switches in one tick");
        assert_ne!(pair[0].mode, pair[1].mode);
    }
}

#[test]
fn snapshot_tracks_run() {
    let mut sim = Simulation::from_config(&ScenarioConfig::default()).unwrap();
    let mut last_tick = 0;
    while sim.step().unwrap().still_running {
        let snap = sim.snapshot();
        assert_eq!(snap.tick, last_tick + 1);
        assert!(snap.position.distance(&snap.point_being_pursued) <= snap.vision_radius + 1e-9);
        assert!(!sim.world().contains_any(snap.position));
        last_tick = snap.tick;
        assert!(last_tick < 2000, "run did not finish");
    }
    let snap = sim.snapshot();
    assert_eq!(snap.position, Vector2D::new(0.0, -1.0));
    assert_eq!(snap.point_being_pursued, snap.position);
}

#[test]
fn evenly_dividing_resolution_stalls_above_disc() {
    // 0.0025 divides the vision radius, so from (0, 0.9) the goal ray's last
    // sample lands on the disc's top point while no scan ray touches the disc.
    let yaml = r#"
robot: {start: {x: 0.0, y: 1.0}}
goal: {center: {x: 0.0, y: -1.0}}
sensing: {vision_radius: 0.1, step_size: 0.01, ray_resolution: 0.0025}
obstacles:
  - {shape: circle, center: {x: 0.0, y: 0.5}, radius: 0.3}
"#;
    let (sim, report) = run_yaml(yaml, 400);

    let RunOutcome::Stalled { position } = report.outcome else {
        panic!("expected a stall, got {:?}", report.outcome);
    };
    assert_eq!(position.x, 0.0);
    assert_abs_diff_eq!(position.y, 0.9, epsilon = 1e-9);
    assert_eq!(report.ticks, 11);
    assert_eq!(report.stalls, 1);
    assert!(report.mode_switches.is_empty());
    assert_collision_free(sim.world(), &report);
}

#[test]
fn budget_stops_unfinished_run() {
    let (_, report) = run_yaml("max_ticks: 2000", 25);
    assert_eq!(report.outcome, RunOutcome::BudgetExhausted);
    assert_eq!(report.ticks, 25);
}

#[test]
fn world_mesh_covers_every_obstacle() {
    let world = ObstacleWorld::new(vec![
        Obstacle::circle(Vector2D::new(0.0, 0.5), 0.3).unwrap(),
        Obstacle::triangle(
            Vector2D::new(1.0, -1.0),
            Vector2D::new(0.3, -0.4),
            Vector2D::new(1.0, 0.0),
        )
        .unwrap(),
    ]);
    let mesh = world.mesh();
    assert_eq!(mesh.vertices.len(), 51 + 3);
    assert_eq!(mesh.triangles.len(), 50 + 1);
    assert_eq!(*mesh.triangles.last().unwrap(), [51, 52, 53]);
}
