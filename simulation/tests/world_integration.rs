use std::collections::BTreeMap;

use simulation::systems::{integrate, steering_force};
use simulation::{
    DemographicEvent, ScenarioConfig, SimulationWorld, Species, SteeringBehavior, Vector2,
};

fn pops(entries: &[(&str, u32)]) -> BTreeMap<String, u32> {
    entries.iter().map(|(n, c)| (n.to_string(), *c)).collect()
}

fn seeded_reference_world(seed: u64) -> SimulationWorld {
    let mut config = ScenarioConfig::predator_prey();
    config.seed = Some(seed);
    config.build_world().expect("reference scenario is valid")
}

/// Distance between two coordinates on a ring of size `bound`.
fn ring_delta(a: f64, b: f64, bound: f64) -> f64 {
    let d = (a - b).rem_euclid(bound);
    d.min(bound - d)
}

#[test]
fn counts_match_live_agents_every_tick() {
    let mut world = seeded_reference_world(17);

    for _ in 0..60 {
        world.step();
        for name in ["prey1", "prey2", "predator"] {
            let live = world
                .agents()
                .iter()
                .filter(|v| v.species_name() == name)
                .count();
            assert_eq!(world.count(name) as usize, live, "species {}", name);
        }
    }
}

#[test]
fn history_has_one_entry_per_tick_plus_initial() {
    let mut world = seeded_reference_world(3);
    for n in 1..=25u64 {
        world.step();
        assert_eq!(world.get_history().len() as u64, n + 1);
        assert_eq!(world.timestep(), n);
    }

    let timesteps: Vec<u64> = world.get_history().iter().map(|e| e.timestep).collect();
    assert_eq!(timesteps, (0..=25).collect::<Vec<_>>());
    assert_eq!(world.get_history()[25].counts, *world.counts());
}

#[test]
fn speed_never_exceeds_species_limit() {
    let mut world = seeded_reference_world(99);
    for _ in 0..40 {
        world.step();
        for v in world.agents() {
            assert!(v.velocity.magnitude() <= v.max_speed() + 1e-9);
            assert!((v.heading.magnitude() - 1.0).abs() < 1e-9);
        }
    }
}

#[test]
fn moved_vehicles_stay_inside_bounds() {
    let mut world = seeded_reference_world(5);
    let bounds = world.bounds();
    for _ in 0..30 {
        let before: Vec<_> = world.agents().iter().map(|v| v.id).collect();
        world.step();
        // Newborns sit next to their parent until their first move
        for v in world.agents().iter().filter(|v| before.contains(&v.id)) {
            assert!((0.0..bounds.x).contains(&v.pos.x), "{:?}", v.pos);
            assert!((0.0..bounds.y).contains(&v.pos.y), "{:?}", v.pos);
        }
    }
}

#[test]
fn vehicle_wraps_across_right_edge() {
    let mut world = SimulationWorld::with_seed(
        Vector2::new(100.0, 100.0),
        vec![Species::new("x", 1.0, "black")],
        &BTreeMap::new(),
        0,
    )
    .unwrap();
    world.spawn("x", Vector2::new(99.5, 40.0), Vector2::new(1.0, 0.0));

    world.step();
    let pos = world.agents()[0].pos;
    assert!((pos.x - (100.5f64).rem_euclid(100.0)).abs() < 1e-9);
    assert!((0.0..100.0).contains(&pos.x));
}

#[test]
fn lone_aligner_still_feels_alignment() {
    let mut aligner = Species::new("a", 2.0, "white");
    aligner.add_steering_rule(SteeringBehavior::Alignment, 25.0, 1.0, ["a"]);
    let mut seeker = Species::new("s", 2.0, "white");
    seeker
        .add_steering_rule(SteeringBehavior::Seek, 25.0, 1.0, ["s"])
        .add_steering_rule(SteeringBehavior::Flee, 25.0, 1.0, ["s"])
        .add_steering_rule(SteeringBehavior::Cohesion, 25.0, 1.0, ["s"])
        .add_steering_rule(SteeringBehavior::Separate, 25.0, 1.0, ["s"]);

    let mut world = SimulationWorld::with_seed(
        Vector2::new(300.0, 300.0),
        vec![aligner, seeker],
        &BTreeMap::new(),
        0,
    )
    .unwrap();
    world.spawn("a", Vector2::new(50.0, 50.0), Vector2::new(0.0, 1.0));
    world.spawn("s", Vector2::new(200.0, 200.0), Vector2::new(0.0, 1.0));

    let rule = world.agents()[0].steering_rules()[0].clone();
    let targets = world.get_targets(&world.agents()[0], &rule);
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].id, world.agents()[0].id);

    let arena = world.arena();
    assert_eq!(steering_force(&arena.agents[1], arena), Vector2::ZERO);

    // Pull the velocity off the heading so the self-alignment is visible
    let mut skewed = arena.agents[0].clone();
    skewed.velocity = Vector2::new(2.0, 0.0);
    let force = steering_force(&skewed, arena);
    assert!(force.magnitude() > 0.0);
}

#[test]
fn step_reads_only_pre_tick_state() {
    let mut seeker = Species::new("s", 3.0, "white");
    seeker
        .add_steering_rule(SteeringBehavior::Seek, 500.0, 1.0, ["s"])
        .add_steering_rule(SteeringBehavior::Cohesion, 500.0, 0.5, ["s"]);
    let mut world = SimulationWorld::with_seed(
        Vector2::new(300.0, 300.0),
        vec![seeker],
        &BTreeMap::new(),
        0,
    )
    .unwrap();
    world.spawn("s", Vector2::new(100.0, 100.0), Vector2::new(1.0, 0.0));
    world.spawn("s", Vector2::new(140.0, 100.0), Vector2::new(-1.0, 0.0));
    world.spawn("s", Vector2::new(120.0, 135.0), Vector2::new(0.0, -1.0));

    // Every vehicle steers off the same snapshot, never off a neighbor
    // that already moved this tick
    let snapshot = world.arena().clone();
    let bounds = world.bounds();
    let expected: Vec<_> = snapshot
        .agents
        .iter()
        .map(|v| {
            let mut moved = v.clone();
            moved.pending_force = Some(steering_force(v, &snapshot));
            integrate(&mut moved, bounds);
            moved
        })
        .collect();

    world.step();
    assert_eq!(world.agents().len(), expected.len());
    for (actual, want) in world.agents().iter().zip(&expected) {
        assert_eq!(actual.id, want.id);
        assert!((actual.pos - want.pos).magnitude() < 1e-9, "{:?} != {:?}", actual.pos, want.pos);
        assert!((actual.velocity - want.velocity).magnitude() < 1e-9);
    }

    // Sequential updates would have given the last vehicle a different pull
    let mut sequential = snapshot.clone();
    for idx in 0..2 {
        let force = steering_force(&sequential.agents[idx], &sequential);
        sequential.agents[idx].pending_force = Some(force);
        integrate(&mut sequential.agents[idx], bounds);
    }
    let stale = steering_force(&sequential.agents[2], &sequential);
    assert!((stale - steering_force(&snapshot.agents[2], &snapshot)).magnitude() > 1e-6);
}

#[test]
fn predator_eats_and_breeds() {
    let mut predator = Species::new("predator", 3.0, "red");
    predator.add_demographic_rule(DemographicEvent::Eat, 30.0, 1.0, ["prey"]);
    let mut world = SimulationWorld::with_seed(
        Vector2::new(400.0, 400.0),
        vec![predator, Species::new("prey", 2.0, "blue")],
        &BTreeMap::new(),
        21,
    )
    .unwrap();
    let parent_pos = Vector2::new(200.0, 200.0);
    let predator_id = world.spawn("predator", parent_pos, Vector2::new(1.0, 0.0)).unwrap();
    let prey_id = world.spawn("prey", Vector2::new(215.0, 205.0), Vector2::new(0.0, 1.0)).unwrap();

    world.evaluate_demographics(0);
    assert!(world.agents()[1].dead);
    assert!(world.agents()[0].birthing);

    world.step();
    assert!(world.agents().iter().all(|v| v.id != prey_id));
    let offspring: Vec<_> = world
        .agents()
        .iter()
        .filter(|v| v.id != predator_id)
        .collect();
    assert_eq!(offspring.len(), 1);
    assert_eq!(offspring[0].species_name(), "predator");

    let offset = offspring[0].pos - parent_pos;
    assert!((10.0..=25.0).contains(&offset.x.abs()));
    assert!((10.0..=25.0).contains(&offset.y.abs()));

    let latest = world.history().latest().unwrap();
    assert_eq!(latest.counts["predator"], 2);
    assert_eq!(latest.counts["prey"], 0);
}

#[test]
fn rule_free_agent_drifts_at_constant_velocity() {
    let mut world = SimulationWorld::with_seed(
        Vector2::new(100.0, 100.0),
        vec![Species::new("x", 5.0, "black")],
        &pops(&[("x", 1)]),
        8,
    )
    .unwrap();

    let state = world.get_state();
    assert_eq!(state.agents.len(), 1);
    let start = world.agents()[0].pos;
    let velocity = world.agents()[0].velocity;
    assert!((velocity.magnitude() - 5.0).abs() < 1e-9);

    for _ in 0..10 {
        world.step();
    }

    let history = world.get_history();
    assert_eq!(history.len(), 11);
    assert!(history.iter().all(|e| e.counts == pops(&[("x", 1)])));

    let end = world.agents()[0].pos;
    let expected = start + velocity * 10.0;
    assert!(ring_delta(end.x, expected.x, 100.0) < 1e-6);
    assert!(ring_delta(end.y, expected.y, 100.0) < 1e-6);
}

#[test]
fn worlds_do_not_share_state() {
    let mut a = seeded_reference_world(1);
    let b = seeded_reference_world(1);
    assert_eq!(a.agents()[0].id, b.agents()[0].id);

    a.step();
    assert_eq!(b.timestep(), 0);
    assert_eq!(b.get_history().len(), 1);
    assert_eq!(b.population(), 120);
}
