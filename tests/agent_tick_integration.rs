//! Tick integration tests for lifetime, movement, emission and absorption.

use bevy_ecs::prelude::*;
use glam::Vec3;

use agentsim::components::absorber::AgentAbsorber;
use agentsim::components::agent::{Agent, AgentId};
use agentsim::components::emitter::AgentEmitter;
use agentsim::components::mapposition::MapPosition;
use agentsim::components::timedemitter::TimedEmitter;
use agentsim::resources::contacts::CollisionContacts;
use agentsim::resources::rng::SimRng;
use agentsim::resources::worldtime::WorldTime;
use agentsim::systems::absorber::agent_absorber_system;
use agentsim::systems::emitter::agent_emitter_system;
use agentsim::systems::lifetime::agent_lifetime_system;
use agentsim::systems::movement::agent_movement_system;
use agentsim::systems::time::update_world_time;

const EPSILON: f32 = 1e-6;
const OXYTOXY: AgentId = AgentId(1);
const GLUCOSE: AgentId = AgentId(2);

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world() -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(SimRng::with_seed(1234));
    world.insert_resource(CollisionContacts::default());
    world
}

fn tick_lifetime(world: &mut World, dt: i32) {
    update_world_time(world, dt);
    let mut schedule = Schedule::default();
    schedule.add_systems(agent_lifetime_system);
    schedule.run(world);
}

fn tick_movement(world: &mut World, dt: i32) {
    update_world_time(world, dt);
    let mut schedule = Schedule::default();
    schedule.add_systems(agent_movement_system);
    schedule.run(world);
}

fn tick_emitter(world: &mut World, dt: i32) {
    update_world_time(world, dt);
    let mut schedule = Schedule::default();
    schedule.add_systems(agent_emitter_system);
    schedule.run(world);
}

fn tick_absorber(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(agent_absorber_system);
    schedule.run(world);
}

fn spawn_agent(world: &mut World, agent_id: AgentId, potency: f32, time_to_live: i32) -> Entity {
    world
        .spawn((
            MapPosition::default(),
            Agent::new(agent_id, potency, time_to_live, Vec3::ZERO),
        ))
        .id()
}

fn agent_count(world: &mut World) -> usize {
    world.query::<&Agent>().iter(world).count()
}

#[test]
fn lifetime_survives_two_ticks_and_expires_on_third() {
    let mut world = make_world();
    let entity = spawn_agent(&mut world, OXYTOXY, 1.0, 500);

    tick_lifetime(&mut world, 200);
    assert_eq!(world.get::<Agent>(entity).unwrap().time_to_live, 300);

    tick_lifetime(&mut world, 200);
    assert_eq!(world.get::<Agent>(entity).unwrap().time_to_live, 100);

    tick_lifetime(&mut world, 200);
    assert!(world.get_entity(entity).is_err());
}

#[test]
fn lifetime_removes_agent_exactly_at_zero() {
    let mut world = make_world();
    let entity = spawn_agent(&mut world, OXYTOXY, 1.0, 400);

    tick_lifetime(&mut world, 400);
    assert!(world.get_entity(entity).is_err());
}

#[test]
fn lifetime_removes_consumed_agent_on_zero_delta() {
    let mut world = make_world();
    let entity = spawn_agent(&mut world, OXYTOXY, 1.0, 0);

    tick_lifetime(&mut world, 0);
    assert!(world.get_entity(entity).is_err());
}

#[test]
fn movement_converts_milliseconds_to_seconds() {
    let mut world = make_world();
    let entity = world
        .spawn((
            MapPosition::new(1.0, 2.0, 3.0),
            Agent::new(OXYTOXY, 1.0, 1000, Vec3::new(10.0, 0.0, 0.0)),
        ))
        .id();

    tick_movement(&mut world, 500);

    let pos = world.get::<MapPosition>(entity).unwrap().pos;
    assert!(approx_eq(pos.x, 6.0));
    assert!(approx_eq(pos.y, 2.0));
    assert!(approx_eq(pos.z, 3.0));
}

#[test]
fn movement_ignores_entities_without_agent() {
    let mut world = make_world();
    let entity = world.spawn(MapPosition::new(1.0, 1.0, 1.0)).id();

    tick_movement(&mut world, 1000);

    assert_eq!(world.get::<MapPosition>(entity).unwrap().pos, Vec3::ONE);
}

#[test]
fn timed_emitter_catches_up_multiple_bursts() {
    let mut world = make_world();
    let emitter = world
        .spawn((
            MapPosition::default(),
            AgentEmitter::new(OXYTOXY).with_particles(2, 1.0, 1000),
            TimedEmitter::new(100),
        ))
        .id();

    tick_emitter(&mut world, 350);

    assert_eq!(agent_count(&mut world), 6);
    let timed = world.get::<TimedEmitter>(emitter).unwrap();
    assert_eq!(timed.time_since_last_emission, 50);
}

#[test]
fn timed_emitter_keeps_remainder_across_ticks() {
    let mut world = make_world();
    world.spawn((
        MapPosition::default(),
        AgentEmitter::new(OXYTOXY).with_particles(1, 1.0, 1000),
        TimedEmitter::new(100),
    ));

    for _ in 0..3 {
        tick_emitter(&mut world, 60);
    }

    // 180 ms elapsed: exactly one burst.
    assert_eq!(agent_count(&mut world), 1);
}

#[test]
fn timed_emitter_disabled_by_non_positive_interval() {
    let mut world = make_world();
    world.spawn((
        MapPosition::default(),
        AgentEmitter::new(OXYTOXY).with_particles(3, 1.0, 1000),
        TimedEmitter::new(0),
    ));

    tick_emitter(&mut world, 5000);

    assert_eq!(agent_count(&mut world), 0);
}

#[test]
fn timed_emitter_with_zero_particles_spawns_nothing() {
    let mut world = make_world();
    world.spawn((
        MapPosition::default(),
        AgentEmitter::new(OXYTOXY).with_particles(0, 1.0, 1000),
        TimedEmitter::new(10),
    ));

    tick_emitter(&mut world, 100);

    assert_eq!(agent_count(&mut world), 0);
}

#[test]
fn emitter_without_timer_does_not_fire() {
    let mut world = make_world();
    world.spawn((
        MapPosition::default(),
        AgentEmitter::new(OXYTOXY).with_particles(3, 1.0, 1000),
    ));

    tick_emitter(&mut world, 5000);

    assert_eq!(agent_count(&mut world), 0);
}

#[test]
fn fixed_kinematics_emit_straight_up() {
    let mut world = make_world();
    world.spawn((
        MapPosition::new(3.0, 4.0, 0.0),
        AgentEmitter::new(OXYTOXY)
            .with_speed(2.0, 2.0)
            .with_angle(0.0, 0.0)
            .with_particles(4, 0.5, 800),
        TimedEmitter::new(100),
    ));

    tick_emitter(&mut world, 100);

    let mut query = world.query::<(&Agent, &MapPosition)>();
    let spawned: Vec<_> = query.iter(&world).collect();
    assert_eq!(spawned.len(), 4);
    for (agent, position) in spawned {
        assert_eq!(agent.velocity, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(agent.agent_id, OXYTOXY);
        assert_eq!(agent.time_to_live, 800);
        assert!(approx_eq(agent.potency, 0.5));
        assert_eq!(position.pos, Vec3::new(3.0, 4.0, 0.0));
    }
}

#[test]
fn absorber_sums_simultaneous_contacts() {
    let mut world = make_world();
    let absorber = world.spawn(AgentAbsorber::with_agents([OXYTOXY])).id();
    let first = spawn_agent(&mut world, OXYTOXY, 5.0, 1000);
    let second = spawn_agent(&mut world, OXYTOXY, 7.0, 1000);
    {
        let mut contacts = world.resource_mut::<CollisionContacts>();
        contacts.push(first, absorber);
        contacts.push(absorber, second);
    }

    tick_absorber(&mut world);

    let ledger = world.get::<AgentAbsorber>(absorber).unwrap();
    assert!(approx_eq(ledger.absorbed_agent_amount(OXYTOXY), 12.0));
    assert_eq!(world.get::<Agent>(first).unwrap().time_to_live, 0);
    assert_eq!(world.get::<Agent>(second).unwrap().time_to_live, 0);
    assert!(world.resource::<CollisionContacts>().is_empty());
}

#[test]
fn absorber_counts_duplicate_contacts_once() {
    let mut world = make_world();
    let absorber = world.spawn(AgentAbsorber::with_agents([OXYTOXY])).id();
    let agent = spawn_agent(&mut world, OXYTOXY, 5.0, 1000);
    {
        let mut contacts = world.resource_mut::<CollisionContacts>();
        contacts.push(agent, absorber);
        contacts.push(agent, absorber);
        contacts.push(absorber, agent);
    }

    tick_absorber(&mut world);

    let ledger = world.get::<AgentAbsorber>(absorber).unwrap();
    assert!(approx_eq(ledger.absorbed_agent_amount(OXYTOXY), 5.0));
}

#[test]
fn absorber_ignores_disallowed_types_and_dead_agents() {
    let mut world = make_world();
    let absorber = world.spawn(AgentAbsorber::with_agents([OXYTOXY])).id();
    let glucose = spawn_agent(&mut world, GLUCOSE, 3.0, 1000);
    let dead = spawn_agent(&mut world, OXYTOXY, 4.0, 0);
    {
        let mut contacts = world.resource_mut::<CollisionContacts>();
        contacts.push(glucose, absorber);
        contacts.push(dead, absorber);
    }

    tick_absorber(&mut world);

    let ledger = world.get::<AgentAbsorber>(absorber).unwrap();
    assert!(ledger.absorbed().is_empty());
    assert_eq!(world.get::<Agent>(glucose).unwrap().time_to_live, 1000);
}

#[test]
fn absorber_ignores_pairs_without_agent_and_absorber() {
    let mut world = make_world();
    let absorber_a = world.spawn(AgentAbsorber::with_agents([OXYTOXY])).id();
    let absorber_b = world.spawn(AgentAbsorber::with_agents([OXYTOXY])).id();
    let agent_a = spawn_agent(&mut world, OXYTOXY, 1.0, 1000);
    let agent_b = spawn_agent(&mut world, OXYTOXY, 1.0, 1000);
    let bystander = world.spawn(MapPosition::default()).id();
    {
        let mut contacts = world.resource_mut::<CollisionContacts>();
        contacts.push(absorber_a, absorber_b);
        contacts.push(agent_a, agent_b);
        contacts.push(bystander, agent_a);
        contacts.push(absorber_b, bystander);
    }

    tick_absorber(&mut world);

    assert!(world.get::<AgentAbsorber>(absorber_a).unwrap().absorbed().is_empty());
    assert!(world.get::<AgentAbsorber>(absorber_b).unwrap().absorbed().is_empty());
    assert_eq!(world.get::<Agent>(agent_a).unwrap().time_to_live, 1000);
    assert_eq!(world.get::<Agent>(agent_b).unwrap().time_to_live, 1000);
}

#[test]
fn absorber_first_contact_wins_between_absorbers() {
    let mut world = make_world();
    let winner = world.spawn(AgentAbsorber::with_agents([OXYTOXY])).id();
    let loser = world.spawn(AgentAbsorber::with_agents([OXYTOXY])).id();
    let agent = spawn_agent(&mut world, OXYTOXY, 2.0, 1000);
    {
        let mut contacts = world.resource_mut::<CollisionContacts>();
        contacts.push(agent, winner);
        contacts.push(agent, loser);
    }

    tick_absorber(&mut world);

    assert!(approx_eq(
        world.get::<AgentAbsorber>(winner).unwrap().absorbed_agent_amount(OXYTOXY),
        2.0
    ));
    assert!(approx_eq(
        world.get::<AgentAbsorber>(loser).unwrap().absorbed_agent_amount(OXYTOXY),
        0.0
    ));
}

#[test]
fn absorber_ledger_is_cleared_every_tick() {
    let mut world = make_world();
    let absorber = world.spawn(AgentAbsorber::with_agents([OXYTOXY])).id();
    let agent = spawn_agent(&mut world, OXYTOXY, 5.0, 1000);
    world.resource_mut::<CollisionContacts>().push(agent, absorber);

    tick_absorber(&mut world);
    assert!(approx_eq(
        world.get::<AgentAbsorber>(absorber).unwrap().absorbed_agent_amount(OXYTOXY),
        5.0
    ));

    tick_absorber(&mut world);
    assert!(world.get::<AgentAbsorber>(absorber).unwrap().absorbed().is_empty());
}

#[test]
fn absorber_runs_without_contact_feed() {
    let mut world = World::new();
    let mut absorber = AgentAbsorber::with_agents([OXYTOXY]);
    absorber.set_absorbed_agent_amount(OXYTOXY, 3.0);
    let entity = world.spawn(absorber).id();

    tick_absorber(&mut world);

    assert!(world.get::<AgentAbsorber>(entity).unwrap().absorbed().is_empty());
}
