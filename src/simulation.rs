//! Simulation setup and tick driver.
//!
//! [`Simulation`] owns the ECS [`World`] and the tick [`Schedule`]. Each
//! [`Simulation::tick`] advances [`WorldTime`] by the given milliseconds and
//! runs the agent systems in a fixed order:
//!
//! 1. [`AgentSet::Movement`] – particles move along their velocity
//! 2. [`AgentSet::Emission`] – timed emitters fire their bursts
//! 3. [`AgentSet::Contacts`] – the physics collaborator reports contacts
//! 4. [`AgentSet::Absorption`] – absorbers consume touching particles
//! 5. [`AgentSet::Lifetime`] – expired and consumed particles are despawned
//!
//! The schedule runs on a single thread; systems never interleave.

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs};
use bevy_ecs::system::ScheduleSystem;
use glam::Vec3;
use serde_json::{Value, json};

use crate::components::absorber::AgentAbsorber;
use crate::components::agent::{Agent, AgentId, Milliseconds};
use crate::components::collisionvolume::CollisionVolume;
use crate::components::emitter::AgentEmitter;
use crate::components::mapposition::MapPosition;
use crate::components::timedemitter::TimedEmitter;
use crate::resources::agentregistry::AgentRegistry;
use crate::resources::contacts::CollisionContacts;
use crate::resources::rng::SimRng;
use crate::resources::simconfig::SimConfig;
use crate::resources::worldtime::WorldTime;
use crate::storage::{Storage, StorageError};
use crate::systems::absorber::agent_absorber_system;
use crate::systems::collision::detect_sensor_contacts;
use crate::systems::emitter::{agent_emitter_system, emit_from_entity};
use crate::systems::lifetime::agent_lifetime_system;
use crate::systems::movement::agent_movement_system;
use crate::systems::time::update_world_time;

/// Phases of one simulation tick, in execution order.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentSet {
    Movement,
    Emission,
    /// Slot for the system filling [`CollisionContacts`].
    Contacts,
    Absorption,
    Lifetime,
}

/// Build the tick schedule.
///
/// With `builtin_contacts` the reference sphere-overlap detector runs in
/// [`AgentSet::Contacts`]; otherwise the host adds its own system there or
/// fills [`CollisionContacts`] before calling [`Simulation::tick`].
pub fn build_agent_schedule(builtin_contacts: bool) -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.configure_sets(
        (
            AgentSet::Movement,
            AgentSet::Emission,
            AgentSet::Contacts,
            AgentSet::Absorption,
            AgentSet::Lifetime,
        )
            .chain(),
    );
    schedule.add_systems(agent_movement_system.in_set(AgentSet::Movement));
    schedule.add_systems(agent_emitter_system.in_set(AgentSet::Emission));
    if builtin_contacts {
        schedule.add_systems(detect_sensor_contacts.in_set(AgentSet::Contacts));
    }
    schedule.add_systems(agent_absorber_system.in_set(AgentSet::Absorption));
    schedule.add_systems(agent_lifetime_system.in_set(AgentSet::Lifetime));
    schedule
}

/// An agent simulation: world, resources and tick schedule.
pub struct Simulation {
    world: World,
    schedule: Schedule,
}

impl Simulation {
    /// Create an empty simulation configured by `config`.
    pub fn new(config: &SimConfig) -> Self {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.insert_resource(SimRng::with_seed(config.seed));
        world.insert_resource(CollisionContacts::default());
        world.insert_resource(AgentRegistry::new());
        world.insert_resource(config.clone());

        Self {
            world,
            schedule: build_agent_schedule(config.builtin_contacts),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Add a system to the tick schedule, e.g. a physics bridge in
    /// [`AgentSet::Contacts`].
    pub fn add_systems<M>(&mut self, systems: impl IntoScheduleConfigs<ScheduleSystem, M>) {
        self.schedule.add_systems(systems);
    }

    /// The agent-type registry of this simulation.
    pub fn registry(&self) -> &AgentRegistry {
        self.world.resource::<AgentRegistry>()
    }

    pub fn time(&self) -> WorldTime {
        *self.world.resource::<WorldTime>()
    }

    /// Spawn an emitter entity. Without `timed` it only emits manually.
    pub fn spawn_emitter(
        &mut self,
        position: Vec3,
        emitter: AgentEmitter,
        timed: Option<TimedEmitter>,
    ) -> Entity {
        let mut entity = self.world.spawn((MapPosition::from_vec(position), emitter));
        if let Some(timed) = timed {
            entity.insert(timed);
        }
        entity.id()
    }

    /// Spawn an absorber entity with a solid sphere of `radius`.
    pub fn spawn_absorber(&mut self, position: Vec3, absorber: AgentAbsorber, radius: f32) -> Entity {
        self.world
            .spawn((
                MapPosition::from_vec(position),
                absorber,
                CollisionVolume::solid_sphere(radius),
            ))
            .id()
    }

    /// Report a contact pair for the next absorber pass.
    pub fn push_contact(&mut self, a: Entity, b: Entity) {
        self.world.resource_mut::<CollisionContacts>().push(a, b);
    }

    /// Advance the simulation by `dt` milliseconds.
    pub fn tick(&mut self, dt: Milliseconds) {
        update_world_time(&mut self.world, dt);
        self.schedule.run(&mut self.world);
        self.world.clear_trackers();
    }

    /// Manually emit one particle from `emitter`.
    ///
    /// Returns `None` if `emitter` has no [`AgentEmitter`].
    pub fn emit_agent(
        &mut self,
        emitter: Entity,
        agent_id: AgentId,
        amount: f32,
        use_absolute_position: bool,
        reference_position: Vec3,
    ) -> Option<Entity> {
        emit_from_entity(
            &mut self.world,
            emitter,
            agent_id,
            amount,
            use_absolute_position,
            reference_position,
        )
    }

    /// Emit one particle of the emitter's own type and potency at its position.
    pub fn emit_default(&mut self, emitter: Entity) -> Option<Entity> {
        let position = self.world.get::<MapPosition>(emitter)?.pos;
        let (agent_id, amount) = {
            let e = self.world.get::<AgentEmitter>(emitter)?;
            (e.agent_id, e.potency_per_particle)
        };
        self.emit_agent(emitter, agent_id, amount, false, position)
    }

    /// Amount of `agent_id` consumed by `absorber` during the last tick.
    pub fn absorbed_amount(&self, absorber: Entity, agent_id: AgentId) -> f32 {
        self.world
            .get::<AgentAbsorber>(absorber)
            .map(|a| a.absorbed_agent_amount(agent_id))
            .unwrap_or(0.0)
    }

    /// Number of live agent particles.
    pub fn agent_count(&mut self) -> usize {
        self.world.query::<&Agent>().iter(&self.world).count()
    }

    /// Save the registry and every persistent record as one JSON document.
    pub fn snapshot(&mut self) -> Result<Value, StorageError> {
        let registry: Vec<Value> = self
            .registry()
            .entries()
            .into_iter()
            .map(|(id, entry)| {
                json!({
                    "agentId": id,
                    "internalName": entry.internal_name,
                    "displayName": entry.display_name,
                })
            })
            .collect();

        let mut agents = Vec::new();
        let mut query = self.world.query::<(&MapPosition, &Agent)>();
        for (position, agent) in query.iter(&self.world) {
            agents.push(json!({ "position": position.pos, "agent": agent.storage()? }));
        }

        let mut emitters = Vec::new();
        let mut query = self
            .world
            .query::<(&MapPosition, &AgentEmitter, Option<&TimedEmitter>)>();
        for (position, emitter, timed) in query.iter(&self.world) {
            let timed = timed.map(|t| t.storage()).transpose()?;
            emitters.push(json!({
                "position": position.pos,
                "emitter": emitter.storage()?,
                "timed": timed,
            }));
        }

        let mut absorbers = Vec::new();
        let mut query = self.world.query::<(&MapPosition, &AgentAbsorber)>();
        for (position, absorber) in query.iter(&self.world) {
            absorbers.push(json!({ "position": position.pos, "absorber": absorber.storage()? }));
        }

        Ok(json!({
            "elapsed": self.time().elapsed,
            "registry": registry,
            "agents": agents,
            "emitters": emitters,
            "absorbers": absorbers,
        }))
    }
}
