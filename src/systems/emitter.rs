//! Agent emitter system.
//!
//! This system drives [`TimedEmitter`]s and spawns agent particles described
//! by their [`AgentEmitter`]. The same spawning logic backs manual emission
//! requested by content or scripts.
//!
//! # Behavior
//!
//! - Accumulates the tick delta in `time_since_last_emission`
//! - Supports catch-up: if the delta spans several intervals, several bursts
//!   fire in the same tick and the remainder is kept
//! - Each burst spawns `particles_per_emission` particles
//! - `emit_interval <= 0` disables timed firing; manual emission still works
//!
//! # Spawned Particles
//!
//! Every particle entity gets a [`MapPosition`], a [`Scale`], a
//! [`ParticleVisual`], an [`Agent`] and a sensor [`CollisionVolume`] that
//! absorbers can detect but that exerts no physical response.
//!
//! # Coordinate System
//!
//! - 0° points along +Y, 90° along +X
//! - Direction is `(sin a, cos a, 0)`

use bevy_ecs::prelude::*;
use glam::Vec3;
use log::trace;

use crate::components::agent::{Agent, AgentId};
use crate::components::collisionvolume::{CollisionVolume, PARTICLE_SENSOR_RADIUS};
use crate::components::emitter::AgentEmitter;
use crate::components::mapposition::MapPosition;
use crate::components::particlevisual::ParticleVisual;
use crate::components::scale::Scale;
use crate::components::timedemitter::TimedEmitter;
use crate::resources::rng::SimRng;
use crate::resources::worldtime::WorldTime;

/// Components of a freshly emitted agent particle.
#[derive(Bundle, Debug, Clone)]
pub struct AgentParticleBundle {
    pub position: MapPosition,
    pub scale: Scale,
    pub visual: ParticleVisual,
    pub agent: Agent,
    pub volume: CollisionVolume,
}

/// Build one agent particle with randomized kinematics.
///
/// The angle and speed are drawn uniformly from the emitter's ranges. Unless
/// `use_absolute_position` is set, the particle starts `emission_radius`
/// units away from `reference_position` along the emission direction.
pub fn emit_agent(
    emitter: &AgentEmitter,
    rng: &mut SimRng,
    agent_id: AgentId,
    amount: f32,
    use_absolute_position: bool,
    reference_position: Vec3,
) -> AgentParticleBundle {
    let angle_deg = rng.uniform(
        f64::from(emitter.min_emission_angle),
        f64::from(emitter.max_emission_angle),
    );
    let speed = rng.uniform(
        f64::from(emitter.min_initial_speed),
        f64::from(emitter.max_initial_speed),
    );

    let theta = angle_deg.to_radians();
    let (sin, cos) = theta.sin_cos();
    let velocity = Vec3::new((speed * sin) as f32, (speed * cos) as f32, 0.0);

    let position = if use_absolute_position {
        reference_position
    } else {
        let radius = f64::from(emitter.emission_radius);
        reference_position + Vec3::new((radius * sin) as f32, (radius * cos) as f32, 0.0)
    };

    AgentParticleBundle {
        position: MapPosition::from_vec(position),
        scale: Scale::new(emitter.particle_scale),
        visual: ParticleVisual::new(emitter.mesh_name.clone()),
        agent: Agent::new(agent_id, amount, emitter.particle_lifetime, velocity),
        volume: CollisionVolume::sensor_sphere(PARTICLE_SENSOR_RADIUS),
    }
}

/// Emit one particle of the emitter's own agent type and potency, offset
/// from `emitter_position`.
pub fn emit_default_agent(
    emitter: &AgentEmitter,
    rng: &mut SimRng,
    emitter_position: Vec3,
) -> AgentParticleBundle {
    emit_agent(
        emitter,
        rng,
        emitter.agent_id,
        emitter.potency_per_particle,
        false,
        emitter_position,
    )
}

/// Manually emit a particle from the emitter attached to `emitter_entity`.
///
/// Returns the spawned particle, or `None` if the entity has no
/// [`AgentEmitter`].
pub fn emit_from_entity(
    world: &mut World,
    emitter_entity: Entity,
    agent_id: AgentId,
    amount: f32,
    use_absolute_position: bool,
    reference_position: Vec3,
) -> Option<Entity> {
    world.resource_scope(|world, mut rng: Mut<SimRng>| {
        let bundle = {
            let emitter = world.get::<AgentEmitter>(emitter_entity)?;
            emit_agent(
                emitter,
                &mut rng,
                agent_id,
                amount,
                use_absolute_position,
                reference_position,
            )
        };
        Some(world.spawn(bundle).id())
    })
}

/// System that fires timed emitters.
///
/// Queries all entities with `AgentEmitter`, `TimedEmitter` and
/// `MapPosition`, and spawns one burst per elapsed interval.
///
/// # Ordering
///
/// Runs **after** `agent_movement_system` and **before**
/// `agent_absorber_system`, so new particles can be absorbed on the tick
/// they appear.
pub fn agent_emitter_system(
    time: Res<WorldTime>,
    mut rng: ResMut<SimRng>,
    mut query: Query<(Entity, &AgentEmitter, &mut TimedEmitter, &MapPosition)>,
    mut commands: Commands,
) {
    let dt = time.delta;
    for (entity, emitter, mut timed, position) in query.iter_mut() {
        let bursts = timed.advance(dt);
        if bursts == 0 {
            continue;
        }
        trace!(
            "Emitter {:?} firing {} burst(s) of {} particle(s)",
            entity, bursts, emitter.particles_per_emission
        );
        for _ in 0..bursts {
            for _ in 0..emitter.particles_per_emission {
                commands.spawn(emit_default_agent(emitter, &mut rng, position.pos));
            }
        }
    }
}
