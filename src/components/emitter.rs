//! Agent emitter component.
//!
//! The [`AgentEmitter`] component describes how an entity spawns agent
//! particles: which agent type and potency each particle carries, how long it
//! lives, and the randomized kinematics it leaves the emitter with.
//!
//! # How It Works
//!
//! 1. An entity is spawned with an `AgentEmitter` and a
//!    [`MapPosition`](crate::components::mapposition::MapPosition)
//! 2. Particles are emitted either manually (see
//!    [`crate::systems::emitter::emit_agent`]) or periodically when a
//!    [`TimedEmitter`](crate::components::timedemitter::TimedEmitter) is also
//!    attached
//! 3. For every particle:
//!    - an angle is drawn from `[min_emission_angle, max_emission_angle]`
//!    - a speed is drawn from `[min_initial_speed, max_initial_speed]`
//!    - the particle spawns `emission_radius` units away along that angle
//!
//! # Angle Convention
//!
//! Angles are in degrees. 0° points along +Y, and the direction vector is
//! `(sin a, cos a, 0)`, so 90° points along +X.

use bevy_ecs::prelude::*;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::components::agent::{AgentId, Milliseconds};

/// Default lifetime of emitted particles.
pub const DEFAULT_PARTICLE_LIFETIME: Milliseconds = 1000;

/// Emission profile for agent particles.
///
/// # Fields
///
/// - `agent_id` - Agent type emitted by the default emission
/// - `emission_radius` - Spawn offset from the emitter along the emission angle
/// - `min_initial_speed` / `max_initial_speed` - Speed range (units per second)
/// - `min_emission_angle` / `max_emission_angle` - Direction range in degrees
/// - `mesh_name` - Visual template handed to the presentation layer
/// - `particles_per_emission` - Particles per timed burst
/// - `particle_lifetime` - Lifetime of each particle in milliseconds
/// - `particle_scale` - Scale applied to spawned particles
/// - `potency_per_particle` - Potency carried by default emissions
#[derive(Component, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentEmitter {
    pub agent_id: AgentId,
    pub emission_radius: f32,
    pub min_initial_speed: f32,
    pub max_initial_speed: f32,
    pub min_emission_angle: f32,
    pub max_emission_angle: f32,
    pub mesh_name: String,
    pub particles_per_emission: u16,
    pub particle_lifetime: Milliseconds,
    pub particle_scale: Vec3,
    pub potency_per_particle: f32,
}

impl Default for AgentEmitter {
    fn default() -> Self {
        Self {
            agent_id: AgentId::NULL,
            emission_radius: 0.0,
            min_initial_speed: 0.0,
            max_initial_speed: 0.0,
            min_emission_angle: 0.0,
            max_emission_angle: 0.0,
            mesh_name: String::new(),
            particles_per_emission: 0,
            particle_lifetime: DEFAULT_PARTICLE_LIFETIME,
            particle_scale: Vec3::ONE,
            potency_per_particle: 0.0,
        }
    }
}

impl AgentEmitter {
    /// Create an emitter for `agent_id` with default kinematics.
    pub fn new(agent_id: AgentId) -> Self {
        Self {
            agent_id,
            ..Self::default()
        }
    }

    /// Set the speed range. Arguments are normalized so that `min <= max`.
    pub fn with_speed(mut self, a: f32, b: f32) -> Self {
        self.min_initial_speed = a.min(b);
        self.max_initial_speed = a.max(b);
        self
    }

    /// Set the emission arc in degrees. Arguments are normalized so that `min <= max`.
    pub fn with_angle(mut self, a: f32, b: f32) -> Self {
        self.min_emission_angle = a.min(b);
        self.max_emission_angle = a.max(b);
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.emission_radius = radius;
        self
    }

    /// Set the particle template emitted on every burst.
    pub fn with_particles(
        mut self,
        particles_per_emission: u16,
        potency_per_particle: f32,
        particle_lifetime: Milliseconds,
    ) -> Self {
        self.particles_per_emission = particles_per_emission;
        self.potency_per_particle = potency_per_particle;
        self.particle_lifetime = particle_lifetime;
        self
    }

    pub fn with_visual(mut self, mesh_name: impl Into<String>, scale: Vec3) -> Self {
        self.mesh_name = mesh_name.into();
        self.particle_scale = scale;
        self
    }
}
