//! Agent lifetime system.
//!
//! This module provides [`agent_lifetime_system`] that decrements agent
//! lifetimes and despawns particles whose time ran out.
//!
//! # System Flow
//!
//! Each tick:
//!
//! 1. Iterates all entities with [`Agent`]
//! 2. Subtracts the tick delta from `time_to_live`
//! 3. When `time_to_live <= 0`, despawns the entity
//!
//! # Ordering
//!
//! Must run **after** `agent_absorber_system`: particles consumed this tick
//! already sit at zero lifetime and are removed in the same pass as the ones
//! that expired naturally.

use bevy_ecs::prelude::*;
use log::trace;

use crate::components::agent::Agent;
use crate::resources::worldtime::WorldTime;

/// Decrements agent lifetimes and despawns expired particles.
pub fn agent_lifetime_system(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut Agent)>,
    mut commands: Commands,
) {
    let dt = world_time.delta;
    for (entity, mut agent) in query.iter_mut() {
        agent.time_to_live -= dt;
        if agent.time_to_live <= 0 {
            trace!("Agent {:?} expired", entity);
            commands.entity(entity).try_despawn();
        }
    }
}
