use bevy_ecs::prelude::*;

use crate::components::agent::Agent;
use crate::components::mapposition::MapPosition;
use crate::resources::worldtime::WorldTime;

/// Moves agent particles along their velocity.
///
/// Velocity is in units per second while the tick delta is in milliseconds.
/// Particles pass freely through everything; contacts only matter to the
/// absorber pass.
pub fn agent_movement_system(mut query: Query<(&mut MapPosition, &Agent)>, time: Res<WorldTime>) {
    let seconds = time.delta as f32 / 1000.0;
    for (mut position, agent) in query.iter_mut() {
        position.pos += agent.velocity * seconds;
    }
}
