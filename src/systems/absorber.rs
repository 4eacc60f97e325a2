//! Agent absorber system.
//!
//! Resolves this tick's collision contacts into agent/absorber pairs and
//! transfers potency from consumed particles to the absorbers that took them.
//!
//! # Algorithm
//!
//! 1. Every [`AgentAbsorber`] ledger is cleared
//! 2. Each contact pair is resolved as (agent, absorber) or (absorber, agent);
//!    any other pair is ignored
//! 3. If the absorber accepts the agent's type and the agent is still alive,
//!    its potency is credited to the absorber and its lifetime is zeroed
//!
//! Zeroing the lifetime is what makes duplicate contacts harmless: a physics
//! engine may report the same pair several times in one tick, and every
//! report after the first finds a dead agent. When one agent touches several
//! absorbers, whichever contact comes first in the feed wins.
//!
//! # Ordering
//!
//! Runs after movement, emission and contact detection, and before
//! `agent_lifetime_system`, which despawns the consumed particles.

use bevy_ecs::prelude::*;
use log::trace;

use crate::components::absorber::AgentAbsorber;
use crate::components::agent::Agent;
use crate::resources::contacts::CollisionContacts;

pub fn agent_absorber_system(
    contacts: Option<ResMut<CollisionContacts>>,
    mut absorbers: Query<&mut AgentAbsorber>,
    mut agents: Query<&mut Agent>,
) {
    for mut absorber in absorbers.iter_mut() {
        absorber.clear_absorbed();
    }

    let Some(mut contacts) = contacts else {
        return;
    };

    for (a, b) in contacts.take() {
        let (agent_entity, absorber_entity) = if agents.contains(a) && absorbers.contains(b) {
            (a, b)
        } else if absorbers.contains(a) && agents.contains(b) {
            (b, a)
        } else {
            continue;
        };

        let (Ok(mut agent), Ok(mut absorber)) = (
            agents.get_mut(agent_entity),
            absorbers.get_mut(absorber_entity),
        ) else {
            continue;
        };

        if absorber.can_absorb_agent(agent.agent_id) && agent.is_alive() {
            trace!(
                "Absorber {:?} consumed agent {:?} ({} x {})",
                absorber_entity, agent_entity, agent.agent_id, agent.potency
            );
            absorber.absorb(agent.agent_id, agent.potency);
            agent.consume();
        }
    }
}
