//! Agent absorber component.
//!
//! An [`AgentAbsorber`] consumes agent particles that touch it. Which agent
//! types it accepts is configured through an allow-list; what it consumed is
//! reported per agent type in a ledger that `agent_absorber_system` clears at
//! the start of every tick.
//!
//! # Reading Results
//!
//! [`AgentAbsorber::absorbed_agent_amount`] returns how much of an agent type
//! was consumed during the current tick. The value is a snapshot that stays
//! valid until the next absorber pass.
//!
//! # Persistence
//!
//! Saved as a list of `{ agentId, amount }` entries, one per absorbable type.
//! Loading marks every listed type absorbable and restores its amount.

use bevy_ecs::prelude::Component;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::components::agent::AgentId;

/// Absorbs agent particles on contact.
#[derive(Component, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "AbsorberRecord", into = "AbsorberRecord")]
pub struct AgentAbsorber {
    absorbed: FxHashMap<AgentId, f32>,
    can_absorb: FxHashSet<AgentId>,
}

impl AgentAbsorber {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an absorber that accepts the given agent types.
    pub fn with_agents(agents: impl IntoIterator<Item = AgentId>) -> Self {
        Self {
            absorbed: FxHashMap::default(),
            can_absorb: agents.into_iter().collect(),
        }
    }

    /// Amount of `id` absorbed this tick, `0.0` if none.
    pub fn absorbed_agent_amount(&self, id: AgentId) -> f32 {
        self.absorbed.get(&id).copied().unwrap_or(0.0)
    }

    /// Overwrite the absorbed amount for `id`.
    pub fn set_absorbed_agent_amount(&mut self, id: AgentId, amount: f32) {
        self.absorbed.insert(id, amount);
    }

    /// Credit `amount` of `id` to this tick's ledger.
    pub fn absorb(&mut self, id: AgentId, amount: f32) {
        *self.absorbed.entry(id).or_insert(0.0) += amount;
    }

    pub fn can_absorb_agent(&self, id: AgentId) -> bool {
        self.can_absorb.contains(&id)
    }

    /// Allow or forbid consumption of `id`.
    pub fn set_can_absorb_agent(&mut self, id: AgentId, can_absorb: bool) {
        if can_absorb {
            self.can_absorb.insert(id);
        } else {
            self.can_absorb.remove(&id);
        }
    }

    /// Reset the ledger. Called at the start of every absorber pass.
    pub fn clear_absorbed(&mut self) {
        self.absorbed.clear();
    }

    /// Read-only view of this tick's ledger.
    pub fn absorbed(&self) -> &FxHashMap<AgentId, f32> {
        &self.absorbed
    }

    /// Absorbable agent types in ascending id order.
    pub fn absorbable_agents(&self) -> Vec<AgentId> {
        let mut ids: Vec<AgentId> = self.can_absorb.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}

/// Persistent form of [`AgentAbsorber`].
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AbsorberRecord {
    pub agents: Vec<AbsorbedAgentRecord>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AbsorbedAgentRecord {
    pub agent_id: AgentId,
    pub amount: f32,
}

impl From<AbsorberRecord> for AgentAbsorber {
    fn from(record: AbsorberRecord) -> Self {
        let mut absorber = AgentAbsorber::new();
        for entry in record.agents {
            absorber.set_absorbed_agent_amount(entry.agent_id, entry.amount);
            absorber.set_can_absorb_agent(entry.agent_id, true);
        }
        absorber
    }
}

impl From<AgentAbsorber> for AbsorberRecord {
    fn from(absorber: AgentAbsorber) -> Self {
        let agents = absorber
            .absorbable_agents()
            .into_iter()
            .map(|agent_id| AbsorbedAgentRecord {
                agent_id,
                amount: absorber.absorbed_agent_amount(agent_id),
            })
            .collect();
        AbsorberRecord { agents }
    }
}
