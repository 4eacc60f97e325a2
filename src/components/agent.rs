//! Agent particle component.
//!
//! An [`Agent`] is a transient particle carrying a typed payload. It is
//! spawned by an emitter, drifts with a constant velocity, and is removed
//! either when its lifetime runs out or when an absorber consumes it.
//!
//! # How It Works
//!
//! 1. `agent_emitter_system` (or a manual emission) spawns the particle with
//!    `time_to_live` set to the emitter's particle lifetime
//! 2. `agent_movement_system` advances its [`MapPosition`] by `velocity`
//! 3. `agent_absorber_system` zeroes `time_to_live` when an absorber takes it
//! 4. `agent_lifetime_system` decrements `time_to_live` and despawns at `<= 0`
//!
//! # Related
//!
//! - [`crate::resources::agentregistry::AgentRegistry`] – resolves [`AgentId`]s
//! - [`crate::systems::lifetime::agent_lifetime_system`] – despawns expired agents
//!
//! [`MapPosition`]: crate::components::mapposition::MapPosition

use std::fmt;

use bevy_ecs::prelude::Component;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Signed duration in milliseconds. Lifetimes may dip below zero before cleanup.
pub type Milliseconds = i32;

/// Identifier of a registered agent type.
///
/// Ids are handed out by the registry starting at 1. [`AgentId::NULL`] means
/// "no agent type".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub u16);

impl AgentId {
    /// The "no agent type" sentinel.
    pub const NULL: AgentId = AgentId(0);

    pub fn is_null(self) -> bool {
        self == Self::NULL
    }

    /// Position of this id's entry in the registry's dense entry list.
    pub(crate) fn index(self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single agent particle.
///
/// # Fields
///
/// - `agent_id` - Type of payload carried
/// - `potency` - Payload amount credited to the absorber that consumes it
/// - `time_to_live` - Milliseconds left before despawn
/// - `velocity` - World units per second
#[derive(Component, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Agent {
    pub agent_id: AgentId,
    pub potency: f32,
    pub time_to_live: Milliseconds,
    pub velocity: Vec3,
}

impl Default for Agent {
    fn default() -> Self {
        Self {
            agent_id: AgentId::NULL,
            potency: 0.0,
            time_to_live: 0,
            velocity: Vec3::ZERO,
        }
    }
}

impl Agent {
    pub fn new(agent_id: AgentId, potency: f32, time_to_live: Milliseconds, velocity: Vec3) -> Self {
        Self {
            agent_id,
            potency,
            time_to_live,
            velocity,
        }
    }

    /// True while the particle has not expired or been consumed.
    pub fn is_alive(&self) -> bool {
        self.time_to_live > 0
    }

    /// Marks the particle consumed so the lifetime pass removes it.
    pub fn consume(&mut self) {
        self.time_to_live = 0;
    }
}
