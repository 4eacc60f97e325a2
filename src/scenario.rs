//! Scenario files.
//!
//! A scenario describes the content of a simulation: the agent types to
//! register, the emitters and the absorbers. Emitter and timed-emitter
//! settings are regular storage records; agent types are referenced by
//! internal name and resolved through the simulation's
//! [`AgentRegistry`](crate::resources::agentregistry::AgentRegistry), so a
//! typo in a name surfaces as [`RegistryError::UnknownName`].
//!
//! ```json
//! {
//!   "agents": [ { "internalName": "oxytoxy", "displayName": "OxyToxy NT" } ],
//!   "emitters": [ {
//!       "position": [0.0, 0.0, 0.0],
//!       "agent": "oxytoxy",
//!       "emitter": { "minInitialSpeed": 2.0, "maxInitialSpeed": 4.0,
//!                    "particlesPerEmission": 2, "potencyPerParticle": 1.5 },
//!       "timed": { "emitInterval": 250 }
//!   } ],
//!   "absorbers": [ { "position": [0.0, 5.0, 0.0], "radius": 1.5,
//!                    "canAbsorb": ["oxytoxy"] } ]
//! }
//! ```

use std::path::Path;

use bevy_ecs::prelude::Entity;
use glam::Vec3;
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::components::absorber::AgentAbsorber;
use crate::components::emitter::AgentEmitter;
use crate::components::timedemitter::TimedEmitter;
use crate::resources::agentregistry::RegistryError;
use crate::simulation::Simulation;
use crate::storage::{Storage, StorageContainer, StorageError, as_container};

/// Errors raised while loading or applying a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse scenario: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentTypeSpec {
    pub internal_name: String,
    pub display_name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct EmitterSpec {
    pub position: Vec3,
    /// Internal name of the emitted agent type. Overrides `emitter.agentId`.
    pub agent: Option<String>,
    pub emitter: StorageContainer,
    /// Present for periodic emitters.
    pub timed: Option<StorageContainer>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AbsorberSpec {
    pub position: Vec3,
    pub radius: f32,
    pub can_absorb: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Scenario {
    pub agents: Vec<AgentTypeSpec>,
    pub emitters: Vec<EmitterSpec>,
    pub absorbers: Vec<AbsorberSpec>,
}

/// Entities created by [`Scenario::apply`], in scenario order.
#[derive(Debug, Clone, Default)]
pub struct ScenarioEntities {
    pub emitters: Vec<Entity>,
    pub absorbers: Vec<Entity>,
}

impl Scenario {
    /// Loads a scenario from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// One emitter spraying a single agent type at one absorber.
    pub fn demo() -> Self {
        let emitter = json!({
            "emissionRadius": 0.5,
            "minInitialSpeed": 2.0,
            "maxInitialSpeed": 4.0,
            "minEmissionAngle": -30.0,
            "maxEmissionAngle": 30.0,
            "meshName": "oxytoxy.mesh",
            "particlesPerEmission": 2,
            "particleLifetime": 3000,
            "particleScale": [0.3, 0.3, 0.3],
            "potencyPerParticle": 1.5
        });
        Scenario {
            agents: vec![AgentTypeSpec {
                internal_name: "oxytoxy".to_string(),
                display_name: "OxyToxy NT".to_string(),
            }],
            emitters: vec![EmitterSpec {
                position: Vec3::ZERO,
                agent: Some("oxytoxy".to_string()),
                emitter: emitter.as_object().cloned().unwrap_or_default(),
                timed: json!({ "emitInterval": 250 }).as_object().cloned(),
            }],
            absorbers: vec![AbsorberSpec {
                position: Vec3::new(0.0, 5.0, 0.0),
                radius: 1.5,
                can_absorb: vec!["oxytoxy".to_string()],
            }],
        }
    }

    /// Register the agent types and spawn the emitters and absorbers.
    ///
    /// Stops at the first error; entities spawned before it stay in the world.
    pub fn apply(&self, sim: &mut Simulation) -> Result<ScenarioEntities, ScenarioError> {
        for agent in &self.agents {
            sim.registry()
                .register(agent.internal_name.as_str(), agent.display_name.as_str())?;
        }

        let mut entities = ScenarioEntities::default();
        for spec in &self.emitters {
            let mut emitter = AgentEmitter::load(&spec.emitter)?;
            if let Some(name) = &spec.agent {
                emitter.agent_id = sim.registry().id_by_name(name)?;
            }
            let timed = spec.timed.as_ref().map(TimedEmitter::load).transpose()?;
            entities
                .emitters
                .push(sim.spawn_emitter(spec.position, emitter, timed));
        }

        for spec in &self.absorbers {
            let mut absorber = AgentAbsorber::new();
            for name in &spec.can_absorb {
                absorber.set_can_absorb_agent(sim.registry().id_by_name(name)?, true);
            }
            entities
                .absorbers
                .push(sim.spawn_absorber(spec.position, absorber, spec.radius));
        }

        info!(
            "Scenario applied: {} agent type(s), {} emitter(s), {} absorber(s)",
            self.agents.len(),
            entities.emitters.len(),
            entities.absorbers.len()
        );
        Ok(entities)
    }

    /// Parse a scenario from an in-memory JSON value.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, ScenarioError> {
        as_container(value)?;
        Ok(serde_json::from_value(value.clone())?)
    }
}
