//! ECS resources made available to systems.
//!
//! Overview
//! - `agentregistry` – bidirectional agent-type name/id registry
//! - `contacts` – collision pairs reported by the physics collaborator this tick
//! - `rng` – seedable random source for emission kinematics
//! - `simconfig` – simulation settings loaded from an INI file
//! - `worldtime` – simulation time and tick delta
pub mod agentregistry;
pub mod contacts;
pub mod rng;
pub mod simconfig;
pub mod worldtime;
