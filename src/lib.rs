//! Agent particle simulation library.
//!
//! Agents are transient particles carrying a typed payload. Emitters spawn
//! them with randomized kinematics, they drift and decay, and absorbers
//! consume them on contact. This crate exposes the ECS components, resources
//! and systems implementing that model, plus a [`simulation::Simulation`]
//! driver and scenario loading for hosts and integration tests.

pub mod components;
pub mod resources;
pub mod scenario;
pub mod simulation;
pub mod storage;
pub mod systems;
