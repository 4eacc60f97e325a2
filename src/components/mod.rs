//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the simulation: agent particles, the emitters that spawn them, the
//! absorbers that consume them, and the spatial and collision data the
//! external presentation and physics layers work with.
//!
//! Submodules overview:
//! - [`absorber`] – per-tick consumption ledger and agent allow-list
//! - [`agent`] – agent particle payload, lifetime and velocity
//! - [`collisionvolume`] – sensor and solid collision spheres
//! - [`emitter`] – emission kinematics and particle template
//! - [`mapposition`] – world-space position of an entity
//! - [`particlevisual`] – visual template reference for spawned particles
//! - [`scale`] – 3D scale factor
//! - [`timedemitter`] – periodic emission accumulator

pub mod absorber;
pub mod agent;
pub mod collisionvolume;
pub mod emitter;
pub mod mapposition;
pub mod particlevisual;
pub mod scale;
pub mod timedemitter;
