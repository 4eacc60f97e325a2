//! Simulation systems.
//!
//! Submodules overview
//! - [`absorber`] – resolve contacts and transfer potency to absorbers
//! - [`collision`] – reference sphere-overlap contact detector
//! - [`emitter`] – timed and manual emission of agent particles
//! - [`lifetime`] – decay agent lifetimes and despawn expired particles
//! - [`movement`] – integrate agent positions from their velocities
//! - [`time`] – advance simulation time and delta

pub mod absorber;
pub mod collision;
pub mod emitter;
pub mod lifetime;
pub mod movement;
pub mod time;
