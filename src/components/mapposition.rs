use bevy_ecs::prelude::Component;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// World-space position of an entity.
///
/// Owned by the presentation layer; the agent systems only read it (emitters)
/// or integrate velocity into it (agent particles).
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MapPosition {
    pub pos: Vec3,
}

impl MapPosition {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            pos: Vec3::new(x, y, z),
        }
    }

    pub fn from_vec(pos: Vec3) -> Self {
        Self { pos }
    }
}
