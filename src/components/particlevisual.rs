use bevy_ecs::prelude::Component;

/// Visual template of a spawned particle, identified by mesh name.
///
/// Opaque to the simulation; the presentation layer resolves the name.
#[derive(Component, Clone, Debug, Default, PartialEq, Eq)]
pub struct ParticleVisual {
    pub mesh_name: String,
}

impl ParticleVisual {
    pub fn new(mesh_name: impl Into<String>) -> Self {
        Self {
            mesh_name: mesh_name.into(),
        }
    }
}
