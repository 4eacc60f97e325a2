use bevy_ecs::prelude::Resource;

use crate::components::agent::Milliseconds;

/// Simulation clock advanced once per tick by the host.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct WorldTime {
    /// Total simulated time in milliseconds.
    pub elapsed: i64,
    /// Elapsed milliseconds of the current tick.
    pub delta: Milliseconds,
    /// Number of ticks run so far.
    pub frame_count: u64,
}
