//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per tick.
use bevy_ecs::prelude::*;

use crate::components::agent::Milliseconds;
use crate::resources::worldtime::WorldTime;

/// Advance `elapsed`, `delta` and `frame_count` on the `WorldTime` resource.
///
/// `dt` is the tick's elapsed time in milliseconds.
pub fn update_world_time(world: &mut World, dt: Milliseconds) {
    let mut wt = world.resource_mut::<WorldTime>();
    wt.elapsed += i64::from(dt);
    wt.delta = dt;
    wt.frame_count += 1;
}
