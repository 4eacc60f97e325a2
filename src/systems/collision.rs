//! Reference contact detector.
//!
//! The simulation treats physics as an external collaborator that reports
//! contact pairs into [`CollisionContacts`]. This module ships a simple
//! stand-in: a sphere-overlap test between every pair of
//! [`CollisionVolume`]s, honoring the sensor filter. Hosts with a real
//! physics engine replace it with their own system in the same slot.

use bevy_ecs::prelude::*;

use crate::components::collisionvolume::CollisionVolume;
use crate::components::mapposition::MapPosition;
use crate::resources::contacts::CollisionContacts;

/// Push one contact pair for every overlapping, non-filtered volume pair.
pub fn detect_sensor_contacts(
    query: Query<(Entity, &MapPosition, &CollisionVolume)>,
    mut contacts: ResMut<CollisionContacts>,
) {
    for [(entity_a, position_a, volume_a), (entity_b, position_b, volume_b)] in
        query.iter_combinations::<2>()
    {
        if volume_a.collides_with(volume_b)
            && volume_a.overlaps(position_a.pos, volume_b, position_b.pos)
        {
            contacts.push(entity_a, entity_b);
        }
    }
}
