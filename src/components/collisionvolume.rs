//! Collision volume attached to agents and absorbers.
//!
//! The physics engine is an external collaborator; this component only
//! describes the volume it should simulate. Agent particles carry a tiny
//! sensor sphere: it reports overlaps but has no contact response and is
//! kinematic, so forces never move it. Absorbers carry a solid volume.
//!
//! Sensors are filtered against each other, so two agent particles never
//! produce a contact.

use bevy_ecs::prelude::Component;
use glam::Vec3;

/// Radius of the sensor sphere given to emitted particles.
pub const PARTICLE_SENSOR_RADIUS: f32 = 0.01;

/// Broad category used for collision filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeKind {
    /// Regular body taking part in the physics response.
    Solid,
    /// Overlap-only trigger.
    Sensor,
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct CollisionVolume {
    pub radius: f32,
    pub kind: VolumeKind,
    /// Whether overlaps push bodies apart.
    pub contact_response: bool,
    /// Kinematic bodies are moved by systems, never by forces.
    pub kinematic: bool,
}

impl CollisionVolume {
    /// Sensor sphere: detectable, no physical response, kinematic.
    pub fn sensor_sphere(radius: f32) -> Self {
        Self {
            radius,
            kind: VolumeKind::Sensor,
            contact_response: false,
            kinematic: true,
        }
    }

    pub fn solid_sphere(radius: f32) -> Self {
        Self {
            radius,
            kind: VolumeKind::Solid,
            contact_response: true,
            kinematic: false,
        }
    }

    pub fn is_sensor(&self) -> bool {
        self.kind == VolumeKind::Sensor
    }

    /// Collision filter: sensors only report contacts with non-sensors.
    pub fn collides_with(&self, other: &Self) -> bool {
        !(self.is_sensor() && other.is_sensor())
    }

    /// Sphere vs sphere overlap test. Touching spheres count as overlapping.
    pub fn overlaps(&self, position: Vec3, other: &Self, other_position: Vec3) -> bool {
        let reach = self.radius + other.radius;
        position.distance_squared(other_position) <= reach * reach
    }
}
