use bevy_ecs::prelude::Component;
use glam::Vec3;

#[derive(Component, Clone, Debug, Copy, PartialEq)]
pub struct Scale {
    pub scale: Vec3,
}
impl Scale {
    pub fn new(scale: Vec3) -> Self {
        Self { scale }
    }
}
impl Default for Scale {
    fn default() -> Self {
        Self::new(Vec3::ONE)
    }
}
