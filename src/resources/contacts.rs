//! Per-tick collision contact feed.
//!
//! The physics collaborator pushes every colliding entity pair it found this
//! tick into [`CollisionContacts`]; `agent_absorber_system` drains the feed.
//! Pairs are unordered and may repeat: an engine reporting several contact
//! points for one pair pushes that pair several times.

use bevy_ecs::prelude::{Entity, Resource};

#[derive(Resource, Debug, Default, Clone)]
pub struct CollisionContacts {
    pairs: Vec<(Entity, Entity)>,
}

impl CollisionContacts {
    pub fn push(&mut self, a: Entity, b: Entity) {
        self.pairs.push((a, b));
    }

    pub fn pairs(&self) -> &[(Entity, Entity)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Take every pair reported so far, leaving the feed empty.
    pub fn take(&mut self) -> Vec<(Entity, Entity)> {
        std::mem::take(&mut self.pairs)
    }
}

impl Extend<(Entity, Entity)> for CollisionContacts {
    fn extend<T: IntoIterator<Item = (Entity, Entity)>>(&mut self, iter: T) {
        self.pairs.extend(iter);
    }
}
