//! Agent type registry.
//!
//! The [`AgentRegistry`] maps agent-type internal names to stable
//! [`AgentId`]s and back. It is append-only: ids are handed out consecutively
//! starting at 1, and a binding never changes or disappears once made.
//!
//! The registry is an owned value. Content loading code registers types
//! while building a simulation; the tick systems only ever see resolved ids.
//! It is inserted into the ECS world as a resource so scripts and loaders
//! running inside the world can resolve names too.
//!
//! Registration and lookups go through a single lock guarding both the name
//! map and the entry list, so a new entry becomes visible to every lookup at
//! once even if content is loaded from another thread.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use bevy_ecs::prelude::Resource;
use log::debug;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::components::agent::AgentId;

/// Errors raised by registry misuse.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("agent type `{0}` is already registered")]
    DuplicateName(String),
    #[error("agent type `{0}` is not registered")]
    UnknownName(String),
    #[error("agent id {0} does not exist")]
    InvalidId(AgentId),
    /// Every id of the underlying integer type is already taken.
    #[error("no agent ids left to assign")]
    Exhausted,
}

/// One registered agent type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentRegistryEntry {
    pub internal_name: String,
    pub display_name: String,
}

#[derive(Debug, Default)]
struct RegistryInner {
    entries: Vec<AgentRegistryEntry>,
    by_name: FxHashMap<String, AgentId>,
}

impl RegistryInner {
    fn entry(&self, id: AgentId) -> Result<&AgentRegistryEntry, RegistryError> {
        id.index()
            .and_then(|index| self.entries.get(index))
            .ok_or(RegistryError::InvalidId(id))
    }
}

/// Bidirectional agent name/id registry.
#[derive(Debug, Default, Resource)]
pub struct AgentRegistry {
    inner: RwLock<RegistryInner>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new agent type and return its id.
    ///
    /// Fails with [`RegistryError::DuplicateName`] if `internal_name` is
    /// already taken; the registry is left untouched in that case.
    pub fn register(
        &self,
        internal_name: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Result<AgentId, RegistryError> {
        let internal_name = internal_name.into();
        let mut inner = self.write();
        if inner.by_name.contains_key(&internal_name) {
            return Err(RegistryError::DuplicateName(internal_name));
        }
        let next = u16::try_from(inner.entries.len() + 1).map_err(|_| RegistryError::Exhausted)?;
        let id = AgentId(next);
        inner.entries.push(AgentRegistryEntry {
            internal_name: internal_name.clone(),
            display_name: display_name.into(),
        });
        debug!("Registered agent type '{}' as id {}", internal_name, id);
        inner.by_name.insert(internal_name, id);
        Ok(id)
    }

    /// Resolve an internal name to its id.
    pub fn id_by_name(&self, internal_name: &str) -> Result<AgentId, RegistryError> {
        self.read()
            .by_name
            .get(internal_name)
            .copied()
            .ok_or_else(|| RegistryError::UnknownName(internal_name.to_string()))
    }

    /// Display name of a registered id.
    pub fn display_name(&self, id: AgentId) -> Result<String, RegistryError> {
        Ok(self.read().entry(id)?.display_name.clone())
    }

    /// Internal name of a registered id.
    pub fn internal_name(&self, id: AgentId) -> Result<String, RegistryError> {
        Ok(self.read().entry(id)?.internal_name.clone())
    }

    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of all entries in id order.
    pub fn entries(&self) -> Vec<(AgentId, AgentRegistryEntry)> {
        self.read()
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (AgentId(index as u16 + 1), entry.clone()))
            .collect()
    }
}
