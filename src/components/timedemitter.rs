//! Periodic emission state.
//!
//! A [`TimedEmitter`] next to an
//! [`AgentEmitter`](crate::components::emitter::AgentEmitter) makes
//! `agent_emitter_system` fire a burst every `emit_interval` milliseconds.
//! Large frame deltas are caught up with several bursts in the same tick; the
//! remainder stays in the accumulator so firing never drifts.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::components::agent::Milliseconds;

/// Default interval between timed bursts.
pub const DEFAULT_EMIT_INTERVAL: Milliseconds = 1000;

/// Timed emission accumulator.
#[derive(Component, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimedEmitter {
    /// Milliseconds between bursts. Zero or negative disables timed firing.
    pub emit_interval: Milliseconds,
    /// Time accumulated since the last burst.
    pub time_since_last_emission: Milliseconds,
}

impl Default for TimedEmitter {
    fn default() -> Self {
        Self {
            emit_interval: DEFAULT_EMIT_INTERVAL,
            time_since_last_emission: 0,
        }
    }
}

impl TimedEmitter {
    pub fn new(emit_interval: Milliseconds) -> Self {
        Self {
            emit_interval,
            time_since_last_emission: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.emit_interval > 0
    }

    /// Add `dt` to the accumulator and return how many bursts are due.
    ///
    /// Each due burst removes one interval from the accumulator. When firing
    /// is disabled the accumulator still grows, saturating at
    /// `Milliseconds::MAX`, but no burst is ever due.
    pub fn advance(&mut self, dt: Milliseconds) -> u32 {
        self.time_since_last_emission = self.time_since_last_emission.saturating_add(dt);
        let mut bursts = 0;
        while self.emit_interval > 0 && self.time_since_last_emission >= self.emit_interval {
            self.time_since_last_emission -= self.emit_interval;
            bursts += 1;
        }
        bursts
    }
}
