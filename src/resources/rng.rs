//! Seedable randomness for emission kinematics.
//!
//! Emission draws angles and speeds from a shared [`SimRng`] resource so a
//! fixed seed reproduces a run exactly.

use bevy_ecs::prelude::Resource;
use fastrand::Rng;

#[derive(Resource, Debug)]
pub struct SimRng {
    rng: Rng,
}

impl Default for SimRng {
    fn default() -> Self {
        Self { rng: Rng::new() }
    }
}

impl SimRng {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Rng::with_seed(seed),
        }
    }

    /// Sample a uniform f64 between `low` and `high`, in either order.
    /// If the range is narrower than EPSILON, returns the lower bound directly.
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        let (low, high) = if low > high { (high, low) } else { (low, high) };
        let range = high - low;
        if range < f64::EPSILON {
            return low;
        }
        low + self.rng.f64() * range
    }
}
