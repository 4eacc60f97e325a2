//! Simulation configuration resource.
//!
//! Settings loaded from an INI configuration file, with defaults for every
//! key so a missing or partial file still yields a runnable simulation.
//!
//! # Configuration File Format
//!
//! ```ini
//! [simulation]
//! tick_ms = 16
//! ticks = 600
//! seed = 42
//!
//! [contacts]
//! builtin = true
//! ```
//!
//! `contacts.builtin` selects the bundled sphere-overlap contact detector.
//! Hosts driving their own physics engine turn it off and fill
//! [`CollisionContacts`](crate::resources::contacts::CollisionContacts)
//! themselves.

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::components::agent::Milliseconds;

/// Default safe values for startup
const DEFAULT_TICK_MS: Milliseconds = 16;
const DEFAULT_TICKS: u64 = 600;
const DEFAULT_SEED: u64 = 42;
const DEFAULT_BUILTIN_CONTACTS: bool = true;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Simulation configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Milliseconds advanced per tick.
    pub tick_ms: Milliseconds,
    /// Number of ticks the runner executes.
    pub ticks: u64,
    /// Seed for [`SimRng`](crate::resources::rng::SimRng).
    pub seed: u64,
    /// Use the bundled contact detector.
    pub builtin_contacts: bool,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SimConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            ticks: DEFAULT_TICKS,
            seed: DEFAULT_SEED,
            builtin_contacts: DEFAULT_BUILTIN_CONTACTS,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [simulation] section
        if let Some(tick_ms) = config.getint("simulation", "tick_ms").ok().flatten() {
            self.tick_ms = Milliseconds::try_from(tick_ms)
                .map_err(|_| format!("tick_ms out of range: {}", tick_ms))?;
        }
        if let Some(ticks) = config.getuint("simulation", "ticks").ok().flatten() {
            self.ticks = ticks;
        }
        if let Some(seed) = config.getuint("simulation", "seed").ok().flatten() {
            self.seed = seed;
        }

        // [contacts] section
        if let Some(builtin) = config.getbool("contacts", "builtin").ok().flatten() {
            self.builtin_contacts = builtin;
        }

        info!(
            "Loaded config: tick_ms={}, ticks={}, seed={}, builtin_contacts={}",
            self.tick_ms, self.ticks, self.seed, self.builtin_contacts
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("simulation", "tick_ms", Some(self.tick_ms.to_string()));
        config.set("simulation", "ticks", Some(self.ticks.to_string()));
        config.set("simulation", "seed", Some(self.seed.to_string()));
        config.set("contacts", "builtin", Some(self.builtin_contacts.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("agentsim_{}_{}.ini", name, std::process::id()))
    }

    #[test]
    fn test_defaults() {
        let config = SimConfig::new();
        assert_eq!(config.tick_ms, DEFAULT_TICK_MS);
        assert_eq!(config.ticks, DEFAULT_TICKS);
        assert!(config.builtin_contacts);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut config = SimConfig::with_path(temp_config_path("missing"));
        assert!(config.load_from_file().is_err());
        assert_eq!(config.tick_ms, DEFAULT_TICK_MS);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let path = temp_config_path("partial");
        std::fs::write(&path, "[simulation]\ntick_ms = 20\n").unwrap();

        let mut config = SimConfig::with_path(&path);
        config.load_from_file().unwrap();
        assert_eq!(config.tick_ms, 20);
        assert_eq!(config.ticks, DEFAULT_TICKS);
        assert_eq!(config.seed, DEFAULT_SEED);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_config_path("save");
        let mut saved = SimConfig::with_path(&path);
        saved.tick_ms = 33;
        saved.ticks = 10;
        saved.seed = 7;
        saved.builtin_contacts = false;
        saved.save_to_file().unwrap();

        let mut loaded = SimConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        assert_eq!(loaded, saved);

        std::fs::remove_file(&path).ok();
    }
}
