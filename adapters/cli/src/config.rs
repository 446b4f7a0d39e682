//! Session configuration loaded from TOML and overridden from the command line.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use dimension_shooter_core::DEFAULT_SPAWN_DISTANCE;
use serde::Deserialize;
use thiserror::Error;

/// Failures raised while loading a session configuration.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read session config at {path}")]
    Read {
        /// Location that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The configuration file is not valid TOML for the schema.
    #[error("failed to parse session config at {path}")]
    Parse {
        /// Location that was parsed.
        path: PathBuf,
        /// Underlying parse failure.
        #[source]
        source: toml::de::Error,
    },
    /// A numeric field that must be positive was zero or negative.
    #[error("`{field}` must be positive")]
    NotPositive {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A distance field was infinite or not a number.
    #[error("`{field}` must be a finite distance")]
    NotFinite {
        /// Name of the offending field.
        field: &'static str,
    },
}

/// Settings of a headless play session.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SessionConfig {
    /// Root seed every system derives its generator from.
    pub(crate) seed: u64,
    /// Minimum distance between the player and a freshly spawned enemy.
    pub(crate) spawn_distance: f32,
    /// Simulated milliseconds per tick.
    pub(crate) tick_ms: u64,
    /// Upper bound on simulated ticks before the session gives up.
    pub(crate) max_ticks: u64,
    /// Number of levels to clear; `0` plays until the player falls.
    pub(crate) levels: u32,
    /// Tracing filter used when `RUST_LOG` is not set.
    pub(crate) log_filter: String,
    /// Scripted player behaviour.
    pub(crate) autopilot: AutopilotConfig,
}

/// Behaviour of the scripted player.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct AutopilotConfig {
    /// Milliseconds between two shots.
    pub(crate) fire_interval_ms: u64,
    /// Damage dealt by a single shot.
    pub(crate) damage: u32,
    /// Health below which the player walks to the nearest pickup.
    pub(crate) seek_pickups_below: u32,
    /// Whether the player shifts dimension whenever the cooldown allows.
    pub(crate) shift_dimensions: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 0x00d1_3e45,
            spawn_distance: DEFAULT_SPAWN_DISTANCE,
            tick_ms: 16,
            max_ticks: 60 * 60 * 20,
            levels: 3,
            log_filter: "info".to_owned(),
            autopilot: AutopilotConfig::default(),
        }
    }
}

impl Default for AutopilotConfig {
    fn default() -> Self {
        Self {
            fire_interval_ms: 250,
            damage: 20,
            seek_pickups_below: 60,
            shift_dimensions: true,
        }
    }
}

impl SessionConfig {
    /// Loads the configuration at `path`, or the defaults when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the simulation cannot run with.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::NotPositive { field: "tick_ms" });
        }
        if self.max_ticks == 0 {
            return Err(ConfigError::NotPositive { field: "max_ticks" });
        }
        if !self.spawn_distance.is_finite() {
            return Err(ConfigError::NotFinite {
                field: "spawn_distance",
            });
        }
        if self.spawn_distance < 0.0 {
            return Err(ConfigError::NotPositive {
                field: "spawn_distance",
            });
        }
        if self.autopilot.fire_interval_ms == 0 {
            return Err(ConfigError::NotPositive {
                field: "autopilot.fire_interval_ms",
            });
        }
        Ok(())
    }

    /// Simulated time advanced by one tick.
    pub(crate) fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Level after which the session ends, if any.
    pub(crate) fn final_level(&self) -> Option<u32> {
        (self.levels > 0).then_some(self.levels)
    }
}
