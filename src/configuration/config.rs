//! Configuration types for loading the heartbeat parameter set from YAML.
//!
//! Every field is optional and falls back to the built-in parameter set, so
//! an empty document is a valid configuration.
//!
//! # YAML format
//!
//! ```yaml
//! heart_angle_step: 0.075        # radians between outline samples
//! heart_ratio: 13.0              # outline scale
//! heartbeat_start_delay_ms: 1300 # first flip
//! attraction_duration_ms: 250    # flag off
//! repulsion_duration_ms: 700     # flag on
//! braking_distance: 100.0
//! repulsion_distance: 500.0
//! max_attraction_force: 10.0
//! max_repulsion_force: 9.0
//! max_speed: 40.0
//! background_color: [30, 30, 30, 255]
//! particle_color: [231, 76, 60, 255]
//! particle_size: 17.0
//! repulsors:
//!   - [0.0, 0.0]
//! show_repulsors: false
//! repulsor_color: [255, 255, 255, 50]
//! seed: 42                       # omit for a random layout
//! ```
//!
//! [`SettingsConfig::into_settings`] validates the values and produces the
//! runtime [`Settings`].

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::simulation::params::Settings;
use crate::simulation::states::NVec2;
use crate::visualization::canvas::Rgba;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Top-level settings document
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsConfig {
    pub heart_angle_step: f64,
    pub heart_ratio: f64,
    pub heartbeat_start_delay_ms: u64,
    pub attraction_duration_ms: u64,
    pub repulsion_duration_ms: u64,
    pub braking_distance: f64,
    pub repulsion_distance: f64,
    pub max_attraction_force: f64,
    pub max_repulsion_force: f64,
    pub max_speed: f64,
    pub background_color: [u8; 4],
    pub particle_color: [u8; 4],
    pub particle_size: f64,
    pub repulsors: Vec<[f64; 2]>, // relative to screen center
    pub show_repulsors: bool,
    pub repulsor_color: [u8; 4],
    pub seed: Option<u64>,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        let s = Settings::default();
        let rgba = |c: Rgba| [c.r, c.g, c.b, c.a];
        Self {
            heart_angle_step: s.heart_angle_step,
            heart_ratio: s.heart_ratio,
            heartbeat_start_delay_ms: s.heartbeat_start_delay.as_millis() as u64,
            attraction_duration_ms: s.attraction_duration.as_millis() as u64,
            repulsion_duration_ms: s.repulsion_duration.as_millis() as u64,
            braking_distance: s.braking_distance,
            repulsion_distance: s.repulsion_distance,
            max_attraction_force: s.max_attraction_force,
            max_repulsion_force: s.max_repulsion_force,
            max_speed: s.max_speed,
            background_color: rgba(s.background_color),
            particle_color: rgba(s.particle_color),
            particle_size: s.particle_size,
            repulsors: s.repulsors.iter().map(|r| [r.x, r.y]).collect(),
            show_repulsors: s.show_repulsors,
            repulsor_color: rgba(s.repulsor_color),
            seed: s.seed,
        }
    }
}

impl SettingsConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        // an empty or comment-only document is null, not an empty map
        let value: serde_yaml::Value = serde_yaml::from_str(text)?;
        if value.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_value(value)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Check the values and convert them into runtime [`Settings`]
    pub fn into_settings(self) -> Result<Settings, ConfigError> {
        positive("heart_angle_step", self.heart_angle_step)?;
        positive("heart_ratio", self.heart_ratio)?;
        positive("braking_distance", self.braking_distance)?;
        positive("repulsion_distance", self.repulsion_distance)?;
        positive("max_attraction_force", self.max_attraction_force)?;
        positive("max_repulsion_force", self.max_repulsion_force)?;
        positive("max_speed", self.max_speed)?;
        positive("particle_size", self.particle_size)?;
        nonzero_ms("attraction_duration_ms", self.attraction_duration_ms)?;
        nonzero_ms("repulsion_duration_ms", self.repulsion_duration_ms)?;

        if let Some(bad) = self.repulsors.iter().find(|r| !(r[0].is_finite() && r[1].is_finite())) {
            return Err(ConfigError::Invalid {
                field: "repulsors",
                reason: format!("point {bad:?} is not finite"),
            });
        }

        Ok(Settings {
            heart_angle_step: self.heart_angle_step,
            heart_ratio: self.heart_ratio,
            heartbeat_start_delay: Duration::from_millis(self.heartbeat_start_delay_ms),
            attraction_duration: Duration::from_millis(self.attraction_duration_ms),
            repulsion_duration: Duration::from_millis(self.repulsion_duration_ms),
            braking_distance: self.braking_distance,
            repulsion_distance: self.repulsion_distance,
            max_attraction_force: self.max_attraction_force,
            max_repulsion_force: self.max_repulsion_force,
            max_speed: self.max_speed,
            background_color: self.background_color.into(),
            particle_color: self.particle_color.into(),
            particle_size: self.particle_size,
            repulsors: self.repulsors.iter().map(|r| NVec2::new(r[0], r[1])).collect(),
            show_repulsors: self.show_repulsors,
            repulsor_color: self.repulsor_color.into(),
            seed: self.seed,
        })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("expected a positive finite number, got {value}"),
        })
    }
}

fn nonzero_ms(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if value > 0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: "duration must be at least 1 ms".to_string(),
        })
    }
}
