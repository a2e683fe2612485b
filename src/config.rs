//! Tunable simulation constants, optionally loaded from a JSON file.
//!
//! Every field has a default, so a file only needs to name what it changes.

use std::fs;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapsuleConfig {
    pub half_height: f32,
    pub radius: f32,
}

impl Default for CapsuleConfig {
    fn default() -> Self {
        Self {
            half_height: 0.9,
            radius: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Degrees of yaw/pitch per unit of look input.
    pub sensitivity: f32,
    pub min_pitch: f32,
    pub max_pitch: f32,
    /// Camera position relative to the player's location.
    pub eye_offset: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 45.0,
            near: 0.1,
            far: 100.0,
            sensitivity: 0.1,
            min_pitch: -87.0,
            max_pitch: 80.0,
            eye_offset: Vec3::new(0.0, 0.7, 0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookConfig {
    /// Raw deltas with magnitude below this are ignored.
    pub dead_zone: f32,
    /// Weight of the newest sample in the exponential average, in `(0, 1]`.
    pub smoothing: f32,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            dead_zone: 0.1,
            smoothing: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seconds per fixed update step.
    pub fixed_timestep: f32,
    pub max_steps_per_frame: u32,
    /// Vertical acceleration applied to physics actors (m/s²).
    pub gravitational_acceleration: f32,
    pub jump_impulse: f32,
    /// Vertical speeds within `±air_epsilon` count as grounded.
    pub air_epsilon: f32,
    pub player_speed: f32,
    pub player_capsule: CapsuleConfig,
    /// Broad-phase margin around the player for both collision passes.
    pub player_cull_distance: f32,
    /// Multiplier on every penetration depth.
    pub penetration_force: f32,
    /// Measured speeds below this count as at rest.
    pub rest_velocity_threshold: f32,
    /// Minimum impact speed for the impact cue.
    pub impact_cue_speed: f32,
    pub camera: CameraConfig,
    pub look: LookConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fixed_timestep: 1.0 / 60.0,
            max_steps_per_frame: 8,
            gravitational_acceleration: -9.81,
            jump_impulse: 4.5,
            air_epsilon: 1e-3,
            player_speed: 3.0,
            player_capsule: CapsuleConfig::default(),
            player_cull_distance: 5.0,
            penetration_force: 1.01,
            rest_velocity_threshold: 0.01,
            impact_cue_speed: 1.0,
            camera: CameraConfig::default(),
            look: LookConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        info!(path = %path.display(), "loaded simulation config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(name: &str, value: f32) -> Result<(), ConfigError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")))
            }
        }

        positive("fixed_timestep", self.fixed_timestep)?;
        positive("player_speed", self.player_speed)?;
        positive("player_capsule.half_height", self.player_capsule.half_height)?;
        positive("player_capsule.radius", self.player_capsule.radius)?;
        positive("camera.fov", self.camera.fov)?;
        positive("camera.near", self.camera.near)?;

        if self.max_steps_per_frame == 0 {
            return Err(ConfigError::Invalid("max_steps_per_frame must be at least 1".into()));
        }
        if !(self.penetration_force >= 1.0 && self.penetration_force.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "penetration_force must be >= 1, got {}",
                self.penetration_force
            )));
        }
        if self.camera.far <= self.camera.near {
            return Err(ConfigError::Invalid("camera.far must exceed camera.near".into()));
        }
        if self.camera.min_pitch >= self.camera.max_pitch {
            return Err(ConfigError::Invalid("camera pitch limits are inverted".into()));
        }
        if !(self.look.smoothing > 0.0 && self.look.smoothing <= 1.0) {
            return Err(ConfigError::Invalid("look.smoothing must be in (0, 1]".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SimulationConfig::from_json(r#"{ "player_speed": 5.0, "camera": { "fov": 60.0 } }"#).unwrap();
        assert_eq!(config.player_speed, 5.0);
        assert_eq!(config.camera.fov, 60.0);
        assert_eq!(config.camera.near, 0.1);
        assert_eq!(config.penetration_force, 1.01);
    }

    #[test]
    fn test_rejects_weak_penetration_force() {
        let err = SimulationConfig::from_json(r#"{ "penetration_force": 0.5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_non_finite_penetration_force() {
        for force in [f32::NAN, f32::INFINITY] {
            let config = SimulationConfig {
                penetration_force: force,
                ..SimulationConfig::default()
            };
            assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))), "{force} accepted");
        }
    }

    #[test]
    fn test_rejects_inverted_pitch() {
        let mut config = SimulationConfig::default();
        config.camera.min_pitch = 10.0;
        config.camera.max_pitch = -10.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = SimulationConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
