// ============================================================================
// config.rs - Glidepan
// Panning tunables, viewport geometry, and harness configuration files.
// ============================================================================

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_IMPULSE_VELOCITY: f32 = 500.0;
pub const DEFAULT_MAX_VELOCITY: f32 = 2000.0;
pub const DEFAULT_ACCELERATION: f32 = 1000.0;
pub const DEFAULT_DECELERATION: f32 = 2000.0;

/// Resolved panning tunables, fixed for the lifetime of a controller.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct PanConfig {
    /// Speed assigned to an axis the moment a direction is pressed (units/s).
    pub impulse_velocity: f32,
    /// Per-axis speed cap (units/s).
    pub max_velocity: f32,
    /// Speed gained per second while a direction is held (units/s²).
    pub acceleration: f32,
    /// Speed lost per second while coasting (units/s²).
    pub deceleration: f32,
}

impl Default for PanConfig {
    fn default() -> Self {
        Self {
            impulse_velocity: DEFAULT_IMPULSE_VELOCITY,
            max_velocity: DEFAULT_MAX_VELOCITY,
            acceleration: DEFAULT_ACCELERATION,
            deceleration: DEFAULT_DECELERATION,
        }
    }
}

impl PanConfig {
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("impulse_velocity", self.impulse_velocity),
            ("max_velocity", self.max_velocity),
            ("acceleration", self.acceleration),
            ("deceleration", self.deceleration),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{} must be a positive number, got {}", name, value));
            }
        }
        Ok(())
    }
}

/// User overrides for [`PanConfig`]. Missing fields fall back to defaults.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanOptions {
    pub impulse_velocity: Option<f32>,
    pub max_velocity: Option<f32>,
    pub acceleration: Option<f32>,
    pub deceleration: Option<f32>,
}

impl PanOptions {
    /// Merge over the defaults. Caller values take precedence.
    pub fn resolve(&self) -> PanConfig {
        let defaults = PanConfig::default();
        PanConfig {
            impulse_velocity: self.impulse_velocity.unwrap_or(defaults.impulse_velocity),
            max_velocity: self.max_velocity.unwrap_or(defaults.max_velocity),
            acceleration: self.acceleration.unwrap_or(defaults.acceleration),
            deceleration: self.deceleration.unwrap_or(defaults.deceleration),
        }
    }
}

/// Screen and world extents for the reference viewport.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    pub world_width: f32,
    pub world_height: f32,
    /// Keep the world covering the screen.
    pub clamp: bool,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            screen_width: 1280.0,
            screen_height: 720.0,
            world_width: 4096.0,
            world_height: 4096.0,
            clamp: true,
        }
    }
}

impl ViewportConfig {
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("world_width", self.world_width),
            ("world_height", self.world_height),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{} must be a positive number, got {}", name, value));
            }
        }
        Ok(())
    }
}

/// Everything a batch run reads from its config file.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub pan: PanOptions,
    pub viewport: ViewportConfig,
}

impl HarnessConfig {
    pub fn from_json(content: &str) -> Result<Self, String> {
        let config: HarnessConfig =
            serde_json::from_str(content).map_err(|e| format!("Invalid config: {}", e))?;
        config.pan.resolve().validate()?;
        config.viewport.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {:?}: {}", path, e))?;
        let config = Self::from_json(&content)?;
        log::info!("Loaded config from {:?}", path);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_options_resolve_to_defaults() {
        let config = PanOptions::default().resolve();
        assert_eq!(config, PanConfig::default());
        assert_eq!(config.impulse_velocity, 500.0);
        assert_eq!(config.max_velocity, 2000.0);
        assert_eq!(config.acceleration, 1000.0);
        assert_eq!(config.deceleration, 2000.0);
    }

    #[test]
    fn user_options_override_defaults() {
        let options = PanOptions {
            max_velocity: Some(800.0),
            deceleration: Some(50.0),
            ..Default::default()
        };
        let config = options.resolve();
        assert_eq!(config.max_velocity, 800.0);
        assert_eq!(config.deceleration, 50.0);
        assert_eq!(config.impulse_velocity, DEFAULT_IMPULSE_VELOCITY);
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config =
            HarnessConfig::from_json(r#"{ "pan": { "acceleration": 250 } }"#).unwrap();
        assert_eq!(config.pan.resolve().acceleration, 250.0);
        assert_eq!(config.viewport, ViewportConfig::default());
    }

    #[test]
    fn non_positive_tunables_are_rejected() {
        let err = HarnessConfig::from_json(r#"{ "pan": { "deceleration": -1 } }"#).unwrap_err();
        assert!(err.contains("deceleration"));

        let err =
            HarnessConfig::from_json(r#"{ "viewport": { "world_width": 0 } }"#).unwrap_err();
        assert!(err.contains("world_width"));
    }
}
