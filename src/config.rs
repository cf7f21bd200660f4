//! Scene configuration.
//!
//! Every field has a default. A JSON file is merged over the serialized
//! defaults, so it only needs to name the values it changes, at any depth.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::camera::CameraSettings;
use crate::cli::Cli;
use crate::managers::BloomParams;
use crate::materials::{EmissiveMaterial, FlameParams};
use crate::math::Color;
use crate::particles::FireParticleParams;
use crate::scene::AssetPaths;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Cozy Room".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub assets: AssetPaths,
    pub window: WindowSettings,
    pub camera: CameraSettings,
    pub clear_color: Color,
    pub lamp_color: Color,
    pub fire: FlameParams,
    pub candles: FlameParams,
    pub fire_particles: FireParticleParams,
    pub bloom: BloomParams,
    pub post_processing: bool,
    /// Theme used when the window system reports no preference
    pub dark_by_default: bool,
    /// Uniform scale of the imported model
    pub model_scale: f32,
    pub model_offset: [f32; 3],
    pub background_volume: f32,
    pub show_ui: bool,
    /// Seed for particle placement; random when absent
    pub particle_seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            assets: AssetPaths::default(),
            window: WindowSettings::default(),
            camera: CameraSettings::default(),
            clear_color: Color::new(2.0 / 255.0, 2.0 / 255.0, 13.0 / 255.0),
            lamp_color: EmissiveMaterial::LAMP_COLOR,
            fire: FlameParams::fire(),
            candles: FlameParams::candles(),
            fire_particles: FireParticleParams::default(),
            bloom: BloomParams::default(),
            post_processing: true,
            dark_by_default: false,
            model_scale: 0.2,
            model_offset: [0.0, -0.5, 0.0],
            background_volume: 0.2,
            show_ui: true,
            particle_seed: None,
        }
    }
}

impl SceneConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let overrides: Value = serde_json::from_str(json).context("config is not valid JSON")?;
        let mut merged =
            serde_json::to_value(Self::default()).context("failed to serialize defaults")?;
        merge(&mut merged, overrides);
        serde_json::from_value(merged).context("config has invalid values")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {:?}", path))?;
        Self::from_json_str(&text).context(format!("Failed to parse config file: {:?}", path))
    }

    /// Defaults, then the config file, then command-line flags
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        Ok(config)
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(model) = &cli.model {
            self.assets.model = model.clone();
        }
        if let Some(dark) = cli.theme_override() {
            self.dark_by_default = dark;
        }
        if cli.no_post {
            self.post_processing = false;
        }
        if cli.no_ui {
            self.show_ui = false;
        }
    }
}

/// Recursively overlay `patch` onto `base`; objects merge, everything else replaces
fn merge(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            for (key, value) in patch {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, patch) => *base = patch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_color_hex() {
        assert_eq!(SceneConfig::default().clear_color.to_hex(), "#02020d");
    }

    #[test]
    fn test_nested_partial_override() {
        let config = SceneConfig::from_json_str(r#"{ "candles": { "intensity": 3.0 } }"#).unwrap();
        assert_eq!(config.candles.intensity, 3.0);
        assert_eq!(config.candles.remap_x, 0.4);
        assert_eq!(config.fire, FlameParams::fire());
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut config = SceneConfig::from_json_str(r#"{ "post_processing": true }"#).unwrap();
        let cli = Cli {
            no_post: true,
            night: true,
            ..Cli::default()
        };
        config.apply_cli(&cli);
        assert!(!config.post_processing);
        assert!(config.dark_by_default);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let config = SceneConfig::from_json_str(r#"{ "shadow_quality": "ultra" }"#).unwrap();
        assert_eq!(config, SceneConfig::default());
    }
}
