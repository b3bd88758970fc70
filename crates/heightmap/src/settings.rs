//! Externally supplied height-map configuration.
//!
//! Provides a `HeightMapSettings` resource holding every option a host panel
//! can change: grid size, seed, smoothness, animation speed, the experimental
//! override and the texture toggles. Settings can be loaded from JSON; any
//! field left out keeps its default.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::animation::FrameInputs;
use crate::config::{
    DEFAULT_ANIMATION_SPEED, DEFAULT_GRID_SIZE, DEFAULT_ITERATIONS, DEFAULT_SEED,
    DEFAULT_SMOOTHNESS, GRID_OPTIONS, MAX_ITERATIONS, OPTION_STEP,
};
use crate::ridge::RidgeParams;
use crate::settings_error::SettingsError;

/// Texture magnification filter requested for an exported field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TextureFilter {
    #[default]
    Linear,
    Nearest,
}

/// Mesh the textures are projected onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TerrainModel {
    /// One connected surface.
    #[default]
    Grid,
    /// A separate pillar per cell.
    Bars,
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeightMapSettings {
    pub grid_width: usize,
    pub grid_height: usize,
    /// Seed for ridge placement.
    pub seed: u8,
    pub num_iterations: u32,
    /// Ridge sharpness, 0.0..=1.0 in steps of 0.1.
    pub smoothness: f32,
    /// Fraction of `ANIMATION_STEP` added per tick, 0.0..=1.0 in steps of 0.1.
    pub animation_speed: f32,
    /// Accept grid sizes and iteration counts beyond the guardrails.
    pub experimental_mode: bool,
    pub height_texture_enabled: bool,
    pub color_texture_enabled: bool,
    pub height_texture_filter: TextureFilter,
    pub color_texture_filter: TextureFilter,
    pub model: TerrainModel,
}

impl Default for HeightMapSettings {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_SIZE.0,
            grid_height: DEFAULT_GRID_SIZE.1,
            seed: DEFAULT_SEED,
            num_iterations: DEFAULT_ITERATIONS,
            smoothness: DEFAULT_SMOOTHNESS,
            animation_speed: DEFAULT_ANIMATION_SPEED,
            experimental_mode: false,
            height_texture_enabled: true,
            color_texture_enabled: true,
            height_texture_filter: TextureFilter::Linear,
            color_texture_filter: TextureFilter::Linear,
            model: TerrainModel::Grid,
        }
    }
}

/// Round `value` to the nearest option step inside `[0, 1]`.
pub fn snap_to_step(value: f32) -> f32 {
    if !value.is_finite() {
        return 0.0;
    }
    let steps = (value.clamp(0.0, 1.0) / OPTION_STEP).round();
    steps * OPTION_STEP
}

fn is_on_step(value: f32) -> bool {
    value.is_finite() && (snap_to_step(value) - value).abs() < 1e-4
}

impl HeightMapSettings {
    pub fn grid_size(&self) -> (usize, usize) {
        (self.grid_width, self.grid_height)
    }

    /// Check every field against its option set.
    ///
    /// Grid sides must come from `GRID_OPTIONS` and the iteration count must
    /// not exceed `MAX_ITERATIONS`, unless `experimental_mode` is set.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let out_of_range = |field: &'static str, value: String| {
            Err(SettingsError::OutOfRange { field, value })
        };

        if !self.experimental_mode {
            if !GRID_OPTIONS.contains(&self.grid_width) {
                return out_of_range("grid_width", self.grid_width.to_string());
            }
            if !GRID_OPTIONS.contains(&self.grid_height) {
                return out_of_range("grid_height", self.grid_height.to_string());
            }
            if self.num_iterations > MAX_ITERATIONS {
                return out_of_range("num_iterations", self.num_iterations.to_string());
            }
        }
        if !is_on_step(self.smoothness) {
            return out_of_range("smoothness", self.smoothness.to_string());
        }
        if !is_on_step(self.animation_speed) {
            return out_of_range("animation_speed", self.animation_speed.to_string());
        }
        Ok(())
    }

    /// Parse and validate settings from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a JSON settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Ridge generation parameters for one frame.
    pub fn ridge_params(&self, inputs: FrameInputs) -> RidgeParams {
        RidgeParams {
            grid_size: self.grid_size(),
            seed: u64::from(inputs.seed),
            num_iterations: self.num_iterations,
            counter: inputs.counter,
            smoothness: inputs.smoothness,
            experimental_mode: self.experimental_mode,
        }
    }
}
