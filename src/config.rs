//! Engine configuration loading
//!
//! Uses RON (Rusty Object Notation) for a human-editable config file.
//! Every field has a default, so a partial file or no file at all still
//! produces a working engine.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::rasterizer::{Vec3, HEIGHT, WIDTH};

/// Error type for config loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
        }
    }
}

/// View frustum planes for the projection matrix
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Frustum {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Frustum {
    fn default() -> Self {
        Self {
            left: -0.4,
            right: 0.4,
            bottom: -0.3,
            top: 0.3,
            near: 1.0,
            far: 100.0,
        }
    }
}

/// Engine settings: window extent, projection, camera start pose, grid
/// geometry, and the motion rate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub window_width: usize,
    pub window_height: usize,
    pub frustum: Frustum,
    pub camera_position: Vec3,
    pub camera_target: Vec3,
    pub grid_extent: Vec3,
    pub grid_unit: f32,
    /// Angular and linear velocity per elapsed millisecond
    pub move_rate: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_width: WIDTH,
            window_height: HEIGHT,
            frustum: Frustum::default(),
            camera_position: Vec3::new(0.0, 0.0, 100.0),
            camera_target: Vec3::ZERO,
            grid_extent: Vec3::new(50.0, 50.0, 50.0),
            grid_unit: 20.0,
            move_rate: 0.05,
        }
    }
}

/// Load a config from a RON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<EngineConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config = ron::from_str(&contents)?;
    Ok(config)
}

/// Load a config from a RON string (for embedded configs or testing)
pub fn load_config_from_str(s: &str) -> Result<EngineConfig, ConfigError> {
    Ok(ron::from_str(s)?)
}
