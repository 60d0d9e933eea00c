use std::f64::consts::FRAC_PI_2;
use std::path::Path;

use lagoon_common::{ConfigError, ensure_finite};
use lagoon_noise::NoiseConfig;
use lagoon_shadow::ShadowConfig;
use lagoon_water::{GridMesh, WaterParams};
use serde::{Deserialize, Serialize};

/// Errors from building or loading a level.
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Water mesh dimensions and simulation constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterConfig {
    pub width: f64,
    pub depth: f64,
    pub width_segments: usize,
    pub depth_segments: usize,
    pub params: WaterParams,
}

impl Default for WaterConfig {
    fn default() -> Self {
        Self {
            width: 100.0,
            depth: 100.0,
            width_segments: 64,
            depth_segments: 64,
            params: WaterParams::default(),
        }
    }
}

impl WaterConfig {
    pub fn build_mesh(&self) -> Result<GridMesh, ConfigError> {
        GridMesh::new(
            self.width,
            self.depth,
            self.width_segments,
            self.depth_segments,
        )
    }
}

/// Focal object animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocalConfig {
    /// Radians per second about Y.
    pub spin_rate: f64,
    /// Rest height the hover noise oscillates around.
    pub hover_height: f64,
    pub hover: NoiseConfig,
}

impl Default for FocalConfig {
    fn default() -> Self {
        Self {
            spin_rate: FRAC_PI_2,
            hover_height: 0.0,
            hover: NoiseConfig::new(0.15, 0.8, 2),
        }
    }
}

/// Everything needed to build a [`crate::Level`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Seeds every octave table in the level.
    pub seed: u64,
    pub water: WaterConfig,
    pub x_noise: NoiseConfig,
    pub z_noise: NoiseConfig,
    /// Drives the ambient level signal handed to the host audio system.
    pub ambient: NoiseConfig,
    pub focal: FocalConfig,
    pub shadow: ShadowConfig,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            water: WaterConfig::default(),
            x_noise: NoiseConfig::new(0.3, 0.5, 4),
            z_noise: NoiseConfig::new(0.3, 0.35, 4),
            ambient: NoiseConfig::new(1.0, 0.2, 3),
            focal: FocalConfig::default(),
            shadow: ShadowConfig::default(),
        }
    }
}

impl LevelConfig {
    /// Load from a `.yaml`/`.yml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self, LevelError> {
        let text = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let config = match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&text)?,
            "json" => Self::from_json_str(&text)?,
            other => return Err(LevelError::UnsupportedFormat(other.to_string())),
        };
        tracing::info!(path = %path.display(), seed = config.seed, "loaded level config");
        Ok(config)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, LevelError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self, LevelError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, LevelError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check every numeric parameter before anything is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.x_noise.validate()?;
        self.z_noise.validate()?;
        self.ambient.validate()?;
        self.focal.hover.validate()?;
        ensure_finite("spin_rate", self.focal.spin_rate)?;
        ensure_finite("hover_height", self.focal.hover_height)?;
        self.water.params.validate()?;
        self.water.build_mesh()?;
        self.shadow.validate()?;
        Ok(())
    }
}
