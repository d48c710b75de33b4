//! Aura Configuration Management
//!
//! Handles loading and managing configuration from ~/.aura/config.toml
//! Supports hot-reloading and default config generation. The decorative
//! counts and timings here are defaults inherited from the original skin,
//! not contractual behavior; every field can be overridden.

pub mod watcher;

pub use watcher::{ConfigEvent, ConfigWatcher};

use aura_theme::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default configuration directory name
const CONFIG_DIR_NAME: &str = ".aura";
/// Default configuration file name
const CONFIG_FILE_NAME: &str = "config.toml";

/// Star-field density presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Low,
    #[default]
    Medium,
    High,
}

impl Density {
    /// Star count for this preset
    pub fn star_count(self) -> usize {
        match self {
            Density::Low => 200,
            Density::Medium => 400,
            Density::High => 800,
        }
    }
}

/// Animation speed presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl Speed {
    /// Velocity multiplier for this preset
    pub fn multiplier(self) -> f32 {
        match self {
            Speed::Slow => 0.3,
            Speed::Normal => 1.0,
            Speed::Fast => 2.0,
        }
    }
}

/// General configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Theme assumed before the host signal delivers a reading
    #[serde(default)]
    pub default_mode: ThemeMode,

    /// Duration of the body pulse marker on theme change, in milliseconds
    #[serde(default = "default_pulse_ms")]
    pub pulse_ms: u32,
}

fn default_pulse_ms() -> u32 {
    600
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_mode: ThemeMode::default(),
            pulse_ms: default_pulse_ms(),
        }
    }
}

/// Star-field configuration section (dark theme)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarfieldConfig {
    #[serde(default)]
    pub density: Density,

    #[serde(default)]
    pub speed: Speed,

    /// Per-frame sinusoidal opacity oscillation
    #[serde(default = "default_twinkle")]
    pub twinkle: bool,
}

fn default_twinkle() -> bool {
    true
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            density: Density::default(),
            speed: Speed::default(),
            twinkle: default_twinkle(),
        }
    }
}

/// Keyframe-driven particle layer counts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticlesConfig {
    /// Floating glow particles (light theme)
    #[serde(default = "default_floating_count")]
    pub floating_count: usize,

    /// Drifting cloud blobs (light theme)
    #[serde(default = "default_cloud_count")]
    pub cloud_count: usize,

    /// Energy orbs (dark theme)
    #[serde(default = "default_energy_count")]
    pub energy_count: usize,
}

fn default_floating_count() -> usize {
    30
}

fn default_cloud_count() -> usize {
    5
}

fn default_energy_count() -> usize {
    20
}

impl Default for ParticlesConfig {
    fn default() -> Self {
        Self {
            floating_count: default_floating_count(),
            cloud_count: default_cloud_count(),
            energy_count: default_energy_count(),
        }
    }
}

/// Shooting-star emitter configuration (dark theme)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShootingConfig {
    /// Minimum seconds between spawns
    #[serde(default = "default_min_interval")]
    pub min_interval: f32,

    /// Maximum seconds between spawns
    #[serde(default = "default_max_interval")]
    pub max_interval: f32,
}

fn default_min_interval() -> f32 {
    3.0
}

fn default_max_interval() -> f32 {
    8.0
}

impl Default for ShootingConfig {
    fn default() -> Self {
        Self {
            min_interval: default_min_interval(),
            max_interval: default_max_interval(),
        }
    }
}

impl ShootingConfig {
    /// Interval bounds with min <= max enforced
    pub fn interval_bounds(&self) -> (f32, f32) {
        let min = self.min_interval.max(0.1);
        let max = self.max_interval.max(min);
        (min, max)
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// Star-field settings
    #[serde(default)]
    pub starfield: StarfieldConfig,

    /// Particle layer counts
    #[serde(default)]
    pub particles: ParticlesConfig,

    /// Shooting-star emitter settings
    #[serde(default)]
    pub shooting: ShootingConfig,
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            log::info!("Config file not found, creating default at {:?}", config_path);
            Self::create_default_config()?;
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| ConfigError::ReadError(config_path.clone(), e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(config_path.clone(), e))?;

        log::info!("Loaded configuration from {:?}", config_path);
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::ReadError(path.clone(), e))?;

        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(path.clone(), e))?;

        Ok(config)
    }

    /// Get the configuration directory path (~/.aura/)
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
        Ok(home.join(CONFIG_DIR_NAME))
    }

    /// Get the configuration file path (~/.aura/config.toml)
    pub fn config_file_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Create the default configuration file and directory structure
    pub fn create_default_config() -> Result<(), ConfigError> {
        let config_dir = Self::config_dir()?;
        let config_path = Self::config_file_path()?;

        fs::create_dir_all(&config_dir)
            .map_err(|e| ConfigError::CreateDirError(config_dir.clone(), e))?;

        let default_config = Config::default();
        let toml_content =
            toml::to_string_pretty(&default_config).map_err(ConfigError::SerializeError)?;

        let content = format!(
            "# Aura backdrop configuration\n\
             #\n\
             # density: low | medium | high\n\
             # speed: slow | normal | fast\n\
             \n\
             {toml_content}"
        );

        fs::write(&config_path, content)
            .map_err(|e| ConfigError::WriteError(config_path.clone(), e))?;

        log::info!("Created default configuration at {:?}", config_path);
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug)]
pub enum ConfigError {
    /// Home directory not found
    NoHomeDirectory,
    /// Failed to read config file
    ReadError(PathBuf, std::io::Error),
    /// Failed to parse config file
    ParseError(PathBuf, toml::de::Error),
    /// Failed to serialize config
    SerializeError(toml::ser::Error),
    /// Failed to write config file
    WriteError(PathBuf, std::io::Error),
    /// Failed to create directory
    CreateDirError(PathBuf, std::io::Error),
    /// Failed to set up file watcher
    WatchError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoHomeDirectory => write!(f, "Could not determine home directory"),
            ConfigError::ReadError(path, e) => write!(f, "Failed to read {:?}: {}", path, e),
            ConfigError::ParseError(path, e) => write!(f, "Failed to parse {:?}: {}", path, e),
            ConfigError::SerializeError(e) => write!(f, "Failed to serialize config: {}", e),
            ConfigError::WriteError(path, e) => write!(f, "Failed to write {:?}: {}", path, e),
            ConfigError::CreateDirError(path, e) => write!(f, "Failed to create {:?}: {}", path, e),
            ConfigError::WatchError(e) => write!(f, "Failed to watch files: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}
