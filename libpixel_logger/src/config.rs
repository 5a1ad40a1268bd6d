use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::error::{ConfigError, ProviderError};
use super::frame::FrameSource;
use super::source::{ReplaySource, SimulatedSource, DEFAULT_NUM_PIXELS};

/// Where frames come from during a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    /// Synthetic frames, no hardware needed
    Simulated { num_pixels: usize },
    /// Frames replayed from a capture file
    Replay { path: PathBuf },
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::Simulated {
            num_pixels: DEFAULT_NUM_PIXELS,
        }
    }
}

impl SourceConfig {
    /// Open the configured frame source
    pub fn open(&self) -> Result<Box<dyn FrameSource>, ProviderError> {
        match self {
            Self::Simulated { num_pixels } => Ok(Box::new(SimulatedSource::new(*num_pixels))),
            Self::Replay { path } => {
                let source = ReplaySource::new(path)?;
                log::info!("Replaying frames from {}", source.path().to_string_lossy());
                Ok(Box::new(source))
            }
        }
    }
}

/// Structure representing the application configuration. Contains pathing and session information
/// Configs are seralizable and deserializable to YAML using serde and serde_yaml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub map_path: PathBuf,
    pub datalog_path: PathBuf,
    pub num_frames: usize,
    pub source: SourceConfig,
}

impl Default for Config {
    /// The settings used when the application is run without a config file
    fn default() -> Self {
        Self {
            map_path: PathBuf::from("1002-19_map.txt"),
            datalog_path: PathBuf::from("datalog.txt"),
            num_frames: 3,
            source: SourceConfig::default(),
        }
    }
}

impl Config {
    /// Read the configuration in a YAML file
    /// Returns a Config if successful
    pub fn read_config_file(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            return Err(ConfigError::BadFilePath(config_path.to_path_buf()));
        }

        let yaml_str = std::fs::read_to_string(config_path)?;

        Ok(serde_yaml::from_str::<Self>(&yaml_str)?)
    }

    /// Write the configuration to a YAML file
    pub fn write_config_file(&self, config_path: &Path) -> Result<(), ConfigError> {
        let yaml_str = serde_yaml::to_string(self)?;
        std::fs::write(config_path, yaml_str)?;
        Ok(())
    }

    pub fn is_num_frames_valid(&self) -> bool {
        self.num_frames >= 1
    }

    /// Check the config before a session is started
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.is_num_frames_valid() {
            return Err(ConfigError::BadFrameCount(self.num_frames));
        }
        Ok(())
    }
}
