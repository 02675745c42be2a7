//! Configuration management for fastfile

use crate::error::{Error, Result};
use crate::simd::{Checksum, Engine};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default file-size threshold below which buffered reads are preferred
/// over memory mapping (64KB)
pub const DEFAULT_MMAP_THRESHOLD: u64 = 64 * 1024;

/// Which checksum engine to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineChoice {
    /// Pick the fastest engine the CPU supports
    #[default]
    Auto,

    /// Force the portable scalar engine
    Scalar,
}

/// Main configuration struct
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File size threshold for memory mapping (bytes); smaller files are
    /// read with ordinary buffered I/O
    pub mmap_threshold: u64,

    /// Checksum engine selection
    pub checksum_engine: EngineChoice,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mmap_threshold: DEFAULT_MMAP_THRESHOLD,
            checksum_engine: EngineChoice::Auto,
        }
    }
}

impl Config {
    /// Load configuration from the default config file, falling back to
    /// defaults if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::io("reading config", e))?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to the default config file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::io("creating config dir", e))?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("serializing config: {}", e)))?;
        std::fs::write(path, contents).map_err(|e| Error::io("writing config", e))?;
        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("fastfile").join("config.toml"))
            .ok_or_else(|| Error::config("could not determine config directory"))
    }

    /// Resolve the checksum engine choice into a concrete accumulator.
    /// Called once at startup; the result is passed down to call sites.
    pub fn checksum(&self) -> Checksum {
        match self.checksum_engine {
            EngineChoice::Auto => Checksum::detect(),
            EngineChoice::Scalar => Checksum::new(Engine::Scalar),
        }
    }

    /// Whether a file of `file_size` bytes should be memory-mapped rather
    /// than read with buffered I/O
    pub fn should_mmap(&self, file_size: u64) -> bool {
        file_size >= self.mmap_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.mmap_threshold, DEFAULT_MMAP_THRESHOLD);
        assert_eq!(config.checksum_engine, EngineChoice::Auto);
    }

    #[test]
    fn test_should_mmap_threshold() {
        let config = Config::default();
        assert!(!config.should_mmap(0));
        assert!(!config.should_mmap(DEFAULT_MMAP_THRESHOLD - 1));
        assert!(config.should_mmap(DEFAULT_MMAP_THRESHOLD));
        assert!(config.should_mmap(1 << 30));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.mmap_threshold = 123;
        config.checksum_engine = EngineChoice::Scalar;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.mmap_threshold, 123);
        assert_eq!(loaded.checksum_engine, EngineChoice::Scalar);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "mmap_threshold = 4096\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.mmap_threshold, 4096);
        assert_eq!(loaded.checksum_engine, EngineChoice::Auto);
    }

    #[test]
    fn test_scalar_choice_resolves_to_scalar_engine() {
        let mut config = Config::default();
        config.checksum_engine = EngineChoice::Scalar;
        assert_eq!(config.checksum().engine(), crate::simd::Engine::Scalar);
    }
}
