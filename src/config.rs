//! Simulation configuration
//!
//! Loaded from TOML. Every field has a default, so a file only needs the
//! values it overrides:
//!
//! ```toml
//! [level]
//! width = 128
//! height = 64
//! depth = 128
//!
//! [entity]
//! foot_size = 0.5
//! ```

use crate::constants::{entity, level};
use crate::error::{EngineError, EngineResult};
use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LevelConfig {
    pub width: i32,
    pub height: i32,
    pub depth: i32,
    /// Cells beside and below the level collide like bedrock
    pub solid_world_border: bool,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            width: level::DEFAULT_DIMENSION,
            height: level::DEFAULT_DIMENSION,
            depth: level::DEFAULT_DIMENSION,
            solid_world_border: true,
        }
    }
}

/// Defaults applied to newly created entities
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct EntityConfig {
    pub width: f32,
    pub height: f32,
    pub foot_size: f32,
    pub height_offset: f32,
    pub slide: bool,
    pub make_step_sound: bool,
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            width: entity::DEFAULT_WIDTH,
            height: entity::DEFAULT_HEIGHT,
            foot_size: 0.0,
            height_offset: 0.0,
            slide: true,
            make_step_sound: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct MirrorConfig {
    /// Create a GPU mirror of the octree when the level is built
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    pub level: LevelConfig,
    pub entity: EntityConfig,
    pub mirror: MirrorConfig,
}

impl SimConfig {
    /// Parse a config from TOML text
    pub fn from_toml_str(text: &str) -> EngineResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a config file
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| EngineError::IoError {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        let config = Self::from_toml_str(&text)?;
        log::info!("[SimConfig] Loaded {}", path.display());
        Ok(config)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        let dims = [
            ("level.width", self.level.width),
            ("level.height", self.level.height),
            ("level.depth", self.level.depth),
        ];
        for (field, value) in dims {
            if !(1..=level::MAX_DIMENSION).contains(&value) {
                log::warn!("[SimConfig] Rejected {} = {}", field, value);
                return Err(anyhow::anyhow!(
                    "SimConfig: {} = {} must be between 1 and {}",
                    field,
                    value,
                    level::MAX_DIMENSION
                ));
            }
        }

        if !(self.entity.width > 0.0 && self.entity.height > 0.0) {
            log::warn!(
                "[SimConfig] Rejected entity size {}x{}",
                self.entity.width,
                self.entity.height
            );
            return Err(anyhow::anyhow!(
                "SimConfig: entity size {}x{} must be positive",
                self.entity.width,
                self.entity.height
            ));
        }

        if !(self.entity.foot_size >= 0.0) {
            log::warn!("[SimConfig] Rejected entity.foot_size = {}", self.entity.foot_size);
            return Err(anyhow::anyhow!(
                "SimConfig: entity.foot_size {} cannot be negative",
                self.entity.foot_size
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.level.width, 64);
        assert!(config.entity.slide);
        assert!(!config.mirror.enabled);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SimConfig::from_toml_str(
            r#"
            [level]
            width = 16
            solid_world_border = false

            [entity]
            foot_size = 0.5
            "#,
        )
        .expect("valid toml");

        assert_eq!(config.level.width, 16);
        assert_eq!(config.level.height, 64);
        assert!(!config.level.solid_world_border);
        assert_eq!(config.entity.foot_size, 0.5);
        assert_eq!(config.entity.height, 1.8);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[mirror]\nenabled = true\n[level]\ndepth = 8").expect("write");

        let config = SimConfig::load(file.path()).expect("load");
        assert!(config.mirror.enabled);
        assert_eq!(config.level.depth, 8);
    }

    #[test]
    fn test_load_reports_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let result = SimConfig::load(dir.path().join("missing.toml"));
        assert!(matches!(
            result,
            Err(crate::error::EngineError::IoError { .. })
        ));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let result = SimConfig::from_toml_str("[level]\nwidth = \"wide\"");
        assert!(matches!(
            result,
            Err(crate::error::EngineError::ParseError { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut config = SimConfig::default();
        config.level.height = 0;
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.level.width = 2048;
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.entity.foot_size = -0.1;
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.entity.width = 0.0;
        assert!(config.validate().is_err());
    }
}
