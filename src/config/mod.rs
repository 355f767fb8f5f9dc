//! Static configuration: target identity, module names, and field offsets
//!
//! The offset table describes where fields live inside the target's data
//! structures. The accessor treats these purely as address arithmetic inputs
//! and assigns them no semantics; all interpretation happens in the scanner.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("configuration file not found: {0}")]
    FileNotFound(String),
}

/// Byte offsets into the target's data structures.
///
/// `client_state` and `local_player`/`entity_list` are offsets from the
/// engine and client module bases; the remaining fields are offsets within
/// one entity record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Offsets {
    /// Engine-module offset of the client-state pointer
    pub client_state: u32,
    /// Offset of the in-game flag inside the client-state structure
    pub client_state_in_game: u32,
    /// Client-module offset of the local player pointer
    pub local_player: u32,
    /// Client-module offset of the entity pointer table
    pub entity_list: u32,
    /// Byte stride between entity table slots
    pub entity_stride: u32,
    /// Entity-record offset of the team number
    pub team: u32,
    /// Entity-record offset of the health value
    pub health: u32,
    /// Entity-record offset of the position vector (3 x f32)
    pub origin: u32,
    /// Entity-record offset of the flag field the scanner sets
    pub spotted: u32,
    /// Number of entity table slots to walk, not counting slot zero
    pub max_entities: u32,
}

impl Default for Offsets {
    fn default() -> Self {
        Offsets {
            client_state: 0x0058_9DC4,
            client_state_in_game: 0x108,
            local_player: 0x00D3_FC5C,
            entity_list: 0x04D5_23F4,
            entity_stride: 0x10,
            team: 0xF4,
            health: 0x100,
            origin: 0x138,
            spotted: 0x93D,
            max_entities: 64,
        }
    }
}

/// Scanner configuration: target identity plus the offset table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SonarConfig {
    /// Executable file name to attach to (exact, case-sensitive)
    pub process_name: String,
    /// Optional window title for attach-by-title (exact match)
    pub window_title: Option<String>,
    /// Base file name of the module holding entity data
    pub client_module: String,
    /// Base file name of the module holding connection state
    pub engine_module: String,
    pub offsets: Offsets,
}

impl Default for SonarConfig {
    fn default() -> Self {
        SonarConfig {
            process_name: "csgo.exe".to_string(),
            window_title: None,
            client_module: "client_panorama.dll".to_string(),
            engine_module: "engine.dll".to_string(),
            offsets: Offsets::default(),
        }
    }
}

impl SonarConfig {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Loads configuration, falling back to the builtin table if the file is
    /// missing or malformed.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_offsets() {
        let offsets = Offsets::default();
        assert_eq!(offsets.entity_stride, 0x10);
        assert_eq!(offsets.max_entities, 64);
        assert!(offsets.entity_list > 0);
    }

    #[test]
    fn test_default_config() {
        let config = SonarConfig::default();
        assert_eq!(config.process_name, "csgo.exe");
        assert_eq!(config.engine_module, "engine.dll");
        assert!(config.window_title.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SonarConfig::from_toml_str(
            r#"
            process_name = "other.exe"

            [offsets]
            max_entities = 32
            "#,
        )
        .unwrap();

        assert_eq!(config.process_name, "other.exe");
        assert_eq!(config.offsets.max_entities, 32);
        // Untouched fields come from the builtin table
        assert_eq!(config.offsets.entity_stride, 0x10);
        assert_eq!(config.client_module, "client_panorama.dll");
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            SonarConfig::from_toml_str("process_name = ["),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = SonarConfig::load("definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }
}
