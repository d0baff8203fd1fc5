//! Configuration management for the Crest CLI.

pub mod paths;
pub mod settings;

pub use paths::config_file;
pub use settings::CrestConfig;

use std::path::Path;

use crate::error::Result;

/// Load configuration from the default config file.
///
/// If the config file doesn't exist, returns default configuration.
pub fn load_config() -> Result<CrestConfig> {
    let path = config_file()?;
    load_config_from(&path)
}

/// Load configuration from a specific path.
///
/// If the file doesn't exist, returns default configuration.
pub fn load_config_from(path: &Path) -> Result<CrestConfig> {
    if !path.exists() {
        return Ok(CrestConfig::default().with_env_overrides());
    }

    let contents = std::fs::read_to_string(path)?;
    let config: CrestConfig = toml::from_str(&contents)?;

    Ok(config.with_env_overrides())
}

/// Save configuration to the default config file.
pub fn save_config(config: &CrestConfig) -> Result<()> {
    let path = config_file()?;
    save_config_to(config, &path)
}

/// Save configuration to a specific path.
pub fn save_config_to(config: &CrestConfig, path: &Path) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = load_config_from(&path).unwrap();

        assert_eq!(config.server.port, 443);
    }

    #[test]
    fn config_roundtrips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = CrestConfig::default();
        config.server.host = "crest.internal".to_string();
        config.server.port = 8181;
        save_config_to(&config, &path).unwrap();

        let restored = load_config_from(&path).unwrap();
        assert_eq!(restored.server.host, "crest.internal");
        assert_eq!(restored.server.port, 8181);
    }

    #[test]
    fn malformed_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not = [valid").unwrap();

        let err = load_config_from(&path).unwrap_err();

        assert!(matches!(err, crate::error::CrestError::ConfigRead(_)));
    }
}
