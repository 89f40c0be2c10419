//! Configuration loading with defaults

use std::path::Path;

use crate::errors::{FieldError, Result};
use crate::fs;
use crate::schemas::Config;

/// Load configuration from the data directory, falling back to defaults.
///
/// If config.json exists, it is read and missing fields take their
/// defaults. If it doesn't exist, the default configuration is returned.
pub fn load_config(data_dir: &Path) -> Result<Config> {
    let config = fs::read_config(data_dir)
        .map_err(|e| FieldError::ConfigError(e.to_string()))?;

    if config.storage_key.trim().is_empty() {
        return Err(FieldError::ConfigError("storage_key must not be empty".to_string()));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_defaults() {
        let temp = TempDir::new().unwrap();

        let config = load_config(temp.path()).unwrap();
        assert_eq!(config.storage_key, "currentOrder");
        assert_eq!(config.max_photos_per_stage, 5);
    }

    #[test]
    fn test_load_config_from_file() {
        let temp = TempDir::new().unwrap();
        let config_content = r#"{
            "storage_key": "activeOrder",
            "max_photos_per_stage": 3
        }"#;
        std_fs::write(temp.path().join("config.json"), config_content).unwrap();

        let config = load_config(temp.path()).unwrap();
        assert_eq!(config.storage_key, "activeOrder");
        assert_eq!(config.max_photos_per_stage, 3);
        // Default for unspecified field
        assert_eq!(config.currency, "₽");
    }

    #[test]
    fn test_load_config_rejects_blank_key() {
        let temp = TempDir::new().unwrap();
        std_fs::write(temp.path().join("config.json"), r#"{"storage_key": "  "}"#).unwrap();

        let err = load_config(temp.path()).unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_load_config_invalid_json() {
        let temp = TempDir::new().unwrap();
        std_fs::write(temp.path().join("config.json"), "{ nope").unwrap();

        assert!(load_config(temp.path()).is_err());
    }
}
