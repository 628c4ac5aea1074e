//! Loader configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! extensions = ["png", "jpg", "jpeg", "webp", "bmp", "tiff"]
//! blank_mask_size = 64
//! ```

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Extensions accepted when scanning directories.
pub const DEFAULT_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "webp", "bmp", "tiff"];

/// Side length of the mask emitted for images without alpha.
pub const DEFAULT_BLANK_MASK_SIZE: usize = 64;

/// Settings for directory scanning and decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Accepted file extensions, without the leading dot. Matched case-insensitively.
    pub extensions: Vec<String>,
    /// Side length of the zero mask used when the image has no alpha channel.
    pub blank_mask_size: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            blank_mask_size: DEFAULT_BLANK_MASK_SIZE,
        }
    }
}

impl LoaderConfig {
    /// Parse a config from a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let mut config: LoaderConfig = toml::from_str(source)?;
        config.normalize()?;
        Ok(config)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Whether `file_name` ends with one of the accepted extensions.
    pub fn accepts(&self, file_name: &str) -> bool {
        let lower = file_name.to_lowercase();
        self.extensions
            .iter()
            .any(|ext| lower.ends_with(&format!(".{}", ext)))
    }

    fn normalize(&mut self) -> Result<(), ConfigError> {
        if self.blank_mask_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "blank_mask_size".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        self.extensions = self
            .extensions
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();

        if self.extensions.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "extensions".to_string(),
                reason: "at least one extension is required".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoaderConfig::default();
        assert_eq!(config.blank_mask_size, 64);
        assert_eq!(config.extensions.len(), 6);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = LoaderConfig::from_toml_str("").unwrap();
        assert_eq!(config, LoaderConfig::default());
    }

    #[test]
    fn test_toml_overrides_and_normalizes() {
        let config = LoaderConfig::from_toml_str(
            "extensions = [\".PNG\", \" gif \"]\nblank_mask_size = 32\n",
        )
        .unwrap();
        assert_eq!(config.extensions, vec!["png", "gif"]);
        assert_eq!(config.blank_mask_size, 32);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            LoaderConfig::from_toml_str("blank_mask_size = 0"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            LoaderConfig::from_toml_str("extensions = []"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            LoaderConfig::from_toml_str("blank_mask_size = \"big\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_accepts_is_case_insensitive() {
        let config = LoaderConfig::default();
        assert!(config.accepts("photo.JPG"));
        assert!(config.accepts("scan.tiff"));
        assert!(config.accepts("archive.tar.png"));
        assert!(!config.accepts("scan.tif"));
        assert!(!config.accepts("notes.txt"));
        assert!(!config.accepts("png"));
        assert!(!config.accepts("imagepng"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = LoaderConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
