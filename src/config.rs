// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub api: ApiConfig,
    pub upload: UploadConfig,
    pub display: DisplayConfig,
    pub projection: ProjectionConfig,
    pub listing: ListingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: String,
}

/// Limits applied to a selected file before anything is sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UploadConfig {
    /// Maximum accepted size in bytes (decimal megabytes).
    pub max_file_size: u64,
    /// Required extension, compared case-sensitively and without the dot.
    pub allowed_extension: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    pub banner_timeout_ms: u64,
    pub chart_width: usize,
    #[serde(default = "default_true")]
    pub show_info_banner: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProjectionConfig {
    /// Probability at or above which a category is named in the summary.
    pub summary_threshold: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListingConfig {
    pub page_size: u32,
}

fn default_true() -> bool {
    true
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: 5 * 1000 * 1000,
            allowed_extension: "osu".to_string(),
        }
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            summary_threshold: 0.5,
        }
    }
}

impl DisplayConfig {
    pub fn banner_timeout(&self) -> Duration {
        Duration::from_millis(self.banner_timeout_ms)
    }
}

impl ApiConfig {
    pub fn predict_url(&self) -> String {
        format!("{}/predict", self.base_url.trim_end_matches('/'))
    }

    pub fn beatmaps_url(&self) -> String {
        format!("{}/beatmaps", self.base_url.trim_end_matches('/'))
    }
}

impl Config {
    /// Built-in defaults, then the TOML file, then `OSUCLASSY__*` variables.
    /// An explicit path must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_layered(path, true),
            None => Self::load_layered(Path::new(DEFAULT_CONFIG_PATH), false),
        }
    }

    fn load_layered(path: &Path, required: bool) -> Result<Self> {
        dotenv().ok();

        let defaults = config::Config::try_from(&Self::default_config())
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::from(path).required(required))
            .add_source(
                config::Environment::with_prefix("OSUCLASSY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:8000/api".to_string(),
            },
            upload: UploadConfig::default(),
            display: DisplayConfig {
                banner_timeout_ms: 5000,
                chart_width: 40,
                show_info_banner: true,
            },
            projection: ProjectionConfig::default(),
            listing: ListingConfig { page_size: 6 },
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self> {
        self.api.base_url = base_url.into();
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(PipelineError::Config(format!(
                "base_url must be an http(s) URL: {}",
                self.api.base_url
            )));
        }

        if self.upload.max_file_size == 0 {
            return Err(PipelineError::Config(
                "max_file_size must be greater than 0".to_string(),
            ));
        }

        let extension = &self.upload.allowed_extension;
        if extension.is_empty() || extension.contains('.') {
            return Err(PipelineError::Config(format!(
                "allowed_extension must be a bare extension without dots: {:?}",
                extension
            )));
        }

        if self.display.banner_timeout_ms == 0 {
            return Err(PipelineError::Config(
                "banner_timeout_ms must be greater than 0".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.projection.summary_threshold) {
            return Err(PipelineError::Config(
                "summary_threshold must be within [0, 1]".to_string(),
            ));
        }

        if self.listing.page_size == 0 {
            return Err(PipelineError::Config(
                "page_size must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.upload.max_file_size, 5_000_000);
        assert_eq!(config.upload.allowed_extension, "osu");
        assert_eq!(config.display.banner_timeout(), Duration::from_millis(5000));
    }

    #[test]
    fn test_endpoint_urls_ignore_trailing_slash() {
        let api = ApiConfig {
            base_url: "http://example.com/api/".to_string(),
        };
        assert_eq!(api.predict_url(), "http://example.com/api/predict");
        assert_eq!(api.beatmaps_url(), "http://example.com/api/beatmaps");
    }

    #[test]
    fn test_with_base_url_rejects_non_http() {
        assert!(Config::default_config().with_base_url("ftp://x").is_err());
        let config = Config::default_config()
            .with_base_url("https://osuclassy.example/api")
            .unwrap();
        assert_eq!(config.api.base_url, "https://osuclassy.example/api");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default_config();
        config.upload.allowed_extension = ".osu".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default_config();
        config.projection.summary_threshold = 1.5;
        assert!(config.validate().is_err());

        let mut config = Config::default_config();
        config.listing.page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides_apply_without_config_file() {
        let temp = TempDir::new().unwrap();
        // SAFETY: no other test reads or writes this variable.
        unsafe {
            std::env::set_var("OSUCLASSY__API__BASE_URL", "https://env.example/api");
        }

        let config = Config::load_layered(&temp.path().join("missing.toml"), false);

        unsafe {
            std::env::remove_var("OSUCLASSY__API__BASE_URL");
        }
        let config = config.unwrap();
        assert_eq!(config.api.base_url, "https://env.example/api");
        assert_eq!(config.upload.max_file_size, 5_000_000);
        assert_eq!(config.listing.page_size, 6);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        assert!(Config::load(Some(&temp.path().join("missing.toml"))).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");
        fs::write(
            &path,
            r#"
[api]
base_url = "https://osuclassy.example/api"

[upload]
max_file_size = 1000
allowed_extension = "osu"

[display]
banner_timeout_ms = 250
chart_width = 20

[projection]
summary_threshold = 0.7

[listing]
page_size = 12
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.upload.max_file_size, 1000);
        assert_eq!(config.display.banner_timeout_ms, 250);
        assert!(config.display.show_info_banner);
        assert_eq!(config.listing.page_size, 12);
    }
}
