//! Configuration loader
//!
//! Loads a YAML [`DeckConfig`] and merges its option overrides over the
//! viewport defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use swipe_core::{OptionsOverrides, SwiperOptions, Viewport};
use tracing::{info, warn};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SWIPE_DECK_CONFIG";

/// Config file looked up relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/swiper.yaml";

/// Default frame clock for the animation task.
pub const DEFAULT_FRAME_RATE: u32 = 60;

/// Deck configuration as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeckConfig {
    pub viewport: Viewport,
    /// Frames per second for the animation task.
    pub frame_rate: Option<u32>,
    pub options: OptionsOverrides,
}

impl DeckConfig {
    /// Overrides merged over the defaults for this viewport, validated.
    pub fn swiper_options(&self) -> Result<SwiperOptions> {
        let options = self.options.apply(SwiperOptions::for_viewport(self.viewport));
        options.validate().context("Invalid swiper options")?;
        Ok(options)
    }

    /// Time between animation frames.
    pub fn frame_interval(&self) -> Duration {
        let rate = self.frame_rate.unwrap_or(DEFAULT_FRAME_RATE).max(1);
        Duration::from_secs_f64(1.0 / f64::from(rate))
    }
}

pub struct ConfigLoader {
    path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Loader for an explicit file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Loader that always yields defaults.
    pub fn defaults() -> Self {
        Self { path: None }
    }

    /// Resolve the config file.
    ///
    /// Path resolution order:
    /// 1. SWIPE_DECK_CONFIG environment variable
    /// 2. config/swiper.yaml relative to the working directory
    /// 3. no file (defaults)
    pub fn from_env() -> Self {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::new(path);
        }

        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            return Self::new(DEFAULT_CONFIG_PATH);
        }

        Self::defaults()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Load the config, or defaults when no file is configured.
    pub fn load(&self) -> Result<DeckConfig> {
        let Some(path) = &self.path else {
            warn!("No swiper config found, using defaults");
            return Ok(DeckConfig::default());
        };
        info!("Loading swiper configuration from {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: DeckConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        // surface bad values at load time rather than at deck construction
        config
            .swiper_options()
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use swipe_input::SwipeDirection;

    fn write_config(yaml: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_overrides() {
        let file = write_config(
            r#"
viewport:
  width: 300.0
  height: 600.0
frame_rate: 120
options:
  disabled:
    top: true
  springs:
    right:
      stiffness: 120.0
"#,
        );

        let config = ConfigLoader::new(file.path()).load().unwrap();
        let options = config.swiper_options().unwrap();

        assert_eq!(config.viewport, Viewport::new(300.0, 600.0));
        assert_eq!(config.frame_interval(), Duration::from_secs_f64(1.0 / 120.0));
        assert!(options.disabled.contains(SwipeDirection::Top));
        assert!(!options.disabled.contains(SwipeDirection::Left));
        assert_eq!(options.springs.right.stiffness, 120.0);
        assert_eq!(options.springs.right.damping, 20.0);
        assert_eq!(options.translate_x_range, [-100.0, 0.0, 100.0]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = ConfigLoader::new("/nonexistent/swiper.yaml").load().unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let file = write_config("viewport: {width: 1.0, height: 1.0}\nswipe_speed: 3\n");
        let err = ConfigLoader::new(file.path()).load().unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn invalid_springs_are_rejected() {
        let file = write_config("options:\n  springs:\n    back_x:\n      mass: 0.0\n");
        let err = ConfigLoader::new(file.path()).load().unwrap_err();
        assert!(err.to_string().contains("Invalid configuration"));
    }

    #[test]
    fn defaults_without_file() {
        let config = ConfigLoader::defaults().load().unwrap();
        assert_eq!(config, DeckConfig::default());
        assert_eq!(config.frame_interval(), Duration::from_secs_f64(1.0 / 60.0));
    }
}
