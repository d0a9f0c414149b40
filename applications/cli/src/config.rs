/// Command line configuration
use anyhow::{Context, Result};
use cadence_catalog::CatalogConfig;
use cadence_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file, read when present
pub const DEFAULT_CONFIG_FILE: &str = "cadence.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub playback: PlaybackConfig,
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `cadence.toml` is used when
    /// present. Environment variables override the file, e.g.
    /// `CADENCE_CATALOG__API_URL` or `CADENCE_PLAYBACK__VOLUME`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Configuration file {} not found", path.display());
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Keys contain underscores, so sections are split on a double one
        settings = settings.add_source(
            config::Environment::with_prefix("CADENCE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .context("Failed to read configuration")?;
        let config: Self = config
            .try_deserialize()
            .context("Invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let volume = self.playback.volume;
        if !(0.0..=1.0).contains(&volume) {
            anyhow::bail!("playback.volume must be between 0.0 and 1.0, got {volume}");
        }
        if self.catalog.timeout_secs == 0 {
            anyhow::bail!("catalog.timeout_secs must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(CliConfig::default().validate().is_ok());
    }

    #[test]
    fn volume_out_of_range_is_rejected() {
        let mut config = CliConfig::default();
        config.playback.volume = 1.5;
        assert!(config.validate().is_err());
    }
}
