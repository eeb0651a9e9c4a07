//! Configuration loading and parsing for `stagehand.toml` files.
//!
//! Every section is optional and falls back to its defaults, so an empty (or
//! missing) file is a valid configuration. CLI flags are applied on top of
//! the loaded values before the [`release::ReleaseConfig`] is validated.
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

use crate::{Result, error::StagehandError};

pub mod promote;
pub mod release;
pub mod services;
pub mod site;

use promote::PromoteOptions;
use release::ReleaseSettings;
use services::{
    CommandsConfig, GithubConfig, NexusConfig, PollingConfig, ShellConfig,
};
use site::SiteConfig;

/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "stagehand.toml";

/// Root configuration structure for `stagehand.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Release run settings.
    pub release: ReleaseSettings,
    /// Artifact promotion options.
    pub promote: PromoteOptions,
    /// Maven site deployment.
    pub site: SiteConfig,
    /// GitHub repository for release pull requests.
    pub github: GithubConfig,
    /// Nexus staging repository manager.
    pub nexus: NexusConfig,
    /// Polling of long running stages.
    pub polling: PollingConfig,
    /// Overridable command lines.
    pub commands: CommandsConfig,
    /// Shell execution.
    pub shell: ShellConfig,
}

impl Config {
    /// Parses configuration from TOML content.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.polling.validate()?;
        Ok(config)
    }

    /// Validates the `[release]` and `[promote]` sections into a
    /// [`release::ReleaseConfig`].
    pub fn release_config(&self) -> Result<release::ReleaseConfig> {
        self.release
            .clone()
            .into_release_config(self.promote.clone())
    }

    /// Loads configuration from `path`, or from [`DEFAULT_CONFIG_FILE`] in
    /// the working directory when no path is given. An explicitly requested
    /// file must exist; a missing default file yields the defaults.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let (file, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Path::new(DEFAULT_CONFIG_FILE).to_path_buf(), false),
        };

        if !file.exists() {
            if explicit {
                return Err(StagehandError::invalid_config(format!(
                    "configuration file not found: {}",
                    file.display()
                )));
            }
            log::info!("configuration file not found: using defaults");
            return Ok(Self::default());
        }

        log::debug!("loading configuration from {}", file.display());
        let content = fs::read_to_string(&file).await?;
        Self::parse(&content)
    }
}
