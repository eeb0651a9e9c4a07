//! Connection and behaviour settings for the collaborating services.
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{Result, error::StagehandError};

/// Default base branch release pull requests target.
pub const DEFAULT_BASE_BRANCH: &str = "master";
/// Default Nexus server id used by the staging plugin.
pub const DEFAULT_NEXUS_SERVER_ID: &str = "oss-sonatype-staging";
/// Default Nexus base URL.
pub const DEFAULT_NEXUS_URL: &str = "https://oss.sonatype.org";
/// Default nexus-staging-maven-plugin version.
pub const DEFAULT_STAGING_PLUGIN_VERSION: &str = "1.6.8";
/// Default command used to publish the helm chart.
pub const DEFAULT_HELM_PUSH_COMMAND: &str =
    "mvn -B io.fabric8:fabric8-maven-plugin:helm-push";
/// Default command used to build and publish the maven site.
pub const DEFAULT_SITE_DEPLOY_COMMAND: &str = "mvn -B site site:deploy";

/// GitHub repository used for release pull requests (`[github]` section).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    /// Repository URL (https://github.com/owner/repo)
    pub repo: String,
    /// Access token. Falls back to the GITHUB_TOKEN env var.
    pub token: Option<SecretString>,
    /// Branch the release pull request is opened against
    pub base_branch: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            repo: String::new(),
            token: None,
            base_branch: DEFAULT_BASE_BRANCH.into(),
        }
    }
}

/// Nexus staging settings (`[nexus]` section).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NexusConfig {
    pub server_id: String,
    pub url: String,
    pub plugin_version: String,
    /// Description attached to the released staging repository
    pub description: String,
    pub staging_progress_timeout_minutes: u32,
}

impl Default for NexusConfig {
    fn default() -> Self {
        Self {
            server_id: DEFAULT_NEXUS_SERVER_ID.into(),
            url: DEFAULT_NEXUS_URL.into(),
            plugin_version: DEFAULT_STAGING_PLUGIN_VERSION.into(),
            description: "Next release is ready".into(),
            staging_progress_timeout_minutes: 60,
        }
    }
}

/// Polling intervals and deadlines for the long running stages
/// (`[polling]` section).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PollingConfig {
    pub interval_secs: u64,
    pub pull_request_timeout_secs: u64,
    pub artifact_sync_timeout_secs: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: 30,
            pull_request_timeout_secs: 7200,
            artifact_sync_timeout_secs: 7200,
        }
    }
}

impl PollingConfig {
    /// Rejects a zero interval, which would poll remote services in a tight
    /// loop.
    pub fn validate(&self) -> Result<()> {
        if self.interval_secs == 0 {
            return Err(StagehandError::invalid_config(
                "polling.interval_secs must be at least 1",
            ));
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn pull_request_timeout(&self) -> Duration {
        Duration::from_secs(self.pull_request_timeout_secs)
    }

    pub fn artifact_sync_timeout(&self) -> Duration {
        Duration::from_secs(self.artifact_sync_timeout_secs)
    }
}

/// Overridable shell command lines (`[commands]` section).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CommandsConfig {
    pub helm_push: String,
    pub site_deploy: String,
    /// Command lines run in the build container before the next development
    /// version is committed and pushed, e.g. `chmod 600 /root/.ssh-git/ssh-key`
    pub git_credentials_setup: Vec<String>,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            helm_push: DEFAULT_HELM_PUSH_COMMAND.into(),
            site_deploy: DEFAULT_SITE_DEPLOY_COMMAND.into(),
            git_credentials_setup: vec![],
        }
    }
}

/// Shell execution settings (`[shell]` section).
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ShellConfig {
    /// Runs container scoped commands through `docker exec <container>`
    pub exec_in_container: bool,
}
