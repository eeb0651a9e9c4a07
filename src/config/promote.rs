use serde::{Deserialize, Serialize};

/// Options controlling the artifact promotion stage (`[promote]` section).
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)] // Use default for missing fields
pub struct PromoteOptions {
    /// Pushes the packaged helm chart after all repositories are released
    pub helm_push: bool,
    /// Advances the project to the next development version and opens a
    /// pull request for it on the `release-v<version>` branch
    pub update_next_development_version: bool,
    /// Extra arguments passed to the version bump command
    pub update_next_development_version_arguments: String,
}
