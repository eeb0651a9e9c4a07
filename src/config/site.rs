use serde::{Deserialize, Serialize};

/// Default name of the service that hosts generated project sites.
pub const DEFAULT_CONTENT_REPOSITORY_SERVICE: &str = "content-repository";

/// Site deployment configuration (`[site]` section).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)] // Use default for missing fields
pub struct SiteConfig {
    /// Name of the content repository service to look up before deploying
    pub service_name: String,
    /// Whether the maven site should be deployed at all
    pub use_content_repository: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_CONTENT_REPOSITORY_SERVICE.into(),
            use_content_repository: true,
        }
    }
}
