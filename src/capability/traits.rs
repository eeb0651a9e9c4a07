//! One trait per external collaborator.
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{
    Result,
    capability::types::{
        CommandOutput, CreatePullRequest, PromoteImagesArgs,
        PullRequestHandle, ShellCommand, TagImagesArgs, WaitForMergeArgs,
        WaitForSyncArgs,
    },
};

/// Runs external commands. A non-zero exit status is an error.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, cmd: &ShellCommand) -> Result<CommandOutput>;
}

/// Answers whether a named service exists in the current environment.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ServiceDiscovery: Send + Sync {
    async fn has_service(&self, name: &str) -> Result<bool>;
}

/// Releases a staged repository on the repository manager. Releasing the
/// same repository twice must fail.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StagingRepository: Send + Sync {
    async fn release(&self, repo_id: &str, container: &str) -> Result<()>;
}

/// Pushes the packaged chart of the project.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ChartPublisher: Send + Sync {
    async fn push_chart(&self, container: &str) -> Result<()>;
}

/// Moves the project to its next development version on the
/// `release-v<version>` branch.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait VersionBumper: Send + Sync {
    async fn update_next_development_version(
        &self,
        release_version: &str,
        extra_args: &str,
        container: &str,
    ) -> Result<()>;
}

/// Opens pull requests.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PullRequestCreator: Send + Sync {
    async fn create_pull_request(
        &self,
        req: CreatePullRequest,
    ) -> Result<PullRequestHandle>;
}

/// Copies released images from an organisation to another registry.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ImagePromoter: Send + Sync {
    async fn promote_images(&self, args: &PromoteImagesArgs) -> Result<()>;
}

/// Tags images with the release version.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ImageTagger: Send + Sync {
    async fn tag_images(&self, args: &TagImagesArgs) -> Result<()>;
}

/// Blocks until a pull request is merged, failing on close or timeout.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PullRequestWatcher: Send + Sync {
    async fn wait_until_merged(&self, args: &WaitForMergeArgs) -> Result<()>;
}

/// Blocks until an artifact is visible in the target repository.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ArtifactSyncWatcher: Send + Sync {
    async fn wait_until_synced(&self, args: &WaitForSyncArgs) -> Result<()>;
}

/// Builds and publishes the project site.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SiteDeployer: Send + Sync {
    async fn deploy_site(&self) -> Result<()>;
}
