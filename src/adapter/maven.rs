//! Maven backed collaborators: Nexus staging release, next development
//! version bump, helm chart push and site deploy.
use async_trait::async_trait;
use log::*;
use std::sync::Arc;

use crate::{
    Result,
    capability::{
        traits::{
            ChartPublisher, CommandRunner, SiteDeployer, StagingRepository,
            VersionBumper,
        },
        types::ShellCommand,
    },
    config::{release::is_blank, services::NexusConfig},
    error::StagehandError,
    orchestrator::promote::release_branch,
};

/// Computes the snapshot version that follows `release`.
///
/// Semantic versions bump the patch number (`1.2.3` becomes
/// `1.2.4-SNAPSHOT`). Anything else has its last numeric dot segment
/// incremented (`1.2` becomes `1.3-SNAPSHOT`).
pub fn next_development_version(release: &str) -> Result<String> {
    let release = release.trim();

    if let Ok(version) = semver::Version::parse(release) {
        let patch = version
            .patch
            .checked_add(1)
            .ok_or_else(|| StagehandError::InvalidVersion(release.to_string()))?;
        return Ok(format!(
            "{}.{}.{patch}-SNAPSHOT",
            version.major, version.minor
        ));
    }

    let (head, last) = match release.rsplit_once('.') {
        Some((head, last)) => (Some(head), last),
        None => (None, release),
    };

    let next = last
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_add(1))
        .ok_or_else(|| StagehandError::InvalidVersion(release.to_string()))?;

    Ok(match head {
        Some(head) => format!("{head}.{next}-SNAPSHOT"),
        None => format!("{next}-SNAPSHOT"),
    })
}

/// Releases staged repositories with the nexus-staging-maven-plugin.
pub struct MavenStaging {
    runner: Arc<dyn CommandRunner>,
    nexus: NexusConfig,
}

impl MavenStaging {
    pub fn new(runner: Arc<dyn CommandRunner>, nexus: NexusConfig) -> Self {
        Self { runner, nexus }
    }

    pub fn release_command(&self, repo_id: &str, container: &str) -> ShellCommand {
        ShellCommand::new("mvn")
            .arg(format!(
                "org.sonatype.plugins:nexus-staging-maven-plugin:{}:rc-release",
                self.nexus.plugin_version
            ))
            .arg(format!("-DserverId={}", self.nexus.server_id))
            .arg(format!("-DnexusUrl={}", self.nexus.url))
            .arg(format!("-DstagingRepositoryId={repo_id}"))
            .arg(format!("-Ddescription={}", self.nexus.description))
            .arg(format!(
                "-DstagingProgressTimeoutMinutes={}",
                self.nexus.staging_progress_timeout_minutes
            ))
            .in_container(container)
    }
}

#[async_trait]
impl StagingRepository for MavenStaging {
    async fn release(&self, repo_id: &str, container: &str) -> Result<()> {
        let cmd = self.release_command(repo_id, container);

        self.runner.run(&cmd).await.map_err(|err| {
            let reason = match err {
                StagehandError::CommandFailed { stderr, .. }
                    if !is_blank(&stderr) =>
                {
                    stderr.trim().to_string()
                }
                other => other.to_string(),
            };
            StagehandError::StagingRelease {
                repo_id: repo_id.to_string(),
                reason,
            }
        })?;

        info!("released staging repository {repo_id}");

        Ok(())
    }
}

/// Moves the project to its next snapshot version on a release branch and
/// pushes the branch. `setup` command lines (e.g. fixing permissions of a
/// mounted ssh key) run first, in the same container.
pub struct MavenVersionBumper {
    runner: Arc<dyn CommandRunner>,
    setup: Vec<String>,
}

impl MavenVersionBumper {
    pub fn new(runner: Arc<dyn CommandRunner>, setup: Vec<String>) -> Self {
        Self { runner, setup }
    }

    pub fn commands(
        &self,
        release_version: &str,
        extra_args: &str,
        container: &str,
    ) -> Result<Vec<ShellCommand>> {
        let next = next_development_version(release_version)?;
        let branch = release_branch(release_version);

        // extra args are a user supplied command line fragment
        let mut versions_set = format!(
            "mvn -B -U versions:set -DnewVersion={next} -DgenerateBackupPoms=false"
        );
        if !is_blank(extra_args) {
            versions_set.push(' ');
            versions_set.push_str(extra_args.trim());
        }

        let mut commands: Vec<ShellCommand> = self
            .setup
            .iter()
            .filter(|line| !is_blank(line))
            .map(|line| ShellCommand::shell(line.as_str()).in_container(container))
            .collect();

        commands.extend([
            ShellCommand::new("git")
                .args(["checkout", "-b", branch.as_str()])
                .in_container(container),
            ShellCommand::shell(versions_set).in_container(container),
            ShellCommand::new("git")
                .args(["commit", "-a", "-m"])
                .arg(format!(
                    "[CD] prepare for next development iteration {next}"
                ))
                .in_container(container),
            ShellCommand::new("git")
                .args(["push", "origin", branch.as_str()])
                .in_container(container),
        ]);

        Ok(commands)
    }
}

#[async_trait]
impl VersionBumper for MavenVersionBumper {
    async fn update_next_development_version(
        &self,
        release_version: &str,
        extra_args: &str,
        container: &str,
    ) -> Result<()> {
        let commands = self.commands(release_version, extra_args, container)?;

        for cmd in commands.iter() {
            self.runner.run(cmd).await?;
        }

        info!(
            "pushed {} with the next development version",
            release_branch(release_version)
        );

        Ok(())
    }
}

/// Publishes the helm chart with a configurable command line.
pub struct HelmChartPublisher {
    runner: Arc<dyn CommandRunner>,
    command: String,
}

impl HelmChartPublisher {
    pub fn new(runner: Arc<dyn CommandRunner>, command: impl Into<String>) -> Self {
        Self {
            runner,
            command: command.into(),
        }
    }
}

#[async_trait]
impl ChartPublisher for HelmChartPublisher {
    async fn push_chart(&self, container: &str) -> Result<()> {
        let cmd = ShellCommand::shell(self.command.as_str()).in_container(container);
        self.runner.run(&cmd).await?;
        Ok(())
    }
}

/// Builds and deploys the maven site with a configurable command line.
pub struct MavenSiteDeployer {
    runner: Arc<dyn CommandRunner>,
    command: String,
}

impl MavenSiteDeployer {
    pub fn new(runner: Arc<dyn CommandRunner>, command: impl Into<String>) -> Self {
        Self {
            runner,
            command: command.into(),
        }
    }
}

#[async_trait]
impl SiteDeployer for MavenSiteDeployer {
    async fn deploy_site(&self) -> Result<()> {
        let cmd = ShellCommand::shell(self.command.as_str());
        self.runner.run(&cmd).await?;
        Ok(())
    }
}
