//! Factory wiring the concrete collaborators into a [`CapabilityManager`].
use std::sync::Arc;

use crate::{
    Result,
    adapter::{
        central::HttpArtifactSyncWatcher,
        docker::DockerImages,
        github::{GithubPullRequests, GithubRemote, UnconfiguredGithub},
        kubernetes::KubectlServiceDiscovery,
        maven::{
            HelmChartPublisher, MavenSiteDeployer, MavenStaging,
            MavenVersionBumper,
        },
        poll::PollPolicy,
        shell::ProcessRunner,
    },
    capability::{
        manager::CapabilityManager,
        traits::{CommandRunner, PullRequestCreator, PullRequestWatcher},
    },
    config::{Config, release::is_blank},
    error::StagehandError,
};

pub struct CapabilityFactory;

impl CapabilityFactory {
    /// Create a CapabilityManager backed by the host's docker, kubectl and
    /// maven, GitHub and the configured artifact repository. GitHub is only
    /// required when the next development version is pushed as a pull
    /// request, and is validated here before anything runs.
    pub fn create(config: &Config, dry_run: bool) -> Result<CapabilityManager> {
        Self::create_with_runner(
            config,
            Self::host_runner(config),
            dry_run,
            config.promote.update_next_development_version,
        )
    }

    /// Create a CapabilityManager for site deployment, which never talks to
    /// GitHub.
    pub fn create_for_site(
        config: &Config,
        dry_run: bool,
    ) -> Result<CapabilityManager> {
        Self::create_with_runner(config, Self::host_runner(config), dry_run, false)
    }

    pub fn create_with_runner(
        config: &Config,
        runner: Arc<dyn CommandRunner>,
        dry_run: bool,
        needs_pull_requests: bool,
    ) -> Result<CapabilityManager> {
        let (pull_requests, merge_watcher) =
            Self::create_github(config, needs_pull_requests)?;
        let images = Arc::new(DockerImages::new(Arc::clone(&runner)));

        let sync_poll = PollPolicy::new(
            config.polling.interval(),
            config.polling.artifact_sync_timeout(),
        );

        CapabilityManager::builder()
            .service_discovery(Arc::new(KubectlServiceDiscovery::new(
                Arc::clone(&runner),
            )))
            .staging(Arc::new(MavenStaging::new(
                Arc::clone(&runner),
                config.nexus.clone(),
            )))
            .charts(Arc::new(HelmChartPublisher::new(
                Arc::clone(&runner),
                config.commands.helm_push.clone(),
            )))
            .versions(Arc::new(MavenVersionBumper::new(
                Arc::clone(&runner),
                config.commands.git_credentials_setup.clone(),
            )))
            .pull_requests(pull_requests)
            .image_promoter(images.clone())
            .image_tagger(images)
            .merge_watcher(merge_watcher)
            .sync_watcher(Arc::new(HttpArtifactSyncWatcher::new(sync_poll)?))
            .site(Arc::new(MavenSiteDeployer::new(
                runner,
                config.commands.site_deploy.clone(),
            )))
            .dry_run(dry_run)
            .build()
    }

    fn host_runner(config: &Config) -> Arc<dyn CommandRunner> {
        Arc::new(ProcessRunner::new(config.shell.exec_in_container))
    }

    #[allow(clippy::type_complexity)]
    fn create_github(
        config: &Config,
        needs_pull_requests: bool,
    ) -> Result<(Arc<dyn PullRequestCreator>, Arc<dyn PullRequestWatcher>)>
    {
        if !needs_pull_requests {
            let creator: Arc<dyn PullRequestCreator> = Arc::new(UnconfiguredGithub);
            let watcher: Arc<dyn PullRequestWatcher> = Arc::new(UnconfiguredGithub);
            return Ok((creator, watcher));
        }

        if is_blank(&config.github.repo) {
            return Err(StagehandError::invalid_config(
                "github.repo must be set when update_next_development_version is enabled",
            ));
        }

        let remote = GithubRemote::from_config(&config.github)?;
        let poll = PollPolicy::new(
            config.polling.interval(),
            config.polling.pull_request_timeout(),
        );
        let github = Arc::new(GithubPullRequests::new(
            remote,
            config.github.base_branch.clone(),
            poll,
        )?);

        let creator: Arc<dyn PullRequestCreator> = github.clone();
        let watcher: Arc<dyn PullRequestWatcher> = github;

        Ok((creator, watcher))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::traits::MockCommandRunner;

    fn bumping_config() -> Config {
        let mut config = Config::default();
        config.promote.update_next_development_version = true;
        config
    }

    #[tokio::test]
    async fn creates_manager_without_github() {
        let manager = CapabilityFactory::create(&Config::default(), true).unwrap();
        assert!(manager.dry_run());
    }

    #[tokio::test]
    async fn missing_github_repo_fails_before_any_command_runs() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().times(0);

        let result = CapabilityFactory::create_with_runner(
            &bumping_config(),
            Arc::new(runner),
            false,
            true,
        );

        match result {
            Err(StagehandError::InvalidConfig(msg)) => {
                assert!(msg.contains("github.repo"))
            }
            Err(other) => panic!("expected invalid config, got {other:?}"),
            Ok(_) => panic!("expected invalid config"),
        }
    }

    #[tokio::test]
    async fn github_token_is_not_resolved_without_version_bump() {
        let mut config = Config::default();
        config.github.repo = "https://github.com/owner/repo".into();

        temp_env::with_var_unset("GITHUB_TOKEN", || {
            assert!(CapabilityFactory::create(&config, false).is_ok());
            assert!(CapabilityFactory::create_for_site(&config, false).is_ok());
        });
    }

    #[tokio::test]
    async fn site_manager_ignores_github_even_when_bumping() {
        let mut config = bumping_config();
        config.github.repo = "https://github.com/owner/repo".into();

        temp_env::with_var_unset("GITHUB_TOKEN", || {
            assert!(CapabilityFactory::create_for_site(&config, true).is_ok());
            assert!(matches!(
                CapabilityFactory::create(&config, true),
                Err(StagehandError::InvalidConfig(_))
            ));
        });
    }

    #[tokio::test]
    async fn creates_manager_with_github() {
        let mut config = bumping_config();
        config.github.repo = "https://github.com/owner/repo".into();
        config.github.token = Some("token".to_string().into());

        let manager = CapabilityFactory::create(&config, false).unwrap();
        assert!(!manager.dry_run());
    }

    #[tokio::test]
    async fn invalid_github_repo_is_rejected() {
        let mut config = bumping_config();
        config.github.repo = "git@github.com:owner/repo".into();
        config.github.token = Some("token".to_string().into());

        let result = CapabilityFactory::create(&config, false);
        assert!(matches!(result, Err(StagehandError::InvalidConfig(_))));
    }
}
